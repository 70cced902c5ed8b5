//! Level flow: Main → Level1 → Level2 → Level3 → Main
//!
//! - Победа: все враги уровня мертвы, игрок жив → следующий уровень
//! - Смерть игрока → перезагрузка текущего уровня
//!
//! "Загрузка сцены" в ECS = despawn всех `LevelEntity` + spawn layout уровня.
//! Session state и кулдаун способностей при этом сбрасываются.

use bevy::prelude::*;

pub mod layout;

pub use layout::{spawn_level, LevelLayout, LevelSpawn};

use crate::components::Health;
use crate::config::GameplayConfig;
use crate::player::Player;
use crate::session::{AbilityCooldown, SessionState};
use crate::{DeterministicRng, GameplaySet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect)]
pub enum Level {
    /// Стартовая сцена (без боя)
    #[default]
    Main,
    Level1,
    Level2,
    Level3,
}

impl Level {
    pub fn name(&self) -> &'static str {
        match self {
            Level::Main => "Main",
            Level::Level1 => "Level1",
            Level::Level2 => "Level2",
            Level::Level3 => "Level3",
        }
    }

    /// Уровень, куда ведёт победа (Level3 замыкается обратно на Main)
    pub fn next(&self) -> Option<Level> {
        match self {
            Level::Main => None,
            Level::Level1 => Some(Level::Level2),
            Level::Level2 => Some(Level::Level3),
            Level::Level3 => Some(Level::Main),
        }
    }

    pub fn is_combat(&self) -> bool {
        !matches!(self, Level::Main)
    }
}

#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
#[reflect(Resource)]
pub struct CurrentLevel(pub Level);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionReason {
    /// Первый запуск / выбор уровня из меню
    Start,
    /// Уровень зачищен
    Advance,
    /// Игрок погиб
    Reload,
}

/// Запрос на смену уровня (применяется в конце тика)
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelTransition {
    pub target: Level,
    pub reason: TransitionReason,
}

impl LevelTransition {
    pub fn start(level: Level) -> Self {
        Self {
            target: level,
            reason: TransitionReason::Start,
        }
    }

    pub fn reload(level: Level) -> Self {
        Self {
            target: level,
            reason: TransitionReason::Reload,
        }
    }
}

/// Маркер: entity принадлежит сцене уровня и удаляется при смене уровня
///
/// Ставится только на корневые entity (дочерние hitbox'ы удаляются вместе с родителем).
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct LevelEntity;

/// Run condition: уровень ещё не зачищен
///
/// Пока true — игрок двигается и атакует. На зачищенном боевом уровне тик
/// уходит только на переход.
pub fn level_in_progress(level: Res<CurrentLevel>, session: Res<SessionState>) -> bool {
    !(level.0.is_combat() && session.all_enemies_defeated())
}

/// System: проверка победы
pub fn check_level_complete(
    level: Res<CurrentLevel>,
    session: Res<SessionState>,
    players: Query<&Health, With<Player>>,
    mut transitions: EventWriter<LevelTransition>,
) {
    if !level.0.is_combat() || !session.all_enemies_defeated() {
        return;
    }

    let Ok(health) = players.single() else {
        return;
    };

    if !health.is_alive() {
        return;
    }

    if let Some(next) = level.0.next() {
        transitions.write(LevelTransition {
            target: next,
            reason: TransitionReason::Advance,
        });
    }
}

/// System: применение LevelTransition ("смена сцены")
///
/// Если за тик пришло несколько запросов — выигрывает последний.
pub fn apply_level_transitions(
    mut commands: Commands,
    mut transitions: EventReader<LevelTransition>,
    level_entities: Query<Entity, With<LevelEntity>>,
    mut current: ResMut<CurrentLevel>,
    mut session: ResMut<SessionState>,
    mut cooldown: ResMut<AbilityCooldown>,
    mut rng: ResMut<DeterministicRng>,
    config: Res<GameplayConfig>,
) {
    let Some(transition) = transitions.read().last().copied() else {
        return;
    };

    for entity in level_entities.iter() {
        commands.entity(entity).try_despawn();
    }

    session.reset();
    *cooldown = AbilityCooldown::new(config.ability.cooldown);

    crate::logger::log_info(&format!(
        "Level transition {:?}: {} → {}",
        transition.reason,
        current.0.name(),
        transition.target.name()
    ));

    current.0 = transition.target;
    let spawned = spawn_level(&mut commands, transition.target, &config, &mut rng);

    crate::logger::log(&format!(
        "{} loaded: player={:?}, {} warriors",
        transition.target.name(),
        spawned.player,
        spawned.warriors.len()
    ));
}

pub struct LevelPlugin;

impl Plugin for LevelPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CurrentLevel>()
            .add_event::<LevelTransition>()
            .add_systems(
                FixedUpdate,
                (
                    check_level_complete.in_set(GameplaySet::Level),
                    apply_level_transitions.in_set(GameplaySet::Transition),
                ),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_progression_loops_to_main() {
        assert_eq!(Level::Level1.next(), Some(Level::Level2));
        assert_eq!(Level::Level2.next(), Some(Level::Level3));
        assert_eq!(Level::Level3.next(), Some(Level::Main));
        assert_eq!(Level::Main.next(), None);
    }

    #[test]
    fn test_only_main_is_peaceful() {
        assert!(!Level::Main.is_combat());
        assert!(Level::Level1.is_combat());
        assert!(Level::Level3.is_combat());
    }

    #[test]
    fn test_transition_constructors() {
        let reload = LevelTransition::reload(Level::Level2);
        assert_eq!(reload.target, Level::Level2);
        assert_eq!(reload.reason, TransitionReason::Reload);
        assert_eq!(LevelTransition::start(Level::Level1).reason, TransitionReason::Start);
    }
}
