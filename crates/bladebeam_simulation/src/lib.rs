//! Bladebeam Simulation Core
//!
//! Gameplay на Bevy 0.16 ECS: рыцарь (игрок), skeleton warrior (melee AI),
//! blade beam (снаряд limit-способности), общий session state.
//!
//! Движок (физика, навмеш, анимация, рендер) — внешний сервис:
//! - ECS = правила игры (урон, атаки, AI, смена уровней)
//! - движок = move-and-slide, pathfinding, overlap сигналы, клипы
//!
//! Для тестов и headless бинарника движок заменяет `HeadlessPhysicsPlugin`.

use bevy::input::ButtonInput;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Duration;

pub mod beam;
pub mod combat;
pub mod components;
pub mod config;
pub mod enemy;
pub mod hud;
pub mod input;
pub mod level;
pub mod logger;
pub mod physics;
pub mod player;
pub mod session;

pub use beam::{spawn_beam, Beam, BeamPlugin};
pub use combat::{
    AnimationFinished, AreaEntered, AreaExited, BeamImpact, CombatPlugin, DetectionChanged, EnemyHit,
    EntityDied, PlayerHit,
};
pub use components::*;
pub use config::{ConfigError, GameplayConfig};
pub use enemy::{spawn_warrior, EnemyPlugin, NavigationAgent, PunchCycle, Warrior};
pub use hud::{HudPlugin, HudState};
pub use input::GameAction;
pub use level::{CurrentLevel, Level, LevelPlugin, LevelTransition, TransitionReason};
pub use logger::{init_logger, log, log_error, log_info, log_warning};
pub use physics::{HeadlessPhysicsPlugin, RapierBridgePlugin};
pub use player::{spawn_player, AttackState, Player, PlayerPlugin};
pub use session::{AbilityCooldown, SessionState};

/// Частота simulation tick
pub const TICK_RATE_HZ: f64 = 60.0;

/// Порядок gameplay систем внутри одного FixedUpdate тика
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameplaySet {
    /// Таймеры, учёт новых entity
    Bookkeeping,
    /// Проверка победы
    Level,
    /// Цели навигации (и headless pathfinding)
    Navigation,
    /// Input/AI → velocity, полёт beam
    Locomotion,
    /// Move-and-slide + overlap (движок или headless)
    Physics,
    /// Overlap сигналы → типизированные удары
    Routing,
    /// Применение урона, смерти
    Combat,
    /// Атаки, способности, анимации
    Actions,
    /// Камера, HUD
    Presentation,
    /// Смена уровня, сброс input edges
    Transition,
}

/// Главный plugin симуляции (объединяет все подсистемы)
///
/// Физику не подключает: нужен `HeadlessPhysicsPlugin` или
/// `RapierBridgePlugin` + Rapier.
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            FixedUpdate,
            (
                GameplaySet::Bookkeeping,
                GameplaySet::Level,
                GameplaySet::Navigation,
                GameplaySet::Locomotion,
                GameplaySet::Physics,
                GameplaySet::Routing,
                GameplaySet::Combat,
                GameplaySet::Actions,
                GameplaySet::Presentation,
                GameplaySet::Transition,
            )
                .chain(),
        );

        // Host может вставить свой config/seed до plugin
        app.init_resource::<GameplayConfig>();
        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(42));
        }
        if !app.world().contains_resource::<AbilityCooldown>() {
            let cooldown = app.world().resource::<GameplayConfig>().ability.cooldown;
            app.insert_resource(AbilityCooldown::new(cooldown));
        }

        app.insert_resource(Time::<Fixed>::from_hz(TICK_RATE_HZ))
            .init_resource::<SessionState>()
            .init_resource::<ButtonInput<GameAction>>()
            .add_plugins((
                CombatPlugin,
                LevelPlugin,
                PlayerPlugin,
                EnemyPlugin,
                BeamPlugin,
                HudPlugin,
            ))
            .add_systems(
                FixedUpdate,
                (
                    session::tick_ability_cooldown.in_set(GameplaySet::Bookkeeping),
                    input::clear_action_edges
                        .after(level::apply_level_transitions)
                        .in_set(GameplaySet::Transition),
                ),
            );
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
///
/// Время ручное: каждый `app.update()` = ровно 1/60 s, то есть один
/// FixedUpdate тик (см. `step_fixed`).
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(Time::<Fixed>::from_hz(TICK_RATE_HZ))
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
            1.0 / TICK_RATE_HZ,
        )));

    app
}

/// Headless app со всей игрой (симуляция + headless физика)
pub fn create_headless_game(seed: u64) -> App {
    let mut app = create_headless_app(seed);
    app.add_plugins((SimulationPlugin, HeadlessPhysicsPlugin));
    app
}

/// Прогоняет ровно `ticks` FixedUpdate тиков
///
/// Первый `app.update()` идёт с нулевой delta (FixedUpdate не срабатывает),
/// поэтому считаем тики по `Time<Fixed>`, а не по вызовам update.
pub fn step_fixed(app: &mut App, ticks: u32) {
    let target = fixed_ticks_elapsed(app) + ticks as u64;
    let mut guard = ticks * 4 + 4;

    while fixed_ticks_elapsed(app) < target && guard > 0 {
        app.update();
        guard -= 1;
    }
}

fn fixed_ticks_elapsed(app: &App) -> u64 {
    let time = app.world().resource::<Time<Fixed>>();
    let timestep = time.timestep().as_nanos().max(1);
    (time.elapsed().as_nanos() / timestep) as u64
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    // Сериализуем в байты через Debug (простейший способ)
    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
