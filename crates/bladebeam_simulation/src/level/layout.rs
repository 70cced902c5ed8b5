//! Layout уровней: где стоят игрок и warriors
//!
//! Точки спавна warriors слегка дрожат (±SPAWN_JITTER по X/Z) через
//! DeterministicRng — одинаковый seed даёт одинаковую расстановку.

use bevy::prelude::*;
use rand::Rng;

use super::Level;
use crate::config::GameplayConfig;
use crate::enemy::spawn_warrior;
use crate::player::{spawn_camera_rig, spawn_player};
use crate::DeterministicRng;

const SPAWN_JITTER: f32 = 0.5;

#[derive(Debug, Clone, PartialEq)]
pub struct LevelLayout {
    pub player_spawn: Option<Vec3>,
    pub warrior_spawns: Vec<Vec3>,
}

impl LevelLayout {
    pub fn for_level(level: Level) -> Self {
        match level {
            Level::Main => Self {
                player_spawn: None,
                warrior_spawns: Vec::new(),
            },
            Level::Level1 => Self {
                player_spawn: Some(Vec3::ZERO),
                warrior_spawns: vec![Vec3::new(0.0, 0.0, -12.0), Vec3::new(8.0, 0.0, -14.0)],
            },
            Level::Level2 => Self {
                player_spawn: Some(Vec3::ZERO),
                warrior_spawns: vec![
                    Vec3::new(-8.0, 0.0, -12.0),
                    Vec3::new(0.0, 0.0, -15.0),
                    Vec3::new(8.0, 0.0, -12.0),
                ],
            },
            Level::Level3 => Self {
                player_spawn: Some(Vec3::ZERO),
                warrior_spawns: vec![
                    Vec3::new(-10.0, 0.0, -10.0),
                    Vec3::new(10.0, 0.0, -10.0),
                    Vec3::new(-10.0, 0.0, 10.0),
                    Vec3::new(10.0, 0.0, 10.0),
                ],
            },
        }
    }
}

/// Что заспавнил уровень
#[derive(Debug, Clone, Default)]
pub struct LevelSpawn {
    pub player: Option<Entity>,
    pub warriors: Vec<Entity>,
}

pub fn spawn_level(
    commands: &mut Commands,
    level: Level,
    config: &GameplayConfig,
    rng: &mut DeterministicRng,
) -> LevelSpawn {
    let layout = LevelLayout::for_level(level);
    let mut spawned = LevelSpawn::default();

    if let Some(position) = layout.player_spawn {
        let player = spawn_player(commands, position, config);
        spawn_camera_rig(commands, player, position + config.camera.offset);
        spawned.player = Some(player);
    }

    for base in layout.warrior_spawns {
        let jitter = Vec3::new(
            rng.rng.gen_range(-SPAWN_JITTER..SPAWN_JITTER),
            0.0,
            rng.rng.gen_range(-SPAWN_JITTER..SPAWN_JITTER),
        );
        spawned
            .warriors
            .push(spawn_warrior(commands, base + jitter, config));
    }

    spawned
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_main_is_empty() {
        let layout = LevelLayout::for_level(Level::Main);
        assert!(layout.player_spawn.is_none());
        assert!(layout.warrior_spawns.is_empty());
    }

    #[test]
    fn test_levels_get_harder() {
        let counts: Vec<usize> = [Level::Level1, Level::Level2, Level::Level3]
            .into_iter()
            .map(|level| LevelLayout::for_level(level).warrior_spawns.len())
            .collect();

        assert_eq!(counts, vec![2, 3, 4]);
    }

    #[test]
    fn test_warriors_spawn_outside_detection_range() {
        let config = GameplayConfig::default();
        let reach = config.warrior.detection_radius + SPAWN_JITTER * 2.0;

        for level in [Level::Level1, Level::Level2, Level::Level3] {
            let layout = LevelLayout::for_level(level);
            let player = layout.player_spawn.unwrap();
            for spawn in layout.warrior_spawns {
                assert!(spawn.distance(player) > reach, "{:?} spawn {:?} too close", level, spawn);
            }
        }
    }
}
