//! Gameplay конфигурация (tuning-константы персонажей, beam, кулдауна)
//!
//! Defaults = tuning из игровых сцен. Host может вставить свой
//! `GameplayConfig` до `SimulationPlugin` (plugin использует `init_resource`).
//!
//! Формат файла: RON, все секции опциональны (`#[serde(default)]`).

use std::path::Path;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("invalid config value `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

#[derive(Resource, Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameplayConfig {
    pub player: PlayerConfig,
    pub warrior: WarriorConfig,
    pub beam: BeamConfig,
    pub ability: AbilityConfig,
    pub camera: CameraConfig,
    pub animation: AnimationConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub max_health: u32,
    /// Горизонтальная скорость (m/s)
    pub speed: f32,
    /// Ускорение падения в воздухе (m/s²)
    pub fall_acceleration: f32,
    pub jump_velocity: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            max_health: 6,
            speed: 7.0,
            fall_acceleration: 12.0,
            jump_velocity: 6.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WarriorConfig {
    pub max_health: u32,
    pub speed: f32,
    /// Множитель lerp velocity (× delta)
    pub acceleration: f32,
    /// Ближе этого радиуса к цели warrior не подходит
    pub stop_radius: f32,
    pub detection_radius: f32,
}

impl Default for WarriorConfig {
    fn default() -> Self {
        Self {
            max_health: 5,
            speed: 3.0,
            acceleration: 7.0,
            stop_radius: 2.0,
            detection_radius: 3.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BeamConfig {
    pub speed: f32,
    /// Beam без попадания удаляется через lifetime секунд
    pub lifetime: f32,
    pub radius: f32,
    /// Точка спавна (кончик клинка) в локальных координатах игрока, -Z = вперёд
    pub spawn_offset: Vec3,
}

impl Default for BeamConfig {
    fn default() -> Self {
        Self {
            speed: 4.0,
            lifetime: 10.0,
            radius: 0.4,
            spawn_offset: Vec3::new(0.0, 1.0, -1.2),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AbilityConfig {
    /// Общий кулдаун Stab и Beam (секунды)
    pub cooldown: f32,
}

impl Default for AbilityConfig {
    fn default() -> Self {
        Self { cooldown: 15.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Доля пути до игрока за один тик (не масштабируется delta)
    pub follow_factor: f32,
    pub offset: Vec3,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            follow_factor: 0.15,
            offset: Vec3::ZERO,
        }
    }
}

/// Длительности attack-клипов и цикла удара warrior (секунды), fallback если host не прислал AnimationFinished
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub chop_duration: f32,
    pub stab_duration: f32,
    pub shoot_duration: f32,
    /// Один цикл удара кулаком warrior
    pub punch_duration: f32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            chop_duration: 0.9,
            stab_duration: 1.0,
            shoot_duration: 1.1,
            punch_duration: 1.0,
        }
    }
}

impl GameplayConfig {
    pub fn from_ron_str(source: &str) -> Result<Self, ConfigError> {
        let config: GameplayConfig = ron::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_ron_str(&source)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        fn positive(value: f32, field: &'static str) -> Result<(), ConfigError> {
            if value > 0.0 && value.is_finite() {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: "must be a positive finite number",
                })
            }
        }

        if self.player.max_health == 0 {
            return Err(ConfigError::Invalid {
                field: "player.max_health",
                reason: "must be at least 1",
            });
        }
        if self.warrior.max_health == 0 {
            return Err(ConfigError::Invalid {
                field: "warrior.max_health",
                reason: "must be at least 1",
            });
        }

        positive(self.player.speed, "player.speed")?;
        positive(self.player.fall_acceleration, "player.fall_acceleration")?;
        positive(self.player.jump_velocity, "player.jump_velocity")?;
        positive(self.warrior.speed, "warrior.speed")?;
        positive(self.warrior.acceleration, "warrior.acceleration")?;
        positive(self.warrior.stop_radius, "warrior.stop_radius")?;
        positive(self.warrior.detection_radius, "warrior.detection_radius")?;
        positive(self.beam.speed, "beam.speed")?;
        positive(self.beam.lifetime, "beam.lifetime")?;
        positive(self.beam.radius, "beam.radius")?;
        positive(self.ability.cooldown, "ability.cooldown")?;
        positive(self.animation.chop_duration, "animation.chop_duration")?;
        positive(self.animation.stab_duration, "animation.stab_duration")?;
        positive(self.animation.shoot_duration, "animation.shoot_duration")?;
        positive(self.animation.punch_duration, "animation.punch_duration")?;

        let factor = self.camera.follow_factor;
        if !(factor > 0.0 && factor <= 1.0) {
            return Err(ConfigError::Invalid {
                field: "camera.follow_factor",
                reason: "must be in (0, 1]",
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tuning() {
        let config = GameplayConfig::default();

        assert_eq!(config.player.max_health, 6);
        assert_eq!(config.player.speed, 7.0);
        assert_eq!(config.warrior.max_health, 5);
        assert_eq!(config.warrior.stop_radius, 2.0);
        assert_eq!(config.beam.speed, 4.0);
        assert_eq!(config.ability.cooldown, 15.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_ron_keeps_defaults() {
        let config = GameplayConfig::from_ron_str("(warrior: (max_health: 3))").unwrap();

        assert_eq!(config.warrior.max_health, 3);
        assert_eq!(config.warrior.speed, 3.0);
        assert_eq!(config.player, PlayerConfig::default());
    }

    #[test]
    fn test_zero_health_rejected() {
        let err = GameplayConfig::from_ron_str("(player: (max_health: 0))").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "player.max_health",
                ..
            }
        ));
    }

    #[test]
    fn test_camera_factor_out_of_range_rejected() {
        let err = GameplayConfig::from_ron_str("(camera: (follow_factor: 1.5))").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "camera.follow_factor",
                ..
            }
        ));
    }

    #[test]
    fn test_zero_punch_duration_rejected() {
        let err = GameplayConfig::from_ron_str("(animation: (punch_duration: 0.0))").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "animation.punch_duration",
                ..
            }
        ));
    }

    #[test]
    fn test_garbage_is_parse_error() {
        let err = GameplayConfig::from_ron_str("(player: [").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = GameplayConfig::load("/definitely/not/here.ron").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
