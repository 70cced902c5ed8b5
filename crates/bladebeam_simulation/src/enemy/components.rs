//! Warrior компоненты

use bevy::prelude::*;

use crate::config::WarriorConfig;

/// Melee враг: идёт к игроку, бьёт кулаком, когда игрок в detection зоне
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Warrior {
    pub speed: f32,
    pub acceleration: f32,
    pub stop_radius: f32,
    /// Выставляется detection зоной
    pub attacking: bool,
}

impl From<&WarriorConfig> for Warrior {
    fn from(config: &WarriorConfig) -> Self {
        Self {
            speed: config.speed,
            acceleration: config.acceleration,
            stop_radius: config.stop_radius,
            attacking: false,
        }
    }
}

impl Warrior {
    /// Скорость с учётом stop radius: у цели warrior останавливается
    pub fn speed_towards(&self, distance_to_target: f32) -> f32 {
        if distance_to_target <= self.stop_radius {
            0.0
        } else {
            self.speed
        }
    }

    /// Velocity следующего тика: lerp к direction × speed с шагом acceleration × delta
    pub fn steer(&self, velocity: Vec3, direction: Vec3, distance_to_target: f32, delta: f32) -> Vec3 {
        let desired = direction * self.speed_towards(distance_to_target);
        velocity.lerp(desired, self.acceleration * delta)
    }
}

/// Цикл удара кулаком: Idle → Swinging → Recovering → Swinging …
///
/// Кулак включён только в Swinging. Recovering длится один тик с выключенным
/// кулаком, поэтому каждый следующий удар даёт новый AreaEntered.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub enum PunchCycle {
    #[default]
    Idle,
    Swinging {
        remaining: f32,
    },
    Recovering,
}

impl PunchCycle {
    /// Шаг цикла; возвращает, должен ли кулак быть активен в этом тике
    pub fn advance(&mut self, attacking: bool, finished: bool, delta: f32, punch_duration: f32) -> bool {
        if !attacking {
            *self = PunchCycle::Idle;
            return false;
        }

        *self = match *self {
            PunchCycle::Idle | PunchCycle::Recovering => PunchCycle::Swinging {
                remaining: punch_duration,
            },
            PunchCycle::Swinging { remaining } => {
                let remaining = remaining - delta;
                if finished || remaining <= 0.0 {
                    PunchCycle::Recovering
                } else {
                    PunchCycle::Swinging { remaining }
                }
            }
        };

        self.fist_active()
    }

    pub fn fist_active(&self) -> bool {
        matches!(self, PunchCycle::Swinging { .. })
    }
}

/// Navigation agent (pathfinding делает движок)
///
/// ECS пишет `target_position`, движок (или headless stub) пишет
/// `next_path_position` — следующую точку пути.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct NavigationAgent {
    pub target_position: Vec3,
    pub next_path_position: Vec3,
}

/// Дочерние area warrior
#[derive(Component, Debug, Clone, Copy)]
pub struct WarriorHitboxes {
    pub body: Entity,
    pub fist: Entity,
    pub detection: Entity,
}
