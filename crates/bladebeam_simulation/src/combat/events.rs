//! Combat events
//!
//! Engine → ECS: AreaEntered / AreaExited (area-overlap сигналы),
//! AnimationFinished (конец клипа).
//! ECS внутри: EnemyHit, PlayerHit, BeamImpact, DetectionChanged, EntityDied.

use bevy::prelude::*;

use crate::components::HitboxTag;

/// Сигнал движка: `other` вошёл в `area`
///
/// Движок шлёт сигнал каждой area отдельно, поэтому одно пересечение двух
/// area приходит двумя событиями (area/other поменяны местами).
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct AreaEntered {
    pub area: Entity,
    pub other: Entity,
}

/// Сигнал движка: `other` покинул `area`
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct AreaExited {
    pub area: Entity,
    pub other: Entity,
}

/// Сигнал движка: у персонажа доигран текущий клип
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct AnimationFinished {
    pub entity: Entity,
}

/// Warrior получил удар мечом или beam
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct EnemyHit {
    pub enemy: Entity,
    pub source: HitboxTag,
}

/// Игрок получил удар кулаком
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct PlayerHit {
    pub player: Entity,
}

/// Beam коснулся hitbox врага и должен исчезнуть
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct BeamImpact {
    pub beam: Entity,
}

/// Игрок вошёл в detection зону warrior (или вышел из неё)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct DetectionChanged {
    pub warrior: Entity,
    pub player_inside: bool,
}

/// Персонаж умер (health == 0)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct EntityDied {
    pub entity: Entity,
    /// true если смерть от limit-удара
    pub by_limit: bool,
}
