//! Hitbox — типизированные area-коллайдеры
//!
//! Каждая area (меч, кулак, тело, detection, beam) несёт `HitboxTag`.
//! Overlap-события маршрутизируются сравнением тегов по значению.

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum HitboxTag {
    /// Тело игрока (получает удары кулака)
    PlayerBody,
    /// Клинок игрока (включён только во время атаки)
    PlayerSword,
    /// Blade beam (hitbox на самом beam entity)
    PlayerBeam,
    /// Тело warrior
    EnemyBody,
    /// Кулак warrior (включён только пока warrior атакует)
    EnemyFist,
    /// Зона обнаружения игрока вокруг warrior
    EnemyDetection,
}

impl HitboxTag {
    /// Наносит ли этот hitbox урон врагам
    pub fn damages_enemies(&self) -> bool {
        matches!(self, HitboxTag::PlayerSword | HitboxTag::PlayerBeam)
    }

    /// Может ли этот hitbox принять удар игрока
    pub fn is_enemy_hurtbox(&self) -> bool {
        matches!(self, HitboxTag::EnemyBody | HitboxTag::EnemyFist)
    }
}

/// Area-коллайдер персонажа или beam
///
/// `owner` — персонаж (или beam), которому принадлежит area.
/// Позиция: Transform entity, смещённый и повёрнутый Transform owner'а,
/// если hitbox — дочерний entity.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Hitbox {
    pub tag: HitboxTag,
    pub owner: Entity,
    /// Выключенная area не участвует в overlap (как disabled CollisionShape)
    pub enabled: bool,
    pub radius: f32,
}

impl Hitbox {
    pub fn new(tag: HitboxTag, owner: Entity, radius: f32) -> Self {
        Self {
            tag,
            owner,
            enabled: true,
            radius,
        }
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_roles() {
        assert!(HitboxTag::PlayerSword.damages_enemies());
        assert!(HitboxTag::PlayerBeam.damages_enemies());
        assert!(!HitboxTag::EnemyFist.damages_enemies());

        assert!(HitboxTag::EnemyFist.is_enemy_hurtbox());
        assert!(HitboxTag::EnemyBody.is_enemy_hurtbox());
        assert!(!HitboxTag::EnemyDetection.is_enemy_hurtbox());
        assert!(!HitboxTag::PlayerBody.is_enemy_hurtbox());
    }

    #[test]
    fn test_disabled_builder() {
        let hitbox = Hitbox::new(HitboxTag::EnemyFist, Entity::PLACEHOLDER, 0.4).disabled();
        assert!(!hitbox.enabled);
        assert_eq!(hitbox.radius, 0.4);
    }
}
