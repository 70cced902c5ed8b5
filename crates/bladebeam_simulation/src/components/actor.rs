//! Базовые компоненты персонажей: Health, Facing, CharacterBody, CharacterAnimation

use bevy::prelude::*;

/// Здоровье персонажа (игрок, warrior)
///
/// Инвариант: 0 ≤ current ≤ max
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Health {
    pub current: u32,
    pub max: u32,
}

impl Health {
    pub fn new(max: u32) -> Self {
        Self { current: max, max }
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.current = self.current.saturating_sub(amount);
    }

    pub fn kill(&mut self) {
        self.current = 0;
    }
}

/// Направление взгляда модели (горизонтальный unit-вектор)
///
/// Аналог basis модели: игрок поворачивается по input, warrior — по пути.
/// Beam летит вдоль текущего Facing стрелявшего.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Facing(pub Vec3);

impl Default for Facing {
    fn default() -> Self {
        Self(Vec3::NEG_Z)
    }
}

impl Facing {
    /// Поворачивает Facing и Transform к direction (нулевой direction игнорируется)
    pub fn turn_towards(&mut self, transform: &mut Transform, direction: Vec3) {
        let Some(direction) = direction.try_normalize() else {
            return;
        };
        self.0 = direction;

        let horizontal = Vec3::new(direction.x, 0.0, direction.z);
        if horizontal.length_squared() > f32::EPSILON {
            transform.look_to(horizontal, Vec3::Y);
        }
    }
}

/// Kinematic тело персонажа (velocity + контакт с полом)
///
/// ECS пишет velocity, движок (или headless physics) делает move-and-slide
/// и выставляет `on_floor`.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct CharacterBody {
    pub velocity: Vec3,
    pub on_floor: bool,
}

/// Анимационные клипы персонажей (имена = клипы в ассетах)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum CharacterClip {
    Idle,
    Walking,
    JumpIdle,
    MeleeChop,
    MeleeStab,
    SpellcastShoot,
    SkeletonWalk,
    SkeletonPunch,
}

impl CharacterClip {
    pub fn name(&self) -> &'static str {
        match self {
            CharacterClip::Idle => "Idle",
            CharacterClip::Walking => "Walking_A",
            CharacterClip::JumpIdle => "Jump_Idle",
            CharacterClip::MeleeChop => "1H_Melee_Attack_Chop",
            CharacterClip::MeleeStab => "1H_Melee_Attack_Stab",
            CharacterClip::SpellcastShoot => "Spellcast_Shoot",
            CharacterClip::SkeletonWalk => "Walking_D_Skeletons",
            CharacterClip::SkeletonPunch => "Unarmed_Melee_Attack_Punch_A",
        }
    }
}

/// Текущий клип персонажа
///
/// Host-движок читает `Changed<CharacterAnimation>` и запускает клип у себя.
/// Обновлять через `set_if_neq`, чтобы повторный play того же клипа не
/// триггерил change detection.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct CharacterAnimation {
    pub current: CharacterClip,
}

impl CharacterAnimation {
    pub fn new(clip: CharacterClip) -> Self {
        Self { current: clip }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_damage_saturates() {
        let mut health = Health::new(5);

        health.take_damage(1);
        assert_eq!(health.current, 4);
        assert!(health.is_alive());

        health.take_damage(10);
        assert_eq!(health.current, 0);
        assert!(!health.is_alive());
    }

    #[test]
    fn test_health_kill() {
        let mut health = Health::new(5);
        health.kill();
        assert!(!health.is_alive());
        assert_eq!(health.max, 5);
    }

    #[test]
    fn test_facing_ignores_zero_direction() {
        let mut facing = Facing::default();
        let mut transform = Transform::default();

        facing.turn_towards(&mut transform, Vec3::ZERO);
        assert_eq!(facing.0, Vec3::NEG_Z);
    }

    #[test]
    fn test_facing_rotates_transform() {
        let mut facing = Facing::default();
        let mut transform = Transform::default();

        facing.turn_towards(&mut transform, Vec3::new(3.0, 0.0, 0.0));

        assert_eq!(facing.0, Vec3::X);
        // Bevy forward = -Z локальной оси
        assert!(transform.forward().as_vec3().distance(Vec3::X) < 1e-4);
    }

    #[test]
    fn test_clip_names() {
        assert_eq!(CharacterClip::MeleeChop.name(), "1H_Melee_Attack_Chop");
        assert_eq!(CharacterClip::SkeletonPunch.name(), "Unarmed_Melee_Attack_Punch_A");
    }
}
