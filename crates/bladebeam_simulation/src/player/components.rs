//! Player компоненты

use bevy::prelude::*;

use crate::components::CharacterClip;
use crate::config::{AnimationConfig, PlayerConfig};

/// Marker component для player-controlled entity
///
/// В одном уровне ровно один игрок. Input systems используют `With<Player>`.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Player;

/// Параметры движения игрока
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct PlayerController {
    pub speed: f32,
    pub fall_acceleration: f32,
    pub jump_velocity: f32,
}

impl From<&PlayerConfig> for PlayerController {
    fn from(config: &PlayerConfig) -> Self {
        Self {
            speed: config.speed,
            fall_acceleration: config.fall_acceleration,
            jump_velocity: config.jump_velocity,
        }
    }
}

/// Дочерние area игрока
#[derive(Component, Debug, Clone, Copy)]
pub struct PlayerHitboxes {
    pub body: Entity,
    pub sword: Entity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum AttackKind {
    /// Обычный удар мечом
    Chop,
    /// Limit: укол, убивает с одного удара
    Stab,
    /// Limit: blade beam
    Shoot,
}

impl AttackKind {
    pub fn clip(&self) -> CharacterClip {
        match self {
            AttackKind::Chop => CharacterClip::MeleeChop,
            AttackKind::Stab => CharacterClip::MeleeStab,
            AttackKind::Shoot => CharacterClip::SpellcastShoot,
        }
    }

    pub fn duration(&self, config: &AnimationConfig) -> f32 {
        match self {
            AttackKind::Chop => config.chop_duration,
            AttackKind::Stab => config.stab_duration,
            AttackKind::Shoot => config.shoot_duration,
        }
    }

    /// Удар мечом (Chop, Stab), а не выстрел
    pub fn is_melee(&self) -> bool {
        !matches!(self, AttackKind::Shoot)
    }

    pub fn is_limit(&self) -> bool {
        matches!(self, AttackKind::Stab | AttackKind::Shoot)
    }
}

/// Attack FSM: Ready → Attacking { remaining } → Ready
///
/// Пока идёт атака, locomotion-клип не включается и меч остаётся активным.
/// Выход из Attacking: истёк `remaining` или host прислал AnimationFinished.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub enum AttackState {
    #[default]
    Ready,
    Attacking {
        kind: AttackKind,
        remaining: f32,
    },
}

impl AttackState {
    pub fn start(&mut self, kind: AttackKind, config: &AnimationConfig) {
        *self = AttackState::Attacking {
            kind,
            remaining: kind.duration(config),
        };
    }

    pub fn is_attacking(&self) -> bool {
        matches!(self, AttackState::Attacking { .. })
    }

    pub fn tick(&mut self, delta: f32) {
        if let AttackState::Attacking { remaining, .. } = self {
            *remaining -= delta;
            if *remaining <= 0.0 {
                *self = AttackState::Ready;
            }
        }
    }

    pub fn finish(&mut self) {
        *self = AttackState::Ready;
    }
}

/// Камера, плавно следующая за игроком
#[derive(Component, Debug, Clone, Copy)]
pub struct CameraRig {
    pub target: Entity,
}
