//! Player input — именованные действия
//!
//! Опрос устройств делает host-движок: он жмёт/отпускает `GameAction` в
//! resource `ButtonInput<GameAction>`. Симуляция только читает состояние.
//! `just_pressed` сбрасывается в конце каждого fixed тика, поэтому нажатие
//! между тиками не теряется.

use bevy::input::ButtonInput;
use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum GameAction {
    Up,
    Down,
    Left,
    Right,
    Jump,
    Attack,
    Shoot,
    LimitBreak,
}

impl GameAction {
    pub const ALL: [GameAction; 8] = [
        GameAction::Up,
        GameAction::Down,
        GameAction::Left,
        GameAction::Right,
        GameAction::Jump,
        GameAction::Attack,
        GameAction::Shoot,
        GameAction::LimitBreak,
    ];

    /// Имя action в input map движка
    pub fn name(&self) -> &'static str {
        match self {
            GameAction::Up => "up",
            GameAction::Down => "down",
            GameAction::Left => "left",
            GameAction::Right => "right",
            GameAction::Jump => "jump",
            GameAction::Attack => "attack",
            GameAction::Shoot => "shoot",
            GameAction::LimitBreak => "LimitBreak",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|action| action.name() == name)
    }
}

/// Направление движения из зажатых стрелок (не нормализовано)
///
/// right → +X, left → -X, down → +Z, up → -Z
pub fn movement_direction(input: &ButtonInput<GameAction>) -> Vec3 {
    let mut direction = Vec3::ZERO;

    if input.pressed(GameAction::Right) {
        direction.x += 1.0;
    }
    if input.pressed(GameAction::Left) {
        direction.x -= 1.0;
    }
    if input.pressed(GameAction::Down) {
        direction.z += 1.0;
    }
    if input.pressed(GameAction::Up) {
        direction.z -= 1.0;
    }

    direction
}

/// System: сброс just_pressed/just_released после тика
pub fn clear_action_edges(mut input: ResMut<ButtonInput<GameAction>>) {
    input.clear();
}
