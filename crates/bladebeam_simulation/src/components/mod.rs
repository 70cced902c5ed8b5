//! ECS Components, общие для игрока, warrior и beam
//!
//! - actor: Health, Facing, CharacterBody, CharacterAnimation
//! - hitbox: типизированные area-коллайдеры (HitboxTag, Hitbox)

pub mod actor;
pub mod hitbox;

pub use actor::*;
pub use hitbox::*;
