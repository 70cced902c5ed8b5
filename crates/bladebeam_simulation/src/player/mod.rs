//! Player domain — рыцарь под управлением игрока
//!
//! Содержит:
//! - Player, PlayerController, AttackState, CameraRig (components)
//! - движение, атаки/limit-способности, урон, камера (systems)
//! - spawn helpers

use bevy::prelude::*;

pub mod components;
pub mod systems;

pub use components::*;
pub use systems::*;

use crate::components::{CharacterAnimation, CharacterBody, CharacterClip, Facing, Health, Hitbox, HitboxTag};
use crate::config::GameplayConfig;
use crate::level::{level_in_progress, LevelEntity};
use crate::physics::rapier_bridge::sensor_collider;
use crate::GameplaySet;

const BODY_RADIUS: f32 = 0.6;
const BODY_OFFSET: Vec3 = Vec3::new(0.0, 1.0, 0.0);
const SWORD_RADIUS: f32 = 0.7;
/// Клинок перед рыцарем (-Z = вперёд)
const SWORD_OFFSET: Vec3 = Vec3::new(0.0, 1.0, -1.0);

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            (
                player_locomotion
                    .in_set(GameplaySet::Locomotion)
                    .run_if(level_in_progress),
                apply_player_hits.in_set(GameplaySet::Combat),
                (tick_player_attacks, player_actions)
                    .chain()
                    .in_set(GameplaySet::Actions)
                    .run_if(level_in_progress),
                follow_camera
                    .in_set(GameplaySet::Presentation)
                    .run_if(level_in_progress),
            ),
        );
    }
}

/// Spawn игрока: тело + дочерние area (body, sword)
pub fn spawn_player(commands: &mut Commands, position: Vec3, config: &GameplayConfig) -> Entity {
    let player = commands
        .spawn((
            Player,
            PlayerController::from(&config.player),
            Health::new(config.player.max_health),
            CharacterBody {
                velocity: Vec3::ZERO,
                on_floor: true,
            },
            Facing::default(),
            AttackState::default(),
            CharacterAnimation::new(CharacterClip::Idle),
            Transform::from_translation(position),
            LevelEntity,
        ))
        .id();

    let body = commands
        .spawn((
            Hitbox::new(HitboxTag::PlayerBody, player, BODY_RADIUS),
            Transform::from_translation(BODY_OFFSET),
            sensor_collider(HitboxTag::PlayerBody, BODY_RADIUS),
            ChildOf(player),
        ))
        .id();

    let sword = commands
        .spawn((
            Hitbox::new(HitboxTag::PlayerSword, player, SWORD_RADIUS).disabled(),
            Transform::from_translation(SWORD_OFFSET),
            sensor_collider(HitboxTag::PlayerSword, SWORD_RADIUS),
            ChildOf(player),
        ))
        .id();

    commands.entity(player).insert(PlayerHitboxes { body, sword });

    crate::logger::log(&format!("Spawned player {:?} at {:?}", player, position));

    player
}

pub fn spawn_camera_rig(commands: &mut Commands, target: Entity, position: Vec3) -> Entity {
    commands
        .spawn((
            CameraRig { target },
            Transform::from_translation(position),
            LevelEntity,
        ))
        .id()
}
