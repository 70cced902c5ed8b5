//! Enemy domain — skeleton warrior (melee AI)
//!
//! Поведение за тик:
//! 1. цель навигации ← позиция игрока
//! 2. steering к следующей точке пути, стоп в радиусе stop_radius
//! 3. атака, пока игрок в detection зоне: Punch по кругу, кулак
//!    заново включается на каждом цикле (PunchCycle)
//!
//! Смерть: счётчик врагов -1, entity удаляется вместе с hitbox'ами.

use bevy::prelude::*;

pub mod components;
pub mod systems;

pub use components::*;
pub use systems::*;

use crate::components::{CharacterAnimation, CharacterBody, CharacterClip, Facing, Health, Hitbox, HitboxTag};
use crate::config::GameplayConfig;
use crate::level::LevelEntity;
use crate::physics::rapier_bridge::sensor_collider;
use crate::GameplaySet;

const BODY_RADIUS: f32 = 0.6;
const BODY_OFFSET: Vec3 = Vec3::new(0.0, 1.0, 0.0);
const FIST_RADIUS: f32 = 0.4;
/// Кулак достаёт игрока, когда warrior стоит на stop_radius
const FIST_OFFSET: Vec3 = Vec3::new(0.0, 1.0, -1.2);

pub struct EnemyPlugin;

impl Plugin for EnemyPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            (
                register_spawned_warriors.in_set(GameplaySet::Bookkeeping),
                set_navigation_targets.in_set(GameplaySet::Navigation),
                steer_warriors.in_set(GameplaySet::Locomotion),
                (update_warrior_detection, apply_enemy_hits)
                    .chain()
                    .in_set(GameplaySet::Combat),
                animate_warriors.in_set(GameplaySet::Actions),
            ),
        );
    }
}

/// Spawn warrior: тело + дочерние area (body, fist, detection)
pub fn spawn_warrior(commands: &mut Commands, position: Vec3, config: &GameplayConfig) -> Entity {
    let warrior = commands
        .spawn((
            Warrior::from(&config.warrior),
            Health::new(config.warrior.max_health),
            NavigationAgent {
                target_position: position,
                next_path_position: position,
            },
            CharacterBody {
                velocity: Vec3::ZERO,
                on_floor: true,
            },
            Facing::default(),
            CharacterAnimation::new(CharacterClip::SkeletonWalk),
            PunchCycle::default(),
            Transform::from_translation(position),
            LevelEntity,
        ))
        .id();

    let body = commands
        .spawn((
            Hitbox::new(HitboxTag::EnemyBody, warrior, BODY_RADIUS),
            Transform::from_translation(BODY_OFFSET),
            sensor_collider(HitboxTag::EnemyBody, BODY_RADIUS),
            ChildOf(warrior),
        ))
        .id();

    let fist = commands
        .spawn((
            Hitbox::new(HitboxTag::EnemyFist, warrior, FIST_RADIUS).disabled(),
            Transform::from_translation(FIST_OFFSET),
            sensor_collider(HitboxTag::EnemyFist, FIST_RADIUS),
            ChildOf(warrior),
        ))
        .id();

    let detection_radius = config.warrior.detection_radius;
    let detection = commands
        .spawn((
            Hitbox::new(HitboxTag::EnemyDetection, warrior, detection_radius),
            Transform::from_translation(BODY_OFFSET),
            sensor_collider(HitboxTag::EnemyDetection, detection_radius),
            ChildOf(warrior),
        ))
        .id();

    commands
        .entity(warrior)
        .insert(WarriorHitboxes { body, fist, detection });

    warrior
}
