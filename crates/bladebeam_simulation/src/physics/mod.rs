//! Physics — то, что в игре делает движок
//!
//! Headless режим (тесты, `main.rs`):
//! - интеграция CharacterBody (move-and-slide по полу y = 0)
//! - навигация по прямой (next_path_position = target)
//! - sphere overlap с enter/exit сигналами (`overlap`)
//!
//! С настоящим движком эти системы не подключаются: overlap приходит
//! через Rapier (`rapier_bridge`), движение и pathfinding — из движка.

use bevy::prelude::*;

pub mod overlap;
pub mod rapier_bridge;

pub use overlap::{detect_area_overlaps, OverlapTracker};
pub use rapier_bridge::{sensor_collider, RapierBridgePlugin};

use crate::components::CharacterBody;
use crate::enemy::{set_navigation_targets, NavigationAgent};
use crate::GameplaySet;

/// System: velocity → Transform, пол на y = 0
pub fn integrate_character_bodies(
    time: Res<Time<Fixed>>,
    mut bodies: Query<(&mut CharacterBody, &mut Transform)>,
) {
    let delta = time.delta_secs();

    for (mut body, mut transform) in bodies.iter_mut() {
        transform.translation += body.velocity * delta;

        if transform.translation.y <= 0.0 {
            transform.translation.y = 0.0;
            body.velocity.y = body.velocity.y.max(0.0);
            body.on_floor = true;
        } else {
            body.on_floor = false;
        }
    }
}

/// System: навмеш без препятствий — следующая точка пути сразу цель
pub fn resolve_straight_line_paths(mut agents: Query<&mut NavigationAgent>) {
    for mut agent in agents.iter_mut() {
        agent.next_path_position = agent.target_position;
    }
}

/// Headless замена движка (без рендера и Rapier)
pub struct HeadlessPhysicsPlugin;

impl Plugin for HeadlessPhysicsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<OverlapTracker>().add_systems(
            FixedUpdate,
            (
                resolve_straight_line_paths
                    .after(set_navigation_targets)
                    .in_set(GameplaySet::Navigation),
                (integrate_character_bodies, detect_area_overlaps)
                    .chain()
                    .in_set(GameplaySet::Physics),
            ),
        );
    }
}
