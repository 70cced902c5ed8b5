//! Combat module: overlap-сигналы движка → типизированные удары
//!
//! ECS ответственность:
//! - маршрутизация overlap по HitboxTag (routing)
//! - события ударов/смертей (events)
//!
//! Движок ответственность:
//! - обнаружение пересечений area (или headless `physics::overlap`)
//!
//! Применение урона живёт рядом с персонажами: `player::systems`,
//! `enemy::systems`, `beam`.

use bevy::prelude::*;

pub mod events;
pub mod routing;

pub use events::*;
pub use routing::{classify_overlap, route_area_overlaps, OverlapOutcome};

use crate::GameplaySet;

pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<AreaEntered>()
            .add_event::<AreaExited>()
            .add_event::<AnimationFinished>()
            .add_event::<EnemyHit>()
            .add_event::<PlayerHit>()
            .add_event::<BeamImpact>()
            .add_event::<DetectionChanged>()
            .add_event::<EntityDied>();

        app.add_systems(FixedUpdate, route_area_overlaps.in_set(GameplaySet::Routing));
    }
}
