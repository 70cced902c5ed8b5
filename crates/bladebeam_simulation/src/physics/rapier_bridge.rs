//! Rapier bridge: sensor-коллайдеры для hitbox и перевод CollisionEvent
//! в AreaEntered/AreaExited
//!
//! Collision groups:
//! - GROUP_1: тело игрока (ловит кулак и detection)
//! - GROUP_2: оружие игрока, меч и beam (ловит тела/кулаки врагов)
//! - GROUP_3: hurtbox врага (тело, кулак)
//! - GROUP_4: detection зона врага (видит только тело игрока)

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use bevy_rapier3d::rapier::geometry::CollisionEventFlags;

use crate::combat::{AreaEntered, AreaExited};
use crate::components::{Hitbox, HitboxTag};

pub fn collision_groups(tag: HitboxTag) -> CollisionGroups {
    match tag {
        HitboxTag::PlayerBody => CollisionGroups::new(Group::GROUP_1, Group::GROUP_3 | Group::GROUP_4),
        HitboxTag::PlayerSword | HitboxTag::PlayerBeam => {
            CollisionGroups::new(Group::GROUP_2, Group::GROUP_3)
        }
        HitboxTag::EnemyBody | HitboxTag::EnemyFist => {
            CollisionGroups::new(Group::GROUP_3, Group::GROUP_1 | Group::GROUP_2)
        }
        HitboxTag::EnemyDetection => CollisionGroups::new(Group::GROUP_4, Group::GROUP_1),
    }
}

/// Sensor-шар для hitbox (в headless режиме Rapier не подключён и bundle инертен)
pub fn sensor_collider(tag: HitboxTag, radius: f32) -> impl Bundle {
    (
        Collider::ball(radius),
        Sensor,
        ActiveEvents::COLLISION_EVENTS,
        ActiveCollisionTypes::all(),
        collision_groups(tag),
    )
}

/// System: Rapier CollisionEvent → area сигналы (в обе стороны)
pub fn forward_collision_events(
    mut collisions: EventReader<CollisionEvent>,
    mut entered: EventWriter<AreaEntered>,
    mut exited: EventWriter<AreaExited>,
) {
    for collision in collisions.read() {
        match *collision {
            CollisionEvent::Started(a, b, _) => {
                entered.write(AreaEntered { area: a, other: b });
                entered.write(AreaEntered { area: b, other: a });
            }
            CollisionEvent::Stopped(a, b, flags) => {
                // Коллайдер удалён вместе с entity — выхода нет
                if flags.contains(CollisionEventFlags::REMOVED) {
                    continue;
                }
                exited.write(AreaExited { area: a, other: b });
                exited.write(AreaExited { area: b, other: a });
            }
        }
    }
}

/// System: Hitbox.enabled → ColliderDisabled
pub fn sync_hitbox_colliders(
    mut commands: Commands,
    changed: Query<(Entity, &Hitbox), Changed<Hitbox>>,
) {
    for (entity, hitbox) in changed.iter() {
        if hitbox.enabled {
            commands.entity(entity).remove::<ColliderDisabled>();
        } else {
            commands.entity(entity).insert(ColliderDisabled);
        }
    }
}

/// Подключается вместе с `RapierPhysicsPlugin` вместо `HeadlessPhysicsPlugin`
pub struct RapierBridgePlugin;

impl Plugin for RapierBridgePlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<CollisionEvent>().add_systems(
            FixedUpdate,
            (sync_hitbox_colliders, forward_collision_events)
                .chain()
                .in_set(crate::GameplaySet::Physics),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interacts(a: HitboxTag, b: HitboxTag) -> bool {
        let (a, b) = (collision_groups(a), collision_groups(b));
        a.memberships.intersects(b.filters) && b.memberships.intersects(a.filters)
    }

    #[test]
    fn test_groups_match_overlap_rules() {
        assert!(interacts(HitboxTag::PlayerSword, HitboxTag::EnemyBody));
        assert!(interacts(HitboxTag::PlayerBeam, HitboxTag::EnemyFist));
        assert!(interacts(HitboxTag::PlayerBody, HitboxTag::EnemyFist));
        assert!(interacts(HitboxTag::PlayerBody, HitboxTag::EnemyDetection));

        assert!(!interacts(HitboxTag::PlayerSword, HitboxTag::PlayerBody));
        assert!(!interacts(HitboxTag::PlayerBeam, HitboxTag::EnemyDetection));
        assert!(!interacts(HitboxTag::EnemyBody, HitboxTag::EnemyFist));
        assert!(!interacts(HitboxTag::EnemyDetection, HitboxTag::EnemyBody));
    }

    fn bridge_app() -> App {
        let mut app = App::new();
        app.add_event::<CollisionEvent>()
            .add_event::<AreaEntered>()
            .add_event::<AreaExited>()
            .add_systems(Update, (sync_hitbox_colliders, forward_collision_events));
        app
    }

    #[test]
    fn test_collision_events_forwarded_both_ways() {
        let mut app = bridge_app();
        let a = app.world_mut().spawn_empty().id();
        let b = app.world_mut().spawn_empty().id();

        app.world_mut()
            .send_event(CollisionEvent::Started(a, b, CollisionEventFlags::SENSOR));
        app.world_mut()
            .send_event(CollisionEvent::Stopped(a, b, CollisionEventFlags::SENSOR));
        app.world_mut().send_event(CollisionEvent::Stopped(
            a,
            b,
            CollisionEventFlags::SENSOR | CollisionEventFlags::REMOVED,
        ));
        app.update();

        let entered: Vec<_> = app
            .world_mut()
            .resource_mut::<Events<AreaEntered>>()
            .drain()
            .collect();
        let exited: Vec<_> = app
            .world_mut()
            .resource_mut::<Events<AreaExited>>()
            .drain()
            .collect();

        assert_eq!(entered.len(), 2);
        assert!(entered.contains(&AreaEntered { area: b, other: a }));
        assert_eq!(exited.len(), 2);
    }

    #[test]
    fn test_disabled_hitbox_disables_collider() {
        let mut app = bridge_app();
        let owner = app.world_mut().spawn_empty().id();
        let fist = app
            .world_mut()
            .spawn(Hitbox::new(HitboxTag::EnemyFist, owner, 0.4).disabled())
            .id();

        app.update();
        assert!(app.world().get::<ColliderDisabled>(fist).is_some());

        app.world_mut().get_mut::<Hitbox>(fist).unwrap().enabled = true;
        app.update();
        assert!(app.world().get::<ColliderDisabled>(fist).is_none());
    }
}
