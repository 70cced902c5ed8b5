//! Headless area overlap (sphere vs sphere)
//!
//! Каждый тик: все включённые hitbox попарно, пересечение = distance < r1 + r2.
//! Новая пара → AreaEntered, пропавшая пара → AreaExited (оба направления,
//! как шлёт движок). Пары одного owner'а не проверяются.

use std::collections::BTreeSet;

use bevy::prelude::*;

use crate::combat::{AreaEntered, AreaExited};
use crate::components::Hitbox;

/// Пары area, пересекавшиеся в прошлом тике (упорядочены: меньший Entity первым)
#[derive(Resource, Debug, Default)]
pub struct OverlapTracker {
    pub active: BTreeSet<(Entity, Entity)>,
}

/// Мировая позиция центра hitbox
///
/// Дочерний hitbox: Transform owner'а + локальное смещение, повёрнутое вместе
/// с owner'ом. Hitbox на самом owner'е (beam): его собственный Transform.
pub fn hitbox_center(
    entity: Entity,
    hitbox: &Hitbox,
    local: &Transform,
    transforms: &Query<&Transform>,
) -> Option<Vec3> {
    if hitbox.owner == entity {
        return Some(local.translation);
    }

    let owner = transforms.get(hitbox.owner).ok()?;
    Some(owner.translation + owner.rotation * local.translation)
}

/// System: enter/exit сигналы для area
pub fn detect_area_overlaps(
    mut tracker: ResMut<OverlapTracker>,
    hitboxes: Query<(Entity, &Hitbox, &Transform)>,
    transforms: Query<&Transform>,
    mut entered: EventWriter<AreaEntered>,
    mut exited: EventWriter<AreaExited>,
) {
    let mut areas: Vec<(Entity, Hitbox, Vec3)> = hitboxes
        .iter()
        .filter(|(_, hitbox, _)| hitbox.enabled)
        .filter_map(|(entity, hitbox, local)| {
            hitbox_center(entity, hitbox, local, &transforms).map(|center| (entity, *hitbox, center))
        })
        .collect();
    areas.sort_by_key(|(entity, _, _)| *entity);

    let mut current = BTreeSet::new();
    for (i, (a, a_box, a_center)) in areas.iter().enumerate() {
        for (b, b_box, b_center) in areas.iter().skip(i + 1) {
            if a_box.owner == b_box.owner {
                continue;
            }

            if a_center.distance(*b_center) < a_box.radius + b_box.radius {
                current.insert((*a, *b));
            }
        }
    }

    for &(a, b) in current.difference(&tracker.active) {
        entered.write(AreaEntered { area: a, other: b });
        entered.write(AreaEntered { area: b, other: a });
    }

    for &(a, b) in tracker.active.difference(&current) {
        // Удалённая area сигнал выхода не шлёт
        if !hitboxes.contains(a) || !hitboxes.contains(b) {
            continue;
        }
        exited.write(AreaExited { area: a, other: b });
        exited.write(AreaExited { area: b, other: a });
    }

    tracker.active = current;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::HitboxTag;
    use crate::{create_headless_app, step_fixed};

    fn overlap_app() -> App {
        let mut app = create_headless_app(7);
        app.init_resource::<OverlapTracker>()
            .add_event::<AreaEntered>()
            .add_event::<AreaExited>()
            .add_systems(FixedUpdate, detect_area_overlaps);
        app
    }

    fn drain<E: Event + Clone>(app: &mut App) -> Vec<E> {
        app.world_mut().resource_mut::<Events<E>>().drain().collect()
    }

    fn spawn_area(app: &mut App, tag: HitboxTag, position: Vec3, radius: f32) -> Entity {
        let entity = app.world_mut().spawn(Transform::from_translation(position)).id();
        app.world_mut()
            .entity_mut(entity)
            .insert(Hitbox::new(tag, entity, radius));
        entity
    }

    #[test]
    fn test_enter_is_reported_both_ways_once() {
        let mut app = overlap_app();
        let beam = spawn_area(&mut app, HitboxTag::PlayerBeam, Vec3::ZERO, 0.5);
        let body = spawn_area(&mut app, HitboxTag::EnemyBody, Vec3::new(0.8, 0.0, 0.0), 0.5);

        step_fixed(&mut app, 1);
        let events = drain::<AreaEntered>(&mut app);
        assert_eq!(events.len(), 2);
        assert!(events.contains(&AreaEntered { area: beam, other: body }));
        assert!(events.contains(&AreaEntered { area: body, other: beam }));

        // Пересечение продолжается → повторного enter нет
        step_fixed(&mut app, 3);
        assert!(drain::<AreaEntered>(&mut app).is_empty());
    }

    #[test]
    fn test_exit_after_separation() {
        let mut app = overlap_app();
        let a = spawn_area(&mut app, HitboxTag::PlayerBody, Vec3::ZERO, 0.6);
        let b = spawn_area(&mut app, HitboxTag::EnemyDetection, Vec3::new(1.0, 0.0, 0.0), 3.0);

        step_fixed(&mut app, 1);
        drain::<AreaEntered>(&mut app);

        app.world_mut().get_mut::<Transform>(a).unwrap().translation.x = -10.0;
        step_fixed(&mut app, 1);

        let exits = drain::<AreaExited>(&mut app);
        assert_eq!(exits.len(), 2);
        assert!(exits.contains(&AreaExited { area: b, other: a }));
    }

    #[test]
    fn test_disabled_area_is_ignored() {
        let mut app = overlap_app();
        let sword = spawn_area(&mut app, HitboxTag::PlayerSword, Vec3::ZERO, 0.7);
        spawn_area(&mut app, HitboxTag::EnemyBody, Vec3::new(0.5, 0.0, 0.0), 0.6);
        app.world_mut().get_mut::<Hitbox>(sword).unwrap().enabled = false;

        step_fixed(&mut app, 2);
        assert!(drain::<AreaEntered>(&mut app).is_empty());

        // Включение меча внутри врага = новый enter
        app.world_mut().get_mut::<Hitbox>(sword).unwrap().enabled = true;
        step_fixed(&mut app, 1);
        assert_eq!(drain::<AreaEntered>(&mut app).len(), 2);
    }

    #[test]
    fn test_despawned_area_sends_no_exit() {
        let mut app = overlap_app();
        let beam = spawn_area(&mut app, HitboxTag::PlayerBeam, Vec3::ZERO, 0.5);
        spawn_area(&mut app, HitboxTag::EnemyFist, Vec3::ZERO, 0.4);

        step_fixed(&mut app, 1);
        app.world_mut().despawn(beam);
        step_fixed(&mut app, 1);

        assert!(drain::<AreaExited>(&mut app).is_empty());
        assert!(app.world().resource::<OverlapTracker>().active.is_empty());
    }

    #[test]
    fn test_child_area_follows_owner_rotation() {
        let mut app = overlap_app();
        // Owner смотрит в +X: локальное "вперёд" (-Z) уходит в +X
        let owner = app
            .world_mut()
            .spawn(Transform::from_xyz(5.0, 0.0, 0.0).looking_to(Vec3::X, Vec3::Y))
            .id();
        let sword = app
            .world_mut()
            .spawn((
                Hitbox::new(HitboxTag::PlayerSword, owner, 0.3),
                Transform::from_xyz(0.0, 0.0, -1.0),
            ))
            .id();
        let ahead = spawn_area(&mut app, HitboxTag::EnemyBody, Vec3::new(6.2, 0.0, 0.0), 0.3);
        spawn_area(&mut app, HitboxTag::EnemyBody, Vec3::new(5.0, 0.0, -1.0), 0.3);

        step_fixed(&mut app, 1);

        let events = drain::<AreaEntered>(&mut app);
        assert_eq!(events.len(), 2, "events = {:?}", events);
        assert!(events.contains(&AreaEntered { area: sword, other: ahead }));
    }
}
