//! Blade beam — снаряд limit-способности Shoot
//!
//! Летит вдоль *текущего* Facing стрелявшего (поворот игрока поворачивает
//! beam), исчезает при касании кулака или тела warrior. Урон наносит
//! overlap routing (beam — такой же PlayerBeam hitbox, как меч).

use bevy::prelude::*;

use crate::combat::BeamImpact;
use crate::components::{Facing, Hitbox, HitboxTag};
use crate::config::BeamConfig;
use crate::level::LevelEntity;
use crate::physics::rapier_bridge::sensor_collider;
use crate::GameplaySet;

#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Beam {
    pub shooter: Entity,
    pub speed: f32,
    /// Последнее известное направление (если стрелявший исчез)
    pub direction: Vec3,
    /// Секунды до автоудаления
    pub lifetime: f32,
}

pub fn spawn_beam(
    commands: &mut Commands,
    shooter: Entity,
    origin: Vec3,
    direction: Vec3,
    config: &BeamConfig,
) -> Entity {
    let beam = commands
        .spawn((
            Beam {
                shooter,
                speed: config.speed,
                direction: direction.normalize_or_zero(),
                lifetime: config.lifetime,
            },
            Transform::from_translation(origin),
            sensor_collider(HitboxTag::PlayerBeam, config.radius),
            LevelEntity,
        ))
        .id();

    // Hitbox beam принадлежит самому beam: BeamImpact адресуется ему
    commands
        .entity(beam)
        .insert(Hitbox::new(HitboxTag::PlayerBeam, beam, config.radius));

    crate::logger::log(&format!("Beam {:?} fired by {:?} from {:?}", beam, shooter, origin));

    beam
}

/// System: полёт beam + lifetime
pub fn fly_beams(
    mut commands: Commands,
    time: Res<Time<Fixed>>,
    mut beams: Query<(Entity, &mut Beam, &mut Transform)>,
    shooters: Query<&Facing>,
) {
    let delta = time.delta_secs();

    for (entity, mut beam, mut transform) in beams.iter_mut() {
        if let Ok(facing) = shooters.get(beam.shooter) {
            beam.direction = facing.0.normalize_or_zero();
        }

        transform.translation += beam.direction * beam.speed * delta;

        beam.lifetime -= delta;
        if beam.lifetime <= 0.0 {
            commands.entity(entity).try_despawn();
        }
    }
}

/// System: beam исчезает при первом касании hitbox врага
pub fn despawn_beams_on_impact(
    mut commands: Commands,
    mut impacts: EventReader<BeamImpact>,
    beams: Query<(), With<Beam>>,
) {
    for impact in impacts.read() {
        if beams.contains(impact.beam) {
            commands.entity(impact.beam).try_despawn();
        }
    }
}

pub struct BeamPlugin;

impl Plugin for BeamPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            (
                // Facing стрелявшего уже обновлён в этом тике
                fly_beams
                    .after(crate::player::player_locomotion)
                    .in_set(GameplaySet::Locomotion),
                despawn_beams_on_impact.in_set(GameplaySet::Combat),
            ),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{create_headless_app, step_fixed};

    fn beam_app() -> App {
        let mut app = create_headless_app(3);
        app.add_systems(FixedUpdate, fly_beams);
        app
    }

    fn spawn_test_beam(app: &mut App, shooter: Entity, lifetime: f32) -> Entity {
        let config = BeamConfig {
            lifetime,
            ..BeamConfig::default()
        };
        let beam = spawn_beam(&mut app.world_mut().commands(), shooter, Vec3::ZERO, Vec3::NEG_Z, &config);
        app.world_mut().flush();
        beam
    }

    #[test]
    fn test_beam_turns_with_shooter() {
        let mut app = beam_app();
        let shooter = app.world_mut().spawn(Facing(Vec3::X)).id();
        let beam = spawn_test_beam(&mut app, shooter, 10.0);

        step_fixed(&mut app, 60);

        let position = app.world().get::<Transform>(beam).unwrap().translation;
        assert!((position.x - 4.0).abs() < 1e-3, "position = {:?}", position);
        assert!(position.z.abs() < 1e-5);
    }

    #[test]
    fn test_beam_keeps_direction_without_shooter() {
        let mut app = beam_app();
        let shooter = app.world_mut().spawn(Facing(Vec3::X)).id();
        let beam = spawn_test_beam(&mut app, shooter, 10.0);

        step_fixed(&mut app, 30);
        app.world_mut().despawn(shooter);
        step_fixed(&mut app, 30);

        let beam_state = app.world().get::<Beam>(beam).unwrap();
        assert_eq!(beam_state.direction, Vec3::X);
        let position = app.world().get::<Transform>(beam).unwrap().translation;
        assert!((position.x - 4.0).abs() < 1e-3, "position = {:?}", position);
    }

    #[test]
    fn test_beam_expires() {
        let mut app = beam_app();
        let beam = spawn_test_beam(&mut app, Entity::PLACEHOLDER, 0.5);

        step_fixed(&mut app, 29);
        assert!(app.world().get::<Beam>(beam).is_some());

        step_fixed(&mut app, 2);
        assert!(app.world().get::<Beam>(beam).is_none());
    }
}
