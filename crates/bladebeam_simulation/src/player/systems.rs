//! Player systems: движение, атаки/способности, урон, камера

use bevy::input::ButtonInput;
use bevy::prelude::*;

use super::components::{AttackKind, AttackState, CameraRig, Player, PlayerController, PlayerHitboxes};
use crate::beam::spawn_beam;
use crate::combat::{AnimationFinished, PlayerHit};
use crate::components::{CharacterAnimation, CharacterBody, CharacterClip, Facing, Health, Hitbox};
use crate::config::GameplayConfig;
use crate::input::{movement_direction, GameAction};
use crate::level::{CurrentLevel, LevelTransition};
use crate::session::{AbilityCooldown, SessionState};

/// System: input → velocity игрока
///
/// Горизонталь = нормализованное направление × speed.
/// В воздухе копится гравитация, на полу — прыжок или vy = 0.
pub fn player_locomotion(
    input: Res<ButtonInput<GameAction>>,
    time: Res<Time<Fixed>>,
    mut players: Query<
        (&PlayerController, &mut CharacterBody, &mut Facing, &mut Transform),
        With<Player>,
    >,
) {
    let delta = time.delta_secs();
    let direction = movement_direction(&input).normalize_or_zero();

    for (controller, mut body, mut facing, mut transform) in players.iter_mut() {
        if direction != Vec3::ZERO {
            facing.turn_towards(&mut transform, direction);
        }

        let mut velocity = body.velocity;
        velocity.x = direction.x * controller.speed;
        velocity.z = direction.z * controller.speed;

        if !body.on_floor {
            velocity.y -= controller.fall_acceleration * delta;
        } else if input.just_pressed(GameAction::Jump) {
            velocity.y = controller.jump_velocity;
        } else {
            velocity.y = 0.0;
        }

        body.velocity = velocity;
    }
}

/// Какую атаку запускает input в этом тике (первое совпадение выигрывает)
///
/// Обе limit-способности заблокированы, пока кулдаун не истёк.
pub fn select_attack(input: &ButtonInput<GameAction>, cooldown_ready: bool) -> Option<AttackKind> {
    if input.just_pressed(GameAction::Attack) {
        Some(AttackKind::Chop)
    } else if input.pressed(GameAction::LimitBreak) && cooldown_ready {
        Some(AttackKind::Stab)
    } else if input.pressed(GameAction::Shoot) && cooldown_ready {
        Some(AttackKind::Shoot)
    } else {
        None
    }
}

/// Locomotion-клип по состоянию тела после move-and-slide
pub fn locomotion_clip(body: &CharacterBody) -> CharacterClip {
    if !body.on_floor {
        CharacterClip::JumpIdle
    } else if body.velocity.x == 0.0 && body.velocity.z == 0.0 {
        CharacterClip::Idle
    } else {
        CharacterClip::Walking
    }
}

/// System: тик attack FSM (время клипа или AnimationFinished от движка)
pub fn tick_player_attacks(
    time: Res<Time<Fixed>>,
    mut finished: EventReader<AnimationFinished>,
    mut players: Query<&mut AttackState, With<Player>>,
) {
    let delta = time.delta_secs();

    for mut state in players.iter_mut() {
        state.tick(delta);
    }

    for event in finished.read() {
        if let Ok(mut state) = players.get_mut(event.entity) {
            state.finish();
        }
    }
}

/// System: атаки, способности и выбор анимации игрока
pub fn player_actions(
    mut commands: Commands,
    input: Res<ButtonInput<GameAction>>,
    config: Res<GameplayConfig>,
    mut cooldown: ResMut<AbilityCooldown>,
    mut session: ResMut<SessionState>,
    mut players: Query<
        (
            Entity,
            &Transform,
            &Facing,
            &CharacterBody,
            &PlayerHitboxes,
            &mut AttackState,
            &mut CharacterAnimation,
        ),
        With<Player>,
    >,
    mut hitboxes: Query<&mut Hitbox>,
) {
    for (entity, transform, facing, body, rig, mut state, mut animation) in players.iter_mut() {
        let Some(kind) = select_attack(&input, cooldown.is_ready()) else {
            match *state {
                // Атака в процессе: ждём её конца, меч активен
                AttackState::Attacking { kind, .. } => {
                    set_hitbox_enabled(&mut hitboxes, rig.sword, kind.is_melee());
                }
                AttackState::Ready => {
                    set_hitbox_enabled(&mut hitboxes, rig.sword, false);
                    animation.set_if_neq(CharacterAnimation::new(locomotion_clip(body)));
                }
            }
            continue;
        };

        if kind.is_melee() {
            // Меч уже включён: гасим на тик, чтобы новый взмах дал новый AreaEntered.
            // Включится обратно на следующем тике (ветка Attacking выше)
            let rearm = sword_enabled(&hitboxes, rig.sword);
            set_hitbox_enabled(&mut hitboxes, rig.sword, !rearm);
        }

        if kind.is_limit() {
            session.arm_limit();
            cooldown.restart();
            crate::logger::log_info(&format!("Player {:?} used limit {:?}", entity, kind));
        }

        if kind == AttackKind::Shoot {
            let origin = transform.translation + transform.rotation * config.beam.spawn_offset;
            spawn_beam(&mut commands, entity, origin, facing.0, &config.beam);
        }

        state.start(kind, &config.animation);
        animation.set_if_neq(CharacterAnimation::new(kind.clip()));
    }
}

/// System: удары кулаком по игроку
///
/// Health -1 за удар, на нуле — перезагрузка уровня (ровно один раз).
pub fn apply_player_hits(
    mut hits: EventReader<PlayerHit>,
    level: Res<CurrentLevel>,
    mut players: Query<&mut Health, With<Player>>,
    mut transitions: EventWriter<LevelTransition>,
) {
    for hit in hits.read() {
        let Ok(mut health) = players.get_mut(hit.player) else {
            crate::logger::log_warning(&format!("PlayerHit: {:?} is not a player", hit.player));
            continue;
        };

        match register_hit(&mut health) {
            HitOutcome::Survived => {
                crate::logger::log(&format!(
                    "Player hit: HP {}/{}",
                    health.current, health.max
                ));
            }
            HitOutcome::Died => {
                crate::logger::log_info(&format!("Player died → reloading {}", level.0.name()));
                transitions.write(LevelTransition::reload(level.0));
            }
            HitOutcome::AlreadyDead => {}
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    Survived,
    Died,
    AlreadyDead,
}

/// Один удар = -1 HP; смерть засчитывается только на переходе 1 → 0
pub fn register_hit(health: &mut Health) -> HitOutcome {
    if !health.is_alive() {
        return HitOutcome::AlreadyDead;
    }

    health.take_damage(1);

    if health.is_alive() {
        HitOutcome::Survived
    } else {
        HitOutcome::Died
    }
}

/// System: камера догоняет игрока (lerp с фиксированной долей за тик)
pub fn follow_camera(
    config: Res<GameplayConfig>,
    mut rigs: Query<(&CameraRig, &mut Transform)>,
    targets: Query<&Transform, Without<CameraRig>>,
) {
    for (rig, mut transform) in rigs.iter_mut() {
        let Ok(target) = targets.get(rig.target) else {
            continue;
        };

        let goal = target.translation + config.camera.offset;
        transform.translation = transform
            .translation
            .lerp(goal, config.camera.follow_factor);
    }
}

fn sword_enabled(hitboxes: &Query<&mut Hitbox>, entity: Entity) -> bool {
    hitboxes.get(entity).is_ok_and(|hitbox| hitbox.enabled)
}

fn set_hitbox_enabled(hitboxes: &mut Query<&mut Hitbox>, entity: Entity, enabled: bool) {
    let Ok(mut hitbox) = hitboxes.get_mut(entity) else {
        crate::logger::log_warning(&format!("hitbox {:?} not found", entity));
        return;
    };

    // Без лишнего DerefMut: Changed<Hitbox> срабатывает только на реальном переключении
    if hitbox.enabled != enabled {
        hitbox.enabled = enabled;
    }
}
