//! Warrior systems: учёт популяции, навигация, steering, урон, анимация

use bevy::prelude::*;

use super::components::{NavigationAgent, PunchCycle, Warrior, WarriorHitboxes};
use crate::combat::{AnimationFinished, DetectionChanged, EnemyHit, EntityDied};
use crate::components::{CharacterAnimation, CharacterBody, CharacterClip, Facing, Health, Hitbox};
use crate::config::GameplayConfig;
use crate::player::Player;
use crate::session::SessionState;

/// System: +1 к счётчику врагов за каждого нового warrior
pub fn register_spawned_warriors(
    spawned: Query<Entity, Added<Warrior>>,
    mut session: ResMut<SessionState>,
) {
    for entity in spawned.iter() {
        session.register_enemy();
        crate::logger::log(&format!(
            "Warrior {:?} registered ({} alive)",
            entity, session.enemy_count
        ));
    }
}

/// System: цель навигации = позиция игрока
pub fn set_navigation_targets(
    players: Query<&Transform, With<Player>>,
    mut agents: Query<&mut NavigationAgent, With<Warrior>>,
) {
    let Ok(player) = players.single() else {
        return;
    };

    for mut agent in agents.iter_mut() {
        agent.target_position = player.translation;
    }
}

/// System: steering к следующей точке пути
pub fn steer_warriors(
    time: Res<Time<Fixed>>,
    mut warriors: Query<(
        &Warrior,
        &NavigationAgent,
        &mut CharacterBody,
        &mut Facing,
        &mut Transform,
    )>,
) {
    let delta = time.delta_secs();

    for (warrior, agent, mut body, mut facing, mut transform) in warriors.iter_mut() {
        let direction = (agent.next_path_position - transform.translation).normalize_or_zero();

        if direction != Vec3::ZERO {
            facing.turn_towards(&mut transform, direction);
        }

        let distance = transform.translation.distance(agent.target_position);
        body.velocity = warrior.steer(body.velocity, direction, distance, delta);
    }
}

/// System: detection зона → флаг атаки
pub fn update_warrior_detection(
    mut events: EventReader<DetectionChanged>,
    mut warriors: Query<&mut Warrior>,
) {
    for event in events.read() {
        if let Ok(mut warrior) = warriors.get_mut(event.warrior) {
            warrior.attacking = event.player_inside;
        }
    }
}

/// System: удары по warrior
///
/// Limit-флаг → смерть с одного удара (флаг сбрасывается), иначе -1 HP.
/// Мёртвый warrior (ждущий despawn) игнорирует удары и не тратит limit.
pub fn apply_enemy_hits(
    mut commands: Commands,
    mut hits: EventReader<EnemyHit>,
    mut session: ResMut<SessionState>,
    mut warriors: Query<&mut Health, With<Warrior>>,
    mut deaths: EventWriter<EntityDied>,
) {
    for hit in hits.read() {
        let Ok(mut health) = warriors.get_mut(hit.enemy) else {
            crate::logger::log_warning(&format!("EnemyHit: warrior {:?} not found", hit.enemy));
            continue;
        };

        if !health.is_alive() {
            continue;
        }

        let by_limit = session.take_limit();
        if by_limit {
            health.kill();
        } else {
            health.take_damage(1);
        }

        if health.is_alive() {
            crate::logger::log(&format!(
                "Warrior {:?} hit by {:?}: HP {}/{}",
                hit.enemy, hit.source, health.current, health.max
            ));
            continue;
        }

        session.enemy_died();
        deaths.write(EntityDied {
            entity: hit.enemy,
            by_limit,
        });
        commands.entity(hit.enemy).try_despawn();

        crate::logger::log_info(&format!(
            "Warrior {:?} killed (limit: {}), {} left",
            hit.enemy, by_limit, session.enemy_count
        ));
    }
}

/// System: анимация warrior + цикл ударов кулаком
///
/// Пока warrior атакует, Punch-клип крутится по кругу, кулак на границе
/// каждого цикла выключен один тик. Конец цикла: punch_duration или
/// AnimationFinished от движка.
pub fn animate_warriors(
    time: Res<Time<Fixed>>,
    config: Res<GameplayConfig>,
    mut finished: EventReader<AnimationFinished>,
    mut warriors: Query<(Entity, &Warrior, &WarriorHitboxes, &mut PunchCycle, &mut CharacterAnimation)>,
    mut hitboxes: Query<&mut Hitbox>,
) {
    let delta = time.delta_secs();
    let finished: Vec<Entity> = finished.read().map(|event| event.entity).collect();

    for (entity, warrior, rig, mut cycle, mut animation) in warriors.iter_mut() {
        let clip = if warrior.attacking {
            CharacterClip::SkeletonPunch
        } else {
            CharacterClip::SkeletonWalk
        };
        animation.set_if_neq(CharacterAnimation::new(clip));

        let fist_active = cycle.advance(
            warrior.attacking,
            finished.contains(&entity),
            delta,
            config.animation.punch_duration,
        );

        if let Ok(mut fist) = hitboxes.get_mut(rig.fist) {
            if fist.enabled != fist_active {
                fist.enabled = fist_active;
            }
        }
    }
}
