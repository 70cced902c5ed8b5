//! Overlap routing: AreaEntered/AreaExited → типизированные gameplay события
//!
//! Правила (receiving area ← other):
//! - EnemyBody | EnemyFist  ← PlayerSword | PlayerBeam → EnemyHit
//! - PlayerBody             ← EnemyFist                → PlayerHit
//! - PlayerBeam             ← EnemyFist | EnemyBody    → BeamImpact
//! - EnemyDetection         ← PlayerBody               → DetectionChanged
//!
//! Всё остальное игнорируется.

use bevy::prelude::*;

use crate::combat::{
    AreaEntered, AreaExited, BeamImpact, DetectionChanged, EnemyHit, PlayerHit,
};
use crate::components::{Hitbox, HitboxTag};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlapOutcome {
    EnemyHit,
    PlayerHit,
    BeamImpact,
    PlayerSpotted,
}

pub fn classify_overlap(area: HitboxTag, other: HitboxTag) -> Option<OverlapOutcome> {
    match (area, other) {
        (area, other) if area.is_enemy_hurtbox() && other.damages_enemies() => {
            Some(OverlapOutcome::EnemyHit)
        }
        (HitboxTag::PlayerBody, HitboxTag::EnemyFist) => Some(OverlapOutcome::PlayerHit),
        (HitboxTag::PlayerBeam, other) if other.is_enemy_hurtbox() => {
            Some(OverlapOutcome::BeamImpact)
        }
        (HitboxTag::EnemyDetection, HitboxTag::PlayerBody) => Some(OverlapOutcome::PlayerSpotted),
        _ => None,
    }
}

/// System: маршрутизация overlap-сигналов
pub fn route_area_overlaps(
    mut entered: EventReader<AreaEntered>,
    mut exited: EventReader<AreaExited>,
    hitboxes: Query<&Hitbox>,
    mut enemy_hits: EventWriter<EnemyHit>,
    mut player_hits: EventWriter<PlayerHit>,
    mut beam_impacts: EventWriter<BeamImpact>,
    mut detection: EventWriter<DetectionChanged>,
) {
    for event in entered.read() {
        let Some((area, other)) = lookup_pair(&hitboxes, event.area, event.other) else {
            continue;
        };

        // Disabled area сигналов не даёт (событие могло прийти до выключения)
        if !area.enabled || !other.enabled {
            continue;
        }

        match classify_overlap(area.tag, other.tag) {
            Some(OverlapOutcome::EnemyHit) => {
                enemy_hits.write(EnemyHit {
                    enemy: area.owner,
                    source: other.tag,
                });
            }
            Some(OverlapOutcome::PlayerHit) => {
                player_hits.write(PlayerHit { player: area.owner });
            }
            Some(OverlapOutcome::BeamImpact) => {
                beam_impacts.write(BeamImpact { beam: area.owner });
            }
            Some(OverlapOutcome::PlayerSpotted) => {
                detection.write(DetectionChanged {
                    warrior: area.owner,
                    player_inside: true,
                });
            }
            None => {}
        }
    }

    for event in exited.read() {
        let Some((area, other)) = lookup_pair(&hitboxes, event.area, event.other) else {
            continue;
        };

        if classify_overlap(area.tag, other.tag) == Some(OverlapOutcome::PlayerSpotted) {
            detection.write(DetectionChanged {
                warrior: area.owner,
                player_inside: false,
            });
        }
    }
}

fn lookup_pair(hitboxes: &Query<&Hitbox>, area: Entity, other: Entity) -> Option<(Hitbox, Hitbox)> {
    // Despawned entity (beam уже удалён, warrior умер) — тихо пропускаем
    let (Ok(&area_box), Ok(&other_box)) = (hitboxes.get(area), hitboxes.get(other)) else {
        crate::logger::log(&format!(
            "overlap {:?} ↔ {:?} skipped: untagged or despawned area",
            area, other
        ));
        return None;
    };

    if area_box.owner == other_box.owner {
        return None;
    }

    Some((area_box, other_box))
}
