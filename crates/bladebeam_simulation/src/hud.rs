//! HUD mirror: значения health bar и limit bar для UI хоста

use bevy::prelude::*;

use crate::components::Health;
use crate::player::Player;
use crate::session::AbilityCooldown;
use crate::GameplaySet;

#[derive(Resource, Debug, Clone, Default, PartialEq, Reflect)]
#[reflect(Resource)]
pub struct HudState {
    pub health: u32,
    pub max_health: u32,
    /// Секунды до готовности limit-способностей (0 = готово)
    pub limit_remaining: f32,
    pub limit_max: f32,
}

impl HudState {
    /// Заполненность limit bar: 1.0 = способность готова
    pub fn limit_fraction(&self) -> f32 {
        if self.limit_max <= 0.0 {
            return 1.0;
        }
        1.0 - (self.limit_remaining / self.limit_max).clamp(0.0, 1.0)
    }
}

/// System: HUD ← здоровье игрока + кулдаун
pub fn update_hud(
    mut hud: ResMut<HudState>,
    cooldown: Res<AbilityCooldown>,
    players: Query<&Health, With<Player>>,
) {
    let mut next = hud.clone();
    next.limit_remaining = cooldown.remaining_secs();
    next.limit_max = cooldown.duration_secs();

    if let Ok(health) = players.single() {
        next.health = health.current;
        next.max_health = health.max;
    }

    hud.set_if_neq(next);
}

pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<HudState>()
            .add_systems(FixedUpdate, update_hud.in_set(GameplaySet::Presentation));
    }
}
