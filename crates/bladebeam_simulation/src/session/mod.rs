//! Session state — общее состояние уровня, которое читают/пишут контроллеры
//!
//! - `SessionState`: limit-флаг и счётчик живых врагов
//! - `AbilityCooldown`: один таймер на обе limit-способности игрока
//!
//! Оба resource сбрасываются при загрузке уровня (`apply_level_transitions`).

use std::time::Duration;

use bevy::prelude::*;

#[derive(Resource, Debug, Clone, Default, PartialEq, Reflect)]
#[reflect(Resource)]
pub struct SessionState {
    /// true → следующий удар по врагу летальный, после чего флаг сбрасывается
    pub limit_active: bool,
    /// Живые враги на уровне (spawn +1, смерть -1)
    pub enemy_count: u32,
}

impl SessionState {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn arm_limit(&mut self) {
        self.limit_active = true;
    }

    /// Забирает limit-флаг: true если удар должен убить
    pub fn take_limit(&mut self) -> bool {
        std::mem::take(&mut self.limit_active)
    }

    pub fn register_enemy(&mut self) {
        self.enemy_count += 1;
    }

    pub fn enemy_died(&mut self) {
        if self.enemy_count == 0 {
            crate::logger::log_warning("enemy_died: enemy counter already at zero");
            return;
        }
        self.enemy_count -= 1;
    }

    pub fn all_enemies_defeated(&self) -> bool {
        self.enemy_count == 0
    }
}

/// Общий кулдаун limit-способностей (Stab + Beam)
///
/// Инвариант: способность доступна только при `remaining_secs() == 0`.
/// На старте уровня таймер уже истёк (способности готовы сразу).
#[derive(Resource, Debug, Clone)]
pub struct AbilityCooldown {
    timer: Timer,
}

impl AbilityCooldown {
    pub fn new(seconds: f32) -> Self {
        let mut timer = Timer::from_seconds(seconds, TimerMode::Once);
        let duration = timer.duration();
        timer.set_elapsed(duration);
        Self { timer }
    }

    pub fn is_ready(&self) -> bool {
        self.timer.remaining() == Duration::ZERO
    }

    pub fn remaining_secs(&self) -> f32 {
        self.timer.remaining_secs()
    }

    pub fn duration_secs(&self) -> f32 {
        self.timer.duration().as_secs_f32()
    }

    /// Перезапуск таймера после использования способности
    pub fn restart(&mut self) {
        self.timer.reset();
    }

    pub fn tick(&mut self, delta: Duration) {
        self.timer.tick(delta);
    }
}

impl Default for AbilityCooldown {
    fn default() -> Self {
        Self::new(crate::config::AbilityConfig::default().cooldown)
    }
}

/// System: тик кулдауна способностей
pub fn tick_ability_cooldown(mut cooldown: ResMut<AbilityCooldown>, time: Res<Time<Fixed>>) {
    cooldown.tick(time.delta());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_limit_clears_flag() {
        let mut session = SessionState::default();
        assert!(!session.take_limit());

        session.arm_limit();
        assert!(session.take_limit());
        assert!(!session.limit_active);
        assert!(!session.take_limit());
    }

    #[test]
    fn test_enemy_counter_never_underflows() {
        let mut session = SessionState::default();
        session.register_enemy();
        session.enemy_died();
        assert!(session.all_enemies_defeated());

        session.enemy_died();
        assert_eq!(session.enemy_count, 0);
    }

    #[test]
    fn test_cooldown_starts_ready() {
        let cooldown = AbilityCooldown::new(15.0);
        assert!(cooldown.is_ready());
        assert_eq!(cooldown.remaining_secs(), 0.0);
    }

    #[test]
    fn test_cooldown_blocks_until_expired() {
        let mut cooldown = AbilityCooldown::new(1.0);
        cooldown.restart();
        assert!(!cooldown.is_ready());

        cooldown.tick(Duration::from_millis(600));
        assert!(!cooldown.is_ready());
        assert!((cooldown.remaining_secs() - 0.4).abs() < 1e-3);

        cooldown.tick(Duration::from_millis(600));
        assert!(cooldown.is_ready());
    }
}
