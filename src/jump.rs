//! Jump readiness and cooldown.
//!
//! `Ready -> (jump) -> CoolingDown -> (timer elapses) -> Ready`.
//! The cooldown is a [`Timer`] ticked by frame delta, so it runs interleaved
//! with the frame systems and cannot be cancelled once started.

use std::time::Duration;

use bevy::prelude::*;

/// Jump readiness stored on the [`CharacterController`](crate::config::CharacterController).
#[derive(Reflect, Debug, Clone, Default)]
pub struct JumpReadiness {
    /// Running cooldown. `None` means ready.
    #[reflect(ignore)]
    cooldown: Option<Timer>,
}

impl JumpReadiness {
    /// Whether a new jump may start.
    #[inline]
    pub fn is_ready(&self) -> bool {
        self.cooldown.is_none()
    }

    /// Full gate for a jump: grounded, ready and the jump key held.
    ///
    /// A held key during cooldown is ignored, not queued.
    #[inline]
    pub fn can_jump(&self, grounded: bool, jump_held: bool) -> bool {
        grounded && jump_held && self.is_ready()
    }

    /// Seconds left on the cooldown, zero when ready.
    pub fn remaining_secs(&self) -> f32 {
        self.cooldown
            .as_ref()
            .map(|timer| timer.remaining_secs())
            .unwrap_or(0.0)
    }

    /// Consume readiness and start the cooldown.
    pub fn start_cooldown(&mut self, seconds: f32) {
        self.cooldown = Some(Timer::from_seconds(seconds.max(0.0), TimerMode::Once));
    }

    /// Advance the cooldown. Returns `true` on the tick readiness is restored.
    pub fn tick(&mut self, delta: Duration) -> bool {
        let Some(timer) = self.cooldown.as_mut() else {
            return false;
        };
        timer.tick(delta);
        if timer.finished() {
            self.cooldown = None;
            true
        } else {
            false
        }
    }
}

/// Velocity and impulse to apply for a jump.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JumpPlan {
    /// Current velocity with the vertical component zeroed.
    pub velocity: Vec3,
    /// Upward impulse.
    pub impulse: Vec3,
}

/// Plan a jump: zero the vertical velocity, then push up by `jump_force`.
///
/// Zeroing first makes jump height independent of any fall in progress.
pub fn plan_jump(velocity: Vec3, up: Vec3, jump_force: f32) -> JumpPlan {
    JumpPlan {
        velocity: velocity - up * velocity.dot(up),
        impulse: up * jump_force,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_ready() {
        let readiness = JumpReadiness::default();
        assert!(readiness.is_ready());
        assert_eq!(readiness.remaining_secs(), 0.0);
    }

    #[test]
    fn can_jump_requires_all_conditions() {
        let readiness = JumpReadiness::default();
        assert!(readiness.can_jump(true, true));
        assert!(!readiness.can_jump(false, true));
        assert!(!readiness.can_jump(true, false));
    }

    #[test]
    fn retrigger_during_cooldown_is_ignored() {
        let mut readiness = JumpReadiness::default();
        readiness.start_cooldown(0.25);
        assert!(!readiness.can_jump(true, true));
    }

    #[test]
    fn stays_unready_for_full_cooldown() {
        let mut readiness = JumpReadiness::default();
        readiness.start_cooldown(0.25);

        assert!(!readiness.tick(Duration::from_millis(100)));
        assert!(!readiness.is_ready());

        assert!(!readiness.tick(Duration::from_millis(140)));
        assert!(!readiness.is_ready());
        assert!(readiness.remaining_secs() > 0.0);

        assert!(readiness.tick(Duration::from_millis(20)));
        assert!(readiness.is_ready());
    }

    #[test]
    fn restore_is_reported_once() {
        let mut readiness = JumpReadiness::default();
        readiness.start_cooldown(0.1);

        assert!(readiness.tick(Duration::from_millis(150)));
        assert!(!readiness.tick(Duration::from_millis(150)));
    }

    #[test]
    fn zero_cooldown_restores_on_next_tick() {
        let mut readiness = JumpReadiness::default();
        readiness.start_cooldown(0.0);
        assert!(!readiness.is_ready());
        assert!(readiness.tick(Duration::ZERO));
    }

    #[test]
    fn plan_zeroes_vertical_velocity() {
        let plan = plan_jump(Vec3::new(3.0, -6.0, 1.0), Vec3::Y, 12.0);
        assert_eq!(plan.velocity, Vec3::new(3.0, 0.0, 1.0));
        assert_eq!(plan.impulse, Vec3::new(0.0, 12.0, 0.0));
    }

    #[test]
    fn vertical_velocity_after_jump_is_positive() {
        // Unit mass: the impulse is the velocity change.
        let plan = plan_jump(Vec3::new(0.0, -20.0, 0.0), Vec3::Y, 5.0);
        let after = plan.velocity + plan.impulse;
        assert!(after.y > 0.0);
        assert_eq!(after.y, 5.0);
    }
}
