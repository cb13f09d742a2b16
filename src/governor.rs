//! Velocity governor.
//!
//! Clamps velocity to the target speed after forces have been applied.
//! On an active slope the full 3D velocity is clamped, because motion along
//! the tilted plane has a vertical component. Everywhere else only the
//! horizontal part is clamped and vertical velocity passes through untouched.

use bevy::prelude::*;

/// Which part of the velocity the governor clamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeedLimitMode {
    /// Clamp the full velocity magnitude.
    Slope,
    /// Clamp the horizontal (XZ) magnitude only.
    Flat,
}

impl SpeedLimitMode {
    /// Slope mode only while on a slope and not exiting it after a jump.
    pub fn select(on_slope: bool, exiting_slope: bool) -> Self {
        if on_slope && !exiting_slope {
            Self::Slope
        } else {
            Self::Flat
        }
    }
}

/// Clamp `velocity` so the governed part does not exceed `target_speed`.
pub fn limit_velocity(velocity: Vec3, target_speed: f32, mode: SpeedLimitMode) -> Vec3 {
    match mode {
        SpeedLimitMode::Slope => {
            if velocity.length() > target_speed {
                velocity.normalize_or_zero() * target_speed
            } else {
                velocity
            }
        }
        SpeedLimitMode::Flat => {
            let flat = Vec3::new(velocity.x, 0.0, velocity.z);
            if flat.length() > target_speed {
                let limited = flat.normalize_or_zero() * target_speed;
                Vec3::new(limited.x, velocity.y, limited.z)
            } else {
                velocity
            }
        }
    }
}
