//! Movement state and state marker components.
//!
//! [`MovementState`] is derived every frame from ground contact and held keys
//! and selects the target speed. The marker components mirror
//! [`SupportState`](crate::detection::SupportState) so game code can filter
//! queries with `With<Grounded>` and friends.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::ControllerConfig;

/// The active locomotion mode.
#[derive(Reflect, Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MovementState {
    #[default]
    Walking,
    Sprinting,
    Crouching,
    Airborne,
}

impl MovementState {
    /// Target speed for this state, or `None` when the state keeps the
    /// previous target speed (airborne).
    pub fn target_speed(self, config: &ControllerConfig) -> Option<f32> {
        match self {
            Self::Walking => Some(config.walk_speed),
            Self::Sprinting => Some(config.sprint_speed),
            Self::Crouching => Some(config.crouch_speed),
            Self::Airborne => None,
        }
    }
}

/// Select the movement state and target speed for this frame.
///
/// Crouch wins over everything, including being airborne: crouch gating
/// against the air happens where the crouch input is consumed, not here.
/// Sprinting needs ground contact. Airborne keeps `previous_speed`.
pub fn select_movement_state(
    grounded: bool,
    crouch_held: bool,
    sprint_held: bool,
    previous_speed: f32,
    config: &ControllerConfig,
) -> (MovementState, f32) {
    let state = if crouch_held {
        MovementState::Crouching
    } else if grounded && sprint_held {
        MovementState::Sprinting
    } else if grounded {
        MovementState::Walking
    } else {
        MovementState::Airborne
    };

    (state, state.target_speed(config).unwrap_or(previous_speed))
}

/// Marker component indicating the ground probe found support.
#[derive(Component, Reflect, Debug, Clone, Copy, Default)]
#[reflect(Component)]
pub struct Grounded;

/// Marker component indicating neither probe found support.
///
/// Mutually exclusive with [`Grounded`] and [`OnSlope`].
#[derive(Component, Reflect, Debug, Clone, Copy, Default)]
#[reflect(Component)]
pub struct Airborne;

/// Marker component present while standing on a walkable slope.
///
/// Carries the slope angle in radians.
#[derive(Component, Reflect, Debug, Clone, Copy, Default)]
#[reflect(Component)]
pub struct OnSlope {
    pub angle: f32,
}
