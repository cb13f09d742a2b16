//! Locomotion force generation.
//!
//! Runs once per fixed physics step. Turns the move direction into forces:
//! a drive force that always applies (scaled down in the air), plus slope
//! forces while slope physics is active. Gravity is switched off on slopes,
//! where the hold force takes its place.

use bevy::prelude::*;

use crate::config::ControllerConfig;
use crate::detection::SlopeContact;

/// Everything the force generator reads for one body and one step.
#[derive(Debug, Clone, Copy)]
pub struct LocomotionInput {
    /// Unnormalized move direction from input and orientation.
    pub move_direction: Vec3,
    /// Active target speed.
    pub target_speed: f32,
    /// Ground probe result.
    pub grounded: bool,
    /// Walkable slope under the body, if any.
    pub slope: Option<SlopeContact>,
    /// Slope override set by jumps.
    pub exiting_slope: bool,
    /// Current vertical velocity.
    pub vertical_velocity: f32,
}

/// Forces for one physics step, all continuous.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LocomotionForces {
    /// Drive along the slope plane.
    pub slope_drive: Vec3,
    /// Downward force keeping the body on the slope.
    pub slope_hold: Vec3,
    /// Grounded or airborne drive along the move direction.
    pub drive: Vec3,
    /// Whether engine gravity should be on this step.
    pub gravity_enabled: bool,
}

impl LocomotionForces {
    /// Sum of all forces.
    pub fn total(&self) -> Vec3 {
        self.slope_drive + self.slope_hold + self.drive
    }
}

/// Compute this step's forces.
pub fn compute_forces(input: &LocomotionInput, config: &ControllerConfig) -> LocomotionForces {
    let mut forces = LocomotionForces {
        gravity_enabled: input.slope.is_none(),
        ..default()
    };

    if let Some(slope) = input.slope.filter(|_| !input.exiting_slope) {
        forces.slope_drive = slope.project(input.move_direction) * input.target_speed;

        if input.vertical_velocity >= 0.0 {
            forces.slope_hold = Vec3::NEG_Y * config.slope_hold_force;
        }
    }

    let drive = input.move_direction * input.target_speed * config.drive_force_multiplier;
    forces.drive = if input.grounded {
        drive
    } else {
        drive * config.air_multiplier
    };

    forces
}
