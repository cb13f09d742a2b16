//! Physics backend abstraction.
//!
//! This module defines the trait that physics backends must implement
//! to work with the character controller. The controller only decides on
//! forces, impulses and flags; integration, collision and raycasting belong
//! to the backend.

use bevy::prelude::*;

/// How a force is applied to the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForceMode {
    /// Continuous force, integrated over the physics step.
    Force,
    /// Instantaneous change in momentum.
    Impulse,
}

/// Trait for physics backend implementations.
///
/// Implement this trait to integrate a physics engine with the character
/// controller. Besides the body operations below, the backend's
/// [`plugin`](CharacterPhysicsBackend::plugin) must register a system in
/// [`CharacterControllerSet::Sensors`](crate::CharacterControllerSet::Sensors)
/// that fills `CharacterController::floor` and `CharacterController::slope_probe`
/// from downward raycasts of `ground_probe_length()` and `slope_probe_length()`.
///
/// For an example implementation, see the `rapier` module's `Rapier3dBackend`.
pub trait CharacterPhysicsBackend: 'static + Send + Sync {
    /// Returns the plugin that sets up this backend.
    fn plugin() -> impl Plugin;

    /// Get the current velocity of an entity.
    fn get_velocity(world: &World, entity: Entity) -> Vec3;

    /// Set the velocity of an entity.
    fn set_velocity(world: &mut World, entity: Entity, velocity: Vec3);

    /// Apply a continuous force for the current physics step.
    fn apply_force(world: &mut World, entity: Entity, force: Vec3);

    /// Apply an impulse to an entity.
    fn apply_impulse(world: &mut World, entity: Entity, impulse: Vec3);

    /// Apply a force with the given mode.
    fn add_force(world: &mut World, entity: Entity, force: Vec3, mode: ForceMode) {
        match mode {
            ForceMode::Force => Self::apply_force(world, entity, force),
            ForceMode::Impulse => Self::apply_impulse(world, entity, force),
        }
    }

    /// Get the linear drag coefficient.
    fn get_linear_drag(world: &World, entity: Entity) -> f32;

    /// Set the linear drag coefficient.
    fn set_linear_drag(world: &mut World, entity: Entity, drag: f32);

    /// Whether engine gravity acts on the body.
    fn is_gravity_enabled(world: &World, entity: Entity) -> bool;

    /// Enable or disable engine gravity for the body.
    fn set_gravity_enabled(world: &mut World, entity: Entity, enabled: bool);

    /// Get the body's vertical scale.
    fn get_y_scale(world: &World, entity: Entity) -> f32 {
        world
            .get::<Transform>(entity)
            .map(|t| t.scale.y)
            .unwrap_or(1.0)
    }

    /// Set the body's vertical scale.
    fn set_y_scale(world: &mut World, entity: Entity, y_scale: f32) {
        if let Some(mut transform) = world.get_mut::<Transform>(entity) {
            transform.scale.y = y_scale;
        }
    }
}

/// Empty plugin for backends that don't need additional setup.
pub struct NoOpBackendPlugin;

impl Plugin for NoOpBackendPlugin {
    fn build(&self, _app: &mut App) {}
}
