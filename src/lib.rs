//! # `slope_character_controller`
//!
//! A slope-aware 3D rigidbody character controller with physics backend abstraction.
//!
//! This crate provides a force-driven first-person style controller that:
//! - Probes the ground with downward raycasts and classifies walkable slopes
//! - Walks, sprints and crouches with a per-state target speed
//! - Drives the body with forces and caps its speed after the fact
//! - Holds the body on slopes with gravity switched off
//! - Jumps with a cooldown and a temporary slope override
//! - Abstracts the physics backend (Rapier3D included)
//!
//! ## Frame layout
//!
//! Per render frame (`Update`):
//! 1. **Sensors**: the backend casts the ground and slope probes
//! 2. **Classification**: grounded and slope support are derived
//! 3. **Input**: keyboard bindings and orientation sources are sampled
//! 4. **Actions**: jump cooldown, jump and crouch
//! 5. **State**: movement state, drag, gravity and marker components
//! 6. **Governor**: velocity is clamped to the target speed
//!
//! Per physics step (`FixedUpdate`) locomotion forces are accumulated and
//! handed to the engine.
//!
//! ## Usage
//!
//! ```rust
//! use slope_character_controller::prelude::*;
//!
//! let config = ControllerConfig::player().with_max_slope_degrees(35.0);
//! let controller = CharacterController::walking(&config);
//! let intent = MovementIntent::default();
//!
//! assert_eq!(controller.target_speed, config.walk_speed);
//! assert!(!intent.is_moving());
//! ```

use bevy::prelude::*;

pub mod backend;
pub mod collision;
pub mod config;
pub mod crouch;
pub mod detection;
pub mod governor;
pub mod intent;
pub mod jump;
pub mod locomotion;
pub mod state;
pub mod systems;

#[cfg(feature = "rapier3d")]
pub mod rapier;

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::backend::{CharacterPhysicsBackend, ForceMode};
    pub use crate::collision::CollisionData;
    pub use crate::config::{
        CharacterController, CharacterOrientation, ConfigError, ControllerConfig,
        OrientationSource, SlopeReentry,
    };
    pub use crate::detection::{SlopeContact, SupportState};
    pub use crate::intent::{ActionInput, KeyBindings, MovementIntent};
    pub use crate::state::{Airborne, Grounded, MovementState, OnSlope};
    pub use crate::{CharacterControllerPlugin, CharacterControllerSet};

    #[cfg(feature = "rapier3d")]
    pub use crate::rapier::{Rapier3dBackend, Rapier3dCharacterBundle};
}

/// System sets of the character controller.
///
/// The first six run chained in `Update`, the last three chained in `FixedUpdate`.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharacterControllerSet {
    /// Backend raycasts fill the raw probes.
    Sensors,
    /// Grounded and slope support from the probes.
    Classification,
    /// Input sampling.
    Input,
    /// Jump and crouch.
    Actions,
    /// Movement state, drag, gravity and markers.
    State,
    /// Speed limiting.
    Governor,
    /// Clear last step's forces.
    Preparation,
    /// Accumulate locomotion forces.
    Locomotion,
    /// Hand accumulated forces to the engine.
    FinalApplication,
}

/// Main plugin for the character controller system.
///
/// Generic over a physics backend `B` which provides the body operations
/// and the ground probes.
///
/// # Examples
///
/// With Rapier3D backend:
/// ```rust,ignore
/// use bevy::prelude::*;
/// use bevy_rapier3d::prelude::*;
/// use slope_character_controller::prelude::*;
///
/// App::new()
///     .add_plugins(DefaultPlugins)
///     .add_plugins(RapierPhysicsPlugin::<NoUserData>::default())
///     .add_plugins(CharacterControllerPlugin::<Rapier3dBackend>::default())
///     .run();
/// ```
pub struct CharacterControllerPlugin<B: backend::CharacterPhysicsBackend> {
    _marker: std::marker::PhantomData<B>,
}

impl<B: backend::CharacterPhysicsBackend> Default for CharacterControllerPlugin<B> {
    fn default() -> Self {
        Self {
            _marker: std::marker::PhantomData,
        }
    }
}

impl<B: backend::CharacterPhysicsBackend> Plugin for CharacterControllerPlugin<B> {
    fn build(&self, app: &mut App) {
        app.register_type::<config::CharacterController>();
        app.register_type::<config::CharacterOrientation>();
        app.register_type::<config::OrientationSource>();
        app.register_type::<config::ControllerConfig>();
        app.register_type::<intent::MovementIntent>();
        app.register_type::<state::Grounded>();
        app.register_type::<state::Airborne>();
        app.register_type::<state::OnSlope>();

        app.add_plugins(B::plugin());

        app.configure_sets(
            Update,
            (
                CharacterControllerSet::Sensors,
                CharacterControllerSet::Classification,
                CharacterControllerSet::Input,
                CharacterControllerSet::Actions,
                CharacterControllerSet::State,
                CharacterControllerSet::Governor,
            )
                .chain(),
        );
        app.configure_sets(
            FixedUpdate,
            (
                CharacterControllerSet::Preparation,
                CharacterControllerSet::Locomotion,
                CharacterControllerSet::FinalApplication,
            )
                .chain(),
        );

        app.add_systems(
            Update,
            systems::validate_new_configs.before(CharacterControllerSet::Sensors),
        );
        app.add_systems(
            Update,
            systems::update_support_state.in_set(CharacterControllerSet::Classification),
        );
        app.add_systems(
            Update,
            (
                systems::sample_keyboard_input.run_if(resource_exists::<ButtonInput<KeyCode>>),
                systems::sync_orientation_from_source,
            )
                .in_set(CharacterControllerSet::Input),
        );
        app.add_systems(
            Update,
            (
                systems::tick_jump_cooldown,
                systems::apply_jump::<B>,
                systems::apply_crouch::<B>,
            )
                .chain()
                .in_set(CharacterControllerSet::Actions),
        );
        app.add_systems(
            Update,
            (
                systems::update_movement_state,
                systems::apply_drag::<B>,
                systems::apply_gravity::<B>,
                systems::sync_state_markers,
            )
                .chain()
                .in_set(CharacterControllerSet::State),
        );
        app.add_systems(
            Update,
            systems::apply_speed_limit::<B>.in_set(CharacterControllerSet::Governor),
        );

        app.add_systems(
            FixedUpdate,
            systems::apply_locomotion::<B>.in_set(CharacterControllerSet::Locomotion),
        );

        // Edges must survive until every Update system has seen them.
        app.add_systems(Last, systems::clear_action_edges);
    }
}
