//! Core controller systems.
//!
//! These systems implement the controller policy. Systems that touch the
//! physics body are generic over the backend; the rest are plain queries.
//! Frame systems run in `Update`, force generation in `FixedUpdate`.

use std::mem::discriminant;

use bevy::prelude::*;

use crate::backend::{CharacterPhysicsBackend, ForceMode};
use crate::config::{
    CharacterController, CharacterOrientation, ControllerConfig, OrientationSource,
};
use crate::crouch::{crouch_transition, CrouchTransition};
use crate::detection::{SlopeContact, SupportState};
use crate::governor::{limit_velocity, SpeedLimitMode};
use crate::intent::{KeyBindings, MovementIntent};
use crate::jump::plan_jump;
use crate::locomotion::{compute_forces, LocomotionInput};
use crate::state::{select_movement_state, Airborne, Grounded, OnSlope};

/// Report invalid configs when they are added.
pub fn validate_new_configs(q: Query<(Entity, &ControllerConfig), Added<ControllerConfig>>) {
    for (entity, config) in &q {
        if let Err(err) = config.validate() {
            warn!(entity = ?entity, "invalid character controller config: {err}");
        }
    }
}

/// Derive ground contact and slope classification from the raw probes.
pub fn update_support_state(
    mut q_controllers: Query<(Entity, &ControllerConfig, &mut CharacterController)>,
) {
    for (entity, config, mut controller) in &mut q_controllers {
        let grounded = controller
            .floor
            .is_some_and(|floor| floor.within(config.ground_probe_length()));

        let slope = controller
            .slope_probe
            .filter(|hit| hit.within(config.slope_probe_length()))
            .and_then(|hit| SlopeContact::classify(&hit, Vec3::Y, config.max_slope_angle));

        let support = SupportState::derive(grounded, slope);
        if discriminant(&support) != discriminant(&controller.support) {
            debug!(
                entity = ?entity,
                from = ?controller.support,
                to = ?support,
                "support changed"
            );
        }

        controller.grounded = grounded;
        controller.support = support;
    }
}

/// Sample the keyboard into intents of entities with [`KeyBindings`].
pub fn sample_keyboard_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut q: Query<(&KeyBindings, &mut MovementIntent)>,
) {
    for (bindings, mut intent) in &mut q {
        bindings.sample(&keyboard, &mut intent);
    }
}

/// Copy the movement basis from each [`OrientationSource`].
pub fn sync_orientation_from_source(
    q_sources: Query<&GlobalTransform>,
    mut q: Query<(&OrientationSource, &mut CharacterOrientation)>,
) {
    for (source, mut orientation) in &mut q {
        if let Ok(transform) = q_sources.get(source.0) {
            *orientation = CharacterOrientation::from_rotation(transform.rotation());
        }
    }
}

/// Advance jump cooldowns and restore readiness.
///
/// On restore the exiting-slope flag is set per [`ControllerConfig::slope_reentry`].
pub fn tick_jump_cooldown(
    time: Res<Time>,
    mut q: Query<(Entity, &ControllerConfig, &mut CharacterController)>,
) {
    for (entity, config, mut controller) in &mut q {
        if controller.jump.tick(time.delta()) {
            controller.exiting_slope = config.slope_reentry.exiting_slope_after_cooldown();
            debug!(
                entity = ?entity,
                exiting_slope = controller.exiting_slope,
                "jump ready"
            );
        }
    }
}

/// Trigger jumps for grounded, ready characters holding jump.
pub fn apply_jump<B: CharacterPhysicsBackend>(world: &mut World) {
    let entities: Vec<(Entity, ControllerConfig, CharacterOrientation)> = world
        .query::<(
            Entity,
            &ControllerConfig,
            Option<&CharacterOrientation>,
            &MovementIntent,
            &CharacterController,
        )>()
        .iter(world)
        .filter(|(_, _, _, intent, controller)| {
            controller
                .jump
                .can_jump(controller.grounded, intent.jump.is_held())
        })
        .map(|(e, config, orientation, _, _)| {
            (e, *config, orientation.copied().unwrap_or_default())
        })
        .collect();

    for (entity, config, orientation) in entities {
        let velocity = B::get_velocity(world, entity);
        let plan = plan_jump(velocity, orientation.up(), config.jump_force);

        B::set_velocity(world, entity, plan.velocity);
        B::add_force(world, entity, plan.impulse, ForceMode::Impulse);

        if let Some(mut controller) = world.get_mut::<CharacterController>(entity) {
            controller.exiting_slope = true;
            controller.jump.start_cooldown(config.jump_cooldown);
        }

        debug!(entity = ?entity, impulse = ?plan.impulse, "jump");
    }
}

/// Shrink on crouch press (not while airborne), restore on release.
pub fn apply_crouch<B: CharacterPhysicsBackend>(world: &mut World) {
    let entities: Vec<(Entity, ControllerConfig, CrouchTransition)> = world
        .query::<(Entity, &ControllerConfig, &MovementIntent, &CharacterController)>()
        .iter(world)
        .filter_map(|(e, config, intent, controller)| {
            crouch_transition(&intent.crouch, controller.movement_state)
                .map(|transition| (e, *config, transition))
        })
        .collect();

    for (entity, config, transition) in entities {
        let current = B::get_y_scale(world, entity);
        let Some(start) = world
            .get_mut::<CharacterController>(entity)
            .map(|mut controller| *controller.start_y_scale.get_or_insert(current))
        else {
            continue;
        };

        match transition {
            CrouchTransition::Enter => {
                B::set_y_scale(world, entity, config.crouch_y_scale);
                B::add_force(
                    world,
                    entity,
                    Vec3::NEG_Y * config.crouch_impulse,
                    ForceMode::Impulse,
                );
                debug!(entity = ?entity, y_scale = config.crouch_y_scale, "crouch");
            }
            CrouchTransition::Exit => {
                B::set_y_scale(world, entity, start);
                debug!(entity = ?entity, y_scale = start, "stand");
            }
        }
    }
}

/// Select movement state and target speed.
pub fn update_movement_state(
    mut q: Query<(Entity, &ControllerConfig, &MovementIntent, &mut CharacterController)>,
) {
    for (entity, config, intent, mut controller) in &mut q {
        let (state, speed) = select_movement_state(
            controller.grounded,
            intent.crouch.is_held(),
            intent.sprint.is_held(),
            controller.target_speed,
            config,
        );

        if state != controller.movement_state {
            debug!(
                entity = ?entity,
                from = ?controller.movement_state,
                to = ?state,
                target_speed = speed,
                "movement state changed"
            );
        }

        controller.movement_state = state;
        controller.target_speed = speed;
    }
}

/// Ground drag while grounded, air drag otherwise.
pub fn apply_drag<B: CharacterPhysicsBackend>(world: &mut World) {
    let entities: Vec<(Entity, f32)> = world
        .query::<(Entity, &ControllerConfig, &CharacterController)>()
        .iter(world)
        .map(|(e, config, controller)| (e, config.drag(controller.grounded)))
        .collect();

    for (entity, drag) in entities {
        if B::get_linear_drag(world, entity) != drag {
            B::set_linear_drag(world, entity, drag);
        }
    }
}

/// Gravity off on a walkable slope, on everywhere else.
///
/// Runs on the frame cadence so an `Airborne` frame never ends with gravity
/// disabled. [`apply_locomotion`] repeats the toggle per physics step.
pub fn apply_gravity<B: CharacterPhysicsBackend>(world: &mut World) {
    let entities: Vec<(Entity, bool)> = world
        .query::<(Entity, &CharacterController)>()
        .iter(world)
        .map(|(e, controller)| (e, controller.slope().is_none()))
        .collect();

    for (entity, enabled) in entities {
        set_gravity::<B>(world, entity, enabled);
    }
}

fn set_gravity<B: CharacterPhysicsBackend>(world: &mut World, entity: Entity, enabled: bool) {
    if B::is_gravity_enabled(world, entity) != enabled {
        B::set_gravity_enabled(world, entity, enabled);
    }
    if let Some(mut controller) = world.get_mut::<CharacterController>(entity) {
        if controller.gravity_enabled != enabled {
            controller.gravity_enabled = enabled;
        }
    }
}

/// Keep state markers in sync with the support state.
pub fn sync_state_markers(
    mut commands: Commands,
    q_controllers: Query<(
        Entity,
        &CharacterController,
        Has<Grounded>,
        Has<Airborne>,
        Option<&OnSlope>,
    )>,
) {
    for (entity, controller, has_grounded, has_airborne, on_slope) in &q_controllers {
        let mut entity_commands = commands.entity(entity);

        match (controller.grounded, has_grounded) {
            (true, false) => {
                entity_commands.insert(Grounded);
            }
            (false, true) => {
                entity_commands.remove::<Grounded>();
            }
            _ => {}
        }

        let airborne = controller.support.is_airborne();
        match (airborne, has_airborne) {
            (true, false) => {
                entity_commands.insert(Airborne);
            }
            (false, true) => {
                entity_commands.remove::<Airborne>();
            }
            _ => {}
        }

        match (controller.slope(), on_slope) {
            (Some(contact), Some(marker)) if marker.angle == contact.angle => {}
            (Some(contact), _) => {
                entity_commands.insert(OnSlope {
                    angle: contact.angle,
                });
            }
            (None, Some(_)) => {
                entity_commands.remove::<OnSlope>();
            }
            (None, None) => {}
        }
    }
}

/// Clamp velocity to the target speed.
pub fn apply_speed_limit<B: CharacterPhysicsBackend>(world: &mut World) {
    let entities: Vec<(Entity, f32, SpeedLimitMode)> = world
        .query::<(Entity, &CharacterController)>()
        .iter(world)
        .map(|(e, controller)| {
            let mode =
                SpeedLimitMode::select(controller.slope().is_some(), controller.exiting_slope);
            (e, controller.target_speed, mode)
        })
        .collect();

    for (entity, target_speed, mode) in entities {
        let velocity = B::get_velocity(world, entity);
        let limited = limit_velocity(velocity, target_speed, mode);
        if limited != velocity {
            B::set_velocity(world, entity, limited);
        }
    }
}

/// Apply locomotion forces and toggle gravity. Runs every fixed step.
pub fn apply_locomotion<B: CharacterPhysicsBackend>(world: &mut World) {
    let entities: Vec<(Entity, ControllerConfig, LocomotionInput)> = world
        .query::<(
            Entity,
            &ControllerConfig,
            Option<&CharacterOrientation>,
            &MovementIntent,
            &CharacterController,
        )>()
        .iter(world)
        .map(|(e, config, orientation, intent, controller)| {
            let input = LocomotionInput {
                move_direction: orientation
                    .copied()
                    .unwrap_or_default()
                    .to_world(intent.axes()),
                target_speed: controller.target_speed,
                grounded: controller.grounded,
                slope: controller.slope(),
                exiting_slope: controller.exiting_slope,
                vertical_velocity: 0.0,
            };
            (e, *config, input)
        })
        .collect();

    for (entity, config, mut input) in entities {
        input.vertical_velocity = B::get_velocity(world, entity).y;
        let forces = compute_forces(&input, &config);

        for force in [forces.slope_drive, forces.slope_hold, forces.drive] {
            if force != Vec3::ZERO {
                B::add_force(world, entity, force, ForceMode::Force);
            }
        }

        set_gravity::<B>(world, entity, forces.gravity_enabled);

        trace!(
            entity = ?entity,
            slope_drive = ?forces.slope_drive,
            slope_hold = ?forces.slope_hold,
            drive = ?forces.drive,
            gravity = forces.gravity_enabled,
            "locomotion forces"
        );
    }
}

/// Drop one-shot input edges at the end of the frame.
pub fn clear_action_edges(mut q: Query<&mut MovementIntent>) {
    for mut intent in &mut q {
        intent.clear_edges();
    }
}
