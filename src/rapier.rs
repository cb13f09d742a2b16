//! Rapier3D physics backend implementation.
//!
//! This module provides the physics backend for Bevy Rapier3D.
//! Enable with the `rapier3d` feature.

use bevy::prelude::*;
use bevy_rapier3d::geometry::Group;
use bevy_rapier3d::prelude::*;

use crate::backend::CharacterPhysicsBackend;
use crate::collision::CollisionData;
use crate::config::{CharacterController, ControllerConfig};

/// Rapier3D physics backend for the character controller.
///
/// Body operations go through Rapier's components (`Velocity`, `ExternalForce`,
/// `ExternalImpulse`, `Damping`, `GravityScale`). Ground probing is done by a
/// dedicated system that receives the Rapier context as a system parameter.
pub struct Rapier3dBackend;

impl CharacterPhysicsBackend for Rapier3dBackend {
    fn plugin() -> impl Plugin {
        Rapier3dBackendPlugin
    }

    fn get_velocity(world: &World, entity: Entity) -> Vec3 {
        world
            .get::<Velocity>(entity)
            .map(|v| v.linvel)
            .unwrap_or(Vec3::ZERO)
    }

    fn set_velocity(world: &mut World, entity: Entity, velocity: Vec3) {
        if let Some(mut vel) = world.get_mut::<Velocity>(entity) {
            vel.linvel = velocity;
        }
    }

    fn apply_force(world: &mut World, entity: Entity, force: Vec3) {
        // Accumulated on the controller, written to ExternalForce by apply_controller_forces.
        if let Some(mut controller) = world.get_mut::<CharacterController>(entity) {
            controller.add_force(force);
        }
    }

    fn apply_impulse(world: &mut World, entity: Entity, impulse: Vec3) {
        if let Some(mut ext_impulse) = world.get_mut::<ExternalImpulse>(entity) {
            ext_impulse.impulse += impulse;
        } else if let Some(mut vel) = world.get_mut::<Velocity>(entity) {
            // Unit mass fallback when the body has no ExternalImpulse.
            vel.linvel += impulse;
        }
    }

    fn get_linear_drag(world: &World, entity: Entity) -> f32 {
        world
            .get::<Damping>(entity)
            .map(|d| d.linear_damping)
            .unwrap_or(0.0)
    }

    fn set_linear_drag(world: &mut World, entity: Entity, drag: f32) {
        if let Some(mut damping) = world.get_mut::<Damping>(entity) {
            damping.linear_damping = drag;
        } else if let Ok(mut entity_mut) = world.get_entity_mut(entity) {
            entity_mut.insert(Damping {
                linear_damping: drag,
                angular_damping: 0.0,
            });
        }
    }

    fn is_gravity_enabled(world: &World, entity: Entity) -> bool {
        world
            .get::<GravityScale>(entity)
            .is_none_or(|scale| scale.0 != 0.0)
    }

    fn set_gravity_enabled(world: &mut World, entity: Entity, enabled: bool) {
        let scale = if enabled { 1.0 } else { 0.0 };
        if let Some(mut gravity) = world.get_mut::<GravityScale>(entity) {
            gravity.0 = scale;
        } else if let Ok(mut entity_mut) = world.get_entity_mut(entity) {
            entity_mut.insert(GravityScale(scale));
        }
    }
}

/// Plugin that sets up Rapier3D-specific systems for the character controller.
pub struct Rapier3dBackendPlugin;

impl Plugin for Rapier3dBackendPlugin {
    fn build(&self, app: &mut App) {
        use crate::CharacterControllerSet;

        app.add_systems(
            Update,
            rapier_ground_detection.in_set(CharacterControllerSet::Sensors),
        );

        app.add_systems(
            FixedUpdate,
            clear_controller_forces.in_set(CharacterControllerSet::Preparation),
        );
        app.add_systems(
            FixedUpdate,
            apply_controller_forces.in_set(CharacterControllerSet::FinalApplication),
        );
    }
}

/// Collision groups the probes are allowed to hit.
fn probe_groups(mask: u32) -> CollisionGroups {
    CollisionGroups::new(Group::ALL, Group::from_bits_truncate(mask))
}

/// Cast a ray and return the hit with its surface normal.
fn rapier_raycast(
    context: &RapierContext,
    origin: Vec3,
    direction: Vec3,
    max_distance: f32,
    exclude_entity: Entity,
    groups: CollisionGroups,
) -> Option<CollisionData> {
    let filter = QueryFilter::default()
        .exclude_rigid_body(exclude_entity)
        .exclude_sensors()
        .groups(groups);

    context
        .cast_ray_and_get_normal(origin, direction, max_distance, true, filter)
        .map(|(hit_entity, hit)| {
            CollisionData::new(hit.time_of_impact, hit.normal, hit.point, Some(hit_entity))
        })
}

/// Rapier-specific ground and slope probing.
///
/// Both probes point straight down from the body origin, regardless of the
/// body's rotation. The ground probe decides grounded, the slightly longer
/// slope probe supplies the surface normal for slope classification.
fn rapier_ground_detection(
    rapier_context: ReadRapierContext,
    mut q_controllers: Query<(
        Entity,
        &GlobalTransform,
        &ControllerConfig,
        &mut CharacterController,
    )>,
) {
    let Ok(context) = rapier_context.single() else {
        return;
    };

    for (entity, transform, config, mut controller) in &mut q_controllers {
        let origin = transform.translation();
        let groups = probe_groups(config.ground_layer_mask);

        controller.reset_detection_state();

        controller.floor = rapier_raycast(
            &context,
            origin,
            Vec3::NEG_Y,
            config.ground_probe_length(),
            entity,
            groups,
        );
        controller.slope_probe = rapier_raycast(
            &context,
            origin,
            Vec3::NEG_Y,
            config.slope_probe_length(),
            entity,
            groups,
        );
    }
}

/// Remove last step's controller forces before new ones are accumulated.
///
/// Subtracting instead of zeroing keeps forces that other code put on
/// `ExternalForce`.
pub fn clear_controller_forces(mut q: Query<(&mut ExternalForce, &mut CharacterController)>) {
    for (mut ext_force, mut controller) in &mut q {
        let force_to_subtract = controller.prepare_new_frame();
        ext_force.force -= force_to_subtract;
    }
}

/// Hand this step's accumulated forces to Rapier.
pub fn apply_controller_forces(mut q: Query<(&mut ExternalForce, &mut CharacterController)>) {
    for (mut ext_force, mut controller) in &mut q {
        let force_to_apply = controller.finalize_frame();
        ext_force.force += force_to_apply;
    }
}

/// Bundle for creating a character with Rapier3D physics.
///
/// Provides every Rapier component the controller reads or writes. Add a
/// collider yourself; its half height should match
/// [`ControllerConfig::player_height`].
///
/// # Example
///
/// ```ignore
/// use bevy::prelude::*;
/// use bevy_rapier3d::prelude::*;
/// use slope_character_controller::prelude::*;
/// use slope_character_controller::rapier::Rapier3dCharacterBundle;
///
/// fn spawn_player(mut commands: Commands) {
///     commands.spawn((
///         Transform::from_xyz(0.0, 2.0, 0.0),
///         CharacterController::new(),
///         ControllerConfig::player(),
///         KeyBindings::default(),
///         Rapier3dCharacterBundle::new(),
///         Collider::capsule_y(0.5, 0.5),
///     ));
/// }
/// ```
///
/// # Defaults
///
/// - `rigid_body`: [`RigidBody::Dynamic`]
/// - `locked_axes`: [`LockedAxes::ROTATION_LOCKED`], the body stays upright
/// - `damping`: zero, the controller sets linear drag every frame
/// - `gravity_scale`: 1.0, toggled by the controller on slopes
#[derive(Bundle, Default)]
pub struct Rapier3dCharacterBundle {
    pub rigid_body: RigidBody,
    pub velocity: Velocity,
    /// Controller forces are added here each fixed step.
    pub external_force: ExternalForce,
    /// Jump and crouch impulses.
    pub external_impulse: ExternalImpulse,
    pub locked_axes: LockedAxes,
    pub damping: Damping,
    pub gravity_scale: GravityScale,
}

impl Rapier3dCharacterBundle {
    /// Create a dynamic, rotation-locked character bundle.
    pub fn new() -> Self {
        Self {
            rigid_body: RigidBody::Dynamic,
            velocity: Velocity::default(),
            external_force: ExternalForce::default(),
            external_impulse: ExternalImpulse::default(),
            locked_axes: LockedAxes::ROTATION_LOCKED,
            damping: Damping {
                linear_damping: 0.0,
                angular_damping: 0.0,
            },
            gravity_scale: GravityScale(1.0),
        }
    }

    /// Set the rigid body type for the character.
    ///
    /// Kinematic bodies are still probed and classified, which is handy for
    /// scripted movement.
    pub fn with_body(mut self, body: RigidBody) -> Self {
        self.rigid_body = body;
        self
    }

    /// Set which axes should be locked.
    pub fn with_locked_axes(mut self, axes: LockedAxes) -> Self {
        self.locked_axes = axes;
        self
    }

    /// Set the initial velocity.
    pub fn with_velocity(mut self, linvel: Vec3) -> Self {
        self.velocity = Velocity::linear(linvel);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::RunSystemOnce;

    fn spawn_body(world: &mut World) -> Entity {
        world
            .spawn((
                Transform::default(),
                CharacterController::new(),
                Rapier3dCharacterBundle::new(),
            ))
            .id()
    }

    #[test]
    fn rapier_backend_velocity() {
        let mut world = World::new();
        let entity = world
            .spawn(Rapier3dCharacterBundle::new().with_velocity(Vec3::new(1.0, 2.0, 3.0)))
            .id();

        assert_eq!(
            Rapier3dBackend::get_velocity(&world, entity),
            Vec3::new(1.0, 2.0, 3.0)
        );

        Rapier3dBackend::set_velocity(&mut world, entity, Vec3::new(4.0, 0.0, 0.0));
        assert_eq!(
            Rapier3dBackend::get_velocity(&world, entity),
            Vec3::new(4.0, 0.0, 0.0)
        );
    }

    #[test]
    fn rapier_backend_drag_and_gravity() {
        let mut world = World::new();
        let entity = spawn_body(&mut world);

        Rapier3dBackend::set_linear_drag(&mut world, entity, 5.0);
        assert_eq!(Rapier3dBackend::get_linear_drag(&world, entity), 5.0);

        assert!(Rapier3dBackend::is_gravity_enabled(&world, entity));
        Rapier3dBackend::set_gravity_enabled(&mut world, entity, false);
        assert!(!Rapier3dBackend::is_gravity_enabled(&world, entity));
        assert_eq!(world.get::<GravityScale>(entity).map(|g| g.0), Some(0.0));
    }

    #[test]
    fn rapier_backend_inserts_missing_components() {
        let mut world = World::new();
        let entity = world.spawn(Transform::default()).id();

        Rapier3dBackend::set_linear_drag(&mut world, entity, 2.0);
        Rapier3dBackend::set_gravity_enabled(&mut world, entity, false);

        assert_eq!(Rapier3dBackend::get_linear_drag(&world, entity), 2.0);
        assert!(!Rapier3dBackend::is_gravity_enabled(&world, entity));
    }

    #[test]
    fn impulses_go_to_external_impulse() {
        let mut world = World::new();
        let entity = spawn_body(&mut world);

        Rapier3dBackend::apply_impulse(&mut world, entity, Vec3::Y * 12.0);
        Rapier3dBackend::apply_impulse(&mut world, entity, Vec3::NEG_Y * 2.0);

        assert_eq!(
            world.get::<ExternalImpulse>(entity).map(|i| i.impulse),
            Some(Vec3::Y * 10.0)
        );
    }

    #[test]
    fn controller_forces_preserve_user_forces() {
        let mut world = World::new();
        let entity = spawn_body(&mut world);
        let user_force = Vec3::new(0.0, 0.0, 3.0);
        world
            .get_mut::<ExternalForce>(entity)
            .expect("bundle has ExternalForce")
            .force = user_force;

        world
            .run_system_once(clear_controller_forces)
            .expect("system runs");
        Rapier3dBackend::apply_force(&mut world, entity, Vec3::X * 50.0);
        world
            .run_system_once(apply_controller_forces)
            .expect("system runs");
        assert_eq!(
            world.get::<ExternalForce>(entity).map(|f| f.force),
            Some(user_force + Vec3::X * 50.0)
        );

        // Next step without controller forces leaves only the user force.
        world
            .run_system_once(clear_controller_forces)
            .expect("system runs");
        world
            .run_system_once(apply_controller_forces)
            .expect("system runs");
        assert_eq!(
            world.get::<ExternalForce>(entity).map(|f| f.force),
            Some(user_force)
        );
    }

    #[test]
    fn probe_groups_use_mask_as_filter() {
        let groups = probe_groups(0b101);
        assert_eq!(groups.memberships, Group::ALL);
        assert_eq!(groups.filters.bits(), 0b101);
    }

    #[test]
    fn character_bundle_defaults() {
        let bundle = Rapier3dCharacterBundle::new();
        assert_eq!(bundle.rigid_body, RigidBody::Dynamic);
        assert_eq!(bundle.locked_axes, LockedAxes::ROTATION_LOCKED);
        assert_eq!(bundle.gravity_scale.0, 1.0);

        let kinematic = bundle.with_body(RigidBody::KinematicPositionBased);
        assert_eq!(kinematic.rigid_body, RigidBody::KinematicPositionBased);
    }

    #[test]
    fn character_bundle_locked_axes_reach_the_entity() {
        let mut world = World::new();
        let axes = LockedAxes::ROTATION_LOCKED | LockedAxes::TRANSLATION_LOCKED_X;
        let entity = world
            .spawn(Rapier3dCharacterBundle::new().with_locked_axes(axes))
            .id();

        assert_eq!(world.get::<LockedAxes>(entity), Some(&axes));
        assert_eq!(world.get::<RigidBody>(entity), Some(&RigidBody::Dynamic));
    }
}
