//! Controller configuration and runtime state components.
//!
//! [`ControllerConfig`] holds the externally tuned parameters. [`CharacterController`]
//! is the per-body runtime hub: probe results, support and movement state,
//! jump readiness and the slope override flag all live here, so several
//! characters can be simulated independently.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::collision::CollisionData;
use crate::detection::{probe_length, SlopeContact, SupportState};
use crate::intent::MovementIntent;
use crate::jump::JumpReadiness;
use crate::state::MovementState;

/// Horizontal movement basis used to turn 2D input into a 3D direction.
///
/// Decoupled from the body's own facing: usually driven by a camera or a
/// separate look transform, see [`OrientationSource`].
#[derive(Component, Reflect, Debug, Clone, Copy, PartialEq)]
#[reflect(Component)]
pub struct CharacterOrientation {
    forward: Vec3,
    right: Vec3,
}

impl Default for CharacterOrientation {
    fn default() -> Self {
        Self {
            forward: Vec3::NEG_Z,
            right: Vec3::X,
        }
    }
}

impl CharacterOrientation {
    /// Create an orientation from forward and right vectors.
    ///
    /// Both are normalized. Zero-length input falls back to the default basis.
    pub fn new(forward: Vec3, right: Vec3) -> Self {
        let default = Self::default();
        Self {
            forward: forward.try_normalize().unwrap_or(default.forward),
            right: right.try_normalize().unwrap_or(default.right),
        }
    }

    /// Create an orientation from a yaw angle (radians around world up).
    pub fn from_yaw(yaw: f32) -> Self {
        Self::from_rotation(Quat::from_rotation_y(yaw))
    }

    /// Create an orientation from a rotation, flattened onto the horizontal plane.
    ///
    /// Pitch and roll are discarded, so looking down does not slow forward movement.
    pub fn from_rotation(rotation: Quat) -> Self {
        let flatten = |v: Vec3| {
            let flat = Vec3::new(v.x, 0.0, v.z);
            (flat.length_squared() > 1.0e-6).then(|| flat.normalize())
        };

        // Looking straight up or down: derive the lost axis from the other one.
        match (flatten(rotation * Vec3::NEG_Z), flatten(rotation * Vec3::X)) {
            (Some(forward), Some(right)) => Self { forward, right },
            (None, Some(right)) => Self {
                forward: Vec3::Y.cross(right),
                right,
            },
            (Some(forward), None) => Self {
                forward,
                right: forward.cross(Vec3::Y),
            },
            (None, None) => Self::default(),
        }
    }

    /// Forward direction (unit, horizontal).
    #[inline]
    pub fn forward(&self) -> Vec3 {
        self.forward
    }

    /// Right direction (unit, horizontal).
    #[inline]
    pub fn right(&self) -> Vec3 {
        self.right
    }

    /// World up.
    #[inline]
    pub fn up(&self) -> Vec3 {
        Vec3::Y
    }

    /// Convert axis input (`x` = strafe, `y` = forward) into a world direction.
    ///
    /// Not normalized: diagonal input has a larger magnitude.
    pub fn to_world(&self, axes: Vec2) -> Vec3 {
        self.forward * axes.y + self.right * axes.x
    }
}

/// Copy [`CharacterOrientation`] from another entity's transform every frame.
///
/// Point this at the camera rig or look transform that steers the character.
#[derive(Component, Reflect, Debug, Clone, Copy)]
#[reflect(Component)]
#[require(CharacterOrientation)]
pub struct OrientationSource(pub Entity);

/// What happens to the exiting-slope override when the jump cooldown ends.
#[derive(Reflect, Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlopeReentry {
    /// The override is set again when the cooldown ends, so slope forces stay
    /// suspended after the first jump. Matches the shipped behavior.
    #[default]
    StaySuspended,
    /// The override clears when the cooldown ends and slope forces resume.
    ResumeOnCooldown,
}

impl SlopeReentry {
    /// Value of the exiting-slope flag once the cooldown completes.
    pub fn exiting_slope_after_cooldown(self) -> bool {
        match self {
            Self::StaySuspended => true,
            Self::ResumeOnCooldown => false,
        }
    }
}

/// Core character controller component.
///
/// Holds RESULT states for the current frame. Sensors write the raw probes,
/// the controller systems derive everything else.
#[derive(Component, Reflect, Debug, Clone)]
#[reflect(Component)]
#[require(ControllerConfig, MovementIntent, CharacterOrientation)]
pub struct CharacterController {
    // === Raw probes (written by the backend sensors) ===
    /// Ground probe hit, if within `ground_probe_length`.
    #[reflect(ignore)]
    pub floor: Option<CollisionData>,
    /// Slope probe hit, if within `slope_probe_length`.
    #[reflect(ignore)]
    pub slope_probe: Option<CollisionData>,

    // === Derived support ===
    /// Whether the ground probe hit.
    pub grounded: bool,
    /// Combined support classification.
    pub support: SupportState,

    // === Movement ===
    pub movement_state: MovementState,
    /// Speed cap selected by the movement state.
    pub target_speed: f32,
    /// Suspends slope forces and slope speed limiting after a jump.
    pub exiting_slope: bool,
    /// Mirror of the body's gravity flag as last set by the controller.
    pub gravity_enabled: bool,

    // === Jump ===
    pub jump: JumpReadiness,

    // === Internal ===
    /// Vertical scale before any crouch, captured on first use.
    pub(crate) start_y_scale: Option<f32>,
    /// Forces accumulated during the current fixed step.
    pub(crate) accumulated_force: Vec3,
    /// Forces written to the physics engine last fixed step.
    pub(crate) applied_force: Vec3,
}

impl Default for CharacterController {
    fn default() -> Self {
        Self {
            floor: None,
            slope_probe: None,
            grounded: false,
            support: SupportState::Airborne,
            movement_state: MovementState::Walking,
            target_speed: 0.0,
            exiting_slope: false,
            gravity_enabled: true,
            jump: JumpReadiness::default(),
            start_y_scale: None,
            accumulated_force: Vec3::ZERO,
            applied_force: Vec3::ZERO,
        }
    }
}

impl CharacterController {
    /// Create a new controller. Target speed starts at zero until the first
    /// grounded frame selects one.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a controller already walking at the configured walk speed.
    pub fn walking(config: &ControllerConfig) -> Self {
        Self {
            target_speed: config.walk_speed,
            ..default()
        }
    }

    /// Check if the ground probe found support.
    #[inline]
    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    /// Current slope contact, if standing on a walkable slope.
    #[inline]
    pub fn slope(&self) -> Option<SlopeContact> {
        self.support.slope()
    }

    /// Whether slope physics (hold force, slope speed limit) is active.
    #[inline]
    pub fn slope_physics_active(&self) -> bool {
        self.slope().is_some() && !self.exiting_slope
    }

    /// Raw distance to ground, `f32::MAX` when nothing was hit.
    pub fn ground_distance(&self) -> f32 {
        self.floor.as_ref().map(|f| f.distance).unwrap_or(f32::MAX)
    }

    /// Ground normal, world up when nothing was hit.
    pub fn ground_normal(&self) -> Vec3 {
        self.floor.as_ref().map(|f| f.normal).unwrap_or(Vec3::Y)
    }

    /// Ground entity, if any.
    pub fn ground_entity(&self) -> Option<Entity> {
        self.floor.as_ref().and_then(|f| f.entity)
    }

    /// Vertical scale captured before the first crouch.
    pub fn start_y_scale(&self) -> Option<f32> {
        self.start_y_scale
    }

    /// Reset raw probe results (called before sensors run).
    pub(crate) fn reset_detection_state(&mut self) {
        self.floor = None;
        self.slope_probe = None;
    }

    /// Accumulate a continuous force for the current fixed step.
    pub(crate) fn add_force(&mut self, force: Vec3) {
        self.accumulated_force += force;
    }

    /// Start a new fixed step. Returns the force applied last step so the
    /// backend can remove it from the engine.
    pub(crate) fn prepare_new_frame(&mut self) -> Vec3 {
        let previous = self.applied_force;
        self.applied_force = Vec3::ZERO;
        self.accumulated_force = Vec3::ZERO;
        previous
    }

    /// Finish the fixed step. Returns the force to hand to the engine.
    pub(crate) fn finalize_frame(&mut self) -> Vec3 {
        self.applied_force = self.accumulated_force;
        self.accumulated_force = Vec3::ZERO;
        self.applied_force
    }
}

/// Invalid configuration values.
///
/// The controller never rejects a config, it only reports these.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ConfigError {
    #[error("`{name}` must be finite and non-negative, got {value}")]
    NegativeParameter { name: &'static str, value: f32 },
    #[error("`player_height` must be positive, got {0}")]
    InvalidHeight(f32),
    #[error("`crouch_y_scale` must be positive, got {0}")]
    InvalidCrouchScale(f32),
    #[error("`max_slope_angle` must lie in (0, 90) degrees, got {0} radians")]
    InvalidSlopeAngle(f32),
    #[error("`air_multiplier` must lie in [0, 1], got {0}")]
    InvalidAirMultiplier(f32),
}

/// Configuration parameters for the character controller.
///
/// Distances are in world units, speeds in units/second, angles in radians.
#[derive(Component, Reflect, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[reflect(Component)]
#[serde(default)]
pub struct ControllerConfig {
    // === Speeds ===
    /// Target speed while walking.
    pub walk_speed: f32,
    /// Target speed while sprinting.
    pub sprint_speed: f32,
    /// Target speed while crouching.
    pub crouch_speed: f32,

    // === Drive ===
    /// Drive force = move direction * target speed * this.
    pub drive_force_multiplier: f32,
    /// Scales the drive force while airborne (below 1 reduces air control).
    pub air_multiplier: f32,
    /// Linear drag while grounded.
    pub ground_drag: f32,
    /// Linear drag while airborne.
    pub air_drag: f32,

    // === Slope ===
    /// Maximum walkable slope angle (radians, exclusive).
    pub max_slope_angle: f32,
    /// Downward force holding the body on a slope while not moving upward.
    pub slope_hold_force: f32,
    /// What the exiting-slope override does when the jump cooldown ends.
    pub slope_reentry: SlopeReentry,

    // === Jump ===
    /// Upward impulse applied on jump.
    pub jump_force: f32,
    /// Seconds before the next jump is allowed.
    pub jump_cooldown: f32,

    // === Crouch ===
    /// Vertical scale while crouching.
    pub crouch_y_scale: f32,
    /// Downward impulse applied when crouching starts.
    pub crouch_impulse: f32,

    // === Sensors ===
    /// Body height used for probe lengths.
    pub player_height: f32,
    /// Ground probe reaches `player_height / 2 + ground_probe_margin`.
    pub ground_probe_margin: f32,
    /// Slope probe reaches `player_height / 2 + slope_probe_margin`.
    pub slope_probe_margin: f32,
    /// Collision group bits the probes can hit.
    pub ground_layer_mask: u32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            walk_speed: 7.0,
            sprint_speed: 10.0,
            crouch_speed: 3.5,

            drive_force_multiplier: 10.0,
            air_multiplier: 0.4,
            ground_drag: 5.0,
            air_drag: 0.0,

            max_slope_angle: 40.0_f32.to_radians(),
            slope_hold_force: 80.0,
            slope_reentry: SlopeReentry::StaySuspended,

            jump_force: 12.0,
            jump_cooldown: 0.25,

            crouch_y_scale: 0.5,
            crouch_impulse: 5.0,

            player_height: 2.0,
            ground_probe_margin: 0.2,
            slope_probe_margin: 0.3,
            ground_layer_mask: u32::MAX,
        }
    }
}

impl ControllerConfig {
    /// Create a config for a responsive player character.
    pub fn player() -> Self {
        Self {
            walk_speed: 7.0,
            sprint_speed: 12.0,
            jump_force: 14.0,
            ..default()
        }
    }

    /// Single move speed for every state, no air drag.
    ///
    /// Matches a controller without sprint or crouch speeds.
    pub fn simple(move_speed: f32) -> Self {
        Self {
            walk_speed: move_speed,
            sprint_speed: move_speed,
            crouch_speed: move_speed,
            air_drag: 0.0,
            ..default()
        }
    }

    /// Length of the ground probe.
    #[inline]
    pub fn ground_probe_length(&self) -> f32 {
        probe_length(self.player_height, self.ground_probe_margin)
    }

    /// Length of the slope probe.
    #[inline]
    pub fn slope_probe_length(&self) -> f32 {
        probe_length(self.player_height, self.slope_probe_margin)
    }

    /// Drag for the given ground contact.
    #[inline]
    pub fn drag(&self, grounded: bool) -> f32 {
        if grounded {
            self.ground_drag
        } else {
            self.air_drag
        }
    }

    /// Check the parameters for values that cannot produce sane motion.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let non_negative = [
            ("walk_speed", self.walk_speed),
            ("sprint_speed", self.sprint_speed),
            ("crouch_speed", self.crouch_speed),
            ("drive_force_multiplier", self.drive_force_multiplier),
            ("ground_drag", self.ground_drag),
            ("air_drag", self.air_drag),
            ("slope_hold_force", self.slope_hold_force),
            ("jump_force", self.jump_force),
            ("jump_cooldown", self.jump_cooldown),
            ("crouch_impulse", self.crouch_impulse),
            ("ground_probe_margin", self.ground_probe_margin),
            ("slope_probe_margin", self.slope_probe_margin),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::NegativeParameter { name, value });
            }
        }

        if !(self.player_height.is_finite() && self.player_height > 0.0) {
            return Err(ConfigError::InvalidHeight(self.player_height));
        }
        if !(self.crouch_y_scale.is_finite() && self.crouch_y_scale > 0.0) {
            return Err(ConfigError::InvalidCrouchScale(self.crouch_y_scale));
        }
        if !(self.max_slope_angle > 0.0 && self.max_slope_angle < std::f32::consts::FRAC_PI_2) {
            return Err(ConfigError::InvalidSlopeAngle(self.max_slope_angle));
        }
        if !(0.0..=1.0).contains(&self.air_multiplier) {
            return Err(ConfigError::InvalidAirMultiplier(self.air_multiplier));
        }
        Ok(())
    }

    /// Builder: set walk speed.
    pub fn with_walk_speed(mut self, speed: f32) -> Self {
        self.walk_speed = speed;
        self
    }

    /// Builder: set sprint speed.
    pub fn with_sprint_speed(mut self, speed: f32) -> Self {
        self.sprint_speed = speed;
        self
    }

    /// Builder: set crouch speed.
    pub fn with_crouch_speed(mut self, speed: f32) -> Self {
        self.crouch_speed = speed;
        self
    }

    /// Builder: set ground and air drag.
    pub fn with_drag(mut self, ground: f32, air: f32) -> Self {
        self.ground_drag = ground;
        self.air_drag = air;
        self
    }

    /// Builder: set air control multiplier.
    pub fn with_air_multiplier(mut self, multiplier: f32) -> Self {
        self.air_multiplier = multiplier;
        self
    }

    /// Builder: set max slope angle in radians.
    pub fn with_max_slope_angle(mut self, radians: f32) -> Self {
        self.max_slope_angle = radians;
        self
    }

    /// Builder: set max slope angle in degrees.
    pub fn with_max_slope_degrees(mut self, degrees: f32) -> Self {
        self.max_slope_angle = degrees.to_radians();
        self
    }

    /// Builder: set slope hold force.
    pub fn with_slope_hold_force(mut self, force: f32) -> Self {
        self.slope_hold_force = force;
        self
    }

    /// Builder: set slope reentry policy.
    pub fn with_slope_reentry(mut self, reentry: SlopeReentry) -> Self {
        self.slope_reentry = reentry;
        self
    }

    /// Builder: set jump impulse and cooldown.
    pub fn with_jump(mut self, force: f32, cooldown: f32) -> Self {
        self.jump_force = force;
        self.jump_cooldown = cooldown;
        self
    }

    /// Builder: set crouch scale and impulse.
    pub fn with_crouch(mut self, y_scale: f32, impulse: f32) -> Self {
        self.crouch_y_scale = y_scale;
        self.crouch_impulse = impulse;
        self
    }

    /// Builder: set player height.
    pub fn with_player_height(mut self, height: f32) -> Self {
        self.player_height = height;
        self
    }

    /// Builder: set the collision groups the probes can hit.
    pub fn with_ground_layer_mask(mut self, mask: u32) -> Self {
        self.ground_layer_mask = mask;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn assert_vec_eq(a: Vec3, b: Vec3) {
        assert!((a - b).length() < 1e-5, "{a:?} != {b:?}");
    }

    #[test]
    fn orientation_default_faces_negative_z() {
        let orientation = CharacterOrientation::default();
        assert_eq!(orientation.forward(), Vec3::NEG_Z);
        assert_eq!(orientation.right(), Vec3::X);
        assert_eq!(orientation.up(), Vec3::Y);
    }

    #[test]
    fn orientation_new_normalizes_input() {
        let orientation = CharacterOrientation::new(Vec3::new(0.0, 0.0, -10.0), Vec3::new(3.0, 0.0, 0.0));
        assert_vec_eq(orientation.forward(), Vec3::NEG_Z);
        assert_vec_eq(orientation.right(), Vec3::X);
    }

    #[test]
    fn orientation_new_zero_falls_back() {
        let orientation = CharacterOrientation::new(Vec3::ZERO, Vec3::ZERO);
        assert_eq!(orientation, CharacterOrientation::default());
    }

    #[test]
    fn orientation_from_yaw() {
        // Quarter turn left: forward becomes -X, right becomes -Z.
        let orientation = CharacterOrientation::from_yaw(FRAC_PI_2);
        assert_vec_eq(orientation.forward(), Vec3::NEG_X);
        assert_vec_eq(orientation.right(), Vec3::NEG_Z);
    }

    #[test]
    fn orientation_from_rotation_discards_pitch() {
        let rotation = Quat::from_rotation_x(-0.6);
        let orientation = CharacterOrientation::from_rotation(rotation);
        assert_vec_eq(orientation.forward(), Vec3::NEG_Z);
        assert_vec_eq(orientation.right(), Vec3::X);
    }

    #[test]
    fn orientation_looking_straight_down_keeps_basis() {
        let rotation = Quat::from_rotation_x(-FRAC_PI_2);
        let orientation = CharacterOrientation::from_rotation(rotation);
        assert_vec_eq(orientation.right(), Vec3::X);
        assert_vec_eq(orientation.forward(), Vec3::NEG_Z);
    }

    #[test]
    fn to_world_is_unnormalized() {
        let orientation = CharacterOrientation::default();
        let direction = orientation.to_world(Vec2::new(1.0, 1.0));
        assert_vec_eq(direction, Vec3::new(1.0, 0.0, -1.0));
        assert!((direction.length() - 2.0_f32.sqrt()).abs() < 1e-5);
    }

    #[test]
    fn controller_new_is_airborne_with_gravity() {
        let controller = CharacterController::new();
        assert!(!controller.is_grounded());
        assert!(controller.support.is_airborne());
        assert!(controller.gravity_enabled);
        assert!(controller.jump.is_ready());
        assert_eq!(controller.ground_distance(), f32::MAX);
        assert_eq!(controller.ground_normal(), Vec3::Y);
    }

    #[test]
    fn controller_walking_uses_walk_speed() {
        let config = ControllerConfig::default().with_walk_speed(4.0);
        assert_eq!(CharacterController::walking(&config).target_speed, 4.0);
    }

    #[test]
    fn slope_physics_respects_exiting_flag() {
        let mut controller = CharacterController::new();
        controller.support = SupportState::OnSlope(SlopeContact {
            normal: Vec3::new(0.34, 0.94, 0.0).normalize(),
            angle: 20.0_f32.to_radians(),
        });
        assert!(controller.slope_physics_active());

        controller.exiting_slope = true;
        assert!(!controller.slope_physics_active());
    }

    #[test]
    fn force_accumulation_isolates_steps() {
        let mut controller = CharacterController::new();
        controller.add_force(Vec3::X);
        controller.add_force(Vec3::Y);
        assert_eq!(controller.finalize_frame(), Vec3::new(1.0, 1.0, 0.0));

        // Next step hands back what was applied so it can be subtracted.
        assert_eq!(controller.prepare_new_frame(), Vec3::new(1.0, 1.0, 0.0));
        assert_eq!(controller.finalize_frame(), Vec3::ZERO);
    }

    #[test]
    fn reset_detection_clears_probes() {
        let mut controller = CharacterController::new();
        controller.floor = Some(CollisionData::new(1.0, Vec3::Y, Vec3::ZERO, None));
        controller.slope_probe = controller.floor;
        controller.reset_detection_state();
        assert!(controller.floor.is_none());
        assert!(controller.slope_probe.is_none());
    }

    #[test]
    fn ground_accessors_read_the_floor_hit() {
        let mut controller = CharacterController::new();
        assert_eq!(controller.ground_entity(), None);
        assert_eq!(controller.ground_normal(), Vec3::Y);
        assert_eq!(controller.ground_distance(), f32::MAX);

        let ground = Entity::from_raw(7);
        let normal = Vec3::new(0.0, 1.0, 1.0).normalize();
        controller.floor = Some(CollisionData::new(1.1, normal, Vec3::ZERO, Some(ground)));
        assert_eq!(controller.ground_entity(), Some(ground));
        assert_eq!(controller.ground_normal(), normal);
        assert_eq!(controller.ground_distance(), 1.1);
    }

    #[test]
    fn config_probe_lengths() {
        let config = ControllerConfig::default().with_player_height(2.0);
        assert!((config.ground_probe_length() - 1.2).abs() < 1e-6);
        assert!((config.slope_probe_length() - 1.3).abs() < 1e-6);
    }

    #[test]
    fn config_drag_by_contact() {
        let config = ControllerConfig::default().with_drag(5.0, 0.5);
        assert_eq!(config.drag(true), 5.0);
        assert_eq!(config.drag(false), 0.5);
    }

    #[test]
    fn config_simple_uses_one_speed() {
        let config = ControllerConfig::simple(6.0);
        assert_eq!(config.walk_speed, 6.0);
        assert_eq!(config.sprint_speed, 6.0);
        assert_eq!(config.crouch_speed, 6.0);
        assert_eq!(config.air_drag, 0.0);
    }

    #[test]
    fn config_defaults_are_valid() {
        assert_eq!(ControllerConfig::default().validate(), Ok(()));
        assert_eq!(ControllerConfig::player().validate(), Ok(()));
    }

    #[test]
    fn config_validate_rejects_bad_values() {
        let negative = ControllerConfig::default().with_walk_speed(-1.0);
        assert_eq!(
            negative.validate(),
            Err(ConfigError::NegativeParameter {
                name: "walk_speed",
                value: -1.0
            })
        );

        let steep = ControllerConfig::default().with_max_slope_degrees(90.0);
        assert!(matches!(steep.validate(), Err(ConfigError::InvalidSlopeAngle(_))));

        let flat = ControllerConfig::default().with_player_height(0.0);
        assert_eq!(flat.validate(), Err(ConfigError::InvalidHeight(0.0)));

        let air = ControllerConfig::default().with_air_multiplier(1.5);
        assert_eq!(air.validate(), Err(ConfigError::InvalidAirMultiplier(1.5)));
    }

    #[test]
    fn config_error_messages_name_the_field() {
        let err = ConfigError::NegativeParameter {
            name: "jump_force",
            value: -2.0,
        };
        assert!(err.to_string().contains("jump_force"));
    }

    #[test]
    fn config_deserializes_partial_json() {
        let config: ControllerConfig =
            serde_json::from_str(r#"{ "walk_speed": 5.0, "sprint_speed": 8.0, "slope_reentry": "ResumeOnCooldown" }"#)
                .expect("valid config json");

        assert_eq!(config.walk_speed, 5.0);
        assert_eq!(config.sprint_speed, 8.0);
        assert_eq!(config.slope_reentry, SlopeReentry::ResumeOnCooldown);
        assert_eq!(config.slope_hold_force, ControllerConfig::default().slope_hold_force);
    }

    #[test]
    fn slope_reentry_flag_values() {
        assert!(SlopeReentry::StaySuspended.exiting_slope_after_cooldown());
        assert!(!SlopeReentry::ResumeOnCooldown.exiting_slope_after_cooldown());
    }
}
