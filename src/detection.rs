//! Ground and slope classification.
//!
//! Two independent downward probes are cast from the body center each frame:
//! a short ground probe and a slightly longer slope probe. The ground probe
//! only answers "is there support below", the slope probe measures the angle
//! between world up and the surface normal. A tick can therefore be grounded
//! on flat floor and still see slope geometry through the longer probe.

use bevy::prelude::*;

use crate::collision::CollisionData;

/// Angles below this (radians) are treated as flat ground.
///
/// Engine normals of a level floor rarely come back as exactly `Vec3::Y`,
/// which would otherwise classify every floor as a very gentle slope.
pub const FLAT_GROUND_EPSILON: f32 = 1.0e-3;

/// Length of a downward probe for a body of the given height.
#[inline]
pub fn probe_length(height: f32, margin: f32) -> f32 {
    height * 0.5 + margin
}

/// Angle in radians between `up` and a surface normal.
pub fn surface_angle(normal: Vec3, up: Vec3) -> f32 {
    let normal = normal.normalize_or_zero();
    if normal == Vec3::ZERO {
        return 0.0;
    }
    normal.dot(up).clamp(-1.0, 1.0).acos()
}

/// Whether an angle counts as a walkable slope: `0 < angle < max_slope_angle`.
///
/// Flat ground (angle within [`FLAT_GROUND_EPSILON`]) and surfaces at or above
/// the limit are not slopes.
#[inline]
pub fn is_slope_angle(angle: f32, max_slope_angle: f32) -> bool {
    angle > FLAT_GROUND_EPSILON && angle < max_slope_angle
}

/// Contact with a walkable slope.
#[derive(Reflect, Debug, Clone, Copy, PartialEq)]
pub struct SlopeContact {
    /// Surface normal of the slope (unit length).
    pub normal: Vec3,
    /// Angle between world up and the normal, in radians.
    pub angle: f32,
}

impl SlopeContact {
    /// Classify a slope probe hit. Returns `None` for flat or too steep surfaces.
    pub fn classify(hit: &CollisionData, up: Vec3, max_slope_angle: f32) -> Option<Self> {
        let angle = surface_angle(hit.normal, up);
        is_slope_angle(angle, max_slope_angle).then(|| Self {
            normal: hit.normal.normalize_or_zero(),
            angle,
        })
    }

    /// Angle in degrees.
    pub fn angle_degrees(&self) -> f32 {
        self.angle.to_degrees()
    }

    /// Project a direction onto the slope plane and normalize it.
    ///
    /// A zero direction (or one parallel to the normal) yields zero.
    pub fn project(&self, direction: Vec3) -> Vec3 {
        (direction - self.normal * direction.dot(self.normal)).normalize_or_zero()
    }
}

/// What is supporting the body this frame.
#[derive(Reflect, Debug, Clone, Copy, Default, PartialEq)]
pub enum SupportState {
    /// Nothing within probe range.
    #[default]
    Airborne,
    /// Ground probe hit flat (or non-walkable) ground.
    Grounded,
    /// Slope probe found a walkable slope.
    OnSlope(SlopeContact),
}

impl SupportState {
    /// Derive support from the two independent probe results.
    ///
    /// Slope geometry takes precedence, since slope handling replaces gravity.
    pub fn derive(grounded: bool, slope: Option<SlopeContact>) -> Self {
        match slope {
            Some(contact) => Self::OnSlope(contact),
            None if grounded => Self::Grounded,
            None => Self::Airborne,
        }
    }

    pub fn is_airborne(&self) -> bool {
        matches!(self, Self::Airborne)
    }

    pub fn slope(&self) -> Option<SlopeContact> {
        match self {
            Self::OnSlope(contact) => Some(*contact),
            _ => None,
        }
    }
}
