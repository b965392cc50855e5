//! Steering data model
//!
//! Plain per-frame snapshots supplied by the host, plus the small pieces of
//! state the core carries between frames.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::consts::INITIAL_DRIFT;

/// Head pose snapshot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

impl Pose {
    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    /// Pose at `position` looking along yaw `yaw_deg` (0 = +Z)
    pub fn from_yaw(position: Vec3, yaw_deg: f32) -> Self {
        Self::new(position, Quat::from_rotation_y(yaw_deg.to_radians()))
    }

    /// Facing direction (+Z rotated by the head orientation)
    #[inline]
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::Z
    }

    /// Angle turned between two poses, in degrees
    pub fn angle_to(&self, other: &Pose) -> f32 {
        self.rotation.angle_between(other.rotation).to_degrees()
    }
}

/// Placement of the tracking space (rig) in the world.
///
/// Steering rotates the rig around the user's head; the physical room
/// follows the rig, so local coordinates are the physical ones.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RigTransform {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Default for RigTransform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

impl RigTransform {
    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    /// Rig-local direction to world
    #[inline]
    pub fn transform_vector(&self, v: Vec3) -> Vec3 {
        self.rotation * v
    }

    /// Rig-local point to world
    #[inline]
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        self.position + self.rotation * p
    }

    /// World point to rig-local
    #[inline]
    pub fn inverse_transform_point(&self, p: Vec3) -> Vec3 {
        self.rotation.inverse() * (p - self.position)
    }

    /// Rotate the rig by `degrees` about `axis` through `pivot`
    pub fn rotate_around(&mut self, pivot: Vec3, axis: Vec3, degrees: f32) {
        let axis = axis.normalize_or_zero();
        if axis == Vec3::ZERO || degrees == 0.0 {
            return;
        }
        let q = Quat::from_axis_angle(axis, degrees.to_radians());
        self.position = pivot + q * (self.position - pivot);
        self.rotation = (q * self.rotation).normalize();
    }
}

/// A sample of the physical safe-area perimeter
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundaryMarker {
    /// World position
    pub position: Vec3,
    /// Position in rig-local (physical) space
    pub local_position: Vec3,
    /// Offsets along this axis are ignored when measuring distance
    pub up: Vec3,
}

impl BoundaryMarker {
    /// Marker for an identity rig (world == local)
    pub fn new(position: Vec3, up: Vec3) -> Self {
        Self {
            position,
            local_position: position,
            up,
        }
    }

    /// Marker defined in the physical room, placed in the world through `rig`
    pub fn from_local(local_position: Vec3, local_up: Vec3, rig: &RigTransform) -> Self {
        Self {
            position: rig.transform_point(local_position),
            local_position,
            up: rig.transform_vector(local_up),
        }
    }
}

/// Another user's collision proxy; `None` when not currently tracked
pub type TrackedUser = Option<Vec3>;

/// Debounced circular-drift direction in [-1, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DriftState(f32);

impl Default for DriftState {
    fn default() -> Self {
        Self(INITIAL_DRIFT)
    }
}

impl DriftState {
    pub fn new(value: f32) -> Self {
        Self(value.clamp(-1.0, 1.0))
    }

    #[inline]
    pub fn value(&self) -> f32 {
        self.0
    }

    /// Move by `delta`, staying inside [-1, 1]
    pub fn ramp(&mut self, delta: f32) {
        let next = self.0 + delta;
        self.0 = if next.is_nan() { self.0 } else { next.clamp(-1.0, 1.0) };
    }
}

/// Everything the core reads in one frame
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    pub head: Pose,
    pub rig: RigTransform,
    pub dt: f32,
    pub markers: Vec<BoundaryMarker>,
    pub users: Vec<TrackedUser>,
    /// Drift centre in rig-local space
    pub boundary_center: Vec3,
    /// Closest flat distance from centre to a marker; computed from
    /// `markers` when absent
    pub closest_boundary: Option<f32>,
    pub suspended: bool,
}

/// Per-contribution magnitudes for debug display
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Diagnostics {
    pub total: f32,
    pub boundary: f32,
    pub player: f32,
    pub circle: f32,
    pub enabled: bool,
    /// Applied rotation speed, deg/s
    pub rotation_rate: f32,
    /// Direction to steering vector, degrees
    pub player_to_steer_angle: f32,
    /// Head speed, m/s
    pub linear_speed: f32,
    pub drift_multiplier: f32,
    /// Too-close distance was raised to `emergency_distance_floor`
    pub distance_clamped: bool,
}

/// Output of one steering frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct FrameResult {
    /// Angle before the gain curve
    pub raw_angle: f32,
    /// Degrees to rotate the rig this frame (after the gain curve)
    pub rotation: f32,
    /// Whether the host should apply `rotation`
    pub applied: bool,
    /// The too-close override produced this frame's angle
    pub emergency: bool,
    /// Vector for the host's arrow overlay
    pub indicator: Vec3,
    pub player_direction: Vec3,
    pub total: Vec3,
    pub diagnostics: Diagnostics,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drift_state_clamps() {
        let mut drift = DriftState::default();
        assert_eq!(drift.value(), INITIAL_DRIFT);
        drift.ramp(5.0);
        assert_eq!(drift.value(), 1.0);
        drift.ramp(-10.0);
        assert_eq!(drift.value(), -1.0);
        drift.ramp(f32::NAN);
        assert_eq!(drift.value(), -1.0);
    }

    #[test]
    fn test_pose_forward_and_angle() {
        let a = Pose::from_yaw(Vec3::ZERO, 0.0);
        let b = Pose::from_yaw(Vec3::ZERO, 30.0);
        assert!((a.forward() - Vec3::Z).length() < 1e-6);
        assert!((a.angle_to(&b) - 30.0).abs() < 1e-3);
    }

    #[test]
    fn test_rig_round_trip_and_rotation() {
        let mut rig = RigTransform::new(Vec3::new(1.0, 0.0, 2.0), Quat::from_rotation_y(0.4));
        let p = Vec3::new(0.5, 1.7, -0.25);
        let world = rig.transform_point(p);
        assert!((rig.inverse_transform_point(world) - p).length() < 1e-5);

        // Rotating about a pivot leaves the pivot fixed in local space
        let pivot_local = rig.inverse_transform_point(world);
        rig.rotate_around(world, Vec3::NEG_Y, 12.0);
        assert!((rig.transform_point(pivot_local) - world).length() < 1e-4);
    }
}
