//! Circular drift field
//!
//! Biases the user into circling the centre of the safe area. The direction
//! of travel around the circle is a debounced multiplier (DriftState) rather
//! than a per-frame boolean: it ramps toward +1 while the user heads roughly
//! along the tangent and toward -1 while they head against it, so crossing
//! the 90° decision line produces a smooth reversal instead of flicker.

use glam::Vec3;

use super::state::{BoundaryMarker, DriftState, RigTransform};
use crate::consts::{DRIFT_AMPLIFICATION, DRIFT_MIN_DIRECTION};
use crate::settings::SteeringConfig;
use crate::{flatten, signed_angle_deg};

/// Smallest flat distance from `center` to any marker (rig-local space)
pub fn closest_boundary_distance(center: Vec3, markers: &[BoundaryMarker]) -> Option<f32> {
    markers
        .iter()
        .map(|m| flatten(center - m.local_position).length())
        .min_by(f32::total_cmp)
}

/// Drift circle radius as a percentage of the closest boundary distance
pub fn radius(closest_boundary: Option<f32>, radius_percent: f32) -> f32 {
    let percent = radius_percent.clamp(0.0, 100.0);
    closest_boundary.map_or(0.0, |d| d * percent / 100.0)
}

/// Unscaled tangent around the centre, in world space.
///
/// Its length grows from 0 at the centre to 1 at `radius` and beyond.
pub fn tangent(head_local: Vec3, center: Vec3, radius: f32, rig: &RigTransform) -> Vec3 {
    let to_center = flatten(head_local - center);
    let magnitude = if radius > 0.0 {
        (to_center.length() / radius).clamp(0.0, 1.0)
    } else {
        0.0
    };
    rig.transform_vector(Vec3::Y.cross(to_center).normalize_or_zero() * magnitude)
}

/// Ramp `drift` toward the side of the tangent the user is heading.
pub fn update_drift(drift: &mut DriftState, tangent: Vec3, player_direction: Vec3, dt: f32, seconds_to_switch: f32) {
    if dt <= 0.0 || tangent == Vec3::ZERO || player_direction.length() <= DRIFT_MIN_DIRECTION {
        return;
    }

    let step = if seconds_to_switch > 0.0 {
        2.0 * dt / seconds_to_switch
    } else {
        2.0
    };

    if signed_angle_deg(tangent, player_direction, Vec3::Y).abs() < 90.0 {
        drift.ramp(step);
    } else {
        drift.ramp(-step);
    }
}

/// Drift contribution for this frame; advances `drift`.
#[allow(clippy::too_many_arguments)]
pub fn compute(
    head_local: Vec3,
    center: Vec3,
    radius: f32,
    rig: &RigTransform,
    player_direction: Vec3,
    dt: f32,
    drift: &mut DriftState,
    config: &SteeringConfig,
) -> Vec3 {
    let tangent = tangent(head_local, center, radius, rig);
    update_drift(drift, tangent, player_direction, dt, config.seconds_to_switch);
    tangent * drift.value() * DRIFT_AMPLIFICATION
}
