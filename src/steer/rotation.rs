//! Steering vector to per-frame rotation
//!
//! Rotation is only injected while the head is turning or walking fast
//! enough to hide it. The too-close override ignores both gates.

use glam::Vec3;

use super::state::Pose;
use crate::consts::{EMERGENCY_DIVISOR, HALF_TURN_DEG, ROTATIONAL_TOTAL_SCALE};
use crate::settings::SteeringConfig;
use crate::signed_angle_deg;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RotationOutcome {
    /// Unscaled angle; the gain curve is applied by the caller
    pub angle: f32,
    /// Direction to steering vector, degrees
    pub signed_angle: f32,
    pub rotational_speed: f32,
    pub linear_speed: f32,
    pub emergency: bool,
    /// The too-close distance was raised to `emergency_distance_floor`
    pub distance_clamped: bool,
}

/// Compute this frame's unscaled rotation angle.
pub fn compute(
    total: Vec3,
    previous: &Pose,
    current: &Pose,
    player_direction: Vec3,
    dt: f32,
    too_close: Option<f32>,
    config: &SteeringConfig,
) -> RotationOutcome {
    let signed_angle = signed_angle_deg(player_direction, total.normalize_or_zero(), Vec3::Y);
    let mut outcome = RotationOutcome {
        signed_angle,
        ..Default::default()
    };

    let angle_change = previous.angle_to(current);
    if dt > 0.0 {
        outcome.rotational_speed = angle_change / dt;
        outcome.linear_speed = (current.position - previous.position).length() / dt;
    }

    if let Some(distance) = too_close {
        let floor = config.emergency_distance_floor.max(f32::EPSILON);
        let distance = if distance < floor {
            log::debug!("too-close distance {distance:.4} raised to floor {floor:.4}");
            outcome.distance_clamped = true;
            floor
        } else {
            distance
        };
        outcome.emergency = true;
        outcome.angle =
            config.too_close_multiplier * signed_angle / HALF_TURN_DEG / EMERGENCY_DIVISOR / distance;
        return outcome;
    }

    let magnitude = total.length();

    if outcome.rotational_speed > config.rotational_threshold {
        outcome.angle += angle_change * config.rotational_multiplier * signed_angle / HALF_TURN_DEG
            * (magnitude / ROTATIONAL_TOTAL_SCALE);
    }

    if outcome.linear_speed > config.linear_threshold {
        outcome.angle += signed_angle / HALF_TURN_DEG * config.linear_multiplier * magnitude;
    }

    outcome
}
