//! rdw-steer - redirected walking for shared VR spaces
//!
//! Core modules:
//! - `steer`: Deterministic per-frame steering (fields, direction, rotation)
//! - `host`: Capability traits the host application implements
//! - `settings`: Tunable steering parameters

pub mod host;
pub mod settings;
pub mod steer;

pub use settings::{ConfigError, IndicatorMode, SteeringConfig};

use glam::Vec3;

/// Steering constants
pub mod consts {
    /// Default frame time used by the demo and tests (90 Hz headset)
    pub const FRAME_DT: f32 = 1.0 / 90.0;

    /// Fixed gain applied to the circular drift vector
    pub const DRIFT_AMPLIFICATION: f32 = 5.0;
    /// DriftState at session start (slightly clockwise)
    pub const INITIAL_DRIFT: f32 = 0.1;
    /// Below this direction length the drift sign is frozen
    pub const DRIFT_MIN_DIRECTION: f32 = 0.002;

    /// Divisor in the too-close override formula
    pub const EMERGENCY_DIVISOR: f32 = 3.0;
    /// |total| is divided by this before scaling the rotational contribution
    pub const ROTATIONAL_TOTAL_SCALE: f32 = 5.0;

    /// Blended directions shorter than this count as "no direction"
    pub const DIRECTION_EPSILON: f32 = 1e-6;

    /// Half a turn, in degrees
    pub const HALF_TURN_DEG: f32 = 180.0;
}

/// Drop the vertical component
#[inline]
pub fn flatten(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z)
}

/// Signed angle in degrees from `from` to `to`, measured about `axis`.
///
/// Range is [-180, 180]. Returns 0 when either vector is (near) zero, so
/// callers never see NaN from degenerate input.
pub fn signed_angle_deg(from: Vec3, to: Vec3, axis: Vec3) -> f32 {
    let denom = (from.length_squared() * to.length_squared()).sqrt();
    if denom < 1e-15 {
        return 0.0;
    }
    let cos = (from.dot(to) / denom).clamp(-1.0, 1.0);
    let unsigned = cos.acos().to_degrees();
    if axis.dot(from.cross(to)) < 0.0 {
        -unsigned
    } else {
        unsigned
    }
}
