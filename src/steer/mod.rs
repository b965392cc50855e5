//! Deterministic steering core
//!
//! Everything that turns a frame of poses and geometry into a rotation lives
//! here. This module must stay pure and deterministic:
//! - Host-supplied dt only, no wall clock
//! - No randomness
//! - Stable iteration order (markers and users in the order given)
//! - No rendering or device dependencies

pub mod boundary;
pub mod combine;
pub mod curves;
pub mod direction;
pub mod drift;
pub mod rotation;
pub mod session;
pub mod state;
pub mod users;

pub use boundary::BoundaryContribution;
pub use combine::{Combined, combine};
pub use curves::{exp_weight, rot_gain, tanh};
pub use direction::DirectionEstimator;
pub use rotation::RotationOutcome;
pub use session::SteeringSession;
pub use state::{
    BoundaryMarker, Diagnostics, DriftState, FrameInput, FrameResult, Pose, RigTransform, TrackedUser,
};
