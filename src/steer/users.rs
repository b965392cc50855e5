//! Repulsion from other tracked users

use glam::Vec3;

use super::curves::exp_weight;
use super::state::TrackedUser;
use crate::flatten;
use crate::settings::SteeringConfig;

/// Sum of repulsions from every currently tracked user. Untracked entries
/// are skipped.
pub fn compute(head: Vec3, users: &[TrackedUser], config: &SteeringConfig) -> Vec3 {
    users
        .iter()
        .flatten()
        .map(|&user| {
            let offset = flatten(head - user);
            offset.normalize_or_zero() * exp_weight(offset.length(), config.intercept, config.steepness)
        })
        .fold(Vec3::ZERO, |acc, v| acc + v)
}
