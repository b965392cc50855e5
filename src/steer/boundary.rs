//! Boundary repulsion field
//!
//! Each marker pushes the head away along its in-plane offset, weighted by
//! the repulsion curve. Markers inside `min_distance` also trip the
//! too-close override.

use glam::Vec3;

use super::curves::exp_weight;
use super::state::BoundaryMarker;
use crate::flatten;
use crate::settings::SteeringConfig;

/// Boundary field output for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BoundaryContribution {
    /// Unweighted sum of per-marker repulsions
    pub vector: Vec3,
    /// In-plane distance of the last marker closer than `min_distance`
    pub too_close: Option<f32>,
}

/// In-plane offset from a marker to the head
#[inline]
pub fn marker_offset(head: Vec3, marker: &BoundaryMarker) -> Vec3 {
    let to_head = head - marker.position;
    let along_up = if marker.up.length_squared() > 0.0 {
        to_head.project_onto(marker.up)
    } else {
        Vec3::ZERO
    };
    flatten(to_head - along_up)
}

pub fn compute(head: Vec3, markers: &[BoundaryMarker], config: &SteeringConfig) -> BoundaryContribution {
    let mut result = BoundaryContribution::default();

    for marker in markers {
        let offset = marker_offset(head, marker);
        let distance = offset.length();

        if distance < config.min_distance {
            result.too_close = Some(distance);
        }

        let weight = exp_weight(distance, config.intercept, config.steepness);
        result.vector += offset.normalize_or_zero() * weight;
    }

    result
}
