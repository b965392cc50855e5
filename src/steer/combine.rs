//! Weighted blend of the three steering fields

use glam::Vec3;

use crate::settings::SteeringConfig;

/// Combined steering vector plus the weighted parts it was built from
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Combined {
    pub total: Vec3,
    pub player: Vec3,
    pub boundary: Vec3,
    pub circle: Vec3,
}

/// `total_strength * (player_weight * users + boundary_weight * boundary + circle_weight * circle)`.
///
/// Weights are used as given; values above 1 over-amplify a technique.
pub fn combine(users: Vec3, boundary: Vec3, circle: Vec3, config: &SteeringConfig) -> Combined {
    let player = config.player_weight * users;
    let boundary = config.boundary_weight * boundary;
    let circle = config.circle_weight * circle;

    Combined {
        total: config.total_strength * (player + boundary + circle),
        player,
        boundary,
        circle,
    }
}
