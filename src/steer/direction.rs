//! Walking direction estimate
//!
//! Head position jitters at the frame scale, so the walking velocity is
//! sampled over a coarser window and held between samples. Facing updates
//! every frame. `facing_alpha` trades one against the other.

use glam::Vec3;

use crate::consts::DIRECTION_EPSILON;
use crate::flatten;

#[derive(Debug, Clone, Default)]
pub struct DirectionEstimator {
    elapsed: f32,
    last_sampled: Option<Vec3>,
    walking_velocity: Vec3,
    direction: Vec3,
}

impl DirectionEstimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last held walking velocity (m/s)
    pub fn walking_velocity(&self) -> Vec3 {
        self.walking_velocity
    }

    /// Last computed direction (unit, flat) or zero
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Advance by `dt` and return the blended direction
    pub fn update(
        &mut self,
        position: Vec3,
        forward: Vec3,
        dt: f32,
        facing_alpha: f32,
        sample_period: f32,
    ) -> Vec3 {
        let last = *self.last_sampled.get_or_insert(position);

        if dt > 0.0 {
            self.elapsed += dt;
        }
        if self.elapsed > sample_period && self.elapsed > 0.0 {
            // A subnormal window overflows; keep the held velocity
            let velocity = (position - last) / self.elapsed;
            if velocity.is_finite() {
                self.walking_velocity = velocity;
            }
            self.last_sampled = Some(position);
            self.elapsed = 0.0;
        }

        let facing = flatten(forward).normalize_or_zero();
        let blended = flatten(facing_alpha * facing + (1.0 - facing_alpha) * self.walking_velocity);

        self.direction = if blended.is_finite() && blended.length() > DIRECTION_EPSILON {
            blended.normalize()
        } else {
            Vec3::ZERO
        };
        self.direction
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
