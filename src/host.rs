//! Host capability layer
//!
//! The steering core never talks to a headset, scene graph or menu system
//! directly. The host exposes them through these traits:
//! - `PoseSource`: head pose and rig placement
//! - `BoundaryProvider`: perimeter markers and the drift centre
//! - `TrackedUserSource`: other users sharing the space
//! - `SuspendSignal`: blocking UI such as a pause menu

use std::sync::atomic::{AtomicBool, Ordering};

use glam::Vec3;

use crate::steer::drift::closest_boundary_distance;
use crate::steer::{BoundaryMarker, Pose, RigTransform, TrackedUser};

pub trait PoseSource {
    fn head_pose(&self) -> Pose;

    fn rig(&self) -> RigTransform {
        RigTransform::default()
    }
}

pub trait BoundaryProvider {
    fn markers(&self) -> &[BoundaryMarker];

    /// Drift centre in rig-local space
    fn center(&self) -> Vec3;

    fn closest_distance_from_center(&self) -> Option<f32> {
        closest_boundary_distance(self.center(), self.markers())
    }
}

pub trait TrackedUserSource {
    fn tracked_users(&self) -> &[TrackedUser];
}

pub trait SuspendSignal {
    fn is_suspended(&self) -> bool;
}

impl PoseSource for Pose {
    fn head_pose(&self) -> Pose {
        *self
    }
}

impl TrackedUserSource for () {
    fn tracked_users(&self) -> &[TrackedUser] {
        &[]
    }
}

impl TrackedUserSource for Vec<TrackedUser> {
    fn tracked_users(&self) -> &[TrackedUser] {
        self
    }
}

impl SuspendSignal for bool {
    fn is_suspended(&self) -> bool {
        *self
    }
}

impl SuspendSignal for AtomicBool {
    fn is_suspended(&self) -> bool {
        self.load(Ordering::Relaxed)
    }
}

/// Fixed perimeter, e.g. loaded once from the room setup
#[derive(Debug, Clone, Default)]
pub struct StaticBoundary {
    markers: Vec<BoundaryMarker>,
    /// (position, up) in rig-local space, for re-placing after rig moves
    local: Vec<(Vec3, Vec3)>,
    center: Vec3,
}

impl StaticBoundary {
    /// Perimeter from rig-local (position, up) pairs
    pub fn new(local: Vec<(Vec3, Vec3)>, center: Vec3, rig: &RigTransform) -> Self {
        let mut boundary = Self {
            markers: Vec::with_capacity(local.len()),
            local,
            center,
        };
        boundary.follow_rig(rig);
        boundary
    }

    /// Axis-aligned rectangle in rig-local space, one marker every `spacing`.
    ///
    /// Each marker's `up` runs along its edge, so distances are measured
    /// perpendicular to the wall.
    pub fn rectangle(half_extents: (f32, f32), spacing: f32, rig: &RigTransform) -> Self {
        let (hx, hz) = half_extents;
        let spacing = spacing.max(0.01);
        let mut local = Vec::new();

        let steps_x = ((2.0 * hx) / spacing).ceil().max(1.0) as usize;
        let steps_z = ((2.0 * hz) / spacing).ceil().max(1.0) as usize;

        for i in 0..=steps_x {
            let x = -hx + 2.0 * hx * i as f32 / steps_x as f32;
            local.push((Vec3::new(x, 0.0, -hz), Vec3::X));
            local.push((Vec3::new(x, 0.0, hz), Vec3::X));
        }
        for i in 1..steps_z {
            let z = -hz + 2.0 * hz * i as f32 / steps_z as f32;
            local.push((Vec3::new(-hx, 0.0, z), Vec3::Z));
            local.push((Vec3::new(hx, 0.0, z), Vec3::Z));
        }

        Self::new(local, Vec3::ZERO, rig)
    }

    /// Re-place markers in the world after the rig moved
    pub fn follow_rig(&mut self, rig: &RigTransform) {
        self.markers.clear();
        self.markers.extend(
            self.local
                .iter()
                .map(|&(position, up)| BoundaryMarker::from_local(position, up, rig)),
        );
    }
}

impl BoundaryProvider for StaticBoundary {
    fn markers(&self) -> &[BoundaryMarker] {
        &self.markers
    }

    fn center(&self) -> Vec3 {
        self.center
    }
}
