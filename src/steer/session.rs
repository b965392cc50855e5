//! One steering frame
//!
//! `SteeringSession` owns every piece of cross-frame state: the previous
//! pose, the direction estimator and DriftState. It runs in full every frame,
//! suspended or not, so nothing jumps when steering resumes.

use glam::Vec3;

use super::combine::combine;
use super::curves::rot_gain;
use super::direction::DirectionEstimator;
use super::drift::closest_boundary_distance;
use super::state::{Diagnostics, DriftState, FrameInput, FrameResult, Pose};
use super::{boundary, drift, rotation, users};
use crate::host::{BoundaryProvider, PoseSource, SuspendSignal, TrackedUserSource};
use crate::settings::{IndicatorMode, SteeringConfig};

#[derive(Debug, Clone)]
pub struct SteeringSession {
    config: SteeringConfig,
    direction: DirectionEstimator,
    drift: DriftState,
    previous: Option<Pose>,
    in_emergency: bool,
    frames: u64,
}

impl Default for SteeringSession {
    fn default() -> Self {
        Self::new(SteeringConfig::default())
    }
}

impl SteeringSession {
    pub fn new(config: SteeringConfig) -> Self {
        Self {
            config,
            direction: DirectionEstimator::new(),
            drift: DriftState::default(),
            previous: None,
            in_emergency: false,
            frames: 0,
        }
    }

    pub fn config(&self) -> &SteeringConfig {
        &self.config
    }

    /// Live tuning; history is kept
    pub fn config_mut(&mut self) -> &mut SteeringConfig {
        &mut self.config
    }

    pub fn set_config(&mut self, config: SteeringConfig) {
        self.config = config;
    }

    pub fn drift(&self) -> DriftState {
        self.drift
    }

    pub fn player_direction(&self) -> Vec3 {
        self.direction.direction()
    }

    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    /// Forget all history, e.g. after the user is teleported
    pub fn reset(&mut self) {
        log::info!("Steering session reset after {} frames", self.frames);
        self.direction.reset();
        self.drift = DriftState::default();
        self.previous = None;
        self.in_emergency = false;
        self.frames = 0;
    }

    /// Gather a frame from the host capabilities and run it
    pub fn tick_from<P, B, U, S>(&mut self, dt: f32, pose: &P, boundary: &B, users: &U, suspend: &S) -> FrameResult
    where
        P: PoseSource + ?Sized,
        B: BoundaryProvider + ?Sized,
        U: TrackedUserSource + ?Sized,
        S: SuspendSignal + ?Sized,
    {
        let input = FrameInput {
            head: pose.head_pose(),
            rig: pose.rig(),
            dt,
            markers: boundary.markers().to_vec(),
            users: users.tracked_users().to_vec(),
            boundary_center: boundary.center(),
            closest_boundary: boundary.closest_distance_from_center(),
            suspended: suspend.is_suspended(),
        };
        self.tick(&input)
    }

    /// Advance one frame
    pub fn tick(&mut self, input: &FrameInput) -> FrameResult {
        let config = &self.config;
        let dt = if input.dt.is_finite() && input.dt > 0.0 { input.dt } else { 0.0 };
        let head = input.head;
        let previous = self.previous.unwrap_or(head);

        let player_direction =
            self.direction
                .update(head.position, head.forward(), dt, config.facing_alpha, config.sample_period);

        let user_vec = users::compute(head.position, &input.users, config);
        let boundary = boundary::compute(head.position, &input.markers, config);

        let head_local = input.rig.inverse_transform_point(head.position);
        let closest = input
            .closest_boundary
            .or_else(|| closest_boundary_distance(input.boundary_center, &input.markers));
        let radius = drift::radius(closest, config.circle_radius_percent);
        let circle = drift::compute(
            head_local,
            input.boundary_center,
            radius,
            &input.rig,
            player_direction,
            dt,
            &mut self.drift,
            config,
        );

        let combined = combine(user_vec, boundary.vector, circle, config);
        let outcome = rotation::compute(
            combined.total,
            &previous,
            &head,
            player_direction,
            dt,
            boundary.too_close,
            config,
        );

        let mut rotation = rot_gain(outcome.angle, config.eagerness, config.asymptote_steepness);
        if !rotation.is_finite() {
            log::warn!("non-finite rotation {rotation} dropped on frame {}", self.frames);
            rotation = 0.0;
        }

        if outcome.emergency != self.in_emergency {
            if outcome.emergency {
                log::debug!(
                    "too-close override engaged at {:.3} m (frame {})",
                    boundary.too_close.unwrap_or_default(),
                    self.frames
                );
            } else {
                log::debug!("too-close override released (frame {})", self.frames);
            }
            self.in_emergency = outcome.emergency;
        }

        let enabled = config.effective_enabled(input.suspended);
        let applied = enabled && dt > 0.0 && rotation != 0.0;

        let indicator = match config.indicator {
            IndicatorMode::Direction => player_direction,
            IndicatorMode::Steering => combined.total,
        };

        let result = FrameResult {
            raw_angle: outcome.angle,
            rotation,
            applied,
            emergency: outcome.emergency,
            indicator,
            player_direction,
            total: combined.total,
            diagnostics: Diagnostics {
                total: combined.total.length(),
                boundary: combined.boundary.length(),
                player: combined.player.length(),
                circle: combined.circle.length(),
                enabled,
                rotation_rate: if dt > 0.0 { rotation / dt } else { 0.0 },
                player_to_steer_angle: outcome.signed_angle,
                linear_speed: outcome.linear_speed,
                drift_multiplier: self.drift.value(),
                distance_clamped: outcome.distance_clamped,
            },
        };

        log::trace!(
            "frame {}: angle {:.4} -> {:.4} deg, |total| {:.3}",
            self.frames,
            result.raw_angle,
            result.rotation,
            result.diagnostics.total
        );

        self.previous = Some(head);
        self.frames += 1;
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{FRAME_DT, INITIAL_DRIFT};
    use crate::steer::state::BoundaryMarker;

    fn walking_input(frame: u32, suspended: bool) -> FrameInput {
        let z = frame as f32 * 1.2 * FRAME_DT;
        FrameInput {
            head: Pose::from_yaw(Vec3::new(0.5, 1.7, z), 0.0),
            dt: FRAME_DT,
            markers: vec![
                BoundaryMarker::new(Vec3::new(2.0, 0.0, 0.0), Vec3::Z),
                BoundaryMarker::new(Vec3::new(-2.0, 0.0, 0.0), Vec3::Z),
            ],
            users: vec![Some(Vec3::new(1.0, 1.7, 0.5))],
            suspended,
            ..Default::default()
        }
    }

    #[test]
    fn test_first_frame_has_no_speed() {
        let mut session = SteeringSession::default();
        let result = session.tick(&walking_input(10, false));
        assert_eq!(result.diagnostics.linear_speed, 0.0);
        assert_eq!(session.frame_count(), 1);
    }

    #[test]
    fn test_walking_injects_rotation() {
        let mut session = SteeringSession::default();
        let mut last = FrameResult::default();
        for frame in 0..30 {
            last = session.tick(&walking_input(frame, false));
        }
        assert!(last.diagnostics.linear_speed > session.config().linear_threshold);
        assert!(last.raw_angle != 0.0);
        assert!(last.applied);
    }

    #[test]
    fn test_suspended_still_advances_state() {
        let mut active = SteeringSession::default();
        let mut paused = SteeringSession::default();
        for frame in 0..30 {
            let a = active.tick(&walking_input(frame, false));
            let p = paused.tick(&walking_input(frame, true));
            assert!(!p.applied);
            assert_eq!(a.rotation, p.rotation);
        }
        assert_eq!(active.drift(), paused.drift());
        assert_ne!(paused.drift().value(), INITIAL_DRIFT);
    }

    #[test]
    fn test_disabled_never_applies() {
        let mut session = SteeringSession::new(SteeringConfig {
            enabled: false,
            ..Default::default()
        });
        for frame in 0..30 {
            let result = session.tick(&walking_input(frame, false));
            assert!(!result.applied);
            assert!(!result.diagnostics.enabled);
        }
    }

    #[test]
    fn test_hot_reload_keeps_history() {
        let mut session = SteeringSession::default();
        for frame in 0..20 {
            session.tick(&walking_input(frame, false));
        }
        let drift = session.drift();
        let direction = session.player_direction();

        session.config_mut().linear_multiplier *= 2.0;
        assert_eq!(session.drift(), drift);
        assert_eq!(session.player_direction(), direction);

        // Next frame measures speed against the retained previous pose
        let result = session.tick(&walking_input(20, false));
        assert!(result.diagnostics.linear_speed > 1.0);
    }

    #[test]
    fn test_indicator_mode() {
        let mut session = SteeringSession::new(SteeringConfig {
            indicator: IndicatorMode::Steering,
            ..Default::default()
        });
        let result = session.tick(&walking_input(0, false));
        assert_eq!(result.indicator, result.total);
    }

    #[test]
    fn test_zero_dt_frame_is_inert() {
        let mut session = SteeringSession::default();
        session.tick(&walking_input(0, false));
        let mut input = walking_input(5, false);
        input.dt = 0.0;
        let result = session.tick(&input);
        assert!(!result.applied);
        assert_eq!(result.diagnostics.rotation_rate, 0.0);
        assert_eq!(result.diagnostics.linear_speed, 0.0);
    }

    #[test]
    fn test_distance_floor_is_reported() {
        let mut session = SteeringSession::default();
        let head = Vec3::new(0.0, 1.7, 0.0);
        let input = |marker_x: f32| FrameInput {
            head: Pose::from_yaw(head, 0.0),
            dt: FRAME_DT,
            markers: vec![BoundaryMarker::new(Vec3::new(marker_x, 0.0, 0.0), Vec3::Z)],
            ..Default::default()
        };

        // Marker under the head: 0.01 m is below the 0.05 m floor
        let result = session.tick(&input(0.01));
        assert!(result.emergency);
        assert!(result.diagnostics.distance_clamped);
        assert!(result.raw_angle.is_finite());

        // Inside min_distance but above the floor
        let result = session.tick(&input(0.2));
        assert!(result.emergency);
        assert!(!result.diagnostics.distance_clamped);

        let result = session.tick(&input(1.0));
        assert!(!result.emergency);
        assert!(!result.diagnostics.distance_clamped);
    }

    #[test]
    fn test_reset() {
        let mut session = SteeringSession::default();
        for frame in 0..20 {
            session.tick(&walking_input(frame, false));
        }
        session.reset();
        assert_eq!(session.frame_count(), 0);
        assert_eq!(session.drift().value(), INITIAL_DRIFT);
        assert_eq!(session.player_direction(), Vec3::ZERO);
    }
}
