use glam::Vec3;
use proptest::prelude::*;

use rdw_steer::SteeringConfig;
use rdw_steer::steer::{BoundaryMarker, DirectionEstimator, DriftState, boundary, combine, drift, exp_weight, rot_gain};

fn vec3(range: std::ops::Range<f32>) -> impl Strategy<Value = Vec3> {
    (range.clone(), range.clone(), range).prop_map(|(x, y, z)| Vec3::new(x, y, z))
}

proptest! {
    #[test]
    fn exp_weight_non_negative_and_non_increasing(
        intercept in 0.0f32..10.0,
        steepness in 0.01f32..10.0,
        d1 in 0.0f32..1.0e6,
        d2 in 0.0f32..1.0e6,
    ) {
        let (near, far) = if d1 <= d2 { (d1, d2) } else { (d2, d1) };
        let w_near = exp_weight(near, intercept, steepness);
        let w_far = exp_weight(far, intercept, steepness);
        prop_assert!(w_near >= 0.0);
        prop_assert!(w_far >= 0.0);
        prop_assert!(w_far <= w_near);
    }

    #[test]
    fn rot_gain_is_odd(x in -1.0e4f32..1.0e4, c in 0.0f32..5.0, d in 0.0f32..5.0) {
        prop_assert_eq!(rot_gain(-x, c, d), -rot_gain(x, c, d));
        prop_assert!(rot_gain(x, c, d).is_finite());
        prop_assert_eq!(rot_gain(0.0, c, d), 0.0);
    }

    #[test]
    fn drift_state_stays_bounded(
        steps in prop::collection::vec((vec3(-1.0..1.0), vec3(-1.0..1.0), 0.0f32..0.5), 1..200),
        seconds_to_switch in 0.001f32..5.0,
    ) {
        let mut state = DriftState::default();
        for (tangent, direction, dt) in steps {
            drift::update_drift(&mut state, tangent, direction, dt, seconds_to_switch);
            prop_assert!((-1.0..=1.0).contains(&state.value()));
        }
    }

    #[test]
    fn direction_is_unit_or_zero(
        samples in prop::collection::vec((vec3(-3.0..3.0), vec3(-1.0..1.0), 0.0f32..0.1), 1..100),
        alpha in 0.0f32..1.0,
        period in 0.0f32..0.3,
    ) {
        let mut estimator = DirectionEstimator::new();
        for (position, forward, dt) in samples {
            let dir = estimator.update(position, forward, dt, alpha, period);
            prop_assert!(!dir.is_nan());
            prop_assert_eq!(dir.y, 0.0);
            prop_assert!(dir == Vec3::ZERO || (dir.length() - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn combiner_is_linear_per_input(
        u in vec3(-5.0..5.0),
        b in vec3(-5.0..5.0),
        c in vec3(-5.0..5.0),
        k in -4.0f32..4.0,
        weights in (0.0f32..3.0, 0.0f32..3.0, 0.0f32..3.0, 0.0f32..3.0),
    ) {
        let config = SteeringConfig {
            total_strength: weights.0,
            player_weight: weights.1,
            boundary_weight: weights.2,
            circle_weight: weights.3,
            ..Default::default()
        };
        let base = combine(u, b, c, &config);
        let scaled = combine(u * k, b, c, &config);
        let expected = base.total + (k - 1.0) * config.total_strength * base.player;
        prop_assert!((scaled.total - expected).length() < 1e-2);
        prop_assert_eq!(scaled.boundary, base.boundary);
        prop_assert_eq!(scaled.circle, base.circle);
    }

    #[test]
    fn too_close_is_strict(min_distance in 0.05f32..1.0, eps in 1.0e-3f32..0.04) {
        let config = SteeringConfig { min_distance, ..Default::default() };
        let head = Vec3::ZERO;

        let at = BoundaryMarker::new(Vec3::new(min_distance, 0.0, 0.0), Vec3::Y);
        prop_assert_eq!(boundary::compute(head, &[at], &config).too_close, None);

        let inside = BoundaryMarker::new(Vec3::new(min_distance - eps, 0.0, 0.0), Vec3::Y);
        prop_assert!(boundary::compute(head, &[inside], &config).too_close.is_some());
    }
}
