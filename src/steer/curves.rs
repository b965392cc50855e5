//! Weight and gain curves
//!
//! - `exp_weight`: linear fall-off of repulsion with distance
//! - `rot_gain`: perceptual saturation of the per-frame rotation

/// Past this the hyperbolic tangent is ±1 to f32 precision
const TANH_SATURATION: f32 = 20.0;

/// Repulsion weight for an object `distance` away.
///
/// `intercept` at zero distance, falling linearly to 0 at `steepness` and
/// staying there. Never negative.
#[inline]
pub fn exp_weight(distance: f32, intercept: f32, steepness: f32) -> f32 {
    if steepness <= 0.0 {
        return 0.0;
    }
    let weight = (-distance + steepness) * (intercept / steepness);
    if weight > 0.0 { weight } else { 0.0 }
}

/// Gain applied to a raw rotation angle: `x * tanh(x / 2 * eagerness) * asymptote`.
///
/// Evaluated on |x| and re-signed so the curve is exactly odd.
pub fn rot_gain(x: f32, eagerness: f32, asymptote_steepness: f32) -> f32 {
    if x < 0.0 {
        return -rot_gain(-x, eagerness, asymptote_steepness);
    }
    x * tanh(x / 2.0 * eagerness) * asymptote_steepness
}

/// Hyperbolic tangent from exponentials
pub fn tanh(x: f32) -> f32 {
    if x > TANH_SATURATION {
        return 1.0;
    }
    if x < -TANH_SATURATION {
        return -1.0;
    }
    let (ep, en) = (x.exp(), (-x).exp());
    (ep - en) / (ep + en)
}
