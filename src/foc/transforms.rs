// Angle helpers for the rotor-state estimator

use core::f32::consts::{PI, TAU};
use libm::fmodf;

/// Normalize angle to range [0, 2π)
///
/// # Arguments
/// * `angle` - Angle in radians
///
/// # Returns
/// Normalized angle in range [0, 2π)
///
/// # Implementation
/// Uses `fmodf` (exact remainder), so the result is in range for any finite
/// input and the cost does not depend on the magnitude of `angle`.
#[inline]
pub fn normalize_angle(angle: f32) -> f32 {
    let mut normalized = fmodf(angle, TAU);
    if normalized < 0.0 {
        normalized += TAU;
    }
    // -ε + TAU rounds up to TAU
    if normalized >= TAU {
        normalized -= TAU;
    }
    normalized
}

/// Wrap angle to range (-π, π]
///
/// Values already inside the range are returned unchanged, which makes the
/// function idempotent.
///
/// # Arguments
/// * `angle` - Angle in radians (finite)
///
/// # Returns
/// Wrapped angle in range (-π, π]
#[inline]
pub fn wrap_pm_pi(angle: f32) -> f32 {
    if angle > -PI && angle <= PI {
        return angle;
    }
    // PI - [0, 2π) = (-π, π]
    PI - normalize_angle(PI - angle)
}
