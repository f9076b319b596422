//! Tolerance assertions for scalars and angles.

use std::f64::consts::{PI, TAU};

/// Signed difference `a - b` wrapped into `[-π, π)`.
pub fn angle_diff(a: f64, b: f64) -> f64 {
    (a - b + PI).rem_euclid(TAU) - PI
}

/// Assert `|actual - expected| < tol`.
#[track_caller]
pub fn assert_close(actual: f64, expected: f64, tol: f64) {
    assert!(
        (actual - expected).abs() < tol,
        "expected {expected}, got {actual} (tol {tol})"
    );
}

/// Assert two angles coincide modulo a full turn.
#[track_caller]
pub fn assert_angle_close(actual: f64, expected: f64, tol: f64) {
    let diff = angle_diff(actual, expected);
    assert!(
        diff.abs() < tol,
        "expected angle {expected}, got {actual} (diff {diff}, tol {tol})"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn angle_diff_wraps_full_turns() {
        assert!(angle_diff(TAU + 0.1, 0.1).abs() < 1e-12);
        assert!(angle_diff(-3.0 * TAU, 0.0).abs() < 1e-12);
    }

    #[test]
    fn angle_diff_is_signed() {
        assert!((angle_diff(0.3, 0.1) - 0.2).abs() < 1e-12);
        assert!((angle_diff(0.1, 0.3) + 0.2).abs() < 1e-12);
    }

    #[test]
    fn close_angles_across_zero() {
        assert_angle_close(TAU - 1e-12, 0.0, 1e-9);
    }

    #[test]
    #[should_panic(expected = "expected 1")]
    fn assert_close_panics_when_far() {
        assert_close(2.0, 1.0, 0.5);
    }
}
