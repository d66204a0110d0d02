//! Precision policies.
//!
//! Deterministic float ordering for picking and sorting. Pick results must not
//! depend on iteration order or on the sign of a zero distance.

use core::cmp::Ordering;

/// Canonicalize a floating-point value for deterministic ordering.
///
/// Rules:
/// - `-0.0` becomes `0.0`
/// - all NaNs become a single canonical NaN
pub fn canonical_f64(v: f64) -> f64 {
    if v == 0.0 {
        // Handles +0.0 and -0.0.
        0.0
    } else if v.is_nan() {
        f64::NAN
    } else {
        v
    }
}

/// Deterministic total ordering for floats.
///
/// Prefer this any time you compare pick distances or sort floats.
pub fn stable_total_cmp_f64(a: f64, b: f64) -> Ordering {
    canonical_f64(a).total_cmp(&canonical_f64(b))
}

/// Largest of the values, or `floor` if all are smaller.
///
/// NaN inputs are ignored.
pub fn max_with_floor(values: &[f64], floor: f64) -> f64 {
    values
        .iter()
        .copied()
        .filter(|v| !v.is_nan())
        .fold(floor, f64::max)
}
