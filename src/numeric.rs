//! Numeric conversion helpers used across the project.
//!
//! These utilities guard conversions between the floating-point simulation
//! domain and the signed cell indices used by the grid. Out-of-range values
//! map to `None` rather than saturating, so a lookup never lands on a real
//! cell by accident.

/// `2^63`, the first `f64` above the `i64` domain.
const I64_LIMIT: f64 = 9_223_372_036_854_775_808.0;

/// Floor the value and convert to `i64`, returning `None` when it is not
/// finite or falls outside the `i64` domain.
///
/// # Examples
/// ```
/// use golfram::numeric::floor_to_i64;
/// assert_eq!(floor_to_i64(2.7), Some(2));
/// assert_eq!(floor_to_i64(-0.25), Some(-1));
/// assert_eq!(floor_to_i64(f64::NAN), None);
/// ```
#[expect(
    clippy::cast_possible_truncation,
    reason = "The floored value is validated against the i64 domain."
)]
#[must_use]
pub fn floor_to_i64(value: f64) -> Option<i64> {
    if !value.is_finite() {
        return None;
    }
    let floored = value.floor();
    if floored < -I64_LIMIT || floored >= I64_LIMIT {
        return None;
    }
    Some(floored as i64)
}

/// Convert a signed index into a `usize` strictly below `len`.
///
/// Negative indices are rejected outright; they never wrap around to the end
/// of the collection.
#[must_use]
pub fn checked_index(index: i64, len: usize) -> Option<usize> {
    usize::try_from(index).ok().filter(|&checked| checked < len)
}

/// Convert a collection index into the signed domain used for cell lookups.
///
/// Indices beyond `i64::MAX` (unreachable for in-memory grids) saturate.
#[must_use]
pub fn index_to_i64(index: usize) -> i64 {
    i64::try_from(index).unwrap_or(i64::MAX)
}
