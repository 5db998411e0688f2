//! Convenience constructors and assertions for entity state.

use golfram::{Entity, Vector2};

/// An entity of `mass` kilograms at `position` moving with `velocity`.
///
/// # Panics
/// Panics if the mass or state is invalid.
///
/// # Examples
/// ```
/// use glam::DVec2;
/// use test_utils::rolling_ball;
/// let ball = rolling_ball(DVec2::ZERO, DVec2::X, 1.0);
/// assert_eq!(ball.mass(), 1.0);
/// ```
#[must_use]
pub fn rolling_ball(position: Vector2, velocity: Vector2, mass: f64) -> Entity {
    Entity::new(position, velocity, mass).expect("valid entity")
}

/// Asserts that `actual` lies within `tolerance` of `expected` on both axes.
///
/// # Panics
/// Panics with both vectors when they differ by more than `tolerance`.
pub fn assert_vec_close(actual: Vector2, expected: Vector2, tolerance: f64) {
    let delta = (actual - expected).abs();
    assert!(
        delta.x <= tolerance && delta.y <= tolerance,
        "expected {expected} ± {tolerance}, got {actual}"
    );
}
