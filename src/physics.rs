//! Physics helper functions.
//!
//! Provides the acceleration and integration maths used by the stepper. The
//! functions operate on plain [`Vector2`] values so tiles, entities and
//! standalone tests can share them.

use crate::vector_math::{vec_mag, vec_normalize, vec_project, Vector2};

/// Smallest acceptable mass to avoid numerically unstable accelerations.
pub const MIN_MASS: f64 = 1e-12;

/// Computes acceleration from a force vector and a mass.
///
/// Returns `None` if `mass` is non-positive, effectively zero (see
/// [`MIN_MASS`]) or not finite. The calculation applies `F = ma`
/// component-wise.
///
/// # Examples
///
/// ```
/// use golfram::{applied_acceleration, Vector2};
/// let accel = applied_acceleration(Vector2::new(7.0, -14.0), 7.0).unwrap();
/// assert!((accel.x - 1.0).abs() < 1e-12);
/// assert!((accel.y + 2.0).abs() < 1e-12);
/// assert!(applied_acceleration(Vector2::X, 0.0).is_none());
/// ```
#[must_use]
pub fn applied_acceleration(force: Vector2, mass: f64) -> Option<Vector2> {
    (mass.is_finite() && mass > MIN_MASS).then(|| force / mass)
}

/// Deceleration opposing `velocity` with magnitude `friction`.
///
/// An entity at rest has no direction of motion to oppose, so the result is
/// the zero vector.
///
/// # Examples
///
/// ```
/// use golfram::physics::friction_acceleration;
/// use golfram::Vector2;
/// let accel = friction_acceleration(0.4, Vector2::new(2.0, 0.0));
/// assert_eq!(accel, Vector2::new(-0.4, 0.0));
/// assert_eq!(friction_acceleration(0.4, Vector2::ZERO), Vector2::ZERO);
/// ```
#[must_use]
pub fn friction_acceleration(friction: f64, velocity: Vector2) -> Vector2 {
    -vec_normalize(velocity) * friction
}

/// Caps a friction `acceleration` so one step of `dt` brings the opposed
/// component of `velocity` to rest instead of reversing it.
///
/// Only the component of `velocity` running against `acceleration` limits the
/// result; an acceleration that already fits is returned unchanged.
///
/// # Examples
///
/// ```
/// use golfram::physics::limit_friction;
/// use golfram::Vector2;
/// let capped = limit_friction(Vector2::new(-5.0, 0.0), Vector2::new(0.001, 0.0), 0.01);
/// assert!((capped.x + 0.1).abs() < 1e-12);
/// ```
#[must_use]
pub fn limit_friction(acceleration: Vector2, velocity: Vector2, dt: f64) -> Vector2 {
    let magnitude = vec_mag(acceleration);
    if magnitude <= 0.0 || dt <= 0.0 {
        return acceleration;
    }
    let opposed = (-velocity.dot(acceleration) / magnitude).max(0.0);
    let limit = opposed / dt;
    if magnitude > limit {
        acceleration * (limit / magnitude)
    } else {
        acceleration
    }
}

/// Velocity change pulling `velocity` toward `target` over `steps` calls.
///
/// The component of `velocity` along `target` is compared with `target` and a
/// `1 / steps` share of the difference is returned. `steps` below one is
/// treated as one so the correction never overshoots.
#[must_use]
pub fn boost_correction(velocity: Vector2, target: Vector2, steps: f64) -> Vector2 {
    let along = vec_project(velocity, target);
    (target - along) / steps.max(1.0)
}

/// Advances `position` and `velocity` by `dt` under constant `acceleration`.
///
/// Velocity is updated first and the position then moves with the new
/// velocity plus the acceleration term: `v' = v + a·dt`,
/// `p' = p + v'·dt + ½·a·dt²`.
///
/// # Examples
///
/// ```
/// use golfram::physics::integrate;
/// use golfram::Vector2;
/// let (position, velocity) = integrate(Vector2::ZERO, Vector2::X, Vector2::X, 1.0);
/// assert_eq!(velocity, Vector2::new(2.0, 0.0));
/// assert_eq!(position, Vector2::new(2.5, 0.0));
/// ```
#[must_use]
pub fn integrate(
    position: Vector2,
    velocity: Vector2,
    acceleration: Vector2,
    dt: f64,
) -> (Vector2, Vector2) {
    let new_velocity = velocity + acceleration * dt;
    let displacement = new_velocity * dt + acceleration * (0.5 * dt * dt);
    (position + displacement, new_velocity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn correction_reaches_target_in_one_step_when_steps_is_one() {
        let corrected =
            Vector2::new(2.0, 0.0) + boost_correction(Vector2::new(2.0, 0.0), Vector2::new(-2.0, 0.0), 1.0);
        assert_relative_eq!(corrected.x, -2.0);
        assert_relative_eq!(corrected.y, 0.0);
    }

    #[test]
    fn correction_keeps_perpendicular_motion() {
        let velocity = Vector2::new(0.0, 3.0);
        let delta = boost_correction(velocity, Vector2::new(-2.0, 0.0), 4.0);
        assert_relative_eq!(delta.x, -0.5);
        assert_relative_eq!(delta.y, 0.0);
    }

    #[test]
    fn zero_target_applies_no_correction() {
        let delta = boost_correction(Vector2::new(1.0, 1.0), Vector2::ZERO, 60.0);
        assert_eq!(delta, Vector2::ZERO);
    }

    #[test]
    fn slow_motion_stops_instead_of_reversing() {
        let velocity = Vector2::new(0.001, 0.0);
        let dt = 1.0 / 600.0;
        let capped = limit_friction(friction_acceleration(5.0, velocity), velocity, dt);
        let after = velocity + capped * dt;
        assert_relative_eq!(after.x, 0.0);
        assert_relative_eq!(after.y, 0.0);
    }

    #[test]
    fn fast_motion_keeps_full_friction() {
        let velocity = Vector2::new(3.0, 4.0);
        let friction = friction_acceleration(0.4, velocity);
        assert_eq!(limit_friction(friction, velocity, 1.0 / 60.0), friction);
    }

    #[test]
    fn rejects_non_finite_mass() {
        assert!(applied_acceleration(Vector2::X, f64::NAN).is_none());
        assert!(applied_acceleration(Vector2::X, -1.0).is_none());
    }
}
