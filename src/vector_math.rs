//! Basic vector math helper functions.
//! Small helpers for magnitudes, normalised vectors and projections that stay
//! well-defined for zero and non-finite input.
use glam::DVec2;

/// Two-dimensional vector in simulation units.
///
/// A plain `Copy` value: positions, velocities and accelerations are passed
/// around by value and never shared.
pub type Vector2 = DVec2;

/// Returns the magnitude of `vector`.
///
/// # Examples
/// ```
/// use golfram::vector_math::{vec_mag, Vector2};
/// let magnitude = vec_mag(Vector2::new(3.0, 4.0));
/// assert!((magnitude - 5.0).abs() < f64::EPSILON);
/// ```
#[must_use]
pub fn vec_mag(vector: Vector2) -> f64 {
    vector.length()
}

/// Returns the unit vector in the direction of `vector`.
///
/// The zero vector has no direction, and neither does a vector with a `NaN`
/// or infinite component; both yield [`Vector2::ZERO`] instead of dividing by
/// zero.
///
/// # Examples
///
/// ```
/// use golfram::{vec_normalize, Vector2};
/// let unit = vec_normalize(Vector2::new(-12.0, 0.0));
/// assert_eq!(unit, Vector2::new(-1.0, 0.0));
///
/// assert_eq!(vec_normalize(Vector2::ZERO), Vector2::ZERO);
/// ```
#[must_use]
pub fn vec_normalize(vector: Vector2) -> Vector2 {
    if !vector.is_finite() {
        return Vector2::ZERO;
    }
    vector.try_normalize().unwrap_or(Vector2::ZERO)
}

/// Projects `vector` onto the direction of `onto`.
///
/// Projecting onto the zero vector yields zero.
///
/// # Examples
///
/// ```
/// use golfram::vector_math::{vec_project, Vector2};
/// let projected = vec_project(Vector2::new(2.0, 3.0), Vector2::new(-4.0, 0.0));
/// assert_eq!(projected, Vector2::new(2.0, 0.0));
/// ```
#[must_use]
pub fn vec_project(vector: Vector2, onto: Vector2) -> Vector2 {
    let direction = vec_normalize(onto);
    direction * vector.dot(direction)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_ignores_non_finite_components() {
        assert_eq!(vec_normalize(Vector2::new(f64::NAN, 1.0)), Vector2::ZERO);
        assert_eq!(
            vec_normalize(Vector2::new(f64::INFINITY, 0.0)),
            Vector2::ZERO
        );
    }

    #[test]
    fn projection_drops_perpendicular_component() {
        let projected = vec_project(Vector2::new(1.0, 5.0), Vector2::new(0.0, 2.0));
        assert!(projected.x.abs() < 1e-12);
        assert!((projected.y - 5.0).abs() < 1e-12);
    }

    #[test]
    fn projection_onto_zero_is_zero() {
        assert_eq!(vec_project(Vector2::new(1.0, 1.0), Vector2::ZERO), Vector2::ZERO);
    }
}
