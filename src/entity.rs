//! Point-mass entities advanced by the stepper.

use std::fmt;

use log::warn;
use serde::Serialize;

use crate::error::EntityError;
use crate::physics::{applied_acceleration, MIN_MASS};
use crate::vector_math::{vec_mag, Vector2};
use crate::BALL_MASS;

/// Identifier handed out by [`Stepper::watch`](crate::Stepper::watch).
///
/// Ids are unique per stepper and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct EntityId(pub(crate) u64);

impl EntityId {
    /// Returns the raw identifier.
    #[must_use]
    pub const fn into_inner(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A simulated point mass, typically a golf ball.
///
/// Position is in meters and velocity in meters per second. Mass is fixed at
/// construction and always positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Entity {
    /// Position in meters; `y` grows down the course.
    pub position: Vector2,
    /// Velocity in meters per second.
    pub velocity: Vector2,
    mass: f64,
}

impl Entity {
    /// Creates an entity.
    ///
    /// # Errors
    /// Returns [`EntityError::InvalidMass`] unless `mass` is finite and above
    /// [`MIN_MASS`], and [`EntityError::NonFiniteState`] when the position or
    /// velocity has a non-finite component.
    pub fn new(position: Vector2, velocity: Vector2, mass: f64) -> Result<Self, EntityError> {
        if !mass.is_finite() || mass <= MIN_MASS {
            return Err(EntityError::InvalidMass(mass));
        }
        if !position.is_finite() || !velocity.is_finite() {
            return Err(EntityError::NonFiniteState { position, velocity });
        }
        Ok(Self {
            position,
            velocity,
            mass,
        })
    }

    /// A golf ball at rest at `position`.
    ///
    /// # Examples
    /// ```
    /// use golfram::{Entity, Vector2, BALL_MASS};
    /// let ball = Entity::ball(Vector2::new(0.5, 0.5));
    /// assert_eq!(ball.mass(), BALL_MASS);
    /// assert_eq!(ball.velocity, Vector2::ZERO);
    /// ```
    #[must_use]
    pub const fn ball(position: Vector2) -> Self {
        Self {
            position,
            velocity: Vector2::ZERO,
            mass: BALL_MASS,
        }
    }

    /// Replaces the velocity, keeping position and mass.
    #[must_use]
    pub const fn with_velocity(mut self, velocity: Vector2) -> Self {
        self.velocity = velocity;
        self
    }

    /// Mass in kilograms.
    #[must_use]
    pub const fn mass(&self) -> f64 {
        self.mass
    }

    /// Current speed in meters per second.
    #[must_use]
    pub fn speed(&self) -> f64 {
        vec_mag(self.velocity)
    }

    /// Whether the entity moves slower than `threshold`.
    #[must_use]
    pub fn is_at_rest(&self, threshold: f64) -> bool {
        self.speed() < threshold
    }

    /// Applies `force` (newtons) for `duration` seconds.
    pub fn apply_force(&mut self, force: Vector2, duration: f64) {
        match applied_acceleration(force, self.mass) {
            Some(acceleration) => self.velocity += acceleration * duration,
            None => warn!("force {force} ignored for entity with mass {}", self.mass),
        }
    }

    /// Applies an instantaneous impulse (newton-seconds), such as a putt.
    ///
    /// # Examples
    /// ```
    /// use golfram::{Entity, Vector2};
    /// let mut ball = Entity::new(Vector2::ZERO, Vector2::ZERO, 0.5).unwrap();
    /// ball.strike(Vector2::new(1.0, 0.0));
    /// assert_eq!(ball.velocity, Vector2::new(2.0, 0.0));
    /// ```
    pub fn strike(&mut self, impulse: Vector2) {
        self.apply_force(impulse, 1.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::zero(0.0)]
    #[case::negative(-1.0)]
    #[case::tiny(1e-13)]
    #[case::nan(f64::NAN)]
    #[case::infinite(f64::INFINITY)]
    fn rejects_invalid_mass(#[case] mass: f64) {
        assert!(matches!(
            Entity::new(Vector2::ZERO, Vector2::ZERO, mass),
            Err(EntityError::InvalidMass(_))
        ));
    }

    #[test]
    fn rejects_non_finite_state() {
        let result = Entity::new(Vector2::new(f64::NAN, 0.0), Vector2::ZERO, 1.0);
        assert!(matches!(result, Err(EntityError::NonFiniteState { .. })));
    }

    #[test]
    fn force_scales_with_mass_and_duration() {
        let mut entity = Entity::new(Vector2::ZERO, Vector2::ZERO, 2.0).expect("valid entity");
        entity.apply_force(Vector2::new(4.0, -2.0), 0.5);
        assert_eq!(entity.velocity, Vector2::new(1.0, -0.5));
    }

    #[test]
    fn rest_threshold_is_exclusive() {
        let ball = Entity::ball(Vector2::ZERO).with_velocity(Vector2::new(0.05, 0.0));
        assert!(!ball.is_at_rest(0.05));
        assert!(ball.is_at_rest(0.050_001));
    }
}
