//! Tile behaviour: the acceleration a cell applies to whatever rolls over it.
//!
//! Tiles live in the grid that created them and are shared by every entity
//! currently on them. Their only mutable state, a boost tile's occupancy
//! count, is changed through the enter/exit hooks, which only the stepper
//! calls.

use log::trace;

use crate::entity::Entity;
use crate::error::TileError;
use crate::physics::{boost_correction, friction_acceleration};
use crate::vector_math::Vector2;
use crate::{BOOST_FRICTION, DEFAULT_FRICTION, HOLE_CAPTURE_SPEED};

fn checked_friction(friction: f64) -> Result<f64, TileError> {
    if friction.is_finite() && friction >= 0.0 {
        Ok(friction)
    } else {
        Err(TileError::InvalidFriction(friction))
    }
}

/// Plain surface that only slows entities down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrictionTile {
    friction: f64,
}

impl FrictionTile {
    /// Creates a friction tile.
    ///
    /// # Errors
    /// Returns [`TileError::InvalidFriction`] for negative or non-finite
    /// friction.
    pub fn new(friction: f64) -> Result<Self, TileError> {
        checked_friction(friction).map(|checked| Self { friction: checked })
    }

    /// Deceleration magnitude in m/s².
    #[must_use]
    pub const fn friction(&self) -> f64 {
        self.friction
    }
}

impl Default for FrictionTile {
    fn default() -> Self {
        Self {
            friction: DEFAULT_FRICTION,
        }
    }
}

/// Surface that drags entities toward a fixed velocity.
///
/// The tile counts the entities standing on it; a non-zero count marks it
/// active for the renderer. The count never changes the physics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoostTile {
    friction: f64,
    boost_velocity: Vector2,
    active_count: u32,
}

impl BoostTile {
    /// Creates an idle boost tile.
    ///
    /// # Errors
    /// Returns [`TileError::InvalidFriction`] for negative or non-finite
    /// friction and [`TileError::InvalidBoostVelocity`] for a non-finite
    /// target.
    pub fn new(friction: f64, boost_velocity: Vector2) -> Result<Self, TileError> {
        let checked = checked_friction(friction)?;
        if !boost_velocity.is_finite() {
            return Err(TileError::InvalidBoostVelocity(boost_velocity));
        }
        Ok(Self {
            friction: checked,
            boost_velocity,
            active_count: 0,
        })
    }

    /// Deceleration magnitude in m/s².
    #[must_use]
    pub const fn friction(&self) -> f64 {
        self.friction
    }

    /// Velocity the tile pulls entities toward.
    #[must_use]
    pub const fn boost_velocity(&self) -> Vector2 {
        self.boost_velocity
    }

    /// Number of entities currently on the tile.
    #[must_use]
    pub const fn active_count(&self) -> u32 {
        self.active_count
    }
}

/// The cup. Friction like any other tile; a slow entity on it is holed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoleTile {
    friction: f64,
    capture_speed: f64,
}

impl HoleTile {
    /// Creates a hole.
    ///
    /// # Errors
    /// Returns [`TileError::InvalidFriction`] or
    /// [`TileError::InvalidCaptureSpeed`] for negative or non-finite values.
    pub fn new(friction: f64, capture_speed: f64) -> Result<Self, TileError> {
        let checked = checked_friction(friction)?;
        if !capture_speed.is_finite() || capture_speed < 0.0 {
            return Err(TileError::InvalidCaptureSpeed(capture_speed));
        }
        Ok(Self {
            friction: checked,
            capture_speed,
        })
    }

    /// Deceleration magnitude in m/s².
    #[must_use]
    pub const fn friction(&self) -> f64 {
        self.friction
    }

    /// Speed at or below which an entity drops in.
    #[must_use]
    pub const fn capture_speed(&self) -> f64 {
        self.capture_speed
    }
}

/// Behaviour of one grid cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tile {
    /// Friction only.
    Friction(FrictionTile),
    /// Friction plus a pull toward a target velocity.
    Boost(BoostTile),
    /// Friction plus the level goal.
    Hole(HoleTile),
}

impl Default for Tile {
    fn default() -> Self {
        Self::Friction(FrictionTile::default())
    }
}

impl Tile {
    /// A friction tile. See [`FrictionTile::new`].
    ///
    /// # Errors
    /// Propagates [`FrictionTile::new`] validation failures.
    pub fn friction(friction: f64) -> Result<Self, TileError> {
        FrictionTile::new(friction).map(Self::Friction)
    }

    /// A boost tile. See [`BoostTile::new`].
    ///
    /// # Errors
    /// Propagates [`BoostTile::new`] validation failures.
    pub fn boost(friction: f64, boost_velocity: Vector2) -> Result<Self, TileError> {
        BoostTile::new(friction, boost_velocity).map(Self::Boost)
    }

    /// A boost tile with the standard boost friction.
    ///
    /// # Errors
    /// Returns [`TileError::InvalidBoostVelocity`] for a non-finite target.
    pub fn boost_toward(boost_velocity: Vector2) -> Result<Self, TileError> {
        Self::boost(BOOST_FRICTION, boost_velocity)
    }

    /// A hole. See [`HoleTile::new`].
    ///
    /// # Errors
    /// Propagates [`HoleTile::new`] validation failures.
    pub fn hole(friction: f64, capture_speed: f64) -> Result<Self, TileError> {
        HoleTile::new(friction, capture_speed).map(Self::Hole)
    }

    /// A hole with standard friction and capture speed.
    #[must_use]
    pub const fn cup() -> Self {
        Self::Hole(HoleTile {
            friction: DEFAULT_FRICTION,
            capture_speed: HOLE_CAPTURE_SPEED,
        })
    }

    /// Friction coefficient of the tile in m/s².
    #[must_use]
    pub const fn friction_coefficient(&self) -> f64 {
        match self {
            Self::Friction(tile) => tile.friction,
            Self::Boost(tile) => tile.friction,
            Self::Hole(tile) => tile.friction,
        }
    }

    /// Short name of the tile kind, for logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Friction(_) => "friction",
            Self::Boost(_) => "boost",
            Self::Hole(_) => "hole",
        }
    }

    /// Acceleration (m/s², independent of mass) the tile applies to `entity`.
    ///
    /// Friction opposes the incoming velocity. A boost tile additionally
    /// moves `entity.velocity` in place by
    /// `(boost_velocity - projection) / boost_steps`, so callers must both
    /// integrate the returned acceleration and accept the velocity change.
    ///
    /// # Examples
    /// ```
    /// use golfram::{Entity, Tile, Vector2};
    /// let tile = Tile::friction(0.4).unwrap();
    /// let mut ball = Entity::ball(Vector2::ZERO).with_velocity(Vector2::new(0.0, 3.0));
    /// assert_eq!(tile.force_on(&mut ball, 60.0), Vector2::new(0.0, -0.4));
    /// ```
    pub fn force_on(&self, entity: &mut Entity, boost_steps: f64) -> Vector2 {
        let friction = friction_acceleration(self.friction_coefficient(), entity.velocity);
        if let Self::Boost(boost) = self {
            entity.velocity += boost_correction(entity.velocity, boost.boost_velocity, boost_steps);
        }
        friction
    }

    /// Whether `entity` is slow enough to drop into this tile.
    #[must_use]
    pub fn captures(&self, entity: &Entity) -> bool {
        match self {
            Self::Hole(hole) => entity.speed() <= hole.capture_speed,
            Self::Friction(_) | Self::Boost(_) => false,
        }
    }

    /// Whether the tile should be drawn in its active state.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        match self {
            Self::Boost(boost) => boost.active_count > 0,
            Self::Friction(_) | Self::Hole(_) => false,
        }
    }

    /// Records `entity` arriving on the tile.
    pub(crate) fn on_enter(&mut self, entity: &Entity) {
        if let Self::Boost(boost) = self {
            boost.active_count = boost.active_count.saturating_add(1);
            trace!(
                "boost engaged at {} ({} on tile)",
                entity.position,
                boost.active_count
            );
        }
    }

    /// Records `entity` leaving the tile. The count never drops below zero.
    pub(crate) fn on_exit(&mut self, entity: &Entity) {
        if let Self::Boost(boost) = self {
            boost.active_count = boost.active_count.saturating_sub(1);
            trace!(
                "boost released at {} ({} on tile)",
                entity.position,
                boost.active_count
            );
        }
    }
}
