//! Error types for the simulation core, the level loader and configuration.
//!
//! Each module reports through its own enum; modules that wrap another
//! module's work convert its errors with `#[from]`.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::entity::EntityId;
use crate::grid::TileId;
use crate::units::Unit;
use crate::vector_math::Vector2;

/// Failures converting between units.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum UnitError {
    /// No ratio is registered between the two units.
    #[error("no conversion registered from {from} to {to}")]
    UnknownConversion {
        /// Unit of the input value.
        from: Unit,
        /// Requested output unit.
        to: Unit,
    },
    /// A ratio was not a positive finite number, or related a unit to itself.
    #[error("invalid ratio {factor} of {smaller} per {larger}")]
    InvalidRatio {
        /// The larger unit of the pair.
        larger: Unit,
        /// The smaller unit of the pair.
        smaller: Unit,
        /// Rejected number of `smaller` per `larger`.
        factor: f64,
    },
}

/// Invalid tile parameters.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum TileError {
    /// Friction must be finite and non-negative.
    #[error("friction must be finite and non-negative, got {0}")]
    InvalidFriction(f64),
    /// Capture speed must be finite and non-negative.
    #[error("capture speed must be finite and non-negative, got {0}")]
    InvalidCaptureSpeed(f64),
    /// Boost target velocity has a non-finite component.
    #[error("boost velocity must be finite, got {0}")]
    InvalidBoostVelocity(Vector2),
}

/// Invalid entity state.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum EntityError {
    /// Mass must be finite and strictly positive.
    #[error("mass must be finite and positive, got {0}")]
    InvalidMass(f64),
    /// Position and velocity must be finite.
    #[error("entity state must be finite (position {position}, velocity {velocity})")]
    NonFiniteState {
        /// Offending position.
        position: Vector2,
        /// Offending velocity.
        velocity: Vector2,
    },
}

/// Failures resolving or editing grid cells.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GridError {
    /// The coordinate lies outside the grid's current extent.
    #[error("cell ({row}, {column}) is outside the grid")]
    OutOfBounds {
        /// Requested row.
        row: i64,
        /// Requested column.
        column: i64,
    },
    /// Width, height and tile size must all be at least one.
    #[error("grid dimensions {width}x{height} with tile size {tile_size} are invalid")]
    InvalidDimensions {
        /// Requested width in cells.
        width: usize,
        /// Requested height in cells.
        height: usize,
        /// Requested tile edge in pixels.
        tile_size: u32,
    },
    /// The tile id does not belong to this grid.
    #[error("{0} is not registered with this grid")]
    UnknownTile(TileId),
    /// The grid's unit converter cannot map positions onto cells.
    #[error(transparent)]
    Conversion(#[from] UnitError),
}

/// Failures driving the simulation stepper.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum StepError {
    /// The time step must be positive and finite.
    #[error("time step must be positive and finite, got {0}")]
    InvalidTimeStep(f64),
    /// An entity cannot be watched from outside the grid.
    #[error("entity at {position} lies outside the grid")]
    OutsideGrid {
        /// Rejected starting position.
        position: Vector2,
    },
    /// The entity is not watched by this stepper.
    #[error("entity {0} is not watched")]
    UnknownEntity(EntityId),
    /// A grid lookup failed for a reason other than bounds.
    #[error(transparent)]
    Grid(#[from] GridError),
}

/// Failures loading a level description.
#[derive(Debug, Error)]
pub enum LevelError {
    /// The level file could not be read.
    #[error("failed to read level {}", .path.display())]
    Io {
        /// Path of the level file.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The level document is not valid JSON for the level schema.
    #[error("malformed level: {0}")]
    Parse(#[from] serde_json::Error),
    /// The level has no cells.
    #[error("level has no cells")]
    Empty,
    /// The default tile key has no definition.
    #[error("default tile {0:?} is not defined")]
    MissingDefault(String),
    /// Tile keys must be exactly one character.
    #[error("tile key {0:?} must be a single character")]
    InvalidKey(String),
    /// A tile definition has invalid parameters.
    #[error("tile {key:?} is invalid")]
    Tile {
        /// Key of the offending definition.
        key: String,
        /// Parameter failure.
        #[source]
        source: TileError,
    },
    /// The grid could not be built.
    #[error(transparent)]
    Grid(#[from] GridError),
    /// The unit ratios are invalid.
    #[error(transparent)]
    Unit(#[from] UnitError),
}

/// Failures loading simulation settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The settings file could not be read.
    #[error("failed to read settings {}", .path.display())]
    Io {
        /// Path of the settings file.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The settings document is not valid JSON for the settings schema.
    #[error("malformed settings: {0}")]
    Parse(#[from] serde_json::Error),
    /// A setting is out of range.
    #[error("setting `{field}` {reason}")]
    Invalid {
        /// Name of the offending field.
        field: &'static str,
        /// Why the value was rejected.
        reason: &'static str,
    },
}
