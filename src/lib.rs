//! Library crate providing the tile-grid physics core of a top-down minigolf
//! game.
//!
//! Balls are point masses rolling over a [`Grid`] of tiles. Each tile
//! decelerates whatever rolls over it, boosts also pull it toward a target
//! velocity, and holes end the level. A [`Stepper`] advances everything in
//! fixed time steps and reports which tiles need redrawing.
//!
//! ```
//! use golfram::prelude::*;
//!
//! let mut grid = Grid::with_default_units(4, 1, 64, Tile::default()).unwrap();
//! grid.place(0, 3, Tile::cup()).unwrap();
//! let mut stepper = Stepper::new(grid);
//! let ball = stepper.watch(Entity::ball(Vector2::new(0.1, 0.1))).unwrap();
//! stepper.strike(ball, Vector2::new(0.05, 0.0)).unwrap();
//! let mut dirty = Vec::new();
//! assert_eq!(stepper.tick(1.0 / 600.0, &mut dirty).unwrap(), StepResult::Running);
//! ```
pub mod config;
pub mod constants;
pub mod entity;
pub mod error;
pub mod grid;
pub mod level;
pub mod logging;
pub mod numeric;
pub mod physics;
pub mod stepper;
pub mod tile;
pub mod units;
pub mod vector_math;
pub use constants::*;

// Re-export commonly used items
pub use config::SimConfig;
pub use entity::{Entity, EntityId};
pub use error::{ConfigError, EntityError, GridError, LevelError, StepError, TileError, UnitError};
pub use grid::{Grid, TileId};
pub use level::{Level, TileDef};
pub use logging::init as init_logging;
pub use physics::applied_acceleration;
pub use stepper::{OutOfBoundsPolicy, RedrawSink, StepResult, Stepper, StepperConfig};
pub use tile::Tile;
pub use units::{Quantity, Unit, UnitConverter};
pub use vector_math::{vec_mag, vec_normalize, Vector2};

pub mod prelude {
    //! Prelude exports used in documentation examples.
    //!
    //! ```rust,no_run
    //! use golfram::prelude::*;
    //! ```

    pub use crate::Entity;
    pub use crate::Grid;
    pub use crate::RedrawSink;
    pub use crate::StepResult;
    pub use crate::Stepper;
    pub use crate::Tile;
    pub use crate::Vector2;
}
