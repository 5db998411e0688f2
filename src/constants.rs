//! Physics and course constants shared across the simulation.
//!
//! Lengths are in meters unless the name says otherwise. The ball values are
//! those of a regulation golf ball.

/// Pixels drawn per meter of course.
pub const PIXELS_PER_METER: f64 = 187.0;
/// Edge length of one grid cell, in pixels.
pub const DEFAULT_TILE_SIZE: u32 = 64;
/// Friction deceleration of an ordinary fairway tile (m/s²).
pub const DEFAULT_FRICTION: f64 = 0.4;
/// Friction deceleration of a boost tile (m/s²).
pub const BOOST_FRICTION: f64 = 5.0;
/// Rate (1/s) at which a boost tile pulls velocity toward its target.
///
/// The per-step correction is `(target - projection) / N` with
/// `N = steps_per_second / DEFAULT_BOOST_RATE`.
pub const DEFAULT_BOOST_RATE: f64 = 10.0;
/// Speed (m/s) at or below which a ball resting on a hole drops in.
pub const HOLE_CAPTURE_SPEED: f64 = 0.5;
/// Rendered frames per second driven by the caller loop.
pub const FRAME_RATE: u32 = 60;
/// Physics ticks run per rendered frame.
pub const SUBSTEPS: u32 = 10;
/// Speed (m/s) below which an entity counts as stopped.
pub const REST_SPEED: f64 = 0.05;
/// Mass of a golf ball (kg).
pub const BALL_MASS: f64 = 0.0459;
