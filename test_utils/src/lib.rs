//! Utility helpers for tests.
//!
//! Course fixtures and tolerance assertions shared by the integration tests.

pub mod course;
pub mod physics;

pub use course::{cell_centre, lane, tile_meters};
pub use physics::{assert_vec_close, rolling_ball};
