//! Small courses for exercising the stepper.

use golfram::{Grid, Tile, Vector2};

/// A single row of `width` friction tiles, each its own instance.
///
/// # Panics
/// Panics if `width` is zero or `friction` is invalid.
///
/// # Examples
/// ```
/// use test_utils::lane;
/// let grid = lane(3, 0.4, 64);
/// assert_eq!((grid.width(), grid.height()), (3, 1));
/// ```
#[must_use]
pub fn lane(width: usize, friction: f64, tile_size: u32) -> Grid {
    let tile = Tile::friction(friction).expect("valid friction");
    let mut grid = Grid::with_default_units(width, 1, tile_size, tile).expect("valid grid");
    for index in 0..width {
        let column = i64::try_from(index).expect("column fits i64");
        grid.place(0, column, tile).expect("in bounds");
    }
    grid
}

/// Edge of one cell of `grid` in meters.
///
/// # Panics
/// Panics if the grid cannot convert pixels to meters.
#[must_use]
pub fn tile_meters(grid: &Grid) -> f64 {
    grid.converter()
        .to_meters(f64::from(grid.tile_size()))
        .expect("grid converts pixels")
}

/// Centre of the cell at `(row, column)` in meters.
///
/// # Examples
/// ```
/// use test_utils::{cell_centre, lane};
/// let grid = lane(3, 0.0, 64);
/// let centre = cell_centre(&grid, 0, 2);
/// assert_eq!(grid.cell_at_point(centre), grid.cell_at(0, 2));
/// ```
#[must_use]
pub fn cell_centre(grid: &Grid, row: u32, column: u32) -> Vector2 {
    let edge = tile_meters(grid);
    Vector2::new(
        (f64::from(column) + 0.5) * edge,
        (f64::from(row) + 0.5) * edge,
    )
}
