//! Bounds checking and point lookup on grids.
use golfram::{Grid, GridError, Tile, Vector2, PIXELS_PER_METER};
use proptest::prelude::*;
use rstest::{fixture, rstest};
use test_utils::{cell_centre, tile_meters};

#[fixture]
fn course() -> Grid {
    Grid::with_default_units(4, 3, 64, Tile::default()).expect("valid grid")
}

#[rstest]
#[case::top_left(0, 0)]
#[case::bottom_right(2, 3)]
fn inside_cells_resolve(course: Grid, #[case] row: i64, #[case] column: i64) {
    assert_eq!(course.cell_at(row, column), Ok(course.default_tile()));
}

#[rstest]
#[case::row_above(-1, 0)]
#[case::column_left(0, -1)]
#[case::last_row_wrap(-3, 0)]
#[case::row_below(3, 0)]
#[case::column_right(0, 4)]
fn outside_cells_fail(course: Grid, #[case] row: i64, #[case] column: i64) {
    assert_eq!(
        course.cell_at(row, column),
        Err(GridError::OutOfBounds { row, column })
    );
}

#[rstest]
fn points_resolve_to_their_cell(mut course: Grid) {
    let hole = course.place(2, 1, Tile::cup()).expect("in bounds");
    assert_eq!(course.cell_at_point(cell_centre(&course, 2, 1)), Ok(hole));
    assert_eq!(course.tile_at_point(cell_centre(&course, 2, 1)), Ok(&Tile::cup()));
}

#[rstest]
fn a_fraction_of_a_pixel_above_is_still_row_zero(course: Grid) {
    let just_above = Vector2::new(0.1, -0.9 / PIXELS_PER_METER);
    assert!(course.cell_at_point(just_above).is_ok());
    let a_row_above = Vector2::new(0.1, -tile_meters(&course) * 0.5);
    assert!(matches!(
        course.cell_at_point(a_row_above),
        Err(GridError::OutOfBounds { row: -1, .. })
    ));
}

proptest! {
    #[test]
    fn cell_at_succeeds_exactly_inside(row in -10i64..10, column in -10i64..10) {
        let grid = Grid::with_default_units(4, 3, 64, Tile::default()).expect("valid grid");
        let inside = (0..3).contains(&row) && (0..4).contains(&column);
        prop_assert_eq!(grid.cell_at(row, column).is_ok(), inside);
    }
}
