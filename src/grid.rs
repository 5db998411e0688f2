//! Rectangular course of tiles.
//!
//! A [`Grid`] owns a palette of [`Tile`] instances and a `height × width`
//! array of [`TileId`]s into it. Several cells may share one tile instance;
//! they then share its occupancy state. Slot zero of the palette is the
//! default tile used when the grid grows.

use std::fmt;

use log::debug;

use crate::error::GridError;
use crate::numeric::{checked_index, floor_to_i64, index_to_i64};
use crate::tile::Tile;
use crate::units::{Unit, UnitConverter};
use crate::vector_math::Vector2;

/// Handle to a tile registered with a [`Grid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileId(pub(crate) usize);

impl TileId {
    /// Position of the tile in its grid's palette.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tile {}", self.0)
    }
}

/// A course: tile palette, cell layout and the units relating the two.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    tiles: Vec<Tile>,
    cells: Vec<Vec<TileId>>,
    width: usize,
    height: usize,
    tile_size: u32,
    converter: UnitConverter,
}

impl Grid {
    /// Creates a `width × height` grid filled with `default_tile`.
    ///
    /// `tile_size` is the edge of one cell in pixels. The converter must
    /// relate meters and pixels; the grid adds the tile-to-pixel ratio to it.
    ///
    /// # Errors
    /// Returns [`GridError::InvalidDimensions`] when any size is zero and
    /// [`GridError::Conversion`] when `converter` cannot turn meters into
    /// pixels.
    pub fn new(
        width: usize,
        height: usize,
        tile_size: u32,
        default_tile: Tile,
        converter: UnitConverter,
    ) -> Result<Self, GridError> {
        if width == 0 || height == 0 || tile_size == 0 {
            return Err(GridError::InvalidDimensions {
                width,
                height,
                tile_size,
            });
        }
        converter.to_pixels(0.0)?;
        let converter_with_tiles =
            converter.with_ratio(Unit::Tile, Unit::Pixel, f64::from(tile_size))?;
        Ok(Self {
            tiles: vec![default_tile],
            cells: vec![vec![TileId(0); width]; height],
            width,
            height,
            tile_size,
            converter: converter_with_tiles,
        })
    }

    /// Creates a grid using the default meter/pixel ratio.
    ///
    /// # Errors
    /// Returns [`GridError::InvalidDimensions`] when any size is zero.
    ///
    /// # Examples
    /// ```
    /// use golfram::{Grid, Tile};
    /// let grid = Grid::with_default_units(4, 3, 64, Tile::default()).unwrap();
    /// assert_eq!((grid.width(), grid.height()), (4, 3));
    /// assert!(grid.cell_at(-1, 0).is_err());
    /// ```
    pub fn with_default_units(
        width: usize,
        height: usize,
        tile_size: u32,
        default_tile: Tile,
    ) -> Result<Self, GridError> {
        Self::new(width, height, tile_size, default_tile, UnitConverter::default())
    }

    /// Number of columns.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Edge of one cell in pixels.
    #[must_use]
    pub const fn tile_size(&self) -> u32 {
        self.tile_size
    }

    /// Unit table used to map positions onto cells.
    #[must_use]
    pub const fn converter(&self) -> &UnitConverter {
        &self.converter
    }

    /// Registers `tile` as a new palette entry.
    pub fn add_tile(&mut self, tile: Tile) -> TileId {
        self.tiles.push(tile);
        TileId(self.tiles.len() - 1)
    }

    /// The tile used to fill new rows and columns.
    #[must_use]
    pub const fn default_tile(&self) -> TileId {
        TileId(0)
    }

    /// The tile behind `id`, if it belongs to this grid.
    #[must_use]
    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(id.0)
    }

    pub(crate) fn tile_mut(&mut self, id: TileId) -> Option<&mut Tile> {
        self.tiles.get_mut(id.0)
    }

    /// Every registered tile, indexed by [`TileId::index`].
    #[must_use]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Cell rows from top to bottom.
    #[must_use]
    pub fn rows(&self) -> &[Vec<TileId>] {
        &self.cells
    }

    fn known(&self, id: TileId) -> Result<TileId, GridError> {
        if id.0 < self.tiles.len() {
            Ok(id)
        } else {
            Err(GridError::UnknownTile(id))
        }
    }

    /// Tile id stored at `(row, column)`.
    ///
    /// # Errors
    /// Returns [`GridError::OutOfBounds`] unless `0 ≤ row < height` and
    /// `0 ≤ column < width`.
    pub fn cell_at(&self, row: i64, column: i64) -> Result<TileId, GridError> {
        checked_index(row, self.height)
            .zip(checked_index(column, self.width))
            .and_then(|(r, c)| self.cells.get(r)?.get(c).copied())
            .ok_or(GridError::OutOfBounds { row, column })
    }

    /// Tile stored at `(row, column)`.
    ///
    /// # Errors
    /// As [`Grid::cell_at`].
    pub fn tile_at(&self, row: i64, column: i64) -> Result<&Tile, GridError> {
        let id = self.cell_at(row, column)?;
        self.tile(id).ok_or(GridError::UnknownTile(id))
    }

    /// Row and column under `position` (meters), without bounds checks.
    ///
    /// Each coordinate is converted to whole pixels, truncating toward zero,
    /// and floored into cells. Non-finite coordinates map to `i64::MIN`.
    ///
    /// # Errors
    /// Returns [`GridError::Conversion`] if the converter cannot produce
    /// pixels.
    pub fn cell_index_at_point(&self, position: Vector2) -> Result<(i64, i64), GridError> {
        let size = f64::from(self.tile_size);
        let row = self.converter.to_pixels(position.y)? / size;
        let column = self.converter.to_pixels(position.x)? / size;
        Ok((
            floor_to_i64(row).unwrap_or(i64::MIN),
            floor_to_i64(column).unwrap_or(i64::MIN),
        ))
    }

    /// Tile id under `position` (meters).
    ///
    /// # Errors
    /// Returns [`GridError::OutOfBounds`] when the point lies off the grid.
    ///
    /// # Examples
    /// ```
    /// use golfram::{Grid, Tile, Vector2, PIXELS_PER_METER};
    /// let mut grid = Grid::with_default_units(1, 3, 64, Tile::default()).unwrap();
    /// let hole = grid.place(2, 0, Tile::cup()).unwrap();
    /// let tile_m = 64.0 / PIXELS_PER_METER;
    /// let point = Vector2::new(0.5 * tile_m, 2.5 * tile_m);
    /// assert_eq!(grid.cell_at_point(point).unwrap(), hole);
    /// ```
    pub fn cell_at_point(&self, position: Vector2) -> Result<TileId, GridError> {
        let (row, column) = self.cell_index_at_point(position)?;
        self.cell_at(row, column)
    }

    /// Tile under `position` (meters).
    ///
    /// # Errors
    /// As [`Grid::cell_at_point`].
    pub fn tile_at_point(&self, position: Vector2) -> Result<&Tile, GridError> {
        let id = self.cell_at_point(position)?;
        self.tile(id).ok_or(GridError::UnknownTile(id))
    }

    /// Overwrites the cell at `(row, column)`.
    ///
    /// # Errors
    /// Returns [`GridError::OutOfBounds`] for coordinates off the grid and
    /// [`GridError::UnknownTile`] for ids from another grid.
    pub fn set_cell(&mut self, row: i64, column: i64, tile: TileId) -> Result<(), GridError> {
        let known = self.known(tile)?;
        let out_of_bounds = GridError::OutOfBounds { row, column };
        let (r, c) = checked_index(row, self.height)
            .zip(checked_index(column, self.width))
            .ok_or(out_of_bounds)?;
        let cell = self
            .cells
            .get_mut(r)
            .and_then(|cells| cells.get_mut(c))
            .ok_or(out_of_bounds)?;
        *cell = known;
        Ok(())
    }

    /// Registers `tile` and stores it at `(row, column)`.
    ///
    /// Nothing is registered when the coordinate is off the grid.
    ///
    /// # Errors
    /// Returns [`GridError::OutOfBounds`] for coordinates off the grid.
    pub fn place(&mut self, row: i64, column: i64, tile: Tile) -> Result<TileId, GridError> {
        self.cell_at(row, column)?;
        let id = self.add_tile(tile);
        self.set_cell(row, column, id)?;
        Ok(id)
    }

    /// Appends a row at the bottom, filled with `tile` or the default tile.
    ///
    /// # Errors
    /// Returns [`GridError::UnknownTile`] for ids from another grid.
    pub fn append_row(&mut self, tile: Option<TileId>) -> Result<(), GridError> {
        let fill = self.known(tile.unwrap_or_else(|| self.default_tile()))?;
        self.cells.push(vec![fill; self.width]);
        self.height += 1;
        debug!("grid grew to {} rows", self.height);
        Ok(())
    }

    /// Appends a column on the right, filled with `tile` or the default tile.
    ///
    /// # Errors
    /// Returns [`GridError::UnknownTile`] for ids from another grid.
    pub fn append_column(&mut self, tile: Option<TileId>) -> Result<(), GridError> {
        let fill = self.known(tile.unwrap_or_else(|| self.default_tile()))?;
        for row in &mut self.cells {
            row.push(fill);
        }
        self.width += 1;
        debug!("grid grew to {} columns", self.width);
        Ok(())
    }

    /// Pixel coordinate of the top-left corner of `(row, column)`.
    ///
    /// # Errors
    /// Returns [`GridError::OutOfBounds`] for coordinates off the grid.
    #[expect(
        clippy::cast_precision_loss,
        reason = "In-bounds cell indices are far below 2^52."
    )]
    pub fn cell_origin_px(&self, row: i64, column: i64) -> Result<Vector2, GridError> {
        self.cell_at(row, column)?;
        let to_px = |cells: i64| self.converter.convert(cells as f64, Unit::Tile, Unit::Pixel);
        Ok(Vector2::new(to_px(column)?, to_px(row)?))
    }

    /// Extent of the grid in meters as `(width, height)`.
    ///
    /// # Errors
    /// Returns [`GridError::Conversion`] if the converter cannot produce
    /// meters.
    #[expect(
        clippy::cast_precision_loss,
        reason = "Grid extents are far below 2^52."
    )]
    pub fn size_meters(&self) -> Result<Vector2, GridError> {
        let edge = f64::from(self.tile_size);
        let to_m = |cells: usize| self.converter.to_meters(index_to_i64(cells) as f64 * edge);
        Ok(Vector2::new(to_m(self.width)?, to_m(self.height)?))
    }
}
