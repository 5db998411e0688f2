//! Level descriptions and the loader that turns them into grids.
//!
//! A level is a JSON document mapping single-character keys to tile
//! definitions, plus rows of those characters:
//!
//! ```json
//! { "default": ".",
//!   "tiles": { ".": { "kind": "friction", "friction": 0.4 },
//!              ">": { "kind": "boost", "boost_velocity": [-2.0, 0.0] },
//!              "o": { "kind": "hole" } },
//!   "rows": ["..>.", "...o"] }
//! ```
//!
//! Every cell gets its own tile instance. Characters without a definition
//! and the missing tail of short rows fall back to the grid's default tile.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use hashbrown::HashMap;
use log::{info, warn};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::config::SimConfig;
use crate::error::{LevelError, TileError};
use crate::grid::Grid;
use crate::numeric::index_to_i64;
use crate::tile::Tile;
use crate::vector_math::Vector2;
use crate::{BOOST_FRICTION, DEFAULT_FRICTION, HOLE_CAPTURE_SPEED};

const fn default_friction() -> f64 {
    DEFAULT_FRICTION
}

const fn boost_friction() -> f64 {
    BOOST_FRICTION
}

const fn capture_speed() -> f64 {
    HOLE_CAPTURE_SPEED
}

/// Parameters of one tile kind in a level file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TileDef {
    /// A [`Tile::Friction`].
    Friction {
        /// Deceleration in m/s².
        #[serde(default = "default_friction")]
        friction: f64,
    },
    /// A [`Tile::Boost`].
    Boost {
        /// Deceleration in m/s².
        #[serde(default = "boost_friction")]
        friction: f64,
        /// Target velocity in m/s.
        boost_velocity: Vector2,
    },
    /// A [`Tile::Hole`].
    Hole {
        /// Deceleration in m/s².
        #[serde(default = "default_friction")]
        friction: f64,
        /// Speed at or below which a ball drops in.
        #[serde(default = "capture_speed")]
        capture_speed: f64,
    },
}

impl TileDef {
    /// Builds a fresh tile from the definition.
    ///
    /// # Errors
    /// Returns the [`TileError`] of an invalid parameter.
    pub fn build(&self) -> Result<Tile, TileError> {
        match *self {
            Self::Friction { friction } => Tile::friction(friction),
            Self::Boost {
                friction,
                boost_velocity,
            } => Tile::boost(friction, boost_velocity),
            Self::Hole {
                friction,
                capture_speed,
            } => Tile::hole(friction, capture_speed),
        }
    }
}

/// A course as stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Level {
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Cell edge in pixels; the settings value applies when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tile_size: Option<u32>,
    /// Key of the tile used for gaps and growth.
    pub default: String,
    /// Tile definitions by single-character key.
    pub tiles: BTreeMap<String, TileDef>,
    /// Cell rows from top to bottom, one character per cell.
    pub rows: Vec<String>,
    /// Ball start in meters; the centre of the top-left cell when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<Vector2>,
}

fn single_char(key: &str) -> Result<char, LevelError> {
    let mut chars = key.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(LevelError::InvalidKey(key.to_owned())),
    }
}

impl Level {
    /// Reads a level from a JSON file.
    ///
    /// # Errors
    /// Returns [`LevelError::Io`] if the file cannot be read and
    /// [`LevelError::Parse`] for malformed JSON.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LevelError> {
        let file = path.as_ref();
        let text = fs::read_to_string(file).map_err(|source| LevelError::Io {
            path: file.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Parses a level from JSON text.
    ///
    /// # Errors
    /// Returns [`LevelError::Parse`] for malformed JSON.
    pub fn from_json_str(text: &str) -> Result<Self, LevelError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Serialises the level as pretty-printed JSON.
    ///
    /// # Errors
    /// Returns [`LevelError::Parse`] if serialisation fails.
    pub fn to_json_string(&self) -> Result<String, LevelError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Name for logs.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("unnamed level")
    }

    /// Builds the grid described by the level.
    ///
    /// # Errors
    /// Returns [`LevelError::Empty`] for a level without cells,
    /// [`LevelError::InvalidKey`] for keys that are not one character,
    /// [`LevelError::MissingDefault`] when the default key is undefined and
    /// [`LevelError::Tile`] for invalid tile parameters.
    ///
    /// # Examples
    /// ```
    /// use golfram::{Level, SimConfig, Tile};
    /// let level = Level::from_json_str(r#"{
    ///     "default": ".",
    ///     "tiles": { ".": { "kind": "friction" }, "o": { "kind": "hole" } },
    ///     "rows": ["..", ".o"]
    /// }"#).unwrap();
    /// let grid = level.build_grid(&SimConfig::default()).unwrap();
    /// assert_eq!(grid.tile_at(1, 1).unwrap(), &Tile::cup());
    /// ```
    pub fn build_grid(&self, config: &SimConfig) -> Result<Grid, LevelError> {
        let height = self.rows.len();
        let width = self
            .rows
            .iter()
            .map(|row| row.chars().count())
            .max()
            .unwrap_or(0);
        if width == 0 {
            return Err(LevelError::Empty);
        }

        let mut defs = HashMap::with_capacity(self.tiles.len());
        for (key, def) in &self.tiles {
            let tile = def.build().map_err(|source| LevelError::Tile {
                key: key.clone(),
                source,
            })?;
            defs.insert(single_char(key)?, tile);
        }
        let default_key = single_char(&self.default)?;
        let default_tile = *defs
            .get(&default_key)
            .ok_or_else(|| LevelError::MissingDefault(self.default.clone()))?;

        let tile_size = self.tile_size.unwrap_or(config.tile_size);
        let mut grid = Grid::new(width, height, tile_size, default_tile, config.converter()?)?;
        for (r, row) in self.rows.iter().enumerate() {
            let mut filled = 0;
            for (c, key) in row.chars().enumerate() {
                filled += 1;
                match defs.get(&key) {
                    Some(tile) => {
                        grid.place(index_to_i64(r), index_to_i64(c), *tile)?;
                    }
                    None => warn!("row {r} column {c}: undefined tile {key:?}, using default"),
                }
            }
            if filled < width {
                warn!("row {r} is {filled} cells wide, padding to {width} with the default tile");
            }
        }
        info!(
            "built {} ({width}x{height}, {} tiles)",
            self.display_name(),
            grid.tiles().len()
        );
        Ok(grid)
    }

    /// Where the ball starts on `grid`.
    ///
    /// # Errors
    /// Returns [`LevelError::Unit`] if the grid cannot convert pixels to
    /// meters.
    pub fn start_position(&self, grid: &Grid) -> Result<Vector2, LevelError> {
        self.start.map_or_else(
            || -> Result<Vector2, LevelError> {
                let half = grid.converter().to_meters(f64::from(grid.tile_size()) / 2.0)?;
                Ok(Vector2::splat(half))
            },
            Ok,
        )
    }

    /// A square course of `size × size` cells, one in seven a boost toward
    /// `-x`.
    ///
    /// The same seed always produces the same course.
    #[must_use]
    pub fn random(size: usize, seed: u64) -> Self {
        const CHOICES: [char; 7] = ['>', 'r', 'r', 'g', 'g', 'b', 'b'];
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let rows = (0..size)
            .map(|_| {
                (0..size)
                    .map(|_| CHOICES.choose(&mut rng).copied().unwrap_or('g'))
                    .collect()
            })
            .collect();
        let fairway = TileDef::Friction {
            friction: DEFAULT_FRICTION,
        };
        let tiles = BTreeMap::from([
            ("r".to_owned(), fairway),
            ("g".to_owned(), fairway),
            ("b".to_owned(), fairway),
            (
                ">".to_owned(),
                TileDef::Boost {
                    friction: BOOST_FRICTION,
                    boost_velocity: Vector2::new(-2.0, 0.0),
                },
            ),
        ]);
        Self {
            name: Some(format!("random {size}x{size} (seed {seed})")),
            tile_size: None,
            default: "g".to_owned(),
            tiles,
            rows,
            start: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GridError;

    fn level(json: &str) -> Level {
        Level::from_json_str(json).expect("valid level json")
    }

    #[test]
    fn defaults_fill_missing_parameters() {
        let parsed = level(
            r#"{ "default": "o", "tiles": { "o": { "kind": "hole" } }, "rows": ["o"] }"#,
        );
        assert_eq!(
            parsed.tiles.get("o"),
            Some(&TileDef::Hole {
                friction: DEFAULT_FRICTION,
                capture_speed: HOLE_CAPTURE_SPEED
            })
        );
    }

    #[test]
    fn every_cell_gets_its_own_tile() {
        let grid = level(r#"{ "default": ">", "tiles": { ">": { "kind": "boost", "boost_velocity": [1, 0] } }, "rows": [">>", ">>"] }"#)
            .build_grid(&SimConfig::default())
            .expect("valid level");
        let mut ids: Vec<_> = grid.rows().iter().flatten().copied().collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 4);
    }

    #[test]
    fn unknown_characters_and_short_rows_use_the_default() {
        let grid = level(
            r#"{ "default": ".", "tiles": { ".": { "kind": "friction" } }, "rows": ["..?", "."] }"#,
        )
        .build_grid(&SimConfig::default())
        .expect("valid level");
        assert_eq!((grid.width(), grid.height()), (3, 2));
        assert_eq!(grid.cell_at(0, 2), Ok(grid.default_tile()));
        assert_eq!(grid.cell_at(1, 2), Ok(grid.default_tile()));
        assert_ne!(grid.cell_at(0, 0), Ok(grid.default_tile()));
    }

    #[test]
    fn rejects_bad_levels() {
        let config = SimConfig::default();
        assert!(matches!(
            level(r#"{ "default": ".", "tiles": {}, "rows": [] }"#).build_grid(&config),
            Err(LevelError::Empty)
        ));
        assert!(matches!(
            level(r#"{ "default": "x", "tiles": { ".": { "kind": "friction" } }, "rows": ["."] }"#)
                .build_grid(&config),
            Err(LevelError::MissingDefault(_))
        ));
        assert!(matches!(
            level(r#"{ "default": ".", "tiles": { "..": { "kind": "friction" } }, "rows": ["."] }"#)
                .build_grid(&config),
            Err(LevelError::InvalidKey(_))
        ));
        assert!(matches!(
            level(r#"{ "default": ".", "tiles": { ".": { "kind": "friction", "friction": -1 } }, "rows": ["."] }"#)
                .build_grid(&config),
            Err(LevelError::Tile { .. })
        ));
        assert!(matches!(
            level(r#"{ "tile_size": 0, "default": ".", "tiles": { ".": { "kind": "friction" } }, "rows": ["."] }"#)
                .build_grid(&config),
            Err(LevelError::Grid(GridError::InvalidDimensions { .. }))
        ));
    }

    #[test]
    fn start_defaults_to_first_cell_centre() {
        let parsed = level(r#"{ "default": ".", "tiles": { ".": { "kind": "friction" } }, "rows": ["."] }"#);
        let grid = parsed.build_grid(&SimConfig::default()).expect("valid level");
        let start = parsed.start_position(&grid).expect("pixels convert");
        assert_eq!(grid.cell_at_point(start), grid.cell_at(0, 0));
        assert!((start.x - 32.0 / crate::PIXELS_PER_METER).abs() < 1e-12);
    }

    #[test]
    fn random_courses_are_reproducible() {
        let first = Level::random(8, 42);
        assert_eq!(first, Level::random(8, 42));
        assert_eq!(first.rows.len(), 8);
        assert!(first.rows.iter().all(|row| row.chars().count() == 8));
        let grid = first.build_grid(&SimConfig::default()).expect("valid level");
        assert_eq!(grid.tiles().len(), 65);
    }

    #[test]
    fn survives_a_json_round_trip() {
        let original = Level::random(3, 7);
        let text = original.to_json_string().expect("serialisable");
        assert_eq!(Level::from_json_str(&text).expect("parses"), original);
    }
}
