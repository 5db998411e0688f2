//! Conversion between the linear units used by a course.
//!
//! Physics runs in meters while the grid and the renderer work in whole
//! pixels. A [`UnitConverter`] holds the ratio table relating them.
//!
//! Conversions into an integral unit truncate toward zero. A ball sitting a
//! fraction of a pixel above the course therefore still resolves to row zero;
//! it has to be a full pixel out before the grid reports it out of bounds.

use std::fmt;

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::error::UnitError;
use crate::PIXELS_PER_METER;

/// A linear unit known to the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    /// Output pixels. Integral: conversions into pixels truncate.
    Pixel,
    /// Physical meters.
    Meter,
    /// Grid cells; a grid registers how many pixels one cell spans.
    Tile,
}

impl Unit {
    /// Whether values in this unit are whole numbers.
    #[must_use]
    pub const fn is_integral(self) -> bool {
        matches!(self, Self::Pixel)
    }

    /// Short symbol used when displaying quantities.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Pixel => "px",
            Self::Meter => "m",
            Self::Tile => "tile",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A scalar tagged with its unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quantity {
    /// Magnitude in `unit`.
    pub value: f64,
    /// Unit of `value`.
    pub unit: Unit,
}

impl Quantity {
    /// Creates a quantity.
    #[must_use]
    pub const fn new(value: f64, unit: Unit) -> Self {
        Self { value, unit }
    }

    /// Re-expresses the quantity in `unit`.
    ///
    /// # Errors
    /// Returns [`UnitError::UnknownConversion`] when `converter` has no ratio
    /// between the two units.
    pub fn to(self, unit: Unit, converter: &UnitConverter) -> Result<Self, UnitError> {
        converter
            .convert(self.value, self.unit, unit)
            .map(|value| Self::new(value, unit))
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.unit)
    }
}

/// Ratio table between pairs of units.
///
/// A ratio is registered on the larger unit: `(Meter, Pixel) = 187` reads
/// "one meter is 187 pixels". Ratios are not chained; every pair that needs
/// converting must be registered directly.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitConverter {
    ratios: HashMap<(Unit, Unit), f64>,
}

impl Default for UnitConverter {
    /// Meters to pixels at [`PIXELS_PER_METER`].
    fn default() -> Self {
        let mut ratios = HashMap::new();
        ratios.insert((Unit::Meter, Unit::Pixel), PIXELS_PER_METER);
        Self { ratios }
    }
}

impl UnitConverter {
    /// A converter with no registered ratios; only identity conversions
    /// succeed.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            ratios: HashMap::new(),
        }
    }

    /// A converter relating meters and pixels at `pixels_per_meter`.
    ///
    /// # Errors
    /// Returns [`UnitError::InvalidRatio`] for a non-positive or non-finite
    /// ratio.
    pub fn with_pixels_per_meter(pixels_per_meter: f64) -> Result<Self, UnitError> {
        Self::empty().with_ratio(Unit::Meter, Unit::Pixel, pixels_per_meter)
    }

    /// Registers `factor` as the number of `smaller` units in one `larger`.
    ///
    /// Re-registering a pair replaces the previous ratio.
    ///
    /// # Errors
    /// Returns [`UnitError::InvalidRatio`] when `factor` is not a positive
    /// finite number or the two units are the same.
    pub fn with_ratio(mut self, larger: Unit, smaller: Unit, factor: f64) -> Result<Self, UnitError> {
        if larger == smaller || !factor.is_finite() || factor <= 0.0 {
            return Err(UnitError::InvalidRatio {
                larger,
                smaller,
                factor,
            });
        }
        self.ratios.remove(&(smaller, larger));
        self.ratios.insert((larger, smaller), factor);
        Ok(self)
    }

    /// The registered number of `smaller` units in one `larger`, if any.
    #[must_use]
    pub fn ratio(&self, larger: Unit, smaller: Unit) -> Option<f64> {
        self.ratios.get(&(larger, smaller)).copied()
    }

    /// Converts `value` from `from` into `to`.
    ///
    /// Same-unit conversion is the identity. Converting into the larger unit
    /// of a registered pair divides by the ratio; converting into the smaller
    /// unit multiplies. Results in an integral unit are truncated toward zero.
    ///
    /// # Errors
    /// Returns [`UnitError::UnknownConversion`] when no ratio links the two
    /// units.
    ///
    /// # Examples
    /// ```
    /// use golfram::units::{Unit, UnitConverter};
    /// let converter = UnitConverter::default();
    /// assert_eq!(converter.convert(1.0, Unit::Meter, Unit::Pixel), Ok(187.0));
    /// assert_eq!(converter.convert(0.01, Unit::Meter, Unit::Pixel), Ok(1.0));
    /// assert_eq!(converter.convert(374.0, Unit::Pixel, Unit::Meter), Ok(2.0));
    /// assert!(converter.convert(1.0, Unit::Tile, Unit::Meter).is_err());
    /// ```
    pub fn convert(&self, value: f64, from: Unit, to: Unit) -> Result<f64, UnitError> {
        if from == to {
            return Ok(value);
        }
        let converted = match (self.ratios.get(&(to, from)), self.ratios.get(&(from, to))) {
            (Some(ratio), _) => value / ratio,
            (None, Some(ratio)) => value * ratio,
            (None, None) => return Err(UnitError::UnknownConversion { from, to }),
        };
        Ok(if to.is_integral() {
            converted.trunc()
        } else {
            converted
        })
    }

    /// Converts meters to whole pixels, truncating toward zero.
    ///
    /// # Errors
    /// Returns [`UnitError::UnknownConversion`] if meters and pixels are not
    /// related by this converter.
    pub fn to_pixels(&self, meters: f64) -> Result<f64, UnitError> {
        self.convert(meters, Unit::Meter, Unit::Pixel)
    }

    /// Converts pixels to meters.
    ///
    /// # Errors
    /// Returns [`UnitError::UnknownConversion`] if meters and pixels are not
    /// related by this converter.
    pub fn to_meters(&self, pixels: f64) -> Result<f64, UnitError> {
        self.convert(pixels, Unit::Pixel, Unit::Meter)
    }
}
