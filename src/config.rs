//! Simulation settings.
//!
//! [`SimConfig`] gathers the tunables a caller loop needs: unit ratios, frame
//! pacing and stepper tuning. Every field has a default, so a settings file
//! only lists what it changes.

use std::fs;
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, UnitError};
use crate::grid::Grid;
use crate::stepper::{OutOfBoundsPolicy, Stepper, StepperConfig};
use crate::units::UnitConverter;
use crate::{
    DEFAULT_BOOST_RATE, DEFAULT_TILE_SIZE, FRAME_RATE, PIXELS_PER_METER, REST_SPEED, SUBSTEPS,
};

/// Settings for a simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimConfig {
    /// Pixels per meter used to place entities on the grid.
    pub pixels_per_meter: f64,
    /// Cell edge in pixels for levels that do not set their own.
    pub tile_size: u32,
    /// Rendered frames per second.
    pub frame_rate: u32,
    /// Stepper ticks per frame.
    pub substeps: u32,
    /// Boost pull rate in 1/s.
    pub boost_rate: f64,
    /// Speed below which entities are settled.
    pub rest_speed: f64,
    /// Out-of-bounds handling.
    pub out_of_bounds: OutOfBoundsPolicy,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            pixels_per_meter: PIXELS_PER_METER,
            tile_size: DEFAULT_TILE_SIZE,
            frame_rate: FRAME_RATE,
            substeps: SUBSTEPS,
            boost_rate: DEFAULT_BOOST_RATE,
            rest_speed: REST_SPEED,
            out_of_bounds: OutOfBoundsPolicy::AbortStep,
        }
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: "must be positive and finite",
        })
    }
}

fn non_zero(field: &'static str, value: u32) -> Result<(), ConfigError> {
    if value == 0 {
        Err(ConfigError::Invalid {
            field,
            reason: "must be at least one",
        })
    } else {
        Ok(())
    }
}

impl SimConfig {
    /// Reads and validates settings from a JSON file.
    ///
    /// # Errors
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Parse`] for malformed JSON and [`ConfigError::Invalid`]
    /// for out-of-range values.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let file = path.as_ref();
        let text = fs::read_to_string(file).map_err(|source| ConfigError::Io {
            path: file.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&text)?;
        info!("loaded settings from {}", file.display());
        Ok(config)
    }

    /// Parses and validates settings from JSON text.
    ///
    /// # Errors
    /// Returns [`ConfigError::Parse`] for malformed JSON and
    /// [`ConfigError::Invalid`] for out-of-range values.
    ///
    /// # Examples
    /// ```
    /// use golfram::SimConfig;
    /// let config = SimConfig::from_json_str(r#"{ "substeps": 4 }"#).unwrap();
    /// assert_eq!(config.substeps, 4);
    /// assert_eq!(config.frame_rate, 60);
    /// ```
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks every field is in range.
    ///
    /// # Errors
    /// Returns [`ConfigError::Invalid`] naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("pixels_per_meter", self.pixels_per_meter)?;
        non_zero("tile_size", self.tile_size)?;
        non_zero("frame_rate", self.frame_rate)?;
        non_zero("substeps", self.substeps)?;
        positive("boost_rate", self.boost_rate)?;
        positive("rest_speed", self.rest_speed)
    }

    /// Length of one rendered frame in seconds.
    #[must_use]
    pub fn frame_dt(&self) -> f64 {
        1.0 / f64::from(self.frame_rate.max(1))
    }

    /// Length of one stepper tick in seconds.
    #[must_use]
    pub fn tick_dt(&self) -> f64 {
        self.frame_dt() / f64::from(self.substeps.max(1))
    }

    /// Unit table relating meters and pixels.
    ///
    /// # Errors
    /// Returns [`UnitError::InvalidRatio`] for an invalid pixel ratio.
    pub fn converter(&self) -> Result<UnitConverter, UnitError> {
        UnitConverter::with_pixels_per_meter(self.pixels_per_meter)
    }

    /// Stepper tuning taken from these settings.
    #[must_use]
    pub const fn stepper_config(&self) -> StepperConfig {
        StepperConfig {
            boost_rate: self.boost_rate,
            rest_speed: self.rest_speed,
            out_of_bounds: self.out_of_bounds,
        }
    }

    /// A stepper over `grid` tuned by these settings.
    #[must_use]
    pub fn stepper(&self, grid: Grid) -> Stepper {
        Stepper::with_config(grid, self.stepper_config())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn empty_document_yields_defaults() {
        assert_eq!(SimConfig::from_json_str("{}").ok(), Some(SimConfig::default()));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(matches!(
            SimConfig::from_json_str(r#"{ "gravity": 9.8 }"#),
            Err(ConfigError::Parse(_))
        ));
    }

    #[rstest]
    #[case(r#"{ "pixels_per_meter": 0 }"#, "pixels_per_meter")]
    #[case(r#"{ "tile_size": 0 }"#, "tile_size")]
    #[case(r#"{ "substeps": 0 }"#, "substeps")]
    #[case(r#"{ "boost_rate": -1.0 }"#, "boost_rate")]
    #[case(r#"{ "rest_speed": 0.0 }"#, "rest_speed")]
    fn rejects_out_of_range(#[case] json: &str, #[case] expected: &str) {
        match SimConfig::from_json_str(json) {
            Err(ConfigError::Invalid { field, .. }) => assert_eq!(field, expected),
            other => panic!("expected invalid {expected}, got {other:?}"),
        }
    }

    #[test]
    fn policy_uses_snake_case() {
        let config = SimConfig::from_json_str(r#"{ "out_of_bounds": "skip_entity" }"#)
            .expect("valid settings");
        assert_eq!(config.out_of_bounds, OutOfBoundsPolicy::SkipEntity);
    }

    #[test]
    fn default_tick_is_a_six_hundredth() {
        let config = SimConfig::default();
        assert!((config.tick_dt() - 1.0 / 600.0).abs() < 1e-15);
    }

    #[test]
    fn missing_file_reports_path() {
        let err = SimConfig::load("/nonexistent/golfram.json").expect_err("missing file");
        assert!(err.to_string().contains("/nonexistent/golfram.json"));
    }
}
