//! Geometry configuration for the geodesic sphere.
//!
//! The icosahedron fixes the number of sections per hemisphere; the only free
//! parameter is `steps`, the number of subdivisions along one triangle edge.
//! Every other dimension of the flat layout is derived from it.

use bevy::prelude::Resource;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Triangular sections traced per hemisphere.
pub const SECTIONS: usize = 5;

/// Smallest subdivision whose layout keeps a full virtual ring inside the array.
pub const MIN_STEPS: usize = 5;

/// Largest subdivision accepted; keeps every coordinate comfortably inside `i32`.
pub const MAX_STEPS: usize = 1024;

/// Errors in a geometry configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    TooFewSteps { steps: usize, min: usize },
    TooManySteps { steps: usize, max: usize },
    /// The configuration document could not be parsed.
    Parse(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::TooFewSteps { steps, min } => {
                write!(f, "{} edge steps is below the minimum of {}", steps, min)
            }
            ConfigError::TooManySteps { steps, max } => {
                write!(f, "{} edge steps is above the maximum of {}", steps, max)
            }
            ConfigError::Parse(msg) => write!(f, "Invalid configuration: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e.to_string())
    }
}

/// Subdivision settings for a geodesic sphere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Resource)]
pub struct GeodesicConfig {
    /// Cells along one icosahedron edge.
    pub steps: usize,
}

impl Default for GeodesicConfig {
    fn default() -> Self {
        Self { steps: 5 }
    }
}

impl GeodesicConfig {
    pub fn new(steps: usize) -> Self {
        Self { steps }
    }

    /// Parse a JSON document such as `{"steps": 7}`.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.steps < MIN_STEPS {
            return Err(ConfigError::TooFewSteps {
                steps: self.steps,
                min: MIN_STEPS,
            });
        }
        if self.steps > MAX_STEPS {
            return Err(ConfigError::TooManySteps {
                steps: self.steps,
                max: MAX_STEPS,
            });
        }
        Ok(())
    }

    // === Derived layout ===

    /// Side length of the square array.
    #[inline]
    pub fn side(&self) -> usize {
        self.steps * 12
    }

    /// Where perimeter tracing starts (and must finish).
    #[inline]
    pub fn origin(&self) -> (i32, i32) {
        (2, self.north_vertex_row())
    }

    /// Row holding the northern ring of non-pole vertices.
    #[inline]
    pub fn north_vertex_row(&self) -> i32 {
        ((self.steps + 1) * 6) as i32
    }

    /// Row holding the southern ring of non-pole vertices.
    #[inline]
    pub fn south_vertex_row(&self) -> i32 {
        self.north_vertex_row() - 3 * self.steps as i32
    }

    #[inline]
    pub fn north_pole_row(&self) -> i32 {
        self.north_vertex_row() + 3 * self.steps as i32
    }

    #[inline]
    pub fn south_pole_row(&self) -> i32 {
        self.south_vertex_row() - 3 * self.steps as i32
    }

    /// Horizontal distance between a seam cell and its twin across the band.
    #[inline]
    pub fn band_period(&self) -> i32 {
        (2 * SECTIONS * self.steps) as i32
    }

    /// Number of distinct locations on the sphere (a Goldberg polyhedron with
    /// `T = 3 * steps²`, so `10T + 2` faces).
    #[inline]
    pub fn distinct_cells(&self) -> usize {
        30 * self.steps * self.steps + 2
    }
}
