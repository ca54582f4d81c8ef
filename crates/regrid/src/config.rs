//! Configuration for the regrid engine.

use serde::{Deserialize, Serialize};

use crate::error::{RegridError, Result};

/// Default target resolution in degrees.
pub const DEFAULT_RESOLUTION_DEGREES: f64 = 1.0;

/// Default influence radius in meters.
pub const DEFAULT_INFLUENCE_RADIUS_METERS: f64 = 200_000.0;

/// Tunables for building a [`RegridEngine`](crate::RegridEngine).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RegridConfig {
    /// Requested target cell size in degrees. The realized size may be
    /// slightly larger so the raster tiles the globe exactly.
    pub resolution_degrees: f64,

    /// Maximum distance in meters a cell may borrow a value from.
    pub influence_radius_meters: f64,

    /// Precompute raster rows on the rayon thread pool.
    pub parallel: bool,
}

impl Default for RegridConfig {
    fn default() -> Self {
        Self {
            resolution_degrees: DEFAULT_RESOLUTION_DEGREES,
            influence_radius_meters: DEFAULT_INFLUENCE_RADIUS_METERS,
            parallel: true,
        }
    }
}

impl RegridConfig {
    /// Create a configuration with the given resolution and radius.
    pub fn new(resolution_degrees: f64, influence_radius_meters: f64) -> Self {
        Self {
            resolution_degrees,
            influence_radius_meters,
            ..Self::default()
        }
    }

    /// Builder-style toggle for row-parallel construction.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("REGRID_RESOLUTION") {
            if let Ok(res) = val.parse() {
                config.resolution_degrees = res;
            }
        }

        if let Ok(val) = std::env::var("REGRID_INFLUENCE_RADIUS") {
            if let Ok(radius) = val.parse() {
                config.influence_radius_meters = radius;
            }
        }

        if let Ok(val) = std::env::var("REGRID_PARALLEL") {
            config.parallel = val.to_lowercase() == "true" || val == "1";
        }

        config
    }

    /// Validate the configuration.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if !self.resolution_degrees.is_finite() || self.resolution_degrees <= 0.0 {
            return Err("resolution_degrees must be a positive number".to_string());
        }

        if self.resolution_degrees > 180.0 {
            return Err("resolution_degrees must be <= 180".to_string());
        }

        if !self.influence_radius_meters.is_finite() || self.influence_radius_meters < 0.0 {
            return Err("influence_radius_meters must be a finite value >= 0".to_string());
        }

        Ok(())
    }

    /// Validate and return the configuration, reporting failures as
    /// [`RegridError::Config`].
    pub fn validated(self) -> Result<Self> {
        self.validate().map_err(RegridError::config)?;
        Ok(self)
    }

    /// The influence radius as a unit-sphere chord.
    pub fn influence_radius_chord(&self) -> f64 {
        projection::chord(self.influence_radius_meters)
    }
}
