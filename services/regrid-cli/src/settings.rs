//! Engine settings from the environment and command-line overrides.

use regrid::{RegridConfig, Result};

/// Start from `REGRID_*` environment variables, apply any flags given on
/// the command line and validate the result.
pub fn resolve_config(
    resolution: Option<f64>,
    influence_radius: Option<f64>,
    no_parallel: bool,
) -> Result<RegridConfig> {
    let mut config = RegridConfig::from_env();
    if let Some(resolution) = resolution {
        config.resolution_degrees = resolution;
    }
    if let Some(radius) = influence_radius {
        config.influence_radius_meters = radius;
    }
    if no_parallel {
        config.parallel = false;
    }
    config.validated()
}
