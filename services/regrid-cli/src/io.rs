//! Point file input and raster file output.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use regrid::{CoordType, CoordinateAxis, CoordinateMesh, InMemorySource, RegridEngine};

use crate::synthetic;

fn default_fill_value() -> f32 {
    f32::NAN
}

/// A single field sampled at arbitrary points.
///
/// ```json
/// { "lon": [0, 10], "lat": [0, 0], "values": [1.5, 2.5], "fill_value": -999 }
/// ```
///
/// When `lon_dim` and `lat_dim` are given, `lon` and `lat` are treated as
/// coordinate axes and expanded the way a driver would expand them; two
/// different dimensions describe a structured grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointFile {
    pub lon: Vec<f64>,
    pub lat: Vec<f64>,
    pub values: Vec<f32>,
    #[serde(default = "default_fill_value")]
    pub fill_value: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lon_dim: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat_dim: Option<String>,
}

impl PointFile {
    /// Read a point file from disk.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read point file {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("failed to parse point file {}", path.display()))
    }

    /// `n` points on a Fibonacci sphere carrying a temperature-like field.
    pub fn synthetic(n: usize) -> Self {
        let (lon, lat) = synthetic::fibonacci_sphere(n);
        let values = synthetic::temperature_field(&lon, &lat);
        Self {
            lon,
            lat,
            values,
            fill_value: f32::NAN,
            lon_dim: None,
            lat_dim: None,
        }
    }

    /// Build the mesh and a single-frame source for this file.
    pub fn into_parts(self) -> Result<(CoordinateMesh, InMemorySource)> {
        let mesh = match (self.lon_dim, self.lat_dim) {
            (Some(lon_dim), Some(lat_dim)) => CoordinateMesh::from_axes(
                CoordinateAxis::new(lon_dim, self.lon),
                CoordinateAxis::new(lat_dim, self.lat),
            )?,
            _ => CoordinateMesh::new(self.lon, self.lat, CoordType::Unstructured1D)?,
        };

        if self.values.len() != mesh.n_points() {
            anyhow::bail!(
                "point file has {} values for {} mesh points",
                self.values.len(),
                mesh.n_points()
            );
        }

        Ok((mesh, InMemorySource::single(self.values, self.fill_value)))
    }
}

/// A regridded raster as written by `--output`.
///
/// Row 0 is the southernmost band. NaN cells are written as `null`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RasterFile {
    pub nx: usize,
    pub ny: usize,
    pub lon_min: f64,
    pub lat_min: f64,
    pub dlon: f64,
    pub dlat: f64,
    pub data: Vec<Option<f32>>,
}

impl RasterFile {
    pub fn new(engine: &RegridEngine, data: &[f32]) -> Self {
        let spec = engine.spec();
        Self {
            nx: spec.nx,
            ny: spec.ny,
            lon_min: spec.lon_min,
            lat_min: spec.lat_min,
            dlon: spec.dlon,
            dlat: spec.dlat,
            data: data
                .iter()
                .map(|&v| if v.is_nan() { None } else { Some(v) })
                .collect(),
        }
    }

    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string(self).context("failed to serialize raster")?;
        fs::write(path, json)
            .with_context(|| format!("failed to write raster to {}", path.display()))
    }
}
