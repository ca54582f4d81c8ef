//! Core types for meshes and target rasters.

use serde::{Deserialize, Serialize};

use crate::error::{RegridError, Result};

/// A geographic bounding box in WGS84 coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl BoundingBox {
    /// Create a new bounding box.
    pub fn new(min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> Self {
        Self {
            min_lon,
            min_lat,
            max_lon,
            max_lat,
        }
    }

    /// Smallest box containing every finite coordinate pair.
    ///
    /// Returns `None` when no pair is finite.
    pub fn from_points(lon: &[f64], lat: &[f64]) -> Option<Self> {
        let mut bbox: Option<Self> = None;
        for (&x, &y) in lon.iter().zip(lat) {
            if !x.is_finite() || !y.is_finite() {
                continue;
            }
            bbox = Some(match bbox {
                None => Self::new(x, y, x, y),
                Some(b) => Self::new(
                    b.min_lon.min(x),
                    b.min_lat.min(y),
                    b.max_lon.max(x),
                    b.max_lat.max(y),
                ),
            });
        }
        bbox
    }
}

/// How a mesh's coordinates were laid out in the source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoordType {
    /// Two independent 1D axes expanded into their full Cartesian product.
    Structured1D,
    /// Two 2D coordinate arrays of identical shape.
    Curvilinear2D,
    /// Flat parallel lon/lat arrays with no implied adjacency.
    Unstructured1D,
}

impl CoordType {
    /// Get the topology name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Structured1D => "structured_1d",
            Self::Curvilinear2D => "curvilinear_2d",
            Self::Unstructured1D => "unstructured_1d",
        }
    }
}

impl std::fmt::Display for CoordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Descriptor of the regular global lon/lat raster the engine fills.
///
/// Row 0 is the southernmost latitude band; cells are stored row-major.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RasterSpec {
    pub nx: usize,
    pub ny: usize,
    pub lon_min: f64,
    pub lon_max: f64,
    pub lat_min: f64,
    pub lat_max: f64,
    pub dlon: f64,
    pub dlat: f64,
}

impl RasterSpec {
    /// Global raster for a requested resolution in degrees.
    ///
    /// `nx = floor(360 / r)` and `ny = floor(180 / r)`; the realized cell
    /// size is then recomputed so the raster tiles the globe exactly.
    pub fn global(resolution_degrees: f64) -> Result<Self> {
        if !resolution_degrees.is_finite() || resolution_degrees <= 0.0 {
            return Err(RegridError::InvalidResolution(resolution_degrees));
        }

        let nx = (360.0 / resolution_degrees).floor();
        let ny = (180.0 / resolution_degrees).floor();
        if ny < 1.0 || nx >= usize::MAX as f64 || ny >= usize::MAX as f64 {
            return Err(RegridError::InvalidResolution(resolution_degrees));
        }
        let nx = nx as usize;
        let ny = ny as usize;

        Ok(Self {
            nx,
            ny,
            lon_min: -180.0,
            lon_max: 180.0,
            lat_min: -90.0,
            lat_max: 90.0,
            dlon: 360.0 / nx as f64,
            dlat: 180.0 / ny as f64,
        })
    }

    /// Total number of cells, or `None` if `nx * ny` overflows.
    pub fn checked_len(&self) -> Option<usize> {
        self.nx.checked_mul(self.ny)
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.nx * self.ny
    }

    /// Check if the raster is empty.
    pub fn is_empty(&self) -> bool {
        self.nx == 0 || self.ny == 0
    }

    /// Flat row-major index of cell `(ix, iy)`.
    #[inline]
    pub fn index(&self, ix: usize, iy: usize) -> usize {
        iy * self.nx + ix
    }

    /// Geographic center of cell `(ix, iy)` as `(lon, lat)`.
    #[inline]
    pub fn cell_center(&self, ix: usize, iy: usize) -> (f64, f64) {
        (
            self.lon_min + (ix as f64 + 0.5) * self.dlon,
            self.lat_min + (iy as f64 + 0.5) * self.dlat,
        )
    }

    /// Cell containing a geographic coordinate.
    ///
    /// Points on the eastern or northern edge belong to the last column or
    /// row. Returns `None` outside the raster or for non-finite input.
    pub fn cell_at(&self, lon: f64, lat: f64) -> Option<(usize, usize)> {
        let inside_lon = lon >= self.lon_min && lon <= self.lon_max;
        let inside_lat = lat >= self.lat_min && lat <= self.lat_max;
        if !(inside_lon && inside_lat) {
            return None;
        }
        let ix = (((lon - self.lon_min) / self.dlon).floor() as usize).min(self.nx - 1);
        let iy = (((lat - self.lat_min) / self.dlat).floor() as usize).min(self.ny - 1);
        Some((ix, iy))
    }
}
