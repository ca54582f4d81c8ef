//! Source point clouds and their unit-sphere coordinates.
//!
//! A [`CoordinateMesh`] owns the longitude/latitude arrays handed over by a
//! file driver together with the Cartesian coordinates derived from them.
//! Coordinates never change after construction; only the data values
//! attached to the mesh vary per time step and depth.

use projection::Cartesian;
use serde::{Deserialize, Serialize};

use crate::error::{try_filled, try_with_capacity, RegridError, Result};
use crate::types::{BoundingBox, CoordType};

/// One coordinate variable as exposed by a file driver.
///
/// `dimension` names the logical axis the values are indexed by (for
/// example `"lon"`, `"lat"` or `"nCells"`). Two variables sharing a
/// dimension describe the same set of points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoordinateAxis {
    pub dimension: String,
    pub values: Vec<f64>,
}

impl CoordinateAxis {
    /// Create a new axis.
    pub fn new(dimension: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            dimension: dimension.into(),
            values,
        }
    }

    /// Number of values along the axis.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the axis is empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// An immutable geographic point cloud.
#[derive(Debug, Clone)]
pub struct CoordinateMesh {
    lon: Vec<f64>,
    lat: Vec<f64>,
    xyz: Vec<Cartesian>,
    coord_type: CoordType,
    /// `(nx, ny)` of the grid the points were flattened from.
    original_shape: Option<(usize, usize)>,
}

impl CoordinateMesh {
    /// Create a mesh from parallel longitude/latitude arrays (degrees).
    ///
    /// Longitude is expected in [-180, 180]; ranges are not validated.
    /// Cartesian coordinates are derived once here.
    pub fn new(lon: Vec<f64>, lat: Vec<f64>, coord_type: CoordType) -> Result<Self> {
        if lon.len() != lat.len() {
            return Err(RegridError::LengthMismatch {
                lon: lon.len(),
                lat: lat.len(),
            });
        }

        let mut xyz = try_filled("mesh xyz", lon.len(), [0.0; 3])?;
        projection::project_into(&lon, &lat, &mut xyz);

        let non_finite = lon
            .iter()
            .zip(&lat)
            .filter(|(x, y)| !x.is_finite() || !y.is_finite())
            .count();
        if non_finite > 0 {
            tracing::warn!(
                non_finite,
                n_points = lon.len(),
                "mesh contains non-finite coordinates"
            );
        }

        tracing::debug!(n_points = lon.len(), coord_type = %coord_type, "created coordinate mesh");

        Ok(Self {
            lon,
            lat,
            xyz,
            coord_type,
            original_shape: None,
        })
    }

    /// Create a mesh from two coordinate variables.
    ///
    /// - Axes of different length are independent 1D axes: the result is
    ///   their meshgrid, flattened latitude-major ([`CoordType::Structured1D`]).
    /// - Axes of equal length indexed by the same dimension are one point
    ///   cloud ([`CoordType::Unstructured1D`]).
    /// - Axes of equal length on distinct dimensions form a square
    ///   structured grid.
    pub fn from_axes(lon: CoordinateAxis, lat: CoordinateAxis) -> Result<Self> {
        if lon.len() == lat.len() && lon.dimension == lat.dimension {
            return Self::new(lon.values, lat.values, CoordType::Unstructured1D);
        }
        Self::from_structured(&lon.values, &lat.values)
    }

    /// Expand two 1D axes into their full Cartesian product.
    ///
    /// Point `j * nx + i` has longitude `lon_axis[i]` and latitude
    /// `lat_axis[j]`.
    pub fn from_structured(lon_axis: &[f64], lat_axis: &[f64]) -> Result<Self> {
        let nx = lon_axis.len();
        let ny = lat_axis.len();
        let n = nx
            .checked_mul(ny)
            .ok_or_else(|| RegridError::allocation("meshgrid", usize::MAX))?;

        let mut lon = try_with_capacity("meshgrid lon", n)?;
        let mut lat = try_with_capacity("meshgrid lat", n)?;
        for &y in lat_axis {
            lon.extend_from_slice(lon_axis);
            lat.extend(std::iter::repeat(y).take(nx));
        }

        let mut mesh = Self::new(lon, lat, CoordType::Structured1D)?;
        mesh.original_shape = Some((nx, ny));
        Ok(mesh)
    }

    /// Create a mesh from 2D coordinate arrays of shape `(ny, nx)`, used in
    /// their stored order.
    pub fn from_curvilinear(lon: Vec<f64>, lat: Vec<f64>, ny: usize, nx: usize) -> Result<Self> {
        let expected = ny
            .checked_mul(nx)
            .ok_or_else(|| RegridError::allocation("curvilinear grid", usize::MAX))?;
        for actual in [lon.len(), lat.len()] {
            if actual != expected {
                return Err(RegridError::ShapeMismatch {
                    ny,
                    nx,
                    expected,
                    actual,
                });
            }
        }

        let mut mesh = Self::new(lon, lat, CoordType::Curvilinear2D)?;
        mesh.original_shape = Some((nx, ny));
        Ok(mesh)
    }

    /// Number of points in the mesh.
    pub fn n_points(&self) -> usize {
        self.lon.len()
    }

    /// Check if the mesh has no points.
    pub fn is_empty(&self) -> bool {
        self.lon.is_empty()
    }

    /// Longitudes in degrees.
    pub fn lon(&self) -> &[f64] {
        &self.lon
    }

    /// Latitudes in degrees.
    pub fn lat(&self) -> &[f64] {
        &self.lat
    }

    /// Unit-sphere coordinates, one triple per point.
    pub fn xyz(&self) -> &[Cartesian] {
        &self.xyz
    }

    /// `(lon, lat)` of point `i`.
    pub fn point(&self, i: usize) -> Option<(f64, f64)> {
        Some((*self.lon.get(i)?, *self.lat.get(i)?))
    }

    /// Coordinate topology of the mesh.
    pub fn coord_type(&self) -> CoordType {
        self.coord_type
    }

    /// `(nx, ny)` of the grid the points came from, for gridded meshes.
    pub fn original_shape(&self) -> Option<(usize, usize)> {
        self.original_shape
    }

    /// Geographic extent of the finite points.
    pub fn bbox(&self) -> Option<BoundingBox> {
        BoundingBox::from_points(&self.lon, &self.lat)
    }
}
