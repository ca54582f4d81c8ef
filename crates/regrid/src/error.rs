//! Error types for mesh construction and regridding.

use thiserror::Error;

/// Errors that can occur while building meshes, indices and regrid engines.
#[derive(Error, Debug)]
pub enum RegridError {
    /// The mesh has no points to interpolate from.
    #[error("mesh has no points")]
    EmptyMesh,

    /// Longitude and latitude arrays differ in length.
    #[error("coordinate length mismatch: {lon} longitudes vs {lat} latitudes")]
    LengthMismatch { lon: usize, lat: usize },

    /// A 2D coordinate array does not match the declared shape.
    #[error("coordinate shape mismatch: expected {expected} values for {ny}x{nx}, got {actual}")]
    ShapeMismatch {
        ny: usize,
        nx: usize,
        expected: usize,
        actual: usize,
    },

    /// A buffer could not be allocated.
    #[error("failed to allocate {count} elements for {what}")]
    AllocationFailed { what: &'static str, count: usize },

    /// Target resolution is not a usable positive number of degrees.
    #[error("invalid target resolution: {0} degrees")]
    InvalidResolution(f64),

    /// Influence radius is negative or not finite.
    #[error("invalid influence radius: {0} meters")]
    InvalidInfluenceRadius(f64),

    /// Source slice does not match the mesh the engine was built from.
    #[error("source data has {actual} values, engine expects {expected}")]
    SourceLengthMismatch { expected: usize, actual: usize },

    /// Output buffer does not match the target raster.
    #[error("output buffer has {actual} cells, raster has {expected}")]
    OutputLengthMismatch { expected: usize, actual: usize },

    /// Construction was cancelled before completion.
    #[error("regrid construction cancelled at row {row}")]
    Cancelled { row: usize },

    /// A data source failed to produce a slice.
    #[error("data source error: {0}")]
    Source(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl RegridError {
    /// Create an AllocationFailed error.
    pub fn allocation(what: &'static str, count: usize) -> Self {
        Self::AllocationFailed { what, count }
    }

    /// Create a Source error.
    pub fn source(msg: impl Into<String>) -> Self {
        Self::Source(msg.into())
    }

    /// Create a Config error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Whether this error belongs to engine/index construction.
    pub fn is_construction(&self) -> bool {
        matches!(
            self,
            Self::EmptyMesh
                | Self::AllocationFailed { .. }
                | Self::InvalidResolution(_)
                | Self::InvalidInfluenceRadius(_)
                | Self::Cancelled { .. }
        )
    }
}

/// Allocate a vector of `count` copies of `value`, reporting failure instead
/// of aborting the process.
pub(crate) fn try_filled<T: Clone>(what: &'static str, count: usize, value: T) -> Result<Vec<T>> {
    let mut v = Vec::new();
    v.try_reserve_exact(count)
        .map_err(|_| RegridError::allocation(what, count))?;
    v.resize(count, value);
    Ok(v)
}

/// Allocate an empty vector with room for `count` elements.
pub(crate) fn try_with_capacity<T>(what: &'static str, count: usize) -> Result<Vec<T>> {
    let mut v = Vec::new();
    v.try_reserve_exact(count)
        .map_err(|_| RegridError::allocation(what, count))?;
    Ok(v)
}

/// Result type for regrid operations.
pub type Result<T> = std::result::Result<T, RegridError>;
