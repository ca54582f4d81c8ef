//! Point-cloud to raster regridding for geoscientific model output.
//!
//! Ocean and climate models write their fields on regular grids,
//! curvilinear grids or fully unstructured meshes. This crate turns any of
//! them into a fixed-resolution global lon/lat raster suitable for pixel
//! rendering:
//!
//! - **Mesh**: coordinates are flattened into a point cloud and projected
//!   onto the unit sphere once
//! - **Index**: a 3D k-d tree answers nearest-neighbor queries by chord
//!   distance, which avoids seams at the dateline and singularities at the
//!   poles
//! - **Engine**: every raster cell is matched to its nearest source point
//!   up front, so each new frame costs one lookup per cell
//!
//! # Architecture
//!
//! ```text
//! driver coordinates ──► CoordinateMesh ──► RegridEngine::create
//!                                                 │
//!                                                 ├─► KdTree::build
//!                                                 └─► nearest point per cell
//!
//! SliceSource::read_slice(t, d) ──► RegridEngine::apply ──► raster [nx * ny]
//! ```
//!
//! # Example
//!
//! ```
//! use regrid::{CoordinateMesh, CoordType, RegridEngine};
//!
//! let mesh = CoordinateMesh::new(
//!     vec![0.0, 10.0, 0.0, 10.0],
//!     vec![0.0, 0.0, 10.0, 10.0],
//!     CoordType::Unstructured1D,
//! )?;
//! let engine = RegridEngine::create(&mesh, 1.0, 600_000.0)?;
//!
//! let raster = engine.apply(&[1.0, 2.0, 3.0, 4.0], f32::NAN)?;
//! let (nx, ny) = engine.target_dims();
//! assert_eq!(raster.len(), nx * ny);
//! # Ok::<(), regrid::RegridError>(())
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod kdtree;
pub mod mesh;
pub mod source;
pub mod types;

// Re-export commonly used types at crate root
pub use config::RegridConfig;
pub use engine::{RegridEngine, MISSING_VALUE_THRESHOLD};
pub use error::{RegridError, Result};
pub use kdtree::{KdTree, Nearest};
pub use mesh::{CoordinateAxis, CoordinateMesh};
pub use source::{regrid_frame, InMemorySource, SliceSource};
pub use types::{BoundingBox, CoordType, RasterSpec};
