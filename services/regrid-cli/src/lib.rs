//! Command-line front end for the regrid engine.
//!
//! Reads a point cloud (or generates one), builds a [`regrid::RegridEngine`],
//! maps the field onto a global raster and optionally writes it out.

pub mod io;
pub mod probe;
pub mod settings;
pub mod synthetic;

pub use io::{PointFile, RasterFile};
pub use probe::{parse_cell, probe, ProbeReport};
pub use settings::resolve_config;
