//! Coordinate transformations for geographic point clouds.
//!
//! Implements the lon/lat to unit-sphere mapping used by the spatial index
//! and the regrid engine, from scratch without external dependencies.

pub mod sphere;

pub use sphere::{
    arc_meters, chord, distance_sq, project, project_batch, project_into, unproject, Cartesian,
    EARTH_RADIUS_M, MAX_CHORD,
};
