//! Nearest-neighbor regridding onto a regular global raster.
//!
//! Construction is the expensive step: every raster cell center is projected
//! onto the unit sphere and matched against a [`KdTree`] of the mesh points.
//! The resulting lookup (source index, chord distance, validity) is kept, and
//! each displayed frame is then mapped through it with [`RegridEngine::apply`]
//! at the cost of one indexed read per cell.
//!
//! ```text
//! CoordinateMesh ──► KdTree::build ──► per-cell query_nearest ──► lookup
//!                                                                   │
//! read_slice(t, d) ─────────────────────────────────────► apply ◄───┘
//!                                                           │
//!                                                           ▼
//!                                                  raster [nx * ny]
//! ```
//!
//! An engine is immutable once built, so it can be shared between threads
//! and `apply` may run concurrently as long as each call has its own output.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use rayon::prelude::*;

use crate::config::RegridConfig;
use crate::error::{try_filled, RegridError, Result};
use crate::kdtree::KdTree;
use crate::mesh::CoordinateMesh;
use crate::types::RasterSpec;

/// Source values with a magnitude above this are treated as missing.
pub const MISSING_VALUE_THRESHOLD: f32 = 1e10;

/// Precomputed nearest-neighbor mapping from a mesh to a global raster.
#[derive(Debug, Clone)]
pub struct RegridEngine {
    spec: RasterSpec,
    /// Nearest source point for each cell.
    nn_index: Vec<usize>,
    /// Chord distance to that point on the unit sphere.
    nn_distance: Vec<f64>,
    /// `nn_distance <= influence_radius_chord`.
    valid: Vec<bool>,
    source_n_points: usize,
    influence_radius_chord: f64,
    valid_count: usize,
}

impl RegridEngine {
    /// Build an engine for `mesh` at `resolution_degrees`, accepting source
    /// points up to `influence_radius_meters` away from a cell center.
    pub fn create(
        mesh: &CoordinateMesh,
        resolution_degrees: f64,
        influence_radius_meters: f64,
    ) -> Result<Self> {
        let config = RegridConfig::new(resolution_degrees, influence_radius_meters);
        Self::build(mesh, &config, None)
    }

    /// Build an engine from a [`RegridConfig`].
    pub fn from_config(mesh: &CoordinateMesh, config: &RegridConfig) -> Result<Self> {
        Self::build(mesh, config, None)
    }

    /// Build an engine, giving up with [`RegridError::Cancelled`] once
    /// `cancel` is set. The flag is checked before each raster row.
    pub fn create_with_cancel(
        mesh: &CoordinateMesh,
        config: &RegridConfig,
        cancel: &AtomicBool,
    ) -> Result<Self> {
        Self::build(mesh, config, Some(cancel))
    }

    fn build(
        mesh: &CoordinateMesh,
        config: &RegridConfig,
        cancel: Option<&AtomicBool>,
    ) -> Result<Self> {
        if mesh.is_empty() {
            return Err(RegridError::EmptyMesh);
        }

        let radius = config.influence_radius_meters;
        if !radius.is_finite() || radius < 0.0 {
            return Err(RegridError::InvalidInfluenceRadius(radius));
        }
        let influence_radius_chord = projection::chord(radius);

        let spec = RasterSpec::global(config.resolution_degrees)?;
        let len = spec
            .checked_len()
            .ok_or_else(|| RegridError::allocation("target raster", usize::MAX))?;

        let start = Instant::now();
        let tree = KdTree::build(mesh.xyz())?;
        let index_elapsed = start.elapsed();

        let mut nn_index = try_filled("nn_index", len, 0usize)?;
        let mut nn_distance = try_filled("nn_distance", len, f64::INFINITY)?;
        let mut valid = try_filled("valid", len, false)?;

        let fill_row = |iy: usize,
                        idx_row: &mut [usize],
                        dist_row: &mut [f64],
                        valid_row: &mut [bool]| {
            if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
                return Err(RegridError::Cancelled { row: iy });
            }
            for ix in 0..spec.nx {
                let (lon, lat) = spec.cell_center(ix, iy);
                let (index, distance) = tree.query_nearest(&projection::project(lon, lat));
                idx_row[ix] = index;
                dist_row[ix] = distance;
                valid_row[ix] = distance <= influence_radius_chord;
            }
            Ok(())
        };

        let nx = spec.nx;
        if config.parallel {
            nn_index
                .par_chunks_mut(nx)
                .zip(nn_distance.par_chunks_mut(nx))
                .zip(valid.par_chunks_mut(nx))
                .enumerate()
                .try_for_each(|(iy, ((idx_row, dist_row), valid_row))| {
                    fill_row(iy, idx_row, dist_row, valid_row)
                })?;
        } else {
            for (iy, ((idx_row, dist_row), valid_row)) in nn_index
                .chunks_mut(nx)
                .zip(nn_distance.chunks_mut(nx))
                .zip(valid.chunks_mut(nx))
                .enumerate()
            {
                fill_row(iy, idx_row, dist_row, valid_row)?;
            }
        }

        let valid_count = valid.iter().filter(|&&v| v).count();

        tracing::info!(
            n_points = mesh.n_points(),
            coord_type = %mesh.coord_type(),
            nx = spec.nx,
            ny = spec.ny,
            valid_cells = valid_count,
            index_ms = index_elapsed.as_millis() as u64,
            total_ms = start.elapsed().as_millis() as u64,
            "built regrid engine"
        );
        if valid_count == 0 {
            tracing::warn!(
                influence_radius_meters = radius,
                "no raster cell lies within the influence radius of any source point"
            );
        }

        Ok(Self {
            spec,
            nn_index,
            nn_distance,
            valid,
            source_n_points: mesh.n_points(),
            influence_radius_chord,
            valid_count,
        })
    }

    /// Map one frame of source data onto the raster.
    ///
    /// Cells outside the influence radius, and cells whose source value has a
    /// magnitude above [`MISSING_VALUE_THRESHOLD`], receive `fill_value`.
    /// Everything else, NaN included, is copied unchanged.
    pub fn apply(&self, source_data: &[f32], fill_value: f32) -> Result<Vec<f32>> {
        let mut out = try_filled("target data", self.spec.len(), fill_value)?;
        self.apply_into(source_data, fill_value, &mut out)?;
        Ok(out)
    }

    /// Like [`RegridEngine::apply`], writing into a caller-owned buffer of
    /// exactly `nx * ny` cells.
    pub fn apply_into(&self, source_data: &[f32], fill_value: f32, out: &mut [f32]) -> Result<()> {
        if source_data.len() != self.source_n_points {
            return Err(RegridError::SourceLengthMismatch {
                expected: self.source_n_points,
                actual: source_data.len(),
            });
        }
        if out.len() != self.nn_index.len() {
            return Err(RegridError::OutputLengthMismatch {
                expected: self.nn_index.len(),
                actual: out.len(),
            });
        }

        for ((dst, &index), &valid) in out.iter_mut().zip(&self.nn_index).zip(&self.valid) {
            *dst = if !valid {
                fill_value
            } else {
                match source_data.get(index) {
                    Some(&v) if v.abs() > MISSING_VALUE_THRESHOLD => fill_value,
                    Some(&v) => v,
                    None => fill_value,
                }
            };
        }

        Ok(())
    }

    /// Raster dimensions `(nx, ny)`.
    pub fn target_dims(&self) -> (usize, usize) {
        (self.spec.nx, self.spec.ny)
    }

    /// Geographic center `(lon, lat)` of cell `(ix, iy)`.
    pub fn lonlat(&self, ix: usize, iy: usize) -> (f64, f64) {
        self.spec.cell_center(ix, iy)
    }

    /// Cell containing `(lon, lat)`, the reverse of [`RegridEngine::lonlat`].
    pub fn cell_at(&self, lon: f64, lat: f64) -> Option<(usize, usize)> {
        self.spec.cell_at(lon, lat)
    }

    /// The target raster descriptor.
    pub fn spec(&self) -> &RasterSpec {
        &self.spec
    }

    /// Whether cell `(ix, iy)` takes its value from a source point.
    pub fn is_valid(&self, ix: usize, iy: usize) -> bool {
        self.cell_index(ix, iy)
            .map(|idx| self.valid[idx])
            .unwrap_or(false)
    }

    /// Nearest source index and chord distance for cell `(ix, iy)`, whether
    /// or not the cell is within the influence radius.
    pub fn nearest_source(&self, ix: usize, iy: usize) -> Option<(usize, f64)> {
        let idx = self.cell_index(ix, iy)?;
        Some((self.nn_index[idx], self.nn_distance[idx]))
    }

    /// Number of cells within the influence radius.
    pub fn valid_count(&self) -> usize {
        self.valid_count
    }

    /// Fraction of cells within the influence radius.
    pub fn coverage(&self) -> f64 {
        self.valid_count as f64 / self.valid.len() as f64
    }

    /// Number of points in the mesh the engine was built from.
    pub fn source_n_points(&self) -> usize {
        self.source_n_points
    }

    /// Influence radius as a unit-sphere chord.
    pub fn influence_radius_chord(&self) -> f64 {
        self.influence_radius_chord
    }

    fn cell_index(&self, ix: usize, iy: usize) -> Option<usize> {
        (ix < self.spec.nx && iy < self.spec.ny).then(|| self.spec.index(ix, iy))
    }
}
