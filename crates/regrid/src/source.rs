//! The boundary between file-format drivers and the regrid engine.
//!
//! A driver (NetCDF, GRIB2, Zarr, ...) hands the engine a mesh once and then
//! serves one flat `f32` slice per `(time, depth)` pair. The engine never sees
//! files, chunks or compression.

use crate::engine::RegridEngine;
use crate::error::{RegridError, Result};

/// A variable that can be read one horizontal slice at a time.
pub trait SliceSource {
    /// Number of values in each slice; must equal the mesh's point count.
    fn n_points(&self) -> usize;

    /// Number of time steps.
    fn n_times(&self) -> usize;

    /// Number of depth (vertical) levels.
    fn n_depths(&self) -> usize;

    /// Scalar that marks missing data for this variable.
    fn fill_value(&self) -> f32;

    /// Read the slice at `(time_idx, depth_idx)`.
    fn read_slice(&self, time_idx: usize, depth_idx: usize) -> Result<Vec<f32>>;
}

/// A fully resident variable laid out as `[time][depth][point]`.
#[derive(Debug, Clone)]
pub struct InMemorySource {
    data: Vec<f32>,
    n_points: usize,
    n_times: usize,
    n_depths: usize,
    fill_value: f32,
}

impl InMemorySource {
    /// Wrap a `[time][depth][point]` buffer.
    pub fn new(
        data: Vec<f32>,
        n_times: usize,
        n_depths: usize,
        n_points: usize,
        fill_value: f32,
    ) -> Result<Self> {
        let expected = n_times
            .checked_mul(n_depths)
            .and_then(|n| n.checked_mul(n_points))
            .ok_or_else(|| RegridError::source("source dimensions overflow"))?;
        if data.len() != expected {
            return Err(RegridError::source(format!(
                "buffer has {} values, {}x{}x{} requires {}",
                data.len(),
                n_times,
                n_depths,
                n_points,
                expected
            )));
        }

        Ok(Self {
            data,
            n_points,
            n_times,
            n_depths,
            fill_value,
        })
    }

    /// A source with a single time step and depth level.
    pub fn single(values: Vec<f32>, fill_value: f32) -> Self {
        let n_points = values.len();
        Self {
            data: values,
            n_points,
            n_times: 1,
            n_depths: 1,
            fill_value,
        }
    }
}

impl SliceSource for InMemorySource {
    fn n_points(&self) -> usize {
        self.n_points
    }

    fn n_times(&self) -> usize {
        self.n_times
    }

    fn n_depths(&self) -> usize {
        self.n_depths
    }

    fn fill_value(&self) -> f32 {
        self.fill_value
    }

    fn read_slice(&self, time_idx: usize, depth_idx: usize) -> Result<Vec<f32>> {
        if time_idx >= self.n_times || depth_idx >= self.n_depths {
            return Err(RegridError::source(format!(
                "slice ({}, {}) out of range for {} times x {} depths",
                time_idx, depth_idx, self.n_times, self.n_depths
            )));
        }
        let start = (time_idx * self.n_depths + depth_idx) * self.n_points;
        Ok(self.data[start..start + self.n_points].to_vec())
    }
}

/// Read one slice from `source` and map it through `engine`, using the
/// source's fill value for missing cells.
pub fn regrid_frame<S: SliceSource + ?Sized>(
    engine: &RegridEngine,
    source: &S,
    time_idx: usize,
    depth_idx: usize,
) -> Result<Vec<f32>> {
    let slice = source.read_slice(time_idx, depth_idx)?;
    tracing::debug!(time_idx, depth_idx, n_values = slice.len(), "regridding frame");
    engine.apply(&slice, source.fill_value())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_layout() {
        // 2 times x 3 depths x 2 points
        let data: Vec<f32> = (0..12).map(|v| v as f32).collect();
        let source = InMemorySource::new(data, 2, 3, 2, -1.0).unwrap();

        assert_eq!(source.n_points(), 2);
        assert_eq!(source.n_times(), 2);
        assert_eq!(source.n_depths(), 3);
        assert_eq!(source.fill_value(), -1.0);

        assert_eq!(source.read_slice(0, 0).unwrap(), vec![0.0, 1.0]);
        assert_eq!(source.read_slice(0, 2).unwrap(), vec![4.0, 5.0]);
        assert_eq!(source.read_slice(1, 1).unwrap(), vec![8.0, 9.0]);
    }

    #[test]
    fn test_in_memory_out_of_range() {
        let source = InMemorySource::single(vec![1.0, 2.0], 0.0);
        assert!(source.read_slice(0, 0).is_ok());
        assert!(matches!(source.read_slice(1, 0), Err(RegridError::Source(_))));
        assert!(matches!(source.read_slice(0, 1), Err(RegridError::Source(_))));
    }

    #[test]
    fn test_in_memory_rejects_bad_buffer() {
        let err = InMemorySource::new(vec![0.0; 5], 2, 1, 3, 0.0).unwrap_err();
        assert!(matches!(err, RegridError::Source(_)));
    }
}
