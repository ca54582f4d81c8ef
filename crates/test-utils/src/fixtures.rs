//! Common test fixtures for regridding tests.
//!
//! Small hand-checked inputs whose expected outputs are known exactly.

/// Four points on a 10 degree square near the origin.
pub mod four_point {
    pub const LON: [f64; 4] = [0.0, 10.0, 0.0, 10.0];
    pub const LAT: [f64; 4] = [0.0, 0.0, 10.0, 10.0];
    pub const VALUES: [f32; 4] = [1.0, 2.0, 3.0, 4.0];

    /// Influence radius that covers the square with some margin (meters).
    pub const INFLUENCE_RADIUS_M: f64 = 600_000.0;
}

/// The eight corners of the unit cube, in raw Cartesian space.
pub const CUBE_CORNERS: [[f64; 3]; 8] = [
    [0.0, 0.0, 0.0],
    [0.0, 0.0, 1.0],
    [0.0, 1.0, 0.0],
    [0.0, 1.0, 1.0],
    [1.0, 0.0, 0.0],
    [1.0, 0.0, 1.0],
    [1.0, 1.0, 0.0],
    [1.0, 1.0, 1.0],
];

/// Five points along the x axis at x = 0, 1, 2, 3, 4.
pub const COLLINEAR_X: [[f64; 3]; 5] = [
    [0.0, 0.0, 0.0],
    [1.0, 0.0, 0.0],
    [2.0, 0.0, 0.0],
    [3.0, 0.0, 0.0],
    [4.0, 0.0, 0.0],
];

/// Resolutions that divide 360 and 180 exactly, with the expected
/// `(nx, ny)` of the global raster.
pub const DIVISOR_RESOLUTIONS: [(f64, usize, usize); 5] = [
    (1.0, 360, 180),
    (2.0, 180, 90),
    (5.0, 72, 36),
    (10.0, 36, 18),
    (30.0, 12, 6),
];

/// Common fill values seen in model output.
pub mod fill {
    /// NetCDF default fill for `float` variables.
    pub const NC_FILL_FLOAT: f32 = 9.969_21e36;

    /// Sentinel used by many ocean models.
    pub const MISSING_1E20: f32 = 1e20;

    pub const NEG_999: f32 = -999.0;
}
