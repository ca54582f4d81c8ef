//! Synthetic coordinate and field generators.
//!
//! Everything here is deterministic so test failures reproduce exactly.
//! Coordinates are returned as parallel `(lon, lat)` vectors in degrees,
//! longitude in [-180, 180].

use std::f64::consts::PI;

/// Cell-centered global axes for an `nx` by `ny` regular grid.
///
/// # Example
///
/// ```
/// use test_utils::regular_axes;
///
/// let (lon, lat) = regular_axes(4, 2);
/// assert_eq!(lon, vec![-135.0, -45.0, 45.0, 135.0]);
/// assert_eq!(lat, vec![-45.0, 45.0]);
/// ```
pub fn regular_axes(nx: usize, ny: usize) -> (Vec<f64>, Vec<f64>) {
    let dlon = 360.0 / nx.max(1) as f64;
    let dlat = 180.0 / ny.max(1) as f64;
    let lon = (0..nx).map(|i| -180.0 + (i as f64 + 0.5) * dlon).collect();
    let lat = (0..ny).map(|j| -90.0 + (j as f64 + 0.5) * dlat).collect();
    (lon, lat)
}

/// Roughly uniform unstructured points on the sphere (Fibonacci lattice).
///
/// Neighboring points are about `sqrt(4π / n)` radians apart, which makes
/// the cloud a good stand-in for an unstructured ocean mesh.
pub fn fibonacci_sphere(n: usize) -> (Vec<f64>, Vec<f64>) {
    let golden_angle = PI * (3.0 - 5f64.sqrt());
    let mut lon = Vec::with_capacity(n);
    let mut lat = Vec::with_capacity(n);
    for i in 0..n {
        let z = 1.0 - (2.0 * i as f64 + 1.0) / n as f64;
        lat.push(z.asin().to_degrees());
        lon.push(wrap_lon((golden_angle * i as f64).to_degrees()));
    }
    (lon, lat)
}

/// A regional curvilinear grid of shape `(ny, nx)`, stored row-major.
///
/// The grid is centered on `(center_lon, center_lat)`, spans `extent_deg`
/// in each direction and is rotated by `rotation_deg`, so neither
/// coordinate is separable into a 1D axis.
pub fn curvilinear_grid(
    nx: usize,
    ny: usize,
    center_lon: f64,
    center_lat: f64,
    extent_deg: f64,
    rotation_deg: f64,
) -> (Vec<f64>, Vec<f64>) {
    let (sin_r, cos_r) = rotation_deg.to_radians().sin_cos();
    let mut lon = Vec::with_capacity(nx * ny);
    let mut lat = Vec::with_capacity(nx * ny);
    for j in 0..ny {
        for i in 0..nx {
            let u = (i as f64 / (nx.max(2) - 1) as f64 - 0.5) * extent_deg;
            let v = (j as f64 / (ny.max(2) - 1) as f64 - 0.5) * extent_deg;
            lon.push(wrap_lon(center_lon + u * cos_r - v * sin_r));
            lat.push((center_lat + u * sin_r + v * cos_r).clamp(-90.0, 90.0));
        }
    }
    (lon, lat)
}

/// Points packed within `radius_deg` of the north pole, including several
/// exact duplicates of the pole itself.
pub fn polar_cluster(n: usize, radius_deg: f64) -> (Vec<f64>, Vec<f64>) {
    let mut lon = Vec::with_capacity(n);
    let mut lat = Vec::with_capacity(n);
    for i in 0..n {
        if i % 10 == 0 {
            lon.push(0.0);
            lat.push(90.0);
            continue;
        }
        let hash = simple_hash(i as u32, 0, 7);
        lon.push((hash % 36000) as f64 / 100.0 - 180.0);
        lat.push(90.0 - (hash % 1000) as f64 / 1000.0 * radius_deg);
    }
    (lon, lat)
}

/// Temperature-like field in Kelvin: warm equator, cold poles, with a
/// longitudinal wave.
///
/// Values stay between roughly 245K and 305K.
pub fn temperature_field(lon: &[f64], lat: &[f64]) -> Vec<f32> {
    lon.iter()
        .zip(lat)
        .map(|(&x, &y)| {
            let t = 250.0 + 50.0 * y.to_radians().cos() + 5.0 * (2.0 * x.to_radians()).sin();
            t as f32
        })
        .collect()
}

/// A field filled with a constant value.
pub fn constant_field(n: usize, value: f32) -> Vec<f32> {
    vec![value; n]
}

/// A field whose value is the point index.
///
/// Makes it easy to check which source point a raster cell was copied from.
pub fn index_field(n: usize) -> Vec<f32> {
    (0..n).map(|i| i as f32).collect()
}

/// Replace every `every`-th value with `sentinel`, starting at index 0.
pub fn with_sentinels(mut data: Vec<f32>, every: usize, sentinel: f32) -> Vec<f32> {
    for v in data.iter_mut().step_by(every.max(1)) {
        *v = sentinel;
    }
    data
}

/// Wrap a longitude into [-180, 180).
pub fn wrap_lon(lon: f64) -> f64 {
    (lon + 180.0).rem_euclid(360.0) - 180.0
}

/// Simple deterministic hash for reproducible test data.
fn simple_hash(x: u32, y: u32, seed: u32) -> u32 {
    let mut h = seed;
    h = h.wrapping_mul(31).wrapping_add(x);
    h = h.wrapping_mul(31).wrapping_add(y);
    h ^= h >> 16;
    h = h.wrapping_mul(0x85ebca6b);
    h ^= h >> 13;
    h = h.wrapping_mul(0xc2b2ae35);
    h ^= h >> 16;
    h
}
