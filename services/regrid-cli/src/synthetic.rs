//! Synthetic point clouds for trying the tool without model output.

use std::f64::consts::PI;

/// `n` roughly evenly spaced points on the sphere (Fibonacci lattice),
/// longitude in [-180, 180).
pub fn fibonacci_sphere(n: usize) -> (Vec<f64>, Vec<f64>) {
    let golden_angle = PI * (3.0 - 5f64.sqrt());
    (0..n)
        .map(|i| {
            let z = 1.0 - (2.0 * i as f64 + 1.0) / n as f64;
            let lon = ((golden_angle * i as f64).to_degrees() + 180.0).rem_euclid(360.0) - 180.0;
            (lon, z.asin().to_degrees())
        })
        .unzip()
}

/// Temperature-like field in Kelvin: warm equator, cold poles and a
/// longitudinal wave.
pub fn temperature_field(lon: &[f64], lat: &[f64]) -> Vec<f32> {
    lon.iter()
        .zip(lat)
        .map(|(&x, &y)| {
            (250.0 + 50.0 * y.to_radians().cos() + 5.0 * (2.0 * x.to_radians()).sin()) as f32
        })
        .collect()
}
