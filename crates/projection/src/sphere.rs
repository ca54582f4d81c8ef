//! Unit-sphere projection of geographic coordinates.
//!
//! Geographic points are mapped onto the unit sphere so that straight-line
//! (chord) distance between two points is a monotonic proxy for their
//! great-circle distance. All functions are pure; NaN input yields NaN output.

/// Mean Earth radius used for all metre/chord conversions (meters).
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Largest possible chord on the unit sphere (two antipodal points).
pub const MAX_CHORD: f64 = 2.0;

/// Cartesian coordinates of a point on (or near) the unit sphere.
pub type Cartesian = [f64; 3];

/// Project a geographic coordinate (degrees) onto the unit sphere.
///
/// `x` points at (0°, 0°), `y` at (90°E, 0°) and `z` at the north pole.
#[inline]
pub fn project(lon_deg: f64, lat_deg: f64) -> Cartesian {
    let lon = lon_deg.to_radians();
    let lat = lat_deg.to_radians();
    let cos_lat = lat.cos();
    [cos_lat * lon.cos(), cos_lat * lon.sin(), lat.sin()]
}

/// Project parallel longitude/latitude arrays.
///
/// Pairs are taken up to the shorter of the two slices.
pub fn project_batch(lon: &[f64], lat: &[f64]) -> Vec<Cartesian> {
    let mut out = vec![[0.0; 3]; lon.len().min(lat.len())];
    project_into(lon, lat, &mut out);
    out
}

/// Project parallel longitude/latitude arrays into a caller-owned buffer.
///
/// Pairs are taken up to the shortest of the three slices; extra entries of
/// `out` are left untouched. One `[x, y, z]` triple per point has the same
/// memory layout as an interleaved `x, y, z, x, y, z, ...` buffer.
pub fn project_into(lon: &[f64], lat: &[f64], out: &mut [Cartesian]) {
    for ((dst, &lon), &lat) in out.iter_mut().zip(lon).zip(lat) {
        *dst = project(lon, lat);
    }
}

/// Inverse of [`project`], returning `(lon, lat)` in degrees.
///
/// The input does not need to be normalized. Longitude is in (-180, 180];
/// at the poles longitude is reported as 0.
#[inline]
pub fn unproject(p: Cartesian) -> (f64, f64) {
    let [x, y, z] = p;
    let horiz = x.hypot(y);
    let lat = z.atan2(horiz).to_degrees();
    let lon = if horiz == 0.0 {
        0.0
    } else {
        y.atan2(x).to_degrees()
    };
    (lon, lat)
}

/// Chord length on the unit sphere subtending a great-circle arc of `meters`.
///
/// `chord(0) == 0` and `chord(PI * EARTH_RADIUS_M) == 2`. Arcs longer than
/// half the circumference are not clamped; callers pass physical radii.
#[inline]
pub fn chord(meters: f64) -> f64 {
    2.0 * ((meters / EARTH_RADIUS_M) / 2.0).sin()
}

/// Inverse of [`chord`]: great-circle arc length in meters for a chord.
///
/// Chords outside `[0, 2]` are clamped to that range.
#[inline]
pub fn arc_meters(chord: f64) -> f64 {
    let half = (chord / 2.0).clamp(0.0, 1.0);
    2.0 * half.asin() * EARTH_RADIUS_M
}

/// Squared Euclidean distance between two Cartesian points.
#[inline]
pub fn distance_sq(a: &Cartesian, b: &Cartesian) -> f64 {
    let dx = a[0] - b[0];
    let dy = a[1] - b[1];
    let dz = a[2] - b[2];
    dx * dx + dy * dy + dz * dz
}
