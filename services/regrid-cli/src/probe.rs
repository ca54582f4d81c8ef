//! Reverse lookup of a single raster cell.

use std::fmt;

use projection::arc_meters;
use regrid::{CoordinateMesh, RegridEngine};

/// Parse an `IX,IY` cell address.
pub fn parse_cell(s: &str) -> Result<(usize, usize), String> {
    let (ix, iy) = s
        .split_once(',')
        .ok_or_else(|| format!("expected IX,IY, got '{}'", s))?;
    let ix = ix
        .trim()
        .parse()
        .map_err(|e| format!("invalid IX '{}': {}", ix.trim(), e))?;
    let iy = iy
        .trim()
        .parse()
        .map_err(|e| format!("invalid IY '{}': {}", iy.trim(), e))?;
    Ok((ix, iy))
}

/// Where a raster cell takes its value from.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeReport {
    pub ix: usize,
    pub iy: usize,
    pub lon: f64,
    pub lat: f64,
    pub source_index: usize,
    pub source_lon: f64,
    pub source_lat: f64,
    pub distance_km: f64,
    pub valid: bool,
    pub value: f32,
}

/// Describe cell `(ix, iy)` of `raster`, or `None` if it is off the grid.
pub fn probe(
    engine: &RegridEngine,
    mesh: &CoordinateMesh,
    raster: &[f32],
    ix: usize,
    iy: usize,
) -> Option<ProbeReport> {
    let (source_index, chord) = engine.nearest_source(ix, iy)?;
    let (source_lon, source_lat) = mesh.point(source_index)?;
    let (lon, lat) = engine.lonlat(ix, iy);
    let value = *raster.get(engine.spec().index(ix, iy))?;

    Some(ProbeReport {
        ix,
        iy,
        lon,
        lat,
        source_index,
        source_lon,
        source_lat,
        distance_km: arc_meters(chord) / 1000.0,
        valid: engine.is_valid(ix, iy),
        value,
    })
}

impl fmt::Display for ProbeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cell ({}, {}) at ({:.3}, {:.3}): nearest source #{} at ({:.3}, {:.3}), {:.1} km away",
            self.ix,
            self.iy,
            self.lon,
            self.lat,
            self.source_index,
            self.source_lon,
            self.source_lat,
            self.distance_km
        )?;
        if self.valid {
            write!(f, ", value {}", self.value)
        } else {
            write!(f, ", outside influence radius (fill {})", self.value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regrid::CoordType;

    #[test]
    fn test_parse_cell() {
        assert_eq!(parse_cell("3,4"), Ok((3, 4)));
        assert_eq!(parse_cell(" 10 , 0 "), Ok((10, 0)));
        assert!(parse_cell("3").is_err());
        assert!(parse_cell("a,4").is_err());
        assert!(parse_cell("3,-1").is_err());
    }

    #[test]
    fn test_probe_four_points() {
        let mesh = CoordinateMesh::new(
            vec![0.0, 10.0, 0.0, 10.0],
            vec![0.0, 0.0, 10.0, 10.0],
            CoordType::Unstructured1D,
        )
        .unwrap();
        let engine = RegridEngine::create(&mesh, 1.0, 600_000.0).unwrap();
        let raster = engine.apply(&[1.0, 2.0, 3.0, 4.0], -1.0).unwrap();

        let (ix, iy) = engine.cell_at(10.2, 10.2).unwrap();
        let report = probe(&engine, &mesh, &raster, ix, iy).unwrap();
        assert_eq!(report.source_index, 3);
        assert_eq!((report.source_lon, report.source_lat), (10.0, 10.0));
        assert!(report.valid);
        assert_eq!(report.value, 4.0);
        // Cell center (10.5, 10.5) is about 78 km from (10, 10)
        assert!((report.distance_km - 78.0).abs() < 1.5);
        assert!(report.to_string().contains("value 4"));

        let far = probe(&engine, &mesh, &raster, 0, 0).unwrap();
        assert!(!far.valid);
        assert_eq!(far.value, -1.0);
        assert!(far.to_string().contains("outside influence radius"));

        assert!(probe(&engine, &mesh, &raster, 360, 0).is_none());
    }
}
