//! Regrid a point cloud onto a global lon/lat raster.
//!
//! Reads a JSON point file or generates a synthetic cloud, builds the
//! nearest-neighbor lookup and reports coverage. Optionally probes a single
//! cell and writes the raster as JSON.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use regrid::{regrid_frame, RegridEngine};
use regrid_cli::{parse_cell, probe, resolve_config, PointFile, RasterFile};

#[derive(Parser, Debug)]
#[command(name = "regrid-cli")]
#[command(about = "Nearest-neighbor regridding of model output onto a global raster")]
struct Args {
    /// JSON point file with lon, lat, values and optional fill_value
    #[arg(short, long, conflicts_with = "synthetic", required_unless_present = "synthetic")]
    input: Option<PathBuf>,

    /// Generate N points on a Fibonacci sphere instead of reading a file
    #[arg(long, value_name = "N")]
    synthetic: Option<usize>,

    /// Target raster resolution in degrees [default: $REGRID_RESOLUTION or 1.0]
    #[arg(short, long)]
    resolution: Option<f64>,

    /// Maximum distance from a cell center to its source point, in meters
    /// [default: $REGRID_INFLUENCE_RADIUS or 200000]
    #[arg(long)]
    influence_radius: Option<f64>,

    /// Build the lookup on a single thread (also REGRID_PARALLEL=false)
    #[arg(long)]
    no_parallel: bool,

    /// Print where cell IX,IY takes its value from
    #[arg(long, value_name = "IX,IY", value_parser = parse_cell)]
    probe: Option<(usize, usize)>,

    /// Write the raster as JSON
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log level
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,
}

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();
    init_tracing(&args.log_level, args.json_logs)?;

    let config = resolve_config(args.resolution, args.influence_radius, args.no_parallel)?;

    let points = match (&args.input, args.synthetic) {
        (Some(path), _) => PointFile::load(path)?,
        (None, Some(n)) => PointFile::synthetic(n),
        (None, None) => anyhow::bail!("either --input or --synthetic is required"),
    };
    let (mesh, source) = points.into_parts()?;
    info!(
        n_points = mesh.n_points(),
        coord_type = %mesh.coord_type(),
        bbox = ?mesh.bbox(),
        "Loaded mesh"
    );

    let start = Instant::now();
    let engine =
        RegridEngine::from_config(&mesh, &config).context("failed to build regrid engine")?;
    let (nx, ny) = engine.target_dims();
    info!(
        nx,
        ny,
        valid_cells = engine.valid_count(),
        coverage_pct = engine.coverage() * 100.0,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Engine ready"
    );

    let raster = regrid_frame(&engine, &source, 0, 0)?;
    let filled = raster.iter().filter(|v| v.is_finite()).count();
    info!(finite_cells = filled, total_cells = raster.len(), "Applied field");

    if let Some((ix, iy)) = args.probe {
        match probe(&engine, &mesh, &raster, ix, iy) {
            Some(report) => println!("{}", report),
            None => warn!(ix, iy, nx, ny, "Probe cell is outside the raster"),
        }
    }

    if let Some(path) = &args.output {
        RasterFile::new(&engine, &raster).write(path)?;
        info!(path = %path.display(), "Wrote raster");
    }

    Ok(())
}

fn init_tracing(log_level: &str, json: bool) -> Result<()> {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr);

    if json {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }
    Ok(())
}
