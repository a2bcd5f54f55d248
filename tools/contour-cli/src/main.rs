//! Command-line contour map generator.
//!
//! Renders a marching-squares contour map of a binary PPM image:
//! - Rescales oversized inputs down to the configured bounds
//! - Samples brightness into a binary occupancy grid
//! - Stamps one pre-rendered tile per grid cell
//!
//! All phases run across a fixed pool of worker threads.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use contour_core::{ppm, ContourPipeline, PipelineConfig, TileCatalog};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "contour-cli")]
#[command(about = "Marching-squares contour maps for binary PPM images")]
struct Args {
    /// Input image (binary PPM)
    in_file: PathBuf,

    /// Output image (binary PPM)
    out_file: PathBuf,

    /// Number of worker threads
    workers: usize,

    /// Directory holding tiles 0.ppm through 15.ppm
    #[arg(long, env = "CONTOUR_TILE_DIR", default_value = "contours")]
    tiles: PathBuf,

    /// JSON settings file; missing fields keep their defaults
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Grid step in pixels along both axes (overrides settings)
    #[arg(long)]
    step: Option<usize>,

    /// Brightness threshold 0-255 (overrides settings)
    #[arg(long)]
    threshold: Option<u8>,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

/// Settings file first, then flag overrides on top.
fn effective_config(args: &Args) -> Result<PipelineConfig> {
    let mut config = match &args.settings {
        Some(path) => PipelineConfig::from_file(path)?,
        None => PipelineConfig::default(),
    };

    if let Some(step) = args.step {
        config.step_x = step;
        config.step_y = step;
    }
    if let Some(threshold) = args.threshold {
        config.threshold = threshold;
    }

    Ok(config)
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let config = effective_config(&args)?;
    let pipeline = ContourPipeline::new(config, args.workers)?;
    let catalog = TileCatalog::load(&args.tiles, pipeline.config())?;
    let image = ppm::read_ppm(&args.in_file)?;

    info!(
        input = %args.in_file.display(),
        width = image.width(),
        height = image.height(),
        workers = args.workers,
        "Starting contour render"
    );

    let (output, stats) = pipeline.render(image, &catalog)?;
    ppm::write_ppm(&args.out_file, &output)?;

    info!(
        output = %args.out_file.display(),
        width = stats.output_width,
        height = stats.output_height,
        rescaled = stats.rescaled,
        grid_rows = stats.grid_rows,
        grid_cols = stats.grid_cols,
        rescale_ms = stats.rescale_time.as_millis() as u64,
        sample_ms = stats.sample_time.as_millis() as u64,
        march_ms = stats.march_time.as_millis() as u64,
        "Contour render complete"
    );

    Ok(())
}
