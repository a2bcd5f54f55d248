//! Parallel marching-squares contour mapping over binary PPM rasters.
//!
//! The pipeline rescales oversized images with a bicubic kernel, samples
//! brightness into a binary occupancy grid, and stamps one pre-rendered
//! tile per grid cell, with every phase fanned out over a fixed worker
//! pool.

pub mod buffer;
pub mod catalog;
pub mod config;
pub mod error;
pub mod grid;
pub mod march;
pub mod partition;
pub mod pipeline;
pub mod ppm;
pub mod resample;

pub use buffer::{PixelBuffer, Rgb};
pub use catalog::{TileCatalog, CONFIG_COUNT};
pub use config::PipelineConfig;
pub use error::{ContourError, Result};
pub use grid::OccupancyGrid;
pub use pipeline::{ContourPipeline, RenderStats, MAX_WORKERS};
pub use ppm::{read_ppm, write_ppm};
