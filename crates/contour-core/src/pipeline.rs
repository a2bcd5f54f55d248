//! The three-phase render pipeline.
//!
//! A render rescales oversized input, samples it into an occupancy grid,
//! and stamps one catalog tile per grid cell. Each phase scatters
//! per-worker ranges over a fixed thread pool and gathers at the scope
//! join, so a phase never observes a partially built predecessor. Workers
//! write through disjoint chunks and share everything else read-only,
//! which keeps the phases lock-free and the output independent of the
//! worker count.

use crate::buffer::PixelBuffer;
use crate::catalog::TileCatalog;
use crate::config::PipelineConfig;
use crate::error::{ContourError, Result};
use crate::grid::{fill_boundary_row, fill_rows, OccupancyGrid};
use crate::march;
use crate::partition::{split_rows_mut, worker_ranges};
use crate::resample;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Upper bound on the worker count accepted by [`ContourPipeline::new`].
pub const MAX_WORKERS: usize = 1024;

/// Dimension and timing summary for one render.
#[derive(Debug, Clone)]
pub struct RenderStats {
    pub source_width: usize,
    pub source_height: usize,
    pub output_width: usize,
    pub output_height: usize,
    pub grid_rows: usize,
    pub grid_cols: usize,
    pub rescaled: bool,
    pub rescale_time: Duration,
    pub sample_time: Duration,
    pub march_time: Duration,
}

/// A reusable contour pipeline with a fixed worker pool.
pub struct ContourPipeline {
    config: PipelineConfig,
    workers: usize,
    pool: rayon::ThreadPool,
}

impl ContourPipeline {
    /// Build a pipeline with exactly `workers` pool threads.
    pub fn new(config: PipelineConfig, workers: usize) -> Result<Self> {
        config.validate().map_err(ContourError::InvalidConfig)?;

        if workers == 0 {
            return Err(ContourError::invalid_config("worker count must be >= 1"));
        }
        if workers > MAX_WORKERS {
            return Err(ContourError::invalid_config(format!(
                "worker count {} exceeds the limit of {}",
                workers, MAX_WORKERS
            )));
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .build()
            .map_err(|e| ContourError::worker_pool(e.to_string()))?;

        Ok(Self {
            config,
            workers,
            pool,
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Run the three phases over one image.
    ///
    /// Consumes the source buffer; when no rescale is needed it becomes
    /// the output buffer directly. The catalog must match the configured
    /// step sizes, and the image must be non-empty.
    pub fn render(
        &self,
        image: PixelBuffer,
        catalog: &TileCatalog,
    ) -> Result<(PixelBuffer, RenderStats)> {
        let reference = catalog.tile(0);
        if reference.width() != self.config.step_x || reference.height() != self.config.step_y {
            return Err(ContourError::catalog(format!(
                "tile size {}x{} does not match steps {}x{}",
                reference.width(),
                reference.height(),
                self.config.step_x,
                self.config.step_y
            )));
        }

        // The sample phase reads the last pixel row and column, which do
        // not exist in an empty buffer.
        if image.width() == 0 || image.height() == 0 {
            return Err(ContourError::malformed_image(format!(
                "degenerate dimensions {}x{}",
                image.width(),
                image.height()
            )));
        }

        let source_width = image.width();
        let source_height = image.height();

        let started = Instant::now();
        let rescaled = resample::needs_resample(&image, &self.config);
        let mut scaled = if rescaled {
            self.rescale_phase(&image)
        } else {
            image
        };
        let rescale_time = started.elapsed();
        debug!(
            rescaled,
            width = scaled.width(),
            height = scaled.height(),
            "rescale phase complete"
        );

        let started = Instant::now();
        let grid = self.sample_phase(&scaled);
        let sample_time = started.elapsed();
        debug!(
            rows = grid.rows(),
            cols = grid.cols(),
            "sample phase complete"
        );

        let started = Instant::now();
        self.march_phase(&grid, catalog, &mut scaled);
        let march_time = started.elapsed();
        debug!(cells = grid.rows() * grid.cols(), "march phase complete");

        let stats = RenderStats {
            source_width,
            source_height,
            output_width: scaled.width(),
            output_height: scaled.height(),
            grid_rows: grid.rows(),
            grid_cols: grid.cols(),
            rescaled,
            rescale_time,
            sample_time,
            march_time,
        };

        info!(
            source_width,
            source_height,
            output_width = stats.output_width,
            output_height = stats.output_height,
            rescaled,
            workers = self.workers,
            rescale_ms = rescale_time.as_millis() as u64,
            sample_ms = sample_time.as_millis() as u64,
            march_ms = march_time.as_millis() as u64,
            "contour render complete"
        );

        Ok((scaled, stats))
    }

    /// Phase 1: bring an oversized source down to the configured bounds.
    fn rescale_phase(&self, source: &PixelBuffer) -> PixelBuffer {
        let target_width = self.config.max_width;
        let target_height = self.config.max_height;
        let mut out = PixelBuffer::new(target_width, target_height);

        let ranges = worker_ranges(self.workers, target_height);
        let chunks = split_rows_mut(out.pixels_mut(), self.workers, target_height, target_width);

        self.pool.scope(|scope| {
            for (range, chunk) in ranges.into_iter().zip(chunks) {
                scope.spawn(move |_| {
                    resample::resample_rows(source, target_width, target_height, range, chunk);
                });
            }
        });

        out
    }

    /// Phase 2: threshold sample points into the occupancy grid.
    ///
    /// Each worker fills its share of interior grid rows (the duplicated
    /// boundary column rides along inside each row) plus its share of the
    /// duplicated boundary row. The corner cell is in nobody's share and
    /// keeps its zero from allocation.
    fn sample_phase(&self, image: &PixelBuffer) -> OccupancyGrid {
        let mut grid = OccupancyGrid::sized_for(image, &self.config);
        let rows = grid.rows();
        let cols = grid.cols();
        let config = &self.config;

        let (main, boundary) = grid.cells_mut().split_at_mut(rows * (cols + 1));
        let row_ranges = worker_ranges(self.workers, rows);
        let row_chunks = split_rows_mut(main, self.workers, rows, cols + 1);
        let col_ranges = worker_ranges(self.workers, cols);
        let col_chunks = split_rows_mut(&mut boundary[..cols], self.workers, cols, 1);

        self.pool.scope(|scope| {
            let rows_split = row_ranges.into_iter().zip(row_chunks);
            let cols_split = col_ranges.into_iter().zip(col_chunks);

            for ((row_range, row_chunk), (col_range, col_chunk)) in rows_split.zip(cols_split) {
                scope.spawn(move |_| {
                    fill_rows(image, config, row_range, row_chunk);
                    fill_boundary_row(image, config, col_range, col_chunk);
                });
            }
        });

        grid
    }

    /// Phase 3: stamp one tile per cell over the scaled image.
    fn march_phase(&self, grid: &OccupancyGrid, catalog: &TileCatalog, image: &mut PixelBuffer) {
        let width = image.width();
        let config = &self.config;
        let rows = grid.rows();

        // Pixel rows past the last whole cell stay as sampled.
        let covered = rows * config.step_y * width;
        let slab = &mut image.pixels_mut()[..covered];

        let ranges = worker_ranges(self.workers, rows);
        let chunks = split_rows_mut(slab, self.workers, rows, config.step_y * width);

        self.pool.scope(|scope| {
            for (range, chunk) in ranges.into_iter().zip(chunks) {
                scope.spawn(move |_| {
                    march::march_rows(grid, catalog, config, range, width, chunk);
                });
            }
        });
    }
}
