//! Binary occupancy grid sampled from the scaled image.

use crate::buffer::{PixelBuffer, Rgb};
use crate::config::PipelineConfig;
use std::ops::Range;

/// Classify one sampled pixel: bright samples are empty, dark ones full.
pub fn occupancy(pixel: Rgb, threshold: u8) -> u8 {
    if pixel.brightness() > threshold {
        0
    } else {
        1
    }
}

/// Thresholded sample grid with one duplicated boundary row and column.
///
/// Storage is `(rows + 1) x (cols + 1)` cells, row-major with stride
/// `cols + 1`. Interior cell `(r, c)` samples pixel
/// `(c * step_x, r * step_y)`; the extra column repeats the last pixel
/// column and the extra row repeats the last pixel row, so every interior
/// cell has a complete 2x2 corner set. The corner cell `(rows, cols)` is
/// never sampled and stays 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccupancyGrid {
    rows: usize,
    cols: usize,
    cells: Vec<u8>,
}

impl OccupancyGrid {
    /// Allocate a zeroed grid sized for an image under the given config.
    pub fn sized_for(image: &PixelBuffer, config: &PipelineConfig) -> Self {
        let rows = image.height() / config.step_y;
        let cols = image.width() / config.step_x;
        Self {
            rows,
            cols,
            cells: vec![0; (rows + 1) * (cols + 1)],
        }
    }

    /// Sample a whole image on the calling thread.
    pub fn build(image: &PixelBuffer, config: &PipelineConfig) -> Self {
        let mut grid = Self::sized_for(image, config);
        let (rows, cols) = (grid.rows, grid.cols);
        let (main, boundary) = grid.cells.split_at_mut(rows * (cols + 1));

        fill_rows(image, config, 0..rows, main);
        fill_boundary_row(image, config, 0..cols, &mut boundary[..cols]);
        grid
    }

    /// Interior grid rows (excluding the duplicated boundary row).
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Interior grid columns (excluding the duplicated boundary column).
    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn cell(&self, r: usize, c: usize) -> u8 {
        self.cells[r * (self.cols + 1) + c]
    }

    /// Flat cell storage, for phase-parallel fills.
    pub fn cells_mut(&mut self) -> &mut [u8] {
        &mut self.cells
    }

    #[cfg(test)]
    pub(crate) fn set(&mut self, r: usize, c: usize, value: u8) {
        let cols = self.cols;
        self.cells[r * (cols + 1) + c] = value;
    }
}

/// Fill one worker's share of grid rows, boundary column included.
///
/// `out` holds exactly the rows in `rows`, at `cols + 1` cells per row.
/// Callers ensure the image is non-empty.
pub fn fill_rows(image: &PixelBuffer, config: &PipelineConfig, rows: Range<usize>, out: &mut [u8]) {
    let cols = image.width() / config.step_x;
    debug_assert_eq!(out.len(), rows.len() * (cols + 1));

    for (chunk_row, r) in rows.enumerate() {
        let y = r * config.step_y;
        let row_out = &mut out[chunk_row * (cols + 1)..(chunk_row + 1) * (cols + 1)];

        for (c, cell) in row_out[..cols].iter_mut().enumerate() {
            *cell = occupancy(image.pixel(c * config.step_x, y), config.threshold);
        }
        // Duplicated boundary column, sampled from the last pixel column.
        row_out[cols] = occupancy(image.pixel(image.width() - 1, y), config.threshold);
    }
}

/// Fill one worker's share of the duplicated boundary row, sampled from
/// the last pixel row. The corner cell is outside every share. Callers
/// ensure the image is non-empty.
pub fn fill_boundary_row(
    image: &PixelBuffer,
    config: &PipelineConfig,
    cols: Range<usize>,
    out: &mut [u8],
) {
    debug_assert_eq!(out.len(), cols.len());
    let y = image.height() - 1;

    for (slot, c) in out.iter_mut().zip(cols) {
        *slot = occupancy(image.pixel(c * config.step_x, y), config.threshold);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(step: usize, threshold: u8) -> PipelineConfig {
        PipelineConfig {
            step_x: step,
            step_y: step,
            threshold,
            ..PipelineConfig::default()
        }
    }

    #[test]
    fn test_occupancy_threshold_boundary() {
        assert_eq!(occupancy(Rgb::new(201, 201, 201), 200), 0);
        assert_eq!(occupancy(Rgb::new(200, 200, 200), 200), 1);
        assert_eq!(occupancy(Rgb::new(199, 199, 199), 200), 1);
    }

    #[test]
    fn test_grid_dimensions() {
        let image = PixelBuffer::new(20, 12);
        let grid = OccupancyGrid::sized_for(&image, &test_config(4, 200));

        assert_eq!(grid.rows(), 3);
        assert_eq!(grid.cols(), 5);
        assert_eq!(grid.cells.len(), 4 * 6);
    }

    #[test]
    fn test_build_splits_dark_and_bright_halves() {
        // Left half dark, right half bright, 8x8 at step 4.
        let mut image = PixelBuffer::filled(8, 8, Rgb::WHITE);
        for y in 0..8 {
            for x in 0..4 {
                image.set_pixel(x, y, Rgb::BLACK);
            }
        }

        let grid = OccupancyGrid::build(&image, &test_config(4, 200));
        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.cols(), 2);

        for r in 0..2 {
            assert_eq!(grid.cell(r, 0), 1, "dark column, row {}", r);
            assert_eq!(grid.cell(r, 1), 0, "bright column, row {}", r);
        }
    }

    #[test]
    fn test_boundary_row_and_column_sample_last_pixels() {
        // Bright image with a dark last pixel row and last pixel column.
        let mut image = PixelBuffer::filled(8, 8, Rgb::WHITE);
        for i in 0..8 {
            image.set_pixel(7, i, Rgb::BLACK);
            image.set_pixel(i, 7, Rgb::BLACK);
        }

        let grid = OccupancyGrid::build(&image, &test_config(4, 200));

        // Interior samples land on bright pixels.
        assert_eq!(grid.cell(0, 0), 0);
        assert_eq!(grid.cell(1, 1), 0);

        // Boundary column samples (7, r * 4); boundary row samples (c * 4, 7).
        assert_eq!(grid.cell(0, 2), 1);
        assert_eq!(grid.cell(1, 2), 1);
        assert_eq!(grid.cell(2, 0), 1);
        assert_eq!(grid.cell(2, 1), 1);
    }

    #[test]
    fn test_corner_cell_stays_zero() {
        let image = PixelBuffer::filled(8, 8, Rgb::BLACK);
        let grid = OccupancyGrid::build(&image, &test_config(4, 200));

        assert_eq!(grid.cell(2, 2), 0);
        // Everything else in an all-dark image is 1.
        assert_eq!(grid.cell(1, 1), 1);
        assert_eq!(grid.cell(2, 1), 1);
        assert_eq!(grid.cell(1, 2), 1);
    }

    #[test]
    fn test_chunked_fill_matches_build() {
        let mut image = PixelBuffer::new(16, 16);
        for y in 0..16 {
            for x in 0..16 {
                let v = ((x * 16 + y * 3) % 256) as u8;
                image.set_pixel(x, y, Rgb::new(v, v, v));
            }
        }
        let config = test_config(4, 120);

        let whole = OccupancyGrid::build(&image, &config);

        let mut split = OccupancyGrid::sized_for(&image, &config);
        let rows = split.rows();
        let cols = split.cols();
        let (main, boundary) = split.cells_mut().split_at_mut(rows * (cols + 1));
        let (top, bottom) = main.split_at_mut(cols + 1);
        fill_rows(&image, &config, 0..1, top);
        fill_rows(&image, &config, 1..rows, bottom);
        let (left, right) = boundary[..cols].split_at_mut(2);
        fill_boundary_row(&image, &config, 0..2, left);
        fill_boundary_row(&image, &config, 2..cols, right);

        assert_eq!(split, whole);
    }
}
