//! Marching-squares classification and tile stamping.

use crate::buffer::{PixelBuffer, Rgb};
use crate::catalog::TileCatalog;
use crate::config::PipelineConfig;
use crate::grid::OccupancyGrid;
use std::ops::Range;

/// Configuration index for the cell whose top-left corner is `(r, c)`.
///
/// Corner weights are top-left 8, top-right 4, bottom-right 2,
/// bottom-left 1; the tile catalog is ordered by exactly this weighting.
pub fn configuration_index(grid: &OccupancyGrid, r: usize, c: usize) -> usize {
    let tl = grid.cell(r, c) as usize;
    let tr = grid.cell(r, c + 1) as usize;
    let br = grid.cell(r + 1, c + 1) as usize;
    let bl = grid.cell(r + 1, c) as usize;

    8 * tl + 4 * tr + 2 * br + bl
}

/// Copy a tile into the slab at the given pixel offset, one row at a time.
fn stamp_tile(tile: &PixelBuffer, top: usize, left: usize, width: usize, out: &mut [Rgb]) {
    for ty in 0..tile.height() {
        let start = (top + ty) * width + left;
        out[start..start + tile.width()].copy_from_slice(tile.row(ty));
    }
}

/// Stamp one worker's share of grid rows into its slab of output pixels.
///
/// `out` holds pixel rows `rows.start * step_y .. rows.end * step_y` at
/// `width` pixels per row. Tiles overwrite what is under them; pixels past
/// the last whole cell of a row are left as they are.
pub fn march_rows(
    grid: &OccupancyGrid,
    catalog: &TileCatalog,
    config: &PipelineConfig,
    rows: Range<usize>,
    width: usize,
    out: &mut [Rgb],
) {
    debug_assert_eq!(out.len(), rows.len() * config.step_y * width);

    for (chunk_row, r) in rows.enumerate() {
        let top = chunk_row * config.step_y;
        for c in 0..grid.cols() {
            let tile = catalog.tile(configuration_index(grid, r, c));
            stamp_tile(tile, top, c * config.step_x, width, out);
        }
    }
}

/// Stamp every cell of a grid on the calling thread.
pub fn march(
    grid: &OccupancyGrid,
    catalog: &TileCatalog,
    config: &PipelineConfig,
    image: &mut PixelBuffer,
) {
    let width = image.width();
    let covered = grid.rows() * config.step_y * width;
    march_rows(
        grid,
        catalog,
        config,
        0..grid.rows(),
        width,
        &mut image.pixels_mut()[..covered],
    );
}
