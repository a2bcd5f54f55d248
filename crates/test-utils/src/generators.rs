//! Synthetic image and catalog generators.
//!
//! These generators create predictable, verifiable inputs so tests can
//! assert exact pixels instead of approximations.

use contour_core::catalog::CONFIG_COUNT;
use contour_core::{PipelineConfig, PixelBuffer, Rgb, TileCatalog};

/// Creates an image filled with a single gray level.
///
/// # Arguments
///
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `value` - Gray level applied to all three channels
pub fn gray_image(width: usize, height: usize, value: u8) -> PixelBuffer {
    PixelBuffer::filled(width, height, Rgb::new(value, value, value))
}

/// Creates a horizontal brightness ramp from black to white.
///
/// Column `x` has gray level `x * 255 / (width - 1)`, so the leftmost
/// column is 0 and the rightmost is 255.
pub fn gradient_image(width: usize, height: usize) -> PixelBuffer {
    let mut image = PixelBuffer::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let value = (x * 255 / (width - 1).max(1)) as u8;
            image.set_pixel(x, y, Rgb::new(value, value, value));
        }
    }
    image
}

/// Creates an image with a dark left half and a bright right half.
///
/// Columns below `width / 2` are black, the rest white. Useful for
/// producing grids with a clean vertical edge.
pub fn half_dark_image(width: usize, height: usize) -> PixelBuffer {
    let mut image = PixelBuffer::filled(width, height, Rgb::WHITE);
    for y in 0..height {
        for x in 0..width / 2 {
            image.set_pixel(x, y, Rgb::BLACK);
        }
    }
    image
}

/// Creates a checkerboard of dark and bright blocks.
///
/// Block `(bx, by)` is black when `bx + by` is even, white otherwise.
///
/// # Arguments
///
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `block` - Side length of each square block
pub fn checkerboard_image(width: usize, height: usize, block: usize) -> PixelBuffer {
    let mut image = PixelBuffer::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let dark = (x / block + y / block) % 2 == 0;
            let pixel = if dark { Rgb::BLACK } else { Rgb::WHITE };
            image.set_pixel(x, y, pixel);
        }
    }
    image
}

/// The fill color of tile `index` in a [`numbered_catalog`].
///
/// Each configuration gets a distinct color, so a stamped region
/// identifies its configuration index exactly.
pub fn tile_color(index: usize) -> Rgb {
    Rgb::new(index as u8, (index * 16) as u8, 255 - index as u8)
}

/// Creates an in-memory catalog of 16 solid tiles sized for the config.
///
/// Tile `k` is filled with [`tile_color`]`(k)`.
pub fn numbered_catalog(config: &PipelineConfig) -> TileCatalog {
    let tiles = (0..CONFIG_COUNT)
        .map(|k| PixelBuffer::filled(config.step_x, config.step_y, tile_color(k)))
        .collect();

    TileCatalog::from_tiles(tiles, config)
        .unwrap_or_else(|e| panic!("numbered catalog construction failed: {}", e))
}
