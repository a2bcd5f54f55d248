//! Pre-rendered configuration tiles.

use crate::buffer::PixelBuffer;
use crate::config::PipelineConfig;
use crate::error::{ContourError, Result};
use crate::ppm;
use std::path::Path;

/// Number of marching-squares corner configurations.
pub const CONFIG_COUNT: usize = 16;

/// The 16 tiles stamped onto the output image, indexed by configuration.
///
/// Tile dimensions are checked once against the configured step sizes, so
/// the marcher can copy whole tile rows without further bounds checks.
#[derive(Debug, Clone)]
pub struct TileCatalog {
    tiles: Vec<PixelBuffer>,
}

impl TileCatalog {
    /// Load tiles `0.ppm` through `15.ppm` from a directory.
    pub fn load(dir: impl AsRef<Path>, config: &PipelineConfig) -> Result<Self> {
        let dir = dir.as_ref();
        let mut tiles = Vec::with_capacity(CONFIG_COUNT);

        for index in 0..CONFIG_COUNT {
            let path = dir.join(format!("{}.ppm", index));
            let tile = ppm::read_ppm(&path)
                .map_err(|e| ContourError::catalog(format!("tile {}: {}", index, e)))?;
            tiles.push(tile);
        }

        Self::from_tiles(tiles, config)
    }

    /// Build a catalog from in-memory tiles, checking count and dimensions.
    pub fn from_tiles(tiles: Vec<PixelBuffer>, config: &PipelineConfig) -> Result<Self> {
        if tiles.len() != CONFIG_COUNT {
            return Err(ContourError::catalog(format!(
                "expected {} tiles, found {}",
                CONFIG_COUNT,
                tiles.len()
            )));
        }

        for (index, tile) in tiles.iter().enumerate() {
            if tile.width() != config.step_x || tile.height() != config.step_y {
                return Err(ContourError::catalog(format!(
                    "tile {} is {}x{}, expected {}x{}",
                    index,
                    tile.width(),
                    tile.height(),
                    config.step_x,
                    config.step_y
                )));
            }
        }

        Ok(Self { tiles })
    }

    /// Tile for a configuration index in `[0, 15]`.
    pub fn tile(&self, index: usize) -> &PixelBuffer {
        &self.tiles[index]
    }
}
