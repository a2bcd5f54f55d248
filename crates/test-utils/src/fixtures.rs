//! On-disk fixtures backed by temporary directories.

use crate::generators::tile_color;
use contour_core::catalog::CONFIG_COUNT;
use contour_core::{ppm, PipelineConfig, PixelBuffer};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Writes a numbered tile catalog as `0.ppm` through `15.ppm` in a fresh
/// temporary directory.
///
/// Tile `k` is solid [`tile_color`]`(k)`, sized to the config's steps.
/// The returned guard removes the directory on drop, so keep it alive for
/// the duration of the test.
pub fn numbered_catalog_dir(config: &PipelineConfig) -> TempDir {
    let dir = TempDir::new().unwrap_or_else(|e| panic!("tempdir creation failed: {}", e));

    for k in 0..CONFIG_COUNT {
        let tile = PixelBuffer::filled(config.step_x, config.step_y, tile_color(k));
        write_tile(dir.path(), k, &tile);
    }

    dir
}

/// Writes one tile as `<index>.ppm` under `dir`.
pub fn write_tile(dir: &Path, index: usize, tile: &PixelBuffer) -> PathBuf {
    let path = dir.join(format!("{}.ppm", index));
    ppm::write_ppm(&path, tile).unwrap_or_else(|e| panic!("tile write failed: {}", e));
    path
}

/// Writes an image to `name` in a fresh temporary directory, returning
/// the guard and the file path.
pub fn image_file(name: &str, image: &PixelBuffer) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap_or_else(|e| panic!("tempdir creation failed: {}", e));
    let path = dir.path().join(name);
    ppm::write_ppm(&path, image).unwrap_or_else(|e| panic!("image write failed: {}", e));
    (dir, path)
}
