//! Bicubic image rescaling.
//!
//! Oversized inputs are brought down to the configured bounds with a
//! Catmull-Rom kernel, sampled per channel over an edge-clamped 4x4
//! neighborhood. All arithmetic is f32 and purely per-pixel, so output is
//! identical no matter how target rows are split across workers.

use crate::buffer::{PixelBuffer, Rgb};
use crate::config::PipelineConfig;
use std::ops::Range;

/// Whether an image exceeds the configured bounds and needs rescaling.
pub fn needs_resample(image: &PixelBuffer, config: &PipelineConfig) -> bool {
    image.width() > config.max_width || image.height() > config.max_height
}

/// 1D cubic interpolation using Catmull-Rom spline.
fn cubic_1d(p0: f32, p1: f32, p2: f32, p3: f32, t: f32) -> f32 {
    let t2 = t * t;
    let t3 = t2 * t;

    // Catmull-Rom coefficients
    let a = -0.5 * p0 + 1.5 * p1 - 1.5 * p2 + 0.5 * p3;
    let b = p0 - 2.5 * p1 + 2.0 * p2 - 0.5 * p3;
    let c = -0.5 * p0 + 0.5 * p2;
    let d = p1;

    a * t3 + b * t2 + c * t + d
}

fn blend_channel(patch: &[[Rgb; 4]; 4], channel: fn(Rgb) -> f32, xf: f32, yf: f32) -> u8 {
    let mut rows = [0.0f32; 4];
    for (j, row) in patch.iter().enumerate() {
        rows[j] = cubic_1d(
            channel(row[0]),
            channel(row[1]),
            channel(row[2]),
            channel(row[3]),
            xf,
        );
    }

    cubic_1d(rows[0], rows[1], rows[2], rows[3], yf).clamp(0.0, 255.0) as u8
}

/// Sample the source image at normalized coordinates `(u, v)` in `[0, 1]`.
///
/// Coordinates map to source space with a half-pixel shift; the 4x4
/// neighborhood is clamped at the image edges.
pub fn sample_bicubic(src: &PixelBuffer, u: f32, v: f32) -> Rgb {
    let sx = u * src.width() as f32 - 0.5;
    let sy = v * src.height() as f32 - 0.5;

    let xi = sx.floor() as i64;
    let yi = sy.floor() as i64;
    let xf = sx - sx.floor();
    let yf = sy - sy.floor();

    let mut patch = [[Rgb::BLACK; 4]; 4];
    for (j, row) in patch.iter_mut().enumerate() {
        for (i, slot) in row.iter_mut().enumerate() {
            let px = (xi + i as i64 - 1).clamp(0, src.width() as i64 - 1) as usize;
            let py = (yi + j as i64 - 1).clamp(0, src.height() as i64 - 1) as usize;
            *slot = src.pixel(px, py);
        }
    }

    Rgb::new(
        blend_channel(&patch, |p| p.r as f32, xf, yf),
        blend_channel(&patch, |p| p.g as f32, xf, yf),
        blend_channel(&patch, |p| p.b as f32, xf, yf),
    )
}

/// Fill one worker's share of target rows.
///
/// `out` is the chunk holding exactly the rows in `rows`, laid out
/// row-major at `target_width` pixels per row.
pub fn resample_rows(
    src: &PixelBuffer,
    target_width: usize,
    target_height: usize,
    rows: Range<usize>,
    out: &mut [Rgb],
) {
    debug_assert_eq!(out.len(), rows.len() * target_width);

    for (chunk_row, y) in rows.enumerate() {
        let v = y as f32 / (target_height - 1) as f32;
        for x in 0..target_width {
            let u = x as f32 / (target_width - 1) as f32;
            out[chunk_row * target_width + x] = sample_bicubic(src, u, v);
        }
    }
}

/// Resample a whole image on the calling thread.
pub fn resample(src: &PixelBuffer, target_width: usize, target_height: usize) -> PixelBuffer {
    let mut out = PixelBuffer::new(target_width, target_height);
    resample_rows(
        src,
        target_width,
        target_height,
        0..target_height,
        out.pixels_mut(),
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cubic_1d_endpoints() {
        assert_eq!(cubic_1d(10.0, 20.0, 30.0, 40.0, 0.0), 20.0);
        assert_eq!(cubic_1d(10.0, 20.0, 30.0, 40.0, 1.0), 30.0);
    }

    #[test]
    fn test_cubic_1d_reproduces_linear_data() {
        // On collinear points Catmull-Rom degenerates to linear interpolation.
        let mid = cubic_1d(0.0, 1.0, 2.0, 3.0, 0.5);
        assert!((mid - 1.5).abs() < 1e-6);
    }

    #[test]
    fn test_needs_resample_bounds() {
        let config = PipelineConfig {
            max_width: 16,
            max_height: 16,
            ..PipelineConfig::default()
        };

        assert!(!needs_resample(&PixelBuffer::new(16, 16), &config));
        assert!(needs_resample(&PixelBuffer::new(17, 16), &config));
        assert!(needs_resample(&PixelBuffer::new(16, 17), &config));
    }

    #[test]
    fn test_uniform_image_stays_uniform() {
        let src = PixelBuffer::filled(8, 8, Rgb::new(100, 150, 200));
        let out = resample(&src, 4, 4);

        assert_eq!(out.width(), 4);
        assert_eq!(out.height(), 4);
        assert!(out.pixels().iter().all(|&p| p == Rgb::new(100, 150, 200)));
    }

    #[test]
    fn test_row_chunks_match_whole_image() {
        let mut src = PixelBuffer::new(9, 7);
        for y in 0..7 {
            for x in 0..9 {
                src.set_pixel(x, y, Rgb::new((x * 28) as u8, (y * 36) as u8, 77));
            }
        }

        let whole = resample(&src, 5, 6);

        let mut split = PixelBuffer::new(5, 6);
        let (top, bottom) = split.pixels_mut().split_at_mut(2 * 5);
        resample_rows(&src, 5, 6, 0..2, top);
        resample_rows(&src, 5, 6, 2..6, bottom);

        assert_eq!(split, whole);
    }
}
