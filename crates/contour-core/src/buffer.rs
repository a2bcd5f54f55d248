//! RGB pixel buffers shared across pipeline phases.

use crate::error::{ContourError, Result};

/// A single 8-bit RGB pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
    pub const WHITE: Rgb = Rgb {
        r: 255,
        g: 255,
        b: 255,
    };

    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Mean of the three channels, using integer division.
    pub fn brightness(&self) -> u8 {
        ((self.r as u16 + self.g as u16 + self.b as u16) / 3) as u8
    }
}

/// A row-major RGB raster.
///
/// Pixel `(x, y)` lives at index `y * width + x`. The constructors enforce
/// `data.len() == width * height`, so row arithmetic never goes out of
/// bounds for in-range coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    data: Vec<Rgb>,
}

impl PixelBuffer {
    /// Create a buffer of the given size filled with black.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![Rgb::BLACK; width * height],
        }
    }

    /// Create a buffer of the given size filled with one pixel value.
    pub fn filled(width: usize, height: usize, pixel: Rgb) -> Self {
        Self {
            width,
            height,
            data: vec![pixel; width * height],
        }
    }

    /// Wrap an existing pixel vector, checking the length invariant.
    pub fn from_pixels(width: usize, height: usize, data: Vec<Rgb>) -> Result<Self> {
        if width.checked_mul(height) != Some(data.len()) {
            return Err(ContourError::malformed_image(format!(
                "pixel count {} does not match {}x{}",
                data.len(),
                width,
                height
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Get the pixel at `(x, y)`. Callers stay in bounds.
    pub fn pixel(&self, x: usize, y: usize) -> Rgb {
        self.data[y * self.width + x]
    }

    /// Set the pixel at `(x, y)`. Callers stay in bounds.
    pub fn set_pixel(&mut self, x: usize, y: usize, pixel: Rgb) {
        self.data[y * self.width + x] = pixel;
    }

    /// One full pixel row.
    pub fn row(&self, y: usize) -> &[Rgb] {
        &self.data[y * self.width..(y + 1) * self.width]
    }

    /// The whole raster as a flat slice.
    pub fn pixels(&self) -> &[Rgb] {
        &self.data
    }

    /// The whole raster as a flat mutable slice.
    pub fn pixels_mut(&mut self) -> &mut [Rgb] {
        &mut self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brightness_integer_division() {
        assert_eq!(Rgb::new(10, 10, 11).brightness(), 10);
        assert_eq!(Rgb::new(255, 255, 255).brightness(), 255);
        assert_eq!(Rgb::new(0, 0, 2).brightness(), 0);
        // Sum is widened before dividing, so bright pixels do not wrap.
        assert_eq!(Rgb::new(255, 200, 100).brightness(), 185);
    }

    #[test]
    fn test_from_pixels_checks_length() {
        let pixels = vec![Rgb::BLACK; 6];
        assert!(PixelBuffer::from_pixels(3, 2, pixels.clone()).is_ok());
        assert!(PixelBuffer::from_pixels(4, 2, pixels).is_err());
    }

    #[test]
    fn test_from_pixels_rejects_overflowing_dimensions() {
        // This product wraps to zero, which must not match the empty vec.
        assert!(PixelBuffer::from_pixels(usize::MAX / 2 + 1, 2, Vec::new()).is_err());
    }

    #[test]
    fn test_pixel_round_trip() {
        let mut buffer = PixelBuffer::new(4, 3);
        buffer.set_pixel(2, 1, Rgb::new(9, 8, 7));

        assert_eq!(buffer.pixel(2, 1), Rgb::new(9, 8, 7));
        assert_eq!(buffer.pixel(0, 0), Rgb::BLACK);
        assert_eq!(buffer.row(1)[2], Rgb::new(9, 8, 7));
    }

    #[test]
    fn test_filled() {
        let buffer = PixelBuffer::filled(2, 2, Rgb::WHITE);
        assert!(buffer.pixels().iter().all(|&p| p == Rgb::WHITE));
    }
}
