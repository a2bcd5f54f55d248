//! Binary PPM (P6) encoding and decoding.
//!
//! Only the 8-bit form is supported (maxval 255). Header tokens are
//! whitespace separated and `#` comments may appear anywhere in the header.

use crate::buffer::{PixelBuffer, Rgb};
use crate::error::{ContourError, Result};
use std::path::Path;

struct Header {
    width: usize,
    height: usize,
    maxval: usize,
    data_start: usize,
}

fn skip_filler(bytes: &[u8], pos: &mut usize) {
    loop {
        while *pos < bytes.len() && bytes[*pos].is_ascii_whitespace() {
            *pos += 1;
        }
        if *pos < bytes.len() && bytes[*pos] == b'#' {
            while *pos < bytes.len() && bytes[*pos] != b'\n' {
                *pos += 1;
            }
        } else {
            return;
        }
    }
}

fn next_token<'a>(bytes: &'a [u8], pos: &mut usize) -> Option<&'a [u8]> {
    skip_filler(bytes, pos);
    if *pos >= bytes.len() {
        return None;
    }

    let start = *pos;
    while *pos < bytes.len() && !bytes[*pos].is_ascii_whitespace() && bytes[*pos] != b'#' {
        *pos += 1;
    }
    Some(&bytes[start..*pos])
}

fn next_number(bytes: &[u8], pos: &mut usize, field: &str) -> Result<usize> {
    let token = next_token(bytes, pos)
        .ok_or_else(|| ContourError::malformed_image(format!("missing {}", field)))?;

    std::str::from_utf8(token)
        .ok()
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| {
            ContourError::malformed_image(format!(
                "invalid {}: {:?}",
                field,
                String::from_utf8_lossy(token)
            ))
        })
}

fn parse_header(bytes: &[u8]) -> Result<Header> {
    let mut pos = 0;

    let magic = next_token(bytes, &mut pos)
        .ok_or_else(|| ContourError::malformed_image("empty file"))?;
    if magic != b"P6" {
        return Err(ContourError::malformed_image(format!(
            "expected P6 magic, found {:?}",
            String::from_utf8_lossy(magic)
        )));
    }

    let width = next_number(bytes, &mut pos, "width")?;
    let height = next_number(bytes, &mut pos, "height")?;
    let maxval = next_number(bytes, &mut pos, "maxval")?;

    // Exactly one whitespace byte separates the header from the payload.
    match bytes.get(pos) {
        Some(b) if b.is_ascii_whitespace() => pos += 1,
        _ => {
            return Err(ContourError::malformed_image(
                "missing separator after maxval",
            ))
        }
    }

    Ok(Header {
        width,
        height,
        maxval,
        data_start: pos,
    })
}

/// Decode a P6 image from raw file bytes.
pub fn decode_ppm(bytes: &[u8]) -> Result<PixelBuffer> {
    let header = parse_header(bytes)?;

    if header.maxval != 255 {
        return Err(ContourError::malformed_image(format!(
            "unsupported maxval {}, only 255 is handled",
            header.maxval
        )));
    }

    if header.width == 0 || header.height == 0 {
        return Err(ContourError::malformed_image(format!(
            "degenerate dimensions {}x{}",
            header.width, header.height
        )));
    }

    let expected = header
        .width
        .checked_mul(header.height)
        .and_then(|n| n.checked_mul(3))
        .ok_or_else(|| {
            ContourError::malformed_image(format!(
                "dimensions {}x{} overflow the payload size",
                header.width, header.height
            ))
        })?;
    let payload = &bytes[header.data_start..];
    if payload.len() < expected {
        return Err(ContourError::malformed_image(format!(
            "truncated pixel data: expected {} bytes, found {}",
            expected,
            payload.len()
        )));
    }

    let data = payload[..expected]
        .chunks_exact(3)
        .map(|c| Rgb::new(c[0], c[1], c[2]))
        .collect();

    PixelBuffer::from_pixels(header.width, header.height, data)
}

/// Encode an image as P6 bytes.
pub fn encode_ppm(image: &PixelBuffer) -> Vec<u8> {
    let mut out = Vec::with_capacity(32 + image.pixels().len() * 3);
    out.extend_from_slice(format!("P6\n{} {}\n255\n", image.width(), image.height()).as_bytes());

    for pixel in image.pixels() {
        out.push(pixel.r);
        out.push(pixel.g);
        out.push(pixel.b);
    }
    out
}

/// Read a P6 image from disk.
pub fn read_ppm(path: impl AsRef<Path>) -> Result<PixelBuffer> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)
        .map_err(|e| ContourError::image_read(format!("{}: {}", path.display(), e)))?;

    decode_ppm(&bytes).map_err(|e| prefix_path(e, path))
}

/// Write a P6 image to disk.
pub fn write_ppm(path: impl AsRef<Path>, image: &PixelBuffer) -> Result<()> {
    let path = path.as_ref();
    std::fs::write(path, encode_ppm(image))
        .map_err(|e| ContourError::image_write(format!("{}: {}", path.display(), e)))
}

fn prefix_path(err: ContourError, path: &Path) -> ContourError {
    match err {
        ContourError::MalformedImage(msg) => {
            ContourError::malformed_image(format!("{}: {}", path.display(), msg))
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let mut image = PixelBuffer::new(3, 2);
        image.set_pixel(0, 0, Rgb::new(1, 2, 3));
        image.set_pixel(2, 1, Rgb::new(250, 251, 252));

        let decoded = decode_ppm(&encode_ppm(&image)).unwrap();
        assert_eq!(decoded, image);
    }

    #[test]
    fn test_header_comments_are_skipped() {
        let mut bytes = b"P6 # created by hand\n# another comment\n2 1\n# and one more\n255\n".to_vec();
        bytes.extend_from_slice(&[10, 20, 30, 40, 50, 60]);

        let image = decode_ppm(&bytes).unwrap();
        assert_eq!(image.width(), 2);
        assert_eq!(image.height(), 1);
        assert_eq!(image.pixel(0, 0), Rgb::new(10, 20, 30));
        assert_eq!(image.pixel(1, 0), Rgb::new(40, 50, 60));
    }

    #[test]
    fn test_rejects_bad_magic() {
        let mut bytes = b"P5\n2 1\n255\n".to_vec();
        bytes.extend_from_slice(&[0; 6]);
        assert!(decode_ppm(&bytes).is_err());
    }

    #[test]
    fn test_rejects_unsupported_maxval() {
        let mut bytes = b"P6\n2 1\n65535\n".to_vec();
        bytes.extend_from_slice(&[0; 12]);
        assert!(decode_ppm(&bytes).is_err());
    }

    #[test]
    fn test_rejects_truncated_payload() {
        let mut bytes = b"P6\n2 2\n255\n".to_vec();
        bytes.extend_from_slice(&[0; 11]);

        let err = decode_ppm(&bytes).unwrap_err();
        assert!(err.to_string().contains("truncated"));
    }

    #[test]
    fn test_rejects_overflowing_dimensions() {
        let mut bytes = b"P6\n4000000000 4000000000\n255\n".to_vec();
        bytes.extend_from_slice(&[0; 12]);

        let err = decode_ppm(&bytes).unwrap_err();
        assert!(err.to_string().contains("overflow"));
    }

    #[test]
    fn test_rejects_zero_dimension() {
        let bytes = b"P6\n0 4\n255\n".to_vec();
        assert!(decode_ppm(&bytes).is_err());
    }

    #[test]
    fn test_trailing_bytes_are_ignored() {
        let mut bytes = b"P6\n1 1\n255\n".to_vec();
        bytes.extend_from_slice(&[7, 8, 9, 99, 99]);

        let image = decode_ppm(&bytes).unwrap();
        assert_eq!(image.pixel(0, 0), Rgb::new(7, 8, 9));
    }

    #[test]
    fn test_read_write_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.ppm");

        let image = PixelBuffer::filled(4, 3, Rgb::new(9, 9, 9));
        write_ppm(&path, &image).unwrap();

        let loaded = read_ppm(&path).unwrap();
        assert_eq!(loaded, image);
    }

    #[test]
    fn test_read_missing_file() {
        let err = read_ppm("/no/such/dir/image.ppm").unwrap_err();
        assert!(matches!(err, ContourError::ImageRead(_)));
    }
}
