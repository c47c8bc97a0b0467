//! Image encoding glue.
//!
//! Packages a finished pixel buffer as PNG bytes or a data URI for whatever
//! transport layer sits above this crate. Not part of the synthesis core.

use base64::{Engine, engine::general_purpose::STANDARD};
use image::{ImageFormat, Rgb, RgbImage};

use crate::config::{CaptchaError, Result};
use crate::render::canvas::PixelBuffer;

/// Encodes the buffer as PNG bytes.
///
/// # Errors
///
/// `CaptchaError::Encode` when the PNG encoder fails.
pub fn to_png(buffer: &PixelBuffer) -> Result<Vec<u8>> {
    let img = RgbImage::from_fn(buffer.width(), buffer.height(), |x, y| {
        let c = buffer.get(x, y);
        Rgb([c.r, c.g, c.b])
    });
    let mut bytes = Vec::new();
    img.write_to(&mut std::io::Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(|e| CaptchaError::Encode(e.to_string()))?;
    Ok(bytes)
}

/// Encodes the buffer as a `data:image/png;base64,` URI.
///
/// # Errors
///
/// `CaptchaError::Encode` when the PNG encoder fails.
pub fn to_data_uri(buffer: &PixelBuffer) -> Result<String> {
    Ok(format!(
        "data:image/png;base64,{}",
        STANDARD.encode(to_png(buffer)?)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::canvas::Color;

    #[test]
    fn test_png_magic_bytes() {
        let buffer = PixelBuffer::new(16, 8, Color::new(12, 34, 56));
        let png = to_png(&buffer).unwrap();
        assert_eq!(&png[..8], &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]);
    }

    #[test]
    fn test_data_uri_prefix() {
        let buffer = PixelBuffer::new(4, 4, Color::new(0, 0, 0));
        let uri = to_data_uri(&buffer).unwrap();
        assert!(uri.starts_with("data:image/png;base64,"));
        assert!(uri.len() > "data:image/png;base64,".len());
    }
}
