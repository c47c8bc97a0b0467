//! TrueType font backend.
//!
//! Wraps an `ab_glyph` outline font supplied by the caller as raw bytes or a
//! file path. Which files exist and which to load is the caller's concern.

use std::path::Path;

use ab_glyph::{Font, FontArc, PxScale, point};

use crate::font::registry::{GlyphMetrics, GlyphRaster, Typeface};

/// A caller-supplied outline font.
pub struct TrueTypeFont {
    name: String,
    font: FontArc,
}

impl TrueTypeFont {
    /// Parses a font from raw TTF/OTF bytes.
    ///
    /// # Errors
    ///
    /// Returns the `ab_glyph` message when the bytes are not a valid font.
    pub fn from_bytes(name: impl Into<String>, bytes: Vec<u8>) -> Result<Self, String> {
        let font = FontArc::try_from_vec(bytes).map_err(|e| e.to_string())?;
        Ok(Self {
            name: name.into(),
            font,
        })
    }

    /// Reads and parses a font file.
    ///
    /// # Errors
    ///
    /// Returns a message when the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let path = path.as_ref();
        let name = path
            .file_stem()
            .map_or_else(|| "truetype".to_string(), |s| s.to_string_lossy().into_owned());
        let bytes = std::fs::read(path).map_err(|e| e.to_string())?;
        Self::from_bytes(name, bytes)
    }

    fn outline(&self, ch: char, size: u32) -> Option<ab_glyph::OutlinedGlyph> {
        let id = self.font.glyph_id(ch);
        if id.0 == 0 {
            return None;
        }
        let glyph = id.with_scale_and_position(PxScale::from(size as f32), point(0.0, 0.0));
        self.font.outline_glyph(glyph)
    }
}

impl Typeface for TrueTypeFont {
    fn name(&self) -> &str {
        &self.name
    }

    fn metrics(&self, ch: char, size: u32) -> Option<GlyphMetrics> {
        let bounds = self.outline(ch, size)?.px_bounds();
        Some(GlyphMetrics {
            x0: bounds.min.x,
            y0: bounds.min.y,
            x1: bounds.max.x,
            y1: bounds.max.y,
        })
    }

    fn rasterize(&self, ch: char, size: u32) -> Option<GlyphRaster> {
        let outlined = self.outline(ch, size)?;
        let bounds = outlined.px_bounds();
        let width = bounds.width().ceil() as u32;
        let height = bounds.height().ceil() as u32;
        if width == 0 || height == 0 {
            return None;
        }
        let mut coverage = vec![0.0; (width * height) as usize];
        outlined.draw(|x, y, c| {
            if x < width && y < height {
                coverage[(y * width + x) as usize] = c;
            }
        });
        Some(GlyphRaster {
            left: bounds.min.x,
            top: bounds.min.y,
            width,
            height,
            coverage,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_invalid_font_bytes() {
        let result = TrueTypeFont::from_bytes("bogus", vec![0, 1, 2, 3]);
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(TrueTypeFont::from_file("/nonexistent/font.ttf").is_err());
    }
}
