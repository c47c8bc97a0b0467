//! Font registry and glyph drawing.
//!
//! Holds the enumerable set of fonts a generation call may pick from and
//! implements the rotated glyph blit shared by every font backend.

use crate::config::{CaptchaError, Result};
use crate::render::canvas::{Color, PixelBuffer};

/// Coverage cutoff above which a glyph cell is painted solid.
const INK_THRESHOLD: f32 = 0.5;

/// Glyph bounding box relative to the draw origin, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphMetrics {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

/// An axis-aligned coverage grid for one glyph, anchored at the bounding
/// box origin `(left, top)` relative to the draw origin.
#[derive(Debug, Clone)]
pub struct GlyphRaster {
    pub left: f32,
    pub top: f32,
    pub width: u32,
    pub height: u32,
    pub coverage: Vec<f32>,
}

impl GlyphRaster {
    #[inline]
    fn covered(&self, x: u32, y: u32) -> bool {
        self.coverage[(y * self.width + x) as usize] >= INK_THRESHOLD
    }
}

/// A single font backend: metrics and rasterization per (character, size).
///
/// `None` from either method means the font cannot render the character;
/// the registry surfaces that as `GlyphUnavailable`.
pub trait Typeface: Send + Sync {
    fn name(&self) -> &str;

    fn metrics(&self, ch: char, size: u32) -> Option<GlyphMetrics>;

    fn rasterize(&self, ch: char, size: u32) -> Option<GlyphRaster>;
}

/// The enumerable font set available to one generator.
///
/// Never empty: constructing a registry without fonts falls back to the
/// built-in bitmap font.
pub struct FontRegistry {
    fonts: Vec<Box<dyn Typeface>>,
}

impl FontRegistry {
    /// Registry containing only the built-in bitmap font.
    #[must_use]
    pub fn builtin() -> Self {
        Self::new(Vec::new())
    }

    /// Registry over the given fonts, with the built-in fallback when the
    /// list is empty.
    #[must_use]
    pub fn new(mut fonts: Vec<Box<dyn Typeface>>) -> Self {
        if fonts.is_empty() {
            fonts.push(Box::new(crate::font::BuiltinFont));
        }
        Self { fonts }
    }

    pub fn push(&mut self, font: Box<dyn Typeface>) {
        self.fonts.push(font);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    /// Names of the registered fonts, in pick order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.fonts.iter().map(|f| f.name()).collect()
    }

    /// Glyph bounding box for `ch` in the font at `index`.
    ///
    /// # Errors
    ///
    /// `GlyphUnavailable` when the font has no usable glyph for `ch`.
    pub fn metrics(&self, index: usize, ch: char, size: u32) -> Result<GlyphMetrics> {
        let font = &self.fonts[index];
        font.metrics(ch, size).ok_or_else(|| CaptchaError::GlyphUnavailable {
            ch,
            font: font.name().to_string(),
        })
    }

    /// Draws `ch` at draw origin `(x, y)` rotated by `angle_deg`
    /// (counter-clockwise, y-down) in solid `color`.
    ///
    /// # Errors
    ///
    /// `GlyphUnavailable` when the font has no usable glyph for `ch`.
    #[allow(clippy::too_many_arguments)]
    pub fn draw(
        &self,
        index: usize,
        canvas: &mut PixelBuffer,
        ch: char,
        size: u32,
        x: f32,
        y: f32,
        angle_deg: i32,
        color: Color,
    ) -> Result<()> {
        let font = &self.fonts[index];
        let raster = font
            .rasterize(ch, size)
            .ok_or_else(|| CaptchaError::GlyphUnavailable {
                ch,
                font: font.name().to_string(),
            })?;
        blit_rotated(canvas, &raster, x, y, angle_deg, color);
        Ok(())
    }
}

/// Paints the covered cells of `raster` onto `canvas`, rotated about the
/// draw origin `(x, y)`.
///
/// Destination pixels inside the rotated footprint are mapped back into
/// glyph space through the inverse rotation and tested against the coverage
/// grid, so the blit leaves no seams at any angle.
fn blit_rotated(
    canvas: &mut PixelBuffer,
    raster: &GlyphRaster,
    x: f32,
    y: f32,
    angle_deg: i32,
    color: Color,
) {
    let (sin, cos) = (angle_deg as f32).to_radians().sin_cos();
    let (gw, gh) = (raster.width as f32, raster.height as f32);

    let corners = [
        (raster.left, raster.top),
        (raster.left + gw, raster.top),
        (raster.left, raster.top + gh),
        (raster.left + gw, raster.top + gh),
    ];
    let mut min_x = f32::INFINITY;
    let mut min_y = f32::INFINITY;
    let mut max_x = f32::NEG_INFINITY;
    let mut max_y = f32::NEG_INFINITY;
    for (cx, cy) in corners {
        let fx = x + cos * cx + sin * cy;
        let fy = y - sin * cx + cos * cy;
        min_x = min_x.min(fx);
        min_y = min_y.min(fy);
        max_x = max_x.max(fx);
        max_y = max_y.max(fy);
    }

    let x0 = min_x.floor().max(0.0) as u32;
    let y0 = min_y.floor().max(0.0) as u32;
    let x1 = (max_x.ceil().max(0.0) as u32).min(canvas.width());
    let y1 = (max_y.ceil().max(0.0) as u32).min(canvas.height());

    for dy in y0..y1 {
        for dx in x0..x1 {
            let px = dx as f32 + 0.5 - x;
            let py = dy as f32 + 0.5 - y;
            let gx = cos * px - sin * py - raster.left;
            let gy = sin * px + cos * py - raster.top;
            if gx < 0.0 || gy < 0.0 {
                continue;
            }
            let (u, v) = (gx as u32, gy as u32);
            if u < raster.width && v < raster.height && raster.covered(u, v) {
                canvas.set(dx, dy, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BG: Color = Color::new(0, 0, 0);
    const INK: Color = Color::new(250, 250, 250);

    fn square_raster(side: u32) -> GlyphRaster {
        GlyphRaster {
            left: 0.0,
            top: 0.0,
            width: side,
            height: side,
            coverage: vec![1.0; (side * side) as usize],
        }
    }

    #[test]
    fn test_builtin_registry_is_never_empty() {
        let registry = FontRegistry::builtin();
        assert_eq!(registry.len(), 1);
        assert!(!registry.is_empty());
        assert_eq!(registry.names(), vec!["builtin"]);
    }

    #[test]
    fn test_metrics_error_carries_font_name() {
        let registry = FontRegistry::builtin();
        let err = registry.metrics(0, '€', 16).unwrap_err();
        assert!(matches!(
            err,
            CaptchaError::GlyphUnavailable { ch: '€', .. }
        ));
    }

    #[test]
    fn test_unrotated_blit_fills_exact_footprint() {
        let mut canvas = PixelBuffer::new(20, 20, BG);
        blit_rotated(&mut canvas, &square_raster(4), 3.0, 5.0, 0, INK);
        for y in 0..20 {
            for x in 0..20 {
                let inside = (3..7).contains(&x) && (5..9).contains(&y);
                assert_eq!(canvas.get(x, y) == INK, inside, "pixel ({x},{y})");
            }
        }
    }

    #[test]
    fn test_rotated_blit_preserves_ink_area_roughly() {
        let mut canvas = PixelBuffer::new(30, 30, BG);
        blit_rotated(&mut canvas, &square_raster(8), 11.0, 11.0, 10, INK);
        let ink = canvas.count(INK);
        // rotation must neither drop the glyph nor smear it over the canvas
        assert!(ink >= 50, "ink area {ink}");
        assert!(ink <= 80, "ink area {ink}");
    }

    #[test]
    fn test_blit_clips_at_canvas_edges() {
        let mut canvas = PixelBuffer::new(6, 6, BG);
        blit_rotated(&mut canvas, &square_raster(4), -2.0, -2.0, 0, INK);
        blit_rotated(&mut canvas, &square_raster(4), 4.0, 4.0, 7, INK);
        // no panic, and some ink landed from each corner blit
        assert!(canvas.get(0, 0) == INK);
        assert!(canvas.count(INK) > 4);
    }
}
