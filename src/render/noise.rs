//! Foreground noise.
//!
//! Scatters random dots and line segments over the canvas to break up
//! OCR-friendly glyph outlines. Densities are keyed to the configured noise
//! level; both kinds draw from a small per-call palette.

use rand::Rng;

use crate::config::LEVEL_MAX;
use crate::render::canvas::{Color, PixelBuffer};

fn dot_count(width: u32, height: u32, level: u8) -> usize {
    let level = u64::from(level.min(LEVEL_MAX));
    (u64::from(width) * u64::from(height) * level / 10) as usize
}

fn line_count(width: u32, height: u32, level: u8) -> usize {
    let level = u64::from(level.min(LEVEL_MAX));
    (u64::from(width) * u64::from(height) * level / 2000) as usize
}

/// Generates a palette of `len` uniformly random colors.
#[must_use]
pub fn palette(len: usize, rng: &mut impl Rng) -> Vec<Color> {
    (0..len)
        .map(|_| Color::new(rng.random(), rng.random(), rng.random()))
        .collect()
}

/// Scatters `floor(width * height * level / 10)` single pixels at uniform
/// coordinates. Collisions overwrite. Returns the number of dots drawn.
pub fn add_dots(
    buffer: &mut PixelBuffer,
    colors: &[Color],
    level: u8,
    rng: &mut impl Rng,
) -> usize {
    if colors.is_empty() {
        return 0;
    }
    let count = dot_count(buffer.width(), buffer.height(), level);
    for _ in 0..count {
        let x = rng.random_range(0..buffer.width());
        let y = rng.random_range(0..buffer.height());
        let color = colors[rng.random_range(0..colors.len())];
        buffer.set(x, y, color);
    }
    count
}

/// Draws `floor(width * height / 200 * level / 10)` segments between uniform
/// endpoint pairs. Returns the number of segments drawn.
pub fn add_lines(
    buffer: &mut PixelBuffer,
    colors: &[Color],
    level: u8,
    rng: &mut impl Rng,
) -> usize {
    if colors.is_empty() {
        return 0;
    }
    let count = line_count(buffer.width(), buffer.height(), level);
    for _ in 0..count {
        let from = (
            rng.random_range(0..buffer.width()),
            rng.random_range(0..buffer.height()),
        );
        let to = (
            rng.random_range(0..buffer.width()),
            rng.random_range(0..buffer.height()),
        );
        let color = colors[rng.random_range(0..colors.len())];
        draw_segment(buffer, from, to, color);
    }
    count
}

/// Bresenham segment between two in-bounds points.
fn draw_segment(buffer: &mut PixelBuffer, from: (u32, u32), to: (u32, u32), color: Color) {
    let (mut x, mut y) = (i64::from(from.0), i64::from(from.1));
    let (x1, y1) = (i64::from(to.0), i64::from(to.1));
    let dx = (x1 - x).abs();
    let dy = -(y1 - y).abs();
    let sx = if x < x1 { 1 } else { -1 };
    let sy = if y < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    loop {
        buffer.set(x as u32, y as u32, color);
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}
