//! Geometric distortion.
//!
//! Applies a sinusoidal coordinate warp over the whole canvas via inverse
//! resampling: every destination pixel looks up where it came from in the
//! source buffer, so the pass never reads its own output.

use std::f32::consts::TAU;

use rand::Rng;

use crate::config::LEVEL_MAX;
use crate::render::canvas::{Color, PixelBuffer};

/// Per-call warp parameters.
///
/// The displacement of destination pixel `(x, y)` is a vector of length
/// `amplitude * sin(x * freq_xr + y * freq_yr)` pointing along the angle
/// `x * freq_xt + y * freq_yt`.
#[derive(Debug, Clone, Copy)]
pub struct DistortionField {
    pub amplitude: f32,
    pub freq_xr: f32,
    pub freq_yr: f32,
    pub freq_xt: f32,
    pub freq_yt: f32,
}

fn sample_freq(font_size: u32, rng: &mut impl Rng) -> f32 {
    let wavelength = (2.0 + 3.0 * rng.random::<f32>()) * font_size as f32;
    TAU / wavelength
}

impl DistortionField {
    /// Samples a warp field, or `None` when the configured level is too weak
    /// to matter (`effective amplitude <= 1`). `None` means the caller keeps
    /// the undistorted buffer unchanged; the wavelengths are only drawn once
    /// the field is known to apply.
    pub fn sample(font_size: u32, level: u8, rng: &mut impl Rng) -> Option<Self> {
        let level = level.min(LEVEL_MAX);
        let amplitude = 0.25 * font_size as f32 * f32::from(level) / 10.0;
        if amplitude <= 1.0 {
            return None;
        }
        let freq_xr = sample_freq(font_size, rng);
        let freq_yr = sample_freq(font_size, rng);
        let freq_xt = sample_freq(font_size, rng);
        let freq_yt = sample_freq(font_size, rng);
        Some(Self {
            amplitude,
            freq_xr,
            freq_yr,
            freq_xt,
            freq_yt,
        })
    }
}

/// Bilinear blend of the four source pixels around `(sx, sy)`, truncated
/// per channel. The caller guarantees `floor(sx) + 1` and `floor(sy) + 1`
/// are in range.
fn bilinear_sample(src: &PixelBuffer, sx: f32, sy: f32) -> Color {
    let x0 = sx.floor() as u32;
    let y0 = sy.floor() as u32;
    let u = sx - sx.floor();
    let v = sy - sy.floor();
    let c00 = src.get(x0, y0);
    let c10 = src.get(x0 + 1, y0);
    let c01 = src.get(x0, y0 + 1);
    let c11 = src.get(x0 + 1, y0 + 1);
    let blend = |c00: u8, c10: u8, c01: u8, c11: u8| {
        let top = (1.0 - u) * f32::from(c00) + u * f32::from(c10);
        let bottom = (1.0 - u) * f32::from(c01) + u * f32::from(c11);
        ((1.0 - v) * top + v * bottom) as u8
    };
    Color::new(
        blend(c00.r, c10.r, c01.r, c11.r),
        blend(c00.g, c10.g, c01.g, c11.g),
        blend(c00.b, c10.b, c01.b, c11.b),
    )
}

/// Resamples `src` through the warp field into a new buffer of identical
/// dimensions. Sample points outside `[0, width-1) x [0, height-1)` produce
/// the background color; the one-pixel margin keeps the bilinear lookups of
/// interior samples inside the source.
#[must_use]
pub fn distort(
    src: &PixelBuffer,
    field: &DistortionField,
    background: Color,
    bilinear: bool,
) -> PixelBuffer {
    let (width, height) = (src.width(), src.height());
    let mut out = PixelBuffer::new(width, height, background);
    let max_x = (width - 1) as f32;
    let max_y = (height - 1) as f32;
    for y in 0..height {
        for x in 0..width {
            let (xf, yf) = (x as f32, y as f32);
            let r = field.amplitude * (xf * field.freq_xr + yf * field.freq_yr).sin();
            let theta = xf * field.freq_xt + yf * field.freq_yt;
            let sx = xf + r * theta.cos();
            let sy = yf + r * theta.sin();
            let (fx, fy) = (sx.floor(), sy.floor());
            if fx < 0.0 || fy < 0.0 || fx >= max_x || fy >= max_y {
                continue;
            }
            let pixel = if bilinear {
                bilinear_sample(src, sx, sy)
            } else {
                src.get(fx as u32, fy as u32)
            };
            out.set(x, y, pixel);
        }
    }
    out
}
