//! CAPTCHA generation orchestrator.
//!
//! Runs the full pipeline for one challenge: canvas allocation, cage layout,
//! glyph placement and drawing, noise injection, and geometric distortion.

use rand::Rng;
use tracing::debug;

use crate::config::{CaptchaError, Config, Result};
use crate::font::FontRegistry;
use crate::render::canvas::PixelBuffer;
use crate::render::distort::{self, DistortionField};
use crate::render::{layout, noise, placer};

/// Colors available to the noise pass, regenerated each call.
const NOISE_PALETTE_LEN: usize = 20;

/// Canvas dimensions for a challenge of `glyphs` characters: one cage of
/// one-and-a-half font sizes per character, two font sizes tall.
fn canvas_size(glyphs: usize, font_size: u32) -> (u32, u32) {
    let cage = font_size + font_size / 2;
    (glyphs as u32 * cage, font_size * 2)
}

/// Renders challenge strings into pixel buffers.
///
/// Holds only immutable inputs, so one generator can serve concurrent
/// requests as long as each call brings its own RNG stream.
pub struct CaptchaGenerator {
    config: Config,
    fonts: FontRegistry,
}

impl CaptchaGenerator {
    #[must_use]
    pub fn new(config: Config, fonts: FontRegistry) -> Self {
        Self { config, fonts }
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Renders `challenge` into a fresh buffer.
    ///
    /// Deterministic given the RNG stream: the same seed, challenge, config,
    /// and fonts reproduce the image byte for byte. On error no buffer is
    /// returned; the pipeline never hands out partially drawn output.
    ///
    /// # Errors
    ///
    /// - `EmptyChallenge` for a zero-character challenge.
    /// - `InvalidDimensions` when the sizing policy yields a degenerate
    ///   canvas (zero `font_size`).
    /// - `GlyphUnavailable` when the picked font cannot render a character.
    pub fn generate(&self, challenge: &str, rng: &mut impl Rng) -> Result<PixelBuffer> {
        let glyphs = challenge.chars().count();
        if glyphs == 0 {
            return Err(CaptchaError::EmptyChallenge);
        }
        let (width, height) = canvas_size(glyphs, self.config.font_size);
        if width == 0 || height == 0 {
            return Err(CaptchaError::InvalidDimensions { width, height });
        }

        let mut canvas = PixelBuffer::new(width, height, self.config.background);
        let slots = layout::compute(width, height, glyphs);

        for (slot, ch) in slots.iter().zip(challenge.chars()) {
            let font = rng.random_range(0..self.fonts.len());
            let metrics = self.fonts.metrics(font, ch, self.config.font_size)?;
            let placement = placer::place(slot, &metrics, &self.config, font, rng);
            self.fonts.draw(
                placement.font,
                &mut canvas,
                ch,
                self.config.font_size,
                placement.x,
                placement.y,
                placement.rotation_deg,
                placement.color,
            )?;
        }

        if self.config.dot_noise || self.config.line_noise {
            let palette = noise::palette(NOISE_PALETTE_LEN, rng);
            if self.config.dot_noise {
                let dots = noise::add_dots(&mut canvas, &palette, self.config.noise_level, rng);
                debug!(dots, "dot noise injected");
            }
            if self.config.line_noise {
                let lines = noise::add_lines(&mut canvas, &palette, self.config.noise_level, rng);
                debug!(lines, "line noise injected");
            }
        }

        let canvas = match DistortionField::sample(
            self.config.font_size,
            self.config.distortion_amplitude,
            rng,
        ) {
            Some(field) => distort::distort(&canvas, &field, self.config.background, self.config.bilinear),
            None => canvas,
        };

        debug!(width, height, glyphs, "captcha rendered");
        Ok(canvas)
    }
}
