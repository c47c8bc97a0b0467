//! Test utilities and shared configuration.
//!
//! This module provides common helpers for unit and integration tests,
//! reducing duplication across the codebase.

#[cfg(any(test, feature = "testing"))]
use rand::SeedableRng;
#[cfg(any(test, feature = "testing"))]
use rand_chacha::ChaCha8Rng;

#[cfg(any(test, feature = "testing"))]
use crate::config::Config;
#[cfg(any(test, feature = "testing"))]
use crate::font::FontRegistry;
#[cfg(any(test, feature = "testing"))]
use crate::render::canvas::Color;

/// Creates a standard configuration for testing purposes.
///
/// This configuration has:
/// - A builtin-friendly font size (20 -> 2x upscale)
/// - A fixed foreground color (no randomization)
/// - Noise and distortion disabled
#[cfg(any(test, feature = "testing"))]
#[must_use]
pub fn create_test_config() -> Config {
    Config {
        font_size: 20,
        foreground: Color::new(230, 230, 230),
        background: Color::new(26, 30, 35),
        foreground_randomness: 0,
        dot_noise: false,
        line_noise: false,
        noise_level: 0,
        distortion_amplitude: 0,
        bilinear: false,
    }
}

/// A reproducible RNG stream for deterministic rendering tests.
#[cfg(any(test, feature = "testing"))]
#[must_use]
pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// A registry containing only the builtin bitmap font.
#[cfg(any(test, feature = "testing"))]
#[must_use]
pub fn builtin_registry() -> FontRegistry {
    FontRegistry::builtin()
}
