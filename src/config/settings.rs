//! Rendering settings.
//!
//! Defines the main `Config` struct and environment variable loading logic.

use std::env;

use crate::render::canvas::Color;

/// Maximum value for `noise_level` and `distortion_amplitude`.
pub const LEVEL_MAX: u8 = 10;

fn get_env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn get_env_bool_or(key: &str, default: bool) -> bool {
    env::var(key)
        .map(|v| v.to_lowercase() == "true" || v == "1")
        .unwrap_or(default)
}

fn get_env_u32_or(key: &str, default: u32) -> u32 {
    env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

fn get_env_u8_or(key: &str, default: u8) -> u8 {
    env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

/// Parses an `"r,g,b"` triple.
///
/// # Panics
///
/// Panics if the string is not three comma-separated u8 values.
pub(crate) fn parse_color(s: &str) -> Color {
    let parts: Vec<u8> = s
        .split(',')
        .map(|p| {
            p.trim()
                .parse()
                .unwrap_or_else(|_| panic!("{s:?} must be an r,g,b color triple"))
        })
        .collect();
    assert!(parts.len() == 3, "{s:?} must be an r,g,b color triple");
    Color::new(parts[0], parts[1], parts[2])
}

fn get_env_color_or(key: &str, default: Color) -> Color {
    env::var(key).map(|s| parse_color(&s)).unwrap_or(default)
}

/// Rendering configuration.
///
/// Immutable input to a generation call; never mutated by the pipeline.
#[derive(Debug, Clone)]
pub struct Config {
    /// Glyph pixel size. Must be positive for a usable canvas.
    pub font_size: u32,
    /// Base glyph color.
    pub foreground: Color,
    /// Canvas fill and distortion edge color.
    pub background: Color,
    /// Per-channel spread applied to the foreground color (0 = fixed color).
    pub foreground_randomness: u8,
    /// Whether to scatter single-pixel noise.
    pub dot_noise: bool,
    /// Whether to draw noise line segments.
    pub line_noise: bool,
    /// Noise density, 0-10.
    pub noise_level: u8,
    /// Sinusoidal warp strength, 0-10. 0 disables distortion.
    pub distortion_amplitude: u8,
    /// Bilinear resampling for the warp (nearest-neighbor otherwise).
    pub bilinear: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            font_size: 28,
            foreground: Color::new(230, 230, 230),
            background: Color::new(26, 30, 35),
            foreground_randomness: 64,
            dot_noise: true,
            line_noise: true,
            noise_level: 3,
            distortion_amplitude: 6,
            bilinear: true,
        }
    }
}

impl Config {
    /// Loads configuration from `CAPTCHA_*` environment variables, falling
    /// back to defaults for anything unset. Levels above 10 are clamped.
    ///
    /// # Panics
    ///
    /// Panics if `CAPTCHA_FOREGROUND` or `CAPTCHA_BACKGROUND` is set but is
    /// not a valid `"r,g,b"` triple.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            font_size: get_env_u32_or("CAPTCHA_FONT_SIZE", defaults.font_size),
            foreground: get_env_color_or("CAPTCHA_FOREGROUND", defaults.foreground),
            background: get_env_color_or("CAPTCHA_BACKGROUND", defaults.background),
            foreground_randomness: get_env_u8_or(
                "CAPTCHA_FOREGROUND_RANDOMNESS",
                defaults.foreground_randomness,
            ),
            dot_noise: get_env_bool_or("CAPTCHA_DOT_NOISE", defaults.dot_noise),
            line_noise: get_env_bool_or("CAPTCHA_LINE_NOISE", defaults.line_noise),
            noise_level: get_env_u8_or("CAPTCHA_NOISE_LEVEL", defaults.noise_level).min(LEVEL_MAX),
            distortion_amplitude: get_env_u8_or("CAPTCHA_DISTORTION", defaults.distortion_amplitude)
                .min(LEVEL_MAX),
            bilinear: get_env_bool_or("CAPTCHA_BILINEAR", defaults.bilinear),
        }
    }

    /// Output format hint for log bootstrap, read directly from `LOG_FORMAT`.
    #[must_use]
    pub fn log_format() -> String {
        get_env_or("LOG_FORMAT", "json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_within_level_bounds() {
        let config = Config::default();
        assert!(config.font_size > 0);
        assert!(config.noise_level <= LEVEL_MAX);
        assert!(config.distortion_amplitude <= LEVEL_MAX);
    }

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_color("12, 34,56"), Color::new(12, 34, 56));
        assert_eq!(parse_color("0,0,255"), Color::new(0, 0, 255));
    }

    #[test]
    #[should_panic(expected = "r,g,b color triple")]
    fn test_parse_color_rejects_malformed() {
        parse_color("12,34");
    }
}
