//! Error types and result aliases.
//!
//! Defines the core `CaptchaError` enumeration and common `Result` type.

use thiserror::Error;

/// Rendering errors.
///
/// The generation pipeline is deterministic given its inputs, so none of
/// these are retryable: the caller either fixes the input or maps the error
/// to a generic failure response.
#[derive(Debug, Error)]
pub enum CaptchaError {
    /// Challenge string has zero characters.
    #[error("challenge string is empty")]
    EmptyChallenge,

    /// Computed canvas dimensions are unusable.
    #[error("invalid canvas dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// A font cannot produce metrics or a raster for a required character.
    #[error("glyph {ch:?} unavailable in font {font:?}")]
    GlyphUnavailable { ch: char, font: String },

    /// Image encoding failed.
    #[error("image encode failed: {0}")]
    Encode(String),
}

/// Result type alias for `CaptchaError`.
pub type Result<T> = std::result::Result<T, CaptchaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            CaptchaError::EmptyChallenge.to_string(),
            "challenge string is empty"
        );
        assert_eq!(
            CaptchaError::InvalidDimensions {
                width: 0,
                height: 40
            }
            .to_string(),
            "invalid canvas dimensions: 0x40"
        );
        let err = CaptchaError::GlyphUnavailable {
            ch: '€',
            font: "builtin".to_string(),
        };
        assert!(err.to_string().contains("builtin"));
    }
}
