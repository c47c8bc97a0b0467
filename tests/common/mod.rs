use glyphcage::{CaptchaGenerator, Color, Config, FontRegistry};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

pub const FOREGROUND: Color = Color::new(230, 230, 230);
pub const BACKGROUND: Color = Color::new(26, 30, 35);

pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Quiet baseline: fixed foreground, no noise, no distortion, builtin font
/// at a size that upscales the bitmap face cleanly.
pub fn create_test_config() -> Config {
    Config {
        font_size: 20,
        foreground: FOREGROUND,
        background: BACKGROUND,
        foreground_randomness: 0,
        dot_noise: false,
        line_noise: false,
        noise_level: 0,
        distortion_amplitude: 0,
        bilinear: false,
    }
}

pub fn create_generator(config: Config) -> CaptchaGenerator {
    CaptchaGenerator::new(config, FontRegistry::builtin())
}
