//! `glyphcage` - CAPTCHA image synthesis engine.
//!
//! Copyright (C) 2026 Maverick
//! SPDX-License-Identifier: AGPL-3.0-only
//!
//! Demo binary: loads configuration, renders one challenge string, and
//! writes the result as a PNG file.

use glyphcage::{CaptchaGenerator, Config, FontRegistry, TrueTypeFont, Typeface, encode};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn load_fonts() -> FontRegistry {
    let mut fonts: Vec<Box<dyn Typeface>> = Vec::new();
    if let Ok(paths) = std::env::var("CAPTCHA_FONT_PATHS") {
        for path in paths.split(':').filter(|p| !p.is_empty()) {
            match TrueTypeFont::from_file(path) {
                Ok(font) => fonts.push(Box::new(font)),
                Err(e) => error!(path, error = %e, "Skipping font"),
            }
        }
    }
    FontRegistry::new(fonts)
}

fn main() {
    dotenvy::dotenv().ok();

    let (non_blocking, _guard) = tracing_appender::non_blocking(std::io::stdout());
    let log_format = Config::log_format();

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(non_blocking);

    if log_format.eq_ignore_ascii_case("pretty") {
        subscriber.init();
    } else {
        subscriber.json().init();
    }

    let mut args = std::env::args().skip(1);
    let Some(challenge) = args.next() else {
        eprintln!("usage: glyphcage TEXT [OUT.png]");
        std::process::exit(2);
    };
    let out_path = args.next().unwrap_or_else(|| "captcha.png".to_string());

    let config = Config::from_env();
    let fonts = load_fonts();
    let seed = std::env::var("CAPTCHA_SEED")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| rand::rng().random());
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    info!(
        font_size = config.font_size,
        fonts = ?fonts.names(),
        seed,
        log_format = %log_format,
        "Renderer initialized"
    );

    let generator = CaptchaGenerator::new(config, fonts);
    let buffer = match generator.generate(&challenge, &mut rng) {
        Ok(buffer) => buffer,
        Err(e) => {
            error!(error = %e, "Generation failed");
            std::process::exit(1);
        }
    };

    let png = match encode::to_png(&buffer) {
        Ok(png) => png,
        Err(e) => {
            error!(error = %e, "Encoding failed");
            std::process::exit(1);
        }
    };
    if let Err(e) = std::fs::write(&out_path, &png) {
        error!(path = %out_path, error = %e, "Write failed");
        std::process::exit(1);
    }

    info!(
        path = %out_path,
        width = buffer.width(),
        height = buffer.height(),
        bytes = png.len(),
        "Captcha written"
    );

    if std::env::var("CAPTCHA_DATA_URI").is_ok_and(|v| v == "true" || v == "1") {
        match encode::to_data_uri(&buffer) {
            Ok(uri) => println!("{uri}"),
            Err(e) => error!(error = %e, "Data URI encoding failed"),
        }
    }
}
