//! Image synthesis pipeline.
//!
//! Contains the canvas primitives, glyph layout and placement, noise
//! injection, geometric distortion, and the generation orchestrator.

pub mod canvas;
pub mod distort;
pub mod generator;
pub mod layout;
pub mod noise;
pub mod placer;

pub use canvas::{Color, PixelBuffer};
pub use distort::DistortionField;
pub use generator::CaptchaGenerator;
pub use layout::CageSlot;
pub use placer::Placement;
