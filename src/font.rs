//! Font capability.
//!
//! Abstracts glyph metrics and rasterization behind the `Typeface` trait so
//! the pipeline can mix caller-supplied TrueType fonts with the built-in
//! bitmap fallback. Font file discovery stays outside this crate.

pub mod builtin;
pub mod registry;
pub mod truetype;

pub use builtin::BuiltinFont;
pub use registry::{FontRegistry, GlyphMetrics, GlyphRaster, Typeface};
pub use truetype::TrueTypeFont;
