//! Glyph placement.
//!
//! Computes the final draw position, rotation, and color for each character
//! so that the rotated glyph stays centered in its cage with bounded jitter.

use rand::Rng;

use crate::config::Config;
use crate::font::GlyphMetrics;
use crate::render::canvas::Color;
use crate::render::layout::CageSlot;

/// Largest rotation applied to a glyph, in degrees either way.
pub const MAX_ROTATION_DEG: i32 = 10;

/// A resolved draw decision for one character.
#[derive(Debug, Clone, Copy)]
pub struct Placement {
    pub x: f32,
    pub y: f32,
    pub rotation_deg: i32,
    pub color: Color,
    pub font: usize,
}

/// Draw origin that centers the *rotated* glyph bounding box on the cage
/// center. Rotation is counter-clockwise in a y-down coordinate system.
fn anchor(slot: &CageSlot, metrics: &GlyphMetrics, angle_deg: i32) -> (f32, f32) {
    let (sin, cos) = (angle_deg as f32).to_radians().sin_cos();
    let bb_cx = (metrics.x0 + metrics.x1) / 2.0;
    let bb_cy = (metrics.y0 + metrics.y1) / 2.0;
    (
        slot.center_x - (cos * bb_cx + sin * bb_cy),
        slot.center_y - (-sin * bb_cx + cos * bb_cy),
    )
}

/// Translation room left in the cage once the rotated glyph footprint is
/// accounted for. Zero when the glyph fills or overflows the cage.
fn jitter_room(slot: &CageSlot, metrics: &GlyphMetrics, angle_deg: i32) -> (f32, f32) {
    let (sin, cos) = (angle_deg as f32).to_radians().sin_cos();
    let bb_w = metrics.x1 - metrics.x0;
    let bb_h = metrics.y1 - metrics.y0;
    let dev_x = ((slot.width - cos.abs() * bb_w - sin.abs() * bb_h) / 2.0).max(0.0);
    let dev_y = ((slot.height - cos.abs() * bb_h - sin.abs() * bb_w) / 2.0).max(0.0);
    (dev_x, dev_y)
}

fn jitter_channel(base: u8, spread: u8, rng: &mut impl Rng) -> u8 {
    rng.random_range(base.saturating_sub(spread)..=base.saturating_add(spread))
}

/// Foreground color for one glyph: the configured base, or each channel
/// drawn uniformly from `base ± spread` (saturating at the channel bounds).
fn pick_color(base: Color, spread: u8, rng: &mut impl Rng) -> Color {
    if spread == 0 {
        return base;
    }
    Color::new(
        jitter_channel(base.r, spread, rng),
        jitter_channel(base.g, spread, rng),
        jitter_channel(base.b, spread, rng),
    )
}

/// Resolves a placement for one character.
///
/// Draw order from the RNG is fixed: rotation angle, x jitter, y jitter,
/// color channels. Callers pick the font before calling so identical seeds
/// reproduce identical images.
pub fn place(
    slot: &CageSlot,
    metrics: &GlyphMetrics,
    config: &Config,
    font: usize,
    rng: &mut impl Rng,
) -> Placement {
    let rotation_deg = rng.random_range(-MAX_ROTATION_DEG..=MAX_ROTATION_DEG);
    let (mut x, mut y) = anchor(slot, metrics, rotation_deg);
    let (dev_x, dev_y) = jitter_room(slot, metrics, rotation_deg);
    if dev_x > 0.0 {
        x += rng.random_range(-dev_x..=dev_x);
    }
    if dev_y > 0.0 {
        y += rng.random_range(-dev_y..=dev_y);
    }
    let color = pick_color(config.foreground, config.foreground_randomness, rng);
    Placement {
        x,
        y,
        rotation_deg,
        color,
        font,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{create_test_config, seeded_rng};

    fn slot() -> CageSlot {
        CageSlot {
            index: 0,
            center_x: 15.0,
            center_y: 20.0,
            width: 30.0,
            height: 40.0,
        }
    }

    fn metrics() -> GlyphMetrics {
        GlyphMetrics {
            x0: 0.0,
            y0: 0.0,
            x1: 10.0,
            y1: 14.0,
        }
    }

    #[test]
    fn test_anchor_centers_unrotated_bbox() {
        let (x, y) = anchor(&slot(), &metrics(), 0);
        assert!((x - 10.0).abs() < 1e-4);
        assert!((y - 13.0).abs() < 1e-4);
    }

    #[test]
    fn test_jitter_room_shrinks_with_rotation() {
        let (dev_x0, dev_y0) = jitter_room(&slot(), &metrics(), 0);
        assert!((dev_x0 - 10.0).abs() < 1e-4);
        assert!((dev_y0 - 13.0).abs() < 1e-4);

        // a rotated footprint is wider, leaving less room
        let (dev_x10, _) = jitter_room(&slot(), &metrics(), 10);
        assert!(dev_x10 < dev_x0);
    }

    #[test]
    fn test_jitter_room_floors_at_zero() {
        let wide = GlyphMetrics {
            x0: 0.0,
            y0: 0.0,
            x1: 100.0,
            y1: 100.0,
        };
        let (dev_x, dev_y) = jitter_room(&slot(), &wide, 5);
        assert_eq!(dev_x, 0.0);
        assert_eq!(dev_y, 0.0);
    }

    #[test]
    fn test_zero_spread_keeps_configured_color() {
        let mut rng = seeded_rng(7);
        let base = Color::new(40, 80, 120);
        assert_eq!(pick_color(base, 0, &mut rng), base);
    }

    #[test]
    fn test_spread_stays_within_channel_range() {
        let mut rng = seeded_rng(7);
        let base = Color::new(10, 128, 250);
        for _ in 0..100 {
            let c = pick_color(base, 30, &mut rng);
            assert!(c.r <= 40);
            assert!((98..=158).contains(&c.g));
            assert!(c.b >= 220);
        }
    }

    #[test]
    fn test_placement_rotation_is_bounded() {
        let mut rng = seeded_rng(3);
        let config = create_test_config();
        for _ in 0..50 {
            let placement = place(&slot(), &metrics(), &config, 0, &mut rng);
            assert!(placement.rotation_deg.abs() <= MAX_ROTATION_DEG);
        }
    }

    #[test]
    fn test_placement_keeps_rotated_footprint_in_cage() {
        let mut rng = seeded_rng(11);
        let config = create_test_config();
        let slot = slot();
        let m = metrics();
        for _ in 0..200 {
            let p = place(&slot, &m, &config, 0, &mut rng);
            let (sin, cos) = (p.rotation_deg as f32).to_radians().sin_cos();
            let half_w = (cos.abs() * 10.0 + sin.abs() * 14.0) / 2.0;
            let bb_cx = 5.0;
            let bb_cy = 7.0;
            let center_x = p.x + cos * bb_cx + sin * bb_cy;
            assert!(center_x - half_w >= -1e-3);
            assert!(center_x + half_w <= slot.width + 1e-3);
        }
    }
}
