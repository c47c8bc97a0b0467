//! Cage layout.
//!
//! Partitions the canvas into one equal-width slot per challenge character.

/// One character's reserved region of the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CageSlot {
    pub index: usize,
    pub center_x: f32,
    pub center_y: f32,
    pub width: f32,
    pub height: f32,
}

/// Splits `[0, width)` into `n` contiguous equal-width cages spanning the
/// full canvas height.
#[must_use]
pub fn compute(width: u32, height: u32, n: usize) -> Vec<CageSlot> {
    debug_assert!(n >= 1, "cage layout requires at least one slot");
    let cage_width = width as f32 / n as f32;
    let center_y = height as f32 / 2.0;
    (0..n)
        .map(|index| CageSlot {
            index,
            center_x: (index as f32 + 0.5) * cage_width,
            center_y,
            width: cage_width,
            height: height as f32,
        })
        .collect()
}
