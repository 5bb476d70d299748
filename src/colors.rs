//! Traffic-light colors and their dimmed variants.
//!
//! A phase that is not active is shown dimmed rather than dark, the same way
//! a real signal head keeps its unlit lenses faintly visible.

use palette::{Mix, Srgb};

/// Lit green.
pub const GREEN: Srgb = Srgb::new(0.0, 1.0, 0.0);

/// Lit yellow (amber).
pub const YELLOW: Srgb = Srgb::new(1.0, 0.75, 0.0);

/// Lit red.
pub const RED: Srgb = Srgb::new(1.0, 0.0, 0.0);

/// Fully off.
pub const OFF: Srgb = Srgb::new(0.0, 0.0, 0.0);

/// Default brightness of an inactive lamp.
pub const DEFAULT_DIM_LEVEL: f32 = 0.1;

/// Returns `color` scaled towards black, `level` being the remaining brightness (0.0-1.0).
#[inline]
pub fn dimmed(color: Srgb, level: f32) -> Srgb {
    OFF.mix(color, level.clamp(0.0, 1.0))
}
