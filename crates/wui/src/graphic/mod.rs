//! Drawing-surface capability consumed by controls
//!
//! The core never rasterizes anything itself: controls describe what to
//! paint through the [`Graphic`] trait and the platform backend decides how.

mod color;
mod recording;

pub use color::{Color, Font};
pub use recording::{DrawOp, RecordingGraphic};

use crate::math::Rect;

/// Painting primitives provided by a platform backend
pub trait Graphic {
    /// Rectangle with a border and a fill; `round` is the corner radius
    fn draw_rect(&mut self, rect: &Rect, border: Color, fill: Color, border_width: i32, round: i32);

    /// Line from `(line.left, line.top)` to `(line.right, line.bottom)`
    fn draw_line(&mut self, line: &Rect, color: Color, width: i32);

    /// Text with its top-left corner at `(rect.left, rect.top)`
    fn draw_text(&mut self, rect: &Rect, text: &str, color: Color, font: &Font);

    /// Extent of `text` rendered with `font`, anchored at the origin
    fn measure_text(&mut self, text: &str, font: &Font) -> Rect;

    /// Paint into an offscreen buffer and blit it into `clip`, scrolled left
    /// by `left_shift` pixels
    fn draw_clipped(&mut self, clip: &Rect, left_shift: i32, paint: &mut dyn FnMut(&mut dyn Graphic));
}

/// Deterministic text metric used when no native font engine is available:
/// every character is half the font size wide and one font size tall.
pub fn approx_text_extent(text: &str, font: &Font) -> Rect {
    let glyph_width = (font.size / 2).max(1);
    let chars = text.chars().count() as i32;
    Rect::new(0, 0, chars * glyph_width, font.size)
}
