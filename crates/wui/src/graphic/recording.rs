//! Headless drawing surface that records every call

use super::{approx_text_extent, Color, Font, Graphic};
use crate::math::Rect;

/// One recorded drawing call
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DrawOp {
    Rect { rect: Rect, border: Color, fill: Color },
    Line { line: Rect, color: Color },
    Text { rect: Rect, text: String, color: Color },
    Clip { clip: Rect, left_shift: i32 },
}

/// [`Graphic`] implementation that keeps a log of drawing calls
///
/// Used by tests and by backends that replay a frame later.
#[derive(Debug, Default)]
pub struct RecordingGraphic {
    ops: Vec<DrawOp>,
}

impl RecordingGraphic {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Text strings drawn so far, in order
    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.ops.clear();
    }
}

impl Graphic for RecordingGraphic {
    fn draw_rect(&mut self, rect: &Rect, border: Color, fill: Color, _border_width: i32, _round: i32) {
        self.ops.push(DrawOp::Rect {
            rect: *rect,
            border,
            fill,
        });
    }

    fn draw_line(&mut self, line: &Rect, color: Color, _width: i32) {
        self.ops.push(DrawOp::Line { line: *line, color });
    }

    fn draw_text(&mut self, rect: &Rect, text: &str, color: Color, _font: &Font) {
        self.ops.push(DrawOp::Text {
            rect: *rect,
            text: text.to_string(),
            color,
        });
    }

    fn measure_text(&mut self, text: &str, font: &Font) -> Rect {
        approx_text_extent(text, font)
    }

    fn draw_clipped(&mut self, clip: &Rect, left_shift: i32, paint: &mut dyn FnMut(&mut dyn Graphic)) {
        self.ops.push(DrawOp::Clip {
            clip: *clip,
            left_shift,
        });
        paint(self);
    }
}
