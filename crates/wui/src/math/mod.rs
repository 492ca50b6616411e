//! Core geometry types for the widget toolkit
//!
//! Integer rectangles used for control positions, hit-testing and
//! damage regions.

mod rect;

pub use rect::Rect;
