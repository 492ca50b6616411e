//! Axis-aligned integer rectangle

use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in pixel coordinates
///
/// Edges are stored directly (`right`/`bottom` are edge coordinates, not
/// sizes). The constructors normalize their input so that `right >= left`
/// and `bottom >= top`; code writing the public fields directly is assumed
/// to keep that ordering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    /// Empty rectangle at the origin
    pub const ZERO: Rect = Rect {
        left: 0,
        top: 0,
        right: 0,
        bottom: 0,
    };

    /// Create a rectangle from its edges, swapping reversed edges
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left: left.min(right),
            top: top.min(bottom),
            right: left.max(right),
            bottom: top.max(bottom),
        }
    }

    /// Create from a top-left corner and a size (negative sizes clamp to zero)
    pub fn from_pos_size(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            left: x,
            top: y,
            right: x + width.max(0),
            bottom: y + height.max(0),
        }
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    /// True when the rectangle covers no area
    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Inclusive point test: both edges belong to the rectangle
    ///
    /// Used for hit-testing.
    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.left && x <= self.right && y >= self.top && y <= self.bottom
    }

    /// Exclusive intersection test: rectangles that only share an edge do
    /// not overlap
    ///
    /// Used for damage-region culling.
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        !(other.right <= self.left
            || self.right <= other.left
            || other.bottom <= self.top
            || self.bottom <= other.top)
    }

    /// Return a copy offset by `(dx, dy)`
    #[inline]
    pub fn translate(&self, dx: i32, dy: i32) -> Rect {
        Rect {
            left: self.left + dx,
            top: self.top + dy,
            right: self.right + dx,
            bottom: self.bottom + dy,
        }
    }

    /// Express a rectangle given relative to `self`'s origin in `self`'s
    /// own coordinate space
    #[inline]
    pub fn offset_child(&self, local: &Rect) -> Rect {
        local.translate(self.left, self.top)
    }

    /// Same rectangle moved so its top-left corner is at the origin
    pub fn at_origin(&self) -> Rect {
        self.translate(-self.left, -self.top)
    }
}
