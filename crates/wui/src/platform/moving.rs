//! Border move/resize gestures of borderless frame windows

use super::CursorShape;
use crate::math::Rect;

/// What a captured pointer drag does to the native window
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MovingMode {
    #[default]
    Move,
    SizeWELeft,
    SizeWERight,
    SizeNSTop,
    SizeNSBottom,
    SizeNWSETop,
    SizeNWSEBottom,
    SizeNESWTop,
    SizeNESWBottom,
}

impl MovingMode {
    /// Classify a window-local point against a border of `margin` pixels
    ///
    /// Corners win over edges. Returns `None` for points in the interior.
    pub fn classify(x: i32, y: i32, width: i32, height: i32, margin: i32) -> Option<Self> {
        let right = x > width - margin;
        let left = x < margin;
        let bottom = y > height - margin;
        let top = y < margin;

        let mode = if right && bottom {
            Self::SizeNWSEBottom
        } else if left && top {
            Self::SizeNWSETop
        } else if right && top {
            Self::SizeNESWTop
        } else if left && bottom {
            Self::SizeNESWBottom
        } else if right {
            Self::SizeWERight
        } else if left {
            Self::SizeWELeft
        } else if bottom {
            Self::SizeNSBottom
        } else if top {
            Self::SizeNSTop
        } else {
            return None;
        };
        Some(mode)
    }

    pub fn cursor(&self) -> CursorShape {
        match self {
            Self::Move => CursorShape::Default,
            Self::SizeWELeft | Self::SizeWERight => CursorShape::SizeWE,
            Self::SizeNSTop | Self::SizeNSBottom => CursorShape::SizeNS,
            Self::SizeNWSETop | Self::SizeNWSEBottom => CursorShape::SizeNWSE,
            Self::SizeNESWTop | Self::SizeNESWBottom => CursorShape::SizeNESW,
        }
    }

    /// New screen rect of a window after the pointer moved to window-local
    /// `(x, y)`, the drag having started at window-local `(click_x, click_y)`
    ///
    /// Never shrinks below `min_size` (width, height); edges opposite the
    /// dragged one stay anchored.
    pub fn apply(
        &self,
        window: &Rect,
        x: i32,
        y: i32,
        click_x: i32,
        click_y: i32,
        min_size: (i32, i32),
    ) -> Rect {
        let (mut left, mut top) = (window.left, window.top);
        let (mut width, mut height) = (window.width(), window.height());

        match self {
            Self::Move => {
                left += x - click_x;
                top += y - click_y;
            }
            Self::SizeWELeft => {
                left += x;
                width -= x;
            }
            Self::SizeWERight => width = x,
            Self::SizeNSTop => {
                top += y;
                height -= y;
            }
            Self::SizeNSBottom => height = y,
            Self::SizeNWSETop => {
                left += x;
                top += y;
                width -= x;
                height -= y;
            }
            Self::SizeNWSEBottom => {
                width = x;
                height = y;
            }
            Self::SizeNESWTop => {
                top += y;
                width = x;
                height -= y;
            }
            Self::SizeNESWBottom => {
                left += x;
                width -= x;
                height = y;
            }
        }

        let (min_width, min_height) = min_size;
        if width < min_width {
            if left != window.left {
                left = window.right - min_width;
            }
            width = min_width;
        }
        if height < min_height {
            if top != window.top {
                top = window.bottom - min_height;
            }
            height = min_height;
        }

        Rect::from_pos_size(left, top, width, height)
    }
}
