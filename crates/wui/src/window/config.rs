//! Window configuration types

use serde::{Deserialize, Serialize};

use crate::math::Rect;

/// Chrome style of a top-level window
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowType {
    /// Resizable window with minimize, expand and close buttons
    #[default]
    Frame,
    /// Fixed-size window with a close button only
    Dialog,
}

/// Show state of a window
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowState {
    #[default]
    Normal,
    Minimized,
    Maximized,
}

/// Configuration passed to [`Window::init`](super::Window::init)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub window_type: WindowType,
    /// Screen rect of a top-level window, or parent-local rect of a docked one
    pub position: Rect,
    pub caption: String,
    /// Smallest (width, height) a border drag may produce
    pub min_size: (i32, i32),
    /// Width of the border zone that starts a resize drag
    pub border_margin: i32,
    pub title_height: i32,
    pub title_button_size: i32,
    /// Docked window hit-tested before and drawn after its siblings
    pub topmost: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            window_type: WindowType::Frame,
            position: Rect::ZERO,
            caption: String::new(),
            min_size: (100, 50),
            border_margin: 5,
            title_height: 30,
            title_button_size: 26,
            topmost: false,
        }
    }
}

impl WindowConfig {
    pub fn frame(position: Rect, caption: impl Into<String>) -> Self {
        Self {
            position,
            caption: caption.into(),
            ..Default::default()
        }
    }

    pub fn dialog(position: Rect, caption: impl Into<String>) -> Self {
        Self {
            window_type: WindowType::Dialog,
            position,
            caption: caption.into(),
            ..Default::default()
        }
    }
}
