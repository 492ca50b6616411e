//! Platform boundary
//!
//! The core never talks to a window system directly. A backend implements
//! [`Platform`]; [`PlatformAdapter`] turns its native messages into
//! [`Event`](crate::event::Event)s for the owning top-level
//! [`Window`](crate::window::Window) and runs the border move/resize
//! gestures of borderless frame windows.

mod adapter;
mod headless;
mod moving;

pub use adapter::{NativeMessage, PlatformAdapter};
pub use headless::{HeadlessPlatform, PlatformCall};
pub use moving::MovingMode;

use crate::error::WuiResult;
use crate::graphic::Font;
use crate::math::Rect;

/// Opaque native window handle
pub type NativeHandle = u64;

/// Platform timer identifier
pub type TimerId = u64;

/// Pointer cursor shapes the core asks for
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CursorShape {
    #[default]
    Default,
    Hand,
    IBeam,
    Wait,
    /// Diagonal resize, top-left to bottom-right
    SizeNWSE,
    /// Diagonal resize, top-right to bottom-left
    SizeNESW,
    SizeWE,
    SizeNS,
}

/// Native show-state requests
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShowCommand {
    Show,
    Hide,
    Minimize,
    Maximize,
    Restore,
}

/// Window-system primitives consumed by the core
///
/// All methods take `&self`; implementations keep their own interior state.
pub trait Platform {
    /// Create a borderless native window covering `rect` in screen space
    fn create_window(&self, rect: &Rect, caption: &str) -> WuiResult<NativeHandle>;
    fn destroy_window(&self, handle: NativeHandle);

    fn set_window_rect(&self, handle: NativeHandle, rect: &Rect);
    fn window_rect(&self, handle: NativeHandle) -> Rect;
    fn show_window(&self, handle: NativeHandle, command: ShowCommand);
    fn set_window_enabled(&self, handle: NativeHandle, enabled: bool);

    /// Queue a repaint of `rect`; `clear` forces the background to be erased
    fn invalidate(&self, handle: NativeHandle, rect: &Rect, clear: bool);

    fn set_cursor(&self, shape: CursorShape);
    fn capture_pointer(&self, handle: NativeHandle);
    fn release_pointer(&self);

    /// Usable desktop area, excluding task bars
    fn work_area(&self) -> Rect;

    fn measure_text(&self, text: &str, font: &Font) -> Rect;

    /// Call `callback` every `interval_ms` until stopped
    fn start_timer(&self, interval_ms: u32, callback: Box<dyn FnMut()>) -> TimerId;
    fn stop_timer(&self, id: TimerId);

    fn clipboard_text(&self) -> Option<String>;
    fn set_clipboard_text(&self, text: &str);
}
