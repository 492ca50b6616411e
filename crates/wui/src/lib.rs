//! Widget toolkit core
//!
//! This crate provides the platform-independent part of a small widget
//! toolkit:
//! - Rectangle geometry for positions, hit testing and damage regions
//! - An event model for pointer, keyboard and internal events
//! - The [`Control`] capability set and a handful of leaf controls
//! - [`Window`], a control that composes children, routes events to them,
//!   cycles keyboard focus and may be docked inside another window
//! - A platform adapter running the move/resize gestures of borderless
//!   frame windows
//!
//! ## Architecture
//!
//! - [`math`]: `Rect`
//! - [`event`]: `Event` and its payloads
//! - [`graphic`]: the `Graphic` drawing-surface trait, colours and fonts
//! - [`theme`]: themed colours, dimensions, strings and fonts
//! - [`control`]: `Control`, `Button`, `Input`, `Select`, `Text`, `Tooltip`
//! - [`window`]: `Window` and its configuration
//! - [`message`]: message box built on a window
//! - [`platform`]: `Platform` trait, `PlatformAdapter`, headless backend
//!
//! ## Example
//!
//! ```rust
//! use wui::{Button, HeadlessPlatform, PlatformAdapter, Rect, Window, WindowConfig};
//!
//! let platform = HeadlessPlatform::new();
//! let adapter = PlatformAdapter::new(platform.clone());
//!
//! let window = Window::new(None);
//! window
//!     .init(WindowConfig::frame(Rect::new(100, 100, 900, 700), "Main"), Some(&adapter))
//!     .expect("native window");
//!
//! let ok = Button::new("OK", || println!("clicked"));
//! window.add_control(ok, Rect::new(10, 40, 110, 70));
//! assert!(window.handle().is_some());
//! ```
//!
//! ## Threading
//!
//! Everything runs on one dispatch thread. Controls are shared as
//! `Rc<dyn Control>` and mutate through `Cell`/`RefCell`; parents are
//! referenced weakly, so a parent never outlives its top-level window
//! through its children.

pub mod control;
pub mod error;
pub mod event;
pub mod graphic;
pub mod math;
pub mod message;
pub mod platform;
pub mod theme;
pub mod window;

// Re-export core types for convenience
pub use control::{
    same_control, Button, Control, Input, InputView, Select, SelectItem, Text, Tooltip,
};
pub use error::{ErrorKind, WuiError, WuiResult};
pub use event::{
    Event, InternalEvent, Key, KeyboardEvent, KeyboardEventType, Modifiers, MouseEvent,
    MouseEventType,
};
pub use graphic::{Color, DrawOp, Font, Graphic, RecordingGraphic};
pub use math::Rect;
pub use message::{Message, MessageButton, MessageIcon, MessageResult};
pub use platform::{
    CursorShape, HeadlessPlatform, MovingMode, NativeHandle, NativeMessage, Platform,
    PlatformAdapter, PlatformCall, ShowCommand,
};
pub use theme::{set_default_theme, Theme, ThemeMap};
pub use window::{Window, WindowConfig, WindowState, WindowType};

/// Cursor blink half-period of text inputs, in milliseconds
pub use control::CURSOR_BLINK_MS;
