//! Window module
//!
//! Provides child composition, hit testing, focus cycling and the window
//! lifecycle.

mod config;
#[allow(clippy::module_inception)]
mod window;

pub use config::{WindowConfig, WindowState, WindowType};
pub use window::Window;
