//! Theme providers
//!
//! Themes are two-level string maps: a control category (`"button"`) and a
//! value name (`"calm"`). Controls hold an optional explicit theme and fall
//! back to the process default, which lives on the dispatch thread and is
//! only ever swapped as a whole.

mod default;
mod map;

pub use default::{
    clear_default_theme, default_theme, set_default_theme, theme_color, theme_dimension,
    theme_font, theme_string,
};
pub use map::{ThemeMap, ThemeValue, DARK_THEME_JSON};

use crate::graphic::{Color, Font};

/// Read-only lookup of themed values
///
/// Missing entries resolve to zero values (black, `0`, empty string,
/// default font) rather than errors.
pub trait Theme {
    fn name(&self) -> &str;
    fn get_color(&self, control: &str, value: &str) -> Color;
    fn get_dimension(&self, control: &str, value: &str) -> i32;
    fn get_string(&self, control: &str, value: &str) -> String;
    fn get_font(&self, control: &str, value: &str) -> Font;
}
