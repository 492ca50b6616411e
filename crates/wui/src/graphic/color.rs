//! Colour and font values resolved from themes

use serde::{Deserialize, Serialize};

/// 24-bit RGB colour
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color(pub u32);

impl Color {
    pub const BLACK: Color = Color(0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color(((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    pub fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub fn blue(self) -> u8 {
        self.0 as u8
    }

    /// Parse `#rrggbb`
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.strip_prefix('#')?;
        if hex.len() != 6 {
            return None;
        }
        u32::from_str_radix(hex, 16).ok().map(Color)
    }
}

/// Font description; glyph shaping is left to the platform
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Font {
    pub name: String,
    pub size: i32,
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
    #[serde(default)]
    pub underline: bool,
}

impl Font {
    pub fn new(name: impl Into<String>, size: i32) -> Self {
        Self {
            name: name.into(),
            size,
            bold: false,
            italic: false,
            underline: false,
        }
    }
}

impl Default for Font {
    fn default() -> Self {
        Font::new("Segoe UI", 18)
    }
}
