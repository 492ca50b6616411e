//! Map-backed theme with JSON loading

use std::collections::HashMap;

use serde_json::Value;

use super::Theme;
use crate::error::{ErrorKind, WuiError, WuiResult};
use crate::graphic::{Color, Font};

/// One themed value
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ThemeValue {
    Color(Color),
    Dimension(i32),
    String(String),
    Font(Font),
}

/// Built-in dark theme
pub const DARK_THEME_JSON: &str = r##"{
    "window": {
        "background": "#131519",
        "text": "#f0f1f1",
        "active_button": "#3b3d41",
        "caption_font": { "name": "Segoe UI", "size": 18 }
    },
    "button": {
        "calm": "#06a5df",
        "active": "#1aafe9",
        "border": "#0a70a0",
        "border_width": 1,
        "focused_border": "#dcd2dc",
        "text": "#f0f1f1",
        "disabled": "#a5a5a0",
        "round": 4,
        "font": { "name": "Segoe UI", "size": 18 }
    },
    "input": {
        "background": "#262a2e",
        "text": "#f0f1f1",
        "selection": "#264f78",
        "cursor": "#d2d2d2",
        "border": "#3c3c3c",
        "focused_border": "#dcd2dc",
        "round": 2,
        "font": { "name": "Segoe UI", "size": 18 }
    },
    "select": {
        "background": "#262a2e",
        "border": "#3c3c3c",
        "border_width": 1,
        "focused_border": "#dcd2dc",
        "text": "#f0f1f1",
        "selected_item": "#3b3d41",
        "active_item": "#06a5df",
        "round": 2,
        "font": { "name": "Segoe UI", "size": 18 }
    },
    "tooltip": {
        "background": "#3b3d41",
        "border": "#5a5c60",
        "text": "#f0f1f1",
        "text_indent": 3,
        "round": 2,
        "font": { "name": "Segoe UI", "size": 16 }
    },
    "text": {
        "color": "#f0f1f1",
        "font": { "name": "Segoe UI", "size": 18 }
    }
}"##;

/// Theme backed by nested hash maps
#[derive(Clone, Debug, Default)]
pub struct ThemeMap {
    name: String,
    values: HashMap<String, HashMap<String, ThemeValue>>,
}

impl ThemeMap {
    /// Create an empty theme
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: HashMap::new(),
        }
    }

    /// Create a theme from JSON text
    pub fn from_json(name: impl Into<String>, json: &str) -> WuiResult<Self> {
        let mut theme = Self::new(name);
        theme.load_json(json)?;
        Ok(theme)
    }

    /// The built-in dark theme
    pub fn dark() -> Self {
        Self::from_json("dark", DARK_THEME_JSON).unwrap_or_else(|_| Self::new("dark"))
    }

    /// Merge values from JSON text into this theme
    ///
    /// The document must be an object of objects. Integers become
    /// dimensions, `#rrggbb` strings colours, other strings plain strings,
    /// and nested objects fonts.
    pub fn load_json(&mut self, json: &str) -> WuiResult<()> {
        let root: Value = serde_json::from_str(json)
            .map_err(|e| WuiError::new(ErrorKind::JsonParse, "theme", e.to_string()))?;

        let sections = root.as_object().ok_or_else(|| {
            WuiError::new(ErrorKind::InvalidValue, "theme", "root must be an object")
        })?;

        for (control, entries) in sections {
            let entries = entries.as_object().ok_or_else(|| {
                WuiError::new(
                    ErrorKind::InvalidValue,
                    "theme",
                    format!("section '{}' must be an object", control),
                )
            })?;

            for (value_name, raw) in entries {
                let value = Self::parse_value(control, value_name, raw)?;
                self.set(control, value_name, value);
            }
        }

        tracing::debug!(theme = %self.name, sections = sections.len(), "theme loaded");
        Ok(())
    }

    fn parse_value(control: &str, value_name: &str, raw: &Value) -> WuiResult<ThemeValue> {
        let invalid = || {
            WuiError::new(
                ErrorKind::InvalidValue,
                "theme",
                format!("unsupported value for {}.{}", control, value_name),
            )
        };

        match raw {
            Value::Number(n) => n
                .as_i64()
                .and_then(|v| i32::try_from(v).ok())
                .map(ThemeValue::Dimension)
                .ok_or_else(invalid),
            Value::String(s) => Ok(Color::from_hex(s)
                .map(ThemeValue::Color)
                .unwrap_or_else(|| ThemeValue::String(s.clone()))),
            Value::Object(_) => serde_json::from_value::<Font>(raw.clone())
                .map(ThemeValue::Font)
                .map_err(|_| invalid()),
            _ => Err(invalid()),
        }
    }

    pub fn set(&mut self, control: &str, value_name: &str, value: ThemeValue) {
        self.values
            .entry(control.to_string())
            .or_default()
            .insert(value_name.to_string(), value);
    }

    pub fn set_color(&mut self, control: &str, value_name: &str, color: Color) {
        self.set(control, value_name, ThemeValue::Color(color));
    }

    pub fn set_dimension(&mut self, control: &str, value_name: &str, dimension: i32) {
        self.set(control, value_name, ThemeValue::Dimension(dimension));
    }

    pub fn set_string(&mut self, control: &str, value_name: &str, value: impl Into<String>) {
        self.set(control, value_name, ThemeValue::String(value.into()));
    }

    pub fn set_font(&mut self, control: &str, value_name: &str, font: Font) {
        self.set(control, value_name, ThemeValue::Font(font));
    }

    fn get(&self, control: &str, value_name: &str) -> Option<&ThemeValue> {
        self.values.get(control).and_then(|v| v.get(value_name))
    }
}

impl Theme for ThemeMap {
    fn name(&self) -> &str {
        &self.name
    }

    fn get_color(&self, control: &str, value: &str) -> Color {
        match self.get(control, value) {
            Some(ThemeValue::Color(c)) => *c,
            _ => Color::BLACK,
        }
    }

    fn get_dimension(&self, control: &str, value: &str) -> i32 {
        match self.get(control, value) {
            Some(ThemeValue::Dimension(d)) => *d,
            _ => 0,
        }
    }

    fn get_string(&self, control: &str, value: &str) -> String {
        match self.get(control, value) {
            Some(ThemeValue::String(s)) => s.clone(),
            _ => String::new(),
        }
    }

    fn get_font(&self, control: &str, value: &str) -> Font {
        match self.get(control, value) {
            Some(ThemeValue::Font(f)) => f.clone(),
            _ => Font::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dark_theme_parses() {
        let theme = ThemeMap::from_json("dark", DARK_THEME_JSON).unwrap();
        assert_eq!(theme.name(), "dark");
        assert_eq!(theme.get_color("button", "calm"), Color::rgb(0x06, 0xa5, 0xdf));
        assert_eq!(theme.get_dimension("button", "round"), 4);
        assert_eq!(theme.get_font("tooltip", "font").size, 16);
    }

    #[test]
    fn test_missing_values_are_zero() {
        let theme = ThemeMap::new("empty");
        assert_eq!(theme.get_color("button", "calm"), Color::BLACK);
        assert_eq!(theme.get_dimension("button", "round"), 0);
        assert_eq!(theme.get_string("window", "images_path"), "");
        assert_eq!(theme.get_font("button", "font"), Font::default());
    }

    #[test]
    fn test_wrong_type_lookup_is_zero() {
        let mut theme = ThemeMap::new("t");
        theme.set_dimension("button", "calm", 12);
        assert_eq!(theme.get_color("button", "calm"), Color::BLACK);
        assert_eq!(theme.get_dimension("button", "calm"), 12);
    }

    #[test]
    fn test_load_json_errors() {
        let err = ThemeMap::from_json("bad", "{ not json").unwrap_err();
        assert_eq!(err.kind, ErrorKind::JsonParse);
        assert_eq!(err.component, "theme");

        let err = ThemeMap::from_json("bad", "[1, 2]").unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidValue);

        let err = ThemeMap::from_json("bad", r#"{"button": 3}"#).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidValue);

        let err = ThemeMap::from_json("bad", r#"{"button": {"calm": [1]}}"#).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidValue);
    }

    #[test]
    fn test_load_json_merges() {
        let mut theme = ThemeMap::dark();
        theme
            .load_json(r##"{"button": {"calm": "#000001", "caption": "ok"}}"##)
            .unwrap();
        assert_eq!(theme.get_color("button", "calm"), Color(1));
        assert_eq!(theme.get_string("button", "caption"), "ok");
        // Untouched values survive the merge
        assert_eq!(theme.get_dimension("button", "round"), 4);
    }
}
