//! Process default theme and fallback lookups

use std::cell::RefCell;
use std::rc::Rc;

use super::Theme;
use crate::graphic::{Color, Font};

thread_local! {
    static DEFAULT_THEME: RefCell<Option<Rc<dyn Theme>>> = const { RefCell::new(None) };
}

/// Replace the default theme used by controls without an explicit one
///
/// Controls pick the new theme up on their next lookup; windows should be
/// sent `update_theme` to repaint.
pub fn set_default_theme(theme: Rc<dyn Theme>) {
    tracing::debug!(theme = theme.name(), "default theme replaced");
    DEFAULT_THEME.with(|slot| *slot.borrow_mut() = Some(theme));
}

pub fn clear_default_theme() {
    DEFAULT_THEME.with(|slot| *slot.borrow_mut() = None);
}

pub fn default_theme() -> Option<Rc<dyn Theme>> {
    DEFAULT_THEME.with(|slot| slot.borrow().clone())
}

fn resolve<T>(theme: Option<&Rc<dyn Theme>>, fallback: T, get: impl Fn(&dyn Theme) -> T) -> T {
    match theme {
        Some(t) => get(t.as_ref()),
        None => match default_theme() {
            Some(t) => get(t.as_ref()),
            None => fallback,
        },
    }
}

pub fn theme_color(control: &str, value: &str, theme: Option<&Rc<dyn Theme>>) -> Color {
    resolve(theme, Color::BLACK, |t| t.get_color(control, value))
}

pub fn theme_dimension(control: &str, value: &str, theme: Option<&Rc<dyn Theme>>) -> i32 {
    resolve(theme, 0, |t| t.get_dimension(control, value))
}

pub fn theme_string(control: &str, value: &str, theme: Option<&Rc<dyn Theme>>) -> String {
    resolve(theme, String::new(), |t| t.get_string(control, value))
}

pub fn theme_font(control: &str, value: &str, theme: Option<&Rc<dyn Theme>>) -> Font {
    resolve(theme, Font::default(), |t| t.get_font(control, value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::ThemeMap;

    #[test]
    fn test_explicit_theme_wins() {
        let mut default = ThemeMap::new("default");
        default.set_dimension("button", "round", 4);
        set_default_theme(Rc::new(default));

        let mut custom = ThemeMap::new("custom");
        custom.set_dimension("button", "round", 9);
        let custom: Rc<dyn Theme> = Rc::new(custom);

        assert_eq!(theme_dimension("button", "round", Some(&custom)), 9);
        assert_eq!(theme_dimension("button", "round", None), 4);

        clear_default_theme();
        assert_eq!(theme_dimension("button", "round", None), 0);
        assert!(default_theme().is_none());
    }

    #[test]
    fn test_replacing_default_keeps_old_handles_intact() {
        let mut first = ThemeMap::new("first");
        first.set_string("window", "caption", "one");
        set_default_theme(Rc::new(first));
        let held = default_theme().unwrap();

        set_default_theme(Rc::new(ThemeMap::new("second")));

        assert_eq!(held.get_string("window", "caption"), "one");
        assert_eq!(theme_string("window", "caption", None), "");
        clear_default_theme();
    }
}
