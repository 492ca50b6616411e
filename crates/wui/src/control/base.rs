//! State shared by the leaf controls

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::graphic::{Color, Font};
use crate::math::Rect;
use crate::platform::{CursorShape, Platform};
use crate::theme::{self, Theme};
use crate::window::Window;

/// Position, parent link, visibility, enablement, focus and theme of a
/// leaf control
pub struct ControlBase {
    position: Cell<Rect>,
    parent: RefCell<Weak<Window>>,
    showed: Cell<bool>,
    enabled: Cell<bool>,
    focused: Cell<bool>,
    focusing: Cell<bool>,
    theme: RefCell<Option<Rc<dyn Theme>>>,
    /// Theme control category, e.g. `"button"`
    theme_control: String,
}

impl ControlBase {
    pub fn new(theme_control: &str, theme: Option<Rc<dyn Theme>>) -> Self {
        Self {
            position: Cell::new(Rect::ZERO),
            parent: RefCell::new(Weak::new()),
            showed: Cell::new(true),
            enabled: Cell::new(true),
            focused: Cell::new(false),
            focusing: Cell::new(true),
            theme: RefCell::new(theme),
            theme_control: theme_control.to_string(),
        }
    }

    pub fn position(&self) -> Rect {
        self.position.get()
    }

    /// Store a new position, invalidating both the vacated and the new area
    pub fn set_position(&self, position: Rect) {
        let prev = self.position.replace(position);
        if prev != position && !prev.is_empty() && self.showed.get() {
            self.redraw_rect(&prev, true);
        }
        self.redraw();
    }

    pub fn parent(&self) -> Option<Rc<Window>> {
        self.parent.borrow().upgrade()
    }

    pub fn set_parent(&self, parent: &Rc<Window>) {
        *self.parent.borrow_mut() = Rc::downgrade(parent);
    }

    pub fn clear_parent(&self) {
        *self.parent.borrow_mut() = Weak::new();
    }

    /// Request a repaint of the control's area from the parent chain
    pub fn redraw(&self) {
        if self.showed.get() {
            self.redraw_rect(&self.position.get(), false);
        }
    }

    pub fn redraw_rect(&self, rect: &Rect, clear: bool) {
        if let Some(parent) = self.parent() {
            parent.redraw(rect, clear);
        }
    }

    /// Platform of the top-level window this control lives in
    pub fn platform(&self) -> Option<Rc<dyn Platform>> {
        self.parent().and_then(|p| p.platform())
    }

    pub fn set_cursor(&self, shape: CursorShape) {
        if let Some(parent) = self.parent() {
            parent.set_cursor(shape);
        }
    }

    pub fn showed(&self) -> bool {
        self.showed.get()
    }

    pub fn set_showed(&self, showed: bool) {
        self.showed.set(showed);
    }

    pub fn enabled(&self) -> bool {
        self.enabled.get()
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.set(enabled);
    }

    /// True when events should be processed
    pub fn live(&self) -> bool {
        self.showed.get() && self.enabled.get()
    }

    pub fn focused(&self) -> bool {
        self.focused.get()
    }

    pub fn set_focused(&self, focused: bool) {
        self.focused.set(focused);
    }

    /// Focus eligibility: opted in, visible and enabled
    pub fn focusing(&self) -> bool {
        self.focusing.get() && self.live()
    }

    pub fn set_focusing(&self, focusing: bool) {
        self.focusing.set(focusing);
    }

    pub fn theme(&self) -> Option<Rc<dyn Theme>> {
        self.theme.borrow().clone()
    }

    pub fn update_theme(&self, theme: Option<Rc<dyn Theme>>) {
        let mut slot = self.theme.borrow_mut();
        if slot.is_some() && theme.is_none() {
            return;
        }
        *slot = theme;
    }

    pub fn color(&self, value: &str) -> Color {
        theme::theme_color(&self.theme_control, value, self.theme.borrow().as_ref())
    }

    pub fn dimension(&self, value: &str) -> i32 {
        theme::theme_dimension(&self.theme_control, value, self.theme.borrow().as_ref())
    }

    pub fn font(&self, value: &str) -> Font {
        theme::theme_font(&self.theme_control, value, self.theme.borrow().as_ref())
    }

    /// Extent of `text` using native metrics when attached, else the
    /// headless approximation
    pub fn measure_text(&self, text: &str, font: &Font) -> Rect {
        match self.platform() {
            Some(platform) => platform.measure_text(text, font),
            None => crate::graphic::approx_text_extent(text, font),
        }
    }
}
