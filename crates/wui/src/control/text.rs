//! Static text label

use std::cell::RefCell;
use std::rc::Rc;

use super::{Control, ControlBase};
use crate::event::Event;
use crate::graphic::Graphic;
use crate::math::Rect;
use crate::theme::Theme;
use crate::window::Window;

/// Non-interactive text drawn at the top-left of its position
pub struct Text {
    base: ControlBase,
    text: RefCell<String>,
}

impl Text {
    pub const TC: &'static str = "text";

    pub fn new(text: &str, theme: Option<Rc<dyn Theme>>) -> Rc<Self> {
        let base = ControlBase::new(Self::TC, theme);
        base.set_focusing(false);
        Rc::new(Self {
            base,
            text: RefCell::new(text.to_string()),
        })
    }

    pub fn text(&self) -> String {
        self.text.borrow().clone()
    }

    pub fn set_text(&self, text: &str) {
        *self.text.borrow_mut() = text.to_string();
        self.base.redraw_rect(&self.base.position(), true);
    }
}

impl Control for Text {
    fn draw(&self, gr: &mut dyn Graphic, _paint_rect: &Rect) {
        if !self.base.showed() {
            return;
        }
        gr.draw_text(
            &self.base.position(),
            &self.text.borrow(),
            self.base.color("color"),
            &self.base.font("font"),
        );
    }

    fn receive_event(&self, _ev: &Event) {}

    fn set_position(&self, position: Rect) {
        self.base.set_position(position);
    }

    fn position(&self) -> Rect {
        self.base.position()
    }

    fn set_parent(&self, parent: &Rc<Window>) {
        self.base.set_parent(parent);
    }

    fn clear_parent(&self) {
        self.base.clear_parent();
    }

    fn parent(&self) -> Option<Rc<Window>> {
        self.base.parent()
    }

    fn set_focus(&self) {}

    fn remove_focus(&self) -> bool {
        true
    }

    fn focused(&self) -> bool {
        false
    }

    fn focusing(&self) -> bool {
        false
    }

    fn update_theme(&self, theme: Option<Rc<dyn Theme>>) {
        self.base.update_theme(theme);
    }

    fn show(&self) {
        self.base.set_showed(true);
        self.base.redraw();
    }

    fn hide(&self) {
        self.base.set_showed(false);
        self.base.redraw_rect(&self.base.position(), true);
    }

    fn showed(&self) -> bool {
        self.base.showed()
    }

    fn enable(&self) {
        self.base.set_enabled(true);
    }

    fn disable(&self) {
        self.base.set_enabled(false);
    }

    fn enabled(&self) -> bool {
        self.base.enabled()
    }
}
