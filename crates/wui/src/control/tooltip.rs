//! Hover tooltip

use std::cell::RefCell;
use std::rc::Rc;

use super::{Control, ControlBase};
use crate::event::Event;
use crate::graphic::Graphic;
use crate::math::Rect;
use crate::theme::Theme;
use crate::window::Window;

/// Gap between the anchoring control and the tooltip
const TOOLTIP_OFFSET: i32 = 5;

/// Small topmost text box, hidden until its owner shows it
pub struct Tooltip {
    base: ControlBase,
    text: RefCell<String>,
}

impl Tooltip {
    pub const TC: &'static str = "tooltip";

    pub fn new(text: &str, theme: Option<Rc<dyn Theme>>) -> Rc<Self> {
        let base = ControlBase::new(Self::TC, theme);
        base.set_showed(false);
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
        if self.base.showed() {
            self.update_size();
        }
    }

    /// Resize around the current text, keeping the top-left corner
    pub fn update_size(&self) {
        let position = self.base.position();
        let size = self.text_size();
        self.base.set_position(Rect::from_pos_size(
            position.left,
            position.top,
            size.width(),
            size.height(),
        ));
    }

    /// Show under `anchor`, starting at pointer column `x`
    pub fn show_below(&self, x: i32, anchor: &Rect) {
        let size = self.text_size();
        self.base.set_showed(true);
        self.base.set_position(Rect::from_pos_size(
            x,
            anchor.bottom + TOOLTIP_OFFSET,
            size.width(),
            size.height(),
        ));
    }

    fn text_size(&self) -> Rect {
        let indent = self.base.dimension("text_indent");
        let font = self.base.font("font");
        let extent = self.base.measure_text(&self.text.borrow(), &font);
        Rect::new(0, 0, extent.width() + indent * 2, extent.height() + indent * 2)
    }
}

impl Control for Tooltip {
    fn draw(&self, gr: &mut dyn Graphic, _paint_rect: &Rect) {
        let position = self.base.position();
        if !self.base.showed() || position.is_empty() {
            return;
        }

        gr.draw_rect(
            &position,
            self.base.color("border"),
            self.base.color("background"),
            1,
            self.base.dimension("round"),
        );

        let indent = self.base.dimension("text_indent");
        gr.draw_text(
            &position.translate(indent, indent),
            &self.text.borrow(),
            self.base.color("text"),
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

    fn topmost(&self) -> bool {
        true
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
        if self.base.showed() {
            self.base.set_showed(false);
            self.base.redraw_rect(&self.base.position(), true);
        }
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
