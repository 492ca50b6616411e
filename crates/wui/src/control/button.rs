//! Push button

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::{Control, ControlBase, Tooltip};
use crate::event::{Event, InternalEvent, MouseEventType};
use crate::graphic::Graphic;
use crate::math::Rect;
use crate::theme::Theme;
use crate::window::Window;

/// Clickable button with a text caption and an optional hover tooltip
pub struct Button {
    base: ControlBase,
    caption: RefCell<String>,
    click_callback: RefCell<Option<Rc<dyn Fn()>>>,
    /// Pointer is over the button
    active: Cell<bool>,
    tooltip: RefCell<Option<Rc<Tooltip>>>,
}

impl Button {
    /// Theme control name
    pub const TC: &'static str = "button";

    pub fn new(caption: &str, click_callback: impl Fn() + 'static) -> Rc<Self> {
        Self::with_theme(caption, click_callback, None)
    }

    pub fn with_theme(
        caption: &str,
        click_callback: impl Fn() + 'static,
        theme: Option<Rc<dyn Theme>>,
    ) -> Rc<Self> {
        let callback: Rc<dyn Fn()> = Rc::new(click_callback);
        Rc::new(Self {
            base: ControlBase::new(Self::TC, theme),
            caption: RefCell::new(caption.to_string()),
            click_callback: RefCell::new(Some(callback)),
            active: Cell::new(false),
            tooltip: RefCell::new(None),
        })
    }

    pub fn caption(&self) -> String {
        self.caption.borrow().clone()
    }

    pub fn set_caption(&self, caption: &str) {
        *self.caption.borrow_mut() = caption.to_string();
        self.base.redraw();
    }

    pub fn set_callback(&self, click_callback: impl Fn() + 'static) {
        *self.click_callback.borrow_mut() = Some(Rc::new(click_callback));
    }

    pub fn enable_focusing(&self) {
        self.base.set_focusing(true);
    }

    /// Exclude the button from focus cycling
    pub fn disable_focusing(&self) {
        self.base.set_focusing(false);
    }

    /// True while the pointer hovers the button
    pub fn active(&self) -> bool {
        self.active.get()
    }

    /// Attach a tooltip shown while hovering
    pub fn set_tooltip(&self, text: &str) {
        if let Some(tooltip) = self.tooltip.borrow().as_ref() {
            tooltip.set_text(text);
            return;
        }

        let tooltip = Tooltip::new(text, self.base.theme());
        if let Some(parent) = self.base.parent() {
            parent.add_control(tooltip.clone(), Rect::ZERO);
        }
        *self.tooltip.borrow_mut() = Some(tooltip);
    }

    pub fn tooltip(&self) -> Option<Rc<Tooltip>> {
        self.tooltip.borrow().clone()
    }

    fn click(&self) {
        let callback = self.click_callback.borrow().clone();
        if let Some(callback) = callback {
            tracing::trace!(caption = %self.caption.borrow(), "button clicked");
            callback();
        }
    }

    fn show_tooltip(&self, x: i32) {
        let tooltip = self.tooltip.borrow().clone();
        if let Some(tooltip) = tooltip {
            tooltip.show_below(x, &self.base.position());
        }
    }

    fn hide_tooltip(&self) {
        let tooltip = self.tooltip.borrow().clone();
        if let Some(tooltip) = tooltip {
            tooltip.hide();
        }
    }
}

impl Control for Button {
    fn draw(&self, gr: &mut dyn Graphic, _paint_rect: &Rect) {
        let position = self.base.position();
        if !self.base.showed() || position.is_empty() {
            return;
        }

        let fill = if !self.base.enabled() {
            self.base.color("disabled")
        } else if self.active.get() {
            self.base.color("active")
        } else {
            self.base.color("calm")
        };
        let border = if self.base.focused() {
            self.base.color("focused_border")
        } else {
            self.base.color("border")
        };

        gr.draw_rect(
            &position,
            border,
            fill,
            self.base.dimension("border_width"),
            self.base.dimension("round"),
        );

        let caption = self.caption.borrow();
        if caption.is_empty() {
            return;
        }
        let font = self.base.font("font");
        let text_rect = gr.measure_text(&caption, &font);
        let left = position.left + (position.width() - text_rect.width()) / 2;
        let top = position.top + (position.height() - text_rect.height()) / 2;
        gr.draw_text(
            &Rect::from_pos_size(left, top, text_rect.width(), text_rect.height()),
            &caption,
            self.base.color("text"),
            &font,
        );
    }

    fn receive_event(&self, ev: &Event) {
        if !self.base.live() {
            return;
        }

        match ev {
            Event::Mouse(me) => match me.kind {
                MouseEventType::Enter => {
                    self.active.set(true);
                    self.show_tooltip(me.x);
                    self.base.redraw();
                }
                MouseEventType::Leave => {
                    self.active.set(false);
                    self.hide_tooltip();
                    self.base.redraw();
                }
                MouseEventType::LeftUp => self.click(),
                _ => {}
            },
            Event::Internal(InternalEvent::ExecuteFocused) => self.click(),
            Event::Keyboard(_) => {}
        }
    }

    fn set_position(&self, position: Rect) {
        self.base.set_position(position);
    }

    fn position(&self) -> Rect {
        self.base.position()
    }

    fn set_parent(&self, parent: &Rc<Window>) {
        self.base.set_parent(parent);

        let tooltip = self.tooltip.borrow().clone();
        if let Some(tooltip) = tooltip {
            parent.add_control(tooltip, Rect::ZERO);
        }
    }

    fn clear_parent(&self) {
        let tooltip = self.tooltip.borrow().clone();
        if let (Some(tooltip), Some(parent)) = (tooltip, self.base.parent()) {
            let tooltip: Rc<dyn Control> = tooltip;
            parent.remove_control(&tooltip);
        }
        self.active.set(false);
        self.base.clear_parent();
    }

    fn parent(&self) -> Option<Rc<Window>> {
        self.base.parent()
    }

    fn set_focus(&self) {
        if self.base.focusing() {
            self.base.set_focused(true);
            self.base.redraw();
        }
    }

    fn remove_focus(&self) -> bool {
        self.base.set_focused(false);
        self.base.redraw();
        true
    }

    fn focused(&self) -> bool {
        self.base.focused()
    }

    fn focusing(&self) -> bool {
        self.base.focusing()
    }

    fn update_theme(&self, theme: Option<Rc<dyn Theme>>) {
        self.base.update_theme(theme.clone());
        let tooltip = self.tooltip.borrow().clone();
        if let Some(tooltip) = tooltip {
            tooltip.update_theme(theme);
        }
    }

    fn show(&self) {
        self.base.set_showed(true);
        self.base.redraw();
    }

    fn hide(&self) {
        self.base.set_showed(false);
        self.active.set(false);
        self.hide_tooltip();
        self.base.redraw_rect(&self.base.position(), true);
    }

    fn showed(&self) -> bool {
        self.base.showed()
    }

    fn enable(&self) {
        self.base.set_enabled(true);
        self.base.redraw();
    }

    fn disable(&self) {
        self.base.set_enabled(false);
        self.base.redraw();
    }

    fn enabled(&self) -> bool {
        self.base.enabled()
    }
}

impl std::fmt::Debug for Button {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Button")
            .field("caption", &self.caption.borrow())
            .field("position", &self.base.position())
            .field("active", &self.active.get())
            .field("focused", &self.base.focused())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphic::{DrawOp, RecordingGraphic};

    fn counting_button() -> (Rc<Button>, Rc<Cell<u32>>) {
        let clicks = Rc::new(Cell::new(0));
        let counter = clicks.clone();
        let button = Button::new("OK", move || counter.set(counter.get() + 1));
        (button, clicks)
    }

    #[test]
    fn test_left_up_clicks() {
        let (button, clicks) = counting_button();
        button.receive_event(&Event::mouse(MouseEventType::LeftUp, 0, 0));
        button.receive_event(&Event::execute_focused());
        assert_eq!(clicks.get(), 2);
    }

    #[test]
    fn test_disabled_or_hidden_button_ignores_input() {
        let (button, clicks) = counting_button();
        button.disable();
        button.receive_event(&Event::mouse(MouseEventType::LeftUp, 0, 0));
        button.enable();
        button.hide();
        button.receive_event(&Event::mouse(MouseEventType::LeftUp, 0, 0));
        assert_eq!(clicks.get(), 0);
    }

    #[test]
    fn test_enter_leave_tracks_active() {
        let (button, _) = counting_button();
        button.receive_event(&Event::mouse(MouseEventType::Enter, 5, 5));
        assert!(button.active());
        button.receive_event(&Event::mouse(MouseEventType::Leave, 5, 5));
        assert!(!button.active());
    }

    #[test]
    fn test_focus_opt_out() {
        let (button, _) = counting_button();
        assert!(button.focusing());
        button.disable_focusing();
        assert!(!button.focusing());
        button.set_focus();
        assert!(!button.focused());
    }

    #[test]
    fn test_draw_centers_caption() {
        let (button, _) = counting_button();
        button.set_position(Rect::new(0, 0, 100, 30));
        let mut gr = RecordingGraphic::new();
        button.draw(&mut gr, &Rect::new(0, 0, 800, 600));

        assert!(matches!(gr.ops()[0], DrawOp::Rect { .. }));
        assert_eq!(gr.texts(), vec!["OK"]);
        // Default font is 18px: two glyphs of 9px each
        if let DrawOp::Text { rect, .. } = &gr.ops()[1] {
            assert_eq!(rect.left, (100 - 18) / 2);
            assert_eq!(rect.top, (30 - 18) / 2);
        } else {
            panic!("expected text op");
        }
    }
}
