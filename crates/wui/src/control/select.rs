//! Drop-down list

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::{Control, ControlBase};
use crate::event::{Event, Key, KeyboardEventType, MouseEvent, MouseEventType};
use crate::graphic::Graphic;
use crate::math::Rect;
use crate::theme::Theme;
use crate::window::Window;

const DEFAULT_ITEM_HEIGHT: i32 = 22;
const TEXT_INDENT: i32 = 5;

/// One selectable entry
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectItem {
    pub id: i32,
    pub text: String,
}

impl SelectItem {
    pub fn new(id: i32, text: &str) -> Self {
        Self {
            id,
            text: text.to_string(),
        }
    }
}

/// Collapsed field that expands into a list of items on click
///
/// While expanded the control's position covers the list as well, and
/// it reports itself topmost so the list is hit-tested and painted above
/// its siblings.
pub struct Select {
    base: ControlBase,
    items: RefCell<Vec<SelectItem>>,
    selected: Cell<usize>,
    /// Item under the pointer while expanded
    active_item: Cell<Option<usize>>,
    expanded: Cell<bool>,
    item_height: Cell<i32>,
    change_callback: RefCell<Option<Rc<dyn Fn(i32, &str)>>>,
}

impl Select {
    pub const TC: &'static str = "select";

    pub fn new(theme: Option<Rc<dyn Theme>>) -> Rc<Self> {
        Rc::new(Self {
            base: ControlBase::new(Self::TC, theme),
            items: RefCell::new(Vec::new()),
            selected: Cell::new(0),
            active_item: Cell::new(None),
            expanded: Cell::new(false),
            item_height: Cell::new(DEFAULT_ITEM_HEIGHT),
            change_callback: RefCell::new(None),
        })
    }

    pub fn set_items(&self, items: Vec<SelectItem>) {
        self.collapse();
        *self.items.borrow_mut() = items;
        self.selected.set(0);
        self.base.redraw();
    }

    pub fn items(&self) -> Vec<SelectItem> {
        self.items.borrow().clone()
    }

    /// Replace the text of the item with the same id
    pub fn update_item(&self, item: SelectItem) {
        let updated = {
            let mut items = self.items.borrow_mut();
            match items.iter_mut().find(|i| i.id == item.id) {
                Some(existing) => {
                    existing.text = item.text;
                    true
                }
                None => false,
            }
        };
        if updated {
            self.redraw_all(false);
        }
    }

    pub fn swap_items(&self, first_id: i32, second_id: i32) {
        let swapped = {
            let mut items = self.items.borrow_mut();
            let first = items.iter().position(|i| i.id == first_id);
            let second = items.iter().position(|i| i.id == second_id);
            match (first, second) {
                (Some(a), Some(b)) => {
                    items.swap(a, b);
                    true
                }
                _ => false,
            }
        };
        if swapped {
            self.redraw_all(false);
        }
    }

    pub fn delete_item(&self, id: i32) {
        let removed = {
            let mut items = self.items.borrow_mut();
            match items.iter().position(|i| i.id == id) {
                Some(index) => {
                    items.remove(index);
                    Some((index, items.len()))
                }
                None => None,
            }
        };

        if let Some((index, len)) = removed {
            let selected = self.selected.get();
            if index < selected || selected >= len {
                self.selected.set(selected.saturating_sub(1));
            }
            self.active_item.set(None);
            self.redraw_all(true);
        }
    }

    pub fn item_height(&self) -> i32 {
        self.item_height.get()
    }

    pub fn set_item_height(&self, item_height: i32) {
        self.item_height.set(item_height.max(1));
    }

    /// Currently selected item, `None` when the list is empty
    pub fn selected_item(&self) -> Option<SelectItem> {
        self.items.borrow().get(self.selected.get()).cloned()
    }

    /// Select by id without firing the change callback
    pub fn select_item_id(&self, id: i32) {
        let index = self.items.borrow().iter().position(|i| i.id == id);
        if let Some(index) = index {
            self.selected.set(index);
            self.base.redraw();
        }
    }

    pub fn set_change_callback(&self, callback: impl Fn(i32, &str) + 'static) {
        *self.change_callback.borrow_mut() = Some(Rc::new(callback));
    }

    pub fn expanded(&self) -> bool {
        self.expanded.get()
    }

    fn list_height(&self) -> i32 {
        self.items.borrow().len() as i32 * self.item_height.get()
    }

    fn full_position(&self) -> Rect {
        let position = self.base.position();
        if self.expanded.get() {
            Rect::new(
                position.left,
                position.top,
                position.right,
                position.bottom + self.list_height(),
            )
        } else {
            position
        }
    }

    fn redraw_all(&self, clear: bool) {
        if self.base.showed() {
            self.base.redraw_rect(&self.full_position(), clear);
        }
    }

    fn expand(&self) {
        if self.expanded.get() || self.items.borrow().is_empty() {
            return;
        }
        self.expanded.set(true);
        self.active_item.set(Some(self.selected.get()));
        self.redraw_all(false);
    }

    fn collapse(&self) {
        if !self.expanded.get() {
            return;
        }
        let area = self.full_position();
        self.expanded.set(false);
        self.active_item.set(None);
        if self.base.showed() {
            self.base.redraw_rect(&area, true);
        }
    }

    /// Index of the list item under `y`, if the list is expanded
    fn item_at(&self, y: i32) -> Option<usize> {
        if !self.expanded.get() {
            return None;
        }
        let list_top = self.base.position().bottom;
        if y <= list_top {
            return None;
        }
        let index = ((y - list_top - 1) / self.item_height.get()) as usize;
        (index < self.items.borrow().len()).then_some(index)
    }

    fn select_index(&self, index: usize) {
        let item = self.items.borrow().get(index).cloned();
        let Some(item) = item else {
            return;
        };
        self.selected.set(index);
        self.redraw_all(false);

        let callback = self.change_callback.borrow().clone();
        if let Some(callback) = callback {
            callback(item.id, &item.text);
        }
    }

    fn mouse_event(&self, me: &MouseEvent) {
        match me.kind {
            MouseEventType::Leave => self.collapse(),
            MouseEventType::Move => {
                let active = self.item_at(me.y);
                if active.is_some() && active != self.active_item.get() {
                    self.active_item.set(active);
                    self.redraw_all(false);
                }
            }
            MouseEventType::LeftUp => {
                if !self.expanded.get() {
                    self.expand();
                } else if let Some(index) = self.item_at(me.y) {
                    self.collapse();
                    self.select_index(index);
                } else {
                    self.collapse();
                }
            }
            _ => {}
        }
    }
}

impl Control for Select {
    fn draw(&self, gr: &mut dyn Graphic, _paint_rect: &Rect) {
        let position = self.base.position();
        if !self.base.showed() || position.is_empty() {
            return;
        }

        let border = if self.base.focused() {
            self.base.color("focused_border")
        } else {
            self.base.color("border")
        };
        let background = self.base.color("background");
        let border_width = self.base.dimension("border_width");
        let round = self.base.dimension("round");
        let text_color = self.base.color("text");
        let font = self.base.font("font");

        gr.draw_rect(&position, border, background, border_width, round);

        if let Some(item) = self.selected_item() {
            let extent = gr.measure_text(&item.text, &font);
            let top = position.top + (position.height() - extent.height()) / 2;
            gr.draw_text(
                &Rect::from_pos_size(position.left + TEXT_INDENT, top, 0, 0),
                &item.text,
                text_color,
                &font,
            );
        }

        if !self.expanded.get() {
            return;
        }

        let item_height = self.item_height.get();
        let list = Rect::new(
            position.left,
            position.bottom,
            position.right,
            position.bottom + self.list_height(),
        );
        gr.draw_rect(&list, border, background, border_width, 0);

        let active = self.active_item.get();
        for (index, item) in self.items.borrow().iter().enumerate() {
            let row = Rect::from_pos_size(
                list.left + border_width,
                list.top + index as i32 * item_height,
                list.width() - border_width * 2,
                item_height,
            );
            if active == Some(index) {
                let color = self.base.color("active_item");
                gr.draw_rect(&row, color, color, 0, 0);
            } else if index == self.selected.get() {
                let color = self.base.color("selected_item");
                gr.draw_rect(&row, color, color, 0, 0);
            }

            let extent = gr.measure_text(&item.text, &font);
            gr.draw_text(
                &Rect::from_pos_size(
                    row.left + TEXT_INDENT,
                    row.top + (item_height - extent.height()) / 2,
                    0,
                    0,
                ),
                &item.text,
                text_color,
                &font,
            );
        }
    }

    fn receive_event(&self, ev: &Event) {
        if !self.base.live() {
            return;
        }

        match ev {
            Event::Mouse(me) => self.mouse_event(me),
            Event::Keyboard(ke) if ke.kind == KeyboardEventType::KeyDown => {
                let selected = self.selected.get();
                let len = self.items.borrow().len();
                match ke.key {
                    Key::Up if selected > 0 => self.select_index(selected - 1),
                    Key::Down if selected + 1 < len => self.select_index(selected + 1),
                    Key::Escape => self.collapse(),
                    _ => {}
                }
            }
            Event::Internal(_) => {
                if self.expanded.get() {
                    self.collapse();
                } else {
                    self.expand();
                }
            }
            _ => {}
        }
    }

    fn set_position(&self, position: Rect) {
        self.collapse();
        self.base.set_position(position);
    }

    fn position(&self) -> Rect {
        self.full_position()
    }

    fn set_parent(&self, parent: &Rc<Window>) {
        self.base.set_parent(parent);
    }

    fn clear_parent(&self) {
        self.expanded.set(false);
        self.base.clear_parent();
    }

    fn parent(&self) -> Option<Rc<Window>> {
        self.base.parent()
    }

    fn topmost(&self) -> bool {
        self.expanded.get()
    }

    fn set_focus(&self) {
        if self.base.focusing() {
            self.base.set_focused(true);
            self.base.redraw();
        }
    }

    fn remove_focus(&self) -> bool {
        self.collapse();
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
        self.base.update_theme(theme);
    }

    fn show(&self) {
        self.base.set_showed(true);
        self.base.redraw();
    }

    fn hide(&self) {
        self.collapse();
        self.base.set_showed(false);
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
        self.collapse();
        self.base.set_enabled(false);
        self.base.redraw();
    }

    fn enabled(&self) -> bool {
        self.base.enabled()
    }
}
