//! Text input field

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use super::{Control, ControlBase};
use crate::event::{Event, Key, KeyboardEvent, KeyboardEventType, MouseEvent, MouseEventType};
use crate::graphic::{Font, Graphic};
use crate::math::Rect;
use crate::platform::{CursorShape, TimerId};
use crate::theme::Theme;
use crate::window::Window;

/// Cursor blink half-period
pub const CURSOR_BLINK_MS: u32 = 500;

/// Padding between the frame and the text
const HORIZONTAL_INDENT: i32 = 5;

/// Horizontal scroll granularity
const SCROLL_STEP: i32 = 10;

/// Presentation of the edited text
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InputView {
    #[default]
    Singleline,
    /// Accepts return as a newline character
    Multiline,
    /// Renders every character as `*`
    Password,
}

/// Editable text field
///
/// Cursor and selection positions are byte offsets that always sit on
/// character boundaries.
pub struct Input {
    base: ControlBase,
    self_ref: Weak<Input>,
    view: Cell<InputView>,
    text: RefCell<String>,
    change_callback: RefCell<Option<Rc<dyn Fn(&str)>>>,
    cursor_position: Cell<usize>,
    select_start: Cell<usize>,
    select_end: Cell<usize>,
    selecting: Cell<bool>,
    cursor_visible: Cell<bool>,
    /// Horizontal scroll offset of the text inside the frame
    left_shift: Cell<i32>,
    timer: Cell<Option<TimerId>>,
}

impl Input {
    pub const TC: &'static str = "input";

    pub fn new(text: &str, view: InputView, theme: Option<Rc<dyn Theme>>) -> Rc<Self> {
        Rc::new_cyclic(|self_ref| Self {
            base: ControlBase::new(Self::TC, theme),
            self_ref: self_ref.clone(),
            view: Cell::new(view),
            text: RefCell::new(text.to_string()),
            change_callback: RefCell::new(None),
            cursor_position: Cell::new(0),
            select_start: Cell::new(0),
            select_end: Cell::new(0),
            selecting: Cell::new(false),
            cursor_visible: Cell::new(false),
            left_shift: Cell::new(0),
            timer: Cell::new(None),
        })
    }

    pub fn text(&self) -> String {
        self.text.borrow().clone()
    }

    /// Replace the text; cursor and selection are reset to the start
    pub fn set_text(&self, text: &str) {
        *self.text.borrow_mut() = text.to_string();
        self.cursor_position.set(0);
        self.reset_selection();
        self.base.redraw();
    }

    pub fn view(&self) -> InputView {
        self.view.get()
    }

    pub fn set_view(&self, view: InputView) {
        self.view.set(view);
        self.base.redraw();
    }

    pub fn set_change_callback(&self, callback: impl Fn(&str) + 'static) {
        *self.change_callback.borrow_mut() = Some(Rc::new(callback));
    }

    pub fn cursor_position(&self) -> usize {
        self.cursor_position.get()
    }

    /// Selected byte range, ordered
    pub fn selection(&self) -> (usize, usize) {
        let (a, b) = (self.select_start.get(), self.select_end.get());
        (a.min(b), a.max(b))
    }

    pub fn selected_text(&self) -> String {
        let (start, end) = self.selection();
        self.text.borrow()[start..end].to_string()
    }

    pub fn left_shift(&self) -> i32 {
        self.left_shift.get()
    }

    pub fn cursor_visible(&self) -> bool {
        self.cursor_visible.get()
    }

    pub fn select_all(&self) {
        self.select_start.set(0);
        self.select_end.set(self.text.borrow().len());
        self.base.redraw();
    }

    fn notify_change(&self) {
        let callback = self.change_callback.borrow().clone();
        if let Some(callback) = callback {
            let text = self.text.borrow().clone();
            callback(&text);
        }
    }

    fn reset_selection(&self) {
        self.selecting.set(false);
        self.select_start.set(0);
        self.select_end.set(0);
    }

    fn prev_boundary(&self, pos: usize) -> usize {
        self.text.borrow()[..pos]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    fn next_boundary(&self, pos: usize) -> usize {
        let text = self.text.borrow();
        text[pos..]
            .chars()
            .next()
            .map(|c| pos + c.len_utf8())
            .unwrap_or(pos)
    }

    /// Text as rendered (masked for passwords)
    fn display_text(&self) -> String {
        let text = self.text.borrow();
        match self.view.get() {
            InputView::Password => "*".repeat(text.chars().count()),
            _ => text.clone(),
        }
    }

    /// Rendered prefix corresponding to the first `byte_len` bytes
    fn display_prefix(&self, byte_len: usize) -> String {
        let text = self.text.borrow();
        match self.view.get() {
            InputView::Password => "*".repeat(text[..byte_len].chars().count()),
            _ => text[..byte_len].to_string(),
        }
    }

    fn prefix_width(&self, byte_len: usize, font: &Font) -> i32 {
        if byte_len == 0 {
            return 0;
        }
        self.base.measure_text(&self.display_prefix(byte_len), font).width()
    }

    /// Character boundary closest to pointer column `x`
    fn cursor_at(&self, x: i32) -> usize {
        let len = self.text.borrow().len();
        if len == 0 {
            return 0;
        }

        let x = x - (self.base.position().left + HORIZONTAL_INDENT - self.left_shift.get());
        let font = self.base.font("font");

        let boundaries: Vec<usize> = {
            let text = self.text.borrow();
            text.char_indices().map(|(i, _)| i).skip(1).chain(std::iter::once(len)).collect()
        };
        if x <= 0 {
            return 0;
        }
        boundaries
            .into_iter()
            .find(|&b| self.prefix_width(b, &font) >= x)
            .unwrap_or(len)
    }

    /// Extend or drop the selection after a cursor movement
    fn update_selection(&self, shift: bool, start: usize, end: usize) {
        if shift {
            if !self.selecting.get() {
                self.selecting.set(true);
                self.select_start.set(start);
            }
            self.select_end.set(end);
        } else {
            self.reset_selection();
        }
    }

    /// Delete the selected range; returns false when nothing was selected
    fn clear_selected_text(&self) -> bool {
        let (start, end) = self.selection();
        if start == end {
            return false;
        }
        self.text.borrow_mut().replace_range(start..end, "");
        self.cursor_position.set(start);
        self.reset_selection();
        true
    }

    fn select_word_at(&self, x: i32) {
        let cursor = self.cursor_at(x);
        self.cursor_position.set(cursor);

        let text = self.text.borrow();
        let start = text[..cursor].rfind(' ').map(|i| i + 1).unwrap_or(0);
        let end = text[cursor..].find(' ').map(|i| cursor + i).unwrap_or(text.len());
        drop(text);

        self.select_start.set(start);
        self.select_end.set(end);
        self.base.redraw();
    }

    fn insert(&self, s: &str) {
        self.clear_selected_text();
        let cursor = self.cursor_position.get();
        self.text.borrow_mut().insert_str(cursor, s);
        self.cursor_position.set(cursor + s.len());
        self.base.redraw();
        self.notify_change();
    }

    fn copy(&self) {
        let selected = self.selected_text();
        if selected.is_empty() || self.view.get() == InputView::Password {
            return;
        }
        if let Some(platform) = self.base.platform() {
            platform.set_clipboard_text(&selected);
        }
    }

    fn cut(&self) {
        if self.selected_text().is_empty() {
            return;
        }
        self.copy();
        self.clear_selected_text();
        self.base.redraw();
        self.notify_change();
    }

    fn paste(&self) {
        let text = self.base.platform().and_then(|p| p.clipboard_text());
        if let Some(text) = text {
            let text = match self.view.get() {
                InputView::Multiline => text,
                _ => text.replace(['\r', '\n'], ""),
            };
            self.insert(&text);
        }
    }

    fn start_blink(&self) {
        self.stop_blink();
        let Some(platform) = self.base.platform() else {
            return;
        };
        let weak = self.self_ref.clone();
        let id = platform.start_timer(
            CURSOR_BLINK_MS,
            Box::new(move || {
                if let Some(input) = weak.upgrade() {
                    input.blink();
                }
            }),
        );
        self.timer.set(Some(id));
    }

    fn stop_blink(&self) {
        if let Some(id) = self.timer.take() {
            if let Some(platform) = self.base.platform() {
                platform.stop_timer(id);
            }
        }
    }

    fn blink(&self) {
        self.cursor_visible.set(!self.cursor_visible.get());
        self.base.redraw();
    }

    fn mouse_event(&self, me: &MouseEvent) {
        match me.kind {
            MouseEventType::Enter => self.base.set_cursor(CursorShape::IBeam),
            MouseEventType::Leave => {
                if self.selecting.get() {
                    // Dragging out of the field selects to the edge
                    let edge = if self.select_start.get() < self.select_end.get() {
                        self.text.borrow().len()
                    } else {
                        0
                    };
                    self.select_end.set(edge);
                    self.cursor_position.set(edge);
                    self.base.redraw();
                }
                self.selecting.set(false);
                self.base.set_cursor(CursorShape::Default);
            }
            MouseEventType::LeftDown => {
                let cursor = self.cursor_at(me.x);
                self.cursor_position.set(cursor);
                self.selecting.set(true);
                self.select_start.set(cursor);
                self.select_end.set(cursor);
                self.base.redraw();
            }
            MouseEventType::LeftUp => self.selecting.set(false),
            MouseEventType::Move => {
                if self.selecting.get() {
                    let cursor = self.cursor_at(me.x);
                    if cursor != self.cursor_position.get() {
                        self.cursor_position.set(cursor);
                        self.select_end.set(cursor);
                        self.base.redraw();
                    }
                }
            }
            MouseEventType::LeftDouble => self.select_word_at(me.x),
        }
    }

    fn key_down(&self, ke: &KeyboardEvent) {
        self.stop_blink();
        self.cursor_visible.set(true);

        let shift = ke.modifiers.shift;
        let cursor = self.cursor_position.get();
        let len = self.text.borrow().len();

        match ke.key {
            Key::Left if cursor > 0 => {
                let next = self.prev_boundary(cursor);
                self.cursor_position.set(next);
                self.update_selection(shift, cursor, next);
                self.base.redraw();
            }
            Key::Right if cursor < len => {
                let next = self.next_boundary(cursor);
                self.cursor_position.set(next);
                self.update_selection(shift, cursor, next);
                self.base.redraw();
            }
            Key::Home => {
                self.update_selection(shift, cursor, 0);
                self.cursor_position.set(0);
                self.base.redraw();
            }
            Key::End if len > 0 => {
                self.update_selection(shift, cursor, len);
                self.cursor_position.set(len);
                self.base.redraw();
            }
            Key::Backspace if cursor > 0 || self.selection().0 != self.selection().1 => {
                if !self.clear_selected_text() {
                    let prev = self.prev_boundary(cursor);
                    self.text.borrow_mut().replace_range(prev..cursor, "");
                    self.cursor_position.set(prev);
                }
                self.base.redraw();
                self.notify_change();
            }
            Key::Delete if len > 0 => {
                if !self.clear_selected_text() {
                    if cursor >= len {
                        return;
                    }
                    let next = self.next_boundary(cursor);
                    self.text.borrow_mut().replace_range(cursor..next, "");
                }
                self.base.redraw();
                self.notify_change();
            }
            _ => {}
        }
    }

    fn keyboard_event(&self, ke: &KeyboardEvent) {
        match ke.kind {
            KeyboardEventType::KeyDown => self.key_down(ke),
            KeyboardEventType::KeyUp => {
                if self.base.focused() {
                    self.start_blink();
                }
                if ke.key == Key::Shift {
                    self.selecting.set(false);
                }
            }
            KeyboardEventType::Char => {
                let Key::Char(ch) = ke.key else {
                    return;
                };

                match ke.key.control_letter() {
                    Some('c') => return self.copy(),
                    Some('x') => return self.cut(),
                    Some('v') => return self.paste(),
                    Some('a') => return self.select_all(),
                    Some(_) => return,
                    None => {}
                }

                let ch = match ch {
                    '\r' | '\n' if self.view.get() == InputView::Multiline => '\n',
                    c if c.is_control() => return,
                    c => c,
                };
                self.insert(ch.encode_utf8(&mut [0; 4]));
            }
        }
    }

    /// Adjust the scroll offset so the cursor column stays inside the frame
    fn scroll_to_cursor(&self, cursor_x: i32, visible_width: i32) {
        let mut shift = self.left_shift.get();
        while cursor_x - shift >= visible_width && visible_width > 0 {
            shift += SCROLL_STEP;
        }
        while shift > cursor_x {
            shift -= SCROLL_STEP;
        }
        self.left_shift.set(shift.max(0));
    }
}

impl Control for Input {
    fn draw(&self, gr: &mut dyn Graphic, _paint_rect: &Rect) {
        let position = self.base.position();
        if !self.base.showed() || position.is_empty() || position.width() <= HORIZONTAL_INDENT * 2 {
            return;
        }

        let border = if self.base.focused() {
            self.base.color("focused_border")
        } else {
            self.base.color("border")
        };
        let background = self.base.color("background");
        gr.draw_rect(&position, border, background, 1, self.base.dimension("round"));

        let font = self.base.font("font");
        let shown = self.display_text();
        let line_height = gr.measure_text("QWqb", &font).height();

        let cursor_x = if self.cursor_position.get() == 0 {
            0
        } else {
            gr.measure_text(&self.display_prefix(self.cursor_position.get()), &font).width()
        };
        let visible_width = position.width() - HORIZONTAL_INDENT * 2;
        self.scroll_to_cursor(cursor_x, visible_width);

        let (sel_start, sel_end) = self.selection();
        let selection = if sel_start != sel_end {
            let start_x = gr.measure_text(&self.display_prefix(sel_start), &font).width();
            let end_x = gr.measure_text(&self.display_prefix(sel_end), &font).width();
            Some(Rect::new(start_x, 0, end_x, line_height))
        } else {
            None
        };

        let vertical_indent = ((position.height() - line_height) / 2).max(0);
        let clip = Rect::from_pos_size(
            position.left + HORIZONTAL_INDENT,
            position.top + vertical_indent,
            visible_width,
            position.height() - vertical_indent * 2,
        );

        let text_color = self.base.color("text");
        let selection_color = self.base.color("selection");
        let cursor_color = if self.cursor_visible.get() {
            self.base.color("cursor")
        } else {
            background
        };

        gr.draw_clipped(&clip, self.left_shift.get(), &mut |mem: &mut dyn Graphic| {
            if let Some(selection) = &selection {
                mem.draw_rect(selection, selection_color, selection_color, 0, 0);
            }
            mem.draw_text(&Rect::ZERO, &shown, text_color, &font);
            mem.draw_line(&Rect::new(cursor_x, 0, cursor_x, line_height), cursor_color, 1);
        });
    }

    fn receive_event(&self, ev: &Event) {
        if !self.base.live() {
            return;
        }

        match ev {
            Event::Mouse(me) => self.mouse_event(me),
            Event::Keyboard(ke) => self.keyboard_event(ke),
            // Return reaches a multiline field as the window's execute request
            Event::Internal(_) if self.view.get() == InputView::Multiline => self.insert("\n"),
            Event::Internal(_) => {}
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
    }

    fn clear_parent(&self) {
        self.stop_blink();
        self.base.clear_parent();
    }

    fn parent(&self) -> Option<Rc<Window>> {
        self.base.parent()
    }

    fn set_focus(&self) {
        if self.base.focusing() {
            self.base.set_focused(true);
            self.base.redraw();
            self.start_blink();
        }
    }

    fn remove_focus(&self) -> bool {
        self.base.set_focused(false);
        self.cursor_visible.set(false);
        self.reset_selection();
        self.stop_blink();
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
        self.base.set_enabled(false);
        self.base.redraw();
    }

    fn enabled(&self) -> bool {
        self.base.enabled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Modifiers;
    use crate::graphic::{DrawOp, RecordingGraphic};

    fn key(input: &Input, key: Key, modifiers: Modifiers) {
        input.receive_event(&Event::key_down(key, modifiers));
    }

    fn type_str(input: &Input, s: &str) {
        for c in s.chars() {
            input.receive_event(&Event::char(c, Modifiers::NONE));
        }
    }

    #[test]
    fn test_typing_inserts_at_cursor() {
        let input = Input::new("", InputView::Singleline, None);
        type_str(&input, "helo");
        key(&input, Key::Left, Modifiers::NONE);
        type_str(&input, "l");
        assert_eq!(input.text(), "hello");
        assert_eq!(input.cursor_position(), 4);
    }

    #[test]
    fn test_change_callback_fires() {
        let input = Input::new("", InputView::Singleline, None);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        input.set_change_callback(move |t| sink.borrow_mut().push(t.to_string()));

        type_str(&input, "ab");
        key(&input, Key::Backspace, Modifiers::NONE);
        assert_eq!(*seen.borrow(), vec!["a", "ab", "a"]);
    }

    #[test]
    fn test_singleline_ignores_return() {
        let input = Input::new("x", InputView::Singleline, None);
        input.receive_event(&Event::char('\r', Modifiers::NONE));
        assert_eq!(input.text(), "x");

        let multi = Input::new("", InputView::Multiline, None);
        multi.receive_event(&Event::char('\r', Modifiers::NONE));
        assert_eq!(multi.text(), "\n");
    }

    #[test]
    fn test_shift_selection_and_delete() {
        let input = Input::new("", InputView::Singleline, None);
        type_str(&input, "hello world");
        key(&input, Key::Home, Modifiers::NONE);
        for _ in 0..5 {
            key(&input, Key::Right, Modifiers::SHIFT);
        }
        assert_eq!(input.selected_text(), "hello");

        key(&input, Key::Delete, Modifiers::NONE);
        assert_eq!(input.text(), " world");
        assert_eq!(input.cursor_position(), 0);
    }

    #[test]
    fn test_unmodified_move_drops_selection() {
        let input = Input::new("", InputView::Singleline, None);
        type_str(&input, "abc");
        key(&input, Key::Home, Modifiers::SHIFT);
        assert_eq!(input.selection(), (0, 3));
        key(&input, Key::End, Modifiers::NONE);
        assert_eq!(input.selection(), (0, 0));
        assert_eq!(input.cursor_position(), 3);
    }

    #[test]
    fn test_cursor_moves_over_multibyte_chars() {
        let input = Input::new("", InputView::Singleline, None);
        type_str(&input, "aöb");
        assert_eq!(input.cursor_position(), 4);
        key(&input, Key::Left, Modifiers::NONE);
        key(&input, Key::Left, Modifiers::NONE);
        assert_eq!(input.cursor_position(), 1);
        key(&input, Key::Delete, Modifiers::NONE);
        assert_eq!(input.text(), "ab");
        key(&input, Key::Backspace, Modifiers::NONE);
        assert_eq!(input.text(), "b");
    }

    #[test]
    fn test_select_all_and_replace() {
        let input = Input::new("", InputView::Singleline, None);
        type_str(&input, "old");
        input.receive_event(&Event::char('\u{1}', Modifiers::CTRL));
        assert_eq!(input.selected_text(), "old");
        type_str(&input, "n");
        assert_eq!(input.text(), "n");
    }

    #[test]
    fn test_double_click_selects_word() {
        let input = Input::new("", InputView::Singleline, None);
        input.set_position(Rect::new(0, 0, 300, 30));
        type_str(&input, "one two three");
        // Default font: 9px glyphs, text starts at x = 5
        input.receive_event(&Event::mouse(MouseEventType::LeftDouble, 5 + 9 * 5, 10));
        assert_eq!(input.selected_text(), "two");
    }

    #[test]
    fn test_click_places_cursor() {
        let input = Input::new("abcdef", InputView::Singleline, None);
        input.set_position(Rect::new(0, 0, 300, 30));
        input.receive_event(&Event::mouse(MouseEventType::LeftDown, 5 + 9 * 3, 10));
        assert_eq!(input.cursor_position(), 3);
        input.receive_event(&Event::mouse(MouseEventType::Move, 5 + 9 * 5, 10));
        assert_eq!(input.selection(), (3, 5));
        input.receive_event(&Event::mouse(MouseEventType::LeftUp, 5 + 9 * 5, 10));
        input.receive_event(&Event::mouse(MouseEventType::Move, 5, 10));
        assert_eq!(input.selection(), (3, 5));
    }

    #[test]
    fn test_password_draws_masked() {
        let input = Input::new("secret", InputView::Password, None);
        input.set_position(Rect::new(0, 0, 200, 30));
        let mut gr = RecordingGraphic::new();
        input.draw(&mut gr, &Rect::new(0, 0, 800, 600));
        assert_eq!(gr.texts(), vec!["******"]);
    }

    #[test]
    fn test_scroll_keeps_cursor_visible() {
        let input = Input::new("", InputView::Singleline, None);
        input.set_position(Rect::new(0, 0, 60, 30));
        type_str(&input, "abcdefghijkl");

        let mut gr = RecordingGraphic::new();
        input.draw(&mut gr, &Rect::new(0, 0, 800, 600));

        // 12 glyphs * 9px = 108px cursor column, 50px visible
        assert!(input.left_shift() > 108 - 50);
        assert!(gr
            .ops()
            .iter()
            .any(|op| matches!(op, DrawOp::Clip { left_shift, .. } if *left_shift == input.left_shift())));

        key(&input, Key::Home, Modifiers::NONE);
        gr.clear();
        input.draw(&mut gr, &Rect::new(0, 0, 800, 600));
        assert_eq!(input.left_shift(), 0);
    }

    #[test]
    fn test_remove_focus_clears_state() {
        let input = Input::new("", InputView::Singleline, None);
        input.set_focus();
        assert!(input.focused());
        type_str(&input, "abc");
        key(&input, Key::Home, Modifiers::SHIFT);
        assert!(input.remove_focus());
        assert!(!input.focused());
        assert_eq!(input.selection(), (0, 0));
        assert!(!input.cursor_visible());
    }
}
