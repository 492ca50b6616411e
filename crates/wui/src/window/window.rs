//! Window: child composition, event routing, focus and lifecycle

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use super::{WindowConfig, WindowState, WindowType};
use crate::control::{same_control, Button, Control};
use crate::error::{ErrorKind, WuiError, WuiResult};
use crate::event::{Event, InternalEvent, Key, KeyboardEventType, MouseEvent, MouseEventType};
use crate::graphic::{Color, Font, Graphic};
use crate::math::Rect;
use crate::platform::{CursorShape, NativeHandle, Platform, PlatformAdapter, ShowCommand};
use crate::theme::{self, Theme, ThemeMap};

const EXPAND_CAPTION: &str = "□";
const RESTORE_CAPTION: &str = "❐";
const CLOSE_BUTTON_ACTIVE: Color = Color::rgb(235, 15, 20);

/// Caption offset from the window's top-left corner
const CAPTION_INDENT: i32 = 5;

/// Native resources of a top-level window
struct NativeWindow {
    handle: NativeHandle,
    adapter: Rc<PlatformAdapter>,
}

/// Composite control owning an ordered list of children
///
/// A window without a parent is top-level: [`Window::init`] backs it with
/// a native window and its children are positioned in window-local
/// coordinates. A window added to another window is docked: it shares the
/// top-level window's coordinate space, so its children's positions are
/// stored already translated by the docked window's own position.
///
/// Insertion order is z-order: children are drawn in order and the first
/// child containing a point wins hit-testing, topmost children first.
pub struct Window {
    self_ref: Weak<Window>,
    controls: RefCell<Vec<Rc<dyn Control>>>,
    /// Child currently under the pointer
    active_control: RefCell<Option<Weak<dyn Control>>>,
    /// Index into the focusable subsequence of `controls`
    focused_index: Cell<usize>,
    parent: RefCell<Weak<Window>>,
    position: Cell<Rect>,
    /// Rect restored by [`Window::normal`]
    normal_position: Cell<Rect>,
    caption: RefCell<String>,
    window_state: Cell<WindowState>,
    config: RefCell<WindowConfig>,
    theme: RefCell<Option<Rc<dyn Theme>>>,
    showed: Cell<bool>,
    enabled: Cell<bool>,
    title_showed: Cell<bool>,
    native: RefCell<Option<NativeWindow>>,
    close_callback: RefCell<Option<Rc<dyn Fn()>>>,
    size_change_callback: RefCell<Option<Rc<dyn Fn(i32, i32)>>>,
    minimize_button: Rc<Button>,
    expand_button: Rc<Button>,
    close_button: Rc<Button>,
}

impl Window {
    /// Theme control name
    pub const TC: &'static str = "window";

    pub fn new(theme: Option<Rc<dyn Theme>>) -> Rc<Self> {
        Rc::new_cyclic(|me: &Weak<Window>| {
            let weak = me.clone();
            let minimize_button = Button::new("_", move || {
                if let Some(window) = weak.upgrade() {
                    window.minimize();
                }
            });

            let weak = me.clone();
            let expand_button = Button::new(EXPAND_CAPTION, move || {
                if let Some(window) = weak.upgrade() {
                    if window.window_state() == WindowState::Normal {
                        window.expand();
                    } else {
                        window.normal();
                    }
                }
            });

            let weak = me.clone();
            let close_button = Button::new("✕", move || {
                if let Some(window) = weak.upgrade() {
                    window.destroy();
                }
            });

            for button in [&minimize_button, &expand_button, &close_button] {
                button.disable_focusing();
            }

            Self {
                self_ref: me.clone(),
                controls: RefCell::new(Vec::new()),
                active_control: RefCell::new(None),
                focused_index: Cell::new(0),
                parent: RefCell::new(Weak::new()),
                position: Cell::new(Rect::ZERO),
                normal_position: Cell::new(Rect::ZERO),
                caption: RefCell::new(String::new()),
                window_state: Cell::new(WindowState::Normal),
                config: RefCell::new(WindowConfig::default()),
                theme: RefCell::new(theme),
                showed: Cell::new(true),
                enabled: Cell::new(true),
                title_showed: Cell::new(true),
                native: RefCell::new(None),
                close_callback: RefCell::new(None),
                size_change_callback: RefCell::new(None),
                minimize_button,
                expand_button,
                close_button,
            }
        })
    }

    // ========================================================================
    // Child management
    // ========================================================================

    /// Attach `control` at `position`, given in this window's local space
    ///
    /// No-op if the control is already a child. A control attached to
    /// another window is detached from it first.
    pub fn add_control(&self, control: Rc<dyn Control>, position: Rect) {
        let Some(me) = self.self_ref.upgrade() else {
            return;
        };
        if self.contains(&control) || self.is_self_or_ancestor(&control) {
            return;
        }

        if let Some(old_parent) = control.parent() {
            old_parent.remove_control(&control);
        }

        let resolved = self.client_rect().offset_child(&position);
        control.set_parent(&me);
        control.set_position(resolved);
        self.controls.borrow_mut().push(control);

        tracing::debug!(position = ?resolved, "control added");
        self.redraw(&resolved, false);
    }

    /// Whether `control` is this window or one of its parents
    fn is_self_or_ancestor(&self, control: &Rc<dyn Control>) -> bool {
        let mut current = self.self_ref.upgrade();
        while let Some(window) = current {
            let window_control: Rc<dyn Control> = window.clone();
            if same_control(&window_control, control) {
                return true;
            }
            current = window.parent();
        }
        false
    }

    /// Detach `control`; no-op if it is not a child
    pub fn remove_control(&self, control: &Rc<dyn Control>) {
        if !self.contains(control) {
            return;
        }

        control.clear_parent();
        self.redraw(&control.position(), true);
        self.controls.borrow_mut().retain(|c| !same_control(c, control));

        let was_active = self
            .active_control()
            .is_some_and(|active| same_control(&active, control));
        if was_active {
            *self.active_control.borrow_mut() = None;
        }

        let focusable = self.focusable_controls().len();
        if self.focused_index.get() >= focusable {
            self.focused_index.set(0);
        }

        tracing::debug!(position = ?control.position(), "control removed");
    }

    pub fn contains(&self, control: &Rc<dyn Control>) -> bool {
        self.controls.borrow().iter().any(|c| same_control(c, control))
    }

    /// Snapshot of the child list in z-order
    pub fn controls(&self) -> Vec<Rc<dyn Control>> {
        self.controls.borrow().clone()
    }

    /// Child currently under the pointer, if it is still alive
    pub fn active_control(&self) -> Option<Rc<dyn Control>> {
        self.active_control.borrow().as_ref().and_then(Weak::upgrade)
    }

    pub fn focused_index(&self) -> usize {
        self.focused_index.get()
    }

    /// Area children are positioned relative to, in the coordinate space
    /// of the top-level window
    fn client_rect(&self) -> Rect {
        if self.parent().is_some() {
            self.position.get()
        } else {
            self.position.get().at_origin()
        }
    }

    fn focusable_controls(&self) -> Vec<Rc<dyn Control>> {
        self.controls().into_iter().filter(|c| c.focusing()).collect()
    }

    fn focused_control(&self) -> Option<Rc<dyn Control>> {
        self.controls().into_iter().find(|c| c.focused())
    }

    // ========================================================================
    // Redraw and painting
    // ========================================================================

    /// Request a repaint of `rect`, bubbling up to the top-level window
    pub fn redraw(&self, rect: &Rect, clear: bool) {
        if let Some(parent) = self.parent() {
            parent.redraw(rect, clear);
        } else if let Some((handle, platform)) = self.native_parts() {
            platform.invalidate(handle, rect, clear);
        }
    }

    /// Paint a top-level window: background, caption, then children
    /// overlapping `damage`
    pub fn paint(&self, gr: &mut dyn Graphic, damage: &Rect) {
        if !self.showed.get() {
            return;
        }

        let background = self.theme_color("background");
        gr.draw_rect(&self.position.get().at_origin(), background, background, 0, 0);
        self.draw_caption(gr, &self.client_rect());
        self.draw_children(gr, damage);
    }

    fn draw_caption(&self, gr: &mut dyn Graphic, client: &Rect) {
        let caption = self.caption.borrow();
        if !self.title_showed.get() || caption.is_empty() {
            return;
        }
        gr.draw_text(
            &Rect::from_pos_size(client.left + CAPTION_INDENT, client.top + CAPTION_INDENT, 0, 0),
            &caption,
            self.theme_color("text"),
            &self.theme_font("caption_font"),
        );
    }

    fn draw_children(&self, gr: &mut dyn Graphic, paint_rect: &Rect) {
        let controls = self.controls();
        let (topmost, regular): (Vec<_>, Vec<_>) = controls.into_iter().partition(|c| c.topmost());
        for control in regular.iter().chain(topmost.iter()) {
            if control.position().overlaps(paint_rect) {
                control.draw(gr, paint_rect);
            }
        }
    }

    // ========================================================================
    // Event routing
    // ========================================================================

    fn send_mouse_event(&self, me: &MouseEvent) {
        if me.kind == MouseEventType::Leave {
            if let Some(active) = self.take_active() {
                tracing::trace!("pointer left window, leaving active control");
                active.receive_event(&Event::mouse(MouseEventType::Leave, me.x, me.y));
            }
            return;
        }

        let mut active = self.active_control();
        match &active {
            Some(previous) if !previous.showed() || !previous.position().contains(me.x, me.y) => {
                *self.active_control.borrow_mut() = None;
                tracing::trace!(x = me.x, y = me.y, "leave");
                previous.receive_event(&Event::mouse(MouseEventType::Leave, me.x, me.y));
                active = None;
            }
            Some(_) => {}
            // Dead weak reference
            None => *self.active_control.borrow_mut() = None,
        }

        let Some(target) = self.control_at(me.x, me.y) else {
            return;
        };

        match active {
            Some(active) if same_control(&active, &target) => {
                if me.kind == MouseEventType::LeftUp {
                    self.set_focused(&target);
                }
                target.receive_event(&Event::Mouse(*me));
            }
            previous => {
                if let Some(previous) = previous {
                    previous.receive_event(&Event::mouse(MouseEventType::Leave, me.x, me.y));
                }
                *self.active_control.borrow_mut() = Some(Rc::downgrade(&target));
                tracing::trace!(x = me.x, y = me.y, "enter");
                target.receive_event(&Event::mouse(MouseEventType::Enter, me.x, me.y));
            }
        }
    }

    /// First visible child containing the point, topmost children first
    fn control_at(&self, x: i32, y: i32) -> Option<Rc<dyn Control>> {
        let controls = self.controls();
        let (topmost, regular): (Vec<_>, Vec<_>) = controls.into_iter().partition(|c| c.topmost());
        topmost
            .into_iter()
            .chain(regular)
            .find(|c| c.showed() && c.position().contains(x, y))
    }

    fn take_active(&self) -> Option<Rc<dyn Control>> {
        self.active_control.borrow_mut().take().and_then(|weak| weak.upgrade())
    }

    // ========================================================================
    // Focus
    // ========================================================================

    /// Move focus to the next focusable child, wrapping around
    ///
    /// A focused child that keeps focus internally (a docked window moving
    /// between its own children) stops the advance.
    pub fn change_focus(&self) {
        if self.controls.borrow().is_empty() {
            return;
        }

        if let Some(current) = self.focused_control() {
            if !current.remove_focus() {
                return;
            }
            let position = self
                .focusable_controls()
                .iter()
                .position(|c| same_control(c, &current));
            let next = match position {
                Some(position) => position + 1,
                None => self.focused_index.get() + 1,
            };
            self.focused_index.set(next);
        }

        let focusable = self.focusable_controls();
        if focusable.is_empty() {
            return;
        }
        if self.focused_index.get() >= focusable.len() {
            self.focused_index.set(0);
        }

        let index = self.focused_index.get();
        tracing::trace!(index, "focus moved");
        focusable[index].set_focus();
    }

    /// Give focus to `control`, clearing it from every other child
    ///
    /// A control that cannot take focus still takes it away from the
    /// current holder, but is not focused itself.
    pub fn set_focused(&self, control: &Rc<dyn Control>) {
        for child in self.controls() {
            if child.focused() && !same_control(&child, control) {
                child.clear_focus();
            }
        }

        if !control.focusing() {
            return;
        }

        if let Some(index) = self
            .focusable_controls()
            .iter()
            .position(|c| same_control(c, control))
        {
            self.focused_index.set(index);
        }

        if !control.focused() {
            control.set_focus();
        }
    }

    /// Activate the focused child as if it were clicked
    pub fn execute_focused(&self) {
        if let Some(focused) = self.focused_control() {
            focused.receive_event(&Event::execute_focused());
        }
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Initialize the window from `config`
    ///
    /// A docked window only takes its position (parent-local, translated
    /// into the top-level space) and caption. A top-level window needs an
    /// adapter: it gets its title buttons and a native window.
    pub fn init(&self, config: WindowConfig, adapter: Option<&Rc<PlatformAdapter>>) -> WuiResult<()> {
        *self.caption.borrow_mut() = config.caption.clone();
        *self.config.borrow_mut() = config.clone();
        self.window_state.set(WindowState::Normal);

        if let Some(parent) = self.parent() {
            let resolved = parent.client_rect().offset_child(&config.position);
            self.showed.set(true);
            self.set_position(resolved);
            self.normal_position.set(resolved);
            parent.redraw(&resolved, false);
            tracing::debug!(position = ?resolved, "docked window initialized");
            return Ok(());
        }

        let Some(adapter) = adapter else {
            return Err(WuiError::new(
                ErrorKind::InvalidValue,
                "window::init",
                "top-level window needs a platform adapter",
            ));
        };

        self.position.set(config.position);
        self.normal_position.set(config.position);

        self.update_title_buttons_theme();
        let size = config.title_button_size;
        let width = config.position.width();
        if config.window_type == WindowType::Frame {
            self.add_control(self.minimize_button.clone(), Rect::new(width - size * 3, 0, width - size * 2, size));
            self.add_control(self.expand_button.clone(), Rect::new(width - size * 2, 0, width - size, size));
        }
        self.add_control(self.close_button.clone(), Rect::new(width - size, 0, width, size));

        let handle = match adapter.platform().create_window(&config.position, &config.caption) {
            Ok(handle) => handle,
            Err(err) => {
                tracing::warn!(error = %err, "native window creation failed");
                return Err(err);
            }
        };

        *self.native.borrow_mut() = Some(NativeWindow {
            handle,
            adapter: adapter.clone(),
        });
        adapter.register(handle, self.self_ref.clone());

        tracing::debug!(handle, caption = %config.caption, "top-level window created");
        Ok(())
    }

    /// Tear the window down
    ///
    /// Children are detached first, then the window leaves its parent (docked)
    /// or releases its native window (top-level). The close callback runs
    /// last.
    pub fn destroy(&self) {
        let controls = std::mem::take(&mut *self.controls.borrow_mut());
        for control in &controls {
            control.clear_parent();
        }
        *self.active_control.borrow_mut() = None;
        self.focused_index.set(0);

        if let Some(parent) = self.parent() {
            if let Some(me) = self.self_ref.upgrade() {
                let me: Rc<dyn Control> = me;
                parent.remove_control(&me);
            }
        } else {
            self.release_native();
        }

        tracing::debug!(caption = %self.caption.borrow(), "window destroyed");

        let callback = self.close_callback.borrow().clone();
        if let Some(callback) = callback {
            callback();
        }
    }

    fn release_native(&self) {
        let native = self.native.borrow_mut().take();
        if let Some(native) = native {
            native.adapter.unregister(native.handle);
            native.adapter.platform().destroy_window(native.handle);
        }
    }

    pub fn set_close_callback(&self, callback: impl Fn() + 'static) {
        *self.close_callback.borrow_mut() = Some(Rc::new(callback));
    }

    /// Called with the new width and height after every resize
    pub fn set_size_change_callback(&self, callback: impl Fn(i32, i32) + 'static) {
        *self.size_change_callback.borrow_mut() = Some(Rc::new(callback));
    }

    // ========================================================================
    // Window state
    // ========================================================================

    pub fn window_state(&self) -> WindowState {
        self.window_state.get()
    }

    pub fn minimize(&self) {
        if self.window_state.get() == WindowState::Minimized {
            return;
        }
        if let Some((handle, platform)) = self.native_parts() {
            platform.show_window(handle, ShowCommand::Minimize);
        }
        self.window_state.set(WindowState::Minimized);
        tracing::debug!("window minimized");
    }

    /// Maximize over the work area (top-level) or the parent (docked)
    pub fn expand(&self) {
        if self.window_state.get() == WindowState::Maximized {
            return;
        }
        if self.window_state.get() == WindowState::Normal {
            self.normal_position.set(self.position.get());
        }
        self.window_state.set(WindowState::Maximized);

        if let Some(parent) = self.parent() {
            self.set_position(parent.client_rect());
        } else if let Some((handle, platform)) = self.native_parts() {
            if self.title_showed.get() {
                self.set_position(platform.work_area());
            } else {
                platform.show_window(handle, ShowCommand::Maximize);
            }
        }

        self.expand_button.set_caption(RESTORE_CAPTION);
        tracing::debug!("window expanded");
    }

    /// Restore the rect saved before minimizing or expanding
    pub fn normal(&self) {
        if self.window_state.get() == WindowState::Normal {
            return;
        }
        if let Some((handle, platform)) = self.native_parts() {
            if self.window_state.get() == WindowState::Minimized {
                platform.show_window(handle, ShowCommand::Restore);
            }
        }
        self.window_state.set(WindowState::Normal);
        self.set_position(self.normal_position.get());

        self.expand_button.set_caption(EXPAND_CAPTION);
        tracing::debug!("window restored");
    }

    /// The native window was restored by the window system
    pub fn restored(&self) {
        self.window_state.set(WindowState::Normal);
        self.expand_button.set_caption(EXPAND_CAPTION);
    }

    pub fn title_showed(&self) -> bool {
        self.title_showed.get()
    }

    pub fn show_title(&self) {
        self.title_showed.set(true);
        for button in self.title_buttons() {
            button.show();
        }
        self.redraw(&self.title_rect(), false);
    }

    pub fn hide_title(&self) {
        self.title_showed.set(false);
        for button in self.title_buttons() {
            button.hide();
        }
        self.redraw(&self.title_rect(), true);
    }

    fn title_rect(&self) -> Rect {
        let client = self.client_rect();
        let title_height = self.config.borrow().title_height;
        client.offset_child(&Rect::new(0, 0, client.width(), title_height))
    }

    fn title_buttons(&self) -> [&Rc<Button>; 3] {
        [&self.minimize_button, &self.expand_button, &self.close_button]
    }

    fn place_title_buttons(&self, width: i32) {
        let size = self.config.borrow().title_button_size;
        self.minimize_button
            .set_position(Rect::new(width - size * 3, 0, width - size * 2, size));
        self.expand_button
            .set_position(Rect::new(width - size * 2, 0, width - size, size));
        self.close_button.set_position(Rect::new(width - size, 0, width, size));
    }

    /// Disable input to the native window, e.g. behind a modal dialog
    pub fn block(&self) {
        if let Some((handle, platform)) = self.native_parts() {
            platform.set_window_enabled(handle, false);
        }
    }

    pub fn unlock(&self) {
        if let Some((handle, platform)) = self.native_parts() {
            platform.set_window_enabled(handle, true);
            platform.show_window(handle, ShowCommand::Show);
        }
    }

    /// Record the native window's new screen rect
    ///
    /// A size change repositions the title buttons and fires the
    /// size-change callback.
    pub fn apply_native_rect(&self, rect: Rect) {
        let prev = self.position.replace(rect);
        if self.window_state.get() != WindowState::Maximized {
            self.normal_position.set(rect);
        }

        if prev.width() != rect.width() || prev.height() != rect.height() {
            self.place_title_buttons(rect.width());

            let callback = self.size_change_callback.borrow().clone();
            if let Some(callback) = callback {
                callback(rect.width(), rect.height());
            }
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn caption(&self) -> String {
        self.caption.borrow().clone()
    }

    pub fn set_caption(&self, caption: &str) {
        *self.caption.borrow_mut() = caption.to_string();
        self.redraw(&self.title_rect(), true);
    }

    pub fn window_type(&self) -> WindowType {
        self.config.borrow().window_type
    }

    pub fn config(&self) -> WindowConfig {
        self.config.borrow().clone()
    }

    /// Native handle of a top-level window after a successful init
    pub fn handle(&self) -> Option<NativeHandle> {
        self.native.borrow().as_ref().map(|n| n.handle)
    }

    pub fn theme(&self) -> Option<Rc<dyn Theme>> {
        self.theme.borrow().clone()
    }

    /// Platform of the top-level window this window belongs to
    pub fn platform(&self) -> Option<Rc<dyn Platform>> {
        match self.native_parts() {
            Some((_, platform)) => Some(platform),
            None => self.parent().and_then(|p| p.platform()),
        }
    }

    /// Adapter of the top-level window this window belongs to
    pub fn adapter(&self) -> Option<Rc<PlatformAdapter>> {
        let own = self.native.borrow().as_ref().map(|n| n.adapter.clone());
        own.or_else(|| self.parent().and_then(|p| p.adapter()))
    }

    pub fn set_cursor(&self, shape: CursorShape) {
        if let Some(platform) = self.platform() {
            platform.set_cursor(shape);
        }
    }

    fn native_parts(&self) -> Option<(NativeHandle, Rc<dyn Platform>)> {
        self.native
            .borrow()
            .as_ref()
            .map(|n| (n.handle, n.adapter.platform()))
    }

    fn theme_color(&self, value: &str) -> Color {
        theme::theme_color(Self::TC, value, self.theme.borrow().as_ref())
    }

    fn theme_font(&self, value: &str) -> Font {
        theme::theme_font(Self::TC, value, self.theme.borrow().as_ref())
    }

    fn update_title_buttons_theme(&self) {
        let background = self.theme_color("background");
        let text = self.theme_color("text");

        let mut buttons = ThemeMap::new("window-buttons");
        buttons.set_color(Button::TC, "calm", background);
        buttons.set_color(Button::TC, "active", self.theme_color("active_button"));
        buttons.set_color(Button::TC, "border", background);
        buttons.set_color(Button::TC, "focused_border", background);
        buttons.set_color(Button::TC, "text", text);
        buttons.set_color(Button::TC, "disabled", background);
        buttons.set_dimension(Button::TC, "round", 0);
        buttons.set_font(Button::TC, "font", self.theme_font("caption_font"));

        let mut close = buttons.clone();
        close.set_color(Button::TC, "active", CLOSE_BUTTON_ACTIVE);

        let buttons: Rc<dyn Theme> = Rc::new(buttons);
        self.minimize_button.update_theme(Some(buttons.clone()));
        self.expand_button.update_theme(Some(buttons));
        self.close_button.update_theme(Some(Rc::new(close)));
    }
}

impl Control for Window {
    /// Draw a docked window: background, caption, then children
    fn draw(&self, gr: &mut dyn Graphic, paint_rect: &Rect) {
        if !self.showed.get() {
            return;
        }

        let position = self.position.get();
        let background = self.theme_color("background");
        gr.draw_rect(&position, background, background, 0, 0);
        self.draw_caption(gr, &position);
        self.draw_children(gr, paint_rect);
    }

    /// Route an event to the children
    ///
    /// Tab cycles focus, return activates the focused child, other keyboard
    /// input goes to the focused child.
    fn receive_event(&self, ev: &Event) {
        if !self.showed.get() || !self.enabled.get() {
            return;
        }

        match ev {
            Event::Mouse(me) => self.send_mouse_event(me),
            Event::Keyboard(ke) if ke.kind == KeyboardEventType::Char && ke.key == Key::TAB => {
                self.change_focus();
            }
            Event::Keyboard(ke) if ke.kind == KeyboardEventType::Char && ke.key == Key::RETURN => {
                self.execute_focused();
            }
            Event::Keyboard(_) => {
                if let Some(focused) = self.focused_control() {
                    focused.receive_event(ev);
                }
            }
            Event::Internal(InternalEvent::ExecuteFocused) => self.execute_focused(),
        }
    }

    /// Move the window
    ///
    /// A docked window shifts its children by the same delta; a top-level
    /// window moves its native window.
    fn set_position(&self, position: Rect) {
        if let Some((handle, platform)) = self.native_parts() {
            platform.set_window_rect(handle, &position);
            self.apply_native_rect(position);
            return;
        }

        let prev = self.position.replace(position);
        if self.window_state.get() == WindowState::Normal {
            self.normal_position.set(position);
        }

        let Some(parent) = self.parent() else {
            return;
        };

        let (dx, dy) = (position.left - prev.left, position.top - prev.top);
        if dx != 0 || dy != 0 {
            for control in self.controls() {
                control.set_position(control.position().translate(dx, dy));
            }
        }

        if self.showed.get() && prev != position {
            if !prev.is_empty() {
                parent.redraw(&prev, true);
            }
            parent.redraw(&position, false);
        }
    }

    fn position(&self) -> Rect {
        self.position.get()
    }

    fn set_parent(&self, parent: &Rc<Window>) {
        *self.parent.borrow_mut() = Rc::downgrade(parent);
    }

    fn clear_parent(&self) {
        *self.parent.borrow_mut() = Weak::new();
    }

    fn parent(&self) -> Option<Rc<Window>> {
        self.parent.borrow().upgrade()
    }

    fn topmost(&self) -> bool {
        self.config.borrow().topmost
    }

    /// Focus the child at the focus index unless a child already has focus
    fn set_focus(&self) {
        if self.focused() {
            return;
        }
        let focusable = self.focusable_controls();
        if focusable.is_empty() {
            return;
        }
        if self.focused_index.get() >= focusable.len() {
            self.focused_index.set(0);
        }
        focusable[self.focused_index.get()].set_focus();
    }

    /// Advance focus internally; `true` once past the last focusable child
    fn remove_focus(&self) -> bool {
        let focusable = self.focusable_controls();
        let Some(position) = focusable.iter().position(|c| c.focused()) else {
            if let Some(focused) = self.focused_control() {
                focused.clear_focus();
            }
            self.focused_index.set(0);
            return true;
        };

        if !focusable[position].remove_focus() {
            return false;
        }

        let next = position + 1;
        if next >= focusable.len() {
            self.focused_index.set(0);
            return true;
        }

        self.focused_index.set(next);
        focusable[next].set_focus();
        false
    }

    fn clear_focus(&self) {
        for control in self.controls() {
            if control.focused() {
                control.clear_focus();
            }
        }
        self.focused_index.set(0);
    }

    fn focused(&self) -> bool {
        self.controls().iter().any(|c| c.focused())
    }

    fn focusing(&self) -> bool {
        self.showed.get() && self.enabled.get() && self.controls().iter().any(|c| c.focusing())
    }

    /// Replace the theme and propagate it to the children
    fn update_theme(&self, theme: Option<Rc<dyn Theme>>) {
        {
            let mut slot = self.theme.borrow_mut();
            if slot.is_some() && theme.is_none() {
                return;
            }
            *slot = theme;
        }

        let theme = self.theme();
        for control in self.controls() {
            control.update_theme(theme.clone());
        }
        self.update_title_buttons_theme();

        if let Some((handle, platform)) = self.native_parts() {
            platform.invalidate(handle, &self.position.get().at_origin(), true);
        } else if self.showed.get() {
            self.redraw(&self.position.get(), false);
        }
    }

    fn show(&self) {
        self.showed.set(true);
        if let Some((handle, platform)) = self.native_parts() {
            platform.show_window(handle, ShowCommand::Show);
        } else {
            self.redraw(&self.position.get(), false);
        }
    }

    fn hide(&self) {
        self.showed.set(false);
        if let Some(active) = self.take_active() {
            active.receive_event(&Event::mouse(MouseEventType::Leave, -1, -1));
        }
        if let Some((handle, platform)) = self.native_parts() {
            platform.show_window(handle, ShowCommand::Hide);
        } else {
            self.redraw(&self.position.get(), true);
        }
    }

    fn showed(&self) -> bool {
        self.showed.get()
    }

    fn enable(&self) {
        self.enabled.set(true);
        for control in self.controls() {
            control.enable();
        }
    }

    fn disable(&self) {
        self.enabled.set(false);
        for control in self.controls() {
            control.disable();
        }
    }

    fn enabled(&self) -> bool {
        self.enabled.get()
    }
}

impl Drop for Window {
    fn drop(&mut self) {
        if let Some(native) = self.native.get_mut().take() {
            native.adapter.unregister(native.handle);
            native.adapter.platform().destroy_window(native.handle);
        }
    }
}

impl std::fmt::Debug for Window {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Window")
            .field("caption", &self.caption.borrow())
            .field("position", &self.position.get())
            .field("state", &self.window_state.get())
            .field("controls", &self.controls.borrow().len())
            .field("handle", &self.handle())
            .finish()
    }
}
