//! Native message translation for top-level windows

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use super::{CursorShape, MovingMode, NativeHandle, Platform};
use crate::control::Control;
use crate::event::{Event, Key, KeyboardEvent, KeyboardEventType, Modifiers, MouseEventType};
use crate::graphic::Graphic;
use crate::math::Rect;
use crate::window::{Window, WindowState, WindowType};

/// Input and window-system notifications a backend forwards
///
/// Pointer coordinates are window-local.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NativeMessage {
    MouseMove { x: i32, y: i32 },
    LeftDown { x: i32, y: i32 },
    LeftUp { x: i32, y: i32 },
    LeftDouble { x: i32, y: i32 },
    /// Pointer left the native window
    MouseLeave,
    KeyDown { key: Key, modifiers: Modifiers },
    KeyUp { key: Key, modifiers: Modifiers },
    Char { ch: char, modifiers: Modifiers },
    Resized { width: i32, height: i32 },
    Moved { x: i32, y: i32 },
    /// Window system restored a minimized or maximized window
    Restored,
    Close,
}

/// Drag started by a left-button press on a frame window
#[derive(Clone, Copy, Debug)]
struct Drag {
    mode: MovingMode,
    click_x: i32,
    click_y: i32,
}

struct Registration {
    window: Weak<Window>,
    drag: Cell<Option<Drag>>,
    /// Cursor was switched to a resize shape by edge hovering
    edge_cursor: Cell<bool>,
}

/// Routes native messages to the top-level window owning a handle
///
/// Besides translating input into [`Event`]s, the adapter runs the
/// move/resize gestures of borderless frame windows: a left-button press on
/// the border resizes, a press on an empty spot moves, and the drag stays
/// captured until the button is released.
pub struct PlatformAdapter {
    platform: Rc<dyn Platform>,
    windows: RefCell<HashMap<NativeHandle, Rc<Registration>>>,
}

impl PlatformAdapter {
    pub fn new(platform: Rc<dyn Platform>) -> Rc<Self> {
        Rc::new(Self {
            platform,
            windows: RefCell::new(HashMap::new()),
        })
    }

    pub fn platform(&self) -> Rc<dyn Platform> {
        self.platform.clone()
    }

    pub fn register(&self, handle: NativeHandle, window: Weak<Window>) {
        tracing::debug!(handle, "native window registered");
        self.windows.borrow_mut().insert(
            handle,
            Rc::new(Registration {
                window,
                drag: Cell::new(None),
                edge_cursor: Cell::new(false),
            }),
        );
    }

    pub fn unregister(&self, handle: NativeHandle) {
        if self.windows.borrow_mut().remove(&handle).is_some() {
            tracing::debug!(handle, "native window unregistered");
        }
    }

    pub fn window(&self, handle: NativeHandle) -> Option<Rc<Window>> {
        self.registration(handle).and_then(|r| r.window.upgrade())
    }

    /// True while a border drag is in progress on `handle`
    pub fn dragging(&self, handle: NativeHandle) -> bool {
        self.registration(handle)
            .is_some_and(|r| r.drag.get().is_some())
    }

    fn registration(&self, handle: NativeHandle) -> Option<Rc<Registration>> {
        self.windows.borrow().get(&handle).cloned()
    }

    /// Deliver a native message; returns `false` for unknown handles
    pub fn dispatch(&self, handle: NativeHandle, message: NativeMessage) -> bool {
        let Some(registration) = self.registration(handle) else {
            tracing::warn!(handle, ?message, "message for unknown native window");
            return false;
        };
        let Some(window) = registration.window.upgrade() else {
            tracing::warn!(handle, "message for dropped window");
            self.unregister(handle);
            return false;
        };

        match message {
            NativeMessage::MouseMove { x, y } => self.mouse_move(handle, &registration, &window, x, y),
            NativeMessage::LeftDown { x, y } => self.left_down(handle, &registration, &window, x, y),
            NativeMessage::LeftUp { x, y } => {
                self.platform.release_pointer();
                if registration.drag.take().is_some() {
                    tracing::debug!(handle, "drag finished");
                }
                window.receive_event(&Event::mouse(MouseEventType::LeftUp, x, y));
            }
            NativeMessage::LeftDouble { x, y } => {
                window.receive_event(&Event::mouse(MouseEventType::LeftDouble, x, y));
            }
            NativeMessage::MouseLeave => {
                window.receive_event(&Event::mouse(MouseEventType::Leave, -1, -1));
            }
            NativeMessage::KeyDown { key, modifiers } => {
                window.receive_event(&keyboard(KeyboardEventType::KeyDown, key, modifiers));
            }
            NativeMessage::KeyUp { key, modifiers } => {
                window.receive_event(&keyboard(KeyboardEventType::KeyUp, key, modifiers));
            }
            NativeMessage::Char { ch, modifiers } => {
                window.receive_event(&Event::char(ch, modifiers));
            }
            NativeMessage::Resized { width, height } => {
                let position = window.position();
                window.apply_native_rect(Rect::from_pos_size(position.left, position.top, width, height));
            }
            NativeMessage::Moved { x, y } => {
                let position = window.position();
                window.apply_native_rect(Rect::from_pos_size(x, y, position.width(), position.height()));
            }
            NativeMessage::Restored => window.restored(),
            NativeMessage::Close => window.destroy(),
        }
        true
    }

    /// Paint the window owning `handle`
    pub fn paint(&self, handle: NativeHandle, gr: &mut dyn Graphic, damage: &Rect) {
        if let Some(window) = self.window(handle) {
            window.paint(gr, damage);
        }
    }

    fn mouse_move(&self, handle: NativeHandle, registration: &Registration, window: &Rc<Window>, x: i32, y: i32) {
        if let Some(drag) = registration.drag.get() {
            if window.window_state() == WindowState::Normal {
                let min_size = window.config().min_size;
                let rect = drag.mode.apply(&window.position(), x, y, drag.click_x, drag.click_y, min_size);
                self.platform.set_window_rect(handle, &rect);
                window.apply_native_rect(rect);
            }
            return;
        }

        if resizable(window) {
            let position = window.position();
            let margin = window.config().border_margin;
            match MovingMode::classify(x, y, position.width(), position.height(), margin) {
                Some(mode) => {
                    self.platform.set_cursor(mode.cursor());
                    registration.edge_cursor.set(true);
                }
                None if registration.edge_cursor.get() => {
                    self.platform.set_cursor(CursorShape::Default);
                    registration.edge_cursor.set(false);
                }
                None => {}
            }
        }

        window.receive_event(&Event::mouse(MouseEventType::Move, x, y));
    }

    fn left_down(&self, handle: NativeHandle, registration: &Registration, window: &Rc<Window>, x: i32, y: i32) {
        self.platform.capture_pointer(handle);

        if resizable(window) {
            let position = window.position();
            let margin = window.config().border_margin;
            let mode = match MovingMode::classify(x, y, position.width(), position.height(), margin) {
                Some(mode) => Some(mode),
                None if !over_child(window, x, y) => Some(MovingMode::Move),
                None => None,
            };
            if let Some(mode) = mode {
                tracing::debug!(handle, ?mode, "drag started");
                registration.drag.set(Some(Drag {
                    mode,
                    click_x: x,
                    click_y: y,
                }));
            }
        }

        window.receive_event(&Event::mouse(MouseEventType::LeftDown, x, y));
    }
}

fn keyboard(kind: KeyboardEventType, key: Key, modifiers: Modifiers) -> Event {
    Event::Keyboard(KeyboardEvent { kind, key, modifiers })
}

/// Border gestures apply to frame windows in the normal state only
fn resizable(window: &Window) -> bool {
    window.window_type() == WindowType::Frame && window.window_state() == WindowState::Normal
}

fn over_child(window: &Window, x: i32, y: i32) -> bool {
    window
        .controls()
        .iter()
        .any(|c| c.showed() && c.position().contains(x, y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::Button;
    use crate::platform::{HeadlessPlatform, PlatformCall};
    use crate::window::WindowConfig;

    fn setup() -> (Rc<HeadlessPlatform>, Rc<PlatformAdapter>, Rc<Window>, NativeHandle) {
        let platform = HeadlessPlatform::new();
        let adapter = PlatformAdapter::new(platform.clone());
        let window = Window::new(None);
        window
            .init(WindowConfig::frame(Rect::new(100, 100, 900, 700), "Main"), Some(&adapter))
            .expect("init");
        let handle = window.handle().expect("handle");
        (platform, adapter, window, handle)
    }

    #[test]
    fn test_unknown_handle_is_rejected() {
        let (_platform, adapter, _window, handle) = setup();
        assert!(!adapter.dispatch(handle + 100, NativeMessage::MouseLeave));
        assert!(adapter.dispatch(handle, NativeMessage::MouseLeave));
    }

    #[test]
    fn test_border_press_resizes() {
        let (platform, adapter, window, handle) = setup();

        adapter.dispatch(handle, NativeMessage::LeftDown { x: 798, y: 300 });
        assert_eq!(platform.captured(), Some(handle));
        assert!(adapter.dragging(handle));

        adapter.dispatch(handle, NativeMessage::MouseMove { x: 850, y: 300 });
        assert_eq!(window.position(), Rect::new(100, 100, 950, 700));
        assert_eq!(platform.window_rect(handle), Rect::new(100, 100, 950, 700));

        adapter.dispatch(handle, NativeMessage::LeftUp { x: 850, y: 300 });
        assert_eq!(platform.captured(), None);
        assert!(!adapter.dragging(handle));
    }

    #[test]
    fn test_empty_area_press_moves() {
        let (_platform, adapter, window, handle) = setup();
        adapter.dispatch(handle, NativeMessage::LeftDown { x: 400, y: 300 });
        adapter.dispatch(handle, NativeMessage::MouseMove { x: 410, y: 320 });
        assert_eq!(window.position(), Rect::new(110, 120, 910, 720));
    }

    #[test]
    fn test_press_on_child_does_not_drag() {
        let (_platform, adapter, window, handle) = setup();
        window.add_control(Button::new("OK", || {}), Rect::new(300, 300, 400, 330));

        adapter.dispatch(handle, NativeMessage::LeftDown { x: 350, y: 310 });
        assert!(!adapter.dragging(handle));
        adapter.dispatch(handle, NativeMessage::MouseMove { x: 360, y: 315 });
        assert_eq!(window.position(), Rect::new(100, 100, 900, 700));
    }

    #[test]
    fn test_maximized_window_skips_gestures() {
        let (platform, adapter, window, handle) = setup();
        window.expand();
        adapter.dispatch(handle, NativeMessage::LeftDown { x: 2, y: 2 });
        assert!(!adapter.dragging(handle));
        // Capture is still taken for the press
        assert_eq!(platform.captured(), Some(handle));
    }

    #[test]
    fn test_dialog_skips_gestures() {
        let platform = HeadlessPlatform::new();
        let adapter = PlatformAdapter::new(platform.clone());
        let window = Window::new(None);
        window
            .init(WindowConfig::dialog(Rect::new(0, 0, 400, 200), "Dialog"), Some(&adapter))
            .expect("init");
        let handle = window.handle().expect("handle");

        adapter.dispatch(handle, NativeMessage::MouseMove { x: 1, y: 100 });
        assert_eq!(platform.cursor(), CursorShape::Default);
        adapter.dispatch(handle, NativeMessage::LeftDown { x: 1, y: 100 });
        assert!(!adapter.dragging(handle));
    }

    #[test]
    fn test_edge_hover_sets_cursor() {
        let (platform, adapter, _window, handle) = setup();
        adapter.dispatch(handle, NativeMessage::MouseMove { x: 1, y: 300 });
        assert_eq!(platform.cursor(), CursorShape::SizeWE);
        adapter.dispatch(handle, NativeMessage::MouseMove { x: 798, y: 598 });
        assert_eq!(platform.cursor(), CursorShape::SizeNWSE);
        adapter.dispatch(handle, NativeMessage::MouseMove { x: 400, y: 300 });
        assert_eq!(platform.cursor(), CursorShape::Default);
    }

    #[test]
    fn test_resize_message_updates_window() {
        let (_platform, adapter, window, handle) = setup();
        let sizes = Rc::new(RefCell::new(Vec::new()));
        let sink = sizes.clone();
        window.set_size_change_callback(move |w, h| sink.borrow_mut().push((w, h)));

        adapter.dispatch(handle, NativeMessage::Resized { width: 640, height: 480 });
        adapter.dispatch(handle, NativeMessage::Moved { x: 0, y: 0 });
        assert_eq!(window.position(), Rect::new(0, 0, 640, 480));
        assert_eq!(*sizes.borrow(), vec![(640, 480)]);
    }

    #[test]
    fn test_close_message_destroys_window() {
        let (platform, adapter, window, handle) = setup();
        assert!(adapter.dispatch(handle, NativeMessage::Close));
        assert!(window.handle().is_none());
        assert!(!platform.window_exists(handle));
        assert!(!adapter.dispatch(handle, NativeMessage::MouseLeave));
        assert!(platform
            .calls()
            .contains(&PlatformCall::DestroyWindow(handle)));
    }

    #[test]
    fn test_tab_char_cycles_focus() {
        let (_platform, adapter, window, handle) = setup();
        let ok: Rc<dyn Control> = Button::new("OK", || {});
        window.add_control(ok.clone(), Rect::new(10, 40, 110, 70));
        adapter.dispatch(
            handle,
            NativeMessage::Char {
                ch: '\t',
                modifiers: Modifiers::NONE,
            },
        );
        assert!(ok.focused());
    }
}
