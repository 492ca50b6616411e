//! Docked window integration tests
//!
//! Coordinate translation through nested docked windows, redraw bubbling
//! to the native window and pointer routing across nesting levels.

mod common;

use std::rc::Rc;

use common::{new_log, Probe};
use wui::{
    Control, HeadlessPlatform, NativeMessage, PlatformAdapter, RecordingGraphic, Rect, Window,
    WindowConfig, WindowState,
};

struct Scene {
    platform: Rc<HeadlessPlatform>,
    adapter: Rc<PlatformAdapter>,
    top: Rc<Window>,
    outer: Rc<Window>,
    inner: Rc<Window>,
}

/// Top-level 800x600 window with `outer` docked at (50, 60) and `inner`
/// docked in `outer` at (10, 20).
fn scene() -> Scene {
    let platform = HeadlessPlatform::new();
    let adapter = PlatformAdapter::new(platform.clone());

    let top = Window::new(None);
    top.init(WindowConfig::frame(Rect::new(100, 100, 900, 700), "Main"), Some(&adapter))
        .expect("top-level init");

    let outer = Window::new(None);
    top.add_control(outer.clone(), Rect::ZERO);
    outer
        .init(WindowConfig::frame(Rect::new(50, 60, 450, 460), "Docked"), None)
        .expect("docked init");

    let inner = Window::new(None);
    outer.add_control(inner.clone(), Rect::ZERO);
    inner
        .init(WindowConfig::frame(Rect::new(10, 20, 110, 120), "Inner"), None)
        .expect("nested init");

    Scene {
        platform,
        adapter,
        top,
        outer,
        inner,
    }
}

#[test]
fn test_docked_init_translates_position() {
    let s = scene();
    assert_eq!(s.outer.position(), Rect::new(50, 60, 450, 460));
    assert_eq!(s.inner.position(), Rect::new(60, 80, 160, 180));
    assert!(s.outer.handle().is_none());
    assert!(s.inner.handle().is_none());
    assert!(s.inner.platform().is_some());
}

#[test]
fn test_nested_child_position_resolved_through_all_levels() {
    let s = scene();
    let log = new_log();
    let probe = Probe::new("p", &log);
    s.inner.add_control(probe.clone(), Rect::new(5, 5, 15, 15));
    assert_eq!(probe.position(), Rect::new(65, 85, 75, 95));
}

/// Adding a control deep in the tree invalidates its rect on the native
/// window, in top-level coordinates.
#[test]
fn test_redraw_bubbles_to_native_window() {
    let s = scene();
    let log = new_log();
    s.platform.clear_calls();

    s.inner.add_control(Probe::new("p", &log), Rect::new(5, 5, 15, 15));
    assert_eq!(s.platform.invalidated(), vec![(Rect::new(65, 85, 75, 95), false)]);

    s.platform.clear_calls();
    s.inner.redraw(&Rect::new(1, 2, 3, 4), true);
    assert_eq!(s.platform.invalidated(), vec![(Rect::new(1, 2, 3, 4), true)]);
}

/// Moving a docked window carries its whole subtree along.
#[test]
fn test_moving_docked_window_shifts_subtree() {
    let s = scene();
    let log = new_log();
    let probe = Probe::new("p", &log);
    s.inner.add_control(probe.clone(), Rect::new(5, 5, 15, 15));
    s.platform.clear_calls();

    s.outer.set_position(Rect::new(70, 60, 470, 460));

    assert_eq!(s.inner.position(), Rect::new(80, 80, 180, 180));
    assert_eq!(probe.position(), Rect::new(85, 85, 95, 95));

    let invalidated = s.platform.invalidated();
    assert!(invalidated.contains(&(Rect::new(50, 60, 450, 460), true)));
    assert!(invalidated.contains(&(Rect::new(70, 60, 470, 460), false)));
}

/// Expanding a docked window fills its parent; restoring puts the subtree
/// back where it was.
#[test]
fn test_docked_expand_and_normal() {
    let s = scene();
    let log = new_log();
    let probe = Probe::new("p", &log);
    s.inner.add_control(probe.clone(), Rect::new(5, 5, 15, 15));

    s.outer.expand();
    assert_eq!(s.outer.window_state(), WindowState::Maximized);
    assert_eq!(s.outer.position(), Rect::new(0, 0, 800, 600));
    assert_eq!(probe.position(), Rect::new(15, 25, 25, 35));

    s.outer.normal();
    assert_eq!(s.outer.window_state(), WindowState::Normal);
    assert_eq!(s.outer.position(), Rect::new(50, 60, 450, 460));
    assert_eq!(probe.position(), Rect::new(65, 85, 75, 95));
}

/// One native pointer move reaches the deepest control under the pointer.
#[test]
fn test_pointer_routed_through_nesting() {
    let s = scene();
    let log = new_log();
    s.inner.add_control(Probe::new("p", &log), Rect::new(5, 5, 15, 15));
    let handle = s.top.handle().expect("handle");

    assert!(s.adapter.dispatch(handle, NativeMessage::MouseMove { x: 70, y: 90 }));
    assert!(s.adapter.dispatch(handle, NativeMessage::MouseMove { x: 71, y: 90 }));
    assert!(s.adapter.dispatch(handle, NativeMessage::MouseMove { x: 300, y: 300 }));

    assert_eq!(*log.borrow(), vec!["p:enter", "p:move", "p:leave"]);
}

#[test]
fn test_paint_culls_docked_window_outside_damage() {
    let s = scene();

    let mut gr = RecordingGraphic::new();
    s.top.paint(&mut gr, &Rect::new(0, 0, 800, 600));
    assert!(gr.texts().contains(&"Docked"));
    assert!(gr.texts().contains(&"Inner"));

    let mut gr = RecordingGraphic::new();
    s.top.paint(&mut gr, &Rect::new(500, 500, 800, 600));
    assert!(!gr.texts().contains(&"Docked"));
    assert!(gr.texts().contains(&"Main"));
}

/// Removing a docked window detaches it and clears its area.
#[test]
fn test_remove_docked_window() {
    let s = scene();
    s.platform.clear_calls();

    let outer: Rc<dyn Control> = s.outer.clone();
    s.top.remove_control(&outer);

    assert!(s.outer.parent().is_none());
    assert!(!s.top.contains(&outer));
    assert_eq!(s.platform.invalidated(), vec![(Rect::new(50, 60, 450, 460), true)]);
    assert!(s.outer.platform().is_none());
}

/// Destroying a docked window removes it from its parent and runs the
/// close callback.
#[test]
fn test_destroy_docked_window() {
    let s = scene();
    let closed = Rc::new(std::cell::Cell::new(false));
    let flag = closed.clone();
    s.inner.set_close_callback(move || flag.set(true));

    s.inner.destroy();

    assert!(closed.get());
    assert!(s.inner.parent().is_none());
    assert!(s.outer.controls().is_empty());
    assert!(s.top.handle().is_some());
}
