//! Focus cycling integration tests

mod common;

use std::rc::Rc;

use common::{new_log, Probe};
use wui::{Control, Event, Modifiers, Rect, Window};

fn tab(window: &Window) {
    window.receive_event(&Event::char('\t', Modifiers::NONE));
}

/// Name of the focused probe, `None` when nothing holds focus.
fn focused(probes: &[Rc<Probe>]) -> Option<&'static str> {
    probes.iter().find(|p| p.focused()).map(|p| p.name)
}

/// N focusable children return to the start after exactly N tab presses.
#[test]
fn test_flat_cycle_length() {
    let log = new_log();
    let window = Window::new(None);
    let probes: Vec<Rc<Probe>> = ["a", "b", "c"].into_iter().map(|n| Probe::new(n, &log)).collect();
    for (i, probe) in probes.iter().enumerate() {
        window.add_control(probe.clone(), Rect::from_pos_size(0, i as i32 * 40, 100, 30));
    }

    tab(&window);
    assert_eq!(focused(&probes), Some("a"));
    tab(&window);
    assert_eq!(focused(&probes), Some("b"));
    tab(&window);
    assert_eq!(focused(&probes), Some("c"));
    tab(&window);
    assert_eq!(focused(&probes), Some("a"));
}

/// Controls that opt out of focus are skipped.
#[test]
fn test_unfocusable_controls_skipped() {
    let log = new_log();
    let window = Window::new(None);
    let a = Probe::new("a", &log);
    let skip = Probe::new("skip", &log);
    let b = Probe::new("b", &log);
    skip.set_focusing(false);
    window.add_control(a.clone(), Rect::new(0, 0, 10, 10));
    window.add_control(skip.clone(), Rect::new(0, 20, 10, 30));
    window.add_control(b.clone(), Rect::new(0, 40, 10, 50));

    let probes = [a, skip, b];
    tab(&window);
    tab(&window);
    assert_eq!(focused(&probes), Some("b"));
    tab(&window);
    assert_eq!(focused(&probes), Some("a"));
}

/// A docked window with k focusable children lengthens the outer cycle
/// by k - 1: focus walks through its children before leaving it.
#[test]
fn test_nested_window_cycle() {
    let log = new_log();
    let outer = Window::new(None);
    let inner = Window::new(None);

    let a = Probe::new("a", &log);
    let x = Probe::new("x", &log);
    let y = Probe::new("y", &log);
    let b = Probe::new("b", &log);

    outer.add_control(a.clone(), Rect::new(0, 0, 100, 30));
    outer.add_control(inner.clone(), Rect::new(0, 40, 300, 200));
    outer.add_control(b.clone(), Rect::new(0, 210, 100, 240));
    inner.add_control(x.clone(), Rect::new(10, 10, 100, 40));
    inner.add_control(y.clone(), Rect::new(10, 50, 100, 80));

    let probes = [a, x, y, b];
    let expected = ["a", "x", "y", "b", "a", "x", "y", "b"];
    for name in expected {
        tab(&outer);
        assert_eq!(focused(&probes), Some(name));
        assert_eq!(probes.iter().filter(|p| p.focused()).count(), 1);
    }
}

/// Clicking into a docked window clears focus held outside it.
#[test]
fn test_click_into_nested_window_moves_focus() {
    let log = new_log();
    let outer = Window::new(None);
    let inner = Window::new(None);
    let a = Probe::new("a", &log);
    let x = Probe::new("x", &log);
    let y = Probe::new("y", &log);

    outer.add_control(a.clone(), Rect::new(0, 0, 100, 30));
    outer.add_control(inner.clone(), Rect::new(0, 40, 300, 200));
    inner.add_control(x.clone(), Rect::new(10, 10, 100, 40));
    inner.add_control(y.clone(), Rect::new(10, 50, 100, 80));

    tab(&outer);
    assert!(a.focused());

    // y sits at (10, 90)-(100, 120) in outer coordinates
    let move_to_y = Event::mouse(wui::MouseEventType::Move, 50, 100);
    let up_on_y = Event::mouse(wui::MouseEventType::LeftUp, 50, 100);
    outer.receive_event(&move_to_y);
    outer.receive_event(&move_to_y);
    outer.receive_event(&up_on_y);
    outer.receive_event(&up_on_y);

    assert!(!a.focused());
    assert!(y.focused());
    assert!(!x.focused());
    assert_eq!(inner.focused_index(), 1);
}

/// Removing the last focusable child resets the focus index.
#[test]
fn test_focus_index_clamped_on_remove() {
    let log = new_log();
    let window = Window::new(None);
    let a = Probe::new("a", &log);
    let b = Probe::new("b", &log);
    window.add_control(a.clone(), Rect::new(0, 0, 10, 10));
    window.add_control(b.clone(), Rect::new(0, 20, 10, 30));

    tab(&window);
    tab(&window);
    assert_eq!(window.focused_index(), 1);

    let b: Rc<dyn Control> = b;
    window.remove_control(&b);
    assert_eq!(window.focused_index(), 0);
    tab(&window);
    assert!(a.focused());
}

/// Clicking a control that cannot take focus still clears the current holder.
#[test]
fn test_click_on_unfocusable_clears_focus() {
    let log = new_log();
    let window = Window::new(None);
    let input = Probe::new("input", &log);
    let label = Probe::new("label", &log);
    label.set_focusing(false);
    window.add_control(input.clone(), Rect::new(0, 0, 100, 30));
    window.add_control(label.clone(), Rect::new(0, 40, 100, 70));

    tab(&window);
    assert!(input.focused());

    window.receive_event(&Event::mouse(wui::MouseEventType::Move, 50, 50));
    window.receive_event(&Event::mouse(wui::MouseEventType::LeftUp, 50, 50));

    assert!(!input.focused());
    assert!(!label.focused());
    assert_eq!(window.focused_index(), 0);
}
