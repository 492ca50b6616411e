//! Shared helpers for integration tests

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use wui::{Control, Event, Graphic, MouseEventType, Rect, Theme, Window};

/// Control that records every event it receives
pub struct Probe {
    pub name: &'static str,
    position: Cell<Rect>,
    parent: RefCell<Weak<Window>>,
    showed: Cell<bool>,
    enabled: Cell<bool>,
    focused: Cell<bool>,
    focusing: Cell<bool>,
    topmost: Cell<bool>,
    log: Rc<RefCell<Vec<String>>>,
}

impl Probe {
    pub fn new(name: &'static str, log: &Rc<RefCell<Vec<String>>>) -> Rc<Self> {
        Rc::new(Self {
            name,
            position: Cell::new(Rect::ZERO),
            parent: RefCell::new(Weak::new()),
            showed: Cell::new(true),
            enabled: Cell::new(true),
            focused: Cell::new(false),
            focusing: Cell::new(true),
            topmost: Cell::new(false),
            log: log.clone(),
        })
    }

    pub fn set_topmost(&self, topmost: bool) {
        self.topmost.set(topmost);
    }

    pub fn set_focusing(&self, focusing: bool) {
        self.focusing.set(focusing);
    }
}

impl Control for Probe {
    fn draw(&self, _gr: &mut dyn Graphic, _paint_rect: &Rect) {}

    fn receive_event(&self, ev: &Event) {
        if let Some(me) = ev.as_mouse() {
            let kind = match me.kind {
                MouseEventType::Enter => "enter",
                MouseEventType::Leave => "leave",
                MouseEventType::Move => "move",
                MouseEventType::LeftDown => "down",
                MouseEventType::LeftUp => "up",
                MouseEventType::LeftDouble => "double",
            };
            self.log.borrow_mut().push(format!("{}:{}", self.name, kind));
        }
    }

    fn set_position(&self, position: Rect) {
        self.position.set(position);
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
        self.topmost.get()
    }

    fn set_focus(&self) {
        if self.focusing() {
            self.focused.set(true);
        }
    }

    fn remove_focus(&self) -> bool {
        self.focused.set(false);
        true
    }

    fn focused(&self) -> bool {
        self.focused.get()
    }

    fn focusing(&self) -> bool {
        self.focusing.get() && self.showed.get() && self.enabled.get()
    }

    fn update_theme(&self, _theme: Option<Rc<dyn Theme>>) {}

    fn show(&self) {
        self.showed.set(true);
    }

    fn hide(&self) {
        self.showed.set(false);
    }

    fn showed(&self) -> bool {
        self.showed.get()
    }

    fn enable(&self) {
        self.enabled.set(true);
    }

    fn disable(&self) {
        self.enabled.set(false);
    }

    fn enabled(&self) -> bool {
        self.enabled.get()
    }
}

pub fn new_log() -> Rc<RefCell<Vec<String>>> {
    Rc::new(RefCell::new(Vec::new()))
}

pub fn mouse(kind: MouseEventType, x: i32, y: i32) -> Event {
    Event::mouse(kind, x, y)
}
