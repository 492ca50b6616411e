//! Event model
//!
//! Every input that reaches a control is one of three kinds: a pointer
//! event, a keyboard event, or an internal request synthesized by the
//! toolkit itself. Events are immutable values handed around by reference.

mod key;

pub use key::{Key, Modifiers};

/// Pointer event kinds
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MouseEventType {
    /// Pointer moved onto the control (synthesized by the owning window)
    Enter,
    /// Pointer moved off the control (synthesized by the owning window)
    Leave,
    Move,
    LeftDown,
    LeftUp,
    LeftDouble,
}

/// Pointer event at a point in the top-level window's coordinate space
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MouseEvent {
    pub kind: MouseEventType,
    pub x: i32,
    pub y: i32,
}

/// Keyboard event kinds
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyboardEventType {
    KeyDown,
    KeyUp,
    /// Translated character input (includes control characters such as tab)
    Char,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyboardEvent {
    pub kind: KeyboardEventType,
    pub key: Key,
    pub modifiers: Modifiers,
}

/// Requests synthesized inside the toolkit
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InternalEvent {
    /// Activate the focused control as if it were clicked
    ExecuteFocused,
}

/// Tagged union of everything a control can receive
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    Mouse(MouseEvent),
    Keyboard(KeyboardEvent),
    Internal(InternalEvent),
}

impl Event {
    pub fn mouse(kind: MouseEventType, x: i32, y: i32) -> Self {
        Event::Mouse(MouseEvent { kind, x, y })
    }

    pub fn key_down(key: Key, modifiers: Modifiers) -> Self {
        Event::Keyboard(KeyboardEvent {
            kind: KeyboardEventType::KeyDown,
            key,
            modifiers,
        })
    }

    pub fn key_up(key: Key, modifiers: Modifiers) -> Self {
        Event::Keyboard(KeyboardEvent {
            kind: KeyboardEventType::KeyUp,
            key,
            modifiers,
        })
    }

    /// Character input event
    pub fn char(ch: char, modifiers: Modifiers) -> Self {
        Event::Keyboard(KeyboardEvent {
            kind: KeyboardEventType::Char,
            key: Key::Char(ch),
            modifiers,
        })
    }

    pub fn execute_focused() -> Self {
        Event::Internal(InternalEvent::ExecuteFocused)
    }

    /// Pointer payload, if this is a pointer event
    pub fn as_mouse(&self) -> Option<&MouseEvent> {
        match self {
            Event::Mouse(me) => Some(me),
            _ => None,
        }
    }

    /// Keyboard payload, if this is a keyboard event
    pub fn as_keyboard(&self) -> Option<&KeyboardEvent> {
        match self {
            Event::Keyboard(ke) => Some(ke),
            _ => None,
        }
    }

    /// True for a pointer event of the given kind
    pub fn is_mouse(&self, kind: MouseEventType) -> bool {
        matches!(self, Event::Mouse(me) if me.kind == kind)
    }
}
