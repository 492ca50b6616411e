//! Key identifiers and modifier state

/// Logical key carried by a keyboard event
///
/// `KeyDown`/`KeyUp` events carry navigation or editing keys; `Char` events
/// carry [`Key::Char`] with the translated character, including control
/// characters (`'\t'`, `'\r'`, `'\u{3}'` for Ctrl+C, ...).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    Backspace,
    Delete,
    Shift,
    Control,
    Escape,
    /// Native virtual-key code with no logical mapping
    Other(u32),
}

impl Key {
    pub const TAB: Key = Key::Char('\t');
    pub const RETURN: Key = Key::Char('\r');

    /// Letter of a Ctrl+letter chord delivered as a control character
    ///
    /// `'\u{1}'` maps to `'a'`, `'\u{3}'` to `'c'`, and so on.
    pub fn control_letter(&self) -> Option<char> {
        match *self {
            Key::Char(c) if ('\u{1}'..='\u{1a}').contains(&c) && c != '\t' && c != '\r' => {
                char::from_u32(c as u32 + 'a' as u32 - 1)
            }
            _ => None,
        }
    }
}

/// Modifier keys held while the event was generated
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
    };

    pub const SHIFT: Modifiers = Modifiers {
        shift: true,
        ctrl: false,
        alt: false,
    };

    pub const CTRL: Modifiers = Modifiers {
        shift: false,
        ctrl: true,
        alt: false,
    };
}
