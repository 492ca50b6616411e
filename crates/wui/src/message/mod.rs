//! Message box built from a window, labels and buttons

use std::cell::Cell;
use std::rc::{Rc, Weak};

use crate::control::{Button, Control, Text};
use crate::error::{ErrorKind, WuiError, WuiResult};
use crate::math::Rect;
use crate::window::{Window, WindowConfig};

const MESSAGE_WIDTH: i32 = 400;
const MESSAGE_HEIGHT: i32 = 170;
const BUTTON_WIDTH: i32 = 90;
const BUTTON_HEIGHT: i32 = 30;
const SPACING: i32 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MessageIcon {
    Information,
    Question,
    Alert,
    Stop,
}

impl MessageIcon {
    fn glyph(&self) -> &'static str {
        match self {
            Self::Information => "ℹ",
            Self::Question => "?",
            Self::Alert => "⚠",
            Self::Stop => "⛔",
        }
    }
}

/// Button set offered by the message
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MessageButton {
    Ok,
    OkCancel,
    AbortRetryIgnore,
    YesNo,
    YesNoCancel,
    RetryCancel,
    CancelTryContinue,
}

impl MessageButton {
    fn choices(&self) -> &'static [(MessageResult, &'static str)] {
        use MessageResult::*;
        match self {
            Self::Ok => &[(Ok, "OK")],
            Self::OkCancel => &[(Ok, "OK"), (Cancel, "Cancel")],
            Self::AbortRetryIgnore => &[(Abort, "Abort"), (Retry, "Retry"), (Ignore, "Ignore")],
            Self::YesNo => &[(Yes, "Yes"), (No, "No")],
            Self::YesNoCancel => &[(Yes, "Yes"), (No, "No"), (Cancel, "Cancel")],
            Self::RetryCancel => &[(Retry, "Retry"), (Cancel, "Cancel")],
            Self::CancelTryContinue => &[(Cancel, "Cancel"), (Retry, "Try again"), (Continue, "Continue")],
        }
    }
}

/// Choice reported to the message callback
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MessageResult {
    Ok,
    Cancel,
    Yes,
    No,
    Abort,
    Retry,
    Ignore,
    Continue,
}

/// Modal message box
///
/// A docked message is placed topmost inside `transient` and takes focus.
/// A top-level message gets its own native window and blocks `transient`
/// until it closes. Closing the message without choosing reports
/// [`MessageResult::Cancel`].
///
/// Buttons hold the message weakly: keep the returned handle while the
/// message is open.
pub struct Message {
    window: Rc<Window>,
    result: Cell<Option<MessageResult>>,
    callback: Box<dyn Fn(MessageResult)>,
}

impl Message {
    pub fn new(
        text: &str,
        title: &str,
        icon: MessageIcon,
        buttons: MessageButton,
        callback: impl Fn(MessageResult) + 'static,
        transient: &Rc<Window>,
        docked: bool,
    ) -> WuiResult<Rc<Self>> {
        let theme = transient.theme();
        let message = Rc::new(Self {
            window: Window::new(theme.clone()),
            result: Cell::new(None),
            callback: Box::new(callback),
        });
        let window = message.window.clone();

        let transient_rect = transient.position();
        let left = (transient_rect.width() - MESSAGE_WIDTH) / 2;
        let top = (transient_rect.height() - MESSAGE_HEIGHT) / 2;

        let mut config = WindowConfig::dialog(Rect::ZERO, title);
        if docked {
            config.topmost = true;
            config.position = Rect::from_pos_size(left, top, MESSAGE_WIDTH, MESSAGE_HEIGHT);
            transient.add_control(window.clone(), config.position);
            window.init(config, None)?;
        } else {
            let Some(adapter) = transient.adapter() else {
                return Err(WuiError::new(
                    ErrorKind::InvalidValue,
                    "message::new",
                    "transient window has no native window",
                ));
            };
            config.position = Rect::from_pos_size(
                transient_rect.left + left,
                transient_rect.top + top,
                MESSAGE_WIDTH,
                MESSAGE_HEIGHT,
            );
            window.init(config, Some(&adapter))?;
            transient.block();
        }

        let weak_transient = Rc::downgrade(transient);
        let weak_message = Rc::downgrade(&message);
        window.set_close_callback(move || {
            if !docked {
                if let Some(transient) = weak_transient.upgrade() {
                    transient.unlock();
                }
            }
            if let Some(message) = weak_message.upgrade() {
                if message.result.get().is_none() {
                    message.result.set(Some(MessageResult::Cancel));
                    (message.callback)(MessageResult::Cancel);
                }
            }
        });

        window.add_control(Text::new(icon.glyph(), theme.clone()), Rect::new(SPACING, 40, 50, 80));
        window.add_control(
            Text::new(text, theme.clone()),
            Rect::new(60, 40, MESSAGE_WIDTH - SPACING, MESSAGE_HEIGHT - BUTTON_HEIGHT - SPACING * 2),
        );

        let choices = buttons.choices();
        let mut left = MESSAGE_WIDTH - (BUTTON_WIDTH + SPACING) * choices.len() as i32;
        let top = MESSAGE_HEIGHT - BUTTON_HEIGHT - SPACING;
        for &(result, caption) in choices {
            let weak = Rc::downgrade(&message);
            let button = Button::with_theme(caption, move || choose(&weak, result), theme.clone());
            window.add_control(button, Rect::from_pos_size(left, top, BUTTON_WIDTH, BUTTON_HEIGHT));
            left += BUTTON_WIDTH + SPACING;
        }

        if docked {
            let dialog: Rc<dyn Control> = window.clone();
            transient.set_focused(&dialog);
        } else {
            window.change_focus();
        }

        tracing::debug!(title, ?buttons, docked, "message shown");
        Ok(message)
    }

    pub fn window(&self) -> &Rc<Window> {
        &self.window
    }

    /// Choice made so far, if any
    pub fn result(&self) -> Option<MessageResult> {
        self.result.get()
    }
}

fn choose(message: &Weak<Message>, result: MessageResult) {
    let Some(message) = message.upgrade() else {
        return;
    };
    if message.result.get().is_some() {
        return;
    }
    message.result.set(Some(result));
    (message.callback)(result);
    message.window.destroy();
}
