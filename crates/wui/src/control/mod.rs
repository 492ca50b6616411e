//! Control abstraction
//!
//! Every widget, including [`Window`](crate::window::Window) itself,
//! implements [`Control`]. Controls are shared as `Rc<dyn Control>`: the
//! application keeps one handle, the owning window keeps another in its
//! child list, and the control points back at that window weakly.
//!
//! All methods take `&self`; state lives in `Cell`/`RefCell` because the
//! toolkit runs on a single dispatch thread and controls call back into
//! their parent while the parent is dispatching to them.

mod base;
mod button;
mod input;
mod select;
mod text;
mod tooltip;

pub use base::ControlBase;
pub use button::Button;
pub use input::{Input, InputView, CURSOR_BLINK_MS};
pub use select::{Select, SelectItem};
pub use text::Text;
pub use tooltip::Tooltip;

use std::rc::Rc;

use crate::event::Event;
use crate::graphic::Graphic;
use crate::math::Rect;
use crate::theme::Theme;
use crate::window::Window;

/// Capability set shared by all widgets
pub trait Control {
    /// Paint the control; `paint_rect` is the damaged region being repainted
    fn draw(&self, gr: &mut dyn Graphic, paint_rect: &Rect);

    /// Deliver an event; hidden or disabled controls ignore it
    fn receive_event(&self, ev: &Event);

    /// Set the position in the top-level window's coordinate space
    fn set_position(&self, position: Rect);
    fn position(&self) -> Rect;

    fn set_parent(&self, parent: &Rc<Window>);
    fn clear_parent(&self);
    fn parent(&self) -> Option<Rc<Window>>;

    /// Topmost controls are hit-tested first and drawn last
    fn topmost(&self) -> bool {
        false
    }

    fn set_focus(&self);

    /// Move focus off this control
    ///
    /// Returns `false` when the control keeps focus internally (a nested
    /// window advancing to its next child) and `true` once focus has fully
    /// left it.
    fn remove_focus(&self) -> bool;

    /// Drop focus entirely, including any internal sub-focus
    fn clear_focus(&self) {
        self.remove_focus();
    }

    fn focused(&self) -> bool;

    /// Whether the control can currently take keyboard focus
    fn focusing(&self) -> bool;

    /// Replace the explicit theme; `None` keeps an already set theme
    fn update_theme(&self, theme: Option<Rc<dyn Theme>>);

    fn show(&self);
    fn hide(&self);
    fn showed(&self) -> bool;

    fn enable(&self);
    fn disable(&self);
    fn enabled(&self) -> bool;
}

/// Identity comparison of two control handles
///
/// Compares the data pointers only; vtable pointers of the same object may
/// differ between codegen units.
#[inline]
pub fn same_control(a: &Rc<dyn Control>, b: &Rc<dyn Control>) -> bool {
    std::ptr::eq(Rc::as_ptr(a) as *const (), Rc::as_ptr(b) as *const ())
}
