//! In-memory platform backend
//!
//! Keeps native window rects, capture, cursor and clipboard state in plain
//! collections and logs every call, so window behaviour can be exercised
//! without a window system.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use super::{CursorShape, NativeHandle, Platform, ShowCommand, TimerId};
use crate::error::{WuiError, WuiResult};
use crate::graphic::{approx_text_extent, Font};
use crate::math::Rect;

/// One logged platform call
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlatformCall {
    CreateWindow { handle: NativeHandle, rect: Rect },
    DestroyWindow(NativeHandle),
    SetWindowRect { handle: NativeHandle, rect: Rect },
    ShowWindow { handle: NativeHandle, command: ShowCommand },
    SetWindowEnabled { handle: NativeHandle, enabled: bool },
    Invalidate { handle: NativeHandle, rect: Rect, clear: bool },
    SetCursor(CursorShape),
    CapturePointer(NativeHandle),
    ReleasePointer,
    StartTimer { id: TimerId, interval_ms: u32 },
    StopTimer(TimerId),
    SetClipboard(String),
}

type TimerCallback = Rc<RefCell<Box<dyn FnMut()>>>;

/// [`Platform`] implementation backed by memory
pub struct HeadlessPlatform {
    calls: RefCell<Vec<PlatformCall>>,
    windows: RefCell<HashMap<NativeHandle, Rect>>,
    next_handle: Cell<NativeHandle>,
    work_area: Cell<Rect>,
    cursor: Cell<CursorShape>,
    captured: Cell<Option<NativeHandle>>,
    clipboard: RefCell<Option<String>>,
    timers: RefCell<HashMap<TimerId, TimerCallback>>,
    next_timer: Cell<TimerId>,
    fail_create: Cell<bool>,
}

impl Default for HeadlessPlatform {
    fn default() -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            windows: RefCell::new(HashMap::new()),
            next_handle: Cell::new(1),
            work_area: Cell::new(Rect::new(0, 0, 1920, 1040)),
            cursor: Cell::new(CursorShape::Default),
            captured: Cell::new(None),
            clipboard: RefCell::new(None),
            timers: RefCell::new(HashMap::new()),
            next_timer: Cell::new(1),
            fail_create: Cell::new(false),
        }
    }
}

impl HeadlessPlatform {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Make subsequent `create_window` calls fail
    pub fn set_fail_create(&self, fail: bool) {
        self.fail_create.set(fail);
    }

    pub fn set_work_area(&self, rect: Rect) {
        self.work_area.set(rect);
    }

    pub fn calls(&self) -> Vec<PlatformCall> {
        self.calls.borrow().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    /// Damage rects requested so far, in order
    pub fn invalidated(&self) -> Vec<(Rect, bool)> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                PlatformCall::Invalidate { rect, clear, .. } => Some((*rect, *clear)),
                _ => None,
            })
            .collect()
    }

    pub fn cursor(&self) -> CursorShape {
        self.cursor.get()
    }

    pub fn captured(&self) -> Option<NativeHandle> {
        self.captured.get()
    }

    pub fn window_exists(&self, handle: NativeHandle) -> bool {
        self.windows.borrow().contains_key(&handle)
    }

    pub fn timer_count(&self) -> usize {
        self.timers.borrow().len()
    }

    /// Run every live timer callback once
    pub fn fire_timers(&self) {
        let callbacks: Vec<TimerCallback> = self.timers.borrow().values().cloned().collect();
        for callback in callbacks {
            let mut tick = callback.borrow_mut();
            (*tick)();
        }
    }

    fn log(&self, call: PlatformCall) {
        self.calls.borrow_mut().push(call);
    }
}

impl Platform for HeadlessPlatform {
    fn create_window(&self, rect: &Rect, _caption: &str) -> WuiResult<NativeHandle> {
        if self.fail_create.get() {
            return Err(WuiError::system("platform::create_window", "window creation refused"));
        }
        let handle = self.next_handle.get();
        self.next_handle.set(handle + 1);
        self.windows.borrow_mut().insert(handle, *rect);
        self.log(PlatformCall::CreateWindow { handle, rect: *rect });
        Ok(handle)
    }

    fn destroy_window(&self, handle: NativeHandle) {
        self.windows.borrow_mut().remove(&handle);
        if self.captured.get() == Some(handle) {
            self.captured.set(None);
        }
        self.log(PlatformCall::DestroyWindow(handle));
    }

    fn set_window_rect(&self, handle: NativeHandle, rect: &Rect) {
        if let Some(slot) = self.windows.borrow_mut().get_mut(&handle) {
            *slot = *rect;
        }
        self.log(PlatformCall::SetWindowRect { handle, rect: *rect });
    }

    fn window_rect(&self, handle: NativeHandle) -> Rect {
        self.windows.borrow().get(&handle).copied().unwrap_or_default()
    }

    fn show_window(&self, handle: NativeHandle, command: ShowCommand) {
        self.log(PlatformCall::ShowWindow { handle, command });
    }

    fn set_window_enabled(&self, handle: NativeHandle, enabled: bool) {
        self.log(PlatformCall::SetWindowEnabled { handle, enabled });
    }

    fn invalidate(&self, handle: NativeHandle, rect: &Rect, clear: bool) {
        self.log(PlatformCall::Invalidate {
            handle,
            rect: *rect,
            clear,
        });
    }

    fn set_cursor(&self, shape: CursorShape) {
        self.cursor.set(shape);
        self.log(PlatformCall::SetCursor(shape));
    }

    fn capture_pointer(&self, handle: NativeHandle) {
        self.captured.set(Some(handle));
        self.log(PlatformCall::CapturePointer(handle));
    }

    fn release_pointer(&self) {
        self.captured.set(None);
        self.log(PlatformCall::ReleasePointer);
    }

    fn work_area(&self) -> Rect {
        self.work_area.get()
    }

    fn measure_text(&self, text: &str, font: &Font) -> Rect {
        approx_text_extent(text, font)
    }

    fn start_timer(&self, interval_ms: u32, callback: Box<dyn FnMut()>) -> TimerId {
        let id = self.next_timer.get();
        self.next_timer.set(id + 1);
        self.timers.borrow_mut().insert(id, Rc::new(RefCell::new(callback)));
        self.log(PlatformCall::StartTimer { id, interval_ms });
        id
    }

    fn stop_timer(&self, id: TimerId) {
        self.timers.borrow_mut().remove(&id);
        self.log(PlatformCall::StopTimer(id));
    }

    fn clipboard_text(&self) -> Option<String> {
        self.clipboard.borrow().clone()
    }

    fn set_clipboard_text(&self, text: &str) {
        *self.clipboard.borrow_mut() = Some(text.to_string());
        self.log(PlatformCall::SetClipboard(text.to_string()));
    }
}
