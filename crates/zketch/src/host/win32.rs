//! Win32 host
//!
//! Thin layer over `user32`. The window procedure registered with every class
//! forwards to the dispatcher installed on this thread; Win32 windows belong to
//! the thread that created them, so the dispatcher lives in a thread-local.

use super::{CreateParams, Dispatcher, Host, HostError};
use crate::dispatch::DispatchAction;
use crate::geometry::Rect;
use crate::message::{NativeMessage, WindowHandle};
use crate::window::ShowMode;
use std::cell::RefCell;
use std::ffi::OsStr;
use std::os::windows::ffi::OsStrExt;
use std::ptr;
use winapi::shared::minwindef::{HINSTANCE, LPARAM, LRESULT, UINT, WPARAM};
use winapi::shared::windef::{HBRUSH, HWND, RECT};
use winapi::um::errhandlingapi::GetLastError;
use winapi::um::libloaderapi::GetModuleHandleW;
use winapi::um::winuser::{
    CreateWindowExW, DefWindowProcW, DestroyWindow, DispatchMessageW, GetClientRect,
    GetWindowRect, IsWindow, LoadCursorW, PeekMessageW, PostQuitMessage, RegisterClassExW,
    SetWindowTextW, ShowWindow, TranslateMessage, UpdateWindow, COLOR_WINDOW, CS_HREDRAW,
    CS_VREDRAW, CW_USEDEFAULT, IDC_ARROW, MSG, PM_REMOVE, WNDCLASSEXW,
};

const ERROR_CANNOT_FIND_WND_CLASS: u32 = 1407;

thread_local! {
    static DISPATCHER: RefCell<Option<Dispatcher>> = const { RefCell::new(None) };
}

/// Install the thread's dispatcher, returning whether one was already present
fn replace_dispatcher(dispatcher: Dispatcher) -> bool {
    DISPATCHER.with(|slot| slot.borrow_mut().replace(dispatcher).is_some())
}

fn wide(value: &str) -> Vec<u16> {
    OsStr::new(value)
        .encode_wide()
        .chain(std::iter::once(0))
        .collect()
}

fn hwnd(handle: WindowHandle) -> HWND {
    handle.raw() as HWND
}

fn to_rect(rect: &RECT) -> Rect {
    Rect::new(rect.left, rect.top, rect.right, rect.bottom)
}

unsafe extern "system" fn window_proc(
    hwnd: HWND,
    msg: UINT,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    let native = NativeMessage::new(WindowHandle::from_raw(hwnd as isize), msg, wparam, lparam);
    // Cloned out of the slot: the dispatcher may destroy windows, which
    // re-enters this procedure.
    let dispatcher = DISPATCHER.with(|slot| slot.borrow().clone());
    let action = dispatcher.map_or(DispatchAction::Default, |dispatch| dispatch(&native));

    match action {
        DispatchAction::Default => unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) },
        DispatchAction::Handled => 0,
        DispatchAction::Terminate => {
            unsafe { PostQuitMessage(0) };
            0
        }
    }
}

/// Native Windows host for the calling thread
#[derive(Debug)]
pub struct Win32Host {
    instance: HINSTANCE,
}

impl Win32Host {
    /// Bind to the current module
    pub fn new() -> Self {
        // SAFETY: a null module name asks for the executable's own handle.
        let instance = unsafe { GetModuleHandleW(ptr::null()) };
        Self { instance }
    }
}

impl Default for Win32Host {
    fn default() -> Self {
        Self::new()
    }
}

impl Host for Win32Host {
    fn install_dispatcher(&self, dispatcher: Dispatcher) {
        if replace_dispatcher(dispatcher) {
            log::warn!(
                "Win32Host: replaced the dispatcher of another application on this thread, \
                 its windows now report to the new one"
            );
        }
    }

    fn register_class(&self, name: &str) -> Result<(), HostError> {
        let class_name = wide(name);

        // SAFETY: WNDCLASSEXW is plain data; every pointer field is either
        // filled below or left null, which the API accepts.
        let mut class: WNDCLASSEXW = unsafe { std::mem::zeroed() };
        class.cbSize = std::mem::size_of::<WNDCLASSEXW>() as UINT;
        class.style = CS_HREDRAW | CS_VREDRAW;
        class.lpfnWndProc = Some(window_proc);
        class.hInstance = self.instance;
        class.hCursor = unsafe { LoadCursorW(ptr::null_mut(), IDC_ARROW) };
        class.hbrBackground = (COLOR_WINDOW + 1) as usize as HBRUSH;
        class.lpszClassName = class_name.as_ptr();

        // SAFETY: `class` and the name buffer it points to outlive the call.
        let atom = unsafe { RegisterClassExW(&class) };
        if atom == 0 {
            return Err(HostError::ClassRegistration {
                name: name.to_owned(),
                code: unsafe { GetLastError() },
            });
        }
        Ok(())
    }

    fn create_window(&self, params: &CreateParams<'_>) -> Result<WindowHandle, HostError> {
        let class_name = wide(params.class_name);
        let title = wide(params.title);
        let (x, y) = params
            .position
            .map_or((CW_USEDEFAULT, CW_USEDEFAULT), |p| (p.x, p.y));

        // SAFETY: both strings are NUL-terminated and alive for the call. The
        // window procedure may run before this returns.
        let handle = unsafe {
            CreateWindowExW(
                0,
                class_name.as_ptr(),
                title.as_ptr(),
                params.style.bits(),
                x,
                y,
                i32::from(params.size.width),
                i32::from(params.size.height),
                ptr::null_mut(),
                ptr::null_mut(),
                self.instance,
                ptr::null_mut(),
            )
        };

        if handle.is_null() {
            let code = unsafe { GetLastError() };
            if code == ERROR_CANNOT_FIND_WND_CLASS {
                return Err(HostError::ClassNotRegistered(params.class_name.to_owned()));
            }
            return Err(HostError::WindowCreation { code });
        }
        Ok(WindowHandle::from_raw(handle as isize))
    }

    fn destroy_window(&self, handle: WindowHandle) -> bool {
        unsafe { DestroyWindow(hwnd(handle)) != 0 }
    }

    fn is_window(&self, handle: WindowHandle) -> bool {
        !handle.is_null() && unsafe { IsWindow(hwnd(handle)) != 0 }
    }

    fn show_window(&self, handle: WindowHandle, mode: ShowMode) {
        // The return value is the previous visibility, not an error.
        unsafe { ShowWindow(hwnd(handle), mode as i32) };
    }

    fn update_window(&self, handle: WindowHandle) -> bool {
        unsafe { UpdateWindow(hwnd(handle)) != 0 }
    }

    fn set_window_text(&self, handle: WindowHandle, text: &str) -> bool {
        let text = wide(text);
        unsafe { SetWindowTextW(hwnd(handle), text.as_ptr()) != 0 }
    }

    fn client_rect(&self, handle: WindowHandle) -> Option<Rect> {
        let mut rect: RECT = unsafe { std::mem::zeroed() };
        let ok = unsafe { GetClientRect(hwnd(handle), &mut rect) != 0 };
        ok.then(|| to_rect(&rect))
    }

    fn window_rect(&self, handle: WindowHandle) -> Option<Rect> {
        let mut rect: RECT = unsafe { std::mem::zeroed() };
        let ok = unsafe { GetWindowRect(hwnd(handle), &mut rect) != 0 };
        ok.then(|| to_rect(&rect))
    }

    fn peek_message(&self) -> Option<NativeMessage> {
        let mut msg: MSG = unsafe { std::mem::zeroed() };
        // SAFETY: null window filter means every message of this thread.
        let available = unsafe { PeekMessageW(&mut msg, ptr::null_mut(), 0, 0, PM_REMOVE) != 0 };
        available.then(|| {
            NativeMessage::new(
                WindowHandle::from_raw(msg.hwnd as isize),
                msg.message,
                msg.wParam,
                msg.lParam,
            )
        })
    }

    fn dispatch_message(&self, msg: &NativeMessage) {
        let mut native: MSG = unsafe { std::mem::zeroed() };
        native.hwnd = hwnd(msg.target);
        native.message = msg.code;
        native.wParam = msg.param_a;
        native.lParam = msg.param_b;

        unsafe {
            TranslateMessage(&native);
            DispatchMessageW(&native);
        }
    }

    fn post_quit(&self, exit_code: i32) {
        unsafe { PostQuitMessage(exit_code) };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn test_second_dispatcher_replaces_first() {
        let first: Dispatcher = Rc::new(|_: &NativeMessage| DispatchAction::Handled);
        let second: Dispatcher = Rc::new(|_: &NativeMessage| DispatchAction::Terminate);

        assert!(!replace_dispatcher(first));
        assert!(replace_dispatcher(second));

        let msg = NativeMessage::default();
        let action = DISPATCHER.with(|slot| slot.borrow().as_ref().map(|dispatch| dispatch(&msg)));
        assert_eq!(action, Some(DispatchAction::Terminate));
    }
}
