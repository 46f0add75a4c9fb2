//! In-memory host
//!
//! Behaves like the native message loop as far as the core can observe:
//! posted messages wait in a FIFO until pumped, sent messages and destroy
//! notifications reach the dispatcher synchronously, and a close request that
//! falls through to default processing destroys the window. Clones share the
//! same state so tests can keep a handle for inspection and fault injection.

use super::{CreateParams, Dispatcher, Host, HostError};
use crate::dispatch::DispatchAction;
use crate::geometry::{Point, Rect, Size};
use crate::message::{codes, make_param, NativeMessage, WindowHandle};
use crate::window::{ShowMode, WindowStyle};
use std::cell::RefCell;
use std::collections::{BTreeMap, HashSet, VecDeque};
use std::rc::Rc;

/// Native error code reported for injected creation failures
pub const CREATION_FAILURE_CODE: u32 = 1400;

/// Native error code reported for injected class registration failures
pub const CLASS_FAILURE_CODE: u32 = 1410;

const FIRST_HANDLE: isize = 0x100;

#[derive(Debug)]
struct HeadlessWindow {
    class_name: String,
    title: String,
    bounds: Rect,
    style: WindowStyle,
    show_mode: Option<ShowMode>,
}

#[derive(Debug, Default)]
struct HeadlessState {
    classes: HashSet<String>,
    windows: BTreeMap<WindowHandle, HeadlessWindow>,
    posted: VecDeque<NativeMessage>,
    next_handle: isize,
    quit_code: Option<i32>,

    fail_next_creation: bool,
    fail_class_registration: bool,
    fail_window_updates: bool,

    class_registrations: usize,
    destroy_calls: usize,
    default_processed: Vec<NativeMessage>,
}

/// Deterministic host for tests and platforms without a native backend
#[derive(Clone, Default)]
pub struct HeadlessHost {
    state: Rc<RefCell<HeadlessState>>,
    dispatcher: Rc<RefCell<Option<Dispatcher>>>,
}

impl HeadlessHost {
    /// Create a host with no classes, windows or pending messages
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a message for the pump
    pub fn post_message(&self, msg: NativeMessage) {
        self.state.borrow_mut().posted.push_back(msg);
    }

    /// Deliver a message to the dispatcher immediately, bypassing the queue
    pub fn send_message(&self, msg: NativeMessage) -> DispatchAction {
        let action = self.deliver(&msg);
        self.finish(&msg, action);
        action
    }

    /// Change a window's size and send the resize notification
    pub fn resize(&self, handle: WindowHandle, size: Size) -> Option<DispatchAction> {
        {
            let mut state = self.state.borrow_mut();
            let window = state.windows.get_mut(&handle)?;
            window.bounds = Rect::from_origin(window.bounds.origin(), size);
        }
        let param = make_param(size.width, size.height);
        let msg = NativeMessage::new(handle, codes::WM_SIZE, 0, param);
        Some(self.send_message(msg))
    }

    /// Make the next window creation fail
    pub fn fail_next_window_creation(&self) {
        self.state.borrow_mut().fail_next_creation = true;
    }

    /// Make class registration fail until reset
    pub fn fail_class_registration(&self, fail: bool) {
        self.state.borrow_mut().fail_class_registration = fail;
    }

    /// Make window updates fail until reset
    pub fn fail_window_updates(&self, fail: bool) {
        self.state.borrow_mut().fail_window_updates = fail;
    }

    /// Number of successful class registrations
    pub fn class_registrations(&self) -> usize {
        self.state.borrow().class_registrations
    }

    /// Number of destroy requests received, live target or not
    pub fn destroy_calls(&self) -> usize {
        self.state.borrow().destroy_calls
    }

    /// Handles of every live window, in creation order
    pub fn live_windows(&self) -> Vec<WindowHandle> {
        self.state.borrow().windows.keys().copied().collect()
    }

    /// Whether the handle names a live window
    pub fn is_live(&self, handle: WindowHandle) -> bool {
        self.state.borrow().windows.contains_key(&handle)
    }

    /// Title of a live window
    pub fn title(&self, handle: WindowHandle) -> Option<String> {
        self.state
            .borrow()
            .windows
            .get(&handle)
            .map(|window| window.title.clone())
    }

    /// Class a live window was created from
    pub fn class_of(&self, handle: WindowHandle) -> Option<String> {
        self.state
            .borrow()
            .windows
            .get(&handle)
            .map(|window| window.class_name.clone())
    }

    /// Style bits a live window was created with
    pub fn style(&self, handle: WindowHandle) -> Option<WindowStyle> {
        self.state.borrow().windows.get(&handle).map(|window| window.style)
    }

    /// Last visibility request for a live window
    pub fn show_mode(&self, handle: WindowHandle) -> Option<ShowMode> {
        self.state
            .borrow()
            .windows
            .get(&handle)
            .and_then(|window| window.show_mode)
    }

    /// Exit code of the last quit request
    pub fn quit_code(&self) -> Option<i32> {
        self.state.borrow().quit_code
    }

    /// Messages that fell through to default processing
    pub fn default_processed(&self) -> Vec<NativeMessage> {
        self.state.borrow().default_processed.clone()
    }

    /// Number of messages waiting for the pump
    pub fn pending_messages(&self) -> usize {
        self.state.borrow().posted.len()
    }

    fn call_dispatcher(&self, msg: &NativeMessage) -> DispatchAction {
        // Cloned out so the dispatcher may re-enter the host.
        let dispatcher = self.dispatcher.borrow().clone();
        dispatcher.map_or(DispatchAction::Default, |dispatch| dispatch(msg))
    }

    fn deliver(&self, msg: &NativeMessage) -> DispatchAction {
        if !self.is_window(msg.target) {
            return DispatchAction::Default;
        }
        self.call_dispatcher(msg)
    }

    fn finish(&self, msg: &NativeMessage, action: DispatchAction) {
        match action {
            DispatchAction::Default => {
                self.state.borrow_mut().default_processed.push(*msg);
                if msg.code == codes::WM_CLOSE && self.is_window(msg.target) {
                    self.destroy_window(msg.target);
                }
            }
            DispatchAction::Handled => {}
            DispatchAction::Terminate => self.post_quit(0),
        }
    }
}

impl Host for HeadlessHost {
    fn install_dispatcher(&self, dispatcher: Dispatcher) {
        *self.dispatcher.borrow_mut() = Some(dispatcher);
    }

    fn register_class(&self, name: &str) -> Result<(), HostError> {
        let mut state = self.state.borrow_mut();
        if state.fail_class_registration {
            return Err(HostError::ClassRegistration {
                name: name.to_owned(),
                code: CLASS_FAILURE_CODE,
            });
        }
        state.classes.insert(name.to_owned());
        state.class_registrations += 1;
        Ok(())
    }

    fn create_window(&self, params: &CreateParams<'_>) -> Result<WindowHandle, HostError> {
        let mut state = self.state.borrow_mut();
        if !state.classes.contains(params.class_name) {
            return Err(HostError::ClassNotRegistered(params.class_name.to_owned()));
        }
        if std::mem::take(&mut state.fail_next_creation) {
            return Err(HostError::WindowCreation {
                code: CREATION_FAILURE_CODE,
            });
        }

        state.next_handle = state.next_handle.max(FIRST_HANDLE) + 1;
        let handle = WindowHandle::from_raw(state.next_handle);
        let origin = params.position.unwrap_or(Point::new(0, 0));
        state.windows.insert(
            handle,
            HeadlessWindow {
                class_name: params.class_name.to_owned(),
                title: params.title.to_owned(),
                bounds: Rect::from_origin(origin, params.size),
                style: params.style,
                show_mode: None,
            },
        );
        Ok(handle)
    }

    fn destroy_window(&self, handle: WindowHandle) -> bool {
        let live = {
            let mut state = self.state.borrow_mut();
            state.destroy_calls += 1;
            state.windows.contains_key(&handle)
        };
        if !live {
            return false;
        }

        let msg = NativeMessage::new(handle, codes::WM_DESTROY, 0, 0);
        let action = self.call_dispatcher(&msg);
        self.state.borrow_mut().windows.remove(&handle);
        self.finish(&msg, action);
        true
    }

    fn is_window(&self, handle: WindowHandle) -> bool {
        self.is_live(handle)
    }

    fn show_window(&self, handle: WindowHandle, mode: ShowMode) {
        if let Some(window) = self.state.borrow_mut().windows.get_mut(&handle) {
            window.show_mode = Some(mode);
        }
    }

    fn update_window(&self, handle: WindowHandle) -> bool {
        let state = self.state.borrow();
        !state.fail_window_updates && state.windows.contains_key(&handle)
    }

    fn set_window_text(&self, handle: WindowHandle, text: &str) -> bool {
        match self.state.borrow_mut().windows.get_mut(&handle) {
            Some(window) => {
                window.title = text.to_owned();
                true
            }
            None => false,
        }
    }

    fn client_rect(&self, handle: WindowHandle) -> Option<Rect> {
        let state = self.state.borrow();
        let bounds = state.windows.get(&handle)?.bounds;
        Some(Rect::new(0, 0, bounds.width() as i32, bounds.height() as i32))
    }

    fn window_rect(&self, handle: WindowHandle) -> Option<Rect> {
        self.state.borrow().windows.get(&handle).map(|window| window.bounds)
    }

    fn peek_message(&self) -> Option<NativeMessage> {
        self.state.borrow_mut().posted.pop_front()
    }

    fn dispatch_message(&self, msg: &NativeMessage) {
        let action = self.deliver(msg);
        self.finish(msg, action);
    }

    fn post_quit(&self, exit_code: i32) {
        let mut state = self.state.borrow_mut();
        state.quit_code = Some(exit_code);
        state.posted.push_back(NativeMessage::new(
            WindowHandle::NULL,
            codes::WM_QUIT,
            exit_code as usize,
            0,
        ));
    }
}

impl std::fmt::Debug for HeadlessHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("HeadlessHost")
            .field("windows", &state.windows.len())
            .field("pending", &state.posted.len())
            .field("quit_code", &state.quit_code)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn params<'a>(class_name: &'a str, title: &'a str) -> CreateParams<'a> {
        CreateParams {
            class_name,
            title,
            position: Some(Point::new(5, 6)),
            size: Size::new(100, 50),
            style: WindowStyle::default(),
        }
    }

    fn host_with_class() -> HeadlessHost {
        let host = HeadlessHost::new();
        host.register_class("test").expect("class");
        host
    }

    #[test]
    fn test_create_requires_registered_class() {
        let host = HeadlessHost::new();
        assert_eq!(
            host.create_window(&params("missing", "t")),
            Err(HostError::ClassNotRegistered("missing".to_owned()))
        );
    }

    #[test]
    fn test_create_and_query() {
        let host = host_with_class();
        let handle = host.create_window(&params("test", "title")).expect("window");

        assert!(!handle.is_null());
        assert!(host.is_window(handle));
        assert_eq!(host.window_rect(handle), Some(Rect::new(5, 6, 105, 56)));
        assert_eq!(host.client_rect(handle), Some(Rect::new(0, 0, 100, 50)));
        assert_eq!(host.class_of(handle).as_deref(), Some("test"));
    }

    #[test]
    fn test_injected_creation_failure_is_one_shot() {
        let host = host_with_class();
        host.fail_next_window_creation();

        assert!(matches!(
            host.create_window(&params("test", "t")),
            Err(HostError::WindowCreation { .. })
        ));
        assert!(host.create_window(&params("test", "t")).is_ok());
    }

    #[test]
    fn test_posted_messages_are_fifo() {
        let host = HeadlessHost::new();
        let first = NativeMessage::new(WindowHandle::from_raw(1), codes::WM_KEYDOWN, 65, 0);
        let second = NativeMessage::new(WindowHandle::from_raw(1), codes::WM_KEYUP, 65, 0);
        host.post_message(first);
        host.post_message(second);

        assert_eq!(host.pending_messages(), 2);
        assert_eq!(host.peek_message(), Some(first));
        assert_eq!(host.peek_message(), Some(second));
        assert_eq!(host.peek_message(), None);
    }

    #[test]
    fn test_destroy_notifies_while_window_is_live() {
        let host = host_with_class();
        let handle = host.create_window(&params("test", "t")).expect("window");

        let seen_live = Rc::new(Cell::new(false));
        let probe = host.clone();
        let flag = Rc::clone(&seen_live);
        host.install_dispatcher(Rc::new(move |msg: &NativeMessage| {
            if msg.code == codes::WM_DESTROY {
                flag.set(probe.is_window(msg.target));
            }
            DispatchAction::Handled
        }));

        assert!(host.destroy_window(handle));
        assert!(seen_live.get());
        assert!(!host.is_window(handle));
        assert!(!host.destroy_window(handle));
        assert_eq!(host.destroy_calls(), 2);
    }

    #[test]
    fn test_unhandled_close_destroys_window() {
        let host = host_with_class();
        let handle = host.create_window(&params("test", "t")).expect("window");

        let action = host.send_message(NativeMessage::new(handle, codes::WM_CLOSE, 0, 0));
        assert_eq!(action, DispatchAction::Default);
        assert!(!host.is_window(handle));
    }

    #[test]
    fn test_terminate_posts_quit() {
        let host = host_with_class();
        let handle = host.create_window(&params("test", "t")).expect("window");
        host.install_dispatcher(Rc::new(|_: &NativeMessage| DispatchAction::Terminate));

        host.send_message(NativeMessage::new(handle, codes::WM_KEYDOWN, 0, 0));
        assert_eq!(host.quit_code(), Some(0));
        let quit = host.peek_message().expect("quit message");
        assert_eq!(quit.code, codes::WM_QUIT);
        assert!(quit.target.is_null());
    }

    #[test]
    fn test_resize_updates_bounds() {
        let host = host_with_class();
        let handle = host.create_window(&params("test", "t")).expect("window");

        assert_eq!(host.resize(handle, Size::new(300, 200)), Some(DispatchAction::Default));
        assert_eq!(host.window_rect(handle), Some(Rect::new(5, 6, 305, 206)));
        assert_eq!(host.resize(WindowHandle::from_raw(9999), Size::new(1, 1)), None);
    }
}
