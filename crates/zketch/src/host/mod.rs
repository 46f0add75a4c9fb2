//! Native host boundary
//!
//! The [`Host`] trait is everything the core needs from the windowing system:
//! class registration, window creation and queries, the non-blocking message
//! pump and quit signalling.
//!
//! # Re-entrancy
//!
//! Native hosts call back into the application synchronously: dispatching a
//! message, destroying a window and even creating one all run the installed
//! [`Dispatcher`] before they return. Every method therefore takes `&self`, and
//! callers must not hold a borrow of application state across a host call.
//!
//! # Backends
//!
//! - [`headless::HeadlessHost`]: deterministic in-memory host for tests and
//!   platforms without a native backend
//! - `win32::Win32Host`: the Windows message loop (Windows only)

pub mod headless;

#[cfg(windows)]
#[allow(unsafe_code)]
pub mod win32;

use crate::dispatch::DispatchAction;
use crate::geometry::{Point, Rect, Size};
use crate::message::{NativeMessage, WindowHandle};
use crate::window::{ShowMode, WindowStyle};
use std::rc::Rc;
use thiserror::Error;

/// Callback the host runs for every message addressed to a managed window
pub type Dispatcher = Rc<dyn Fn(&NativeMessage) -> DispatchAction>;

/// Host failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    /// The host rejected the window class
    #[error("failed to register window class `{name}` (os error {code})")]
    ClassRegistration {
        /// Class name that was rejected
        name: String,
        /// Native error code
        code: u32,
    },

    /// Window creation referenced a class the host does not know
    #[error("window class `{0}` is not registered")]
    ClassNotRegistered(String),

    /// The host could not create the window
    #[error("failed to create window (os error {code})")]
    WindowCreation {
        /// Native error code
        code: u32,
    },

    /// No native windowing backend exists for this platform
    #[error("no native window host is available on this platform")]
    Unsupported,
}

/// Arguments of a native window creation call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreateParams<'a> {
    /// Registered class to instantiate
    pub class_name: &'a str,
    /// Title bar text
    pub title: &'a str,
    /// Top-left position, `None` for the host default
    pub position: Option<Point>,
    /// Outer size
    pub size: Size,
    /// Style bits
    pub style: WindowStyle,
}

/// The host windowing system
pub trait Host {
    /// Install the application's dispatch callback, replacing any previous one
    fn install_dispatcher(&self, dispatcher: Dispatcher);

    /// Register a window class bound to the dispatch callback
    fn register_class(&self, name: &str) -> Result<(), HostError>;

    /// Create a native window
    fn create_window(&self, params: &CreateParams<'_>) -> Result<WindowHandle, HostError>;

    /// Destroy a native window; the destroy notification is dispatched before
    /// this returns
    fn destroy_window(&self, handle: WindowHandle) -> bool;

    /// Whether the handle names a live native window
    fn is_window(&self, handle: WindowHandle) -> bool;

    /// Change visibility
    fn show_window(&self, handle: WindowHandle, mode: ShowMode);

    /// Force a repaint; false on failure
    fn update_window(&self, handle: WindowHandle) -> bool;

    /// Replace the title bar text
    fn set_window_text(&self, handle: WindowHandle, text: &str) -> bool;

    /// Client area in client coordinates
    fn client_rect(&self, handle: WindowHandle) -> Option<Rect>;

    /// Outer rectangle in screen coordinates
    fn window_rect(&self, handle: WindowHandle) -> Option<Rect>;

    /// Remove and return the next pending message without blocking
    fn peek_message(&self) -> Option<NativeMessage>;

    /// Hand a message to the host for default processing, running the
    /// dispatch callback for managed windows
    fn dispatch_message(&self, msg: &NativeMessage);

    /// Ask the message loop to terminate
    fn post_quit(&self, exit_code: i32);
}

/// The native host for the current platform
///
/// # Errors
/// [`HostError::Unsupported`] on platforms without a native backend.
#[cfg(windows)]
pub fn platform_host() -> Result<Box<dyn Host>, HostError> {
    Ok(Box::new(win32::Win32Host::new()))
}

/// The native host for the current platform
///
/// # Errors
/// [`HostError::Unsupported`] on platforms without a native backend.
#[cfg(not(windows))]
pub fn platform_host() -> Result<Box<dyn Host>, HostError> {
    Err(HostError::Unsupported)
}
