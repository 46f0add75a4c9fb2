//! Native window ownership and lifecycle
//!
//! A [`Window`] exclusively owns one native handle. Its lifecycle is
//! `empty -> REGISTERED -> CLOSED | DESTROYED`:
//!
//! - creation succeeds only once the host hands back a handle, at which point
//!   the window is inserted into the application's registry;
//! - [`Window::close`] unregisters and destroys the handle exactly once;
//! - dropping a window that is still registered closes it.
//!
//! The default value is the empty window (null handle, no state). Taking a
//! window out with [`std::mem::take`] leaves that empty value behind, and
//! dropping it has no side effects.

use crate::application::{AppInner, Application};
use crate::geometry::{Point, Rect, Size};
use crate::host::{CreateParams, HostError};
use crate::message::WindowHandle;
use crate::registry::RegistryError;
use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::rc::Rc;
use thiserror::Error;

bitflags! {
    /// Lifecycle state bits of a window
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct WindowState: u8 {
        /// Created and present in the registry
        const REGISTERED = 1 << 0;
        /// Close completed
        const CLOSED = 1 << 1;
        /// Native handle destroyed
        const DESTROYED = 1 << 2;
        /// Reserved for focus tracking
        const ACTIVE = 1 << 3;
    }
}

bitflags! {
    /// Native window style bits
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct WindowStyle: u32 {
        /// Overlapped window with title bar, system menu, sizing border and min/max boxes
        const OVERLAPPED_WINDOW = Self::CAPTION.bits()
            | Self::SYSTEM_MENU.bits()
            | Self::THICK_FRAME.bits()
            | Self::MINIMIZE_BOX.bits()
            | Self::MAXIMIZE_BOX.bits();
        /// Pop-up window with border and system menu
        const POPUP_WINDOW = Self::POPUP.bits() | Self::BORDER.bits() | Self::SYSTEM_MENU.bits();
        /// Child window
        const CHILD_WINDOW = Self::CHILD.bits();
        /// Non-resizable overlapped window
        const FIXED_WINDOW = Self::CAPTION.bits()
            | Self::SYSTEM_MENU.bits()
            | Self::MINIMIZE_BOX.bits();

        /// Plain overlapped window
        const OVERLAPPED = 0x0000_0000;
        /// Pop-up window without the normal border
        const POPUP = 0x8000_0000;
        /// Child window embedded in a parent
        const CHILD = 0x4000_0000;
        /// Initially minimized
        const MINIMIZE = 0x2000_0000;
        /// Initially visible
        const VISIBLE = 0x1000_0000;
        /// Initially disabled
        const DISABLED = 0x0800_0000;
        /// Clip overlapping siblings when drawing
        const CLIP_SIBLINGS = 0x0400_0000;
        /// Exclude child areas when the parent draws
        const CLIP_CHILDREN = 0x0200_0000;
        /// Initially maximized
        const MAXIMIZE = 0x0100_0000;
        /// Title bar (border plus dialog frame)
        const CAPTION = 0x00C0_0000;
        /// Thin border
        const BORDER = 0x0080_0000;
        /// Dialog frame
        const DIALOG_FRAME = 0x0040_0000;
        /// Vertical scroll bar
        const VERTICAL_SCROLL = 0x0020_0000;
        /// Horizontal scroll bar
        const HORIZONTAL_SCROLL = 0x0010_0000;
        /// System menu in the title bar
        const SYSTEM_MENU = 0x0008_0000;
        /// Sizing border
        const THICK_FRAME = 0x0004_0000;
        /// Minimize button
        const MINIMIZE_BOX = 0x0002_0000;
        /// Maximize button
        const MAXIMIZE_BOX = 0x0001_0000;
        /// First control of a group (same bit as the minimize button)
        const GROUP = 0x0002_0000;
        /// Reachable with Tab (same bit as the maximize button)
        const TAB_STOP = 0x0001_0000;
    }
}

impl Default for WindowStyle {
    fn default() -> Self {
        Self::OVERLAPPED_WINDOW
    }
}

/// Visibility requests understood by the host
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i32)]
pub enum ShowMode {
    /// Hide the window
    Hidden = 0,
    /// Activate and show in its normal placement
    Normal = 1,
    /// Activate and minimize
    Minimized = 2,
    /// Activate and maximize
    Maximized = 3,
    /// Show in normal placement without activating
    NoActivate = 4,
    /// Activate and show at current placement
    #[default]
    Show = 5,
    /// Minimize and activate the next window
    Minimize = 6,
    /// Minimize without activating
    MinNoActivate = 7,
    /// Show at current placement without activating
    ShowNoActivate = 8,
    /// Restore from minimized or maximized
    Restore = 9,
    /// Use the mode the process was started with
    SystemDefault = 10,
    /// Minimize even if the owning thread is hung
    ForceMinimize = 11,
}

/// Window errors
#[derive(Error, Debug)]
pub enum WindowError {
    /// The host refused to create the native window
    #[error("Window::create_window - failed to create window `{title}`: {source}")]
    CreationFailed {
        /// Title of the window that could not be created
        title: String,
        /// Host failure
        #[source]
        source: HostError,
    },

    /// The host failed to refresh a window that was asked to show
    #[error("Window::show - failed to update window")]
    UpdateFailed,

    /// Registry contract violation while inserting the window
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Window creation parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Title bar text
    pub title: String,
    /// Native style bits
    pub style: WindowStyle,
    /// Top-left position, `None` lets the host choose
    pub position: Option<Point>,
    /// Outer size
    pub size: Size,
}

impl WindowConfig {
    /// Configuration with a title and size at a host-chosen position
    pub fn new(title: impl Into<String>, size: Size) -> Self {
        Self {
            title: title.into(),
            size,
            ..Self::default()
        }
    }

    /// Set an explicit position
    #[must_use]
    pub fn with_position(mut self, position: Point) -> Self {
        self.position = Some(position);
        self
    }

    /// Set the style bits
    #[must_use]
    pub fn with_style(mut self, style: WindowStyle) -> Self {
        self.style = style;
        self
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Window demo".to_string(),
            style: WindowStyle::default(),
            position: None,
            size: Size::new(600, 400),
        }
    }
}

/// State shared between a window and its registry entry
#[derive(Debug, Default)]
pub(crate) struct WindowCore {
    handle: WindowHandle,
    state: Cell<WindowState>,
}

impl WindowCore {
    pub(crate) fn new(handle: WindowHandle) -> Self {
        Self {
            handle,
            state: Cell::new(WindowState::empty()),
        }
    }

    pub(crate) const fn handle(&self) -> WindowHandle {
        self.handle
    }

    pub(crate) fn state(&self) -> WindowState {
        self.state.get()
    }

    fn update(&self, f: impl FnOnce(&mut WindowState)) {
        let mut state = self.state.get();
        f(&mut state);
        self.state.set(state);
    }

    /// Mark the handle as gone without touching the host
    pub(crate) fn mark_destroyed(&self) {
        self.update(|state| {
            state.remove(WindowState::REGISTERED);
            state.insert(WindowState::CLOSED | WindowState::DESTROYED);
        });
    }
}

/// A native window owned by this process
#[derive(Default)]
pub struct Window {
    core: Rc<WindowCore>,
    app: Option<Rc<AppInner>>,
}

impl Window {
    /// Create and register a native window
    ///
    /// # Errors
    /// [`WindowError::CreationFailed`] when the host refuses the window (for
    /// example because the window class was never registered). No window object
    /// is produced in that case.
    pub fn new(app: &Application, config: &WindowConfig) -> Result<Self, WindowError> {
        let inner = app.inner();
        let class_name = inner.state.borrow().registry.class().name().to_owned();

        let params = CreateParams {
            class_name: &class_name,
            title: &config.title,
            position: config.position,
            size: config.size,
            style: config.style,
        };

        let handle = inner.host.create_window(&params).map_err(|source| {
            log::error!(
                "Window::create_window - failed to create window `{}`: {source}",
                config.title
            );
            WindowError::CreationFailed {
                title: config.title.clone(),
                source,
            }
        })?;

        let core = Rc::new(WindowCore::new(handle));
        let registered = inner
            .state
            .borrow_mut()
            .registry
            .register(handle, &Rc::downgrade(&core));
        if let Err(err) = registered {
            inner.host.destroy_window(handle);
            return Err(err.into());
        }

        core.update(|state| state.insert(WindowState::REGISTERED));
        log::info!("Created window `{}` ({:#x})", config.title, handle.raw());

        Ok(Self {
            core,
            app: Some(Rc::clone(inner)),
        })
    }

    /// Create a window of the given size at a host-chosen position
    pub fn with_size(app: &Application, title: &str, size: Size) -> Result<Self, WindowError> {
        Self::new(app, &WindowConfig::new(title, size))
    }

    /// Create a window with explicit position and size
    pub fn with_bounds(
        app: &Application,
        title: &str,
        position: Point,
        size: Size,
    ) -> Result<Self, WindowError> {
        Self::new(app, &WindowConfig::new(title, size).with_position(position))
    }

    /// Native handle, null for the empty window
    pub fn handle(&self) -> WindowHandle {
        self.core.handle()
    }

    /// Current lifecycle state bits
    pub fn state(&self) -> WindowState {
        self.core.state()
    }

    /// Request a visibility change
    ///
    /// # Errors
    /// [`WindowError::UpdateFailed`] when showing and the host fails to refresh
    /// the window.
    pub fn set_show_mode(&self, mode: ShowMode) -> Result<(), WindowError> {
        let Some(app) = self.live_app() else {
            return Ok(());
        };

        let handle = self.handle();
        app.host.show_window(handle, mode);
        if mode == ShowMode::Show && !app.host.update_window(handle) {
            log::error!("Window::show - failed to update window {:#x}", handle.raw());
            return Err(WindowError::UpdateFailed);
        }
        Ok(())
    }

    /// Unregister and destroy the native window
    ///
    /// Only acts on a registered window; later calls are no-ops.
    pub fn close(&mut self) {
        if !self.state().contains(WindowState::REGISTERED) {
            return;
        }
        let Some(app) = self.app.as_ref() else {
            return;
        };

        let handle = self.handle();
        app.state.borrow_mut().registry.unregister(handle);
        self.core.update(|state| state.remove(WindowState::REGISTERED));

        // The host delivers the destroy notification synchronously from here.
        app.host.destroy_window(handle);

        self.core
            .update(|state| state.insert(WindowState::CLOSED | WindowState::DESTROYED));
        log::debug!("Closed window {:#x}", handle.raw());
    }

    /// Replace the title bar text; no-op for the empty window
    pub fn set_title(&self, title: &str) {
        let Some(app) = self.live_app() else {
            return;
        };
        if !app.host.set_window_text(self.handle(), title) {
            log::warn!("Failed to set title of window {:#x}", self.handle().raw());
        }
    }

    /// Client area in client coordinates
    pub fn client_bound(&self) -> Option<Rect> {
        self.live_app()?.host.client_rect(self.handle())
    }

    /// Outer window rectangle in screen coordinates
    pub fn window_bound(&self) -> Option<Rect> {
        self.live_app()?.host.window_rect(self.handle())
    }

    /// Whether the handle is non-null and not yet destroyed
    pub fn is_valid(&self) -> bool {
        !self.handle().is_null() && !self.state().contains(WindowState::DESTROYED)
    }

    fn live_app(&self) -> Option<&Rc<AppInner>> {
        if self.handle().is_null() {
            return None;
        }
        self.app.as_ref()
    }
}

impl Drop for Window {
    fn drop(&mut self) {
        self.close();
    }
}

impl std::fmt::Debug for Window {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Window")
            .field("handle", &self.handle())
            .field("state", &self.state())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::host::headless::HeadlessHost;

    fn setup() -> (Application, HeadlessHost) {
        let host = HeadlessHost::new();
        let app = Application::new(Box::new(host.clone()), &AppConfig::default());
        app.register_window_class().expect("class registration");
        (app, host)
    }

    #[test]
    fn test_empty_window() {
        let mut window = Window::default();
        assert!(window.handle().is_null());
        assert!(!window.is_valid());
        assert_eq!(window.state(), WindowState::empty());
        assert!(window.client_bound().is_none());
        assert!(window.set_show_mode(ShowMode::Show).is_ok());
        window.set_title("ignored");
        window.close();
        assert_eq!(window.state(), WindowState::empty());
    }

    #[test]
    fn test_create_registers_window() {
        let (app, host) = setup();
        let window = Window::with_size(&app, "Window demo", Size::new(600, 400)).expect("window");

        assert!(window.is_valid());
        assert!(window.state().contains(WindowState::REGISTERED));
        assert_eq!(app.window_count(), 1);
        assert!(app.is_running());
        assert_eq!(host.title(window.handle()).as_deref(), Some("Window demo"));
    }

    #[test]
    fn test_creation_without_class_fails() {
        let host = HeadlessHost::new();
        let app = Application::new(Box::new(host.clone()), &AppConfig::default());

        let result = Window::with_size(&app, "no class", Size::new(10, 10));
        assert!(matches!(
            result,
            Err(WindowError::CreationFailed {
                source: HostError::ClassNotRegistered(_),
                ..
            })
        ));
        assert_eq!(app.window_count(), 0);
        assert!(!app.is_running());
    }

    #[test]
    fn test_close_is_idempotent() {
        let (app, host) = setup();
        let mut window = Window::with_size(&app, "closing", Size::new(100, 100)).expect("window");
        let handle = window.handle();

        window.close();
        assert!(!window.is_valid());
        assert!(window.state().contains(WindowState::CLOSED | WindowState::DESTROYED));
        assert!(!window.state().contains(WindowState::REGISTERED));
        assert!(!host.is_live(handle));
        assert_eq!(host.destroy_calls(), 1);

        window.close();
        assert_eq!(host.destroy_calls(), 1);
        assert_eq!(app.window_count(), 0);
    }

    #[test]
    fn test_show_failure_is_reported() {
        let (app, host) = setup();
        let window = Window::with_size(&app, "show", Size::new(100, 100)).expect("window");

        assert!(window.set_show_mode(ShowMode::Show).is_ok());
        assert_eq!(host.show_mode(window.handle()), Some(ShowMode::Show));

        host.fail_window_updates(true);
        assert!(matches!(
            window.set_show_mode(ShowMode::Show),
            Err(WindowError::UpdateFailed)
        ));
        // Only "show" refreshes the window.
        assert!(window.set_show_mode(ShowMode::Minimized).is_ok());
    }

    #[test]
    fn test_bounds_and_title() {
        let (app, host) = setup();
        let window = Window::with_bounds(&app, "bounds", Point::new(10, 20), Size::new(300, 200))
            .expect("window");

        assert_eq!(window.window_bound(), Some(Rect::new(10, 20, 310, 220)));
        assert_eq!(window.client_bound(), Some(Rect::new(0, 0, 300, 200)));

        window.set_title("renamed");
        assert_eq!(host.title(window.handle()).as_deref(), Some("renamed"));
    }

    #[test]
    fn test_moved_window_stays_registered() {
        let (app, _host) = setup();
        let mut original = Window::with_size(&app, "moved", Size::new(50, 50)).expect("window");
        let handle = original.handle();

        let mut moved = std::mem::take(&mut original);
        assert!(original.handle().is_null());
        assert!(!original.is_valid());
        drop(original);
        assert_eq!(app.window_count(), 1);

        assert_eq!(moved.handle(), handle);
        assert!(moved.is_valid());
        moved.close();
        assert_eq!(app.window_count(), 0);
    }

    #[test]
    fn test_drop_closes_registered_window() {
        let (app, host) = setup();
        let window = Window::with_size(&app, "dropped", Size::new(50, 50)).expect("window");
        let handle = window.handle();

        drop(window);
        assert!(!host.is_live(handle));
        assert_eq!(app.window_count(), 0);
        assert!(!app.is_running());
    }

    #[test]
    fn test_style_serialization() {
        let config =
            WindowConfig::new("styled", Size::new(1, 1)).with_style(WindowStyle::FIXED_WINDOW);
        let text = toml::to_string(&config).expect("serialize");
        let parsed: WindowConfig = toml::from_str(&text).expect("parse");
        assert_eq!(parsed.style, WindowStyle::FIXED_WINDOW);
        assert_eq!(WindowStyle::OVERLAPPED_WINDOW.bits(), 0x00CF_0000);
        assert_eq!(WindowStyle::POPUP_WINDOW.bits(), 0x8088_0000);
    }
}
