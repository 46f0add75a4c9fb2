//! Application context and the two-tier polling protocol
//!
//! [`Application`] is the explicit context object shared by windows, the
//! dispatch callback and the polling API. It owns the host and the mutable
//! state (registry and event queue); nothing here is process-global, so any
//! number of independent applications can coexist, for instance in tests.
//!
//! Everything runs on the one UI thread. The dispatch callback is re-entered
//! synchronously from inside host calls; state borrows are never held across a
//! call into the host.

use crate::config::AppConfig;
use crate::dispatch::{self, DispatchAction};
use crate::event::Event;
use crate::host::{headless::HeadlessHost, platform_host, Host, HostError};
use crate::message::{translate, NativeMessage};
use crate::queue::EventQueue;
use crate::registry::{WindowClass, WindowRegistry};
use std::cell::RefCell;
use std::rc::Rc;

/// Mutable state reachable from both the polling API and the dispatch callback
#[derive(Debug, Default)]
pub(crate) struct AppState {
    pub(crate) registry: WindowRegistry,
    pub(crate) queue: EventQueue,
}

impl AppState {
    pub(crate) fn new(class_name: &str) -> Self {
        Self {
            registry: WindowRegistry::new(class_name),
            queue: EventQueue::new(),
        }
    }
}

pub(crate) struct AppInner {
    pub(crate) host: Box<dyn Host>,
    pub(crate) state: Rc<RefCell<AppState>>,
}

/// Application context
///
/// Cloning yields another handle to the same context.
#[derive(Clone)]
pub struct Application {
    inner: Rc<AppInner>,
}

impl Application {
    /// Create a context over the given host and install its dispatch callback
    pub fn new(host: Box<dyn Host>, config: &AppConfig) -> Self {
        let state = Rc::new(RefCell::new(AppState::new(&config.class_name)));

        let weak = Rc::downgrade(&state);
        host.install_dispatcher(Rc::new(move |msg: &NativeMessage| {
            let Some(state) = weak.upgrade() else {
                return DispatchAction::Default;
            };
            // A panic here would unwind through the host's callback frame.
            let Ok(mut state) = state.try_borrow_mut() else {
                log::error!("Dispatch re-entered while application state was borrowed");
                return DispatchAction::Default;
            };
            dispatch::on_message(&mut state, msg)
        }));

        Self {
            inner: Rc::new(AppInner { host, state }),
        }
    }

    /// Create a context over the native host of this platform
    ///
    /// Native windows report through one dispatcher per UI thread. Creating a
    /// second native application on the same thread takes over the windows of
    /// the first (a warning is logged); keep one per thread.
    ///
    /// # Errors
    /// [`HostError::Unsupported`] where no native backend exists.
    pub fn native(config: &AppConfig) -> Result<Self, HostError> {
        Ok(Self::new(platform_host()?, config))
    }

    /// Create a context over a fresh in-memory host, returning both
    pub fn headless(config: &AppConfig) -> (Self, HeadlessHost) {
        let host = HeadlessHost::new();
        (Self::new(Box::new(host.clone()), config), host)
    }

    pub(crate) const fn inner(&self) -> &Rc<AppInner> {
        &self.inner
    }

    /// Register the window class with the host
    ///
    /// Registering twice is a logged no-op. On failure the class stays
    /// unregistered and the call may be retried.
    ///
    /// # Errors
    /// The host's [`HostError`] when it rejects the class.
    pub fn register_window_class(&self) -> Result<(), HostError> {
        let name = {
            let state = self.inner.state.borrow();
            let class = state.registry.class();
            if class.is_registered() {
                log::warn!(
                    "Window class `{}` was already registered, ignoring",
                    class.name()
                );
                return Ok(());
            }
            class.name().to_owned()
        };

        match self.inner.host.register_class(&name) {
            Ok(()) => {
                self.inner.state.borrow_mut().registry.mark_class_registered();
                log::info!("Registered window class `{name}`");
                Ok(())
            }
            Err(err) => {
                log::error!("Failed to register window class `{name}`: {err}");
                Err(err)
            }
        }
    }

    /// Change the window class name; ignored once the class is registered
    ///
    /// Returns whether the name was applied.
    pub fn set_window_class_name(&self, name: impl Into<String>) -> bool {
        self.inner.state.borrow_mut().registry.set_class_name(name)
    }

    /// Current window class description
    pub fn window_class(&self) -> WindowClass {
        self.inner.state.borrow().registry.class().clone()
    }

    /// Whether the message loop should keep running
    pub fn is_running(&self) -> bool {
        self.inner.state.borrow().registry.is_running()
    }

    /// Number of registered windows
    pub fn window_count(&self) -> usize {
        self.inner.state.borrow().registry.len()
    }

    /// Destroy every registered window and stop the message loop
    ///
    /// Handles the host no longer knows are skipped. Windows that are still
    /// alive are left closed and invalid.
    pub fn quit_program(&self) {
        // Cleared first: destroy notifications from here on never terminate.
        let handles = {
            let mut state = self.inner.state.borrow_mut();
            state.registry.set_running(false);
            state.registry.handles()
        };
        for handle in handles {
            if self.inner.host.is_window(handle) {
                self.inner.host.destroy_window(handle);
            }
        }

        let windows = self.inner.state.borrow_mut().registry.drain();
        for core in windows.iter().filter_map(std::rc::Weak::upgrade) {
            core.mark_destroyed();
        }

        self.inner.host.post_quit(0);
        log::info!("Application::quit_program - quit posted");
    }

    /// Next event, pumping the host when nothing is queued
    ///
    /// 1. Pop the queue and return if it held anything.
    /// 2. Otherwise drain every pending host message: translate it, enqueue the
    ///    result if it is not empty, then dispatch it so the callback can
    ///    enqueue its own events.
    /// 3. Pop once more.
    pub fn poll_event(&self) -> Option<Event> {
        if let Some(event) = self.inner.state.borrow_mut().queue.pop() {
            return Some(event);
        }

        while let Some(msg) = self.inner.host.peek_message() {
            let event = translate(&msg);
            if !event.is_none() {
                self.inner.state.borrow_mut().queue.push(event);
            }
            self.inner.host.dispatch_message(&msg);
        }

        self.inner.state.borrow_mut().queue.pop()
    }

    /// Iterator that polls until no event is available
    pub fn events(&self) -> impl Iterator<Item = Event> + '_ {
        std::iter::from_fn(|| self.poll_event())
    }

    /// Append an event to the queue
    pub fn push_event(&self, event: Event) {
        self.inner.state.borrow_mut().queue.push(event);
    }

    /// Earliest queued event without removing it; never pumps the host
    pub fn peek_event(&self) -> Option<Event> {
        self.inner.state.borrow().queue.peek()
    }

    /// Drop every queued event
    pub fn clear_event(&self) {
        self.inner.state.borrow_mut().queue.clear();
    }
}

impl std::fmt::Debug for Application {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.state.borrow();
        f.debug_struct("Application")
            .field("class", state.registry.class())
            .field("running", &state.registry.is_running())
            .field("windows", &state.registry.len())
            .field("queued", &state.queue.len())
            .finish()
    }
}
