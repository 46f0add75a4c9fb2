//! # Zketch
//!
//! Native window lifecycle and a structured, pollable event model layered over
//! the host's message loop.
//!
//! ## Features
//!
//! - **Window ownership**: move-only [`Window`] objects that register with the
//!   application and release their native handle exactly once
//! - **Typed events**: window, mouse and keyboard payloads decoded from raw
//!   native messages
//! - **Two-tier polling**: queued events first, then a non-blocking pump of the
//!   host message queue
//! - **Headless host**: deterministic in-memory backend for tests and
//!   platforms without a native one
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use zketch::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::default();
//!     let app = Application::native(&config)?;
//!     app.register_window_class()?;
//!
//!     let mut window = Window::new(&app, &config.window)?;
//!     window.set_show_mode(ShowMode::Show)?;
//!
//!     while app.is_running() {
//!         while let Some(event) = app.poll_event() {
//!             if event.window_data().map(WindowEventData::kind) == Some(WindowEventKind::Close) {
//!                 window.close();
//!             }
//!         }
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names)]

pub mod config;
pub mod dispatch;
pub mod event;
pub mod geometry;
pub mod host;
pub mod keyboard;
pub mod logging;
pub mod message;
pub mod queue;
pub mod registry;
pub mod window;

mod application;

#[cfg(test)]
mod tests;

pub use application::Application;
pub use config::{AppConfig, Config, ConfigError};
pub use dispatch::DispatchAction;
pub use event::{
    Event, EventDataError, EventKind, EventPayload, KeyEventData, KeyEventKind, MouseButton,
    MouseEventData, MouseEventKind, WindowEventData, WindowEventKind,
};
pub use geometry::{Point, Rect, Size};
pub use host::{headless::HeadlessHost, platform_host, Host, HostError};
pub use keyboard::KeyCode;
pub use message::{translate, NativeMessage, WindowHandle};
pub use queue::EventQueue;
pub use registry::{RegistryError, WindowClass, WindowRegistry};
pub use window::{ShowMode, Window, WindowConfig, WindowError, WindowState, WindowStyle};

/// Common imports for applications
pub mod prelude {
    pub use crate::{
        AppConfig, Application, Config, Event, EventKind, KeyCode, KeyEventData, KeyEventKind,
        MouseButton, MouseEventData, MouseEventKind, ShowMode, Window, WindowConfig,
        WindowEventData, WindowEventKind, WindowHandle,
        geometry::{Point, Rect, Size},
    };
}
