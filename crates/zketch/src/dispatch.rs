//! Host-invoked dispatch callback
//!
//! The host runs this synchronously, on the UI thread, for every message it
//! dispatches to a managed window. Resize and close notifications are turned
//! into events here because the host sends them straight to the callback
//! instead of posting them to the queue the pump reads.

use crate::application::AppState;
use crate::event::{Event, WindowEventData, WindowEventKind};
use crate::message::{codes, decode_size, NativeMessage};
use std::rc::Weak;

/// What the host should do after the callback ran
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DispatchAction {
    /// Continue with default host processing
    Default,
    /// Suppress default processing
    Handled,
    /// Suppress default processing and ask the message loop to terminate
    Terminate,
}

/// React to one dispatched message
pub(crate) fn on_message(state: &mut AppState, msg: &NativeMessage) -> DispatchAction {
    match msg.code {
        codes::WM_SIZE => {
            let data = WindowEventData::new(WindowEventKind::Resize, decode_size(msg.param_b));
            state.queue.push(Event::window(msg.target, data));
            DispatchAction::Default
        }
        // The application decides whether a close request destroys the window.
        codes::WM_CLOSE => {
            let data = WindowEventData::new(WindowEventKind::Close, decode_size(msg.param_b));
            state.queue.push(Event::window(msg.target, data));
            DispatchAction::Handled
        }
        // Windows destroyed by the host directly never went through `Window::close`.
        codes::WM_DESTROY => {
            let removed = state.registry.remove(msg.target);
            if let Some(core) = removed.as_ref().and_then(Weak::upgrade) {
                core.mark_destroyed();
            }

            if state.registry.is_empty() && state.registry.is_running() {
                state.registry.set_running(false);
                log::info!("Last window destroyed, leaving message loop");
                DispatchAction::Terminate
            } else {
                DispatchAction::Handled
            }
        }
        _ => DispatchAction::Default,
    }
}
