//! Window registry
//!
//! Maps native handles to the windows that own them and carries the
//! process-level flags: whether the message loop is still running and whether
//! the window class has been registered with the host.
//!
//! The registry never owns a window. Entries are weak back-references, so a
//! dropped window can never be reached through a stale entry.

use crate::message::WindowHandle;
use crate::window::WindowCore;
use std::collections::HashMap;
use std::rc::Weak;
use thiserror::Error;

/// Window class name used until the application picks another one
pub const DEFAULT_CLASS_NAME: &str = "zketch_app";

/// Registry contract violations
///
/// These are caller bugs, not runtime conditions; they are never retried.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryError {
    /// Tried to register the null handle
    #[error("Application: HWND is null")]
    NullHandle,

    /// Tried to register a window that no longer exists
    #[error("Application: window is null")]
    NullWindow,
}

/// Window class bookkeeping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowClass {
    name: String,
    registered: bool,
}

impl WindowClass {
    /// Create an unregistered class description
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            registered: false,
        }
    }

    /// Class name passed to the host
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the host accepted the class
    pub const fn is_registered(&self) -> bool {
        self.registered
    }
}

impl Default for WindowClass {
    fn default() -> Self {
        Self::new(DEFAULT_CLASS_NAME)
    }
}

/// Handle to window association plus running and class flags
#[derive(Debug, Default)]
pub struct WindowRegistry {
    windows: HashMap<WindowHandle, Weak<WindowCore>>,
    running: bool,
    class: WindowClass,
}

impl WindowRegistry {
    /// Create an empty registry for the given class name
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            windows: HashMap::new(),
            running: false,
            class: WindowClass::new(class_name),
        }
    }

    /// Associate a handle with its owning window
    ///
    /// The first successful registration marks the application as running.
    pub(crate) fn register(
        &mut self,
        handle: WindowHandle,
        window: &Weak<WindowCore>,
    ) -> Result<(), RegistryError> {
        if handle.is_null() {
            return Err(RegistryError::NullHandle);
        }
        if window.strong_count() == 0 {
            return Err(RegistryError::NullWindow);
        }

        self.windows.insert(handle, window.clone());
        self.running = true;
        log::debug!(
            "Registered window {:#x}, current size: {}",
            handle.raw(),
            self.windows.len()
        );
        Ok(())
    }

    /// Remove a handle; unknown or null handles are ignored
    ///
    /// Returns whether an entry was removed.
    pub fn unregister(&mut self, handle: WindowHandle) -> bool {
        self.remove(handle).is_some()
    }

    /// Remove a handle, returning the back-reference it held
    pub(crate) fn remove(&mut self, handle: WindowHandle) -> Option<Weak<WindowCore>> {
        if handle.is_null() {
            return None;
        }

        let removed = self.windows.remove(&handle)?;
        log::debug!(
            "Erased window {:#x} from registry, current size: {}",
            handle.raw(),
            self.windows.len()
        );
        Some(removed)
    }

    /// Snapshot of every registered handle
    pub fn handles(&self) -> Vec<WindowHandle> {
        self.windows.keys().copied().collect()
    }

    /// Remove every entry, returning the back-references
    pub(crate) fn drain(&mut self) -> Vec<Weak<WindowCore>> {
        self.windows.drain().map(|(_, window)| window).collect()
    }

    /// Whether the handle is registered
    pub fn contains(&self, handle: WindowHandle) -> bool {
        self.windows.contains_key(&handle)
    }

    /// Number of registered windows
    pub fn len(&self) -> usize {
        self.windows.len()
    }

    /// Whether no window is registered
    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// Whether the message loop should keep running
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Set the running flag
    pub fn set_running(&mut self, running: bool) {
        self.running = running;
    }

    /// Window class description
    pub const fn class(&self) -> &WindowClass {
        &self.class
    }

    /// Change the class name; ignored once the class is registered
    ///
    /// Returns whether the name was applied.
    pub fn set_class_name(&mut self, name: impl Into<String>) -> bool {
        if self.class.registered {
            log::warn!("Failed to set window class name, window class was already registered");
            return false;
        }
        self.class.name = name.into();
        true
    }

    /// Record that the host accepted the class
    pub fn mark_class_registered(&mut self) {
        self.class.registered = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    fn handle(raw: isize) -> WindowHandle {
        WindowHandle::from_raw(raw)
    }

    #[test]
    fn test_register_and_unregister() {
        let cores: Vec<_> = (1..=4).map(|raw| Rc::new(WindowCore::new(handle(raw)))).collect();
        let mut registry = WindowRegistry::default();

        for core in &cores {
            registry
                .register(core.handle(), &Rc::downgrade(core))
                .expect("register");
        }
        assert_eq!(registry.len(), 4);
        assert!(registry.is_running());

        assert!(registry.unregister(handle(2)));
        assert_eq!(registry.len(), 3);
        assert!(!registry.contains(handle(2)));
    }

    #[test]
    fn test_unregister_unknown_is_noop() {
        let core = Rc::new(WindowCore::new(handle(9)));
        let mut registry = WindowRegistry::default();
        registry.register(handle(9), &Rc::downgrade(&core)).expect("register");

        assert!(!registry.unregister(handle(77)));
        assert!(!registry.unregister(WindowHandle::NULL));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_register_contract_violations() {
        let core = Rc::new(WindowCore::new(handle(5)));
        let mut registry = WindowRegistry::default();

        assert_eq!(
            registry.register(WindowHandle::NULL, &Rc::downgrade(&core)),
            Err(RegistryError::NullHandle)
        );
        assert_eq!(
            registry.register(handle(5), &Weak::new()),
            Err(RegistryError::NullWindow)
        );
        assert!(registry.is_empty());
        assert!(!registry.is_running());
    }

    #[test]
    fn test_class_name_is_frozen_after_registration() {
        let mut registry = WindowRegistry::default();
        assert_eq!(registry.class().name(), DEFAULT_CLASS_NAME);

        assert!(registry.set_class_name("editor"));
        registry.mark_class_registered();
        assert!(!registry.set_class_name("other"));
        assert_eq!(registry.class().name(), "editor");
        assert!(registry.class().is_registered());
    }

    #[test]
    fn test_drain_empties_registry() {
        let core = Rc::new(WindowCore::new(handle(3)));
        let mut registry = WindowRegistry::default();
        registry.register(handle(3), &Rc::downgrade(&core)).expect("register");

        let drained = registry.drain();
        assert_eq!(drained.len(), 1);
        assert!(registry.is_empty());
        assert!(drained[0].upgrade().is_some());
    }
}
