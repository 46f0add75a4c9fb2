//! Event model
//!
//! An [`Event`] is a handle plus a tagged payload. The payload enum carries the
//! category, so an event's kind can never disagree with the data it holds.
//! Every type here is a plain `Copy` value.

use crate::geometry::{Point, Size};
use crate::keyboard::KeyCode;
use crate::message::WindowHandle;
use thiserror::Error;

/// Event category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Carries no payload
    #[default]
    None,
    /// Window lifecycle or geometry change
    Window,
    /// Pointer input
    Mouse,
    /// Keyboard input
    Key,
}

/// Window event subkinds
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum WindowEventKind {
    /// No window occurrence
    #[default]
    None,
    /// Close was requested
    Close,
    /// Window was minimized
    Minimize,
    /// Window was maximized
    Maximize,
    /// Client area was resized
    Resize,
}

/// Mouse event subkinds
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum MouseEventKind {
    /// No mouse occurrence
    #[default]
    None,
    /// Pointer moved
    Move,
    /// Button released
    Up,
    /// Button pressed
    Down,
    /// Middle button activity
    Middle,
    /// Button double-clicked
    DoubleClick,
    /// Pointer hovered
    Hover,
    /// Wheel rotated
    Wheel,
}

/// Mouse buttons
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// No button involved
    #[default]
    None,
    /// Left mouse button
    Left,
    /// Right mouse button
    Right,
    /// Middle mouse button
    Middle,
    /// Button the host reported but the model does not name
    Undefined,
}

/// Key event subkinds
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum KeyEventKind {
    /// No key occurrence
    #[default]
    None,
    /// Key released
    Up,
    /// Key pressed
    Down,
}

/// Rejected mouse payload combinations
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventDataError {
    /// A wheel event was given a position instead of a delta
    #[error("MouseEventData: wheel event cannot carry a position")]
    WheelWithPosition,

    /// A non-wheel event was given a wheel delta
    #[error("MouseEventData: {0:?} event cannot carry a wheel delta")]
    DeltaWithoutWheel(MouseEventKind),
}

/// Window event payload
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WindowEventData {
    kind: WindowEventKind,
    size: Size,
}

impl WindowEventData {
    /// Create a window payload
    pub const fn new(kind: WindowEventKind, size: Size) -> Self {
        Self { kind, size }
    }

    /// Subkind of this payload
    pub const fn kind(&self) -> WindowEventKind {
        self.kind
    }

    /// Client size carried with the event
    pub const fn size(&self) -> Size {
        self.size
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum MouseData {
    Position(Point),
    WheelDelta(f32),
}

/// Mouse event payload
///
/// Exactly one of position and wheel delta is meaningful, chosen by whether the
/// subkind is [`MouseEventKind::Wheel`]. The accessor for the other one returns a
/// neutral value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseEventData {
    kind: MouseEventKind,
    button: MouseButton,
    data: MouseData,
}

impl MouseEventData {
    /// Create a positional mouse payload
    ///
    /// Fails for [`MouseEventKind::Wheel`], which carries a delta instead.
    pub fn new(
        kind: MouseEventKind,
        button: MouseButton,
        position: Point,
    ) -> Result<Self, EventDataError> {
        if kind == MouseEventKind::Wheel {
            return Err(EventDataError::WheelWithPosition);
        }
        Ok(Self {
            kind,
            button,
            data: MouseData::Position(position),
        })
    }

    /// Create a delta-carrying mouse payload
    ///
    /// Fails for every subkind except [`MouseEventKind::Wheel`].
    pub fn with_delta(kind: MouseEventKind, delta: f32) -> Result<Self, EventDataError> {
        if kind != MouseEventKind::Wheel {
            return Err(EventDataError::DeltaWithoutWheel(kind));
        }
        Ok(Self::wheel(delta))
    }

    /// Create a wheel payload
    pub fn wheel(delta: f32) -> Self {
        Self {
            kind: MouseEventKind::Wheel,
            button: MouseButton::None,
            data: MouseData::WheelDelta(delta),
        }
    }

    /// Subkind of this payload
    pub const fn kind(&self) -> MouseEventKind {
        self.kind
    }

    /// Button involved, [`MouseButton::None`] for moves, hovers and wheels
    pub const fn button(&self) -> MouseButton {
        self.button
    }

    /// Pointer position, `(0, 0)` for wheel events
    pub fn position(&self) -> Point {
        match self.data {
            MouseData::Position(position) => position,
            MouseData::WheelDelta(_) => Point::new(0, 0),
        }
    }

    /// Wheel delta, `0.0` for everything but wheel events
    pub fn wheel_delta(&self) -> f32 {
        match self.data {
            MouseData::WheelDelta(delta) => delta,
            MouseData::Position(_) => 0.0,
        }
    }
}

impl Default for MouseEventData {
    fn default() -> Self {
        Self {
            kind: MouseEventKind::None,
            button: MouseButton::None,
            data: MouseData::Position(Point::default()),
        }
    }
}

/// Key event payload
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyEventData {
    kind: KeyEventKind,
    code: KeyCode,
}

impl KeyEventData {
    /// Create a key payload
    pub const fn new(kind: KeyEventKind, code: KeyCode) -> Self {
        Self { kind, code }
    }

    /// Subkind of this payload
    pub const fn kind(&self) -> KeyEventKind {
        self.kind
    }

    /// Key involved
    pub const fn code(&self) -> KeyCode {
        self.code
    }
}

/// Tagged event payload
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum EventPayload {
    /// Nothing
    #[default]
    None,
    /// Window payload
    Window(WindowEventData),
    /// Mouse payload
    Mouse(MouseEventData),
    /// Key payload
    Key(KeyEventData),
}

/// A single occurrence addressed to a window
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Event {
    handle: WindowHandle,
    payload: EventPayload,
}

impl Event {
    /// Create a window event
    pub const fn window(handle: WindowHandle, data: WindowEventData) -> Self {
        Self {
            handle,
            payload: EventPayload::Window(data),
        }
    }

    /// Create a mouse event
    pub const fn mouse(handle: WindowHandle, data: MouseEventData) -> Self {
        Self {
            handle,
            payload: EventPayload::Mouse(data),
        }
    }

    /// Create a key event
    pub const fn key(handle: WindowHandle, data: KeyEventData) -> Self {
        Self {
            handle,
            payload: EventPayload::Key(data),
        }
    }

    /// Category of this event, derived from its payload
    pub const fn kind(&self) -> EventKind {
        match self.payload {
            EventPayload::None => EventKind::None,
            EventPayload::Window(_) => EventKind::Window,
            EventPayload::Mouse(_) => EventKind::Mouse,
            EventPayload::Key(_) => EventKind::Key,
        }
    }

    /// Whether this event carries nothing
    pub const fn is_none(&self) -> bool {
        matches!(self.payload, EventPayload::None)
    }

    /// Window the event is addressed to
    pub const fn handle(&self) -> WindowHandle {
        self.handle
    }

    /// Full payload
    pub const fn payload(&self) -> &EventPayload {
        &self.payload
    }

    /// Window payload, if this is a window event
    pub const fn window_data(&self) -> Option<&WindowEventData> {
        match &self.payload {
            EventPayload::Window(data) => Some(data),
            _ => None,
        }
    }

    /// Mouse payload, if this is a mouse event
    pub const fn mouse_data(&self) -> Option<&MouseEventData> {
        match &self.payload {
            EventPayload::Mouse(data) => Some(data),
            _ => None,
        }
    }

    /// Key payload, if this is a key event
    pub const fn key_data(&self) -> Option<&KeyEventData> {
        match &self.payload {
            EventPayload::Key(data) => Some(data),
            _ => None,
        }
    }
}
