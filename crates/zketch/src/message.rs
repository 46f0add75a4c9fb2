//! Native message records and their translation into events
//!
//! A [`NativeMessage`] is the one wire shape read from the host: a target handle,
//! a 32-bit message code and two machine-word parameters. [`translate`] turns a
//! record into at most one [`Event`]; anything outside the recognized set becomes
//! an empty event and is never an error.

use crate::event::{
    Event, KeyEventData, KeyEventKind, MouseButton, MouseEventData, MouseEventKind,
    WindowEventData, WindowEventKind,
};
use crate::geometry::{Point, Size};
use crate::keyboard::KeyCode;

/// Host message codes understood by the core
pub mod codes {
    /// Window is being destroyed
    pub const WM_DESTROY: u32 = 0x0002;
    /// Client area size changed
    pub const WM_SIZE: u32 = 0x0005;
    /// Close was requested
    pub const WM_CLOSE: u32 = 0x0010;
    /// Message loop should terminate
    pub const WM_QUIT: u32 = 0x0012;
    /// Key pressed
    pub const WM_KEYDOWN: u32 = 0x0100;
    /// Key released
    pub const WM_KEYUP: u32 = 0x0101;
    /// Pointer moved
    pub const WM_MOUSEMOVE: u32 = 0x0200;
    /// Left button pressed
    pub const WM_LBUTTONDOWN: u32 = 0x0201;
    /// Left button released
    pub const WM_LBUTTONUP: u32 = 0x0202;
    /// Left button double-clicked
    pub const WM_LBUTTONDBLCLK: u32 = 0x0203;
    /// Right button pressed
    pub const WM_RBUTTONDOWN: u32 = 0x0204;
    /// Right button released
    pub const WM_RBUTTONUP: u32 = 0x0205;
    /// Right button double-clicked
    pub const WM_RBUTTONDBLCLK: u32 = 0x0206;
    /// Middle button pressed
    pub const WM_MBUTTONDOWN: u32 = 0x0207;
    /// Middle button released
    pub const WM_MBUTTONUP: u32 = 0x0208;
    /// Middle button double-clicked
    pub const WM_MBUTTONDBLCLK: u32 = 0x0209;
    /// Vertical wheel rotated
    pub const WM_MOUSEWHEEL: u32 = 0x020A;
    /// Horizontal wheel rotated
    pub const WM_MOUSEHWHEEL: u32 = 0x020E;
    /// Pointer hovered
    pub const WM_MOUSEHOVER: u32 = 0x02A1;
}

/// Opaque identifier of one native window
///
/// The zero value is the null handle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowHandle(isize);

impl WindowHandle {
    /// The null handle
    pub const NULL: Self = Self(0);

    /// Wrap a raw native handle value
    pub const fn from_raw(raw: isize) -> Self {
        Self(raw)
    }

    /// Raw native handle value
    pub const fn raw(self) -> isize {
        self.0
    }

    /// Whether this is the null handle
    pub const fn is_null(self) -> bool {
        self.0 == 0
    }
}

/// One unit of the host message stream
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NativeMessage {
    /// Window the message is addressed to
    pub target: WindowHandle,
    /// Message code, see [`codes`]
    pub code: u32,
    /// First parameter word
    pub param_a: usize,
    /// Second parameter word
    pub param_b: isize,
}

impl NativeMessage {
    /// Create a message record
    pub const fn new(target: WindowHandle, code: u32, param_a: usize, param_b: isize) -> Self {
        Self {
            target,
            code,
            param_a,
            param_b,
        }
    }
}

/// Low 16 bits of a parameter word
pub const fn low_word(value: isize) -> u16 {
    (value & 0xFFFF) as u16
}

/// Bits 16..32 of a parameter word
pub const fn high_word(value: isize) -> u16 {
    ((value >> 16) & 0xFFFF) as u16
}

/// Pack two 16-bit words into a parameter word, low word first
pub const fn make_param(low: u16, high: u16) -> isize {
    ((high as u32) << 16 | low as u32) as isize
}

/// Signed position packed in the second parameter of pointer messages
pub const fn decode_position(param_b: isize) -> Point {
    Point::new(low_word(param_b) as i16 as i32, high_word(param_b) as i16 as i32)
}

/// Size packed in the second parameter of resize notifications
pub const fn decode_size(param_b: isize) -> Size {
    Size::new(low_word(param_b), high_word(param_b))
}

/// Signed wheel delta packed in the high word of the first parameter
pub const fn decode_wheel_delta(param_a: usize) -> i16 {
    high_word(param_a as isize) as i16
}

/// Translate one native message into an event
///
/// Returns an empty event (`kind == None`) for every message outside the
/// recognized set.
pub fn translate(msg: &NativeMessage) -> Event {
    use codes::*;

    let handle = msg.target;
    let pointer = |kind, button| {
        let data = MouseEventData::new(kind, button, decode_position(msg.param_b))
            .unwrap_or_default();
        Event::mouse(handle, data)
    };

    match msg.code {
        WM_SIZE => Event::window(
            handle,
            WindowEventData::new(WindowEventKind::Resize, decode_size(msg.param_b)),
        ),
        WM_CLOSE => Event::window(
            handle,
            WindowEventData::new(WindowEventKind::Close, decode_size(msg.param_b)),
        ),

        WM_LBUTTONDOWN => pointer(MouseEventKind::Down, MouseButton::Left),
        WM_RBUTTONDOWN => pointer(MouseEventKind::Down, MouseButton::Right),
        WM_MBUTTONDOWN => pointer(MouseEventKind::Down, MouseButton::Middle),
        WM_LBUTTONUP => pointer(MouseEventKind::Up, MouseButton::Left),
        WM_RBUTTONUP => pointer(MouseEventKind::Up, MouseButton::Right),
        WM_MBUTTONUP => pointer(MouseEventKind::Up, MouseButton::Middle),
        WM_LBUTTONDBLCLK => pointer(MouseEventKind::DoubleClick, MouseButton::Left),
        WM_RBUTTONDBLCLK => pointer(MouseEventKind::DoubleClick, MouseButton::Right),
        WM_MBUTTONDBLCLK => pointer(MouseEventKind::DoubleClick, MouseButton::Middle),
        WM_MOUSEMOVE => pointer(MouseEventKind::Move, MouseButton::None),
        WM_MOUSEHOVER => pointer(MouseEventKind::Hover, MouseButton::None),

        WM_MOUSEWHEEL | WM_MOUSEHWHEEL => Event::mouse(
            handle,
            MouseEventData::wheel(f32::from(decode_wheel_delta(msg.param_a))),
        ),

        WM_KEYDOWN => Event::key(
            handle,
            KeyEventData::new(KeyEventKind::Down, KeyCode::from_virtual_key(msg.param_a as u16)),
        ),
        WM_KEYUP => Event::key(
            handle,
            KeyEventData::new(KeyEventKind::Up, KeyCode::from_virtual_key(msg.param_a as u16)),
        ),

        _ => Event::default(),
    }
}
