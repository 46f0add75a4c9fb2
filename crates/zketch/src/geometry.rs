//! Minimal geometry value types consumed by the event model and windows
//!
//! Only the shapes the core actually reads from the host: a signed position,
//! an unsigned 16-bit size and a rectangle for window bounds.

use serde::{Deserialize, Serialize};

/// 2D integer position in client or screen coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate
    pub x: i32,
    /// Vertical coordinate
    pub y: i32,
}

impl Point {
    /// Create a new point
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// 2D unsigned dimensions as carried by resize notifications
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size {
    /// Width in pixels
    pub width: u16,
    /// Height in pixels
    pub height: u16,
}

impl Size {
    /// Create a new size
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

impl From<(u16, u16)> for Size {
    fn from((width, height): (u16, u16)) -> Self {
        Self::new(width, height)
    }
}

/// Axis-aligned rectangle with exclusive right/bottom edges
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge
    pub left: i32,
    /// Top edge
    pub top: i32,
    /// Right edge (exclusive)
    pub right: i32,
    /// Bottom edge (exclusive)
    pub bottom: i32,
}

impl Rect {
    /// Create a rectangle from its four edges
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self { left, top, right, bottom }
    }

    /// Create a rectangle from an origin and a size
    pub fn from_origin(origin: Point, size: Size) -> Self {
        Self::new(
            origin.x,
            origin.y,
            origin.x + i32::from(size.width),
            origin.y + i32::from(size.height),
        )
    }

    /// Top-left corner
    pub const fn origin(&self) -> Point {
        Point::new(self.left, self.top)
    }

    /// Width, zero for inverted rectangles
    pub fn width(&self) -> u32 {
        (self.right - self.left).max(0) as u32
    }

    /// Height, zero for inverted rectangles
    pub fn height(&self) -> u32 {
        (self.bottom - self.top).max(0) as u32
    }
}
