//! Pending event buffer
//!
//! Insertion order is arrival order. Both the message translator and the
//! dispatch callback push into the same queue, so consumers observe a single
//! timeline.

use crate::event::Event;
use std::collections::VecDeque;

/// Unbounded FIFO of pending events
#[derive(Debug, Default, Clone)]
pub struct EventQueue {
    events: VecDeque<Event>,
}

impl EventQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event
    pub fn push(&mut self, event: Event) {
        self.events.push_back(event);
    }

    /// Remove and return the earliest event
    pub fn pop(&mut self) -> Option<Event> {
        self.events.pop_front()
    }

    /// Earliest event without removing it
    pub fn peek(&self) -> Option<Event> {
        self.events.front().copied()
    }

    /// Drop every pending event
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Number of pending events
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether nothing is pending
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{KeyEventData, KeyEventKind};
    use crate::keyboard::KeyCode;
    use crate::message::WindowHandle;

    fn key(code: KeyCode) -> Event {
        Event::key(WindowHandle::from_raw(1), KeyEventData::new(KeyEventKind::Down, code))
    }

    #[test]
    fn test_fifo_order() {
        let mut queue = EventQueue::new();
        let (e1, e2, e3) = (key(KeyCode::A), key(KeyCode::B), key(KeyCode::C));
        queue.push(e1);
        queue.push(e2);
        queue.push(e3);

        assert_eq!(queue.pop(), Some(e1));
        assert_eq!(queue.pop(), Some(e2));
        assert_eq!(queue.pop(), Some(e3));
        assert_eq!(queue.pop(), None);
    }

    #[test]
    fn test_peek_does_not_remove() {
        let mut queue = EventQueue::new();
        assert_eq!(queue.peek(), None);

        queue.push(key(KeyCode::Q));
        assert_eq!(queue.peek(), Some(key(KeyCode::Q)));
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.pop(), Some(key(KeyCode::Q)));
    }

    #[test]
    fn test_clear() {
        let mut queue = EventQueue::new();
        queue.push(key(KeyCode::A));
        queue.push(key(KeyCode::B));
        queue.clear();

        assert!(queue.is_empty());
        assert_eq!(queue.pop(), None);
    }
}
