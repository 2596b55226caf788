//! Single-consumer FIFO event queue
//!
//! The dispatch loop owns the [`EventQueue`] and is the only component
//! that can drain it. Producers (strategies, the ledger, the execution
//! handler) receive an [`EventSink`], an enqueue-only handle, so no
//! handler can consume events meant for a later dispatch stage.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use super::Event;

/// Append-only producer handle to the event queue
#[derive(Clone)]
pub struct EventSink {
    inner: Rc<RefCell<VecDeque<Event>>>,
}

impl EventSink {
    /// Append an event to the back of the queue
    pub fn send(&self, event: Event) {
        self.inner.borrow_mut().push_back(event);
    }
}

/// The event queue, exclusively owned by the dispatch loop
pub struct EventQueue {
    inner: Rc<RefCell<VecDeque<Event>>>,
}

impl EventQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(VecDeque::new())),
        }
    }

    /// Hand out an enqueue-only handle
    pub fn sink(&self) -> EventSink {
        EventSink {
            inner: Rc::clone(&self.inner),
        }
    }

    /// Remove and return the front event, if any
    pub fn dequeue(&mut self) -> Option<Event> {
        self.inner.borrow_mut().pop_front()
    }

    /// Number of queued events
    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    /// Whether the queue is empty
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{Direction, EventKind, Order};

    #[test]
    fn test_queue_starts_empty() {
        let mut queue = EventQueue::new();
        assert!(queue.is_empty());
        assert_eq!(queue.len(), 0);
        assert!(queue.dequeue().is_none());
    }

    #[test]
    fn test_fifo_ordering() {
        let mut queue = EventQueue::new();
        let sink = queue.sink();

        sink.send(Event::Market);
        sink.send(Event::Order(Order::market("TQQQ", 100, Direction::Buy)));

        assert_eq!(queue.len(), 2);
        assert_eq!(queue.dequeue().unwrap().kind(), EventKind::Market);
        assert_eq!(queue.dequeue().unwrap().kind(), EventKind::Order);
        assert!(queue.dequeue().is_none());
    }

    #[test]
    fn test_events_produced_mid_drain_append_after_existing() {
        let mut queue = EventQueue::new();
        let sink = queue.sink();

        sink.send(Event::Market);
        sink.send(Event::Market);

        // Handling the first event produces a new one; it must land
        // behind the second, not be processed depth-first.
        let _first = queue.dequeue().unwrap();
        sink.send(Event::Order(Order::market("TQQQ", 100, Direction::Buy)));

        assert_eq!(queue.dequeue().unwrap().kind(), EventKind::Market);
        assert_eq!(queue.dequeue().unwrap().kind(), EventKind::Order);
    }

    #[test]
    fn test_cloned_sinks_share_one_queue() {
        let mut queue = EventQueue::new();
        let a = queue.sink();
        let b = a.clone();

        a.send(Event::Market);
        b.send(Event::Market);

        assert_eq!(queue.len(), 2);
    }
}
