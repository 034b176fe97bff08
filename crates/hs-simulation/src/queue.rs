use std::collections::VecDeque;

use crate::event::Event;

/// Append-then-drain FIFO of events.
///
/// [`EventQueue::drain`] hands each event to a dispatch function together with
/// an outbox. Events pushed to the outbox are appended to the back of the
/// queue as soon as that dispatch returns, so cascades are processed
/// breadth-first within the same drain. The dispatch function never sees the
/// queue itself, which rules out a nested drain.
#[derive(Debug)]
pub struct EventQueue<E = Event> {
    buffer: VecDeque<E>,
}

impl<E> Default for EventQueue<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> EventQueue<E> {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self {
            buffer: VecDeque::new(),
        }
    }

    /// Append an event.
    pub fn enqueue(&mut self, event: E) {
        self.buffer.push_back(event);
    }

    /// Number of events waiting.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Return `true` if nothing is waiting.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Events waiting, in the order they will be dispatched.
    pub fn pending(&self) -> impl Iterator<Item = &E> {
        self.buffer.iter()
    }

    /// Dispatch every queued event in FIFO order, including events emitted
    /// during this drain. Returns the number of events dispatched.
    pub fn drain<F>(&mut self, mut dispatch: F) -> usize
    where
        F: FnMut(&E, &mut Vec<E>),
    {
        let mut outbox = Vec::new();
        let mut processed = 0;
        while let Some(event) = self.buffer.pop_front() {
            dispatch(&event, &mut outbox);
            self.buffer.extend(outbox.drain(..));
            processed += 1;
        }
        processed
    }
}
