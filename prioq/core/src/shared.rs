//! Interrupt-safe, non-blocking priority queue for bare-metal targets

use core::cell::RefCell;
use critical_section::Mutex;

use crate::{Event, EventHeap, PqError, PqResult};

/// Event heap shared between interrupt handlers and a cooperative loop
///
/// Every access runs inside a critical section, so a `static` instance can be
/// posted to from an ISR and drained from the main loop. Nothing blocks:
/// a full heap rejects the send and an empty heap yields `None`.
pub struct SharedHeap<T, const N: usize> {
    heap: Mutex<RefCell<EventHeap<T, N>>>,
}

impl<T, const N: usize> SharedHeap<T, N> {
    /// Create a new empty shared heap
    pub const fn new() -> Self {
        Self {
            heap: Mutex::new(RefCell::new(EventHeap::new())),
        }
    }

    /// Post an event without blocking
    pub fn try_send(&self, event: Event<T>) -> PqResult<()> {
        critical_section::with(|cs| {
            self.heap
                .borrow_ref_mut(cs)
                .push(event)
                .map_err(|_| PqError::CapacityExceeded)
        })
    }

    /// Take the highest-priority event, if any
    pub fn try_receive(&self) -> Option<Event<T>> {
        critical_section::with(|cs| self.heap.borrow_ref_mut(cs).pop())
    }

    /// Number of pending events
    pub fn len(&self) -> usize {
        critical_section::with(|cs| self.heap.borrow_ref(cs).len())
    }

    /// Check if no event is pending
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get the maximum capacity
    pub const fn capacity(&self) -> usize {
        N
    }
}

impl<T, const N: usize> Default for SharedHeap<T, N> {
    fn default() -> Self {
        Self::new()
    }
}
