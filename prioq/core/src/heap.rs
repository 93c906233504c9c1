//! Fixed-capacity max-heap of events
//!
//! The heap lives in a contiguous `heapless::Vec` of capacity `N`. Slot 0
//! always holds an event whose priority is not lower than any other stored
//! event. Children of slot `i` are `2i + 1` and `2i + 2`, its parent is
//! `(i - 1) / 2`.

use heapless::Vec;

use crate::Event;

/// Bounded binary max-heap of events
///
/// No memory is allocated per event. A push into a full heap is rejected and
/// the event handed back; stored events are never displaced. Events of equal
/// priority come out in no particular order.
#[derive(Debug, Clone)]
pub struct EventHeap<T, const N: usize> {
    events: Vec<Event<T>, N>,
}

impl<T, const N: usize> EventHeap<T, N> {
    /// Create a new empty heap
    pub const fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Insert an event, restoring heap order by sifting it up
    ///
    /// Returns the event back if the heap is full.
    pub fn push(&mut self, event: Event<T>) -> Result<(), Event<T>> {
        self.events.push(event)?;
        self.sift_up(self.events.len() - 1);
        Ok(())
    }

    /// Remove and return the highest-priority event
    pub fn pop(&mut self) -> Option<Event<T>> {
        if self.events.is_empty() {
            return None;
        }
        // The last event takes the root's slot and sinks from there.
        let root = self.events.swap_remove(0);
        self.sift_down(0);
        Some(root)
    }

    /// Peek at the highest-priority event
    pub fn peek(&self) -> Option<&Event<T>> {
        self.events.first()
    }

    /// Number of stored events
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Check if the heap is empty
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Check if the heap is full
    pub fn is_full(&self) -> bool {
        self.events.is_full()
    }

    /// Get the maximum capacity of the heap
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Drop every stored event
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Stored events in heap (array) order
    pub fn as_slice(&self) -> &[Event<T>] {
        &self.events
    }

    /// Walk every occupied slot and check that no child outranks its parent
    pub fn is_valid(&self) -> bool {
        (1..self.events.len()).all(|i| !self.events[i].outranks(&self.events[(i - 1) / 2]))
    }

    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if !self.events[index].outranks(&self.events[parent]) {
                break;
            }
            self.events.swap(index, parent);
            index = parent;
        }
    }

    fn sift_down(&mut self, mut index: usize) {
        let len = self.events.len();
        loop {
            let left = 2 * index + 1;
            let right = left + 1;
            let mut highest = index;

            if left < len && self.events[left].outranks(&self.events[highest]) {
                highest = left;
            }
            if right < len && self.events[right].outranks(&self.events[highest]) {
                highest = right;
            }
            if highest == index {
                break;
            }
            self.events.swap(index, highest);
            index = highest;
        }
    }
}

impl<T, const N: usize> Default for EventHeap<T, N> {
    fn default() -> Self {
        Self::new()
    }
}
