//! Bounded priority queue shared between tasks.

use core::fmt;
use core::ops::Deref;
use std::sync::Arc;

use log::{debug, trace};
use parking_lot::Mutex;
use prioq_core::{Event, EventHeap, PqError, PqResult, Timeout, DEFAULT_CAPACITY};

use crate::config::{QueueConfig, SendPolicy};
use crate::sync::{lock_until, Deadline, Semaphore};

/// Fixed-capacity max-heap of events, safe to share between tasks.
///
/// Two primitives protect it: a mutex around the heap and a counting
/// semaphore whose count equals the number of stored events. Receivers block
/// on the semaphore until an event exists, then take the mutex briefly to
/// extract the root. With [`SendPolicy::Block`] a second semaphore counts
/// free slots so senders can wait for room.
///
/// Events of equal priority are not delivered in FIFO order.
pub struct PriorityQueue<T = (), const N: usize = DEFAULT_CAPACITY> {
    heap: Mutex<EventHeap<T, N>>,
    available: Semaphore,
    free_slots: Option<Semaphore>,
    config: QueueConfig,
}

impl<T, const N: usize> PriorityQueue<T, N> {
    /// Creates an empty queue with the default configuration.
    pub fn create() -> PqResult<PriorityQueueHandle<T, N>> {
        Self::create_with(QueueConfig::default())
    }

    /// Creates an empty queue.
    ///
    /// Fails with [`PqError::Creation`] if a primitive cannot be built,
    /// which includes a zero capacity. Nothing is returned on that path.
    pub fn create_with(config: QueueConfig) -> PqResult<PriorityQueueHandle<T, N>> {
        let available = Semaphore::new(0, N)?;
        let free_slots = match config.send_policy {
            SendPolicy::Reject => None,
            SendPolicy::Block => Some(Semaphore::new(N, N)?),
        };

        debug!(
            "{}: created, capacity {} send policy {}",
            config.name, N, config.send_policy
        );

        Ok(PriorityQueueHandle {
            queue: Arc::new(Self {
                heap: Mutex::new(EventHeap::new()),
                available,
                free_slots,
                config,
            }),
        })
    }

    /// Inserts `event`, waiting at most `timeout` for the queue.
    ///
    /// Fails with [`PqError::Timeout`] if the lock (or, when blocking, a free
    /// slot) could not be had in time, and with [`PqError::CapacityExceeded`]
    /// if the queue is full. Stored events are never displaced.
    pub fn send(&self, event: Event<T>, timeout: impl Into<Timeout>) -> PqResult<()> {
        let deadline = Deadline::after(timeout.into());
        let priority = event.priority();

        if let Some(free_slots) = &self.free_slots {
            free_slots.acquire_until(deadline)?;
        }

        let mut heap = match lock_until(&self.heap, deadline) {
            Ok(heap) => heap,
            Err(err) => {
                self.return_free_slot();
                return Err(err);
            }
        };

        if heap.push(event).is_err() {
            drop(heap);
            self.return_free_slot();
            trace!("{}: full, rejected {} event", self.config.name, priority);
            return Err(PqError::CapacityExceeded);
        }
        // The count never exceeds the stored events, which never exceed N.
        let released = self.available.release();
        debug_assert!(released.is_ok(), "availability count above stored events");
        trace!("{}: sent {} event, {} pending", self.config.name, priority, heap.len());
        Ok(())
    }

    /// Removes the highest-priority event, waiting at most `timeout` for one.
    pub fn receive(&self, timeout: impl Into<Timeout>) -> PqResult<Event<T>> {
        self.available.acquire(timeout.into())?;

        // Availability is already confirmed, so this wait is short.
        let mut heap = self.heap.lock();
        let event = heap.pop().ok_or(PqError::QueueEmpty)?;
        self.return_free_slot();
        trace!(
            "{}: received {} event, {} pending",
            self.config.name,
            event.priority(),
            heap.len()
        );
        Ok(event)
    }

    /// Sends without blocking.
    pub fn try_send(&self, event: Event<T>) -> PqResult<()> {
        self.send(event, Timeout::NoWait)
    }

    /// Receives without blocking.
    pub fn try_receive(&self) -> PqResult<Event<T>> {
        self.receive(Timeout::NoWait)
    }

    /// Number of stored events.
    pub fn len(&self) -> usize {
        self.heap.lock().len()
    }

    /// Check if the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.heap.lock().is_empty()
    }

    /// Check if the queue is full.
    pub fn is_full(&self) -> bool {
        self.heap.lock().is_full()
    }

    /// Get the maximum capacity of the queue.
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Current count of the availability semaphore.
    pub fn available(&self) -> usize {
        self.available.count()
    }

    /// Check the heap-order invariant over every stored event.
    pub fn is_heap_valid(&self) -> bool {
        self.heap.lock().is_valid()
    }

    /// Configuration the queue was created with.
    pub fn config(&self) -> &QueueConfig {
        &self.config
    }

    fn return_free_slot(&self) {
        if let Some(free_slots) = &self.free_slots {
            // Permits never exceed N minus the stored events, so this holds.
            let _ = free_slots.release();
        }
    }
}

impl<T, const N: usize> fmt::Debug for PriorityQueue<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PriorityQueue")
            .field("name", &self.config.name)
            .field("len", &self.len())
            .field("capacity", &N)
            .field("send_policy", &self.config.send_policy)
            .finish()
    }
}

/// Shared handle to a [`PriorityQueue`].
///
/// Created once at startup and cloned into every task that sends to or
/// receives from the queue. The queue lives until the last handle drops.
pub struct PriorityQueueHandle<T = (), const N: usize = DEFAULT_CAPACITY> {
    queue: Arc<PriorityQueue<T, N>>,
}

impl<T, const N: usize> Clone for PriorityQueueHandle<T, N> {
    fn clone(&self) -> Self {
        Self {
            queue: Arc::clone(&self.queue),
        }
    }
}

impl<T, const N: usize> Deref for PriorityQueueHandle<T, N> {
    type Target = PriorityQueue<T, N>;

    fn deref(&self) -> &Self::Target {
        &self.queue
    }
}

impl<T, const N: usize> fmt::Debug for PriorityQueueHandle<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.queue, f)
    }
}
