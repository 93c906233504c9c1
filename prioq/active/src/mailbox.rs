//! FIFO mailbox feeding an active object.

use std::sync::Arc;

use heapless::Deque;
use log::trace;
use parking_lot::Mutex;
use prioq_core::{PqError, PqResult, Timeout};
use prioq_queue::Semaphore;

/// Bounded FIFO of raw messages for one active object.
///
/// Producers never wait: a full mailbox rejects the message with
/// [`PqError::CapacityExceeded`]. The owning object blocks on receive until
/// a message arrives or its timeout expires. Cloning shares the mailbox.
pub struct Mailbox<M, const N: usize> {
    inner: Arc<MailboxInner<M, N>>,
}

struct MailboxInner<M, const N: usize> {
    messages: Mutex<Deque<M, N>>,
    available: Semaphore,
}

impl<M, const N: usize> Mailbox<M, N> {
    /// Creates an empty mailbox.
    ///
    /// Fails with [`PqError::Creation`] if the availability semaphore cannot
    /// be built.
    pub fn new() -> PqResult<Self> {
        Ok(Self {
            inner: Arc::new(MailboxInner {
                messages: Mutex::new(Deque::new()),
                available: Semaphore::new(0, N)?,
            }),
        })
    }

    /// Posts a message to the back of the mailbox without blocking.
    pub fn send(&self, message: M) -> PqResult<()> {
        let mut messages = self.inner.messages.lock();
        messages
            .push_back(message)
            .map_err(|_| PqError::CapacityExceeded)?;
        let released = self.inner.available.release();
        debug_assert!(released.is_ok(), "availability count above pending messages");
        trace!("mailbox: posted, {} pending", messages.len());
        Ok(())
    }

    /// Takes the oldest message, waiting at most `timeout` for one.
    pub fn receive(&self, timeout: impl Into<Timeout>) -> PqResult<M> {
        self.inner.available.acquire(timeout.into())?;
        self.inner
            .messages
            .lock()
            .pop_front()
            .ok_or(PqError::QueueEmpty)
    }

    /// Get the number of pending messages.
    pub fn len(&self) -> usize {
        self.inner.messages.lock().len()
    }

    /// Check if the mailbox is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get the maximum capacity of the mailbox.
    pub const fn capacity(&self) -> usize {
        N
    }
}

impl<M, const N: usize> Clone for Mailbox<M, N> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}
