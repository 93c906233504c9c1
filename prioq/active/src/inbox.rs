//! Blocking message sources an active object can be driven from.

use prioq_core::{Event, PqResult, Timeout};
use prioq_queue::PriorityQueueHandle;

use crate::mailbox::Mailbox;

/// Blocking source of inbound messages, owned by one active object.
pub trait Inbox: Send + 'static {
    type Message: Send + 'static;

    /// Takes the next message, waiting at most `timeout`.
    fn receive(&self, timeout: Timeout) -> PqResult<Self::Message>;
}

impl<M: Send + 'static, const N: usize> Inbox for Mailbox<M, N> {
    type Message = M;

    fn receive(&self, timeout: Timeout) -> PqResult<M> {
        Mailbox::receive(self, timeout)
    }
}

/// An object fed by a priority queue always serves its highest-priority
/// pending event next.
impl<T: Send + 'static, const N: usize> Inbox for PriorityQueueHandle<T, N> {
    type Message = Event<T>;

    fn receive(&self, timeout: Timeout) -> PqResult<Event<T>> {
        (**self).receive(timeout)
    }
}
