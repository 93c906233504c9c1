//! Prioritized events transported by the queue

use core::fmt;
use crate::PriorityLevel;

/// Event carrying a priority and an optional payload
///
/// Events are immutable once built and are moved by value into and out of
/// a queue; nothing is shared by reference between sender and receiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Event<T = ()> {
    priority: PriorityLevel,
    payload: T,
}

impl Event<()> {
    /// Create an event that carries only a priority
    pub const fn new(priority: PriorityLevel) -> Self {
        Self { priority, payload: () }
    }
}

impl<T> Event<T> {
    /// Create an event with a payload
    pub const fn with_payload(priority: PriorityLevel, payload: T) -> Self {
        Self { priority, payload }
    }

    /// Get the event priority
    pub fn priority(&self) -> PriorityLevel {
        self.priority
    }

    /// Borrow the payload
    pub fn payload(&self) -> &T {
        &self.payload
    }

    /// Consume the event and return its payload
    pub fn into_payload(self) -> T {
        self.payload
    }

    /// True if this event must be served before `other`
    #[inline]
    pub fn outranks(&self, other: &Event<T>) -> bool {
        self.priority > other.priority
    }
}

impl<T> From<PriorityLevel> for Event<T>
where
    T: Default,
{
    fn from(priority: PriorityLevel) -> Self {
        Self::with_payload(priority, T::default())
    }
}

impl<T> fmt::Display for Event<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Event({})", self.priority)
    }
}

#[cfg(feature = "defmt")]
impl<T: defmt::Format> defmt::Format for Event<T> {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "Event({}, {})", self.priority, self.payload);
    }
}
