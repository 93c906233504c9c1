#![no_std]
#![forbid(unsafe_code)]

//! # prioq Core
//!
//! Core types for the prioq event queue: priority levels, events, wait
//! budgets, and the fixed-capacity max-heap that backs every queue.
//! Everything here is `no_std` and allocation-free, so the same heap can be
//! used behind a blocking host queue or inside an interrupt-driven firmware.

#[cfg(feature = "std")]
extern crate std;

use core::fmt;

pub mod event;
pub mod heap;
pub mod priority;
pub mod shared;
pub mod time;

pub use event::*;
pub use heap::*;
pub use priority::*;
pub use shared::*;
pub use time::*;

/// Default capacity of a priority queue, in events.
pub const DEFAULT_CAPACITY: usize = 10;

/// Result type used throughout prioq
pub type PqResult<T> = Result<T, PqError>;

/// Error outcomes of queue operations
///
/// Only `Creation` is fatal, and only to the queue being built. The others
/// are ordinary outcomes the caller is expected to handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PqError {
    /// Queue state or one of its primitives could not be created
    Creation,
    /// The wait budget expired before the operation could complete
    Timeout,
    /// The queue is full; nothing was displaced
    CapacityExceeded,
    /// Availability was signaled but no event was stored
    QueueEmpty,
    /// Raw value does not name a priority level
    InvalidPriority,
}

impl fmt::Display for PqError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PqError::Creation => write!(f, "Queue creation failed"),
            PqError::Timeout => write!(f, "Operation timed out"),
            PqError::CapacityExceeded => write!(f, "Queue capacity exceeded"),
            PqError::QueueEmpty => write!(f, "Queue is empty"),
            PqError::InvalidPriority => write!(f, "Invalid priority level"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PqError {}

#[cfg(feature = "defmt")]
impl defmt::Format for PqError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            PqError::Creation => defmt::write!(fmt, "Creation"),
            PqError::Timeout => defmt::write!(fmt, "Timeout"),
            PqError::CapacityExceeded => defmt::write!(fmt, "CapacityExceeded"),
            PqError::QueueEmpty => defmt::write!(fmt, "QueueEmpty"),
            PqError::InvalidPriority => defmt::write!(fmt, "InvalidPriority"),
        }
    }
}
