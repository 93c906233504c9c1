#![forbid(unsafe_code)]

//! # prioq Queue
//!
//! Blocking, bounded priority queue for tasks under a preemptive scheduler.
//!
//! ## Module Overview
//! - [`queue`]  – The shared max-heap queue and its handle.
//! - [`sync`]   – Counting semaphore and deadline helpers.
//! - [`config`] – Runtime queue options.
//!
//! ```
//! use prioq_queue::{Event, PriorityLevel, PriorityQueue, PriorityQueueHandle, Timeout};
//!
//! let queue: PriorityQueueHandle = PriorityQueue::create().unwrap();
//! queue.send(Event::new(PriorityLevel::Low), Timeout::NoWait).unwrap();
//! queue.send(Event::new(PriorityLevel::High), Timeout::NoWait).unwrap();
//! assert_eq!(queue.receive(Timeout::Forever).unwrap().priority(), PriorityLevel::High);
//! ```

pub mod config;
pub mod queue;
pub mod sync;

pub use config::{QueueConfig, QueueConfigBuilder, SendPolicy};
pub use prioq_core::*;
pub use queue::{PriorityQueue, PriorityQueueHandle};
pub use sync::{Deadline, Semaphore};
