//! # prioq-active - Active objects
//!
//! An active object couples one task, one inbox and one behavior. The task
//! blocks on the inbox and runs each message to completion before taking the
//! next one. Two inbox kinds are provided:
//!
//! - [`Mailbox`] - bounded FIFO, producers never block
//! - [`PriorityQueueHandle`](prioq_queue::PriorityQueueHandle) - highest
//!   priority first
//!
//! ## Module Overview
//!
//! - [`active`] - behavior trait, run loop and handle
//! - [`inbox`] - the blocking receive seam shared by both inbox kinds
//! - [`mailbox`] - FIFO mailbox
//! - [`task`] - named task creation

#![forbid(unsafe_code)]

use std::io;

use prioq_core::PqError;
use thiserror::Error;

pub mod active;
pub mod inbox;
pub mod mailbox;
pub mod task;

pub use active::{
    ActiveBehavior, ActiveConfig, ActiveContext, ActiveHandle, ActiveObject, ActiveState, Reaction,
    MAX_IDLE_WAIT,
};
pub use inbox::Inbox;
pub use mailbox::Mailbox;
pub use task::{TaskConfig, TaskPriority};

/// Errors raised while starting or stopping an active object.
#[derive(Debug, Error)]
pub enum ActiveError {
    #[error("failed to spawn task: {0}")]
    Spawn(#[from] io::Error),
    #[error("queue error: {0}")]
    Queue(#[from] PqError),
    #[error("active object {0} panicked")]
    Panicked(String),
}
