//! Task creation for active objects.
//!
//! Each active object runs on one dedicated OS thread. Host threads carry no
//! scheduling priority, so the priority here is nominal: it names the task's
//! rank in logs and lets firmware ports map it onto a real scheduler.

use std::io;
use std::thread::{self, JoinHandle};

use log::debug;

/// Nominal priority of a task. Higher runs first on a preemptive port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskPriority(pub u8);

impl TaskPriority {
    /// Priority just above the idle task.
    pub const IDLE_PLUS_ONE: TaskPriority = TaskPriority(1);
}

/// Configuration for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskConfig {
    /// Task name, also used as the thread name.
    pub name: String,
    /// Nominal task priority.
    pub priority: TaskPriority,
    /// Stack size in bytes; `None` keeps the platform default.
    pub stack_size: Option<usize>,
}

impl TaskConfig {
    /// Creates a task configuration with default priority and stack.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            priority: TaskPriority::IDLE_PLUS_ONE,
            stack_size: None,
        }
    }

    /// Sets the nominal priority.
    pub fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the stack size for the task.
    pub fn with_stack_size(mut self, size: usize) -> Self {
        self.stack_size = Some(size);
        self
    }

    /// Spawns `body` as a new task.
    pub fn spawn<F>(&self, body: F) -> io::Result<JoinHandle<()>>
    where
        F: FnOnce() + Send + 'static,
    {
        let mut builder = thread::Builder::new().name(self.name.clone());
        if let Some(size) = self.stack_size {
            builder = builder.stack_size(size);
        }
        debug!("task {}: spawning at priority {}", self.name, self.priority.0);
        builder.spawn(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_runs_under_its_name() {
        let config = TaskConfig::new("task_probe")
            .with_priority(TaskPriority(3))
            .with_stack_size(64 * 1024);
        assert_eq!(config.priority, TaskPriority(3));

        let handle = config
            .spawn(|| assert_eq!(thread::current().name(), Some("task_probe")))
            .expect("spawn");
        handle.join().expect("task panicked");
    }
}
