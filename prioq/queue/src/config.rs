//! Queue configuration.

use core::fmt;

/// What `send` does when every slot is taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SendPolicy {
    /// Fail at once with `CapacityExceeded`; the caller decides whether to
    /// drop, retry or escalate.
    #[default]
    Reject,
    /// Wait, within the send timeout, until a receiver frees a slot.
    Block,
}

impl fmt::Display for SendPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SendPolicy::Reject => write!(f, "reject"),
            SendPolicy::Block => write!(f, "block"),
        }
    }
}

/// Configuration for a priority queue.
///
/// Capacity is a const parameter of the queue type; this carries the
/// runtime options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueConfig {
    pub name: &'static str,
    pub send_policy: SendPolicy,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            name: "pq",
            send_policy: SendPolicy::Reject,
        }
    }
}

impl QueueConfig {
    /// Creates a new queue configuration builder.
    pub fn builder() -> QueueConfigBuilder {
        QueueConfigBuilder::default()
    }
}

/// Builder for ergonomic queue configuration construction.
#[derive(Debug, Clone, Default)]
pub struct QueueConfigBuilder {
    config: QueueConfig,
}

impl QueueConfigBuilder {
    /// Sets the name used in log records.
    pub fn name(mut self, name: &'static str) -> Self {
        self.config.name = name;
        self
    }

    /// Sets the full-queue behavior of `send`.
    pub fn send_policy(mut self, policy: SendPolicy) -> Self {
        self.config.send_policy = policy;
        self
    }

    /// Builds the queue configuration.
    pub fn build(self) -> QueueConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queue_config_builder() {
        let config = QueueConfig::builder()
            .name("led")
            .send_policy(SendPolicy::Block)
            .build();

        assert_eq!(config.name, "led");
        assert_eq!(config.send_policy, SendPolicy::Block);
    }

    #[test]
    fn queue_config_default_rejects() {
        assert_eq!(QueueConfig::default().send_policy, SendPolicy::Reject);
    }
}
