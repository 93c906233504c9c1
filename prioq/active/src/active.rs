//! Active object run loop.
//!
//! An active object is one task that owns an inbox and a behavior. It sits
//! Idle, blocked on the inbox, until a message arrives, runs the behavior's
//! reaction to completion (Dispatching), then goes back to Idle. Reactions
//! should be bounded in time; a reaction that blocks forever starves the
//! object's own inbox.

use core::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use log::{info, trace, warn};
use prioq_core::{PqError, Timeout};

use crate::inbox::Inbox;
use crate::mailbox::Mailbox;
use crate::task::{TaskConfig, TaskPriority};
use crate::ActiveError;

/// Run-loop state of an active object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveState {
    /// Blocked on the inbox
    Idle,
    /// Running the reaction to one message
    Dispatching,
}

impl fmt::Display for ActiveState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActiveState::Idle => write!(f, "Idle"),
            ActiveState::Dispatching => write!(f, "Dispatching"),
        }
    }
}

/// Outcome of one reaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reaction {
    /// The message was acted on.
    Handled,
    /// The message was not recognized; it is logged and dropped.
    Unhandled,
}

/// Longest single wait on the inbox. A stop request is observed within
/// this long even when the object is configured to idle forever.
pub const MAX_IDLE_WAIT: Duration = Duration::from_millis(100);

/// Per-object context passed to behavior callbacks.
#[derive(Debug)]
pub struct ActiveContext {
    name: String,
    state: ActiveState,
    dispatched: u64,
}

impl ActiveContext {
    /// Creates the context of an idle object named `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            state: ActiveState::Idle,
            dispatched: 0,
        }
    }

    /// Object name, also the task name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current run-loop state.
    pub fn state(&self) -> ActiveState {
        self.state
    }

    /// Messages dispatched before the current one.
    pub fn dispatched(&self) -> u64 {
        self.dispatched
    }
}

/// Reactions of an active object to its inbound messages.
pub trait ActiveBehavior: Send + 'static {
    type Message: Send + 'static;

    fn on_start(&mut self, _ctx: &mut ActiveContext) {}

    fn on_message(&mut self, ctx: &mut ActiveContext, message: Self::Message) -> Reaction;

    fn on_stop(&mut self, _ctx: &mut ActiveContext) {}
}

/// Configuration for an active object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveConfig {
    pub task: TaskConfig,
    /// How long one Idle wait lasts before the loop re-arms, capped at
    /// [`MAX_IDLE_WAIT`].
    pub idle_timeout: Timeout,
}

impl ActiveConfig {
    /// Creates a configuration that idles until a message or a stop request.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            task: TaskConfig::new(name),
            idle_timeout: Timeout::Forever,
        }
    }

    /// Sets the nominal task priority.
    pub fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.task = self.task.with_priority(priority);
        self
    }

    /// Sets the task stack size in bytes.
    pub fn with_stack_size(mut self, size: usize) -> Self {
        self.task = self.task.with_stack_size(size);
        self
    }

    /// Sets the length of one Idle wait.
    pub fn with_idle_timeout(mut self, timeout: impl Into<Timeout>) -> Self {
        self.idle_timeout = timeout.into();
        self
    }
}

/// Entry point for starting active objects.
pub struct ActiveObject;

impl ActiveObject {
    /// Starts `behavior` on its own task, fed from `inbox`.
    pub fn spawn<I, B>(config: ActiveConfig, inbox: I, mut behavior: B) -> Result<ActiveHandle, ActiveError>
    where
        I: Inbox,
        B: ActiveBehavior<Message = I::Message>,
    {
        let running = Arc::new(AtomicBool::new(true));
        let dispatched = Arc::new(AtomicU64::new(0));
        let name = config.task.name.clone();
        let idle_timeout = config.idle_timeout;

        let thread = {
            let running = Arc::clone(&running);
            let dispatched = Arc::clone(&dispatched);
            let mut ctx = ActiveContext::new(name.clone());
            config.task.spawn(move || {
                run_loop(&mut ctx, &inbox, &mut behavior, &running, &dispatched, idle_timeout)
            })?
        };

        Ok(ActiveHandle {
            name,
            running,
            dispatched,
            thread: Some(thread),
        })
    }

    /// Creates a fresh mailbox and starts `behavior` on it.
    ///
    /// Returns the handle together with a sender-side clone of the mailbox.
    pub fn spawn_with_mailbox<B, const N: usize>(
        config: ActiveConfig,
        behavior: B,
    ) -> Result<(ActiveHandle, Mailbox<B::Message, N>), ActiveError>
    where
        B: ActiveBehavior,
    {
        let mailbox = Mailbox::new()?;
        let handle = Self::spawn(config, mailbox.clone(), behavior)?;
        Ok((handle, mailbox))
    }
}

fn bounded_wait(timeout: Timeout) -> Timeout {
    match timeout {
        Timeout::Forever => Timeout::After(MAX_IDLE_WAIT),
        Timeout::After(wait) if wait > MAX_IDLE_WAIT => Timeout::After(MAX_IDLE_WAIT),
        other => other,
    }
}

fn run_loop<I, B>(
    ctx: &mut ActiveContext,
    inbox: &I,
    behavior: &mut B,
    running: &AtomicBool,
    dispatched: &AtomicU64,
    idle_timeout: Timeout,
) where
    I: Inbox,
    B: ActiveBehavior<Message = I::Message>,
{
    info!("{}: started", ctx.name);
    behavior.on_start(ctx);
    let wait = bounded_wait(idle_timeout);

    while running.load(Ordering::Acquire) {
        trace!("{}: waiting event", ctx.name);
        match inbox.receive(wait) {
            Ok(message) => {
                ctx.state = ActiveState::Dispatching;
                if behavior.on_message(ctx, message) == Reaction::Unhandled {
                    warn!("{}: unrecognized message dropped", ctx.name);
                }
                ctx.dispatched += 1;
                dispatched.store(ctx.dispatched, Ordering::Release);
                ctx.state = ActiveState::Idle;
            }
            Err(PqError::Timeout) => {}
            Err(err) => warn!("{}: inbox error: {}", ctx.name, err),
        }
    }

    behavior.on_stop(ctx);
    info!("{}: stopped after {} messages", ctx.name, ctx.dispatched);
}

/// Handle to a running active object.
pub struct ActiveHandle {
    name: String,
    running: Arc<AtomicBool>,
    dispatched: Arc<AtomicU64>,
    thread: Option<JoinHandle<()>>,
}

impl ActiveHandle {
    /// Name the object was started under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of messages dispatched so far.
    pub fn dispatched(&self) -> u64 {
        self.dispatched.load(Ordering::Acquire)
    }

    /// True until a stop has been requested.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Requests the run loop to exit after its current wait or reaction.
    pub fn stop(&self) {
        self.running.store(false, Ordering::Release);
    }

    /// Stops the object and waits for its task to finish.
    ///
    /// An idle object notices the stop within [`MAX_IDLE_WAIT`]; a busy one
    /// after its current reaction.
    pub fn join(mut self) -> Result<(), ActiveError> {
        self.stop();
        match self.thread.take() {
            Some(thread) => thread
                .join()
                .map_err(|_| ActiveError::Panicked(self.name.clone())),
            None => Ok(()),
        }
    }
}

/// Dropping a handle requests a stop but does not wait for the task.
impl Drop for ActiveHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

impl fmt::Debug for ActiveHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActiveHandle")
            .field("name", &self.name)
            .field("running", &self.is_running())
            .field("dispatched", &self.dispatched())
            .finish()
    }
}
