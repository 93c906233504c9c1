//! UI active object: classifies button presses into LED priorities.

use core::fmt;

use log::{debug, info, warn};
use prioq_active::{ActiveBehavior, ActiveContext, Reaction};
use prioq_core::{Event, PriorityLevel, Timeout};

use crate::LedQueue;

/// Kind of button press reported by the input driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ButtonEvent {
    Pulse = 0,
    Short = 1,
    Long = 2,
}

impl ButtonEvent {
    /// Raw code as posted to the UI mailbox.
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Priority of the LED request this press produces.
    pub const fn priority(self) -> PriorityLevel {
        match self {
            ButtonEvent::Pulse => PriorityLevel::High,
            ButtonEvent::Short => PriorityLevel::Medium,
            ButtonEvent::Long => PriorityLevel::Low,
        }
    }
}

impl TryFrom<u8> for ButtonEvent {
    type Error = u8;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(ButtonEvent::Pulse),
            1 => Ok(ButtonEvent::Short),
            2 => Ok(ButtonEvent::Long),
            other => Err(other),
        }
    }
}

impl fmt::Display for ButtonEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ButtonEvent::Pulse => write!(f, "PULSE"),
            ButtonEvent::Short => write!(f, "SHORT"),
            ButtonEvent::Long => write!(f, "LONG"),
        }
    }
}

/// Reactions of the UI object.
///
/// Each recognized press becomes one payload-less LED event. A rejected
/// send is logged and the press is lost; the UI never stalls on the LED
/// side unless it was built with a waiting send timeout.
pub struct UiBehavior {
    led_queue: LedQueue,
    send_timeout: Timeout,
    forwarded: usize,
    dropped: usize,
}

impl UiBehavior {
    /// UI object that drops presses the LED queue cannot take at once.
    pub fn new(led_queue: LedQueue) -> Self {
        Self::with_send_timeout(led_queue, Timeout::NoWait)
    }

    pub fn with_send_timeout(led_queue: LedQueue, send_timeout: Timeout) -> Self {
        Self {
            led_queue,
            send_timeout,
            forwarded: 0,
            dropped: 0,
        }
    }

    pub fn forwarded(&self) -> usize {
        self.forwarded
    }

    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Forwards one classified press to the LED queue.
    pub fn forward(&mut self, press: ButtonEvent) {
        let priority = press.priority();
        match self.led_queue.send(Event::new(priority), self.send_timeout) {
            Ok(()) => {
                self.forwarded += 1;
                info!("ui: {} -> {} request queued", press, priority);
            }
            Err(err) => {
                self.dropped += 1;
                warn!("ui: {} -> {} request dropped: {}", press, priority, err);
            }
        }
    }
}

impl ActiveBehavior for UiBehavior {
    type Message = u8;

    fn on_message(&mut self, _ctx: &mut ActiveContext, code: u8) -> Reaction {
        match ButtonEvent::try_from(code) {
            Ok(press) => {
                self.forward(press);
                Reaction::Handled
            }
            Err(code) => {
                debug!("ui: unknown button code {}", code);
                Reaction::Unhandled
            }
        }
    }

    fn on_stop(&mut self, ctx: &mut ActiveContext) {
        info!(
            "{}: {} requests forwarded, {} dropped",
            ctx.name(),
            self.forwarded,
            self.dropped
        );
    }
}
