//! # prioq-led-ui - button to LED demo
//!
//! Two active objects joined by a priority queue:
//!
//! ```text
//! input --> [UI mailbox] --> UI object --> [LED priority queue] --> LED object --> pins
//! ```
//!
//! The UI object classifies raw button codes (`PULSE`, `SHORT`, `LONG`) into
//! LED requests of high, medium and low priority. The LED object always
//! serves the most urgent pending request, lighting red, green or blue.

#![forbid(unsafe_code)]

use prioq_active::Mailbox;
use prioq_core::DEFAULT_CAPACITY;
use prioq_queue::PriorityQueueHandle;

pub mod input;
pub mod led;
pub mod ui;

pub use input::{parse_press, parse_script, play_script, InputError};
pub use led::{LedBank, LedBehavior, LedColor, PinLog, SimPin, DEFAULT_LED_ON_PERIOD};
pub use ui::{ButtonEvent, UiBehavior};

/// Capacity of the UI object's mailbox.
pub const UI_MAILBOX_CAPACITY: usize = 5;

/// Raw button codes waiting for the UI object.
pub type UiMailbox = Mailbox<u8, UI_MAILBOX_CAPACITY>;

/// LED requests waiting for the LED object.
pub type LedQueue = PriorityQueueHandle<(), DEFAULT_CAPACITY>;
