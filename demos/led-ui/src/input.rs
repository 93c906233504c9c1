//! Scripted button input.
//!
//! Stands in for the button driver: each token becomes one raw code posted
//! to the UI mailbox, as the driver would post it from its debounce task.

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use log::{info, warn};
use thiserror::Error;

use crate::ui::ButtonEvent;
use crate::UiMailbox;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("unknown press '{0}' (expected pulse, short, long or a raw code)")]
    UnknownPress(String),
}

/// Parses one press token: `pulse`, `short`, `long`, or a raw numeric code.
///
/// Raw codes are passed through unchecked so a script can exercise the UI
/// object's handling of codes it does not recognize.
pub fn parse_press(token: &str) -> Result<u8, InputError> {
    let token = token.trim();
    match token.to_ascii_lowercase().as_str() {
        "pulse" => Ok(ButtonEvent::Pulse.code()),
        "short" => Ok(ButtonEvent::Short.code()),
        "long" => Ok(ButtonEvent::Long.code()),
        other => other
            .parse::<u8>()
            .map_err(|_| InputError::UnknownPress(token.to_string())),
    }
}

/// Parses a sequence of press tokens.
pub fn parse_script<'a>(tokens: impl IntoIterator<Item = &'a str>) -> Result<Vec<u8>, InputError> {
    tokens.into_iter().map(parse_press).collect()
}

/// Posts `codes` to the UI mailbox, one every `interval`, until done or
/// `running` drops. Returns how many codes the mailbox accepted.
pub fn play_script(codes: &[u8], mailbox: &UiMailbox, interval: Duration, running: &AtomicBool) -> usize {
    let mut posted = 0;
    for &code in codes {
        if !running.load(Ordering::Acquire) {
            break;
        }
        match mailbox.send(code) {
            Ok(()) => posted += 1,
            Err(err) => warn!("input: press code {} lost: {}", code, err),
        }
        thread::sleep(interval);
    }
    info!("input: {} of {} presses posted", posted, codes.len());
    posted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_map_to_button_codes() {
        assert_eq!(parse_script(["pulse", " Short", "LONG", "9"]), Ok(vec![0, 1, 2, 9]));
        assert_eq!(
            parse_press("tap"),
            Err(InputError::UnknownPress("tap".to_string()))
        );
    }

    #[test]
    fn presses_beyond_mailbox_capacity_are_lost() {
        let mailbox = UiMailbox::new().expect("mailbox");
        let running = AtomicBool::new(true);

        let posted = play_script(&[0; 7], &mailbox, Duration::ZERO, &running);
        assert_eq!(posted, mailbox.capacity());
        assert_eq!(mailbox.len(), mailbox.capacity());
    }
}
