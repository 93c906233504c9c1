//! UI and LED objects wired together through the priority queue.

use std::sync::atomic::AtomicBool;
use std::thread;
use std::time::{Duration, Instant};

use prioq_active::{ActiveConfig, ActiveObject};
use prioq_core::{Event, PriorityLevel};
use prioq_led_ui::{
    play_script, ButtonEvent, LedBehavior, LedColor, LedQueue, PinLog, SimPin, UiBehavior,
    UiMailbox,
};
use prioq_queue::PriorityQueue;

const IDLE_POLL: Duration = Duration::from_millis(10);
const WAIT: Duration = Duration::from_secs(5);

fn wait_until(mut done: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + WAIT;
    while !done() {
        if Instant::now() > deadline {
            return false;
        }
        thread::sleep(Duration::from_millis(2));
    }
    true
}

/// Colors switched on, in order.
fn lit_sequence(log: &PinLog) -> Vec<LedColor> {
    log.lock()
        .iter()
        .filter(|(_, lit)| *lit)
        .map(|(color, _)| *color)
        .collect()
}

#[test]
fn pending_requests_light_leds_by_urgency() {
    let queue: LedQueue = PriorityQueue::create().expect("queue");
    queue.try_send(Event::new(PriorityLevel::Low)).unwrap();
    queue.try_send(Event::new(PriorityLevel::High)).unwrap();
    queue.try_send(Event::new(PriorityLevel::Medium)).unwrap();

    let log = PinLog::default();
    let led = ActiveObject::spawn(
        ActiveConfig::new("ao_led").with_idle_timeout(IDLE_POLL),
        queue.clone(),
        LedBehavior::with_on_period(SimPin::bank(&log), Duration::from_millis(5)),
    )
    .expect("spawn led");

    assert!(wait_until(|| led.dispatched() == 3));
    led.join().expect("join led");

    assert_eq!(
        lit_sequence(&log),
        vec![LedColor::Red, LedColor::Green, LedColor::Blue]
    );
    // Every LED ends switched off.
    let log = log.lock();
    for color in [LedColor::Red, LedColor::Green, LedColor::Blue] {
        let last = log.iter().rev().find(|(c, _)| *c == color).map(|(_, lit)| *lit);
        assert_eq!(last, Some(false));
    }
}

#[test]
fn presses_flow_from_ui_to_leds() {
    let queue: LedQueue = PriorityQueue::create().expect("queue");
    let mailbox = UiMailbox::new().expect("mailbox");
    let log = PinLog::default();

    let led = ActiveObject::spawn(
        ActiveConfig::new("ao_led").with_idle_timeout(IDLE_POLL),
        queue.clone(),
        LedBehavior::with_on_period(SimPin::bank(&log), Duration::from_millis(1)),
    )
    .expect("spawn led");
    let ui = ActiveObject::spawn(
        ActiveConfig::new("ao_ui").with_idle_timeout(IDLE_POLL),
        mailbox.clone(),
        UiBehavior::new(queue.clone()),
    )
    .expect("spawn ui");

    let running = AtomicBool::new(true);
    let codes = [ButtonEvent::Long.code(), 77, ButtonEvent::Pulse.code()];
    // Spaced out so each request is served before the next arrives.
    let posted = play_script(&codes, &mailbox, Duration::from_millis(50), &running);
    assert_eq!(posted, 3);

    assert!(wait_until(|| ui.dispatched() == 3 && led.dispatched() == 2));
    ui.join().expect("join ui");
    led.join().expect("join led");

    assert_eq!(lit_sequence(&log), vec![LedColor::Blue, LedColor::Red]);
    assert!(queue.is_empty());
}
