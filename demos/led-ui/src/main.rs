//! Button to LED demo on the host.
//!
//! Plays a scripted sequence of button presses into the UI object and lets
//! the LED object work through the resulting requests on simulated pins.
//! Set `RUST_LOG=debug` to see every pin write; Ctrl-C stops early.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use log::info;
use prioq_active::{ActiveConfig, ActiveObject, TaskPriority};
use prioq_core::Timeout;
use prioq_led_ui::{
    parse_script, play_script, LedBehavior, LedQueue, PinLog, SimPin, UiBehavior, UiMailbox,
};
use prioq_queue::{PriorityQueue, QueueConfig, SendPolicy};

/// How often an idle object checks for a stop request.
const IDLE_POLL: Duration = Duration::from_millis(100);

#[derive(Parser, Debug)]
#[command(author, version, about = "Button presses to prioritized LED requests")]
struct Args {
    /// Comma-separated presses: pulse, short, long, or raw codes
    #[arg(long, value_delimiter = ',', default_value = "long,short,pulse,pulse,long")]
    presses: Vec<String>,

    /// Delay between two presses
    #[arg(long = "press-interval-ms", default_value_t = 200, value_name = "MS")]
    press_interval_ms: u64,

    /// How long an LED stays lit per request
    #[arg(long = "led-on-ms", default_value_t = 5000, value_name = "MS")]
    led_on_ms: u64,

    /// Make the UI wait for room in the LED queue instead of dropping presses
    #[arg(long = "blocking-send")]
    blocking_send: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let script = parse_script(args.presses.iter().map(String::as_str))?;
    let led_on_period = Duration::from_millis(args.led_on_ms);

    let running = Arc::new(AtomicBool::new(true));
    {
        let running = Arc::clone(&running);
        ctrlc::set_handler(move || running.store(false, Ordering::Release))
            .context("installing Ctrl-C handler")?;
    }

    let (policy, send_timeout) = if args.blocking_send {
        (SendPolicy::Block, Timeout::After(led_on_period))
    } else {
        (SendPolicy::Reject, Timeout::NoWait)
    };
    let led_queue: LedQueue = PriorityQueue::create_with(
        QueueConfig::builder().name("led").send_policy(policy).build(),
    )
    .context("creating LED queue")?;
    let pin_log = PinLog::default();

    let led = ActiveObject::spawn(
        ActiveConfig::new("ao_led")
            .with_priority(TaskPriority::IDLE_PLUS_ONE)
            .with_idle_timeout(IDLE_POLL),
        led_queue.clone(),
        LedBehavior::with_on_period(SimPin::bank(&pin_log), led_on_period),
    )
    .context("starting LED object")?;
    let (ui, ui_mailbox): (_, UiMailbox) = ActiveObject::spawn_with_mailbox(
        ActiveConfig::new("ao_ui")
            .with_priority(TaskPriority(2))
            .with_idle_timeout(IDLE_POLL),
        UiBehavior::with_send_timeout(led_queue.clone(), send_timeout),
    )
    .context("starting UI object")?;

    info!(
        "playing {} presses, LED hold {:?}, send policy {}",
        script.len(),
        led_on_period,
        policy
    );
    play_script(
        &script,
        &ui_mailbox,
        Duration::from_millis(args.press_interval_ms),
        &running,
    );

    // Drain both inboxes, then let the last request finish its hold.
    while running.load(Ordering::Acquire) && !(ui_mailbox.is_empty() && led_queue.is_empty()) {
        thread::sleep(Duration::from_millis(10));
    }
    let hold_end = Instant::now() + led_on_period;
    while running.load(Ordering::Acquire) && Instant::now() < hold_end {
        thread::sleep(Duration::from_millis(10));
    }

    ui.join().context("stopping UI object")?;
    led.join().context("stopping LED object")?;

    let writes = pin_log.lock().len();
    info!("done, {} pin writes", writes);
    Ok(())
}
