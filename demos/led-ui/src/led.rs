//! LED active object and the pins it drives.

use core::convert::Infallible;
use core::fmt;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use embedded_hal::digital::{ErrorType, OutputPin};
use log::{debug, info, warn};
use parking_lot::Mutex;
use prioq_active::{ActiveBehavior, ActiveContext, Reaction};
use prioq_core::{Event, PriorityLevel};

/// How long an LED stays lit for one request.
pub const DEFAULT_LED_ON_PERIOD: Duration = Duration::from_millis(5000);

/// The three board LEDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LedColor {
    Red,
    Green,
    Blue,
}

impl LedColor {
    /// LED assigned to a request priority.
    pub const fn for_priority(priority: PriorityLevel) -> Self {
        match priority {
            PriorityLevel::High => LedColor::Red,
            PriorityLevel::Medium => LedColor::Green,
            PriorityLevel::Low => LedColor::Blue,
        }
    }
}

impl fmt::Display for LedColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LedColor::Red => write!(f, "red"),
            LedColor::Green => write!(f, "green"),
            LedColor::Blue => write!(f, "blue"),
        }
    }
}

/// One output pin per LED color.
pub struct LedBank<P> {
    pub red: P,
    pub green: P,
    pub blue: P,
}

impl<P: OutputPin> LedBank<P> {
    pub fn pin_mut(&mut self, color: LedColor) -> &mut P {
        match color {
            LedColor::Red => &mut self.red,
            LedColor::Green => &mut self.green,
            LedColor::Blue => &mut self.blue,
        }
    }
}

/// Reactions of the LED object: light the LED for the request's priority,
/// hold it, then switch it off.
///
/// The hold runs inside the reaction, so pending requests wait in the
/// queue and the highest one is served next.
pub struct LedBehavior<P> {
    leds: LedBank<P>,
    on_period: Duration,
}

impl<P: OutputPin> LedBehavior<P> {
    pub fn new(leds: LedBank<P>) -> Self {
        Self::with_on_period(leds, DEFAULT_LED_ON_PERIOD)
    }

    pub fn with_on_period(leds: LedBank<P>, on_period: Duration) -> Self {
        Self { leds, on_period }
    }

    pub fn on_period(&self) -> Duration {
        self.on_period
    }

    fn drive(&mut self, color: LedColor, on: bool) {
        let pin = self.leds.pin_mut(color);
        let result = if on { pin.set_high() } else { pin.set_low() };
        if let Err(err) = result {
            warn!("led: failed to drive {} pin: {:?}", color, err);
        }
    }
}

impl<P> ActiveBehavior for LedBehavior<P>
where
    P: OutputPin + Send + 'static,
{
    type Message = Event;

    fn on_start(&mut self, ctx: &mut ActiveContext) {
        for color in [LedColor::Red, LedColor::Green, LedColor::Blue] {
            self.drive(color, false);
        }
        debug!("{}: all LEDs off", ctx.name());
    }

    fn on_message(&mut self, ctx: &mut ActiveContext, event: Event) -> Reaction {
        let color = LedColor::for_priority(event.priority());
        info!("{}: {} request, {} LED on", ctx.name(), event.priority(), color);
        self.drive(color, true);
        thread::sleep(self.on_period);
        self.drive(color, false);
        debug!("{}: {} LED off", ctx.name(), color);
        Reaction::Handled
    }
}

/// Shared record of every level written to a set of simulated pins.
pub type PinLog = Arc<Mutex<Vec<(LedColor, bool)>>>;

/// Host stand-in for an LED GPIO; logs and records each write.
#[derive(Debug, Clone)]
pub struct SimPin {
    color: LedColor,
    lit: bool,
    log: PinLog,
}

impl SimPin {
    pub fn new(color: LedColor, log: PinLog) -> Self {
        Self {
            color,
            lit: false,
            log,
        }
    }

    /// A full bank of simulated pins writing into one shared log.
    pub fn bank(log: &PinLog) -> LedBank<SimPin> {
        LedBank {
            red: SimPin::new(LedColor::Red, Arc::clone(log)),
            green: SimPin::new(LedColor::Green, Arc::clone(log)),
            blue: SimPin::new(LedColor::Blue, Arc::clone(log)),
        }
    }

    pub fn is_lit(&self) -> bool {
        self.lit
    }

    fn write(&mut self, lit: bool) {
        self.lit = lit;
        self.log.lock().push((self.color, lit));
        debug!("pin {}: {}", self.color, if lit { "HIGH" } else { "LOW" });
    }
}

impl ErrorType for SimPin {
    type Error = Infallible;
}

impl OutputPin for SimPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.write(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.write(true);
        Ok(())
    }
}
