//! Wait budgets for blocking operations

use core::fmt;
use core::time::Duration;

/// Maximum time an operation may block
///
/// Expiry is an ordinary outcome reported as [`PqError::Timeout`], never a
/// fault.
///
/// [`PqError::Timeout`]: crate::PqError::Timeout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Timeout {
    /// Do not block; fail at once if the operation cannot proceed
    NoWait,
    /// Block for at most the given duration
    After(Duration),
    /// Block until the operation can proceed
    #[default]
    Forever,
}

impl Timeout {
    /// Timeout of the given number of milliseconds
    pub const fn from_millis(millis: u64) -> Self {
        if millis == 0 {
            Timeout::NoWait
        } else {
            Timeout::After(Duration::from_millis(millis))
        }
    }

    /// Bounded duration of this budget, `None` for [`Timeout::Forever`]
    pub const fn duration(self) -> Option<Duration> {
        match self {
            Timeout::NoWait => Some(Duration::ZERO),
            Timeout::After(d) => Some(d),
            Timeout::Forever => None,
        }
    }

    /// True if the operation must not block at all
    pub fn is_no_wait(self) -> bool {
        self.duration() == Some(Duration::ZERO)
    }
}

impl From<Duration> for Timeout {
    fn from(duration: Duration) -> Self {
        if duration.is_zero() {
            Timeout::NoWait
        } else {
            Timeout::After(duration)
        }
    }
}

impl From<Option<Duration>> for Timeout {
    fn from(duration: Option<Duration>) -> Self {
        duration.map_or(Timeout::Forever, Timeout::from)
    }
}

impl fmt::Display for Timeout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Timeout::NoWait => write!(f, "no-wait"),
            Timeout::After(d) => write!(f, "{}ms", d.as_millis()),
            Timeout::Forever => write!(f, "forever"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Timeout {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Timeout::NoWait => defmt::write!(fmt, "no-wait"),
            Timeout::After(d) => defmt::write!(fmt, "{=u64}ms", d.as_millis() as u64),
            Timeout::Forever => defmt::write!(fmt, "forever"),
        }
    }
}
