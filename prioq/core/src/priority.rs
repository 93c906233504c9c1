//! Priority levels carried by events

use core::fmt;
use crate::{PqError, PqResult};

/// Priority rank of an event
///
/// Ranks are totally ordered, `Low < Medium < High`. Several events may
/// share a rank; the queue does not order them among themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum PriorityLevel {
    /// Lowest rank
    Low = 0,
    /// Middle rank
    Medium = 1,
    /// Highest rank
    High = 2,
}

impl PriorityLevel {
    /// Number of distinct ranks
    pub const COUNT: usize = 3;

    /// All ranks, lowest first
    pub const ALL: [PriorityLevel; Self::COUNT] =
        [PriorityLevel::Low, PriorityLevel::Medium, PriorityLevel::High];

    /// Create a priority level from its raw value
    pub fn new(raw: u8) -> PqResult<Self> {
        match raw {
            0 => Ok(PriorityLevel::Low),
            1 => Ok(PriorityLevel::Medium),
            2 => Ok(PriorityLevel::High),
            _ => Err(PqError::InvalidPriority),
        }
    }

    /// Get the raw priority value
    pub const fn raw(self) -> u8 {
        self as u8
    }

    /// Index of this rank in [`PriorityLevel::ALL`]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl TryFrom<u8> for PriorityLevel {
    type Error = PqError;

    fn try_from(raw: u8) -> PqResult<Self> {
        PriorityLevel::new(raw)
    }
}

impl From<PriorityLevel> for u8 {
    fn from(level: PriorityLevel) -> Self {
        level.raw()
    }
}

impl fmt::Display for PriorityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriorityLevel::Low => write!(f, "LOW"),
            PriorityLevel::Medium => write!(f, "MEDIUM"),
            PriorityLevel::High => write!(f, "HIGH"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for PriorityLevel {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            PriorityLevel::Low => defmt::write!(fmt, "LOW"),
            PriorityLevel::Medium => defmt::write!(fmt, "MEDIUM"),
            PriorityLevel::High => defmt::write!(fmt, "HIGH"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_ordering() {
        assert!(PriorityLevel::Low < PriorityLevel::Medium);
        assert!(PriorityLevel::Medium < PriorityLevel::High);
        assert_eq!(PriorityLevel::ALL.iter().max(), Some(&PriorityLevel::High));
    }

    #[test]
    fn test_priority_raw_roundtrip() {
        for level in PriorityLevel::ALL {
            assert_eq!(PriorityLevel::new(level.raw()), Ok(level));
        }
        assert_eq!(PriorityLevel::try_from(3), Err(PqError::InvalidPriority));
    }
}
