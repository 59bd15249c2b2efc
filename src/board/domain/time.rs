//! Elapsed-time value type used by the timer and list summaries.

use serde::{Deserialize, Serialize};
use std::fmt;

const SECONDS_PER_MINUTE: u64 = 60;
const SECONDS_PER_HOUR: u64 = 3_600;

/// Whole seconds of tracked work.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElapsedTime(u64);

impl ElapsedTime {
    /// Zero elapsed seconds.
    pub const ZERO: Self = Self(0);

    /// Wraps a number of seconds.
    #[must_use]
    pub const fn from_secs(seconds: u64) -> Self {
        Self(seconds)
    }

    /// Returns the number of seconds.
    #[must_use]
    pub const fn as_secs(self) -> u64 {
        self.0
    }

    /// Returns the time advanced by one second, saturating at `u64::MAX`.
    #[must_use]
    pub const fn tick(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl std::iter::Sum for ElapsedTime {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, item| Self(acc.0.saturating_add(item.0)))
    }
}

/// Formats as zero-padded `HH:MM:SS`; hours grow past 24 rather than wrapping.
impl fmt::Display for ElapsedTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hours = self.0.div_euclid(SECONDS_PER_HOUR);
        let minutes = self
            .0
            .rem_euclid(SECONDS_PER_HOUR)
            .div_euclid(SECONDS_PER_MINUTE);
        let seconds = self.0.rem_euclid(SECONDS_PER_MINUTE);
        write!(f, "{hours:02}:{minutes:02}:{seconds:02}")
    }
}
