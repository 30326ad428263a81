//! Reference time: 100 ns units, as used by playback graphs.

use std::fmt;
use std::ops::{Add, AddAssign, Sub};
use std::time::Duration;

/// Reference-time units per second.
pub const UNITS_PER_SECOND: u64 = 10_000_000;

/// A point in time or duration in 100 ns units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
pub struct ReferenceTime(pub u64);

impl ReferenceTime {
    pub const ZERO: ReferenceTime = ReferenceTime(0);

    /// Convert a disc clock value (45 kHz PTS/2 units) to reference time.
    ///
    /// `20000 * raw / 90`, computed in 64 bits so the product cannot overflow.
    pub fn from_clock(raw: u32) -> Self {
        ReferenceTime(20_000 * u64::from(raw) / 90)
    }

    pub fn from_secs(secs: u64) -> Self {
        ReferenceTime(secs * UNITS_PER_SECOND)
    }

    pub fn as_units(self) -> u64 {
        self.0
    }

    pub fn as_duration(self) -> Duration {
        Duration::from_nanos(self.0.saturating_mul(100))
    }

    pub fn saturating_sub(self, other: ReferenceTime) -> ReferenceTime {
        ReferenceTime(self.0.saturating_sub(other.0))
    }
}

impl Add for ReferenceTime {
    type Output = ReferenceTime;

    fn add(self, rhs: ReferenceTime) -> ReferenceTime {
        ReferenceTime(self.0 + rhs.0)
    }
}

impl AddAssign for ReferenceTime {
    fn add_assign(&mut self, rhs: ReferenceTime) {
        self.0 += rhs.0;
    }
}

impl Sub for ReferenceTime {
    type Output = ReferenceTime;

    fn sub(self, rhs: ReferenceTime) -> ReferenceTime {
        ReferenceTime(self.0 - rhs.0)
    }
}

impl std::iter::Sum for ReferenceTime {
    fn sum<I: Iterator<Item = ReferenceTime>>(iter: I) -> Self {
        iter.fold(ReferenceTime::ZERO, Add::add)
    }
}

impl From<ReferenceTime> for Duration {
    fn from(t: ReferenceTime) -> Duration {
        t.as_duration()
    }
}

impl fmt::Display for ReferenceTime {
    /// `H:MM:SS.mmm`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let millis = self.0 / 10_000;
        let secs = millis / 1000;
        write!(
            f,
            "{}:{:02}:{:02}.{:03}",
            secs / 3600,
            (secs / 60) % 60,
            secs % 60,
            millis % 1000
        )
    }
}
