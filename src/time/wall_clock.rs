//! Time of day derived from an anchor and the monotonic counter.

use core::fmt;

use crate::config::FALLBACK_TIME;
use crate::time::Instant;

const SECONDS_PER_DAY: u32 = 86_400;

/// Time of day without a date.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WallTime {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl WallTime {
    pub const fn new(hour: u8, minute: u8, second: u8) -> Self {
        Self {
            hour,
            minute,
            second,
        }
    }

    /// Wraps values of a day or more.
    pub const fn from_seconds_of_day(secs: u32) -> Self {
        let secs = secs % SECONDS_PER_DAY;
        Self {
            hour: (secs / 3_600) as u8,
            minute: ((secs / 60) % 60) as u8,
            second: (secs % 60) as u8,
        }
    }

    pub const fn seconds_of_day(self) -> u32 {
        self.hour as u32 * 3_600 + self.minute as u32 * 60 + self.second as u32
    }
}

impl fmt::Display for WallTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hour, self.minute, self.second)
    }
}

/// The one piece of state the clock owns.
///
/// `time(now) = wall_seconds_at_reference + (now - monotonic_reference) / 1000`,
/// modulo one day.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockAnchor {
    pub monotonic_reference: Instant,
    pub wall_seconds_at_reference: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WallClock {
    anchor: ClockAnchor,
}

impl WallClock {
    pub const fn new(anchor: ClockAnchor) -> Self {
        Self { anchor }
    }

    /// Pin `hour:minute:second` to `at`. Replaces any earlier anchor.
    pub fn anchor(&mut self, hour: u8, minute: u8, second: u8, at: Instant) {
        self.anchor_time(WallTime::new(hour, minute, second), at);
    }

    pub fn anchor_time(&mut self, time: WallTime, at: Instant) {
        self.anchor = ClockAnchor {
            monotonic_reference: at,
            wall_seconds_at_reference: time.seconds_of_day() % SECONDS_PER_DAY,
        };
    }

    pub fn read(&self, now: Instant) -> WallTime {
        let elapsed_secs = now.millis_since(self.anchor.monotonic_reference) / 1_000;
        let day_secs = (u64::from(self.anchor.wall_seconds_at_reference) + elapsed_secs)
            % u64::from(SECONDS_PER_DAY);
        WallTime::from_seconds_of_day(day_secs as u32)
    }

    pub fn current_anchor(&self) -> ClockAnchor {
        self.anchor
    }
}

impl Default for WallClock {
    /// Fallback time pinned to the start of the monotonic epoch.
    fn default() -> Self {
        let mut clock = Self::new(ClockAnchor {
            monotonic_reference: Instant::ZERO,
            wall_seconds_at_reference: 0,
        });
        clock.anchor_time(FALLBACK_TIME, Instant::ZERO);
        clock
    }
}
