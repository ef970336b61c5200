//! Time keeping: monotonic instants, UTC samples, the EU daylight-saving
//! rule, the anchored wall clock and the one-shot network sync.
//!
//! The device never stores "the current time". It stores one
//! [`wall_clock::ClockAnchor`] and derives the time of day from the
//! free-running millisecond counter on every read.

pub mod calendar;
pub mod dst;
pub mod sync;
pub mod wall_clock;

use core::ops::Add;

/// Milliseconds since an arbitrary monotonic epoch (usually power-on).
///
/// Never decreases while the device runs. Within one poll cycle the same
/// value is handed to every consumer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Instant(u64);

impl Instant {
    pub const ZERO: Instant = Instant(0);

    pub const fn from_millis(ms: u64) -> Self {
        Self(ms)
    }

    pub const fn as_millis(self) -> u64 {
        self.0
    }

    /// Milliseconds elapsed since `earlier`, zero if `earlier` is in the future.
    pub const fn millis_since(self, earlier: Instant) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl Add<u64> for Instant {
    type Output = Instant;

    fn add(self, ms: u64) -> Instant {
        Instant(self.0.saturating_add(ms))
    }
}

/// Source of [`Instant`]s.
pub trait MonotonicClock {
    fn now(&self) -> Instant;
}

/// A point in UTC as whole seconds since the Unix epoch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UtcInstant(i64);

impl UtcInstant {
    pub const fn from_unix_seconds(secs: i64) -> Self {
        Self(secs)
    }

    pub const fn unix_seconds(self) -> i64 {
        self.0
    }

    /// Seconds since midnight of the day containing this instant.
    pub fn seconds_of_day(self) -> u32 {
        self.0.rem_euclid(calendar::SECONDS_PER_DAY) as u32
    }

    /// Days since 1970-01-01 (negative before).
    pub fn days_since_epoch(self) -> i64 {
        self.0.div_euclid(calendar::SECONDS_PER_DAY)
    }

    /// Shift by a zone offset. The result is a local reading, not UTC.
    /// Saturates at the ends of the range.
    pub fn offset_by(self, secs: i32) -> Self {
        Self(self.0.saturating_add(i64::from(secs)))
    }
}

/// Monotonic clock backed by the embassy time driver (RTC1).
#[cfg(feature = "embedded")]
#[derive(Clone, Copy, Default)]
pub struct EmbassyClock;

#[cfg(feature = "embedded")]
impl MonotonicClock for EmbassyClock {
    fn now(&self) -> Instant {
        Instant::from_millis(embassy_time::Instant::now().as_millis())
    }
}
