//! EU summer time rule for Central European Time.
//!
//! Summer time runs from the last Sunday of March, 01:00 UTC, up to (not
//! including) the last Sunday of October, 01:00 UTC. Inside that window
//! the offset is UTC+2, outside it UTC+1. The computation is pure and
//! only depends on the UTC year of the instant.

use crate::config::{DST_SWITCH_SECS_UTC, STANDARD_OFFSET_SECS, SUMMER_OFFSET_SECS};
use crate::time::calendar::{civil_from_days, last_sunday, SECONDS_PER_DAY};
use crate::time::UtcInstant;

/// Result of the rule for one instant. Recomputed on every sync.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DstState {
    pub is_summer_time: bool,
}

impl DstState {
    pub fn utc_offset_secs(self) -> i32 {
        if self.is_summer_time {
            SUMMER_OFFSET_SECS
        } else {
            STANDARD_OFFSET_SECS
        }
    }
}

/// Half-open UTC interval `[start, end)` during which summer time applies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SummerTimeWindow {
    pub start: UtcInstant,
    pub end: UtcInstant,
}

impl SummerTimeWindow {
    pub fn contains(&self, instant: UtcInstant) -> bool {
        self.start <= instant && instant < self.end
    }
}

pub fn summer_time_window(year: i32) -> SummerTimeWindow {
    SummerTimeWindow {
        start: switch_instant(year, 3),
        end: switch_instant(year, 10),
    }
}

fn switch_instant(year: i32, month: u8) -> UtcInstant {
    UtcInstant::from_unix_seconds(last_sunday(year, month) * SECONDS_PER_DAY + DST_SWITCH_SECS_UTC)
}

pub fn dst_state(instant: UtcInstant) -> DstState {
    let (year, _, _) = civil_from_days(instant.days_since_epoch());
    DstState {
        is_summer_time: summer_time_window(year).contains(instant),
    }
}

/// UTC offset in seconds and whether summer time is in effect.
pub fn effective_utc_offset(instant: UtcInstant) -> (i32, bool) {
    let state = dst_state(instant);
    (state.utc_offset_secs(), state.is_summer_time)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(secs: i64) -> UtcInstant {
        UtcInstant::from_unix_seconds(secs)
    }

    // 2024-03-31 01:00:00 UTC and 2024-10-27 01:00:00 UTC
    const MARCH_2024: i64 = 1_711_846_800;
    const OCTOBER_2024: i64 = 1_729_990_800;

    #[test]
    fn window_for_2024() {
        let window = summer_time_window(2024);
        assert_eq!(window.start, at(MARCH_2024));
        assert_eq!(window.end, at(OCTOBER_2024));
    }

    #[test]
    fn march_boundary_is_exact() {
        assert_eq!(effective_utc_offset(at(MARCH_2024)), (7_200, true));
        assert_eq!(effective_utc_offset(at(MARCH_2024 - 1)), (3_600, false));
    }

    #[test]
    fn october_boundary_is_exact() {
        assert_eq!(effective_utc_offset(at(OCTOBER_2024 - 1)), (7_200, true));
        assert_eq!(effective_utc_offset(at(OCTOBER_2024)), (3_600, false));
    }

    #[test]
    fn boundaries_in_other_years() {
        // 2025-03-30, 2026-10-25
        assert!(dst_state(at(1_743_296_400)).is_summer_time);
        assert!(!dst_state(at(1_743_296_399)).is_summer_time);
        assert!(dst_state(at(1_792_889_999)).is_summer_time);
        assert!(!dst_state(at(1_792_890_000)).is_summer_time);
    }

    #[test]
    fn offset_is_one_of_two_values_and_constant_between_boundaries() {
        let window = summer_time_window(2024);
        let year_start = at(1_704_067_200); // 2024-01-01
        let year_end = at(1_735_689_599); // 2024-12-31 23:59:59
        let mut t = year_start.unix_seconds();
        while t <= year_end.unix_seconds() {
            let (offset, summer) = effective_utc_offset(at(t));
            assert!(offset == 3_600 || offset == 7_200);
            assert_eq!(summer, window.contains(at(t)));
            assert_eq!(offset == 7_200, summer);
            t += 3_607; // odd step so every hour of day gets hit
        }
    }

    #[test]
    fn repeated_calls_agree() {
        let t = at(MARCH_2024 + 42);
        assert_eq!(effective_utc_offset(t), effective_utc_offset(t));
    }

    #[test]
    fn winter_and_summer_samples() {
        // 2024-01-15 12:00 UTC, 2024-07-15 12:00 UTC
        assert_eq!(effective_utc_offset(at(1_705_320_000)), (3_600, false));
        assert_eq!(effective_utc_offset(at(1_721_044_800)), (7_200, true));
    }
}
