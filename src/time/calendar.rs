//! Proleptic Gregorian calendar arithmetic on day numbers.
//!
//! Day 0 is 1970-01-01 (a Thursday). Conversions follow the well known
//! era/day-of-era decomposition, so they are exact for any year that
//! fits in `i32`. Day numbers beyond that clamp to the nearest such year.

pub const SECONDS_PER_DAY: i64 = 86_400;

/// Weekday number of Sunday as returned by [`weekday`].
pub const SUNDAY: u8 = 0;

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Days in `month` (1-12) of `year`.
pub fn days_in_month(year: i32, month: u8) -> u8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

/// Day number of a civil date. `month` is 1-12, `day` 1-31.
pub fn days_from_civil(year: i32, month: u8, day: u8) -> i64 {
    let y = i64::from(year) - i64::from(month <= 2);
    let era = (if y >= 0 { y } else { y - 399 }) / 400;
    let yoe = y - era * 400;
    let m = i64::from(month);
    let mp = if m > 2 { m - 3 } else { m + 9 };
    let doy = (153 * mp + 2) / 5 + i64::from(day) - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - 719_468
}

/// Civil date `(year, month, day)` of a day number.
pub fn civil_from_days(days: i64) -> (i32, u8, u8) {
    let z = days + 719_468;
    let era = (if z >= 0 { z } else { z - 146_096 }) / 146_097;
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1_460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u8;
    let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u8;
    let year = yoe + era * 400 + i64::from(month <= 2);
    let year = year.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32;
    (year, month, day)
}

/// Day of week, 0 = Sunday .. 6 = Saturday.
pub fn weekday(days: i64) -> u8 {
    (days + 4).rem_euclid(7) as u8
}

/// Day number of the last Sunday in `month` of `year`.
///
/// Starts at the last day of the month and walks back one day at a time.
pub fn last_sunday(year: i32, month: u8) -> i64 {
    let mut days = days_from_civil(year, month, days_in_month(year, month));
    while weekday(days) != SUNDAY {
        days -= 1;
    }
    days
}
