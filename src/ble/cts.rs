//! Current Time Service payloads.
//!
//! A CTS server reports its *local* date and time (0x2A2B) and, in a
//! separate characteristic (0x2A0F), how that local time relates to UTC.
//! Both are needed to get a UTC instant out of the peer.

use crate::error::SyncError;
use crate::time::calendar::{days_from_civil, days_in_month, SECONDS_PER_DAY};
use crate::time::UtcInstant;

pub const CURRENT_TIME_LEN: usize = 10;
pub const LOCAL_TIME_INFO_LEN: usize = 2;

const QUARTER_HOUR_SECS: i64 = 900;
const TIME_ZONE_UNKNOWN: i8 = -128;

/// Decoded Current Time characteristic (Exact Time 256 + adjust reason).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CurrentTime {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hours: u8,
    pub minutes: u8,
    pub seconds: u8,
    /// 1 = Monday .. 7 = Sunday, 0 unknown
    pub day_of_week: u8,
    pub fractions256: u8,
    pub adjust_reason: u8,
}

impl CurrentTime {
    /// `None` for short payloads and unknown or out-of-range fields.
    pub fn parse(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < CURRENT_TIME_LEN {
            return None;
        }
        let time = Self {
            year: u16::from_le_bytes([bytes[0], bytes[1]]),
            month: bytes[2],
            day: bytes[3],
            hours: bytes[4],
            minutes: bytes[5],
            seconds: bytes[6],
            day_of_week: bytes[7],
            fractions256: bytes[8],
            adjust_reason: bytes[9],
        };
        time.is_valid().then_some(time)
    }

    fn is_valid(&self) -> bool {
        let year = i32::from(self.year);
        (1582..=9999).contains(&self.year)
            && (1..=12).contains(&self.month)
            && self.day >= 1
            && self.day <= days_in_month(year, self.month)
            && self.hours < 24
            && self.minutes < 60
            && self.seconds < 60
    }

    /// Seconds since 1970-01-01 00:00 in the peer's local time.
    pub fn local_seconds(&self) -> i64 {
        let days = days_from_civil(i32::from(self.year), self.month, self.day);
        days * SECONDS_PER_DAY
            + i64::from(self.hours) * 3_600
            + i64::from(self.minutes) * 60
            + i64::from(self.seconds)
    }
}

/// Decoded Local Time Information characteristic.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LocalTimeInfo {
    /// Offset of standard time from UTC in 15 minute steps.
    pub time_zone: i8,
    /// Extra daylight-saving offset in 15 minute steps: 0, 2, 4 or 8.
    pub dst_offset: u8,
}

impl LocalTimeInfo {
    /// `None` when the peer does not know its zone or DST offset.
    pub fn parse(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < LOCAL_TIME_INFO_LEN {
            return None;
        }
        let time_zone = bytes[0] as i8;
        let dst_offset = bytes[1];
        if time_zone == TIME_ZONE_UNKNOWN || !(-48..=56).contains(&time_zone) {
            return None;
        }
        if !matches!(dst_offset, 0 | 2 | 4 | 8) {
            return None;
        }
        Some(Self {
            time_zone,
            dst_offset,
        })
    }

    /// Local time minus UTC, in seconds.
    pub fn utc_offset_secs(&self) -> i64 {
        (i64::from(self.time_zone) + i64::from(self.dst_offset)) * QUARTER_HOUR_SECS
    }
}

pub fn to_utc(time: &CurrentTime, info: &LocalTimeInfo) -> UtcInstant {
    UtcInstant::from_unix_seconds(time.local_seconds() - info.utc_offset_secs())
}

/// Both raw characteristic values to a UTC instant.
pub fn decode(current_time: &[u8], local_time_info: &[u8]) -> Result<UtcInstant, SyncError> {
    let time = CurrentTime::parse(current_time).ok_or(SyncError::Unreachable)?;
    let info = LocalTimeInfo::parse(local_time_info).ok_or(SyncError::Unreachable)?;
    Ok(to_utc(&time, &info))
}

#[cfg(test)]
mod tests {
    use super::*;

    // 2024-07-15 14:00:00 local, Monday
    const JULY_AFTERNOON: [u8; 10] = [0xE8, 0x07, 7, 15, 14, 0, 0, 1, 0, 0];

    #[test]
    fn parses_current_time() {
        let t = CurrentTime::parse(&JULY_AFTERNOON).unwrap();
        assert_eq!(t.year, 2024);
        assert_eq!((t.month, t.day), (7, 15));
        assert_eq!((t.hours, t.minutes, t.seconds), (14, 0, 0));
        assert_eq!(t.day_of_week, 1);
    }

    #[test]
    fn cest_peer_converts_to_utc() {
        // UTC+1 standard, +1 h DST
        let utc = decode(&JULY_AFTERNOON, &[4, 4]).unwrap();
        assert_eq!(utc.unix_seconds(), 1_721_044_800);
    }

    #[test]
    fn utc_peer_needs_no_offset() {
        let utc = decode(&JULY_AFTERNOON, &[0, 0]).unwrap();
        assert_eq!(utc.unix_seconds(), 1_721_044_800 + 7_200);
    }

    #[test]
    fn negative_zone_moves_forward() {
        // UTC-5, no DST: 14:00 local is 19:00 UTC
        let utc = decode(&JULY_AFTERNOON, &[(-20i8) as u8, 0]).unwrap();
        assert_eq!(utc.seconds_of_day(), 19 * 3_600);
    }

    #[test]
    fn unknown_zone_or_dst_is_rejected() {
        assert_eq!(
            decode(&JULY_AFTERNOON, &[0x80, 0]),
            Err(SyncError::Unreachable)
        );
        assert_eq!(decode(&JULY_AFTERNOON, &[4, 255]), Err(SyncError::Unreachable));
        assert_eq!(decode(&JULY_AFTERNOON, &[4, 3]), Err(SyncError::Unreachable));
        assert_eq!(decode(&JULY_AFTERNOON, &[4]), Err(SyncError::Unreachable));
    }

    #[test]
    fn invalid_fields_are_rejected() {
        let mut unknown_year = JULY_AFTERNOON;
        unknown_year[0] = 0;
        unknown_year[1] = 0;
        assert!(CurrentTime::parse(&unknown_year).is_none());

        let mut feb_30 = JULY_AFTERNOON;
        feb_30[2] = 2;
        feb_30[3] = 30;
        assert!(CurrentTime::parse(&feb_30).is_none());

        let mut hour_24 = JULY_AFTERNOON;
        hour_24[4] = 24;
        assert!(CurrentTime::parse(&hour_24).is_none());

        assert!(CurrentTime::parse(&JULY_AFTERNOON[..9]).is_none());
    }

    #[test]
    fn leap_day_is_accepted() {
        let leap = [0xE8, 0x07, 2, 29, 0, 0, 0, 4, 0, 0];
        assert!(CurrentTime::parse(&leap).is_some());
    }
}
