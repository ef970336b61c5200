//! Application-wide constants and compile-time configuration.
//!
//! All pin assignments, timing parameters, and protocol constants live
//! here so they can be tuned in one place. The values the user-facing
//! behaviour depends on are also grouped into [`TimerConfig`] and
//! [`BootConfig`] so tests and alternative boards can override them.

use crate::time::wall_clock::WallTime;

// Timer

/// Selectable countdown durations, in minutes, in rotation order.
pub const TIMER_OPTIONS_MIN: [u32; 7] = [1, 5, 10, 30, 60, 120, 240];

/// Maximum gap between two button presses that still counts as a double click (ms).
pub const DOUBLE_CLICK_MS: u64 = 400;

/// Half period of the "finished" blink (ms).
pub const BLINK_INTERVAL_MS: u64 = 500;

/// Main loop poll interval (ms). Encoder detents must be slower than two polls.
pub const POLL_INTERVAL_MS: u64 = 2;

// Time keeping

/// Time of day shown when no authoritative time could be obtained.
pub const FALLBACK_TIME: WallTime = WallTime::new(12, 0, 0);

/// Central European Time, UTC+1.
pub const STANDARD_OFFSET_SECS: i32 = 3_600;

/// Central European Summer Time, UTC+2.
pub const SUMMER_OFFSET_SECS: i32 = 7_200;

/// DST switches at this many seconds after 00:00 UTC on the last Sunday.
pub const DST_SWITCH_SECS_UTC: i64 = 3_600;

// Boot

/// Connection attempts before giving up and running offline.
pub const CONNECT_ATTEMPTS: u8 = 20;

/// Pause between connection attempts (ms).
pub const CONNECT_RETRY_MS: u32 = 500;

/// How long a boot status screen stays up (ms).
pub const STATUS_HOLD_MS: u32 = 1_000;

// BLE time server

/// Duration of the scan for a Current Time Service peer (seconds).
pub const BLE_SCAN_DURATION_SECS: u64 = 4;

/// Upper bound on a single GATT time read round-trip (ms).
pub const BLE_TIME_READ_TIMEOUT_MS: u64 = 3_000;

/// Upper bound on each GAP connect attempt (ms).
pub const BLE_CONNECT_TIMEOUT_MS: u64 = 2_000;

/// Upper bound on waiting for the peer to encrypt or pair the link (ms).
pub const BLE_ENCRYPT_TIMEOUT_MS: u64 = 5_000;

/// BLE connection interval range (in 1.25 ms units). Latency is irrelevant
/// for a one-shot read, so stay relaxed.
pub const BLE_CONN_INTERVAL_MIN: u16 = 24;
pub const BLE_CONN_INTERVAL_MAX: u16 = 40;

/// BLE slave latency (number of connection events the peripheral can skip).
pub const BLE_SLAVE_LATENCY: u16 = 0;

/// BLE supervision timeout (in 10 ms units). 400 = 4 s.
pub const BLE_SUP_TIMEOUT: u16 = 400;

// Display

/// SSD1306 panel width, used to centre text.
pub const DISPLAY_WIDTH: i32 = 128;

// GPIO pin assignments (nRF52840-DK defaults)
//
// These are logical names; the actual `embassy_nrf::peripherals::*` are
// picked in `main.rs`. Adjust for your custom PCB.
//
//   Encoder CLK    → P0.11
//   Encoder DT     → P0.12
//   Encoder SW     → P0.24
//   I²C SDA        → P0.26
//   I²C SCL        → P0.27

/// Behaviour knobs of the countdown UI.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimerConfig {
    /// Selectable durations in minutes; never empty.
    options: &'static [u32],
    /// Press-to-press gap below which the second press is a double click.
    pub double_click_ms: u64,
    /// Toggle period of the finished screen.
    pub blink_interval_ms: u64,
}

impl TimerConfig {
    /// Replace the selectable durations. Returns `None` for an empty list.
    pub fn with_options(self, options: &'static [u32]) -> Option<Self> {
        if options.is_empty() {
            return None;
        }
        Some(Self { options, ..self })
    }

    pub fn options(&self) -> &'static [u32] {
        self.options
    }
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            options: &TIMER_OPTIONS_MIN,
            double_click_ms: DOUBLE_CLICK_MS,
            blink_interval_ms: BLINK_INTERVAL_MS,
        }
    }
}

/// Knobs of the one-shot boot sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BootConfig {
    pub connect_attempts: u8,
    pub connect_retry_ms: u32,
    pub status_hold_ms: u32,
    pub fallback_time: WallTime,
}

impl Default for BootConfig {
    fn default() -> Self {
        Self {
            connect_attempts: CONNECT_ATTEMPTS,
            connect_retry_ms: CONNECT_RETRY_MS,
            status_hold_ms: STATUS_HOLD_MS,
            fallback_time: FALLBACK_TIME,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_option_list_is_rejected() {
        assert!(TimerConfig::default().with_options(&[]).is_none());
    }

    #[test]
    fn custom_options_keep_other_knobs() {
        static SHORT: [u32; 2] = [2, 3];
        let cfg = TimerConfig {
            double_click_ms: 250,
            ..TimerConfig::default()
        }
        .with_options(&SHORT)
        .unwrap();
        assert_eq!(cfg.options(), &[2, 3]);
        assert_eq!(cfg.double_click_ms, 250);
        assert_eq!(cfg.blink_interval_ms, BLINK_INTERVAL_MS);
    }
}
