//! Core of a rotary-knob countdown timer with a BLE-synced clock face.
//!
//! The device idles on a clock, lets the user pick a duration with the
//! encoder, counts it down and blinks when done. Time of day comes from
//! a monotonic counter plus one anchor, set at boot from a Bluetooth
//! Current Time Service peer (EU summer time applied) or from a fixed
//! fallback when no peer answers.
//!
//! Everything outside `ble::{link, scanner, time_client}`, `ui::{display,
//! encoder}` and `time::EmbassyClock` is pure and tested on the host:
//!
//! ```text
//! cargo test
//! cargo build --release --features embedded --target thumbv7em-none-eabihf
//! ```

#![cfg_attr(not(test), no_std)]

pub mod ble;
pub mod config;
pub mod device;
pub mod error;
pub mod state;
pub mod time;
pub mod ui;

#[cfg(test)]
mod test_support;

pub use config::{BootConfig, TimerConfig};
pub use device::{CycleReport, Device};
pub use error::{ConnectError, Error, SyncError};
