//! Bluetooth Low Energy time source.
//!
//! This module drives the Nordic SoftDevice S140 in **Central** role to
//! get one authoritative time sample at boot:
//!
//! 1. **Scanner** - finds a peer advertising the Current Time Service.
//! 2. **Link** - connects and secures the link; implements the
//!    connectivity and network time traits.
//! 3. **Time client** - GATT discovery and reads of the CTS values.
//!
//! Advertisement parsing and CTS payload decoding are pure and always
//! compiled; the radio parts need the `embedded` feature.

pub mod adv_parser;
pub mod cts;
#[cfg(feature = "embedded")]
pub mod link;
#[cfg(feature = "embedded")]
pub mod scanner;
#[cfg(feature = "embedded")]
pub mod time_client;

/// A peripheral advertising the Current Time Service.
#[cfg(feature = "embedded")]
#[derive(Clone, defmt::Format)]
pub struct TimeServer {
    /// BLE address.
    pub address: nrf_softdevice::ble::Address,
    /// Human-readable name (truncated to 32 bytes for `heapless::String`).
    pub name: heapless::String<32>,
    /// Received Signal Strength Indicator (dBm).
    pub rssi: i8,
}
