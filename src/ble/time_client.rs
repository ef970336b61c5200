//! BLE GATT client for the Current Time Service.
//!
//! After the link is up this discovers the service (0x1805), reads the
//! Current Time (0x2A2B) and Local Time Information (0x2A0F) values and
//! hands both to [`cts::decode`].

use crate::ble::cts;
use crate::error::SyncError;
use crate::time::UtcInstant;
use defmt::{info, warn};
use nrf_softdevice::ble::{gatt_client, Connection};

/// nrf-softdevice GATT client struct for the Current Time Service.
#[nrf_softdevice::gatt_client(uuid = "1805")]
pub struct CurrentTimeServiceClient {
    /// Peer's local date and time.
    #[characteristic(uuid = "2a2b", read)]
    pub current_time: [u8; 10],

    /// Zone and DST offset of the peer's local time.
    #[characteristic(uuid = "2a0f", read)]
    pub local_time_info: [u8; 2],
}

/// Discover the service and read one UTC sample.
pub async fn read_utc(conn: &Connection) -> Result<UtcInstant, SyncError> {
    info!("Discovering Current Time Service...");

    let client: CurrentTimeServiceClient = gatt_client::discover(conn).await.map_err(|_| {
        warn!("Current Time Service not found");
        SyncError::Unreachable
    })?;

    let local_time_info = client.local_time_info_read().await.map_err(|_| {
        warn!("Could not read local time information");
        SyncError::Unreachable
    })?;

    let current_time = client.current_time_read().await.map_err(|_| {
        warn!("Could not read current time");
        SyncError::Unreachable
    })?;

    let utc = cts::decode(&current_time, &local_time_info).map_err(|e| {
        warn!("Peer sent an unusable time: {=[u8]:x}", &current_time[..]);
        e
    })?;

    info!("Peer time: {} s since epoch (UTC)", utc.unix_seconds());
    Ok(utc)
}
