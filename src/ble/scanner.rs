//! BLE GAP scanner - finds a Current Time Service peer.
//!
//! Uses the SoftDevice Central-role scanning API. Advertisers are
//! filtered by the presence of the CTS UUID (0x1805) and the one with
//! the strongest signal wins.

use crate::ble::adv_parser::{advertises_current_time, extract_device_name};
use crate::ble::TimeServer;
use crate::config::BLE_SCAN_DURATION_SECS;
use crate::error::ConnectError;
use defmt::{info, warn};
use embassy_time::{with_timeout, Duration};
use nrf_softdevice::ble::{central, Address};
use nrf_softdevice::Softdevice;

/// Scan for `BLE_SCAN_DURATION_SECS` seconds and return the best time server.
pub async fn scan(sd: &Softdevice) -> Result<TimeServer, ConnectError> {
    info!("BLE scan starting ({} s window)", BLE_SCAN_DURATION_SECS);

    let config = central::ScanConfig {
        // Active scan to retrieve scan-response data (device names).
        active: true,
        ..Default::default()
    };

    let mut best: Option<TimeServer> = None;

    let result = with_timeout(
        Duration::from_secs(BLE_SCAN_DURATION_SECS),
        central::scan(sd, &config, |params| {
            let data = unsafe {
                core::slice::from_raw_parts(params.data.p_data, params.data.len as usize)
            };

            if advertises_current_time(data) {
                let found = TimeServer {
                    address: Address::from_raw(params.peer_addr),
                    name: extract_device_name(data),
                    rssi: params.rssi,
                };
                if best.as_ref().map_or(true, |b| found.rssi > b.rssi) {
                    info!("Found: {} (RSSI {})", found.name.as_str(), found.rssi);
                    best = Some(found);
                }
            }

            // Keep scanning until the window closes.
            None::<()>
        }),
    )
    .await;

    if let Ok(Err(_)) = result {
        warn!("BLE scan ended with error");
    }

    match best {
        Some(server) => {
            info!("BLE scan complete - using {}", server.name.as_str());
            Ok(server)
        }
        None => {
            warn!("BLE scan complete - no time server");
            Err(ConnectError::NoPeer)
        }
    }
}
