//! BLE link to a time server, used once at boot.
//!
//! Connects with bonding-capable Just Works security so phones that
//! only expose CTS to encrypted links still answer.

use core::cell::RefCell;

use crate::ble::{scanner, time_client};
use crate::config;
use crate::error::{ConnectError, SyncError};
use crate::time::sync::{ConnectivityProvider, NetworkTimeSource};
use crate::time::UtcInstant;
use defmt::{info, warn};
use embassy_time::{with_timeout, Duration, Timer};
use nrf_softdevice::ble::security::{IoCapabilities, SecurityHandler};
use nrf_softdevice::ble::{
    central, Address, Connection, EncryptError, EncryptionInfo, IdentityKey, MasterId, SecurityMode,
};
use nrf_softdevice::raw;
use nrf_softdevice::Softdevice;
use static_cell::StaticCell;

/// Keys of the peer bonded with during this boot. Lost on reset.
struct TimeServerBond {
    master_id: MasterId,
    key: EncryptionInfo,
    peer_id: IdentityKey,
}

/// Just Works security handler remembering at most one bond, enough to
/// re-encrypt if the boot retry loop reconnects to the same server.
pub struct Bonder {
    bond: RefCell<Option<TimeServerBond>>,
}

impl Bonder {
    fn new() -> Self {
        Self {
            bond: RefCell::new(None),
        }
    }
}

impl SecurityHandler for Bonder {
    fn io_capabilities(&self) -> IoCapabilities {
        IoCapabilities::None
    }

    fn can_bond(&self, _conn: &Connection) -> bool {
        true
    }

    fn on_bonded(
        &self,
        _conn: &Connection,
        master_id: MasterId,
        key: EncryptionInfo,
        peer_id: IdentityKey,
    ) {
        info!("bonded with time server");
        *self.bond.borrow_mut() = Some(TimeServerBond {
            master_id,
            key,
            peer_id,
        });
    }

    fn get_key(&self, _conn: &Connection, master_id: MasterId) -> Option<EncryptionInfo> {
        self.bond
            .borrow()
            .as_ref()
            .filter(|bond| bond.master_id == master_id)
            .map(|bond| bond.key)
    }

    fn get_peripheral_key(&self, conn: &Connection) -> Option<(MasterId, EncryptionInfo)> {
        self.bond
            .borrow()
            .as_ref()
            .filter(|bond| bond.peer_id.is_match(conn.peer_address()))
            .map(|bond| (bond.master_id, bond.key))
    }

    fn on_security_update(&self, _conn: &Connection, mode: SecurityMode) {
        info!("BLE security mode updated: {}", mode);
    }
}

/// The security handler singleton. Call once.
pub fn bonder() -> &'static Bonder {
    static BONDER: StaticCell<Bonder> = StaticCell::new();
    BONDER.init(Bonder::new())
}

pub struct BleTimeLink {
    sd: &'static Softdevice,
    bonder: &'static Bonder,
    conn: Option<Connection>,
}

impl BleTimeLink {
    pub fn new(sd: &'static Softdevice, bonder: &'static Bonder) -> Self {
        Self {
            sd,
            bonder,
            conn: None,
        }
    }

    /// Drop the link. The clock keeps running on its anchor.
    pub fn disconnect(&mut self) {
        if let Some(conn) = self.conn.take() {
            let _ = conn.disconnect();
            info!("BLE link closed");
        }
    }

    async fn connect_secure(&self, address: &Address) -> Result<Connection, ConnectError> {
        let whitelist = [address];
        let conn_cfg = central::ConnectConfig {
            scan_config: central::ScanConfig {
                whitelist: Some(&whitelist),
                ..Default::default()
            },
            conn_params: raw::ble_gap_conn_params_t {
                min_conn_interval: config::BLE_CONN_INTERVAL_MIN,
                max_conn_interval: config::BLE_CONN_INTERVAL_MAX,
                slave_latency: config::BLE_SLAVE_LATENCY,
                conn_sup_timeout: config::BLE_SUP_TIMEOUT,
            },
            ..Default::default()
        };

        let conn = with_timeout(
            Duration::from_millis(config::BLE_CONNECT_TIMEOUT_MS),
            central::connect_with_security(self.sd, &conn_cfg, self.bonder),
        )
        .await
        .map_err(|_| ConnectError::Timeout)?
        .map_err(|_| ConnectError::LinkFailed)?;

        // Known peers re-encrypt with the stored key, new ones pair first.
        let started = match conn.encrypt() {
            Ok(()) => true,
            Err(EncryptError::PeerKeysNotFound) => conn.request_pairing().is_ok(),
            Err(_) => false,
        };
        let secure_ok = started && link_encrypted(&conn).await;

        if !secure_ok {
            warn!("failed to secure BLE link");
            let _ = conn.disconnect();
            return Err(ConnectError::Insecure);
        }

        Ok(conn)
    }
}

impl ConnectivityProvider for BleTimeLink {
    fn is_up(&self) -> bool {
        self.conn.as_ref().is_some_and(|c| c.handle().is_some())
    }

    async fn connect(&mut self) -> Result<(), ConnectError> {
        let server = scanner::scan(self.sd).await?;
        info!("connecting to {}", server.name.as_str());
        let conn = self.connect_secure(&server.address).await?;
        self.conn = Some(conn);
        Ok(())
    }
}

impl NetworkTimeSource for BleTimeLink {
    async fn fetch(&mut self) -> Result<UtcInstant, SyncError> {
        let conn = self.conn.as_ref().ok_or(SyncError::Unreachable)?;
        with_timeout(
            Duration::from_millis(config::BLE_TIME_READ_TIMEOUT_MS),
            time_client::read_utc(conn),
        )
        .await
        .map_err(|_| {
            warn!("time read timed out");
            SyncError::Unreachable
        })?
    }
}

/// Waits for the peer to finish encrypting, bounded by `BLE_ENCRYPT_TIMEOUT_MS`.
async fn link_encrypted(conn: &Connection) -> bool {
    let encrypted = async {
        while matches!(conn.security_mode(), SecurityMode::NoAccess | SecurityMode::Open) {
            Timer::after(Duration::from_millis(100)).await;
        }
    };
    with_timeout(Duration::from_millis(config::BLE_ENCRYPT_TIMEOUT_MS), encrypted)
        .await
        .is_ok()
}
