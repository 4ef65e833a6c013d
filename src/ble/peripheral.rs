//! Advertising, bonding and the per-connection report pump.
//!
//! One host at a time. After a disconnect the task goes straight back to
//! advertising; the input cycle sees the link drop through [`LINK`].

use core::cell::RefCell;

use airpointer::config::{
    BLE_APPEARANCE, BLE_CONN_INTERVAL_MAX, BLE_CONN_INTERVAL_MIN, BLE_DEVICE_NAME,
    BLE_SLAVE_LATENCY, BLE_SUP_TIMEOUT, MAX_BONDED_PEERS,
};
use airpointer::error::BleError;
use airpointer::ConnectionEvents;
use defmt::{debug, info, warn};
use embassy_futures::select::{select, Either};
use embassy_time::{Duration, Timer};
use heapless::Vec;
use nrf_softdevice::ble::advertisement_builder::{
    AdvertisementDataType, Flag, LegacyAdvertisementBuilder, LegacyAdvertisementPayload,
    ServiceList, ServiceUuid16,
};
use nrf_softdevice::ble::security::{IoCapabilities, SecurityHandler};
use nrf_softdevice::ble::{
    gatt_server, peripheral, Connection, EncryptionInfo, IdentityKey, MasterId, SecurityMode,
};
use nrf_softdevice::{raw, Softdevice};
use static_cell::StaticCell;

use super::server::Server;
use super::{LINK, REPORTS};

const APPEARANCE: [u8; 2] = BLE_APPEARANCE.to_le_bytes();

static ADV_DATA: LegacyAdvertisementPayload = LegacyAdvertisementBuilder::new()
    .flags(&[Flag::GeneralDiscovery, Flag::LE_Only])
    .services_16(
        ServiceList::Incomplete,
        &[ServiceUuid16::HUMAN_INTERFACE_DEVICE, ServiceUuid16::BATTERY],
    )
    .raw(AdvertisementDataType::APPEARANCE, &APPEARANCE)
    .full_name(BLE_DEVICE_NAME)
    .build();

static SCAN_DATA: LegacyAdvertisementPayload = LegacyAdvertisementBuilder::new().build();

/// Room for the CCCDs of every notifying characteristic plus the
/// Service Changed state.
const SYS_ATTRS_LEN: usize = 62;

struct PeerBond {
    master_id: MasterId,
    key: EncryptionInfo,
    peer_id: IdentityKey,
    /// GATT system attributes (CCCD state) saved at the last disconnect.
    sys_attrs: Vec<u8, SYS_ATTRS_LEN>,
}

/// Just-works bonding with keys and CCCD state kept in RAM; the oldest
/// bond is evicted when the table is full.
struct Bonder {
    peers: RefCell<Vec<PeerBond, MAX_BONDED_PEERS>>,
}

impl Bonder {
    fn new() -> Self {
        Self {
            peers: RefCell::new(Vec::new()),
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
        info!("bonded with host");
        let mut peers = self.peers.borrow_mut();
        if let Some(existing) = peers.iter_mut().find(|p| p.master_id == master_id) {
            existing.key = key;
            existing.peer_id = peer_id;
            return;
        }

        if peers.is_full() {
            peers.remove(0);
        }

        let _ = peers.push(PeerBond {
            master_id,
            key,
            peer_id,
            sys_attrs: Vec::new(),
        });
    }

    fn get_key(&self, _conn: &Connection, master_id: MasterId) -> Option<EncryptionInfo> {
        self.peers
            .borrow()
            .iter()
            .find_map(|p| (p.master_id == master_id).then_some(p.key))
    }

    fn on_security_update(&self, _conn: &Connection, mode: SecurityMode) {
        info!("BLE security mode updated: {}", mode);
    }

    fn save_sys_attrs(&self, conn: &Connection) {
        let addr = conn.peer_address();
        let mut peers = self.peers.borrow_mut();
        let Some(peer) = peers.iter_mut().rev().find(|p| p.peer_id.is_match(addr)) else {
            return;
        };

        let mut buf = [0u8; SYS_ATTRS_LEN];
        match gatt_server::get_sys_attrs(conn, &mut buf) {
            Ok(len) => {
                peer.sys_attrs.clear();
                // len <= SYS_ATTRS_LEN, the SoftDevice never writes past buf.
                let _ = peer.sys_attrs.extend_from_slice(&buf[..len]);
                debug!("saved {} bytes of sys attrs", len);
            }
            Err(e) => warn!("sys attrs not saved: {}", e),
        }
    }

    fn load_sys_attrs(&self, conn: &Connection) {
        let addr = conn.peer_address();
        let peers = self.peers.borrow();
        let attrs = peers
            .iter()
            .rev()
            .find(|p| p.peer_id.is_match(addr))
            .map(|p| p.sys_attrs.as_slice())
            .filter(|a| !a.is_empty());

        // `None` resets every CCCD; an unknown host must enable them itself.
        if let Err(e) = gatt_server::set_sys_attrs(conn, attrs) {
            warn!("sys attrs not restored: {}", e);
        }
    }
}

fn bonder() -> &'static Bonder {
    static BONDER: StaticCell<Bonder> = StaticCell::new();
    BONDER.init(Bonder::new())
}

/// Apply the GAP appearance once the SoftDevice is enabled.
pub fn set_appearance() -> Result<(), BleError> {
    // SAFETY: plain SoftDevice call, no pointers involved.
    let ret = unsafe { raw::sd_ble_gap_appearance_set(BLE_APPEARANCE) };
    match ret {
        0 => Ok(()),
        code => Err(BleError::Raw(code)),
    }
}

/// Advertise, serve one host, repeat.
pub async fn peripheral_task(sd: &'static Softdevice, server: &'static Server) -> ! {
    let bonder = bonder();
    let config = peripheral::Config {
        interval: 50,
        ..Default::default()
    };

    loop {
        let adv = peripheral::ConnectableAdvertisement::ScannableUndirected {
            adv_data: &ADV_DATA,
            scan_data: &SCAN_DATA,
        };

        info!("advertising as \"{}\"", BLE_DEVICE_NAME);
        let conn = match peripheral::advertise_pairable(sd, adv, &config, bonder).await {
            Ok(conn) => conn,
            Err(e) => {
                warn!("advertising failed: {}", e);
                Timer::after(Duration::from_secs(1)).await;
                continue;
            }
        };

        info!("host connected");
        request_conn_params(&conn);
        LINK.on_connect();

        let gatt = gatt_server::run(&conn, server, |_| {});
        let pump = forward_reports(&conn, server);
        match select(gatt, pump).await {
            Either::First(e) => info!("host disconnected: {}", e),
            Either::Second(()) => info!("report pump stopped"),
        }

        LINK.on_disconnect();
    }
}

/// Drain the report queue into notifications on `conn`.
///
/// Returns once the connection is gone.
async fn forward_reports(conn: &Connection, server: &Server) {
    let mut failures: u32 = 0;
    loop {
        let report = REPORTS.receive().await;
        match server.notify_report(conn, report.profile, &report.payload) {
            Ok(()) => failures = 0,
            Err(gatt_server::NotifyValueError::Disconnected) => return,
            Err(e) => {
                // Typically the host has not enabled notifications yet.
                failures = failures.wrapping_add(1);
                if failures == 1 {
                    warn!("{} notify failed: {}", report.profile, e);
                }
            }
        }
    }
}

fn request_conn_params(conn: &Connection) {
    let params = raw::ble_gap_conn_params_t {
        min_conn_interval: BLE_CONN_INTERVAL_MIN,
        max_conn_interval: BLE_CONN_INTERVAL_MAX,
        slave_latency: BLE_SLAVE_LATENCY,
        conn_sup_timeout: BLE_SUP_TIMEOUT,
    };
    if let Err(e) = conn.set_conn_params(params) {
        warn!("connection parameter request failed: {}", e);
    }
}
