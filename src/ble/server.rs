//! GATT server: HID over GATT, Battery and Device Information.
//!
//! Built with the SoftDevice service builder rather than the derive
//! macros: the HID service carries two characteristics with the same
//! UUID (Report, 0x2A4D) told apart only by their Report Reference
//! descriptors.

use airpointer::config::{
    BATTERY_LEVEL_PERCENT, HID_INFO, MANUFACTURER_NAME, PNP_PRODUCT_ID, PNP_PRODUCT_VERSION,
    PNP_VENDOR_ID, PNP_VENDOR_ID_SOURCE,
};
use airpointer::error::BleError;
use airpointer::hid::descriptor::{REPORT_MAP, REPORT_TYPE_INPUT};
use airpointer::hid::{ReportProfile, MAX_REPORT_SIZE};
use defmt::{info, warn};
use nrf_softdevice::ble::gatt_server::builder::ServiceBuilder;
use nrf_softdevice::ble::gatt_server::characteristic::{Attribute, Metadata, Properties};
use nrf_softdevice::ble::gatt_server::{self, CharacteristicHandles, RegisterError, WriteOp};
use nrf_softdevice::ble::{Connection, SecurityMode, Uuid};
use nrf_softdevice::Softdevice;

const HID_SERVICE: Uuid = Uuid::new_16(0x1812);
const BATTERY_SERVICE: Uuid = Uuid::new_16(0x180F);
const DEVICE_INFO_SERVICE: Uuid = Uuid::new_16(0x180A);

const HID_INFORMATION: Uuid = Uuid::new_16(0x2A4A);
const HID_REPORT_MAP: Uuid = Uuid::new_16(0x2A4B);
const HID_CONTROL_POINT: Uuid = Uuid::new_16(0x2A4C);
const HID_REPORT: Uuid = Uuid::new_16(0x2A4D);
const HID_PROTOCOL_MODE: Uuid = Uuid::new_16(0x2A4E);
const HID_REPORT_REFERENCE: Uuid = Uuid::new_16(0x2908);
const BATTERY_LEVEL: Uuid = Uuid::new_16(0x2A19);
const MANUFACTURER_NAME_STRING: Uuid = Uuid::new_16(0x2A29);
const PNP_ID: Uuid = Uuid::new_16(0x2A50);

/// Report protocol (1); boot protocol is not supported.
const PROTOCOL_MODE_REPORT: u8 = 0x01;

pub struct HidService {
    mouse: CharacteristicHandles,
    keyboard: CharacteristicHandles,
    control_point: u16,
}

impl HidService {
    fn new(sd: &mut Softdevice) -> Result<Self, RegisterError> {
        let mut service = ServiceBuilder::new(sd, HID_SERVICE)?;

        service
            .add_characteristic(
                HID_INFORMATION,
                Attribute::new(HID_INFO).security(SecurityMode::JustWorks),
                Metadata::new(Properties::new().read()),
            )?
            .build();

        service
            .add_characteristic(
                HID_REPORT_MAP,
                Attribute::new(REPORT_MAP).security(SecurityMode::JustWorks),
                Metadata::new(Properties::new().read()),
            )?
            .build();

        let control_point = service
            .add_characteristic(
                HID_CONTROL_POINT,
                Attribute::new([0u8]).security(SecurityMode::JustWorks),
                Metadata::new(Properties::new().write_without_response()),
            )?
            .build();

        service
            .add_characteristic(
                HID_PROTOCOL_MODE,
                Attribute::new([PROTOCOL_MODE_REPORT]).security(SecurityMode::JustWorks),
                Metadata::new(Properties::new().read().write_without_response()),
            )?
            .build();

        let mouse = report_characteristic(&mut service, ReportProfile::Mouse)?;
        let keyboard = report_characteristic(&mut service, ReportProfile::Keyboard)?;

        let _ = service.build();

        Ok(Self {
            mouse,
            keyboard,
            control_point: control_point.value_handle,
        })
    }

    fn on_write(&self, handle: u16, data: &[u8]) {
        if handle == self.mouse.cccd_handle {
            info!("mouse report notifications: {}", cccd_enabled(data));
        } else if handle == self.keyboard.cccd_handle {
            info!("keyboard report notifications: {}", cccd_enabled(data));
        } else if handle == self.control_point {
            // 0 = suspend, 1 = exit suspend
            info!("HID control point: {=[u8]:x}", data);
        }
    }

    fn report_handle(&self, profile: ReportProfile) -> u16 {
        match profile {
            ReportProfile::Mouse => self.mouse.value_handle,
            ReportProfile::Keyboard => self.keyboard.value_handle,
        }
    }
}

/// Input Report characteristic for `profile`, tagged with its Report
/// Reference (report ID, input).
fn report_characteristic(
    service: &mut ServiceBuilder<'_>,
    profile: ReportProfile,
) -> Result<CharacteristicHandles, RegisterError> {
    let zeroed = [0u8; MAX_REPORT_SIZE];
    let mut report = service.add_characteristic(
        HID_REPORT,
        Attribute::new(&zeroed[..profile.report_len()]).security(SecurityMode::JustWorks),
        Metadata::new(Properties::new().read().notify()),
    )?;
    report.add_descriptor(
        HID_REPORT_REFERENCE,
        Attribute::new([profile.report_id(), REPORT_TYPE_INPUT]).security(SecurityMode::JustWorks),
    )?;
    Ok(report.build())
}

pub struct BatteryService {
    level: CharacteristicHandles,
}

impl BatteryService {
    fn new(sd: &mut Softdevice) -> Result<Self, RegisterError> {
        let mut service = ServiceBuilder::new(sd, BATTERY_SERVICE)?;
        let level = service
            .add_characteristic(
                BATTERY_LEVEL,
                Attribute::new([BATTERY_LEVEL_PERCENT]).security(SecurityMode::JustWorks),
                Metadata::new(Properties::new().read().notify()),
            )?
            .build();
        let _ = service.build();
        Ok(Self { level })
    }

    fn on_write(&self, handle: u16, data: &[u8]) {
        if handle == self.level.cccd_handle {
            info!("battery notifications: {}", cccd_enabled(data));
        }
    }
}

fn device_information(sd: &mut Softdevice) -> Result<(), RegisterError> {
    let mut service = ServiceBuilder::new(sd, DEVICE_INFO_SERVICE)?;

    service
        .add_characteristic(
            MANUFACTURER_NAME_STRING,
            Attribute::new(MANUFACTURER_NAME.as_bytes()),
            Metadata::new(Properties::new().read()),
        )?
        .build();

    let [vid_lo, vid_hi] = PNP_VENDOR_ID.to_le_bytes();
    let [pid_lo, pid_hi] = PNP_PRODUCT_ID.to_le_bytes();
    let [ver_lo, ver_hi] = PNP_PRODUCT_VERSION.to_le_bytes();
    service
        .add_characteristic(
            PNP_ID,
            Attribute::new([PNP_VENDOR_ID_SOURCE, vid_lo, vid_hi, pid_lo, pid_hi, ver_lo, ver_hi]),
            Metadata::new(Properties::new().read()),
        )?
        .build();

    let _ = service.build();
    Ok(())
}

fn cccd_enabled(data: &[u8]) -> bool {
    data.first().is_some_and(|b| b & 0x01 != 0)
}

pub struct Server {
    hid: HidService,
    battery: BatteryService,
}

impl Server {
    /// Register every service. Must run before the SoftDevice starts
    /// advertising.
    pub fn new(sd: &mut Softdevice) -> Result<Self, BleError> {
        let build = |sd: &mut Softdevice| -> Result<Self, RegisterError> {
            let hid = HidService::new(sd)?;
            let battery = BatteryService::new(sd)?;
            device_information(sd)?;
            Ok(Self { hid, battery })
        };

        build(sd).map_err(|e| {
            warn!("GATT registration failed: {}", e);
            BleError::ServerInit
        })
    }

    /// Notify one report on `conn`.
    pub fn notify_report(
        &self,
        conn: &Connection,
        profile: ReportProfile,
        payload: &[u8],
    ) -> Result<(), gatt_server::NotifyValueError> {
        gatt_server::notify_value(conn, self.hid.report_handle(profile), payload)
    }
}

impl gatt_server::Server for Server {
    type Event = ();

    fn on_write(
        &self,
        _conn: &Connection,
        handle: u16,
        _op: WriteOp,
        _offset: usize,
        data: &[u8],
    ) -> Option<Self::Event> {
        self.hid.on_write(handle, data);
        self.battery.on_write(handle, data);
        None
    }
}
