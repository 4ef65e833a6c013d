//! Application-wide constants and compile-time configuration.
//!
//! All hardware pin assignments, timing parameters, and protocol
//! constants live here so they can be tuned in one place.

// Input cycle

/// Minimum period between two input cycles (ms).
///
/// The cycle compares the monotonic clock against its last run instead
/// of sleeping, so a slow caller coalesces ticks but never speeds them up.
pub const TICK_PERIOD_MS: u64 = 10;

/// Time a button level must stay stable before it is accepted (ms).
pub const BUTTON_ACTION_THRESHOLD_MS: u64 = 30;

/// Time a button must stay pressed before it is classified as held (ms).
pub const BUTTON_HOLD_THRESHOLD_MS: u64 = 300;

/// Pointer counts per degree of orientation change.
pub const POINTER_GAIN: f32 = 20.0;

/// HID usage sent while the encoder push switch is down (`Enter`).
pub const KEY_TRIGGER_USAGE: u8 = 0x28;

/// Modifier bits sent together with [`KEY_TRIGGER_USAGE`].
pub const KEY_TRIGGER_MODIFIERS: u8 = 0x00;

// BLE

/// Name advertised and exposed through the GAP device name characteristic.
pub const BLE_DEVICE_NAME: &str = "AirPointer";

/// GAP appearance: Generic HID, Mouse sub-category (0x03C2).
pub const BLE_APPEARANCE: u16 = 0x03C2;

/// Battery level reported by the Battery service (%).
///
/// The board has no fuel gauge, the value is static.
pub const BATTERY_LEVEL_PERCENT: u8 = 100;

/// Device Information service manufacturer string.
pub const MANUFACTURER_NAME: &str = "airpointer";

/// PnP ID: vendor ID source (0x02 = USB-IF), vendor, product, version.
pub const PNP_VENDOR_ID_SOURCE: u8 = 0x02;
pub const PNP_VENDOR_ID: u16 = 0xE502;
pub const PNP_PRODUCT_ID: u16 = 0xA111;
pub const PNP_PRODUCT_VERSION: u16 = 0x0210;

/// HID Information characteristic: bcdHID 1.11, country 0,
/// flags 0x02 (normally connectable).
pub const HID_INFO: [u8; 4] = [0x11, 0x01, 0x00, 0x02];

/// BLE connection interval range (in 1.25 ms units).
/// 6 = 7.5 ms (lowest latency for HID).
pub const BLE_CONN_INTERVAL_MIN: u16 = 6;
pub const BLE_CONN_INTERVAL_MAX: u16 = 12;

/// BLE slave latency (number of connection events the peripheral can skip).
pub const BLE_SLAVE_LATENCY: u16 = 0;

/// BLE supervision timeout (in 10 ms units). 400 = 4 s.
pub const BLE_SUP_TIMEOUT: u16 = 400;

/// Number of bonded hosts kept in RAM. Bonds do not survive a reset.
pub const MAX_BONDED_PEERS: usize = 2;

/// Depth of the tick-loop → BLE-task report queue.
pub const REPORT_QUEUE_DEPTH: usize = 8;

// Diagnostics

/// Status LED toggle period (ms).
pub const HEARTBEAT_PERIOD_MS: u64 = 200;

/// Log the SoftDevice die temperature every N heartbeats.
pub const TEMPERATURE_LOG_EVERY: u32 = 25;

// GPIO pin assignments (nRF52840-DK defaults)
//
// These are logical names; actual `embassy_nrf::peripherals::*` types are
// selected in `main.rs`.  Adjust for your custom PCB.
//
//   Left button       → P0.11  (active-low, pull-up)
//   Right button      → P0.12  (active-low, pull-up)
//   Encoder A (CLK)   → P0.24
//   Encoder B (DT)    → P0.25
//   Encoder switch    → P0.02  (active-low, pull-up)
//   I²C SDA (MPU-6050)→ P0.26
//   I²C SCL (MPU-6050)→ P0.27
//   Status LED        → P0.13
