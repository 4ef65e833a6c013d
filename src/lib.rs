//! Host-testable core of the airpointer firmware.
//!
//! Everything that turns pin levels, orientation samples and connection
//! events into HID reports lives here, free of any radio or HAL types.
//! The embedded binary (`main.rs`, `embedded` feature) supplies the real
//! pins, the MPU-6050 orientation source and the BLE transport.
//!
//! Usage: `cargo test --lib` / `cargo test --test integration`

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod cycle;
pub mod error;
pub mod hid;
pub mod input;
pub mod link;
pub mod motion;

#[cfg(test)]
mod testing;

pub use cycle::{CycleConfig, InputCycle, InputPins, Tick};
pub use error::{Error, TransportError};
pub use hid::{encode_keyboard, encode_mouse, HidReport, ReportProfile};
pub use link::{ConnectionEvents, ConnectionGate, LinkEvent, LinkFlag, LinkState, ReportTransport};
pub use motion::{Narrowing, OrientationDeltaTracker, OrientationSample, OrientationSource, PointerConfig};
