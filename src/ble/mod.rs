//! Bluetooth Low Energy subsystem.
//!
//! This module drives the Nordic SoftDevice S140 in **Peripheral** role:
//!
//! 1. **GATT server** - HID over GATT (two input reports), Battery and
//!    Device Information services.
//! 2. **Peripheral** - advertises, accepts one host at a time, bonds
//!    (RAM only) and re-advertises after every disconnect.
//! 3. **Transport** - the bounded report queue between the input cycle
//!    and the connection, plus the flag the input cycle gates on.
//!
//! The input cycle never touches SoftDevice types: it writes encoded
//! reports into [`REPORTS`] and reads [`LINK`]. The peripheral task is
//! the only writer of [`LINK`] and the only reader of [`REPORTS`].

pub mod peripheral;
pub mod server;
pub mod transport;

use airpointer::config::REPORT_QUEUE_DEPTH;
use airpointer::hid::{ReportProfile, MAX_REPORT_SIZE};
use airpointer::LinkFlag;
use defmt::Format;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use heapless::Vec;

/// One encoded report on its way to the radio.
#[derive(Clone, Format)]
pub struct Outbound {
    pub profile: ReportProfile,
    pub payload: Vec<u8, MAX_REPORT_SIZE>,
}

/// Input cycle → peripheral task.
pub static REPORTS: Channel<CriticalSectionRawMutex, Outbound, REPORT_QUEUE_DEPTH> = Channel::new();

/// Written on connect/disconnect by the peripheral task, read every tick.
pub static LINK: LinkFlag = LinkFlag::new();
