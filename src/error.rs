//! Unified error type for airpointer.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! Implements `defmt::Format` for efficient on-target logging.
//!
//! The input pipeline itself is total: nothing here is raised by button,
//! encoder, orientation or encoding logic. Errors come from the
//! collaborators (radio, sensor) and from the report transport.

/// Top-level error type used across the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    // BLE
    /// The SoftDevice returned a BLE-level error.
    Ble(BleError),

    // Orientation sensor
    /// MPU-6050 bring-up failed.
    Imu(ImuError),

    // Reports
    /// A report could not be handed to the radio.
    Transport(TransportError),
}

/// Subset of BLE errors we propagate (keeps the enum `Copy`-friendly).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BleError {
    /// GAP / GATT raw error code from the SoftDevice.
    Raw(u32),
    /// GATT server registration failed.
    ServerInit,
}

/// Sensor bring-up stage that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ImuError {
    /// Sensor not found on I²C, or DMP firmware upload failed.
    Init,
    /// Offset calibration failed.
    Calibration,
    /// Sample rate or FIFO configuration failed.
    Configure,
}

/// Why a report did not reach the radio.
///
/// Never fatal: the gate logs it and the next tick sends fresh state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportError {
    /// The outbound report queue is full; the report was dropped.
    QueueFull,
    /// The radio rejected the notification.
    NotifyFailed,
    /// Payload length does not match the profile's report size.
    PayloadSize,
}

// Convenience conversions

impl From<BleError> for Error {
    fn from(e: BleError) -> Self {
        Error::Ble(e)
    }
}

impl From<ImuError> for Error {
    fn from(e: ImuError) -> Self {
        Error::Imu(e)
    }
}

impl From<TransportError> for Error {
    fn from(e: TransportError) -> Self {
        Error::Transport(e)
    }
}
