//! MPU-6050 orientation source.
//!
//! The sensor's DMP fuses gyro and accelerometer on-chip and pushes one
//! 28-byte packet per sample into its FIFO (100 Hz with divider 9). The
//! first 16 bytes are the orientation quaternion; we turn that into
//! yaw/pitch/roll for the pointer tracker.
//!
//! Reads are blocking I²C transfers of one packet, short enough to run
//! inside the input cycle.

use airpointer::error::ImuError;
use airpointer::{OrientationSample, OrientationSource};
use defmt::{info, warn};
use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use mpu6050_dmp::accel::AccelFullScale;
use mpu6050_dmp::address::Address;
use mpu6050_dmp::calibration::{CalibrationParameters, ReferenceGravity};
use mpu6050_dmp::gyro::GyroFullScale;
use mpu6050_dmp::quaternion::Quaternion;
use mpu6050_dmp::sensor::Mpu6050;
use mpu6050_dmp::yaw_pitch_roll::YawPitchRoll;

/// DMP FIFO packet size.
const PACKET_LEN: usize = 28;

/// 1 kHz / (1 + 9) = 100 Hz.
const SAMPLE_RATE_DIVIDER: u8 = 9;

pub struct DmpOrientation<I> {
    sensor: Mpu6050<I>,
    packet: [u8; PACKET_LEN],
    read_errors: u32,
}

impl<I: I2c> DmpOrientation<I> {
    /// Load the DMP firmware, calibrate (device must lie still, face up)
    /// and start the FIFO.
    pub fn init(i2c: I, delay: &mut impl DelayNs) -> Result<Self, ImuError> {
        let mut sensor = Mpu6050::new(i2c, Address::default()).map_err(|_| ImuError::Init)?;

        info!("imu: loading DMP firmware");
        sensor.initialize_dmp(delay).map_err(|_| ImuError::Init)?;

        info!("imu: calibrating, keep the device still");
        let params = CalibrationParameters::new(
            AccelFullScale::G2,
            GyroFullScale::Deg2000,
            ReferenceGravity::ZN,
        );
        sensor
            .calibrate(delay, &params)
            .map_err(|_| ImuError::Calibration)?;

        sensor
            .set_sample_rate_divider(SAMPLE_RATE_DIVIDER)
            .map_err(|_| ImuError::Configure)?;
        sensor.enable_fifo().map_err(|_| ImuError::Configure)?;
        info!("imu: ready");

        Ok(Self {
            sensor,
            packet: [0; PACKET_LEN],
            read_errors: 0,
        })
    }

    /// Read every complete packet in the FIFO and keep the newest.
    fn drain(&mut self) -> Option<Quaternion> {
        let available = match self.sensor.get_fifo_count() {
            Ok(count) => count,
            Err(_) => {
                self.read_error();
                return None;
            }
        };

        let mut latest = None;
        for _ in 0..available / PACKET_LEN {
            let data = match self.sensor.read_fifo(&mut self.packet) {
                Ok(data) => data,
                Err(_) => {
                    self.read_error();
                    break;
                }
            };
            if let Some(quat) = Quaternion::from_bytes(&data[..16]) {
                latest = Some(quat.normalize());
            }
        }
        latest
    }

    fn read_error(&mut self) {
        self.read_errors = self.read_errors.wrapping_add(1);
        if self.read_errors % 100 == 1 {
            warn!("imu: FIFO read failed ({} so far)", self.read_errors);
        }
    }
}

impl<I: I2c> OrientationSource for DmpOrientation<I> {
    fn poll(&mut self) -> Option<OrientationSample> {
        let ypr = YawPitchRoll::from(self.drain()?);
        Some(OrientationSample::new(ypr.yaw, ypr.pitch, ypr.roll))
    }
}
