//! Orientation → pointer movement.
//!
//! The sensor delivers absolute yaw/pitch/roll in radians. Pointer
//! movement is the change since the last consumed sample:
//!
//! ```text
//! dx =  (yaw  - last.yaw)  · 180/π · gain
//! dy = -(roll - last.roll) · 180/π · gain
//! ```
//!
//! Pitch is not used. Results are rounded to the nearest count and then
//! narrowed to the report's signed byte by the configured [`Narrowing`].

use core::f32::consts::PI;

use micromath::F32Ext;

use crate::config::POINTER_GAIN;

const RAD_TO_DEG: f32 = 180.0 / PI;

/// Yaw/pitch/roll triple in radians, gravity corrected by the sensor.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OrientationSample {
    pub yaw: f32,
    pub pitch: f32,
    pub roll: f32,
}

impl OrientationSample {
    pub const fn new(yaw: f32, pitch: f32, roll: f32) -> Self {
        Self { yaw, pitch, roll }
    }
}

/// Anything that produces fused orientation samples on demand.
pub trait OrientationSource {
    /// `Some` when a sample arrived since the last call.
    fn poll(&mut self) -> Option<OrientationSample>;
}

/// How an out-of-range delta is squeezed into an `i8` report field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Narrowing {
    /// Keep the low byte (two's complement truncation).
    #[default]
    Wrap,
    /// Clamp to -127..=127, the report map's logical range.
    Saturate,
}

impl Narrowing {
    pub fn narrow(self, value: i32) -> i8 {
        match self {
            Narrowing::Wrap => value as i8,
            Narrowing::Saturate => value.clamp(-127, 127) as i8,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PointerConfig {
    /// Pointer counts per degree.
    pub gain: f32,
    pub narrowing: Narrowing,
}

impl Default for PointerConfig {
    fn default() -> Self {
        Self {
            gain: POINTER_GAIN,
            narrowing: Narrowing::Wrap,
        }
    }
}

/// Holds the last consumed sample and turns new ones into deltas.
#[derive(Clone, Copy, Debug)]
pub struct OrientationDeltaTracker {
    last: OrientationSample,
    config: PointerConfig,
}

impl OrientationDeltaTracker {
    /// The tracker always starts from a real sample, never a zero triple.
    pub fn new(seed: OrientationSample, config: PointerConfig) -> Self {
        Self { last: seed, config }
    }

    /// Pointer delta for this tick. `None` means no new sample: the
    /// result is `(0, 0)` and the baseline stays put.
    pub fn consume(&mut self, sample: Option<OrientationSample>) -> (i8, i8) {
        let Some(sample) = sample else {
            return (0, 0);
        };

        let dx = (sample.yaw - self.last.yaw) * RAD_TO_DEG * self.config.gain;
        let dy = -(sample.roll - self.last.roll) * RAD_TO_DEG * self.config.gain;
        self.last = sample;

        (self.narrow(dx), self.narrow(dy))
    }

    fn narrow(&self, counts: f32) -> i8 {
        // f32 → i32 saturates (NaN → 0); the i32 → i8 step is the policy.
        self.config.narrowing.narrow(F32Ext::round(counts) as i32)
    }

    pub fn last(&self) -> OrientationSample {
        self.last
    }
}
