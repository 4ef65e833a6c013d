//! Fakes shared by the integration tests.

#![allow(dead_code)]

use std::cell::Cell;
use std::collections::VecDeque;
use std::convert::Infallible;
use std::rc::Rc;

use airpointer::hid::ReportProfile;
use airpointer::{OrientationSample, OrientationSource, ReportTransport, TransportError};
use embedded_hal::digital::{ErrorType, InputPin};

/// Pin level shared with the test through cloned handles.
#[derive(Clone, Default)]
pub struct FakePin(Rc<Cell<bool>>);

impl FakePin {
    pub fn new(high: bool) -> Self {
        Self(Rc::new(Cell::new(high)))
    }

    pub fn set_high(&self) {
        self.0.set(true);
    }

    pub fn set_low(&self) {
        self.0.set(false);
    }
}

impl ErrorType for FakePin {
    type Error = Infallible;
}

impl InputPin for FakePin {
    fn is_high(&mut self) -> Result<bool, Infallible> {
        Ok(self.0.get())
    }

    fn is_low(&mut self) -> Result<bool, Infallible> {
        Ok(!self.0.get())
    }
}

/// Orientation source fed from the test; empty queue = no new sample.
#[derive(Clone, Default)]
pub struct ScriptedOrientation(Rc<std::cell::RefCell<VecDeque<OrientationSample>>>);

impl ScriptedOrientation {
    pub fn push(&self, yaw: f32, pitch: f32, roll: f32) {
        self.0
            .borrow_mut()
            .push_back(OrientationSample::new(yaw, pitch, roll));
    }
}

impl OrientationSource for ScriptedOrientation {
    fn poll(&mut self) -> Option<OrientationSample> {
        self.0.borrow_mut().pop_front()
    }
}

/// Everything the gate handed to the radio.
#[derive(Default)]
pub struct RecordingTransport {
    pub armed: bool,
    pub arm_changes: usize,
    pub reports: Vec<(ReportProfile, Vec<u8>)>,
}

impl RecordingTransport {
    pub fn mouse(&self) -> Vec<&[u8]> {
        self.of(ReportProfile::Mouse)
    }

    pub fn keyboard(&self) -> Vec<&[u8]> {
        self.of(ReportProfile::Keyboard)
    }

    fn of(&self, profile: ReportProfile) -> Vec<&[u8]> {
        self.reports
            .iter()
            .filter(|(p, _)| *p == profile)
            .map(|(_, bytes)| bytes.as_slice())
            .collect()
    }
}

impl ReportTransport for RecordingTransport {
    fn set_delivery(&mut self, enabled: bool) {
        self.armed = enabled;
        self.arm_changes += 1;
    }

    fn notify(&mut self, profile: ReportProfile, payload: &[u8]) -> Result<(), TransportError> {
        if !self.armed {
            return Err(TransportError::NotifyFailed);
        }
        assert_eq!(payload.len(), profile.report_len());
        self.reports.push((profile, payload.to_vec()));
        Ok(())
    }
}
