//! HID report types and the fixed-layout report encoder.
//!
//! Both layouts are bit-exact wire formats the host parses against
//! [`descriptor::REPORT_MAP`]; changing them breaks every paired host.

pub mod descriptor;
pub mod keyboard;
pub mod mouse;

#[cfg(test)]
mod tests;

pub use keyboard::{KeyboardReport, KEYBOARD_REPORT_SIZE};
pub use mouse::{MouseButtons, MouseReport, MOUSE_REPORT_SIZE};

/// Largest payload of any profile.
pub const MAX_REPORT_SIZE: usize = KEYBOARD_REPORT_SIZE;

/// Which report channel a payload belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReportProfile {
    Mouse,
    Keyboard,
}

impl ReportProfile {
    /// Report ID declared for this profile in the report map.
    pub const fn report_id(self) -> u8 {
        match self {
            ReportProfile::Mouse => descriptor::MOUSE_REPORT_ID,
            ReportProfile::Keyboard => descriptor::KEYBOARD_REPORT_ID,
        }
    }

    /// Payload size in bytes.
    pub const fn report_len(self) -> usize {
        match self {
            ReportProfile::Mouse => MOUSE_REPORT_SIZE,
            ReportProfile::Keyboard => KEYBOARD_REPORT_SIZE,
        }
    }
}

/// A report of either profile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HidReport {
    Mouse(MouseReport),
    Keyboard(KeyboardReport),
}

impl HidReport {
    pub fn profile(&self) -> ReportProfile {
        match self {
            HidReport::Mouse(_) => ReportProfile::Mouse,
            HidReport::Keyboard(_) => ReportProfile::Keyboard,
        }
    }

    pub fn serialize(&self, buf: &mut [u8]) -> usize {
        match self {
            HidReport::Mouse(m) => m.serialize(buf),
            HidReport::Keyboard(k) => k.serialize(buf),
        }
    }
}

/// Encode a mouse report. Every argument is copied into its byte
/// verbatim; `buttons` is not masked to the five declared bits.
pub fn encode_mouse(buttons: u8, dx: i8, dy: i8, wheel: i8, pan: i8) -> [u8; MOUSE_REPORT_SIZE] {
    MouseReport::new(MouseButtons::from_bits_retain(buttons), dx, dy, wheel, pan).to_bytes()
}

/// Encode a single-key keyboard report.
pub fn encode_keyboard(modifier: u8, key: u8) -> [u8; KEYBOARD_REPORT_SIZE] {
    KeyboardReport::key_down(modifier, key).to_bytes()
}
