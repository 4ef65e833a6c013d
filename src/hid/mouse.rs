//! HID mouse input report.
//!
//! Layout (5 bytes, report ID carried out of band by the transport):
//! ```text
//! Byte 0: Button bitfield
//!         Bit 0 = Left, Bit 1 = Right, Bit 2 = Middle,
//!         Bit 3 = Back, Bit 4 = Forward, Bits 5-7 = padding
//! Byte 1: X displacement       (signed, -127..127)
//! Byte 2: Y displacement       (signed, -127..127)
//! Byte 3: Vertical wheel       (signed, -127..127)
//! Byte 4: Horizontal wheel/pan (signed, -127..127)
//! ```

use bitflags::bitflags;

/// Mouse report size in bytes.
pub const MOUSE_REPORT_SIZE: usize = 5;

bitflags! {
    /// Mouse button bits, in report byte 0.
    ///
    /// Only the low five bits are declared in the report map; the upper
    /// three are constant padding.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub struct MouseButtons: u8 {
        /// Button 1 (left).
        const LEFT    = 0b0000_0001;
        /// Button 2 (right).
        const RIGHT   = 0b0000_0010;
        /// Button 3 (middle / wheel click).
        const MIDDLE  = 0b0000_0100;
        /// Button 4 (back).
        const BACK    = 0b0000_1000;
        /// Button 5 (forward).
        const FORWARD = 0b0001_0000;
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for MouseButtons {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "MouseButtons({=u8:#b})", self.bits())
    }
}

/// One snapshot of pointer state.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MouseReport {
    /// Pressed buttons.
    pub buttons: MouseButtons,
    /// Relative X movement.
    pub x: i8,
    /// Relative Y movement.
    pub y: i8,
    /// Vertical wheel delta.
    pub wheel: i8,
    /// Horizontal wheel (AC Pan) delta.
    pub pan: i8,
}

impl MouseReport {
    /// Build a report from already-narrowed fields.
    pub const fn new(buttons: MouseButtons, x: i8, y: i8, wheel: i8, pan: i8) -> Self {
        Self {
            buttons,
            x,
            y,
            wheel,
            pan,
        }
    }

    /// Fixed wire layout, positional copy of every field.
    pub fn to_bytes(&self) -> [u8; MOUSE_REPORT_SIZE] {
        [
            self.buttons.bits(),
            self.x as u8,
            self.y as u8,
            self.wheel as u8,
            self.pan as u8,
        ]
    }

    /// Serialise into a byte slice for transmission.
    /// Returns the number of bytes written (always 5, or 0 if `buf` is short).
    pub fn serialize(&self, buf: &mut [u8]) -> usize {
        if buf.len() < MOUSE_REPORT_SIZE {
            return 0;
        }
        buf[..MOUSE_REPORT_SIZE].copy_from_slice(&self.to_bytes());
        MOUSE_REPORT_SIZE
    }

    /// Returns `true` when no buttons are pressed and nothing moved.
    pub fn is_idle(&self) -> bool {
        self.buttons.is_empty() && self.x == 0 && self.y == 0 && self.wheel == 0 && self.pan == 0
    }
}
