//! HID keyboard input report (boot protocol layout).
//!
//! Layout (8 bytes):
//! ```text
//! Byte 0: Modifier keys (bitfield)
//!         Bit 0 = Left Ctrl,  Bit 1 = Left Shift,
//!         Bit 2 = Left Alt,   Bit 3 = Left GUI,
//!         Bit 4 = Right Ctrl, Bit 5 = Right Shift,
//!         Bit 6 = Right Alt,  Bit 7 = Right GUI
//! Byte 1: Reserved (0x00)
//! Byte 2-7: Key code slots; only slot 0 is ever used (single-key rollover)
//! ```

/// Keyboard report size in bytes.
pub const KEYBOARD_REPORT_SIZE: usize = 8;

/// Boot-protocol keyboard report holding at most one key.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyboardReport {
    /// Modifier key bitfield.
    pub modifier: u8,
    /// Usage code of the pressed key, 0 for none.
    pub key: u8,
}

impl KeyboardReport {
    /// All keys released.
    pub const RELEASED: Self = Self {
        modifier: 0,
        key: 0,
    };

    /// A single key (plus modifiers) held down.
    pub const fn key_down(modifier: u8, key: u8) -> Self {
        Self { modifier, key }
    }

    /// Fixed wire layout: reserved byte and key slots 1..5 are always zero.
    pub fn to_bytes(&self) -> [u8; KEYBOARD_REPORT_SIZE] {
        [self.modifier, 0x00, self.key, 0x00, 0x00, 0x00, 0x00, 0x00]
    }

    /// Serialise into a byte slice for transmission.
    /// Returns the number of bytes written (always 8, or 0 if `buf` is short).
    pub fn serialize(&self, buf: &mut [u8]) -> usize {
        if buf.len() < KEYBOARD_REPORT_SIZE {
            return 0;
        }
        buf[..KEYBOARD_REPORT_SIZE].copy_from_slice(&self.to_bytes());
        KEYBOARD_REPORT_SIZE
    }

    /// Returns `true` if no key and no modifier is down.
    pub fn is_released(&self) -> bool {
        self.modifier == 0 && self.key == 0
    }
}
