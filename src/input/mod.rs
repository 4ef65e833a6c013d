//! Discrete inputs - push buttons, rotary encoder, key trigger.
//!
//! Every component here is polled: the input cycle hands it the current
//! timestamp and it reads its own pins through `embedded_hal`'s
//! [`InputPin`]. Debounce lives in these components; the pin driver
//! delivers raw levels.
//!
//! ## Components
//!
//! - **Button**: debounce + click/hold classification
//! - **RotaryEncoder**: rising-edge step detector on two channels
//! - **KeyTrigger**: raw press/release edges mapped to one keyboard key

pub mod button;
pub mod key;
pub mod rotary;

pub use button::{Button, ButtonConfig};
pub use key::KeyTrigger;
pub use rotary::{RotaryEdgeDetector, RotaryEncoder};

use embedded_hal::digital::InputPin;

/// Electrical level that means "pressed".
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActiveLevel {
    /// Pressed pulls the pin high (external pull-down).
    High,
    /// Pressed pulls the pin low (internal pull-up).
    Low,
}

impl ActiveLevel {
    /// Map a raw `is_high` reading to "active".
    pub fn is_active(self, high: bool) -> bool {
        match self {
            ActiveLevel::High => high,
            ActiveLevel::Low => !high,
        }
    }
}

/// Read a pin as "active" / "inactive". `None` if the driver failed.
pub(crate) fn read_active<P: InputPin>(pin: &mut P, level: ActiveLevel) -> Option<bool> {
    pin.is_high().ok().map(|high| level.is_active(high))
}
