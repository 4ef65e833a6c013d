//! Raw key trigger: one switch mapped to one keyboard key.
//!
//! Unlike [`Button`](super::Button) there is no click/hold distinction.
//! The active edge sends key-down, the inactive edge sends key-up, and
//! nothing is sent while the level is steady.

use embedded_hal::digital::InputPin;

use super::{read_active, ActiveLevel};
use crate::hid::KeyboardReport;

pub struct KeyTrigger<P> {
    pin: P,
    active_level: ActiveLevel,
    modifier: u8,
    usage: u8,
    down: bool,
}

impl<P: InputPin> KeyTrigger<P> {
    pub fn new(pin: P, active_level: ActiveLevel, modifier: u8, usage: u8) -> Self {
        Self {
            pin,
            active_level,
            modifier,
            usage,
            down: false,
        }
    }

    /// Sample the switch; returns a report only on an edge.
    pub fn poll(&mut self) -> Option<KeyboardReport> {
        let active = read_active(&mut self.pin, self.active_level)?;
        if active == self.down {
            return None;
        }
        self.down = active;
        Some(if active {
            KeyboardReport::key_down(self.modifier, self.usage)
        } else {
            KeyboardReport::RELEASED
        })
    }

    pub fn is_down(&self) -> bool {
        self.down
    }
}
