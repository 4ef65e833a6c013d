//! Momentary push button with debounce, click and hold classification.
//!
//! The state machine is driven purely by timestamps passed in by the
//! caller, so it is correct at any polling cadence:
//!
//! ```text
//! level change ──► debounce window restarts (last_action = now)
//! active ≥ action_threshold ──► pressed
//!     first accepted cycle        ──► clicked (one cycle only)
//!     pressed_duration ≥ hold_threshold ──► hold (until release)
//! inactive or still bouncing ──► pressed = clicked = hold = false
//! ```
//!
//! `clicked` and `hold` are never observed together, and
//! `pressed_duration_ms` is 0 whenever `pressed` is false.

use embedded_hal::digital::InputPin;

use super::{read_active, ActiveLevel};
use crate::config::{BUTTON_ACTION_THRESHOLD_MS, BUTTON_HOLD_THRESHOLD_MS};

/// Timing and polarity of one button.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonConfig {
    /// How long a level must persist before it counts (debounce, ms).
    pub action_threshold_ms: u64,
    /// How long a press must last before it counts as held (ms).
    pub hold_threshold_ms: u64,
    /// Which level means "pressed".
    pub active_level: ActiveLevel,
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self {
            action_threshold_ms: BUTTON_ACTION_THRESHOLD_MS,
            hold_threshold_ms: BUTTON_HOLD_THRESHOLD_MS,
            active_level: ActiveLevel::Low,
        }
    }
}

/// One physical switch and its classification state.
pub struct Button<P> {
    pin: P,
    config: ButtonConfig,
    /// Last raw level seen, `true` = active.
    level: bool,
    /// Timestamp of the last raw level change.
    last_action_ms: u64,
    pressed: bool,
    clicked: bool,
    hold: bool,
    pressed_duration_ms: u64,
}

impl<P: InputPin> Button<P> {
    pub fn new(pin: P, config: ButtonConfig) -> Self {
        Self {
            pin,
            config,
            level: false,
            last_action_ms: 0,
            pressed: false,
            clicked: false,
            hold: false,
            pressed_duration_ms: 0,
        }
    }

    /// Sample the pin once and advance the state machine to `now_ms`.
    ///
    /// A failed pin read counts as "level unchanged".
    pub fn update(&mut self, now_ms: u64) {
        let level = read_active(&mut self.pin, self.config.active_level).unwrap_or(self.level);
        self.apply(level, now_ms);
    }
}

impl<P> Button<P> {
    fn apply(&mut self, level: bool, now_ms: u64) {
        if level != self.level {
            self.level = level;
            self.last_action_ms = now_ms;
        }

        let stable_ms = now_ms.saturating_sub(self.last_action_ms);

        if level && stable_ms >= self.config.action_threshold_ms {
            if !self.hold && self.pressed && self.pressed_duration_ms >= self.config.hold_threshold_ms
            {
                self.hold = true;
            }

            if !self.pressed && !self.clicked {
                self.clicked = true;
                self.hold = false;
            } else if self.pressed && self.clicked {
                self.clicked = false;
            }

            self.pressed = true;
        } else {
            self.pressed = false;
            self.pressed_duration_ms = 0;
            self.hold = false;
            self.clicked = false;
        }

        if self.pressed {
            self.pressed_duration_ms = stable_ms;
        }
    }

    /// Forget the current click/hold classification.
    ///
    /// Raw level history and `pressed` are kept, so a press that is still
    /// down will not produce a second click; it can still become a hold.
    pub fn reset(&mut self) {
        self.clicked = false;
        self.hold = false;
        self.pressed_duration_ms = 0;
    }

    /// Debounced "is down".
    pub fn pressed(&self) -> bool {
        self.pressed
    }

    /// One-cycle pulse on the first accepted cycle of a press.
    pub fn clicked(&self) -> bool {
        self.clicked
    }

    /// Sustained press past the hold threshold.
    pub fn hold(&self) -> bool {
        self.hold
    }

    /// Time since the last level change while pressed, else 0.
    pub fn pressed_duration_ms(&self) -> u64 {
        self.pressed_duration_ms
    }

    /// Whether this button should light its bit in the report.
    pub fn engaged(&self) -> bool {
        self.clicked || self.hold
    }
}
