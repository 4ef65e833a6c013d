//! The periodic input cycle.
//!
//! One [`InputCycle`] owns every input component, the orientation source
//! and the connection gate. The firmware calls [`InputCycle::poll`] as
//! often as it likes with the current monotonic time; a tick only runs
//! once at least `period_ms` have passed since the previous one.
//!
//! ```text
//! poll(now) ─► period elapsed? ─► sync link ─► buttons ─► wheel ─► orientation
//!                                                                      │
//!                     keyboard report (on key edge) ◄── mouse report ◄─┘
//! ```
//!
//! All reads happen before the first send, so one tick's report fields
//! describe the same instant.

use embedded_hal::digital::InputPin;

use crate::config::{KEY_TRIGGER_MODIFIERS, KEY_TRIGGER_USAGE, TICK_PERIOD_MS};
use crate::hid::{KeyboardReport, MouseButtons, MouseReport, ReportProfile};
use crate::input::{ActiveLevel, Button, ButtonConfig, KeyTrigger, RotaryEncoder};
use crate::link::{ConnectionGate, LinkEvent, ReportTransport};
use crate::motion::{OrientationDeltaTracker, OrientationSource};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CycleConfig {
    /// Minimum time between two ticks (ms).
    pub period_ms: u64,
    /// Keyboard usage sent by the key trigger.
    pub key_usage: u8,
    /// Modifier bits sent with `key_usage`.
    pub key_modifiers: u8,
    /// Level the key switch reads while pressed.
    pub key_active_level: ActiveLevel,
}

impl Default for CycleConfig {
    fn default() -> Self {
        Self {
            period_ms: TICK_PERIOD_MS,
            key_usage: KEY_TRIGGER_USAGE,
            key_modifiers: KEY_TRIGGER_MODIFIERS,
            key_active_level: ActiveLevel::Low,
        }
    }
}

/// Pins the cycle reads, all of one type.
pub struct InputPins<P> {
    pub left: P,
    pub right: P,
    pub wheel_a: P,
    pub wheel_b: P,
    /// Raw key switch; `None` disables keyboard reports.
    pub key: Option<P>,
}

/// What one tick produced. Reports are built whether or not the link
/// was up to carry them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Tick {
    pub mouse: MouseReport,
    pub key: Option<KeyboardReport>,
    /// Link transition observed at the start of the tick.
    pub link: Option<LinkEvent>,
}

pub struct InputCycle<'a, P, O, T> {
    left: Button<P>,
    right: Button<P>,
    wheel: RotaryEncoder<P>,
    key: Option<KeyTrigger<P>>,
    tracker: OrientationDeltaTracker,
    source: O,
    gate: ConnectionGate<'a, T>,
    period_ms: u64,
    last_run_ms: Option<u64>,
}

impl<'a, P, O, T> InputCycle<'a, P, O, T>
where
    P: InputPin,
    O: OrientationSource,
    T: ReportTransport,
{
    /// `tracker` must already be seeded with a real sample.
    pub fn new(
        pins: InputPins<P>,
        config: CycleConfig,
        buttons: ButtonConfig,
        tracker: OrientationDeltaTracker,
        source: O,
        gate: ConnectionGate<'a, T>,
    ) -> Self {
        let key = pins.key.map(|pin| {
            KeyTrigger::new(pin, config.key_active_level, config.key_modifiers, config.key_usage)
        });

        Self {
            left: Button::new(pins.left, buttons),
            right: Button::new(pins.right, buttons),
            wheel: RotaryEncoder::new(pins.wheel_a, pins.wheel_b),
            key,
            tracker,
            source,
            gate,
            period_ms: config.period_ms,
            last_run_ms: None,
        }
    }

    /// Run one tick if the period has elapsed since the last one.
    ///
    /// Returns `None` when it is too early. Missed periods are not
    /// replayed: a late call runs a single tick.
    pub fn poll(&mut self, now_ms: u64) -> Option<Tick> {
        if let Some(last) = self.last_run_ms {
            if now_ms.saturating_sub(last) < self.period_ms {
                return None;
            }
        }
        self.last_run_ms = Some(now_ms);
        Some(self.tick(now_ms))
    }

    fn tick(&mut self, now_ms: u64) -> Tick {
        let link = self.gate.sync();

        self.left.update(now_ms);
        self.right.update(now_ms);
        if link == Some(LinkEvent::Connected) {
            // A press carried through pairing is not a fresh click.
            self.left.reset();
            self.right.reset();
        }

        let wheel = self.wheel.sample();
        let (dx, dy) = self.tracker.consume(self.source.poll());
        let key = self.key.as_mut().and_then(KeyTrigger::poll);

        let mut buttons = MouseButtons::empty();
        buttons.set(MouseButtons::LEFT, self.left.engaged());
        buttons.set(MouseButtons::RIGHT, self.right.engaged());

        let mouse = MouseReport::new(buttons, dx, dy, wheel, 0);
        self.gate.send(ReportProfile::Mouse, &mouse.to_bytes());
        if let Some(report) = key {
            self.gate.send(ReportProfile::Keyboard, &report.to_bytes());
        }

        Tick { mouse, key, link }
    }

    pub fn gate(&self) -> &ConnectionGate<'a, T> {
        &self.gate
    }

    pub fn tracker(&self) -> &OrientationDeltaTracker {
        &self.tracker
    }

    pub fn left(&self) -> &Button<P> {
        &self.left
    }

    pub fn right(&self) -> &Button<P> {
        &self.right
    }
}
