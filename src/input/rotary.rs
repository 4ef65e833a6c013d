//! Rotary encoder step detection.
//!
//! One detent = one rising edge on channel A. Channel B's level at that
//! instant gives the direction. Anything else is "no step".

use embedded_hal::digital::InputPin;

/// Pure edge detector: remembers only the previous A level.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RotaryEdgeDetector {
    prev_a: bool,
}

impl RotaryEdgeDetector {
    pub const fn new(initial_a: bool) -> Self {
        Self { prev_a: initial_a }
    }

    /// Feed one sample of both channels, returns -1, 0 or +1.
    pub fn step(&mut self, a: bool, b: bool) -> i8 {
        let rising = !self.prev_a && a;
        self.prev_a = a;
        match (rising, b) {
            (false, _) => 0,
            (true, true) => 1,
            (true, false) => -1,
        }
    }
}

/// Two encoder channels sampled once per tick.
pub struct RotaryEncoder<P> {
    a: P,
    b: P,
    detector: RotaryEdgeDetector,
}

impl<P: InputPin> RotaryEncoder<P> {
    /// Seeds the detector with channel A's current level so a resting
    /// high A does not read as a step on the first tick.
    pub fn new(mut a: P, b: P) -> Self {
        let initial_a = a.is_high().unwrap_or(false);
        Self {
            a,
            b,
            detector: RotaryEdgeDetector::new(initial_a),
        }
    }

    /// Wheel delta for this tick. A failed read on either channel is
    /// "no step" and leaves the edge history untouched.
    pub fn sample(&mut self) -> i8 {
        match (self.a.is_high(), self.b.is_high()) {
            (Ok(a), Ok(b)) => self.detector.step(a, b),
            _ => 0,
        }
    }
}
