//! Integration tests for the airpointer input pipeline.
//!
//! Drives a whole [`InputCycle`] through fake pins, a scripted
//! orientation source and a recording transport.

mod common;

use airpointer::hid::{encode_keyboard, encode_mouse, MouseButtons};
use airpointer::input::ButtonConfig;
use airpointer::{
    ConnectionEvents, ConnectionGate, CycleConfig, InputCycle, InputPins, LinkEvent, LinkFlag,
    LinkState, OrientationDeltaTracker, OrientationSample, PointerConfig, Tick,
};
use common::{FakePin, RecordingTransport, ScriptedOrientation};

type Cycle<'a> = InputCycle<'a, FakePin, ScriptedOrientation, RecordingTransport>;

/// Resting hardware: buttons and key switch pulled up, encoder at rest.
struct Device {
    left: FakePin,
    right: FakePin,
    wheel_a: FakePin,
    wheel_b: FakePin,
    key: FakePin,
    imu: ScriptedOrientation,
}

impl Device {
    fn new() -> Self {
        Self {
            left: FakePin::new(true),
            right: FakePin::new(true),
            wheel_a: FakePin::new(false),
            wheel_b: FakePin::new(false),
            key: FakePin::new(true),
            imu: ScriptedOrientation::default(),
        }
    }

    fn cycle<'a>(&self, link: &'a LinkFlag) -> Cycle<'a> {
        InputCycle::new(
            InputPins {
                left: self.left.clone(),
                right: self.right.clone(),
                wheel_a: self.wheel_a.clone(),
                wheel_b: self.wheel_b.clone(),
                key: Some(self.key.clone()),
            },
            CycleConfig::default(),
            ButtonConfig::default(),
            OrientationDeltaTracker::new(OrientationSample::default(), PointerConfig::default()),
            self.imu.clone(),
            ConnectionGate::new(link, RecordingTransport::default()),
        )
    }
}

/// Advance exactly one period.
fn step(cycle: &mut Cycle<'_>, now: &mut u64) -> Tick {
    let t = *now;
    *now += 10;
    cycle.poll(t).expect("ticks are a full period apart")
}

// ═══════════════════════════════════════════════════════════════════════════
// Report encoding
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn mouse_encoding_is_positional() {
    assert_eq!(encode_mouse(0b00001, 3, -3, 0, 0), [0x01, 0x03, 0xFD, 0x00, 0x00]);
    assert_eq!(encode_mouse(0b00010, -128, 127, -1, 1), [0x02, 0x80, 0x7F, 0xFF, 0x01]);
}

#[test]
fn keyboard_encoding_layout() {
    assert_eq!(encode_keyboard(0x02, 0x04), [0x02, 0x00, 0x04, 0, 0, 0, 0, 0]);
}

// ═══════════════════════════════════════════════════════════════════════════
// Whole cycle
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn idle_device_turning_right_moves_pointer() {
    let device = Device::new();
    let link = LinkFlag::new();
    link.on_connect();
    let mut cycle = device.cycle(&link);

    device.imu.push(0.05, 0.0, 0.0);
    let tick = cycle.poll(0).expect("first poll always ticks");
    assert_eq!(tick.mouse.buttons, MouseButtons::empty());
    assert_ne!(tick.mouse.x, 0);
    assert_eq!(tick.mouse.y, 0);
    assert_eq!(tick.mouse.wheel, 0);

    // No new sample: still one report per tick, now without movement.
    for t in [10, 20, 30] {
        cycle.poll(t).expect("period elapsed");
    }

    let sent = cycle.gate().transport().mouse();
    assert_eq!(sent.len(), 4);
    assert_eq!(sent[0], [0x00, 57, 0x00, 0x00, 0x00]);
    assert!(sent[1..].iter().all(|r| *r == [0u8; 5]));
}

#[test]
fn polling_faster_than_the_period_does_not_add_reports() {
    let device = Device::new();
    let link = LinkFlag::new();
    link.on_connect();
    let mut cycle = device.cycle(&link);

    for t in 0..100 {
        cycle.poll(t);
    }
    assert_eq!(cycle.gate().transport().mouse().len(), 10);
}

#[test]
fn reports_only_flow_while_connected() {
    let device = Device::new();
    let link = LinkFlag::new();
    let mut cycle = device.cycle(&link);

    cycle.poll(0);
    cycle.poll(10);
    assert!(cycle.gate().transport().reports.is_empty());
    assert_eq!(cycle.gate().state(), LinkState::Disconnected);

    link.on_connect();
    assert_eq!(cycle.poll(20).unwrap().link, Some(LinkEvent::Connected));
    assert_eq!(cycle.gate().transport().mouse().len(), 1);
    assert!(cycle.gate().transport().armed);

    link.on_disconnect();
    assert_eq!(cycle.poll(30).unwrap().link, Some(LinkEvent::Disconnected));
    cycle.poll(40);
    assert_eq!(cycle.gate().transport().mouse().len(), 1);
    assert!(!cycle.gate().transport().armed);

    // disarm at construction, arm, disarm
    assert_eq!(cycle.gate().transport().arm_changes, 3);
}

#[test]
fn click_hold_scroll_and_key_in_one_session() {
    let device = Device::new();
    let link = LinkFlag::new();
    link.on_connect();
    let mut cycle = device.cycle(&link);
    let mut now = 0;

    step(&mut cycle, &mut now);

    // Left click: pressed at 10, accepted 30 ms later for one tick.
    device.left.set_low();
    let masks: Vec<u8> = (0..5).map(|_| step(&mut cycle, &mut now).mouse.buttons.bits()).collect();
    assert_eq!(masks, [0, 0, 0, 0x01, 0]);
    device.left.set_high();
    step(&mut cycle, &mut now);

    // Right hold: bit set once held past the threshold, until release.
    device.right.set_low();
    let mut right_ticks = 0;
    for _ in 0..40 {
        if step(&mut cycle, &mut now).mouse.buttons.contains(MouseButtons::RIGHT) {
            right_ticks += 1;
        }
    }
    assert!(cycle.right().hold());
    // one click tick plus the held tail
    assert!(right_ticks >= 2 && right_ticks < 40);
    device.right.set_high();
    assert!(step(&mut cycle, &mut now).mouse.buttons.is_empty());

    // One detent up.
    device.wheel_b.set_high();
    device.wheel_a.set_high();
    assert_eq!(step(&mut cycle, &mut now).mouse.wheel, 1);
    assert_eq!(step(&mut cycle, &mut now).mouse.wheel, 0);

    // Encoder push: key down then key up, nothing in between.
    device.key.set_low();
    step(&mut cycle, &mut now);
    step(&mut cycle, &mut now);
    device.key.set_high();
    step(&mut cycle, &mut now);

    let keyboard = cycle.gate().transport().keyboard();
    assert_eq!(keyboard.len(), 2);
    assert_eq!(keyboard[0], [0x00, 0x00, 0x28, 0, 0, 0, 0, 0]);
    assert_eq!(keyboard[1], [0u8; 8]);
}

#[test]
fn reconnect_does_not_replay_a_held_press_as_click() {
    let device = Device::new();
    let link = LinkFlag::new();
    let mut cycle = device.cycle(&link);

    device.left.set_low();
    for t in (0..=40).step_by(10) {
        cycle.poll(t);
    }
    assert!(cycle.left().pressed());

    link.on_connect();
    for t in (50..=200).step_by(10) {
        cycle.poll(t);
    }
    let sent = cycle.gate().transport().mouse();
    assert!(!sent.is_empty());
    assert!(sent.iter().all(|r| r[0] & MouseButtons::LEFT.bits() == 0));
}
