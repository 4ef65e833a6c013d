//! Unit tests for HID report encoding.
//!
//! These tests run on the host (not embedded) and pin the exact byte
//! layouts the host parses.

use super::descriptor::{KEYBOARD_REPORT_ID, MOUSE_REPORT_ID, REPORT_MAP, REPORT_MAP_LEN};
use super::keyboard::KeyboardReport;
use super::mouse::{MouseButtons, MouseReport};
use super::{encode_keyboard, encode_mouse, HidReport, ReportProfile, MAX_REPORT_SIZE};

// ═══════════════════════════════════════════════════════════════════════════
// Mouse Report Tests
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn mouse_encode_left_click_with_motion() {
    let bytes = encode_mouse(0b00001, 3, -3, 0, 0);
    assert_eq!(bytes, [0x01, 0x03, 0xFD, 0x00, 0x00]);
}

#[test]
fn mouse_encode_is_positional() {
    let bytes = encode_mouse(0b10010, -128, 127, -1, 1);
    assert_eq!(bytes, [0x12, 0x80, 0x7F, 0xFF, 0x01]);
}

#[test]
fn mouse_encode_keeps_padding_bits() {
    // No validation beyond width: upper bits pass through untouched.
    let bytes = encode_mouse(0xFF, 0, 0, 0, 0);
    assert_eq!(bytes[0], 0xFF);
}

#[test]
fn mouse_button_bits_match_report_map() {
    assert_eq!(MouseButtons::LEFT.bits(), 0x01);
    assert_eq!(MouseButtons::RIGHT.bits(), 0x02);
    assert_eq!(MouseButtons::MIDDLE.bits(), 0x04);
    assert_eq!(MouseButtons::BACK.bits(), 0x08);
    assert_eq!(MouseButtons::FORWARD.bits(), 0x10);
    assert_eq!(MouseButtons::all().bits(), 0b1_1111);
}

#[test]
fn mouse_report_idle() {
    let report = MouseReport::default();
    assert!(report.is_idle());
    assert_eq!(report.to_bytes(), [0; 5]);

    let moved = MouseReport::new(MouseButtons::empty(), 0, 0, 0, -1);
    assert!(!moved.is_idle());
}

#[test]
fn mouse_report_serialize_writes_five_bytes() {
    let report = MouseReport::new(MouseButtons::LEFT | MouseButtons::RIGHT, -10, 20, 1, 0);
    let mut buf = [0xAAu8; 8];
    let written = report.serialize(&mut buf);
    assert_eq!(written, 5);
    assert_eq!(&buf[..5], &[0x03, 0xF6, 0x14, 0x01, 0x00]);
    // Bytes past the report are left alone.
    assert_eq!(&buf[5..], &[0xAA, 0xAA, 0xAA]);
}

#[test]
fn mouse_report_serialize_buffer_too_small() {
    let report = MouseReport::default();
    let mut buf = [0u8; 4];
    assert_eq!(report.serialize(&mut buf), 0);
}

// ═══════════════════════════════════════════════════════════════════════════
// Keyboard Report Tests
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn keyboard_encode_single_key() {
    // Left Shift + 'a'
    let bytes = encode_keyboard(0x02, 0x04);
    assert_eq!(bytes, [0x02, 0x00, 0x04, 0x00, 0x00, 0x00, 0x00, 0x00]);
}

#[test]
fn keyboard_released_is_all_zero() {
    assert!(KeyboardReport::RELEASED.is_released());
    assert_eq!(KeyboardReport::RELEASED.to_bytes(), [0; 8]);
    assert!(!KeyboardReport::key_down(0x01, 0).is_released());
}

#[test]
fn keyboard_report_serialize_buffer_too_small() {
    let report = KeyboardReport::key_down(0, 0x28);
    let mut buf = [0u8; 5];
    assert_eq!(report.serialize(&mut buf), 0);

    let mut buf = [0u8; 8];
    assert_eq!(report.serialize(&mut buf), 8);
    assert_eq!(buf[2], 0x28);
}

// ═══════════════════════════════════════════════════════════════════════════
// Profile / HidReport Tests
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn profile_sizes_and_ids() {
    assert_eq!(ReportProfile::Mouse.report_len(), 5);
    assert_eq!(ReportProfile::Keyboard.report_len(), 8);
    assert_eq!(ReportProfile::Mouse.report_id(), MOUSE_REPORT_ID);
    assert_eq!(ReportProfile::Keyboard.report_id(), KEYBOARD_REPORT_ID);
    assert_ne!(MOUSE_REPORT_ID, KEYBOARD_REPORT_ID);
    assert_eq!(MAX_REPORT_SIZE, 8);
}

#[test]
fn hid_report_dispatches_by_variant() {
    let mut buf = [0u8; MAX_REPORT_SIZE];

    let mouse = HidReport::Mouse(MouseReport::new(MouseButtons::RIGHT, 1, 2, 3, 4));
    assert_eq!(mouse.profile(), ReportProfile::Mouse);
    assert_eq!(mouse.serialize(&mut buf), 5);
    assert_eq!(&buf[..5], &[0x02, 1, 2, 3, 4]);

    let key = HidReport::Keyboard(KeyboardReport::key_down(0, 0x04));
    assert_eq!(key.profile(), ReportProfile::Keyboard);
    assert_eq!(key.serialize(&mut buf), 8);
    assert_eq!(buf, [0, 0, 0x04, 0, 0, 0, 0, 0]);
}

// ═══════════════════════════════════════════════════════════════════════════
// Report Map Tests
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn report_map_length() {
    assert_eq!(REPORT_MAP_LEN, REPORT_MAP.len());
    assert_eq!(REPORT_MAP_LEN, 117);
}

#[test]
fn report_map_declares_both_report_ids() {
    let ids: heapless::Vec<u8, 4> = REPORT_MAP
        .windows(2)
        .filter(|w| w[0] == 0x85)
        .map(|w| w[1])
        .collect();
    assert_eq!(ids.as_slice(), &[MOUSE_REPORT_ID, KEYBOARD_REPORT_ID]);
}

#[test]
fn report_map_collections_are_balanced() {
    // Walk items by their size prefix so data bytes are never
    // mistaken for Collection / End Collection tags.
    let mut depth = 0i32;
    let mut i = 0;
    while i < REPORT_MAP.len() {
        let prefix = REPORT_MAP[i];
        let size = match prefix & 0x03 {
            3 => 4,
            n => n as usize,
        };
        match prefix & 0xFC {
            0xA0 => depth += 1,
            0xC0 => depth -= 1,
            _ => {}
        }
        assert!(depth >= 0);
        i += 1 + size;
    }
    assert_eq!(i, REPORT_MAP.len());
    assert_eq!(depth, 0);
}
