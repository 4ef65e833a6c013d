//! HID report map served through the HID service's Report Map
//! characteristic (0x2A4B).
//!
//! Two application collections share one map, told apart by report ID:
//!   - ID 1: mouse    - 5 buttons, X, Y, wheel, AC pan  (5-byte payload)
//!   - ID 2: keyboard - modifiers, reserved, 6 key slots (8-byte payload)
//!
//! Over BLE the report ID lives in each Report characteristic's
//! Report Reference descriptor, so payloads never carry it.

/// Report ID of the mouse collection.
pub const MOUSE_REPORT_ID: u8 = 1;

/// Report ID of the keyboard collection.
pub const KEYBOARD_REPORT_ID: u8 = 2;

/// Report Reference descriptor `type` value for input reports.
pub const REPORT_TYPE_INPUT: u8 = 1;

#[rustfmt::skip]
pub const REPORT_MAP: &[u8] = &[
    0x05, 0x01,       // Usage Page (Generic Desktop)
    0x09, 0x02,       // Usage (Mouse)
    0xA1, 0x01,       // Collection (Application)
    0x85, MOUSE_REPORT_ID, // Report ID
    0x09, 0x01,       //   Usage (Pointer)
    0xA1, 0x00,       //   Collection (Physical)
    //
    //     - Buttons 1..5 -
    0x05, 0x09,       //     Usage Page (Buttons)
    0x19, 0x01,       //     Usage Minimum (Button 1)
    0x29, 0x05,       //     Usage Maximum (Button 5)
    0x15, 0x00,       //     Logical Minimum (0)
    0x25, 0x01,       //     Logical Maximum (1)
    0x75, 0x01,       //     Report Size (1)
    0x95, 0x05,       //     Report Count (5)
    0x81, 0x02,       //     Input (Data, Variable, Absolute)
    //     - Padding (3 bits) -
    0x75, 0x03,       //     Report Size (3)
    0x95, 0x01,       //     Report Count (1)
    0x81, 0x03,       //     Input (Constant, Variable, Absolute)
    //
    //     - X, Y, wheel -
    0x05, 0x01,       //     Usage Page (Generic Desktop)
    0x09, 0x30,       //     Usage (X)
    0x09, 0x31,       //     Usage (Y)
    0x09, 0x38,       //     Usage (Wheel)
    0x15, 0x81,       //     Logical Minimum (-127)
    0x25, 0x7F,       //     Logical Maximum (127)
    0x75, 0x08,       //     Report Size (8)
    0x95, 0x03,       //     Report Count (3)
    0x81, 0x06,       //     Input (Data, Variable, Relative)
    //
    //     - Horizontal wheel -
    0x05, 0x0C,       //     Usage Page (Consumer)
    0x0A, 0x38, 0x02, //     Usage (AC Pan)
    0x15, 0x81,       //     Logical Minimum (-127)
    0x25, 0x7F,       //     Logical Maximum (127)
    0x75, 0x08,       //     Report Size (8)
    0x95, 0x01,       //     Report Count (1)
    0x81, 0x06,       //     Input (Data, Variable, Relative)
    0xC0,             //   End Collection (Physical)
    0xC0,             // End Collection (Application)

    0x05, 0x01,       // Usage Page (Generic Desktop)
    0x09, 0x06,       // Usage (Keyboard)
    0xA1, 0x01,       // Collection (Application)
    0x85, KEYBOARD_REPORT_ID, // Report ID
    //
    //   - Modifier keys (8 bits) -
    0x05, 0x07,       //   Usage Page (Keyboard/Keypad)
    0x19, 0xE0,       //   Usage Minimum (Left Control)
    0x29, 0xE7,       //   Usage Maximum (Right GUI)
    0x15, 0x00,       //   Logical Minimum (0)
    0x25, 0x01,       //   Logical Maximum (1)
    0x75, 0x01,       //   Report Size (1)
    0x95, 0x08,       //   Report Count (8)
    0x81, 0x02,       //   Input (Data, Variable, Absolute)
    //
    //   - Reserved byte -
    0x95, 0x01,       //   Report Count (1)
    0x75, 0x08,       //   Report Size (8)
    0x81, 0x01,       //   Input (Constant)
    //
    //   - Key codes (6 bytes) -
    0x05, 0x07,       //   Usage Page (Keyboard/Keypad)
    0x19, 0x00,       //   Usage Minimum (0)
    0x29, 0xFF,       //   Usage Maximum (255)
    0x15, 0x00,       //   Logical Minimum (0)
    0x26, 0xFF, 0x00, //   Logical Maximum (255)
    0x95, 0x06,       //   Report Count (6)
    0x75, 0x08,       //   Report Size (8)
    0x81, 0x00,       //   Input (Data, Array)
    0xC0,             // End Collection
];

/// Length of [`REPORT_MAP`], for fixed-size GATT attribute storage.
pub const REPORT_MAP_LEN: usize = REPORT_MAP.len();
