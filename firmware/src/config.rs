//! Compile-time configuration: pins, USB identity, poll timing.
//!
//! Pin numbers are documentation for the wiring; the actual
//! `embassy_rp::peripherals::PIN_*` types are picked in `main.rs`.
//!
//! | Role  | GPIO | Wiring                       |
//! |-------|------|------------------------------|
//! | Left  | 2    | switch to GND, pull-up input |
//! | Right | 3    | switch to GND, pull-up input |
//! | Up    | 4    | switch to GND, pull-up input |
//! | Down  | 5    | switch to GND, pull-up input |
//! | TX    | 8    | UART1 TX (serial variant)    |
//! | RX    | 9    | UART1 RX (unused)            |

use dpad_core::KeyMap;

// USB

/// USB VID/PID - use the "pid.codes" open-source test VID.
/// Replace with your own allocated VID/PID for production.
pub const USB_VID: u16 = 0x1209;
pub const USB_PID: u16 = 0x0001;

/// USB device strings.
pub const USB_MANUFACTURER: &str = "dpad-hid";
pub const USB_PRODUCT: &str = "Digital Stick";
pub const USB_SERIAL_NUMBER: &str = "001";

/// USB HID polling interval (ms). 1 ms = 1000 Hz for lowest latency.
pub const USB_HID_POLL_MS: u8 = 1;

// Poll loops

/// Delay between samples for the joystick variant (ms).
pub const STICK_POLL_MS: u32 = 10;

/// Delay between samples for the hat-switch variant (ms).
pub const HAT_POLL_MS: u32 = 1;

/// Delay between samples for the keyboard variant (ms).
pub const KEYBOARD_POLL_MS: u32 = 1;

/// Delay between samples for the serial variant (ms).
pub const SERIAL_POLL_MS: u32 = 10;

/// Keys simulated by the keyboard variant.
pub const KEYBOARD_KEYS: KeyMap = KeyMap::ARROWS;

// UART

/// Baud rate of the serial variant's direction output.
pub const UART_BAUDRATE: u32 = 115_200;
