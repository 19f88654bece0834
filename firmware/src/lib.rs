//! Digital stick to USB HID for RP2040.
//!
//! This crate provides the embedded side of the stick: it reads four
//! active-low switches on GPIO and presents them to a USB host.
//!
//! # Variants
//!
//! Exactly one variant is selected at build time:
//!
//! - **`stick`** (default): 2-axis joystick, report `[x, y]` with each axis in -1..1
//! - **`hat`**: gamepad with a single hat switch, report `[code]`
//! - **`keyboard`**: arrow keys, boot-protocol keyboard report
//! - **`serial`**: no USB; the 4-way direction is written to UART1 on change
//!
//! # Architecture
//!
//! The firmware uses the Embassy async runtime with two tasks:
//!
//! - **USB Task**: Manages the USB device stack
//! - **Stick Task**: Samples the pins, encodes, gates and writes HID reports
//!
//! # Features
//!
//! - **`dev-panic`** (default): Use `panic-probe` for development (prints panic info via RTT)
//! - **`prod-panic`**: Use `panic-reset` for production (silent watchdog reset)
//!
//! # Re-exports
//!
//! This crate re-exports the public items from [`dpad_core`] it needs, so
//! the binary only depends on this crate.

#![no_std]

#[cfg(any(
    all(feature = "stick", any(feature = "hat", feature = "keyboard", feature = "serial")),
    all(feature = "hat", any(feature = "keyboard", feature = "serial")),
    all(feature = "keyboard", feature = "serial"),
))]
compile_error!("Enable exactly one of the `stick`, `hat`, `keyboard` and `serial` features");

#[cfg(not(any(feature = "stick", feature = "hat", feature = "keyboard", feature = "serial")))]
compile_error!("Enable one of the `stick`, `hat`, `keyboard` and `serial` features");

// Re-export core types for convenience
pub use dpad_core::{
    AxisReport, ChangeGate, Direction, HatBridge, HatReport, KeyMap, KeyboardBridge, KeyboardOutput,
    OutputError, RawState, ReportSink, RunFlag, SerialStick, StickBridge, StickConfig,
    StickInput, HAT_REPORT_DESCRIPTOR, STICK_REPORT_DESCRIPTOR,
};

pub mod config;
pub mod usb_output;

pub use usb_output::{configure_usb_hid, HidKind, UsbHidOutput, UsbHidWriter};
