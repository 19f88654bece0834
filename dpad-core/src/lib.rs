//! Platform-agnostic digital stick handling: sampling, HID encoding and change gating.
//!
//! A digital stick is four active-low switches (left, right, up, down).
//! This crate turns their state into one of several outputs without any
//! platform-specific dependencies. It can be used both in embedded
//! `no_std` environments and on host for testing.
//!
//! # Overview
//!
//! The crate is organized into several modules:
//!
//! - [`types`]: Core data structures ([`Role`], [`RawState`], [`Direction`])
//! - [`input`]: Stick input trait and pin binding ([`StickInput`], [`StickConfig`])
//! - [`sampler`]: The 3x3 direction table ([`DIRECTION_TABLE`])
//! - [`encoder`]: Report encoders ([`AxisReport`], [`HatReport`])
//! - [`keyboard`]: Key mapping and keyboard report ([`KeyMap`], [`KeyboardReport`], [`KeyboardOutput`])
//! - [`gate`]: Change detection ([`ChangeGate`], [`KeyGate`])
//! - [`output`]: Output sink traits ([`ReportSink`], [`KeySink`])
//! - [`bridge`]: Poll loops ([`StickBridge`], [`HatBridge`], [`KeyboardBridge`])
//! - [`serial`]: Pull-based 4-way reader ([`SerialStick`])
//! - [`control`]: Run flag and registration guard ([`RunFlag`], [`Registration`])
//! - [`descriptor`]: HID report descriptors
//!
//! # Data Flow
//!
//! ```text
//! StickInput --sample--> RawState --table--> Direction --encode--> report
//!     --ChangeGate--> ReportSink (only when the report changed)
//! ```
//!
//! # Example
//!
//! ```rust
//! use dpad_core::{AxisReport, Direction, HatReport, RawState};
//!
//! let raw = RawState { left: true, up: true, ..RawState::RELEASED };
//! let direction = Direction::from_raw(raw);
//! assert_eq!(direction, Direction::UpLeft);
//! assert_eq!(AxisReport::from(direction).as_bytes(), [0xFF, 0x01]);
//! assert_eq!(HatReport::from(direction).code(), 5);
//! ```
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Log through defmt (for embedded logging)
//! - **`log`**: Log through the `log` facade
//!
//! # No-std Support
//!
//! This crate is `#![no_std]` by default and uses no heap allocations,
//! making it suitable for embedded systems with limited resources.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

// This must go first so the logging macros are visible to the other modules.
#[macro_use]
mod fmt;

pub mod bridge;
pub mod control;
pub mod descriptor;
pub mod encoder;
pub mod gate;
pub mod input;
pub mod keyboard;
pub mod output;
pub mod sampler;
pub mod serial;
pub mod types;

// Re-export main types at crate root
pub use bridge::{HatBridge, KeyboardBridge, ReportBridge, StickBridge, DEFAULT_POLL_INTERVAL_MS};
pub use control::{Registration, RunFlag};
pub use descriptor::{HAT_REPORT_DESCRIPTOR, STICK_REPORT_DESCRIPTOR};
pub use encoder::{AxisReport, HatReport, HidReport, HAT_CODES};
pub use gate::{ChangeGate, KeyGate};
pub use input::{StickConfig, StickInput};
pub use keyboard::{KeyEvent, KeyMap, KeyboardOutput, KeyboardReport, KEYBOARD_REPORT_SIZE};
pub use output::{KeySink, OutputError, ReportSink};
pub use sampler::{column_index, row_index, DIRECTION_TABLE};
pub use serial::SerialStick;
pub use types::{Direction, RawState, Role};
