//! Output sink traits and error types.

use core::future::Future;

/// Error type for output operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutputError {
    /// USB/communication I/O error.
    Io,
    /// Device not ready (e.g., USB not enumerated).
    NotReady,
    /// Endpoint busy.
    Busy,
    /// Too many keys held for the keyboard report.
    Rollover,
}

/// Async trait for HID report sinks.
///
/// Implementations push a serialized report to the host, e.g. through a
/// USB HID interrupt endpoint.
///
/// # `no_std` Compatibility
///
/// All implementations must be `#![no_std]` compatible with no heap allocation.
pub trait ReportSink {
    /// Send one serialized report.
    ///
    /// May block until the previous report has been sent.
    fn send(&mut self, report: &[u8]) -> impl Future<Output = Result<(), OutputError>>;

    /// Check if the output is ready to accept data.
    fn is_ready(&self) -> bool;
}

/// Async trait for keyboard drivers that take individual key events.
pub trait KeySink {
    /// Press `key` (a USB HID keyboard usage code) and keep it held.
    fn press(&mut self, key: u8) -> impl Future<Output = Result<(), OutputError>>;

    /// Release a previously pressed `key`.
    fn release(&mut self, key: u8) -> impl Future<Output = Result<(), OutputError>>;
}
