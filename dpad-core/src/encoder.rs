//! Report encoders: direction to 2-axis stick bytes or hat-switch code.

use crate::types::Direction;

/// A fixed-layout HID input report.
pub trait HidReport: Copy + PartialEq {
    /// Size of the serialized report in bytes.
    const SIZE: usize;

    /// Report for a centered stick.
    const NEUTRAL: Self;

    /// Serialize into `buf` for HID transmission.
    ///
    /// Returns the number of bytes written, or 0 if `buf` is too small.
    fn serialize(&self, buf: &mut [u8]) -> usize;
}

/// Two signed 8-bit axes, each in -1..=1.
///
/// Matches [`STICK_REPORT_DESCRIPTOR`](crate::descriptor::STICK_REPORT_DESCRIPTOR).
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AxisReport {
    /// -1 = left, +1 = right.
    pub x: i8,
    /// +1 = up, -1 = down.
    pub y: i8,
}

impl AxisReport {
    #[must_use]
    pub const fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }

    /// Two's-complement wire bytes, `-1` encodes as `0xFF`.
    #[must_use]
    pub const fn as_bytes(&self) -> [u8; 2] {
        [self.x as u8, self.y as u8]
    }
}

impl HidReport for AxisReport {
    const SIZE: usize = 2;
    const NEUTRAL: Self = Self { x: 0, y: 0 };

    fn serialize(&self, buf: &mut [u8]) -> usize {
        if buf.len() < Self::SIZE {
            return 0;
        }
        buf[..Self::SIZE].copy_from_slice(&self.as_bytes());
        Self::SIZE
    }
}

impl From<Direction> for AxisReport {
    fn from(direction: Direction) -> Self {
        Self {
            x: direction.dx(),
            y: direction.dy(),
        }
    }
}

/// Hat-switch code per direction, indexed by `Direction as usize`.
///
/// These are opaque lookup values, not bit flags to be combined.
pub static HAT_CODES: [u8; Direction::COUNT] = [
    0,  // CENTER
    1,  // UP
    2,  // DOWN
    4,  // LEFT
    5,  // UP_LEFT
    6,  // DOWN_LEFT
    8,  // RIGHT
    9,  // UP_RIGHT
    10, // DOWN_RIGHT
];

/// Single-byte hat-switch report.
///
/// Matches [`HAT_REPORT_DESCRIPTOR`](crate::descriptor::HAT_REPORT_DESCRIPTOR).
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HatReport(pub u8);

impl HatReport {
    /// Raw hat code.
    #[inline]
    #[must_use]
    pub const fn code(self) -> u8 {
        self.0
    }
}

impl HidReport for HatReport {
    const SIZE: usize = 1;
    const NEUTRAL: Self = Self(0);

    fn serialize(&self, buf: &mut [u8]) -> usize {
        match buf.first_mut() {
            Some(byte) => {
                *byte = self.0;
                Self::SIZE
            }
            None => 0,
        }
    }
}

impl From<Direction> for HatReport {
    fn from(direction: Direction) -> Self {
        Self(HAT_CODES[direction as usize])
    }
}
