//! Keyboard encoding: role-to-key mapping and a boot-protocol keyboard report.
//!
//! Report layout (8 bytes):
//! ```text
//! Byte 0: Modifier keys (bitfield, usages 0xE0..=0xE7)
//! Byte 1: Reserved (0x00)
//! Byte 2-7: Up to 6 simultaneous key codes (USB HID usage codes)
//! ```

use crate::output::{KeySink, OutputError, ReportSink};
use crate::types::Role;

/// USB HID usage: Keyboard Right Arrow.
pub const KEY_RIGHT_ARROW: u8 = 0x4F;
/// USB HID usage: Keyboard Left Arrow.
pub const KEY_LEFT_ARROW: u8 = 0x50;
/// USB HID usage: Keyboard Down Arrow.
pub const KEY_DOWN_ARROW: u8 = 0x51;
/// USB HID usage: Keyboard Up Arrow.
pub const KEY_UP_ARROW: u8 = 0x52;

/// First modifier usage (Left Control).
const MODIFIER_FIRST: u8 = 0xE0;
/// Last modifier usage (Right GUI).
const MODIFIER_LAST: u8 = 0xE7;

/// Which key each stick role simulates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyMap {
    pub left: u8,
    pub right: u8,
    pub up: u8,
    pub down: u8,
}

impl KeyMap {
    /// The four arrow keys.
    pub const ARROWS: Self = Self {
        left: KEY_LEFT_ARROW,
        right: KEY_RIGHT_ARROW,
        up: KEY_UP_ARROW,
        down: KEY_DOWN_ARROW,
    };

    #[must_use]
    pub const fn new(left: u8, right: u8, up: u8, down: u8) -> Self {
        Self {
            left,
            right,
            up,
            down,
        }
    }

    /// Key code bound to `role`.
    #[inline]
    #[must_use]
    pub const fn key(&self, role: Role) -> u8 {
        match role {
            Role::Left => self.left,
            Role::Right => self.right,
            Role::Up => self.up,
            Role::Down => self.down,
        }
    }
}

impl Default for KeyMap {
    fn default() -> Self {
        Self::ARROWS
    }
}

/// A single key transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeyEvent {
    Press(u8),
    Release(u8),
}

impl KeyEvent {
    /// Event for `role` becoming pressed or released under `map`.
    #[must_use]
    pub const fn for_role(map: &KeyMap, role: Role, pressed: bool) -> Self {
        let key = map.key(role);
        if pressed {
            KeyEvent::Press(key)
        } else {
            KeyEvent::Release(key)
        }
    }
}

/// Keyboard report size in bytes.
pub const KEYBOARD_REPORT_SIZE: usize = 8;

/// Standard USB HID boot-protocol keyboard report.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyboardReport {
    /// Modifier key bitfield.
    pub modifier: u8,
    /// Reserved byte, always 0x00.
    pub reserved: u8,
    /// Up to 6 simultaneously pressed key codes, 0 = empty slot.
    pub keycodes: [u8; 6],
}

impl KeyboardReport {
    /// Create an empty (all-keys-released) report.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            modifier: 0,
            reserved: 0,
            keycodes: [0; 6],
        }
    }

    /// Add `key` to the report.
    ///
    /// Returns `Ok(true)` if the report changed, `Ok(false)` if the key was
    /// already held.
    pub fn press(&mut self, key: u8) -> Result<bool, OutputError> {
        if let Some(bit) = modifier_bit(key) {
            let changed = self.modifier & bit == 0;
            self.modifier |= bit;
            return Ok(changed);
        }
        if key == 0 || self.keycodes.contains(&key) {
            return Ok(false);
        }
        let slot = self
            .keycodes
            .iter_mut()
            .find(|k| **k == 0)
            .ok_or(OutputError::Rollover)?;
        *slot = key;
        Ok(true)
    }

    /// Remove `key` from the report. Returns `true` if the report changed.
    pub fn release(&mut self, key: u8) -> bool {
        if let Some(bit) = modifier_bit(key) {
            let changed = self.modifier & bit != 0;
            self.modifier &= !bit;
            return changed;
        }
        if key == 0 {
            return false;
        }
        let mut changed = false;
        for slot in self.keycodes.iter_mut().filter(|k| **k == key) {
            *slot = 0;
            changed = true;
        }
        changed
    }

    /// Release every key and modifier.
    pub fn release_all(&mut self) {
        *self = Self::empty();
    }

    /// Check whether `key` is currently held.
    #[must_use]
    pub fn is_pressed(&self, key: u8) -> bool {
        match modifier_bit(key) {
            Some(bit) => self.modifier & bit != 0,
            None => key != 0 && self.keycodes.contains(&key),
        }
    }

    /// Returns `true` if no keys are pressed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.modifier == 0 && self.keycodes.iter().all(|&k| k == 0)
    }

    /// Serialise into a byte slice for USB HID transmission.
    /// Returns the number of bytes written (8), or 0 if `buf` is too small.
    pub fn serialize(&self, buf: &mut [u8]) -> usize {
        if buf.len() < KEYBOARD_REPORT_SIZE {
            return 0;
        }
        buf[0] = self.modifier;
        buf[1] = self.reserved;
        buf[2..8].copy_from_slice(&self.keycodes);
        KEYBOARD_REPORT_SIZE
    }
}

fn modifier_bit(key: u8) -> Option<u8> {
    (MODIFIER_FIRST..=MODIFIER_LAST)
        .contains(&key)
        .then(|| 1 << (key - MODIFIER_FIRST))
}

/// Press/release keyboard driver on top of a raw report sink.
///
/// Keeps the current [`KeyboardReport`] and pushes it whenever a key event
/// changes it. A failed push rolls the report back, so the caller can retry
/// the same event.
pub struct KeyboardOutput<S> {
    sink: S,
    report: KeyboardReport,
}

impl<S: ReportSink> KeyboardOutput<S> {
    /// Wrap `sink`; all keys start released.
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            report: KeyboardReport::empty(),
        }
    }

    /// The report as last pushed (or pending rollback).
    pub fn report(&self) -> &KeyboardReport {
        &self.report
    }

    /// Get a reference to the underlying sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Get a mutable reference to the underlying sink.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Release everything and push the empty report.
    pub async fn release_all(&mut self) -> Result<(), OutputError> {
        self.report.release_all();
        self.flush().await
    }

    /// Consume the driver and return the sink.
    pub fn into_inner(self) -> S {
        self.sink
    }

    async fn flush(&mut self) -> Result<(), OutputError> {
        if !self.sink.is_ready() {
            return Err(OutputError::NotReady);
        }
        let mut buf = [0u8; KEYBOARD_REPORT_SIZE];
        let len = self.report.serialize(&mut buf);
        self.sink.send(&buf[..len]).await
    }
}

impl<S: ReportSink> KeySink for KeyboardOutput<S> {
    async fn press(&mut self, key: u8) -> Result<(), OutputError> {
        if !self.report.press(key)? {
            return Ok(());
        }
        let result = self.flush().await;
        if result.is_err() {
            self.report.release(key);
        }
        result
    }

    async fn release(&mut self, key: u8) -> Result<(), OutputError> {
        if !self.report.release(key) {
            return Ok(());
        }
        let result = self.flush().await;
        if result.is_err() {
            // The slot was just freed, so re-pressing cannot overflow.
            let _ = self.report.press(key);
        }
        result
    }
}
