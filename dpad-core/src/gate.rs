//! Change gates: suppress reports that match the last delivered one.

use crate::types::{RawState, Role};

/// Remembers the last delivered report and flags when a new one differs.
///
/// The stored report only moves forward through [`commit`](Self::commit),
/// which callers invoke after the output accepted the report. A report
/// that could not be delivered stays "changed" and is retried next poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeGate<R> {
    previous: R,
    initial: R,
}

impl<R: Copy + PartialEq> ChangeGate<R> {
    /// Create a gate whose previous report is `initial`.
    #[must_use]
    pub const fn new(initial: R) -> Self {
        Self {
            previous: initial,
            initial,
        }
    }

    /// Check whether `report` differs from the last delivered report.
    #[inline]
    #[must_use]
    pub fn is_changed(&self, report: &R) -> bool {
        self.previous != *report
    }

    /// Record `report` as delivered.
    #[inline]
    pub fn commit(&mut self, report: R) {
        self.previous = report;
    }

    /// The last delivered report.
    #[inline]
    #[must_use]
    pub fn previous(&self) -> &R {
        &self.previous
    }

    /// Forget everything delivered so far.
    pub fn reset(&mut self) {
        self.previous = self.initial;
    }
}

/// Per-role pressed state last delivered to a keyboard.
///
/// Unlike [`ChangeGate`], each role is tracked independently, so opposite
/// roles can be held at the same time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyGate {
    delivered: RawState,
}

impl KeyGate {
    /// All keys released.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            delivered: RawState::RELEASED,
        }
    }

    /// Returns `Some(pressed)` if `role` changed since the last commit.
    #[inline]
    #[must_use]
    pub fn edge(&self, role: Role, raw: RawState) -> Option<bool> {
        let now = raw.is_pressed(role);
        (now != self.delivered.is_pressed(role)).then_some(now)
    }

    /// Record that the press/release for `role` was delivered.
    #[inline]
    pub fn commit(&mut self, role: Role, pressed: bool) {
        self.delivered.set(role, pressed);
    }

    /// Check whether the key for `role` is currently held down on the host.
    #[inline]
    #[must_use]
    pub fn is_held(&self, role: Role) -> bool {
        self.delivered.is_pressed(role)
    }

    /// Delivered state of all four roles.
    #[must_use]
    pub fn delivered(&self) -> RawState {
        self.delivered
    }
}
