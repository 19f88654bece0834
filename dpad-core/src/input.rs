//! Stick input trait and the GPIO-backed pin configuration.

use embedded_hal::digital::InputPin;

use crate::types::{RawState, Role};

/// Source of raw stick snapshots.
///
/// Every call reads all four inputs afresh. There is no debouncing beyond
/// the caller's poll interval.
pub trait StickInput {
    /// Read the current pressed state of all four inputs.
    fn sample(&mut self) -> RawState;
}

/// A fixed snapshot is its own input source.
impl StickInput for RawState {
    fn sample(&mut self) -> RawState {
        *self
    }
}

impl<T: StickInput + ?Sized> StickInput for &mut T {
    fn sample(&mut self) -> RawState {
        (**self).sample()
    }
}

/// Binding of the four stick roles to input pins.
///
/// Pins are expected to be configured as pull-up inputs by the caller, so a
/// pressed switch reads LOW.
#[derive(Debug)]
pub struct StickConfig<P> {
    pub left: P,
    pub right: P,
    pub up: P,
    pub down: P,
}

impl<P> StickConfig<P> {
    /// Bind the four pins.
    #[must_use]
    pub const fn new(left: P, right: P, up: P, down: P) -> Self {
        Self {
            left,
            right,
            up,
            down,
        }
    }

    /// Get a mutable reference to the pin bound to `role`.
    pub fn pin_mut(&mut self, role: Role) -> &mut P {
        match role {
            Role::Left => &mut self.left,
            Role::Right => &mut self.right,
            Role::Up => &mut self.up,
            Role::Down => &mut self.down,
        }
    }

    /// Release the pins.
    pub fn into_pins(self) -> [P; 4] {
        [self.left, self.right, self.up, self.down]
    }
}

impl<P: InputPin> StickConfig<P> {
    /// Read a single role. A failed read counts as released.
    #[inline]
    pub fn is_pressed(&mut self, role: Role) -> bool {
        self.pin_mut(role).is_low().unwrap_or(false)
    }
}

impl<P: InputPin> StickInput for StickConfig<P> {
    fn sample(&mut self) -> RawState {
        RawState {
            left: self.is_pressed(Role::Left),
            right: self.is_pressed(Role::Right),
            up: self.is_pressed(Role::Up),
            down: self.is_pressed(Role::Down),
        }
    }
}
