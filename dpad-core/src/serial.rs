//! Pull-based stick reader for serial/debug use.

use crate::input::StickInput;
use crate::types::Direction;

/// Stateless 4-way reader.
///
/// Each [`read`](Self::read) samples the input and resolves it with the
/// priority left > right > up > down; diagonals are never reported.
pub struct SerialStick<I> {
    input: I,
}

impl<I: StickInput> SerialStick<I> {
    pub fn new(input: I) -> Self {
        Self { input }
    }

    /// Current 4-way direction.
    pub fn read(&mut self) -> Direction {
        Direction::cardinal(self.input.sample())
    }

    /// Release the input.
    pub fn into_inner(self) -> I {
        self.input
    }
}
