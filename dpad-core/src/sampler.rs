//! Direction table: maps a raw pin snapshot to a 9-way [`Direction`].
//!
//! Left/right select the row, up/down select the column:
//!
//! ```text
//! row\col   none     up        down
//! none      CENTER   UP        DOWN
//! left      LEFT     UP_LEFT   DOWN_LEFT
//! right     RIGHT    UP_RIGHT  DOWN_RIGHT
//! ```
//!
//! Left wins over right and up wins over down when both of a pair are held.

use crate::types::{Direction, RawState};

/// Row-major direction lookup, indexed by `[row_index][column_index]`.
pub static DIRECTION_TABLE: [[Direction; 3]; 3] = [
    [Direction::Center, Direction::Up, Direction::Down],
    [Direction::Left, Direction::UpLeft, Direction::DownLeft],
    [Direction::Right, Direction::UpRight, Direction::DownRight],
];

/// Row index: 0 = none, 1 = left, 2 = right.
#[inline]
#[must_use]
pub const fn row_index(raw: RawState) -> usize {
    if raw.left {
        1
    } else if raw.right {
        2
    } else {
        0
    }
}

/// Column index: 0 = none, 1 = up, 2 = down.
#[inline]
#[must_use]
pub const fn column_index(raw: RawState) -> usize {
    if raw.up {
        1
    } else if raw.down {
        2
    } else {
        0
    }
}

impl Direction {
    /// Look up the 9-way direction for a raw snapshot.
    #[inline]
    #[must_use]
    pub fn from_raw(raw: RawState) -> Self {
        DIRECTION_TABLE[row_index(raw)][column_index(raw)]
    }

    /// 4-way direction with priority left > right > up > down > center.
    ///
    /// Never returns a diagonal.
    #[inline]
    #[must_use]
    pub const fn cardinal(raw: RawState) -> Self {
        if raw.left {
            Direction::Left
        } else if raw.right {
            Direction::Right
        } else if raw.up {
            Direction::Up
        } else if raw.down {
            Direction::Down
        } else {
            Direction::Center
        }
    }
}

impl From<RawState> for Direction {
    fn from(raw: RawState) -> Self {
        Direction::from_raw(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_from_bits(bits: u8) -> RawState {
        RawState::new(bits & 1 != 0, bits & 2 != 0, bits & 4 != 0, bits & 8 != 0)
    }

    #[test]
    fn test_table_discriminants_match_layout() {
        for (row, cols) in DIRECTION_TABLE.iter().enumerate() {
            for (col, dir) in cols.iter().enumerate() {
                assert_eq!(*dir as usize, row * 3 + col);
            }
        }
    }

    #[test]
    fn test_single_inputs() {
        assert_eq!(Direction::from_raw(RawState::RELEASED), Direction::Center);
        assert_eq!(Direction::from_raw(RawState::new(true, false, false, false)), Direction::Left);
        assert_eq!(Direction::from_raw(RawState::new(false, true, false, false)), Direction::Right);
        assert_eq!(Direction::from_raw(RawState::new(false, false, true, false)), Direction::Up);
        assert_eq!(Direction::from_raw(RawState::new(false, false, false, true)), Direction::Down);
    }

    #[test]
    fn test_diagonals() {
        assert_eq!(Direction::from_raw(RawState::new(true, false, true, false)), Direction::UpLeft);
        assert_eq!(Direction::from_raw(RawState::new(true, false, false, true)), Direction::DownLeft);
        assert_eq!(Direction::from_raw(RawState::new(false, true, true, false)), Direction::UpRight);
        assert_eq!(Direction::from_raw(RawState::new(false, true, false, true)), Direction::DownRight);
    }

    #[test]
    fn test_opposite_pairs_tie_break() {
        // left beats right, up beats down
        assert_eq!(Direction::from_raw(RawState::new(true, true, false, false)), Direction::Left);
        assert_eq!(Direction::from_raw(RawState::new(false, false, true, true)), Direction::Up);
        assert_eq!(Direction::from_raw(RawState::new(true, true, true, true)), Direction::UpLeft);
        assert_eq!(Direction::from_raw(RawState::new(false, true, true, true)), Direction::UpRight);
        assert_eq!(Direction::from_raw(RawState::new(true, true, false, true)), Direction::DownLeft);
    }

    #[test]
    fn test_all_sixteen_combinations() {
        for bits in 0u8..16 {
            let raw = raw_from_bits(bits);
            let row = if raw.left { 1 } else if raw.right { 2 } else { 0 };
            let col = if raw.up { 1 } else if raw.down { 2 } else { 0 };
            let dir = Direction::from_raw(raw);
            assert_eq!(dir, DIRECTION_TABLE[row][col], "bits {bits:04b}");
            // Same input always maps to the same direction.
            assert_eq!(dir, Direction::from(raw));
        }
    }

    #[test]
    fn test_cardinal_priority() {
        assert_eq!(Direction::cardinal(RawState::new(true, false, true, false)), Direction::Left);
        assert_eq!(Direction::cardinal(RawState::new(false, true, true, true)), Direction::Right);
        assert_eq!(Direction::cardinal(RawState::new(false, false, true, true)), Direction::Up);
        assert_eq!(Direction::cardinal(RawState::new(false, false, false, true)), Direction::Down);
        assert_eq!(Direction::cardinal(RawState::RELEASED), Direction::Center);
        for bits in 0u8..16 {
            assert!(!Direction::cardinal(raw_from_bits(bits)).is_diagonal());
        }
    }
}
