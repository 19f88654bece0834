//! Core stick types: Role, RawState, Direction.

/// Logical role of one of the four stick inputs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Role {
    Left,
    Right,
    Up,
    Down,
}

impl Role {
    /// All roles in scan order.
    pub const ALL: [Role; 4] = [Role::Left, Role::Right, Role::Up, Role::Down];
}

/// Per-poll snapshot of the four pressed flags.
///
/// "Pressed" means the line reads LOW (active-low wiring with pull-ups).
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawState {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl RawState {
    /// Nothing pressed.
    pub const RELEASED: Self = Self {
        left: false,
        right: false,
        up: false,
        down: false,
    };

    #[must_use]
    pub const fn new(left: bool, right: bool, up: bool, down: bool) -> Self {
        Self {
            left,
            right,
            up,
            down,
        }
    }

    /// Check whether the input bound to `role` is pressed.
    #[inline]
    #[must_use]
    pub const fn is_pressed(self, role: Role) -> bool {
        match role {
            Role::Left => self.left,
            Role::Right => self.right,
            Role::Up => self.up,
            Role::Down => self.down,
        }
    }

    /// Set or clear the pressed flag for `role`.
    #[inline]
    pub fn set(&mut self, role: Role, pressed: bool) {
        match role {
            Role::Left => self.left = pressed,
            Role::Right => self.right = pressed,
            Role::Up => self.up = pressed,
            Role::Down => self.down = pressed,
        }
    }

    /// Check if any input is pressed.
    #[inline]
    #[must_use]
    pub const fn any(self) -> bool {
        self.left || self.right || self.up || self.down
    }
}

/// 9-way stick direction.
///
/// Discriminants follow the row-major order of the direction table
/// (row = none/left/right, column = none/up/down), so a direction can be
/// used directly as an index into per-direction lookup tables.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Direction {
    #[default]
    Center = 0,
    Up = 1,
    Down = 2,
    Left = 3,
    UpLeft = 4,
    DownLeft = 5,
    Right = 6,
    UpRight = 7,
    DownRight = 8,
}

impl Direction {
    /// Number of distinct directions.
    pub const COUNT: usize = 9;

    /// Upper-case name, e.g. `"UP_LEFT"`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Direction::Center => "CENTER",
            Direction::Up => "UP",
            Direction::Down => "DOWN",
            Direction::Left => "LEFT",
            Direction::UpLeft => "UP_LEFT",
            Direction::DownLeft => "DOWN_LEFT",
            Direction::Right => "RIGHT",
            Direction::UpRight => "UP_RIGHT",
            Direction::DownRight => "DOWN_RIGHT",
        }
    }

    /// Horizontal component: -1 for the left family, +1 for the right family.
    #[must_use]
    pub const fn dx(self) -> i8 {
        match self {
            Direction::Left | Direction::UpLeft | Direction::DownLeft => -1,
            Direction::Right | Direction::UpRight | Direction::DownRight => 1,
            Direction::Center | Direction::Up | Direction::Down => 0,
        }
    }

    /// Vertical component: +1 for the up family, -1 for the down family.
    #[must_use]
    pub const fn dy(self) -> i8 {
        match self {
            Direction::Up | Direction::UpLeft | Direction::UpRight => 1,
            Direction::Down | Direction::DownLeft | Direction::DownRight => -1,
            Direction::Center | Direction::Left | Direction::Right => 0,
        }
    }

    /// Check if this is one of the four diagonals.
    #[must_use]
    pub const fn is_diagonal(self) -> bool {
        self.dx() != 0 && self.dy() != 0
    }
}
