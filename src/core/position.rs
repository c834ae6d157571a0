//! Grid coordinates and cardinal directions.
//!
//! Positions use signed coordinates so that a decision function may
//! propose any point, including ones outside the maze. Validation happens
//! in the sandbox, never here.

use serde::{Deserialize, Serialize};

/// A cell coordinate: `x` is the column, `y` is the row.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Create a new position.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The neighbouring position one step in `direction`.
    #[must_use]
    pub const fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self::new(self.x + dx, self.y + dy)
    }

    /// Manhattan distance to another position.
    ///
    /// Widened to `u64`: each axis can differ by up to `u32::MAX`.
    #[must_use]
    pub fn manhattan(self, other: Position) -> u64 {
        u64::from(self.x.abs_diff(other.x)) + u64::from(self.y.abs_diff(other.y))
    }

    /// True when `other` differs in exactly one axis by exactly one.
    #[must_use]
    pub fn is_adjacent(self, other: Position) -> bool {
        self.manhattan(other) == 1
    }

    /// The four cardinal neighbours, in `Direction::ALL` order.
    #[must_use]
    pub fn neighbours(self) -> [Position; 4] {
        Direction::ALL.map(|d| self.step(d))
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A cardinal direction on the grid (`y` grows downwards).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Right,
    Left,
    Down,
    Up,
}

impl Direction {
    /// All four directions. The fallback move shuffles this list.
    pub const ALL: [Direction; 4] = [
        Direction::Right,
        Direction::Left,
        Direction::Down,
        Direction::Up,
    ];

    /// Column/row offset for one step.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::Right => (1, 0),
            Direction::Left => (-1, 0),
            Direction::Down => (0, 1),
            Direction::Up => (0, -1),
        }
    }

    /// Next direction in `ALL`, wrapping around.
    #[must_use]
    pub const fn rotate(self) -> Self {
        match self {
            Direction::Right => Direction::Left,
            Direction::Left => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Up => Direction::Right,
        }
    }
}
