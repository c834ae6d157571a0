//! The maze grid and its cell codes.
//!
//! Cells are integers:
//! - `-1`: wall
//! - `0`: empty
//! - `-2`: refresh (advances the consumer's hand)
//! - `< -2`: penalty, added to the consumer's score
//! - `> 0`: reward, added to the consumer's score
//!
//! Storage is an `im::Vector`, so cloning a `Maze` for an agent snapshot
//! is O(1) and later engine writes never show through.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::Position;

/// Impassable cell.
pub const WALL: i32 = -1;
/// Open cell with no effect.
pub const EMPTY: i32 = 0;
/// Open cell that changes the consumer's hand.
pub const REFRESH: i32 = -2;

/// What a cell code means to the rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellKind {
    Wall,
    Empty,
    Refresh,
    /// Value in `score_min..=-3`.
    Penalty(i32),
    /// Value in `1..=score1`.
    Reward1(i32),
    /// Value above `score1`.
    Reward2(i32),
}

impl CellKind {
    /// Classify a raw cell code. `score1` separates the two reward tiers.
    #[must_use]
    pub fn classify(code: i32, score1: i32) -> Self {
        match code {
            WALL => CellKind::Wall,
            EMPTY => CellKind::Empty,
            REFRESH => CellKind::Refresh,
            v if v < REFRESH => CellKind::Penalty(v),
            v if v <= score1 => CellKind::Reward1(v),
            v => CellKind::Reward2(v),
        }
    }

    /// True for cells an agent consumes on arrival.
    #[must_use]
    pub fn is_consumable(self) -> bool {
        !matches!(self, CellKind::Wall | CellKind::Empty)
    }
}

/// Row-major grid of cell codes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Maze {
    width: usize,
    height: usize,
    cells: im::Vector<i32>,
}

impl Maze {
    /// A grid of the given size filled with `code`.
    #[must_use]
    pub fn filled(width: usize, height: usize, code: i32) -> Self {
        Self {
            width,
            height,
            cells: std::iter::repeat(code).take(width * height).collect(),
        }
    }

    /// Build from explicit rows. Returns `None` when rows are ragged or empty.
    ///
    /// ```
    /// use maze_duel::maze::Maze;
    ///
    /// let maze = Maze::from_rows(&[
    ///     vec![-1, -1, -1],
    ///     vec![-1,  5, -1],
    ///     vec![-1, -1, -1],
    /// ]).unwrap();
    /// assert_eq!(maze.width(), 3);
    /// assert_eq!(maze.empty_count(), 0);
    /// ```
    #[must_use]
    pub fn from_rows(rows: &[Vec<i32>]) -> Option<Self> {
        let width = rows.first()?.len();
        if width == 0 || rows.iter().any(|r| r.len() != width) {
            return None;
        }
        Some(Self {
            width,
            height: rows.len(),
            cells: rows.iter().flatten().copied().collect(),
        })
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    fn index(&self, pos: Position) -> Option<usize> {
        let x = usize::try_from(pos.x).ok()?;
        let y = usize::try_from(pos.y).ok()?;
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }

    /// Check whether a position lies inside the grid.
    #[must_use]
    pub fn in_bounds(&self, pos: Position) -> bool {
        self.index(pos).is_some()
    }

    /// Cell code at `pos`, or `None` outside the grid.
    #[must_use]
    pub fn get(&self, pos: Position) -> Option<i32> {
        self.index(pos).map(|i| self.cells[i])
    }

    /// Cell code at `(x, y)` in grid units. Panics outside the grid.
    #[must_use]
    pub fn at(&self, x: usize, y: usize) -> i32 {
        assert!(x < self.width && y < self.height, "cell ({x}, {y}) out of bounds");
        self.cells[y * self.width + x]
    }

    /// True for walls and anything outside the grid.
    #[must_use]
    pub fn is_wall(&self, pos: Position) -> bool {
        self.get(pos).map_or(true, |c| c == WALL)
    }

    /// True for in-bounds empty (`0`) cells.
    #[must_use]
    pub fn is_empty_cell(&self, pos: Position) -> bool {
        self.get(pos) == Some(EMPTY)
    }

    /// Overwrite a cell. Returns the previous code, or `None` outside the grid.
    pub fn set(&mut self, pos: Position, code: i32) -> Option<i32> {
        let i = self.index(pos)?;
        Some(self.cells.set(i, code))
    }

    /// Reset a cell to empty, returning what was there.
    pub fn clear(&mut self, pos: Position) -> Option<i32> {
        self.set(pos, EMPTY)
    }

    /// Number of cells with code `0`.
    #[must_use]
    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c == EMPTY).count()
    }

    /// Every non-wall position, row-major.
    pub fn open_cells(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.height).flat_map(move |y| {
            (0..self.width)
                .map(move |x| Position::new(x as i32, y as i32))
                .filter(move |&p| !self.is_wall(p))
        })
    }

    /// In-bounds, non-wall cardinal neighbours of `pos`.
    #[must_use]
    pub fn open_neighbours(&self, pos: Position) -> SmallVec<[Position; 4]> {
        pos.neighbours()
            .into_iter()
            .filter(|&n| !self.is_wall(n))
            .collect()
    }

    /// All open cells reachable from `start` through open cells.
    #[must_use]
    pub fn reachable_from(&self, start: Position) -> FxHashSet<Position> {
        let mut seen = FxHashSet::default();
        if self.is_wall(start) {
            return seen;
        }
        let mut frontier = vec![start];
        seen.insert(start);
        while let Some(p) = frontier.pop() {
            for n in self.open_neighbours(p) {
                if seen.insert(n) {
                    frontier.push(n);
                }
            }
        }
        seen
    }

    /// One row as a plain vector.
    #[must_use]
    pub fn row(&self, y: usize) -> Vec<i32> {
        let start = y * self.width;
        self.cells.iter().skip(start).take(self.width).copied().collect()
    }

    /// The whole grid as nested rows (`rows[y][x]`).
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<i32>> {
        (0..self.height).map(|y| self.row(y)).collect()
    }
}
