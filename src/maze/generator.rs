//! Maze carving and cell seeding.
//!
//! ## Carving
//!
//! An iterative randomized depth-first search over the half-resolution
//! grid of odd cells. Each move jumps two cells and opens the wall between,
//! which yields a perfect maze: every open cell reachable from every other,
//! no cycles, and an outer border of walls.
//!
//! ## Seeding
//!
//! Four tiers are placed in a fixed order (tier 1, tier 2, penalty,
//! refresh). Each tier's count is `floor(ratio * empty_count)`, with the
//! empty count taken just before that tier is placed.
//!
//! ## Free cells
//!
//! `free_cell` starts at a uniformly random coordinate and scans row-major
//! with wraparound for the first empty cell not in `occupied`. Agent starts,
//! relocations, and seeded cells all use it.

use std::ops::RangeInclusive;

use tracing::debug;

use super::grid::{CellKind, Maze, EMPTY, REFRESH, WALL};
use crate::core::{GameRng, Position, ScoringConfig, StateError};

/// Carve a perfect maze.
///
/// The grid is `(2 * ((width - 1) / 2) + 1) x (2 * ((height - 1) / 2) + 1)`:
/// even requests round down to the nearest odd size. Inputs below 3 produce
/// a grid with no open cells.
#[must_use]
pub fn generate(width: usize, height: usize, rng: &mut GameRng) -> Maze {
    let half_w = width.saturating_sub(1) / 2;
    let half_h = height.saturating_sub(1) / 2;
    let mut maze = Maze::filled(half_w * 2 + 1, half_h * 2 + 1, WALL);
    if half_w == 0 || half_h == 0 {
        return maze;
    }

    let room = |x: usize, y: usize| Position::new((2 * x + 1) as i32, (2 * y + 1) as i32);

    maze.set(room(0, 0), EMPTY);
    let mut stack: Vec<(usize, usize)> = vec![(0, 0)];

    while let Some(&(x, y)) = stack.last() {
        let mut directions: [(isize, isize); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];
        rng.shuffle(&mut directions);

        let next = directions.iter().find_map(|&(dx, dy)| {
            let nx = x.checked_add_signed(dx).filter(|&v| v < half_w)?;
            let ny = y.checked_add_signed(dy).filter(|&v| v < half_h)?;
            maze.is_wall(room(nx, ny)).then_some((nx, ny, dx, dy))
        });

        match next {
            Some((nx, ny, dx, dy)) => {
                let here = room(x, y);
                maze.set(room(nx, ny), EMPTY);
                maze.set(Position::new(here.x + dx as i32, here.y + dy as i32), EMPTY);
                stack.push((nx, ny));
            }
            None => {
                stack.pop();
            }
        }
    }

    maze
}

/// Find an empty cell not listed in `occupied`.
///
/// Scans row-major from a random start, wrapping at the end of each row and
/// at the bottom of the grid. Fails only when no such cell exists.
pub fn free_cell(
    maze: &Maze,
    rng: &mut GameRng,
    occupied: &[Position],
) -> Result<Position, StateError> {
    let (width, height) = (maze.width(), maze.height());
    let mut x = rng.gen_range_usize(0..width);
    let mut y = rng.gen_range_usize(0..height);

    for _ in 0..width * height {
        let pos = Position::new(x as i32, y as i32);
        if maze.at(x, y) == EMPTY && !occupied.contains(&pos) {
            return Ok(pos);
        }
        x += 1;
        if x >= width {
            x = 0;
            y = (y + 1) % height;
        }
    }

    Err(StateError::NoFreeCell { width, height })
}

/// A family of seeded cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tier {
    Reward1,
    Reward2,
    Penalty,
    Refresh,
}

impl Tier {
    /// Seeding order.
    pub const ALL: [Tier; 4] = [Tier::Reward1, Tier::Reward2, Tier::Penalty, Tier::Refresh];

    /// Inclusive range of codes for this tier.
    #[must_use]
    pub fn range(self, scoring: &ScoringConfig) -> RangeInclusive<i32> {
        match self {
            Tier::Reward1 => 1..=scoring.score1_value,
            Tier::Reward2 => scoring.score1_value + 1..=scoring.score2_value,
            Tier::Penalty => scoring.score_min_value..=-3,
            Tier::Refresh => REFRESH..=REFRESH,
        }
    }

    /// Share of empty cells seeded with this tier.
    #[must_use]
    pub fn ratio(self, scoring: &ScoringConfig) -> f64 {
        match self {
            Tier::Reward1 => scoring.count_score1,
            Tier::Reward2 => scoring.count_score2,
            Tier::Penalty => scoring.count_score_min,
            Tier::Refresh => scoring.count_refresh,
        }
    }

    /// The tier a consumed cell belongs to.
    #[must_use]
    pub fn of(kind: CellKind) -> Option<Self> {
        match kind {
            CellKind::Reward1(_) => Some(Tier::Reward1),
            CellKind::Reward2(_) => Some(Tier::Reward2),
            CellKind::Penalty(_) => Some(Tier::Penalty),
            CellKind::Refresh => Some(Tier::Refresh),
            CellKind::Wall | CellKind::Empty => None,
        }
    }
}

/// Place up to `count` cells of `tier` on free cells.
///
/// Returns the positions written. Stops early, without error, once the
/// maze has no free cell left.
pub fn place_cells(
    maze: &mut Maze,
    rng: &mut GameRng,
    scoring: &ScoringConfig,
    tier: Tier,
    count: usize,
    occupied: &[Position],
) -> Vec<Position> {
    let range = tier.range(scoring);
    let mut placed = Vec::with_capacity(count);
    for _ in 0..count {
        let Ok(pos) = free_cell(maze, rng, occupied) else {
            debug!(?tier, placed = placed.len(), count, "maze full, seeding stopped early");
            break;
        };
        maze.set(pos, rng.gen_range_inclusive(range.clone()));
        placed.push(pos);
    }
    placed
}

/// Seed all tiers in order. Refresh cells only exist in type-advantage mode.
pub fn seed_cells(
    maze: &mut Maze,
    rng: &mut GameRng,
    scoring: &ScoringConfig,
    type_advantage: bool,
    occupied: &[Position],
) {
    for tier in Tier::ALL {
        if tier == Tier::Refresh && !type_advantage {
            continue;
        }
        let count = (tier.ratio(scoring) * maze.empty_count() as f64).floor() as usize;
        place_cells(maze, rng, scoring, tier, count, occupied);
    }
}
