//! Reference agents.
//!
//! Baselines for exercising the engine and for agent authors to compare
//! against. Both carry their own RNG so a seeded run is reproducible.

mod random_walker;
mod wanderer;

pub use random_walker::RandomWalker;
pub use wanderer::Wanderer;

use crate::core::{Direction, Position};
use crate::maze::Maze;
use crate::sandbox::AgentError;

/// Starting from `heading`, rotate until a step lands on a non-wall.
fn first_open(maze: &Maze, from: Position, heading: Direction) -> Result<Direction, AgentError> {
    let mut direction = heading;
    for _ in 0..Direction::ALL.len() {
        if !maze.is_wall(from.step(direction)) {
            return Ok(direction);
        }
        direction = direction.rotate();
    }
    Err(AgentError::new(format!("boxed in at {from}")))
}
