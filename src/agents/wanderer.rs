use crate::core::{Direction, GameRng, Position};
use crate::sandbox::{Agent, AgentError, Observation};

use super::first_open;

/// Keeps its heading until blocked, then picks a new random one.
#[derive(Clone, Debug)]
pub struct Wanderer {
    rng: GameRng,
    heading: Direction,
}

impl Wanderer {
    /// Create a wanderer with a fixed seed, initially heading down.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: GameRng::new(seed),
            heading: Direction::Down,
        }
    }

    /// Create a wanderer seeded from OS entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: GameRng::from_entropy(),
            heading: Direction::Down,
        }
    }

    /// Current heading.
    #[must_use]
    pub fn heading(&self) -> Direction {
        self.heading
    }
}

impl Agent for Wanderer {
    fn name(&self) -> &str {
        "Wanderer"
    }

    fn decide(&mut self, observation: &Observation) -> Result<Position, AgentError> {
        let maze = &observation.maze;
        let from = observation.position;

        if maze.is_wall(from.step(self.heading)) {
            let fresh = self
                .rng
                .choose(&Direction::ALL)
                .copied()
                .unwrap_or(self.heading);
            self.heading = first_open(maze, from, fresh)?;
        }
        Ok(from.step(self.heading))
    }
}
