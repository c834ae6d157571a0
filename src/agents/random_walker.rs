use crate::core::{Direction, GameRng, Position};
use crate::sandbox::{Agent, AgentError, Observation};

use super::first_open;

/// Picks a random direction every step, rotating past walls.
#[derive(Clone, Debug)]
pub struct RandomWalker {
    rng: GameRng,
}

impl RandomWalker {
    /// Create a walker with a fixed seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: GameRng::new(seed),
        }
    }

    /// Create a walker seeded from OS entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: GameRng::from_entropy(),
        }
    }
}

impl Agent for RandomWalker {
    fn name(&self) -> &str {
        "Random walker"
    }

    fn decide(&mut self, observation: &Observation) -> Result<Position, AgentError> {
        let heading = self
            .rng
            .choose(&Direction::ALL)
            .copied()
            .unwrap_or(Direction::Right);
        let direction = first_open(&observation.maze, observation.position, heading)?;
        Ok(observation.position.step(direction))
    }
}
