//! Game state: maze, agents, step counter, RNG.
//!
//! ## GameState
//!
//! Owned by the turn engine, which is the only caller of the mutation
//! primitives during a run. Agents never see a `GameState`; they receive
//! copies of the maze and scalar fields.
//!
//! ## Setup
//!
//! `GameState::generate` follows a fixed draw order so a seed reproduces
//! a run exactly:
//! 1. carve the maze
//! 2. place agent 1, then agent 2 (never on agent 1's cell)
//! 3. draw both hands
//! 4. seed cell tiers around both start cells

use serde::{Deserialize, Serialize};

use super::agent::{AgentId, PerAgent};
use super::config::SimulationConfig;
use super::error::StateError;
use super::hand::Hand;
use super::position::Position;
use super::rng::GameRng;
use crate::maze::{self, Maze, Tier, EMPTY};

/// Per-agent mutable state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentState {
    /// Current cell; never a wall.
    pub position: Position,

    /// Current type.
    pub hand: Hand,

    /// Cumulative score, unbounded in both directions.
    pub score: i64,
}

impl AgentState {
    /// A fresh agent with zero score.
    #[must_use]
    pub fn new(position: Position, hand: Hand) -> Self {
        Self {
            position,
            hand,
            score: 0,
        }
    }
}

/// Full simulation state.
#[derive(Clone, Debug)]
pub struct GameState {
    maze: Maze,
    agents: PerAgent<AgentState>,
    step: u32,

    /// Deterministic RNG shared by setup, fallbacks, and resolution.
    pub rng: GameRng,
}

impl GameState {
    /// Build the initial state for a run.
    pub fn generate(config: &SimulationConfig, mut rng: GameRng) -> Result<Self, StateError> {
        let mut maze = maze::generate(config.maze.width, config.maze.height, &mut rng);

        let first = maze::free_cell(&maze, &mut rng, &[])?;
        let second = maze::free_cell(&maze, &mut rng, &[first])?;

        let first_hand = random_hand(&mut rng);
        let second_hand = random_hand(&mut rng);

        maze::seed_cells(
            &mut maze,
            &mut rng,
            &config.scoring,
            config.rules.type_advantage,
            &[first, second],
        );

        Ok(Self {
            maze,
            agents: PerAgent::from_pair(
                AgentState::new(first, first_hand),
                AgentState::new(second, second_hand),
            ),
            step: 0,
            rng,
        })
    }

    /// Assemble a state from explicit parts (step counter at zero).
    #[must_use]
    pub fn from_parts(maze: Maze, agents: PerAgent<AgentState>, rng: GameRng) -> Self {
        Self {
            maze,
            agents,
            step: 0,
            rng,
        }
    }

    // === Queries ===

    #[must_use]
    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    #[must_use]
    pub fn agent(&self, id: AgentId) -> &AgentState {
        &self.agents[id]
    }

    #[must_use]
    pub fn agents(&self) -> &PerAgent<AgentState> {
        &self.agents
    }

    /// Number of completed steps.
    #[must_use]
    pub fn step(&self) -> u32 {
        self.step
    }

    /// Both agents' current cells.
    #[must_use]
    pub fn positions(&self) -> [Position; 2] {
        AgentId::ALL.map(|id| self.agents[id].position)
    }

    // === Mutation ===

    /// Place an agent on a cell. Callers validate the destination.
    pub fn move_agent(&mut self, id: AgentId, position: Position) {
        self.agents[id].position = position;
    }

    /// Add a (possibly negative) delta to an agent's score.
    pub fn add_score(&mut self, id: AgentId, delta: i64) {
        self.agents[id].score += delta;
    }

    /// Set an agent's hand.
    pub fn set_hand(&mut self, id: AgentId, hand: Hand) {
        self.agents[id].hand = hand;
    }

    /// Advance an agent's hand cyclically, returning the new hand.
    pub fn advance_hand(&mut self, id: AgentId, steps: u8) -> Hand {
        let hand = self.agents[id].hand.advance(steps);
        self.agents[id].hand = hand;
        hand
    }

    /// Reset a cell to empty, returning its previous code (`0` outside the grid).
    pub fn collect_cell(&mut self, position: Position) -> i32 {
        self.maze.clear(position).unwrap_or(EMPTY)
    }

    /// Move an agent to a random free cell other than its opponent's.
    pub fn teleport(&mut self, id: AgentId) -> Result<Position, StateError> {
        let avoid = [self.agents[id.opponent()].position];
        let target = maze::free_cell(&self.maze, &mut self.rng, &avoid)?;
        self.agents[id].position = target;
        Ok(target)
    }

    /// Seed one replacement cell of `tier` away from both agents.
    pub fn regenerate(&mut self, tier: Tier, config: &SimulationConfig) -> Option<Position> {
        let occupied = self.positions();
        maze::place_cells(&mut self.maze, &mut self.rng, &config.scoring, tier, 1, &occupied)
            .pop()
    }

    /// Increment the step counter, returning the new count.
    pub fn advance_step(&mut self) -> u32 {
        self.step += 1;
        self.step
    }
}

fn random_hand(rng: &mut GameRng) -> Hand {
    rng.choose(&Hand::ALL).copied().unwrap_or(Hand::Rock)
}
