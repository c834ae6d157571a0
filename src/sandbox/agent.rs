//! The decision-function contract.
//!
//! An agent is anything that maps an `Observation` to a proposed next
//! position. Agents run on their own worker thread, so they must be
//! `Send + 'static`, and they only ever see copies of engine state.

use std::time::Duration;

use thiserror::Error;

use crate::core::{Hand, Position, SimulationConfig};
use crate::maze::Maze;

/// Everything an agent sees when asked for a move.
///
/// The maze is a persistent snapshot: cheap to hand over, and unaffected
/// by anything the engine does afterwards.
#[derive(Clone, Debug)]
pub struct Observation {
    /// Read-only copy of the grid.
    pub maze: Maze,

    /// The deciding agent's cell.
    pub position: Position,

    /// The opponent's cell (already updated when the second agent decides).
    pub opponent_position: Position,

    pub hand: Hand,
    pub opponent_hand: Hand,

    pub score: i64,
    pub opponent_score: i64,

    /// Number of completed steps.
    pub step: u32,

    /// Step limit of the run.
    pub steps: u32,

    /// Wall-clock budget for this call.
    pub time_budget: Duration,
}

/// A decision function's own failure report.
///
/// Returning this is treated exactly like a panic: an exception fault.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct AgentError {
    message: String,
}

impl AgentError {
    /// Create an error with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The error message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<&str> for AgentError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

impl From<String> for AgentError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

/// A decision function.
///
/// The returned position must be exactly one cardinal step from
/// `observation.position` and must not be a wall. Anything else, as well
/// as panicking, erroring, or running past the time budget, costs a
/// penalty and is replaced by a random legal move.
pub trait Agent: Send + 'static {
    /// Label used in logs and snapshots.
    fn name(&self) -> &str {
        "No name given"
    }

    /// Called once at registration with a private copy of the run's
    /// configuration.
    fn configure(&mut self, _config: SimulationConfig) {}

    /// Propose the next position.
    ///
    /// A panic here is caught and scored as an exception, but it still goes
    /// through the process's panic hook first. With the default hook that
    /// means a message on stderr; hosts that want silence should install
    /// their own hook with [`std::panic::set_hook`].
    fn decide(&mut self, observation: &Observation) -> Result<Position, AgentError>;
}

/// Adapts a closure into an `Agent`.
///
/// ```
/// use maze_duel::core::Direction;
/// use maze_duel::sandbox::{Agent, FnAgent, Observation};
///
/// let agent = FnAgent::new("always-right", |obs: &Observation| {
///     Ok(obs.position.step(Direction::Right))
/// });
/// assert_eq!(agent.name(), "always-right");
/// ```
pub struct FnAgent<F> {
    name: String,
    decide: F,
}

impl<F> FnAgent<F>
where
    F: FnMut(&Observation) -> Result<Position, AgentError> + Send + 'static,
{
    /// Wrap a closure under a label.
    pub fn new(name: impl Into<String>, decide: F) -> Self {
        Self {
            name: name.into(),
            decide,
        }
    }
}

impl<F> Agent for FnAgent<F>
where
    F: FnMut(&Observation) -> Result<Position, AgentError> + Send + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn decide(&mut self, observation: &Observation) -> Result<Position, AgentError> {
        (self.decide)(observation)
    }
}
