//! Sandboxed invocation of untrusted decision functions.
//!
//! ## Contract
//!
//! `AgentSandbox::invoke` always returns a legal position: one cardinal
//! step from the agent's cell onto a non-wall. Whatever goes wrong inside
//! the decision function is converted into a `Fault`:
//!
//! - **Timeout**: no answer by the deadline, or an answer whose measured
//!   run time exceeded the budget
//! - **Exception**: the function panicked or returned `Err`
//! - **InvalidMove**: the answer is not a legal step
//!
//! A fault costs its configured penalty and is replaced by a random legal
//! move. Faults never reach the caller as errors.
//!
//! The sandbox does not touch engine state; it reports a `Verdict` and the
//! turn engine applies it.

mod agent;
mod fault;
mod worker;

pub use agent::{Agent, AgentError, FnAgent, Observation};
pub use fault::{Fault, FaultKind, FaultTally};

use std::time::Duration;

use tracing::warn;

use crate::core::{AgentId, GameRng, Position, SimulationConfig, StateError};
use crate::maze::Maze;
use worker::{AgentWorker, CallOutcome};

/// Outcome of one sandboxed decision.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Verdict {
    /// Score delta to apply (0 on success, negative on a fault).
    pub penalty: i64,

    /// The position the agent moves to. Always legal.
    pub position: Position,

    /// The fault, if the agent's own answer was rejected.
    pub fault: Option<Fault>,
}

/// Check that `to` is exactly one cardinal step from `from` and not a wall.
///
/// `to` comes from an agent and may be any coordinate at all.
#[must_use]
pub fn is_valid_move(maze: &Maze, from: Position, to: Position) -> bool {
    maze.in_bounds(to) && from.is_adjacent(to) && !maze.is_wall(to)
}

/// A uniformly random legal step from `from`.
///
/// Falls back to `from` itself only when every neighbour is a wall.
pub fn random_legal_move(maze: &Maze, from: Position, rng: &mut GameRng) -> Position {
    let mut moves = from.neighbours();
    rng.shuffle(&mut moves);
    moves
        .into_iter()
        .find(|&to| is_valid_move(maze, from, to))
        .unwrap_or(from)
}

/// One registered agent behind its worker thread.
pub struct AgentSandbox {
    id: AgentId,
    name: String,
    worker: AgentWorker,
}

impl AgentSandbox {
    /// Start a worker for `agent` in seat `id`.
    pub fn spawn(id: AgentId, agent: Box<dyn Agent>) -> Result<Self, StateError> {
        let name = agent.name().to_string();
        let worker = AgentWorker::spawn(agent, &format!("{}-{}", id.index() + 1, name))?;
        Ok(Self { id, name, worker })
    }

    /// The agent's label.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The agent's seat.
    #[must_use]
    pub fn id(&self) -> AgentId {
        self.id
    }

    /// Ask the agent for a move and turn any failure into a penalty.
    ///
    /// `rng` is only drawn from when a fallback move is needed.
    pub fn invoke(
        &mut self,
        observation: Observation,
        rng: &mut GameRng,
        config: &SimulationConfig,
    ) -> Verdict {
        let from = observation.position;
        let maze = observation.maze.clone();
        let outcome = self.worker.call(observation, config.max_time());
        let verdict = settle(outcome, &maze, from, rng, config);

        if let Some(fault) = &verdict.fault {
            warn!(
                seat = %self.id,
                agent = %self.name,
                kind = %fault.kind(),
                %fault,
                %from,
                fallback = %verdict.position,
                penalty = verdict.penalty,
                "agent faulted, playing random move"
            );
        }
        verdict
    }
}

/// Classify a worker's answer: the accepted move, or the fault it earns.
///
/// An answer that beat the engine's deadline but whose measured run time
/// exceeded `budget` is still a timeout.
fn judge(
    outcome: CallOutcome,
    maze: &Maze,
    from: Position,
    budget: Duration,
) -> Result<Position, Fault> {
    match outcome {
        CallOutcome::Returned { outcome: Ok(_), elapsed } if elapsed > budget => {
            Err(Fault::Timeout { elapsed: Some(elapsed) })
        }
        CallOutcome::Returned { outcome: Ok(to), .. } if !is_valid_move(maze, from, to) => {
            Err(Fault::InvalidMove { proposed: to })
        }
        CallOutcome::Returned { outcome: Ok(to), .. } => Ok(to),
        CallOutcome::Returned { outcome: Err(message), .. } => Err(Fault::Exception { message }),
        CallOutcome::TimedOut => Err(Fault::Timeout { elapsed: None }),
        CallOutcome::Unavailable => Err(Fault::Exception {
            message: "agent worker unavailable".to_string(),
        }),
    }
}

/// Turn a worker's answer into a verdict, drawing a fallback move on a fault.
fn settle(
    outcome: CallOutcome,
    maze: &Maze,
    from: Position,
    rng: &mut GameRng,
    config: &SimulationConfig,
) -> Verdict {
    match judge(outcome, maze, from, config.max_time()) {
        Ok(position) => Verdict {
            penalty: 0,
            position,
            fault: None,
        },
        Err(fault) => Verdict {
            penalty: fault.penalty(&config.scoring),
            position: random_legal_move(maze, from, rng),
            fault: Some(fault),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cross() -> Maze {
        Maze::from_rows(&[
            vec![-1, -1, -1, -1, -1],
            vec![-1, -1, 0, -1, -1],
            vec![-1, 0, 0, 0, -1],
            vec![-1, -1, -1, -1, -1],
        ])
        .unwrap()
    }

    #[test]
    fn test_is_valid_move() {
        let maze = cross();
        let centre = Position::new(2, 2);
        assert!(is_valid_move(&maze, centre, Position::new(1, 2)));
        assert!(is_valid_move(&maze, centre, Position::new(2, 1)));
        assert!(!is_valid_move(&maze, centre, centre));
        assert!(!is_valid_move(&maze, centre, Position::new(2, 3)));
        assert!(!is_valid_move(&maze, centre, Position::new(1, 1)));
        assert!(!is_valid_move(&maze, centre, Position::new(4, 2)));
        assert!(!is_valid_move(&maze, Position::new(1, 2), Position::new(0, 2)));
    }

    #[test]
    fn test_random_legal_move_covers_all_exits() {
        let maze = cross();
        let centre = Position::new(2, 2);
        let mut rng = GameRng::new(17);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            let to = random_legal_move(&maze, centre, &mut rng);
            assert!(is_valid_move(&maze, centre, to));
            seen.insert(to);
        }
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn test_random_legal_move_boxed_in() {
        let maze = Maze::from_rows(&[
            vec![-1, -1, -1],
            vec![-1, 0, -1],
            vec![-1, -1, -1],
        ])
        .unwrap();
        let mut rng = GameRng::new(1);
        assert_eq!(
            random_legal_move(&maze, Position::new(1, 1), &mut rng),
            Position::new(1, 1)
        );
    }

    #[test]
    fn test_late_answer_is_a_timeout() {
        let maze = cross();
        let config = SimulationConfig::new().with_max_time_ms(100);
        let from = Position::new(2, 2);
        let outcome = CallOutcome::Returned {
            outcome: Ok(Position::new(1, 2)),
            elapsed: Duration::from_millis(101),
        };

        let verdict = settle(outcome, &maze, from, &mut GameRng::new(8), &config);

        assert_eq!(
            verdict.fault,
            Some(Fault::Timeout {
                elapsed: Some(Duration::from_millis(101))
            })
        );
        assert_eq!(verdict.penalty, -15);
        assert!(is_valid_move(&maze, from, verdict.position));
    }

    #[test]
    fn test_answer_at_budget_is_accepted() {
        let maze = cross();
        let config = SimulationConfig::new().with_max_time_ms(100);
        let outcome = CallOutcome::Returned {
            outcome: Ok(Position::new(3, 2)),
            elapsed: Duration::from_millis(100),
        };

        let verdict = settle(outcome, &maze, Position::new(2, 2), &mut GameRng::new(8), &config);

        assert_eq!(verdict.fault, None);
        assert_eq!(verdict.penalty, 0);
        assert_eq!(verdict.position, Position::new(3, 2));
    }

    #[test]
    fn test_unavailable_worker_is_an_exception() {
        let maze = cross();
        let config = SimulationConfig::new();
        let from = Position::new(2, 2);

        let verdict = settle(
            CallOutcome::Unavailable,
            &maze,
            from,
            &mut GameRng::new(8),
            &config,
        );

        assert_eq!(verdict.fault.as_ref().map(Fault::kind), Some(FaultKind::Exception));
        assert_eq!(verdict.penalty, -50);
        assert!(is_valid_move(&maze, from, verdict.position));
    }

    #[test]
    fn test_deadline_miss_is_a_timeout() {
        let maze = cross();
        let config = SimulationConfig::new();
        let from = Position::new(2, 2);

        let verdict = settle(CallOutcome::TimedOut, &maze, from, &mut GameRng::new(8), &config);

        assert_eq!(verdict.fault, Some(Fault::Timeout { elapsed: None }));
        assert_eq!(verdict.penalty, -15);
    }

    #[test]
    fn test_extreme_coordinates_are_invalid() {
        let maze = cross();
        let from = Position::new(2, 2);
        for to in [
            Position::new(i32::MIN, i32::MIN),
            Position::new(i32::MAX, 2),
            Position::new(2, i32::MIN),
        ] {
            assert!(!is_valid_move(&maze, from, to));
            assert_eq!(
                judge(
                    CallOutcome::Returned { outcome: Ok(to), elapsed: Duration::ZERO },
                    &maze,
                    from,
                    Duration::from_millis(100),
                ),
                Err(Fault::InvalidMove { proposed: to })
            );
        }
    }
}
