//! Read-only hooks into a running simulation.
//!
//! An `Observer` sees a `Snapshot` before the first step, after every
//! step (together with that step's events), and once more at the end.
//! Observers cannot influence the run; rendering and logging live here.

use serde::Serialize;
use tracing::{debug, info};

use super::event::GameEvent;
use super::result::SimulationResult;
use crate::core::{AgentId, AgentState, PerAgent};
use crate::maze::Maze;

/// Serializable view of the engine between steps.
#[derive(Clone, Debug, Serialize)]
pub struct Snapshot {
    pub maze: Maze,
    pub agents: PerAgent<AgentState>,

    /// Registered agent names (`None` for an empty seat).
    pub names: PerAgent<Option<String>>,

    /// Completed steps.
    pub step: u32,

    /// Step limit.
    pub steps: u32,

    pub finished: bool,
}

/// Callbacks invoked by `TurnEngine::run`. All default to no-ops.
pub trait Observer {
    fn on_start(&mut self, _snapshot: &Snapshot) {}

    fn on_step(&mut self, _snapshot: &Snapshot, _events: &[GameEvent]) {}

    fn on_finish(&mut self, _snapshot: &Snapshot, _result: &SimulationResult) {}
}

impl Observer for () {}

/// Observer that reports progress through `tracing`.
///
/// Encounters and the final result go to `info`; everything else to `debug`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingObserver;

impl Observer for TracingObserver {
    fn on_start(&mut self, snapshot: &Snapshot) {
        info!(
            width = snapshot.maze.width(),
            height = snapshot.maze.height(),
            steps = snapshot.steps,
            first = snapshot.names.get(AgentId::First).as_deref().unwrap_or("-"),
            second = snapshot.names.get(AgentId::Second).as_deref().unwrap_or("-"),
            "simulation starting"
        );
    }

    fn on_step(&mut self, snapshot: &Snapshot, events: &[GameEvent]) {
        for event in events {
            match event {
                GameEvent::Encounter { winner, loser, position, bonus } => {
                    info!(step = snapshot.step, %winner, %loser, %position, bonus, "encounter");
                }
                other => debug!(step = snapshot.step, event = ?other),
            }
        }
    }

    fn on_finish(&mut self, _snapshot: &Snapshot, result: &SimulationResult) {
        info!(
            steps = result.steps,
            seed = result.seed,
            first = *result.scores.get(AgentId::First),
            second = *result.scores.get(AgentId::Second),
            outcome = ?result.outcome,
            "simulation finished"
        );
    }
}
