//! Events emitted during a simulation step.
//!
//! Every call to `TurnEngine::step` returns the events it produced, in
//! the order they happened. Renderers, loggers, and tests consume them;
//! nothing in the engine reads them back.

use serde::{Deserialize, Serialize};

use crate::core::{AgentId, Hand, Position};
use crate::maze::CellKind;
use crate::sandbox::FaultKind;

/// Why a score changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreCause {
    Fault(FaultKind),
    Pickup,
    Encounter,
}

/// Something that happened during a step.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A decision was rejected and replaced by a random move.
    Faulted {
        agent: AgentId,
        kind: FaultKind,
        penalty: i64,
    },

    /// An agent's position was updated (possibly by a fallback move).
    Moved {
        agent: AgentId,
        from: Position,
        to: Position,
    },

    /// A score changed by `delta`; `score` is the new total.
    ScoreChanged {
        agent: AgentId,
        delta: i64,
        score: i64,
        cause: ScoreCause,
    },

    /// An agent consumed a non-empty cell, which is now empty.
    CellConsumed {
        agent: AgentId,
        position: Position,
        kind: CellKind,
    },

    /// A refresh cell changed an agent's hand.
    HandChanged {
        agent: AgentId,
        from: Hand,
        to: Hand,
    },

    /// A consumed cell was replaced elsewhere.
    CellRegenerated { position: Position, kind: CellKind },

    /// Two agents met on a cell and one hand beat the other.
    Encounter {
        winner: AgentId,
        loser: AgentId,
        position: Position,
        bonus: i64,
    },

    /// An agent was moved to a new free cell after losing an encounter.
    Relocated {
        agent: AgentId,
        from: Position,
        to: Position,
    },

    /// The step counter advanced.
    StepCompleted { step: u32 },

    /// The step limit was reached.
    Finished { steps: u32 },
}
