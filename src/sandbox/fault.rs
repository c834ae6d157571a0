//! Agent-local faults and their penalties.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::{Position, ScoringConfig};

/// Why a decision was rejected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Fault {
    /// No answer within the budget, or an answer that arrived late.
    /// `elapsed` is known only when the call eventually returned.
    Timeout { elapsed: Option<Duration> },

    /// The decision function panicked or returned an error.
    Exception { message: String },

    /// The proposed position is not one legal step away.
    InvalidMove { proposed: Position },
}

impl Fault {
    /// The fault's kind, without payload.
    #[must_use]
    pub fn kind(&self) -> FaultKind {
        match self {
            Fault::Timeout { .. } => FaultKind::Timeout,
            Fault::Exception { .. } => FaultKind::Exception,
            Fault::InvalidMove { .. } => FaultKind::InvalidMove,
        }
    }

    /// Configured score penalty for this fault.
    #[must_use]
    pub fn penalty(&self, scoring: &ScoringConfig) -> i64 {
        self.kind().penalty(scoring)
    }
}

impl std::fmt::Display for Fault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Fault::Timeout { elapsed: Some(elapsed) } => write!(f, "timeout after {elapsed:?}"),
            Fault::Timeout { elapsed: None } => f.write_str("timeout"),
            Fault::Exception { message } => write!(f, "exception: {message}"),
            Fault::InvalidMove { proposed } => write!(f, "invalid move to {proposed}"),
        }
    }
}

/// Fault category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FaultKind {
    Timeout,
    Exception,
    InvalidMove,
}

impl FaultKind {
    /// Configured score penalty for this kind.
    #[must_use]
    pub fn penalty(self, scoring: &ScoringConfig) -> i64 {
        match self {
            FaultKind::Timeout => scoring.on_timeout,
            FaultKind::Exception => scoring.on_exception,
            FaultKind::InvalidMove => scoring.on_bad_move,
        }
    }
}

impl std::fmt::Display for FaultKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            FaultKind::Timeout => "timeout",
            FaultKind::Exception => "exception",
            FaultKind::InvalidMove => "invalid-move",
        })
    }
}

/// Running count of faults per kind.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaultTally {
    pub timeouts: u32,
    pub exceptions: u32,
    pub invalid_moves: u32,
}

impl FaultTally {
    /// Count one fault.
    pub fn record(&mut self, kind: FaultKind) {
        match kind {
            FaultKind::Timeout => self.timeouts += 1,
            FaultKind::Exception => self.exceptions += 1,
            FaultKind::InvalidMove => self.invalid_moves += 1,
        }
    }

    /// Faults of all kinds.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.timeouts + self.exceptions + self.invalid_moves
    }
}
