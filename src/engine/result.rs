//! Final standings of a run.

use serde::{Deserialize, Serialize};

use crate::core::{AgentId, PerAgent};
use crate::sandbox::FaultTally;

/// Who came out ahead.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Strictly higher score (or the only registered agent).
    Winner(AgentId),
    /// Equal scores.
    Draw,
}

impl Outcome {
    /// Check if an agent won.
    #[must_use]
    pub fn is_winner(&self, agent: AgentId) -> bool {
        matches!(self, Outcome::Winner(a) if *a == agent)
    }
}

/// Summary produced when a run ends (or on demand mid-run).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub scores: PerAgent<i64>,
    pub outcome: Outcome,
    pub faults: PerAgent<FaultTally>,

    /// Completed steps.
    pub steps: u32,

    /// Seed that reproduces the maze and all engine-side randomness.
    pub seed: u64,
}

impl SimulationResult {
    /// Decide the outcome from final scores.
    #[must_use]
    pub fn outcome_for(scores: &PerAgent<i64>, solo: bool) -> Outcome {
        if solo {
            return Outcome::Winner(AgentId::First);
        }
        match scores[AgentId::First].cmp(&scores[AgentId::Second]) {
            std::cmp::Ordering::Greater => Outcome::Winner(AgentId::First),
            std::cmp::Ordering::Less => Outcome::Winner(AgentId::Second),
            std::cmp::Ordering::Equal => Outcome::Draw,
        }
    }

    /// The winner's seat, if any.
    #[must_use]
    pub fn winner(&self) -> Option<AgentId> {
        match self.outcome {
            Outcome::Winner(agent) => Some(agent),
            Outcome::Draw => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_for() {
        let scores = PerAgent::from_pair(10, -3);
        assert_eq!(
            SimulationResult::outcome_for(&scores, false),
            Outcome::Winner(AgentId::First)
        );

        let scores = PerAgent::from_pair(4, 4);
        assert_eq!(SimulationResult::outcome_for(&scores, false), Outcome::Draw);

        let scores = PerAgent::from_pair(-40, 0);
        assert_eq!(
            SimulationResult::outcome_for(&scores, true),
            Outcome::Winner(AgentId::First)
        );
    }

    #[test]
    fn test_is_winner() {
        let outcome = Outcome::Winner(AgentId::Second);
        assert!(outcome.is_winner(AgentId::Second));
        assert!(!outcome.is_winner(AgentId::First));
        assert!(!Outcome::Draw.is_winner(AgentId::First));
    }
}
