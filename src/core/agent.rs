//! Agent identification and per-agent data storage.
//!
//! ## AgentId
//!
//! The simulation has exactly two seats. The first seat always decides
//! first within a step; the second seat may be empty (single-agent run).
//!
//! ## PerAgent
//!
//! Fixed two-slot storage indexed by `AgentId`, used for positions,
//! scores, fault tallies, and names.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// One of the two agent seats.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AgentId {
    /// Decides first in every step.
    First,
    /// Decides second, after observing the first agent's new position.
    Second,
}

impl AgentId {
    /// Both seats in decision order.
    pub const ALL: [AgentId; 2] = [AgentId::First, AgentId::Second];

    /// Get the 0-based seat index.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            AgentId::First => 0,
            AgentId::Second => 1,
        }
    }

    /// Get the opposing seat.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            AgentId::First => AgentId::Second,
            AgentId::Second => AgentId::First,
        }
    }
}

impl std::fmt::Display for AgentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Agent {}", self.index() + 1)
    }
}

/// Per-agent data storage with O(1) access.
///
/// ```
/// use maze_duel::core::{AgentId, PerAgent};
///
/// let mut scores: PerAgent<i64> = PerAgent::with_value(0);
/// scores[AgentId::Second] += 17;
///
/// assert_eq!(scores[AgentId::First], 0);
/// assert_eq!(scores[AgentId::Second], 17);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PerAgent<T> {
    data: [T; 2],
}

impl<T> PerAgent<T> {
    /// Create from a factory function receiving each seat.
    pub fn new(mut factory: impl FnMut(AgentId) -> T) -> Self {
        Self {
            data: [factory(AgentId::First), factory(AgentId::Second)],
        }
    }

    /// Create from explicit first/second values.
    pub fn from_pair(first: T, second: T) -> Self {
        Self {
            data: [first, second],
        }
    }

    /// Create with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::from_pair(value.clone(), value)
    }

    /// Get a reference to a seat's data.
    #[must_use]
    pub fn get(&self, agent: AgentId) -> &T {
        &self.data[agent.index()]
    }

    /// Get a mutable reference to a seat's data.
    pub fn get_mut(&mut self, agent: AgentId) -> &mut T {
        &mut self.data[agent.index()]
    }

    /// Iterate over (AgentId, &T) pairs in decision order.
    pub fn iter(&self) -> impl Iterator<Item = (AgentId, &T)> {
        AgentId::ALL.into_iter().zip(self.data.iter())
    }

    /// Map every entry into a new `PerAgent`.
    pub fn map<U>(&self, mut f: impl FnMut(AgentId, &T) -> U) -> PerAgent<U> {
        PerAgent::new(|agent| f(agent, self.get(agent)))
    }
}

impl<T> Index<AgentId> for PerAgent<T> {
    type Output = T;

    fn index(&self, agent: AgentId) -> &Self::Output {
        self.get(agent)
    }
}

impl<T> IndexMut<AgentId> for PerAgent<T> {
    fn index_mut(&mut self, agent: AgentId) -> &mut Self::Output {
        self.get_mut(agent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_agent_id_basics() {
        assert_eq!(AgentId::First.index(), 0);
        assert_eq!(AgentId::Second.index(), 1);
        assert_eq!(AgentId::First.opponent(), AgentId::Second);
        assert_eq!(AgentId::Second.opponent(), AgentId::First);
        assert_eq!(format!("{}", AgentId::First), "Agent 1");
        assert_eq!(format!("{}", AgentId::Second), "Agent 2");
    }

    #[test]
    fn test_per_agent_new() {
        let map: PerAgent<usize> = PerAgent::new(|a| a.index() * 10);

        assert_eq!(map[AgentId::First], 0);
        assert_eq!(map[AgentId::Second], 10);
    }

    #[test]
    fn test_per_agent_mutation() {
        let mut map: PerAgent<i64> = PerAgent::with_value(0);

        map[AgentId::First] = -35;
        map[AgentId::Second] += 3;

        assert_eq!(map[AgentId::First], -35);
        assert_eq!(map[AgentId::Second], 3);
    }

    #[test]
    fn test_per_agent_iter_order() {
        let map = PerAgent::from_pair("a", "b");

        let pairs: Vec<_> = map.iter().collect();
        assert_eq!(pairs, vec![(AgentId::First, &"a"), (AgentId::Second, &"b")]);
    }

    #[test]
    fn test_per_agent_map() {
        let map = PerAgent::from_pair(2, 5);
        let doubled = map.map(|_, v| v * 2);

        assert_eq!(doubled, PerAgent::from_pair(4, 10));
    }

    #[test]
    fn test_per_agent_serialization() {
        let map = PerAgent::from_pair(1i64, -2i64);
        let json = serde_json::to_string(&map).unwrap();
        let deserialized: PerAgent<i64> = serde_json::from_str(&json).unwrap();
        assert_eq!(map, deserialized);
    }
}
