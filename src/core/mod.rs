//! Core engine types: agents, positions, hands, state, RNG, configuration.
//!
//! Everything here is independent of how decisions are made; the sandbox
//! and turn engine build on these types.

pub mod agent;
pub mod config;
pub mod error;
pub mod hand;
pub mod position;
pub mod rng;
pub mod state;

pub use agent::{AgentId, PerAgent};
pub use config::{MazeConfig, RulesConfig, ScoringConfig, SimulationConfig, TimingConfig};
pub use error::{ConfigError, Error, StateError};
pub use hand::Hand;
pub use position::{Direction, Position};
pub use rng::{GameRng, GameRngState};
pub use state::{AgentState, GameState};
