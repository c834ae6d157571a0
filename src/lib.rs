//! # maze-duel
//!
//! A two-agent competitive maze simulation. Player-supplied decision
//! functions race around a procedurally generated maze for a fixed number
//! of steps, collecting rewards, avoiding penalties, and (optionally)
//! fighting rock-paper-scissors encounters.
//!
//! ## Design Principles
//!
//! 1. **Untrusted agents**: decision functions run on their own worker
//!    threads behind a deadline. Panics, errors, slow answers, and illegal
//!    moves are penalised and replaced by a random legal move; the run
//!    always reaches its step limit.
//!
//! 2. **Deterministic by seed**: a single ChaCha8 RNG drives generation and
//!    every engine-side random choice. The seed is always recorded.
//!
//! 3. **Snapshots, not shared state**: agents and observers see persistent
//!    copies of the maze (`im-rs`), never the engine's own state.
//!
//! ## Modules
//!
//! - `core`: positions, hands, agent seats, state, RNG, configuration, errors
//! - `maze`: grid representation and generation
//! - `sandbox`: the agent contract and fault handling
//! - `engine`: turn sequencing, pickups, encounters, events, observers
//! - `agents`: reference agents
//!
//! ## Example
//!
//! ```
//! use maze_duel::{RandomWalker, SimulationConfig, TurnEngine, Wanderer};
//!
//! let config = SimulationConfig::new()
//!     .with_dimensions(21, 15)
//!     .with_seed(42)
//!     .with_steps(20);
//! let mut engine = TurnEngine::new(config).unwrap();
//! engine.register_pair(RandomWalker::new(1), Wanderer::new(2)).unwrap();
//!
//! let result = engine.run(&mut ()).unwrap();
//! assert_eq!(result.steps, 20);
//! ```

pub mod agents;
pub mod core;
pub mod engine;
pub mod maze;
pub mod sandbox;

// Re-export commonly used types
pub use crate::core::{
    AgentId, AgentState, ConfigError, Direction, Error, GameRng, GameRngState, GameState, Hand,
    PerAgent, Position, SimulationConfig, StateError,
};

pub use crate::maze::{CellKind, Maze};

pub use crate::sandbox::{
    Agent, AgentError, AgentSandbox, Fault, FaultKind, FaultTally, FnAgent, Observation, Verdict,
};

pub use crate::engine::{
    GameEvent, Observer, Outcome, Phase, ScoreCause, SimulationResult, Snapshot, TracingObserver,
    TurnEngine,
};

pub use crate::agents::{RandomWalker, Wanderer};
