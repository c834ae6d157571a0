//! Simulation-level errors.
//!
//! Agent faults (timeouts, panics, illegal moves) are not errors: the
//! sandbox absorbs them. The types here are for integration mistakes and
//! bad configuration, and are always returned to the caller.

use std::path::PathBuf;

use thiserror::Error;

/// Misuse of the engine's lifecycle, or a maze too small to use.
#[derive(Debug, Error)]
pub enum StateError {
    #[error("agents already registered")]
    AgentsAlreadyRegistered,

    #[error("no agents registered")]
    NoAgentsRegistered,

    #[error("simulation finished after {steps} steps")]
    SimulationFinished { steps: u32 },

    #[error("no free cell left in a {width}x{height} maze")]
    NoFreeCell { width: usize, height: usize },

    #[error("failed to start worker for {agent}")]
    WorkerSpawn {
        agent: String,
        #[source]
        source: std::io::Error,
    },
}

/// Invalid construction-time configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("a {width}x{height} maze (after rounding to odd) has fewer than two open cells")]
    MazeTooSmall { width: usize, height: usize },

    #[error("step count must be positive")]
    NoSteps,

    #[error("max_time_ms must be positive")]
    NoTimeBudget,

    #[error("invalid score tiers: {0}")]
    Tiers(String),

    #[error("ratio `{name}` must be within [0, 1], got {value}")]
    Ratio { name: &'static str, value: f64 },

    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Either kind of failure from building an engine.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    State(#[from] StateError),
}
