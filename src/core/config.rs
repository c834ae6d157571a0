//! Simulation configuration.
//!
//! A `SimulationConfig` is built once, validated, and then treated as
//! immutable: the engine keeps its own copy and every agent gets a clone.
//!
//! ## Sections
//!
//! - `MazeConfig`: dimensions and seed
//! - `TimingConfig`: step count, delays, per-decision time budget
//! - `ScoringConfig`: cell tiers, seeding ratios, penalties, encounter bonus
//! - `RulesConfig`: type-advantage mode and cell regeneration
//!
//! Configs can be loaded from TOML; missing keys fall back to defaults.
//!
//! ```
//! use maze_duel::core::SimulationConfig;
//!
//! let config = SimulationConfig::from_toml_str(r#"
//!     [maze]
//!     width = 21
//!     height = 15
//!     seed = 42
//!
//!     [rules]
//!     regenerate_cells = true
//! "#).unwrap();
//!
//! assert_eq!(config.maze.width, 21);
//! assert_eq!(config.timing.max_time_ms, 500);
//! assert!(config.rules.regenerate_cells);
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Maze dimensions and randomness.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MazeConfig {
    /// Requested width in cells. Rounded down to an odd count.
    pub width: usize,

    /// Requested height in cells. Rounded down to an odd count.
    pub height: usize,

    /// RNG seed. `None` means nondeterministic.
    pub seed: Option<u64>,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            width: 40,
            height: 30,
            seed: None,
        }
    }
}

impl MazeConfig {
    /// Width of the generated grid (odd, rounded down).
    #[must_use]
    pub fn grid_width(&self) -> usize {
        odd_extent(self.width)
    }

    /// Height of the generated grid (odd, rounded down).
    #[must_use]
    pub fn grid_height(&self) -> usize {
        odd_extent(self.height)
    }
}

/// Largest odd extent `2k + 1` not exceeding `requested` (1 for tiny inputs).
#[must_use]
pub fn odd_extent(requested: usize) -> usize {
    requested.saturating_sub(1) / 2 * 2 + 1
}

/// Step count and time budgets.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Number of steps to simulate.
    pub steps: u32,

    /// Pause between steps when running with an observer (ms).
    pub step_delay_ms: u64,

    /// Pause before the first step when running with an observer (ms).
    pub start_delay_ms: u64,

    /// Wall-clock budget for one decision call (ms).
    pub max_time_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            steps: 1000,
            step_delay_ms: 0,
            start_delay_ms: 0,
            max_time_ms: 500,
        }
    }
}

/// Cell tiers, seeding ratios, and penalties.
///
/// Tier ranges are inclusive:
/// - tier 1 rewards: `1..=score1_value`
/// - tier 2 rewards: `score1_value + 1..=score2_value`
/// - penalties: `score_min_value..=-3`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub score1_value: i32,
    pub score2_value: i32,
    pub score_min_value: i32,

    /// Ratios of the empty-cell count seeded with each tier.
    pub count_score1: f64,
    pub count_score2: f64,
    pub count_score_min: f64,
    pub count_refresh: f64,

    /// Bonus for the winner of a type-advantage encounter.
    pub cross_bonus: i64,

    /// Penalty for returning an illegal move.
    pub on_bad_move: i64,

    /// Penalty for a decision that panicked or returned an error.
    pub on_exception: i64,

    /// Penalty for exceeding the time budget.
    pub on_timeout: i64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            score1_value: 3,
            score2_value: 11,
            score_min_value: -10,
            count_score1: 0.25,
            count_score2: 0.10,
            count_score_min: 0.15,
            count_refresh: 0.05,
            cross_bonus: 17,
            on_bad_move: -20,
            on_exception: -50,
            on_timeout: -15,
        }
    }
}

/// Optional rule sets.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Enables hands, refresh cells, and same-cell encounters.
    pub type_advantage: bool,

    /// Re-seed a same-tier cell elsewhere whenever one is consumed.
    pub regenerate_cells: bool,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            type_advantage: true,
            regenerate_cells: false,
        }
    }
}

/// Complete simulation configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub maze: MazeConfig,
    pub timing: TimingConfig,
    pub scoring: ScoringConfig,
    pub rules: RulesConfig,
}

impl SimulationConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse, and validate a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Check every invariant the engine relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (width, height) = (self.maze.grid_width(), self.maze.grid_height());
        // Two agents need two open cells: at least two rooms of the carving grid.
        if (width / 2) * (height / 2) < 2 {
            return Err(ConfigError::MazeTooSmall { width, height });
        }
        if self.timing.steps == 0 {
            return Err(ConfigError::NoSteps);
        }
        if self.timing.max_time_ms == 0 {
            return Err(ConfigError::NoTimeBudget);
        }

        let s = &self.scoring;
        if s.score1_value < 1 {
            return Err(ConfigError::Tiers(format!(
                "score1_value must be >= 1, got {}",
                s.score1_value
            )));
        }
        if s.score2_value <= s.score1_value {
            return Err(ConfigError::Tiers(format!(
                "score2_value ({}) must exceed score1_value ({})",
                s.score2_value, s.score1_value
            )));
        }
        if s.score_min_value > -3 {
            return Err(ConfigError::Tiers(format!(
                "score_min_value must be <= -3, got {}",
                s.score_min_value
            )));
        }

        for (name, value) in [
            ("count_score1", s.count_score1),
            ("count_score2", s.count_score2),
            ("count_score_min", s.count_score_min),
            ("count_refresh", s.count_refresh),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Ratio { name, value });
            }
        }

        Ok(())
    }

    /// Per-decision time budget.
    #[must_use]
    pub fn max_time(&self) -> Duration {
        Duration::from_millis(self.timing.max_time_ms)
    }

    /// Pause between observed steps.
    #[must_use]
    pub fn step_delay(&self) -> Duration {
        Duration::from_millis(self.timing.step_delay_ms)
    }

    /// Pause before the first observed step.
    #[must_use]
    pub fn start_delay(&self) -> Duration {
        Duration::from_millis(self.timing.start_delay_ms)
    }

    // === Builders ===

    /// Set requested maze dimensions.
    #[must_use]
    pub fn with_dimensions(mut self, width: usize, height: usize) -> Self {
        self.maze.width = width;
        self.maze.height = height;
        self
    }

    /// Set the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.maze.seed = Some(seed);
        self
    }

    /// Set the number of steps.
    #[must_use]
    pub fn with_steps(mut self, steps: u32) -> Self {
        self.timing.steps = steps;
        self
    }

    /// Set the per-decision time budget in milliseconds.
    #[must_use]
    pub fn with_max_time_ms(mut self, ms: u64) -> Self {
        self.timing.max_time_ms = ms;
        self
    }

    /// Set the pause between observed steps in milliseconds.
    #[must_use]
    pub fn with_step_delay_ms(mut self, ms: u64) -> Self {
        self.timing.step_delay_ms = ms;
        self
    }

    /// Enable or disable type-advantage mode.
    #[must_use]
    pub fn with_type_advantage(mut self, enabled: bool) -> Self {
        self.rules.type_advantage = enabled;
        self
    }

    /// Enable or disable cell regeneration.
    #[must_use]
    pub fn with_regeneration(mut self, enabled: bool) -> Self {
        self.rules.regenerate_cells = enabled;
        self
    }

    /// Replace the scoring table.
    #[must_use]
    pub fn with_scoring(mut self, scoring: ScoringConfig) -> Self {
        self.scoring = scoring;
        self
    }
}
