//! Configuration, errors, and statistics for the FSICFR trainer.
//!
//! The trainer is parameterized by a single game-size value (`sides`, the
//! number of distinct chance outcomes) and an optional random seed for
//! reproducible training runs.

use serde::{Deserialize, Serialize};

/// Configuration for the FSICFR trainer.
///
/// # Example
/// ```
/// use fsicfr_solver::fsicfr::TrainerConfig;
///
/// let config = TrainerConfig::new(6).with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainerConfig {
    /// Number of distinct chance outcomes (die sides).
    ///
    /// Bounds the size of the decision graph as O(sides²). Must be positive.
    pub sides: usize,

    /// Random seed for reproducibility.
    ///
    /// If set, the trainer draws all chance outcomes from a deterministic
    /// generator seeded with this value, making average strategies
    /// byte-identical across runs. If `None`, a random seed is used.
    pub seed: Option<u64>,
}

impl TrainerConfig {
    /// Create a configuration for a game with the given number of sides.
    pub fn new(sides: usize) -> Self {
        Self { sides, seed: None }
    }

    /// Builder method: set the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validate the configuration and return any errors.
    pub fn validate(&self) -> Result<(), SolverError> {
        if self.sides == 0 {
            return Err(SolverError::Configuration(
                "sides must be a positive integer".to_string(),
            ));
        }
        Ok(())
    }
}

/// Errors raised by the solver.
///
/// There are only two failure classes and neither is transient: a rejected
/// configuration, detected before anything is built, and an internal
/// consistency violation, which indicates a graph-construction or
/// pass-ordering bug and is never expected in correct operation. No
/// operation is retried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolverError {
    /// A construction parameter is out of range. No partial graph is built.
    Configuration(String),

    /// A structural key fell outside the valid node domain.
    InternalConsistency(String),
}

impl std::fmt::Display for SolverError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolverError::Configuration(reason) => {
                write!(f, "invalid configuration: {}", reason)
            }
            SolverError::InternalConsistency(reason) => {
                write!(f, "internal consistency violation: {}", reason)
            }
        }
    }
}

impl std::error::Error for SolverError {}

/// Statistics tracked during training.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrainerStats {
    /// Total number of iterations completed.
    pub iterations: u64,

    /// Number of information-set nodes in the decision graph.
    pub nodes: usize,

    /// Total time spent training (in seconds).
    pub elapsed_seconds: f64,

    /// Iterations per second.
    pub iterations_per_second: f64,
}

impl TrainerStats {
    /// Create new empty stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Update iterations per second based on elapsed time.
    pub fn update_rate(&mut self) {
        if self.elapsed_seconds > 0.0 {
            self.iterations_per_second = self.iterations as f64 / self.elapsed_seconds;
        }
    }
}
