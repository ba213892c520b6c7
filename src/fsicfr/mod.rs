//! Fixed-Strategy-Iteration CFR (FSICFR) solver module.
//!
//! This module implements regret-matching equilibrium search for a
//! two-player imperfect-information dice-bluffing game whose decision
//! points form a DAG rather than a tree.
//!
//! # Overview
//!
//! Tree-recursive CFR visits one node per game history. When the same
//! information set is reachable through many histories that is redundant
//! and exponentially wasteful; FSICFR keeps one node per distinct
//! information set instead and, per iteration:
//!
//! 1. Fixes all chance outcomes up front, so every path through the DAG
//!    observes the same rolls
//! 2. Sweeps forward through commitment levels, recomputing strategies by
//!    regret matching and accumulating reach probability across converging
//!    parents
//! 3. Sweeps backward, folding utilities down to the root with zero-sum
//!    sign flips at turn changes, accumulating counterfactual regret, and
//!    zeroing each node's reach for the next iteration
//!
//! The average strategy, accumulated under reach weighting and restarted
//! once at the training midpoint, converges to a Nash equilibrium
//! approximation.
//!
//! # Usage
//!
//! 1. Build a [`TrainerConfig`] with the number of die sides (and a seed
//!    for reproducibility)
//! 2. Create a [`LiarDieTrainer`] and call [`LiarDieTrainer::train`]
//! 3. Extract strategies per node or as a whole [`StrategyTable`]
//!
//! # Example
//!
//! ```
//! use fsicfr_solver::fsicfr::{LiarDieTrainer, StrategyTable, TrainerConfig};
//!
//! let config = TrainerConfig::new(6).with_seed(42);
//! let mut trainer = LiarDieTrainer::new(config).unwrap();
//! let stats = trainer.train(10_000).unwrap();
//! println!("{} nodes trained in {:.2}s", stats.nodes, stats.elapsed_seconds);
//!
//! let table = StrategyTable::from_trainer(&trainer);
//! assert_eq!(table.iterations, 10_000);
//! ```
//!
//! # References
//!
//! - Neller, T., Hnath, S. "Approximating Optimal Dudo Play with
//!   Fixed-Strategy Iteration Counterfactual Regret Minimization" (2011)
//! - Neller, T., Lanctot, M. "An Introduction to Counterfactual Regret
//!   Minimization" (2013)

pub mod chance;
pub mod config;
pub mod graph;
pub mod node;
pub mod output;
pub mod solver;

// Re-export main types for convenient access
pub use chance::{ChanceSource, FixedRolls};
pub use config::{SolverError, TrainerConfig, TrainerStats};
pub use graph::{DecisionGraph, ACCEPT, DOUBT};
pub use node::Node;
pub use output::{ClaimStrategy, ResponseStrategy, StrategyTable};
pub use solver::LiarDieTrainer;
