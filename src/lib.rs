//! # FSICFR Solver
//!
//! A Fixed-Strategy-Iteration Counterfactual Regret Minimization (FSICFR)
//! solver computing Nash equilibrium strategies for a two-player
//! dice-bluffing game whose decision points form a DAG.
//!
//! ## Features
//!
//! - **One node per information set**: claims reachable through many
//!   histories share a single node instead of being revisited per history
//! - **Two-sweep iterations**: reach probabilities flow forward and
//!   utilities flow backward in plain topological loops
//! - **Fixed chance outcomes**: all rolls are drawn once per iteration, the
//!   property that makes DAG sharing sound
//! - **Reproducible training**: a seedable, pluggable chance source yields
//!   byte-identical average strategies
//!
//! ## Quick Start
//!
//! ```
//! use fsicfr_solver::fsicfr::{LiarDieTrainer, StrategyTable, TrainerConfig};
//!
//! // 1. Configure the game size (and a seed for reproducibility)
//! let config = TrainerConfig::new(6).with_seed(42);
//!
//! // 2. Train
//! let mut trainer = LiarDieTrainer::new(config).unwrap();
//! trainer.train(10_000).unwrap();
//!
//! // 3. Extract equilibrium strategies
//! let table = StrategyTable::from_trainer(&trainer);
//! assert!(!table.claims.is_empty());
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  LiarDieTrainer (solver)                 │
//! │  - chance fixing     - forward reach sweep               │
//! │  - backward regret sweep   - midpoint strategy reset     │
//! └──────────────────────────────────────────────────────────┘
//!                │                          │
//!                ▼                          ▼
//!       ┌─────────────────┐        ┌─────────────────┐
//!       │  DecisionGraph  │        │   ChanceSource  │
//!       │  (node arenas,  │        │  (seedable RNG  │
//!       │   key index)    │        │   or scripted)  │
//!       └─────────────────┘        └─────────────────┘
//!                │
//!                ▼
//!       ┌─────────────────┐
//!       │      Node       │
//!       │ (regret match,  │
//!       │  reach, average)│
//!       └─────────────────┘
//! ```

#![warn(missing_docs)]

/// FSICFR solver module.
///
/// This is the core module containing the DAG-based regret-matching
/// trainer.
pub mod fsicfr;

// Re-export commonly used types at crate root for convenience
pub use fsicfr::{
    ChanceSource, DecisionGraph, FixedRolls, LiarDieTrainer, Node, SolverError, StrategyTable,
    TrainerConfig, TrainerStats,
};
