//! Strategy extraction for downstream consumers.
//!
//! Training produces one average strategy vector per information set. This
//! module packages them, keyed by structural key and in a deterministic
//! order, so external tooling can format or export them however it likes;
//! formatting itself lives outside this crate.

use serde::{Deserialize, Serialize};

use crate::fsicfr::chance::ChanceSource;
use crate::fsicfr::solver::LiarDieTrainer;

/// Average strategy of one response node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseStrategy {
    /// The acting player's own prior commitment level.
    pub my_level: usize,
    /// The opponent's current commitment level.
    pub opp_level: usize,
    /// Average action probabilities: doubt first, then accept when
    /// admissible.
    pub strategy: Vec<f64>,
}

/// Average strategy of one claim node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimStrategy {
    /// The opponent's prior commitment level.
    pub opp_level: usize,
    /// The private roll seen before claiming.
    pub roll: usize,
    /// Average probabilities for claiming each admissible level, lowest
    /// first.
    pub strategy: Vec<f64>,
}

/// Every node's average strategy, with training metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyTable {
    /// Number of distinct chance outcomes the game was built with.
    pub sides: usize,
    /// Iterations completed when the table was taken.
    pub iterations: u64,
    /// Response-node strategies in ascending key order.
    pub responses: Vec<ResponseStrategy>,
    /// Claim-node strategies in ascending key order.
    pub claims: Vec<ClaimStrategy>,
}

impl StrategyTable {
    /// Extract the full table from a trainer.
    pub fn from_trainer<C: ChanceSource>(trainer: &LiarDieTrainer<C>) -> Self {
        let graph = trainer.graph();

        let responses = graph
            .response_entries()
            .map(|((my_level, opp_level), node)| ResponseStrategy {
                my_level,
                opp_level,
                strategy: node.average_strategy(),
            })
            .collect();

        let claims = graph
            .claim_entries()
            .map(|((opp_level, roll), node)| ClaimStrategy {
                opp_level,
                roll,
                strategy: node.average_strategy(),
            })
            .collect();

        Self {
            sides: graph.sides(),
            iterations: trainer.iteration(),
            responses,
            claims,
        }
    }
}
