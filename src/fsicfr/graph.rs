//! The decision graph: every information set of the game, built once.
//!
//! Decision points form a DAG, not a tree: one claim can be reached through
//! many different histories, and all of them share a single node. The graph
//! therefore stores nodes in two flat arenas and resolves structural keys
//! to arena slots through an index map, so multiple parents can reference
//! the same child slot without any ownership conflict. No node is ever
//! deleted and no arena is ever resized after construction.
//!
//! Two node families exist:
//! - **Response nodes**, keyed `(my_level, opp_level)` with
//!   `my_level < opp_level <= sides`: the acting player has committed to
//!   `my_level` and faces the opponent's higher commitment. One action when
//!   the opponent's level is at either extreme (a forced accept at level 0,
//!   a forced doubt at the maximum), else two (doubt or accept).
//! - **Claim nodes**, keyed `(opp_level, roll)` with `opp_level < sides`:
//!   the acting player has seen a private roll and must commit to one of
//!   the `sides - opp_level` levels above the opponent's.

use rustc_hash::FxHashMap;

use crate::fsicfr::config::SolverError;
use crate::fsicfr::node::Node;

/// Action index for doubting the opponent's commitment.
pub const DOUBT: usize = 0;
/// Action index for accepting the opponent's commitment.
pub const ACCEPT: usize = 1;

/// All information-set nodes of a game, indexed by structural key.
#[derive(Debug, Clone)]
pub struct DecisionGraph {
    sides: usize,
    response: Vec<Node>,
    claim: Vec<Node>,
    response_index: FxHashMap<(usize, usize), usize>,
    claim_index: FxHashMap<(usize, usize), usize>,
}

impl DecisionGraph {
    /// Allocate and index every node for a game with `sides` outcomes.
    ///
    /// Fails with [`SolverError::Configuration`] when `sides` is zero; no
    /// partial graph is built in that case.
    pub fn build(sides: usize) -> Result<Self, SolverError> {
        if sides == 0 {
            return Err(SolverError::Configuration(
                "sides must be a positive integer".to_string(),
            ));
        }

        let mut response = Vec::new();
        let mut response_index = FxHashMap::default();
        for (my_level, opp_level) in Self::response_key_range(sides) {
            let num_actions = if opp_level == 0 || opp_level == sides {
                1
            } else {
                2
            };
            response_index.insert((my_level, opp_level), response.len());
            response.push(Node::new(num_actions));
        }

        let mut claim = Vec::new();
        let mut claim_index = FxHashMap::default();
        for (opp_level, roll) in Self::claim_key_range(sides) {
            claim_index.insert((opp_level, roll), claim.len());
            claim.push(Node::new(sides - opp_level));
        }

        Ok(Self {
            sides,
            response,
            claim,
            response_index,
            claim_index,
        })
    }

    /// Number of distinct chance outcomes this graph was built for.
    pub fn sides(&self) -> usize {
        self.sides
    }

    /// Look up the response node for `(my_level, opp_level)`.
    pub fn response(&self, my_level: usize, opp_level: usize) -> Result<&Node, SolverError> {
        let slot = self.response_slot(my_level, opp_level)?;
        Ok(&self.response[slot])
    }

    /// Mutable response-node lookup.
    pub fn response_mut(
        &mut self,
        my_level: usize,
        opp_level: usize,
    ) -> Result<&mut Node, SolverError> {
        let slot = self.response_slot(my_level, opp_level)?;
        Ok(&mut self.response[slot])
    }

    /// Look up the claim node for `(opp_level, roll)`.
    pub fn claim(&self, opp_level: usize, roll: usize) -> Result<&Node, SolverError> {
        let slot = self.claim_slot(opp_level, roll)?;
        Ok(&self.claim[slot])
    }

    /// Mutable claim-node lookup.
    pub fn claim_mut(&mut self, opp_level: usize, roll: usize) -> Result<&mut Node, SolverError> {
        let slot = self.claim_slot(opp_level, roll)?;
        Ok(&mut self.claim[slot])
    }

    /// Total number of nodes across both families.
    pub fn num_nodes(&self) -> usize {
        self.response.len() + self.claim.len()
    }

    /// Iterate response nodes with their keys, in ascending key order.
    pub fn response_entries(&self) -> impl Iterator<Item = ((usize, usize), &Node)> + '_ {
        Self::response_key_range(self.sides).zip(self.response.iter())
    }

    /// Iterate claim nodes with their keys, in ascending key order.
    pub fn claim_entries(&self) -> impl Iterator<Item = ((usize, usize), &Node)> + '_ {
        Self::claim_key_range(self.sides).zip(self.claim.iter())
    }

    /// Zero every node's accumulated strategy sum.
    ///
    /// Regret sums are untouched; they must keep accumulating for the
    /// whole training run.
    pub fn reset_strategy_sums(&mut self) {
        for node in self.response.iter_mut().chain(self.claim.iter_mut()) {
            node.strategy_sum.fill(0.0);
        }
    }

    fn response_slot(&self, my_level: usize, opp_level: usize) -> Result<usize, SolverError> {
        self.response_index
            .get(&(my_level, opp_level))
            .copied()
            .ok_or_else(|| {
                SolverError::InternalConsistency(format!(
                    "no response node for my_level {} vs opp_level {}",
                    my_level, opp_level
                ))
            })
    }

    fn claim_slot(&self, opp_level: usize, roll: usize) -> Result<usize, SolverError> {
        self.claim_index
            .get(&(opp_level, roll))
            .copied()
            .ok_or_else(|| {
                SolverError::InternalConsistency(format!(
                    "no claim node for opp_level {} with roll {}",
                    opp_level, roll
                ))
            })
    }

    /// Key enumeration shared by construction and iteration, so arena order
    /// always matches key order.
    fn response_key_range(sides: usize) -> impl Iterator<Item = (usize, usize)> {
        (0..sides).flat_map(move |my_level| {
            (my_level + 1..=sides).map(move |opp_level| (my_level, opp_level))
        })
    }

    fn claim_key_range(sides: usize) -> impl Iterator<Item = (usize, usize)> {
        (0..sides).flat_map(move |opp_level| (1..=sides).map(move |roll| (opp_level, roll)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_counts_grow_quadratically() {
        let graph = DecisionGraph::build(6).unwrap();
        // Response: one per (my, opp) pair with my < opp <= 6.
        assert_eq!(graph.response_entries().count(), 21);
        // Claim: one per (opp, roll) pair with opp < 6, 1 <= roll <= 6.
        assert_eq!(graph.claim_entries().count(), 36);
        assert_eq!(graph.num_nodes(), 57);
    }

    #[test]
    fn response_action_counts_follow_the_extremes_rule() {
        let graph = DecisionGraph::build(6).unwrap();
        for ((_, opp_level), node) in graph.response_entries() {
            let expected = if opp_level == 6 { 1 } else { 2 };
            assert_eq!(node.num_actions, expected);
        }
    }

    #[test]
    fn claim_action_counts_are_the_admissible_higher_levels() {
        let graph = DecisionGraph::build(6).unwrap();
        for ((opp_level, _), node) in graph.claim_entries() {
            assert_eq!(node.num_actions, 6 - opp_level);
        }
    }

    #[test]
    fn zero_sides_builds_nothing() {
        let err = DecisionGraph::build(0).unwrap_err();
        assert!(matches!(err, SolverError::Configuration(_)));
    }

    #[test]
    fn invalid_keys_fail_fast() {
        let mut graph = DecisionGraph::build(3).unwrap();

        // Opponent level must exceed own level.
        assert!(matches!(
            graph.response(2, 1),
            Err(SolverError::InternalConsistency(_))
        ));
        // Claim nodes stop below the maximum level.
        assert!(matches!(
            graph.claim(3, 1),
            Err(SolverError::InternalConsistency(_))
        ));
        // Rolls are 1-based.
        assert!(matches!(
            graph.claim_mut(0, 0),
            Err(SolverError::InternalConsistency(_))
        ));
        assert!(matches!(
            graph.response_mut(1, 4),
            Err(SolverError::InternalConsistency(_))
        ));
    }

    #[test]
    fn one_sided_game_is_minimal() {
        let graph = DecisionGraph::build(1).unwrap();
        assert_eq!(graph.claim_entries().count(), 1);
        assert_eq!(graph.response_entries().count(), 1);
        // Both nodes admit a single action, so every strategy is [1.0].
        assert_eq!(graph.claim(0, 1).unwrap().num_actions, 1);
        assert_eq!(graph.response(0, 1).unwrap().num_actions, 1);
    }

    #[test]
    fn entry_order_is_deterministic() {
        let graph = DecisionGraph::build(3).unwrap();
        let keys: Vec<_> = graph.response_entries().map(|(k, _)| k).collect();
        assert_eq!(keys, vec![(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)]);

        let claim_keys: Vec<_> = graph.claim_entries().map(|(k, _)| k).collect();
        assert_eq!(claim_keys[0], (0, 1));
        assert_eq!(claim_keys.last(), Some(&(2, 3)));
    }

    #[test]
    fn strategy_sum_reset_leaves_regret_alone() {
        let mut graph = DecisionGraph::build(2).unwrap();
        {
            let node = graph.claim_mut(0, 1).unwrap();
            node.regret_sum[0] = 3.0;
            node.strategy_sum[0] = 5.0;
        }
        graph.reset_strategy_sums();
        let node = graph.claim(0, 1).unwrap();
        assert_eq!(node.strategy_sum[0], 0.0);
        assert_eq!(node.regret_sum[0], 3.0);
    }
}
