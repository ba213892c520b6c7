//! Per-information-set node state and regret matching.
//!
//! One [`Node`] exists per distinct information set. Because the decision
//! points form a DAG, a node may be reached through many different
//! histories within a single iteration; the reach fields accumulate the
//! probability mass arriving from all of them.
//!
//! Accumulation discipline across fields differs and matters:
//! - `regret_sum` accumulates for the whole training run and is never reset
//! - `strategy_sum` accumulates but is zeroed once at the training midpoint
//! - `strategy` and `utility` are scratch values, valid only within the
//!   iteration that computed them
//! - `my_reach`/`opp_reach` are written by the forward pass and consumed
//!   (and zeroed) by the backward pass of the same iteration

/// One information set's accumulated data.
#[derive(Debug, Clone)]
pub struct Node {
    /// Number of actions available at this information set. Fixed at
    /// construction.
    pub num_actions: usize,
    /// Cumulative counterfactual regret for each action. Never reset.
    pub regret_sum: Vec<f64>,
    /// Current-iteration strategy, overwritten by each recomputation.
    pub strategy: Vec<f64>,
    /// Cumulative reach-weighted strategy, for the average strategy.
    pub strategy_sum: Vec<f64>,
    /// Expected utility of this node for the player acting here, recomputed
    /// every iteration by the backward pass.
    pub utility: f64,
    /// Accumulated probability that the acting player reaches this node.
    pub my_reach: f64,
    /// Accumulated probability that the opponent reaches this node.
    pub opp_reach: f64,
}

impl Node {
    /// Create a node with the given action count and all accumulators at
    /// zero.
    pub fn new(num_actions: usize) -> Self {
        Self {
            num_actions,
            regret_sum: vec![0.0; num_actions],
            strategy: vec![0.0; num_actions],
            strategy_sum: vec![0.0; num_actions],
            utility: 0.0,
            my_reach: 0.0,
            opp_reach: 0.0,
        }
    }

    /// Recompute the current strategy via regret matching.
    ///
    /// The strategy is proportional to positive accumulated regrets. If all
    /// regrets are non-positive, the strategy falls back to uniform; that is
    /// the exploration policy, not an error. Immediately after this call
    /// `strategy` is a probability vector.
    ///
    /// Side effect: accumulates `my_reach * strategy` into `strategy_sum`,
    /// so the time-averaged strategy is weighted by how often this node
    /// actually mattered.
    pub fn compute_strategy(&mut self) {
        let mut normalizing_sum = 0.0;
        for a in 0..self.num_actions {
            self.strategy[a] = self.regret_sum[a].max(0.0);
            normalizing_sum += self.strategy[a];
        }

        if normalizing_sum > 0.0 {
            for p in self.strategy.iter_mut() {
                *p /= normalizing_sum;
            }
        } else {
            let uniform = 1.0 / self.num_actions as f64;
            self.strategy.fill(uniform);
        }

        for a in 0..self.num_actions {
            self.strategy_sum[a] += self.my_reach * self.strategy[a];
        }
    }

    /// Average strategy over all iterations since the last strategy-sum
    /// reset.
    ///
    /// This is the converged output of training and is only meaningful
    /// after many iterations. Returns uniform when nothing has accumulated.
    pub fn average_strategy(&self) -> Vec<f64> {
        let total: f64 = self.strategy_sum.iter().sum();
        if total > 0.0 {
            self.strategy_sum.iter().map(|&s| s / total).collect()
        } else {
            vec![1.0 / self.num_actions as f64; self.num_actions]
        }
    }

    /// Backward-pass update: fold per-action utilities into this node.
    ///
    /// Sets `utility` to the expectation of `action_utils` under the
    /// current strategy, accumulates counterfactual regret weighted by the
    /// opponent's reach, and zeroes both reach fields so the next
    /// iteration starts from a clean slate.
    pub fn propagate_utilities(&mut self, action_utils: &[f64]) {
        debug_assert_eq!(
            action_utils.len(),
            self.num_actions,
            "utility vector length must match the node's action count"
        );

        self.utility = self
            .strategy
            .iter()
            .zip(action_utils.iter())
            .map(|(&p, &u)| p * u)
            .sum();

        for (a, &util) in action_utils.iter().enumerate() {
            self.regret_sum[a] += self.opp_reach * (util - self.utility);
        }

        self.my_reach = 0.0;
        self.opp_reach = 0.0;
    }

    /// Whether no reach mass arrived at this node in the current iteration.
    ///
    /// Unreached nodes are a valid and common case: the fixed chance
    /// outcomes activate only one claim node per commitment level.
    pub fn is_unreached(&self) -> bool {
        self.my_reach == 0.0 && self.opp_reach == 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_with_no_regret() {
        let mut node = Node::new(3);
        node.compute_strategy();
        for &p in &node.strategy {
            assert!((p - 1.0 / 3.0).abs() < 1e-9);
        }
    }

    #[test]
    fn regret_matching_proportional() {
        let mut node = Node::new(2);
        node.regret_sum = vec![3.0, 1.0];
        node.compute_strategy();
        assert!((node.strategy[0] - 0.75).abs() < 1e-9);
        assert!((node.strategy[1] - 0.25).abs() < 1e-9);
    }

    #[test]
    fn negative_regret_excluded() {
        let mut node = Node::new(2);
        node.regret_sum = vec![-5.0, 3.0];
        node.compute_strategy();
        assert!((node.strategy[0] - 0.0).abs() < 1e-9);
        assert!((node.strategy[1] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn strategy_is_probability_vector_after_recomputation() {
        let mut node = Node::new(4);
        node.regret_sum = vec![2.5, -1.0, 0.0, 7.5];
        node.compute_strategy();
        let total: f64 = node.strategy.iter().sum();
        assert!((total - 1.0).abs() < 1e-9);
        assert!(node.strategy.iter().all(|&p| p >= 0.0));
    }

    #[test]
    fn strategy_sum_weighted_by_reach() {
        let mut node = Node::new(2);
        node.regret_sum = vec![1.0, 1.0];
        node.my_reach = 0.5;
        node.compute_strategy();
        // Uniform [0.5, 0.5] weighted by my_reach 0.5.
        assert!((node.strategy_sum[0] - 0.25).abs() < 1e-9);
        assert!((node.strategy_sum[1] - 0.25).abs() < 1e-9);

        // A second visit with different reach keeps accumulating.
        node.my_reach = 1.0;
        node.compute_strategy();
        assert!((node.strategy_sum[0] - 0.75).abs() < 1e-9);
    }

    #[test]
    fn unreached_node_accumulates_nothing() {
        let mut node = Node::new(2);
        node.regret_sum = vec![4.0, 1.0];
        node.compute_strategy();
        assert_eq!(node.strategy_sum, vec![0.0, 0.0]);
    }

    #[test]
    fn average_strategy_normalizes() {
        let mut node = Node::new(2);
        node.strategy_sum = vec![0.6, 0.2];
        let avg = node.average_strategy();
        assert!((avg[0] - 0.75).abs() < 1e-9);
        assert!((avg[1] - 0.25).abs() < 1e-9);
    }

    #[test]
    fn average_strategy_uniform_when_empty() {
        let node = Node::new(5);
        let avg = node.average_strategy();
        for &p in &avg {
            assert!((p - 0.2).abs() < 1e-9);
        }
    }

    #[test]
    fn propagate_utilities_accumulates_counterfactual_regret() {
        let mut node = Node::new(2);
        node.strategy = vec![0.5, 0.5];
        node.my_reach = 1.0;
        node.opp_reach = 0.5;

        node.propagate_utilities(&[1.0, -1.0]);

        // Node utility = 0.5*1 + 0.5*(-1) = 0.
        assert!((node.utility - 0.0).abs() < 1e-9);
        // Regret weighted by opp_reach: 0.5*(1-0) and 0.5*(-1-0).
        assert!((node.regret_sum[0] - 0.5).abs() < 1e-9);
        assert!((node.regret_sum[1] + 0.5).abs() < 1e-9);
        // Reach consumed.
        assert_eq!(node.my_reach, 0.0);
        assert_eq!(node.opp_reach, 0.0);
    }

    #[test]
    fn regret_sum_is_never_floored() {
        let mut node = Node::new(2);
        node.strategy = vec![1.0, 0.0];
        node.opp_reach = 1.0;
        node.propagate_utilities(&[1.0, -3.0]);
        // Negative regret persists in the sum; only the strategy
        // recomputation clips at zero.
        assert!(node.regret_sum[1] < 0.0);
    }

    #[test]
    fn single_action_node_is_trivial() {
        let mut node = Node::new(1);
        node.my_reach = 1.0;
        node.opp_reach = 1.0;
        node.compute_strategy();
        assert_eq!(node.strategy, vec![1.0]);
        node.propagate_utilities(&[-1.0]);
        assert!((node.utility + 1.0).abs() < 1e-9);
        // The only action can never have regret against itself.
        assert!((node.regret_sum[0] - 0.0).abs() < 1e-9);
    }
}
