//! Fixed-Strategy-Iteration CFR trainer.
//!
//! Tree-shaped CFR recurses through every history, which is exponentially
//! wasteful when a claim can be reached many ways. FSICFR instead keeps one
//! node per distinct information set and runs two topological sweeps per
//! iteration over the decision graph:
//!
//! 1. **Chance fixing**: all of the iteration's rolls are drawn before any
//!    node is visited, so every history converging on a shared node agrees
//!    on the outcomes, and the root claim node receives reach 1.
//! 2. **Forward pass**: commitment levels ascend from 0; strategies are
//!    recomputed by regret matching and reach probability flows along the
//!    live edges into each node, accumulating across parents.
//! 3. **Backward pass**: levels descend; utilities fold back from the
//!    terminal-adjacent nodes, counterfactual regret accumulates, and each
//!    node's reach is consumed and zeroed.
//!
//! Commitment level is already a topological rank of the DAG, so both
//! sweeps are plain loops in level order; no explicit graph ordering is
//! needed. Everything is single-threaded and strictly sequential: each
//! iteration consumes the reach state the previous one reset.
//!
//! # Example
//!
//! ```
//! use fsicfr_solver::fsicfr::{LiarDieTrainer, TrainerConfig};
//!
//! let config = TrainerConfig::new(6).with_seed(42);
//! let mut trainer = LiarDieTrainer::new(config).unwrap();
//! trainer.train(10_000).unwrap();
//!
//! // The average strategy for the opening claim after rolling a 6.
//! let strategy = trainer.average_claim_strategy(0, 6).unwrap();
//! assert!((strategy.iter().sum::<f64>() - 1.0).abs() < 1e-9);
//! ```
//!
//! # References
//!
//! - Neller, T., Hnath, S. "Approximating Optimal Dudo Play with
//!   Fixed-Strategy Iteration Counterfactual Regret Minimization" (2011)
//! - Zinkevich, M., et al. "Regret Minimization in Games with Incomplete
//!   Information" (2007)

use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::fsicfr::chance::{ChanceSource, FixedRolls};
use crate::fsicfr::config::{SolverError, TrainerConfig, TrainerStats};
use crate::fsicfr::graph::{DecisionGraph, ACCEPT};

/// The FSICFR trainer for the dice-bluffing game.
///
/// Owns the full decision graph for the lifetime of training. The chance
/// source defaults to a seedable [`StdRng`]; any other [`ChanceSource`]
/// can be plugged in through [`LiarDieTrainer::with_chance_source`].
#[derive(Debug)]
pub struct LiarDieTrainer<C: ChanceSource = StdRng> {
    /// Trainer configuration.
    config: TrainerConfig,

    /// Every information-set node, built once at construction.
    graph: DecisionGraph,

    /// Chance source, invoked `sides + 1` times per iteration.
    chance: C,

    /// Completed iteration count.
    iteration: u64,

    /// Statistics tracking.
    stats: TrainerStats,
}

impl LiarDieTrainer<StdRng> {
    /// Create a trainer with the default random chance source.
    ///
    /// Seeds the generator from `config.seed` when present, making whole
    /// training runs reproducible.
    pub fn new(config: TrainerConfig) -> Result<Self, SolverError> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_chance_source(config, rng)
    }
}

impl<C: ChanceSource> LiarDieTrainer<C> {
    /// Create a trainer with an explicit chance source.
    ///
    /// Validates the configuration and builds the complete decision graph;
    /// nothing is allocated when validation fails.
    pub fn with_chance_source(config: TrainerConfig, chance: C) -> Result<Self, SolverError> {
        config.validate()?;
        let graph = DecisionGraph::build(config.sides)?;
        Ok(Self {
            config,
            graph,
            chance,
            iteration: 0,
            stats: TrainerStats::new(),
        })
    }

    /// Run one full FSICFR iteration: fix chance, sweep forward, sweep
    /// backward.
    ///
    /// An iteration is the unit of cancellation; stopping between
    /// iterations always leaves every node's reach state at zero.
    pub fn run_iteration(&mut self) -> Result<(), SolverError> {
        let rolls = self.fix_chance()?;
        self.forward_pass(&rolls)?;
        self.backward_pass(&rolls)?;
        self.iteration += 1;
        Ok(())
    }

    /// Train for a given number of iterations.
    ///
    /// After the iteration at index `iterations / 2` every node's strategy
    /// sum is zeroed, discarding the noisy early average while the regret
    /// sums keep accumulating. Returns updated statistics.
    pub fn train(&mut self, iterations: u64) -> Result<&TrainerStats, SolverError> {
        let start_time = Instant::now();

        for i in 0..iterations {
            self.run_iteration()?;
            if i == iterations / 2 {
                self.reset_strategy_sums();
            }
        }

        self.stats.iterations = self.iteration;
        self.stats.nodes = self.graph.num_nodes();
        self.stats.elapsed_seconds = start_time.elapsed().as_secs_f64();
        self.stats.update_rate();

        Ok(&self.stats)
    }

    /// Train with a callback for progress tracking.
    ///
    /// # Arguments
    /// * `iterations` - Number of iterations to run
    /// * `callback_interval` - How often to call the callback
    /// * `callback` - Function called every `callback_interval` iterations
    pub fn train_with_callback<F>(
        &mut self,
        iterations: u64,
        callback_interval: u64,
        mut callback: F,
    ) -> Result<&TrainerStats, SolverError>
    where
        F: FnMut(&TrainerStats),
    {
        let start_time = Instant::now();

        for i in 0..iterations {
            self.run_iteration()?;
            if i == iterations / 2 {
                self.reset_strategy_sums();
            }

            if callback_interval > 0 && (i + 1) % callback_interval == 0 {
                self.stats.iterations = self.iteration;
                self.stats.nodes = self.graph.num_nodes();
                self.stats.elapsed_seconds = start_time.elapsed().as_secs_f64();
                self.stats.update_rate();
                callback(&self.stats);
            }
        }

        self.stats.iterations = self.iteration;
        self.stats.nodes = self.graph.num_nodes();
        self.stats.elapsed_seconds = start_time.elapsed().as_secs_f64();
        self.stats.update_rate();

        Ok(&self.stats)
    }

    /// Zero every node's accumulated strategy sum.
    pub fn reset_strategy_sums(&mut self) {
        self.graph.reset_strategy_sums();
    }

    /// Average strategy of the response node `(my_level, opp_level)`.
    pub fn average_response_strategy(
        &self,
        my_level: usize,
        opp_level: usize,
    ) -> Result<Vec<f64>, SolverError> {
        Ok(self.graph.response(my_level, opp_level)?.average_strategy())
    }

    /// Average strategy of the claim node `(opp_level, roll)`.
    pub fn average_claim_strategy(
        &self,
        opp_level: usize,
        roll: usize,
    ) -> Result<Vec<f64>, SolverError> {
        Ok(self.graph.claim(opp_level, roll)?.average_strategy())
    }

    /// The decision graph, for inspection and export.
    pub fn graph(&self) -> &DecisionGraph {
        &self.graph
    }

    /// The trainer configuration.
    pub fn config(&self) -> &TrainerConfig {
        &self.config
    }

    /// Completed iteration count.
    pub fn iteration(&self) -> u64 {
        self.iteration
    }

    /// Current statistics.
    pub fn stats(&self) -> &TrainerStats {
        &self.stats
    }

    /// Draw this iteration's rolls and seed the root's reach.
    ///
    /// The root claim node, keyed by level 0 and the level-0 roll, is the
    /// unique entry point of every game instance this iteration; all other
    /// reach is accumulated additively from zero during the forward pass.
    fn fix_chance(&mut self) -> Result<FixedRolls, SolverError> {
        let rolls = FixedRolls::sample(&mut self.chance, self.config.sides);
        let root = self.graph.claim_mut(0, rolls.at(0))?;
        root.my_reach = 1.0;
        root.opp_reach = 1.0;
        Ok(rolls)
    }

    /// Propagate reach probability from the root through every live edge,
    /// visiting commitment levels in increasing order.
    fn forward_pass(&mut self, rolls: &FixedRolls) -> Result<(), SolverError> {
        for opp_level in 0..=self.config.sides {
            self.forward_response_step(opp_level, rolls)?;
            self.forward_claim_step(opp_level, rolls)?;
        }
        Ok(())
    }

    /// Forward step over the response nodes facing `opp_level`.
    ///
    /// Skipped at level 0: there is no response to an absent commitment.
    fn forward_response_step(
        &mut self,
        opp_level: usize,
        rolls: &FixedRolls,
    ) -> Result<(), SolverError> {
        if opp_level == 0 {
            return Ok(());
        }
        let sides = self.config.sides;

        for my_level in 0..opp_level {
            let (accept_mass, opp_mass) = {
                let node = self.graph.response_mut(my_level, opp_level)?;
                if node.is_unreached() {
                    continue;
                }
                node.compute_strategy();
                if opp_level == sides {
                    // Terminal response: doubt only, nothing flows onward.
                    continue;
                }
                (node.strategy[ACCEPT] * node.my_reach, node.opp_reach)
            };

            // Accepting hands the same player the next roll and claim, so
            // the reach roles carry over unswapped.
            let next = self.graph.claim_mut(opp_level, rolls.at(opp_level))?;
            next.my_reach += accept_mass;
            next.opp_reach += opp_mass;
        }
        Ok(())
    }

    /// Forward step over the single claim node active at `opp_level`.
    ///
    /// Skipped at the maximum level: no further commitment is possible.
    fn forward_claim_step(
        &mut self,
        opp_level: usize,
        rolls: &FixedRolls,
    ) -> Result<(), SolverError> {
        let sides = self.config.sides;
        if opp_level == sides {
            return Ok(());
        }

        let (strategy, my_reach, opp_reach) = {
            let node = self.graph.claim_mut(opp_level, rolls.at(opp_level))?;
            if node.is_unreached() {
                return Ok(());
            }
            node.compute_strategy();
            (node.strategy.clone(), node.my_reach, node.opp_reach)
        };

        for (action, &prob) in strategy.iter().enumerate() {
            if prob <= 0.0 {
                continue;
            }
            let claim_level = opp_level + 1 + action;

            // The claim passes the turn, so the reach roles swap.
            let next = self.graph.response_mut(opp_level, claim_level)?;
            next.my_reach += opp_reach;
            next.opp_reach += prob * my_reach;
        }
        Ok(())
    }

    /// Propagate utility and regret from terminal-adjacent nodes back to
    /// the root, visiting commitment levels in decreasing order.
    ///
    /// Within a level the claim node is updated first: it reads response
    /// nodes at strictly higher levels, while this level's response nodes
    /// read this level's claim node.
    fn backward_pass(&mut self, rolls: &FixedRolls) -> Result<(), SolverError> {
        for opp_level in (0..=self.config.sides).rev() {
            self.backward_claim_step(opp_level, rolls)?;
            self.backward_response_step(opp_level, rolls)?;
        }
        Ok(())
    }

    /// Backward step for the claim node active at `opp_level`.
    fn backward_claim_step(
        &mut self,
        opp_level: usize,
        rolls: &FixedRolls,
    ) -> Result<(), SolverError> {
        let sides = self.config.sides;
        if opp_level == sides {
            return Ok(());
        }

        let mut action_utils = vec![0.0; sides - opp_level];
        for claim_level in opp_level + 1..=sides {
            let child = self.graph.response(opp_level, claim_level)?;
            // The claim hands control to the responder: zero-sum sign flip.
            action_utils[claim_level - opp_level - 1] = -child.utility;
        }

        self.graph
            .claim_mut(opp_level, rolls.at(opp_level))?
            .propagate_utilities(&action_utils);
        Ok(())
    }

    /// Backward step over the response nodes facing `opp_level`.
    fn backward_response_step(
        &mut self,
        opp_level: usize,
        rolls: &FixedRolls,
    ) -> Result<(), SolverError> {
        if opp_level == 0 {
            return Ok(());
        }
        let sides = self.config.sides;

        for my_level in 0..opp_level {
            if self.graph.response(my_level, opp_level)?.is_unreached() {
                continue;
            }

            // The opponent rolled after this node's own commitment was
            // accepted; the doubt succeeds when the claim overshoots that
            // roll.
            let doubt_util = if opp_level > rolls.at(my_level) {
                1.0
            } else {
                -1.0
            };
            let mut action_utils = vec![doubt_util];

            if opp_level < sides {
                // Accepting keeps the same player acting, so the child
                // claim node's utility carries over without negation.
                let child = self.graph.claim(opp_level, rolls.at(opp_level))?;
                action_utils.push(child.utility);
            }

            self.graph
                .response_mut(my_level, opp_level)?
                .propagate_utilities(&action_utils);
        }
        Ok(())
    }
}
