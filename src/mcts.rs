use crate::config::MctsConfig;
use crate::error::{Error, Result};
use crate::game::GameState;
use crate::random::{RandomGenerator, StandardRandomGenerator};
use crate::search_tree::SearchTree;
use log::debug;
use std::time::{Duration, Instant};

/// The main struct for running the Monte Carlo Tree Search algorithm.
///
/// It holds the configuration and the random number generator. Every call to
/// [`MonteCarloTreeSearch::get_best_move`] builds a fresh tree from the given state, runs the
/// simulations and throws the tree away again.
#[derive(Debug)]
pub struct MonteCarloTreeSearch<K: RandomGenerator> {
    config: MctsConfig,
    random: K,
}

impl Default for MonteCarloTreeSearch<StandardRandomGenerator> {
    fn default() -> Self {
        Self {
            config: MctsConfig::default(),
            random: StandardRandomGenerator,
        }
    }
}

/// A builder for creating instances of `MonteCarloTreeSearch`.
///
/// This provides a convenient way to configure the MCTS search with different parameters.
pub struct MonteCarloTreeSearchBuilder<K: RandomGenerator> {
    config: MctsConfig,
    random_generator: K,
}

impl<K: RandomGenerator> MonteCarloTreeSearchBuilder<K> {
    /// Creates a new builder with the default configuration.
    pub fn new() -> Self {
        Self {
            config: MctsConfig::default(),
            random_generator: K::default(),
        }
    }

    /// Sets the random number generator used for rollouts.
    pub fn with_random_generator(mut self, rg: K) -> Self {
        self.random_generator = rg;
        self
    }

    /// Replaces the whole configuration.
    pub fn with_config(mut self, config: MctsConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the exploration constant `c` of UCB1.
    pub fn with_exploration_constant(mut self, c: f64) -> Self {
        self.config.exploration_constant = c;
        self
    }

    /// Stops each search early once `limit` has elapsed.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.config.time_limit = Some(limit);
        self
    }

    /// Builds the `MonteCarloTreeSearch` instance, rejecting unusable configurations.
    pub fn build(self) -> Result<MonteCarloTreeSearch<K>> {
        self.config.validate()?;
        Ok(MonteCarloTreeSearch {
            config: self.config,
            random: self.random_generator,
        })
    }
}

impl<K: RandomGenerator> Default for MonteCarloTreeSearchBuilder<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: RandomGenerator> MonteCarloTreeSearch<K> {
    /// Returns a new builder for `MonteCarloTreeSearch`.
    pub fn builder() -> MonteCarloTreeSearchBuilder<K> {
        MonteCarloTreeSearchBuilder::new()
    }

    pub fn config(&self) -> &MctsConfig {
        &self.config
    }

    /// Returns the action leading to the most visited child of the root after
    /// `simulation_count` simulations from `state`.
    pub fn get_best_move<G: GameState>(
        &mut self,
        state: &G,
        simulation_count: u32,
    ) -> Result<G::Action> {
        let tree = self.search(state, simulation_count)?;
        tree.best_action().ok_or(Error::NoLegalActions)
    }

    /// Same as [`Self::get_best_move`] with the configured number of simulations.
    pub fn best_move<G: GameState>(&mut self, state: &G) -> Result<G::Action> {
        self.get_best_move(state, self.config.num_simulations)
    }

    /// Builds a tree for `state` and runs up to `simulation_count` simulations on it.
    ///
    /// Fewer simulations run only when a time limit is configured and expires; the first
    /// simulation always runs.
    pub fn search<G: GameState>(
        &mut self,
        state: &G,
        simulation_count: u32,
    ) -> Result<SearchTree<G>> {
        if state.is_terminal() {
            return Err(Error::TerminalState);
        }
        if simulation_count == 0 {
            return Err(Error::invalid_configuration(
                "number of simulations must be at least 1",
            ));
        }

        let started = Instant::now();
        let mut tree = SearchTree::new(state.clone());
        let mut completed = 0;
        while completed < simulation_count {
            if completed > 0 && self.deadline_passed(started) {
                debug!("Time limit reached after {completed} of {simulation_count} simulations");
                break;
            }
            self.simulate(&mut tree)?;
            completed += 1;
        }

        debug!(
            "Search finished: {completed} simulations, {} nodes, {} root children in {:?}",
            tree.node_count(),
            tree.root().children().count(),
            started.elapsed()
        );
        Ok(tree)
    }

    /// Runs one select, rollout and backpropagate cycle on `tree`.
    pub fn simulate<G: GameState>(&mut self, tree: &mut SearchTree<G>) -> Result<()> {
        let leaf = tree.select(tree.root_id(), self.config.exploration_constant)?;
        let outcome = tree.rollout(leaf, &mut self.random)?;
        tree.backpropagate(leaf, outcome);
        Ok(())
    }

    fn deadline_passed(&self, started: Instant) -> bool {
        self.config
            .time_limit
            .is_some_and(|limit| started.elapsed() >= limit)
    }
}
