use crate::error::{Error, Result};
use crate::game::GameState;
use crate::mcts::MonteCarloTreeSearch;
use crate::random::RandomGenerator;
use std::fmt;

/// Something that can pick a move for the player to move in a given state.
pub trait MovePolicy<G: GameState> {
    fn choose_move(&mut self, state: &G) -> Result<G::Action>;
}

/// Plays a uniformly random legal move.
#[derive(Debug, Default)]
pub struct RandomPolicy<K: RandomGenerator> {
    random: K,
}

impl<K: RandomGenerator> RandomPolicy<K> {
    pub fn new(random: K) -> Self {
        Self { random }
    }
}

impl<G: GameState, K: RandomGenerator> MovePolicy<G> for RandomPolicy<K> {
    fn choose_move(&mut self, state: &G) -> Result<G::Action> {
        let actions = state.legal_actions(state.current_player());
        self.random
            .choose(&actions)
            .cloned()
            .ok_or(Error::NoLegalActions)
    }
}

/// Plays the move suggested by a fresh search with a fixed simulation budget.
#[derive(Debug)]
pub struct MctsPolicy<K: RandomGenerator> {
    search: MonteCarloTreeSearch<K>,
    simulations: u32,
}

impl<K: RandomGenerator> MctsPolicy<K> {
    pub fn new(search: MonteCarloTreeSearch<K>, simulations: u32) -> Self {
        Self {
            search,
            simulations,
        }
    }
}

impl<G: GameState, K: RandomGenerator> MovePolicy<G> for MctsPolicy<K> {
    fn choose_move(&mut self, state: &G) -> Result<G::Action> {
        self.search.get_best_move(state, self.simulations)
    }
}

/// A named participant driven by a move policy.
pub struct Player<G: GameState> {
    name: String,
    policy: Box<dyn MovePolicy<G>>,
}

impl<G: GameState> Player<G> {
    pub fn new(name: impl Into<String>, policy: impl MovePolicy<G> + 'static) -> Self {
        Self {
            name: name.into(),
            policy: Box::new(policy),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn choose_move(&mut self, state: &G) -> Result<G::Action> {
        self.policy.choose_move(state)
    }
}

impl<G: GameState> fmt::Display for Player<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl<G: GameState> fmt::Debug for Player<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Player").field("name", &self.name).finish()
    }
}
