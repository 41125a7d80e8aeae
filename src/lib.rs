//! Monte Carlo tree search with UCB1 selection for two-player, perfect-information games.
//!
//! Each search builds a fresh tree over the given game state and repeats the four classic
//! phases a fixed number of times: selection with UCB1, expansion of a single untried action,
//! a uniformly random rollout to the end of the game, and backpropagation of the result to the
//! root. The move leading to the most visited child of the root is returned.
//!
//! # Example
//!
//! ```rust
//! use mcts_ucb::boards::tic_tac_toe::TicTacToeBoard;
//! use mcts_ucb::mcts::MonteCarloTreeSearch;
//! use mcts_ucb::random::SeededRandomGenerator;
//!
//! // X to move and one cell away from completing the top row
//! let board: TicTacToeBoard = "XX./OO./...".parse().unwrap();
//!
//! // Create and configure a new MCTS search instance using the builder
//! let mut mcts = MonteCarloTreeSearch::builder()
//!     .with_random_generator(SeededRandomGenerator::new(7))
//!     .with_exploration_constant(std::f64::consts::SQRT_2)
//!     .build()
//!     .unwrap();
//!
//! // Run 1000 simulations and take the most visited move
//! let best_move = mcts.get_best_move(&board, 1000).unwrap();
//!
//! println!("The best move is: {best_move}");
//! ```

/// Turn loop for playing complete matches.
pub mod arena;
/// Contains pre-made implementations of the `GameState` trait.
pub mod boards;
/// Search configuration.
pub mod config;
pub mod error;
/// Contains the `GameState` trait that defines the interface for a game.
pub mod game;
/// The search driver, `MonteCarloTreeSearch`.
pub mod mcts;
/// Contains the `MctsNode` struct, the payload of every node in the search tree.
pub mod mcts_node;
/// Move policies and named players.
pub mod player;
/// Contains traits and implementations for random number generation.
pub mod random;
/// The arena-backed tree and the four search phases.
pub mod search_tree;

pub use error::{Error, Result};
pub use game::{GameState, Outcome};
