//! Ready-made implementations of the `GameState` trait.

/// An N×N tic-tac-toe board.
pub mod tic_tac_toe;
