//! Error types for the search engine and the bundled games.

use thiserror::Error;

/// Errors produced by game states, the search driver and the turn loop.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Error {
    #[error("illegal action {action}: not among the legal actions of this state")]
    IllegalAction { action: String },

    #[error("game already over")]
    GameOver,

    #[error("cannot search from a terminal state")]
    TerminalState,

    #[error("no legal actions available in a non-terminal state")]
    NoLegalActions,

    #[error("node is already fully expanded")]
    FullyExpanded,

    #[error("invalid board size {size}: must be at least 1")]
    InvalidBoardSize { size: usize },

    #[error("board string has {got} cells, which is not a square number")]
    InvalidBoardLength { got: usize },

    #[error("invalid character '{character}' at cell {position}")]
    InvalidCellCharacter { character: char, position: usize },

    #[error("invalid piece counts: X={x_count}, O={o_count} (must be equal or X ahead by 1)")]
    InvalidPieceCounts { x_count: usize, o_count: usize },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn illegal_action(action: &impl std::fmt::Debug) -> Self {
        Error::IllegalAction {
            action: format!("{action:?}"),
        }
    }

    pub(crate) fn invalid_configuration(message: impl Into<String>) -> Self {
        Error::InvalidConfiguration {
            message: message.into(),
        }
    }
}
