use crate::error::Result;
use std::fmt::Debug;
use std::hash::Hash;

/// The interface a game must implement to be searched.
///
/// The search engine only ever consumes a game through this trait. States are treated as
/// values: [`GameState::apply`] returns a successor and leaves the receiver untouched, so the
/// states stored inside the search tree are never disturbed by rollouts.
pub trait GameState: Clone + Debug {
    /// A move in the game. For board games this is usually a cell index.
    type Action: Clone + PartialEq + Debug;

    /// Identity of a participant. Used as a key for per-player win counts.
    type Player: Copy + Eq + Hash + Debug;

    /// Returns the player whose turn it is.
    fn current_player(&self) -> Self::Player;

    /// Returns the other participant.
    fn opponent(&self, player: Self::Player) -> Self::Player;

    /// Returns the legal moves for `player`, in a deterministic order.
    ///
    /// Terminal states have no legal moves.
    fn legal_actions(&self, player: Self::Player) -> Vec<Self::Action>;

    /// Returns the state reached by playing `action` for the player to move.
    ///
    /// Playing an action that is not legal, or playing on a finished game, is an error.
    fn apply(&self, action: &Self::Action) -> Result<Self>;

    /// Returns the final result, or `None` while the game is still undetermined.
    fn outcome(&self) -> Option<Outcome<Self::Player>>;

    /// Returns `true` once the game has ended.
    fn is_terminal(&self) -> bool {
        self.outcome().is_some()
    }
}

/// Final result of a game.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Outcome<P> {
    /// The given player has won.
    Win(P),
    /// Nobody has won.
    Draw,
}

impl<P: Copy> Outcome<P> {
    /// The winning player, if any.
    pub fn winner(&self) -> Option<P> {
        match self {
            Outcome::Win(player) => Some(*player),
            Outcome::Draw => None,
        }
    }
}
