use crate::game::GameState;
use std::collections::HashMap;

/// Represents a single node in the Monte Carlo search tree.
///
/// The node owns the game state it stands for and the statistics gathered for it. Links to
/// the parent and the children live in the enclosing [`SearchTree`](crate::search_tree::SearchTree).
#[derive(Debug, Clone)]
pub struct MctsNode<G: GameState> {
    /// The game state that this node represents.
    pub state: G,
    /// The player to move in `state`.
    pub player: G::Player,
    /// The other player; the one whose move led to this node.
    pub opponent: G::Player,
    /// The action that led to this node from its parent. `None` for the root.
    pub prev_action: Option<G::Action>,
    /// Legal actions of `player` that have no child yet. Expansion pops from the back.
    pub untried_actions: Vec<G::Action>,
    /// Number of legal actions `player` had when the node was created.
    pub legal_action_count: usize,
    /// Number of rollouts that passed through this node.
    pub visits: u32,
    /// Rollouts won, per player. Draws are only counted in `visits`.
    pub wins: HashMap<G::Player, u32>,
}

impl<G: GameState> MctsNode<G> {
    /// Creates an unvisited node whose untried actions are all legal actions of `player`.
    pub fn new(state: G, player: G::Player, opponent: G::Player) -> Self {
        let untried_actions = state.legal_actions(player);
        let wins = HashMap::from([(player, 0), (opponent, 0)]);
        MctsNode {
            legal_action_count: untried_actions.len(),
            state,
            player,
            opponent,
            prev_action: None,
            untried_actions,
            visits: 0,
            wins,
        }
    }

    /// Rollouts won by `player` through this node.
    pub fn wins_for(&self, player: G::Player) -> u32 {
        self.wins.get(&player).copied().unwrap_or(0)
    }

    /// Share of rollouts won by the player who moved into this node.
    ///
    /// Unvisited nodes report positive infinity so that selection always prefers them.
    pub fn win_ratio(&self) -> f64 {
        if self.visits == 0 {
            f64::INFINITY
        } else {
            self.wins_for(self.opponent) as f64 / self.visits as f64
        }
    }

    /// `true` once every legal action of `player` has a child.
    pub fn is_fully_expanded(&self) -> bool {
        self.untried_actions.is_empty()
    }

    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boards::tic_tac_toe::{Mark, TicTacToeBoard};

    #[test]
    fn new_node_has_every_action_untried() {
        let node = MctsNode::new(TicTacToeBoard::default(), Mark::X, Mark::O);

        assert_eq!(node.untried_actions.len(), 9);
        assert_eq!(node.legal_action_count, 9);
        assert_eq!(node.visits, 0);
        assert_eq!(node.wins_for(Mark::X), 0);
        assert_eq!(node.wins_for(Mark::O), 0);
        assert!(!node.is_fully_expanded());
        assert!(!node.is_terminal());
    }

    #[test]
    fn unvisited_node_has_infinite_win_ratio() {
        let node = MctsNode::new(TicTacToeBoard::default(), Mark::X, Mark::O);

        assert_eq!(node.win_ratio(), f64::INFINITY);
    }

    #[test]
    fn win_ratio_counts_the_player_who_moved_in() {
        // arrange
        let mut node = MctsNode::new(TicTacToeBoard::default(), Mark::O, Mark::X);

        // act
        node.visits = 4;
        node.wins.insert(Mark::X, 3);
        node.wins.insert(Mark::O, 1);

        // assert
        assert!((node.win_ratio() - 0.75).abs() < 1e-12);
        assert_eq!(node.win_ratio(), node.win_ratio());
        assert_eq!(node.is_fully_expanded(), node.is_fully_expanded());
    }

    #[test]
    fn terminal_state_has_nothing_to_expand() {
        let board: TicTacToeBoard = "XOX/XOO/OXX".parse().unwrap();

        let node = MctsNode::new(board, Mark::O, Mark::X);

        assert!(node.is_terminal());
        assert!(node.is_fully_expanded());
        assert_eq!(node.legal_action_count, 0);
    }
}
