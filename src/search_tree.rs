use crate::error::{Error, Result};
use crate::game::{GameState, Outcome};
use crate::mcts_node::MctsNode;
use crate::random::RandomGenerator;
use ego_tree::{NodeId, NodeMut, NodeRef, Tree};
use log::trace;

/// The search tree built during a single search.
///
/// Nodes live in an arena; every node owns its children through the arena and refers to its
/// parent by id only. The tree is rebuilt from scratch for every search.
#[derive(Debug)]
pub struct SearchTree<G: GameState> {
    tree: Tree<MctsNode<G>>,
}

impl<G: GameState> SearchTree<G> {
    /// Creates a tree whose root represents `state`, with the player to move in `state` as
    /// the root player.
    pub fn new(state: G) -> Self {
        let player = state.current_player();
        let opponent = state.opponent(player);
        Self {
            tree: Tree::new(MctsNode::new(state, player, opponent)),
        }
    }

    /// Returns an immutable reference to the underlying arena.
    pub fn get_tree(&self) -> &Tree<MctsNode<G>> {
        &self.tree
    }

    pub fn root_id(&self) -> NodeId {
        self.tree.root().id()
    }

    pub fn root(&self) -> NodeRef<'_, MctsNode<G>> {
        self.tree.root()
    }

    pub fn get(&self, node_id: NodeId) -> Option<NodeRef<'_, MctsNode<G>>> {
        self.tree.get(node_id)
    }

    /// Total number of nodes, the root included.
    pub fn node_count(&self) -> usize {
        self.tree.root().descendants().count()
    }

    fn data(&self, node_id: NodeId) -> &MctsNode<G> {
        self.tree
            .get(node_id)
            .expect("node id does not belong to this tree")
            .value()
    }

    fn node_mut(&mut self, node_id: NodeId) -> NodeMut<'_, MctsNode<G>> {
        self.tree
            .get_mut(node_id)
            .expect("node id does not belong to this tree")
    }

    /// Walks down from `node_id` to the node that the next rollout should start from.
    ///
    /// A node that still has untried actions is expanded and the new child returned. A fully
    /// expanded node hands over to its child with the highest UCB1 value, the first one on
    /// ties. The walk also stops at terminal states.
    pub fn select(&mut self, node_id: NodeId, exploration_constant: f64) -> Result<NodeId> {
        let mut current = node_id;
        loop {
            let node = self.data(current);
            if node.is_terminal() {
                return Ok(current);
            }
            if !node.is_fully_expanded() {
                return self.expand(current);
            }
            current = self
                .best_child(current, exploration_constant)
                .ok_or(Error::NoLegalActions)?;
        }
    }

    /// Creates the child for the last untried action of `node_id` and returns its id.
    pub fn expand(&mut self, node_id: NodeId) -> Result<NodeId> {
        let node = self.data(node_id);
        if node.is_terminal() {
            return Err(Error::TerminalState);
        }

        let action = node
            .untried_actions
            .last()
            .cloned()
            .ok_or(Error::FullyExpanded)?;
        let next_state = node.state.apply(&action)?;
        trace!("Expanding {node_id:?} with action {action:?}");

        let mut child = MctsNode::new(next_state, node.opponent, node.player);
        child.prev_action = Some(action);

        let mut parent = self.node_mut(node_id);
        parent.value().untried_actions.pop();
        let child_id = parent.append(child).id();
        Ok(child_id)
    }

    /// Plays uniformly random moves from the state of `node_id` until the game ends.
    ///
    /// Works on a copy of the state; the tree is left untouched.
    pub fn rollout<R: RandomGenerator>(
        &self,
        node_id: NodeId,
        random: &mut R,
    ) -> Result<Outcome<G::Player>> {
        let node = self.data(node_id);
        let mut state = node.state.clone();
        let mut player = node.player;

        loop {
            if let Some(outcome) = state.outcome() {
                trace!("Rollout from {node_id:?} ended with {outcome:?}");
                return Ok(outcome);
            }

            let actions = state.legal_actions(player);
            let action = random.choose(&actions).ok_or(Error::NoLegalActions)?;
            state = state.apply(action)?;
            player = state.opponent(player);
        }
    }

    /// Records `outcome` on `node_id` and every ancestor up to the root.
    pub fn backpropagate(&mut self, node_id: NodeId, outcome: Outcome<G::Player>) {
        let winner = outcome.winner();
        let mut current = Some(node_id);

        while let Some(node_id) = current {
            let mut node = self.node_mut(node_id);
            let data = node.value();
            data.visits += 1;
            if let Some(player) = winner {
                *data.wins.entry(player).or_insert(0) += 1;
            }

            current = self
                .tree
                .get(node_id)
                .and_then(|node| node.parent())
                .map(|parent| parent.id());
        }
    }

    /// The child of `node_id` with the highest UCB1 value. Ties go to the first child created.
    pub fn best_child(&self, node_id: NodeId, exploration_constant: f64) -> Option<NodeId> {
        let node = self.tree.get(node_id)?;
        let parent_visits = node.value().visits;

        let mut best: Option<(NodeId, f64)> = None;
        for child in node.children() {
            let score = Self::ucb_value(parent_visits, child.value(), exploration_constant);
            if best.is_none_or(|(_, max)| score > max) {
                best = Some((child.id(), score));
            }
        }
        best.map(|(child_id, _)| child_id)
    }

    /// Calculates the UCB1 (Upper Confidence Bound 1) value of `child`.
    ///
    /// Unvisited children score positive infinity. Otherwise `parent_visits` is at least one,
    /// since every child is rolled out right after it is created.
    pub fn ucb_value(parent_visits: u32, child: &MctsNode<G>, exploration_constant: f64) -> f64 {
        if child.visits == 0 {
            return f64::INFINITY;
        }

        let exploration = f64::sqrt(f64::ln(parent_visits as f64) / child.visits as f64);
        child.win_ratio() + exploration_constant * exploration
    }

    /// The most visited child of the root, the first one on ties.
    pub fn most_visited_child(&self) -> Option<NodeRef<'_, MctsNode<G>>> {
        let mut best: Option<NodeRef<'_, MctsNode<G>>> = None;
        for child in self.tree.root().children() {
            if best.is_none_or(|b| child.value().visits > b.value().visits) {
                best = Some(child);
            }
        }
        best
    }

    /// The action leading to [`Self::most_visited_child`].
    pub fn best_action(&self) -> Option<G::Action> {
        self.most_visited_child()
            .and_then(|child| child.value().prev_action.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boards::tic_tac_toe::{Mark, TicTacToeBoard};
    use crate::random::SeededRandomGenerator;

    const C: f64 = std::f64::consts::SQRT_2;

    fn run_simulations(tree: &mut SearchTree<TicTacToeBoard>, n: u32, seed: u64) {
        let mut random = SeededRandomGenerator::new(seed);
        for _ in 0..n {
            let leaf = tree.select(tree.root_id(), C).unwrap();
            let outcome = tree.rollout(leaf, &mut random).unwrap();
            tree.backpropagate(leaf, outcome);
        }
    }

    #[test]
    fn root_takes_player_to_move() {
        let board: TicTacToeBoard = "X../.../...".parse().unwrap();

        let tree = SearchTree::new(board);

        let root = tree.root().value();
        assert_eq!(root.player, Mark::O);
        assert_eq!(root.opponent, Mark::X);
        assert_eq!(root.untried_actions.len(), 8);
        assert_eq!(root.prev_action, None);
        assert_eq!(tree.node_count(), 1);
    }

    #[test]
    fn expand_pops_last_untried_action_and_swaps_players() {
        // arrange
        let mut tree = SearchTree::new(TicTacToeBoard::default());
        let root_id = tree.root_id();

        // act
        let child_id = tree.expand(root_id).unwrap();

        // assert
        let child = tree.get(child_id).unwrap();
        assert_eq!(child.parent().unwrap().id(), root_id);
        assert_eq!(child.value().prev_action, Some(8));
        assert_eq!(child.value().player, Mark::O);
        assert_eq!(child.value().opponent, Mark::X);
        assert_eq!(child.value().state.cell(8), Some(Mark::X));
        assert_eq!(tree.root().value().untried_actions, (0..8).collect::<Vec<_>>());
        assert_eq!(tree.root().value().state, TicTacToeBoard::default());
    }

    #[test]
    fn expand_rejects_full_and_terminal_nodes() {
        let board: TicTacToeBoard = "XOX/XOO/OX.".parse().unwrap();
        let mut tree = SearchTree::new(board);
        let root_id = tree.root_id();

        let only_child = tree.expand(root_id).unwrap();

        assert_eq!(tree.expand(root_id), Err(Error::FullyExpanded));
        assert_eq!(tree.expand(only_child), Err(Error::TerminalState));
        assert_eq!(tree.root().children().count(), 1);
    }

    #[test]
    fn rollout_leaves_tree_untouched() {
        // arrange
        let mut tree = SearchTree::new(TicTacToeBoard::default());
        let child_id = tree.expand(tree.root_id()).unwrap();
        let before = tree.get(child_id).unwrap().value().state.clone();
        let mut random = SeededRandomGenerator::new(7);

        // act
        let outcome = tree.rollout(child_id, &mut random).unwrap();

        // assert
        let child = tree.get(child_id).unwrap().value();
        assert_eq!(child.state, before);
        assert_eq!(child.visits, 0);
        assert!(matches!(outcome, Outcome::Win(_) | Outcome::Draw));
    }

    #[test]
    fn rollout_from_terminal_state_returns_its_outcome() {
        let board: TicTacToeBoard = "XXX/OO./...".parse().unwrap();
        let tree = SearchTree::new(board);
        let mut random = SeededRandomGenerator::default();

        let outcome = tree.rollout(tree.root_id(), &mut random).unwrap();

        assert_eq!(outcome, Outcome::Win(Mark::X));
    }

    #[test]
    fn backpropagate_updates_every_ancestor() {
        // arrange
        let mut tree = SearchTree::new(TicTacToeBoard::default());
        let root_id = tree.root_id();
        let child_id = tree.expand(root_id).unwrap();
        let grandchild_id = tree.expand(child_id).unwrap();

        // act
        tree.backpropagate(grandchild_id, Outcome::Win(Mark::X));
        tree.backpropagate(grandchild_id, Outcome::Draw);

        // assert
        for node_id in [root_id, child_id, grandchild_id] {
            let node = tree.get(node_id).unwrap().value();
            assert_eq!(node.visits, 2);
            assert_eq!(node.wins_for(Mark::X), 1);
            assert_eq!(node.wins_for(Mark::O), 0);
        }
    }

    #[test]
    fn ucb_value_follows_formula() {
        let mut child = MctsNode::new(TicTacToeBoard::default(), Mark::O, Mark::X);
        assert_eq!(
            SearchTree::<TicTacToeBoard>::ucb_value(10, &child, C),
            f64::INFINITY
        );

        child.visits = 4;
        child.wins.insert(Mark::X, 2);
        let expected = 0.5 + C * (f64::ln(10.0) / 4.0).sqrt();

        let actual = SearchTree::<TicTacToeBoard>::ucb_value(10, &child, C);

        assert!((actual - expected).abs() < 1e-12);
    }

    #[test]
    fn select_expands_before_descending() {
        // arrange
        let mut tree = SearchTree::new(TicTacToeBoard::default());

        // act
        run_simulations(&mut tree, 9, 1);

        // assert
        let root = tree.root();
        assert_eq!(root.children().count(), 9);
        assert!(root.value().is_fully_expanded());
        assert_eq!(root.value().visits, 9);
        for child in root.children() {
            assert_eq!(child.value().visits, 1);
            assert!(!child.has_children());
        }
    }

    #[test]
    fn select_stops_at_terminal_nodes() {
        let board: TicTacToeBoard = "XOX/XOO/OX.".parse().unwrap();
        let mut tree = SearchTree::new(board);
        run_simulations(&mut tree, 1, 3);

        let leaf = tree.select(tree.root_id(), C).unwrap();

        let only_child = tree.root().first_child().unwrap().id();
        assert_eq!(leaf, only_child);
        assert!(tree.get(leaf).unwrap().value().is_terminal());
    }

    #[test]
    fn best_child_prefers_first_on_ties() {
        let mut tree = SearchTree::new(TicTacToeBoard::default());
        let root_id = tree.root_id();
        let first = tree.expand(root_id).unwrap();
        let second = tree.expand(root_id).unwrap();
        tree.backpropagate(first, Outcome::Draw);
        tree.backpropagate(second, Outcome::Draw);

        assert_eq!(tree.best_child(root_id, C), Some(first));
        assert_eq!(tree.most_visited_child().unwrap().id(), first);
        assert_eq!(tree.best_action(), Some(8));
    }

    #[test]
    fn statistics_stay_consistent_after_many_simulations() {
        // arrange
        let mut tree = SearchTree::new(TicTacToeBoard::default());

        // act
        run_simulations(&mut tree, 400, 11);

        // assert
        assert_eq!(tree.root().value().visits, 400);
        for node in tree.root().descendants() {
            let data = node.value();
            let total_wins: u32 = data.wins.values().sum();
            assert!(total_wins <= data.visits);

            if data.is_fully_expanded() {
                assert_eq!(node.children().count(), data.legal_action_count);
            }

            let child_visits: u32 = node.children().map(|c| c.value().visits).sum();
            assert!(child_visits <= data.visits);

            for child in node.children() {
                assert_eq!(child.value().player, data.opponent);
                assert_eq!(child.value().opponent, data.player);
            }
        }
    }
}
