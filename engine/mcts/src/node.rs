//! MCTS tree node representation.
//!
//! Each node represents a position reached by playing a move from the parent.
//! Nodes own a snapshot of that position and the visit/win counters used for
//! UCT selection.

use games_connect4::{Move, Outcome, Player, State};

/// Exploration coefficient of the UCT formula.
pub const EXPLORATION: f64 = std::f64::consts::SQRT_2;

/// Index into the node arena. Using a newtype for type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    pub const NONE: NodeId = NodeId(u32::MAX);

    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    pub fn is_some(self) -> bool {
        !self.is_none()
    }
}

/// A node in the MCTS tree.
#[derive(Debug, Clone)]
pub struct MctsNode {
    /// Parent node index (NONE for root). Only used to walk upwards.
    pub parent: NodeId,

    /// Player who moved to reach this node
    pub player: Player,

    /// Move applied to the parent's state to reach this node (None at root)
    pub action: Option<Move>,

    /// Position at this node
    pub state: State,

    /// Cached classification of `state`
    pub outcome: Outcome,

    /// Children in expansion order
    pub children: Vec<NodeId>,

    /// Number of iterations that passed through this node
    pub visit_count: u32,

    /// Number of those iterations whose playout ended in an engine win
    pub win_count: u32,
}

impl MctsNode {
    /// Create a new root node.
    ///
    /// The root is treated as if the side not to move had just played.
    pub fn new_root(state: State) -> Self {
        Self {
            parent: NodeId::NONE,
            player: state.to_move().other(),
            action: None,
            outcome: state.classify(),
            state,
            children: Vec::new(),
            visit_count: 0,
            win_count: 0,
        }
    }

    /// Create a new child node.
    pub fn new_child(parent: NodeId, player: Player, action: Move, state: State) -> Self {
        Self {
            parent,
            player,
            action: Some(action),
            outcome: state.classify(),
            state,
            children: Vec::new(),
            visit_count: 0,
            win_count: 0,
        }
    }

    /// wins / visits, 0.0 if never visited.
    #[inline]
    pub fn win_rate(&self) -> f64 {
        if self.visit_count == 0 {
            0.0
        } else {
            self.win_count as f64 / self.visit_count as f64
        }
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.outcome.is_terminal()
    }

    /// UCT score of this node as seen by its parent.
    ///
    /// `parent_visits` is the parent's visit count and `chooser` the side to
    /// move at the parent. Win counts only ever record engine wins, so the
    /// mean is negated when the opponent is the one choosing.
    ///
    /// Unvisited nodes score +infinity so every sibling is tried once before
    /// any is revisited.
    #[inline]
    pub fn uct_score(&self, parent_visits: u32, chooser: Player) -> f64 {
        if self.visit_count == 0 {
            return f64::INFINITY;
        }

        let mut mean = self.win_rate();
        if chooser == Player::Opponent {
            mean = -mean;
        }
        let exploration =
            EXPLORATION * ((parent_visits as f64).ln() / self.visit_count as f64).sqrt();
        mean + exploration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id_none() {
        assert!(NodeId::NONE.is_none());
        assert!(!NodeId::NONE.is_some());
        assert!(!NodeId(0).is_none());
        assert!(NodeId(0).is_some());
    }

    #[test]
    fn test_new_root() {
        let node = MctsNode::new_root(State::new(Player::Engine));

        assert!(node.parent.is_none());
        assert!(node.action.is_none());
        assert_eq!(node.player, Player::Opponent);
        assert_eq!(node.visit_count, 0);
        assert_eq!(node.win_count, 0);
        assert!(!node.is_terminal());
        assert!(node.children.is_empty());
    }

    #[test]
    fn test_win_rate() {
        let mut node = MctsNode::new_root(State::new(Player::Engine));
        assert!(node.win_rate().abs() < 1e-12);

        node.visit_count = 4;
        node.win_count = 1;
        assert!((node.win_rate() - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_uct_score_unvisited_is_infinite() {
        let node = MctsNode::new_root(State::new(Player::Engine));
        assert_eq!(node.uct_score(10, Player::Engine), f64::INFINITY);
        assert_eq!(node.uct_score(0, Player::Opponent), f64::INFINITY);
    }

    #[test]
    fn test_uct_score() {
        let mut node = MctsNode::new_root(State::new(Player::Engine));
        node.visit_count = 10;
        node.win_count = 5;

        // 0.5 + sqrt(2) * sqrt(ln(100) / 10)
        let expected = 0.5 + 2f64.sqrt() * (100f64.ln() / 10.0).sqrt();
        assert!((node.uct_score(100, Player::Engine) - expected).abs() < 1e-9);

        // Opponent choosing: mean is negated, exploration term unchanged
        let expected = -0.5 + 2f64.sqrt() * (100f64.ln() / 10.0).sqrt();
        assert!((node.uct_score(100, Player::Opponent) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_unvisited_beats_any_visited_sibling() {
        let unvisited = MctsNode::new_root(State::new(Player::Engine));
        let mut visited = MctsNode::new_root(State::new(Player::Engine));
        visited.visit_count = 1;
        visited.win_count = 1;

        for parent_visits in [1, 2, 10, 1_000_000] {
            for chooser in [Player::Engine, Player::Opponent] {
                assert!(
                    unvisited.uct_score(parent_visits, chooser)
                        > visited.uct_score(parent_visits, chooser)
                );
            }
        }
    }

    #[test]
    fn test_terminal_child_is_flagged() {
        let state = State::from_rows(&["....", "O...", "O...", "O..."], Player::Engine).unwrap();
        let won = state.apply(Move::new(0)).unwrap();
        let node = MctsNode::new_child(NodeId(0), Player::Engine, Move::new(0), won);
        assert!(node.is_terminal());
        assert_eq!(node.outcome, Outcome::EngineWins);
        assert_eq!(node.action, Some(Move::new(0)));
    }
}
