//! MCTS tree structure with arena allocation.
//!
//! The tree uses arena allocation for efficient node storage and
//! cache-friendly traversal. Nodes are stored in a contiguous Vec
//! and referenced by NodeId indices. A node owns its children through the
//! arena; the parent index is only followed upwards during backpropagation.

use games_connect4::{Move, Outcome, State};
use tracing::trace;

use crate::config::FinalMoveRule;
use crate::node::{MctsNode, NodeId};
use crate::search::SearchError;

/// MCTS tree with arena-based node storage.
#[derive(Debug)]
pub struct MctsTree {
    /// Arena storing all nodes
    nodes: Vec<MctsNode>,

    /// Root node index (always 0 after initialization)
    root: NodeId,

    /// Most children any node may have (the board width)
    max_children: usize,
}

impl MctsTree {
    /// Create a new tree holding a copy of the given position at the root.
    pub fn new(root_state: State) -> Self {
        let max_children = root_state.cols();
        Self {
            nodes: vec![MctsNode::new_root(root_state)],
            root: NodeId(0),
            max_children,
        }
    }

    /// Get the root node ID.
    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Get a reference to a node by ID.
    #[inline]
    pub fn get(&self, id: NodeId) -> &MctsNode {
        &self.nodes[id.0 as usize]
    }

    /// Get a mutable reference to a node by ID.
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut MctsNode {
        &mut self.nodes[id.0 as usize]
    }

    /// Get the total number of nodes in the tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if tree is empty (should never be true after construction).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Moves the search may still play from a node. Finished positions have
    /// none even when the board has room left.
    pub fn playable_moves(&self, id: NodeId) -> Vec<Move> {
        let node = self.get(id);
        if node.is_terminal() {
            Vec::new()
        } else {
            node.state.legal_moves()
        }
    }

    /// A node is fully expanded once it has a child for every playable move
    /// and at least one child.
    pub fn is_fully_expanded(&self, id: NodeId) -> bool {
        let children = self.get(id).children.len();
        children > 0 && children == self.playable_moves(id).len()
    }

    /// First playable move, in column order, that has no child yet.
    pub fn untried_move(&self, id: NodeId) -> Option<Move> {
        let node = self.get(id);
        self.playable_moves(id)
            .into_iter()
            .find(|mv| !node.children.iter().any(|&c| self.get(c).action == Some(*mv)))
    }

    /// Add the child reached by playing `mv` at `parent_id`.
    /// Returns the new child's NodeId.
    pub fn expand(&mut self, parent_id: NodeId, mv: Move) -> Result<NodeId, SearchError> {
        let parent = self.get(parent_id);
        if parent
            .children
            .iter()
            .any(|&c| self.get(c).action == Some(mv))
        {
            return Err(SearchError::InvalidState(format!(
                "column {} already expanded at node {}",
                mv, parent_id.0
            )));
        }
        debug_assert!(
            parent.children.len() < self.max_children,
            "node {} already has {} children",
            parent_id.0,
            parent.children.len()
        );

        let state = parent.state.apply(mv)?;
        let player = parent.state.to_move();

        let id = NodeId(self.nodes.len() as u32);
        self.nodes
            .push(MctsNode::new_child(parent_id, player, mv, state));
        self.get_mut(parent_id).children.push(id);

        Ok(id)
    }

    /// Pick the child to descend into.
    ///
    /// Returns the child with the strictly greatest UCT score among children
    /// that are not finished positions; ties go to the earlier child. None
    /// when every child is terminal (or there are none).
    pub fn select_child(&self, node_id: NodeId) -> Option<NodeId> {
        let node = self.get(node_id);
        let chooser = node.state.to_move();

        let mut best: Option<(NodeId, f64)> = None;
        for &child_id in &node.children {
            let child = self.get(child_id);
            if child.is_terminal() {
                continue;
            }
            let score = child.uct_score(node.visit_count, chooser);
            if best.map_or(true, |(_, s)| score > s) {
                best = Some((child_id, score));
            }
        }
        best.map(|(id, _)| id)
    }

    /// Add one visit to every node from `leaf_id` up to the root, and one win
    /// as well when the engine won the playout.
    pub fn backpropagate(&mut self, leaf_id: NodeId, engine_won: bool) {
        let mut current_id = leaf_id;

        while current_id.is_some() {
            let node = self.get_mut(current_id);
            node.visit_count += 1;
            if engine_won {
                node.win_count += 1;
            }
            current_id = node.parent;
        }
    }

    /// First root child whose position is already an engine win.
    pub fn winning_root_child(&self) -> Option<NodeId> {
        self.get(self.root)
            .children
            .iter()
            .copied()
            .find(|&id| self.get(id).outcome == Outcome::EngineWins)
    }

    /// Best root child under `rule`, skipping children whose column is full
    /// on `real_state`. Ties go to the earlier child.
    pub fn best_root_child(&self, real_state: &State, rule: FinalMoveRule) -> Option<NodeId> {
        let root = self.get(self.root);
        let chooser = root.state.to_move();

        let mut best: Option<(NodeId, f64)> = None;
        for &child_id in &root.children {
            let child = self.get(child_id);
            let Some(action) = child.action else {
                continue;
            };
            if !real_state.is_legal(action) {
                continue;
            }
            let score = match rule {
                FinalMoveRule::Uct => child.uct_score(root.visit_count, chooser),
                FinalMoveRule::MaxWinRate => child.win_rate(),
                FinalMoveRule::MostVisited => child.visit_count as f64,
            };
            if best.map_or(true, |(_, s)| score > s) {
                best = Some((child_id, score));
            }
        }
        best.map(|(id, _)| id)
    }

    /// Get statistics about the tree for debugging.
    pub fn stats(&self) -> TreeStats {
        let root = self.get(self.root);
        TreeStats {
            total_nodes: self.nodes.len(),
            root_visits: root.visit_count,
            root_wins: root.win_count,
            max_depth: self.compute_max_depth(self.root, 0),
        }
    }

    fn compute_max_depth(&self, node_id: NodeId, current_depth: u32) -> u32 {
        let node = self.get(node_id);
        if node.children.is_empty() {
            return current_depth;
        }

        node.children
            .iter()
            .map(|id| self.compute_max_depth(*id, current_depth + 1))
            .max()
            .unwrap_or(current_depth)
    }

    /// Release the whole tree. Returns the number of nodes freed.
    pub fn destroy(self) -> usize {
        let freed = self.nodes.len();
        trace!(nodes = freed, "Search tree released");
        freed
    }
}

/// Statistics about an MCTS tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeStats {
    pub total_nodes: usize,
    pub root_visits: u32,
    pub root_wins: u32,
    pub max_depth: u32,
}
