//! MCTS search implementation.
//!
//! Implements the core MCTS algorithm:
//! 1. Selection: Descend through fully expanded nodes using UCT
//! 2. Expansion: Add one child for the first untried column
//! 3. Simulation: Play the new position out with the rollout policy
//! 4. Backpropagation: Update statistics along the path to the root
//!
//! The loop runs until the wall-clock budget (or the optional iteration cap)
//! is spent. The budget is only checked between iterations, so an iteration
//! always completes once started.

use std::time::{Duration, Instant};

use games_connect4::{GameError, Move, Outcome, State};
use rand_chacha::ChaCha20Rng;
use thiserror::Error;
use tracing::{debug, trace};

use crate::config::MctsConfig;
use crate::node::NodeId;
use crate::rollout::{RandomRollout, Rollout};
use crate::tree::MctsTree;

/// Errors that can occur during MCTS search.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Game error: {0}")]
    Game(#[from] GameError),

    #[error("No legal moves available")]
    NoLegalMoves,

    #[error("Search budget expired before any move was expanded")]
    EmptySearchResult,

    #[error("Invalid state: {0}")]
    InvalidState(String),
}

/// What a single iteration did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Iteration {
    /// A new node was expanded and played out to this outcome
    Simulated(Outcome),
    /// The descent ended on a node with nothing left to play; only a visit
    /// was propagated
    DeadBranch,
}

/// How the returned move was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// The root had a single legal move, no search was run
    OnlyMove,
    /// A root child already wins the game for the engine
    ImmediateWin,
    /// Picked from the root children by the final move rule
    Searched,
}

/// Counters collected while searching.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub iterations: u32,
    pub simulations: u32,
    pub dead_branches: u32,
    pub root_visits: u32,
    pub root_wins: u32,
    pub nodes: usize,
    pub max_depth: u32,
    pub elapsed: Duration,
}

/// Result of an MCTS search.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Move to play on the real board
    pub action: Move,

    pub decision: Decision,

    /// Visits of the chosen root child (0 without search)
    pub visits: u32,

    /// Engine wins recorded under the chosen root child
    pub wins: u32,

    pub stats: SearchStats,
}

impl SearchResult {
    /// Estimated engine win rate of the chosen move.
    pub fn win_rate(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.wins as f64 / self.visits as f64
        }
    }
}

/// MCTS search state for one move decision.
pub struct MctsSearch<'a, R: Rollout> {
    tree: MctsTree,
    real: &'a State,
    rollout: &'a R,
    config: MctsConfig,
    stats: SearchStats,
}

impl<'a, R: Rollout> MctsSearch<'a, R> {
    /// Create a new search rooted at a copy of `state`.
    ///
    /// Fails with `NoLegalMoves` when the game is already over.
    pub fn new(state: &'a State, rollout: &'a R, config: MctsConfig) -> Result<Self, SearchError> {
        if state.classify().is_terminal() || state.legal_moves().is_empty() {
            return Err(SearchError::NoLegalMoves);
        }

        Ok(Self {
            tree: MctsTree::new(state.clone()),
            real: state,
            rollout,
            config,
            stats: SearchStats::default(),
        })
    }

    /// Run one select -> expand -> simulate -> backpropagate cycle.
    pub fn iterate(&mut self, rng: &mut ChaCha20Rng) -> Result<Iteration, SearchError> {
        self.stats.iterations += 1;

        // Selection
        let mut current = self.tree.root();
        loop {
            if self.tree.playable_moves(current).is_empty() {
                return Ok(self.dead_branch(current));
            }
            if !self.tree.is_fully_expanded(current) {
                break;
            }
            match self.tree.select_child(current) {
                Some(child) => current = child,
                None => return Ok(self.dead_branch(current)),
            }
        }

        // Expansion
        let mv = self.tree.untried_move(current).ok_or_else(|| {
            SearchError::InvalidState(format!("node {} has no untried move", current.0))
        })?;
        let leaf = self.tree.expand(current, mv)?;

        // Simulation
        let outcome = self.rollout.simulate(&self.tree.get(leaf).state, rng)?;

        // Backpropagation
        self.tree
            .backpropagate(leaf, outcome == Outcome::EngineWins);
        self.stats.simulations += 1;

        trace!(
            leaf = leaf.0,
            column = mv.column(),
            outcome = ?outcome,
            "MCTS iteration complete"
        );

        Ok(Iteration::Simulated(outcome))
    }

    fn dead_branch(&mut self, node: NodeId) -> Iteration {
        self.tree.backpropagate(node, false);
        self.stats.dead_branches += 1;
        trace!(node = node.0, "MCTS dead branch");
        Iteration::DeadBranch
    }

    fn budget_left(&self, start: Instant) -> bool {
        if let Some(cap) = self.config.max_iterations {
            if self.stats.iterations >= cap {
                return false;
            }
        }
        start.elapsed() < self.config.time_budget()
    }

    /// Search until the budget is spent and pick the move to play.
    ///
    /// The tree is released before returning.
    pub fn run(mut self, rng: &mut ChaCha20Rng) -> Result<SearchResult, SearchError> {
        let start = Instant::now();

        let moves = self.real.legal_moves();
        if let [only] = moves.as_slice() {
            let action = *only;
            self.stats.nodes = self.tree.destroy();
            debug!(column = action.column(), "Only one legal move, skipping search");
            return Ok(SearchResult {
                action,
                decision: Decision::OnlyMove,
                visits: 0,
                wins: 0,
                stats: self.stats,
            });
        }

        while self.budget_left(start) {
            self.iterate(rng)?;
        }

        let (chosen, decision) = match self.tree.winning_root_child() {
            Some(id) => (id, Decision::ImmediateWin),
            None => match self
                .tree
                .best_root_child(self.real, self.config.final_move)
            {
                Some(id) => (id, Decision::Searched),
                None => {
                    let nodes = self.tree.destroy();
                    debug!(
                        iterations = self.stats.iterations,
                        nodes, "Search finished without a candidate move"
                    );
                    return Err(SearchError::EmptySearchResult);
                }
            },
        };

        let child = self.tree.get(chosen);
        let action = child.action.ok_or_else(|| {
            SearchError::InvalidState("root child without an action".to_string())
        })?;
        let (visits, wins) = (child.visit_count, child.win_count);

        let tree_stats = self.tree.stats();
        self.stats.root_visits = tree_stats.root_visits;
        self.stats.root_wins = tree_stats.root_wins;
        self.stats.max_depth = tree_stats.max_depth;
        self.stats.nodes = self.tree.destroy();
        self.stats.elapsed = start.elapsed();

        debug!(
            column = action.column(),
            decision = ?decision,
            iterations = self.stats.iterations,
            simulations = self.stats.simulations,
            dead_branches = self.stats.dead_branches,
            nodes = self.stats.nodes,
            max_depth = self.stats.max_depth,
            visits,
            wins,
            elapsed_ms = self.stats.elapsed.as_millis() as u64,
            "MCTS search complete"
        );

        Ok(SearchResult {
            action,
            decision,
            visits,
            wins,
            stats: self.stats,
        })
    }

    /// Get the search tree (for inspection/debugging).
    pub fn tree(&self) -> &MctsTree {
        &self.tree
    }

    /// Counters accumulated so far.
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }
}

/// Convenience function to run a single MCTS search.
pub fn run_mcts<R: Rollout>(
    state: &State,
    rollout: &R,
    config: MctsConfig,
    rng: &mut ChaCha20Rng,
) -> Result<SearchResult, SearchError> {
    MctsSearch::new(state, rollout, config)?.run(rng)
}

/// Pick the engine's next move with random playouts and the default rules.
pub fn decide_move(
    state: &State,
    time_budget_secs: u64,
    rng: &mut ChaCha20Rng,
) -> Result<Move, SearchError> {
    let config = MctsConfig::default().with_time_budget(time_budget_secs);
    run_mcts(state, &RandomRollout, config, rng).map(|result| result.action)
}
