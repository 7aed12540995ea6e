//! Monte Carlo Tree Search (MCTS) move selection for Connect 4.
//!
//! This crate picks the engine's next move by growing a UCT search tree
//! over positions from the `games-connect4` crate and scoring new nodes with
//! random playouts.
//!
//! # Overview
//!
//! MCTS is a search algorithm that builds a search tree by running iterations.
//! Each iteration consists of four phases:
//!
//! 1. **Selection**: Descend through fully expanded nodes using UCT (Upper
//!    Confidence bound applied to Trees) to balance exploration and
//!    exploitation
//! 2. **Expansion**: Add one child for the first column not tried yet
//! 3. **Simulation**: Play random moves from the new position until the game
//!    ends
//! 4. **Backpropagation**: Add a visit (and a win if the engine won the
//!    playout) to every node from the new child up to the root
//!
//! # Usage
//!
//! ```rust
//! use games_connect4::{Player, State};
//! use mcts::{run_mcts, MctsConfig, RandomRollout};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha20Rng;
//!
//! let state = State::new(Player::Engine);
//! let config = MctsConfig::for_testing().with_max_iterations(100);
//!
//! let mut rng = ChaCha20Rng::seed_from_u64(42);
//! let result = run_mcts(&state, &RandomRollout, config, &mut rng).unwrap();
//!
//! assert!(state.is_legal(result.action));
//! println!("Best column: {}", result.action);
//! println!("Win rate: {:.2}", result.win_rate());
//! ```
//!
//! # Configuration
//!
//! The [`MctsConfig`] struct controls search behavior:
//!
//! - `time_budget_secs`: Wall-clock seconds per decision (default: 3)
//! - `max_iterations`: Optional iteration cap, checked alongside the clock
//! - `final_move`: How the move is picked from the root children once the
//!   budget is spent (default: UCT score)
//!
//! # Architecture
//!
//! ```text
//! +-------------------------------------------------------------+
//! |                         MctsSearch                          |
//! +-------------------------------------------------------------+
//! |  +-------------+  +-------------+  +---------------------+  |
//! |  |  MctsTree   |  |  real State |  |      Rollout        |  |
//! |  |  (arena)    |  | (legality)  |  |  (random playout)   |  |
//! |  +------+------+  +------+------+  +----------+----------+  |
//! |         |                |                    |             |
//! |         v                v                    v             |
//! |  +------------------------------------------------------+   |
//! |  |            select -> expand -> simulate ->           |   |
//! |  |                     backpropagate                    |   |
//! |  +------------------------------------------------------+   |
//! +-------------------------------------------------------------+
//! ```

pub mod config;
pub mod node;
pub mod rollout;
pub mod search;
pub mod tree;

// Re-export main types
pub use config::{FinalMoveRule, MctsConfig, ParseFinalMoveRuleError};
pub use node::{MctsNode, NodeId, EXPLORATION};
pub use rollout::{RandomRollout, Rollout};
pub use search::{
    decide_move, run_mcts, Decision, Iteration, MctsSearch, SearchError, SearchResult,
    SearchStats,
};
pub use tree::{MctsTree, TreeStats};
