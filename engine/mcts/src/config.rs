//! MCTS configuration parameters.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

/// How the move is picked from the root's children once the budget is spent.
///
/// Whatever the rule, a child that already wins for the engine is taken first
/// and children whose column is full on the real board are skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FinalMoveRule {
    /// Greatest UCT score, the same formula used during selection
    #[default]
    Uct,
    /// Greatest wins / visits
    MaxWinRate,
    /// Most visited child ("robust child")
    MostVisited,
}

#[derive(Debug, Error)]
#[error("unknown final move rule '{0}', expected one of uct, max_win_rate, most_visited")]
pub struct ParseFinalMoveRuleError(String);

impl FromStr for FinalMoveRule {
    type Err = ParseFinalMoveRuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "uct" => Ok(FinalMoveRule::Uct),
            "max_win_rate" | "max" => Ok(FinalMoveRule::MaxWinRate),
            "most_visited" | "robust" => Ok(FinalMoveRule::MostVisited),
            other => Err(ParseFinalMoveRuleError(other.to_string())),
        }
    }
}

impl fmt::Display for FinalMoveRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FinalMoveRule::Uct => "uct",
            FinalMoveRule::MaxWinRate => "max_win_rate",
            FinalMoveRule::MostVisited => "most_visited",
        };
        f.write_str(name)
    }
}

/// Configuration for Monte Carlo Tree Search.
#[derive(Debug, Clone)]
pub struct MctsConfig {
    /// Wall-clock budget per decision, whole seconds.
    /// Checked between iterations only, so the search may overshoot by up to
    /// one iteration.
    pub time_budget_secs: u64,

    /// Optional cap on iterations, checked together with the time budget.
    pub max_iterations: Option<u32>,

    /// Rule used to pick the final move.
    pub final_move: FinalMoveRule,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            time_budget_secs: 3,
            max_iterations: None,
            final_move: FinalMoveRule::Uct,
        }
    }
}

impl MctsConfig {
    /// Create a fast, iteration-bounded config for testing.
    pub fn for_testing() -> Self {
        Self {
            time_budget_secs: 10,
            max_iterations: Some(200),
            final_move: FinalMoveRule::Uct,
        }
    }

    /// Builder pattern: set the time budget in seconds.
    pub fn with_time_budget(mut self, secs: u64) -> Self {
        self.time_budget_secs = secs;
        self
    }

    /// Builder pattern: cap the number of iterations.
    pub fn with_max_iterations(mut self, n: u32) -> Self {
        self.max_iterations = Some(n);
        self
    }

    /// Builder pattern: set the final move rule.
    pub fn with_final_move(mut self, rule: FinalMoveRule) -> Self {
        self.final_move = rule;
        self
    }

    pub fn time_budget(&self) -> Duration {
        Duration::from_secs(self.time_budget_secs)
    }
}
