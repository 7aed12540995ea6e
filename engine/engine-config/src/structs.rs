//! Configuration struct definitions.
//!
//! All config structs with serde deserialization support and default values.

use crate::defaults;
use serde::Deserialize;

// ============================================================================
// Serde default functions (required for #[serde(default = "...")])
// These call the accessor functions from defaults module
// ============================================================================

fn d_log_level() -> String {
    defaults::log_level().into()
}
fn d_rows() -> usize {
    defaults::rows()
}
fn d_cols() -> usize {
    defaults::cols()
}
fn d_time_budget() -> u64 {
    defaults::time_budget_secs()
}
fn d_max_iterations() -> u32 {
    defaults::max_iterations()
}
fn d_seed() -> u64 {
    defaults::seed()
}
fn d_final_move() -> String {
    defaults::final_move().into()
}
fn d_first_player() -> String {
    defaults::first_player().into()
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Root configuration structure matching config.toml
#[derive(Debug, Deserialize, Default, Clone)]
pub struct CentralConfig {
    #[serde(default)]
    pub common: CommonConfig,
    #[serde(default)]
    pub board: BoardConfig,
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub game: GameConfig,
}

/// Settings shared by every component
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CommonConfig {
    #[serde(default = "d_log_level")]
    pub log_level: String,
}

impl Default for CommonConfig {
    fn default() -> Self {
        Self {
            log_level: defaults::log_level().into(),
        }
    }
}

/// Board geometry
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct BoardConfig {
    #[serde(default = "d_rows")]
    pub rows: usize,
    #[serde(default = "d_cols")]
    pub cols: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            rows: defaults::rows(),
            cols: defaults::cols(),
        }
    }
}

/// Search engine settings
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct EngineConfig {
    /// Wall-clock seconds per engine move
    #[serde(default = "d_time_budget")]
    pub time_budget_secs: u64,
    /// Iteration cap per move, 0 = none
    #[serde(default = "d_max_iterations")]
    pub max_iterations: u32,
    /// RNG seed, 0 = derive from the clock
    #[serde(default = "d_seed")]
    pub seed: u64,
    /// Final move rule name (uct, max_win_rate, most_visited)
    #[serde(default = "d_final_move")]
    pub final_move: String,
}

impl EngineConfig {
    pub fn iteration_cap(&self) -> Option<u32> {
        (self.max_iterations > 0).then_some(self.max_iterations)
    }

    pub fn fixed_seed(&self) -> Option<u64> {
        (self.seed > 0).then_some(self.seed)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            time_budget_secs: defaults::time_budget_secs(),
            max_iterations: defaults::max_iterations(),
            seed: defaults::seed(),
            final_move: defaults::final_move().into(),
        }
    }
}

/// Turn loop settings
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct GameConfig {
    /// Who moves first: human, engine or ask
    #[serde(default = "d_first_player")]
    pub first_player: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            first_player: defaults::first_player().into(),
        }
    }
}
