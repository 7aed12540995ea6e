//! Configuration loading logic.
//!
//! Handles loading config from files and applying environment variable overrides.

use crate::CentralConfig;
use std::path::Path;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Standard locations to search for config.toml
pub const CONFIG_SEARCH_PATHS: &[&str] = &[
    "config.toml",    // Current directory
    "../config.toml", // Parent directory (when running from subdirectory)
];

/// Load the central configuration from config.toml.
///
/// Searches for config.toml in the following order:
/// 1. Path specified by DROPFOUR_CONFIG environment variable
/// 2. Current directory (config.toml)
/// 3. Parent directory (../config.toml)
///
/// After loading, environment variable overrides are applied.
pub fn load_config() -> CentralConfig {
    // Check for explicit config path
    if let Ok(path) = std::env::var("DROPFOUR_CONFIG") {
        let path = PathBuf::from(&path);
        if path.exists() {
            info!("Loading config from DROPFOUR_CONFIG: {}", path.display());
            return load_from_path(&path);
        }
        warn!(
            "DROPFOUR_CONFIG={} not found, searching defaults",
            path.display()
        );
    }

    // Search default locations
    for path_str in CONFIG_SEARCH_PATHS {
        let path = PathBuf::from(path_str);
        if path.exists() {
            info!("Loading config from {}", path.display());
            return load_from_path(&path);
        }
    }

    // Fall back to defaults
    debug!("No config.toml found, using built-in defaults");
    apply_env_overrides(CentralConfig::default())
}

/// Load configuration from a specific path.
pub fn load_from_path(path: &Path) -> CentralConfig {
    match std::fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(config) => apply_env_overrides(config),
            Err(e) => {
                warn!("Failed to parse {}: {}, using defaults", path.display(), e);
                apply_env_overrides(CentralConfig::default())
            }
        },
        Err(e) => {
            warn!("Failed to read {}: {}, using defaults", path.display(), e);
            apply_env_overrides(CentralConfig::default())
        }
    }
}

/// Macro to reduce env override boilerplate
macro_rules! env_override {
    // String field
    ($config:expr, $section:ident . $field:ident, $key:expr) => {
        if let Ok(v) = std::env::var($key) {
            $config.$section.$field = v;
        }
    };
    // Parseable field (usize, u64, etc.)
    ($config:expr, $section:ident . $field:ident, $key:expr, parse) => {
        match std::env::var($key).map(|s| s.parse()) {
            Ok(Ok(v)) => $config.$section.$field = v,
            Ok(Err(_)) => warn!("Ignoring {}: not a valid number", $key),
            Err(_) => {}
        }
    };
}

/// Apply environment variable overrides to a configuration.
///
/// Environment variables follow the pattern: DROPFOUR_<SECTION>_<KEY>
pub fn apply_env_overrides(mut config: CentralConfig) -> CentralConfig {
    // Common
    env_override!(config, common.log_level, "DROPFOUR_COMMON_LOG_LEVEL");

    // Board
    env_override!(config, board.rows, "DROPFOUR_BOARD_ROWS", parse);
    env_override!(config, board.cols, "DROPFOUR_BOARD_COLS", parse);

    // Engine
    env_override!(
        config,
        engine.time_budget_secs,
        "DROPFOUR_ENGINE_TIME_BUDGET_SECS",
        parse
    );
    env_override!(
        config,
        engine.max_iterations,
        "DROPFOUR_ENGINE_MAX_ITERATIONS",
        parse
    );
    env_override!(config, engine.seed, "DROPFOUR_ENGINE_SEED", parse);
    env_override!(config, engine.final_move, "DROPFOUR_ENGINE_FINAL_MOVE");

    // Game
    env_override!(config, game.first_player, "DROPFOUR_GAME_FIRST_PLAYER");

    config
}
