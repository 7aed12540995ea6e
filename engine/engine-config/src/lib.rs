//! Centralized configuration loading from config.toml.
//!
//! This crate provides the configuration structs and loading logic shared by
//! the engine crates and the `dropfour` binary.
//!
//! # Configuration Priority
//!
//! Settings are loaded with the following priority (highest to lowest):
//! 1. Environment variables (`DROPFOUR_<SECTION>_<KEY>`)
//! 2. config.toml file
//! 3. Built-in defaults (config.defaults.toml, embedded at compile time)
//!
//! # Environment Variable Override Pattern
//!
//! ```text
//! DROPFOUR_<SECTION>_<KEY>=value
//!
//! Examples:
//!     DROPFOUR_COMMON_LOG_LEVEL=debug
//!     DROPFOUR_BOARD_COLS=9
//!     DROPFOUR_ENGINE_TIME_BUDGET_SECS=5
//!     DROPFOUR_GAME_FIRST_PLAYER=engine
//! ```

mod defaults;
mod loader;
mod structs;

pub use defaults::*;
pub use loader::{apply_env_overrides, load_config, load_from_path, CONFIG_SEARCH_PATHS};
pub use structs::*;

#[cfg(test)]
mod tests;
