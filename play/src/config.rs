//! Configuration for the dropfour binary
//!
//! Configuration is loaded from config.toml with environment variable overrides.
//! CLI arguments take highest priority, followed by env vars, then config.toml.

use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, Result};
use clap::Parser;
use engine_config::{load_config, CentralConfig};
use games_connect4::{Player, State, MAX_DIMENSION};
use mcts::{FinalMoveRule, MctsConfig};
use once_cell::sync::Lazy;
use tracing::level_filters::LevelFilter;

// Load central config once at startup
static CENTRAL_CONFIG: Lazy<CentralConfig> = Lazy::new(load_config);

// Default value functions that read from central config
fn default_rows() -> usize {
    CENTRAL_CONFIG.board.rows
}

fn default_cols() -> usize {
    CENTRAL_CONFIG.board.cols
}

fn default_time_budget() -> u64 {
    CENTRAL_CONFIG.engine.time_budget_secs
}

fn default_max_iterations() -> u32 {
    CENTRAL_CONFIG.engine.max_iterations
}

fn default_seed() -> u64 {
    CENTRAL_CONFIG.engine.seed
}

fn default_final_move() -> String {
    CENTRAL_CONFIG.engine.final_move.clone()
}

fn default_first() -> String {
    CENTRAL_CONFIG.game.first_player.clone()
}

fn default_log_level() -> String {
    CENTRAL_CONFIG.common.log_level.clone()
}

/// Who makes the first move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FirstPlayer {
    Human,
    Engine,
    /// Ask on stdin before the game starts
    Ask,
}

impl FromStr for FirstPlayer {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "human" | "0" => Ok(FirstPlayer::Human),
            "engine" | "1" => Ok(FirstPlayer::Engine),
            "ask" => Ok(FirstPlayer::Ask),
            other => Err(anyhow!(
                "invalid first player '{}', expected one of human, engine, ask",
                other
            )),
        }
    }
}

#[derive(Parser, Debug, Clone)]
#[command(name = "dropfour")]
#[command(about = "Play Connect 4 against a Monte Carlo Tree Search engine")]
#[command(
    long_about = "Play Connect 4 on the terminal against an engine that picks its moves
with UCT Monte Carlo Tree Search and random playouts.

Configuration is loaded from config.toml with DROPFOUR_<SECTION>_<KEY>
environment variable overrides. CLI arguments take highest priority."
)]
pub struct Config {
    /// Board height
    #[arg(long, default_value_t = default_rows())]
    pub rows: usize,

    /// Board width
    #[arg(long, default_value_t = default_cols())]
    pub cols: usize,

    /// Seconds the engine may think per move
    #[arg(long = "time-budget", default_value_t = default_time_budget())]
    pub time_budget_secs: u64,

    /// Iteration cap per engine move (0 for none)
    #[arg(long, default_value_t = default_max_iterations())]
    pub max_iterations: u32,

    /// RNG seed (0 to derive one from the clock)
    #[arg(long, default_value_t = default_seed())]
    pub seed: u64,

    /// How the engine picks its move once the budget is spent
    /// (uct, max_win_rate, most_visited)
    #[arg(long, default_value_t = default_final_move())]
    pub final_move: String,

    /// Who moves first (human, engine, ask)
    #[arg(long, default_value_t = default_first())]
    pub first: String,

    /// Start from this position instead of an empty board: rows top first,
    /// separated by '/', using '.', 'X' (human) and 'O' (engine).
    /// Overrides --rows and --cols.
    #[arg(long)]
    pub position: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value_t = default_log_level())]
    pub log_level: String,
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.log_level.is_empty() {
            return Err(anyhow!("log_level cannot be empty"));
        }

        if self.log_level.parse::<LevelFilter>().is_err() {
            return Err(anyhow!(
                "invalid log level '{}', expected one of trace, debug, info, warn, error",
                self.log_level
            ));
        }

        if self.position.is_none() {
            for (name, value) in [("rows", self.rows), ("cols", self.cols)] {
                if !(1..=MAX_DIMENSION).contains(&value) {
                    return Err(anyhow!(
                        "{} must be between 1 and {}, got {}",
                        name,
                        MAX_DIMENSION,
                        value
                    ));
                }
            }
        }

        if self.time_budget_secs == 0 {
            return Err(anyhow!("time_budget_secs must be greater than 0"));
        }

        self.final_move_rule()?;
        self.first_player()?;

        if self.position.is_some() {
            self.initial_state(Player::Opponent)?;
        }

        Ok(())
    }

    pub fn final_move_rule(&self) -> Result<FinalMoveRule> {
        Ok(self.final_move.parse::<FinalMoveRule>()?)
    }

    pub fn first_player(&self) -> Result<FirstPlayer> {
        self.first.parse()
    }

    /// Search settings for every engine move.
    pub fn mcts_config(&self) -> Result<MctsConfig> {
        let mut config = MctsConfig::default()
            .with_time_budget(self.time_budget_secs)
            .with_final_move(self.final_move_rule()?);
        if self.max_iterations > 0 {
            config = config.with_max_iterations(self.max_iterations);
        }
        Ok(config)
    }

    /// Starting position with `to_move` to play.
    pub fn initial_state(&self, to_move: Player) -> Result<State> {
        let state = match &self.position {
            Some(diagram) => {
                let rows: Vec<&str> = diagram.split('/').map(str::trim).collect();
                State::from_rows(&rows, to_move)?
            }
            None => State::with_dimensions(self.rows, self.cols, to_move)?,
        };
        Ok(state)
    }

    /// The configured seed, or one taken from the clock.
    pub fn seed(&self) -> u64 {
        if self.seed > 0 {
            return self.seed;
        }
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default()
    }
}
