//! dropfour - play Connect 4 against a Monte Carlo Tree Search engine
//!
//! A terminal program that:
//! 1. Loads configuration (config.toml, env overrides, CLI flags)
//! 2. Asks who moves first when configured to
//! 3. Alternates human moves read from stdin with engine moves picked by
//!    UCT search over random playouts
//! 4. Prints the board after every move and the result at the end

use std::io;

use anyhow::Result;
use clap::Parser;
use games_connect4::Player;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use tracing::{error, info};

mod config;
mod input;
mod render;
mod session;

use crate::config::{Config, FirstPlayer};
use crate::input::prompt_first_player;
use crate::session::GameSession;

fn init_tracing(level: &str) -> Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // Logs go to stderr so the board on stdout stays readable
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();

    Ok(())
}

fn main() -> Result<()> {
    // Parse configuration
    let config = Config::parse();

    // Validate configuration
    config.validate()?;

    // Initialize tracing
    init_tracing(&config.log_level)?;
    info!(log_level = %config.log_level, "Tracing initialized");

    let seed = config.seed();
    info!(seed, "Engine RNG seeded (pass --seed {} to replay)", seed);

    let mut input = io::stdin().lock();
    let mut output = io::stdout().lock();

    let first = match config.first_player()? {
        FirstPlayer::Human => Player::Opponent,
        FirstPlayer::Engine => Player::Engine,
        FirstPlayer::Ask => prompt_first_player(&mut input, &mut output)?,
    };

    let state = config.initial_state(first)?;
    let mcts_config = config.mcts_config()?;
    info!(
        time_budget_secs = mcts_config.time_budget_secs,
        max_iterations = ?mcts_config.max_iterations,
        final_move = %mcts_config.final_move,
        "Engine configured"
    );

    let mut session = GameSession::new(
        state,
        mcts_config,
        ChaCha20Rng::seed_from_u64(seed),
        input,
        output,
    );

    match session.run() {
        Ok(outcome) => {
            info!(?outcome, moves = session.state().moves_played(), "Game finished");
            Ok(())
        }
        Err(e) => {
            error!("Game aborted: {}", e);
            Err(e)
        }
    }
}
