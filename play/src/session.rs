//! Game session: the turn loop between the human and the engine.

use std::io::{BufRead, Write};

use anyhow::Result;
use games_connect4::{Outcome, Player, State};
use mcts::{run_mcts, Decision, MctsConfig, RandomRollout};
use rand_chacha::ChaCha20Rng;
use tracing::{debug, info};

use crate::input::prompt_column;
use crate::render::render_board;

/// A game in progress, reading human moves from `input` and writing the
/// board and messages to `output`.
pub struct GameSession<R: BufRead, W: Write> {
    state: State,
    mcts_config: MctsConfig,
    /// RNG for engine searches
    rng: ChaCha20Rng,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> GameSession<R, W> {
    pub fn new(state: State, mcts_config: MctsConfig, rng: ChaCha20Rng, input: R, output: W) -> Self {
        Self {
            state,
            mcts_config,
            rng,
            input,
            output,
        }
    }

    /// Current position.
    pub fn state(&self) -> &State {
        &self.state
    }

    /// Play until the game is over and return how it ended.
    pub fn run(&mut self) -> Result<Outcome> {
        info!(
            rows = self.state.rows(),
            cols = self.state.cols(),
            first = %self.state.to_move(),
            "Game started"
        );

        loop {
            write!(self.output, "\n{}", render_board(&self.state))?;

            let outcome = self.state.classify();
            if outcome.is_terminal() {
                self.announce(outcome)?;
                info!(?outcome, moves = self.state.moves_played(), "Game over");
                return Ok(outcome);
            }

            match self.state.to_move() {
                Player::Opponent => self.human_turn()?,
                Player::Engine => self.engine_turn()?,
            }
        }
    }

    fn human_turn(&mut self) -> Result<()> {
        let mv = prompt_column(&mut self.input, &mut self.output, &self.state)?;
        self.state = self.state.apply(mv)?;
        debug!(column = mv.column(), "Human move");
        Ok(())
    }

    fn engine_turn(&mut self) -> Result<()> {
        let result = run_mcts(
            &self.state,
            &RandomRollout,
            self.mcts_config.clone(),
            &mut self.rng,
        )?;
        self.state = self.state.apply(result.action)?;

        match result.decision {
            Decision::OnlyMove => {
                writeln!(self.output, "Engine plays column {} (only move).", result.action)?;
            }
            Decision::ImmediateWin | Decision::Searched => {
                writeln!(
                    self.output,
                    "Engine plays column {} after {} iterations, estimated win rate {:.1}%.",
                    result.action,
                    result.stats.iterations,
                    result.win_rate() * 100.0
                )?;
            }
        }
        Ok(())
    }

    fn announce(&mut self, outcome: Outcome) -> Result<()> {
        let message = match outcome {
            Outcome::EngineWins => "** The engine wins **",
            Outcome::OpponentWins => "** Well done, you beat the engine **",
            Outcome::Draw | Outcome::Ongoing => "Draw!",
        };
        writeln!(self.output, "{}", message)?;
        self.output.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use games_connect4::Move;
    use rand::SeedableRng;
    use std::io::Cursor;

    fn play(state: State, input: &str) -> (Result<Outcome>, State, String) {
        let config = MctsConfig::for_testing().with_max_iterations(100);
        let rng = ChaCha20Rng::seed_from_u64(42);
        let mut output = Vec::new();
        let mut session =
            GameSession::new(state, config, rng, Cursor::new(input.as_bytes()), &mut output);
        let outcome = session.run();
        let final_state = session.state().clone();
        drop(session);
        (outcome, final_state, String::from_utf8(output).unwrap())
    }

    #[test]
    fn human_completes_a_vertical_win() {
        let state = State::from_rows(&["....", "X...", "X...", "XO.O"], Player::Opponent).unwrap();
        let (outcome, final_state, out) = play(state, "0\n");

        assert_eq!(outcome.unwrap(), Outcome::OpponentWins);
        assert_eq!(final_state.cell(0, 3), Some(Player::Opponent));
        assert!(out.contains("you beat the engine"));
    }

    #[test]
    fn human_is_reprompted_on_full_column() {
        let state = State::from_rows(&[".O..", "XX..", "XO..", "XO.."], Player::Opponent).unwrap();
        let (outcome, _, out) = play(state, "1\nfoo\n0\n");

        assert_eq!(outcome.unwrap(), Outcome::OpponentWins);
        assert!(out.contains("Column 1 is full."));
        assert!(out.contains("'foo' is not a column number."));
    }

    #[test]
    fn engine_takes_an_immediate_win() {
        let state = State::from_rows(
            &[
                ".......", ".......", ".......", "..O....", "..O....", "XXO..X.",
            ],
            Player::Engine,
        )
        .unwrap();
        let (outcome, final_state, out) = play(state, "");

        assert_eq!(outcome.unwrap(), Outcome::EngineWins);
        assert_eq!(final_state.cell(2, 3), Some(Player::Engine));
        assert!(out.contains("Engine plays column 2"));
        assert!(out.contains("The engine wins"));
    }

    #[test]
    fn engine_answers_forced_move_without_search() {
        let state = State::from_rows(
            &[
                "XOXOXO.", "XOXOXOX", "OXOXOXO", "OXOXOXO", "XOXOXOX", "XOXOXOX",
            ],
            Player::Engine,
        )
        .unwrap();
        let (outcome, final_state, out) = play(state, "");

        assert_eq!(outcome.unwrap(), Outcome::Draw);
        assert!(final_state.is_full());
        assert!(out.contains("Engine plays column 6 (only move)."));
        assert!(out.contains("Draw!"));
    }

    #[test]
    fn single_row_game_ends_in_a_draw() {
        // Nobody can line up four on one row when moves alternate
        let state = State::with_dimensions(1, 4, Player::Opponent).unwrap();
        let (outcome, final_state, out) = play(state, "0\n1\n2\n3\n");

        assert_eq!(outcome.unwrap(), Outcome::Draw);
        assert_eq!(final_state.moves_played(), 4);
        assert_eq!(final_state.cell(0, 0), Some(Player::Opponent));
        assert_eq!(out.matches("Engine plays column").count(), 2);
    }

    #[test]
    fn end_of_input_aborts_the_game() {
        let (outcome, final_state, _) = play(State::new(Player::Opponent), "");
        assert!(outcome.is_err());
        assert_eq!(final_state.moves_played(), 0);
    }

    #[test]
    fn finished_position_only_reports_result() {
        let state = State::from_rows(&["....", "O...", "O...", "O..."], Player::Engine)
            .unwrap()
            .apply(Move::new(0))
            .unwrap();
        let (outcome, _, out) = play(state, "");

        assert_eq!(outcome.unwrap(), Outcome::EngineWins);
        assert!(!out.contains("Which column"));
    }
}
