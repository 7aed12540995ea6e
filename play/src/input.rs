//! Reading the human player's choices.
//!
//! Every prompt re-asks until it gets a usable answer. End of input is an
//! error: the game cannot continue without a move.

use std::io::{BufRead, Write};

use anyhow::{bail, Result};
use games_connect4::{Move, Player, State};
use tracing::debug;

/// Read one line, `None` at end of input.
fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Ask for a column until a legal one is entered.
pub fn prompt_column<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    state: &State,
) -> Result<Move> {
    let last = state.cols().saturating_sub(1);
    loop {
        write!(output, "Which column (0-{})? ", last)?;
        output.flush()?;

        let Some(line) = read_line(input)? else {
            bail!("input closed while waiting for a column");
        };

        let column = match line.parse::<u8>() {
            Ok(column) => column,
            Err(_) => {
                debug!(input = %line, "Rejected column input");
                writeln!(output, "'{}' is not a column number.", line)?;
                continue;
            }
        };
        let mv = Move::new(column);

        if column as usize >= state.cols() {
            writeln!(output, "Column {} is out of range (0-{}).", column, last)?;
        } else if !state.is_legal(mv) {
            writeln!(output, "Column {} is full.", column)?;
        } else {
            return Ok(mv);
        }
    }
}

/// Ask who plays first: `0` for the human, `1` for the engine.
pub fn prompt_first_player<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<Player> {
    loop {
        write!(output, "Who starts (0: human, 1: engine)? ")?;
        output.flush()?;

        let Some(line) = read_line(input)? else {
            bail!("input closed while waiting for the first player");
        };

        match line.as_str() {
            "0" => return Ok(Player::Opponent),
            "1" => return Ok(Player::Engine),
            _ => writeln!(output, "Please answer 0 or 1.")?,
        }
    }
}
