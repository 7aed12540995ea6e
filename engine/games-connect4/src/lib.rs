//! Connect 4 rules for the dropfour engine
//!
//! Connect 4 is a two-player connection game where players drop colored discs
//! into a vertically suspended grid. The objective is to be the first to form
//! a horizontal, vertical, or diagonal line of four discs.
//!
//! # Board Layout
//!
//! The board is stored in row-major order, with row 0 at the bottom. For the
//! default 6 x 7 board:
//! ```text
//! Row 5: [35][36][37][38][39][40][41]  <- Top
//! Row 4: [28][29][30][31][32][33][34]
//! Row 3: [21][22][23][24][25][26][27]
//! Row 2: [14][15][16][17][18][19][20]
//! Row 1: [ 7][ 8][ 9][10][11][12][13]
//! Row 0: [ 0][ 1][ 2][ 3][ 4][ 5][ 6]  <- Bottom
//!         Col 0  1  2  3  4  5  6
//! ```
//!
//! # Usage
//!
//! ```rust
//! use games_connect4::{Move, Outcome, Player, State};
//!
//! let state = State::new(Player::Engine);
//! let next = state.apply(Move::new(3)).unwrap();
//! assert_eq!(next.to_move(), Player::Opponent);
//! assert_eq!(next.classify(), Outcome::Ongoing);
//! ```

use std::fmt;

use thiserror::Error;

/// Default board dimensions
pub const DEFAULT_ROWS: usize = 6;
pub const DEFAULT_COLS: usize = 7;

/// Largest supported value for either board dimension.
pub const MAX_DIMENSION: usize = 16;

/// Length of the run that wins the game.
pub const CONNECT: usize = 4;

/// Scan directions in (dcol, drow) with row 0 at the bottom.
/// Screen order: right, down, down-right, down-left.
const DIRECTIONS: [(isize, isize); 4] = [(1, 0), (0, -1), (1, -1), (-1, -1)];

/// Errors raised by the rules.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("column {column} is full")]
    IllegalMove { column: u8 },

    #[error("column {column} is outside the board (0..{cols})")]
    ColumnOutOfRange { column: u8, cols: usize },

    #[error("invalid board dimensions {rows}x{cols}, each must be within 1..={max}")]
    InvalidDimensions { rows: usize, cols: usize, max: usize },

    #[error("invalid position: {0}")]
    InvalidPosition(String),
}

/// One of the two sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    /// The human (or any outside) player, drawn as `X`
    Opponent,
    /// The search engine, drawn as `O`
    Engine,
}

impl Player {
    #[inline]
    pub fn other(self) -> Self {
        match self {
            Player::Opponent => Player::Engine,
            Player::Engine => Player::Opponent,
        }
    }

    /// Character used for this player's discs.
    pub fn marker(self) -> char {
        match self {
            Player::Opponent => 'X',
            Player::Engine => 'O',
        }
    }

    fn from_marker(c: char) -> Option<Self> {
        match c {
            'X' => Some(Player::Opponent),
            'O' => Some(Player::Engine),
            _ => None,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::Opponent => write!(f, "opponent"),
            Player::Engine => write!(f, "engine"),
        }
    }
}

/// Drop a disc in a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    column: u8,
}

impl Move {
    pub fn new(column: u8) -> Self {
        Self { column }
    }

    /// Get the column for this move
    #[inline]
    pub fn column(&self) -> u8 {
        self.column
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.column)
    }
}

/// Terminal classification of a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Ongoing,
    Draw,
    EngineWins,
    OpponentWins,
}

impl Outcome {
    #[inline]
    pub fn is_terminal(self) -> bool {
        self != Outcome::Ongoing
    }

    /// Win outcome for the given player.
    pub fn win_for(player: Player) -> Self {
        match player {
            Player::Engine => Outcome::EngineWins,
            Player::Opponent => Outcome::OpponentWins,
        }
    }
}

/// Connect4 game state
///
/// A grid of cells plus the side to move. States are values: `apply` always
/// returns a fresh copy and never touches `self`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct State {
    rows: usize,
    cols: usize,
    /// Row-major with row 0 at the bottom
    board: Vec<Option<Player>>,
    /// Number of discs in each column
    column_heights: Vec<u8>,
    to_move: Player,
}

impl State {
    /// Empty default-size board with `first` to move.
    pub fn new(first: Player) -> Self {
        Self::empty(DEFAULT_ROWS, DEFAULT_COLS, first)
    }

    /// Empty board of the given size.
    pub fn with_dimensions(rows: usize, cols: usize, first: Player) -> Result<Self, GameError> {
        check_dimensions(rows, cols)?;
        Ok(Self::empty(rows, cols, first))
    }

    fn empty(rows: usize, cols: usize, first: Player) -> Self {
        Self {
            rows,
            cols,
            board: vec![None; rows * cols],
            column_heights: vec![0; cols],
            to_move: first,
        }
    }

    /// Build a position from a diagram, top row first.
    ///
    /// `.` is an empty cell, `X` an opponent disc and `O` an engine disc.
    /// The board size is taken from the diagram itself.
    pub fn from_rows(rows: &[&str], to_move: Player) -> Result<Self, GameError> {
        let height = rows.len();
        let width = rows.first().map(|r| r.chars().count()).unwrap_or(0);
        check_dimensions(height, width)?;

        let mut state = Self::empty(height, width, to_move);
        for (display_row, line) in rows.iter().enumerate() {
            let row = height - 1 - display_row;
            let cells: Vec<char> = line.chars().collect();
            if cells.len() != width {
                return Err(GameError::InvalidPosition(format!(
                    "row {} has {} cells, expected {}",
                    display_row,
                    cells.len(),
                    width
                )));
            }
            for (col, c) in cells.into_iter().enumerate() {
                let cell = match c {
                    '.' => None,
                    other => Some(Player::from_marker(other).ok_or_else(|| {
                        GameError::InvalidPosition(format!("unknown cell marker '{}'", other))
                    })?),
                };
                state.board[row * width + col] = cell;
            }
        }

        // Gravity: no disc may sit above an empty cell
        for col in 0..width {
            let height_in_col = (0..height)
                .take_while(|&row| state.board[row * width + col].is_some())
                .count();
            if (height_in_col..height).any(|row| state.board[row * width + col].is_some()) {
                return Err(GameError::InvalidPosition(format!(
                    "column {} has a floating disc",
                    col
                )));
            }
            state.column_heights[col] = height_in_col as u8;
        }

        Ok(state)
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Side whose turn it is.
    #[inline]
    pub fn to_move(&self) -> Player {
        self.to_move
    }

    /// Contents of a cell, row 0 being the bottom.
    pub fn cell(&self, col: usize, row: usize) -> Option<Player> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        self.board[self.pos(col, row)]
    }

    /// Number of discs already in a column.
    pub fn column_height(&self, col: usize) -> usize {
        self.column_heights.get(col).map_or(0, |&h| h as usize)
    }

    /// Total discs on the board.
    pub fn moves_played(&self) -> usize {
        self.column_heights.iter().map(|&h| h as usize).sum()
    }

    pub fn is_full(&self) -> bool {
        self.column_heights.iter().all(|&h| h as usize >= self.rows)
    }

    /// Legal moves (columns that are not full), in ascending column order.
    pub fn legal_moves(&self) -> Vec<Move> {
        (0..self.cols)
            .filter(|&col| (self.column_heights[col] as usize) < self.rows)
            .map(|col| Move::new(col as u8))
            .collect()
    }

    /// Whether `mv` can be played on this board.
    pub fn is_legal(&self, mv: Move) -> bool {
        let col = mv.column() as usize;
        col < self.cols && (self.column_heights[col] as usize) < self.rows
    }

    /// Convert column and row to board index
    #[inline]
    fn pos(&self, col: usize, row: usize) -> usize {
        row * self.cols + col
    }

    /// Drop the side-to-move's disc in a column and return the new state.
    pub fn apply(&self, mv: Move) -> Result<State, GameError> {
        let col = mv.column() as usize;
        if col >= self.cols {
            return Err(GameError::ColumnOutOfRange {
                column: mv.column(),
                cols: self.cols,
            });
        }
        let row = self.column_heights[col] as usize;
        if row >= self.rows {
            return Err(GameError::IllegalMove {
                column: mv.column(),
            });
        }

        let mut next = self.clone();
        let pos = next.pos(col, row);
        next.board[pos] = Some(self.to_move);
        next.column_heights[col] += 1;
        next.to_move = self.to_move.other();
        Ok(next)
    }

    /// Classify the position.
    ///
    /// Cells are visited in screen order (top row first, left to right) and
    /// each occupied cell is tested in the directions right, down, down-right
    /// and down-left. The first run of four found decides the result.
    pub fn classify(&self) -> Outcome {
        for row in (0..self.rows).rev() {
            for col in 0..self.cols {
                let Some(player) = self.board[self.pos(col, row)] else {
                    continue;
                };
                for (dc, dr) in DIRECTIONS {
                    if self.run_length(col, row, dc, dr, player) >= CONNECT {
                        return Outcome::win_for(player);
                    }
                }
            }
        }

        if self.is_full() {
            Outcome::Draw
        } else {
            Outcome::Ongoing
        }
    }

    /// Count `player` discs from (col, row) stepping by (dc, dr), up to CONNECT.
    fn run_length(&self, col: usize, row: usize, dc: isize, dr: isize, player: Player) -> usize {
        let (mut c, mut r) = (col as isize, row as isize);
        let mut count = 0;
        while count < CONNECT
            && c >= 0
            && r >= 0
            && (c as usize) < self.cols
            && (r as usize) < self.rows
            && self.board[self.pos(c as usize, r as usize)] == Some(player)
        {
            count += 1;
            c += dc;
            r += dr;
        }
        count
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new(Player::Opponent)
    }
}

fn check_dimensions(rows: usize, cols: usize) -> Result<(), GameError> {
    if rows == 0 || cols == 0 || rows > MAX_DIMENSION || cols > MAX_DIMENSION {
        return Err(GameError::InvalidDimensions {
            rows,
            cols,
            max: MAX_DIMENSION,
        });
    }
    Ok(())
}
