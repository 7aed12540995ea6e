//! Text rendering of the board.

use std::fmt::Write;

use games_connect4::State;

/// Draw the board with a column header, top row first.
///
/// ```text
///    | 0 | 1 | 2 | 3 |
/// --------------------
///  1 |   | X |   |   |
/// --------------------
///  0 | O | X |   |   |
/// --------------------
/// ```
pub fn render_board(state: &State) -> String {
    let separator = "-".repeat(4 * (state.cols() + 1));
    let mut out = String::new();

    out.push_str("   |");
    for col in 0..state.cols() {
        let _ = write!(out, "{:>2} |", col);
    }
    out.push('\n');
    out.push_str(&separator);
    out.push('\n');

    for row in (0..state.rows()).rev() {
        let _ = write!(out, "{:>2} |", row);
        for col in 0..state.cols() {
            let marker = state.cell(col, row).map_or(' ', |p| p.marker());
            let _ = write!(out, " {} |", marker);
        }
        out.push('\n');
        out.push_str(&separator);
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use games_connect4::{Move, Player};

    #[test]
    fn renders_header_and_rows_top_first() {
        let state = State::from_rows(&["....", ".X..", "OX.."], Player::Engine).unwrap();
        let expected = "   | 0 | 1 | 2 | 3 |\n\
                        --------------------\n \
                        2 |   |   |   |   |\n\
                        --------------------\n \
                        1 |   | X |   |   |\n\
                        --------------------\n \
                        0 | O | X |   |   |\n\
                        --------------------\n";
        assert_eq!(render_board(&state), expected);
    }

    #[test]
    fn renders_default_board_size() {
        let state = State::new(Player::Opponent).apply(Move::new(6)).unwrap();
        let rendered = render_board(&state);
        let lines: Vec<&str> = rendered.lines().collect();

        // Header, separator, then a row line and separator per board row
        assert_eq!(lines.len(), 2 + 2 * 6);
        assert!(lines[0].ends_with(" 6 |"));
        assert_eq!(lines[12], " 0 |   |   |   |   |   |   | X |");
    }
}
