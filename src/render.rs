//! Console text for boards and solutions.

use std::fmt::Write;

use crate::board::{Board, BLANK, DIM};
use crate::solver::Solution;

/// Glyph shown in place of the blank tile.
const BLANK_GLYPH: char = ' ';

/// Formats a board as three `|a b c|` rows with the blank shown as a space.
pub fn format_board(board: &Board) -> String {
    let mut output = String::new();
    for row in 0..DIM {
        output.push('|');
        for col in 0..DIM {
            if col > 0 {
                output.push(' ');
            }
            match board.tile(row, col) {
                BLANK => output.push(BLANK_GLYPH),
                value => output.push(char::from(b'0' + value)),
            }
        }
        output.push_str("|\n");
    }
    output
}

/// Formats the node count, length and move list of a solution.
pub fn format_solution(solution: &Solution) -> String {
    let mut output = String::new();
    // writing into a String cannot fail
    let _ = writeln!(output, "Nodes created during search: {}", solution.nodes);
    let _ = writeln!(output, "Solution length: {}", solution.moves.len());
    output.push_str("Move sequence:\n");
    for mv in &solution.moves {
        let _ = writeln!(output, "move {mv}");
    }
    output
}
