//! Distance estimates used to order the A* frontier.

use std::fmt;
use std::str::FromStr;

use crate::board::{idx_to_coord, Board};
use crate::error::PuzzleError;

/// Estimate of the moves remaining to the goal.
///
/// Both estimates count the blank like any other tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Heuristic {
    /// `h1`: number of cells whose value differs from the goal.
    MisplacedTiles,
    /// `h2`: total Manhattan distance of every value from its goal cell.
    Manhattan,
}

impl Heuristic {
    /// Identifier used on the command line.
    pub const fn id(self) -> &'static str {
        match self {
            Heuristic::MisplacedTiles => "h1",
            Heuristic::Manhattan => "h2",
        }
    }

    pub fn estimate(self, board: &Board) -> u32 {
        match self {
            Heuristic::MisplacedTiles => misplaced_tiles(board),
            Heuristic::Manhattan => manhattan_distance(board),
        }
    }
}

fn misplaced_tiles(board: &Board) -> u32 {
    board
        .cells()
        .iter()
        .enumerate()
        .filter(|&(cell, &value)| value as usize != cell)
        .count() as u32
}

fn manhattan_distance(board: &Board) -> u32 {
    board
        .cells()
        .iter()
        .enumerate()
        .map(|(cell, &value)| {
            // the goal cell of a value is the value itself
            let (row, col) = idx_to_coord(cell);
            let (goal_row, goal_col) = idx_to_coord(value as usize);
            (row.abs_diff(goal_row) + col.abs_diff(goal_col)) as u32
        })
        .sum()
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Heuristic {
    type Err = PuzzleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "h1" => Ok(Heuristic::MisplacedTiles),
            "h2" => Ok(Heuristic::Manhattan),
            other => Err(PuzzleError::InvalidArgument(format!(
                "unknown heuristic `{other}`, expected h1 or h2"
            ))),
        }
    }
}
