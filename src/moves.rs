//! Blank-tile moves on the 3x3 grid.
//!
//! A move names the direction the blank slides. Which moves are legal depends
//! only on the blank's cell, so generation works on a cell index and never
//! has to look at the tiles themselves.

use std::fmt;
use std::str::FromStr;

use crate::board::{idx_to_coord, DIM};
use crate::error::PuzzleError;

/// Direction the blank tile slides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Left,
    Right,
    Up,
    Down,
}

impl Move {
    /// Every move, in the order used wherever move sets are iterated.
    ///
    /// Ordering note: BFS and A* keep the first parent link they discover, so
    /// changing this order changes which of several equal paths is returned.
    pub const ALL: [Move; 4] = [Move::Left, Move::Right, Move::Up, Move::Down];

    /// Lowercase name, as used by the command language.
    pub const fn name(self) -> &'static str {
        match self {
            Move::Left => "left",
            Move::Right => "right",
            Move::Up => "up",
            Move::Down => "down",
        }
    }

    /// The move that undoes this one.
    pub const fn opposite(self) -> Move {
        match self {
            Move::Left => Move::Right,
            Move::Right => Move::Left,
            Move::Up => Move::Down,
            Move::Down => Move::Up,
        }
    }

    /// Whether a blank at `(row, col)` can slide in this direction.
    #[inline]
    pub const fn is_valid_at(self, row: usize, col: usize) -> bool {
        match self {
            Move::Left => col > 0,
            Move::Right => col < DIM - 1,
            Move::Up => row > 0,
            Move::Down => row < DIM - 1,
        }
    }

    /// Cell index the blank lands on when leaving `blank`.
    ///
    /// Only meaningful for a move that is valid at `blank`.
    #[inline]
    pub(crate) const fn target(self, blank: usize) -> usize {
        match self {
            Move::Left => blank - 1,
            Move::Right => blank + 1,
            Move::Up => blank - DIM,
            Move::Down => blank + DIM,
        }
    }
}

/// Moves available to a blank at cell index `blank`, in [`Move::ALL`] order.
pub fn valid_moves(blank: usize) -> impl Iterator<Item = Move> {
    let (row, col) = idx_to_coord(blank);
    Move::ALL
        .into_iter()
        .filter(move |mv| mv.is_valid_at(row, col))
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Move {
    type Err = PuzzleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Move::ALL
            .into_iter()
            .find(|mv| mv.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| PuzzleError::InvalidArgument(format!("unknown direction `{s}`")))
    }
}
