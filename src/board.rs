//! Board representation for the 3x3 sliding-tile puzzle.
//!
//! A board is a flat row-major array holding each of the values 0..=8 once,
//! with 0 standing for the blank. The array is the whole identity of a state,
//! so `Board` is used directly as the key of every visited set and parent map.

use std::fmt;
use std::str::FromStr;

use crate::error::{PuzzleError, Result};
use crate::moves::{valid_moves, Move};

/// Cells per side.
pub const DIM: usize = 3;

/// Total number of cells.
pub const GRID_SIZE: usize = DIM * DIM;

/// Value used for the blank cell.
pub const BLANK: u8 = 0;

/// Converts (row, col) to a linear cell index.
///
/// Index order is row-major: `idx = row * DIM + col`.
#[inline(always)]
pub const fn coord_to_idx(row: usize, col: usize) -> usize {
    row * DIM + col
}

/// Converts a linear cell index to (row, col).
#[inline(always)]
pub const fn idx_to_coord(cell_index: usize) -> (usize, usize) {
    (cell_index / DIM, cell_index % DIM)
}

/// An immutable puzzle state.
///
/// Always a permutation of 0..=8. Transformations return new boards; nothing
/// mutates a board once it exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [u8; GRID_SIZE],
    /// Cell index of the blank, kept alongside the cells so move generation
    /// does not have to scan for it.
    blank: u8,
}

impl Board {
    /// The solved board: cell (r, c) holds 3r + c.
    pub const GOAL: Board = Board {
        cells: [0, 1, 2, 3, 4, 5, 6, 7, 8],
        blank: 0,
    };

    /// Builds a board from row-major cell values.
    ///
    /// Fails with [`PuzzleError::InvalidState`] unless the values are a
    /// permutation of 0..=8.
    pub fn new(cells: [u8; GRID_SIZE]) -> Result<Self> {
        let mut seen = [false; GRID_SIZE];
        for &value in &cells {
            let slot = seen.get_mut(value as usize).ok_or_else(|| {
                PuzzleError::InvalidState(format!("tile {value} is outside 0..=8"))
            })?;
            if *slot {
                return Err(PuzzleError::InvalidState(format!(
                    "tile {value} appears more than once"
                )));
            }
            *slot = true;
        }

        let Some(blank) = cells.iter().position(|&value| value == BLANK) else {
            return Err(PuzzleError::InvalidState("no blank tile".to_string()));
        };

        Ok(Self {
            cells,
            blank: blank as u8,
        })
    }

    /// Row-major cell values.
    #[inline]
    pub fn cells(&self) -> &[u8; GRID_SIZE] {
        &self.cells
    }

    /// Value at (row, col).
    #[inline]
    pub fn tile(&self, row: usize, col: usize) -> u8 {
        self.cells[coord_to_idx(row, col)]
    }

    /// Cell index of the blank.
    #[inline]
    pub fn blank_index(&self) -> usize {
        self.blank as usize
    }

    /// (row, col) of the blank.
    #[inline]
    pub fn blank(&self) -> (usize, usize) {
        idx_to_coord(self.blank_index())
    }

    #[inline]
    pub fn is_goal(&self) -> bool {
        *self == Self::GOAL
    }

    /// Moves the blank can make from here, in [`Move::ALL`] order.
    pub fn valid_moves(&self) -> impl Iterator<Item = Move> {
        valid_moves(self.blank_index())
    }

    /// Slides the blank in `direction`, returning the resulting board.
    ///
    /// Fails with [`PuzzleError::InvalidMove`] if the blank would leave the grid.
    pub fn apply(&self, direction: Move) -> Result<Board> {
        let (row, col) = self.blank();
        if !direction.is_valid_at(row, col) {
            return Err(PuzzleError::InvalidMove(direction));
        }
        Ok(self.slide(direction))
    }

    /// Every (move, child) pair reachable in one step, in [`Move::ALL`] order.
    pub fn successors(&self) -> impl Iterator<Item = (Move, Board)> {
        let parent = *self;
        self.valid_moves().map(move |mv| (mv, parent.slide(mv)))
    }

    /// Applies `moves` in order, failing on the first one that is not valid
    /// where it is applied.
    pub fn replay(&self, moves: &[Move]) -> Result<Board> {
        moves.iter().try_fold(*self, |board, &mv| board.apply(mv))
    }

    /// Whether the goal is reachable from this board.
    ///
    /// On an odd-width grid a board is solvable exactly when the number of
    /// inversions among the non-blank tiles is even.
    pub fn is_solvable(&self) -> bool {
        let tiles: Vec<u8> = self
            .cells
            .iter()
            .copied()
            .filter(|&value| value != BLANK)
            .collect();

        let inversions: usize = tiles
            .iter()
            .enumerate()
            .map(|(i, &value)| tiles[i + 1..].iter().filter(|&&later| later < value).count())
            .sum();

        inversions % 2 == 0
    }

    /// Swaps the blank with its neighbour in `direction`.
    ///
    /// Caller guarantees the move is valid for the current blank cell.
    #[inline]
    pub(crate) fn slide(&self, direction: Move) -> Board {
        let from = self.blank_index();
        let to = direction.target(from);
        let mut cells = self.cells;
        cells.swap(from, to);
        Board {
            cells,
            blank: to as u8,
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::GOAL
    }
}

/// Nine space-separated values in row-major order, e.g. `1 0 2 3 4 5 6 7 8`.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, value) in self.cells.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{value}")?;
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = PuzzleError;

    fn from_str(s: &str) -> Result<Self> {
        let values: Vec<u8> = s
            .split_whitespace()
            .map(|token| {
                token
                    .parse::<u8>()
                    .map_err(|_| PuzzleError::InvalidState(format!("`{token}` is not a tile")))
            })
            .collect::<Result<_>>()?;

        let cells: [u8; GRID_SIZE] = values.try_into().map_err(|values: Vec<u8>| {
            PuzzleError::InvalidState(format!(
                "expected {GRID_SIZE} tiles, found {}",
                values.len()
            ))
        })?;

        Board::new(cells)
    }
}
