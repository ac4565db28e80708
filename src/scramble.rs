//! Random walks away from the goal.
//!
//! Walking from the goal with legal moves only ever produces solvable boards.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::board::Board;
use crate::moves::Move;

/// Makes `moves` random legal moves starting from the goal.
///
/// Each step picks uniformly among the moves valid at the current blank cell.
pub fn scramble<R: Rng + ?Sized>(moves: usize, rng: &mut R) -> Board {
    let mut board = Board::GOAL;
    for _ in 0..moves {
        let options: Vec<Move> = board.valid_moves().collect();
        if let Some(&mv) = options.choose(rng) {
            board = board.slide(mv);
        }
    }
    board
}

/// Same as [`scramble`] with a fresh generator seeded from `seed`, so a given
/// (moves, seed) pair always yields the same board.
pub fn scramble_seeded(moves: usize, seed: u64) -> Board {
    let mut rng = StdRng::seed_from_u64(seed);
    scramble(moves, &mut rng)
}
