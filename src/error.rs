//! Error types for the eight puzzle engine and its command layer.

use thiserror::Error;

use crate::board::Board;
use crate::moves::Move;

/// Every failure the engine or the session can report.
///
/// None of these are fatal: after any of them the engine is usable again
/// with its settings back at their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PuzzleError {
    /// A node budget or depth limit that is not a positive integer.
    #[error("invalid configuration: {setting} must be a positive integer, got `{value}`")]
    InvalidConfiguration { setting: &'static str, value: String },

    /// The search accepted more states than the configured budget allows.
    #[error("maxnodes limit ({limit}) reached")]
    NodeBudgetExceeded { limit: usize, nodes: usize },

    /// The frontier ran dry without reaching the goal.
    #[error("no solution found after {nodes} states")]
    NoSolutionFound { nodes: usize },

    /// Input that is not a permutation of 0..=8.
    #[error("invalid puzzle state: {0}")]
    InvalidState(String),

    /// A move the blank cannot make from its current cell.
    #[error("invalid move: move {0}")]
    InvalidMove(Move),

    #[error("invalid command: {0}")]
    InvalidCommand(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A parent link is missing while walking back from the goal.
    ///
    /// Only reachable when reconstructing a path for a search that did not
    /// end on the goal.
    #[error("no parent link recorded for state {0}")]
    BrokenPath(Board),
}

/// Result type alias for engine and session operations.
pub type Result<T> = std::result::Result<T, PuzzleError>;
