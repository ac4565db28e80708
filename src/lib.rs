//! Eight Puzzle Solver Library
//!
//! Solves the 3x3 sliding-tile puzzle with breadth-first search,
//! depth-limited depth-first search, and A* with a choice of two heuristics.
//! The [`Engine`] runs searches; [`Session`] layers the text command language
//! on top of it.

pub mod batch;
pub mod board;
pub mod command;
pub mod config;
pub mod error;
pub mod frontier;
pub mod heuristic;
pub mod moves;
pub mod render;
pub mod scramble;
pub mod solver;

pub use board::Board;
pub use command::{Command, Session};
pub use config::SearchConfig;
pub use error::{PuzzleError, Result};
pub use heuristic::Heuristic;
pub use moves::Move;
pub use solver::{Engine, Solution, Strategy};
