//! Text commands and the session that executes them.
//!
//! The command language is a thin layer over [`Engine`]: parsing turns a line
//! into a [`Command`], and [`Session::execute`] maps each command onto a board
//! update or a single engine call. No search logic lives here.

use std::str::FromStr;

use tracing::warn;

use crate::board::Board;
use crate::config::{parse_setting, DEPTH_LIMIT_SETTING, MAX_NODES_SETTING};
use crate::error::{PuzzleError, Result};
use crate::moves::Move;
use crate::render::{format_board, format_solution};
use crate::scramble::scramble_seeded;
use crate::solver::{Engine, Strategy};

/// A parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `setState 1 0 2 3 4 5 6 7 8`
    SetState(Board),
    /// `printState`
    PrintState,
    /// `move up`
    Move(Move),
    /// `scrambleState 20`
    Scramble(usize),
    /// `setSeed 42`
    SetSeed(u64),
    /// `solve BFS [maxnodes=N]`, `solve DFS [maxnodes=N] [depthlimit=N]`,
    /// `solve A* h1|h2 [maxnodes=N]`
    Solve {
        strategy: Strategy,
        max_nodes: Option<usize>,
        depth_limit: Option<usize>,
    },
}

impl FromStr for Command {
    type Err = PuzzleError;

    fn from_str(line: &str) -> Result<Self> {
        let invalid = || PuzzleError::InvalidCommand(line.trim().to_string());
        let tokens: Vec<&str> = line.split_whitespace().collect();

        match tokens.as_slice() {
            ["setState", cells @ ..] if !cells.is_empty() => {
                Ok(Command::SetState(cells.join(" ").parse()?))
            }
            ["printState"] => Ok(Command::PrintState),
            ["move", direction] => direction
                .parse()
                .map(Command::Move)
                .map_err(|_| invalid()),
            ["scrambleState", count] => {
                let count: i64 = count.parse().map_err(|_| invalid())?;
                let count = usize::try_from(count).map_err(|_| {
                    PuzzleError::InvalidArgument(
                        "number of moves must not be negative".to_string(),
                    )
                })?;
                Ok(Command::Scramble(count))
            }
            ["setSeed", seed] => seed.parse().map(Command::SetSeed).map_err(|_| invalid()),
            ["solve", strategy, options @ ..] => parse_solve(line, strategy, options),
            _ => Err(invalid()),
        }
    }
}

/// Parses the strategy and its `key=value` options.
///
/// Every option is validated here, so a malformed budget or depth limit is
/// rejected before any setting changes or any search starts.
fn parse_solve(line: &str, strategy: &str, options: &[&str]) -> Result<Command> {
    let invalid = || PuzzleError::InvalidCommand(line.trim().to_string());

    let (strategy, options) = match (strategy, options) {
        ("BFS", rest) => (Strategy::BreadthFirst, rest),
        ("DFS", rest) => (Strategy::DepthFirst, rest),
        ("A*", [heuristic, rest @ ..]) => {
            let heuristic = heuristic.parse().map_err(|_| invalid())?;
            (Strategy::AStar(heuristic), rest)
        }
        _ => return Err(invalid()),
    };

    let mut max_nodes = None;
    let mut depth_limit = None;
    for option in options {
        let (key, value) = option.split_once('=').ok_or_else(invalid)?;
        match key {
            MAX_NODES_SETTING if max_nodes.is_none() => {
                max_nodes = Some(parse_setting(MAX_NODES_SETTING, value)?);
            }
            // only DFS has a depth limit
            DEPTH_LIMIT_SETTING if depth_limit.is_none() && strategy == Strategy::DepthFirst => {
                depth_limit = Some(parse_setting(DEPTH_LIMIT_SETTING, value)?);
            }
            _ => return Err(invalid()),
        }
    }

    Ok(Command::Solve {
        strategy,
        max_nodes,
        depth_limit,
    })
}

/// Current board, engine and random seed shared by a sequence of commands.
#[derive(Debug, Default)]
pub struct Session {
    board: Board,
    engine: Engine,
    seed: u64,
}

impl Session {
    /// Starts at the goal board with seed 0.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Parses and executes one line, returning the text to print.
    pub fn run_line(&mut self, line: &str) -> Result<String> {
        let command: Command = line.parse()?;
        self.execute(command)
    }

    pub fn execute(&mut self, command: Command) -> Result<String> {
        match command {
            Command::SetState(board) => {
                if !board.is_solvable() {
                    warn!(board = %board, "board cannot reach the goal");
                }
                self.board = board;
                Ok(format_board(&self.board))
            }
            Command::PrintState => Ok(format_board(&self.board)),
            Command::Move(direction) => {
                self.board = self.board.apply(direction)?;
                Ok(format_board(&self.board))
            }
            Command::Scramble(moves) => {
                self.board = scramble_seeded(moves, self.seed);
                Ok(format_board(&self.board))
            }
            Command::SetSeed(seed) => {
                self.seed = seed;
                Ok(String::new())
            }
            Command::Solve {
                strategy,
                max_nodes,
                depth_limit,
            } => {
                let mut config = self.engine.config();
                if let Some(max_nodes) = max_nodes {
                    config = config.with_max_nodes(max_nodes)?;
                }
                if let Some(depth_limit) = depth_limit {
                    config = config.with_depth_limit(depth_limit)?;
                }
                self.engine
                    .configure(config.max_nodes, config.depth_limit)?;

                let solution = self.engine.solve(&self.board, strategy)?;
                Ok(format_solution(&solution))
            }
        }
    }
}
