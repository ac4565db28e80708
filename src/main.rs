//! Eight Puzzle Solver
//!
//! Runs command files, solves single boards from the command line, or reads
//! commands interactively when no subcommand is given.

use std::io;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use eightpuzzle::batch;
use eightpuzzle::config::{DEFAULT_DEPTH_LIMIT, DEFAULT_MAX_NODES};
use eightpuzzle::render::{format_board, format_solution};
use eightpuzzle::{Board, Engine, Heuristic, Session, Strategy};

/// Solves the 3x3 sliding-tile puzzle with BFS, DFS or A*.
#[derive(Parser)]
#[command(name = "eightpuzzle")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log search progress to stderr (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the commands in a file, echoing each line.
    Run {
        /// Path to the command file.
        file: PathBuf,
    },
    /// Solve one board and print the move sequence.
    Solve {
        /// Nine space-separated tiles in row-major order, 0 for the blank.
        #[arg(long)]
        state: String,
        #[arg(long, value_enum, default_value_t = StrategyArg::Bfs)]
        strategy: StrategyArg,
        /// Heuristic for A*.
        #[arg(long, value_enum, default_value_t = HeuristicArg::H2)]
        heuristic: HeuristicArg,
        /// Maximum number of states to accept before giving up.
        #[arg(long, default_value_t = DEFAULT_MAX_NODES)]
        max_nodes: usize,
        /// Deepest level DFS will expand past.
        #[arg(long, default_value_t = DEFAULT_DEPTH_LIMIT)]
        depth_limit: usize,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum StrategyArg {
    Bfs,
    Dfs,
    Astar,
}

#[derive(Clone, Copy, ValueEnum)]
enum HeuristicArg {
    H1,
    H2,
}

impl StrategyArg {
    fn with_heuristic(self, heuristic: HeuristicArg) -> Strategy {
        match self {
            StrategyArg::Bfs => Strategy::BreadthFirst,
            StrategyArg::Dfs => Strategy::DepthFirst,
            StrategyArg::Astar => Strategy::AStar(match heuristic {
                HeuristicArg::H1 => Heuristic::MisplacedTiles,
                HeuristicArg::H2 => Heuristic::Manhattan,
            }),
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Some(Command::Run { file }) => run_batch(file),
        Some(Command::Solve {
            state,
            strategy,
            heuristic,
            max_nodes,
            depth_limit,
        }) => run_solve(
            &state,
            strategy.with_heuristic(heuristic),
            max_nodes,
            depth_limit,
        ),
        None => run_interactive(),
    }
}

/// Installs a stderr subscriber filtered by `RUST_LOG`.
fn init_logging(verbose: bool) {
    let default_directive = if verbose { "eightpuzzle=info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Runs a command file against a fresh session.
fn run_batch(file: PathBuf) {
    let mut session = Session::new();
    let mut stdout = io::stdout().lock();
    if let Err(e) = batch::run_file(&mut session, &file, &mut stdout) {
        eprintln!("Failed to run {}: {}", file.display(), e);
        process::exit(1);
    }
}

/// Solves one board with the given settings and prints the result.
fn run_solve(state: &str, strategy: Strategy, max_nodes: usize, depth_limit: usize) {
    let origin: Board = match state.parse() {
        Ok(board) => board,
        Err(e) => {
            println!("Error: {e}");
            process::exit(1);
        }
    };

    let mut engine = Engine::new();
    let outcome = engine
        .configure(max_nodes, depth_limit)
        .and_then(|()| engine.solve(&origin, strategy));

    print!("{}", format_board(&origin));
    match outcome {
        Ok(solution) => print!("{}", format_solution(&solution)),
        Err(e) => {
            println!("Error: {e}");
            process::exit(1);
        }
    }
}

/// Reads commands from stdin until `stop`.
fn run_interactive() {
    let mut session = Session::new();
    let stdin = io::stdin().lock();
    let mut stdout = io::stdout().lock();
    if let Err(e) = batch::interactive(&mut session, stdin, &mut stdout) {
        eprintln!("Failed to read commands: {}", e);
        process::exit(1);
    }
}
