//! State-space search over eight puzzle boards.
//!
//! Three strategies share one scaffold:
//! - BFS: FIFO frontier, visited set, first-discovery parent links
//! - DFS: LIFO frontier bounded by a depth limit, best-depth map,
//!   latest-acceptance parent links
//! - A*: min-f frontier, f-value map, first-discovery parent links
//!
//! Every strategy enforces the same node budget against the size of its
//! accepted-state record. Frontiers, records and parent links live only for
//! the duration of one call.

use std::collections::VecDeque;
use std::fmt;

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, info};

use crate::board::Board;
use crate::config::SearchConfig;
use crate::error::{PuzzleError, Result};
use crate::frontier::{BestFirst, Frontier};
use crate::heuristic::Heuristic;
use crate::moves::Move;

/// Which search to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    BreadthFirst,
    DepthFirst,
    AStar(Heuristic),
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::BreadthFirst => f.write_str("BFS"),
            Strategy::DepthFirst => f.write_str("DFS"),
            Strategy::AStar(heuristic) => write!(f, "A* {heuristic}"),
        }
    }
}

/// A successful search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    /// Moves from the origin to the goal, in order.
    pub moves: Vec<Move>,
    /// Distinct states accepted before the goal was reached.
    pub nodes: usize,
}

/// State -> (predecessor, move that produced it).
type ParentMap = FxHashMap<Board, (Board, Move)>;

/// Bookkeeping shared by all strategies within one call.
struct SearchScope {
    origin: Board,
    max_nodes: usize,
    parents: ParentMap,
}

impl SearchScope {
    fn new(origin: Board, max_nodes: usize) -> Self {
        Self {
            origin,
            max_nodes,
            parents: ParentMap::default(),
        }
    }

    /// Fails once more than `max_nodes` states have been accepted.
    #[inline]
    fn check_budget(&self, accepted: usize) -> Result<()> {
        if accepted > self.max_nodes {
            debug!(
                event = "budget_exceeded",
                limit = self.max_nodes,
                nodes = accepted
            );
            return Err(PuzzleError::NodeBudgetExceeded {
                limit: self.max_nodes,
                nodes: accepted,
            });
        }
        Ok(())
    }

    /// Records `parent` for `child` unless `child` already has one.
    ///
    /// The origin never gets an entry, even when a neighbour leads back to it.
    #[inline]
    fn record_first_discovery(&mut self, child: Board, parent: Board, mv: Move) {
        if child != self.origin {
            self.parents.entry(child).or_insert((parent, mv));
        }
    }

    /// Records `parent` for `child`, replacing any earlier link.
    #[inline]
    fn record_latest(&mut self, child: Board, parent: Board, mv: Move) {
        self.parents.insert(child, (parent, mv));
    }

    fn reconstruct_path(&self) -> Result<Vec<Move>> {
        reconstruct_path(&self.parents, self.origin, Board::GOAL)
    }
}

/// Walks parent links back from `goal` to `origin`.
///
/// Only valid after a search that ended on `goal`; a missing link yields
/// [`PuzzleError::BrokenPath`].
fn reconstruct_path(parents: &ParentMap, origin: Board, goal: Board) -> Result<Vec<Move>> {
    let mut moves = Vec::new();
    let mut state = goal;
    while state != origin {
        let &(parent, mv) = parents.get(&state).ok_or(PuzzleError::BrokenPath(state))?;
        moves.push(mv);
        state = parent;
    }
    moves.reverse();
    Ok(moves)
}

/// Runs searches and carries the settings for the next one.
///
/// Settings apply to a single [`Engine::solve`] call: every call, whatever
/// its outcome, leaves the defaults in place for the call after it.
#[derive(Debug, Default)]
pub struct Engine {
    config: SearchConfig,
    last_node_count: usize,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Settings the next solve call will use.
    pub fn config(&self) -> SearchConfig {
        self.config
    }

    /// Sets both the node budget and the DFS depth limit.
    ///
    /// Zero is rejected and leaves the current settings untouched.
    pub fn configure(&mut self, max_nodes: usize, depth_limit: usize) -> Result<()> {
        self.config = SearchConfig::new(max_nodes, depth_limit)?;
        Ok(())
    }

    pub fn set_max_nodes(&mut self, max_nodes: usize) -> Result<()> {
        self.config = self.config.with_max_nodes(max_nodes)?;
        Ok(())
    }

    pub fn set_depth_limit(&mut self, depth_limit: usize) -> Result<()> {
        self.config = self.config.with_depth_limit(depth_limit)?;
        Ok(())
    }

    /// States accepted by the most recent solve call, successful or not.
    pub fn last_node_count(&self) -> usize {
        self.last_node_count
    }

    /// Searches from `origin` to the goal.
    ///
    /// # Errors
    ///
    /// [`PuzzleError::NodeBudgetExceeded`] when more states are accepted than
    /// the budget allows, [`PuzzleError::NoSolutionFound`] when the frontier
    /// empties first.
    pub fn solve(&mut self, origin: &Board, strategy: Strategy) -> Result<Solution> {
        // the configured settings are consumed by this call
        let config = std::mem::take(&mut self.config);

        info!(
            event = "solve_start",
            strategy = %strategy,
            origin = %origin,
            max_nodes = config.max_nodes,
            depth_limit = config.depth_limit,
        );

        let mut scope = SearchScope::new(*origin, config.max_nodes);
        let result = match strategy {
            Strategy::BreadthFirst => breadth_first(&mut scope),
            Strategy::DepthFirst => depth_first(&mut scope, config.depth_limit),
            Strategy::AStar(heuristic) => a_star(&mut scope, heuristic),
        };

        self.last_node_count = match &result {
            Ok(nodes)
            | Err(PuzzleError::NodeBudgetExceeded { nodes, .. })
            | Err(PuzzleError::NoSolutionFound { nodes }) => *nodes,
            Err(_) => 0,
        };

        match &result {
            Ok(_) => info!(
                event = "solve_end",
                strategy = %strategy,
                nodes = self.last_node_count,
                outcome = "goal_reached",
            ),
            Err(err) => info!(
                event = "solve_end",
                strategy = %strategy,
                nodes = self.last_node_count,
                outcome = %err,
            ),
        }

        let nodes = result?;
        let moves = scope.reconstruct_path()?;
        Ok(Solution { moves, nodes })
    }
}

/// Returns the number of visited states when the goal is popped.
fn breadth_first(scope: &mut SearchScope) -> Result<usize> {
    let mut frontier: VecDeque<Board> = VecDeque::from([scope.origin]);
    let mut visited: FxHashSet<Board> = FxHashSet::default();

    while let Some(state) = frontier.pop() {
        if state.is_goal() {
            return Ok(visited.len());
        }

        // duplicates reach the queue through different parents
        if !visited.insert(state) {
            continue;
        }
        scope.check_budget(visited.len())?;

        for (mv, child) in state.successors() {
            frontier.push(child);
            scope.record_first_discovery(child, state, mv);
        }
    }

    debug!(event = "frontier_exhausted", strategy = "BFS", nodes = visited.len());
    Err(PuzzleError::NoSolutionFound {
        nodes: visited.len(),
    })
}

/// A DFS stack entry.
struct DepthEntry {
    state: Board,
    /// Parent and the move from it; `None` only for the origin.
    link: Option<(Board, Move)>,
    depth: usize,
}

/// Returns the size of the accepted-depth map when the goal is accepted.
fn depth_first(scope: &mut SearchScope, depth_limit: usize) -> Result<usize> {
    let mut frontier: Vec<DepthEntry> = vec![DepthEntry {
        state: scope.origin,
        link: None,
        depth: 0,
    }];
    let mut accepted: FxHashMap<Board, usize> = FxHashMap::default();

    while let Some(DepthEntry { state, link, depth }) = frontier.pop() {
        if depth >= depth_limit {
            continue;
        }

        // a state is only expanded again when reached by a strictly shallower path
        if accepted.get(&state).is_some_and(|&best| best <= depth) {
            continue;
        }
        accepted.insert(state, depth);
        scope.check_budget(accepted.len())?;

        if let Some((parent, mv)) = link {
            scope.record_latest(state, parent, mv);
        }

        if state.is_goal() {
            return Ok(accepted.len());
        }

        for (mv, child) in state.successors() {
            frontier.push(DepthEntry {
                state: child,
                link: Some((state, mv)),
                depth: depth + 1,
            });
        }
    }

    debug!(
        event = "frontier_exhausted",
        strategy = "DFS",
        depth_limit,
        nodes = accepted.len()
    );
    Err(PuzzleError::NoSolutionFound {
        nodes: accepted.len(),
    })
}

/// Whether an A* entry for `state` with value `f` is dominated by an earlier
/// acceptance.
///
/// The comparison is on f = g + h, not on the path cost g.
#[inline]
fn is_stale(seen: &FxHashMap<Board, u32>, state: &Board, f: u32) -> bool {
    seen.get(state).is_some_and(|&accepted_f| accepted_f <= f)
}

/// Returns the size of the seen map when the goal is popped.
fn a_star(scope: &mut SearchScope, heuristic: Heuristic) -> Result<usize> {
    // entries are (f, (state, g))
    let mut frontier: BestFirst<(Board, u32)> = BestFirst::new();
    frontier.push((heuristic.estimate(&scope.origin), (scope.origin, 0)));
    let mut seen: FxHashMap<Board, u32> = FxHashMap::default();

    while let Some((f, (state, g))) = frontier.pop() {
        if state.is_goal() {
            return Ok(seen.len());
        }

        if is_stale(&seen, &state, f) {
            continue;
        }
        seen.insert(state, f);
        scope.check_budget(seen.len())?;

        for (mv, child) in state.successors() {
            scope.record_first_discovery(child, state, mv);
            let child_g = g + 1;
            frontier.push((heuristic.estimate(&child) + child_g, (child, child_g)));
        }
    }

    debug!(
        event = "frontier_exhausted",
        strategy = "A*",
        heuristic = %heuristic,
        nodes = seen.len()
    );
    Err(PuzzleError::NoSolutionFound { nodes: seen.len() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEFAULT_DEPTH_LIMIT, DEFAULT_MAX_NODES};
    use crate::scramble::scramble;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashMap;

    const ALL_STRATEGIES: [Strategy; 4] = [
        Strategy::BreadthFirst,
        Strategy::DepthFirst,
        Strategy::AStar(Heuristic::MisplacedTiles),
        Strategy::AStar(Heuristic::Manhattan),
    ];

    /// A board far enough from the goal that no strategy reaches it within a tiny budget.
    const HARDEST: [u8; 9] = [8, 6, 7, 2, 5, 4, 3, 0, 1];

    fn board(cells: [u8; 9]) -> Board {
        Board::new(cells).unwrap()
    }

    /// Goal with the blank swapped with its right neighbour.
    fn one_move_origin() -> Board {
        board([1, 0, 2, 3, 4, 5, 6, 7, 8])
    }

    /// Plain breadth-first distance to the goal with no budget.
    fn shortest_distance(origin: Board) -> usize {
        let mut distances: HashMap<Board, usize> = HashMap::from([(origin, 0)]);
        let mut queue = VecDeque::from([origin]);
        while let Some(state) = queue.pop_front() {
            let distance = distances[&state];
            if state.is_goal() {
                return distance;
            }
            for (_, child) in state.successors() {
                if !distances.contains_key(&child) {
                    distances.insert(child, distance + 1);
                    queue.push_back(child);
                }
            }
        }
        panic!("{origin} cannot reach the goal");
    }

    #[test]
    fn test_goal_origin_needs_no_moves() {
        let mut engine = Engine::new();
        for strategy in ALL_STRATEGIES {
            let solution = engine.solve(&Board::GOAL, strategy).unwrap();
            assert!(solution.moves.is_empty(), "{strategy} moved away from the goal");
        }
    }

    #[test]
    fn test_one_move_scenario_bfs_and_astar() {
        let origin = one_move_origin();
        let mut engine = Engine::new();

        for strategy in [
            Strategy::BreadthFirst,
            Strategy::AStar(Heuristic::MisplacedTiles),
            Strategy::AStar(Heuristic::Manhattan),
        ] {
            let solution = engine.solve(&origin, strategy).unwrap();
            assert_eq!(solution.moves, vec![Move::Left], "{strategy}");
            assert_eq!(solution.nodes, 1, "{strategy} should accept only the origin");
            assert_eq!(engine.last_node_count(), 1);
            assert_eq!(origin.replay(&solution.moves), Ok(Board::GOAL));
        }
    }

    #[test]
    fn test_one_move_scenario_dfs() {
        let origin = one_move_origin();
        let mut engine = Engine::new();
        engine.set_depth_limit(2).unwrap();

        // down and right children are explored (and cut at the limit) before
        // the left child, which is the goal
        let solution = engine.solve(&origin, Strategy::DepthFirst).unwrap();
        assert_eq!(solution.moves, vec![Move::Left]);
        assert_eq!(solution.nodes, 4);
        assert_eq!(engine.last_node_count(), 4);
    }

    #[test]
    fn test_one_move_scenario_dfs_default_limit_terminates() {
        let origin = one_move_origin();
        let mut engine = Engine::new();
        match engine.solve(&origin, Strategy::DepthFirst) {
            Ok(solution) => {
                assert_eq!(origin.replay(&solution.moves), Ok(Board::GOAL));
                assert!(solution.moves.len() < DEFAULT_DEPTH_LIMIT);
                assert!(solution.nodes <= DEFAULT_MAX_NODES);
            }
            Err(err) => assert_eq!(
                err,
                PuzzleError::NodeBudgetExceeded {
                    limit: DEFAULT_MAX_NODES,
                    nodes: DEFAULT_MAX_NODES + 1,
                }
            ),
        }
    }

    #[test]
    fn test_bfs_finds_shortest_paths() {
        let mut rng = StdRng::seed_from_u64(2024);
        let mut engine = Engine::new();

        for _ in 0..8 {
            let origin = scramble(14, &mut rng);
            let expected = shortest_distance(origin);

            engine.set_max_nodes(200_000).unwrap();
            let solution = engine.solve(&origin, Strategy::BreadthFirst).unwrap();
            assert_eq!(
                solution.moves.len(),
                expected,
                "BFS path from {origin} is not the shortest"
            );
            assert_eq!(origin.replay(&solution.moves), Ok(Board::GOAL));
        }
    }

    #[test]
    fn test_every_strategy_replays_to_goal() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut engine = Engine::new();

        for _ in 0..5 {
            let origin = scramble(10, &mut rng);
            for strategy in ALL_STRATEGIES {
                engine.configure(200_000, 12).unwrap();
                let solution = engine.solve(&origin, strategy).unwrap();
                assert_eq!(
                    origin.replay(&solution.moves),
                    Ok(Board::GOAL),
                    "{strategy} from {origin} does not replay to the goal"
                );
            }
        }
    }

    #[test]
    fn test_dfs_respects_depth_limit() {
        let origin = board([1, 2, 0, 3, 4, 5, 6, 7, 8]);
        let mut engine = Engine::new();

        // the goal sits at depth 2, which a limit of 2 never accepts
        engine.set_depth_limit(2).unwrap();
        let result = engine.solve(&origin, Strategy::DepthFirst);
        assert!(matches!(result, Err(PuzzleError::NoSolutionFound { .. })));

        engine.set_depth_limit(3).unwrap();
        let solution = engine.solve(&origin, Strategy::DepthFirst).unwrap();
        assert_eq!(solution.moves, vec![Move::Left, Move::Left]);
    }

    #[test]
    fn test_dfs_paths_stay_below_limit() {
        let mut rng = StdRng::seed_from_u64(99);
        let mut engine = Engine::new();
        for _ in 0..5 {
            let origin = scramble(8, &mut rng);
            engine.configure(200_000, 9).unwrap();
            let solution = engine.solve(&origin, Strategy::DepthFirst).unwrap();
            assert!(solution.moves.len() < 9, "DFS accepted a state past the limit");
        }
    }

    #[test]
    fn test_budget_exceeded_resets_to_default() {
        let origin = board(HARDEST);
        let mut engine = Engine::new();

        for strategy in ALL_STRATEGIES {
            engine.set_max_nodes(10).unwrap();
            let result = engine.solve(&origin, strategy);
            assert_eq!(
                result,
                Err(PuzzleError::NodeBudgetExceeded {
                    limit: 10,
                    nodes: 11
                }),
                "{strategy}"
            );
            assert_eq!(engine.last_node_count(), 11);
            assert_eq!(engine.config(), SearchConfig::default());
        }
    }

    #[test]
    fn test_settings_reset_after_success() {
        let mut engine = Engine::new();
        engine.configure(5000, 4).unwrap();
        engine
            .solve(&one_move_origin(), Strategy::BreadthFirst)
            .unwrap();
        assert_eq!(engine.config().max_nodes, DEFAULT_MAX_NODES);
        assert_eq!(engine.config().depth_limit, DEFAULT_DEPTH_LIMIT);
    }

    #[test]
    fn test_configure_rejects_zero_and_keeps_prior_settings() {
        let mut engine = Engine::new();
        engine.configure(50, 5).unwrap();

        assert!(engine.configure(0, 3).is_err());
        assert!(engine.set_depth_limit(0).is_err());
        assert_eq!(engine.config(), SearchConfig::new(50, 5).unwrap());
    }

    #[test]
    fn test_unsolvable_board_exhausts_frontier() {
        let origin = board([0, 2, 1, 3, 4, 5, 6, 7, 8]);
        let mut engine = Engine::new();
        engine.set_depth_limit(4).unwrap();

        let result = engine.solve(&origin, Strategy::DepthFirst);
        let Err(PuzzleError::NoSolutionFound { nodes }) = result else {
            panic!("expected NoSolutionFound, got {result:?}");
        };
        assert!(nodes > 1);
        assert_eq!(engine.last_node_count(), nodes);
        assert_eq!(engine.config(), SearchConfig::default());

        // the engine is still usable afterwards
        let solution = engine.solve(&one_move_origin(), Strategy::BreadthFirst);
        assert!(solution.is_ok());
    }

    #[test]
    fn test_astar_staleness_compares_f_values() {
        let origin = board([3, 1, 2, 4, 0, 5, 6, 7, 8]);
        let short_path = [Move::Right, Move::Down];
        let long_path = [Move::Right, Move::Left, Move::Right, Move::Down];

        let target = origin.replay(&short_path).unwrap();
        assert_eq!(origin.replay(&long_path).unwrap(), target);

        let h = Heuristic::Manhattan.estimate(&target);
        let f_short = h + short_path.len() as u32;
        let f_long = h + long_path.len() as u32;

        // accepted first through the long path: the cheaper entry reopens it
        let mut seen = FxHashMap::default();
        seen.insert(target, f_long);
        assert!(!is_stale(&seen, &target, f_short));
        assert!(is_stale(&seen, &target, f_long), "equal f is stale");

        // accepted through the short path: the long entry is discarded
        seen.insert(target, f_short);
        assert!(is_stale(&seen, &target, f_long));

        // an unseen state is never stale
        assert!(!is_stale(&seen, &origin, 0));
    }

    #[test]
    fn test_first_discovery_keeps_earliest_link_and_skips_origin() {
        let origin = one_move_origin();
        let mut scope = SearchScope::new(origin, 10);

        scope.record_first_discovery(Board::GOAL, origin, Move::Left);
        scope.record_first_discovery(Board::GOAL, board([3, 1, 2, 0, 4, 5, 6, 7, 8]), Move::Up);
        assert_eq!(scope.parents[&Board::GOAL], (origin, Move::Left));

        scope.record_first_discovery(origin, Board::GOAL, Move::Right);
        assert!(!scope.parents.contains_key(&origin));
    }

    #[test]
    fn test_latest_acceptance_overwrites_link() {
        let origin = one_move_origin();
        let other = board([3, 1, 2, 0, 4, 5, 6, 7, 8]);
        let mut scope = SearchScope::new(origin, 10);

        scope.record_latest(Board::GOAL, origin, Move::Left);
        scope.record_latest(Board::GOAL, other, Move::Up);
        assert_eq!(scope.parents[&Board::GOAL], (other, Move::Up));
    }

    #[test]
    fn test_reconstruct_follows_links_to_origin() {
        let origin = board([1, 2, 0, 3, 4, 5, 6, 7, 8]);
        let middle = one_move_origin();
        let mut parents = ParentMap::default();
        parents.insert(middle, (origin, Move::Left));
        parents.insert(Board::GOAL, (middle, Move::Left));

        let moves = reconstruct_path(&parents, origin, Board::GOAL).unwrap();
        assert_eq!(moves, vec![Move::Left, Move::Left]);
    }

    #[test]
    fn test_reconstruct_reports_missing_link() {
        let parents = ParentMap::default();
        let result = reconstruct_path(&parents, one_move_origin(), Board::GOAL);
        assert_eq!(result, Err(PuzzleError::BrokenPath(Board::GOAL)));
    }

    #[test]
    fn test_strategy_display() {
        assert_eq!(Strategy::BreadthFirst.to_string(), "BFS");
        assert_eq!(Strategy::DepthFirst.to_string(), "DFS");
        assert_eq!(Strategy::AStar(Heuristic::Manhattan).to_string(), "A* h2");
    }
}
