//! Optimal solver: iterative deepening with a per-pass transposition table.
//!
//! Passes run with bounds 1, 2, 3, … and each pass is an exhaustive
//! depth-first search in a fixed move order (robot color, then N, E, S, W).
//! The first pass that reaches the goal yields a shortest path.
//!
//! Pruning:
//! - a robot never immediately reverses its own previous move
//! - a position already expanded with the same remaining depth is skipped
//! - on the last ply only the goal robot moves

mod observer;
mod search;
mod table;

pub use observer::{CancelFlag, LogObserver, ProgressObserver};

use serde::{Deserialize, Serialize};

use crate::engine::Path;
use crate::error::SolveError;
use crate::puzzle::Puzzle;
use search::Search;

/// Solver settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Deepest bound to try before giving up.
    pub max_depth: u8,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self { max_depth: 32 }
    }
}

/// Counters for one depth pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PassStats {
    /// Depth bound of the pass.
    pub depth: u8,
    /// Nodes visited.
    pub nodes: u64,
    /// Nodes whose moves were expanded.
    pub inner: u64,
    /// Nodes pruned by the transposition table.
    pub hits: u64,
    /// Transposition entries at the end of the pass.
    pub entries: u64,
    /// Whether the pass reached the goal.
    pub solved: bool,
}

/// Counters for a whole solve, one entry per completed pass.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SearchStats {
    /// Passes in order of increasing bound.
    pub passes: Vec<PassStats>,
}

impl SearchStats {
    /// Nodes visited across all passes.
    #[must_use]
    pub fn nodes(&self) -> u64 {
        self.passes.iter().map(|p| p.nodes).sum()
    }

    /// Expanded nodes across all passes.
    #[must_use]
    pub fn inner(&self) -> u64 {
        self.passes.iter().map(|p| p.inner).sum()
    }

    /// Transposition hits across all passes.
    #[must_use]
    pub fn hits(&self) -> u64 {
        self.passes.iter().map(|p| p.hits).sum()
    }

    /// Deepest bound searched.
    #[must_use]
    pub fn depth(&self) -> u8 {
        self.passes.last().map_or(0, |p| p.depth)
    }
}

/// A shortest path and how much work it took.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Solution {
    /// Moves in order. Empty when the puzzle starts solved.
    pub path: Path,
    /// Per-pass counters.
    pub stats: SearchStats,
}

impl Solution {
    /// Number of moves.
    #[must_use]
    pub fn len(&self) -> usize {
        self.path.len()
    }

    /// Whether the puzzle was already solved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }
}

/// Find a shortest path moving the goal robot onto the target.
///
/// `observer`, when given, sees the counters of every completed pass and
/// may stop the search between passes.
///
/// # Errors
///
/// Returns [`SolveError::Unsolvable`] when no path of at most
/// `config.max_depth` moves exists, and [`SolveError::Cancelled`] when the
/// observer breaks after an unsuccessful pass.
pub fn solve(
    puzzle: &Puzzle,
    config: &SolverConfig,
    mut observer: Option<&mut dyn ProgressObserver>,
) -> Result<Solution, SolveError> {
    if puzzle.is_solved() {
        return Ok(Solution {
            path: Path::new(),
            stats: SearchStats::default(),
        });
    }

    if !target_reachable(puzzle) {
        log::debug!("target {} is walled off from the goal robot", puzzle.goal().target);
        return Err(SolveError::Unsolvable {
            max_depth: config.max_depth,
        });
    }

    let mut search = Search::new(puzzle);
    let mut stats = SearchStats::default();
    for max_depth in 1..=config.max_depth {
        let found = search.run(max_depth);
        let pass = search.stats();
        stats.passes.push(pass);

        let flow = observer
            .as_deref_mut()
            .map(|obs| obs.on_pass(&pass));
        if found {
            let path = search.into_path();
            log::debug!("solved in {} moves ({} nodes)", path.len(), stats.nodes());
            return Ok(Solution { path, stats });
        }
        if flow.is_some_and(|f| f.is_break()) {
            return Err(SolveError::Cancelled { depth: max_depth });
        }
    }
    Err(SolveError::Unsolvable {
        max_depth: config.max_depth,
    })
}

/// Whether the target lies in the goal robot's walled region. Robots only
/// add stops, so a target outside that region can never be reached.
fn target_reachable(puzzle: &Puzzle) -> bool {
    let goal = puzzle.goal();
    puzzle.robots().get(goal.color).is_some_and(|start| {
        puzzle
            .board()
            .region(start)
            .get(usize::from(goal.target))
            .is_some_and(|&reached| reached)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ops::ControlFlow;

    use crate::board::{Board, Direction};
    use crate::engine::{Goal, RobotSet};
    use crate::piece::Color;

    fn open_puzzle(red: u8, target: u8) -> Puzzle {
        let board = Board::new(4, 4).unwrap();
        let robots = RobotSet::new([Some(red), None, None, None]);
        Puzzle::new(board, robots, Goal::new(Color::Red, target)).unwrap()
    }

    #[test]
    fn test_open_board_corner() {
        let puzzle = open_puzzle(0, 15);
        let solution = solve(&puzzle, &SolverConfig::default(), None).unwrap();
        assert_eq!(solution.path.to_string(), "RE,RS");
        assert_eq!(solution.stats.depth(), 2);
    }

    #[test]
    fn test_already_solved() {
        let puzzle = open_puzzle(5, 5);
        let solution = solve(&puzzle, &SolverConfig::default(), None).unwrap();
        assert!(solution.is_empty());
        assert!(solution.stats.passes.is_empty());
    }

    #[test]
    fn test_sealed_target_unsolvable() {
        let mut board = Board::new(4, 4).unwrap();
        board.seal(10);
        let robots = RobotSet::new([Some(0), None, None, None]);
        let puzzle = Puzzle::new(board, robots, Goal::new(Color::Red, 10)).unwrap();
        let config = SolverConfig { max_depth: 6 };
        assert_eq!(
            solve(&puzzle, &config, None),
            Err(SolveError::Unsolvable { max_depth: 6 })
        );
    }

    #[test]
    fn test_observer_sees_every_pass() {
        let puzzle = open_puzzle(0, 15);
        let mut depths = Vec::new();
        let mut observer = |pass: &PassStats| {
            depths.push((pass.depth, pass.solved));
            ControlFlow::Continue(())
        };
        solve(&puzzle, &SolverConfig::default(), Some(&mut observer)).unwrap();
        assert_eq!(depths, vec![(1, false), (2, true)]);
    }

    #[test]
    fn test_observer_cancels() {
        let puzzle = open_puzzle(0, 15);
        let mut observer = |_: &PassStats| ControlFlow::Break(());
        let solution = solve(&puzzle, &SolverConfig::default(), Some(&mut observer));
        assert_eq!(solution, Err(SolveError::Cancelled { depth: 1 }));

        let puzzle = open_puzzle(0, 3);
        let solution = solve(&puzzle, &SolverConfig::default(), Some(&mut observer)).unwrap();
        assert_eq!(solution.path.to_string(), "RE");
    }

    #[test]
    fn test_cancel_flag() {
        let flag = CancelFlag::new();
        let mut observer = flag.clone();
        flag.cancel();
        let puzzle = open_puzzle(0, 15);
        assert_eq!(
            solve(&puzzle, &SolverConfig::default(), Some(&mut observer)),
            Err(SolveError::Cancelled { depth: 1 })
        );
    }

    #[test]
    fn test_sealed_target_skips_search() {
        let mut board = Board::new(6, 6).unwrap();
        board.seal(20);
        let robots = RobotSet::new([Some(0), None, None, None]);
        let puzzle = Puzzle::new(board, robots, Goal::new(Color::Red, 20)).unwrap();
        let mut passes = 0;
        let mut observer = |_: &PassStats| {
            passes += 1;
            ControlFlow::Continue(())
        };
        assert_eq!(
            solve(&puzzle, &SolverConfig::default(), Some(&mut observer)),
            Err(SolveError::Unsolvable { max_depth: 32 })
        );
        assert_eq!(passes, 0);
    }

    #[test]
    fn test_blocker_robot_needed() {
        // Red must stop at column 1 on row 0; Green parks at column 2 first.
        let board = Board::new(4, 4).unwrap();
        let robots = RobotSet::new([Some(0), Some(14), None, None]);
        let puzzle = Puzzle::new(board, robots, Goal::new(Color::Red, 1)).unwrap();
        let solution = solve(&puzzle, &SolverConfig::default(), None).unwrap();
        assert_eq!(solution.path.to_string(), "GN,RE");
        let mut state = puzzle.initial_state();
        solution.path.replay(puzzle.board(), &mut state).unwrap();
        assert!(state.is_solved(puzzle.goal()));
    }

    #[test]
    fn test_counters_populated() {
        let mut board = Board::new(5, 5).unwrap();
        board.set_wall(12, Direction::South, true);
        let robots = RobotSet::new([Some(0), Some(4), Some(20), None]);
        let puzzle = Puzzle::new(board, robots, Goal::new(Color::Red, 12)).unwrap();
        let solution = solve(&puzzle, &SolverConfig::default(), Some(&mut LogObserver)).unwrap();
        assert!(solution.stats.nodes() >= solution.stats.inner());
        assert!(solution.stats.passes.iter().all(|p| p.nodes > 0));
    }
}
