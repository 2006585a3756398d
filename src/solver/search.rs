//! Depth-bounded search for one iterative-deepening pass.

use super::PassStats;
use super::table::TranspositionTable;
use crate::board::Board;
use crate::engine::{Goal, Path, SearchState, moves, play};
use crate::piece::Color;
use crate::puzzle::Puzzle;

/// Reusable search context. One instance serves every pass of a solve.
#[derive(Debug)]
pub(super) struct Search<'a> {
    board: &'a Board,
    goal: Goal,
    colors: Vec<Color>,
    state: SearchState,
    path: Path,
    table: TranspositionTable,
    stats: PassStats,
}

impl<'a> Search<'a> {
    pub(super) fn new(puzzle: &'a Puzzle) -> Self {
        Self {
            board: puzzle.board(),
            goal: puzzle.goal(),
            colors: puzzle.robots().colors().collect(),
            state: puzzle.initial_state(),
            path: Path::new(),
            table: TranspositionTable::default(),
            stats: PassStats::default(),
        }
    }

    /// Search every line of at most `max_depth` moves. On success the path
    /// holds the first solution found in enumeration order.
    pub(super) fn run(&mut self, max_depth: u8) -> bool {
        self.table.clear();
        self.path = Path::new();
        self.stats = PassStats {
            depth: max_depth,
            ..PassStats::default()
        };
        let found = self.visit(0, max_depth);
        self.stats.solved = found;
        self.stats.entries = u64::try_from(self.table.len()).unwrap_or(u64::MAX);
        found
    }

    pub(super) fn stats(&self) -> PassStats {
        self.stats
    }

    pub(super) fn into_path(self) -> Path {
        self.path
    }

    fn visit(&mut self, depth: u8, max_depth: u8) -> bool {
        self.stats.nodes += 1;
        if self.state.is_solved(self.goal) {
            return true;
        }
        if depth == max_depth {
            return false;
        }
        let remaining = max_depth - depth;
        if !self.table.insert(remaining, self.state.robots()) {
            self.stats.hits += 1;
            return false;
        }
        self.stats.inner += 1;

        // Only the goal robot can finish on the last ply
        let goal_only = [self.goal.color];
        let colors: &[Color] = if remaining == 1 { &goal_only } else { &self.colors };
        let list = moves(self.board, &self.state, colors);

        for &mv in list.iter() {
            let undo = play(self.board, &mut self.state, mv);
            self.path.push(mv);
            let found = self.visit(depth + 1, max_depth);
            self.state.undo(undo);
            if found {
                return true;
            }
            self.path.pop();
        }
        false
    }
}
