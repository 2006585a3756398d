//! Seed sweeps: deal and solve many canonical games in parallel.

use std::collections::BTreeMap;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::engine::Path;
use crate::error::SolveError;
use crate::piece::Token;
use crate::puzzle::Deal;
use crate::solver::{SolverConfig, solve};

/// Survey settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SurveyConfig {
    /// Solver used for every seed.
    pub solver: SolverConfig,
}

/// Outcome for one seed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SurveyEntry {
    /// Seed of the deal.
    pub seed: u64,
    /// Goal token of the deal.
    pub token: Token,
    /// Shortest solution length, `None` if not found within the bound.
    pub moves: Option<usize>,
    /// Shortest path, empty when none was found.
    pub path: Path,
    /// Nodes visited by the solver.
    pub nodes: u64,
}

/// All entries of a sweep, in seed order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct SurveyReport {
    /// One entry per seed.
    pub entries: Vec<SurveyEntry>,
}

impl SurveyReport {
    /// Seeds per solution length. Unsolved seeds are not counted.
    #[must_use]
    pub fn histogram(&self) -> BTreeMap<usize, usize> {
        let mut histogram = BTreeMap::new();
        for moves in self.entries.iter().filter_map(|e| e.moves) {
            *histogram.entry(moves).or_insert(0) += 1;
        }
        histogram
    }

    /// Entry with the longest solution; the lowest seed wins ties.
    #[must_use]
    pub fn best(&self) -> Option<&SurveyEntry> {
        self.entries
            .iter()
            .filter(|e| e.moves.is_some())
            .min_by_key(|e| (std::cmp::Reverse(e.moves), e.seed))
    }

    /// Seeds that found no solution within the bound.
    #[must_use]
    pub fn unsolved(&self) -> Vec<u64> {
        self.entries
            .iter()
            .filter(|e| e.moves.is_none())
            .map(|e| e.seed)
            .collect()
    }

    /// Nodes visited across all seeds.
    #[must_use]
    pub fn total_nodes(&self) -> u64 {
        self.entries.iter().map(|e| e.nodes).sum()
    }
}

/// Deal and solve one canonical game.
#[must_use]
pub fn survey_seed(seed: u64, config: &SurveyConfig) -> SurveyEntry {
    let deal = Deal::canonical(seed);
    let (moves, path, nodes) = match solve(&deal.puzzle, &config.solver, None) {
        Ok(solution) => {
            let nodes = solution.stats.nodes();
            (Some(solution.len()), solution.path, nodes)
        }
        Err(SolveError::Unsolvable { max_depth }) => {
            log::debug!("seed {seed}: no solution within {max_depth} moves");
            (None, Path::new(), 0)
        }
        Err(SolveError::Cancelled { .. }) => (None, Path::new(), 0),
    };
    SurveyEntry {
        seed,
        token: deal.token,
        moves,
        path,
        nodes,
    }
}

/// Solve every seed in parallel. Entries come back in input order.
///
/// `on_done` is called once per finished seed, from worker threads.
pub fn survey<F>(seeds: &[u64], config: &SurveyConfig, on_done: F) -> SurveyReport
where
    F: Fn(&SurveyEntry) + Sync,
{
    let entries = seeds
        .par_iter()
        .map(|&seed| {
            let entry = survey_seed(seed, config);
            on_done(&entry);
            entry
        })
        .collect();
    SurveyReport { entries }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(seed: u64, moves: Option<usize>) -> SurveyEntry {
        SurveyEntry {
            seed,
            token: Token::ALL[0],
            moves,
            path: Path::new(),
            nodes: 0,
        }
    }

    #[test]
    fn test_histogram_and_best() {
        let report = SurveyReport {
            entries: vec![
                entry(0, Some(3)),
                entry(1, Some(5)),
                entry(2, None),
                entry(3, Some(5)),
                entry(4, Some(3)),
            ],
        };
        let histogram = report.histogram();
        assert_eq!(histogram.get(&3), Some(&2));
        assert_eq!(histogram.get(&5), Some(&2));
        assert_eq!(histogram.len(), 2);
        assert_eq!(report.best().map(|e| e.seed), Some(1));
        assert_eq!(report.unsolved(), vec![2]);
    }

    #[test]
    fn test_empty_report() {
        let report = SurveyReport::default();
        assert!(report.best().is_none());
        assert!(report.histogram().is_empty());
    }

    #[test]
    fn test_survey_keeps_seed_order() {
        let config = SurveyConfig {
            solver: SolverConfig { max_depth: 3 },
        };
        let seeds = [7, 2, 5];
        let report = survey(&seeds, &config, |_| {});
        let order: Vec<u64> = report.entries.iter().map(|e| e.seed).collect();
        assert_eq!(order, seeds);
        for e in &report.entries {
            assert_eq!(e.token, Deal::canonical(e.seed).token);
            assert_eq!(e.moves.unwrap_or(0), e.path.len());
            assert!(e.moves.is_none_or(|m| m <= 3));
        }
    }

    #[test]
    fn test_survey_seed_matches_solver() {
        let config = SurveyConfig {
            solver: SolverConfig { max_depth: 4 },
        };
        let entry = survey_seed(11, &config);
        let deal = Deal::canonical(11);
        match solve(&deal.puzzle, &config.solver, None) {
            Ok(solution) => assert_eq!(entry.path, solution.path),
            Err(_) => assert!(entry.moves.is_none()),
        }
    }
}
