//! Output formatting utilities for CLI.

use ricochet::solver::PassStats;
use ricochet::{Generated, Puzzle, Solution, SurveyReport};
use serde::Serialize;
use std::fmt::Write;

/// JSON-serializable solve result.
#[derive(Debug, Serialize)]
pub(super) struct JsonSolveResult {
    /// Goal robot.
    pub(super) color: String,
    /// Target cell.
    pub(super) target: u8,
    /// Moves in the shortest path.
    pub(super) moves: usize,
    /// Path in text form, e.g. `RN,GE`.
    pub(super) path: String,
    /// Per-pass counters.
    pub(super) passes: Vec<PassStats>,
}

impl JsonSolveResult {
    /// Create from a solved puzzle.
    pub(super) fn new(puzzle: &Puzzle, solution: &Solution) -> Self {
        let goal = puzzle.goal();
        Self {
            color: goal.color.to_string(),
            target: goal.target,
            moves: solution.len(),
            path: solution.path.to_string(),
            passes: solution.stats.passes.clone(),
        }
    }
}

/// Format a solve result as human-readable text.
pub(super) fn format_solution(puzzle: &Puzzle, solution: &Solution) -> String {
    let mut output = String::new();
    let goal = puzzle.goal();
    let _ = writeln!(output, "{puzzle}");
    let _ = writeln!(output, "Goal: {} robot to cell {}", goal.color, goal.target);
    if solution.is_empty() {
        output.push_str("Already solved\n");
        return output;
    }
    let _ = writeln!(output, "Solution ({} moves): {}", solution.len(), solution.path);
    for pass in &solution.stats.passes {
        let _ = writeln!(
            output,
            "  depth {:>2}: {:>10} nodes {:>10} inner {:>10} hits",
            pass.depth, pass.nodes, pass.inner, pass.hits
        );
    }
    output
}

/// JSON-serializable generator run.
#[derive(Debug, Serialize)]
pub(super) struct JsonGenerated {
    /// Seed of the run.
    pub(super) seed: u64,
    /// Best solution length found.
    pub(super) moves: u32,
    /// Steps that produced an accepted proposal.
    pub(super) accepted: usize,
    /// Proposals rejected by the validity gate.
    pub(super) rerolls: usize,
    /// Step of the best configuration.
    pub(super) best_step: usize,
    /// Starting solution length.
    pub(super) initial_moves: u32,
}

impl JsonGenerated {
    /// Create from a finished run.
    pub(super) fn new(seed: u64, generated: &Generated) -> Self {
        Self {
            seed,
            moves: generated.moves,
            accepted: generated.stats.accepted,
            rerolls: generated.stats.rerolls,
            best_step: generated.stats.best_step,
            initial_moves: generated.stats.initial_moves,
        }
    }
}

/// Format a generator run as human-readable text.
pub(super) fn format_generated(seed: u64, generated: &Generated) -> String {
    let mut output = String::new();
    let stats = &generated.stats;
    let _ = writeln!(output, "Run (seed: {seed})");
    let _ = writeln!(
        output,
        "  Moves: {} (started at {}, best at step {})",
        generated.moves, stats.initial_moves, stats.best_step
    );
    let _ = writeln!(
        output,
        "  Steps: {} ({} accepted, {} improved, {} rerolls, {} stalled)",
        stats.steps, stats.accepted, stats.improved, stats.rerolls, stats.stalled
    );
    output.push_str(&generated.layout.draw());
    output
}

/// Format a survey as human-readable text.
pub(super) fn format_survey_text(report: &SurveyReport) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "Survey Results ({} seeds)", report.entries.len());
    output.push_str("  Moves  Seeds\n");
    for (moves, count) in report.histogram() {
        let _ = writeln!(output, "  {moves:>5}  {count:>5}");
    }
    let unsolved = report.unsolved();
    if !unsolved.is_empty() {
        let _ = writeln!(output, "  Unsolved: {}", unsolved.len());
    }
    if let Some(best) = report.best() {
        let _ = writeln!(
            output,
            "\nLongest: seed {} ({} moves, token {}): {}",
            best.seed,
            best.moves.unwrap_or(0),
            best.token,
            best.path
        );
    }
    let _ = writeln!(output, "Nodes: {}", report.total_nodes());
    output
}

/// Format a survey as CSV, one row per seed.
pub(super) fn format_survey_csv(report: &SurveyReport) -> String {
    let mut output = String::from("seed,token,moves,nodes,path\n");
    for entry in &report.entries {
        let moves = entry.moves.map_or_else(String::new, |m| m.to_string());
        let _ = writeln!(
            output,
            "{},{},{},{},\"{}\"",
            entry.seed, entry.token, moves, entry.nodes, entry.path
        );
    }
    output
}
