//! Puzzle generator: simulated annealing over layouts, using the solver's
//! shortest solution length as the (negated) energy.
//!
//! Every candidate passes a validity gate before it is scored: a valid
//! board, all four robots and targets placed on distinct floor cells, and a
//! goal that is solvable within the solver bound. Candidates that fail are
//! rolled again.

mod anneal;
mod proposal;

pub use anneal::{AnnealStats, Schedule, accept};
pub use proposal::{Proposal, propose, random_free_cell};

use rand::SeedableRng;
use rand::rngs::SmallRng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::board::Symmetry;
use crate::error::GenerateError;
use crate::layout::Layout;
use crate::piece::Color;
use crate::solver::{SolverConfig, solve};

/// Generator settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Board width when no starting layout is given.
    pub width: usize,
    /// Board height when no starting layout is given.
    pub height: usize,
    /// Annealing steps.
    pub steps: usize,
    /// Temperature at step 0.
    pub temperature_start: f64,
    /// Temperature at the last step.
    pub temperature_floor: f64,
    /// Most interior walls a proposal may leave on the board.
    pub wall_budget: usize,
    /// Mirrors applied to every wall toggle.
    pub symmetry: Symmetry,
    /// Robot whose solution length is maximized.
    pub goal: Color,
    /// Solver used to score candidates.
    pub solver: SolverConfig,
    /// Attempts to find a valid proposal before skipping a step.
    pub max_rerolls: usize,
    /// RNG seed.
    pub seed: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            width: 6,
            height: 6,
            steps: 1000,
            temperature_start: 20.0,
            temperature_floor: 0.001,
            wall_budget: 800,
            symmetry: Symmetry {
                mirror_x: true,
                mirror_y: true,
                mirror_xy: false,
            },
            goal: Color::Red,
            solver: SolverConfig { max_depth: 20 },
            max_rerolls: 1000,
            seed: 42,
        }
    }
}

/// Best layout found by a run.
#[derive(Debug, Clone, PartialEq)]
pub struct Generated {
    /// Best layout, with its solution length recorded.
    pub layout: Layout,
    /// Shortest solution length of `layout` for the goal robot.
    pub moves: u32,
    /// Run counters.
    pub stats: AnnealStats,
}

/// Run one annealing search.
///
/// Starts from `initial` (or an empty board of the configured size); any
/// missing robots or targets are placed at random first.
///
/// # Errors
///
/// Returns [`GenerateError::InvalidBoard`] if the configured size or the
/// starting board is invalid, and [`GenerateError::NoValidStart`] if no
/// solvable placement is found within `max_rerolls` attempts.
pub fn generate(
    initial: Option<Layout>,
    config: &GeneratorConfig,
) -> Result<Generated, GenerateError> {
    let mut rng = SmallRng::seed_from_u64(config.seed);
    let layout = match initial {
        Some(layout) => layout,
        None => Layout::new(config.width, config.height)?,
    };
    layout.board().validate()?;

    let (mut current, mut current_energy) = seed_pieces(&layout, config, &mut rng)?;
    let mut stats = AnnealStats {
        initial_moves: moves_of(current_energy),
        ..AnnealStats::default()
    };
    let mut best = current.clone();
    let mut best_energy = current_energy;
    log::info!("generator start: {} moves", stats.initial_moves);

    let schedule = Schedule::new(config.temperature_start, config.temperature_floor, config.steps);
    for step in 0..config.steps {
        stats.steps += 1;
        let temperature = schedule.temperature(step);

        let mut candidate = None;
        for _ in 0..config.max_rerolls.max(1) {
            let mut next = current.clone();
            if propose(&mut next, &mut rng, config.symmetry, config.wall_budget).is_some() {
                if let Some(energy) = energy(&next, config) {
                    candidate = Some((next, energy));
                    break;
                }
            }
            stats.rerolls += 1;
        }
        let Some((next, energy)) = candidate else {
            stats.stalled += 1;
            continue;
        };

        let delta = f64::from(energy - current_energy);
        if accept(delta, temperature, &mut rng) {
            current = next;
            current_energy = energy;
            stats.accepted += 1;
            if current_energy < best_energy {
                best = current.clone();
                best_energy = current_energy;
                stats.improved += 1;
                stats.best_step = step;
                log::info!(
                    "step {step}: new best {} moves (T={temperature:.4})",
                    moves_of(best_energy)
                );
            }
        }
    }

    let moves = moves_of(best_energy);
    best.set_moves(Some(moves));
    log::debug!(
        "generator done: {moves} moves, {} accepted, {} rerolls",
        stats.accepted,
        stats.rerolls
    );
    Ok(Generated {
        layout: best,
        moves,
        stats,
    })
}

/// Run `runs` independent searches in parallel, seeds `config.seed`,
/// `config.seed + 1`, … Results come back in seed order.
#[must_use]
pub fn generate_many(
    initial: Option<&Layout>,
    config: &GeneratorConfig,
    runs: usize,
) -> Vec<Result<Generated, GenerateError>> {
    (0..runs)
        .into_par_iter()
        .map(|i| {
            let run_config = GeneratorConfig {
                seed: config.seed.wrapping_add(i as u64),
                ..*config
            };
            generate(initial.cloned(), &run_config)
        })
        .collect()
}

/// Place missing pieces until the layout passes the gate.
///
/// The first attempt only fills the gaps. Later attempts also scatter the
/// pieces that were given, since the given placement was not solvable.
fn seed_pieces(
    layout: &Layout,
    config: &GeneratorConfig,
    rng: &mut SmallRng,
) -> Result<(Layout, i32), GenerateError> {
    let attempts = config.max_rerolls.max(1);
    for attempt in 0..attempts {
        let mut candidate = layout.clone();
        for color in Color::ALL {
            if attempt > 0 || candidate.robots().get(color).is_none() {
                let cell = random_free_cell(&candidate, rng);
                candidate.place_robot(color, cell)?;
            }
            if attempt > 0 || candidate.target(color).is_none() {
                let cell = random_free_cell(&candidate, rng);
                candidate.place_target(color, cell)?;
            }
        }
        if let Some(energy) = energy(&candidate, config) {
            return Ok((candidate, energy));
        }
    }
    Err(GenerateError::NoValidStart { attempts })
}

/// Negated shortest solution length, or `None` if the layout fails the gate.
fn energy(layout: &Layout, config: &GeneratorConfig) -> Option<i32> {
    layout.validate_complete().ok()?;
    let puzzle = layout.puzzle(config.goal).ok()?;
    let solution = solve(&puzzle, &config.solver, None).ok()?;
    i32::try_from(solution.len()).ok().map(|len| -len)
}

fn moves_of(energy: i32) -> u32 {
    energy.unsigned_abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quick(seed: u64) -> GeneratorConfig {
        GeneratorConfig {
            width: 4,
            height: 4,
            steps: 40,
            solver: SolverConfig { max_depth: 10 },
            max_rerolls: 200,
            seed,
            ..GeneratorConfig::default()
        }
    }

    #[test]
    fn test_generated_layout_is_complete_and_scored() {
        let generated = generate(None, &quick(1)).unwrap();
        let layout = &generated.layout;
        assert!(layout.validate_complete().is_ok());
        assert_eq!(layout.moves(), Some(generated.moves));

        let puzzle = layout.puzzle(Color::Red).unwrap();
        let solution = solve(&puzzle, &SolverConfig { max_depth: 10 }, None).unwrap();
        assert_eq!(solution.len(), generated.moves as usize);
        assert!(generated.moves >= generated.stats.initial_moves);
    }

    #[test]
    fn test_generate_deterministic() {
        let a = generate(None, &quick(3)).unwrap();
        let b = generate(None, &quick(3)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_respects_wall_budget() {
        let config = GeneratorConfig {
            wall_budget: 4,
            ..quick(5)
        };
        let generated = generate(None, &config).unwrap();
        assert!(generated.layout.wall_count() <= 4);
    }

    #[test]
    fn test_keeps_given_pieces_when_solvable() {
        let mut layout = Layout::new(5, 5).unwrap();
        for (color, robot, target) in [
            (Color::Red, 0, 4),
            (Color::Green, 20, 6),
            (Color::Blue, 24, 8),
            (Color::Yellow, 12, 16),
        ] {
            layout.place_robot(color, Some(robot)).unwrap();
            layout.place_target(color, Some(target)).unwrap();
        }
        let config = GeneratorConfig { steps: 0, ..quick(8) };
        let generated = generate(Some(layout.clone()), &config).unwrap();
        assert_eq!(generated.layout.robots(), layout.robots());
        assert_eq!(generated.moves, 1);
        assert_eq!(generated.stats.steps, 0);
    }

    #[test]
    fn test_rejects_invalid_start() {
        let mut layout = Layout::new(4, 4).unwrap();
        for x in 0..4 {
            layout.toggle_wall(x, crate::board::Direction::South).unwrap();
        }
        assert!(matches!(
            generate(Some(layout), &quick(1)),
            Err(GenerateError::InvalidBoard(_))
        ));
    }

    #[test]
    fn test_generate_many_in_seed_order() {
        let config = GeneratorConfig { steps: 5, ..quick(10) };
        let results = generate_many(None, &config, 3);
        assert_eq!(results.len(), 3);
        let first = generate(None, &config).unwrap();
        assert_eq!(results[0].as_ref().unwrap(), &first);
    }
}
