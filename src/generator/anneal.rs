//! Cooling schedule and acceptance rule.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Geometric cooling from `start` down to `floor` over `steps` steps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Schedule {
    start: f64,
    /// Natural log of `start / floor`.
    span: f64,
    steps: usize,
}

impl Schedule {
    /// Build a schedule. `floor` is clamped to a small positive value and
    /// never exceeds `start`.
    #[must_use]
    pub fn new(start: f64, floor: f64, steps: usize) -> Self {
        let start = start.max(f64::MIN_POSITIVE);
        let floor = floor.clamp(f64::MIN_POSITIVE, start);
        Self {
            start,
            span: (start / floor).ln(),
            steps,
        }
    }

    /// Temperature at `step`: `start · exp(−ln(start/floor) · step/steps)`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn temperature(&self, step: usize) -> f64 {
        if self.steps == 0 {
            return self.start;
        }
        let progress = step as f64 / self.steps as f64;
        self.start * (-self.span * progress).exp()
    }
}

/// Metropolis rule: always take an improvement or a sideways move, take a
/// worsening of `delta` with probability `exp(−delta / temperature)`.
pub fn accept<R: Rng>(delta: f64, temperature: f64, rng: &mut R) -> bool {
    if delta <= 0.0 {
        return true;
    }
    (-delta / temperature).exp() > rng.gen_range(0.0..1.0)
}

/// Counters for one annealing run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AnnealStats {
    /// Steps run.
    pub steps: usize,
    /// Proposals accepted.
    pub accepted: usize,
    /// Times a new best configuration was found.
    pub improved: usize,
    /// Proposals thrown away by the validity gate and rolled again.
    pub rerolls: usize,
    /// Steps where no valid proposal was found within the reroll limit.
    pub stalled: usize,
    /// Step that produced the best configuration.
    pub best_step: usize,
    /// Solution length of the starting configuration.
    pub initial_moves: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn test_schedule_endpoints() {
        let schedule = Schedule::new(20.0, 0.001, 1000);
        assert!((schedule.temperature(0) - 20.0).abs() < 1e-9);
        assert!((schedule.temperature(1000) - 0.001).abs() < 1e-9);
        assert!(schedule.temperature(500) < schedule.temperature(499));
    }

    #[test]
    fn test_schedule_zero_steps() {
        let schedule = Schedule::new(5.0, 1.0, 0);
        assert!((schedule.temperature(3) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_accept_improvement_always() {
        let mut rng = SmallRng::seed_from_u64(1);
        for _ in 0..100 {
            assert!(accept(-1.0, 0.001, &mut rng));
            assert!(accept(0.0, 0.001, &mut rng));
        }
    }

    #[test]
    fn test_accept_worsening_cold_rarely() {
        let mut rng = SmallRng::seed_from_u64(2);
        let taken = (0..1000).filter(|_| accept(5.0, 0.01, &mut rng)).count();
        assert_eq!(taken, 0);
        let hot = (0..1000).filter(|_| accept(1.0, 1000.0, &mut rng)).count();
        assert!(hot > 900);
    }
}
