//! Solve command implementation.

use super::output::{JsonSolveResult, format_solution};
use super::{CliError, OutputFormat, pick_puzzle};
use ricochet::solver::{CancelFlag, LogObserver, PassStats, ProgressObserver};
use ricochet::{Color, SolveError, SolverConfig, solve};
use std::ops::ControlFlow;
use std::path::Path;
use std::thread;
use std::time::{Duration, Instant};

/// Logs each pass and stops once the flag is raised.
#[derive(Debug)]
struct Watch {
    log: LogObserver,
    cancel: CancelFlag,
}

impl ProgressObserver for Watch {
    fn on_pass(&mut self, pass: &PassStats) -> ControlFlow<()> {
        self.log.on_pass(pass)?;
        self.cancel.on_pass(pass)
    }
}

/// Execute the solve command.
///
/// # Errors
///
/// Returns an error if the layout cannot be loaded or no solution is found.
pub(crate) fn execute(
    seed: u64,
    layout: Option<&Path>,
    color: Color,
    max_depth: u8,
    timeout: Option<u64>,
    format: OutputFormat,
) -> Result<(), CliError> {
    let puzzle = pick_puzzle(seed, layout, color)?;
    let config = SolverConfig { max_depth };

    let cancel = CancelFlag::new();
    if let Some(secs) = timeout {
        let flag = cancel.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_secs(secs));
            flag.cancel();
        });
    }
    let mut watch = Watch {
        log: LogObserver,
        cancel,
    };

    let start = Instant::now();
    let solution = solve(&puzzle, &config, Some(&mut watch)).map_err(|e| match e {
        SolveError::Cancelled { depth } => CliError::TimedOut { depth },
        SolveError::Unsolvable { .. } => CliError::from(e),
    })?;
    let duration = start.elapsed();

    match format {
        OutputFormat::Text => {
            print!("{}", format_solution(&puzzle, &solution));
            println!("Duration: {:.3}s", duration.as_secs_f64());
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&JsonSolveResult::new(&puzzle, &solution))?;
            println!("{json}");
        }
    }

    Ok(())
}
