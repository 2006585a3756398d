//! Generate command implementation.

use super::output::{JsonGenerated, format_generated};
use super::{CliError, OutputFormat, load_layout};
use indicatif::{ProgressBar, ProgressStyle};
use ricochet::{GeneratorConfig, generate_many};
use std::fs;
use std::path::Path;
use std::time::{Duration, Instant};

/// Flags that override fields of the generator configuration.
#[derive(Debug, Default)]
pub(crate) struct Overrides {
    pub(crate) seed: Option<u64>,
    pub(crate) steps: Option<usize>,
    pub(crate) width: Option<usize>,
    pub(crate) height: Option<usize>,
    pub(crate) max_depth: Option<u8>,
}

impl Overrides {
    fn apply(&self, config: &mut GeneratorConfig) {
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(steps) = self.steps {
            config.steps = steps;
        }
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(max_depth) = self.max_depth {
            config.solver.max_depth = max_depth;
        }
    }
}

/// Execute the generate command.
///
/// # Errors
///
/// Returns an error if the config or layout cannot be read, every run
/// fails, or the output file cannot be written.
pub(crate) fn execute(
    config_path: Option<&Path>,
    start: Option<&Path>,
    output: Option<&Path>,
    runs: usize,
    overrides: &Overrides,
    format: OutputFormat,
    progress: bool,
) -> Result<(), CliError> {
    let mut config = match config_path {
        Some(path) => {
            let text = fs::read_to_string(path).map_err(|source| CliError::Read {
                path: path.to_path_buf(),
                source,
            })?;
            serde_json::from_str::<GeneratorConfig>(&text)?
        }
        None => GeneratorConfig::default(),
    };
    overrides.apply(&mut config);
    let initial = start.map(load_layout).transpose()?;

    let spinner = if progress {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed_precise}] annealing {msg}")
                .expect("valid template"),
        );
        pb.set_message(format!("{runs} run(s) x {} steps", config.steps));
        pb.enable_steady_tick(Duration::from_millis(100));
        Some(pb)
    } else {
        None
    };

    let begin = Instant::now();
    let results = generate_many(initial.as_ref(), &config, runs.max(1));
    if let Some(pb) = spinner {
        pb.finish_with_message("done");
    }
    let duration = begin.elapsed();

    let mut failures = Vec::new();
    let mut reports = Vec::new();
    for (i, result) in (0u64..).zip(&results) {
        let seed = config.seed.wrapping_add(i);
        match result {
            Ok(generated) => reports.push((seed, generated)),
            Err(e) => failures.push(format!("seed {seed}: {e}")),
        }
    }
    let best = reports.iter().copied().max_by_key(|(_, generated)| generated.moves);

    match format {
        OutputFormat::Text => {
            for (seed, generated) in &reports {
                println!("{}", format_generated(*seed, generated));
            }
            for failure in &failures {
                println!("Failed: {failure}");
            }
            println!("Duration: {:.2}s", duration.as_secs_f64());
        }
        OutputFormat::Json => {
            let runs: Vec<JsonGenerated> = reports
                .iter()
                .map(|(seed, generated)| JsonGenerated::new(*seed, generated))
                .collect();
            println!("{}", serde_json::to_string_pretty(&runs)?);
        }
    }

    let Some((seed, best)) = best else {
        return Err(CliError::AllRunsFailed(failures));
    };
    if let Some(path) = output {
        best.layout.save(path).map_err(|source| CliError::Save {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("saved seed {seed} ({} moves) to {}", best.moves, path.display());
    }
    Ok(())
}
