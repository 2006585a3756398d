//! Survey command implementation.

use super::output::{format_survey_csv, format_survey_text};
use super::{CliError, SurveyFormat};
use indicatif::{ProgressBar, ProgressStyle};
use ricochet::{SolverConfig, SurveyConfig, survey};
use std::time::Instant;

/// Execute the survey command.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub(crate) fn execute(
    seeds: u64,
    start_seed: u64,
    max_depth: u8,
    threads: Option<usize>,
    format: SurveyFormat,
    progress: bool,
) -> Result<(), CliError> {
    if let Some(num_threads) = threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .ok(); // Ignore error if already initialized
    }

    let config = SurveyConfig {
        solver: SolverConfig { max_depth },
    };
    let seed_list: Vec<u64> = (0..seeds).map(|i| start_seed.wrapping_add(i)).collect();

    let pb = if progress {
        let pb = ProgressBar::new(seeds);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} seeds ({per_sec})")
                .expect("valid template")
                .progress_chars("=>-"),
        );
        Some(pb)
    } else {
        None
    };

    let start = Instant::now();
    let report = survey(&seed_list, &config, |_| {
        if let Some(pb) = &pb {
            pb.inc(1);
        }
    });
    if let Some(pb) = pb {
        pb.finish_with_message("done");
    }
    let duration = start.elapsed();

    match format {
        SurveyFormat::Text => {
            print!("{}", format_survey_text(&report));
            println!("Duration: {:.2}s", duration.as_secs_f64());
        }
        SurveyFormat::Json => {
            let json = serde_json::to_string_pretty(&report)?;
            println!("{json}");
        }
        SurveyFormat::Csv => {
            print!("{}", format_survey_csv(&report));
        }
    }

    Ok(())
}
