//! CLI command implementations for ricochet.

pub(crate) mod generate;
pub(crate) mod show;
pub(crate) mod solve;
pub(crate) mod survey;

mod output;

use clap::ValueEnum;
use ricochet::{
    Color, Deal, GenerateError, InvalidConfiguration, Layout, LayoutError, Puzzle, SolveError,
};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Output format for `solve` and `generate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// Output format for the `survey` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum SurveyFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
    /// CSV format.
    Csv,
}

/// CLI error type.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// A layout file could not be loaded.
    #[error("failed to load {}: {source}", .path.display())]
    Load {
        /// File that was read.
        path: PathBuf,
        /// Underlying failure.
        #[source]
        source: LayoutError,
    },
    /// A layout file could not be written.
    #[error("failed to save {}: {source}", .path.display())]
    Save {
        /// File that was written.
        path: PathBuf,
        /// Underlying failure.
        #[source]
        source: LayoutError,
    },
    /// A config file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        /// File that was read.
        path: PathBuf,
        /// Underlying failure.
        #[source]
        source: io::Error,
    },
    /// The solve was stopped by `--timeout`.
    #[error("timed out after depth {depth}")]
    TimedOut {
        /// Last depth bound searched.
        depth: u8,
    },
    /// Every generator run failed; one message per run.
    #[error("every run failed: {}", .0.join("; "))]
    AllRunsFailed(Vec<String>),
    /// No solution within the depth bound.
    #[error(transparent)]
    Solve(#[from] SolveError),
    /// A generator run could not start.
    #[error(transparent)]
    Generate(#[from] GenerateError),
    /// A layout does not form a valid puzzle.
    #[error("invalid configuration: {0}")]
    Config(#[from] InvalidConfiguration),
    /// A config file or output could not be (de)serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Load a layout file, naming the file in the error.
fn load_layout(path: &Path) -> Result<Layout, CliError> {
    Layout::load(path).map_err(|source| CliError::Load {
        path: path.to_path_buf(),
        source,
    })
}

/// The puzzle named on the command line: a layout file with a goal color,
/// or the canonical deal for `seed`.
fn pick_puzzle(seed: u64, layout: Option<&Path>, color: Color) -> Result<Puzzle, CliError> {
    match layout {
        Some(path) => Ok(load_layout(path)?.puzzle(color)?),
        None => Ok(Deal::canonical(seed).puzzle),
    }
}
