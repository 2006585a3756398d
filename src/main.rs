//! Ricochet CLI - solve, generate and survey sliding-robot puzzles.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod cli;

use clap::{ArgAction, Parser, Subcommand};
use ricochet::Color;
use std::path::PathBuf;
use std::process::ExitCode;

/// Ricochet - a sliding-robot puzzle engine
#[derive(Parser, Debug)]
#[command(name = "ricochet")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Find a shortest solution
    Solve {
        /// Seed of the canonical deal (ignored with --layout)
        #[arg(short, long, default_value = "0")]
        seed: u64,

        /// Solve a layout file instead of a canonical deal
        #[arg(short, long)]
        layout: Option<PathBuf>,

        /// Goal robot for --layout: red, green, blue or yellow
        #[arg(short, long, default_value = "red")]
        color: Color,

        /// Deepest bound to try (default: 32)
        #[arg(short, long, default_value = "32")]
        max_depth: u8,

        /// Give up after this many seconds
        #[arg(short, long)]
        timeout: Option<u64>,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,
    },

    /// Search for hard puzzles by simulated annealing
    Generate {
        /// Generator config as JSON (missing fields use defaults)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Starting layout file
        #[arg(short, long)]
        layout: Option<PathBuf>,

        /// Save the best layout to this file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Independent runs, seeds increasing from --seed
        #[arg(short, long, default_value = "1")]
        runs: usize,

        /// Random seed
        #[arg(short, long)]
        seed: Option<u64>,

        /// Annealing steps
        #[arg(long)]
        steps: Option<usize>,

        /// Board width for an empty start
        #[arg(long)]
        width: Option<usize>,

        /// Board height for an empty start
        #[arg(long)]
        height: Option<usize>,

        /// Solver bound used to score candidates
        #[arg(short, long)]
        max_depth: Option<u8>,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,

        /// Show a spinner while running
        #[arg(short, long)]
        progress: bool,
    },

    /// Solve many canonical deals in parallel
    Survey {
        /// Number of seeds (default: 100)
        #[arg(short = 'n', long, default_value = "100")]
        seeds: u64,

        /// First seed
        #[arg(short, long, default_value = "0")]
        start: u64,

        /// Deepest bound per seed (default: 20)
        #[arg(short, long, default_value = "20")]
        max_depth: u8,

        /// Parallel threads (default: CPU count)
        #[arg(short = 'j', long)]
        threads: Option<usize>,

        /// Output format: text, json, or csv
        #[arg(short, long, default_value = "text")]
        format: cli::SurveyFormat,

        /// Show progress bar
        #[arg(short, long)]
        progress: bool,
    },

    /// Print a canonical deal or a layout file
    Show {
        /// Seed of the canonical deal
        #[arg(short, long, default_value = "0")]
        seed: u64,

        /// Layout file to print instead
        #[arg(short, long)]
        layout: Option<PathBuf>,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    let result = match args.command {
        Commands::Solve {
            seed,
            layout,
            color,
            max_depth,
            timeout,
            format,
        } => cli::solve::execute(seed, layout.as_deref(), color, max_depth, timeout, format),

        Commands::Generate {
            config,
            layout,
            output,
            runs,
            seed,
            steps,
            width,
            height,
            max_depth,
            format,
            progress,
        } => {
            let overrides = cli::generate::Overrides {
                seed,
                steps,
                width,
                height,
                max_depth,
            };
            cli::generate::execute(
                config.as_deref(),
                layout.as_deref(),
                output.as_deref(),
                runs,
                &overrides,
                format,
                progress,
            )
        }

        Commands::Survey {
            seeds,
            start,
            max_depth,
            threads,
            format,
            progress,
        } => cli::survey::execute(seeds, start, max_depth, threads, format, progress),

        Commands::Show { seed, layout } => cli::show::execute(seed, layout.as_deref()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
