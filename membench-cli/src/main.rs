// SPDX-License-Identifier: Apache-2.0
// Copyright 2026 Membench Contributors

//! Membench CLI
//!
//! Command-line interface for the membench memory throughput benchmark.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use membench_core::ReadStrategy;

mod commands;
mod report;

/// Membench - Measure sustained memory read/write throughput
#[derive(Parser)]
#[command(name = "membench")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI-facing read strategy selector.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum ReadStrategyArg {
    /// Touch every element; read time scales with buffer size
    #[default]
    Full,
    /// Strided legacy mode (~100k samples); not comparable with full
    Sampled,
}

impl From<ReadStrategyArg> for ReadStrategy {
    fn from(arg: ReadStrategyArg) -> Self {
        match arg {
            ReadStrategyArg::Full => ReadStrategy::Full,
            ReadStrategyArg::Sampled => ReadStrategy::Sampled,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the benchmark across a set of buffer sizes
    Run {
        /// Test sizes in MiB
        #[arg(long, num_args = 1.., default_values_t = vec![1024u64, 2048, 4096, 8192])]
        sizes: Vec<u64>,

        /// Number of runs to average for each test size
        #[arg(long, default_value_t = 1)]
        runs: u64,

        /// Read pass strategy
        #[arg(long, value_enum, default_value = "full")]
        read_strategy: ReadStrategyArg,

        /// Only write the CSV file, skip the text log
        #[arg(long)]
        csv_only: bool,

        /// Suppress colors and emoji (CI friendly)
        #[arg(short, long)]
        quiet: bool,

        /// Directory for the result files
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,
    },

    /// Compare two result files (candidate relative to baseline)
    Compare {
        /// Baseline result CSV (set A)
        baseline: PathBuf,

        /// Candidate result CSV (set B)
        candidate: PathBuf,

        /// Also write the comparison to a CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Render a time-vs-size chart from a result CSV
    Plot {
        /// Result CSV to plot
        #[arg(short, long, default_value = membench_core::storage::RESULTS_CSV_FILE)]
        input: PathBuf,

        /// Output SVG file
        #[arg(short, long, default_value = "memory_benchmark_performance.svg")]
        output: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt().with_env_filter(log_level).init();

    // Dispatch to command handlers
    match cli.command {
        Commands::Run {
            sizes,
            runs,
            read_strategy,
            csv_only,
            quiet,
            output_dir,
        } => commands::run::execute(
            &sizes,
            runs,
            read_strategy.into(),
            csv_only,
            quiet,
            &output_dir,
        ),
        Commands::Compare {
            baseline,
            candidate,
            output,
        } => commands::compare::execute(&baseline, &candidate, output.as_deref()),
        Commands::Plot { input, output } => commands::plot::execute(&input, &output),
    }
}
