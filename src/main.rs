//! txdb-stats CLI
//!
//! Computes descriptive statistics over a transactional database:
//! size, transaction-length statistics, item frequencies and sparsity.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use txdb_stats::commands::{
    display_version, execute_stats, parse_separator, validate_args, StatsArgs,
};

/// txdb-stats - Descriptive statistics for transactional databases
#[derive(Parser, Debug)]
#[command(name = "txdb-stats")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Load a database and report its statistics
    Stats {
        /// Local path or http(s) URL of the database
        source: String,

        /// Field separator (escapes like \t, or tab/space/comma)
        #[arg(env = "TXDB_SEPARATOR", default_value = "\\t")]
        separator: String,

        /// Read SOURCE as a JSON table with tid/Transactions columns
        #[arg(long)]
        table: bool,

        /// First field of each line is an integer timestamp
        #[arg(long)]
        temporal: bool,

        /// Do not print the text summary
        #[arg(long)]
        no_summary: bool,

        /// Write item frequencies to this file
        #[arg(long)]
        item_frequencies: Option<PathBuf>,

        /// Write the transaction-length distribution to this file
        #[arg(long)]
        length_distribution: Option<PathBuf>,

        /// Write frequency ranges to this file
        #[arg(long)]
        frequency_ranges: Option<PathBuf>,

        /// Write transactions per timestamp to this file (needs --temporal)
        #[arg(long)]
        timestamp_counts: Option<PathBuf>,

        /// Directory for SVG graphs of the distributions
        #[arg(long)]
        plot_dir: Option<PathBuf>,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Stats {
            source,
            separator,
            table,
            temporal,
            no_summary,
            item_frequencies,
            length_distribution,
            frequency_ranges,
            timestamp_counts,
            plot_dir,
        } => {
            let args = StatsArgs {
                source,
                separator: parse_separator(&separator),
                table,
                temporal,
                print_summary: !no_summary,
                item_frequencies,
                length_distribution,
                frequency_ranges,
                timestamp_counts,
                plot_dir,
            };

            // Validate args first
            validate_args(&args)?;

            execute_stats(args)?;
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
