//! Stats command implementation.
//!
//! The stats command:
//! 1. Resolves and loads the database
//! 2. Prints the summary
//! 3. Writes the requested reports
//! 4. Renders distribution graphs

use crate::aggregator::DatabaseStats;
use crate::ingest::{Source, Table};
use crate::output::{print_summary, render_distributions, write_report, SvgPlotter};
use crate::store::TransactionStore;
use crate::utils::config::DEFAULT_SEPARATOR;
use crate::utils::error::StatsError;
use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Arguments for the stats command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct StatsArgs {
    /// Local path, URL, or JSON table file
    pub source: String,

    /// Field separator for line sources
    pub separator: String,

    /// Treat `source` as a JSON table file
    pub table: bool,

    /// First field of each line is a timestamp
    pub temporal: bool,

    /// Print text summary to stdout
    pub print_summary: bool,

    /// Report: item frequencies
    pub item_frequencies: Option<PathBuf>,

    /// Report: transaction-length distribution
    pub length_distribution: Option<PathBuf>,

    /// Report: frequency ranges
    pub frequency_ranges: Option<PathBuf>,

    /// Report: transactions per timestamp (temporal only)
    pub timestamp_counts: Option<PathBuf>,

    /// Directory for SVG graphs (optional)
    pub plot_dir: Option<PathBuf>,
}

impl Default for StatsArgs {
    fn default() -> Self {
        Self {
            source: String::new(),
            separator: DEFAULT_SEPARATOR.to_string(),
            table: false,
            temporal: false,
            print_summary: true,
            item_frequencies: None,
            length_distribution: None,
            frequency_ranges: None,
            timestamp_counts: None,
            plot_dir: None,
        }
    }
}

/// Execute the stats command
///
/// **Public** - main entry point called from main.rs
///
/// Load failures abort the command. A report whose statistic cannot be
/// computed is skipped with a warning; the others are still written.
pub fn execute_stats(args: StatsArgs) -> Result<()> {
    let start_time = Instant::now();

    info!("Starting stats for: {}", args.source);

    // Step 1: Load database
    info!("Step 1/4: Loading database...");
    let store = load_store(&args)?;
    let stats = DatabaseStats::new(&store);

    // Step 2: Summary
    if args.print_summary {
        info!("Step 2/4: Printing summary...");
        print_summary(&stats).context("Failed to print summary")?;
    } else {
        info!("Step 2/4: Skipping summary (not requested)");
    }

    // Step 3: Reports
    info!("Step 3/4: Writing reports...");
    if let Some(path) = &args.item_frequencies {
        write_report(stats.item_frequencies(), path)
            .context("Failed to write item frequencies")?;
    }

    if let Some(path) = &args.length_distribution {
        write_report(stats.length_distribution(), path)
            .context("Failed to write length distribution")?;
    }

    if let Some(path) = &args.frequency_ranges {
        write_optional_report(stats.frequency_ranges(), path, "frequency ranges")?;
    }

    if let Some(path) = &args.timestamp_counts {
        write_optional_report(
            stats.transactions_per_timestamp(),
            path,
            "transactions per timestamp",
        )?;
    }

    // Step 4: Graphs
    if let Some(dir) = &args.plot_dir {
        info!("Step 4/4: Rendering graphs...");
        let mut plotter = SvgPlotter::new(dir);
        render_distributions(&stats, &mut plotter).context("Failed to render graphs")?;

        for path in plotter.written() {
            info!("✓ Graph written to: {}", path.display());
        }
    } else {
        info!("Step 4/4: Skipping graphs (not requested)");
    }

    let elapsed = start_time.elapsed();
    info!("Stats completed in {:.2}s", elapsed.as_secs_f64());

    Ok(())
}

/// Resolve the source and load it into a store
///
/// **Public** - reusable by callers that only need the store
pub fn load_store(args: &StatsArgs) -> Result<TransactionStore> {
    let source = if args.table {
        let table = Table::from_json_file(&args.source)
            .with_context(|| format!("Failed to read table {}", args.source))?;
        Source::Table(table)
    } else {
        let source = Source::resolve(&args.source, args.separator.as_str());
        if args.temporal {
            source.temporal()
        } else {
            source
        }
    };

    debug!("Resolved source: {:?}", source);

    source
        .load()
        .with_context(|| format!("Failed to load database from {}", source.describe()))
}

/// Validate stats arguments
///
/// **Public** - can be called before execute_stats for early validation
pub fn validate_args(args: &StatsArgs) -> Result<()> {
    if args.source.trim().is_empty() {
        anyhow::bail!("Source cannot be empty");
    }

    if !args.table && args.separator.is_empty() {
        anyhow::bail!("Separator cannot be empty");
    }

    if args.table && args.temporal {
        anyhow::bail!("--temporal applies to line sources, not tables");
    }

    if args.timestamp_counts.is_some() && !args.temporal {
        anyhow::bail!("--timestamp-counts requires --temporal");
    }

    Ok(())
}

/// Turn a command-line separator into the literal string
///
/// Accepts escapes (`\t`, `\n`, `\\`) and the names `tab`, `space`, `comma`.
pub fn parse_separator(raw: &str) -> String {
    match raw {
        "tab" => return "\t".to_string(),
        "space" => return " ".to_string(),
        "comma" => return ",".to_string(),
        _ => {}
    }

    let mut parsed = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            parsed.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => parsed.push('\t'),
            Some('n') => parsed.push('\n'),
            Some('\\') => parsed.push('\\'),
            Some(other) => {
                parsed.push('\\');
                parsed.push(other);
            }
            None => parsed.push('\\'),
        }
    }

    parsed
}

fn write_optional_report<K, V>(
    entries: Result<Vec<(K, V)>, StatsError>,
    path: &Path,
    name: &str,
) -> Result<()>
where
    K: std::fmt::Display,
    V: std::fmt::Display,
{
    match entries {
        Ok(entries) => {
            write_report(entries, path).with_context(|| format!("Failed to write {}", name))?;
        }
        Err(e) => warn!("Skipping {} report: {}", name, e),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(source: &str) -> StatsArgs {
        StatsArgs {
            source: source.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_validate_args_valid() {
        assert!(validate_args(&args("db.txt")).is_ok());
    }

    #[test]
    fn test_validate_args_empty_source() {
        assert!(validate_args(&args("  ")).is_err());
    }

    #[test]
    fn test_validate_args_empty_separator() {
        let args = StatsArgs {
            separator: String::new(),
            ..args("db.txt")
        };
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_temporal_table() {
        let args = StatsArgs {
            table: true,
            temporal: true,
            ..args("db.json")
        };
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_timestamp_counts_needs_temporal() {
        let args = StatsArgs {
            timestamp_counts: Some(PathBuf::from("ts.tsv")),
            ..args("db.txt")
        };
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_parse_separator() {
        assert_eq!(parse_separator("\\t"), "\t");
        assert_eq!(parse_separator("tab"), "\t");
        assert_eq!(parse_separator("space"), " ");
        assert_eq!(parse_separator("comma"), ",");
        assert_eq!(parse_separator(","), ",");
        assert_eq!(parse_separator("a\\\\b"), "a\\b");
        assert_eq!(parse_separator("\\x"), "\\x");
        assert_eq!(parse_separator("\t"), "\t");
    }
}
