//! Text summary of a database.

use crate::aggregator::DatabaseStats;
use crate::utils::error::StatsError;
use log::warn;
use std::fmt::Display;
use std::io::{self, Write};

/// Write the summary lines in fixed order
///
/// A statistic that cannot be computed prints its error on its own line;
/// the remaining lines are still written.
pub fn write_summary<W: Write>(stats: &DatabaseStats<'_>, writer: &mut W) -> io::Result<()> {
    writeln!(
        writer,
        "Database size (total no of transactions) : {}",
        stats.size()
    )?;
    writeln!(writer, "Number of items : {}", stats.item_count())?;
    write_line(writer, "Minimum Transaction Size", stats.min_length())?;
    write_line(writer, "Average Transaction Size", float(stats.average_length()))?;
    write_line(writer, "Maximum Transaction Size", stats.max_length())?;
    write_line(
        writer,
        "Standard Deviation Transaction Size",
        float(stats.stddev_length()),
    )?;
    write_line(
        writer,
        "Variance in Transaction Sizes",
        float(stats.variance_length()),
    )?;
    write_line(writer, "Sparsity", float(stats.sparsity()))?;

    // Temporal databases also get their period lines
    if stats.store().timestamps().is_some() {
        let periods = stats.period_stats();
        write_line(writer, "Minimum Period", periods.clone().map(|p| p.min))?;
        write_line(
            writer,
            "Average Period",
            float(periods.clone().map(|p| p.average)),
        )?;
        write_line(writer, "Maximum Period", periods.clone().map(|p| p.max))?;
        write_line(
            writer,
            "Standard Deviation Period",
            float(periods.map(|p| p.stddev)),
        )?;
    }
    Ok(())
}

/// Print the summary to stdout
pub fn print_summary(stats: &DatabaseStats<'_>) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_summary(stats, &mut handle)
}

/// Floats keep their decimal point, so 2 prints as `2.0`
fn float(value: Result<f64, StatsError>) -> Result<String, StatsError> {
    value.map(|v| format!("{:?}", v))
}

fn write_line<W: Write, T: Display>(
    writer: &mut W,
    label: &str,
    value: Result<T, StatsError>,
) -> io::Result<()> {
    match value {
        Ok(value) => writeln!(writer, "{} : {}", label, value),
        Err(e) => {
            warn!("{}: {}", label, e);
            writeln!(writer, "{} : undefined ({})", label, e)
        }
    }
}
