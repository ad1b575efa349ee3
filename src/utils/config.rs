//! Configuration and constants for the CLI.

use std::time::Duration;

/// Default field separator for line sources
pub const DEFAULT_SEPARATOR: &str = "\t";

/// Default timeout for remote fetches
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

// Column names recognized in table sources
pub const TID_COLUMN: &str = "tid";
pub const TRANSACTIONS_COLUMN: &str = "Transactions";
pub const PATTERNS_COLUMN: &str = "Patterns";

// Frequency ranges: boundaries are floor(i * max / DIVISOR) for i in 1..=BINS
pub const FREQUENCY_RANGE_BINS: u64 = 5;
pub const FREQUENCY_RANGE_DIVISOR: u64 = 6;

/// Largest timestamp for which per-timestamp counts are expanded
pub const MAX_TIMESTAMP_SPAN: u64 = 10_000_000;

// Plot window, as percentages of the point list
pub const DEFAULT_PLOT_LIMIT: usize = 100;
pub const DEFAULT_PLOT_OFFSET: usize = 0;

pub const DEFAULT_PLOT_WIDTH: usize = 1200;
pub const DEFAULT_PLOT_HEIGHT: usize = 600;
