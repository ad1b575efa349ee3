//! Two-column text report writer.
//!
//! Each entry becomes one `key<TAB>value` line, in iteration order.

use crate::utils::error::OutputError;
use log::{debug, info};
use std::fmt::Display;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write entries to a file, replacing any existing content
///
/// **Public** - main entry point for report output
///
/// # Arguments
/// * `entries` - `(key, value)` pairs, written in iteration order
/// * `output_path` - Destination file
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::InvalidPath` - Path is empty, a directory, or its parent
///   cannot be created
///
/// # Example
/// ```ignore
/// let stats = DatabaseStats::new(&store);
/// write_report(stats.length_distribution(), "lengths.tsv")?;
/// ```
pub fn write_report<I, K, V>(entries: I, output_path: impl AsRef<Path>) -> Result<(), OutputError>
where
    I: IntoIterator<Item = (K, V)>,
    K: Display,
    V: Display,
{
    let output_path = output_path.as_ref();

    info!("Writing report to: {}", output_path.display());

    validate_path(output_path)?;
    create_parent_dirs(output_path)?;

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let mut writer = BufWriter::new(file);

    let lines = write_entries(&mut writer, entries)?;

    writer.flush().map_err(OutputError::WriteFailed)?;

    info!("Report written successfully ({} lines)", lines);
    Ok(())
}

/// Write entries to any writer, returning the number of lines
pub fn write_entries<W, I, K, V>(writer: &mut W, entries: I) -> Result<usize, OutputError>
where
    W: Write,
    I: IntoIterator<Item = (K, V)>,
    K: Display,
    V: Display,
{
    let mut lines = 0;
    for (key, value) in entries {
        writeln!(writer, "{}\t{}", key, value).map_err(OutputError::WriteFailed)?;
        lines += 1;
    }
    Ok(lines)
}

/// Validate that output path is writable
///
/// **Public** - shared by every file writer in this module
pub fn validate_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    // Check if we're trying to overwrite a directory
    if path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}

pub(crate) fn create_parent_dirs(path: &Path) -> Result<(), OutputError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }
    Ok(())
}
