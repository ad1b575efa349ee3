//! Separator-delimited line sources.
//!
//! Each line is one transaction: split on the separator, strip trailing
//! whitespace from every field and drop the empty ones. Blank lines still
//! produce a (zero-length) transaction.

use crate::store::{StoreBuilder, TransactionStore};
use crate::utils::error::IngestError;
use log::{debug, info};
use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::Path;

/// How each line is laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineFormat {
    /// Every token is an item
    #[default]
    Plain,

    /// First token is an integer timestamp, the rest are items
    Temporal,
}

/// Split one line into its non-empty, right-trimmed fields
pub fn split_line(line: &str, separator: &str) -> Vec<String> {
    line.split(separator)
        .map(str::trim_end)
        .filter(|field| !field.is_empty())
        .map(str::to_string)
        .collect()
}

/// Read transactions from any line stream
///
/// `origin` is only used for error reporting.
pub fn read_transactions<R: BufRead>(
    reader: R,
    separator: &str,
    format: LineFormat,
    origin: &Path,
) -> Result<TransactionStore, IngestError> {
    let mut builder = TransactionStore::builder();

    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| IngestError::ReadFailed {
            path: origin.to_path_buf(),
            source,
        })?;

        push_line(&mut builder, &line, separator, format, index + 1)?;
    }

    debug!("Read {} lines from {}", builder.len(), origin.display());
    Ok(builder.build())
}

/// Load a local file
///
/// # Errors
/// * `IngestError::NotFound` - the file cannot be opened
/// * `IngestError::ReadFailed` - I/O or UTF-8 error while reading
/// * `IngestError::InvalidTimestamp` - bad leading token in temporal mode
pub fn load_path(
    path: impl AsRef<Path>,
    separator: &str,
    format: LineFormat,
) -> Result<TransactionStore, IngestError> {
    let path = path.as_ref();

    info!("Reading database from: {}", path.display());

    let file = File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => IngestError::NotFound(path.to_path_buf()),
        _ => IngestError::ReadFailed {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    read_transactions(BufReader::new(file), separator, format, path)
}

fn push_line(
    builder: &mut StoreBuilder,
    line: &str,
    separator: &str,
    format: LineFormat,
    line_number: usize,
) -> Result<(), IngestError> {
    let mut fields = split_line(line, separator);

    match format {
        LineFormat::Plain => {
            builder.push(fields);
        }
        LineFormat::Temporal => {
            if fields.is_empty() {
                return Err(IngestError::InvalidTimestamp {
                    line: line_number,
                    value: String::new(),
                });
            }

            let raw = fields.remove(0);
            // Timestamps are positive integers
            let timestamp = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|&ts| ts > 0)
                .ok_or_else(|| IngestError::InvalidTimestamp {
                    line: line_number,
                    value: raw.clone(),
                })?;

            builder.push_timed(timestamp, fields);
        }
    }

    Ok(())
}
