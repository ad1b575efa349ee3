//! Pre-structured table sources.
//!
//! A table is a set of named columns of equal length. The id column is
//! `tid`; transactions come from `Transactions` or `Patterns`. On disk a
//! table is a JSON object of columns:
//!
//! ```json
//! {"tid": [1, 2], "Transactions": [["a", "b"], ["c"]]}
//! ```

use crate::store::{Transaction, TransactionId, TransactionStore};
use crate::utils::config::{PATTERNS_COLUMN, TID_COLUMN, TRANSACTIONS_COLUMN};
use crate::utils::error::IngestError;
use log::{debug, info, warn};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, ErrorKind};
use std::path::Path;

/// Column-oriented table
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Table {
    columns: HashMap<String, Vec<Value>>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a column
    pub fn with_column(mut self, name: impl Into<String>, values: Vec<Value>) -> Self {
        self.columns.insert(name.into(), values);
        self
    }

    pub fn column(&self, name: &str) -> Option<&[Value]> {
        self.columns.get(name).map(Vec::as_slice)
    }

    /// Read a table from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, IngestError> {
        let path = path.as_ref();

        info!("Reading table from: {}", path.display());

        let file = File::open(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => IngestError::NotFound(path.to_path_buf()),
            _ => IngestError::ReadFailed {
                path: path.to_path_buf(),
                source: e,
            },
        })?;

        let table: Table = serde_json::from_reader(BufReader::new(file))?;
        Ok(table)
    }

    /// Build a store with one entry per row, in row order
    ///
    /// # Errors
    /// * `IngestError::MalformedTable` - missing columns, unequal column
    ///   lengths, or cells of the wrong shape
    pub fn to_store(&self) -> Result<TransactionStore, IngestError> {
        let ids = self.column(TID_COLUMN).ok_or_else(|| {
            IngestError::MalformedTable(format!("missing '{}' column", TID_COLUMN))
        })?;

        // Patterns takes precedence when both columns are present
        let (content_name, contents) = self
            .column(PATTERNS_COLUMN)
            .map(|c| (PATTERNS_COLUMN, c))
            .or_else(|| self.column(TRANSACTIONS_COLUMN).map(|c| (TRANSACTIONS_COLUMN, c)))
            .ok_or_else(|| {
                IngestError::MalformedTable(format!(
                    "missing '{}' or '{}' column",
                    TRANSACTIONS_COLUMN, PATTERNS_COLUMN
                ))
            })?;

        if ids.len() != contents.len() {
            return Err(IngestError::MalformedTable(format!(
                "'{}' has {} rows but '{}' has {}",
                TID_COLUMN,
                ids.len(),
                content_name,
                contents.len()
            )));
        }

        if ids.is_empty() {
            warn!("Table is empty");
        }

        debug!("Building store from '{}' column ({} rows)", content_name, ids.len());

        let mut builder = TransactionStore::builder();
        for (row, (id, cell)) in ids.iter().zip(contents).enumerate() {
            builder.insert(parse_id(id, row)?, parse_items(cell, row)?);
        }

        Ok(builder.build())
    }
}

fn parse_id(value: &Value, row: usize) -> Result<TransactionId, IngestError> {
    match value {
        Value::Number(n) => n.as_u64().map(TransactionId::Number).ok_or_else(|| {
            IngestError::MalformedTable(format!("row {}: tid {} is not a non-negative integer", row, n))
        }),
        Value::String(s) => Ok(TransactionId::Key(s.clone())),
        other => Err(IngestError::MalformedTable(format!(
            "row {}: unsupported tid {}",
            row, other
        ))),
    }
}

fn parse_items(value: &Value, row: usize) -> Result<Transaction, IngestError> {
    let cells = value.as_array().ok_or_else(|| {
        IngestError::MalformedTable(format!("row {}: transaction is not a list", row))
    })?;

    cells
        .iter()
        .map(|item| match item {
            Value::String(s) => Ok(s.clone()),
            Value::Number(n) => Ok(n.to_string()),
            other => Err(IngestError::MalformedTable(format!(
                "row {}: unsupported item {}",
                row, other
            ))),
        })
        .collect()
}
