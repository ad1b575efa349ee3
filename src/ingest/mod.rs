//! Loading transactional databases.
//!
//! This module handles:
//! - Resolving an input into a [`Source`] (table, local path, or URL)
//! - Splitting separator-delimited lines into transactions
//! - Fetching remote databases
//! - Building the [`TransactionStore`](crate::store::TransactionStore)

pub mod lines;
pub mod remote;
pub mod table;

pub use lines::{load_path, read_transactions, split_line, LineFormat};
pub use remote::{parse_remote, RemoteClient};
pub use table::Table;

use crate::store::TransactionStore;
use crate::utils::error::IngestError;
use log::info;
use reqwest::Url;
use std::path::PathBuf;

/// Where a database comes from
///
/// Resolved once; each variant carries only what its reader needs.
#[derive(Debug, Clone)]
pub enum Source {
    /// Already-structured table with `tid` and transaction columns
    Table(Table),

    /// Local text file
    Path {
        path: PathBuf,
        separator: String,
        format: LineFormat,
    },

    /// Text file served over HTTP(S)
    Url {
        url: Url,
        separator: String,
        format: LineFormat,
    },
}

impl Source {
    /// Pick `Url` for http(s) locations, `Path` for everything else
    pub fn resolve(input: &str, separator: impl Into<String>) -> Self {
        let separator = separator.into();

        match parse_remote(input) {
            Some(url) => Source::Url {
                url,
                separator,
                format: LineFormat::Plain,
            },
            None => Source::Path {
                path: PathBuf::from(input),
                separator,
                format: LineFormat::Plain,
            },
        }
    }

    /// Switch a line source to the temporal layout (no-op for tables)
    pub fn temporal(self) -> Self {
        match self {
            Source::Path { path, separator, .. } => Source::Path {
                path,
                separator,
                format: LineFormat::Temporal,
            },
            Source::Url { url, separator, .. } => Source::Url {
                url,
                separator,
                format: LineFormat::Temporal,
            },
            table => table,
        }
    }

    /// Human-readable description for logging
    pub fn describe(&self) -> String {
        match self {
            Source::Table(_) => "table".to_string(),
            Source::Path { path, .. } => path.display().to_string(),
            Source::Url { url, .. } => url.to_string(),
        }
    }

    /// Read the source into a store
    ///
    /// Any error is fatal for the load: no partial store is returned.
    pub fn load(&self) -> Result<TransactionStore, IngestError> {
        let store = match self {
            Source::Table(table) => table.to_store()?,
            Source::Path {
                path,
                separator,
                format,
            } => load_path(path, separator, *format)?,
            Source::Url {
                url,
                separator,
                format,
            } => RemoteClient::new()?.fetch(url, separator, *format)?,
        };

        info!(
            "Loaded {} transactions from {}",
            store.size(),
            self.describe()
        );

        Ok(store)
    }
}
