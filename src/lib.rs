//! txdb-stats
//!
//! Descriptive statistics for transactional databases, used to
//! characterize a dataset before running pattern-mining algorithms.
//!
//! The pipeline is:
//! - [`ingest`] reads a table, a local file or a URL into a [`store::TransactionStore`]
//! - [`aggregator`] computes size, length, frequency and period statistics
//! - [`density`] builds the item-presence matrix for sparsity/density
//! - [`output`] prints summaries, writes two-column reports and plots
//!
//! ## Getting Started
//!
//! ```bash
//! txdb-stats stats retail.txt '\t' --item-frequencies freq.tsv
//! ```
//!
//! As a library:
//!
//! ```ignore
//! use txdb_stats::aggregator::DatabaseStats;
//! use txdb_stats::ingest::Source;
//!
//! let store = Source::resolve("retail.txt", "\t").load()?;
//! let stats = DatabaseStats::new(&store);
//! println!("{} transactions, sparsity {}", stats.size(), stats.sparsity()?);
//! ```

pub mod aggregator;
pub mod commands;
pub mod density;
pub mod ingest;
pub mod output;
pub mod store;
pub mod utils;
