//! Aggregation of a transaction store into descriptive statistics.
//!
//! This module computes:
//! - Database size and distinct item count
//! - Transaction-length statistics and distribution
//! - Item-frequency ranking and frequency ranges
//! - Period statistics for temporal databases
//!
//! Every statistic is recomputed from the store on request. The store never
//! changes after loading, so repeated calls return identical results.

pub mod frequency;
pub mod lengths;
pub mod period;

// Re-export main types and functions
pub use frequency::{frequency_ranges, item_frequencies};
pub use lengths::{
    average_length, length_distribution, max_length, min_length, stddev_length, variance_length,
};
pub use period::{period_stats, periods, transactions_per_timestamp, PeriodStats};

use crate::density::PresenceMatrix;
use crate::store::TransactionStore;
use crate::utils::error::StatsError;
use std::collections::BTreeMap;

/// Read-only statistics view over a loaded store
#[derive(Debug, Clone, Copy)]
pub struct DatabaseStats<'a> {
    store: &'a TransactionStore,
}

impl<'a> DatabaseStats<'a> {
    pub fn new(store: &'a TransactionStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &'a TransactionStore {
        self.store
    }

    /// Number of transactions
    pub fn size(&self) -> usize {
        self.store.size()
    }

    /// Number of distinct items
    pub fn item_count(&self) -> usize {
        self.item_frequencies().len()
    }

    pub fn min_length(&self) -> Result<usize, StatsError> {
        min_length(self.store.lengths())
    }

    pub fn max_length(&self) -> Result<usize, StatsError> {
        max_length(self.store.lengths())
    }

    pub fn average_length(&self) -> Result<f64, StatsError> {
        average_length(self.store.lengths())
    }

    /// Population standard deviation of transaction lengths
    pub fn stddev_length(&self) -> Result<f64, StatsError> {
        stddev_length(self.store.lengths())
    }

    /// Sample variance of transaction lengths
    pub fn variance_length(&self) -> Result<f64, StatsError> {
        variance_length(self.store.lengths())
    }

    /// Item counts, descending, ties in first-seen order
    pub fn item_frequencies(&self) -> Vec<(String, usize)> {
        item_frequencies(self.store.transactions())
    }

    /// Item counts binned below the maximum frequency
    pub fn frequency_ranges(&self) -> Result<Vec<(usize, u64)>, StatsError> {
        if self.store.is_empty() {
            return Err(StatsError::EmptyDatabase);
        }
        frequency_ranges(&self.item_frequencies())
    }

    /// Transactions per length, ascending by length
    pub fn length_distribution(&self) -> BTreeMap<usize, usize> {
        length_distribution(self.store.lengths())
    }

    pub fn presence_matrix(&self) -> PresenceMatrix {
        PresenceMatrix::build(self.store)
    }

    /// Fraction of zero cells in the presence matrix
    pub fn sparsity(&self) -> Result<f64, StatsError> {
        self.presence_matrix().sparsity()
    }

    /// Fraction of non-zero cells in the presence matrix
    pub fn density(&self) -> Result<f64, StatsError> {
        self.presence_matrix().density()
    }

    pub fn period_stats(&self) -> Result<PeriodStats, StatsError> {
        period_stats(self.timestamps()?)
    }

    pub fn transactions_per_timestamp(&self) -> Result<Vec<(u64, usize)>, StatsError> {
        transactions_per_timestamp(self.timestamps()?)
    }

    fn timestamps(&self) -> Result<&'a [u64], StatsError> {
        if self.store.is_empty() {
            return Err(StatsError::EmptyDatabase);
        }
        self.store.timestamps().ok_or(StatsError::NoTimestamps)
    }
}
