//! Item-presence matrix and sparsity/density ratios.
//!
//! Rows are distinct items in frequency order, columns are transactions in
//! store order. A cell is 1 when the item occurs in the transaction.

use crate::aggregator::frequency::item_frequencies;
use crate::store::TransactionStore;
use crate::utils::error::StatsError;
use log::debug;
use std::collections::HashSet;

/// Dense binary matrix of items x transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresenceMatrix {
    items: Vec<String>,
    cols: usize,
    cells: Vec<u8>,
}

impl PresenceMatrix {
    /// Build the matrix for a store
    pub fn build(store: &TransactionStore) -> Self {
        let items: Vec<String> = item_frequencies(store.transactions())
            .into_iter()
            .map(|(item, _)| item)
            .collect();

        let members: Vec<HashSet<&str>> = store
            .transactions()
            .iter()
            .map(|t| t.iter().map(String::as_str).collect())
            .collect();

        let cols = members.len();
        let mut cells = Vec::with_capacity(items.len() * cols);

        for item in &items {
            cells.extend(
                members
                    .iter()
                    .map(|set| u8::from(set.contains(item.as_str()))),
            );
        }

        debug!("Built {} x {} presence matrix", items.len(), cols);

        Self { items, cols, cells }
    }

    pub fn rows(&self) -> usize {
        self.items.len()
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Row labels (items), in frequency order
    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn get(&self, row: usize, col: usize) -> Option<u8> {
        if row >= self.rows() || col >= self.cols {
            return None;
        }
        self.cells.get(row * self.cols + col).copied()
    }

    /// One item's presence across all transactions
    pub fn row(&self, row: usize) -> Option<&[u8]> {
        if row >= self.rows() {
            return None;
        }
        let start = row * self.cols;
        Some(&self.cells[start..start + self.cols])
    }

    pub fn nonzero_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell != 0).count()
    }

    pub fn zero_count(&self) -> usize {
        self.cells.len() - self.nonzero_count()
    }

    /// Zero cells over total cells
    pub fn sparsity(&self) -> Result<f64, StatsError> {
        let total = self.total_cells()?;
        Ok(self.zero_count() as f64 / total as f64)
    }

    /// Non-zero cells over total cells
    pub fn density(&self) -> Result<f64, StatsError> {
        let total = self.total_cells()?;
        Ok(self.nonzero_count() as f64 / total as f64)
    }

    fn total_cells(&self) -> Result<usize, StatsError> {
        if self.cells.is_empty() {
            return Err(StatsError::EmptyMatrix {
                rows: self.rows(),
                cols: self.cols,
            });
        }
        Ok(self.cells.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matrix_layout() {
        let store = TransactionStore::from_transactions(vec![
            vec!["a", "b"],
            vec!["b"],
            vec!["b", "c"],
        ]);

        let matrix = PresenceMatrix::build(&store);

        assert_eq!(matrix.items(), &["b", "a", "c"]);
        assert_eq!(matrix.rows(), 3);
        assert_eq!(matrix.cols(), 3);
        assert_eq!(matrix.row(0), Some(&[1, 1, 1][..]));
        assert_eq!(matrix.row(1), Some(&[1, 0, 0][..]));
        assert_eq!(matrix.row(2), Some(&[0, 0, 1][..]));
        assert_eq!(matrix.get(2, 2), Some(1));
        assert_eq!(matrix.get(3, 0), None);
    }

    #[test]
    fn test_duplicate_items_are_single_presence() {
        let store = TransactionStore::from_transactions(vec![vec!["a", "a"], vec!["b"]]);
        let matrix = PresenceMatrix::build(&store);

        assert_eq!(matrix.nonzero_count(), 2);
        assert_eq!(matrix.density(), Ok(0.5));
        assert_eq!(matrix.sparsity(), Ok(0.5));
    }

    #[test]
    fn test_empty_store_is_error() {
        let matrix = PresenceMatrix::build(&TransactionStore::default());

        assert_eq!(
            matrix.sparsity(),
            Err(StatsError::EmptyMatrix { rows: 0, cols: 0 })
        );
    }

    #[test]
    fn test_blank_transactions_is_error() {
        let store = TransactionStore::from_transactions(vec![Vec::<String>::new(); 3]);
        let matrix = PresenceMatrix::build(&store);

        assert_eq!(
            matrix.density(),
            Err(StatsError::EmptyMatrix { rows: 0, cols: 3 })
        );
    }
}
