//! In-memory transaction store.
//!
//! The store is assembled once through [`StoreBuilder`] during ingestion and
//! is read-only afterwards. It keeps:
//! - Transactions in load order, keyed by a unique [`TransactionId`]
//! - The per-transaction length list, aligned with the transactions
//! - For temporal databases, the aligned timestamp list

use log::{debug, warn};
use std::collections::HashMap;
use std::fmt;

/// An ordered sequence of item labels
pub type Transaction = Vec<String>;

/// Identity of a transaction within the store
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TransactionId {
    /// Numeric id (sequential for line sources, or an integer `tid`)
    Number(u64),

    /// String key taken from a table's `tid` column
    Key(String),
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionId::Number(n) => write!(f, "{}", n),
            TransactionId::Key(k) => f.write_str(k),
        }
    }
}

impl From<u64> for TransactionId {
    fn from(n: u64) -> Self {
        TransactionId::Number(n)
    }
}

impl From<&str> for TransactionId {
    fn from(key: &str) -> Self {
        TransactionId::Key(key.to_string())
    }
}

/// Immutable transactional database
#[derive(Debug, Clone, Default)]
pub struct TransactionStore {
    ids: Vec<TransactionId>,
    transactions: Vec<Transaction>,
    lengths: Vec<usize>,
    timestamps: Option<Vec<u64>>,
}

impl TransactionStore {
    /// Start building a store
    pub fn builder() -> StoreBuilder {
        StoreBuilder::default()
    }

    /// Build a store from plain transactions, numbered from 1
    pub fn from_transactions<I, T, S>(transactions: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut builder = Self::builder();
        for items in transactions {
            builder.push(items.into_iter().map(Into::into).collect());
        }
        builder.build()
    }

    /// Number of transactions
    pub fn size(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Length of each transaction, in store order
    pub fn lengths(&self) -> &[usize] {
        &self.lengths
    }

    /// Timestamps aligned with the transactions, if the database is temporal
    pub fn timestamps(&self) -> Option<&[u64]> {
        self.timestamps.as_deref()
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Iterate `(id, items)` pairs in store order
    pub fn iter(&self) -> impl Iterator<Item = (&TransactionId, &[String])> {
        self.ids
            .iter()
            .zip(self.transactions.iter().map(Vec::as_slice))
    }

    /// Look up a transaction by id
    pub fn get(&self, id: &TransactionId) -> Option<&[String]> {
        self.ids
            .iter()
            .position(|candidate| candidate == id)
            .map(|index| self.transactions[index].as_slice())
    }
}

/// Accumulates transactions during ingestion
///
/// Ids are unique: inserting an id that already exists replaces that
/// entry's items in place, keeping its original position.
#[derive(Debug, Default)]
pub struct StoreBuilder {
    ids: Vec<TransactionId>,
    transactions: Vec<Transaction>,
    timestamps: Vec<u64>,
    index: HashMap<TransactionId, usize>,
    next_sequential: u64,
}

impl StoreBuilder {
    /// Append a transaction with the next sequential id (starting at 1)
    pub fn push(&mut self, items: Transaction) -> TransactionId {
        self.next_sequential += 1;
        let id = TransactionId::Number(self.next_sequential);
        self.insert(id.clone(), items);
        id
    }

    /// Append a timestamped transaction with the next sequential id
    pub fn push_timed(&mut self, timestamp: u64, items: Transaction) -> TransactionId {
        let id = self.push(items);
        self.timestamps.push(timestamp);
        id
    }

    /// Insert a transaction under an explicit id
    pub fn insert(&mut self, id: TransactionId, items: Transaction) {
        if let Some(&slot) = self.index.get(&id) {
            warn!("Duplicate transaction id {}, replacing earlier entry", id);
            self.transactions[slot] = items;
            return;
        }

        self.index.insert(id.clone(), self.ids.len());
        self.ids.push(id);
        self.transactions.push(items);
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Freeze the builder into a store and derive the length list
    pub fn build(self) -> TransactionStore {
        let lengths: Vec<usize> = self.transactions.iter().map(Vec::len).collect();

        // Timestamps only count when every transaction carries one
        let timestamps = if !self.timestamps.is_empty()
            && self.timestamps.len() == self.transactions.len()
        {
            Some(self.timestamps)
        } else {
            if !self.timestamps.is_empty() {
                warn!(
                    "Dropping {} timestamps for {} transactions (not aligned)",
                    self.timestamps.len(),
                    self.transactions.len()
                );
            }
            None
        };

        debug!("Built store with {} transactions", self.transactions.len());

        TransactionStore {
            ids: self.ids,
            transactions: self.transactions,
            lengths,
            timestamps,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(labels: &[&str]) -> Transaction {
        labels.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_sequential_ids_start_at_one() {
        let mut builder = TransactionStore::builder();
        let first = builder.push(items(&["a"]));
        let second = builder.push(items(&["b", "c"]));

        assert_eq!(first, TransactionId::Number(1));
        assert_eq!(second, TransactionId::Number(2));

        let store = builder.build();
        assert_eq!(store.size(), 2);
        assert_eq!(store.lengths(), &[1, 2]);
    }

    #[test]
    fn test_lengths_align_with_transactions() {
        let store = TransactionStore::from_transactions(vec![
            vec!["a", "b", "c"],
            vec![],
            vec!["d"],
        ]);

        assert_eq!(store.lengths().len(), store.size());
        assert_eq!(store.lengths(), &[3, 0, 1]);
    }

    #[test]
    fn test_duplicate_id_replaces_in_place() {
        let mut builder = TransactionStore::builder();
        builder.insert("x".into(), items(&["a"]));
        builder.insert("y".into(), items(&["b"]));
        builder.insert("x".into(), items(&["c", "d"]));

        let store = builder.build();
        let ids: Vec<String> = store.iter().map(|(id, _)| id.to_string()).collect();

        assert_eq!(ids, vec!["x", "y"]);
        assert_eq!(store.get(&"x".into()), Some(&["c".to_string(), "d".to_string()][..]));
        assert_eq!(store.lengths(), &[2, 1]);
    }

    #[test]
    fn test_timestamps_kept_when_aligned() {
        let mut builder = TransactionStore::builder();
        builder.push_timed(1, items(&["a"]));
        builder.push_timed(3, items(&["b"]));

        let store = builder.build();
        assert_eq!(store.timestamps(), Some(&[1, 3][..]));
    }

    #[test]
    fn test_timestamps_dropped_when_misaligned() {
        let mut builder = TransactionStore::builder();
        builder.push_timed(1, items(&["a"]));
        builder.push(items(&["b"]));

        let store = builder.build();
        assert!(store.timestamps().is_none());
    }

    #[test]
    fn test_transaction_id_display() {
        assert_eq!(TransactionId::Number(7).to_string(), "7");
        assert_eq!(TransactionId::Key("t-1".to_string()).to_string(), "t-1");
    }
}
