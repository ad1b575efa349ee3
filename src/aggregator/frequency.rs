//! Item-frequency ranking and frequency-range binning.

use crate::store::Transaction;
use crate::utils::config::{FREQUENCY_RANGE_BINS, FREQUENCY_RANGE_DIVISOR};
use crate::utils::error::StatsError;
use log::debug;
use std::collections::HashMap;

/// Count every item across all transactions
///
/// Sorted by count (descending). Items with equal counts keep the order in
/// which they were first seen. Repeated items within a transaction are
/// counted each time.
pub fn item_frequencies(transactions: &[Transaction]) -> Vec<(String, usize)> {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(String, usize)> = Vec::new();

    for item in transactions.iter().flatten() {
        match positions.get(item.as_str()) {
            Some(&slot) => counts[slot].1 += 1,
            None => {
                positions.insert(item.as_str(), counts.len());
                counts.push((item.clone(), 1));
            }
        }
    }

    // Stable sort keeps first-seen order among ties
    counts.sort_by(|a, b| b.1.cmp(&a.1));

    debug!("Counted {} distinct items", counts.len());
    counts
}

/// Bin item frequencies into ranges below the maximum frequency
///
/// Boundaries are `floor(i * max / 6)` for `i = 1..=5`. The first bin counts
/// items with `0 < f < b1`, each later bin items with `b(i-1) < f < b(i)`.
/// Both ends are open, so an item whose frequency equals a boundary (and
/// every item above `b5`) is not counted anywhere.
///
/// Returns `(items_in_bin, boundary)` pairs. When two bins hold the same
/// number of items, the later boundary overwrites the earlier one in place.
///
/// # Errors
/// * `StatsError::NoItems` - no item frequencies to bin
pub fn frequency_ranges(frequencies: &[(String, usize)]) -> Result<Vec<(usize, u64)>, StatsError> {
    let maximum = frequencies
        .iter()
        .map(|(_, count)| *count as u64)
        .max()
        .filter(|&max| max > 0)
        .ok_or(StatsError::NoItems)?;

    let boundaries: Vec<u64> = (1..=FREQUENCY_RANGE_BINS)
        .map(|i| i * maximum / FREQUENCY_RANGE_DIVISOR)
        .collect();

    let mut ranges: Vec<(usize, u64)> = Vec::with_capacity(boundaries.len());
    let mut lower = 0;

    for &upper in &boundaries {
        let in_bin = frequencies
            .iter()
            .filter(|(_, count)| {
                let count = *count as u64;
                count > lower && count < upper
            })
            .count();

        match ranges.iter_mut().find(|(key, _)| *key == in_bin) {
            Some(entry) => entry.1 = upper,
            None => ranges.push((in_bin, upper)),
        }

        lower = upper;
    }

    Ok(ranges)
}
