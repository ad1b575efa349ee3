//! Period statistics for temporal databases.
//!
//! A period is the gap between a transaction's timestamp and the previous
//! one (the first transaction is measured from 0). Timestamps must be
//! non-decreasing in store order.

use crate::utils::config::MAX_TIMESTAMP_SPAN;
use crate::utils::error::StatsError;
use std::collections::BTreeMap;

/// Summary of the gaps between consecutive timestamps
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodStats {
    pub min: u64,
    pub max: u64,
    pub average: f64,
    /// Population standard deviation
    pub stddev: f64,
}

/// Gaps between consecutive timestamps, starting from 0
pub fn periods(timestamps: &[u64]) -> Result<Vec<u64>, StatsError> {
    let mut previous = 0;
    let mut gaps = Vec::with_capacity(timestamps.len());

    for (index, &current) in timestamps.iter().enumerate() {
        if current < previous {
            return Err(StatsError::UnorderedTimestamps {
                index,
                previous,
                current,
            });
        }
        gaps.push(current - previous);
        previous = current;
    }

    Ok(gaps)
}

/// Min, max, average and standard deviation of the periods
pub fn period_stats(timestamps: &[u64]) -> Result<PeriodStats, StatsError> {
    let gaps = periods(timestamps)?;

    let (min, max) = match (gaps.iter().min(), gaps.iter().max()) {
        (Some(&min), Some(&max)) => (min, max),
        _ => return Err(StatsError::EmptyDatabase),
    };

    let n = gaps.len() as f64;
    let average = gaps.iter().sum::<u64>() as f64 / n;
    let variance = gaps
        .iter()
        .map(|&gap| {
            let diff = gap as f64 - average;
            diff * diff
        })
        .sum::<f64>()
        / n;

    Ok(PeriodStats {
        min,
        max,
        average,
        stddev: variance.sqrt(),
    })
}

/// Transactions per timestamp for every timestamp in `1..=max`
///
/// Timestamps with no transactions are reported with a count of 0.
///
/// # Errors
/// * `StatsError::EmptyDatabase` - no timestamps
/// * `StatsError::TimestampRangeTooLarge` - `max` exceeds `MAX_TIMESTAMP_SPAN`
pub fn transactions_per_timestamp(timestamps: &[u64]) -> Result<Vec<(u64, usize)>, StatsError> {
    let max = timestamps
        .iter()
        .copied()
        .max()
        .ok_or(StatsError::EmptyDatabase)?;

    if max > MAX_TIMESTAMP_SPAN {
        return Err(StatsError::TimestampRangeTooLarge {
            max,
            limit: MAX_TIMESTAMP_SPAN,
        });
    }

    let mut counts: BTreeMap<u64, usize> = BTreeMap::new();
    for &timestamp in timestamps {
        *counts.entry(timestamp).or_insert(0) += 1;
    }

    Ok((1..=max)
        .map(|timestamp| (timestamp, counts.get(&timestamp).copied().unwrap_or(0)))
        .collect())
}
