//! Transaction-length statistics.
//!
//! All functions take the store's length list and fail with
//! `StatsError::EmptyDatabase` instead of returning NaN or panicking.

use crate::utils::error::StatsError;
use std::collections::BTreeMap;

pub fn min_length(lengths: &[usize]) -> Result<usize, StatsError> {
    lengths.iter().copied().min().ok_or(StatsError::EmptyDatabase)
}

pub fn max_length(lengths: &[usize]) -> Result<usize, StatsError> {
    lengths.iter().copied().max().ok_or(StatsError::EmptyDatabase)
}

/// Sum of lengths divided by the number of transactions
pub fn average_length(lengths: &[usize]) -> Result<f64, StatsError> {
    if lengths.is_empty() {
        return Err(StatsError::EmptyDatabase);
    }

    let total: usize = lengths.iter().sum();
    Ok(total as f64 / lengths.len() as f64)
}

/// Population standard deviation (divides by N)
///
/// Note: `variance_length` is the *sample* variance, so
/// `stddev_length()^2 != variance_length()`. Downstream reports depend on
/// both values as they are.
pub fn stddev_length(lengths: &[usize]) -> Result<f64, StatsError> {
    let mean = average_length(lengths)?;
    Ok((squared_deviations(lengths, mean) / lengths.len() as f64).sqrt())
}

/// Sample variance (divides by N - 1)
///
/// # Errors
/// * `StatsError::EmptyDatabase` - no transactions
/// * `StatsError::InsufficientData` - a single transaction
pub fn variance_length(lengths: &[usize]) -> Result<f64, StatsError> {
    let mean = average_length(lengths)?;

    if lengths.len() < 2 {
        return Err(StatsError::InsufficientData {
            required: 2,
            actual: lengths.len(),
        });
    }

    Ok(squared_deviations(lengths, mean) / (lengths.len() - 1) as f64)
}

/// Number of transactions per length, ascending by length
pub fn length_distribution(lengths: &[usize]) -> BTreeMap<usize, usize> {
    let mut distribution = BTreeMap::new();
    for &length in lengths {
        *distribution.entry(length).or_insert(0) += 1;
    }
    distribution
}

fn squared_deviations(lengths: &[usize], mean: f64) -> f64 {
    lengths
        .iter()
        .map(|&length| {
            let diff = length as f64 - mean;
            diff * diff
        })
        .sum()
}
