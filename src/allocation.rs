use thiserror::Error;
use tracing::debug;

/// Tolerance on the 100 % sum check.
pub const ALLOCATION_EPSILON: f64 = 1e-6;

/// Percentages must sum to this, within `ALLOCATION_EPSILON`.
pub const FULL_ALLOCATION: f64 = 100.0;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AllocationError {
    /// Every offending `(index, value)` pair, in input order.
    #[error("allocation percentages must be non-negative: {}", format_entries(.entries))]
    NegativeAllocation { entries: Vec<(usize, f64)> },
    /// `deviation` is `sum - 100`.
    #[error("allocation percentages must sum to 100%: sum={sum} deviation={deviation:+}")]
    AllocationSum { sum: f64, deviation: f64 },
}

fn format_entries(entries: &[(usize, f64)]) -> String {
    entries
        .iter()
        .map(|(i, v)| format!("#{i}={v}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Check that every percentage is non-negative and that they sum to 100 ± ε.
///
/// The non-negativity check runs first, so a list with a negative entry fails
/// with `NegativeAllocation` whatever its sum. An empty list sums to 0 and fails
/// the sum check.
pub fn validate(percentages: &[f64]) -> Result<(), AllocationError> {
    // NaN is not >= 0, so it lands here too.
    let negatives: Vec<(usize, f64)> = percentages
        .iter()
        .copied()
        .enumerate()
        .filter(|&(_, p)| p.is_nan() || p < 0.0)
        .collect();
    if !negatives.is_empty() {
        return Err(AllocationError::NegativeAllocation { entries: negatives });
    }

    let sum: f64 = percentages.iter().sum();
    let lo = FULL_ALLOCATION - ALLOCATION_EPSILON;
    let hi = FULL_ALLOCATION + ALLOCATION_EPSILON;
    if !(lo..=hi).contains(&sum) {
        return Err(AllocationError::AllocationSum {
            sum,
            deviation: sum - FULL_ALLOCATION,
        });
    }

    debug!(units = percentages.len(), sum, "allocation validated");
    Ok(())
}

/// Convert percentages into monetary allocated appetite.
///
/// `out[i] = board_appetite * percentages[i] / 100`, same length and order as
/// the input. Zero appetite or a zero share gives zero, not an error.
pub fn distribute(board_appetite: f64, percentages: &[f64]) -> Vec<f64> {
    percentages
        .iter()
        .map(|p| board_appetite * p / FULL_ALLOCATION)
        .collect()
}
