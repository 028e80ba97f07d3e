use serde::Serialize;

use crate::types::AppetiteVerdict;

/// Total firm risk profile compared against board appetite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FirmComparison {
    pub verdict: AppetiteVerdict,
    /// `total - board_appetite`: positive is breach, zero or negative is headroom.
    pub difference: f64,
}

/// Sum of all unit exposures. Values are summed as given; clamping negatives
/// is the producer's job. Empty input gives 0.
pub fn aggregate(exposures: &[f64]) -> f64 {
    exposures.iter().sum()
}

/// Within appetite when `total <= board_appetite`.
pub fn compare(total: f64, board_appetite: f64) -> FirmComparison {
    let verdict = if total <= board_appetite {
        AppetiteVerdict::WithinAppetite
    } else {
        AppetiteVerdict::ExceedsAppetite
    };
    FirmComparison {
        verdict,
        difference: total - board_appetite,
    }
}
