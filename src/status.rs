use serde::Serialize;

use crate::types::RiskStatus;

/// Output of `classify` for one unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Classification {
    pub absolute_risk_tolerance: f64,
    pub status: RiskStatus,
}

/// Derive absolute risk tolerance and RAG status for one unit.
///
/// The checks run in order and each is inclusive on its ceiling:
/// exposure <= allocated appetite is Green, else exposure <= tolerance is
/// Amber, else Red. With a factor below 1 the tolerance sits under the
/// allocated appetite, the Amber band is empty, and anything above appetite
/// goes straight to Red.
///
/// No input is rejected; negative or zero values still classify.
pub fn classify(exposure: f64, allocated_appetite: f64, tolerance_factor: f64) -> Classification {
    let absolute_risk_tolerance = allocated_appetite * tolerance_factor;
    let status = if exposure <= allocated_appetite {
        RiskStatus::Green
    } else if exposure <= absolute_risk_tolerance {
        RiskStatus::Amber
    } else {
        RiskStatus::Red
    };
    Classification { absolute_risk_tolerance, status }
}
