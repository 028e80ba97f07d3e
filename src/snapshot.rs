use std::collections::HashSet;

use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, warn};

use crate::aggregate::{aggregate, compare};
use crate::allocation::{self, AllocationError};
use crate::config::ScenarioConfig;
use crate::report::{FirmReport, FirmSummary, StatusCounts, UnitRow};
use crate::status::classify;
use crate::types::{BusinessUnit, UnitName};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SnapshotError {
    #[error(transparent)]
    Allocation(#[from] AllocationError),
    #[error("duplicate business unit name: {name}")]
    DuplicateUnit { name: UnitName },
}

/// Immutable, validated inputs for one evaluation.
///
/// Any change to the inputs means building a new snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct FirmSnapshot {
    board_appetite: f64,
    units: Vec<BusinessUnit>,
    allocated_appetite: Vec<f64>,
}

impl FirmSnapshot {
    /// Validate the allocation set, then check unit names are unique.
    /// Allocated appetite is computed only after both pass.
    pub fn new(board_appetite: f64, units: Vec<BusinessUnit>) -> Result<Self, SnapshotError> {
        let percentages: Vec<f64> = units.iter().map(|u| u.allocation_percentage).collect();
        allocation::validate(&percentages)?;

        let mut seen = HashSet::with_capacity(units.len());
        for u in &units {
            if !seen.insert(&u.name) {
                return Err(SnapshotError::DuplicateUnit { name: u.name.clone() });
            }
        }

        let allocated_appetite = allocation::distribute(board_appetite, &percentages);
        Ok(FirmSnapshot {
            board_appetite,
            units,
            allocated_appetite,
        })
    }

    pub fn from_config(config: &ScenarioConfig) -> Result<Self, SnapshotError> {
        Self::new(config.board_appetite, config.business_units())
    }

    pub fn board_appetite(&self) -> f64 {
        self.board_appetite
    }

    /// Units in caller order.
    pub fn units(&self) -> &[BusinessUnit] {
        &self.units
    }

    /// Allocated appetite per unit, aligned with `units()`.
    pub fn allocated_appetite(&self) -> &[f64] {
        &self.allocated_appetite
    }

    pub fn total_firm_risk_profile(&self) -> f64 {
        let exposures: Vec<f64> = self.units.iter().map(|u| u.individual_risk_exposure).collect();
        aggregate(&exposures)
    }

    pub fn within_appetite(&self) -> bool {
        self.total_firm_risk_profile() <= self.board_appetite
    }

    /// Classify every unit and roll exposures up to the firm level.
    pub fn evaluate(&self) -> FirmReport {
        let units: Vec<UnitRow> = self
            .units
            .iter()
            .zip(&self.allocated_appetite)
            .map(|(u, &allocated)| {
                let c = classify(u.individual_risk_exposure, allocated, u.risk_tolerance_factor);
                UnitRow {
                    business_unit: u.name.clone(),
                    allocation_percentage: u.allocation_percentage,
                    individual_risk_exposure: u.individual_risk_exposure,
                    risk_tolerance_factor: u.risk_tolerance_factor,
                    allocated_appetite: allocated,
                    absolute_risk_tolerance: c.absolute_risk_tolerance,
                    risk_status: c.status,
                    exposure_vs_appetite: (allocated != 0.0)
                        .then(|| u.individual_risk_exposure / allocated),
                }
            })
            .collect();

        let total = self.total_firm_risk_profile();
        let comparison = compare(total, self.board_appetite);
        let status_counts = StatusCounts::tally(units.iter().map(|r| &r.risk_status));

        if !comparison.verdict.is_within() {
            warn!(
                total,
                board_appetite = self.board_appetite,
                breach = comparison.difference,
                "firm risk profile exceeds board appetite"
            );
        }
        debug!(
            units = units.len(),
            total,
            green = status_counts.green,
            amber = status_counts.amber,
            red = status_counts.red,
            "snapshot evaluated"
        );

        FirmReport {
            units,
            summary: FirmSummary {
                board_appetite: self.board_appetite,
                total_firm_risk_profile: total,
                within_appetite: comparison.verdict.is_within(),
                verdict: comparison.verdict,
                difference: comparison.difference,
                unallocated_appetite: self.board_appetite - aggregate(&self.allocated_appetite),
                status_counts,
            },
        }
    }
}

/// Validate and evaluate one scenario.
pub fn evaluate(config: &ScenarioConfig) -> Result<FirmReport, SnapshotError> {
    FirmSnapshot::from_config(config).map(|s| s.evaluate())
}

/// Evaluate independent scenarios in parallel. Output order matches input order.
pub fn evaluate_batch(configs: &[ScenarioConfig]) -> Vec<Result<FirmReport, SnapshotError>> {
    configs.par_iter().map(evaluate).collect()
}
