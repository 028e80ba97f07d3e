use std::fs;
use std::path::Path;

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::synthetic::{self, ExposureModel};
use crate::types::BusinessUnit;

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("cannot read scenario: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot parse scenario: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("board appetite must be positive: {value}")]
    NonPositiveBoardAppetite { value: f64 },
    #[error("risk tolerance factor must be non-negative: unit={unit} factor={value}")]
    NegativeToleranceFactor { unit: String, value: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitConfig {
    pub name: String,
    pub allocation_percentage: f64,
    pub individual_risk_exposure: f64,
    pub risk_tolerance_factor: f64,
}

/// Caller inputs for one evaluation: board appetite plus units in report order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    pub board_appetite: f64,
    pub units: Vec<UnitConfig>,
}

impl ScenarioConfig {
    pub const DEFAULT_SEED: u64 = 42;

    /// Built-in demo scenario with synthetic exposures from `DEFAULT_SEED`.
    pub fn canonical() -> Self {
        Self::synthetic(Self::DEFAULT_SEED)
    }

    /// Demo scenario: four units sharing a 50M board appetite 30/40/15/15,
    /// exposures and tolerance factors averaged from `synthetic::DEFAULT_ROWS`
    /// seeded draws.
    pub fn synthetic(seed: u64) -> Self {
        // ── Allocation templates ──────────────────────────────────────────────
        let allocations: [(&str, f64); 4] = [
            ("Retail Banking", 30.0),
            ("Investment Banking", 40.0),
            ("Asset Management", 15.0),
            ("IT Operations", 15.0),
        ];
        let names: Vec<&str> = allocations.iter().map(|(n, _)| *n).collect();

        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let observations = ExposureModel::default().generate(&names, synthetic::DEFAULT_ROWS, &mut rng);
        let summaries = synthetic::summarise(&observations, &names);

        let units = allocations
            .iter()
            .zip(summaries)
            .map(|((name, pct), s)| UnitConfig {
                name: name.to_string(),
                allocation_percentage: *pct,
                individual_risk_exposure: s.individual_risk_exposure,
                risk_tolerance_factor: s.risk_tolerance_factor,
            })
            .collect();

        ScenarioConfig {
            board_appetite: 50_000_000.0,
            units,
        }
    }

    /// Parse and `validate` a JSON scenario.
    pub fn from_json_str(s: &str) -> Result<Self, ScenarioError> {
        let config: ScenarioConfig = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ScenarioError> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Input-boundary checks: board appetite > 0 and every tolerance factor >= 0.
    /// Allocation percentages are left to `allocation::validate`; negative
    /// exposures are clamped by `business_units` rather than rejected.
    pub fn validate(&self) -> Result<(), ScenarioError> {
        if self.board_appetite.is_nan() || self.board_appetite <= 0.0 {
            return Err(ScenarioError::NonPositiveBoardAppetite { value: self.board_appetite });
        }
        if let Some(u) = self
            .units
            .iter()
            .find(|u| u.risk_tolerance_factor.is_nan() || u.risk_tolerance_factor < 0.0)
        {
            return Err(ScenarioError::NegativeToleranceFactor {
                unit: u.name.clone(),
                value: u.risk_tolerance_factor,
            });
        }
        Ok(())
    }

    pub fn allocation_percentages(&self) -> Vec<f64> {
        self.units.iter().map(|u| u.allocation_percentage).collect()
    }

    /// Units in caller order, with exposure clamped to >= 0.
    pub fn business_units(&self) -> Vec<BusinessUnit> {
        self.units
            .iter()
            .map(|u| {
                BusinessUnit::new(
                    u.name.as_str(),
                    u.allocation_percentage,
                    u.individual_risk_exposure.max(0.0),
                    u.risk_tolerance_factor,
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allocation;

    #[test]
    fn canonical_allocations_are_valid() {
        let config = ScenarioConfig::canonical();
        assert_eq!(config.board_appetite, 50_000_000.0);
        assert_eq!(config.allocation_percentages(), vec![30.0, 40.0, 15.0, 15.0]);
        assert_eq!(allocation::validate(&config.allocation_percentages()), Ok(()));
    }

    #[test]
    fn canonical_is_reproducible() {
        assert_eq!(ScenarioConfig::canonical(), ScenarioConfig::canonical());
        assert_ne!(ScenarioConfig::synthetic(1), ScenarioConfig::synthetic(2));
    }

    #[test]
    fn synthetic_inputs_stay_in_range() {
        for u in ScenarioConfig::synthetic(7).units {
            assert!(u.individual_risk_exposure >= 0.0);
            assert!(u.risk_tolerance_factor >= 0.0 && u.risk_tolerance_factor <= 1.0);
        }
    }

    #[test]
    fn parses_snake_case_json() {
        let json = r#"{
            "board_appetite": 100000000,
            "units": [
                {"name": "A", "allocation_percentage": 60, "individual_risk_exposure": 1.5, "risk_tolerance_factor": 1.2},
                {"name": "B", "allocation_percentage": 40, "individual_risk_exposure": 0, "risk_tolerance_factor": 1.0}
            ]
        }"#;
        let config = ScenarioConfig::from_json_str(json).unwrap();
        assert_eq!(config.board_appetite, 100_000_000.0);
        assert_eq!(config.units.len(), 2);
        assert_eq!(config.units[0].name, "A");
        assert_eq!(config.units[1].allocation_percentage, 40.0);

        let units = config.business_units();
        assert_eq!(units[0].name.0, "A");
        assert_eq!(units[0].risk_tolerance_factor, 1.2);
    }

    #[test]
    fn string_numbers_are_rejected() {
        let json = r#"{"board_appetite": "100", "units": []}"#;
        assert!(matches!(
            ScenarioConfig::from_json_str(json),
            Err(ScenarioError::Parse(_))
        ));
    }

    fn one_unit(board_appetite: f64, exposure: f64, factor: f64) -> String {
        format!(
            r#"{{"board_appetite": {board_appetite}, "units": [
                {{"name": "A", "allocation_percentage": 100, "individual_risk_exposure": {exposure}, "risk_tolerance_factor": {factor}}}
            ]}}"#
        )
    }

    #[test]
    fn non_positive_board_appetite_is_rejected() {
        for board in [-100.0, 0.0] {
            match ScenarioConfig::from_json_str(&one_unit(board, 10.0, 1.0)) {
                Err(ScenarioError::NonPositiveBoardAppetite { value }) => assert_eq!(value, board),
                other => panic!("expected NonPositiveBoardAppetite for {board}, got {other:?}"),
            }
        }
    }

    #[test]
    fn negative_tolerance_factor_is_rejected() {
        match ScenarioConfig::from_json_str(&one_unit(100.0, 10.0, -2.0)) {
            Err(ScenarioError::NegativeToleranceFactor { unit, value }) => {
                assert_eq!(unit, "A");
                assert_eq!(value, -2.0);
            }
            other => panic!("expected NegativeToleranceFactor, got {other:?}"),
        }
    }

    #[test]
    fn validate_checks_overridden_board_appetite() {
        let mut config = ScenarioConfig::canonical();
        assert!(config.validate().is_ok());
        config.board_appetite = -1.0;
        assert!(matches!(
            config.validate(),
            Err(ScenarioError::NonPositiveBoardAppetite { .. })
        ));
        config.board_appetite = f64::NAN;
        assert!(matches!(
            config.validate(),
            Err(ScenarioError::NonPositiveBoardAppetite { .. })
        ));
    }

    #[test]
    fn negative_exposure_is_clamped_to_zero() {
        let config = ScenarioConfig::from_json_str(&one_unit(100.0, -500.0, 1.0)).unwrap();
        assert_eq!(config.units[0].individual_risk_exposure, -500.0);
        assert_eq!(config.business_units()[0].individual_risk_exposure, 0.0);

        let report = crate::snapshot::evaluate(&config).unwrap();
        assert_eq!(report.units[0].individual_risk_exposure, 0.0);
        assert_eq!(report.summary.total_firm_risk_profile, 0.0);
    }

    #[test]
    fn missing_file_is_io_error() {
        assert!(matches!(
            ScenarioConfig::from_json_file("/nonexistent/scenario.json"),
            Err(ScenarioError::Io(_))
        ));
    }
}
