use std::fmt;

use serde::{Deserialize, Serialize};

/// Business unit identifier. Unique within one snapshot.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnitName(pub String);

impl From<&str> for UnitName {
    fn from(s: &str) -> Self {
        UnitName(s.to_string())
    }
}

impl From<String> for UnitName {
    fn from(s: String) -> Self {
        UnitName(s)
    }
}

impl fmt::Display for UnitName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Red/Amber/Green classification of one unit's exposure against its limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskStatus {
    Green,
    Amber,
    Red,
}

impl RiskStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            RiskStatus::Green => "Green",
            RiskStatus::Amber => "Amber",
            RiskStatus::Red => "Red",
        }
    }
}

impl fmt::Display for RiskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Firm-level outcome of comparing the total risk profile to board appetite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AppetiteVerdict {
    WithinAppetite,
    ExceedsAppetite,
}

impl AppetiteVerdict {
    pub fn is_within(self) -> bool {
        matches!(self, AppetiteVerdict::WithinAppetite)
    }
}

/// One business unit as supplied by the caller.
///
/// All monetary fields share one currency unit; the core never converts.
/// `risk_tolerance_factor` is conventionally in [0.1, 1.0] but is not clamped here.
#[derive(Debug, Clone, PartialEq)]
pub struct BusinessUnit {
    pub name: UnitName,
    /// Share of board appetite, 0–100.
    pub allocation_percentage: f64,
    /// Actual or simulated loss. Producers clamp this to >= 0.
    pub individual_risk_exposure: f64,
    pub risk_tolerance_factor: f64,
}

impl BusinessUnit {
    pub fn new(
        name: impl Into<UnitName>,
        allocation_percentage: f64,
        individual_risk_exposure: f64,
        risk_tolerance_factor: f64,
    ) -> Self {
        BusinessUnit {
            name: name.into(),
            allocation_percentage,
            individual_risk_exposure,
            risk_tolerance_factor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn risk_status_serializes_as_bare_name() {
        let json = serde_json::to_string(&[RiskStatus::Green, RiskStatus::Amber, RiskStatus::Red]).unwrap();
        assert_eq!(json, r#"["Green","Amber","Red"]"#);
    }

    #[test]
    fn unit_name_is_transparent_in_json() {
        let name = UnitName::from("Retail Banking");
        assert_eq!(serde_json::to_string(&name).unwrap(), r#""Retail Banking""#);
        assert_eq!(name.to_string(), "Retail Banking");
    }

    #[test]
    fn verdict_within() {
        assert!(AppetiteVerdict::WithinAppetite.is_within());
        assert!(!AppetiteVerdict::ExceedsAppetite.is_within());
    }
}
