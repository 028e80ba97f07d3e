use rand::Rng;
use rand_distr::StandardNormal;
use serde::Serialize;

pub const DEFAULT_ROWS: usize = 100;

/// Distribution parameters for synthetic observations. Demo input only;
/// the evaluation core never calls this.
#[derive(Debug, Clone, PartialEq)]
pub struct ExposureModel {
    pub exposure_mean: f64,
    pub exposure_std_dev: f64,
    pub tolerance_mean: f64,
    pub tolerance_std_dev: f64,
    pub tolerance_min: f64,
    pub tolerance_max: f64,
}

impl Default for ExposureModel {
    fn default() -> Self {
        ExposureModel {
            exposure_mean: 50_000.0,
            exposure_std_dev: 20_000.0,
            tolerance_mean: 0.7,
            tolerance_std_dev: 0.2,
            tolerance_min: 0.1,
            tolerance_max: 1.0,
        }
    }
}

/// One simulated loss observation attributed to a unit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Observation {
    pub unit: String,
    pub individual_risk_exposure: f64,
    pub risk_tolerance_factor: f64,
}

/// Per-unit means over a set of observations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitSummary {
    pub unit: String,
    pub individual_risk_exposure: f64,
    pub risk_tolerance_factor: f64,
}

impl ExposureModel {
    /// Draw `rows` observations, each attributed to a unit picked uniformly
    /// from `units`.
    ///
    /// Exposure is |N(mean, sd)| so it is never negative. The tolerance
    /// factor is N(mean, sd) clamped into [tolerance_min, tolerance_max].
    /// Empty `units` gives no observations.
    pub fn generate(&self, units: &[&str], rows: usize, rng: &mut impl Rng) -> Vec<Observation> {
        if units.is_empty() {
            return Vec::new();
        }
        (0..rows)
            .map(|_| {
                let unit = units[rng.random_range(0..units.len())];
                let z_exposure: f64 = rng.sample(StandardNormal);
                let z_tolerance: f64 = rng.sample(StandardNormal);
                let exposure = (self.exposure_mean + self.exposure_std_dev * z_exposure).abs();
                let factor = (self.tolerance_mean + self.tolerance_std_dev * z_tolerance)
                    .max(self.tolerance_min)
                    .min(self.tolerance_max);
                Observation {
                    unit: unit.to_string(),
                    individual_risk_exposure: exposure,
                    risk_tolerance_factor: factor,
                }
            })
            .collect()
    }
}

/// Average exposure and tolerance per unit, one summary per name in `units`
/// order. A unit with no observations gets exposure 0 and factor 0.
pub fn summarise(observations: &[Observation], units: &[&str]) -> Vec<UnitSummary> {
    units
        .iter()
        .map(|&unit| {
            let (n, exposure, factor) = observations
                .iter()
                .filter(|o| o.unit == unit)
                .fold((0usize, 0.0f64, 0.0f64), |(n, e, f), o| {
                    (n + 1, e + o.individual_risk_exposure, f + o.risk_tolerance_factor)
                });
            let (individual_risk_exposure, risk_tolerance_factor) = if n == 0 {
                (0.0, 0.0)
            } else {
                (exposure / n as f64, factor / n as f64)
            };
            UnitSummary {
                unit: unit.to_string(),
                individual_risk_exposure,
                risk_tolerance_factor,
            }
        })
        .collect()
}
