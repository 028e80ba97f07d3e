use std::fmt::Write as _;
use std::io::{self, Write};

use serde::Serialize;

use crate::types::{AppetiteVerdict, RiskStatus, UnitName};

/// One output row per unit. Field names serialize in reporting vocabulary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitRow {
    #[serde(rename = "Business Unit")]
    pub business_unit: UnitName,
    #[serde(rename = "Allocation Percentage")]
    pub allocation_percentage: f64,
    #[serde(rename = "Individual Risk Exposure")]
    pub individual_risk_exposure: f64,
    #[serde(rename = "Risk Tolerance Factor")]
    pub risk_tolerance_factor: f64,
    #[serde(rename = "Allocated Appetite")]
    pub allocated_appetite: f64,
    #[serde(rename = "Absolute Risk Tolerance")]
    pub absolute_risk_tolerance: f64,
    #[serde(rename = "Risk Status")]
    pub risk_status: RiskStatus,
    /// Exposure / allocated appetite. `None` when nothing was allocated.
    #[serde(rename = "Exposure vs Appetite")]
    pub exposure_vs_appetite: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    #[serde(rename = "Green")]
    pub green: usize,
    #[serde(rename = "Amber")]
    pub amber: usize,
    #[serde(rename = "Red")]
    pub red: usize,
}

impl StatusCounts {
    pub fn tally<'a>(statuses: impl IntoIterator<Item = &'a RiskStatus>) -> Self {
        let mut counts = StatusCounts::default();
        for s in statuses {
            match s {
                RiskStatus::Green => counts.green += 1,
                RiskStatus::Amber => counts.amber += 1,
                RiskStatus::Red => counts.red += 1,
            }
        }
        counts
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FirmSummary {
    #[serde(rename = "Board Appetite")]
    pub board_appetite: f64,
    #[serde(rename = "Total Firm Risk Profile")]
    pub total_firm_risk_profile: f64,
    #[serde(rename = "Within Appetite")]
    pub within_appetite: bool,
    #[serde(rename = "Appetite Verdict")]
    pub verdict: AppetiteVerdict,
    /// Total minus board appetite.
    #[serde(rename = "Difference")]
    pub difference: f64,
    /// Board appetite minus the sum of allocated appetite.
    #[serde(rename = "Unallocated Appetite")]
    pub unallocated_appetite: f64,
    #[serde(rename = "Status Counts")]
    pub status_counts: StatusCounts,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FirmReport {
    pub units: Vec<UnitRow>,
    pub summary: FirmSummary,
}

impl FirmReport {
    pub fn write_json(&self, w: impl Write) -> io::Result<()> {
        serde_json::to_writer_pretty(w, self).map_err(io::Error::from)
    }

    /// Plain-text table of the unit rows followed by the firm summary.
    pub fn render_table(&self) -> String {
        let mut out = String::new();
        let name_width = self
            .units
            .iter()
            .map(|u| u.business_unit.0.chars().count())
            .max()
            .unwrap_or(0)
            .max("Business Unit".len());

        let _ = writeln!(
            out,
            "{:<name_width$} | {:>7} | {:>16} | {:>6} | {:>16} | {:>16} | {:>6}",
            "Business Unit", "Alloc%", "Exposure", "Factor", "Allocated", "Abs Tolerance", "Status"
        );
        let _ = writeln!(out, "{}", "-".repeat(name_width + 3 + 7 + 3 + 16 + 3 + 6 + 3 + 16 + 3 + 16 + 3 + 6));
        for u in &self.units {
            let _ = writeln!(
                out,
                "{:<name_width$} | {:>6.2}% | {:>16} | {:>6.2} | {:>16} | {:>16} | {:>6}",
                u.business_unit.0,
                u.allocation_percentage,
                format_money(u.individual_risk_exposure),
                u.risk_tolerance_factor,
                format_money(u.allocated_appetite),
                format_money(u.absolute_risk_tolerance),
                u.risk_status.as_str(),
            );
        }

        let s = &self.summary;
        let _ = writeln!(out);
        let _ = writeln!(out, "Board Appetite:          {}", format_money(s.board_appetite));
        let _ = writeln!(out, "Total Firm Risk Profile: {}", format_money(s.total_firm_risk_profile));
        let _ = writeln!(out, "Unallocated Appetite:    {}", format_money(s.unallocated_appetite));
        let _ = writeln!(
            out,
            "Status counts:           Green={} Amber={} Red={}",
            s.status_counts.green, s.status_counts.amber, s.status_counts.red
        );
        if s.within_appetite {
            let _ = writeln!(out, "Within Board Appetite (headroom {})", format_money(-s.difference));
        } else {
            let _ = writeln!(out, "EXCEEDS Board Appetite by {}", format_money(s.difference));
        }
        out
    }
}

/// Whole-unit money with thousands separators: `-1234567.6` → `-$1,234,568`.
pub fn format_money(value: f64) -> String {
    if !value.is_finite() {
        return format!("${value}");
    }
    let rounded = value.abs().round();
    let digits = format!("{rounded:.0}");
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if value < 0.0 && rounded != 0.0 { "-" } else { "" };
    format!("{sign}${grouped}")
}
