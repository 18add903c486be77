//! Tabular IC50 listing and JSON export of a batch

use serde::{Deserialize, Serialize};

use super::types::BatchReport;
use crate::error::Ic50Error;
use crate::plate::MICROMOLAR;

/// Decimal places kept for IC50 (M) and slope in the summary table
pub const SUMMARY_DECIMALS: i32 = 8;

/// One line of the per-plate IC50 table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub well: usize,
    pub label: String,
    /// IC50 in M, rounded to [`SUMMARY_DECIMALS`]
    pub ic50: f64,
    /// Hill slope, rounded to [`SUMMARY_DECIMALS`]
    pub hill_slope: f64,
    /// IC50 in µM as scientific notation, e.g. `2.50E-01`
    pub ic50_micromolar: String,
}

impl BatchReport {
    /// IC50 and slope of every fitted compound, in plate order
    pub fn summary(&self) -> Vec<SummaryRow> {
        self.curves
            .iter()
            .map(|curve| SummaryRow {
                well: curve.well,
                label: curve.label.clone(),
                ic50: round_decimals(curve.ic50(), SUMMARY_DECIMALS),
                hill_slope: round_decimals(curve.hill_slope(), SUMMARY_DECIMALS),
                ic50_micromolar: format_micromolar(curve.ic50()),
            })
            .collect()
    }

    pub fn to_json(&self) -> Result<String, Ic50Error> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

pub fn round_decimals(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Molar IC50 rendered in µM with two decimals
pub fn format_micromolar(ic50: f64) -> String {
    format_scientific(ic50 / MICROMOLAR)
}

/// Scientific notation with a signed, two-digit exponent (`1.50E+03`)
pub fn format_scientific(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let formatted = format!("{:.2E}", value);
    match formatted.split_once('E') {
        Some((mantissa, exponent)) => match exponent.parse::<i32>() {
            Ok(exp) => format!(
                "{}E{}{:02}",
                mantissa,
                if exp < 0 { '-' } else { '+' },
                exp.abs()
            ),
            Err(_) => formatted,
        },
        None => formatted,
    }
}
