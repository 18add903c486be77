//! Per-compound results handed to renderers and reports

use serde::{Deserialize, Serialize};

use crate::fit::{FitError, FitResult};
use crate::plate::AggregatedResponse;

/// Observed points: log10 concentration, mean response, standard deviation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseSeries {
    pub x: Vec<f64>,
    pub mean: Vec<f64>,
    pub std_dev: Vec<f64>,
}

impl ResponseSeries {
    pub(crate) fn new(x: Vec<f64>, response: &AggregatedResponse) -> Self {
        Self {
            x,
            mean: response.mean().to_vec(),
            std_dev: response.std_dev().to_vec(),
        }
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Iterate over `(x, mean, std_dev)` triples
    pub fn points(&self) -> impl Iterator<Item = (f64, f64, f64)> + '_ {
        self.x
            .iter()
            .zip(&self.mean)
            .zip(&self.std_dev)
            .map(|((&x, &m), &s)| (x, m, s))
    }
}

/// Densely sampled fitted curve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittedCurve {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

/// A mock (vehicle) well drawn behind a compound curve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MockOverlay {
    pub well: usize,
    pub label: String,
    /// Mock readings plotted against the compound's concentrations
    pub series: ResponseSeries,
}

/// Everything needed to draw and report one compound
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompoundCurve {
    pub well: usize,
    pub label: String,
    pub observed: ResponseSeries,
    pub fit: FitResult,
    pub fitted: FittedCurve,
    /// First and last mock wells of the plate, whichever exist
    pub overlays: Vec<MockOverlay>,
}

impl CompoundCurve {
    /// IC50 in M
    pub fn ic50(&self) -> f64 {
        self.fit.ic50()
    }

    pub fn hill_slope(&self) -> f64 {
        self.fit.hill_slope
    }
}

/// A compound that could not be fit
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompoundFailure {
    pub well: usize,
    pub label: String,
    /// Human-readable reason
    pub reason: String,
    #[serde(skip)]
    pub error: FitError,
}

impl CompoundFailure {
    pub(crate) fn new(well: usize, label: String, error: FitError) -> Self {
        Self {
            well,
            label,
            reason: error.to_string(),
            error,
        }
    }
}

/// Outcome of fitting a whole plate
///
/// Curves and failures are both in plate order. Every compound well appears
/// in exactly one of the two lists.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchReport {
    pub curves: Vec<CompoundCurve>,
    pub failures: Vec<CompoundFailure>,
}

impl BatchReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn curve(&self, label: &str) -> Option<&CompoundCurve> {
        self.curves.iter().find(|c| c.label == label)
    }
}
