//! Per-compound orchestration of aggregation, seeding and fitting
//!
//! For every [`WellRole::Compound`](crate::plate::WellRole::Compound) well the builder
//!
//! 1. reduces the replicates to a mean/std per concentration
//! 2. converts the well's concentrations to log10 M
//! 3. seeds and fits the logistic model
//! 4. samples the fitted curve densely over the well's own x range
//!
//! Mock, control and empty wells are never fit. The first and last mock wells
//! are attached to every curve as reference traces.
//!
//! Fit failures are confined to their compound and collected in
//! [`BatchReport::failures`]; only plate-level problems abort a batch.

use ndarray::Array1;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::types::{
    BatchReport, CompoundCurve, CompoundFailure, FittedCurve, MockOverlay, ResponseSeries,
};
use crate::error::Ic50Error;
use crate::fit::{initial_guess, FitError, FitOptions, LevenbergMarquardt};
use crate::plate::{AggregatedResponse, Plate, PlateError};

/// Number of points on each dense fitted curve
pub const DENSE_POINTS: usize = 1000;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuilderOptions {
    /// Optimizer settings shared by all compounds
    pub fit: FitOptions,
    /// Samples per fitted curve (default: 1000)
    pub dense_points: usize,
    /// Fit compounds on the rayon thread pool (default: true)
    pub parallel: bool,
}

impl Default for BuilderOptions {
    fn default() -> Self {
        Self {
            fit: FitOptions::default(),
            dense_points: DENSE_POINTS,
            parallel: true,
        }
    }
}

impl BuilderOptions {
    pub fn with_fit(mut self, fit: FitOptions) -> Self {
        self.fit = fit;
        self
    }

    pub fn with_dense_points(mut self, dense_points: usize) -> Self {
        self.dense_points = dense_points;
        self
    }

    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

/// Aggregated mock well used as a reference trace
struct MockTrace {
    well: usize,
    label: String,
    response: AggregatedResponse,
}

pub struct ResponseCurveBuilder<'a> {
    plate: &'a Plate,
    options: BuilderOptions,
}

impl<'a> ResponseCurveBuilder<'a> {
    pub fn new(plate: &'a Plate) -> Self {
        Self {
            plate,
            options: BuilderOptions::default(),
        }
    }

    pub fn with_options(mut self, options: BuilderOptions) -> Self {
        self.options = options;
        self
    }

    /// Fit every compound well of the plate
    pub fn build(&self) -> Result<BatchReport, PlateError> {
        let mocks = self.mock_traces()?;
        let wells = self.plate.layout().compound_wells();

        let outcomes: Vec<(usize, Result<CompoundCurve, FitError>)> = if self.options.parallel {
            wells
                .par_iter()
                .map(|&well| self.fit_well(well, &mocks).map(|outcome| (well, outcome)))
                .collect::<Result<_, _>>()?
        } else {
            wells
                .iter()
                .map(|&well| self.fit_well(well, &mocks).map(|outcome| (well, outcome)))
                .collect::<Result<_, _>>()?
        };

        let mut report = BatchReport::default();
        for (well, outcome) in outcomes {
            match outcome {
                Ok(curve) => {
                    tracing::debug!(
                        well,
                        label = %curve.label,
                        ic50 = curve.ic50(),
                        slope = curve.hill_slope(),
                        "compound fitted"
                    );
                    report.curves.push(curve);
                }
                Err(error) => {
                    let label = self.plate.label(well)?.to_string();
                    tracing::warn!(well, label = %label, %error, "compound skipped");
                    report.failures.push(CompoundFailure::new(well, label, error));
                }
            }
        }

        tracing::info!(
            fitted = report.curves.len(),
            failed = report.failures.len(),
            "dose-response batch complete"
        );
        Ok(report)
    }

    /// Fit a single compound well
    pub fn compound(&self, well: usize) -> Result<CompoundCurve, Ic50Error> {
        let mocks = self.mock_traces()?;
        Ok(self.fit_well(well, &mocks)??)
    }

    /// Outer error: the plate itself is unusable. Inner error: this compound
    /// could not be fit.
    fn fit_well(
        &self,
        well: usize,
        mocks: &[MockTrace],
    ) -> Result<Result<CompoundCurve, FitError>, PlateError> {
        let role = self.plate.layout().role(well).ok_or(PlateError::WellOutOfRange {
            well,
            n_wells: self.plate.n_wells(),
        })?;
        if !role.is_fittable() {
            return Err(PlateError::NotACompound { well, role });
        }

        let label = self.plate.label(well)?.to_string();
        let response = self.plate.replicates().aggregate(well)?;
        let x = self.plate.concentrations().log_molar(well)?;

        let fit = match initial_guess(&x, response.mean())
            .and_then(|start| LevenbergMarquardt::new(&self.options.fit).fit(&x, response.mean(), start))
        {
            Ok(fit) => fit,
            Err(error) => return Ok(Err(error)),
        };

        let fitted = dense_curve(&x, self.options.dense_points, |xi| fit.predict(xi));
        let overlays = mocks
            .iter()
            .map(|mock| MockOverlay {
                well: mock.well,
                label: mock.label.clone(),
                series: ResponseSeries::new(x.clone(), &mock.response),
            })
            .collect();

        Ok(Ok(CompoundCurve {
            well,
            label,
            observed: ResponseSeries::new(x, &response),
            fit,
            fitted,
            overlays,
        }))
    }

    fn mock_traces(&self) -> Result<Vec<MockTrace>, PlateError> {
        self.plate
            .layout()
            .overlay_mock_wells()
            .into_iter()
            .map(|well| {
                Ok(MockTrace {
                    well,
                    label: self.plate.label(well)?.to_string(),
                    response: self.plate.replicates().aggregate(well)?,
                })
            })
            .collect()
    }
}

/// Evenly spaced samples of `f` over `[min(x), max(x)]`
fn dense_curve(x: &[f64], n: usize, f: impl Fn(f64) -> f64) -> FittedCurve {
    let (lo, hi) = x
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    let x_dense = Array1::linspace(lo, hi, n).to_vec();
    let y_dense = x_dense.iter().map(|&xi| f(xi)).collect();
    FittedCurve {
        x: x_dense,
        y: y_dense,
    }
}

/// Dose-response analysis entry point, mirroring the builder with defaults
pub trait DoseResponse {
    fn response_curves(&self, options: &BuilderOptions) -> Result<BatchReport, PlateError>;
}

impl DoseResponse for Plate {
    fn response_curves(&self, options: &BuilderOptions) -> Result<BatchReport, PlateError> {
        ResponseCurveBuilder::new(self)
            .with_options(options.clone())
            .build()
    }
}
