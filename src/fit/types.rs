//! Fit configuration and results

use nalgebra::Matrix4;
use serde::{Deserialize, Serialize};

use super::model::{LogisticParams, N_PARAMS};

// ============================================================================
// Configuration
// ============================================================================

/// Levenberg-Marquardt settings
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FitOptions {
    /// Maximum number of Jacobian evaluations before giving up (default: 1000)
    pub max_iterations: usize,
    /// Relative reduction in the sum of squares that counts as converged
    pub ftol: f64,
    /// Relative step size that counts as converged
    pub xtol: f64,
    /// Starting damping factor (default: 1e-3)
    pub initial_damping: f64,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            max_iterations: 1000,
            // MINPACK defaults, sqrt of machine epsilon
            ftol: 1.49012e-8,
            xtol: 1.49012e-8,
            initial_damping: 1e-3,
        }
    }
}

impl FitOptions {
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_ftol(mut self, ftol: f64) -> Self {
        self.ftol = ftol;
        self
    }

    pub fn with_xtol(mut self, xtol: f64) -> Self {
        self.xtol = xtol;
        self
    }

    pub fn with_initial_damping(mut self, damping: f64) -> Self {
        self.initial_damping = damping;
        self
    }
}

// ============================================================================
// Results
// ============================================================================

/// Which criterion ended the iterations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// Residuals are exactly zero
    ExactFit,
    /// Sum of squares stopped decreasing (ftol)
    SmallReduction,
    /// Parameter step became negligible (xtol)
    SmallStep,
}

/// Goodness-of-fit and optimizer statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitDiagnostics {
    /// Jacobian evaluations performed
    pub iterations: usize,
    /// Model evaluations over the whole data set
    pub evaluations: usize,
    /// Residual sum of squares
    pub sse: f64,
    /// Root mean squared residual
    pub rmse: f64,
    /// Coefficient of determination (NaN for a constant response)
    pub r_squared: f64,
    pub n_points: usize,
    pub termination: Termination,
}

/// Fitted four-parameter logistic
///
/// The IC50 itself is never stored: [`FitResult::ic50`] derives it from
/// `log_ic50` on demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitResult {
    pub bottom: f64,
    pub top: f64,
    pub log_ic50: f64,
    pub hill_slope: f64,
    /// Parameter covariance in (bottom, top, log_ic50, hill_slope) order,
    /// scaled by the residual variance. Infinite when there are no degrees
    /// of freedom left.
    pub covariance: Matrix4<f64>,
    pub diagnostics: FitDiagnostics,
}

impl FitResult {
    pub fn params(&self) -> LogisticParams {
        LogisticParams::new(self.bottom, self.top, self.log_ic50, self.hill_slope)
    }

    /// 10^log_ic50
    pub fn ic50(&self) -> f64 {
        self.params().ic50()
    }

    /// Fitted response at `x`
    pub fn predict(&self, x: f64) -> f64 {
        self.params().evaluate(x)
    }

    /// Standard errors of (bottom, top, log_ic50, hill_slope)
    pub fn standard_errors(&self) -> [f64; N_PARAMS] {
        let mut se = [0.0; N_PARAMS];
        for (k, value) in se.iter_mut().enumerate() {
            *value = self.covariance[(k, k)].sqrt();
        }
        se
    }

    /// Symmetric interval `log_ic50 ± z · se(log_ic50)`
    ///
    /// `z` is the critical value of the caller's chosen distribution, e.g.
    /// 1.96 for an approximate 95% normal interval.
    pub fn log_ic50_interval(&self, z: f64) -> (f64, f64) {
        let half = z * self.standard_errors()[2];
        (self.log_ic50 - half, self.log_ic50 + half)
    }

    /// [`FitResult::log_ic50_interval`] mapped back to concentration units
    pub fn ic50_interval(&self, z: f64) -> (f64, f64) {
        let (lo, hi) = self.log_ic50_interval(z);
        (10f64.powf(lo), 10f64.powf(hi))
    }
}
