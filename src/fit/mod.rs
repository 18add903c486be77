//! Four-parameter logistic fitting
//!
//! Fits the variable-slope inhibitor-response model
//!
//! `y = bottom + (top - bottom) / (1 + 10^((log_ic50 - x) * hill_slope))`
//!
//! to log10-concentration/response pairs.
//!
//! # Pipeline
//!
//! 1. [`initial_guess`]: asymptotes from the observed extremes, midpoint by
//!    inverse linear interpolation, slope seeded at -1
//! 2. [`LevenbergMarquardt`]: damped Gauss-Newton iterations run by an argmin
//!    executor and bounded by [`FitOptions::max_iterations`]
//! 3. [`FitResult`]: parameters, covariance and [`FitDiagnostics`]
//!
//! # Usage
//!
//! ```rust,ignore
//! use ic50::fit::{fit_logistic, FitOptions};
//!
//! let x = [-9.0, -8.0, -7.0, -6.0, -5.0, -4.0];
//! let y = [99.0, 97.0, 80.0, 21.0, 4.0, 1.0];
//! let fit = fit_logistic(&x, &y, &FitOptions::default())?;
//! println!("IC50 = {:.3e} M, slope = {:.2}", fit.ic50(), fit.hill_slope);
//! ```

mod error;
mod guess;
mod model;
mod solver;
mod types;


pub use error::{ConvergenceFailure, FitError};
pub use guess::{initial_guess, midpoint, SLOPE_SEED};
pub use model::{inhibitor_response, LogisticParams, N_PARAMS};
pub use solver::{LevenbergMarquardt, LogisticProblem};
pub use types::{FitDiagnostics, FitOptions, FitResult, Termination};

/// Seed and fit the logistic model in one call
pub fn fit_logistic(x: &[f64], y: &[f64], options: &FitOptions) -> Result<FitResult, FitError> {
    let start = initial_guess(x, y)?;
    LevenbergMarquardt::new(options).fit(x, y, start)
}
