//! Fit error types

use thiserror::Error;

/// Why the optimizer gave up on a compound
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConvergenceFailure {
    #[error("iteration budget of {0} exhausted")]
    MaxIterations(usize),
    #[error("singular Jacobian")]
    SingularJacobian,
    #[error("non-finite residuals")]
    NonFiniteResiduals,
    /// Damping grew past its ceiling without finding a downhill step
    #[error("no downhill step at maximum damping")]
    DampingExhausted,
}

/// Errors that can occur while fitting a single compound
///
/// These never abort a batch: the curve builder records them per compound
/// and carries on with the remaining wells.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FitError {
    /// The response has too little variation to locate a midpoint
    #[error("Degenerate response: {distinct} distinct value(s), need at least 2")]
    DegenerateResponse { distinct: usize },

    /// The optimizer did not converge
    #[error("Fit did not converge: {0}")]
    FitConvergence(#[from] ConvergenceFailure),

    /// Fewer points than model parameters
    #[error("Insufficient data: {n} points, need at least {required}")]
    InsufficientData { n: usize, required: usize },

    /// Concentration and response arrays differ in length
    #[error("Length mismatch: {x} concentrations, {y} responses")]
    LengthMismatch { x: usize, y: usize },

    /// NaN or infinite input values
    #[error("Input contains non-finite values")]
    NonFinite,

    /// The optimizer framework reported an error of its own
    #[error("Optimizer error: {0}")]
    Solver(String),
}
