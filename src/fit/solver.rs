//! Levenberg-Marquardt least squares for the logistic model
//!
//! Each iteration solves the damped normal equations
//!
//! `(JᵀJ + λ · diag(JᵀJ)) δ = Jᵀr`
//!
//! with a Cholesky factorization. Accepted steps shrink λ by 10, rejected
//! steps grow it by 10. Iteration stops when either the relative reduction in
//! the sum of squares or the relative step falls below its tolerance.
//!
//! The solver plugs into argmin: [`LogisticProblem`] provides residuals and
//! Jacobian, and an [`Executor`] drives the iterations and enforces
//! [`FitOptions::max_iterations`].

use argmin::core::{
    ArgminError, Error, Executor, IterState, Jacobian, Operator, Problem, Solver, State,
    TerminationReason, TerminationStatus, KV,
};
use nalgebra::{DVector, Matrix4, MatrixXx4, Vector4};
use serde::{Deserialize, Serialize};

use super::error::{ConvergenceFailure, FitError};
use super::model::{LogisticParams, N_PARAMS};
use super::types::{FitDiagnostics, FitOptions, FitResult, Termination};

const MIN_DAMPING: f64 = 1e-12;
const MAX_DAMPING: f64 = 1e16;

type LmState = IterState<Vector4<f64>, (), (), (), (), f64>;

/// Residuals `y - f(x)` of the logistic model over one dose-response series
#[derive(Debug, Clone, Copy)]
pub struct LogisticProblem<'a> {
    x: &'a [f64],
    y: &'a [f64],
}

impl<'a> LogisticProblem<'a> {
    pub fn new(x: &'a [f64], y: &'a [f64]) -> Self {
        Self { x, y }
    }
}

impl Operator for LogisticProblem<'_> {
    type Param = Vector4<f64>;
    type Output = DVector<f64>;

    fn apply(&self, p: &Self::Param) -> Result<Self::Output, Error> {
        let params = LogisticParams::from_vector(p);
        Ok(DVector::from_iterator(
            self.x.len(),
            self.x
                .iter()
                .zip(self.y)
                .map(|(&xi, &yi)| yi - params.evaluate(xi)),
        ))
    }
}

impl Jacobian for LogisticProblem<'_> {
    type Param = Vector4<f64>;
    type Jacobian = MatrixXx4<f64>;

    /// Rows are the model gradients at each x
    fn jacobian(&self, p: &Self::Param) -> Result<Self::Jacobian, Error> {
        let params = LogisticParams::from_vector(p);
        let mut jacobian = MatrixXx4::zeros(self.x.len());
        for (i, &xi) in self.x.iter().enumerate() {
            for (k, g) in params.gradient(xi).into_iter().enumerate() {
                jacobian[(i, k)] = g;
            }
        }
        Ok(jacobian)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevenbergMarquardt {
    options: FitOptions,
    damping: f64,
    evaluations: usize,
    termination: Option<Termination>,
}

/// Converged point of a [`LevenbergMarquardt`] run
pub(crate) struct Minimum {
    pub param: Vector4<f64>,
    pub sse: f64,
    pub iterations: usize,
    pub evaluations: usize,
    pub termination: Termination,
}

impl LevenbergMarquardt {
    pub fn new(options: &FitOptions) -> Self {
        Self {
            options: *options,
            damping: options.initial_damping,
            evaluations: 0,
            termination: None,
        }
    }

    /// Fit the model to `(x, y)` starting from `start`
    pub fn fit(&self, x: &[f64], y: &[f64], start: LogisticParams) -> Result<FitResult, FitError> {
        let n = x.len();
        if n != y.len() {
            return Err(FitError::LengthMismatch { x: n, y: y.len() });
        }
        if n < N_PARAMS {
            return Err(FitError::InsufficientData {
                n,
                required: N_PARAMS,
            });
        }
        let start = start.to_vector();
        if x.iter().chain(y.iter()).chain(start.iter()).any(|v| !v.is_finite()) {
            return Err(FitError::NonFinite);
        }

        let problem = LogisticProblem::new(x, y);
        let minimum = self.minimize(problem, start)?;
        let covariance = covariance(&problem, &minimum.param, minimum.sse)?;
        let params = LogisticParams::from_vector(&minimum.param);

        Ok(FitResult {
            bottom: params.bottom,
            top: params.top,
            log_ic50: params.log_ic50,
            hill_slope: params.hill_slope,
            covariance,
            diagnostics: FitDiagnostics {
                iterations: minimum.iterations,
                evaluations: minimum.evaluations,
                sse: minimum.sse,
                rmse: (minimum.sse / n as f64).sqrt(),
                r_squared: r_squared(y, minimum.sse),
                n_points: n,
                termination: minimum.termination,
            },
        })
    }

    /// Run the solver on any residual problem with four parameters
    pub(crate) fn minimize<O>(&self, problem: O, start: Vector4<f64>) -> Result<Minimum, FitError>
    where
        O: Operator<Param = Vector4<f64>, Output = DVector<f64>>
            + Jacobian<Param = Vector4<f64>, Jacobian = MatrixXx4<f64>>,
    {
        let max_iterations = self.options.max_iterations;
        let result = Executor::new(problem, self.clone())
            .configure(|state| state.param(start).max_iters(max_iterations as u64))
            .run()
            .map_err(|error| match error.downcast::<ConvergenceFailure>() {
                Ok(failure) => FitError::from(failure),
                Err(other) => FitError::Solver(other.to_string()),
            })?;

        let state = result.state();
        let iterations = state.get_iter() as usize;
        let termination = match state.get_termination_reason() {
            Some(TerminationReason::SolverConverged) | Some(TerminationReason::TargetCostReached) => {
                result.solver().termination.unwrap_or(Termination::ExactFit)
            }
            Some(TerminationReason::MaxItersReached) => {
                tracing::debug!(
                    iterations,
                    sse = state.get_cost(),
                    "levenberg-marquardt exhausted its budget"
                );
                return Err(ConvergenceFailure::MaxIterations(max_iterations).into());
            }
            other => {
                return Err(FitError::Solver(format!(
                    "optimizer stopped early: {:?}",
                    other
                )))
            }
        };

        let param = state
            .get_param()
            .copied()
            .ok_or_else(|| FitError::Solver("optimizer returned no parameters".to_string()))?;

        Ok(Minimum {
            param,
            sse: state.get_cost(),
            iterations,
            evaluations: result.solver().evaluations,
            termination,
        })
    }

    /// Grow λ after a rejected step
    fn increase_damping(&mut self) -> Result<(), Error> {
        self.damping *= 10.0;
        if self.damping > MAX_DAMPING {
            return Err(ConvergenceFailure::DampingExhausted.into());
        }
        Ok(())
    }
}

impl<O> Solver<O, LmState> for LevenbergMarquardt
where
    O: Operator<Param = Vector4<f64>, Output = DVector<f64>>
        + Jacobian<Param = Vector4<f64>, Jacobian = MatrixXx4<f64>>,
{
    const NAME: &'static str = "Levenberg-Marquardt";

    fn init(
        &mut self,
        problem: &mut Problem<O>,
        state: LmState,
    ) -> Result<(LmState, Option<KV>), Error> {
        let p = *state.get_param().ok_or_else(|| ArgminError::NotInitialized {
            text: "Levenberg-Marquardt requires a starting point".to_string(),
        })?;
        let sse = problem.apply(&p)?.norm_squared();
        self.evaluations += 1;
        if !sse.is_finite() {
            return Err(ConvergenceFailure::NonFiniteResiduals.into());
        }
        self.damping = self.options.initial_damping;
        self.termination = None;
        Ok((state.cost(sse), None))
    }

    fn next_iter(
        &mut self,
        problem: &mut Problem<O>,
        state: LmState,
    ) -> Result<(LmState, Option<KV>), Error> {
        let p = *state.get_param().ok_or_else(|| ArgminError::NotInitialized {
            text: "Levenberg-Marquardt lost its current point".to_string(),
        })?;
        let sse = state.get_cost();

        let jacobian = problem.jacobian(&p)?;
        let residuals = problem.apply(&p)?;
        let jtj: Matrix4<f64> = jacobian.transpose() * &jacobian;
        let jtr: Vector4<f64> = jacobian.transpose() * residuals;

        let scale = jtj.diagonal();
        if scale.iter().any(|d| !(d.is_finite() && *d > 0.0)) {
            return Err(ConvergenceFailure::SingularJacobian.into());
        }

        let FitOptions { ftol, xtol, .. } = self.options;
        loop {
            let mut damped = jtj;
            for k in 0..N_PARAMS {
                damped[(k, k)] += self.damping * scale[k];
            }

            let Some(cholesky) = damped.cholesky() else {
                self.increase_damping()?;
                continue;
            };

            let step = cholesky.solve(&jtr);
            let candidate = p + step;
            let candidate_sse = problem.apply(&candidate)?.norm_squared();
            self.evaluations += 1;
            let small_step = step.norm() <= xtol * (xtol + p.norm());

            if candidate_sse.is_finite() && candidate_sse < sse {
                let actual = (sse - candidate_sse) / sse;
                let predicted = (2.0 * step.dot(&jtr) - step.dot(&(jtj * step))) / sse;
                self.damping = (self.damping / 10.0).max(MIN_DAMPING);

                if actual <= ftol && predicted.abs() <= ftol {
                    self.termination = Some(Termination::SmallReduction);
                } else if small_step {
                    self.termination = Some(Termination::SmallStep);
                }

                tracing::trace!(
                    iteration = state.get_iter(),
                    sse = candidate_sse,
                    damping = self.damping,
                    "levenberg-marquardt step accepted"
                );
                return Ok((state.param(candidate).cost(candidate_sse), None));
            }

            // No downhill step left at this resolution
            if small_step {
                self.termination = Some(Termination::SmallStep);
                return Ok((state, None));
            }
            self.increase_damping()?;
        }
    }

    fn terminate(&mut self, state: &LmState) -> TerminationStatus {
        if state.get_cost() == 0.0 {
            self.termination = Some(Termination::ExactFit);
        }
        match self.termination {
            Some(_) => TerminationStatus::Terminated(TerminationReason::SolverConverged),
            None => TerminationStatus::NotTerminated,
        }
    }
}

/// `(JᵀJ)⁻¹ · SSE / (n - 4)`
fn covariance(
    problem: &LogisticProblem<'_>,
    p: &Vector4<f64>,
    sse: f64,
) -> Result<Matrix4<f64>, FitError> {
    let jacobian = problem
        .jacobian(p)
        .map_err(|error| FitError::Solver(error.to_string()))?;
    let jtj: Matrix4<f64> = jacobian.transpose() * &jacobian;
    let inverse = jtj
        .try_inverse()
        .filter(|inv| inv.iter().all(|v| v.is_finite()))
        .ok_or(ConvergenceFailure::SingularJacobian)?;

    let dof = problem.x.len() - N_PARAMS;
    if dof == 0 {
        return Ok(Matrix4::from_element(f64::INFINITY));
    }
    Ok(inverse * (sse / dof as f64))
}

fn r_squared(y: &[f64], sse: f64) -> f64 {
    let mean = y.iter().sum::<f64>() / y.len() as f64;
    let sst: f64 = y.iter().map(|v| (v - mean).powi(2)).sum();
    if sst > 0.0 {
        1.0 - sse / sst
    } else {
        f64::NAN
    }
}
