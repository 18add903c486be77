//! Initial parameter estimate for the logistic fit
//!
//! The midpoint is found by inverse linear interpolation: the points are
//! ordered by response and x is interpolated as a function of y at
//! `y_mid = (max(y) + min(y)) / 2`. The asymptotes are seeded with the
//! observed extremes and the slope with [`SLOPE_SEED`].

use super::error::FitError;
use super::model::LogisticParams;

/// Hill slope used to seed every fit
pub const SLOPE_SEED: f64 = -1.0;

/// x value at which the interpolated response crosses its midrange
pub fn midpoint(x: &[f64], y: &[f64]) -> Result<f64, FitError> {
    if x.len() != y.len() {
        return Err(FitError::LengthMismatch {
            x: x.len(),
            y: y.len(),
        });
    }
    if x.iter().chain(y.iter()).any(|v| !v.is_finite()) {
        return Err(FitError::NonFinite);
    }

    let distinct = distinct_count(y);
    if distinct < 2 {
        return Err(FitError::DegenerateResponse { distinct });
    }

    let (min, max) = extremes(y);
    let y_mid = (max + min) / 2.0;

    let mut points: Vec<(f64, f64)> = y.iter().copied().zip(x.iter().copied()).collect();
    points.sort_by(|a, b| a.0.total_cmp(&b.0));

    for pair in points.windows(2) {
        let (y0, x0) = pair[0];
        let (y1, x1) = pair[1];
        if y_mid == y0 {
            return Ok(x0);
        }
        if y_mid < y1 {
            return Ok(x0 + (y_mid - y0) * (x1 - x0) / (y1 - y0));
        }
    }

    // Unreachable with two distinct values, since y_mid < max
    Err(FitError::DegenerateResponse { distinct })
}

/// Full starting point `(min(y), max(y), midpoint, -1)`
pub fn initial_guess(x: &[f64], y: &[f64]) -> Result<LogisticParams, FitError> {
    let log_ic50 = midpoint(x, y)?;
    let (bottom, top) = extremes(y);
    Ok(LogisticParams::new(bottom, top, log_ic50, SLOPE_SEED))
}

fn extremes(values: &[f64]) -> (f64, f64) {
    values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        })
}

fn distinct_count(values: &[f64]) -> usize {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    sorted.dedup_by(|a, b| a == b);
    sorted.len()
}
