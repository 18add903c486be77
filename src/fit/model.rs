//! Four-parameter logistic (variable slope) inhibitor-response model
//!
//! `y = a + (b - a) / (1 + 10^((c - x) * d))`
//!
//! | Symbol | Field | Meaning |
//! |--------|-------|---------|
//! | a | `bottom` | lower asymptote |
//! | b | `top` | upper asymptote |
//! | c | `log_ic50` | log10(IC50), x at the midpoint |
//! | d | `hill_slope` | Hill slope, negative when response falls with dose |

use nalgebra::Vector4;
use serde::{Deserialize, Serialize};
use std::f64::consts::LN_10;

/// Number of model parameters
pub const N_PARAMS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LogisticParams {
    pub bottom: f64,
    pub top: f64,
    pub log_ic50: f64,
    pub hill_slope: f64,
}

impl LogisticParams {
    pub fn new(bottom: f64, top: f64, log_ic50: f64, hill_slope: f64) -> Self {
        Self {
            bottom,
            top,
            log_ic50,
            hill_slope,
        }
    }

    pub(crate) fn from_vector(p: &Vector4<f64>) -> Self {
        Self::new(p[0], p[1], p[2], p[3])
    }

    pub(crate) fn to_vector(self) -> Vector4<f64> {
        Vector4::new(self.bottom, self.top, self.log_ic50, self.hill_slope)
    }

    /// IC50 in the units of 10^x (molar for the plate pipeline)
    pub fn ic50(&self) -> f64 {
        10f64.powf(self.log_ic50)
    }

    #[inline]
    pub fn evaluate(&self, x: f64) -> f64 {
        inhibitor_response(x, self.bottom, self.top, self.log_ic50, self.hill_slope)
    }

    /// Partial derivatives of the response with respect to (a, b, c, d)
    #[inline]
    pub fn gradient(&self, x: f64) -> [f64; N_PARAMS] {
        let s = upper_fraction(x, self.log_ic50, self.hill_slope);
        // d s / d t with t = (c - x) * d * ln 10
        let ds = -s * (1.0 - s);
        let span = self.top - self.bottom;
        [
            1.0 - s,
            s,
            span * ds * self.hill_slope * LN_10,
            span * ds * (self.log_ic50 - x) * LN_10,
        ]
    }
}

/// Evaluate the variable-slope inhibitor-response model at `x`
#[inline]
pub fn inhibitor_response(x: f64, bottom: f64, top: f64, log_ic50: f64, hill_slope: f64) -> f64 {
    bottom + (top - bottom) * upper_fraction(x, log_ic50, hill_slope)
}

/// `1 / (1 + 10^((c - x) * d))`, evaluated without overflow
#[inline]
fn upper_fraction(x: f64, log_ic50: f64, hill_slope: f64) -> f64 {
    let t = (log_ic50 - x) * hill_slope * LN_10;
    if t > 0.0 {
        let e = (-t).exp();
        e / (1.0 + e)
    } else {
        1.0 / (1.0 + t.exp())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_midpoint_is_halfway() {
        let p = LogisticParams::new(10.0, 90.0, -6.0, -1.0);
        assert_relative_eq!(p.evaluate(-6.0), 50.0, epsilon = 1e-12);
    }

    #[test]
    fn test_negative_slope_decreases_with_dose() {
        let p = LogisticParams::new(0.0, 100.0, -6.0, -1.0);
        assert!(p.evaluate(-9.0) > 99.0);
        assert!(p.evaluate(-3.0) < 1.0);
        assert!(p.evaluate(-7.0) > p.evaluate(-5.0));
    }

    #[test]
    fn test_matches_direct_formula() {
        let (a, b, c, d) = (5.0, 120.0, -6.3, -1.4);
        for &x in &[-9.0, -7.5, -6.3, -5.1, -3.0] {
            let direct = a + (b - a) / (1.0 + 10f64.powf((c - x) * d));
            assert_relative_eq!(inhibitor_response(x, a, b, c, d), direct, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_extreme_exponents_stay_finite() {
        let p = LogisticParams::new(0.0, 100.0, -6.0, -500.0);
        assert_eq!(p.evaluate(-9.0), 100.0);
        assert_eq!(p.evaluate(-3.0), 0.0);
        assert!(p.gradient(-9.0).iter().all(|g| g.is_finite()));
        assert!(p.gradient(-3.0).iter().all(|g| g.is_finite()));
    }

    #[test]
    fn test_gradient_matches_finite_differences() {
        let p = LogisticParams::new(3.0, 97.0, -6.2, -1.3);
        let x = -6.0;
        let analytic = p.gradient(x);
        let h = 1e-6;
        let base = p.to_vector();
        for k in 0..N_PARAMS {
            let mut hi = base;
            let mut lo = base;
            hi[k] += h;
            lo[k] -= h;
            let numeric = (LogisticParams::from_vector(&hi).evaluate(x)
                - LogisticParams::from_vector(&lo).evaluate(x))
                / (2.0 * h);
            assert_relative_eq!(analytic[k], numeric, epsilon = 1e-5, max_relative = 1e-5);
        }
    }
}
