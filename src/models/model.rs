//! Model evaluation for `f(x) = a·sin(b − x) + c·x² + d`.
//!
//! The objective relies on two primitive operations:
//! - predict `f(x)` for a candidate (for residuals and scoring)
//! - fill a Jacobian row `∂f/∂(a, b, c, d)` at `x` (for derivative-based callers)
//!
//! Neither clamps: overflow and NaN propagate as IEEE-754 values.

use crate::domain::{Candidate, PARAM_COUNT};

/// Predict `f(x)` for the given candidate.
#[inline]
pub fn predict(candidate: &Candidate, x: f64) -> f64 {
    let Candidate { a, b, c, d } = *candidate;
    a * (b - x).sin() + c * (x * x) + d
}

/// Residual `f(x) − y`.
#[inline]
pub fn residual(candidate: &Candidate, x: f64, y: f64) -> f64 {
    predict(candidate, x) - y
}

/// Fill the partial derivatives of `f(x)` with respect to `(a, b, c, d)`.
///
/// The residual `f(x) − y` has the same derivatives since `y` is constant.
pub fn fill_jacobian_row(candidate: &Candidate, x: f64, out: &mut [f64; PARAM_COUNT]) {
    let phase = candidate.b - x;
    out[0] = phase.sin();
    out[1] = candidate.a * phase.cos();
    out[2] = x * x;
    out[3] = 1.0;
}
