//! Reporting utilities: residuals and fit summary.

use serde::{Deserialize, Serialize};

use crate::domain::{Candidate, Observation};
use crate::fit::FitProblem;
use crate::math::compensated_sum;
use crate::models::predict;

/// Prediction and residual for one observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObservationResidual {
    pub observation: Observation,
    pub y_fit: f64,
    /// `y_fit − y`.
    pub residual: f64,
}

/// Aggregate fit quality for a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitSummary {
    pub candidate: Candidate,
    pub sse: f64,
    pub rmse: f64,
    pub max_abs_residual: f64,
    pub n: usize,
}

/// Compute fitted values and residuals for each observation, in order.
pub fn compute_residuals(problem: &FitProblem, candidate: &Candidate) -> Vec<ObservationResidual> {
    problem
        .observations()
        .map(|observation| {
            let y_fit = predict(candidate, observation.x);
            ObservationResidual {
                observation,
                y_fit,
                residual: y_fit - observation.y,
            }
        })
        .collect()
}

/// Summarize how well `candidate` fits `problem`.
///
/// An empty problem reports zero for every statistic.
pub fn summarize(problem: &FitProblem, candidate: &Candidate) -> FitSummary {
    let residuals = compute_residuals(problem, candidate);
    let n = residuals.len();
    let sse = compensated_sum(residuals.iter().map(|r| r.residual * r.residual));
    let rmse = if n == 0 { 0.0 } else { (sse / n as f64).sqrt() };
    let max_abs_residual = residuals
        .iter()
        .map(|r| r.residual.abs())
        .fold(0.0, f64::max);

    FitSummary {
        candidate: *candidate,
        sse,
        rmse,
        max_abs_residual,
        n,
    }
}
