//! The curve-fitting objective.
//!
//! Given:
//! - inputs `x_i`
//! - observed outputs `y_i`
//! - a candidate `(a, b, c, d)`
//!
//! we compute, for the candidate:
//! - the prediction `f(x_i) = a·sin(b − x_i) + c·x_i² + d`
//! - the resulting SSE `Σ (f(x_i) − y_i)²`
//!
//! The observation set is fixed at construction and read-only afterwards, so a
//! `FitProblem` can be shared across threads and scored concurrently.

use std::path::Path;
use std::str::FromStr;

use nalgebra::{DMatrix, DVector, Vector4};
use rand::Rng;
use rayon::prelude::*;

use crate::domain::{Candidate, CandidateBounds, Observation, PARAM_COUNT};
use crate::error::{FitError, FitResult};
use crate::fit::builder::FitProblemBuilder;
use crate::fit::sampler::draw_candidate;
use crate::io::{Instance, read_instance};
use crate::math::CompensatedSum;
use crate::models::{fill_jacobian_row, residual};

/// Observations below this count cannot pin down all four parameters.
const MIN_WELL_POSED: usize = PARAM_COUNT;

/// An immutable observation set plus the fixed model.
#[derive(Debug, Clone, PartialEq)]
pub struct FitProblem {
    inputs: Vec<f64>,
    outputs: Vec<f64>,
    bounds: CandidateBounds,
}

impl FitProblem {
    /// Build from explicit, index-aligned observation arrays.
    pub fn new(inputs: Vec<f64>, outputs: Vec<f64>) -> FitResult<Self> {
        Self::from_parts(inputs, outputs, CandidateBounds::default())
    }

    pub fn builder() -> FitProblemBuilder {
        FitProblemBuilder::default()
    }

    pub fn from_instance(instance: Instance) -> FitResult<Self> {
        let (inputs, outputs) = instance.into_parts();
        Self::new(inputs, outputs)
    }

    /// Parse instance text (see [`crate::io::instance`] for the format).
    pub fn from_instance_str(text: &str) -> FitResult<Self> {
        Self::from_instance(Instance::parse(text)?)
    }

    pub fn from_instance_file(path: impl AsRef<Path>) -> FitResult<Self> {
        Self::from_instance(read_instance(path.as_ref())?)
    }

    pub(crate) fn from_parts(
        inputs: Vec<f64>,
        outputs: Vec<f64>,
        bounds: CandidateBounds,
    ) -> FitResult<Self> {
        if inputs.len() != outputs.len() {
            return Err(FitError::invalid_argument(format!(
                "the number of inputs ({}) must equal the number of outputs ({})",
                inputs.len(),
                outputs.len()
            )));
        }
        bounds.validate()?;

        if inputs.len() < MIN_WELL_POSED {
            tracing::warn!(
                nb_observations = inputs.len(),
                "fewer observations than model parameters; the fit is underdetermined"
            );
        }

        Ok(Self {
            inputs,
            outputs,
            bounds,
        })
    }

    pub fn nb_observations(&self) -> usize {
        self.inputs.len()
    }

    pub fn inputs(&self) -> &[f64] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[f64] {
        &self.outputs
    }

    /// Domain that [`FitProblem::random_candidate`] draws from.
    pub fn bounds(&self) -> CandidateBounds {
        self.bounds
    }

    pub fn observations(&self) -> impl Iterator<Item = Observation> + '_ {
        self.inputs
            .iter()
            .zip(&self.outputs)
            .map(|(&x, &y)| Observation { x, y })
    }

    pub fn to_instance(&self) -> Instance {
        Instance {
            inputs: self.inputs.clone(),
            outputs: self.outputs.clone(),
        }
    }

    /// Sum of squared errors for `candidate`.
    ///
    /// Returns `0.0` for an empty observation set. Overflow and NaN are not
    /// errors; they propagate into the returned total.
    pub fn evaluate(&self, candidate: &Candidate) -> f64 {
        let mut sse = CompensatedSum::new();
        for obs in self.observations() {
            let err = residual(candidate, obs.x, obs.y);
            sse.add(err * err);
        }
        sse.total()
    }

    /// Score an untyped parameter slice.
    ///
    /// # Errors
    /// Returns [`FitError::InvalidArgument`] unless `params` holds exactly
    /// four values.
    pub fn evaluate_slice(&self, params: &[f64]) -> FitResult<f64> {
        let candidate = Candidate::try_from(params)?;
        Ok(self.evaluate(&candidate))
    }

    /// Score a population in parallel. Output order matches `candidates`.
    pub fn evaluate_many(&self, candidates: &[Candidate]) -> Vec<f64> {
        let _span = tracing::trace_span!("evaluate_many", population = candidates.len()).entered();
        candidates.par_iter().map(|c| self.evaluate(c)).collect()
    }

    /// Draw four independent values uniformly from the closed interval
    /// [`FitProblem::bounds`] (default `[-100, 100]`).
    pub fn random_candidate<R: Rng>(&self, rng: &mut R) -> Candidate {
        draw_candidate(&self.bounds, rng)
    }

    /// Residual vector `r_i = f(x_i) − y_i`.
    pub fn residuals(&self, candidate: &Candidate) -> DVector<f64> {
        DVector::from_iterator(
            self.nb_observations(),
            self.observations().map(|obs| residual(candidate, obs.x, obs.y)),
        )
    }

    /// `n × 4` Jacobian of the residuals with respect to `(a, b, c, d)`.
    pub fn jacobian(&self, candidate: &Candidate) -> DMatrix<f64> {
        let mut jac = DMatrix::zeros(self.nb_observations(), PARAM_COUNT);
        let mut row = [0.0; PARAM_COUNT];
        for (i, &x) in self.inputs.iter().enumerate() {
            fill_jacobian_row(candidate, x, &mut row);
            for (k, value) in row.iter().enumerate() {
                jac[(i, k)] = *value;
            }
        }
        jac
    }

    /// Gradient of the SSE, `2·Jᵀr`.
    pub fn gradient(&self, candidate: &Candidate) -> Vector4<f64> {
        if self.inputs.is_empty() {
            return Vector4::zeros();
        }
        let g = self.jacobian(candidate).tr_mul(&self.residuals(candidate)) * 2.0;
        Vector4::new(g[0], g[1], g[2], g[3])
    }
}

impl FromStr for FitProblem {
    type Err = FitError;

    fn from_str(s: &str) -> FitResult<Self> {
        Self::from_instance_str(s)
    }
}

impl TryFrom<Instance> for FitProblem {
    type Error = FitError;

    fn try_from(instance: Instance) -> FitResult<Self> {
        Self::from_instance(instance)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn problem(inputs: &[f64], outputs: &[f64]) -> FitProblem {
        FitProblem::new(inputs.to_vec(), outputs.to_vec()).unwrap()
    }

    #[test]
    fn nb_observations_matches_length() {
        let p = problem(&[0.0, 1.0, 2.0, 3.0, 4.0], &[1.0; 5]);
        assert_eq!(p.nb_observations(), 5);
        assert_eq!(p.inputs().len(), p.outputs().len());
    }

    #[test]
    fn mismatched_lengths_are_invalid() {
        let err = FitProblem::new(vec![0.0, 1.0], vec![1.0]).unwrap_err();
        assert!(matches!(err, FitError::InvalidArgument(_)));
    }

    #[test]
    fn constant_fixture_scores_zero() {
        let p = problem(&[0.0, 1.0], &[1.0, 1.0]);
        assert_eq!(p.evaluate(&Candidate::new(0.0, 0.0, 0.0, 1.0)), 0.0);
    }

    #[test]
    fn sine_fixture_scores_zero() {
        let p = problem(&[0.0], &[0.0]);
        assert_eq!(p.evaluate(&Candidate::new(1.0, 0.0, 0.0, 0.0)), 0.0);
    }

    #[test]
    fn quadratic_fixture_scores_sixteen() {
        let p = problem(&[2.0], &[0.0]);
        assert_eq!(p.evaluate(&Candidate::new(0.0, 0.0, 1.0, 0.0)), 16.0);
    }

    #[test]
    fn empty_set_scores_zero() {
        let p = problem(&[], &[]);
        assert_eq!(p.nb_observations(), 0);
        for c in [
            Candidate::new(1.0, 2.0, 3.0, 4.0),
            Candidate::new(-100.0, 100.0, 0.5, f64::MAX),
        ] {
            assert_eq!(p.evaluate(&c), 0.0);
        }
    }

    #[test]
    fn evaluation_is_deterministic() {
        let p = problem(&[-3.0, -0.5, 0.25, 1.0, 7.5], &[2.0, -1.0, 0.0, 3.3, 40.0]);
        let c = Candidate::new(1.7, -0.3, 0.6, -2.1);
        let first = p.evaluate(&c);
        for _ in 0..10 {
            assert_eq!(p.evaluate(&c).to_bits(), first.to_bits());
        }
    }

    #[test]
    fn sums_squared_errors() {
        // errors: f(0)=2 vs 1 -> 1, f(1)=3 vs 5 -> -2
        let p = problem(&[0.0, 1.0], &[1.0, 5.0]);
        let c = Candidate::new(0.0, 0.0, 1.0, 2.0);
        assert_relative_eq!(p.evaluate(&c), 5.0);
    }

    #[test]
    fn overflow_propagates_as_infinity() {
        let p = problem(&[1e200], &[0.0]);
        assert_eq!(p.evaluate(&Candidate::new(0.0, 0.0, 1.0, 0.0)), f64::INFINITY);
    }

    #[test]
    fn nan_parameters_propagate() {
        let p = problem(&[1.0], &[0.0]);
        assert!(p.evaluate(&Candidate::new(f64::NAN, 0.0, 0.0, 0.0)).is_nan());
    }

    #[test]
    fn slice_requires_four_parameters() {
        let p = problem(&[2.0], &[0.0]);
        assert_eq!(p.evaluate_slice(&[0.0, 0.0, 1.0, 0.0]).unwrap(), 16.0);
        for bad in [&[0.0, 0.0, 1.0][..], &[0.0; 5][..], &[][..]] {
            assert!(matches!(p.evaluate_slice(bad), Err(FitError::InvalidArgument(_))));
        }
    }

    #[test]
    fn evaluate_many_matches_sequential() {
        let p = problem(&[0.0, 0.5, 1.0, 1.5, 2.0], &[0.3, -0.2, 1.1, 2.0, 4.2]);
        let mut rng = StdRng::seed_from_u64(5);
        let population: Vec<Candidate> = (0..64).map(|_| p.random_candidate(&mut rng)).collect();
        let scores = p.evaluate_many(&population);
        assert_eq!(scores.len(), population.len());
        for (c, s) in population.iter().zip(&scores) {
            assert_eq!(s.to_bits(), p.evaluate(c).to_bits());
        }
    }

    #[test]
    fn random_candidate_within_default_bounds() {
        let p = problem(&[0.0], &[0.0]);
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..1000 {
            let c = p.random_candidate(&mut rng);
            assert_eq!(c.to_array().len(), 4);
            assert!(c.to_array().iter().all(|v| (-100.0..=100.0).contains(v)));
        }
    }

    #[test]
    fn random_candidate_is_reproducible_with_seed() {
        let p = problem(&[0.0], &[0.0]);
        let a = p.random_candidate(&mut StdRng::seed_from_u64(99));
        let b = p.random_candidate(&mut StdRng::seed_from_u64(99));
        assert_eq!(a, b);
    }

    #[test]
    fn parses_instance_text() {
        let p: FitProblem = "2\n0 1\n1 1\n".parse().unwrap();
        assert_eq!(p.nb_observations(), 2);
        assert_eq!(p.evaluate(&Candidate::new(0.0, 0.0, 0.0, 1.0)), 0.0);
    }

    #[test]
    fn instance_count_mismatch_is_format_error() {
        let err = FitProblem::from_instance_str("3\n0 1\n1 1\n").unwrap_err();
        assert!(matches!(err, FitError::Format(_)));
    }

    #[test]
    fn residuals_and_jacobian_shapes() {
        let p = problem(&[0.0, 1.0, 2.0], &[0.0, 0.0, 0.0]);
        let c = Candidate::new(0.0, 0.0, 1.0, 0.0);
        let r = p.residuals(&c);
        assert_eq!(r.len(), 3);
        assert_eq!(r[2], 4.0);

        let j = p.jacobian(&c);
        assert_eq!(j.shape(), (3, 4));
        assert_eq!(j[(2, 2)], 4.0);
        assert_eq!(j[(1, 3)], 1.0);
    }

    #[test]
    fn gradient_matches_finite_difference() {
        let p = problem(&[-1.0, 0.0, 0.7, 1.4, 3.0], &[0.5, 1.0, -0.2, 2.0, 8.5]);
        let c = Candidate::new(0.8, 0.3, 0.9, -0.4);
        let g = p.gradient(&c);

        let h = 1e-6;
        for k in 0..PARAM_COUNT {
            let mut plus = c.to_array();
            let mut minus = c.to_array();
            plus[k] += h;
            minus[k] -= h;
            let fd = (p.evaluate(&plus.into()) - p.evaluate(&minus.into())) / (2.0 * h);
            assert_relative_eq!(g[k], fd, epsilon = 1e-5, max_relative = 1e-6);
        }
    }

    #[test]
    fn gradient_of_empty_problem_is_zero() {
        let p = problem(&[], &[]);
        assert_eq!(p.gradient(&Candidate::new(1.0, 2.0, 3.0, 4.0)), Vector4::zeros());
    }
}
