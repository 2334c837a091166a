//! Random candidate generation.

use rand::Rng;
use rand::rngs::StdRng;

use crate::domain::{Candidate, CandidateBounds, SamplingConfig};
use crate::error::FitResult;

/// Draw each parameter independently from `[low, high]`.
///
/// `bounds` must already be validated; `gen_range` panics on an inverted range.
pub(crate) fn draw_candidate<R: Rng>(bounds: &CandidateBounds, rng: &mut R) -> Candidate {
    let range = bounds.low..=bounds.high;
    Candidate::new(
        rng.gen_range(range.clone()),
        rng.gen_range(range.clone()),
        rng.gen_range(range.clone()),
        rng.gen_range(range),
    )
}

/// Owned random source plus domain, for callers that want a handle rather
/// than threading an RNG through every call.
///
/// Also an infinite iterator of candidates.
#[derive(Debug, Clone)]
pub struct CandidateSampler<R = StdRng> {
    bounds: CandidateBounds,
    rng: R,
}

impl CandidateSampler<StdRng> {
    pub fn from_config(config: &SamplingConfig) -> FitResult<Self> {
        Self::new(config.bounds, config.rng())
    }
}

impl<R: Rng> CandidateSampler<R> {
    pub fn new(bounds: CandidateBounds, rng: R) -> FitResult<Self> {
        bounds.validate()?;
        Ok(Self { bounds, rng })
    }

    pub fn bounds(&self) -> CandidateBounds {
        self.bounds
    }

    pub fn sample(&mut self) -> Candidate {
        draw_candidate(&self.bounds, &mut self.rng)
    }
}

impl<R: Rng> Iterator for CandidateSampler<R> {
    type Item = Candidate;

    fn next(&mut self) -> Option<Candidate> {
        Some(self.sample())
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;
    use crate::error::FitError;

    #[test]
    fn samples_stay_in_bounds() {
        let bounds = CandidateBounds::new(-1.0, 2.0).unwrap();
        let sampler = CandidateSampler::new(bounds, StdRng::seed_from_u64(3)).unwrap();
        for c in sampler.take(500) {
            assert!(bounds.contains(&c), "{c} outside {bounds:?}");
        }
    }

    #[test]
    fn degenerate_interval_yields_constant() {
        let bounds = CandidateBounds::new(4.0, 4.0).unwrap();
        let mut sampler = CandidateSampler::new(bounds, StdRng::seed_from_u64(0)).unwrap();
        assert_eq!(sampler.sample(), Candidate::new(4.0, 4.0, 4.0, 4.0));
    }

    #[test]
    fn draws_are_not_all_equal() {
        let mut sampler =
            CandidateSampler::new(CandidateBounds::default(), StdRng::seed_from_u64(17)).unwrap();
        let c = sampler.sample();
        let v = c.to_array();
        assert!(v.iter().any(|x| *x != v[0]));
    }

    #[test]
    fn same_seed_same_sequence() {
        let config = SamplingConfig {
            seed: Some(2024),
            ..SamplingConfig::default()
        };
        let a: Vec<Candidate> = CandidateSampler::from_config(&config)
            .unwrap()
            .take(8)
            .collect();
        let b: Vec<Candidate> = CandidateSampler::from_config(&config)
            .unwrap()
            .take(8)
            .collect();
        assert_eq!(a, b);
    }

    #[test]
    fn rejects_invalid_bounds() {
        let bounds = CandidateBounds { low: 1.0, high: 0.0 };
        let err = CandidateSampler::new(bounds, StdRng::seed_from_u64(0)).unwrap_err();
        assert!(matches!(err, FitError::InvalidArgument(_)));
    }

    #[test]
    fn wide_bounds_sample_without_overflow() {
        let bounds = CandidateBounds::new(-1e307, 1e307).unwrap();
        let mut sampler = CandidateSampler::new(bounds, StdRng::seed_from_u64(9)).unwrap();
        for _ in 0..100 {
            let c = sampler.sample();
            assert!(c.is_finite() && bounds.contains(&c));
        }
    }

    #[test]
    fn rejects_bounds_whose_width_overflows() {
        let bounds = CandidateBounds {
            low: -f64::MAX,
            high: f64::MAX,
        };
        let err = CandidateSampler::new(bounds, StdRng::seed_from_u64(0)).unwrap_err();
        assert!(matches!(err, FitError::InvalidArgument(_)));
    }
}
