//! Synthetic instance generation from a known candidate.

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;
use serde::{Deserialize, Serialize};

use crate::domain::Candidate;
use crate::error::{FitError, FitResult};
use crate::io::Instance;
use crate::models::predict;

/// Largest sample `generate_sample` will allocate for.
pub const MAX_SAMPLE_COUNT: usize = 10_000_000;

/// How to synthesize observations.
///
/// `x` is drawn uniformly from `[x_min, x_max]`; `y = f(x) + ε` with
/// `ε ~ N(0, noise_std)` under the `truth` candidate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SampleConfig {
    pub truth: Candidate,
    pub count: usize,
    pub x_min: f64,
    pub x_max: f64,
    pub noise_std: f64,
    pub seed: u64,
}

impl SampleConfig {
    /// Noise-free sample over `[-10, 10]` with seed 42.
    pub fn new(truth: Candidate, count: usize) -> Self {
        Self {
            truth,
            count,
            x_min: -10.0,
            x_max: 10.0,
            noise_std: 0.0,
            seed: 42,
        }
    }

    pub fn validate(&self) -> FitResult<()> {
        if self.count > MAX_SAMPLE_COUNT {
            return Err(FitError::invalid_argument(format!(
                "sample count {} exceeds the maximum of {MAX_SAMPLE_COUNT}",
                self.count
            )));
        }
        if !(self.x_min.is_finite() && self.x_max.is_finite() && self.x_min <= self.x_max) {
            return Err(FitError::invalid_argument(format!(
                "invalid sample x range: [{}, {}]",
                self.x_min, self.x_max
            )));
        }
        // Uniform sampling scales the width by 1 / (1 - ε); that must stay finite.
        if !((self.x_max - self.x_min) / (1.0 - f64::EPSILON)).is_finite() {
            return Err(FitError::invalid_argument(format!(
                "sample x range [{}, {}] is too wide",
                self.x_min, self.x_max
            )));
        }
        if !(self.noise_std.is_finite() && self.noise_std >= 0.0) {
            return Err(FitError::invalid_argument(format!(
                "noise standard deviation must be finite and >= 0, got {}",
                self.noise_std
            )));
        }
        Ok(())
    }
}

/// Generate a reproducible instance from `config`.
pub fn generate_sample(config: &SampleConfig) -> FitResult<Instance> {
    config.validate()?;

    let mut rng = StdRng::seed_from_u64(config.seed);
    let noise = Normal::new(0.0, config.noise_std)
        .map_err(|e| FitError::invalid_argument(format!("noise distribution error: {e}")))?;

    let mut inputs = Vec::with_capacity(config.count);
    let mut outputs = Vec::with_capacity(config.count);

    for _ in 0..config.count {
        let x = rng.gen_range(config.x_min..=config.x_max);
        let y = predict(&config.truth, x) + noise.sample(&mut rng);
        inputs.push(x);
        outputs.push(y);
    }

    tracing::debug!(
        count = config.count,
        seed = config.seed,
        noise_std = config.noise_std,
        "generated synthetic instance"
    );

    Ok(Instance { inputs, outputs })
}
