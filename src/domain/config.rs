//! Sampling configuration.
//!
//! Controls where random candidates are drawn from and how the random source is
//! seeded. Values come from code, from serde (e.g. a JSON/TOML section of an
//! application config), or from the environment.

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::domain::CandidateBounds;
use crate::error::{FitError, FitResult};

pub const ENV_SEED: &str = "CURVE_FIT_SEED";
pub const ENV_LOW: &str = "CURVE_FIT_LOW";
pub const ENV_HIGH: &str = "CURVE_FIT_HIGH";

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    pub bounds: CandidateBounds,
    /// Seed for the random source. `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl SamplingConfig {
    /// Load from the process environment, reading a `.env` file first if one
    /// exists. Unset variables keep their defaults.
    pub fn from_env() -> FitResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup.
    pub fn from_vars<F>(lookup: F) -> FitResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_SEED) {
            let seed = raw.trim().parse::<u64>().map_err(|_| {
                FitError::invalid_argument(format!(
                    "{ENV_SEED} must be an unsigned integer, got '{raw}'"
                ))
            })?;
            config.seed = Some(seed);
        }
        if let Some(raw) = lookup(ENV_LOW) {
            config.bounds.low = parse_bound(ENV_LOW, &raw)?;
        }
        if let Some(raw) = lookup(ENV_HIGH) {
            config.bounds.high = parse_bound(ENV_HIGH, &raw)?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> FitResult<()> {
        self.bounds.validate()
    }

    /// Random source for this configuration.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

fn parse_bound(name: &str, raw: &str) -> FitResult<f64> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| FitError::invalid_argument(format!("{name} must be a number, got '{raw}'")))
}
