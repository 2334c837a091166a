//! Shared domain types.
//!
//! These types are intentionally small and serializable so they can be:
//!
//! - passed across the objective boundary by value
//! - logged or exported by an embedding application
//! - reloaded later to re-score a stored candidate

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{FitError, FitResult};

/// Number of model parameters `(a, b, c, d)`.
pub const PARAM_COUNT: usize = 4;

/// Default lower bound of the random-candidate domain.
pub const DEFAULT_LOW: f64 = -100.0;

/// Default upper bound of the random-candidate domain.
pub const DEFAULT_HIGH: f64 = 100.0;

/// One `(x, y)` observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub x: f64,
    pub y: f64,
}

/// Candidate parameters for `f(x) = a·sin(b − x) + c·x² + d`.
///
/// The four-element shape is part of the type, so the typed scoring path
/// never needs to check arity. Values are not restricted: non-finite
/// parameters are accepted and simply propagate into the score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
}

impl Candidate {
    pub const fn new(a: f64, b: f64, c: f64, d: f64) -> Self {
        Self { a, b, c, d }
    }

    pub fn to_array(self) -> [f64; PARAM_COUNT] {
        [self.a, self.b, self.c, self.d]
    }

    pub fn is_finite(&self) -> bool {
        self.to_array().iter().all(|v| v.is_finite())
    }
}

impl From<[f64; PARAM_COUNT]> for Candidate {
    fn from([a, b, c, d]: [f64; PARAM_COUNT]) -> Self {
        Self { a, b, c, d }
    }
}

impl From<Candidate> for [f64; PARAM_COUNT] {
    fn from(value: Candidate) -> Self {
        value.to_array()
    }
}

impl TryFrom<&[f64]> for Candidate {
    type Error = FitError;

    /// Accept exactly four values; never truncate or pad.
    fn try_from(values: &[f64]) -> FitResult<Self> {
        let array: [f64; PARAM_COUNT] = values.try_into().map_err(|_| {
            FitError::invalid_argument(format!(
                "candidate must have exactly {PARAM_COUNT} parameters [a, b, c, d], got {}",
                values.len()
            ))
        })?;
        Ok(Self::from(array))
    }
}

impl FromStr for Candidate {
    type Err = FitError;

    /// Parse `"a b c d"` (whitespace and/or comma separated).
    fn from_str(s: &str) -> FitResult<Self> {
        let values = s
            .split(|ch: char| ch == ',' || ch.is_whitespace())
            .filter(|tok| !tok.is_empty())
            .map(|tok| {
                tok.parse::<f64>().map_err(|_| {
                    FitError::invalid_argument(format!(
                        "candidate parameter '{tok}' is not a number"
                    ))
                })
            })
            .collect::<FitResult<Vec<f64>>>()?;
        Self::try_from(values.as_slice())
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.a, self.b, self.c, self.d)
    }
}

/// Closed interval `[low, high]` that random candidates are drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CandidateBounds {
    pub low: f64,
    pub high: f64,
}

impl CandidateBounds {
    pub fn new(low: f64, high: f64) -> FitResult<Self> {
        let bounds = Self { low, high };
        bounds.validate()?;
        Ok(bounds)
    }

    /// Bounds must be finite with `low <= high`, and the width `high - low`
    /// must stay finite after uniform sampling scales it by `1 / (1 - ε)`.
    pub fn validate(&self) -> FitResult<()> {
        if !(self.low.is_finite() && self.high.is_finite() && self.low <= self.high) {
            return Err(FitError::invalid_argument(format!(
                "invalid candidate bounds: low={}, high={} (must be finite and low <= high)",
                self.low, self.high
            )));
        }
        if !((self.high - self.low) / (1.0 - f64::EPSILON)).is_finite() {
            return Err(FitError::invalid_argument(format!(
                "invalid candidate bounds: width of [{}, {}] overflows",
                self.low, self.high
            )));
        }
        Ok(())
    }

    pub fn contains(&self, candidate: &Candidate) -> bool {
        candidate
            .to_array()
            .iter()
            .all(|v| (self.low..=self.high).contains(v))
    }
}

impl Default for CandidateBounds {
    fn default() -> Self {
        Self {
            low: DEFAULT_LOW,
            high: DEFAULT_HIGH,
        }
    }
}
