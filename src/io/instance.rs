//! Instance text parsing and formatting.
//!
//! An instance is a whitespace-delimited token stream:
//!
//! ```text
//! <n>
//! <x1> <y1>
//! ...
//! <xn> <yn>
//! ```
//!
//! Line layout is irrelevant; only the token sequence matters.
//!
//! Rules:
//! - **Every token is numeric.** A token that does not parse as `f64` is a
//!   format error naming the token and its 1-based position.
//! - **The count is integral.** `3` and `3.0` are both accepted; negative,
//!   fractional or non-finite counts are rejected.
//! - **Exact length.** The stream must hold exactly `1 + 2n` tokens.
//! - **Empty is valid.** `0` on its own yields an instance with no observations.
//!
//! An `Instance` always holds as many inputs as outputs; the fields are only
//! reachable through the checked [`Instance::new`].

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::Observation;
use crate::error::{FitError, FitResult};

/// A parsed observation set, index-aligned.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawInstance")]
pub struct Instance {
    pub(crate) inputs: Vec<f64>,
    pub(crate) outputs: Vec<f64>,
}

#[derive(Deserialize)]
struct RawInstance {
    inputs: Vec<f64>,
    outputs: Vec<f64>,
}

impl TryFrom<RawInstance> for Instance {
    type Error = FitError;

    fn try_from(raw: RawInstance) -> FitResult<Self> {
        Self::new(raw.inputs, raw.outputs)
    }
}

impl Instance {
    /// # Errors
    /// Returns [`FitError::InvalidArgument`] if the lengths differ.
    pub fn new(inputs: Vec<f64>, outputs: Vec<f64>) -> FitResult<Self> {
        if inputs.len() != outputs.len() {
            return Err(FitError::invalid_argument(format!(
                "the number of inputs ({}) must equal the number of outputs ({})",
                inputs.len(),
                outputs.len()
            )));
        }
        Ok(Self { inputs, outputs })
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

    pub fn into_parts(self) -> (Vec<f64>, Vec<f64>) {
        (self.inputs, self.outputs)
    }

    pub fn observations(&self) -> impl Iterator<Item = Observation> + '_ {
        self.inputs
            .iter()
            .zip(&self.outputs)
            .map(|(&x, &y)| Observation { x, y })
    }

    /// Parse instance text.
    pub fn parse(text: &str) -> FitResult<Self> {
        let values = text
            .split_whitespace()
            .enumerate()
            .map(|(idx, tok)| parse_token(idx + 1, tok))
            .collect::<FitResult<Vec<f64>>>()?;

        let (&declared, pairs) = values
            .split_first()
            .ok_or_else(|| FitError::format("missing observation count"))?;
        let n = parse_count(declared)?;

        let expected_len = n
            .checked_mul(2)
            .and_then(|v| v.checked_add(1))
            .ok_or_else(|| FitError::format(format!("observation count {n} is too large")))?;
        if values.len() != expected_len {
            return Err(FitError::format(format!(
                "expected {expected_len} numbers for {n} observations, got {}",
                values.len()
            )));
        }

        let (inputs, outputs) = pairs.chunks_exact(2).map(|pair| (pair[0], pair[1])).unzip();
        tracing::debug!(nb_observations = n, "parsed instance");

        Ok(Self { inputs, outputs })
    }
}

impl FromStr for Instance {
    type Err = FitError;

    fn from_str(s: &str) -> FitResult<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.nb_observations())?;
        for obs in self.observations() {
            writeln!(f, "{} {}", obs.x, obs.y)?;
        }
        Ok(())
    }
}

/// Read and parse an instance file.
pub fn read_instance(path: &Path) -> FitResult<Instance> {
    let text = fs::read_to_string(path).map_err(|source| FitError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), "reading instance file");
    Instance::parse(&text)
}

/// Write an instance file in the same text format.
pub fn write_instance(path: &Path, instance: &Instance) -> FitResult<()> {
    fs::write(path, instance.to_string()).map_err(|source| FitError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_token(position: usize, tok: &str) -> FitResult<f64> {
    tok.parse::<f64>()
        .map_err(|_| FitError::format(format!("token {position} ('{tok}') is not a number")))
}

fn parse_count(value: f64) -> FitResult<usize> {
    if !(value.is_finite() && value >= 0.0 && value.fract() == 0.0) || value > usize::MAX as f64 {
        return Err(FitError::format(format!(
            "observation count must be a non-negative integer, got {value}"
        )));
    }
    Ok(value as usize)
}
