//! Optional-argument construction of a [`FitProblem`].
//!
//! Callers supply either an instance source or both observation arrays. When
//! an instance source is present it wins and any explicit arrays are ignored.

use std::path::PathBuf;

use crate::domain::CandidateBounds;
use crate::error::{FitError, FitResult};
use crate::fit::problem::FitProblem;
use crate::io::{Instance, read_instance};

#[derive(Debug, Clone)]
enum InstanceSource {
    Text(String),
    File(PathBuf),
    Parsed(Instance),
}

#[derive(Debug, Clone, Default)]
pub struct FitProblemBuilder {
    inputs: Option<Vec<f64>>,
    outputs: Option<Vec<f64>>,
    source: Option<InstanceSource>,
    bounds: CandidateBounds,
}

impl FitProblemBuilder {
    pub fn inputs(mut self, inputs: impl Into<Vec<f64>>) -> Self {
        self.inputs = Some(inputs.into());
        self
    }

    pub fn outputs(mut self, outputs: impl Into<Vec<f64>>) -> Self {
        self.outputs = Some(outputs.into());
        self
    }

    pub fn instance_text(mut self, text: impl Into<String>) -> Self {
        self.source = Some(InstanceSource::Text(text.into()));
        self
    }

    pub fn instance_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.source = Some(InstanceSource::File(path.into()));
        self
    }

    pub fn instance(mut self, instance: Instance) -> Self {
        self.source = Some(InstanceSource::Parsed(instance));
        self
    }

    /// Domain for random candidates (default `[-100, 100]`).
    pub fn bounds(mut self, bounds: CandidateBounds) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn build(self) -> FitResult<FitProblem> {
        let instance = match self.source {
            Some(InstanceSource::Text(text)) => Instance::parse(&text)?,
            Some(InstanceSource::File(path)) => read_instance(&path)?,
            Some(InstanceSource::Parsed(instance)) => instance,
            None => match (self.inputs, self.outputs) {
                (Some(inputs), Some(outputs)) => Instance::new(inputs, outputs)?,
                _ => {
                    return Err(FitError::invalid_argument(
                        "either an instance source or both inputs and outputs must be provided",
                    ));
                }
            },
        };
        let (inputs, outputs) = instance.into_parts();
        FitProblem::from_parts(inputs, outputs, self.bounds)
    }
}
