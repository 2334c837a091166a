//! `curve-fitting` library crate.
//!
//! Scores candidate parameters `(a, b, c, d)` of
//!
//! ```text
//! f(x) = a·sin(b − x) + c·x² + d
//! ```
//!
//! against a fixed set of `(x, y)` observations by sum of squared errors. An
//! external optimizer proposes candidates and reads back scores; this crate
//! only defines the objective and its data contract.
//!
//! ```
//! use curve_fitting::{Candidate, FitProblem};
//!
//! let problem: FitProblem = "1\n2 0\n".parse()?;
//! assert_eq!(problem.evaluate(&Candidate::new(0.0, 0.0, 1.0, 0.0)), 16.0);
//! # Ok::<(), curve_fitting::FitError>(())
//! ```

pub mod data;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod math;
pub mod models;
pub mod report;

pub use domain::{Candidate, CandidateBounds, Observation, SamplingConfig};
pub use error::{ErrorKind, FitError, FitResult};
pub use fit::{CandidateSampler, FitProblem, FitProblemBuilder};
pub use io::Instance;
