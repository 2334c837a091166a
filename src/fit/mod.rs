//! The fitting objective.
//!
//! Responsibilities:
//!
//! - construct a problem from arrays or instance text (`problem`, `builder`)
//! - score candidates, singly or as a parallel population
//! - draw random candidates from a bounded domain (`sampler`)

pub mod builder;
pub mod problem;
pub mod sampler;

pub use builder::*;
pub use problem::*;
pub use sampler::*;
