//! Domain types used throughout the crate.
//!
//! This module defines:
//!
//! - observations and candidate parameter vectors (`Observation`, `Candidate`)
//! - the random-candidate domain (`CandidateBounds`)
//! - sampling configuration (`SamplingConfig`)

pub mod config;
pub mod types;

pub use config::*;
pub use types::*;
