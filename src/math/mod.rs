//! Numeric utilities.

pub mod summation;

pub use summation::*;
