//! Synthetic observation data.

pub mod sample;

pub use sample::*;
