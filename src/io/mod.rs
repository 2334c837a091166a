//! Input/output helpers.
//!
//! - instance text parse/format + file read/write (`instance`)

pub mod instance;

pub use instance::*;
