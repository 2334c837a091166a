//! The sinusoid-plus-quadratic model.
//!
//! The model is implemented as small, pure functions so that the objective and
//! reporting code can stay simple.

pub mod model;

pub use model::*;
