//! Floating point facade over the integer operations.
//!
//! Every function here scales its input with one [ScaleFactor](crate::scale::ScaleFactor), runs
//! the integer operation from [crate::path] and unscales the result.
mod vector_ops;
mod vector_path;

pub use vector_ops::*;
pub use vector_path::VectorPath;
