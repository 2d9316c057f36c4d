//! Core numeric traits used for the floating point side of fixclip.
mod fuzzy_eq;
mod real;

pub use fuzzy_eq::FuzzyEq;
pub use real::Real;
