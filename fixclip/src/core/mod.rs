//! Core module has the shared math types, integer arithmetic helpers and numeric traits.
pub mod math;
pub mod traits;
