//! Core math for the fixed point space: integer points, exact predicates and rounding, plus the
//! floating point vector type used at the boundary.
mod base_math;
mod int_point;
mod vector2;

pub use base_math::*;
pub use int_point::IntPoint;
pub use vector2::{vec2, Vector2};
