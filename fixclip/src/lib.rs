//! Fixed-point polygon clipping and offsetting.
//!
//! All geometry is processed in a scaled integer coordinate space ([core::math::IntPoint]) so that
//! boolean operations are exact and deterministic. [scale::ScaleFactor] converts between the
//! caller's floating point coordinates and the integer space, [path] holds the integer path types
//! and the canonical operations ([path::clip], [path::offset], [path::simplify], etc.), and
//! [vector] wraps those operations for floating point paths.
//!
//! # Examples
//!
//! ```
//! use fixclip::path::*;
//! use fixclip::path_closed;
//!
//! let a = PathSet::from_paths(vec![path_closed![(0, 0), (10, 0), (10, 10), (0, 10)]]);
//! let b = PathSet::from_paths(vec![path_closed![(5, 5), (15, 5), (15, 15), (5, 15)]]);
//! let result = clip(&a, &b, ClipOperation::Intersection, FillRule::EvenOdd, false).unwrap();
//! assert_eq!(result.len(), 1);
//! assert_eq!(result[0].signed_area(), 25.0);
//! ```
#[macro_use]
mod macros;
pub mod core;
pub mod error;
pub mod path;
pub mod scale;
pub mod vector;

pub use error::{ClipError, Result};
pub use static_aabb2d_index;
pub use static_aabb2d_index::AABB;
