//! Enumerations and option structs shared by the clipping, offsetting and query operations.
use crate::error::{ClipError, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Rule deciding which regions enclosed by (possibly self intersecting) closed paths count as
/// inside.
///
/// The winding number of a region is the signed count of boundary crossings, counter clockwise
/// edges contributing `+1`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum FillRule {
    /// Inside if the winding number is odd.
    #[default]
    EvenOdd,
    /// Inside if the winding number is not zero.
    NonZero,
    /// Inside if the winding number is greater than zero.
    Positive,
    /// Inside if the winding number is less than zero.
    Negative,
}

/// Boolean operation applied between the subject and clip regions.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ClipOperation {
    /// Inside both subject and clip.
    Intersection,
    /// Inside subject or clip.
    Union,
    /// Inside subject but not inside clip.
    Difference,
    /// Inside exactly one of subject and clip.
    Xor,
}

/// Role of a path handed to the clipping engine.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PathRole {
    Subject,
    Clip,
}

/// Corner treatment used when offsetting.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum JoinStyle {
    /// Offset edges are extended to meet, sharp corners are cut square at `delta` past the
    /// vertex.
    #[default]
    Square,
    /// Corners are approximated by circular arcs.
    Round,
    /// Offset edges are extended to meet, bounded by the miter limit.
    Miter,
}

/// Treatment of path ends when offsetting.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum EndStyle {
    /// Path is a polygon, only the outward (or inward for negative delta) side is offset.
    #[default]
    ClosedPolygon,
    /// Path is a closed line, both sides are offset into a band.
    ClosedLine,
    /// Open path with flat ends at the terminus.
    OpenButt,
    /// Open path with flat ends extended by `delta`.
    OpenSquare,
    /// Open path with semicircular ends.
    OpenRound,
}

impl EndStyle {
    /// Returns `true` for the styles that treat the path as a closed ring.
    #[inline]
    pub fn is_closed(&self) -> bool {
        matches!(self, EndStyle::ClosedPolygon | EndStyle::ClosedLine)
    }
}

/// Result of classifying a point against a polygon.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PointContainment {
    Outside,
    Inside,
    /// Point lies exactly on a vertex or edge.
    OnBoundary,
}

/// Offset distance and join parameters.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct OffsetConfig {
    /// Signed offset distance in the units of the path set being offset. Positive grows closed
    /// polygons, negative shrinks them.
    pub delta: f64,
    /// Bound on the miter length for [JoinStyle::Miter] as a multiple of `delta`. Values below 2
    /// behave as 2. Must be positive.
    pub miter_limit: f64,
    /// Maximum distance between a round join or cap arc and its polygonal approximation, in the
    /// same units as `delta`. Zero or negative selects a fixed fine tolerance.
    pub arc_tolerance: f64,
}

impl OffsetConfig {
    /// Default values: zero delta, miter limit 2 and the automatic arc tolerance.
    #[inline]
    pub fn new() -> Self {
        Self {
            delta: 0.0,
            miter_limit: 2.0,
            arc_tolerance: 0.0,
        }
    }

    /// Defaults with the given `delta`.
    #[inline]
    pub fn with_delta(delta: f64) -> Self {
        Self {
            delta,
            ..Self::new()
        }
    }

    /// Validate the configuration values.
    pub fn validate(&self) -> Result<()> {
        if !self.delta.is_finite() {
            return Err(ClipError::config(format!(
                "offset delta must be finite, got {}",
                self.delta
            )));
        }
        if !self.miter_limit.is_finite() || self.miter_limit <= 0.0 {
            return Err(ClipError::config(format!(
                "miter limit must be a positive number, got {}",
                self.miter_limit
            )));
        }
        if !self.arc_tolerance.is_finite() {
            return Err(ClipError::config(format!(
                "arc tolerance must be finite, got {}",
                self.arc_tolerance
            )));
        }
        Ok(())
    }
}

impl Default for OffsetConfig {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

/// Additional options for offsetting.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct OffsetOptions {
    /// Self union each closed polygon (even odd) before offsetting to remove self intersections.
    pub simplify: bool,
    /// Reverse the orientation of every output path.
    pub reverse_output: bool,
}

impl OffsetOptions {
    /// Default values: simplify input polygons, keep output orientation.
    #[inline]
    pub fn new() -> Self {
        Self {
            simplify: true,
            reverse_output: false,
        }
    }
}

impl Default for OffsetOptions {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

/// Additional options for clipping.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ClipOptions {
    /// Fill rule for the clip paths, if `None` the subject fill rule is used.
    pub clip_fill: Option<FillRule>,
    /// Keep collinear vertices in the input and output.
    pub preserve_collinear: bool,
    /// Reverse the orientation of every closed output path (outer contours become clockwise).
    pub reverse_output: bool,
}

impl ClipOptions {
    /// Default values: clips share the subject fill rule, collinear points are removed and the
    /// output is not reversed.
    #[inline]
    pub fn new() -> Self {
        Self {
            clip_fill: None,
            preserve_collinear: false,
            reverse_output: false,
        }
    }
}

impl Default for ClipOptions {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}
