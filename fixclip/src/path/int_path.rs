use super::{queries, EndStyle, JoinStyle, PointContainment};
use crate::core::math::IntPoint;
use static_aabb2d_index::AABB;
use std::ops::{Index, IndexMut};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Ordered sequence of integer points, either an open polyline or a closed ring.
///
/// A closed path implicitly connects its last point back to its first, the first point is never
/// repeated at the end. `join` and `end` override the default styles passed to
/// [offset](crate::path::offset) for this path only.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Path {
    pub points: Vec<IntPoint>,
    pub is_closed: bool,
    pub join: Option<JoinStyle>,
    pub end: Option<EndStyle>,
}

impl Path {
    /// Create a new empty path.
    #[inline]
    pub fn new(is_closed: bool) -> Self {
        Path {
            points: Vec::new(),
            is_closed,
            join: None,
            end: None,
        }
    }

    /// Create a new empty path with `capacity` reserved.
    #[inline]
    pub fn with_capacity(capacity: usize, is_closed: bool) -> Self {
        Path {
            points: Vec::with_capacity(capacity),
            is_closed,
            join: None,
            end: None,
        }
    }

    /// Create a path from existing points.
    #[inline]
    pub fn from_points(points: Vec<IntPoint>, is_closed: bool) -> Self {
        Path {
            points,
            is_closed,
            join: None,
            end: None,
        }
    }

    /// Set the per path join style override.
    #[inline]
    pub fn with_join(mut self, join: JoinStyle) -> Self {
        self.join = Some(join);
        self
    }

    /// Set the per path end style override.
    #[inline]
    pub fn with_end(mut self, end: EndStyle) -> Self {
        self.end = Some(end);
        self
    }

    /// Append a point.
    #[inline]
    pub fn add(&mut self, x: i64, y: i64) {
        self.points.push(IntPoint::new(x, y));
    }

    #[inline]
    pub fn push(&mut self, pt: IntPoint) {
        self.points.push(pt);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, IntPoint> {
        self.points.iter()
    }

    #[inline]
    pub fn last(&self) -> Option<&IntPoint> {
        self.points.last()
    }

    /// Reverse the point order (flips orientation of a closed path).
    #[inline]
    pub fn reverse(&mut self) {
        self.points.reverse();
    }

    /// Index of the first point equal to `pt`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use fixclip::path_closed;
    /// # use fixclip::core::math::IntPoint;
    /// let path = path_closed![(0, 0), (4, 0), (4, 4), (4, 0)];
    /// assert_eq!(path.find_point(IntPoint::new(4, 0)), Some(1));
    /// assert_eq!(path.find_point(IntPoint::new(1, 1)), None);
    /// ```
    #[inline]
    pub fn find_point(&self, pt: IntPoint) -> Option<usize> {
        self.points.iter().position(|p| *p == pt)
    }

    /// Signed area (shoelace formula), positive when counter clockwise. See
    /// [signed_area](crate::path::signed_area).
    #[inline]
    pub fn signed_area(&self) -> f64 {
        queries::signed_area(self)
    }

    /// Classify `pt` against this path treated as a ring. See
    /// [point_in_polygon](crate::path::point_in_polygon).
    #[inline]
    pub fn contains_point(&self, pt: IntPoint) -> PointContainment {
        queries::point_in_polygon(pt, self)
    }

    /// Integer bounding box of all points, `None` if the path is empty.
    pub fn extents(&self) -> Option<AABB<i64>> {
        let first = self.points.first()?;
        let mut result = AABB::new(first.x, first.y, first.x, first.y);
        for pt in self.points.iter().skip(1) {
            result.min_x = result.min_x.min(pt.x);
            result.min_y = result.min_y.min(pt.y);
            result.max_x = result.max_x.max(pt.x);
            result.max_y = result.max_y.max(pt.y);
        }

        Some(result)
    }
}

impl Index<usize> for Path {
    type Output = IntPoint;
    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.points[index]
    }
}

impl IndexMut<usize> for Path {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.points[index]
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a IntPoint;
    type IntoIter = std::slice::Iter<'a, IntPoint>;
    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
