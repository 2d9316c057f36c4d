use crate::core::math::Vector2;
use crate::core::traits::Real;
use crate::path::{EndStyle, JoinStyle};
use std::ops::{Index, IndexMut};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Path in external floating point units, the form callers hand to and receive from the
/// [vector_ops](crate::vector) functions.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VectorPath<T = f64> {
    pub points: Vec<Vector2<T>>,
    pub is_closed: bool,
    pub join: Option<JoinStyle>,
    pub end: Option<EndStyle>,
}

impl<T> VectorPath<T>
where
    T: Real,
{
    #[inline]
    pub fn new(is_closed: bool) -> Self {
        Self::with_capacity(0, is_closed)
    }

    #[inline]
    pub fn with_capacity(capacity: usize, is_closed: bool) -> Self {
        VectorPath {
            points: Vec::with_capacity(capacity),
            is_closed,
            join: None,
            end: None,
        }
    }

    #[inline]
    pub fn from_points(points: Vec<Vector2<T>>, is_closed: bool) -> Self {
        VectorPath {
            points,
            is_closed,
            join: None,
            end: None,
        }
    }

    #[inline]
    pub fn with_join(mut self, join: JoinStyle) -> Self {
        self.join = Some(join);
        self
    }

    #[inline]
    pub fn with_end(mut self, end: EndStyle) -> Self {
        self.end = Some(end);
        self
    }

    #[inline]
    pub fn add(&mut self, x: T, y: T) {
        self.points.push(Vector2::new(x, y));
    }

    #[inline]
    pub fn push(&mut self, pt: Vector2<T>) {
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
    pub fn iter(&self) -> std::slice::Iter<'_, Vector2<T>> {
        self.points.iter()
    }

    #[inline]
    pub fn reverse(&mut self) {
        self.points.reverse();
    }

    /// Signed area in external units squared, positive when counter clockwise. Paths with fewer
    /// than 3 points have zero area.
    pub fn signed_area(&self) -> T {
        let n = self.points.len();
        if n < 3 {
            return T::zero();
        }

        let mut double_area = T::zero();
        let mut prev = self.points[n - 1];
        for pt in self.points.iter() {
            double_area = double_area + prev.perp_dot(*pt);
            prev = *pt;
        }

        double_area / T::two()
    }
}

impl<T> Index<usize> for VectorPath<T> {
    type Output = Vector2<T>;
    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.points[index]
    }
}

impl<T> IndexMut<usize> for VectorPath<T> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.points[index]
    }
}
