//! Conversion between external floating point coordinates and the fixed point integer space.
//!
//! All clipping and offsetting runs on integers. Callers pick one [ScaleFactor] for a whole
//! operation, scale their input with it, run the operation and unscale the output with the same
//! factor.
use crate::core::math::{in_coord_range, round_half_away, IntPoint, Vector2};
use crate::core::traits::Real;
use crate::error::{ClipError, Result};
use crate::path::{Path, PathSet};
use crate::vector::VectorPath;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Power of ten multiplier mapping external units to integer units.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum ScaleFactor {
    /// 100 integer units per external unit.
    Int2,
    /// 1000 integer units per external unit.
    #[default]
    Int3,
    /// 10000 integer units per external unit.
    Int4,
    /// 100000000 integer units per external unit.
    Int8,
}

impl ScaleFactor {
    /// Multiplier applied when scaling.
    #[inline]
    pub fn factor(&self) -> f64 {
        match self {
            ScaleFactor::Int2 => 1.0e2,
            ScaleFactor::Int3 => 1.0e3,
            ScaleFactor::Int4 => 1.0e4,
            ScaleFactor::Int8 => 1.0e8,
        }
    }

    /// Scale a single value, rounding half away from zero.
    ///
    /// No range check is done, values past the `i64` range saturate. Use
    /// [ScaleFactor::try_scale_point] for checked conversion of coordinates.
    ///
    /// # Examples
    ///
    /// ```
    /// # use fixclip::scale::ScaleFactor;
    /// let s = ScaleFactor::Int3;
    /// assert_eq!(s.scale(1.2345), 1235);
    /// assert_eq!(s.scale(-1.2345), -1235);
    /// assert_eq!(s.scale(0.0004), 0);
    /// ```
    #[inline]
    pub fn scale(&self, value: f64) -> i64 {
        round_half_away(value * self.factor())
    }

    /// Convert an integer value back to external units.
    #[inline]
    pub fn unscale(&self, value: i64) -> f64 {
        value as f64 / self.factor()
    }

    /// Convert an area in integer units squared back to external units squared.
    #[inline]
    pub fn unscale_area(&self, area: f64) -> f64 {
        let f = self.factor();
        area / (f * f)
    }

    /// Scale a point, checking it is finite and the result is within the supported range.
    ///
    /// # Errors
    ///
    /// [ClipError::InvalidConfiguration] if a coordinate is NaN or infinite,
    /// [ClipError::NumericOverflow] if the scaled point is outside of `±MAX_COORD`.
    pub fn try_scale_point<T>(&self, pt: Vector2<T>) -> Result<IntPoint>
    where
        T: Real,
    {
        let x = pt.x.to_f64_lossy();
        let y = pt.y.to_f64_lossy();
        if !x.is_finite() || !y.is_finite() {
            return Err(ClipError::config(format!(
                "coordinate ({x}, {y}) is not a finite number"
            )));
        }

        let scaled = IntPoint::new(self.scale(x), self.scale(y));
        if !in_coord_range(scaled) {
            return Err(ClipError::NumericOverflow { x, y });
        }

        Ok(scaled)
    }

    /// Convert an integer point back to external units.
    #[inline]
    pub fn unscale_point<T>(&self, pt: IntPoint) -> Vector2<T>
    where
        T: Real,
    {
        Vector2::new(
            T::from_f64_lossy(self.unscale(pt.x)),
            T::from_f64_lossy(self.unscale(pt.y)),
        )
    }

    /// Scale every point of `path`, keeping its closed flag and style overrides.
    pub fn scale_path<T>(&self, path: &VectorPath<T>) -> Result<Path>
    where
        T: Real,
    {
        let mut result = Path::with_capacity(path.len(), path.is_closed);
        result.join = path.join;
        result.end = path.end;
        for pt in path.iter() {
            result.push(self.try_scale_point(*pt)?);
        }

        Ok(result)
    }

    /// Scale a collection of paths into a [PathSet] tagged with this scale.
    pub fn scale_paths<'a, T, I>(&self, paths: I) -> Result<PathSet>
    where
        T: Real,
        I: IntoIterator<Item = &'a VectorPath<T>>,
    {
        let mut result = PathSet::with_scale(Some(*self));
        for path in paths {
            result.push(self.scale_path(path)?);
        }

        Ok(result)
    }

    /// Convert an integer path back to external units.
    pub fn unscale_path<T>(&self, path: &Path) -> VectorPath<T>
    where
        T: Real,
    {
        let mut result = VectorPath::with_capacity(path.len(), path.is_closed);
        result.join = path.join;
        result.end = path.end;
        for pt in path.iter() {
            result.push(self.unscale_point(*pt));
        }

        result
    }

    /// Convert every path of `paths` back to external units.
    ///
    /// If `flatten` is true all points are concatenated in order into a single path which takes
    /// the closed flag of the first path (an empty set flattens to no paths).
    pub fn unscale_paths<T>(&self, paths: &PathSet, flatten: bool) -> Vec<VectorPath<T>>
    where
        T: Real,
    {
        if !flatten {
            return paths.iter().map(|p| self.unscale_path(p)).collect();
        }

        let Some(first) = paths.paths.first() else {
            return Vec::new();
        };

        let total = paths.iter().map(|p| p.len()).sum();
        let mut result = VectorPath::with_capacity(total, first.is_closed);
        for pt in paths.iter().flat_map(|p| p.iter()) {
            result.push(self.unscale_point(*pt));
        }

        vec![result]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::math::{vec2, MAX_COORD};

    #[test]
    fn factors() {
        assert_eq!(ScaleFactor::default(), ScaleFactor::Int3);
        assert_eq!(ScaleFactor::Int2.scale(1.0), 100);
        assert_eq!(ScaleFactor::Int4.scale(1.0), 10_000);
        assert_eq!(ScaleFactor::Int8.scale(1.0), 100_000_000);
    }

    #[test]
    fn half_rounds_away_from_zero() {
        let s = ScaleFactor::Int2;
        assert_eq!(s.scale(0.125), 13);
        assert_eq!(s.scale(-0.125), -13);
        assert_eq!(s.scale(0.135), -s.scale(-0.135));
    }

    #[test]
    fn point_checks() {
        let s = ScaleFactor::Int8;
        assert_eq!(
            s.try_scale_point(vec2(1.5, -2.0)),
            Ok(IntPoint::new(150_000_000, -200_000_000))
        );
        assert!(matches!(
            s.try_scale_point(vec2(f64::NAN, 0.0)),
            Err(ClipError::InvalidConfiguration(_))
        ));
        let too_big = MAX_COORD as f64 / 1.0e7;
        assert!(matches!(
            s.try_scale_point(vec2(0.0, too_big)),
            Err(ClipError::NumericOverflow { .. })
        ));
    }

    #[test]
    fn flatten_concatenates() {
        let s = ScaleFactor::Int3;
        let set = PathSet::from_paths(vec![
            path_closed![(0, 0), (1000, 0), (1000, 1000)],
            path_open![(5, 5), (6, 6)],
        ]);
        let flat = s.unscale_paths::<f64>(&set, true);
        assert_eq!(flat.len(), 1);
        assert_eq!(flat[0].len(), 5);
        assert!(flat[0].is_closed);
        assert!(flat[0][4].fuzzy_eq(vec2(0.006, 0.006)));
        assert!(s.unscale_paths::<f64>(&PathSet::new(), true).is_empty());
    }
}
