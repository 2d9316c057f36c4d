use super::{IntPoint, Vector2};
use crate::error::{ClipError, Result};

/// Largest coordinate magnitude accepted by the clipping engine (`2^62 - 1`).
///
/// Differences of two coordinates then always fit in `i64` and their products in `i128`.
pub const MAX_COORD: i64 = 0x3FFF_FFFF_FFFF_FFFF;

/// Returns the (min, max) values from `v1` and `v2`.
///
/// # Examples
///
/// ```
/// # use fixclip::core::math::*;
/// let (min_val, max_val) = min_max(8, 4);
/// assert_eq!(min_val, 4);
/// assert_eq!(max_val, 8);
/// ```
#[inline]
pub fn min_max<T>(v1: T, v2: T) -> (T, T)
where
    T: PartialOrd,
{
    if v1 < v2 {
        (v1, v2)
    } else {
        (v2, v1)
    }
}

/// Round to the nearest integer with ties going away from zero.
///
/// The value is offset by `0.5` toward its sign and then truncated toward zero, so `2.5` becomes
/// `3` and `-2.5` becomes `-3`. Values beyond the `i64` range saturate, callers that care check
/// the result against [MAX_COORD].
///
/// # Examples
///
/// ```
/// # use fixclip::core::math::*;
/// assert_eq!(round_half_away(2.5), 3);
/// assert_eq!(round_half_away(-2.5), -3);
/// assert_eq!(round_half_away(2.4999), 2);
/// assert_eq!(round_half_away(-0.2), 0);
/// ```
#[inline]
pub fn round_half_away(value: f64) -> i64 {
    if value < 0.0 {
        (value - 0.5) as i64
    } else {
        (value + 0.5) as i64
    }
}

/// Returns `true` if both coordinates of `pt` are within `±MAX_COORD`.
#[inline]
pub fn in_coord_range(pt: IntPoint) -> bool {
    (-MAX_COORD..=MAX_COORD).contains(&pt.x) && (-MAX_COORD..=MAX_COORD).contains(&pt.y)
}

/// Returns a [ClipError::NumericOverflow] error if `pt` is not within `±MAX_COORD`.
#[inline]
pub fn check_coord_range(pt: IntPoint) -> Result<()> {
    if in_coord_range(pt) {
        Ok(())
    } else {
        Err(ClipError::NumericOverflow {
            x: pt.x as f64,
            y: pt.y as f64,
        })
    }
}

/// Returns `true` if segment `pt1 -> pt2` is parallel to `pt2 -> pt3` (exact).
#[inline]
pub fn slopes_equal3(pt1: IntPoint, pt2: IntPoint, pt3: IntPoint) -> bool {
    slopes_equal4(pt1, pt2, pt2, pt3)
}

/// Returns `true` if segment `pt1 -> pt2` is parallel to `pt3 -> pt4` (exact).
#[inline]
pub fn slopes_equal4(pt1: IntPoint, pt2: IntPoint, pt3: IntPoint, pt4: IntPoint) -> bool {
    let dy1 = pt1.y as i128 - pt2.y as i128;
    let dx1 = pt1.x as i128 - pt2.x as i128;
    let dy2 = pt3.y as i128 - pt4.y as i128;
    let dx2 = pt3.x as i128 - pt4.x as i128;
    dy1 * dx2 == dx1 * dy2
}

/// Returns `true` if `pt2` lies strictly between `pt1` and `pt3` along the dominant axis of
/// `pt1 -> pt3`. Points are assumed collinear.
#[inline]
pub fn pt2_is_between_pt1_and_pt3(pt1: IntPoint, pt2: IntPoint, pt3: IntPoint) -> bool {
    if pt1 == pt3 || pt1 == pt2 || pt3 == pt2 {
        false
    } else if pt1.x != pt3.x {
        (pt2.x > pt1.x) == (pt2.x < pt3.x)
    } else {
        (pt2.y > pt1.y) == (pt2.y < pt3.y)
    }
}

/// Returns `true` if the x ranges `[seg1a, seg1b]` and `[seg2a, seg2b]` overlap by more than a
/// single point. The bounds may be given in any order.
#[inline]
pub fn horz_segments_overlap(seg1a: i64, seg1b: i64, seg2a: i64, seg2b: i64) -> bool {
    let (s1min, s1max) = min_max(seg1a, seg1b);
    let (s2min, s2max) = min_max(seg2a, seg2b);
    s1min < s2max && s2min < s1max
}

/// Unit normal of the directed segment `pt1 -> pt2`, pointing to the right of travel (so for a
/// counter clockwise ring it points outward). Returns zero for coincident points.
#[inline]
pub fn unit_normal(pt1: IntPoint, pt2: IntPoint) -> Vector2<f64> {
    let dx = (pt2.x - pt1.x) as f64;
    let dy = (pt2.y - pt1.y) as f64;
    if dx == 0.0 && dy == 0.0 {
        return Vector2::zero();
    }
    let f = 1.0 / (dx * dx + dy * dy).sqrt();
    Vector2::new(dy * f, -dx * f)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::traits::FuzzyEq;

    fn p(x: i64, y: i64) -> IntPoint {
        IntPoint::new(x, y)
    }

    #[test]
    fn rounding_is_symmetric() {
        for v in [0.5, 1.5, 2.5, 1234.4999, 7.0] {
            assert_eq!(round_half_away(-v), -round_half_away(v));
        }
    }

    #[test]
    fn coord_range() {
        assert!(check_coord_range(p(MAX_COORD, -MAX_COORD)).is_ok());
        assert!(matches!(
            check_coord_range(p(MAX_COORD + 1, 0)),
            Err(ClipError::NumericOverflow { .. })
        ));
    }

    #[test]
    fn slopes() {
        assert!(slopes_equal3(p(0, 0), p(5, 5), p(10, 10)));
        assert!(!slopes_equal3(p(0, 0), p(5, 5), p(10, 11)));
        assert!(slopes_equal4(p(0, 0), p(2, 1), p(5, 5), p(9, 7)));
    }

    #[test]
    fn between() {
        assert!(pt2_is_between_pt1_and_pt3(p(0, 0), p(5, 0), p(10, 0)));
        assert!(!pt2_is_between_pt1_and_pt3(p(0, 0), p(15, 0), p(10, 0)));
        assert!(pt2_is_between_pt1_and_pt3(p(0, 10), p(0, 5), p(0, 0)));
        assert!(!pt2_is_between_pt1_and_pt3(p(0, 0), p(0, 0), p(0, 10)));
    }

    #[test]
    fn horz_overlap() {
        assert!(horz_segments_overlap(0, 10, 5, 15));
        assert!(horz_segments_overlap(10, 0, 15, 5));
        assert!(!horz_segments_overlap(0, 10, 10, 20));
    }

    #[test]
    fn normal_points_right() {
        let n = unit_normal(p(0, 0), p(10, 0));
        assert!(n.x.fuzzy_eq(0.0));
        assert!(n.y.fuzzy_eq(-1.0));
    }
}
