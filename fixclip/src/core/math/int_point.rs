use std::ops;

/// Point in the scaled integer coordinate space.
///
/// Coordinates must lie within `±MAX_COORD` (see [crate::core::math::MAX_COORD]) so that all
/// products computed by the clipping engine fit in `i128`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IntPoint {
    pub x: i64,
    pub y: i64,
}

impl IntPoint {
    #[inline]
    pub const fn new(x: i64, y: i64) -> Self {
        IntPoint { x, y }
    }

    /// Cross product of `(b - self)` and `(c - self)` computed exactly.
    ///
    /// Positive when `self -> b -> c` turns counter clockwise.
    #[inline]
    pub fn cross(&self, b: IntPoint, c: IntPoint) -> i128 {
        let abx = b.x as i128 - self.x as i128;
        let aby = b.y as i128 - self.y as i128;
        let acx = c.x as i128 - self.x as i128;
        let acy = c.y as i128 - self.y as i128;
        abx * acy - aby * acx
    }
}

impl From<(i64, i64)> for IntPoint {
    #[inline]
    fn from(value: (i64, i64)) -> Self {
        IntPoint::new(value.0, value.1)
    }
}

impl ops::Add for IntPoint {
    type Output = IntPoint;
    #[inline]
    fn add(self, rhs: IntPoint) -> Self::Output {
        IntPoint::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl ops::Sub for IntPoint {
    type Output = IntPoint;
    #[inline]
    fn sub(self, rhs: IntPoint) -> Self::Output {
        IntPoint::new(self.x - rhs.x, self.y - rhs.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cross_sign() {
        let a = IntPoint::new(0, 0);
        assert!(a.cross(IntPoint::new(10, 0), IntPoint::new(10, 10)) > 0);
        assert!(a.cross(IntPoint::new(10, 10), IntPoint::new(10, 0)) < 0);
        assert_eq!(a.cross(IntPoint::new(5, 5), IntPoint::new(10, 10)), 0);
    }

    #[test]
    fn cross_large_values_do_not_overflow() {
        let m = 0x3FFF_FFFF_FFFF_FFFF_i64;
        let a = IntPoint::new(-m, -m);
        let b = IntPoint::new(m, -m);
        let c = IntPoint::new(m, m);
        let expected = (2 * m as i128) * (2 * m as i128);
        assert_eq!(a.cross(b, c), expected);
    }
}
