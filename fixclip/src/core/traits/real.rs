use super::FuzzyEq;

/// Floating point type usable for external (unscaled) coordinates, implemented for `f32` and
/// `f64`.
///
/// Values cross into the fixed point space through `f64`, see [Real::to_f64_lossy] and
/// [Real::from_f64_lossy].
pub trait Real:
    num_traits::real::Real + FuzzyEq + std::default::Default + std::fmt::Debug + 'static
{
    /// Widen to `f64` (exact for `f32` and `f64`).
    fn to_f64_lossy(self) -> f64;

    /// Narrow from `f64`, rounding to the nearest representable value.
    fn from_f64_lossy(value: f64) -> Self;

    #[inline]
    fn two() -> Self {
        Self::one() + Self::one()
    }
}

impl Real for f32 {
    #[inline]
    fn to_f64_lossy(self) -> f64 {
        self as f64
    }

    #[inline]
    fn from_f64_lossy(value: f64) -> Self {
        value as f32
    }

    #[inline]
    fn two() -> Self {
        2.0f32
    }
}

impl Real for f64 {
    #[inline]
    fn to_f64_lossy(self) -> f64 {
        self
    }

    #[inline]
    fn from_f64_lossy(value: f64) -> Self {
        value
    }

    #[inline]
    fn two() -> Self {
        2.0f64
    }
}
