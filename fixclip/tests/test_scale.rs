mod test_utils;

use fixclip::core::math::{vec2, IntPoint, MAX_COORD};
use fixclip::path::PathSet;
use fixclip::scale::ScaleFactor;
use fixclip::vector::VectorPath;
use fixclip::{path_closed, ClipError};
use test_utils::init_logging;

#[test]
fn round_half_away_from_zero() {
    init_logging();
    let cases = [
        (ScaleFactor::Int2, 0.005, 1),
        (ScaleFactor::Int2, -0.005, -1),
        (ScaleFactor::Int2, 0.0049, 0),
        (ScaleFactor::Int3, 2.5e-3, 3),
        (ScaleFactor::Int3, -2.5e-3, -3),
        (ScaleFactor::Int3, 1.0, 1000),
        (ScaleFactor::Int4, -3.14159, -31416),
        (ScaleFactor::Int8, 0.123456789, 12345679),
    ];
    for (scale, value, expected) in cases {
        assert_eq!(scale.scale(value), expected, "{:?} {}", scale, value);
    }
}

#[test]
fn unscale_inverts_scale_on_grid() {
    init_logging();
    let s = ScaleFactor::Int3;
    for i in -20..20 {
        let value = i as f64 * 0.125;
        assert_eq!(s.unscale(s.scale(value)), value);
    }
    assert_eq!(s.unscale_area(1_000_000.0), 1.0);
    assert_eq!(ScaleFactor::Int2.unscale_area(250.0), 0.025);
}

#[test]
fn scale_paths_tags_set() {
    init_logging();
    let s = ScaleFactor::Int4;
    let path = VectorPath::from_points(vec![vec2(0.0, 0.0), vec2(1.0, 0.0), vec2(0.5, 0.25)], true);
    let set = s.scale_paths([&path]).unwrap();
    assert_eq!(set.scale, Some(s));
    assert_eq!(set[0], path_closed![(0, 0), (10_000, 0), (5000, 2500)]);

    let back = s.unscale_paths::<f64>(&set, false);
    assert_eq!(back, vec![path]);
}

#[test]
fn range_checked() {
    init_logging();
    let s = ScaleFactor::Int8;
    let limit = MAX_COORD as f64 / 1.0e8;
    assert!(s.try_scale_point(vec2(limit * 0.99, 0.0)).is_ok());
    assert!(matches!(
        s.try_scale_point(vec2(-limit * 1.01, 0.0)),
        Err(ClipError::NumericOverflow { .. })
    ));
    assert!(matches!(
        s.try_scale_point(vec2(0.0, f64::NEG_INFINITY)),
        Err(ClipError::InvalidConfiguration(_))
    ));
    assert_eq!(
        ScaleFactor::Int2.try_scale_point(vec2(-1.005f32, 2.0f32)),
        Ok(IntPoint::new(-100, 200))
    );
}

#[test]
fn mixed_scales_are_rejected() {
    init_logging();
    let a = PathSet::with_scale(Some(ScaleFactor::Int3));
    let b = PathSet::with_scale(Some(ScaleFactor::Int4));
    let raw = PathSet::new();
    assert!(matches!(
        a.common_scale(&b),
        Err(ClipError::InvalidConfiguration(_))
    ));
    assert_eq!(a.common_scale(&raw), Ok(Some(ScaleFactor::Int3)));
    assert_eq!(raw.common_scale(&b), Ok(Some(ScaleFactor::Int4)));
    assert_eq!(raw.common_scale(&raw), Ok(None));
}
