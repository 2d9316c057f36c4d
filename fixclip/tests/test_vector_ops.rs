mod test_utils;

use fixclip::assert_fuzzy_eq;
use fixclip::core::math::vec2;
use fixclip::core::traits::FuzzyEq;
use fixclip::path::{
    ClipOperation, ClipOptions, EndStyle, FillRule, JoinStyle, OffsetConfig, OffsetOptions,
    PointContainment,
};
use fixclip::scale::ScaleFactor;
use fixclip::vector::{
    clip_by_offset_vector_path, clip_vector_paths, flatten_vector_paths, largest_vector_path,
    offset_vector_paths, point_in_vector_paths, simplify_vector_path, VectorPath,
};
use fixclip::ClipError;
use test_utils::init_logging;

fn rectangle<T>(min_x: T, min_y: T, max_x: T, max_y: T) -> VectorPath<T>
where
    T: fixclip::core::traits::Real,
{
    VectorPath::from_points(
        vec![
            vec2(min_x, min_y),
            vec2(max_x, min_y),
            vec2(max_x, max_y),
            vec2(min_x, max_y),
        ],
        true,
    )
}

#[test]
fn unit_squares_intersection() {
    init_logging();
    for scale in [
        ScaleFactor::Int2,
        ScaleFactor::Int3,
        ScaleFactor::Int4,
        ScaleFactor::Int8,
    ] {
        let result = clip_vector_paths(
            &[rectangle(0.0, 0.0, 1.0, 1.0)],
            &[rectangle(0.5, 0.5, 1.5, 1.5)],
            ClipOperation::Intersection,
            FillRule::EvenOdd,
            &ClipOptions::new(),
            scale,
        )
        .unwrap();
        assert_eq!(result.len(), 1, "scale: {:?}", scale);
        assert_eq!(result[0].len(), 4);
        assert_fuzzy_eq!(result[0].signed_area(), 0.25);
        for pt in result[0].iter() {
            assert!(pt.x.fuzzy_eq(0.5) || pt.x.fuzzy_eq(1.0));
            assert!(pt.y.fuzzy_eq(0.5) || pt.y.fuzzy_eq(1.0));
        }
    }
}

#[test]
fn f32_paths() {
    init_logging();
    let result = clip_vector_paths(
        &[rectangle(0.0f32, 0.0, 2.0, 2.0)],
        &[rectangle(1.0f32, 1.0, 3.0, 3.0)],
        ClipOperation::Union,
        FillRule::NonZero,
        &ClipOptions::new(),
        ScaleFactor::Int3,
    )
    .unwrap();
    assert_eq!(result.len(), 1);
    assert_fuzzy_eq!(result[0].signed_area(), 7.0f32);
}

#[test]
fn coordinates_snap_to_scale() {
    init_logging();
    // 0.126 rounds to 0.13 at two decimal places
    let result = clip_vector_paths(
        &[rectangle(0.0, 0.0, 0.126, 1.0)],
        &[],
        ClipOperation::Union,
        FillRule::NonZero,
        &ClipOptions::new(),
        ScaleFactor::Int2,
    )
    .unwrap();
    assert_eq!(result.len(), 1);
    assert_fuzzy_eq!(result[0].signed_area(), 0.13);
}

#[test]
fn offset_square_scenario() {
    init_logging();
    let result = offset_vector_paths(
        &[rectangle(0.0, 0.0, 10.0, 10.0)],
        &OffsetConfig::with_delta(2.0),
        JoinStyle::Square,
        EndStyle::ClosedPolygon,
        &OffsetOptions::new(),
        ScaleFactor::Int3,
    )
    .unwrap();
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].len(), 4);
    assert_fuzzy_eq!(result[0].signed_area(), 196.0);
    for pt in result[0].iter() {
        assert!(pt.x.fuzzy_eq(-2.0) || pt.x.fuzzy_eq(12.0));
        assert!(pt.y.fuzzy_eq(-2.0) || pt.y.fuzzy_eq(12.0));
    }
}

#[test]
fn offset_keeps_style_overrides() {
    init_logging();
    let line = VectorPath::from_points(vec![vec2(0.0, 0.0), vec2(10.0, 0.0)], false)
        .with_end(EndStyle::OpenButt);
    let result = offset_vector_paths(
        &[line],
        &OffsetConfig::with_delta(0.5),
        JoinStyle::Miter,
        EndStyle::ClosedPolygon,
        &OffsetOptions::new(),
        ScaleFactor::Int3,
    )
    .unwrap();
    assert_eq!(result.len(), 1);
    assert_fuzzy_eq!(result[0].signed_area(), 10.0);
}

#[test]
fn simplify_bowtie() {
    init_logging();
    let bowtie = VectorPath::from_points(
        vec![vec2(0.0, 0.0), vec2(10.0, 10.0), vec2(10.0, 0.0), vec2(0.0, 10.0)],
        true,
    );
    let result = simplify_vector_path(&bowtie, ScaleFactor::Int3).unwrap();
    assert_eq!(result.len(), 2);
    for p in result.iter() {
        assert_eq!(p.len(), 3);
        assert_fuzzy_eq!(p.signed_area(), 25.0);
    }
}

#[test]
fn clip_by_offset_rim() {
    init_logging();
    let result = clip_by_offset_vector_path(
        &rectangle(0.0, 0.0, 10.0, 10.0),
        &OffsetConfig::with_delta(-1.0),
        JoinStyle::Miter,
        EndStyle::ClosedPolygon,
        &OffsetOptions::new(),
        ScaleFactor::Int4,
    )
    .unwrap();
    assert_eq!(result.len(), 2);
    let total: f64 = result.iter().map(|p| p.signed_area()).sum();
    assert_fuzzy_eq!(total, 100.0 - 64.0);
}

#[test]
fn point_queries() {
    init_logging();
    let paths = [rectangle(0.0, 0.0, 1.0, 1.0)];
    let s = ScaleFactor::Int3;
    assert_eq!(
        point_in_vector_paths(vec2(0.5, 0.5), &paths, s).unwrap(),
        PointContainment::Inside
    );
    // within half a scale step of the edge snaps onto it
    assert_eq!(
        point_in_vector_paths(vec2(1.0004, 0.5), &paths, s).unwrap(),
        PointContainment::OnBoundary
    );
    assert_eq!(
        point_in_vector_paths(vec2(1.01, 0.5), &paths, s).unwrap(),
        PointContainment::Outside
    );
}

#[test]
fn largest_and_flatten() {
    init_logging();
    let paths = [
        rectangle(0.0, 0.0, 1.0, 1.0),
        rectangle(0.0, 0.0, 2.0, 2.0),
        VectorPath::from_points(vec![vec2(0.0, 0.0), vec2(5.0, 5.0)], false),
    ];
    assert_eq!(largest_vector_path(&paths), Some(1));

    let flat = flatten_vector_paths(&paths, ScaleFactor::Int3).unwrap();
    assert_eq!(flat.len(), 1);
    assert_eq!(flat[0].len(), 10);
    assert!(flat[0].is_closed);
    assert!(flat[0][9].fuzzy_eq(vec2(5.0, 5.0)));
    assert!(flatten_vector_paths::<f64>(&[], ScaleFactor::Int3)
        .unwrap()
        .is_empty());
}

#[test]
fn bad_coordinates_rejected() {
    init_logging();
    let nan = rectangle(0.0, 0.0, f64::NAN, 1.0);
    assert!(matches!(
        simplify_vector_path(&nan, ScaleFactor::Int3),
        Err(ClipError::InvalidConfiguration(_))
    ));

    let huge = rectangle(0.0, 0.0, 1.0e12, 1.0);
    assert!(matches!(
        simplify_vector_path(&huge, ScaleFactor::Int8),
        Err(ClipError::NumericOverflow { .. })
    ));
    assert!(simplify_vector_path(&huge, ScaleFactor::Int3).is_ok());
}
