mod test_utils;

use fixclip::core::math::IntPoint;
use fixclip::path::{clip, simplify, simplify_paths, ClipOperation, FillRule, Path, PathSet};
use fixclip::path_closed;
use test_utils::{
    create_property_set, init_logging, property_sets_match, property_sets_match_abs_a,
    ModifiedPathSet, PathProperties,
};

fn rectangle(min_x: i64, min_y: i64, max_x: i64, max_y: i64) -> Path {
    path_closed![(min_x, min_y), (max_x, min_y), (max_x, max_y), (min_x, max_y)]
}

#[test]
fn bowtie_splits_into_two_triangles() {
    init_logging();
    let bowtie = path_closed![(0, 0), (10, 10), (10, 0), (0, 10)];
    let result = simplify(&bowtie).unwrap();
    assert!(property_sets_match(
        &create_property_set(&result.paths, false),
        &[
            PathProperties::new(3, 25.0, 0, 0, 5, 10),
            PathProperties::new(3, 25.0, 5, 0, 10, 10)
        ]
    ));
    assert_eq!(result.signed_area(), 50.0);
    assert!(result.scale.is_none());
}

#[test]
fn bowtie_any_start_and_direction() {
    init_logging();
    let bowtie = path_closed![(0, 0), (10, 10), (10, 0), (0, 10)];
    let expected = [
        PathProperties::new(3, 25.0, 0, 0, 5, 10),
        PathProperties::new(3, 25.0, 5, 0, 10, 10),
    ];
    ModifiedPathSet::new(&bowtie, true, true).accept_closure(&mut |path, state| {
        let result = simplify(&path).unwrap();
        assert!(
            property_sets_match(&create_property_set(&result.paths, false), &expected),
            "modified state: {:?}",
            state
        );
    });
}

#[test]
fn simple_polygon_is_unchanged() {
    init_logging();
    let square = rectangle(0, 0, 10, 10);
    let result = simplify(&square).unwrap();
    assert!(property_sets_match(
        &create_property_set(&result.paths, false),
        &[PathProperties::new(4, 100.0, 0, 0, 10, 10)]
    ));

    // clockwise input comes back counter clockwise
    let mut cw = square;
    cw.reverse();
    let result = simplify(&cw).unwrap();
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].signed_area(), 100.0);
}

#[test]
fn open_flag_ignored() {
    init_logging();
    let mut square = rectangle(0, 0, 10, 10);
    square.is_closed = false;
    let result = simplify(&square).unwrap();
    assert_eq!(result.len(), 1);
    assert!(result[0].is_closed);
    assert_eq!(result[0].signed_area(), 100.0);
}

#[test]
fn loop_inside_polygon_becomes_hole() {
    init_logging();
    // outer square traced, then the same path runs around an inner square before closing
    let path = path_closed![
        (0, 0),
        (30, 0),
        (30, 30),
        (0, 30),
        (0, 0),
        (10, 10),
        (10, 20),
        (20, 20),
        (20, 10),
        (10, 10)
    ];
    let result = simplify(&path).unwrap();
    assert!(!result.is_empty());
    assert_eq!(result.signed_area(), 800.0);
}

#[test]
fn degenerate_simplifies_to_nothing() {
    init_logging();
    assert!(simplify(&path_closed![(0, 0), (10, 0), (20, 0)]).unwrap().is_empty());
    assert!(simplify(&path_closed![(0, 0), (10, 0)]).unwrap().is_empty());
    assert!(simplify(&Path::new(true)).unwrap().is_empty());
}

#[test]
fn simplify_paths_merges_overlaps() {
    init_logging();
    let paths = PathSet::from_paths(vec![
        rectangle(0, 0, 10, 10),
        rectangle(5, 5, 15, 15),
        rectangle(100, 100, 110, 110),
    ]);

    let non_zero = simplify_paths(&paths, FillRule::NonZero, false).unwrap();
    assert!(property_sets_match(
        &create_property_set(&non_zero.paths, false),
        &[
            PathProperties::new(8, 175.0, 0, 0, 15, 15),
            PathProperties::new(4, 100.0, 100, 100, 110, 110)
        ]
    ));

    // overlap counted twice is cleared by even odd
    let even_odd = simplify_paths(&paths, FillRule::EvenOdd, false).unwrap();
    assert_eq!(even_odd.signed_area(), 150.0 + 100.0);

    assert!(simplify_paths(&PathSet::new(), FillRule::NonZero, false)
        .unwrap()
        .is_empty());
}

/// Closed band of two zigzags with opposite phase, crossing at the middle of every segment. All
/// crossings land on integer points.
fn zigzag_band(segments: i64, step: i64) -> Path {
    let mut path = Path::with_capacity(2 * segments as usize + 2, true);
    for i in 0..=segments {
        path.push(IntPoint::new(i * step, (i % 2) * step));
    }
    for i in (0..=segments).rev() {
        path.push(IntPoint::new(i * step, ((i + 1) % 2) * step));
    }
    path
}

/// Simplifying the output of simplify again changes nothing, both for the whole set and for each
/// piece on its own.
fn assert_simplify_stable(path: &Path) {
    let first = simplify(path).unwrap();
    assert!(!first.is_empty());
    let first_props = create_property_set(&first.paths, false);

    let second = clip(
        &first,
        &PathSet::new(),
        ClipOperation::Union,
        FillRule::EvenOdd,
        false,
    )
    .unwrap();
    assert!(property_sets_match(
        &create_property_set(&second.paths, false),
        &first_props
    ));

    for piece in first.iter() {
        let again = simplify(piece).unwrap();
        assert_eq!(again.len(), 1);
        assert!(property_sets_match_abs_a(
            &create_property_set(&again.paths, false),
            &[PathProperties::from_path(piece, false)]
        ));
    }
}

#[test]
fn simplify_is_idempotent() {
    init_logging();
    assert_simplify_stable(&path_closed![(0, 0), (10, 10), (10, 0), (0, 10)]);
    assert_simplify_stable(&path_closed![
        (0, 0),
        (30, 0),
        (30, 30),
        (0, 30),
        (0, 0),
        (10, 10),
        (10, 20),
        (20, 20),
        (20, 10),
        (10, 10)
    ]);
    assert_simplify_stable(&rectangle(0, 0, 10, 10));

    for segments in 1..=6 {
        for step in [10, 30] {
            let band = zigzag_band(segments, step);
            let result = simplify(&band).unwrap();
            // two end triangles and a diamond between every pair of crossings
            assert_eq!(result.len(), segments as usize + 1);
            assert_eq!(result.signed_area(), (segments * step * step) as f64 / 2.0);
            assert_simplify_stable(&band);
        }
    }
}
