mod test_utils;

use fixclip::core::math::IntPoint;
use fixclip::path::{
    largest_by_area, point_in_polygon, point_in_polygon_set, signed_area, Path, PathSet,
    PointContainment,
};
use fixclip::path_closed;
use test_utils::init_logging;

fn rectangle(min_x: i64, min_y: i64, max_x: i64, max_y: i64) -> Path {
    path_closed![(min_x, min_y), (max_x, min_y), (max_x, max_y), (min_x, max_y)]
}

fn pt(x: i64, y: i64) -> IntPoint {
    IntPoint::new(x, y)
}

#[test]
fn point_in_square() {
    init_logging();
    let square = rectangle(0, 0, 10, 10);
    assert_eq!(point_in_polygon(pt(5, 5), &square), PointContainment::Inside);
    assert_eq!(point_in_polygon(pt(0, 0), &square), PointContainment::OnBoundary);
    assert_eq!(point_in_polygon(pt(0, 5), &square), PointContainment::OnBoundary);
    assert_eq!(point_in_polygon(pt(10, 7), &square), PointContainment::OnBoundary);
    assert_eq!(point_in_polygon(pt(-1, 5), &square), PointContainment::Outside);
    assert_eq!(point_in_polygon(pt(5, 11), &square), PointContainment::Outside);

    // orientation does not matter
    let mut cw = square.clone();
    cw.reverse();
    assert_eq!(point_in_polygon(pt(5, 5), &cw), PointContainment::Inside);
}

#[test]
fn point_on_sloped_edge_is_exact() {
    init_logging();
    let big = 1_000_000_000_000;
    let triangle = path_closed![(0, 0), (big, 0), (0, big)];
    assert_eq!(
        point_in_polygon(pt(big / 2, big / 2), &triangle),
        PointContainment::OnBoundary
    );
    assert_eq!(
        point_in_polygon(pt(big / 2, big / 2 - 1), &triangle),
        PointContainment::Inside
    );
    assert_eq!(
        point_in_polygon(pt(big / 2, big / 2 + 1), &triangle),
        PointContainment::Outside
    );
}

#[test]
fn degenerate_paths_contain_nothing() {
    init_logging();
    assert_eq!(
        point_in_polygon(pt(0, 0), &path_closed![(0, 0), (10, 0)]),
        PointContainment::Outside
    );
    assert_eq!(point_in_polygon(pt(0, 0), &Path::new(true)), PointContainment::Outside);
}

#[test]
fn point_in_set_first_match() {
    init_logging();
    let set = PathSet::from_paths(vec![rectangle(0, 0, 10, 10), rectangle(10, 0, 20, 10)]);
    assert_eq!(point_in_polygon_set(pt(15, 5), &set), PointContainment::Inside);
    // on the boundary of the first path even though inside neither
    assert_eq!(point_in_polygon_set(pt(10, 5), &set), PointContainment::OnBoundary);
    assert_eq!(point_in_polygon_set(pt(25, 5), &set), PointContainment::Outside);
    assert_eq!(point_in_polygon_set(pt(0, 0), &PathSet::new()), PointContainment::Outside);
}

#[test]
fn point_in_large_set_matches_linear_scan() {
    init_logging();
    // a grid of touching squares is large enough to use the extents index
    let mut set = PathSet::new();
    for i in 0..8 {
        for j in 0..8 {
            set.push(rectangle(i * 10, j * 10, i * 10 + 10, j * 10 + 10));
        }
    }
    set.push(path_closed![(0, 0), (5, 0)]);

    for x in (-5..90).step_by(5) {
        for y in (-5..90).step_by(3) {
            let p = pt(x, y);
            let linear = set
                .iter()
                .map(|path| point_in_polygon(p, path))
                .find(|r| *r != PointContainment::Outside)
                .unwrap_or(PointContainment::Outside);
            assert_eq!(point_in_polygon_set(p, &set), linear, "point: {:?}", p);
        }
    }
}

#[test]
fn areas() {
    init_logging();
    let square = rectangle(0, 0, 10, 10);
    assert_eq!(signed_area(&square), 100.0);
    let mut cw = square.clone();
    cw.reverse();
    assert_eq!(signed_area(&cw), -100.0);
    assert_eq!(signed_area(&path_closed![(0, 0), (1, 0), (0, 1)]), 0.5);
    assert_eq!(signed_area(&path_closed![(0, 0), (10, 0)]), 0.0);

    // exact for coordinates near the range limit
    let big = 1_i64 << 40;
    let huge = rectangle(-big, -big, big, big);
    assert_eq!(signed_area(&huge), 4.0 * (big as f64) * (big as f64));
}

#[test]
fn largest() {
    init_logging();
    let mut cw = rectangle(0, 0, 20, 20);
    cw.reverse();
    let paths = vec![rectangle(0, 0, 10, 10), cw, rectangle(0, 0, 20, 20)];
    // absolute area, ties go to the first
    assert_eq!(largest_by_area(&paths), Some(1));
    assert_eq!(largest_by_area(&[]), None);
    assert_eq!(
        largest_by_area(&[path_closed![(0, 0), (1, 1)], path_closed![(0, 0)]]),
        Some(0)
    );
}
