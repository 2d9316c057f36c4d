use super::{Path, PathSet, PointContainment};
use crate::core::math::IntPoint;
use static_aabb2d_index::StaticAABB2DIndexBuilder;

/// Sets with at least this many paths are prefiltered with a spatial index in
/// [point_in_polygon_set].
const INDEXED_SET_THRESHOLD: usize = 16;

/// Classify `pt` against the ring formed by the directed segments in `segments` (even odd
/// crossing parity, exact boundary detection).
pub(crate) fn classify_segments<I>(pt: IntPoint, segments: I) -> PointContainment
where
    I: IntoIterator<Item = (IntPoint, IntPoint)>,
{
    let mut inside = false;
    for (ip, ip_next) in segments {
        if ip_next.y == pt.y
            && (ip_next.x == pt.x || (ip.y == pt.y && ((ip_next.x > pt.x) == (ip.x < pt.x))))
        {
            return PointContainment::OnBoundary;
        }

        if (ip.y < pt.y) == (ip_next.y < pt.y) {
            continue;
        }

        if ip.x >= pt.x && ip_next.x > pt.x {
            inside = !inside;
        } else if ip.x >= pt.x || ip_next.x > pt.x {
            let d = pt.cross(ip, ip_next);
            if d == 0 {
                return PointContainment::OnBoundary;
            }
            if (d > 0) == (ip_next.y > ip.y) {
                inside = !inside;
            }
        }
    }

    if inside {
        PointContainment::Inside
    } else {
        PointContainment::Outside
    }
}

/// Classify `pt` against `path`, the path is always treated as a closed ring.
///
/// Paths with fewer than 3 points enclose nothing and always give
/// [PointContainment::Outside]. A point exactly on a vertex or edge gives
/// [PointContainment::OnBoundary].
///
/// # Examples
///
/// ```
/// # use fixclip::path::*;
/// # use fixclip::path_closed;
/// # use fixclip::core::math::IntPoint;
/// let square = path_closed![(0, 0), (10, 0), (10, 10), (0, 10)];
/// assert_eq!(point_in_polygon(IntPoint::new(5, 5), &square), PointContainment::Inside);
/// assert_eq!(point_in_polygon(IntPoint::new(10, 10), &square), PointContainment::OnBoundary);
/// assert_eq!(point_in_polygon(IntPoint::new(5, 0), &square), PointContainment::OnBoundary);
/// assert_eq!(point_in_polygon(IntPoint::new(11, 5), &square), PointContainment::Outside);
/// ```
pub fn point_in_polygon(pt: IntPoint, path: &Path) -> PointContainment {
    let n = path.len();
    if n < 3 {
        return PointContainment::Outside;
    }

    let segments = (0..n).map(|i| (path[i], path[(i + 1) % n]));
    classify_segments(pt, segments)
}

/// Classify `pt` against every path of `paths` in order, returning the first result that is
/// not [PointContainment::Outside].
///
/// Large sets are first narrowed with a spatial index of the path bounding boxes, candidates
/// are still visited in input order.
pub fn point_in_polygon_set(pt: IntPoint, paths: &PathSet) -> PointContainment {
    if paths.len() < INDEXED_SET_THRESHOLD {
        return first_match(pt, paths, 0..paths.len());
    }

    // boxes are indexed as f64, the conversion is monotonic so containment is preserved and
    // widths near the coordinate limit cannot overflow
    let indexed = paths
        .iter()
        .enumerate()
        .filter(|(_, p)| p.len() >= 3)
        .filter_map(|(i, p)| p.extents().map(|e| (i, e)))
        .collect::<Vec<_>>();

    let mut builder = StaticAABB2DIndexBuilder::new(indexed.len());
    for (_, ext) in indexed.iter() {
        builder.add(
            ext.min_x as f64,
            ext.min_y as f64,
            ext.max_x as f64,
            ext.max_y as f64,
        );
    }

    let index = match builder.build() {
        Ok(index) => index,
        Err(e) => {
            log::warn!("failed to build path extents index, falling back to linear scan: {e}");
            return first_match(pt, paths, 0..paths.len());
        }
    };

    let (x, y) = (pt.x as f64, pt.y as f64);
    let mut candidates = index
        .query(x, y, x, y)
        .into_iter()
        .map(|i| indexed[i].0)
        .collect::<Vec<_>>();
    candidates.sort_unstable();

    first_match(pt, paths, candidates)
}

fn first_match<I>(pt: IntPoint, paths: &PathSet, indexes: I) -> PointContainment
where
    I: IntoIterator<Item = usize>,
{
    indexes
        .into_iter()
        .map(|i| point_in_polygon(pt, &paths[i]))
        .find(|r| *r != PointContainment::Outside)
        .unwrap_or(PointContainment::Outside)
}

/// Signed area of `path` treated as a ring (shoelace formula) in integer units squared.
///
/// Positive for counter clockwise paths, negative for clockwise, zero for paths with fewer than
/// 3 points.
///
/// # Examples
///
/// ```
/// # use fixclip::path::*;
/// # use fixclip::path_closed;
/// let ccw = path_closed![(0, 0), (10, 0), (10, 10), (0, 10)];
/// assert_eq!(signed_area(&ccw), 100.0);
/// let cw = path_closed![(0, 0), (0, 10), (10, 10), (10, 0)];
/// assert_eq!(signed_area(&cw), -100.0);
/// ```
pub fn signed_area(path: &Path) -> f64 {
    let n = path.len();
    if n < 3 {
        return 0.0;
    }

    // each term is exact in i128 (coordinates are taken relative to the first point)
    let origin = path[0];
    let mut double_area = 0.0;
    for i in 1..n - 1 {
        double_area += origin.cross(path[i], path[i + 1]) as f64;
    }

    double_area / 2.0
}

/// Index of the path with the greatest absolute signed area.
///
/// Ties go to the earliest path, `None` is returned only for an empty input.
///
/// # Examples
///
/// ```
/// # use fixclip::path::*;
/// # use fixclip::path_closed;
/// let paths = vec![
///     path_closed![(0, 0), (1, 0), (1, 1)],
///     path_closed![(0, 0), (0, 9), (9, 9)],
///     path_closed![(0, 0), (9, 0), (9, 9)],
/// ];
/// assert_eq!(largest_by_area(&paths), Some(1));
/// assert_eq!(largest_by_area(&[]), None);
/// ```
pub fn largest_by_area(paths: &[Path]) -> Option<usize> {
    let mut result = None;
    let mut max_area = -1.0;
    for (i, path) in paths.iter().enumerate() {
        let area = signed_area(path).abs();
        if area > max_area {
            max_area = area;
            result = Some(i);
        }
    }

    result
}
