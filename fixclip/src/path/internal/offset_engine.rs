//! Raw offset contour construction.
//!
//! Every source path is turned into one (or two for closed lines) raw contours running parallel
//! to it at distance `delta`, with join geometry at the vertices and caps at open ends. Raw
//! contours may overlap themselves, [OffsetEngine::execute] resolves that with a winding union.
use super::clip_engine::ClipEngine;
use crate::core::math::{round_half_away, unit_normal, IntPoint, Vector2};
use crate::error::Result;
use crate::path::{
    largest_by_area, signed_area, ClipOperation, EndStyle, FillRule, JoinStyle, Path, PathRole,
};
use std::f64::consts::{PI, TAU};

/// Tolerance (integer units) used for round joins when no positive tolerance is given.
const DEFAULT_ARC_TOLERANCE: f64 = 0.25;

/// Upper bound on arc steps for a full circle. A tolerance that is tiny relative to `delta` gives
/// `acos(1.0) == 0` and so an unbounded step count without it.
const MAX_ARC_STEPS: f64 = 4096.0;

#[derive(Debug, Clone)]
struct OffsetNode {
    path: Path,
    join: JoinStyle,
    end: EndStyle,
}

/// Collects paths with their styles and offsets them all by one distance.
#[derive(Debug, Clone)]
pub(crate) struct OffsetEngine {
    nodes: Vec<OffsetNode>,
    /// (node, vertex) of the lowest vertex over all closed polygons.
    lowest: Option<(usize, usize)>,
    miter_limit: f64,
    arc_tolerance: f64,
}

/// Per run constants shared by every node.
#[derive(Debug, Clone, Copy)]
struct OffsetParams {
    delta: f64,
    /// Miter is used while `1 + cos(turn)` is at least this.
    miter_lim: f64,
    sin: f64,
    cos: f64,
    steps_per_rad: f64,
    /// Steps for a full circle.
    steps: f64,
}

fn offset_pt(pt: IntPoint, dir: Vector2<f64>, dist: f64) -> IntPoint {
    IntPoint::new(
        round_half_away(pt.x as f64 + dir.x * dist),
        round_half_away(pt.y as f64 + dir.y * dist),
    )
}

/// Direction of travel for the segment with normal `n`.
#[inline]
fn travel_dir(n: Vector2<f64>) -> Vector2<f64> {
    Vector2::new(-n.y, n.x)
}

impl OffsetEngine {
    pub(crate) fn new(miter_limit: f64, arc_tolerance: f64) -> Self {
        OffsetEngine {
            nodes: Vec::new(),
            lowest: None,
            miter_limit,
            arc_tolerance,
        }
    }

    /// Add a path, dropping consecutive duplicate points. Closed polygons with fewer than 3
    /// distinct points are skipped.
    pub(crate) fn add_path(&mut self, path: &Path, join: JoinStyle, end: EndStyle) {
        let src = &path.points;
        if src.is_empty() {
            return;
        }

        let mut high = src.len() - 1;
        if end.is_closed() {
            while high > 0 && src[0] == src[high] {
                high -= 1;
            }
        }

        let mut points = Vec::with_capacity(high + 1);
        points.push(src[0]);
        let mut lowest = 0;
        for &pt in src[1..=high].iter() {
            if points.last() == Some(&pt) {
                continue;
            }
            points.push(pt);
            let low = points[lowest];
            if pt.y > low.y || (pt.y == low.y && pt.x < low.x) {
                lowest = points.len() - 1;
            }
        }

        if end == EndStyle::ClosedPolygon && points.len() < 3 {
            log::trace!("skipping degenerate offset polygon with {} points", points.len());
            return;
        }

        let node_idx = self.nodes.len();
        if end == EndStyle::ClosedPolygon {
            let candidate = points[lowest];
            let is_lower = match self.lowest {
                None => true,
                Some((n, v)) => {
                    let current = self.nodes[n].path[v];
                    candidate.y > current.y || (candidate.y == current.y && candidate.x < current.x)
                }
            };
            if is_lower {
                self.lowest = Some((node_idx, lowest));
            }
        }

        self.nodes.push(OffsetNode {
            path: Path::from_points(points, true),
            join,
            end,
        });
    }

    /// Orient closed polygons so the outermost is counter clockwise, closed lines are always made
    /// counter clockwise.
    fn fix_orientations(&mut self) {
        let reverse_polygons = match self.lowest {
            Some((n, _)) => signed_area(&self.nodes[n].path) < 0.0,
            None => false,
        };

        for node in self.nodes.iter_mut() {
            let reverse = match node.end {
                EndStyle::ClosedPolygon => reverse_polygons,
                EndStyle::ClosedLine => signed_area(&node.path) < 0.0,
                _ => false,
            };
            if reverse {
                node.path.reverse();
            }
        }
    }

    fn params(&self, delta: f64) -> OffsetParams {
        let miter_lim = 2.0 / self.miter_limit.max(2.0).powi(2);

        let abs_delta = delta.abs();
        let tolerance = if self.arc_tolerance <= 0.0 {
            DEFAULT_ARC_TOLERANCE
        } else {
            self.arc_tolerance
        };
        let tolerance = tolerance.min(abs_delta * 0.25);
        let steps = (PI / (1.0 - tolerance / abs_delta).acos())
            .min(abs_delta * PI)
            .min(MAX_ARC_STEPS);
        let (mut sin, cos) = (TAU / steps).sin_cos();
        if delta < 0.0 {
            sin = -sin;
        }

        OffsetParams {
            delta,
            miter_lim,
            sin,
            cos,
            steps_per_rad: steps / TAU,
            steps,
        }
    }

    /// Offset every added path by `delta` (integer units, non zero) and union the raw contours.
    pub(crate) fn execute(mut self, delta: f64) -> Result<Vec<Path>> {
        self.fix_orientations();
        let params = self.params(delta);

        let mut raw = Vec::with_capacity(self.nodes.len());
        for node in self.nodes.iter() {
            let len = node.path.len();
            if delta <= 0.0 && (len < 3 || node.end != EndStyle::ClosedPolygon) {
                continue;
            }
            let mut builder = ContourBuilder::new(&node.path.points, node.end, params);
            builder.build(node.join, &mut raw);
        }

        log::debug!(
            "offset of {} paths by {delta} built {} raw contours",
            self.nodes.len(),
            raw.len()
        );

        let Some(bounds) = bounds(&raw) else {
            return Ok(Vec::new());
        };

        if delta > 0.0 {
            let mut engine = ClipEngine::new(false, false);
            engine.add_paths(raw.iter(), PathRole::Subject)?;
            return engine.execute(ClipOperation::Union, FillRule::Positive, FillRule::Positive);
        }

        // shrinking: union inside an enclosing clockwise rectangle, the raw contours become its
        // holes and reversed output turns them counter clockwise
        let (min, max) = bounds;
        let (left, right) = (min.x.saturating_sub(10), max.x.saturating_add(10));
        let (bottom, top) = (min.y.saturating_sub(10), max.y.saturating_add(10));
        let outer = path_closed![(left, top), (right, top), (right, bottom), (left, bottom)];
        let mut engine = ClipEngine::new(false, true);
        engine.add_paths(raw.iter(), PathRole::Subject)?;
        engine.add_path(&outer, PathRole::Subject)?;
        let mut result =
            engine.execute(ClipOperation::Union, FillRule::Negative, FillRule::Negative)?;
        if let Some(i) = largest_by_area(&result) {
            result.remove(i);
        }
        Ok(result)
    }
}

fn bounds(paths: &[Path]) -> Option<(IntPoint, IntPoint)> {
    let mut pts = paths.iter().flat_map(|p| p.iter());
    let first = *pts.next()?;
    Some(pts.fold((first, first), |(min, max), pt| {
        (
            IntPoint::new(min.x.min(pt.x), min.y.min(pt.y)),
            IntPoint::new(max.x.max(pt.x), max.y.max(pt.y)),
        )
    }))
}

/// Builds the raw contour(s) of one source path.
struct ContourBuilder<'a> {
    src: &'a [IntPoint],
    end: EndStyle,
    params: OffsetParams,
    normals: Vec<Vector2<f64>>,
    dest: Vec<IntPoint>,
    /// Sine of the turn at the vertex being joined.
    sin_a: f64,
}

impl<'a> ContourBuilder<'a> {
    fn new(src: &'a [IntPoint], end: EndStyle, params: OffsetParams) -> Self {
        ContourBuilder {
            src,
            end,
            params,
            normals: Vec::with_capacity(src.len()),
            dest: Vec::new(),
            sin_a: 0.0,
        }
    }

    fn push_offset(&mut self, j: usize, n: Vector2<f64>) {
        self.dest.push(offset_pt(self.src[j], n, self.params.delta));
    }

    fn finish_contour(&mut self, out: &mut Vec<Path>) {
        let points = std::mem::take(&mut self.dest);
        out.push(Path::from_points(points, true));
    }

    fn build(&mut self, join: JoinStyle, out: &mut Vec<Path>) {
        let len = self.src.len();
        let delta = self.params.delta;

        if len == 1 {
            let center = self.src[0];
            if join == JoinStyle::Round {
                let mut v = Vector2::new(1.0, 0.0);
                let mut step = 1.0;
                while step <= self.params.steps {
                    self.dest.push(offset_pt(center, v, delta));
                    v = self.rotate(v);
                    step += 1.0;
                }
            } else {
                for (x, y) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
                    self.dest.push(offset_pt(center, Vector2::new(x, y), delta));
                }
            }
            self.finish_contour(out);
            return;
        }

        for j in 0..len - 1 {
            self.normals.push(unit_normal(self.src[j], self.src[j + 1]));
        }
        if self.end.is_closed() {
            self.normals.push(unit_normal(self.src[len - 1], self.src[0]));
        } else {
            self.normals.push(self.normals[len - 2]);
        }

        match self.end {
            EndStyle::ClosedPolygon => {
                let mut k = len - 1;
                for j in 0..len {
                    k = self.offset_point(j, k, join);
                }
                self.finish_contour(out);
            }
            EndStyle::ClosedLine => {
                let mut k = len - 1;
                for j in 0..len {
                    k = self.offset_point(j, k, join);
                }
                self.finish_contour(out);

                // other side, walking backward with flipped normals
                let last = self.normals[len - 1];
                for j in (1..len).rev() {
                    self.normals[j] = -self.normals[j - 1];
                }
                self.normals[0] = -last;
                let mut k = 0;
                for j in (0..len).rev() {
                    k = self.offset_point(j, k, join);
                }
                self.finish_contour(out);
            }
            EndStyle::OpenButt | EndStyle::OpenSquare | EndStyle::OpenRound => {
                let mut k = 0;
                for j in 1..len - 1 {
                    k = self.offset_point(j, k, join);
                }

                let j = len - 1;
                if self.end == EndStyle::OpenButt {
                    self.push_offset(j, self.normals[j]);
                    self.push_offset(j, -self.normals[j]);
                } else {
                    self.sin_a = 0.0;
                    self.normals[j] = -self.normals[j];
                    self.cap(j, len - 2);
                }

                // back along the other side
                for j in (1..len).rev() {
                    self.normals[j] = -self.normals[j - 1];
                }
                self.normals[0] = -self.normals[1];
                let mut k = len - 1;
                for j in (1..len - 1).rev() {
                    k = self.offset_point(j, k, join);
                }

                if self.end == EndStyle::OpenButt {
                    self.push_offset(0, -self.normals[0]);
                    self.push_offset(0, self.normals[0]);
                } else {
                    self.sin_a = 0.0;
                    self.cap(0, 1);
                }
                self.finish_contour(out);
            }
        }
    }

    fn cap(&mut self, j: usize, k: usize) {
        if self.end == EndStyle::OpenSquare {
            self.do_square(j, k);
        } else {
            self.do_round(j, k);
        }
    }

    fn rotate(&self, v: Vector2<f64>) -> Vector2<f64> {
        let (sin, cos) = (self.params.sin, self.params.cos);
        Vector2::new(v.x * cos - sin * v.y, v.x * sin + v.y * cos)
    }

    /// Emit the join at vertex `j` between the edge with normal `k` and the edge with normal `j`,
    /// returns the next `k`.
    fn offset_point(&mut self, j: usize, k: usize, join: JoinStyle) -> usize {
        let delta = self.params.delta;
        let (nk, nj) = (self.normals[k], self.normals[j]);
        self.sin_a = nk.perp_dot(nj);

        if (self.sin_a * delta).abs() < 1.0 {
            // almost collinear, a single point is enough unless the path folds back on itself
            if nk.dot(nj) > 0.0 {
                self.push_offset(j, nk);
                return j;
            }
        } else {
            self.sin_a = self.sin_a.clamp(-1.0, 1.0);
        }

        if self.sin_a * delta < 0.0 {
            // concave, pass through the vertex and let the union clean up
            self.push_offset(j, nk);
            self.dest.push(self.src[j]);
            self.push_offset(j, nj);
        } else {
            match join {
                JoinStyle::Miter => {
                    let r = 1.0 + nj.dot(nk);
                    if r >= self.params.miter_lim {
                        self.do_miter(j, k, r);
                    } else {
                        self.do_square(j, k);
                    }
                }
                JoinStyle::Square => self.do_square(j, k),
                JoinStyle::Round => self.do_round(j, k),
            }
        }
        j
    }

    /// Square join: true corner for turns up to 90 degrees, beyond that both offset edges are
    /// extended by `delta` past the vertex and connected.
    fn do_square(&mut self, j: usize, k: usize) {
        let (nk, nj) = (self.normals[k], self.normals[j]);
        let cos_a = nk.dot(nj);
        if cos_a >= 0.0 {
            self.do_miter(j, k, 1.0 + cos_a);
            return;
        }

        let delta = self.params.delta;
        let ext = delta.abs();
        let pt = self.src[j];
        let p1 = nk.scale(delta) + travel_dir(nk).scale(ext);
        let p2 = nj.scale(delta) - travel_dir(nj).scale(ext);
        for p in [p1, p2] {
            self.dest.push(offset_pt(pt, p, 1.0));
        }
    }

    fn do_miter(&mut self, j: usize, k: usize, r: f64) {
        let q = self.params.delta / r;
        let n = self.normals[k] + self.normals[j];
        self.dest.push(offset_pt(self.src[j], n, q));
    }

    fn do_round(&mut self, j: usize, k: usize) {
        let (nk, nj) = (self.normals[k], self.normals[j]);
        let a = self.sin_a.atan2(nk.dot(nj));
        let steps = round_half_away(self.params.steps_per_rad * a.abs())
            .clamp(1, MAX_ARC_STEPS as i64);

        let mut v = nk;
        for _ in 0..steps {
            self.push_offset(j, v);
            v = self.rotate(v);
        }
        self.push_offset(j, nj);
    }
}
