//! Output rings built by the sweep: point rings, hole state, merging of rings that share edges and
//! the final cleanup into paths.
use super::clip_edges::{Direction, EdgeSide, HORIZONTAL};
use super::clip_engine::ClipEngine;
use crate::core::math::{
    pt2_is_between_pt1_and_pt3, slopes_equal3, slopes_equal4, IntPoint,
};
use crate::error::{ClipError, Result};
use crate::path::queries::classify_segments;
use crate::path::{Path, PointContainment};

/// Vertex of an output ring, rings are circular doubly linked lists through `next` and `prev`.
#[derive(Debug, Clone)]
pub(super) struct OutPt {
    /// Output record the point was added to.
    pub idx: usize,
    pub pt: IntPoint,
    pub next: usize,
    pub prev: usize,
}

/// Output polygon or polyline under construction.
#[derive(Debug, Clone)]
pub(super) struct OutRec {
    /// Index of the record this one was merged into (itself while still live).
    pub idx: usize,
    pub is_hole: bool,
    pub is_open: bool,
    /// Nearest record to the left when this one was started, used to derive hole state.
    pub first_left: Option<usize>,
    /// Left most point of the ring, `None` once the record is emptied or merged away.
    pub pts: Option<usize>,
    pub bottom_pt: Option<usize>,
}

/// Pair of output points on overlapping collinear edges that should be merged after the sweep.
#[derive(Debug, Clone)]
pub(super) struct Join {
    pub out_pt1: usize,
    pub out_pt2: usize,
    pub off_pt: IntPoint,
}

/// Horizontal output edge remembered for one scanbeam, may become a [Join].
#[derive(Debug, Clone)]
pub(super) struct GhostJoin {
    pub out_pt: usize,
    pub off_pt: IntPoint,
}

const MISSING_RING: ClipError =
    ClipError::AlgorithmicInvariant("edge refers to an output record without points");

fn overlap(a1: i64, a2: i64, b1: i64, b2: i64) -> Option<(i64, i64)> {
    let left = a1.min(a2).max(b1.min(b2));
    let right = a1.max(a2).min(b1.max(b2));
    (left < right).then_some((left, right))
}

fn pts_dx(pt1: IntPoint, pt2: IntPoint) -> f64 {
    if pt1.y == pt2.y {
        HORIZONTAL
    } else {
        (pt2.x - pt1.x) as f64 / (pt2.y - pt1.y) as f64
    }
}

impl ClipEngine {
    fn create_out_rec(&mut self) -> usize {
        let idx = self.out_recs.len();
        self.out_recs.push(OutRec {
            idx,
            is_hole: false,
            is_open: false,
            first_left: None,
            pts: None,
            bottom_pt: None,
        });
        idx
    }

    fn rec_pts(&self, rec: usize) -> Result<usize> {
        self.out_recs[rec].pts.ok_or(MISSING_RING)
    }

    /// Follow merged records to the live one.
    fn out_rec_of(&self, idx: usize) -> usize {
        let mut rec = idx;
        while rec != self.out_recs[rec].idx {
            rec = self.out_recs[rec].idx;
        }
        rec
    }

    /// Add `pt` to the output ring of edge `e`, starting a new ring if the edge has none.
    ///
    /// Points are prepended for left side edges and appended for right side edges.
    pub(super) fn add_out_pt(&mut self, e: usize, pt: IntPoint) -> Result<usize> {
        let Some(rec) = self.edges[e].out_idx else {
            let rec = self.create_out_rec();
            let is_open = self.edges[e].wind_delta == 0;
            self.out_recs[rec].is_open = is_open;
            let op = self.out_pts.len();
            self.out_pts.push(OutPt {
                idx: rec,
                pt,
                next: op,
                prev: op,
            });
            self.out_recs[rec].pts = Some(op);
            if !is_open {
                self.set_hole_state(e, rec);
            }
            self.edges[e].out_idx = Some(rec);
            return Ok(op);
        };

        let op = self.rec_pts(rec)?;
        let back = self.out_pts[op].prev;
        let to_front = self.edges[e].side == EdgeSide::Left;
        if to_front && pt == self.out_pts[op].pt {
            return Ok(op);
        }
        if !to_front && pt == self.out_pts[back].pt {
            return Ok(back);
        }

        let new_op = self.out_pts.len();
        self.out_pts.push(OutPt {
            idx: self.out_recs[rec].idx,
            pt,
            next: op,
            prev: back,
        });
        self.out_pts[back].next = new_op;
        self.out_pts[op].prev = new_op;
        if to_front {
            self.out_recs[rec].pts = Some(new_op);
        }
        Ok(new_op)
    }

    /// Most recently added point on the side of the ring edge `e` is building.
    pub(super) fn last_out_pt(&self, e: usize) -> Result<usize> {
        let rec = self.edges[e].out_idx.ok_or(MISSING_RING)?;
        let op = self.rec_pts(rec)?;
        Ok(match self.edges[e].side {
            EdgeSide::Left => op,
            EdgeSide::Right => self.out_pts[op].prev,
        })
    }

    fn set_hole_state(&mut self, e: usize, rec: usize) {
        let mut e2 = self.edges[e].prev_in_ael;
        let mut e_tmp: Option<usize> = None;
        while let Some(curr) = e2 {
            let edge = &self.edges[curr];
            if edge.out_idx.is_some() && edge.wind_delta != 0 {
                match e_tmp {
                    None => e_tmp = Some(curr),
                    Some(t) if self.edges[t].out_idx == edge.out_idx => e_tmp = None,
                    Some(_) => {}
                }
            }
            e2 = edge.prev_in_ael;
        }

        match e_tmp.and_then(|t| self.edges[t].out_idx) {
            None => {
                self.out_recs[rec].first_left = None;
                self.out_recs[rec].is_hole = false;
            }
            Some(left) => {
                self.out_recs[rec].first_left = Some(left);
                self.out_recs[rec].is_hole = !self.out_recs[left].is_hole;
            }
        }
    }

    pub(super) fn add_join(&mut self, out_pt1: usize, out_pt2: usize, off_pt: IntPoint) {
        self.joins.push(Join {
            out_pt1,
            out_pt2,
            off_pt,
        });
    }

    pub(super) fn add_ghost_join(&mut self, out_pt: usize, off_pt: IntPoint) {
        self.ghost_joins.push(GhostJoin { out_pt, off_pt });
    }

    /// Start a new ring where two edges meet at a local minimum of the output.
    pub(super) fn add_local_min_poly(&mut self, e1: usize, e2: usize, pt: IntPoint) -> Result<usize> {
        let (result, e, prev_e);
        if self.edges[e2].is_horizontal() || self.edges[e1].dx > self.edges[e2].dx {
            result = self.add_out_pt(e1, pt)?;
            self.edges[e2].out_idx = self.edges[e1].out_idx;
            self.edges[e1].side = EdgeSide::Left;
            self.edges[e2].side = EdgeSide::Right;
            e = e1;
            prev_e = if self.edges[e].prev_in_ael == Some(e2) {
                self.edges[e2].prev_in_ael
            } else {
                self.edges[e].prev_in_ael
            };
        } else {
            result = self.add_out_pt(e2, pt)?;
            self.edges[e1].out_idx = self.edges[e2].out_idx;
            self.edges[e1].side = EdgeSide::Right;
            self.edges[e2].side = EdgeSide::Left;
            e = e2;
            prev_e = if self.edges[e].prev_in_ael == Some(e1) {
                self.edges[e1].prev_in_ael
            } else {
                self.edges[e].prev_in_ael
            };
        }

        if let Some(prev_e) = prev_e {
            let (pe, ee) = (&self.edges[prev_e], &self.edges[e]);
            if pe.out_idx.is_some() && pe.top.y < pt.y && ee.top.y < pt.y {
                let x_prev = pe.top_x(pt.y);
                let x_e = ee.top_x(pt.y);
                if x_prev == x_e
                    && ee.wind_delta != 0
                    && pe.wind_delta != 0
                    && slopes_equal4(
                        IntPoint::new(x_prev, pt.y),
                        pe.top,
                        IntPoint::new(x_e, pt.y),
                        ee.top,
                    )
                {
                    let off_pt = ee.top;
                    let out_pt = self.add_out_pt(prev_e, pt)?;
                    self.add_join(result, out_pt, off_pt);
                }
            }
        }

        Ok(result)
    }

    /// Close off (or merge) the rings of two edges meeting at a local maximum.
    pub(super) fn add_local_max_poly(&mut self, e1: usize, e2: usize, pt: IntPoint) -> Result<()> {
        self.add_out_pt(e1, pt)?;
        if self.edges[e2].wind_delta == 0 {
            self.add_out_pt(e2, pt)?;
        }

        let (idx1, idx2) = (self.edges[e1].out_idx, self.edges[e2].out_idx);
        if idx1 == idx2 {
            self.edges[e1].out_idx = None;
            self.edges[e2].out_idx = None;
            Ok(())
        } else if idx1 < idx2 {
            self.append_polygon(e1, e2)
        } else {
            self.append_polygon(e2, e1)
        }
    }

    /// Join the ring of `e2` onto the ring of `e1`.
    fn append_polygon(&mut self, e1: usize, e2: usize) -> Result<()> {
        let rec1 = self.edges[e1].out_idx.ok_or(MISSING_RING)?;
        let rec2 = self.edges[e2].out_idx.ok_or(MISSING_RING)?;

        let hole_state_rec = if self.rec1_right_of_rec2(rec1, rec2) {
            rec2
        } else if self.rec1_right_of_rec2(rec2, rec1) {
            rec1
        } else {
            self.lowermost_rec(rec1, rec2)?
        };

        let p1_lft = self.rec_pts(rec1)?;
        let p1_rt = self.out_pts[p1_lft].prev;
        let p2_lft = self.rec_pts(rec2)?;
        let p2_rt = self.out_pts[p2_lft].prev;

        let side1 = self.edges[e1].side;
        let side2 = self.edges[e2].side;
        match (side1, side2) {
            (EdgeSide::Left, EdgeSide::Left) => {
                // z y x a b c
                self.reverse_links(p2_lft);
                self.out_pts[p2_lft].next = p1_lft;
                self.out_pts[p1_lft].prev = p2_lft;
                self.out_pts[p1_rt].next = p2_rt;
                self.out_pts[p2_rt].prev = p1_rt;
                self.out_recs[rec1].pts = Some(p2_rt);
            }
            (EdgeSide::Left, EdgeSide::Right) => {
                // x y z a b c
                self.out_pts[p2_rt].next = p1_lft;
                self.out_pts[p1_lft].prev = p2_rt;
                self.out_pts[p2_lft].prev = p1_rt;
                self.out_pts[p1_rt].next = p2_lft;
                self.out_recs[rec1].pts = Some(p2_lft);
            }
            (EdgeSide::Right, EdgeSide::Right) => {
                // a b c z y x
                self.reverse_links(p2_lft);
                self.out_pts[p1_rt].next = p2_rt;
                self.out_pts[p2_rt].prev = p1_rt;
                self.out_pts[p2_lft].next = p1_lft;
                self.out_pts[p1_lft].prev = p2_lft;
            }
            (EdgeSide::Right, EdgeSide::Left) => {
                // a b c x y z
                self.out_pts[p1_rt].next = p2_lft;
                self.out_pts[p2_lft].prev = p1_rt;
                self.out_pts[p1_lft].prev = p2_rt;
                self.out_pts[p2_rt].next = p1_lft;
            }
        }

        self.out_recs[rec1].bottom_pt = None;
        if hole_state_rec == rec2 {
            if self.out_recs[rec2].first_left != Some(rec1) {
                self.out_recs[rec1].first_left = self.out_recs[rec2].first_left;
            }
            self.out_recs[rec1].is_hole = self.out_recs[rec2].is_hole;
        }
        self.out_recs[rec2].pts = None;
        self.out_recs[rec2].bottom_pt = None;
        self.out_recs[rec2].first_left = Some(rec1);

        let ok_idx = self.edges[e1].out_idx;
        let obsolete_idx = self.edges[e2].out_idx;
        self.edges[e1].out_idx = None;
        self.edges[e2].out_idx = None;

        let mut e = self.active_edges;
        while let Some(curr) = e {
            if self.edges[curr].out_idx == obsolete_idx {
                self.edges[curr].out_idx = ok_idx;
                self.edges[curr].side = side1;
                break;
            }
            e = self.edges[curr].next_in_ael;
        }

        self.out_recs[rec2].idx = self.out_recs[rec1].idx;
        Ok(())
    }

    fn reverse_links(&mut self, start: usize) {
        let mut p = start;
        loop {
            let next = self.out_pts[p].next;
            self.out_pts[p].next = self.out_pts[p].prev;
            self.out_pts[p].prev = next;
            p = next;
            if p == start {
                break;
            }
        }
    }

    fn ring_len(&self, start: usize) -> usize {
        let mut count = 1;
        let mut p = self.out_pts[start].next;
        while p != start {
            count += 1;
            p = self.out_pts[p].next;
        }
        count
    }

    /// Area of the ring in the orientation it is emitted in (walking `prev` links).
    fn ring_area(&self, start: usize) -> f64 {
        let mut a = 0.0;
        let mut op = start;
        loop {
            let prev = &self.out_pts[self.out_pts[op].prev].pt;
            let pt = &self.out_pts[op].pt;
            a += (prev.x as f64 + pt.x as f64) * (prev.y as f64 - pt.y as f64);
            op = self.out_pts[op].next;
            if op == start {
                break;
            }
        }
        a * 0.5
    }

    /// Reverse the ring of `rec` if its orientation does not match its hole state.
    pub(super) fn fix_orientation(&mut self, rec: usize) {
        let Some(pts) = self.out_recs[rec].pts else {
            return;
        };
        let is_hole = self.out_recs[rec].is_hole;
        if (is_hole ^ self.reverse_output) == (self.ring_area(pts) > 0.0) {
            self.reverse_links(pts);
        }
    }

    fn rec1_right_of_rec2(&self, rec1: usize, rec2: usize) -> bool {
        let mut rec = Some(rec1);
        for _ in 0..self.out_recs.len() {
            rec = rec.and_then(|r| self.out_recs[r].first_left);
            match rec {
                Some(r) if r == rec2 => return true,
                None => return false,
                _ => {}
            }
        }
        false
    }

    fn lowermost_rec(&mut self, rec1: usize, rec2: usize) -> Result<usize> {
        for rec in [rec1, rec2] {
            if self.out_recs[rec].bottom_pt.is_none() {
                let pts = self.rec_pts(rec)?;
                self.out_recs[rec].bottom_pt = Some(self.bottom_pt(pts));
            }
        }
        let (Some(b1), Some(b2)) = (self.out_recs[rec1].bottom_pt, self.out_recs[rec2].bottom_pt)
        else {
            return Err(MISSING_RING);
        };

        let (p1, p2) = (self.out_pts[b1].pt, self.out_pts[b2].pt);
        Ok(if p1.y > p2.y {
            rec1
        } else if p1.y < p2.y {
            rec2
        } else if p1.x < p2.x {
            rec1
        } else if p1.x > p2.x {
            rec2
        } else if self.out_pts[b1].next == b1 {
            rec2
        } else if self.out_pts[b2].next == b2 || self.first_is_bottom_pt(b1, b2) {
            rec1
        } else {
            rec2
        })
    }

    /// Lowest (greatest y, then least x) point of the ring starting at `pp`.
    fn bottom_pt(&self, mut pp: usize) -> usize {
        let pts = &self.out_pts;
        let mut dups = None;
        let mut p = pts[pp].next;
        while p != pp {
            if pts[p].pt.y > pts[pp].pt.y {
                pp = p;
                dups = None;
            } else if pts[p].pt.y == pts[pp].pt.y && pts[p].pt.x <= pts[pp].pt.x {
                if pts[p].pt.x < pts[pp].pt.x {
                    dups = None;
                    pp = p;
                } else if pts[p].next != pp && pts[p].prev != pp {
                    dups = Some(p);
                }
            }
            p = pts[p].next;
        }

        if let Some(mut dup) = dups {
            // at least two vertices share the bottom point
            while dup != p {
                if !self.first_is_bottom_pt(p, dup) {
                    pp = dup;
                }
                dup = pts[dup].next;
                while pts[dup].pt != pts[pp].pt {
                    dup = pts[dup].next;
                }
            }
        }
        pp
    }

    fn first_is_bottom_pt(&self, btm1: usize, btm2: usize) -> bool {
        let pts = &self.out_pts;
        let neighbour_dx = |start: usize, forward: bool| {
            let step = |p: usize| if forward { pts[p].next } else { pts[p].prev };
            let mut p = step(start);
            while pts[p].pt == pts[start].pt && p != start {
                p = step(p);
            }
            pts_dx(pts[start].pt, pts[p].pt).abs()
        };

        let dx1p = neighbour_dx(btm1, false);
        let dx1n = neighbour_dx(btm1, true);
        let dx2p = neighbour_dx(btm2, false);
        let dx2n = neighbour_dx(btm2, true);

        if dx1p.max(dx1n) == dx2p.max(dx2n) && dx1p.min(dx1n) == dx2p.min(dx2n) {
            self.ring_area(btm1) > 0.0
        } else {
            (dx1p >= dx2p && dx1p >= dx2n) || (dx1n >= dx2p && dx1n >= dx2n)
        }
    }

    fn ring_segments(&self, start: usize) -> Vec<(IntPoint, IntPoint)> {
        let mut result = Vec::new();
        let mut op = start;
        loop {
            let next = self.out_pts[op].next;
            result.push((self.out_pts[op].pt, self.out_pts[next].pt));
            op = next;
            if op == start {
                break;
            }
        }
        result
    }

    /// Returns `true` if the ring at `out_pt1` lies inside the ring at `out_pt2`, judged by the
    /// first vertex of ring 1 not on the boundary of ring 2.
    fn poly2_contains_poly1(&self, out_pt1: usize, out_pt2: usize) -> bool {
        let segments = self.ring_segments(out_pt2);
        let mut op = out_pt1;
        loop {
            match classify_segments(self.out_pts[op].pt, segments.iter().copied()) {
                PointContainment::Inside => return true,
                PointContainment::Outside => return false,
                PointContainment::OnBoundary => {}
            }
            op = self.out_pts[op].next;
            if op == out_pt1 {
                break;
            }
        }
        true
    }

    fn update_out_pt_idxs(&mut self, rec: usize) {
        let Some(start) = self.out_recs[rec].pts else {
            return;
        };
        let idx = self.out_recs[rec].idx;
        let mut op = start;
        loop {
            self.out_pts[op].idx = idx;
            op = self.out_pts[op].prev;
            if op == start {
                break;
            }
        }
    }

    fn dup_out_pt(&mut self, op: usize, insert_after: bool) -> usize {
        let result = self.out_pts.len();
        let (pt, idx, next, prev) = {
            let o = &self.out_pts[op];
            (o.pt, o.idx, o.next, o.prev)
        };
        if insert_after {
            self.out_pts.push(OutPt {
                idx,
                pt,
                next,
                prev: op,
            });
            self.out_pts[next].prev = result;
            self.out_pts[op].next = result;
        } else {
            self.out_pts.push(OutPt {
                idx,
                pt,
                next: op,
                prev,
            });
            self.out_pts[prev].next = result;
            self.out_pts[op].prev = result;
        }
        result
    }

    /// Cross link the rings at `op1` and `op2` (duplicating both points), returns the duplicate of
    /// `op1` which now starts the second ring.
    fn splice_join(&mut self, op1: usize, op2: usize, reverse1: bool) -> usize {
        if reverse1 {
            let op1b = self.dup_out_pt(op1, false);
            let op2b = self.dup_out_pt(op2, true);
            self.out_pts[op1].prev = op2;
            self.out_pts[op2].next = op1;
            self.out_pts[op1b].next = op2b;
            self.out_pts[op2b].prev = op1b;
            op1b
        } else {
            let op1b = self.dup_out_pt(op1, true);
            let op2b = self.dup_out_pt(op2, false);
            self.out_pts[op1].next = op2;
            self.out_pts[op2].prev = op1;
            self.out_pts[op1b].prev = op2b;
            self.out_pts[op2b].next = op1b;
            op1b
        }
    }

    /// Next point after `op` (forward or backward) that is not at `pt`.
    fn skip_equal(&self, op: usize, pt: IntPoint, forward: bool) -> usize {
        let step = |p: usize| {
            if forward {
                self.out_pts[p].next
            } else {
                self.out_pts[p].prev
            }
        };
        let mut p = step(op);
        while p != op && self.out_pts[p].pt == pt {
            p = step(p);
        }
        p
    }

    fn join_points(&mut self, j: &mut Join, rec1: usize, rec2: usize) -> bool {
        let mut op1 = j.out_pt1;
        let mut op2 = j.out_pt2;
        let off = j.off_pt;
        let is_horizontal = self.out_pts[op1].pt.y == off.y;

        if is_horizontal && off == self.out_pts[op1].pt && off == self.out_pts[op2].pt {
            // edges touch at a single point
            if rec1 != rec2 {
                return false;
            }
            let reverse1 = self.out_pts[self.skip_equal(op1, off, true)].pt.y > off.y;
            let reverse2 = self.out_pts[self.skip_equal(op2, off, true)].pt.y > off.y;
            if reverse1 == reverse2 {
                return false;
            }
            let op1b = self.splice_join(op1, op2, reverse1);
            j.out_pt1 = op1;
            j.out_pt2 = op1b;
            return true;
        }

        if is_horizontal {
            // the points may be anywhere along the collinear horizontal edges, find their
            // extremes first
            let y = |engine: &Self, p: usize| engine.out_pts[p].pt.y;
            let mut op1b = op1;
            while y(self, self.out_pts[op1].prev) == y(self, op1)
                && self.out_pts[op1].prev != op1b
                && self.out_pts[op1].prev != op2
            {
                op1 = self.out_pts[op1].prev;
            }
            while y(self, self.out_pts[op1b].next) == y(self, op1b)
                && self.out_pts[op1b].next != op1
                && self.out_pts[op1b].next != op2
            {
                op1b = self.out_pts[op1b].next;
            }
            if self.out_pts[op1b].next == op1 || self.out_pts[op1b].next == op2 {
                // flat ring
                return false;
            }

            let mut op2b = op2;
            while y(self, self.out_pts[op2].prev) == y(self, op2)
                && self.out_pts[op2].prev != op2b
                && self.out_pts[op2].prev != op1b
            {
                op2 = self.out_pts[op2].prev;
            }
            while y(self, self.out_pts[op2b].next) == y(self, op2b)
                && self.out_pts[op2b].next != op2
                && self.out_pts[op2b].next != op1
            {
                op2b = self.out_pts[op2b].next;
            }
            if self.out_pts[op2b].next == op2 || self.out_pts[op2b].next == op1 {
                return false;
            }

            let (p1, p1b, p2, p2b) = (
                self.out_pts[op1].pt,
                self.out_pts[op1b].pt,
                self.out_pts[op2].pt,
                self.out_pts[op2b].pt,
            );
            let Some((left, right)) = overlap(p1.x, p1b.x, p2.x, p2b.x) else {
                return false;
            };

            // the join leaves a spike that is discarded, keep op1 and op2 off the discarded side
            // since other joins may still need them
            let in_range = |x: i64| x >= left && x <= right;
            let (pt, discard_left) = if in_range(p1.x) {
                (p1, p1.x > p1b.x)
            } else if in_range(p2.x) {
                (p2, p2.x > p2b.x)
            } else if in_range(p1b.x) {
                (p1b, p1b.x > p1.x)
            } else {
                (p2b, p2b.x > p2.x)
            };
            j.out_pt1 = op1;
            j.out_pt2 = op2;
            return self.join_horz(op1, op1b, op2, op2b, pt, discard_left);
        }

        // non horizontal: both points are at the bottom of the overlap with off_pt above
        let Some((op1b, reverse1)) = self.join_partner(op1, off) else {
            return false;
        };
        let Some((op2b, reverse2)) = self.join_partner(op2, off) else {
            return false;
        };
        if op1b == op1 || op2b == op2 || op1b == op2b || (rec1 == rec2 && reverse1 == reverse2) {
            return false;
        }

        let op1b = self.splice_join(op1, op2, reverse1);
        j.out_pt1 = op1;
        j.out_pt2 = op1b;
        true
    }

    /// Neighbour of `op` running up toward `off` along the shared edge, and whether it was found
    /// walking backward.
    fn join_partner(&self, op: usize, off: IntPoint) -> Option<(usize, bool)> {
        let pt = self.out_pts[op].pt;
        let heads_up = |b: usize| {
            let b_pt = self.out_pts[b].pt;
            b_pt.y <= pt.y && slopes_equal3(pt, b_pt, off)
        };

        let forward = self.skip_equal(op, pt, true);
        if heads_up(forward) {
            return Some((forward, false));
        }
        let backward = self.skip_equal(op, pt, false);
        heads_up(backward).then_some((backward, true))
    }

    fn join_horz(
        &mut self,
        op1: usize,
        op1b: usize,
        op2: usize,
        op2b: usize,
        pt: IntPoint,
        discard_left: bool,
    ) -> bool {
        let direction = |engine: &Self, a: usize, b: usize| {
            if engine.out_pts[a].pt.x > engine.out_pts[b].pt.x {
                Direction::RightToLeft
            } else {
                Direction::LeftToRight
            }
        };
        let dir1 = direction(self, op1, op1b);
        let dir2 = direction(self, op2, op2b);
        if dir1 == dir2 {
            return false;
        }

        let (op1, op1b) = self.align_horz_join(op1, dir1, pt, discard_left);
        let (op2, op2b) = self.align_horz_join(op2, dir2, pt, discard_left);

        if (dir1 == Direction::LeftToRight) == discard_left {
            self.out_pts[op1].prev = op2;
            self.out_pts[op2].next = op1;
            self.out_pts[op1b].next = op2b;
            self.out_pts[op2b].prev = op1b;
        } else {
            self.out_pts[op1].next = op2;
            self.out_pts[op2].prev = op1;
            self.out_pts[op1b].prev = op2b;
            self.out_pts[op2b].next = op1b;
        }
        true
    }

    /// Move `op` along its horizontal run to `pt` and duplicate it there, returns the point and
    /// its duplicate.
    fn align_horz_join(
        &mut self,
        mut op: usize,
        dir: Direction,
        pt: IntPoint,
        discard_left: bool,
    ) -> (usize, usize) {
        loop {
            let curr = self.out_pts[op].pt;
            let next = self.out_pts[self.out_pts[op].next].pt;
            let advance = match dir {
                Direction::LeftToRight => next.x <= pt.x && next.x >= curr.x,
                Direction::RightToLeft => next.x >= pt.x && next.x <= curr.x,
            };
            if !advance || next.y != pt.y {
                break;
            }
            op = self.out_pts[op].next;
        }

        let insert_after = match dir {
            Direction::LeftToRight => !discard_left,
            Direction::RightToLeft => discard_left,
        };
        if !insert_after && self.out_pts[op].pt.x != pt.x {
            op = self.out_pts[op].next;
        }
        let mut opb = self.dup_out_pt(op, insert_after);
        if self.out_pts[opb].pt != pt {
            op = opb;
            self.out_pts[op].pt = pt;
            opb = self.dup_out_pt(op, insert_after);
        }
        (op, opb)
    }

    /// Merge rings sharing collinear edges (or split a ring touching itself) for every join
    /// recorded during the sweep.
    pub(super) fn join_common_edges(&mut self) -> Result<()> {
        for i in 0..self.joins.len() {
            let mut join = self.joins[i].clone();
            let rec1 = self.out_rec_of(self.out_pts[join.out_pt1].idx);
            let mut rec2 = self.out_rec_of(self.out_pts[join.out_pt2].idx);

            if self.out_recs[rec1].pts.is_none() || self.out_recs[rec2].pts.is_none() {
                continue;
            }
            if self.out_recs[rec1].is_open || self.out_recs[rec2].is_open {
                continue;
            }

            let hole_state_rec = if rec1 == rec2 {
                rec1
            } else if self.rec1_right_of_rec2(rec1, rec2) {
                rec2
            } else if self.rec1_right_of_rec2(rec2, rec1) {
                rec1
            } else {
                self.lowermost_rec(rec1, rec2)?
            };

            if !self.join_points(&mut join, rec1, rec2) {
                continue;
            }

            if rec1 == rec2 {
                // the ring was split in two
                self.out_recs[rec1].pts = Some(join.out_pt1);
                self.out_recs[rec1].bottom_pt = None;
                rec2 = self.create_out_rec();
                self.out_recs[rec2].pts = Some(join.out_pt2);
                self.update_out_pt_idxs(rec2);

                if self.poly2_contains_poly1(join.out_pt2, join.out_pt1) {
                    self.out_recs[rec2].is_hole = !self.out_recs[rec1].is_hole;
                    self.out_recs[rec2].first_left = Some(rec1);
                    self.fix_orientation(rec2);
                } else if self.poly2_contains_poly1(join.out_pt1, join.out_pt2) {
                    self.out_recs[rec2].is_hole = self.out_recs[rec1].is_hole;
                    self.out_recs[rec1].is_hole = !self.out_recs[rec2].is_hole;
                    self.out_recs[rec2].first_left = self.out_recs[rec1].first_left;
                    self.out_recs[rec1].first_left = Some(rec2);
                    self.fix_orientation(rec1);
                } else {
                    self.out_recs[rec2].is_hole = self.out_recs[rec1].is_hole;
                    self.out_recs[rec2].first_left = self.out_recs[rec1].first_left;
                }
            } else {
                // two rings became one
                self.out_recs[rec2].pts = None;
                self.out_recs[rec2].bottom_pt = None;
                self.out_recs[rec2].idx = self.out_recs[rec1].idx;

                self.out_recs[rec1].is_hole = self.out_recs[hole_state_rec].is_hole;
                if hole_state_rec == rec2 {
                    self.out_recs[rec1].first_left = self.out_recs[rec2].first_left;
                }
                self.out_recs[rec2].first_left = Some(rec1);
            }
        }
        Ok(())
    }

    /// Remove duplicate points and collinear vertices (spikes only when preserving collinear
    /// points), emptying rings that collapse below 3 points.
    pub(super) fn fixup_out_polygon(&mut self, rec: usize) {
        self.out_recs[rec].bottom_pt = None;
        let Some(mut pp) = self.out_recs[rec].pts else {
            return;
        };

        let mut last_ok = None;
        loop {
            let (prev, next) = (self.out_pts[pp].prev, self.out_pts[pp].next);
            if prev == pp || prev == next {
                self.out_recs[rec].pts = None;
                return;
            }

            let (p0, p1, p2) = (
                self.out_pts[prev].pt,
                self.out_pts[pp].pt,
                self.out_pts[next].pt,
            );
            if p1 == p2
                || p1 == p0
                || (slopes_equal3(p0, p1, p2)
                    && (!self.preserve_collinear || !pt2_is_between_pt1_and_pt3(p0, p1, p2)))
            {
                last_ok = None;
                self.out_pts[prev].next = next;
                self.out_pts[next].prev = prev;
                pp = prev;
            } else if last_ok == Some(pp) {
                break;
            } else {
                if last_ok.is_none() {
                    last_ok = Some(pp);
                }
                pp = next;
            }
        }
        self.out_recs[rec].pts = Some(pp);
    }

    /// Remove consecutive duplicate points from an open output path.
    pub(super) fn fixup_out_polyline(&mut self, rec: usize) {
        let Some(mut pp) = self.out_recs[rec].pts else {
            return;
        };
        let mut last_pp = self.out_pts[pp].prev;
        while pp != last_pp {
            pp = self.out_pts[pp].next;
            let prev = self.out_pts[pp].prev;
            if self.out_pts[pp].pt == self.out_pts[prev].pt {
                if pp == last_pp {
                    last_pp = prev;
                }
                let next = self.out_pts[pp].next;
                self.out_pts[prev].next = next;
                self.out_pts[next].prev = prev;
                pp = prev;
            }
        }

        if pp == self.out_pts[pp].prev {
            self.out_recs[rec].pts = None;
        }
    }

    /// Collect the finished rings as paths.
    pub(super) fn build_result(&self) -> Vec<Path> {
        let mut result = Vec::new();
        for rec in self.out_recs.iter() {
            let Some(pts) = rec.pts else {
                continue;
            };
            let start = self.out_pts[pts].prev;
            let count = self.ring_len(start);
            let min_count = if rec.is_open { 2 } else { 3 };
            if count < min_count {
                continue;
            }

            let mut path = Path::with_capacity(count, !rec.is_open);
            let mut p = start;
            for _ in 0..count {
                path.push(self.out_pts[p].pt);
                p = self.out_pts[p].prev;
            }
            result.push(path);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlap_ranges() {
        assert_eq!(overlap(0, 10, 5, 20), Some((5, 10)));
        assert_eq!(overlap(10, 0, 20, 5), Some((5, 10)));
        assert_eq!(overlap(0, 10, 10, 20), None);
    }

    #[test]
    fn dx_of_points() {
        assert_eq!(pts_dx(IntPoint::new(0, 0), IntPoint::new(5, 0)), HORIZONTAL);
        assert_eq!(pts_dx(IntPoint::new(0, 0), IntPoint::new(5, 10)), 0.5);
    }
}
