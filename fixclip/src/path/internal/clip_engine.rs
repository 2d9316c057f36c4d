//! Sweep line (Vatti) boolean engine over fixed point paths.
//!
//! Edges are swept from the largest y to the smallest, scanbeam by scanbeam. Within each
//! scanbeam the active edge list holds the edges crossing it ordered by x, intersections are
//! resolved in order and winding counts decide which edges contribute output.
use super::clip_edges::{Direction, Edge, EdgeList, EdgeSide, IntersectNode, LocalMinimum};
use super::clip_output::{GhostJoin, Join, OutPt, OutRec};
use crate::core::math::{horz_segments_overlap, slopes_equal4, IntPoint};
use crate::error::{ClipError, Result};
use crate::path::{ClipOperation, FillRule, Path, PathRole};
use std::collections::BinaryHeap;

/// Single use engine: add subject and clip paths then consume it with [ClipEngine::execute].
#[derive(Debug, Clone)]
pub(crate) struct ClipEngine {
    pub(super) edges: Vec<Edge>,
    pub(super) minima: Vec<LocalMinimum>,
    current_lm: usize,
    pub(super) scanbeam: BinaryHeap<i64>,
    pub(super) active_edges: Option<usize>,
    pub(super) sorted_edges: Option<usize>,
    intersections: Vec<IntersectNode>,
    pub(super) out_recs: Vec<OutRec>,
    pub(super) out_pts: Vec<OutPt>,
    pub(super) joins: Vec<Join>,
    pub(super) ghost_joins: Vec<GhostJoin>,
    clip_op: ClipOperation,
    subject_fill: FillRule,
    clip_fill: FillRule,
    pub(super) preserve_collinear: bool,
    pub(super) reverse_output: bool,
    pub(super) has_open_paths: bool,
}

fn is_filled(fill: FillRule, wind_cnt2: i32) -> bool {
    match fill {
        FillRule::EvenOdd | FillRule::NonZero => wind_cnt2 != 0,
        FillRule::Positive => wind_cnt2 > 0,
        FillRule::Negative => wind_cnt2 < 0,
    }
}

/// Winding count normalized so that 0 and 1 are the "outside" and "inside" values for `fill`.
fn normalized_wind(fill: FillRule, wind_cnt: i32) -> i32 {
    match fill {
        FillRule::Positive => wind_cnt,
        FillRule::Negative => -wind_cnt,
        FillRule::EvenOdd | FillRule::NonZero => wind_cnt.abs(),
    }
}

impl ClipEngine {
    pub(crate) fn new(preserve_collinear: bool, reverse_output: bool) -> Self {
        ClipEngine {
            edges: Vec::new(),
            minima: Vec::new(),
            current_lm: 0,
            scanbeam: BinaryHeap::new(),
            active_edges: None,
            sorted_edges: None,
            intersections: Vec::new(),
            out_recs: Vec::new(),
            out_pts: Vec::new(),
            joins: Vec::new(),
            ghost_joins: Vec::new(),
            clip_op: ClipOperation::Intersection,
            subject_fill: FillRule::EvenOdd,
            clip_fill: FillRule::EvenOdd,
            preserve_collinear,
            reverse_output,
            has_open_paths: false,
        }
    }

    /// Run the boolean operation over all added paths.
    ///
    /// Outer rings are returned counter clockwise (positive area) and holes clockwise, reversed
    /// when the engine was created with `reverse_output`. Open subjects come back as open paths.
    pub(crate) fn execute(
        mut self,
        clip_op: ClipOperation,
        subject_fill: FillRule,
        clip_fill: FillRule,
    ) -> Result<Vec<Path>> {
        self.clip_op = clip_op;
        self.subject_fill = subject_fill;
        self.clip_fill = clip_fill;

        if self.minima.is_empty() {
            return Ok(Vec::new());
        }

        self.reset();
        self.sweep()?;

        for rec in 0..self.out_recs.len() {
            if !self.out_recs[rec].is_open {
                self.fix_orientation(rec);
            }
        }

        self.join_common_edges()?;

        for rec in 0..self.out_recs.len() {
            if self.out_recs[rec].pts.is_none() {
                continue;
            }
            if self.out_recs[rec].is_open {
                self.fixup_out_polyline(rec);
            } else {
                self.fixup_out_polygon(rec);
            }
        }

        let result = self.build_result();
        log::debug!(
            "{:?} over {} edges ({} local minima, open paths: {}) produced {} paths",
            clip_op,
            self.edges.len(),
            self.minima.len(),
            self.has_open_paths,
            result.len()
        );
        Ok(result)
    }

    fn reset(&mut self) {
        self.minima.sort_by(|a, b| b.y.cmp(&a.y));
        self.current_lm = 0;
        self.scanbeam.clear();
        self.active_edges = None;
        self.sorted_edges = None;

        for lm in self.minima.iter() {
            self.scanbeam.push(lm.y);
            for (bound, side) in [
                (lm.left_bound, EdgeSide::Left),
                (lm.right_bound, EdgeSide::Right),
            ] {
                if let Some(e) = bound {
                    let edge = &mut self.edges[e];
                    edge.curr = edge.bot;
                    edge.side = side;
                    edge.out_idx = None;
                }
            }
        }
    }

    fn sweep(&mut self) -> Result<()> {
        let Some(mut bot_y) = self.pop_scanbeam() else {
            return Ok(());
        };
        self.insert_local_minima_into_ael(bot_y)?;

        while let Some(top_y) = self.pop_scanbeam() {
            log::trace!("scanbeam {bot_y} -> {top_y}");
            self.process_horizontals()?;
            self.ghost_joins.clear();
            self.process_intersections(top_y)?;
            self.process_edges_at_top(top_y)?;
            bot_y = top_y;
            self.insert_local_minima_into_ael(bot_y)?;
        }

        Ok(())
    }

    fn pop_scanbeam(&mut self) -> Option<i64> {
        let y = self.scanbeam.pop()?;
        while self.scanbeam.peek() == Some(&y) {
            self.scanbeam.pop();
        }
        Some(y)
    }

    fn pop_local_minimum(&mut self, y: i64) -> Option<LocalMinimum> {
        let lm = self.minima.get(self.current_lm)?;
        if lm.y != y {
            return None;
        }
        self.current_lm += 1;
        Some(lm.clone())
    }

    fn fill_of(&self, role: PathRole) -> FillRule {
        match role {
            PathRole::Subject => self.subject_fill,
            PathRole::Clip => self.clip_fill,
        }
    }

    fn alt_fill_of(&self, role: PathRole) -> FillRule {
        match role {
            PathRole::Subject => self.clip_fill,
            PathRole::Clip => self.subject_fill,
        }
    }

    fn insert_local_minima_into_ael(&mut self, bot_y: i64) -> Result<()> {
        while let Some(lm) = self.pop_local_minimum(bot_y) {
            let mut op1 = None;
            match (lm.left_bound, lm.right_bound) {
                (None, Some(rb)) => {
                    self.insert_edge_into_ael(rb, None);
                    self.set_winding_count(rb);
                    if self.is_contributing(rb) {
                        op1 = Some(self.add_out_pt(rb, self.edges[rb].bot)?);
                    }
                }
                (Some(lb), None) => {
                    self.insert_edge_into_ael(lb, None);
                    self.set_winding_count(lb);
                    if self.is_contributing(lb) {
                        op1 = Some(self.add_out_pt(lb, self.edges[lb].bot)?);
                    }
                    self.scanbeam.push(self.edges[lb].top.y);
                }
                (Some(lb), Some(rb)) => {
                    self.insert_edge_into_ael(lb, None);
                    self.insert_edge_into_ael(rb, Some(lb));
                    self.set_winding_count(lb);
                    self.edges[rb].wind_cnt = self.edges[lb].wind_cnt;
                    self.edges[rb].wind_cnt2 = self.edges[lb].wind_cnt2;
                    if self.is_contributing(lb) {
                        op1 = Some(self.add_local_min_poly(lb, rb, self.edges[lb].bot)?);
                    }
                    self.scanbeam.push(self.edges[lb].top.y);
                }
                (None, None) => continue,
            }

            if let Some(rb) = lm.right_bound {
                if self.edges[rb].is_horizontal() {
                    self.add_edge_to_sel(rb);
                    if let Some(next) = self.edges[rb].next_in_lml {
                        self.scanbeam.push(self.edges[next].top.y);
                    }
                } else {
                    self.scanbeam.push(self.edges[rb].top.y);
                }
            }

            let (Some(lb), Some(rb)) = (lm.left_bound, lm.right_bound) else {
                continue;
            };

            // output rings that share an edge with the new local minimum are joined later
            if let Some(op1) = op1 {
                let rb_edge = &self.edges[rb];
                if rb_edge.is_horizontal() && rb_edge.wind_delta != 0 {
                    let (rb_bot_x, rb_top_x) = (rb_edge.bot.x, rb_edge.top.x);
                    for i in 0..self.ghost_joins.len() {
                        let ghost = self.ghost_joins[i].clone();
                        let ghost_x = self.out_pts[ghost.out_pt].pt.x;
                        if horz_segments_overlap(ghost_x, ghost.off_pt.x, rb_bot_x, rb_top_x) {
                            self.add_join(ghost.out_pt, op1, ghost.off_pt);
                        }
                    }
                }
            }

            if let (Some(op1), Some(prev)) = (op1, self.edges[lb].prev_in_ael) {
                let (l, p) = (&self.edges[lb], &self.edges[prev]);
                if l.out_idx.is_some()
                    && p.curr.x == l.bot.x
                    && p.out_idx.is_some()
                    && slopes_equal4(p.bot, p.top, l.curr, l.top)
                    && l.wind_delta != 0
                    && p.wind_delta != 0
                {
                    let (bot, top) = (l.bot, l.top);
                    let op2 = self.add_out_pt(prev, bot)?;
                    self.add_join(op1, op2, top);
                }
            }

            if self.edges[lb].next_in_ael != Some(rb) {
                if let (Some(op1), Some(prev)) = (op1, self.edges[rb].prev_in_ael) {
                    let (r, p) = (&self.edges[rb], &self.edges[prev]);
                    if r.out_idx.is_some()
                        && p.out_idx.is_some()
                        && slopes_equal4(p.curr, p.top, r.curr, r.top)
                        && r.wind_delta != 0
                        && p.wind_delta != 0
                    {
                        let (bot, top) = (r.bot, r.top);
                        let op2 = self.add_out_pt(prev, bot)?;
                        self.add_join(op1, op2, top);
                    }
                }

                let pt = self.edges[lb].curr;
                let mut e = self.edges[lb].next_in_ael;
                while let Some(curr) = e {
                    if curr == rb {
                        break;
                    }
                    // order matters here
                    self.intersect_edges(rb, curr, pt)?;
                    e = self.edges[curr].next_in_ael;
                }
            }
        }

        Ok(())
    }

    fn set_winding_count(&mut self, edge: usize) {
        let role = self.edges[edge].role;
        let wind_delta = self.edges[edge].wind_delta;

        let mut e = self.edges[edge].prev_in_ael;
        while let Some(curr) = e {
            let c = &self.edges[curr];
            if c.role == role && c.wind_delta != 0 {
                break;
            }
            e = c.prev_in_ael;
        }

        let (wind_cnt, wind_cnt2, mut e) = match e {
            None => {
                let wind_cnt = if wind_delta == 0 {
                    if self.fill_of(role) == FillRule::Negative {
                        -1
                    } else {
                        1
                    }
                } else {
                    wind_delta
                };
                (wind_cnt, 0, self.active_edges)
            }
            Some(prev) if wind_delta == 0 && self.clip_op != ClipOperation::Union => {
                (1, self.edges[prev].wind_cnt2, self.edges[prev].next_in_ael)
            }
            Some(prev) if self.fill_of(role) == FillRule::EvenOdd => {
                let wind_cnt = if wind_delta == 0 {
                    // open path inside a closed one only if an odd number of closed edges
                    // precede it
                    let prev_role = self.edges[prev].role;
                    let mut inside = true;
                    let mut e2 = self.edges[prev].prev_in_ael;
                    while let Some(curr) = e2 {
                        if self.edges[curr].role == prev_role && self.edges[curr].wind_delta != 0 {
                            inside = !inside;
                        }
                        e2 = self.edges[curr].prev_in_ael;
                    }
                    if inside {
                        0
                    } else {
                        1
                    }
                } else {
                    wind_delta
                };
                (wind_cnt, self.edges[prev].wind_cnt2, self.edges[prev].next_in_ael)
            }
            Some(prev) => {
                let p = &self.edges[prev];
                let wind_cnt = if p.wind_cnt * p.wind_delta < 0 {
                    // prev edge is heading into its polygon's interior
                    if p.wind_cnt.abs() > 1 {
                        if p.wind_delta * wind_delta < 0 {
                            p.wind_cnt
                        } else {
                            p.wind_cnt + wind_delta
                        }
                    } else if wind_delta == 0 {
                        1
                    } else {
                        wind_delta
                    }
                } else if wind_delta == 0 {
                    if p.wind_cnt < 0 {
                        p.wind_cnt - 1
                    } else {
                        p.wind_cnt + 1
                    }
                } else if p.wind_delta * wind_delta < 0 {
                    p.wind_cnt
                } else {
                    p.wind_cnt + wind_delta
                };
                (wind_cnt, p.wind_cnt2, p.next_in_ael)
            }
        };

        // the opposite role's count accumulates over every edge between e and edge
        let alt_even_odd = self.alt_fill_of(role) == FillRule::EvenOdd;
        let mut wind_cnt2 = wind_cnt2;
        while let Some(curr) = e {
            if curr == edge {
                break;
            }
            let c = &self.edges[curr];
            if alt_even_odd {
                if c.wind_delta != 0 {
                    wind_cnt2 = if wind_cnt2 == 0 { 1 } else { 0 };
                }
            } else {
                wind_cnt2 += c.wind_delta;
            }
            e = c.next_in_ael;
        }

        self.edges[edge].wind_cnt = wind_cnt;
        self.edges[edge].wind_cnt2 = wind_cnt2;
    }

    fn is_contributing(&self, edge: usize) -> bool {
        let e = &self.edges[edge];
        let fill = self.fill_of(e.role);
        let alt_fill = self.alt_fill_of(e.role);

        let own_ok = match fill {
            FillRule::EvenOdd => e.wind_delta != 0 || e.wind_cnt == 1,
            FillRule::NonZero => e.wind_cnt.abs() == 1,
            FillRule::Positive => e.wind_cnt == 1,
            FillRule::Negative => e.wind_cnt == -1,
        };
        if !own_ok {
            return false;
        }

        let inside_other = is_filled(alt_fill, e.wind_cnt2);
        match self.clip_op {
            ClipOperation::Intersection => inside_other,
            ClipOperation::Union => !inside_other,
            ClipOperation::Difference => match e.role {
                PathRole::Subject => !inside_other,
                PathRole::Clip => inside_other,
            },
            ClipOperation::Xor => e.wind_delta != 0 || !inside_other,
        }
    }

    fn swap_sides_and_outputs(&mut self, e1: usize, e2: usize) {
        let (side1, side2) = (self.edges[e1].side, self.edges[e2].side);
        self.edges[e1].side = side2;
        self.edges[e2].side = side1;
        let (out1, out2) = (self.edges[e1].out_idx, self.edges[e2].out_idx);
        self.edges[e1].out_idx = out2;
        self.edges[e2].out_idx = out1;
    }

    /// Update winding counts and output for edges `e1` and `e2` crossing at `pt`.
    fn intersect_edges(&mut self, e1: usize, e2: usize, pt: IntPoint) -> Result<()> {
        let e1_contributing = self.edges[e1].out_idx.is_some();
        let e2_contributing = self.edges[e2].out_idx.is_some();
        let (wd1, wd2) = (self.edges[e1].wind_delta, self.edges[e2].wind_delta);
        let (role1, role2) = (self.edges[e1].role, self.edges[e2].role);

        if wd1 == 0 || wd2 == 0 {
            // at least one open path, open paths never cross each other in a meaningful way
            if wd1 == 0 && wd2 == 0 {
                return Ok(());
            }
            if role1 == role2 && wd1 != wd2 && self.clip_op == ClipOperation::Union {
                if wd1 == 0 {
                    if e2_contributing {
                        self.add_out_pt(e1, pt)?;
                        if e1_contributing {
                            self.edges[e1].out_idx = None;
                        }
                    }
                } else if e1_contributing {
                    self.add_out_pt(e2, pt)?;
                    if e2_contributing {
                        self.edges[e2].out_idx = None;
                    }
                }
            } else if role1 != role2 {
                let union = self.clip_op == ClipOperation::Union;
                let (c1, c2) = (&self.edges[e1], &self.edges[e2]);
                if wd1 == 0 && c2.wind_cnt.abs() == 1 && (!union || c2.wind_cnt2 == 0) {
                    self.add_out_pt(e1, pt)?;
                    if e1_contributing {
                        self.edges[e1].out_idx = None;
                    }
                } else if wd2 == 0 && c1.wind_cnt.abs() == 1 && (!union || c1.wind_cnt2 == 0) {
                    self.add_out_pt(e2, pt)?;
                    if e2_contributing {
                        self.edges[e2].out_idx = None;
                    }
                }
            }
            return Ok(());
        }

        if role1 == role2 {
            if self.fill_of(role1) == FillRule::EvenOdd {
                let old = self.edges[e1].wind_cnt;
                self.edges[e1].wind_cnt = self.edges[e2].wind_cnt;
                self.edges[e2].wind_cnt = old;
            } else {
                let c1 = self.edges[e1].wind_cnt;
                self.edges[e1].wind_cnt = if c1 + wd2 == 0 { -c1 } else { c1 + wd2 };
                let c2 = self.edges[e2].wind_cnt;
                self.edges[e2].wind_cnt = if c2 - wd1 == 0 { -c2 } else { c2 - wd1 };
            }
        } else {
            let toggle = |w: i32| if w == 0 { 1 } else { 0 };
            if self.fill_of(role2) == FillRule::EvenOdd {
                self.edges[e1].wind_cnt2 = toggle(self.edges[e1].wind_cnt2);
            } else {
                self.edges[e1].wind_cnt2 += wd2;
            }
            if self.fill_of(role1) == FillRule::EvenOdd {
                self.edges[e2].wind_cnt2 = toggle(self.edges[e2].wind_cnt2);
            } else {
                self.edges[e2].wind_cnt2 -= wd1;
            }
        }

        let e1_wc = normalized_wind(self.fill_of(role1), self.edges[e1].wind_cnt);
        let e2_wc = normalized_wind(self.fill_of(role2), self.edges[e2].wind_cnt);
        let unit = |w: i32| w == 0 || w == 1;

        if e1_contributing && e2_contributing {
            if !unit(e1_wc)
                || !unit(e2_wc)
                || (role1 != role2 && self.clip_op != ClipOperation::Xor)
            {
                self.add_local_max_poly(e1, e2, pt)?;
            } else {
                self.add_out_pt(e1, pt)?;
                self.add_out_pt(e2, pt)?;
                self.swap_sides_and_outputs(e1, e2);
            }
        } else if e1_contributing {
            if unit(e2_wc) {
                self.add_out_pt(e1, pt)?;
                self.swap_sides_and_outputs(e1, e2);
            }
        } else if e2_contributing {
            if unit(e1_wc) {
                self.add_out_pt(e2, pt)?;
                self.swap_sides_and_outputs(e1, e2);
            }
        } else if unit(e1_wc) && unit(e2_wc) {
            // neither edge is contributing yet, a new local minimum may start here
            let e1_wc2 = normalized_wind(self.alt_fill_of(role1), self.edges[e1].wind_cnt2);
            let e2_wc2 = normalized_wind(self.alt_fill_of(role2), self.edges[e2].wind_cnt2);

            if role1 != role2 {
                self.add_local_min_poly(e1, e2, pt)?;
            } else if e1_wc == 1 && e2_wc == 1 {
                let starts = match self.clip_op {
                    ClipOperation::Intersection => e1_wc2 > 0 && e2_wc2 > 0,
                    ClipOperation::Union => e1_wc2 <= 0 && e2_wc2 <= 0,
                    ClipOperation::Difference => match role1 {
                        PathRole::Clip => e1_wc2 > 0 && e2_wc2 > 0,
                        PathRole::Subject => e1_wc2 <= 0 && e2_wc2 <= 0,
                    },
                    ClipOperation::Xor => true,
                };
                if starts {
                    self.add_local_min_poly(e1, e2, pt)?;
                }
            } else {
                let (side1, side2) = (self.edges[e1].side, self.edges[e2].side);
                self.edges[e1].side = side2;
                self.edges[e2].side = side1;
            }
        }

        Ok(())
    }

    fn next_in_ael_dir(&self, e: usize, dir: Direction) -> Option<usize> {
        match dir {
            Direction::LeftToRight => self.edges[e].next_in_ael,
            Direction::RightToLeft => self.edges[e].prev_in_ael,
        }
    }

    /// Edge sharing the top vertex of `e` that also ends its bound there.
    fn maxima_pair(&self, e: usize) -> Option<usize> {
        let edge = &self.edges[e];
        let (next, prev) = (&self.edges[edge.next], &self.edges[edge.prev]);
        if next.top == edge.top && next.next_in_lml.is_none() {
            Some(edge.next)
        } else if prev.top == edge.top && prev.next_in_lml.is_none() {
            Some(edge.prev)
        } else {
            None
        }
    }

    /// Like [Self::maxima_pair] but only for pairs still in the active list (or horizontal).
    fn maxima_pair_ex(&self, e: usize) -> Option<usize> {
        let pair = self.maxima_pair(e)?;
        let p = &self.edges[pair];
        if p.skip || (p.next_in_ael == p.prev_in_ael && !p.is_horizontal()) {
            None
        } else {
            Some(pair)
        }
    }

    fn process_horizontals(&mut self) -> Result<()> {
        while let Some(horz) = self.pop_edge_from_sel() {
            self.process_horizontal(horz)?;
        }
        Ok(())
    }

    fn join_overlapping_horizontals(&mut self, horz: usize, op1: usize) -> Result<()> {
        let (horz_bot_x, horz_top_x) = (self.edges[horz].bot.x, self.edges[horz].top.x);
        let mut next_horz = self.sorted_edges;
        while let Some(curr) = next_horz {
            let c = &self.edges[curr];
            if c.out_idx.is_some() && horz_segments_overlap(horz_bot_x, horz_top_x, c.bot.x, c.top.x)
            {
                let top = c.top;
                let op2 = self.last_out_pt(curr)?;
                self.add_join(op2, op1, top);
            }
            next_horz = self.edges[curr].next_in_sel;
        }
        Ok(())
    }

    /// Sweep a horizontal edge (and any consecutive horizontals in its bound) across the edges
    /// it touches.
    fn process_horizontal(&mut self, mut horz: usize) -> Result<()> {
        let is_open = self.edges[horz].wind_delta == 0;
        let (mut dir, mut horz_left, mut horz_right) = self.edges[horz].horz_direction();

        let mut last_horz = horz;
        while let Some(next) = self.edges[last_horz].next_in_lml {
            if !self.edges[next].is_horizontal() {
                break;
            }
            last_horz = next;
        }
        let max_pair = if self.edges[last_horz].next_in_lml.is_none() {
            self.maxima_pair(last_horz)
        } else {
            None
        };

        let mut op1 = None;
        loop {
            let is_last_horz = horz == last_horz;
            let mut e = self.next_in_ael_dir(horz, dir);
            while let Some(curr) = e {
                let curr_x = self.edges[curr].curr.x;
                match dir {
                    Direction::LeftToRight if curr_x > horz_right => break,
                    Direction::RightToLeft if curr_x < horz_left => break,
                    _ => {}
                }

                // stop at the end of an intermediate horizontal, smaller dx is to the right of
                // larger dx above the horizontal
                if curr_x == self.edges[horz].top.x {
                    if let Some(next) = self.edges[horz].next_in_lml {
                        if self.edges[curr].dx < self.edges[next].dx {
                            break;
                        }
                    }
                }

                if self.edges[horz].out_idx.is_some() && !is_open {
                    let op = self.add_out_pt(horz, self.edges[curr].curr)?;
                    op1 = Some(op);
                    self.join_overlapping_horizontals(horz, op)?;
                    self.add_ghost_join(op, self.edges[horz].bot);
                }

                if Some(curr) == max_pair && is_last_horz {
                    if self.edges[horz].out_idx.is_some() {
                        self.add_local_max_poly(horz, curr, self.edges[horz].top)?;
                    }
                    self.delete_from_list(horz, EdgeList::Active);
                    self.delete_from_list(curr, EdgeList::Active);
                    return Ok(());
                }

                let pt = IntPoint::new(curr_x, self.edges[horz].curr.y);
                match dir {
                    Direction::LeftToRight => self.intersect_edges(horz, curr, pt)?,
                    Direction::RightToLeft => self.intersect_edges(curr, horz, pt)?,
                }
                let next = self.next_in_ael_dir(curr, dir);
                self.swap_positions(horz, curr, EdgeList::Active);
                e = next;
            }

            match self.edges[horz].next_in_lml {
                Some(next) if self.edges[next].is_horizontal() => {}
                _ => break,
            }
            horz = self.update_edge_into_ael(horz)?;
            if self.edges[horz].out_idx.is_some() {
                self.add_out_pt(horz, self.edges[horz].bot)?;
            }
            (dir, horz_left, horz_right) = self.edges[horz].horz_direction();
        }

        if self.edges[horz].out_idx.is_some() && op1.is_none() {
            let op = self.last_out_pt(horz)?;
            self.join_overlapping_horizontals(horz, op)?;
            self.add_ghost_join(op, self.edges[horz].top);
        }

        if self.edges[horz].next_in_lml.is_none() {
            if self.edges[horz].out_idx.is_some() {
                self.add_out_pt(horz, self.edges[horz].top)?;
            }
            self.delete_from_list(horz, EdgeList::Active);
            return Ok(());
        }

        if self.edges[horz].out_idx.is_none() {
            self.update_edge_into_ael(horz)?;
            return Ok(());
        }

        let op1 = self.add_out_pt(horz, self.edges[horz].top)?;
        let horz = self.update_edge_into_ael(horz)?;
        if self.edges[horz].wind_delta == 0 {
            return Ok(());
        }

        // no longer horizontal, join with a collinear neighbour starting at the same point
        let h = &self.edges[horz];
        let (bot, top) = (h.bot, h.top);
        let neighbour = [h.prev_in_ael, h.next_in_ael]
            .into_iter()
            .flatten()
            .find(|&n| {
                let n = &self.edges[n];
                n.curr == bot
                    && n.wind_delta != 0
                    && n.out_idx.is_some()
                    && n.curr.y > n.top.y
                    && slopes_equal4(top, bot, n.top, n.bot)
            });
        if let Some(neighbour) = neighbour {
            let op2 = self.add_out_pt(neighbour, bot)?;
            self.add_join(op1, op2, top);
        }

        Ok(())
    }

    fn process_intersections(&mut self, top_y: i64) -> Result<()> {
        if self.active_edges.is_none() {
            return Ok(());
        }

        self.build_intersect_list(top_y);
        match self.intersections.len() {
            0 => return Ok(()),
            1 => {}
            _ => {
                if !self.fixup_intersection_order() {
                    self.intersections.clear();
                    return Err(ClipError::AlgorithmicInvariant(
                        "unable to order edge intersections within a scanbeam",
                    ));
                }
            }
        }

        self.process_intersect_list()?;
        self.sorted_edges = None;
        Ok(())
    }

    /// Bubble sort the edges by their x at `top_y`, every swap is an intersection.
    fn build_intersect_list(&mut self, top_y: i64) {
        let Some(head) = self.active_edges else {
            return;
        };

        self.sorted_edges = Some(head);
        let mut e = Some(head);
        while let Some(curr) = e {
            let edge = &mut self.edges[curr];
            edge.prev_in_sel = edge.prev_in_ael;
            edge.next_in_sel = edge.next_in_ael;
            edge.curr.x = edge.top_x(top_y);
            e = edge.next_in_ael;
        }

        loop {
            let mut is_modified = false;
            let Some(mut e) = self.sorted_edges else {
                break;
            };
            while let Some(next) = self.edges[e].next_in_sel {
                if self.edges[e].curr.x > self.edges[next].curr.x {
                    let mut pt = self.intersect_point(e, next);
                    if pt.y < top_y {
                        pt = IntPoint::new(self.edges[e].top_x(top_y), top_y);
                    }
                    self.intersections.push(IntersectNode {
                        edge1: e,
                        edge2: next,
                        pt,
                    });
                    self.swap_positions(e, next, EdgeList::Sorted);
                    is_modified = true;
                } else {
                    e = next;
                }
            }

            match self.edges[e].prev_in_sel {
                Some(prev) => self.edges[prev].next_in_sel = None,
                None => break,
            }
            if !is_modified {
                break;
            }
        }

        self.sorted_edges = None;
    }

    /// Order intersections so each one is between edges adjacent at the time it is processed.
    fn fixup_intersection_order(&mut self) -> bool {
        self.copy_ael_to_sel();
        self.intersections.sort_by(|a, b| b.pt.y.cmp(&a.pt.y));

        let adjacent = |engine: &Self, node: &IntersectNode| {
            let e1 = &engine.edges[node.edge1];
            e1.next_in_sel == Some(node.edge2) || e1.prev_in_sel == Some(node.edge2)
        };

        let count = self.intersections.len();
        for i in 0..count {
            if !adjacent(self, &self.intersections[i]) {
                let Some(j) = (i + 1..count).find(|&j| adjacent(self, &self.intersections[j]))
                else {
                    return false;
                };
                self.intersections.swap(i, j);
            }
            let (e1, e2) = (self.intersections[i].edge1, self.intersections[i].edge2);
            self.swap_positions(e1, e2, EdgeList::Sorted);
        }
        true
    }

    fn process_intersect_list(&mut self) -> Result<()> {
        let nodes = std::mem::take(&mut self.intersections);
        for node in nodes.iter() {
            self.intersect_edges(node.edge1, node.edge2, node.pt)?;
            self.swap_positions(node.edge1, node.edge2, EdgeList::Active);
        }
        Ok(())
    }

    fn is_maxima(&self, e: usize, y: i64) -> bool {
        self.edges[e].top.y == y && self.edges[e].next_in_lml.is_none()
    }

    fn is_intermediate(&self, e: usize, y: i64) -> bool {
        self.edges[e].top.y == y && self.edges[e].next_in_lml.is_some()
    }

    fn process_edges_at_top(&mut self, top_y: i64) -> Result<()> {
        let mut e = self.active_edges;
        while let Some(curr) = e {
            // maxima are treated as bent horizontals, except those paired with a horizontal
            let mut is_maxima_edge = self.is_maxima(curr, top_y);
            if is_maxima_edge {
                if let Some(pair) = self.maxima_pair_ex(curr) {
                    is_maxima_edge = !self.edges[pair].is_horizontal();
                }
            }

            if is_maxima_edge {
                let prev = self.edges[curr].prev_in_ael;
                self.do_maxima(curr)?;
                e = match prev {
                    Some(prev) => self.edges[prev].next_in_ael,
                    None => self.active_edges,
                };
                continue;
            }

            let mut curr = curr;
            let promote_to_horizontal = self.is_intermediate(curr, top_y)
                && self.edges[curr]
                    .next_in_lml
                    .is_some_and(|next| self.edges[next].is_horizontal());
            if promote_to_horizontal {
                curr = self.update_edge_into_ael(curr)?;
                if self.edges[curr].out_idx.is_some() {
                    self.add_out_pt(curr, self.edges[curr].bot)?;
                }
                self.add_edge_to_sel(curr);
            } else {
                let edge = &mut self.edges[curr];
                edge.curr = IntPoint::new(edge.top_x(top_y), top_y);
            }
            e = self.edges[curr].next_in_ael;
        }

        self.process_horizontals()?;

        // promote intermediate vertices
        let mut e = self.active_edges;
        while let Some(mut curr) = e {
            if self.is_intermediate(curr, top_y) {
                let op = match self.edges[curr].out_idx {
                    Some(_) => Some(self.add_out_pt(curr, self.edges[curr].top)?),
                    None => None,
                };
                curr = self.update_edge_into_ael(curr)?;

                // output rings sharing an edge get joined later
                let c = &self.edges[curr];
                let (c_curr, bot, top) = (c.curr, c.bot, c.top);
                let neighbour = [c.prev_in_ael, c.next_in_ael]
                    .into_iter()
                    .flatten()
                    .find(|&n| {
                        let n = &self.edges[n];
                        n.curr == bot
                            && n.out_idx.is_some()
                            && n.curr.y > n.top.y
                            && slopes_equal4(c_curr, top, n.curr, n.top)
                            && c.wind_delta != 0
                            && n.wind_delta != 0
                    });
                if let (Some(op), Some(neighbour)) = (op, neighbour) {
                    let op2 = self.add_out_pt(neighbour, bot)?;
                    self.add_join(op, op2, top);
                }
            }
            e = self.edges[curr].next_in_ael;
        }

        Ok(())
    }

    fn do_maxima(&mut self, e: usize) -> Result<()> {
        let Some(max_pair) = self.maxima_pair_ex(e) else {
            if self.edges[e].out_idx.is_some() {
                self.add_out_pt(e, self.edges[e].top)?;
            }
            self.delete_from_list(e, EdgeList::Active);
            return Ok(());
        };

        let top = self.edges[e].top;
        let mut next = self.edges[e].next_in_ael;
        while let Some(curr) = next {
            if curr == max_pair {
                break;
            }
            self.intersect_edges(e, curr, top)?;
            self.swap_positions(e, curr, EdgeList::Active);
            next = self.edges[e].next_in_ael;
        }

        match (self.edges[e].out_idx, self.edges[max_pair].out_idx) {
            (None, None) => {}
            (Some(_), Some(_)) => self.add_local_max_poly(e, max_pair, top)?,
            _ if self.edges[e].wind_delta == 0 => {
                for edge in [e, max_pair] {
                    if self.edges[edge].out_idx.is_some() {
                        self.add_out_pt(edge, top)?;
                        self.edges[edge].out_idx = None;
                    }
                }
            }
            _ => {
                return Err(ClipError::AlgorithmicInvariant(
                    "maxima pair with a single contributing closed edge",
                ))
            }
        }

        self.delete_from_list(e, EdgeList::Active);
        self.delete_from_list(max_pair, EdgeList::Active);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(subject: &[Path], clip: &[Path], op: ClipOperation, fill: FillRule) -> Vec<Path> {
        let mut engine = ClipEngine::new(false, false);
        engine.add_paths(subject, PathRole::Subject).unwrap();
        engine.add_paths(clip, PathRole::Clip).unwrap();
        engine.execute(op, fill, fill).unwrap()
    }

    fn total_area(paths: &[Path]) -> f64 {
        paths.iter().map(|p| p.signed_area()).sum()
    }

    fn square(x: i64, y: i64, size: i64) -> Path {
        path_closed![(x, y), (x + size, y), (x + size, y + size), (x, y + size)]
    }

    #[test]
    fn overlapping_squares_all_operations() {
        let subject = [square(0, 0, 10)];
        let clip = [square(5, 5, 10)];
        let cases = [
            (ClipOperation::Intersection, 25.0),
            (ClipOperation::Union, 175.0),
            (ClipOperation::Difference, 75.0),
            (ClipOperation::Xor, 150.0),
        ];
        for (op, expected) in cases {
            let result = run(&subject, &clip, op, FillRule::NonZero);
            assert!(!result.is_empty(), "{op:?}");
            assert_eq!(total_area(&result), expected, "{op:?}");
            assert!(result.iter().all(|p| p.is_closed && p.signed_area() > 0.0));
        }
    }

    #[test]
    fn intersection_is_exact_square() {
        let result = run(
            &[square(0, 0, 10)],
            &[square(5, 5, 10)],
            ClipOperation::Intersection,
            FillRule::EvenOdd,
        );
        assert_eq!(result.len(), 1);
        let path = &result[0];
        assert_eq!(path.len(), 4);
        for pt in [(5, 5), (10, 5), (10, 10), (5, 10)] {
            assert!(path.find_point(pt.into()).is_some(), "missing {pt:?}");
        }
    }

    #[test]
    fn nested_square_becomes_hole() {
        let result = run(
            &[square(0, 0, 10), square(3, 3, 4)],
            &[],
            ClipOperation::Union,
            FillRule::EvenOdd,
        );
        assert_eq!(result.len(), 2);
        let mut areas = result.iter().map(|p| p.signed_area()).collect::<Vec<_>>();
        areas.sort_by(|a, b| a.total_cmp(b));
        assert_eq!(areas, vec![-16.0, 100.0]);
    }

    #[test]
    fn reversed_output_flips_orientation() {
        let mut engine = ClipEngine::new(false, true);
        engine
            .add_path(&square(0, 0, 10), PathRole::Subject)
            .unwrap();
        let result = engine
            .execute(ClipOperation::Union, FillRule::NonZero, FillRule::NonZero)
            .unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].signed_area(), -100.0);
    }

    #[test]
    fn disjoint_intersection_is_empty() {
        let result = run(
            &[square(0, 0, 10)],
            &[square(20, 20, 10)],
            ClipOperation::Intersection,
            FillRule::EvenOdd,
        );
        assert!(result.is_empty());
    }

    #[test]
    fn open_subject_clipped_to_square() {
        let mut engine = ClipEngine::new(false, false);
        engine
            .add_path(&path_open![(-10, 0), (20, 6)], PathRole::Subject)
            .unwrap();
        engine.add_path(&square(0, 0, 10), PathRole::Clip).unwrap();
        let result = engine
            .execute(
                ClipOperation::Intersection,
                FillRule::EvenOdd,
                FillRule::EvenOdd,
            )
            .unwrap();
        assert_eq!(result.len(), 1);
        let line = &result[0];
        assert!(!line.is_closed);
        assert_eq!(line.len(), 2);
        let mut pts = line.points.clone();
        pts.sort_by_key(|p| p.x);
        assert_eq!(pts, vec![IntPoint::new(0, 2), IntPoint::new(10, 4)]);
    }

    #[test]
    fn no_paths_no_output() {
        let engine = ClipEngine::new(false, false);
        let result = engine
            .execute(ClipOperation::Union, FillRule::EvenOdd, FillRule::EvenOdd)
            .unwrap();
        assert!(result.is_empty());
    }
}
