//! Edge arena for the sweep: building bounds from input paths and maintaining the active and
//! sorted edge lists.
use super::clip_engine::ClipEngine;
use crate::core::math::{
    check_coord_range, pt2_is_between_pt1_and_pt3, round_half_away, slopes_equal3, IntPoint,
};
use crate::error::{ClipError, Result};
use crate::path::{Path, PathRole};

/// Slope value marking a horizontal edge.
pub(super) const HORIZONTAL: f64 = -1.0e40;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(super) enum EdgeSide {
    Left,
    Right,
}

/// Which of the two intrusive lists an operation applies to.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(super) enum EdgeList {
    Active,
    Sorted,
}

/// Non horizontal direction of travel along a horizontal edge.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(super) enum Direction {
    LeftToRight,
    RightToLeft,
}

/// Edge of an input path. `bot` always has the greater (or equal) y, the sweep runs from large y
/// to small y.
#[derive(Debug, Clone)]
pub(super) struct Edge {
    pub bot: IntPoint,
    pub curr: IntPoint,
    pub top: IntPoint,
    /// Change in x per unit of y, [HORIZONTAL] for horizontal edges.
    pub dx: f64,
    pub role: PathRole,
    pub side: EdgeSide,
    /// 1 or -1 depending on direction of travel relative to the bound, 0 for open paths.
    pub wind_delta: i32,
    /// Winding count for the edge's own role.
    pub wind_cnt: i32,
    /// Winding count for the opposite role.
    pub wind_cnt2: i32,
    /// Output record the edge is currently contributing to.
    pub out_idx: Option<usize>,
    /// Edge ends an open path and is not part of any bound.
    pub skip: bool,
    pub next: usize,
    pub prev: usize,
    pub next_in_lml: Option<usize>,
    pub next_in_ael: Option<usize>,
    pub prev_in_ael: Option<usize>,
    pub next_in_sel: Option<usize>,
    pub prev_in_sel: Option<usize>,
}

impl Edge {
    fn new(pt: IntPoint, next: usize, prev: usize, role: PathRole) -> Self {
        Edge {
            bot: IntPoint::default(),
            curr: pt,
            top: IntPoint::default(),
            dx: 0.0,
            role,
            side: EdgeSide::Left,
            wind_delta: 0,
            wind_cnt: 0,
            wind_cnt2: 0,
            out_idx: None,
            skip: false,
            next,
            prev,
            next_in_lml: None,
            next_in_ael: None,
            prev_in_ael: None,
            next_in_sel: None,
            prev_in_sel: None,
        }
    }

    #[inline]
    pub fn is_horizontal(&self) -> bool {
        self.dx == HORIZONTAL
    }

    /// X position of the edge at `y`.
    #[inline]
    pub fn top_x(&self, y: i64) -> i64 {
        if y == self.top.y {
            return self.top.x;
        }
        let offset = round_half_away(self.dx * (y as f64 - self.bot.y as f64));
        self.bot.x.saturating_add(offset)
    }

    fn set_dx(&mut self) {
        let dy = self.top.y - self.bot.y;
        self.dx = if dy == 0 {
            HORIZONTAL
        } else {
            (self.top.x - self.bot.x) as f64 / dy as f64
        };
    }

    fn reverse_horizontal(&mut self) {
        std::mem::swap(&mut self.top.x, &mut self.bot.x);
    }

    pub(super) fn horz_direction(&self) -> (Direction, i64, i64) {
        if self.bot.x < self.top.x {
            (Direction::LeftToRight, self.bot.x, self.top.x)
        } else {
            (Direction::RightToLeft, self.top.x, self.bot.x)
        }
    }
}

/// Start of a pair of bounds (either may be missing for open paths).
#[derive(Debug, Clone)]
pub(super) struct LocalMinimum {
    pub y: i64,
    pub left_bound: Option<usize>,
    pub right_bound: Option<usize>,
}

#[derive(Debug, Clone)]
pub(super) struct IntersectNode {
    pub edge1: usize,
    pub edge2: usize,
    pub pt: IntPoint,
}

impl ClipEngine {
    /// Add a path's edges to the engine.
    ///
    /// Returns `Ok(false)` if the path was skipped as degenerate.
    pub(crate) fn add_path(&mut self, path: &Path, role: PathRole) -> Result<bool> {
        let is_closed = path.is_closed;
        if !is_closed && role == PathRole::Clip {
            return Err(ClipError::config("open paths may only be clipping subjects"));
        }

        for pt in path.iter() {
            check_coord_range(*pt)?;
        }

        let pts = &path.points;
        if pts.is_empty() {
            return Ok(false);
        }

        let mut high = pts.len() - 1;
        if is_closed {
            while high > 0 && pts[high] == pts[0] {
                high -= 1;
            }
        }
        while high > 0 && pts[high] == pts[high - 1] {
            high -= 1;
        }
        if (is_closed && high < 2) || (!is_closed && high < 1) {
            log::trace!("skipping degenerate path with {} points", pts.len());
            return Ok(false);
        }

        let base = self.edges.len();
        for (i, pt) in pts.iter().enumerate().take(high + 1) {
            let next = if i == high { base } else { base + i + 1 };
            let prev = if i == 0 { base + high } else { base + i - 1 };
            self.edges.push(Edge::new(*pt, next, prev, role));
        }

        // remove duplicate vertices and (when closed) collinear edges
        let mut e_start = base;
        let mut e = e_start;
        let mut e_loop_stop = e_start;
        loop {
            let next = self.edges[e].next;
            if self.edges[e].curr == self.edges[next].curr && (is_closed || next != e_start) {
                if e == next {
                    break;
                }
                if e == e_start {
                    e_start = next;
                }
                e = self.remove_edge(e);
                e_loop_stop = e;
                continue;
            }

            let prev = self.edges[e].prev;
            if prev == next {
                // only two vertices left
                break;
            }

            let (p0, p1, p2) = (
                self.edges[prev].curr,
                self.edges[e].curr,
                self.edges[next].curr,
            );
            if is_closed
                && slopes_equal3(p0, p1, p2)
                && (!self.preserve_collinear || !pt2_is_between_pt1_and_pt3(p0, p1, p2))
            {
                if e == e_start {
                    e_start = next;
                }
                e = self.remove_edge(e);
                e = self.edges[e].prev;
                e_loop_stop = e;
                continue;
            }

            e = self.edges[e].next;
            if e == e_loop_stop || (!is_closed && self.edges[e].next == e_start) {
                break;
            }
        }

        if (!is_closed && e == self.edges[e].next)
            || (is_closed && self.edges[e].prev == self.edges[e].next)
        {
            log::trace!("skipping path that collapsed after removing duplicate/collinear points");
            self.edges.truncate(base);
            return Ok(false);
        }

        if !is_closed {
            self.has_open_paths = true;
            let last = self.edges[e_start].prev;
            self.edges[last].skip = true;
        }

        let mut is_flat = true;
        e = e_start;
        loop {
            self.init_edge_bounds(e);
            e = self.edges[e].next;
            if is_flat && self.edges[e].curr.y != self.edges[e_start].curr.y {
                is_flat = false;
            }
            if e == e_start {
                break;
            }
        }

        if is_flat {
            if is_closed {
                log::trace!("skipping flat closed path");
                self.edges.truncate(base);
                return Ok(false);
            }
            // open horizontal line, added as a single right bound
            let last = self.edges[e].prev;
            self.edges[last].skip = true;
            let local_min = LocalMinimum {
                y: self.edges[e].bot.y,
                left_bound: None,
                right_bound: Some(e),
            };
            self.edges[e].side = EdgeSide::Right;
            self.edges[e].wind_delta = 0;
            loop {
                let prev = self.edges[e].prev;
                if self.edges[e].bot.x != self.edges[prev].top.x {
                    self.edges[e].reverse_horizontal();
                }
                let next = self.edges[e].next;
                if self.edges[next].skip {
                    break;
                }
                self.edges[e].next_in_lml = Some(next);
                e = next;
            }
            self.minima.push(local_min);
            return Ok(true);
        }

        let mut e_min = None;
        // avoid looping forever on open paths with matching start and end points
        let prev = self.edges[e].prev;
        if self.edges[prev].bot == self.edges[prev].top {
            e = self.edges[e].next;
        }

        loop {
            e = self.find_next_loc_min(e);
            if e_min == Some(e) {
                break;
            }
            if e_min.is_none() {
                e_min = Some(e);
            }

            // e and e.prev share the local minimum, compare slopes to find which starts which
            // bound
            let prev = self.edges[e].prev;
            let y = self.edges[e].bot.y;
            let (left, right, left_is_forward) = if self.edges[e].dx < self.edges[prev].dx {
                (prev, e, false)
            } else {
                (e, prev, true)
            };

            let wind_delta = if !is_closed {
                0
            } else if self.edges[left].next == right {
                -1
            } else {
                1
            };
            self.edges[left].wind_delta = wind_delta;
            self.edges[right].wind_delta = -wind_delta;

            let mut left_end = self.process_bound(left, left_is_forward);
            if self.edges[left_end].skip {
                left_end = self.process_bound(left_end, left_is_forward);
            }
            let mut right_end = self.process_bound(right, !left_is_forward);
            if self.edges[right_end].skip {
                right_end = self.process_bound(right_end, !left_is_forward);
            }

            let (left_bound, right_bound) = if self.edges[left].skip {
                (None, Some(right))
            } else if self.edges[right].skip {
                (Some(left), None)
            } else {
                (Some(left), Some(right))
            };
            self.minima.push(LocalMinimum {
                y,
                left_bound,
                right_bound,
            });

            e = if left_is_forward { left_end } else { right_end };
        }

        Ok(true)
    }

    /// Add every path of `paths` with the same role, returns `true` if any path was added.
    pub(crate) fn add_paths<'a, I>(&mut self, paths: I, role: PathRole) -> Result<bool>
    where
        I: IntoIterator<Item = &'a Path>,
    {
        let mut any = false;
        for path in paths {
            any |= self.add_path(path, role)?;
        }
        Ok(any)
    }

    fn remove_edge(&mut self, e: usize) -> usize {
        let (prev, next) = (self.edges[e].prev, self.edges[e].next);
        self.edges[prev].next = next;
        self.edges[next].prev = prev;
        next
    }

    fn init_edge_bounds(&mut self, e: usize) {
        let next_pt = self.edges[self.edges[e].next].curr;
        let edge = &mut self.edges[e];
        if edge.curr.y >= next_pt.y {
            edge.bot = edge.curr;
            edge.top = next_pt;
        } else {
            edge.top = edge.curr;
            edge.bot = next_pt;
        }
        edge.set_dx();
    }

    fn find_next_loc_min(&self, mut e: usize) -> usize {
        let edges = &self.edges;
        loop {
            while edges[e].bot != edges[edges[e].prev].bot || edges[e].curr == edges[e].top {
                e = edges[e].next;
            }
            if !edges[e].is_horizontal() && !edges[edges[e].prev].is_horizontal() {
                break;
            }
            while edges[edges[e].prev].is_horizontal() {
                e = edges[e].prev;
            }
            let e2 = e;
            while edges[e].is_horizontal() {
                e = edges[e].next;
            }
            if edges[e].top.y == edges[edges[e].prev].bot.y {
                // just an intermediate horizontal
                continue;
            }
            if edges[edges[e2].prev].bot.x < edges[e].bot.x {
                e = e2;
            }
            break;
        }
        e
    }

    /// Link the edges of one bound through `next_in_lml`, returns the edge just past the bound.
    fn process_bound(&mut self, mut e: usize, next_is_forward: bool) -> usize {
        let mut result = e;

        if self.edges[e].skip {
            // if edges remain in the bound beyond the skip edge start another local minimum
            if next_is_forward {
                while self.edges[e].top.y == self.edges[self.edges[e].next].bot.y {
                    e = self.edges[e].next;
                }
                // top horizontals belong to the opposite bound
                while e != result && self.edges[e].is_horizontal() {
                    e = self.edges[e].prev;
                }
            } else {
                while self.edges[e].top.y == self.edges[self.edges[e].prev].bot.y {
                    e = self.edges[e].prev;
                }
                while e != result && self.edges[e].is_horizontal() {
                    e = self.edges[e].next;
                }
            }

            if e == result {
                result = if next_is_forward {
                    self.edges[e].next
                } else {
                    self.edges[e].prev
                };
            } else {
                e = if next_is_forward {
                    self.edges[result].next
                } else {
                    self.edges[result].prev
                };
                let local_min = LocalMinimum {
                    y: self.edges[e].bot.y,
                    left_bound: None,
                    right_bound: Some(e),
                };
                self.edges[e].wind_delta = 0;
                result = self.process_bound(e, next_is_forward);
                self.minima.push(local_min);
            }
            return result;
        }

        if self.edges[e].is_horizontal() {
            // may not be a true local minimum when following a skip edge, consecutive
            // horizontals may also start heading left before going right
            let e_start = if next_is_forward {
                self.edges[e].prev
            } else {
                self.edges[e].next
            };
            let (start_bot_x, start_top_x) = (self.edges[e_start].bot.x, self.edges[e_start].top.x);
            let bot_x = self.edges[e].bot.x;
            if self.edges[e_start].is_horizontal() {
                if start_bot_x != bot_x && start_top_x != bot_x {
                    self.edges[e].reverse_horizontal();
                }
            } else if start_bot_x != bot_x {
                self.edges[e].reverse_horizontal();
            }
        }

        let e_start = e;
        if next_is_forward {
            loop {
                let next = self.edges[result].next;
                if self.edges[result].top.y == self.edges[next].bot.y && !self.edges[next].skip {
                    result = next;
                } else {
                    break;
                }
            }
            let next = self.edges[result].next;
            if self.edges[result].is_horizontal() && !self.edges[next].skip {
                // top horizontals join the bound only when the preceding edge attaches to their
                // left vertex
                let mut horz = result;
                while self.edges[self.edges[horz].prev].is_horizontal() {
                    horz = self.edges[horz].prev;
                }
                let horz_prev = self.edges[horz].prev;
                if self.edges[horz_prev].top.x > self.edges[next].top.x {
                    result = horz_prev;
                }
            }
            while e != result {
                let next = self.edges[e].next;
                self.edges[e].next_in_lml = Some(next);
                self.reverse_bound_horizontal(e, e_start, true);
                e = next;
            }
            self.reverse_bound_horizontal(e, e_start, true);
            self.edges[result].next
        } else {
            loop {
                let prev = self.edges[result].prev;
                if self.edges[result].top.y == self.edges[prev].bot.y && !self.edges[prev].skip {
                    result = prev;
                } else {
                    break;
                }
            }
            let prev = self.edges[result].prev;
            if self.edges[result].is_horizontal() && !self.edges[prev].skip {
                let mut horz = result;
                while self.edges[self.edges[horz].next].is_horizontal() {
                    horz = self.edges[horz].next;
                }
                let horz_next = self.edges[horz].next;
                if self.edges[horz_next].top.x >= self.edges[prev].top.x {
                    result = horz_next;
                }
            }
            while e != result {
                let prev = self.edges[e].prev;
                self.edges[e].next_in_lml = Some(prev);
                self.reverse_bound_horizontal(e, e_start, false);
                e = prev;
            }
            self.reverse_bound_horizontal(e, e_start, false);
            self.edges[result].prev
        }
    }

    /// Orient a horizontal inside a bound so its bottom attaches to the preceding edge's top.
    fn reverse_bound_horizontal(&mut self, e: usize, e_start: usize, forward: bool) {
        if e == e_start || !self.edges[e].is_horizontal() {
            return;
        }
        let before = if forward {
            self.edges[e].prev
        } else {
            self.edges[e].next
        };
        if self.edges[e].bot.x != self.edges[before].top.x {
            self.edges[e].reverse_horizontal();
        }
    }

    fn list_next(&self, e: usize, list: EdgeList) -> Option<usize> {
        match list {
            EdgeList::Active => self.edges[e].next_in_ael,
            EdgeList::Sorted => self.edges[e].next_in_sel,
        }
    }

    fn list_prev(&self, e: usize, list: EdgeList) -> Option<usize> {
        match list {
            EdgeList::Active => self.edges[e].prev_in_ael,
            EdgeList::Sorted => self.edges[e].prev_in_sel,
        }
    }

    fn set_list_next(&mut self, e: usize, list: EdgeList, value: Option<usize>) {
        match list {
            EdgeList::Active => self.edges[e].next_in_ael = value,
            EdgeList::Sorted => self.edges[e].next_in_sel = value,
        }
    }

    fn set_list_prev(&mut self, e: usize, list: EdgeList, value: Option<usize>) {
        match list {
            EdgeList::Active => self.edges[e].prev_in_ael = value,
            EdgeList::Sorted => self.edges[e].prev_in_sel = value,
        }
    }

    fn set_list_head(&mut self, list: EdgeList, value: Option<usize>) {
        match list {
            EdgeList::Active => self.active_edges = value,
            EdgeList::Sorted => self.sorted_edges = value,
        }
    }

    fn list_head(&self, list: EdgeList) -> Option<usize> {
        match list {
            EdgeList::Active => self.active_edges,
            EdgeList::Sorted => self.sorted_edges,
        }
    }

    /// Returns `true` if `e2` belongs before `e1` in the active edge list.
    fn e2_inserts_before_e1(&self, e1: usize, e2: usize) -> bool {
        let (e1, e2) = (&self.edges[e1], &self.edges[e2]);
        if e2.curr.x == e1.curr.x {
            if e2.top.y > e1.top.y {
                e2.top.x < e1.top_x(e2.top.y)
            } else {
                e1.top.x > e2.top_x(e1.top.y)
            }
        } else {
            e2.curr.x < e1.curr.x
        }
    }

    pub(super) fn insert_edge_into_ael(&mut self, edge: usize, start_edge: Option<usize>) {
        let Some(head) = self.active_edges else {
            self.edges[edge].prev_in_ael = None;
            self.edges[edge].next_in_ael = None;
            self.active_edges = Some(edge);
            return;
        };

        if start_edge.is_none() && self.e2_inserts_before_e1(head, edge) {
            self.edges[edge].prev_in_ael = None;
            self.edges[edge].next_in_ael = Some(head);
            self.edges[head].prev_in_ael = Some(edge);
            self.active_edges = Some(edge);
            return;
        }

        let mut start = start_edge.unwrap_or(head);
        while let Some(next) = self.edges[start].next_in_ael {
            if self.e2_inserts_before_e1(next, edge) {
                break;
            }
            start = next;
        }
        let next = self.edges[start].next_in_ael;
        self.edges[edge].next_in_ael = next;
        if let Some(next) = next {
            self.edges[next].prev_in_ael = Some(edge);
        }
        self.edges[edge].prev_in_ael = Some(start);
        self.edges[start].next_in_ael = Some(edge);
    }

    pub(super) fn delete_from_list(&mut self, e: usize, list: EdgeList) {
        let prev = self.list_prev(e, list);
        let next = self.list_next(e, list);
        if prev.is_none() && next.is_none() && self.list_head(list) != Some(e) {
            // already deleted
            return;
        }
        match prev {
            Some(prev) => self.set_list_next(prev, list, next),
            None => self.set_list_head(list, next),
        }
        if let Some(next) = next {
            self.set_list_prev(next, list, prev);
        }
        self.set_list_next(e, list, None);
        self.set_list_prev(e, list, None);
    }

    pub(super) fn add_edge_to_sel(&mut self, e: usize) {
        self.edges[e].prev_in_sel = None;
        self.edges[e].next_in_sel = self.sorted_edges;
        if let Some(head) = self.sorted_edges {
            self.edges[head].prev_in_sel = Some(e);
        }
        self.sorted_edges = Some(e);
    }

    pub(super) fn pop_edge_from_sel(&mut self) -> Option<usize> {
        let e = self.sorted_edges?;
        self.delete_from_list(e, EdgeList::Sorted);
        Some(e)
    }

    pub(super) fn copy_ael_to_sel(&mut self) {
        let mut e = self.active_edges;
        self.sorted_edges = e;
        while let Some(curr) = e {
            self.edges[curr].prev_in_sel = self.edges[curr].prev_in_ael;
            self.edges[curr].next_in_sel = self.edges[curr].next_in_ael;
            e = self.edges[curr].next_in_ael;
        }
    }

    /// Swap two edges in the active or sorted list, a no-op if either is not in the list.
    pub(super) fn swap_positions(&mut self, e1: usize, e2: usize, list: EdgeList) {
        let detached = |engine: &Self, e: usize| {
            engine.list_next(e, list).is_none() && engine.list_prev(e, list).is_none()
        };
        if detached(self, e1) || detached(self, e2) {
            return;
        }

        if self.list_next(e1, list) == Some(e2) {
            let next = self.list_next(e2, list);
            if let Some(next) = next {
                self.set_list_prev(next, list, Some(e1));
            }
            let prev = self.list_prev(e1, list);
            if let Some(prev) = prev {
                self.set_list_next(prev, list, Some(e2));
            }
            self.set_list_prev(e2, list, prev);
            self.set_list_next(e2, list, Some(e1));
            self.set_list_prev(e1, list, Some(e2));
            self.set_list_next(e1, list, next);
        } else if self.list_next(e2, list) == Some(e1) {
            let next = self.list_next(e1, list);
            if let Some(next) = next {
                self.set_list_prev(next, list, Some(e2));
            }
            let prev = self.list_prev(e2, list);
            if let Some(prev) = prev {
                self.set_list_next(prev, list, Some(e1));
            }
            self.set_list_prev(e1, list, prev);
            self.set_list_next(e1, list, Some(e2));
            self.set_list_prev(e2, list, Some(e1));
            self.set_list_next(e2, list, next);
        } else {
            let next = self.list_next(e1, list);
            let prev = self.list_prev(e1, list);
            let e2_next = self.list_next(e2, list);
            let e2_prev = self.list_prev(e2, list);
            self.set_list_next(e1, list, e2_next);
            if let Some(n) = e2_next {
                self.set_list_prev(n, list, Some(e1));
            }
            self.set_list_prev(e1, list, e2_prev);
            if let Some(p) = e2_prev {
                self.set_list_next(p, list, Some(e1));
            }
            self.set_list_next(e2, list, next);
            if let Some(n) = next {
                self.set_list_prev(n, list, Some(e2));
            }
            self.set_list_prev(e2, list, prev);
            if let Some(p) = prev {
                self.set_list_next(p, list, Some(e2));
            }
        }

        if self.list_prev(e1, list).is_none() {
            self.set_list_head(list, Some(e1));
        } else if self.list_prev(e2, list).is_none() {
            self.set_list_head(list, Some(e2));
        }
    }

    /// Replace `e` in the active list with the next edge of its bound, returns the new edge.
    pub(super) fn update_edge_into_ael(&mut self, e: usize) -> Result<usize> {
        let next = self.edges[e]
            .next_in_lml
            .ok_or(ClipError::AlgorithmicInvariant(
                "edge promoted past the end of its bound",
            ))?;

        let (out_idx, side, wind_delta, wind_cnt, wind_cnt2) = {
            let edge = &self.edges[e];
            (
                edge.out_idx,
                edge.side,
                edge.wind_delta,
                edge.wind_cnt,
                edge.wind_cnt2,
            )
        };
        let ael_prev = self.edges[e].prev_in_ael;
        let ael_next = self.edges[e].next_in_ael;
        match ael_prev {
            Some(prev) => self.edges[prev].next_in_ael = Some(next),
            None => self.active_edges = Some(next),
        }
        if let Some(n) = ael_next {
            self.edges[n].prev_in_ael = Some(next);
        }

        let edge = &mut self.edges[next];
        edge.out_idx = out_idx;
        edge.side = side;
        edge.wind_delta = wind_delta;
        edge.wind_cnt = wind_cnt;
        edge.wind_cnt2 = wind_cnt2;
        edge.curr = edge.bot;
        edge.prev_in_ael = ael_prev;
        edge.next_in_ael = ael_next;
        if !edge.is_horizontal() {
            let top_y = edge.top.y;
            self.scanbeam.push(top_y);
        }

        Ok(next)
    }

    /// Point where edges `e1` and `e2` cross, clamped to the current scanbeam.
    pub(super) fn intersect_point(&self, e1: usize, e2: usize) -> IntPoint {
        let (edge1, edge2) = (&self.edges[e1], &self.edges[e2]);
        let mut ip = IntPoint::default();
        if edge1.dx == edge2.dx {
            ip.y = edge1.curr.y;
            ip.x = edge1.top_x(ip.y);
            return ip;
        }

        if edge1.dx == 0.0 {
            ip.x = edge1.bot.x;
            ip.y = if edge2.is_horizontal() {
                edge2.bot.y
            } else {
                let b2 = edge2.bot.y as f64 - edge2.bot.x as f64 / edge2.dx;
                round_half_away(ip.x as f64 / edge2.dx + b2)
            };
        } else if edge2.dx == 0.0 {
            ip.x = edge2.bot.x;
            ip.y = if edge1.is_horizontal() {
                edge1.bot.y
            } else {
                let b1 = edge1.bot.y as f64 - edge1.bot.x as f64 / edge1.dx;
                round_half_away(ip.x as f64 / edge1.dx + b1)
            };
        } else {
            let b1 = edge1.bot.x as f64 - edge1.bot.y as f64 * edge1.dx;
            let b2 = edge2.bot.x as f64 - edge2.bot.y as f64 * edge2.dx;
            let q = (b2 - b1) / (edge1.dx - edge2.dx);
            ip.y = round_half_away(q);
            ip.x = if edge1.dx.abs() < edge2.dx.abs() {
                round_half_away(edge1.dx * q + b1)
            } else {
                round_half_away(edge2.dx * q + b2)
            };
        }

        if ip.y < edge1.top.y || ip.y < edge2.top.y {
            ip.y = edge1.top.y.max(edge2.top.y);
            ip.x = if edge1.dx.abs() < edge2.dx.abs() {
                edge1.top_x(ip.y)
            } else {
                edge2.top_x(ip.y)
            };
        }

        // never below the bottom of the scanbeam, derive x from the more vertical edge
        if ip.y > edge1.curr.y {
            ip.y = edge1.curr.y;
            ip.x = if edge1.dx.abs() > edge2.dx.abs() {
                edge2.top_x(ip.y)
            } else {
                edge1.top_x(ip.y)
            };
        }

        ip
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> ClipEngine {
        ClipEngine::new(false, false)
    }

    #[test]
    fn degenerate_paths_skipped() {
        let mut e = engine();
        assert_eq!(e.add_path(&path_closed![(0, 0), (5, 5)], PathRole::Subject), Ok(false));
        assert_eq!(
            e.add_path(&path_closed![(0, 0), (5, 5), (10, 10)], PathRole::Subject),
            Ok(false)
        );
        assert_eq!(
            e.add_path(&path_closed![(0, 0), (5, 0), (9, 0), (0, 0)], PathRole::Subject),
            Ok(false)
        );
        assert_eq!(e.add_path(&path_open![(3, 3), (3, 3)], PathRole::Subject), Ok(false));
        assert!(e.edges.is_empty());
        assert!(e.minima.is_empty());
    }

    #[test]
    fn square_has_one_local_minimum() {
        let mut e = engine();
        let added = e
            .add_path(&path_closed![(0, 0), (10, 0), (10, 10), (0, 10)], PathRole::Subject)
            .unwrap();
        assert!(added);
        assert_eq!(e.minima.len(), 1);
        let lm = &e.minima[0];
        assert_eq!(lm.y, 10);
        assert!(lm.left_bound.is_some() && lm.right_bound.is_some());
    }

    #[test]
    fn open_clip_rejected() {
        let mut e = engine();
        assert!(matches!(
            e.add_path(&path_open![(0, 0), (10, 0)], PathRole::Clip),
            Err(ClipError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn out_of_range_rejected() {
        let mut e = engine();
        let path = path_closed![(0, 0), (i64::MAX, 0), (0, 10)];
        assert!(matches!(
            e.add_path(&path, PathRole::Subject),
            Err(ClipError::NumericOverflow { .. })
        ));
    }

    #[test]
    fn top_x_interpolates() {
        let mut e = engine();
        e.add_path(&path_closed![(0, 0), (10, 20), (-10, 20)], PathRole::Subject)
            .unwrap();
        let sloped = e
            .edges
            .iter()
            .find(|edge| !edge.is_horizontal() && edge.bot.x == 10)
            .unwrap();
        assert_eq!(sloped.top_x(10), 5);
        assert_eq!(sloped.top_x(0), 0);
    }
}
