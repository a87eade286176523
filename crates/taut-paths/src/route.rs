//! The any-angle search loop.
//!
//! A lazy Theta*-family search: standard priority-queue expansion with a
//! dual relaxation rule. When the angle from the current node's parent to
//! a successor falls inside the current node's visibility window, the
//! successor is connected straight to that parent, pulling the route
//! taut; otherwise the plain grid edge is used. No geometric line-of-sight
//! test is ever run — the angular window and the per-node line-of-sight
//! flag maintained by [`update_bounds`](Lattice::update_bounds) stand in
//! for it.

use taut_core::{OccupancyGrid, Vec2};

use crate::angle::signed_angle;
use crate::lattice::{Lattice, UNREACHED};
use crate::open::OpenSet;

/// Compute a taut route between two world points over an occupancy grid.
///
/// Endpoints snap to their nearest lattice nodes. Returns the route from
/// start to goal inclusive, or an empty vector when the goal cannot be
/// reached. Builds a fresh lattice; see [`Lattice::route`] to reuse a
/// pre-built one.
pub fn route(grid: &OccupancyGrid, from: Vec2, to: Vec2) -> Vec<Vec2> {
    Lattice::new(grid).route(from, to)
}

impl Lattice {
    /// Run the search on this lattice, consuming it.
    ///
    /// Taking `self` by value enforces the one-search-per-lattice
    /// contract: node state (costs, parents, bounds, line-of-sight flags)
    /// is mutated in place and is not reusable.
    pub fn route(mut self, from: Vec2, to: Vec2) -> Vec<Vec2> {
        let start = self.snap_idx(from);
        let goal = self.snap_idx(to);

        {
            let h = self.nodes[start].pos.distance(self.nodes[goal].pos);
            let node = &mut self.nodes[start];
            node.g = 0.0;
            node.parent = start;
            node.h = h;
            node.f = node.g + node.h;
            node.in_open = true;
        }
        let mut open = OpenSet::new();
        open.push(start, self.nodes[start].f);

        while let Some(entry) = open.pop() {
            let ci = entry.idx;
            if !self.nodes[ci].in_open {
                // Superseded by a later decrease-key reinsertion.
                continue;
            }
            self.nodes[ci].in_open = false;

            if ci == goal {
                return self.build_path(goal, start);
            }

            self.nodes[ci].closed = true;
            self.update_bounds(ci, start);

            for k in 0..self.nodes[ci].neighbors.len() {
                let ni = self.nodes[ci].neighbors[k];
                if self.nodes[ni].closed {
                    continue;
                }
                if !self.nodes[ni].in_open {
                    // Not currently discovered: make sure no stale cost
                    // survives from an earlier relaxation attempt.
                    self.nodes[ni].g = UNREACHED;
                }
                self.relax(&mut open, ci, ni, start, goal);
            }
        }

        // Open set exhausted without dequeuing the goal: no route.
        Vec::new()
    }

    /// Dual relaxation rule for the edge `s → succ`.
    ///
    /// Inside `s`'s visibility window the successor connects straight to
    /// `s`'s parent (the taut shortcut); outside it, or from the start
    /// node, the plain grid edge applies. Both rules are gated on `s`
    /// still having line of sight.
    fn relax(&mut self, open: &mut OpenSet, s: usize, succ: usize, start: usize, goal: usize) {
        let s_parent = self.nodes[s].parent;
        let s_pos = self.nodes[s].pos;
        let parent_pos = self.nodes[s_parent].pos;
        let succ_pos = self.nodes[succ].pos;
        let angle = signed_angle(s_pos, parent_pos, succ_pos);

        if s != start && self.nodes[s].lower <= angle && self.nodes[s].upper >= angle {
            let g = self.nodes[s_parent].g + parent_pos.distance(succ_pos);
            if g < self.nodes[succ].g && self.nodes[s].line_of_sight {
                self.enqueue(open, succ, g, s_parent, goal);
            }
        } else {
            let g = self.nodes[s].g + s_pos.distance(succ_pos);
            if g < self.nodes[succ].g && self.nodes[s].line_of_sight {
                self.enqueue(open, succ, g, s, goal);
            }
        }
    }

    fn enqueue(&mut self, open: &mut OpenSet, succ: usize, g: f64, parent: usize, goal: usize) {
        let h = self.nodes[succ].pos.distance(self.nodes[goal].pos);
        let node = &mut self.nodes[succ];
        node.g = g;
        node.parent = parent;
        node.h = h;
        node.f = node.g + node.h;
        // Remove-then-reinsert: any older heap entry is now stale and will
        // be skipped at pop because this flag gets consumed first.
        node.in_open = true;
        open.push(succ, node.f);
    }

    /// Follow parent indices from the goal back to the start, then
    /// reverse. The step bound guards path building against a parent
    /// cycle ever being introduced by a search bug.
    fn build_path(&self, goal: usize, start: usize) -> Vec<Vec2> {
        let mut path = vec![self.nodes[goal].pos];
        let mut cur = goal;
        let mut steps = 0;
        while cur != start && steps < self.nodes.len() {
            cur = self.nodes[cur].parent;
            path.push(self.nodes[cur].pos);
            steps += 1;
        }
        path.reverse();
        path
    }
}
