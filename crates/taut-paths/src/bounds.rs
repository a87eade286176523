//! Visibility-bound propagation.
//!
//! When a node is expanded, the search wants to know the angular window,
//! measured at the node's parent around the parent→node ray, inside which
//! a straight parent→successor shortcut is still believed unobstructed.
//! Rather than raycasting, the window is narrowed from three sources of
//! already-discovered information: wall corners adjacent to the node,
//! closed neighbors that share the same parent (whose windows can be
//! inherited with an angular offset), and other nearby neighbors that sit
//! between the node and its parent. Wall corners also permanently lose
//! their line-of-sight flag, disqualifying them as shortcut pivots for
//! the rest of the search.

use crate::angle::signed_angle;
use crate::lattice::Lattice;

impl Lattice {
    /// Narrow `s`'s angular visibility bounds from cached neighborhood
    /// state. Called exactly once per node, at expansion.
    ///
    /// Bounds reset to (−∞, +∞), then only shrink. No-op for the start
    /// node, whose relaxations always use the direct-edge rule.
    pub(crate) fn update_bounds(&mut self, s: usize, start: usize) {
        self.nodes[s].lower = f64::NEG_INFINITY;
        self.nodes[s].upper = f64::INFINITY;

        if s == start {
            return;
        }

        let parent = self.nodes[s].parent;
        let s_pos = self.nodes[s].pos;
        let parent_pos = self.nodes[parent].pos;
        let parent_to_s = parent_pos.distance(s_pos);

        let mut lower = f64::NEG_INFINITY;
        let mut upper = f64::INFINITY;

        // Wall-corner pass: every corner of an adjacent blocked cell is
        // disqualified as a shortcut pivot, and a corner on or beside the
        // parent→s ray collapses the window on that side. Note that `s`
        // itself is a corner of each of its adjacent cells, so one blocked
        // neighbor cell collapses both sides to zero.
        for k in 0..self.nodes[s].cells.len() {
            let ci = self.nodes[s].cells[k];
            if !self.cells[ci].blocked {
                continue;
            }
            for corner in self.cells[ci].corners {
                self.nodes[corner].line_of_sight = false;
                let corner_pos = self.nodes[corner].pos;
                let angle = signed_angle(s_pos, parent_pos, corner_pos);
                let on_ray =
                    angle == 0.0 && parent_pos.distance(corner_pos) <= parent_to_s;
                if corner == parent || angle < 0.0 || on_ray {
                    lower = 0.0;
                }
                if corner == parent || angle > 0.0 || on_ray {
                    upper = 0.0;
                }
            }
        }

        for k in 0..self.nodes[s].neighbors.len() {
            let ni = self.nodes[s].neighbors[k];
            let nb = &self.nodes[ni];
            let angle = signed_angle(s_pos, parent_pos, nb.pos);

            // Closed-neighbor inheritance: a closed neighbor expanded from
            // the same parent already carries a window; offset it by the
            // angle between the two nodes and intersect, but only when the
            // shifted edge stays on its own side of zero.
            if nb.closed && nb.parent == parent && ni != start {
                if nb.lower + angle <= 0.0 {
                    lower = lower.max(nb.lower + angle);
                }
                if nb.upper + angle >= 0.0 {
                    upper = upper.min(nb.upper + angle);
                }
            }

            // Open or foreign-parent neighbors that lie strictly between
            // the parent and `s` shadow the window at their raw angle.
            if (!nb.closed || nb.parent != parent)
                && parent_pos.distance(nb.pos) < parent_to_s
                && ni != parent
            {
                if angle < 0.0 {
                    lower = lower.max(angle);
                }
                if angle > 0.0 {
                    upper = upper.min(angle);
                }
            }
        }

        self.nodes[s].lower = lower;
        self.nodes[s].upper = upper;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taut_core::{OccupancyGrid, Vec2};

    fn lattice(rows: &[&str]) -> Lattice {
        let rows: Vec<Vec<bool>> = rows
            .iter()
            .map(|r| r.chars().map(|c| c == '#').collect())
            .collect();
        Lattice::new(&OccupancyGrid::from_rows(&rows, 1.0, Vec2::ZERO).unwrap())
    }

    fn idx(lat: &Lattice, i: usize, j: usize) -> usize {
        i * lat.side + j
    }

    #[test]
    fn start_node_keeps_infinite_bounds() {
        let mut lat = lattice(&["."]);
        let start = idx(&lat, 0, 0);
        lat.nodes[start].parent = start;
        lat.update_bounds(start, start);
        assert_eq!(lat.nodes[start].lower, f64::NEG_INFINITY);
        assert_eq!(lat.nodes[start].upper, f64::INFINITY);
    }

    #[test]
    fn adjacent_wall_collapses_both_sides() {
        let mut lat = lattice(&["#"]);
        let start = idx(&lat, 0, 0);
        let s = idx(&lat, 1, 1);
        lat.nodes[start].parent = start;
        lat.nodes[s].parent = start;

        lat.update_bounds(s, start);

        assert_eq!(lat.nodes[s].lower, 0.0);
        assert_eq!(lat.nodes[s].upper, 0.0);
        // All four corners of the blocked cell lose line of sight.
        for (i, j) in [(0, 0), (1, 0), (1, 1), (0, 1)] {
            assert!(!lat.nodes[idx(&lat, i, j)].line_of_sight, "({i}, {j})");
        }
    }

    #[test]
    fn open_cells_leave_line_of_sight_alone() {
        let mut lat = lattice(&["..", ".."]);
        let start = idx(&lat, 0, 0);
        let s = idx(&lat, 1, 1);
        lat.nodes[start].parent = start;
        lat.nodes[s].parent = start;

        lat.update_bounds(s, start);

        for node in &lat.nodes {
            assert!(node.line_of_sight);
        }
    }

    #[test]
    fn closer_open_neighbors_shadow_the_window() {
        // 2×2 open grid, s = (1, 1) expanded from start (0, 0): the open
        // neighbors (1, 0) and (0, 1) sit closer to the parent and pinch
        // the window to ±45°.
        let mut lat = lattice(&["..", ".."]);
        let start = idx(&lat, 0, 0);
        let s = idx(&lat, 1, 1);
        lat.nodes[start].parent = start;
        lat.nodes[start].closed = true;
        lat.nodes[s].parent = start;

        lat.update_bounds(s, start);

        assert!((lat.nodes[s].lower - (-45.0)).abs() < 1e-9);
        assert!((lat.nodes[s].upper - 45.0).abs() < 1e-9);
    }

    #[test]
    fn closed_same_parent_neighbor_bounds_are_inherited() {
        let mut lat = lattice(&["..", ".."]);
        let start = idx(&lat, 0, 0);
        let s = idx(&lat, 1, 1);
        let nb = idx(&lat, 1, 0);
        lat.nodes[start].parent = start;
        lat.nodes[start].closed = true;
        lat.nodes[s].parent = start;
        lat.nodes[nb].parent = start;
        lat.nodes[nb].closed = true;
        lat.nodes[nb].lower = -10.0;
        lat.nodes[nb].upper = 50.0;

        lat.update_bounds(s, start);

        // Angle from s to nb at the parent is −45°: inherited window is
        // (−55, 5); the open neighbor (0, 1) at +45° cannot tighten the
        // upper edge any further.
        assert!((lat.nodes[s].lower - (-55.0)).abs() < 1e-9);
        assert!((lat.nodes[s].upper - 5.0).abs() < 1e-9);
    }

    #[test]
    fn inheritance_never_widens_a_collapsed_window() {
        // A wall next to s collapses the window to (0, 0); a same-parent
        // closed neighbor with a generous window must not reopen it.
        let mut lat = lattice(&["#.", ".."]);
        let start = idx(&lat, 0, 0);
        let s = idx(&lat, 1, 1);
        let nb = idx(&lat, 1, 0);
        lat.nodes[start].parent = start;
        lat.nodes[start].closed = true;
        lat.nodes[s].parent = start;
        lat.nodes[nb].parent = start;
        lat.nodes[nb].closed = true;
        lat.nodes[nb].lower = -90.0;
        lat.nodes[nb].upper = 90.0;

        lat.update_bounds(s, start);

        assert_eq!(lat.nodes[s].lower, 0.0);
        assert_eq!(lat.nodes[s].upper, 0.0);
    }
}
