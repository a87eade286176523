//! The navigation lattice: nodes, cells, and their adjacency.
//!
//! An n×n occupancy grid yields an (n+1)×(n+1) lattice of nodes (one per
//! cell corner) and n×n cells. Cell `(i, j)` is bounded by the nodes
//! `(i, j)`, `(i+1, j)`, `(i+1, j+1)`, `(i, j+1)`. Every node knows its
//! in-bounds 8-connected neighbors and the 1, 2, or 4 cells that share it
//! as a corner — the cells whose walls can collapse that node's
//! visibility bounds.
//!
//! Search state (`g`, `f`, parent, bounds, the lazily cleared
//! line-of-sight flag) lives directly on the nodes and is mutated in
//! place, so a lattice serves exactly one search:
//! [`route`](Lattice::route) takes `self` by value.

use taut_core::{Coord, OccupancyGrid, Vec2};

/// Sentinel cost for nodes not yet reached.
pub const UNREACHED: f64 = f64::INFINITY;

pub(crate) const NO_PARENT: usize = usize::MAX;

/// A lattice vertex (a "spot") with its per-search state.
pub(crate) struct Node {
    pub(crate) coord: Coord,
    pub(crate) pos: Vec2,
    // Search-mutable state.
    pub(crate) g: f64,
    pub(crate) f: f64,
    pub(crate) h: f64,
    pub(crate) parent: usize,
    pub(crate) closed: bool,
    pub(crate) in_open: bool,
    /// Angular visibility bounds in degrees, relative to the parent→node
    /// ray. Start at (−∞, +∞) and only ever narrow.
    pub(crate) lower: f64,
    pub(crate) upper: f64,
    /// Cleared permanently once the node is found to touch a wall cell.
    pub(crate) line_of_sight: bool,
    // Fixed adjacency, computed at build time.
    pub(crate) neighbors: Vec<usize>,
    pub(crate) cells: Vec<usize>,
}

impl Node {
    fn new(coord: Coord, pos: Vec2) -> Self {
        Self {
            coord,
            pos,
            g: UNREACHED,
            f: UNREACHED,
            h: 0.0,
            parent: NO_PARENT,
            closed: false,
            in_open: false,
            lower: f64::NEG_INFINITY,
            upper: f64::INFINITY,
            line_of_sight: true,
            neighbors: Vec::with_capacity(8),
            cells: Vec::with_capacity(4),
        }
    }
}

/// One occupancy cell with its four corner nodes.
pub(crate) struct Cell {
    pub(crate) blocked: bool,
    pub(crate) corners: [usize; 4],
}

/// The full navigation lattice for one search.
pub struct Lattice {
    /// Nodes per side: grid size + 1.
    pub(crate) side: usize,
    pub(crate) nodes: Vec<Node>,
    pub(crate) cells: Vec<Cell>,
}

impl Lattice {
    /// Build a fresh lattice from an occupancy grid.
    ///
    /// All nodes start unreached; build once per search.
    pub fn new(grid: &OccupancyGrid) -> Self {
        let n = grid.size();
        let side = n + 1;
        let origin = grid.origin();
        let cell_size = grid.cell_size();

        let mut cells = Vec::with_capacity(n * n);
        for i in 0..n {
            for j in 0..n {
                cells.push(Cell {
                    blocked: grid.blocked(i, j),
                    corners: [
                        node_idx(side, i, j),
                        node_idx(side, i + 1, j),
                        node_idx(side, i + 1, j + 1),
                        node_idx(side, i, j + 1),
                    ],
                });
            }
        }

        let mut nodes = Vec::with_capacity(side * side);
        for i in 0..side {
            for j in 0..side {
                let coord = Coord::new(i as i32, j as i32);
                let mut node = Node::new(coord, coord.to_world(origin, cell_size));
                push_neighbors(&mut node.neighbors, side, i, j);
                // Cells sharing this corner: (i-1..=i, j-1..=j) clipped to
                // the cell lattice. 1 at grid corners, 2 on edges, 4 inside.
                for ci in [i.wrapping_sub(1), i] {
                    for cj in [j.wrapping_sub(1), j] {
                        if ci < n && cj < n {
                            node.cells.push(ci * n + cj);
                        }
                    }
                }
                nodes.push(node);
            }
        }

        Self { side, nodes, cells }
    }

    /// The lattice coordinate whose world position is nearest to `p`.
    ///
    /// Ties are broken by scan order (`i` outer, `j` inner): the first
    /// minimal node wins.
    pub fn snap(&self, p: Vec2) -> Coord {
        self.nodes[self.snap_idx(p)].coord
    }

    pub(crate) fn snap_idx(&self, p: Vec2) -> usize {
        let mut best = 0;
        let mut best_dist = f64::INFINITY;
        for (idx, node) in self.nodes.iter().enumerate() {
            let d = p.distance(node.pos);
            if d < best_dist {
                best_dist = d;
                best = idx;
            }
        }
        best
    }

    /// Number of nodes in the lattice: `(grid size + 1)²`.
    pub fn node_count(&self) -> usize {
        self.side * self.side
    }
}

#[inline]
fn node_idx(side: usize, i: usize, j: usize) -> usize {
    i * side + j
}

/// In-bounds 8-connected neighbors of node `(i, j)`.
///
/// The enumeration order (cardinals first, then diagonals) is fixed: the
/// open set breaks `f` ties FIFO, so neighbor order is part of the
/// deterministic tie-break contract.
fn push_neighbors(out: &mut Vec<usize>, side: usize, i: usize, j: usize) {
    let max = side - 1;
    if i < max {
        out.push(node_idx(side, i + 1, j));
    }
    if i > 0 {
        out.push(node_idx(side, i - 1, j));
    }
    if j < max {
        out.push(node_idx(side, i, j + 1));
    }
    if j > 0 {
        out.push(node_idx(side, i, j - 1));
    }
    if i > 0 && j > 0 {
        out.push(node_idx(side, i - 1, j - 1));
    }
    if i < max && j < max {
        out.push(node_idx(side, i + 1, j + 1));
    }
    if i > 0 && j < max {
        out.push(node_idx(side, i - 1, j + 1));
    }
    if i < max && j > 0 {
        out.push(node_idx(side, i + 1, j - 1));
    }
}
