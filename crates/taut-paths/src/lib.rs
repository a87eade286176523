//! Taut any-angle pathfinding over occupancy grids.
//!
//! Given an n×n grid of open/blocked cells, this crate builds an
//! (n+1)×(n+1) navigation lattice and runs a lazy Theta*-family search
//! between two world-space points:
//!
//! - **[`route`]** — one-shot search over an [`OccupancyGrid`](taut_core::OccupancyGrid)
//! - **[`Lattice`]** — the navigation lattice, for callers that want to
//!   snap points or inspect the graph before searching
//!
//! The search is *any-angle*: instead of zig-zagging along grid edges it
//! pulls segments straight whenever no discovered wall corner blocks the
//! line. And it is *lazy*: no per-edge line-of-sight raycast is ever
//! performed — each expanded node carries an angular visibility window,
//! narrowed from cached neighbor state, that stands in for the test.
//!
//! A lattice is consumed by its search; build a fresh one (or call
//! [`route`] again) for every query.

mod angle;
mod bounds;
mod lattice;
mod open;
mod route;

pub use angle::signed_angle;
pub use lattice::{Lattice, UNREACHED};
pub use route::route;
