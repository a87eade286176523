//! **taut-core** — Any-angle grid routing (core types).
//!
//! This crate provides the foundational types used across the *taut*
//! workspace: world-space geometry primitives and the validated
//! [`OccupancyGrid`] that routing searches consume.

pub mod geom;
pub mod occupancy;

pub use geom::{Coord, Vec2};
pub use occupancy::{GridError, OccupancyGrid};
