//! Geometry primitives: [`Vec2`] and [`Coord`].
//!
//! `Vec2` is a world-space position (routes are sequences of these);
//! `Coord` is an integer lattice coordinate identifying a node.

use std::fmt;
use std::ops::{Add, Mul, Sub};

// ---------------------------------------------------------------------------
// Vec2
// ---------------------------------------------------------------------------

/// A 2D world-space point with `f64` components.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    /// Origin (0, 0).
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Create a new point.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[inline]
    pub fn distance(self, other: Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl fmt::Display for Vec2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl Add for Vec2 {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

// ---------------------------------------------------------------------------
// Coord
// ---------------------------------------------------------------------------

/// An integer lattice coordinate `(i, j)`.
///
/// Node coordinates live in `[0, n]²` for an n×n cell grid; cell
/// coordinates live in `[0, n)²`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    pub i: i32,
    pub j: i32,
}

impl Coord {
    /// Create a new coordinate.
    #[inline]
    pub const fn new(i: i32, j: i32) -> Self {
        Self { i, j }
    }

    /// The world-space position of this lattice coordinate for a grid with
    /// the given origin and cell size.
    #[inline]
    pub fn to_world(self, origin: Vec2, cell_size: f64) -> Vec2 {
        Vec2::new(
            self.i as f64 * cell_size + origin.x,
            self.j as f64 * cell_size + origin.y,
        )
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.i, self.j)
    }
}
