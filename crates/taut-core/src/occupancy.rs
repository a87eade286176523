//! The [`OccupancyGrid`] input type.
//!
//! An occupancy grid is the boundary between this crate and whatever
//! produced the walkable/blocked classification (typically a host tool
//! ray-casting cells against 3D geometry). Construction validates the
//! caller contract once; after that the grid is immutable and the routing
//! engine is entitled to assume it is well-formed.

use crate::geom::Vec2;
use std::fmt;

/// An n×n grid of occupancy cells. `true` means the cell is blocked.
///
/// Cells are addressed by `(i, j)` with `i` along x and `j` along y; cell
/// `(i, j)` spans world coordinates `[origin + (i, j) * cell_size,
/// origin + (i+1, j+1) * cell_size]`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OccupancyGrid {
    size: usize,
    cell_size: f64,
    origin: Vec2,
    cells: Vec<bool>,
}

impl OccupancyGrid {
    /// Create a grid from a flat cell array in row-major `(j, i)` order.
    ///
    /// Fails fast on contract violations: an empty grid, a non-positive
    /// (or non-finite) cell size, or a cell array whose length does not
    /// match `size * size`.
    pub fn new(
        cells: Vec<bool>,
        size: usize,
        cell_size: f64,
        origin: Vec2,
    ) -> Result<Self, GridError> {
        if size == 0 {
            return Err(GridError::EmptyGrid);
        }
        if !(cell_size > 0.0) || !cell_size.is_finite() {
            return Err(GridError::BadCellSize(cell_size));
        }
        if cells.len() != size * size {
            return Err(GridError::DimensionMismatch {
                expected: size * size,
                actual: cells.len(),
            });
        }
        Ok(Self {
            size,
            cell_size,
            origin,
            cells,
        })
    }

    /// Create a grid from per-row cell vectors. Every row must have the
    /// same length as the number of rows.
    pub fn from_rows(rows: &[Vec<bool>], cell_size: f64, origin: Vec2) -> Result<Self, GridError> {
        let size = rows.len();
        let mut cells = Vec::with_capacity(size * size);
        for row in rows {
            if row.len() != size {
                return Err(GridError::DimensionMismatch {
                    expected: size,
                    actual: row.len(),
                });
            }
            cells.extend_from_slice(row);
        }
        Self::new(cells, size, cell_size, origin)
    }

    /// Side length n of the grid, in cells.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// World-space edge length of one cell.
    #[inline]
    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// World-space position of the lattice node (0, 0).
    #[inline]
    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    /// Whether cell `(i, j)` is blocked. Both indices must be `< size`.
    #[inline]
    pub fn blocked(&self, i: usize, j: usize) -> bool {
        self.cells[j * self.size + i]
    }
}

/// Errors from [`OccupancyGrid`] construction.
#[derive(Debug, Clone, PartialEq)]
pub enum GridError {
    /// The grid has no cells.
    EmptyGrid,
    /// The cell size is not a positive finite number.
    BadCellSize(f64),
    /// The cell data does not match the declared grid dimensions.
    DimensionMismatch { expected: usize, actual: usize },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyGrid => write!(f, "occupancy grid is empty"),
            Self::BadCellSize(s) => write!(f, "cell size must be a positive number, got {s}"),
            Self::DimensionMismatch { expected, actual } => {
                write!(
                    f,
                    "occupancy data does not match grid size: expected {expected} cells, got {actual}"
                )
            }
        }
    }
}

impl std::error::Error for GridError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_valid() {
        let g = OccupancyGrid::new(vec![false; 9], 3, 1.0, Vec2::ZERO).unwrap();
        assert_eq!(g.size(), 3);
        assert_eq!(g.cell_size(), 1.0);
        assert!(!g.blocked(2, 2));
    }

    #[test]
    fn new_rejects_empty() {
        let err = OccupancyGrid::new(vec![], 0, 1.0, Vec2::ZERO).unwrap_err();
        assert_eq!(err, GridError::EmptyGrid);
    }

    #[test]
    fn new_rejects_bad_cell_size() {
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = OccupancyGrid::new(vec![false], 1, bad, Vec2::ZERO).unwrap_err();
            assert!(matches!(err, GridError::BadCellSize(_)), "{bad}");
        }
    }

    #[test]
    fn new_rejects_mismatched_dimensions() {
        let err = OccupancyGrid::new(vec![false; 8], 3, 1.0, Vec2::ZERO).unwrap_err();
        assert_eq!(
            err,
            GridError::DimensionMismatch {
                expected: 9,
                actual: 8
            }
        );
    }

    #[test]
    fn from_rows_indexing() {
        // Row-major: rows[j][i].
        let rows = vec![
            vec![false, true, false],
            vec![false, false, false],
            vec![true, false, false],
        ];
        let g = OccupancyGrid::from_rows(&rows, 1.0, Vec2::ZERO).unwrap();
        assert!(g.blocked(1, 0));
        assert!(g.blocked(0, 2));
        assert!(!g.blocked(0, 0));
        assert!(!g.blocked(2, 2));
    }

    #[test]
    fn from_rows_rejects_ragged() {
        let rows = vec![vec![false, false], vec![false]];
        assert!(OccupancyGrid::from_rows(&rows, 1.0, Vec2::ZERO).is_err());
    }

    #[test]
    fn error_display() {
        let err = GridError::DimensionMismatch {
            expected: 9,
            actual: 8,
        };
        assert!(err.to_string().contains("expected 9"));
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn grid_round_trip() {
        let g = OccupancyGrid::new(vec![true, false, false, true], 2, 0.5, Vec2::new(1.0, 2.0))
            .unwrap();
        let json = serde_json::to_string(&g).unwrap();
        let back: OccupancyGrid = serde_json::from_str(&json).unwrap();
        assert_eq!(g, back);
    }

    #[test]
    fn vec2_round_trip() {
        let p = Vec2::new(-3.25, 7.5);
        let json = serde_json::to_string(&p).unwrap();
        let back: Vec2 = serde_json::from_str(&json).unwrap();
        assert_eq!(p, back);
    }
}
