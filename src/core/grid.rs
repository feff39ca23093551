//! Grid Bounds
//!
//! The playing field is implicit: a rectangle of integer cells with the
//! origin at the top-left corner. Nothing is stored per cell.

use serde::{Deserialize, Serialize};

/// Dimensions of the playing field.
///
/// A point is in bounds iff `0 <= x < width` and `0 <= y < height`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Grid {
    /// Field width in cells.
    pub width: i32,
    /// Field height in cells.
    pub height: i32,
}

impl Grid {
    /// Create a grid from positive dimensions.
    #[inline]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Bounds test for a cell.
    #[inline]
    pub const fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }
}
