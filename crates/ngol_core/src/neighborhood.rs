//! Clipped Moore-neighborhood sums.
//!
//! The neighborhood of `(x, y)` is every cell in
//! `[max(0, x-1), min(W-1, x+1)] x [max(0, y-1), min(H-1, y+1)]`, the cell
//! itself included. Edges are clipped, not wrapped, so border cells sum over
//! fewer than nine cells.

use crate::grid::Grid;
use serde::{Deserialize, Serialize};

/// Per-channel arithmetic sums (not averages) over a neighborhood.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NeighborSums {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl NeighborSums {
    #[must_use]
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    #[must_use]
    pub fn channels(&self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

/// Inclusive clipped range `[max(0, c-1), min(dim-1, c+1)]`.
#[inline(always)]
fn clipped(c: usize, dim: usize) -> std::ops::RangeInclusive<usize> {
    c.saturating_sub(1)..=(c + 1).min(dim - 1)
}

/// Sums each channel over the clipped Moore neighborhood of `(x, y)`.
///
/// `x` and `y` must lie inside `grid`.
#[inline]
#[must_use]
pub fn moore_sums(grid: &Grid, x: usize, y: usize) -> NeighborSums {
    let mut sums = NeighborSums::default();
    for nx in clipped(x, grid.width()) {
        for ny in clipped(y, grid.height()) {
            let cell = grid.cell_at(nx, ny);
            sums.r += cell.r;
            sums.g += cell.g;
            sums.b += cell.b;
        }
    }
    sums
}

/// Number of cells the clipped neighborhood of `(x, y)` covers.
#[must_use]
pub fn neighborhood_size(grid: &Grid, x: usize, y: usize) -> usize {
    clipped(x, grid.width()).count() * clipped(y, grid.height()).count()
}
