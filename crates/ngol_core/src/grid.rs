//! Dense cell storage for one simulation instant.

use crate::error::{NgolError, Result};
use ngol_data::Cell;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// A fixed-size `width`x`height` field of cells, row-major, `y = 0` at the
/// bottom.
///
/// Every stored cell has its channels inside `[0.0, 1.0]`; the dimensions
/// never change after construction.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(try_from = "RawGrid", into = "RawGrid")]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

/// Wire shape of [`Grid`]; loading goes through [`Grid::from_cells`].
#[derive(Serialize, Deserialize)]
struct RawGrid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl TryFrom<RawGrid> for Grid {
    type Error = NgolError;

    fn try_from(raw: RawGrid) -> Result<Self> {
        Grid::from_cells(raw.width, raw.height, raw.cells)
    }
}

impl From<Grid> for RawGrid {
    fn from(grid: Grid) -> Self {
        Self {
            width: grid.width,
            height: grid.height,
            cells: grid.cells,
        }
    }
}

/// Summary statistics over a grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct GridStats {
    pub mean: Cell,
    pub max: Cell,
    pub live_cells: usize,
    pub total_cells: usize,
}

impl Grid {
    /// A black grid. Zero width or height is rejected.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        Self::filled(width, height, Cell::BLACK)
    }

    pub fn filled(width: usize, height: usize, cell: Cell) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(NgolError::dimension_mismatch(format!(
                "grid must be at least 1x1, got {width}x{height}"
            )));
        }
        Ok(Self {
            width,
            height,
            cells: vec![cell.clamped(); width * height],
        })
    }

    /// Builds a grid from row-major cells, clamping each one.
    pub fn from_cells(width: usize, height: usize, cells: Vec<Cell>) -> Result<Self> {
        if width == 0 || height == 0 || cells.len() != width * height {
            return Err(NgolError::dimension_mismatch(format!(
                "{} cells cannot fill a {width}x{height} grid",
                cells.len()
            )));
        }
        Ok(Self {
            width,
            height,
            cells: cells.into_iter().map(Cell::clamped).collect(),
        })
    }

    /// Zero-sized stand-in used while a slot is being rewritten.
    pub(crate) fn placeholder() -> Self {
        Self {
            width: 0,
            height: 0,
            cells: Vec::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline(always)]
    pub(crate) fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    #[must_use]
    pub fn same_dimensions(&self, other: &Grid) -> bool {
        self.width == other.width && self.height == other.height
    }

    pub fn get(&self, x: usize, y: usize) -> Result<Cell> {
        if x < self.width && y < self.height {
            Ok(self.cells[self.index(x, y)])
        } else {
            Err(NgolError::cell_out_of_bounds(
                x as i64,
                y as i64,
                self.width,
                self.height,
            ))
        }
    }

    /// Stores `cell` clamped into `[0.0, 1.0]`.
    pub fn set(&mut self, x: usize, y: usize, cell: Cell) -> Result<()> {
        if x < self.width && y < self.height {
            let idx = self.index(x, y);
            self.cells[idx] = cell.clamped();
            Ok(())
        } else {
            Err(NgolError::cell_out_of_bounds(
                x as i64,
                y as i64,
                self.width,
                self.height,
            ))
        }
    }

    /// Unchecked read for hot loops that already clipped their coordinates.
    #[inline(always)]
    pub(crate) fn cell_at(&self, x: usize, y: usize) -> Cell {
        self.cells[self.index(x, y)]
    }

    #[inline(always)]
    pub(crate) fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Row `y`, left to right.
    #[must_use]
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y < self.height {
            let start = y * self.width;
            Some(&self.cells[start..start + self.width])
        } else {
            None
        }
    }

    pub fn fill(&mut self, cell: Cell) {
        let cell = cell.clamped();
        self.cells.iter_mut().for_each(|c| *c = cell);
    }

    /// Overwrites this grid with `other`'s contents without reallocating.
    pub fn copy_from(&mut self, other: &Grid) -> Result<()> {
        if !self.same_dimensions(other) {
            return Err(NgolError::dimension_mismatch(format!(
                "cannot copy {}x{} into {}x{}",
                other.width, other.height, self.width, self.height
            )));
        }
        self.cells.copy_from_slice(&other.cells);
        Ok(())
    }

    #[must_use]
    pub fn stats(&self) -> GridStats {
        let mut sum = [0.0f64; 3];
        let mut max = [0.0f32; 3];
        let mut live = 0;
        for cell in &self.cells {
            for (i, v) in cell.channels().into_iter().enumerate() {
                sum[i] += f64::from(v);
                max[i] = max[i].max(v);
            }
            if cell.is_alive() {
                live += 1;
            }
        }
        let n = self.cells.len().max(1) as f64;
        GridStats {
            mean: Cell::new(
                (sum[0] / n) as f32,
                (sum[1] / n) as f32,
                (sum[2] / n) as f32,
            ),
            max: Cell::from_channels(max),
            live_cells: live,
            total_cells: self.cells.len(),
        }
    }

    /// SHA-256 over dimensions and the raw channel bits. Bit-identical grids
    /// produce identical digests.
    #[must_use]
    pub fn digest(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update((self.width as u64).to_le_bytes());
        hasher.update((self.height as u64).to_le_bytes());
        for cell in &self.cells {
            for v in cell.channels() {
                hasher.update(v.to_bits().to_le_bytes());
            }
        }
        hex::encode(hasher.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_empty() {
        assert!(matches!(
            Grid::new(0, 4),
            Err(NgolError::DimensionMismatch(_))
        ));
        assert!(Grid::new(4, 0).is_err());
    }

    #[test]
    fn test_set_clamps_channels() {
        let mut grid = Grid::new(3, 2).unwrap();
        grid.set(2, 1, Cell::new(1.7, -0.2, 0.4)).unwrap();
        assert_eq!(grid.get(2, 1).unwrap(), Cell::new(1.0, 0.0, 0.4));
    }

    #[test]
    fn test_get_set_out_of_bounds() {
        let mut grid = Grid::new(3, 2).unwrap();
        assert!(matches!(
            grid.get(3, 0),
            Err(NgolError::OutOfBounds { x: 3, y: 0, .. })
        ));
        assert!(grid.set(0, 2, Cell::WHITE).is_err());
        assert!(grid.cells().iter().all(Cell::is_black));
    }

    #[test]
    fn test_row_major_layout() {
        let mut grid = Grid::new(3, 2).unwrap();
        grid.set(1, 1, Cell::WHITE).unwrap();
        assert_eq!(grid.cells()[4], Cell::WHITE);
        assert_eq!(grid.row(1).unwrap()[1], Cell::WHITE);
        assert!(grid.row(2).is_none());
    }

    #[test]
    fn test_copy_from_requires_same_size() {
        let mut a = Grid::new(2, 2).unwrap();
        let b = Grid::filled(2, 2, Cell::WHITE).unwrap();
        a.copy_from(&b).unwrap();
        assert_eq!(a, b);
        assert!(a.copy_from(&Grid::new(2, 3).unwrap()).is_err());
    }

    #[test]
    fn test_stats() {
        let mut grid = Grid::new(2, 2).unwrap();
        grid.set(0, 0, Cell::new(1.0, 0.0, 0.0)).unwrap();
        grid.set(1, 0, Cell::new(0.0, 0.5, 0.0)).unwrap();
        let stats = grid.stats();
        assert_eq!(stats.live_cells, 2);
        assert_eq!(stats.total_cells, 4);
        assert_eq!(stats.mean, Cell::new(0.25, 0.125, 0.0));
        assert_eq!(stats.max, Cell::new(1.0, 0.5, 0.0));
    }

    #[test]
    fn test_digest_tracks_content() {
        let a = Grid::new(4, 4).unwrap();
        let mut b = a.clone();
        assert_eq!(a.digest(), b.digest());
        b.set(3, 3, Cell::splat(0.5)).unwrap();
        assert_ne!(a.digest(), b.digest());
    }

    #[test]
    fn test_deserialize_rejects_wrong_shape() {
        assert!(toml::from_str::<Grid>("width = 2\nheight = 2\ncells = []").is_err());
        assert!(toml::from_str::<Grid>("width = 0\nheight = 0\ncells = []").is_err());
        let one = "width = 2\nheight = 1\ncells = [{ r = 1.0, g = 0.0, b = 0.0 }]";
        assert!(toml::from_str::<Grid>(one).is_err());
    }

    #[test]
    fn test_deserialize_clamps_channels() {
        let doc = "width = 1\nheight = 1\ncells = [{ r = 5.0, g = -3.0, b = 0.5 }]";
        let grid: Grid = toml::from_str(doc).unwrap();
        assert_eq!(grid.get(0, 0).unwrap(), Cell::new(1.0, 0.0, 0.5));
    }

    #[test]
    fn test_serialize_round_trip() {
        let mut grid = Grid::new(3, 2).unwrap();
        grid.set(2, 1, Cell::splat(0.25)).unwrap();
        let text = toml::to_string(&grid).unwrap();
        assert_eq!(toml::from_str::<Grid>(&text).unwrap(), grid);
    }
}
