use super::cell::Cell;
use serde::{Deserialize, Serialize};

/// A brush pixel: cell data plus the transparency used when stamping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BrushPixel {
    pub cell: Cell,
    pub alpha: f32, // 0.0 = never written
}

impl BrushPixel {
    pub const TRANSPARENT: BrushPixel = BrushPixel {
        cell: Cell::BLACK,
        alpha: 0.0,
    };

    #[must_use]
    pub const fn opaque(cell: Cell) -> Self {
        Self { cell, alpha: 1.0 }
    }

    #[must_use]
    pub fn is_transparent(&self) -> bool {
        self.alpha == 0.0
    }

    /// Transparent, or pure black.
    #[must_use]
    pub fn is_void(&self) -> bool {
        self.is_transparent() || self.cell.is_black()
    }
}

/// A small, caller-owned patch of cells used to paint onto or capture from
/// a simulation grid.
///
/// Pixels are stored row-major in image orientation: row 0 is the *top* of
/// the patch, which corresponds to the highest `y` of the grid rectangle it
/// is stamped onto or captured from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brush {
    width: usize,
    height: usize,
    pixels: Vec<BrushPixel>,
}

impl Brush {
    /// A fully transparent brush.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![BrushPixel::TRANSPARENT; width * height],
        }
    }

    /// Builds an opaque brush from row-major cells. Returns `None` when the
    /// cell count does not match the dimensions.
    #[must_use]
    pub fn from_cells(width: usize, height: usize, cells: Vec<Cell>) -> Option<Self> {
        if cells.len() != width * height {
            return None;
        }
        Some(Self {
            width,
            height,
            pixels: cells.into_iter().map(BrushPixel::opaque).collect(),
        })
    }

    #[must_use]
    pub fn from_pixels(width: usize, height: usize, pixels: Vec<BrushPixel>) -> Option<Self> {
        if pixels.len() != width * height {
            return None;
        }
        Some(Self {
            width,
            height,
            pixels,
        })
    }

    /// A `size`x`size` brush filled with one opaque cell.
    #[must_use]
    pub fn solid(size: usize, cell: Cell) -> Self {
        Self {
            width: size,
            height: size,
            pixels: vec![BrushPixel::opaque(cell); size * size],
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
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    #[inline(always)]
    fn index(&self, bx: usize, by: usize) -> usize {
        by * self.width + bx
    }

    #[must_use]
    pub fn get(&self, bx: usize, by: usize) -> Option<&BrushPixel> {
        if bx < self.width && by < self.height {
            Some(&self.pixels[self.index(bx, by)])
        } else {
            None
        }
    }

    #[must_use]
    pub fn get_mut(&mut self, bx: usize, by: usize) -> Option<&mut BrushPixel> {
        if bx < self.width && by < self.height {
            let idx = self.index(bx, by);
            Some(&mut self.pixels[idx])
        } else {
            None
        }
    }

    #[must_use]
    pub fn pixels(&self) -> &[BrushPixel] {
        &self.pixels
    }

    /// Iterates `(bx, by, pixel)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &BrushPixel)> + '_ {
        let w = self.width.max(1);
        self.pixels
            .iter()
            .enumerate()
            .map(move |(idx, p)| (idx % w, idx / w, p))
    }

    /// Makes black and zero-alpha pixels transparent so stamping leaves the
    /// grid untouched there.
    ///
    /// A brush made only of void pixels (an eraser) is returned unchanged.
    #[must_use]
    pub fn purge_void(&self) -> Brush {
        if self.pixels.iter().all(BrushPixel::is_void) {
            return self.clone();
        }
        let pixels = self
            .pixels
            .iter()
            .map(|p| if p.is_void() { BrushPixel::TRANSPARENT } else { *p })
            .collect();
        Brush {
            width: self.width,
            height: self.height,
            pixels,
        }
    }

    /// Clears every pixel farther than `width / 2.1` from the brush center,
    /// leaving a round footprint.
    #[must_use]
    pub fn round_mask(&self) -> Brush {
        let mid_x = self.width as f32 / 2.0;
        let mid_y = self.height as f32 / 2.0;
        let radius = self.width as f32 / 2.1;
        let mut out = self.clone();
        for by in 0..self.height {
            for bx in 0..self.width {
                let dx = bx as f32 - mid_x;
                let dy = by as f32 - mid_y;
                if (dx * dx + dy * dy).sqrt() > radius {
                    let idx = out.index(bx, by);
                    out.pixels[idx] = BrushPixel::TRANSPARENT;
                }
            }
        }
        out
    }

    /// Reverses row order. Used when importing images whose origin is at the
    /// bottom instead of the top.
    #[must_use]
    pub fn flipped_vertically(&self) -> Brush {
        let w = self.width.max(1);
        let pixels = self
            .pixels
            .chunks(w)
            .rev()
            .flat_map(|row| row.iter().copied())
            .collect();
        Brush {
            width: self.width,
            height: self.height,
            pixels,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cells_rejects_wrong_len() {
        assert!(Brush::from_cells(2, 2, vec![Cell::WHITE; 3]).is_none());
        let b = Brush::from_cells(2, 1, vec![Cell::WHITE, Cell::BLACK]).unwrap();
        assert_eq!(b.get(1, 0).unwrap().cell, Cell::BLACK);
        assert!(b.get(2, 0).is_none());
    }

    #[test]
    fn test_purge_void_clears_black() {
        let red = Cell::new(1.0, 0.0, 0.0);
        let b = Brush::from_cells(2, 1, vec![red, Cell::BLACK]).unwrap();
        let purged = b.purge_void();
        assert_eq!(purged.get(0, 0).unwrap().cell, red);
        assert!(purged.get(1, 0).unwrap().is_transparent());
    }

    #[test]
    fn test_purge_void_keeps_all_black_brush() {
        let eraser = Brush::solid(3, Cell::BLACK);
        assert_eq!(eraser.purge_void(), eraser);
    }

    #[test]
    fn test_round_mask_clears_corners() {
        let b = Brush::solid(8, Cell::WHITE).round_mask();
        assert!(b.get(0, 0).unwrap().is_transparent());
        assert!(b.get(7, 7).unwrap().is_transparent());
        assert!(!b.get(4, 4).unwrap().is_transparent());
        assert!(!b.get(4, 1).unwrap().is_transparent());
    }

    #[test]
    fn test_flip_reverses_rows() {
        let top = Cell::new(1.0, 0.0, 0.0);
        let bottom = Cell::new(0.0, 0.0, 1.0);
        let b = Brush::from_cells(1, 2, vec![top, bottom]).unwrap();
        let f = b.flipped_vertically();
        assert_eq!(f.get(0, 0).unwrap().cell, bottom);
        assert_eq!(f.get(0, 1).unwrap().cell, top);
        assert_eq!(f.flipped_vertically(), b);
    }
}
