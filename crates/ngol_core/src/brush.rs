//! Painting brushes onto a grid and capturing grid regions into brushes.
//!
//! Brushes are in image orientation (row 0 on top) while the grid has
//! `y = 0` at the bottom. Brush pixel `(bx, by)` of a `w`x`h` patch whose
//! lowest grid corner is `(x0, y0)` maps to grid cell
//! `(x0 + bx, y0 + h - 1 - by)`. Stamp and capture share this mapping, so
//! capturing the rectangle a stamp just covered returns the stamped pixels.

use crate::error::{NgolError, Result};
use crate::grid::Grid;
use ngol_data::{Brush, BrushPixel};
use serde::{Deserialize, Serialize};

/// Which brush pixels are skipped when stamping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StampMode {
    /// Skip zero-alpha pixels only.
    #[default]
    AlphaOnly,
    /// Skip zero-alpha pixels and pure black pixels.
    VoidColor,
}

impl StampMode {
    #[inline]
    fn skips(self, pixel: &BrushPixel) -> bool {
        match self {
            StampMode::AlphaOnly => pixel.is_transparent(),
            StampMode::VoidColor => pixel.is_void(),
        }
    }
}

/// What a stamp actually did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StampReport {
    pub written: usize,
    pub clipped: usize,
    pub skipped: usize,
}

/// Lowest grid corner of a `w`x`h` patch centered on `(cx, cy)`.
///
/// `None` when the corner is not representable as `i64`.
#[inline]
#[must_use]
pub fn centered_origin(cx: i64, cy: i64, w: usize, h: usize) -> Option<(i64, i64)> {
    let half = |n: usize| i64::try_from(n / 2).ok();
    Some((cx.checked_sub(half(w)?)?, cy.checked_sub(half(h)?)?))
}

/// `base + delta`, or `None` on overflow.
#[inline]
fn offset(base: i64, delta: usize) -> Option<i64> {
    base.checked_add(i64::try_from(delta).ok()?)
}

/// Overwrites grid cells with the brush, centered on `(cx, cy)`.
///
/// Destinations outside the grid are skipped silently, as are pixels the
/// mode treats as transparent. Everything else replaces the grid cell
/// outright; there is no blending.
pub fn stamp(
    grid: &mut Grid,
    brush: &Brush,
    cx: i64,
    cy: i64,
    mode: StampMode,
) -> Result<StampReport> {
    if brush.width() == 0 || brush.height() == 0 {
        return Err(NgolError::dimension_mismatch(format!(
            "brush must be at least 1x1, got {}x{}",
            brush.width(),
            brush.height()
        )));
    }
    let origin = centered_origin(cx, cy, brush.width(), brush.height());
    let top = brush.height() - 1;
    let mut report = StampReport::default();
    for (bx, by, pixel) in brush.iter() {
        if mode.skips(pixel) {
            report.skipped += 1;
            continue;
        }
        // unrepresentable destinations are off-grid
        let dest = origin.and_then(|(x0, y0)| Some((offset(x0, bx)?, offset(y0, top - by)?)));
        match dest {
            Some((gx, gy)) if grid.contains(gx, gy) => {
                grid.set(gx as usize, gy as usize, pixel.cell)?;
                report.written += 1;
            }
            _ => report.clipped += 1,
        }
    }
    Ok(report)
}

/// Reads the `w`x`h` rectangle whose lowest corner is `(x0, y0)` into a new
/// opaque brush.
///
/// The whole rectangle must lie inside the grid.
pub fn capture(grid: &Grid, x0: i64, y0: i64, w: usize, h: usize) -> Result<Brush> {
    if w == 0 || h == 0 {
        return Err(NgolError::dimension_mismatch(format!(
            "capture region must be at least 1x1, got {w}x{h}"
        )));
    }
    let fits = match (offset(x0, w - 1), offset(y0, h - 1)) {
        (Some(x1), Some(y1)) => grid.contains(x0, y0) && grid.contains(x1, y1),
        _ => false,
    };
    if !fits {
        return Err(NgolError::OutOfBounds {
            x: x0,
            y: y0,
            w,
            h,
            width: grid.width(),
            height: grid.height(),
        });
    }
    let (x0, y0) = (x0 as usize, y0 as usize);
    let mut cells = Vec::with_capacity(w * h);
    for by in 0..h {
        let gy = y0 + (h - 1 - by);
        for bx in 0..w {
            cells.push(grid.get(x0 + bx, gy)?);
        }
    }
    Brush::from_cells(w, h, cells)
        .ok_or_else(|| NgolError::dimension_mismatch("captured cell count"))
}
