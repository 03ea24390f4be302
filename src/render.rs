//! Plain-text rendering of a grid for terminals and logs.

use ngol_core::Grid;

const RAMP: &[u8] = b" .:-=+*#%@";

/// Renders luminance as ASCII, highest `y` on the first line.
///
/// Grids wider than `max_cols` are sampled with a uniform stride on both
/// axes (doubled vertically, since terminal cells are about twice as tall as
/// they are wide).
#[must_use]
pub fn ascii(grid: &Grid, max_cols: usize) -> String {
    let stride = grid.width().div_ceil(max_cols.max(1)).max(1);
    let y_stride = stride * 2;
    let mut out = String::new();
    let mut y = grid.height();
    while y > 0 {
        let row_y = y - 1;
        if let Some(row) = grid.row(row_y) {
            for cell in row.iter().step_by(stride) {
                let l = cell.luminance().clamp(0.0, 1.0);
                let idx = ((l * (RAMP.len() - 1) as f32).round() as usize).min(RAMP.len() - 1);
                out.push(RAMP[idx] as char);
            }
            out.push('\n');
        }
        y = y.saturating_sub(y_stride);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use ngol_core::Cell;

    #[test]
    fn test_ascii_orientation() {
        let mut grid = Grid::new(3, 4).unwrap();
        grid.set(0, 3, Cell::WHITE).unwrap();
        let text = ascii(&grid, 80);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "@  ");
        assert_eq!(lines[1], "   ");
    }

    #[test]
    fn test_ascii_downsamples_wide_grids() {
        let grid = Grid::new(200, 10).unwrap();
        let text = ascii(&grid, 50);
        assert!(text.lines().all(|l| l.len() == 50));
    }
}
