//! Computes one full generation from a read-only grid into a write target.
//!
//! Every output cell depends only on the read grid (and the optional
//! previous grid), never on other output cells, so rows are processed in
//! parallel with no shared mutable state.

use crate::error::{NgolError, Result};
use crate::grid::Grid;
use crate::neighborhood::moore_sums;
use crate::rule::{CustomRule, RuleInput, Thresholds};
use ngol_data::Cell;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

#[inline]
fn evaluate_cell(
    read: &Grid,
    previous: Option<&Grid>,
    thresholds: &Thresholds,
    rule: Option<&dyn CustomRule>,
    x: usize,
    y: usize,
) -> Cell {
    let sums = moore_sums(read, x, y);
    let proposed = thresholds.transition(sums);
    let out = match rule {
        Some(rule) => rule.evaluate(&RuleInput {
            cell: read.cell_at(x, y),
            proposed,
            sums,
            x,
            y,
            previous: previous.map(|p| p.cell_at(x, y)),
        }),
        None => proposed,
    };
    out.clamped()
}

fn check_dimensions(read: &Grid, previous: Option<&Grid>, write: &Grid) -> Result<()> {
    if !read.same_dimensions(write) {
        return Err(NgolError::dimension_mismatch(format!(
            "read grid {}x{} vs write grid {}x{}",
            read.width(),
            read.height(),
            write.width(),
            write.height()
        )));
    }
    if let Some(prev) = previous {
        if !read.same_dimensions(prev) {
            return Err(NgolError::dimension_mismatch(format!(
                "read grid {}x{} vs previous grid {}x{}",
                read.width(),
                read.height(),
                prev.width(),
                prev.height()
            )));
        }
    }
    Ok(())
}

/// Writes the generation following `read` into `write`.
///
/// Uses rayon when the `parallel` feature is enabled. The result is
/// identical to [`compute_into_sequential`].
pub fn compute_into(
    read: &Grid,
    previous: Option<&Grid>,
    write: &mut Grid,
    thresholds: &Thresholds,
    rule: Option<&dyn CustomRule>,
) -> Result<()> {
    check_dimensions(read, previous, write)?;
    let width = read.width();

    #[cfg(feature = "parallel")]
    write
        .cells_mut()
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, out) in row.iter_mut().enumerate() {
                *out = evaluate_cell(read, previous, thresholds, rule, x, y);
            }
        });

    #[cfg(not(feature = "parallel"))]
    fill_rows(read, previous, write, thresholds, rule, width);

    Ok(())
}

/// Single-threaded version of [`compute_into`].
pub fn compute_into_sequential(
    read: &Grid,
    previous: Option<&Grid>,
    write: &mut Grid,
    thresholds: &Thresholds,
    rule: Option<&dyn CustomRule>,
) -> Result<()> {
    check_dimensions(read, previous, write)?;
    let width = read.width();
    fill_rows(read, previous, write, thresholds, rule, width);
    Ok(())
}

fn fill_rows(
    read: &Grid,
    previous: Option<&Grid>,
    write: &mut Grid,
    thresholds: &Thresholds,
    rule: Option<&dyn CustomRule>,
    width: usize,
) {
    for (y, row) in write.cells_mut().chunks_mut(width).enumerate() {
        for (x, out) in row.iter_mut().enumerate() {
            *out = evaluate_cell(read, previous, thresholds, rule, x, y);
        }
    }
}

/// Pure form of a step: returns a freshly allocated next generation.
pub fn next_generation(
    read: &Grid,
    thresholds: &Thresholds,
    rule: Option<&dyn CustomRule>,
) -> Result<Grid> {
    let mut out = Grid::new(read.width(), read.height())?;
    compute_into(read, None, &mut out, thresholds, rule)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spike(size: usize) -> Grid {
        let mut grid = Grid::new(size, size).unwrap();
        grid.set(size / 2, size / 2, Cell::WHITE).unwrap();
        grid
    }

    #[test]
    fn test_single_spike_decays() {
        let t = Thresholds::new(2.0, 3.0).unwrap();
        let next = next_generation(&spike(3), &t, None).unwrap();
        assert!(next.cells().iter().all(Cell::is_black));
    }

    #[test]
    fn test_read_grid_untouched() {
        let t = Thresholds::new(0.5, 3.0).unwrap();
        let read = spike(5);
        let before = read.clone();
        let next = next_generation(&read, &t, None).unwrap();
        assert_eq!(read, before);
        // every neighbor of the spike sums to exactly 1.0
        assert_eq!(next.get(1, 1).unwrap(), Cell::splat(1.0 / 1.75));
        assert_eq!(next.get(0, 0).unwrap(), Cell::BLACK);
    }

    #[test]
    fn test_custom_rule_replaces_result() {
        let t = Thresholds::new(2.0, 3.0).unwrap();
        let rule = |input: &RuleInput| {
            if input.x == 0 && input.y == 0 {
                Cell::new(2.0, f32::NAN, 0.5)
            } else {
                input.cell
            }
        };
        let read = spike(3);
        let next = next_generation(&read, &t, Some(&rule)).unwrap();
        assert_eq!(next.get(0, 0).unwrap(), Cell::new(1.0, 0.0, 0.5));
        assert_eq!(next.get(1, 1).unwrap(), Cell::WHITE);
    }

    #[test]
    fn test_rule_sees_previous_only_when_given() {
        let t = Thresholds::new(2.0, 3.0).unwrap();
        let read = Grid::new(2, 2).unwrap();
        let prev = Grid::filled(2, 2, Cell::splat(0.25)).unwrap();
        let rule = |input: &RuleInput| input.previous.unwrap_or(Cell::WHITE);

        let mut out = Grid::new(2, 2).unwrap();
        compute_into(&read, Some(&prev), &mut out, &t, Some(&rule)).unwrap();
        assert!(out.cells().iter().all(|c| *c == Cell::splat(0.25)));

        compute_into(&read, None, &mut out, &t, Some(&rule)).unwrap();
        assert!(out.cells().iter().all(|c| *c == Cell::WHITE));
    }

    #[test]
    fn test_dimension_mismatch() {
        let t = Thresholds::default();
        let read = Grid::new(3, 3).unwrap();
        let mut write = Grid::new(3, 4).unwrap();
        assert!(matches!(
            compute_into(&read, None, &mut write, &t, None),
            Err(NgolError::DimensionMismatch(_))
        ));
        let mut write = Grid::new(3, 3).unwrap();
        let prev = Grid::new(4, 3).unwrap();
        assert!(compute_into(&read, Some(&prev), &mut write, &t, None).is_err());
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let t = Thresholds::new(1.0, 4.0).unwrap();
        let cells = (0..15 * 11)
            .map(|i| Cell::new((i % 7) as f32 / 7.0, (i % 5) as f32 / 5.0, (i % 3) as f32 / 3.0))
            .collect();
        let read = Grid::from_cells(15, 11, cells).unwrap();
        let mut a = Grid::new(15, 11).unwrap();
        let mut b = Grid::new(15, 11).unwrap();
        compute_into(&read, None, &mut a, &t, None).unwrap();
        compute_into_sequential(&read, None, &mut b, &t, None).unwrap();
        assert_eq!(a.digest(), b.digest());
    }
}
