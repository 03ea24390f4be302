//! Rotating arena of grids: read from "current", write to "next".
//!
//! Double buffering keeps two slots and alternates between them. Lookback
//! keeps three slots so the generation before "current" stays readable
//! while "next" is written; the slots rotate through a fixed cycle of
//! length three.

use crate::error::{NgolError, Result};
use crate::generation::compute_into;
use crate::grid::Grid;
use crate::rule::{CustomRule, Thresholds};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BufferMode {
    #[default]
    Double,
    Lookback,
}

impl BufferMode {
    #[must_use]
    pub fn slots(self) -> usize {
        match self {
            BufferMode::Double => 2,
            BufferMode::Lookback => 3,
        }
    }
}

/// Owns the grids of a simulation and the index of the current one.
#[derive(Debug, Clone)]
pub struct BufferRing {
    grids: Vec<Grid>,
    current: usize,
    mode: BufferMode,
}

impl BufferRing {
    /// Black grids of the given size.
    pub fn new(width: usize, height: usize, mode: BufferMode) -> Result<Self> {
        let template = Grid::new(width, height)?;
        Ok(Self {
            grids: vec![template; mode.slots()],
            current: 0,
            mode,
        })
    }

    /// Adopts existing grids. Two grids give double buffering, three give
    /// lookback; all must share the same dimensions. Slot 0 starts current.
    pub fn from_grids(grids: Vec<Grid>) -> Result<Self> {
        let mode = match grids.len() {
            2 => BufferMode::Double,
            3 => BufferMode::Lookback,
            n => {
                return Err(NgolError::dimension_mismatch(format!(
                    "a buffer ring needs 2 or 3 grids, got {n}"
                )))
            }
        };
        let first = &grids[0];
        if let Some(odd) = grids.iter().find(|g| !g.same_dimensions(first)) {
            return Err(NgolError::dimension_mismatch(format!(
                "grid {}x{} does not match {}x{}",
                odd.width(),
                odd.height(),
                first.width(),
                first.height()
            )));
        }
        Ok(Self {
            grids,
            current: 0,
            mode,
        })
    }

    #[must_use]
    pub fn mode(&self) -> BufferMode {
        self.mode
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[inline]
    fn next_index(&self) -> usize {
        (self.current + 1) % self.grids.len()
    }

    #[inline]
    fn previous_index(&self) -> usize {
        (self.current + self.grids.len() - 1) % self.grids.len()
    }

    #[must_use]
    pub fn current(&self) -> &Grid {
        &self.grids[self.current]
    }

    /// Mutable access for out-of-band edits (stamping) between steps.
    pub fn current_mut(&mut self) -> &mut Grid {
        &mut self.grids[self.current]
    }

    /// The generation before current. Only kept in lookback mode.
    #[must_use]
    pub fn previous(&self) -> Option<&Grid> {
        match self.mode {
            BufferMode::Double => None,
            BufferMode::Lookback => Some(&self.grids[self.previous_index()]),
        }
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.grids[0].width()
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.grids[0].height()
    }

    /// Computes the next generation into the slot after current, then makes
    /// it current. The current grid is only read.
    pub fn step(&mut self, thresholds: &Thresholds, rule: Option<&dyn CustomRule>) -> Result<()> {
        let write_idx = self.next_index();
        let mut target = std::mem::replace(&mut self.grids[write_idx], Grid::placeholder());
        let read = &self.grids[self.current];
        let previous = match self.mode {
            BufferMode::Double => None,
            BufferMode::Lookback => Some(&self.grids[self.previous_index()]),
        };
        let result = compute_into(read, previous, &mut target, thresholds, rule);
        self.grids[write_idx] = target;
        result?;
        self.current = write_idx;
        Ok(())
    }

    /// Rewrites slot 0 with `fill`, copies it into the other slots and makes
    /// slot 0 current.
    pub fn reseed(&mut self, fill: impl FnOnce(&mut Grid)) {
        if let Some((first, rest)) = self.grids.split_first_mut() {
            fill(first);
            for slot in rest {
                slot.clone_from(first);
            }
        }
        self.current = 0;
    }

    /// Writes `grid` into every slot and makes slot 0 current.
    pub fn reset_to(&mut self, grid: &Grid) -> Result<()> {
        for slot in &mut self.grids {
            slot.copy_from(grid)?;
        }
        self.current = 0;
        Ok(())
    }
}
