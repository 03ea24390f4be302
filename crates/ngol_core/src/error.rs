//! Error types for ngol_core.
//!
//! Every failure is local and synchronous: the call is rejected and the
//! simulation state is left as it was.

use thiserror::Error;

/// Main error type for simulation operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NgolError {
    /// Coordinates or a rectangle outside the grid.
    #[error("Out of bounds: ({x}, {y}) size {w}x{h} does not fit a {width}x{height} grid")]
    OutOfBounds {
        x: i64,
        y: i64,
        w: usize,
        h: usize,
        width: usize,
        height: usize,
    },

    /// Grids of unequal size, or an empty width/height.
    #[error("Dimension mismatch: {0}")]
    DimensionMismatch(String),

    /// Threshold pair that cannot drive the transition rule.
    #[error("Invalid threshold: under={under}, over={over} ({reason})")]
    InvalidThreshold {
        under: f32,
        over: f32,
        reason: &'static str,
    },
}

/// Result type alias for ngol_core operations.
pub type Result<T> = std::result::Result<T, NgolError>;

impl NgolError {
    /// Out-of-bounds error for a single cell.
    #[must_use]
    pub fn cell_out_of_bounds(x: i64, y: i64, width: usize, height: usize) -> Self {
        Self::OutOfBounds {
            x,
            y,
            w: 1,
            h: 1,
            width,
            height,
        }
    }

    /// Creates a new dimension mismatch error.
    #[must_use]
    pub fn dimension_mismatch<S: Into<String>>(msg: S) -> Self {
        Self::DimensionMismatch(msg.into())
    }
}
