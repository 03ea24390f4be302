//! Plain value types shared between the NGOL core and its collaborators.
//!
//! Cells and brushes carry no behavior beyond channel arithmetic and pixel
//! bookkeeping, so brush libraries and renderers can depend on this crate
//! without pulling in the simulation engine.

pub mod data;

pub use data::brush::{Brush, BrushPixel};
pub use data::cell::Cell;
