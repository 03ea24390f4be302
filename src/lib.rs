//! NGOL: a continuous, three-channel generalization of the Game of Life.
//!
//! The engine lives in `ngol_core`, shared value types in `ngol_data`. This
//! crate adds the text renderer used by the headless runner.

pub mod render;

pub use ngol_core as core;
pub use ngol_data as data;
