//! Core data structures for the NGOL simulation.

pub mod brush;
pub mod cell;
