//! # NGOL Core
//!
//! "Not Game Of Life": a cellular automaton over a grid of continuous,
//! three-channel cells. Each channel evolves independently under an
//! under/over-population threshold pair applied to its clipped Moore
//! neighborhood sum.
//!
//! This crate contains:
//! - Grid storage with clamped channel values
//! - The neighborhood sampler and threshold transition rule
//! - A pluggable custom-rule hook
//! - Double and lookback (triple) buffer rotation
//! - Brush stamping and region capture
//! - Random seeding, configuration, metrics and logging
//!
//! ## Example
//!
//! ```
//! use ngol_core::Simulation;
//!
//! let mut sim = Simulation::new(64, 64, 2.0, 3.0).unwrap().with_seed(42);
//! sim.randomize(1.0, 0.5, 0.0);
//! sim.step().unwrap();
//! assert_eq!(sim.generation(), 1);
//! ```

/// Brush stamping and capture
pub mod brush;
/// Rotating double/lookback grid arena
pub mod buffers;
/// Configuration management for simulation parameters
pub mod config;
/// Error types
pub mod error;
/// Full-grid generation computation
pub mod generation;
/// Cell storage
pub mod grid;
/// Random and empty seeding
pub mod init;
/// Step metrics and logging setup
pub mod metrics;
/// Clipped Moore-neighborhood sums
pub mod neighborhood;
/// Threshold rule, presets and custom-rule hook
pub mod rule;
/// Owned simulation facade
pub mod simulation;

pub use brush::{StampMode, StampReport};
pub use buffers::{BufferMode, BufferRing};
pub use config::SimulationConfig;
pub use error::{NgolError, Result};
pub use grid::{Grid, GridStats};
pub use init::Intensity;
pub use metrics::{init_logging, Metrics};
pub use neighborhood::NeighborSums;
pub use ngol_data::{Brush, BrushPixel, Cell};
pub use rule::{CustomRule, RuleInput, ThresholdPreset, Thresholds};
pub use simulation::Simulation;
