//! The owned simulation value handed to renderers and UI loops.

use crate::brush::{self, StampMode, StampReport};
use crate::buffers::{BufferMode, BufferRing};
use crate::config::SimulationConfig;
use crate::error::{NgolError, Result};
use crate::grid::{Grid, GridStats};
use crate::init::{self, Intensity};
use crate::metrics::Metrics;
use crate::rule::{CustomRule, ThresholdPreset, Thresholds};
use ngol_data::Brush;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::sync::Arc;
use std::time::Instant;

/// A threshold automaton over a fixed-size grid.
///
/// `step`, `stamp` and `capture` all take `&mut self` or `&self`, so the
/// borrow checker serializes out-of-band edits against stepping.
pub struct Simulation {
    buffers: BufferRing,
    thresholds: Thresholds,
    rule: Option<Arc<dyn CustomRule>>,
    stamp_mode: StampMode,
    rng: ChaCha8Rng,
    seed: Option<u64>,
    generation: u64,
    metrics: Metrics,
}

impl std::fmt::Debug for Simulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulation")
            .field("width", &self.width())
            .field("height", &self.height())
            .field("mode", &self.buffers.mode())
            .field("thresholds", &self.thresholds)
            .field("custom_rule", &self.rule.is_some())
            .field("generation", &self.generation)
            .finish()
    }
}

impl Simulation {
    /// A black, double-buffered simulation seeded from entropy.
    pub fn new(width: usize, height: usize, under: f32, over: f32) -> Result<Self> {
        let thresholds = Thresholds::new(under, over)?;
        Ok(Self {
            buffers: BufferRing::new(width, height, BufferMode::Double)?,
            thresholds,
            rule: None,
            stamp_mode: StampMode::default(),
            rng: ChaCha8Rng::from_entropy(),
            seed: None,
            generation: 0,
            metrics: Metrics::default(),
        })
    }

    /// Builds a black simulation from a validated config.
    pub fn from_config(config: &SimulationConfig) -> anyhow::Result<Self> {
        config.validate()?;
        let thresholds = config.thresholds.resolve()?;
        let mut sim = Self::new(
            config.grid.width,
            config.grid.height,
            thresholds.under(),
            thresholds.over(),
        )?
        .with_buffer_mode(config.grid.buffering)?
        .with_stamp_mode(config.grid.stamp_mode);
        if let Some(seed) = config.seed {
            sim = sim.with_seed(seed);
        }
        sim.metrics = Metrics::new(config.log_interval);
        tracing::info!(
            width = config.grid.width,
            height = config.grid.height,
            mode = ?config.grid.buffering,
            under = thresholds.under(),
            over = thresholds.over(),
            fingerprint = %config.fingerprint(),
            "Simulation created"
        );
        Ok(sim)
    }

    /// Switches between double buffering and lookback. All grids are
    /// reallocated black and the generation count restarts.
    pub fn with_buffer_mode(mut self, mode: BufferMode) -> Result<Self> {
        if mode != self.buffers.mode() {
            self.buffers = BufferRing::new(self.width(), self.height(), mode)?;
            self.generation = 0;
        }
        Ok(self)
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn with_stamp_mode(mut self, mode: StampMode) -> Self {
        self.stamp_mode = mode;
        self
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.buffers.width()
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.buffers.height()
    }

    #[must_use]
    pub fn buffer_mode(&self) -> BufferMode {
        self.buffers.mode()
    }

    #[must_use]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Completed steps since creation or the last randomize/clear.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    #[must_use]
    pub fn thresholds(&self) -> Thresholds {
        self.thresholds
    }

    /// Replaces both thresholds. On error the old pair stays in effect.
    pub fn set_thresholds(&mut self, under: f32, over: f32) -> Result<()> {
        self.thresholds = Thresholds::new(under, over)?;
        tracing::debug!(under, over, "Thresholds updated");
        Ok(())
    }

    pub fn set_under_threshold(&mut self, under: f32) -> Result<()> {
        self.set_thresholds(under, self.thresholds.over())
    }

    pub fn set_over_threshold(&mut self, over: f32) -> Result<()> {
        self.set_thresholds(self.thresholds.under(), over)
    }

    pub fn apply_preset(&mut self, preset: ThresholdPreset) {
        self.thresholds = preset.thresholds();
        tracing::debug!(preset = %preset, "Threshold preset applied");
    }

    /// Installs or removes the rule applied after the threshold rule.
    pub fn set_custom_rule(&mut self, rule: Option<Arc<dyn CustomRule>>) {
        tracing::debug!(enabled = rule.is_some(), "Custom rule changed");
        self.rule = rule;
    }

    #[must_use]
    pub fn has_custom_rule(&self) -> bool {
        self.rule.is_some()
    }

    /// Refills the grid with correlated random values and rewinds the
    /// buffer rotation to its first slot.
    pub fn randomize(&mut self, red: f32, green: f32, blue: f32) {
        let intensity = Intensity::new(red, green, blue);
        let rng = &mut self.rng;
        self.buffers
            .reseed(|grid| init::randomize(grid, intensity, rng));
        self.generation = 0;
        self.metrics.reset_steps();
        tracing::debug!(red, green, blue, "Grid randomized");
    }

    /// `randomize(1.0, 1.0, 1.0)`.
    pub fn randomize_full(&mut self) {
        self.randomize(1.0, 1.0, 1.0);
    }

    /// Blacks out every slot and rewinds the rotation.
    pub fn clear(&mut self) {
        self.buffers.reseed(init::clear);
        self.generation = 0;
        self.metrics.reset_steps();
    }

    /// Replaces the current generation (and the lookback history) with
    /// `grid`, rewinding the rotation.
    pub fn reset_to(&mut self, grid: &Grid) -> Result<()> {
        self.buffers.reset_to(grid)?;
        self.generation = 0;
        self.metrics.reset_steps();
        Ok(())
    }

    /// Advances one generation. Either the whole next grid is written and
    /// becomes current, or nothing changes.
    pub fn step(&mut self) -> Result<()> {
        let start = Instant::now();
        self.buffers.step(&self.thresholds, self.rule.as_deref())?;
        self.generation += 1;
        self.metrics
            .record_step(start.elapsed(), self.buffers.current());
        Ok(())
    }

    pub fn step_n(&mut self, n: u64) -> Result<()> {
        for _ in 0..n {
            self.step()?;
        }
        Ok(())
    }

    /// The latest completed generation.
    #[must_use]
    pub fn current_grid(&self) -> &Grid {
        self.buffers.current()
    }

    /// The generation before the current one, in lookback mode.
    #[must_use]
    pub fn previous_grid(&self) -> Option<&Grid> {
        self.buffers.previous()
    }

    #[must_use]
    pub fn stats(&self) -> GridStats {
        self.current_grid().stats()
    }

    /// Paints `brush` centered on `(x, y)` into the current generation.
    pub fn stamp(&mut self, brush: &Brush, x: i64, y: i64) -> Result<StampReport> {
        let report = match brush::stamp(self.buffers.current_mut(), brush, x, y, self.stamp_mode) {
            Ok(report) => report,
            Err(e) => {
                self.metrics.increment_counter("stamp_rejected");
                tracing::warn!(x, y, error = %e, "Brush rejected");
                return Err(e);
            }
        };
        self.metrics.increment_counter("stamp");
        if report.written == 0 && report.clipped > 0 {
            tracing::warn!(x, y, clipped = report.clipped, "Stamp fell entirely outside the grid");
        }
        Ok(report)
    }

    /// Copies the `width`x`height` rectangle whose lowest corner is `(x, y)`.
    pub fn capture(&self, x: i64, y: i64, width: usize, height: usize) -> Result<Brush> {
        let brush = brush::capture(self.current_grid(), x, y, width, height)?;
        self.metrics.increment_counter("capture");
        Ok(brush)
    }

    /// Copies the rectangle a `width`x`height` stamp at `(cx, cy)` would
    /// cover.
    pub fn capture_centered(&self, cx: i64, cy: i64, width: usize, height: usize) -> Result<Brush> {
        let (x, y) = brush::centered_origin(cx, cy, width, height).ok_or(NgolError::OutOfBounds {
            x: cx,
            y: cy,
            w: width,
            h: height,
            width: self.width(),
            height: self.height(),
        })?;
        self.capture(x, y, width, height)
    }
}
