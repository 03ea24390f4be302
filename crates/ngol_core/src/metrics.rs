//! Step metrics and structured logging for the simulation.

use crate::grid::Grid;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Collects per-step timing and grid statistics.
pub struct Metrics {
    step_count: AtomicU64,
    last_step_micros: AtomicU64,
    live_cells: AtomicU64,
    log_interval: u64,
    pub counters: Mutex<HashMap<String, AtomicU64>>,
    start_time: Instant,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new(1000)
    }
}

impl std::fmt::Debug for Metrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Metrics")
            .field("step_count", &self.step_count())
            .field("live_cells", &self.live_cells())
            .field("log_interval", &self.log_interval)
            .finish()
    }
}

impl Metrics {
    /// Creates a collector that logs a summary every `log_interval` steps.
    #[must_use]
    pub fn new(log_interval: u64) -> Self {
        Self {
            step_count: AtomicU64::new(0),
            last_step_micros: AtomicU64::new(0),
            live_cells: AtomicU64::new(0),
            log_interval: log_interval.max(1),
            counters: Mutex::new(HashMap::new()),
            start_time: Instant::now(),
        }
    }

    /// Records a completed step with its duration.
    ///
    /// Grid statistics are only computed on summary steps or when debug
    /// logging is enabled.
    pub fn record_step(&self, duration: Duration, grid: &Grid) {
        let step = self.step_count.fetch_add(1, Ordering::Relaxed) + 1;
        self.last_step_micros
            .store(duration.as_micros() as u64, Ordering::Relaxed);

        let due = step % self.log_interval == 0;
        if !due && !tracing::enabled!(tracing::Level::DEBUG) {
            return;
        }
        let stats = grid.stats();
        self.live_cells
            .store(stats.live_cells as u64, Ordering::Relaxed);

        tracing::debug!(
            step = step,
            live_cells = stats.live_cells,
            duration_us = duration.as_micros() as u64,
            "Simulation step"
        );
        if due {
            tracing::info!(
                step = step,
                live_cells = stats.live_cells,
                total_cells = stats.total_cells,
                mean_r = stats.mean.r,
                mean_g = stats.mean.g,
                mean_b = stats.mean.b,
                duration_ms = duration.as_millis() as u64,
                "Simulation summary"
            );
        }
    }

    /// Increments a named counter.
    pub fn increment_counter(&self, name: &str) {
        let mut counters = self.counters.lock().unwrap_or_else(|e| e.into_inner());
        counters
            .entry(name.to_string())
            .or_insert_with(|| AtomicU64::new(0))
            .fetch_add(1, Ordering::Relaxed);
    }

    /// Current value of a named counter, zero if never incremented.
    #[must_use]
    pub fn counter(&self, name: &str) -> u64 {
        let counters = self.counters.lock().unwrap_or_else(|e| e.into_inner());
        counters
            .get(name)
            .map_or(0, |c| c.load(Ordering::Relaxed))
    }

    #[must_use]
    pub fn step_count(&self) -> u64 {
        self.step_count.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn live_cells(&self) -> u64 {
        self.live_cells.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn last_step_duration(&self) -> Duration {
        Duration::from_micros(self.last_step_micros.load(Ordering::Relaxed))
    }

    /// Gets elapsed time since metrics creation.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Starts over from zero steps. Counters are kept.
    pub fn reset_steps(&self) {
        self.step_count.store(0, Ordering::Relaxed);
    }
}

/// Initialize tracing subscriber for logging. `RUST_LOG` overrides the
/// default `info` level.
pub fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing::subscriber::set_global_default(
        tracing_subscriber::FmtSubscriber::builder()
            .with_env_filter(filter)
            .finish(),
    )
    .ok();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_new() {
        let metrics = Metrics::new(10);
        assert_eq!(metrics.step_count(), 0);
    }

    #[test]
    fn test_record_step() {
        let metrics = Metrics::new(1);
        let mut grid = Grid::new(4, 4).unwrap();
        grid.set(1, 2, ngol_data::Cell::WHITE).unwrap();
        metrics.record_step(Duration::from_micros(250), &grid);
        assert_eq!(metrics.step_count(), 1);
        assert_eq!(metrics.live_cells(), 1);
        assert_eq!(metrics.last_step_duration(), Duration::from_micros(250));
        metrics.reset_steps();
        assert_eq!(metrics.step_count(), 0);
    }

    #[test]
    fn test_increment_counter() {
        let metrics = Metrics::default();
        metrics.increment_counter("stamp");
        metrics.increment_counter("stamp");
        assert_eq!(metrics.counter("stamp"), 2);
        assert_eq!(metrics.counter("capture"), 0);
    }
}
