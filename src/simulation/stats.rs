//! Thread-safe simulation statistics
//!
//! Counters live behind their own mutex, independent of the movement
//! lock, so metric bookkeeping never extends a movement's critical
//! section. Derived metrics are recomputed on read, never stored, so
//! they cannot drift from the counters.

use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use super::types::VehicleClass;

#[derive(Debug, Default, Clone, Copy)]
struct Counters {
    vehicles_injected: u64,
    total_moves: u64,
    regular_completed: u64,
    emergency_completed: u64,
    successful_routes: u64,
    rerouting_attempts: u64,
    steps_executed: u64,
}

/// Shared, monotonically increasing simulation counters.
#[derive(Debug)]
pub struct SimStats {
    counters: Mutex<Counters>,
    started: Instant,
}

impl Default for SimStats {
    fn default() -> Self {
        Self::new()
    }
}

impl SimStats {
    pub fn new() -> Self {
        Self {
            counters: Mutex::new(Counters::default()),
            started: Instant::now(),
        }
    }

    fn counters(&self) -> std::sync::MutexGuard<'_, Counters> {
        self.counters.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// A vehicle entered the system.
    pub fn record_injection(&self) {
        self.counters().vehicles_injected += 1;
    }

    /// A vehicle advanced one hop (including the hop that completes its
    /// route).
    pub fn record_move(&self) {
        self.counters().total_moves += 1;
    }

    /// A vehicle reached its declared destination and left the system.
    pub fn record_completion(&self, class: VehicleClass) {
        let mut counters = self.counters();
        if class.is_emergency() {
            counters.emergency_completed += 1;
        } else {
            counters.regular_completed += 1;
        }
        counters.successful_routes += 1;
    }

    /// A vehicle hit the blocked-attempt threshold and had its counter
    /// reset.
    pub fn record_reroute(&self) {
        self.counters().rerouting_attempts += 1;
    }

    /// One global step (step-by-step mode) or token cycle (automatic
    /// modes) finished.
    pub fn record_step(&self) {
        self.counters().steps_executed += 1;
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Point-in-time copy of the counters plus the derived metrics.
    pub fn snapshot(&self) -> StatsSnapshot {
        let counters = *self.counters();
        let elapsed = self.started.elapsed();
        StatsSnapshot {
            vehicles_injected: counters.vehicles_injected,
            total_moves: counters.total_moves,
            regular_completed: counters.regular_completed,
            emergency_completed: counters.emergency_completed,
            successful_routes: counters.successful_routes,
            rerouting_attempts: counters.rerouting_attempts,
            steps_executed: counters.steps_executed,
            success_rate: success_rate(counters.successful_routes, counters.vehicles_injected),
            throughput: throughput(counters.total_moves, elapsed),
            elapsed,
        }
    }
}

/// Read-only statistics view handed to the display layer.
#[derive(Debug, Clone, Copy)]
pub struct StatsSnapshot {
    pub vehicles_injected: u64,
    pub total_moves: u64,
    pub regular_completed: u64,
    pub emergency_completed: u64,
    pub successful_routes: u64,
    pub rerouting_attempts: u64,
    pub steps_executed: u64,
    pub success_rate: f64,
    pub throughput: f64,
    pub elapsed: Duration,
}

impl StatsSnapshot {
    pub fn total_completed(&self) -> u64 {
        self.regular_completed + self.emergency_completed
    }
}

/// Completed routes as a percentage of vehicles injected.
pub fn success_rate(successful_routes: u64, vehicles_injected: u64) -> f64 {
    if vehicles_injected == 0 {
        0.0
    } else {
        successful_routes as f64 / vehicles_injected as f64 * 100.0
    }
}

/// Moves per second of elapsed wall-clock time.
pub fn throughput(total_moves: u64, elapsed: Duration) -> f64 {
    let secs = elapsed.as_secs_f64();
    if secs <= 0.0 {
        0.0
    } else {
        total_moves as f64 / secs
    }
}
