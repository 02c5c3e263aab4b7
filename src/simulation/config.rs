//! Simulation configuration

use std::time::Duration;

use super::types::SimulationMode;

/// Recognized simulation options with their documented defaults.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Which driver runs the simulation.
    pub mode: SimulationMode,
    /// Coordinator sweep period.
    pub token_cycle: Duration,
    /// Base period for the per-junction nudge loops; each loop waits
    /// three times this value between checks.
    pub retry_delay: Duration,
    /// Wall-clock duration of Automatic/FastRun runs.
    pub simulation_time: Duration,
    /// Console refresh period; irrelevant to core correctness.
    pub console_refresh: Duration,
    /// Pace step-by-step mode on a timer instead of waiting for
    /// external confirmation.
    pub auto_advance_steps: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            mode: SimulationMode::StepByStep,
            token_cycle: Duration::from_millis(500),
            retry_delay: Duration::from_millis(100),
            simulation_time: Duration::from_secs(20),
            console_refresh: Duration::from_millis(1000),
            auto_advance_steps: false,
        }
    }
}
