//! Step-by-step driver
//!
//! Single-threaded: each global step scans the junctions in index order
//! and stops at the first one that produces an actual movement. A step
//! in which no junction can move any vehicle ends the run, as does the
//! step ceiling.

use std::thread;
use std::time::Duration;

use log::info;

use super::config::SimConfig;
use super::movement::MoveOutcome;
use super::network::TrafficNetwork;
use super::types::JunctionId;

/// Hard ceiling on global steps per run.
pub const MAX_STEPS: u64 = 50;

/// Why a step-by-step run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepEnd {
    /// A full scan produced no movement anywhere.
    NoMovement,
    /// The run hit [`MAX_STEPS`].
    StepCeiling,
}

/// One executed step, handed to the caller's per-step hook.
#[derive(Debug, Clone, Copy)]
pub struct StepReport {
    pub step: u64,
    pub outcome: MoveOutcome,
}

/// Result of a whole step-by-step run.
#[derive(Debug, Clone, Copy)]
pub struct StepSummary {
    pub steps: u64,
    pub ended: StepEnd,
}

/// Scan junctions in index order and perform at most one movement.
/// Returns `None` when the scan finds no vehicle able to move.
pub fn execute_single_step(network: &mut TrafficNetwork) -> Option<MoveOutcome> {
    for index in 0..network.junction_count() {
        let junction = JunctionId(index);
        if network.queued_at(junction) == 0 {
            continue;
        }
        let outcome = network.process_junction(junction);
        if outcome.moved() {
            return Some(outcome);
        }
    }
    None
}

/// Run the step-by-step driver to completion. `on_step` is called after
/// every successful step; a blocking hook (waiting for the user) is the
/// expected way to pace the run when auto-advance is off.
pub fn run_step_by_step<F>(
    network: &mut TrafficNetwork,
    config: &SimConfig,
    mut on_step: F,
) -> StepSummary
where
    F: FnMut(&TrafficNetwork, &StepReport),
{
    for step in 1..=MAX_STEPS {
        network.stats().record_step();

        let Some(outcome) = execute_single_step(network) else {
            info!("no vehicle can move, ending after {} steps", step);
            return StepSummary {
                steps: step,
                ended: StepEnd::NoMovement,
            };
        };

        on_step(network, &StepReport { step, outcome });

        if config.auto_advance_steps {
            thread::sleep(Duration::from_millis(1000));
        }
    }

    info!("step ceiling of {} reached", MAX_STEPS);
    StepSummary {
        steps: MAX_STEPS,
        ended: StepEnd::StepCeiling,
    }
}
