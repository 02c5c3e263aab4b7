//! Core traffic-routing and admission-control engine
//!
//! Everything in here is independent of the console front end: the
//! junction/queue model, the shortest-path router, the capacity-gated
//! movement protocol, and the two simulation drivers.

mod config;
mod coordinator;
mod graph;
mod junction;
mod movement;
mod network;
mod pool;
mod router;
mod stats;
mod stepper;
mod types;
mod validator;
mod vehicle;

pub use config::SimConfig;
pub use coordinator::{wait_for_cycle, Coordinator, CycleWake, WakeSignal};
pub use graph::GraphModel;
pub use junction::Junction;
pub use movement::{MoveOutcome, REROUTE_THRESHOLD};
pub use network::{
    JunctionSnapshot, NetworkSnapshot, NetworkSpec, TrafficNetwork, DEFAULT_CAPACITY,
};
pub use pool::{PoolError, WorkerPool};
pub use router::next_hop;
pub use stats::{success_rate, throughput, SimStats, StatsSnapshot};
pub use stepper::{
    execute_single_step, run_step_by_step, StepEnd, StepReport, StepSummary, MAX_STEPS,
};
pub use types::{JunctionId, JunctionKind, SimulationMode, VehicleClass};
pub use validator::{validate, ValidationError};
pub use vehicle::Vehicle;
