//! Vehicle value type and the emergency-queue priority ordering

use std::cmp::Ordering;
use std::time::Instant;

use super::types::{JunctionId, VehicleClass};

/// A vehicle moving through the network.
///
/// Exactly one junction queue owns a vehicle at any instant, or it is
/// transiently held by the thread processing it; moves are modeled as
/// remove-then-insert, never shared references across queues.
#[derive(Debug, Clone)]
pub struct Vehicle {
    /// Monotonically increasing, never reused.
    pub id: u64,
    pub class: VehicleClass,
    pub source: JunctionId,
    pub destination: JunctionId,
    /// Mutated as the vehicle moves.
    pub current: JunctionId,
    /// Creation time, used as the arrival timestamp for tie-breaking.
    pub created_at: Instant,
    /// Consecutive admission denials; reset on a successful move or a
    /// reroute event.
    pub blocked_attempts: u32,
}

impl Vehicle {
    pub fn new(id: u64, class: VehicleClass, source: JunctionId, destination: JunctionId) -> Self {
        Self {
            id,
            class,
            source,
            destination,
            current: source,
            created_at: Instant::now(),
            blocked_attempts: 0,
        }
    }

    /// Short tag for log lines, e.g. `[AMB-7]`.
    pub fn describe(&self) -> String {
        format!("[{}-{}]", self.class.short_code(), self.id)
    }
}

// Extraction order for the emergency `BinaryHeap` (which pops the
// greatest element): higher class rank first, then earlier creation,
// then lower id so ordering stays total and deterministic.
impl Ord for Vehicle {
    fn cmp(&self, other: &Self) -> Ordering {
        self.class
            .priority_rank()
            .cmp(&other.class.priority_rank())
            .then_with(|| other.created_at.cmp(&self.created_at))
            .then_with(|| other.id.cmp(&self.id))
    }
}

impl PartialOrd for Vehicle {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Vehicle {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Vehicle {}
