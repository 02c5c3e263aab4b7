//! Junction queues, occupancy accounting, and admission control

use std::collections::{BinaryHeap, VecDeque};

use super::types::{JunctionId, JunctionKind, VehicleClass};
use super::vehicle::Vehicle;

/// A capacity-limited point in the network where vehicles queue.
#[derive(Debug)]
pub struct Junction {
    pub id: JunctionId,
    pub kind: JunctionKind,
    /// Positive ceiling on concurrently present vehicles.
    pub capacity: usize,
    /// Vehicles physically at this junction. Must equal the combined
    /// queue lengths outside a movement's critical section.
    pub occupancy: usize,
    /// FIFO queue of regular vehicles.
    pub waiting: VecDeque<Vehicle>,
    /// Priority queue of emergency vehicles.
    pub emergency: BinaryHeap<Vehicle>,
    /// Junctions reachable via one directed edge, in declaration order.
    pub adjacent: Vec<JunctionId>,
}

impl Junction {
    pub fn new(id: JunctionId, kind: JunctionKind, capacity: usize) -> Self {
        Self {
            id,
            kind,
            capacity,
            occupancy: 0,
            waiting: VecDeque::new(),
            emergency: BinaryHeap::new(),
            adjacent: Vec::new(),
        }
    }

    pub fn queued(&self) -> usize {
        self.waiting.len() + self.emergency.len()
    }

    pub fn has_emergency(&self) -> bool {
        !self.emergency.is_empty()
    }

    /// Pop the next vehicle to service; the emergency queue takes
    /// precedence over the regular queue.
    pub fn pop_next(&mut self) -> Option<Vehicle> {
        if let Some(vehicle) = self.emergency.pop() {
            return Some(vehicle);
        }
        self.waiting.pop_front()
    }

    /// Insert a vehicle into the queue matching its class.
    ///
    /// Queue membership only; occupancy accounting belongs to the
    /// movement protocol.
    pub fn enqueue(&mut self, vehicle: Vehicle) {
        if vehicle.class.is_emergency() {
            self.emergency.push(vehicle);
        } else {
            self.waiting.push_back(vehicle);
        }
    }

    /// Nominal capacity, plus the one-slot grace for emergency classes.
    pub fn effective_capacity(&self, class: VehicleClass) -> usize {
        if class.is_emergency() {
            self.capacity + 1
        } else {
            self.capacity
        }
    }

    /// Point-in-time admission check. Callers must hold the movement
    /// lock so that check-then-act stays atomic.
    pub fn can_admit(&self, class: VehicleClass) -> bool {
        self.occupancy < self.effective_capacity(class)
    }

    pub fn utilization(&self) -> f64 {
        if self.capacity == 0 {
            0.0
        } else {
            self.occupancy as f64 / self.capacity as f64 * 100.0
        }
    }

    /// Occupancy must match the combined queue lengths immediately
    /// before and after every movement step.
    pub fn queues_consistent(&self) -> bool {
        self.occupancy == self.queued()
    }
}
