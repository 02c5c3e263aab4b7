//! The movement protocol: one attempted vehicle move per call
//!
//! All mutation of junction queues and occupancy goes through
//! `process_junction`, whichever driver is running. The caller holds
//! whatever lock protects the network; this module assumes exclusive
//! access.

use log::{debug, trace};

use super::network::TrafficNetwork;
use super::router::next_hop;
use super::types::{JunctionId, VehicleClass};
use super::vehicle::Vehicle;

/// Blocked attempts beyond this count trigger a rerouting attempt.
pub const REROUTE_THRESHOLD: u32 = 5;

/// What a single call to [`TrafficNetwork::process_junction`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// A vehicle advanced one hop.
    Advanced { from: JunctionId, to: JunctionId },
    /// A vehicle reached its destination and left the network.
    Completed { class: VehicleClass, at: JunctionId },
    /// The selected vehicle could not move and was requeued.
    Blocked { at: JunctionId },
    /// The selected vehicle has nowhere to go from here.
    NoPath,
    /// No vehicle was waiting at the junction.
    Idle,
}

impl MoveOutcome {
    /// Whether a vehicle actually changed position or left the network.
    pub fn moved(&self) -> bool {
        matches!(self, Self::Advanced { .. } | Self::Completed { .. })
    }
}

impl TrafficNetwork {
    /// Run the movement protocol once at `junction`: select the next
    /// vehicle, route it, and either advance, complete, or requeue it.
    pub fn process_junction(&mut self, junction: JunctionId) -> MoveOutcome {
        let Some(vehicle) = self.junctions[junction.0].pop_next() else {
            return MoveOutcome::Idle;
        };

        let Some(target) = next_hop(&self.graph, junction, vehicle.destination) else {
            // Dead-end junction; keep the vehicle where it is.
            trace!("{} stranded at {}", vehicle.describe(), junction);
            self.junctions[junction.0].enqueue(vehicle);
            return MoveOutcome::NoPath;
        };

        if self.junctions[target.0].can_admit(vehicle.class) {
            self.perform_move(vehicle, junction, target)
        } else {
            self.block(vehicle, junction)
        }
    }

    /// Commit a move from `from` to `to`. The source slot is released
    /// first; if the target filled in the meantime the move reverses and
    /// counts as blocked.
    fn perform_move(&mut self, mut vehicle: Vehicle, from: JunctionId, to: JunctionId) -> MoveOutcome {
        self.junctions[from.0].occupancy = self.junctions[from.0].occupancy.saturating_sub(1);
        vehicle.current = to;
        self.stats.record_move();

        if to == vehicle.destination {
            debug!("{} completed its route at {}", vehicle.describe(), to);
            self.stats.record_completion(vehicle.class);
            return MoveOutcome::Completed {
                class: vehicle.class,
                at: to,
            };
        }

        // Re-check admission at commit time; a single-threaded driver
        // never fails this, but the release above makes the order
        // explicit.
        if self.junctions[to.0].can_admit(vehicle.class) {
            trace!("{} advanced {} -> {}", vehicle.describe(), from, to);
            self.junctions[to.0].occupancy += 1;
            vehicle.blocked_attempts = 0;
            self.junctions[to.0].enqueue(vehicle);
            MoveOutcome::Advanced { from, to }
        } else {
            self.junctions[from.0].occupancy += 1;
            vehicle.current = from;
            self.block(vehicle, from)
        }
    }

    /// Requeue a vehicle that could not move, bumping its blocked
    /// counter and triggering a reroute reset past the threshold.
    fn block(&mut self, mut vehicle: Vehicle, at: JunctionId) -> MoveOutcome {
        vehicle.blocked_attempts += 1;
        if vehicle.blocked_attempts > REROUTE_THRESHOLD {
            debug!(
                "{} blocked {} times at {}, rerouting",
                vehicle.describe(),
                vehicle.blocked_attempts,
                at
            );
            self.stats.record_reroute();
            vehicle.blocked_attempts = 0;
        } else {
            trace!("{} blocked at {}", vehicle.describe(), at);
        }
        self.junctions[at.0].enqueue(vehicle);
        MoveOutcome::Blocked { at }
    }
}
