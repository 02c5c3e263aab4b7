//! Network state: junctions, vehicle placement, and snapshots

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::graph::GraphModel;
use super::junction::Junction;
use super::stats::{SimStats, StatsSnapshot};
use super::types::{JunctionId, JunctionKind, VehicleClass};
use super::vehicle::Vehicle;

/// Capacity used for junctions the input file does not override.
pub const DEFAULT_CAPACITY: usize = 5;

/// Parsed network description: the adjacency matrix plus the optional
/// configuration tables. Absent entries fall back to documented
/// defaults (capacity 5, all wait nodes, no emergency vehicles,
/// destination = next index mod N).
#[derive(Debug, Clone, Default)]
pub struct NetworkSpec {
    pub matrix: Vec<Vec<u32>>,
    pub capacities: HashMap<JunctionId, usize>,
    pub controllers: HashSet<JunctionId>,
    pub regular: HashMap<JunctionId, usize>,
    pub ambulances: HashMap<JunctionId, usize>,
    pub fire_trucks: HashMap<JunctionId, usize>,
    pub destinations: HashMap<JunctionId, JunctionId>,
}

impl NetworkSpec {
    pub fn new(matrix: Vec<Vec<u32>>) -> Self {
        Self {
            matrix,
            ..Default::default()
        }
    }

    /// The synthesized 4-node sample network, used when no input file is
    /// available or the supplied one fails to load or validate.
    pub fn sample() -> Self {
        Self::build_sample(&mut rand::rng())
    }

    /// Sample network with a seeded RNG for reproducible runs.
    pub fn sample_with_seed(seed: u64) -> Self {
        Self::build_sample(&mut StdRng::seed_from_u64(seed))
    }

    fn build_sample<R: Rng>(rng: &mut R) -> Self {
        let mut spec = Self::new(vec![
            vec![0, 1, 1, 0],
            vec![0, 0, 1, 1],
            vec![0, 0, 0, 1],
            vec![1, 0, 0, 0],
        ]);

        spec.controllers.insert(JunctionId(0));
        spec.controllers.insert(JunctionId(2));
        for (junction, capacity) in [(0, 5), (1, 3), (2, 4), (3, 6)] {
            spec.capacities.insert(JunctionId(junction), capacity);
        }
        for (source, destination) in [(0, 3), (1, 2), (2, 0), (3, 1)] {
            spec.destinations
                .insert(JunctionId(source), JunctionId(destination));
        }

        // One or two vehicles per junction with a small chance of an
        // emergency class.
        for junction in 0..4 {
            let id = JunctionId(junction);
            for _ in 0..(1 + junction % 2) {
                match rng.random_range(0..=10) {
                    0 => *spec.ambulances.entry(id).or_insert(0) += 1,
                    1 => *spec.fire_trucks.entry(id).or_insert(0) += 1,
                    _ => *spec.regular.entry(id).or_insert(0) += 1,
                }
            }
        }

        spec
    }
}

/// Read-only per-junction view handed to the display layer.
#[derive(Debug, Clone)]
pub struct JunctionSnapshot {
    pub label: char,
    pub kind: JunctionKind,
    pub capacity: usize,
    pub occupancy: usize,
    pub waiting: usize,
    pub emergency: usize,
}

/// Read-only view of the whole network plus the current statistics.
#[derive(Debug, Clone)]
pub struct NetworkSnapshot {
    pub junctions: Vec<JunctionSnapshot>,
    pub stats: StatsSnapshot,
    /// Current step (step-by-step mode) or token cycle (automatic
    /// modes).
    pub step: u64,
}

/// The simulation context: the graph, every junction's queues, the
/// shared statistics, and the vehicle id source. Owned by whichever
/// driver is running and passed by reference to every task; there is no
/// ambient/static state.
pub struct TrafficNetwork {
    pub(super) graph: GraphModel,
    pub(super) junctions: Vec<Junction>,
    pub(super) stats: Arc<SimStats>,
    pub(super) next_vehicle_id: u64,
}

impl TrafficNetwork {
    /// Build junctions from a spec without placing any vehicles, so the
    /// result can be validated first.
    pub fn build(spec: &NetworkSpec, stats: Arc<SimStats>) -> Self {
        let graph = GraphModel::from_matrix(spec.matrix.clone(), spec.destinations.clone());

        let junctions = (0..graph.len())
            .map(|index| {
                let id = JunctionId(index);
                let kind = if spec.controllers.contains(&id) {
                    JunctionKind::TrafficController
                } else {
                    JunctionKind::WaitNode
                };
                let capacity = spec.capacities.get(&id).copied().unwrap_or(DEFAULT_CAPACITY);
                let mut junction = Junction::new(id, kind, capacity);
                junction.adjacent = graph.adjacent(id).to_vec();
                junction
            })
            .collect();

        Self {
            graph,
            junctions,
            stats,
            next_vehicle_id: 1,
        }
    }

    /// Place the spec's initial vehicles. Regular counts are clamped so
    /// a junction keeps at least one free slot below capacity.
    pub fn populate(&mut self, spec: &NetworkSpec) {
        for index in 0..self.junctions.len() {
            let id = JunctionId(index);

            if let Some(&requested) = spec.regular.get(&id) {
                let capacity = self.junctions[index].capacity;
                let count = requested.min(1.max(capacity.saturating_sub(1)));
                for _ in 0..count {
                    self.inject_vehicle(VehicleClass::Regular, id);
                }
            }

            if let Some(&count) = spec.ambulances.get(&id) {
                for _ in 0..count {
                    self.inject_vehicle(VehicleClass::Ambulance, id);
                }
            }

            if let Some(&count) = spec.fire_trucks.get(&id) {
                for _ in 0..count {
                    self.inject_vehicle(VehicleClass::FireTruck, id);
                }
            }
        }
    }

    /// Create a vehicle at `junction` headed for the junction's declared
    /// destination, and enqueue it there.
    pub fn inject_vehicle(&mut self, class: VehicleClass, junction: JunctionId) -> u64 {
        let destination = self.graph.destination_of(junction);
        let id = self.next_vehicle_id;
        self.next_vehicle_id += 1;

        let vehicle = Vehicle::new(id, class, junction, destination);
        let target = &mut self.junctions[junction.0];
        target.occupancy += 1;
        target.enqueue(vehicle);
        self.stats.record_injection();
        id
    }

    pub fn graph(&self) -> &GraphModel {
        &self.graph
    }

    pub fn junctions(&self) -> &[Junction] {
        &self.junctions
    }

    pub fn junction(&self, id: JunctionId) -> &Junction {
        &self.junctions[id.0]
    }

    pub fn junction_count(&self) -> usize {
        self.junctions.len()
    }

    pub fn queued_at(&self, id: JunctionId) -> usize {
        self.junctions[id.0].queued()
    }

    pub fn total_queued(&self) -> usize {
        self.junctions.iter().map(Junction::queued).sum()
    }

    pub fn stats(&self) -> &Arc<SimStats> {
        &self.stats
    }

    /// The per-junction occupancy invariant, checked across the whole
    /// network.
    pub fn queues_consistent(&self) -> bool {
        self.junctions.iter().all(Junction::queues_consistent)
    }

    pub fn snapshot(&self) -> NetworkSnapshot {
        let stats = self.stats.snapshot();
        NetworkSnapshot {
            junctions: self
                .junctions
                .iter()
                .map(|junction| JunctionSnapshot {
                    label: junction.id.label(),
                    kind: junction.kind,
                    capacity: junction.capacity,
                    occupancy: junction.occupancy,
                    waiting: junction.waiting.len(),
                    emergency: junction.emergency.len(),
                })
                .collect(),
            step: stats.steps_executed,
            stats,
        }
    }
}
