//! Movement protocol and step-by-step driver tests.

use std::collections::HashMap;
use std::sync::Arc;

use traffic_manager::simulation::{
    execute_single_step, run_step_by_step, JunctionId, MoveOutcome, NetworkSpec, SimConfig,
    SimStats, StepEnd, TrafficNetwork, VehicleClass, MAX_STEPS, REROUTE_THRESHOLD,
};

fn network_from(spec: &NetworkSpec) -> TrafficNetwork {
    TrafficNetwork::build(spec, Arc::new(SimStats::new()))
}

/// Directed triangle A->B->C->A with A's vehicles destined for C.
fn triangle_spec() -> NetworkSpec {
    let mut spec = NetworkSpec::new(vec![
        vec![0, 1, 0],
        vec![0, 0, 1],
        vec![1, 0, 0],
    ]);
    spec.destinations.insert(JunctionId(0), JunctionId(2));
    spec
}

#[test]
fn vehicle_advances_toward_destination() {
    let mut network = network_from(&triangle_spec());
    network.inject_vehicle(VehicleClass::Regular, JunctionId(0));

    let outcome = network.process_junction(JunctionId(0));
    assert_eq!(
        outcome,
        MoveOutcome::Advanced {
            from: JunctionId(0),
            to: JunctionId(1),
        }
    );
    assert_eq!(network.queued_at(JunctionId(0)), 0);
    assert_eq!(network.queued_at(JunctionId(1)), 1);
    assert_eq!(network.junction(JunctionId(0)).occupancy, 0);
    assert_eq!(network.junction(JunctionId(1)).occupancy, 1);
    assert!(network.queues_consistent());

    let stats = network.stats().snapshot();
    assert_eq!(stats.total_moves, 1);
    assert_eq!(stats.total_completed(), 0);
}

#[test]
fn vehicle_completes_and_leaves_the_network() {
    let mut network = network_from(&triangle_spec());
    network.inject_vehicle(VehicleClass::Regular, JunctionId(0));
    network.process_junction(JunctionId(0));

    let outcome = network.process_junction(JunctionId(1));
    assert_eq!(
        outcome,
        MoveOutcome::Completed {
            class: VehicleClass::Regular,
            at: JunctionId(2),
        }
    );
    assert_eq!(network.total_queued(), 0);
    assert_eq!(network.junction(JunctionId(2)).occupancy, 0);

    let stats = network.stats().snapshot();
    assert_eq!(stats.regular_completed, 1);
    assert_eq!(stats.successful_routes, 1);
    assert_eq!(stats.total_moves, 2);
}

#[test]
fn full_junction_blocks_a_regular_vehicle() {
    let mut spec = triangle_spec();
    spec.capacities.insert(JunctionId(1), 1);
    spec.destinations.insert(JunctionId(1), JunctionId(0));
    let mut network = network_from(&spec);

    // Fill B, then try to push a vehicle from A through it.
    network.inject_vehicle(VehicleClass::Regular, JunctionId(1));
    network.inject_vehicle(VehicleClass::Regular, JunctionId(0));

    let outcome = network.process_junction(JunctionId(0));
    assert_eq!(outcome, MoveOutcome::Blocked { at: JunctionId(0) });
    assert_eq!(network.queued_at(JunctionId(0)), 1);
    assert_eq!(
        network.junction(JunctionId(0)).waiting.front().unwrap().blocked_attempts,
        1
    );
    assert!(network.queues_consistent());
    assert_eq!(network.stats().snapshot().total_moves, 0);
}

#[test]
fn repeated_blocking_triggers_a_reroute_reset() {
    let mut spec = triangle_spec();
    spec.capacities.insert(JunctionId(1), 1);
    spec.destinations.insert(JunctionId(1), JunctionId(0));
    let mut network = network_from(&spec);

    network.inject_vehicle(VehicleClass::Regular, JunctionId(1));
    network.inject_vehicle(VehicleClass::Regular, JunctionId(0));

    // The counter must exceed the threshold before the reset fires.
    for _ in 0..REROUTE_THRESHOLD {
        network.process_junction(JunctionId(0));
    }
    assert_eq!(network.stats().snapshot().rerouting_attempts, 0);
    assert_eq!(
        network.junction(JunctionId(0)).waiting.front().unwrap().blocked_attempts,
        REROUTE_THRESHOLD
    );

    network.process_junction(JunctionId(0));
    assert_eq!(network.stats().snapshot().rerouting_attempts, 1);
    assert_eq!(
        network.junction(JunctionId(0)).waiting.front().unwrap().blocked_attempts,
        0
    );
}

#[test]
fn emergency_vehicle_uses_the_grace_slot() {
    let mut spec = triangle_spec();
    spec.capacities.insert(JunctionId(1), 1);
    spec.destinations.insert(JunctionId(1), JunctionId(0));
    let mut network = network_from(&spec);

    network.inject_vehicle(VehicleClass::Regular, JunctionId(1));
    network.inject_vehicle(VehicleClass::Ambulance, JunctionId(0));

    let outcome = network.process_junction(JunctionId(0));
    assert_eq!(
        outcome,
        MoveOutcome::Advanced {
            from: JunctionId(0),
            to: JunctionId(1),
        }
    );
    assert_eq!(network.junction(JunctionId(1)).occupancy, 2);
}

#[test]
fn emergency_vehicle_is_serviced_before_regulars() {
    let mut network = network_from(&triangle_spec());
    network.inject_vehicle(VehicleClass::Regular, JunctionId(0));
    let ambulance_id = network.inject_vehicle(VehicleClass::Ambulance, JunctionId(0));

    network.process_junction(JunctionId(0));
    let at_b = network.junction(JunctionId(1));
    assert_eq!(at_b.emergency.len(), 1);
    assert_eq!(at_b.emergency.peek().unwrap().id, ambulance_id);
    // The regular vehicle is still waiting at A.
    assert_eq!(network.queued_at(JunctionId(0)), 1);
}

#[test]
fn dead_end_junction_reports_no_path() {
    let mut spec = NetworkSpec::new(vec![vec![0, 1], vec![0, 0]]);
    spec.destinations.insert(JunctionId(1), JunctionId(0));
    let mut network = network_from(&spec);
    network.inject_vehicle(VehicleClass::Regular, JunctionId(1));

    assert_eq!(network.process_junction(JunctionId(1)), MoveOutcome::NoPath);
    // The vehicle stays put, without a blocked-attempt charge.
    assert_eq!(network.queued_at(JunctionId(1)), 1);
    assert_eq!(
        network.junction(JunctionId(1)).waiting.front().unwrap().blocked_attempts,
        0
    );
}

#[test]
fn empty_junction_is_idle() {
    let mut network = network_from(&triangle_spec());
    assert_eq!(network.process_junction(JunctionId(0)), MoveOutcome::Idle);
}

#[test]
fn single_step_stops_at_first_movement() {
    let mut network = network_from(&triangle_spec());
    network.inject_vehicle(VehicleClass::Regular, JunctionId(0));
    network.inject_vehicle(VehicleClass::Regular, JunctionId(1));

    let outcome = execute_single_step(&mut network).unwrap();
    // Junction A is scanned first, so only its vehicle moves.
    assert_eq!(
        outcome,
        MoveOutcome::Advanced {
            from: JunctionId(0),
            to: JunctionId(1),
        }
    );
    assert_eq!(network.stats().snapshot().total_moves, 1);
}

#[test]
fn empty_network_ends_after_one_step() {
    let mut network = network_from(&triangle_spec());
    let summary = run_step_by_step(&mut network, &SimConfig::default(), |_, _| {});
    assert_eq!(summary.steps, 1);
    assert_eq!(summary.ended, StepEnd::NoMovement);
    assert_eq!(network.stats().snapshot().steps_executed, 1);
}

#[test]
fn run_drains_all_vehicles_and_conserves_them() {
    let mut spec = triangle_spec();
    spec.regular.insert(JunctionId(0), 2);
    spec.regular.insert(JunctionId(1), 1);
    let mut network = network_from(&spec);
    network.populate(&spec);
    let injected = network.stats().snapshot().vehicles_injected;
    assert_eq!(injected, 3);

    let summary = run_step_by_step(&mut network, &SimConfig::default(), |network, _| {
        assert!(network.queues_consistent());
    });

    assert_eq!(summary.ended, StepEnd::NoMovement);
    let stats = network.stats().snapshot();
    assert_eq!(
        stats.total_completed() + network.total_queued() as u64,
        injected
    );
    assert_eq!(network.total_queued(), 0);
    assert!(network.queues_consistent());
}

#[test]
fn run_stops_at_the_step_ceiling() {
    // A and B cycle; C exists but nothing reaches it, so the vehicle
    // bound for C bounces forever.
    let mut spec = NetworkSpec::new(vec![
        vec![0, 1, 0],
        vec![1, 0, 0],
        vec![1, 0, 0],
    ]);
    spec.destinations.insert(JunctionId(0), JunctionId(2));
    let mut network = network_from(&spec);
    network.inject_vehicle(VehicleClass::Regular, JunctionId(0));

    let summary = run_step_by_step(&mut network, &SimConfig::default(), |_, _| {});
    assert_eq!(summary.steps, MAX_STEPS);
    assert_eq!(summary.ended, StepEnd::StepCeiling);
    assert_eq!(network.total_queued(), 1);
}

#[test]
fn populate_clamps_regular_vehicles_below_capacity() {
    let mut spec = triangle_spec();
    spec.capacities.insert(JunctionId(0), 3);
    spec.regular.insert(JunctionId(0), 10);
    let mut network = network_from(&spec);
    network.populate(&spec);

    assert_eq!(network.queued_at(JunctionId(0)), 2);
}

#[test]
fn populate_places_emergency_vehicles_unclamped() {
    let mut spec = triangle_spec();
    spec.capacities.insert(JunctionId(0), 2);
    spec.ambulances.insert(JunctionId(0), 3);
    spec.fire_trucks.insert(JunctionId(0), 1);
    let mut network = network_from(&spec);
    network.populate(&spec);

    assert_eq!(network.junction(JunctionId(0)).emergency.len(), 4);
}

#[test]
fn derived_metrics() {
    use traffic_manager::simulation::{success_rate, throughput};
    use std::time::Duration;

    assert_eq!(success_rate(7, 10), 70.0);
    assert_eq!(success_rate(0, 0), 0.0);
    assert_eq!(throughput(30, Duration::from_secs(10)), 3.0);
    assert_eq!(throughput(5, Duration::ZERO), 0.0);
}

#[test]
fn destinations_default_when_undeclared() {
    let spec = NetworkSpec::new(vec![
        vec![0, 1, 0],
        vec![0, 0, 1],
        vec![1, 0, 0],
    ]);
    let network = network_from(&spec);
    let mut declared = HashMap::new();
    for index in 0..3 {
        let id = JunctionId(index);
        declared.insert(id, network.graph().destination_of(id));
    }
    assert_eq!(declared[&JunctionId(0)], JunctionId(1));
    assert_eq!(declared[&JunctionId(2)], JunctionId(0));
}
