//! Network description parser tests.

use traffic_manager::input::parse_network_spec;
use traffic_manager::simulation::JunctionId;

const FULL_FILE: &str = "\
4
0 1 1 0
0 0 1 1
0 0 0 1
1 0 0 0

# Node Capacities
A:5
B:3
C:4
D:6

# Traffic Controller Nodes
A, C

# Initial Traffic Allocation
A:2
B:1

# Ambulances
B:1

# Fire Trucks
D:1

# Destination Nodes
A:D
B:C
C:A
D:B
";

#[test]
fn parses_a_complete_file() {
    let spec = parse_network_spec(FULL_FILE).unwrap();

    assert_eq!(spec.matrix.len(), 4);
    assert_eq!(spec.matrix[0], vec![0, 1, 1, 0]);
    assert_eq!(spec.matrix[3], vec![1, 0, 0, 0]);

    assert_eq!(spec.capacities[&JunctionId(1)], 3);
    assert_eq!(spec.capacities[&JunctionId(3)], 6);

    assert!(spec.controllers.contains(&JunctionId(0)));
    assert!(spec.controllers.contains(&JunctionId(2)));
    assert!(!spec.controllers.contains(&JunctionId(1)));

    assert_eq!(spec.regular[&JunctionId(0)], 2);
    assert_eq!(spec.ambulances[&JunctionId(1)], 1);
    assert_eq!(spec.fire_trucks[&JunctionId(3)], 1);

    assert_eq!(spec.destinations[&JunctionId(0)], JunctionId(3));
    assert_eq!(spec.destinations[&JunctionId(2)], JunctionId(0));
}

#[test]
fn matrix_alone_is_enough() {
    let spec = parse_network_spec("2\n0 1\n1 0\n").unwrap();
    assert_eq!(spec.matrix, vec![vec![0, 1], vec![1, 0]]);
    assert!(spec.capacities.is_empty());
    assert!(spec.controllers.is_empty());
    assert!(spec.destinations.is_empty());
}

#[test]
fn matrix_entries_may_span_lines_unevenly() {
    let spec = parse_network_spec("2 0 1\n1 0\n").unwrap();
    assert_eq!(spec.matrix, vec![vec![0, 1], vec![1, 0]]);
}

#[test]
fn rejects_empty_input() {
    assert!(parse_network_spec("").is_err());
    assert!(parse_network_spec("   \n\n").is_err());
}

#[test]
fn rejects_zero_nodes() {
    assert!(parse_network_spec("0\n").is_err());
}

#[test]
fn rejects_short_matrix() {
    assert!(parse_network_spec("3\n0 1 0\n1 0\n").is_err());
}

#[test]
fn rejects_non_numeric_matrix_entry() {
    assert!(parse_network_spec("2\n0 x\n1 0\n").is_err());
}

#[test]
fn rejects_unknown_section() {
    let text = "2\n0 1\n1 0\n# Bicycle Lanes\nA:1\n";
    assert!(parse_network_spec(text).is_err());
}

#[test]
fn rejects_entry_outside_a_section() {
    let text = "2\n0 1\n1 0\nA:1\n";
    assert!(parse_network_spec(text).is_err());
}

#[test]
fn rejects_out_of_range_label() {
    let text = "2\n0 1\n1 0\n# Node Capacities\nE:4\n";
    assert!(parse_network_spec(text).is_err());
}

#[test]
fn rejects_malformed_entry() {
    let text = "2\n0 1\n1 0\n# Node Capacities\nA=4\n";
    assert!(parse_network_spec(text).is_err());

    let text = "2\n0 1\n1 0\n# Node Capacities\nA:many\n";
    assert!(parse_network_spec(text).is_err());

    let text = "2\n0 1\n1 0\n# Destination Nodes\nA:9\n";
    assert!(parse_network_spec(text).is_err());
}
