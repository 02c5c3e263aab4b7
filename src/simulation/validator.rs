//! Pre-simulation network validation
//!
//! Runs once before any vehicle moves; the graph is immutable afterwards
//! so the checks never re-run.

use std::fmt;

use super::graph::GraphModel;
use super::junction::Junction;
use super::types::JunctionId;

/// Initialization-time validation failures, in check order: the first
/// failing check wins.
///
/// `Display`/`Error` are implemented by hand because `thiserror` treats
/// a field named `source` as the error's cause and would require
/// `JunctionId: Error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    DisconnectedGraph,
    UnreachableDestination {
        source: JunctionId,
        destination: JunctionId,
    },
    InvalidCapacity { junction: JunctionId },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::DisconnectedGraph => {
                write!(f, "network graph is not connected")
            }
            ValidationError::UnreachableDestination {
                source,
                destination,
            } => write!(
                f,
                "declared destination {destination} is unreachable from junction {source}"
            ),
            ValidationError::InvalidCapacity { junction } => {
                write!(f, "junction {junction} has a non-positive capacity")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validate the graph and junction configuration before simulation:
/// connectivity, destination reachability, then capacities.
pub fn validate(graph: &GraphModel, junctions: &[Junction]) -> Result<(), ValidationError> {
    if !is_connected(graph) {
        return Err(ValidationError::DisconnectedGraph);
    }

    for (&source, &destination) in graph.declared_destinations() {
        if !path_exists(graph, source, destination) {
            return Err(ValidationError::UnreachableDestination {
                source,
                destination,
            });
        }
    }

    for junction in junctions {
        if junction.capacity == 0 {
            return Err(ValidationError::InvalidCapacity {
                junction: junction.id,
            });
        }
    }

    Ok(())
}

/// Depth-first reachability from junction 0 must visit every junction.
/// An empty graph is disconnected by convention.
fn is_connected(graph: &GraphModel) -> bool {
    let n = graph.len();
    if n == 0 {
        return false;
    }

    let mut visited = vec![false; n];
    let mut stack = vec![JunctionId(0)];
    visited[0] = true;
    let mut count = 1;

    while let Some(current) = stack.pop() {
        for &neighbor in graph.adjacent(current) {
            if !visited[neighbor.0] {
                visited[neighbor.0] = true;
                stack.push(neighbor);
                count += 1;
            }
        }
    }

    count == n
}

/// Breadth-first search for a directed path. A source equal to its own
/// destination is trivially reachable.
fn path_exists(graph: &GraphModel, source: JunctionId, destination: JunctionId) -> bool {
    let n = graph.len();
    if source.0 >= n || destination.0 >= n {
        return false;
    }
    if source == destination {
        return true;
    }

    let mut visited = vec![false; n];
    let mut queue = std::collections::VecDeque::new();
    queue.push_back(source);
    visited[source.0] = true;

    while let Some(current) = queue.pop_front() {
        for &neighbor in graph.adjacent(current) {
            if !visited[neighbor.0] {
                if neighbor == destination {
                    return true;
                }
                visited[neighbor.0] = true;
                queue.push_back(neighbor);
            }
        }
    }

    false
}
