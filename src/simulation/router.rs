//! Shortest-path routing over the junction graph
//!
//! The graph is unweighted, so shortest path means fewest hops. Paths
//! are recomputed per call; the graph is static within a run, so callers
//! may cache if they ever need to.

use std::collections::VecDeque;

use super::graph::GraphModel;
use super::types::JunctionId;

/// Next junction on a shortest path from `from` to `destination`, or
/// `None` when `from` has no outgoing edges.
///
/// Among equal-length paths the result is whichever breadth-first search
/// discovers first, which follows the adjacency declaration order.
pub fn next_hop(
    graph: &GraphModel,
    from: JunctionId,
    destination: JunctionId,
) -> Option<JunctionId> {
    let adjacent = graph.adjacent(from);
    if adjacent.is_empty() {
        return None;
    }

    // Direct adjacency needs no search.
    if adjacent.contains(&destination) {
        return Some(destination);
    }

    let n = graph.len();
    let mut parent = vec![None; n];
    let mut visited = vec![false; n];
    let mut queue = VecDeque::new();
    queue.push_back(from);
    visited[from.0] = true;

    while let Some(current) = queue.pop_front() {
        if current == destination {
            // Walk the parent pointers back until the predecessor is
            // `from`; that node is the first hop.
            let mut next = destination;
            while let Some(predecessor) = parent[next.0] {
                if predecessor == from {
                    break;
                }
                next = predecessor;
            }
            return Some(next);
        }

        for &neighbor in graph.adjacent(current) {
            if !visited[neighbor.0] {
                visited[neighbor.0] = true;
                parent[neighbor.0] = Some(current);
                queue.push_back(neighbor);
            }
        }
    }

    // Unreachable on a validated, static graph; fall back to the first
    // declared neighbor rather than stranding the vehicle.
    Some(adjacent[0])
}
