//! Directed adjacency structure over the junction network
//!
//! Built once from an N×N matrix and immutable for the rest of the run.

use std::collections::HashMap;

use super::types::JunctionId;

/// The network graph: adjacency matrix, derived adjacency lists, and the
/// declared destination mapping used when placing vehicles.
#[derive(Debug, Clone)]
pub struct GraphModel {
    matrix: Vec<Vec<u32>>,
    adjacency: Vec<Vec<JunctionId>>,
    destinations: HashMap<JunctionId, JunctionId>,
}

impl GraphModel {
    /// A strictly positive matrix entry means a directed edge exists;
    /// the weight value itself is unused. Adjacency lists preserve the
    /// column order the edges were declared in, which keeps the router's
    /// tie-breaking reproducible.
    pub fn from_matrix(
        matrix: Vec<Vec<u32>>,
        destinations: HashMap<JunctionId, JunctionId>,
    ) -> Self {
        let adjacency = matrix
            .iter()
            .map(|row| {
                row.iter()
                    .enumerate()
                    .filter(|(_, &weight)| weight > 0)
                    .map(|(col, _)| JunctionId(col))
                    .collect()
            })
            .collect();

        Self {
            matrix,
            adjacency,
            destinations,
        }
    }

    /// Number of junctions.
    pub fn len(&self) -> usize {
        self.matrix.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matrix.is_empty()
    }

    pub fn matrix(&self) -> &[Vec<u32>] {
        &self.matrix
    }

    pub fn adjacent(&self, junction: JunctionId) -> &[JunctionId] {
        &self.adjacency[junction.0]
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum()
    }

    /// Declared destination for vehicles originating at `junction`;
    /// junctions without one default deterministically to the next
    /// index mod N.
    pub fn destination_of(&self, junction: JunctionId) -> JunctionId {
        match self.destinations.get(&junction) {
            Some(&destination) => destination,
            None => JunctionId((junction.0 + 1) % self.len()),
        }
    }

    pub fn declared_destinations(&self) -> &HashMap<JunctionId, JunctionId> {
        &self.destinations
    }
}
