//! Core types for the traffic network simulation

use std::fmt;

/// Index of a junction in the network, 0..N-1
///
/// A simple wrapper around a usize for type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JunctionId(pub usize);

impl JunctionId {
    /// Display label: junction 0 is `A`, junction 1 is `B`, and so on.
    pub fn label(&self) -> char {
        (b'A' + (self.0 % 26) as u8) as char
    }

    /// Parse a single-letter label back into an id.
    pub fn from_label(label: char) -> Option<JunctionId> {
        if label.is_ascii_uppercase() {
            Some(JunctionId((label as u8 - b'A') as usize))
        } else {
            None
        }
    }
}

impl fmt::Display for JunctionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Classification of a vehicle. Immutable after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VehicleClass {
    Regular,
    FireTruck,
    Ambulance,
}

impl VehicleClass {
    /// Fire trucks and ambulances use the priority queue and the
    /// one-slot capacity grace.
    pub fn is_emergency(&self) -> bool {
        !matches!(self, VehicleClass::Regular)
    }

    /// Extraction rank within the emergency queue; higher pops first.
    pub fn priority_rank(&self) -> u8 {
        match self {
            VehicleClass::Regular => 0,
            VehicleClass::FireTruck => 1,
            VehicleClass::Ambulance => 2,
        }
    }

    pub fn short_code(&self) -> &'static str {
        match self {
            VehicleClass::Regular => "REG",
            VehicleClass::FireTruck => "FIRE",
            VehicleClass::Ambulance => "AMB",
        }
    }
}

/// Kind of a junction. Informational only: it does not change admission
/// or routing rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JunctionKind {
    WaitNode,
    TrafficController,
}

impl JunctionKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            JunctionKind::WaitNode => "Wait Node",
            JunctionKind::TrafficController => "Traffic Controller",
        }
    }

    pub fn short_code(&self) -> &'static str {
        match self {
            JunctionKind::WaitNode => "WAIT",
            JunctionKind::TrafficController => "CTRL",
        }
    }
}

/// Which driver runs the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationMode {
    /// Single-threaded, one movement per global step.
    StepByStep,
    /// Multi-threaded with a live console refresh.
    Automatic,
    /// Multi-threaded, final results only.
    FastRun,
}
