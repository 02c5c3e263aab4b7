//! Traffic Management Simulation Library
//!
//! Simulates vehicle traffic flowing through a directed network of
//! capacity-limited junctions, with priority routing for emergency
//! vehicles. The simulation can run step by step on a single thread or
//! continuously on a worker pool.

pub mod display;
pub mod input;
pub mod simulation;
