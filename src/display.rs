//! Console rendering
//!
//! Plain println tables over the read-only snapshot types. Nothing in
//! here touches simulation state.

use crate::simulation::{GraphModel, NetworkSnapshot, StepReport};

/// Per-junction status table.
pub fn print_network_status(snapshot: &NetworkSnapshot) {
    println!();
    println!("Node  Type  Capacity  Usage  Waiting  Emergency");
    println!("----  ----  --------  -----  -------  ---------");
    for junction in &snapshot.junctions {
        println!(
            "{:<4}  {:<4}  {:>8}  {:>5}  {:>7}  {:>9}",
            junction.label,
            junction.kind.short_code(),
            junction.capacity,
            junction.occupancy,
            junction.waiting,
            junction.emergency,
        );
    }
    println!();
}

/// One-line progress summary, used by the live refresh.
pub fn print_quick_stats(snapshot: &NetworkSnapshot) {
    let stats = &snapshot.stats;
    println!(
        "[cycle {}] moves: {}  completed: {}  rerouted: {}  success: {:.1}%",
        snapshot.step,
        stats.total_moves,
        stats.total_completed(),
        stats.rerouting_attempts,
        stats.success_rate,
    );
}

/// Static description of the network printed once at startup.
pub fn print_network_summary(graph: &GraphModel) {
    println!("Network: {} junctions, {} connections", graph.len(), graph.edge_count());
    for index in 0..graph.len() {
        let id = crate::simulation::JunctionId(index);
        let neighbors: Vec<String> = graph
            .adjacent(id)
            .iter()
            .map(|junction| junction.label().to_string())
            .collect();
        println!("  {} -> {}", id.label(), neighbors.join(", "));
    }
    println!();
}

/// Header line printed after each step in step-by-step mode.
pub fn print_step_header(report: &StepReport) {
    println!("=== Step {} ===", report.step);
    println!("{:?}", report.outcome);
}

/// End-of-run report for every mode.
pub fn print_final_report(snapshot: &NetworkSnapshot) {
    let stats = &snapshot.stats;
    println!();
    println!("=== Simulation Results ===");
    println!("Elapsed:               {:.2}s", stats.elapsed.as_secs_f64());
    println!("Steps executed:        {}", stats.steps_executed);
    println!("Vehicles injected:     {}", stats.vehicles_injected);
    println!("Total moves:           {}", stats.total_moves);
    println!("Regular completed:     {}", stats.regular_completed);
    println!("Emergency completed:   {}", stats.emergency_completed);
    println!("Rerouting attempts:    {}", stats.rerouting_attempts);
    println!("Success rate:          {:.1}%", stats.success_rate);
    println!("Throughput:            {:.2} moves/s", stats.throughput);
}
