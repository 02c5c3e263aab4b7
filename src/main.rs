//! Console entry point for the traffic simulation.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use log::{info, warn};

use traffic_manager::display;
use traffic_manager::input::load_network_spec;
use traffic_manager::simulation::{
    run_step_by_step, validate, Coordinator, NetworkSpec, SimConfig, SimStats, SimulationMode,
    TrafficNetwork,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ModeArg {
    /// One movement per step, paced by the console.
    Step,
    /// Concurrent run with a live status refresh.
    Auto,
    /// Concurrent run, final results only.
    Fast,
}

impl From<ModeArg> for SimulationMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Step => SimulationMode::StepByStep,
            ModeArg::Auto => SimulationMode::Automatic,
            ModeArg::Fast => SimulationMode::FastRun,
        }
    }
}

/// Priority-aware traffic routing simulation.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Network description file; a built-in sample network is used when
    /// omitted.
    input: Option<PathBuf>,

    /// Simulation driver.
    #[arg(long, value_enum, default_value_t = ModeArg::Step)]
    mode: ModeArg,

    /// Run duration in seconds for the auto and fast modes.
    #[arg(long, default_value_t = 20)]
    duration: u64,

    /// Advance steps on a timer instead of waiting for Enter.
    #[arg(long)]
    auto_advance: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = SimConfig {
        mode: cli.mode.into(),
        simulation_time: Duration::from_secs(cli.duration),
        auto_advance_steps: cli.auto_advance,
        ..SimConfig::default()
    };

    let spec = match &cli.input {
        Some(path) => match load_network_spec(path) {
            Ok(spec) => spec,
            Err(error) => {
                warn!("{:#}; falling back to the sample network", error);
                NetworkSpec::sample()
            }
        },
        None => {
            info!("no input file given, using the sample network");
            NetworkSpec::sample()
        }
    };

    let network = build_validated(&spec);
    display::print_network_summary(network.graph());

    match config.mode {
        SimulationMode::StepByStep => run_stepped(network, &config),
        SimulationMode::Automatic | SimulationMode::FastRun => {
            let coordinator = Coordinator::new(network, config);
            let snapshot = coordinator.run()?;
            display::print_network_status(&snapshot);
            display::print_final_report(&snapshot);
            Ok(())
        }
    }
}

/// Build the network, swapping in the sample spec if the supplied one
/// fails validation, then place the initial vehicles.
fn build_validated(spec: &NetworkSpec) -> TrafficNetwork {
    let stats = Arc::new(SimStats::new());
    let mut network = TrafficNetwork::build(spec, stats);

    if let Err(error) = validate(network.graph(), network.junctions()) {
        warn!("network failed validation ({}); using the sample network", error);
        let sample = NetworkSpec::sample();
        network = TrafficNetwork::build(&sample, Arc::new(SimStats::new()));
        network.populate(&sample);
        return network;
    }

    network.populate(spec);
    network
}

fn run_stepped(mut network: TrafficNetwork, config: &SimConfig) -> Result<()> {
    let auto_advance = config.auto_advance_steps;
    let summary = run_step_by_step(&mut network, config, |network, report| {
        display::print_step_header(report);
        display::print_network_status(&network.snapshot());
        if !auto_advance {
            wait_for_enter();
        }
    });

    info!("run ended after {} step(s): {:?}", summary.steps, summary.ended);
    display::print_final_report(&network.snapshot());
    Ok(())
}

fn wait_for_enter() {
    print!("Press Enter to continue...");
    let _ = io::stdout().flush();
    let mut line = String::new();
    let _ = io::stdin().lock().read_line(&mut line);
}
