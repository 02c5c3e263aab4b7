//! Concurrent drivers: the token-cycle coordinator and its helper loops
//!
//! One global mutex guards the whole network; the token allocation loop
//! takes it once per sweep and runs the movement protocol at every
//! junction with pending vehicles. Per-junction nudge loops only signal
//! the coordinator to wake early, and the refresh loop only reads
//! snapshots. Statistics live behind their own lock inside `SimStats`,
//! so progress reporting never contends with movement.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use crossbeam_channel::{unbounded, Receiver, RecvTimeoutError, Sender};
use log::{debug, info};

use super::config::SimConfig;
use super::movement::MoveOutcome;
use super::network::{NetworkSnapshot, TrafficNetwork};
use super::pool::WorkerPool;
use super::types::{JunctionId, SimulationMode};

/// Why the coordinator woke from its cycle wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleWake {
    /// The full cycle period passed without a signal.
    Elapsed,
    /// A nudge loop reported pending work.
    Nudged,
    /// Shutdown was requested or every signaler is gone.
    Shutdown,
}

/// Signals sent to the coordinator between sweeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WakeSignal {
    /// A junction has vehicles waiting.
    Nudge(JunctionId),
    Shutdown,
}

/// Block for up to `period` or until a signal arrives, whichever comes
/// first. A disconnected channel reads as shutdown.
pub fn wait_for_cycle(signals: &Receiver<WakeSignal>, period: Duration) -> CycleWake {
    match signals.recv_timeout(period) {
        Ok(WakeSignal::Nudge(junction)) => {
            debug!("woken early by nudge from {}", junction);
            CycleWake::Nudged
        }
        Ok(WakeSignal::Shutdown) | Err(RecvTimeoutError::Disconnected) => CycleWake::Shutdown,
        Err(RecvTimeoutError::Timeout) => CycleWake::Elapsed,
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Owner of the Automatic and FastRun drivers.
pub struct Coordinator {
    network: Arc<Mutex<TrafficNetwork>>,
    config: SimConfig,
    shutdown: Arc<AtomicBool>,
}

impl Coordinator {
    pub fn new(network: TrafficNetwork, config: SimConfig) -> Self {
        Self {
            network: Arc::new(Mutex::new(network)),
            config,
            shutdown: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn network(&self) -> Arc<Mutex<TrafficNetwork>> {
        Arc::clone(&self.network)
    }

    /// Ask the running simulation to stop before its time is up.
    pub fn request_shutdown(&self) {
        self.shutdown.store(true, Ordering::SeqCst);
    }

    /// Run the simulation for the configured duration and return the
    /// final snapshot.
    pub fn run(&self) -> anyhow::Result<NetworkSnapshot> {
        let junction_count = lock(&self.network).junction_count();
        let (wake_tx, wake_rx) = unbounded::<WakeSignal>();

        // One slot per nudge loop plus the token loop and the refresh
        // loop.
        let mut pool = WorkerPool::new(junction_count + 2);

        {
            let network = Arc::clone(&self.network);
            let period = self.config.token_cycle;
            pool.execute(move || token_allocation_loop(&network, &wake_rx, period))
                .context("failed to start token allocation loop")?;
        }

        for index in 0..junction_count {
            let network = Arc::clone(&self.network);
            let shutdown = Arc::clone(&self.shutdown);
            let wake_tx = wake_tx.clone();
            let delay = self.config.retry_delay;
            pool.execute(move || {
                nudge_loop(&network, &shutdown, &wake_tx, JunctionId(index), delay)
            })
            .with_context(|| format!("failed to start nudge loop for junction {}", index))?;
        }

        if self.config.mode == SimulationMode::Automatic {
            let network = Arc::clone(&self.network);
            let shutdown = Arc::clone(&self.shutdown);
            let period = self.config.console_refresh;
            pool.execute(move || refresh_loop(&network, &shutdown, period))
                .context("failed to start refresh loop")?;
        }

        info!(
            "simulation running for {:?} across {} junction(s)",
            self.config.simulation_time, junction_count
        );

        let deadline = Instant::now() + self.config.simulation_time;
        while Instant::now() < deadline && !self.shutdown.load(Ordering::SeqCst) {
            thread::sleep(Duration::from_millis(100));
        }

        self.shutdown.store(true, Ordering::SeqCst);
        let _ = wake_tx.send(WakeSignal::Shutdown);
        pool.shutdown(Duration::from_secs(2));

        Ok(lock(&self.network).snapshot())
    }
}

/// The coordinator's own loop: sweep every junction under the network
/// lock, release it, then wait out the cycle or an early nudge.
fn token_allocation_loop(
    network: &Mutex<TrafficNetwork>,
    signals: &Receiver<WakeSignal>,
    period: Duration,
) {
    loop {
        {
            let mut network = lock(network);
            for index in 0..network.junction_count() {
                let junction = JunctionId(index);
                if network.queued_at(junction) == 0 {
                    continue;
                }
                let outcome = network.process_junction(junction);
                if let MoveOutcome::Completed { class, at } = outcome {
                    debug!("{:?} vehicle completed at {}", class, at);
                }
            }
            network.stats().record_step();
        }

        if wait_for_cycle(signals, period) == CycleWake::Shutdown {
            debug!("token allocation loop stopping");
            break;
        }
    }
}

/// Per-junction watcher: periodically peeks at the junction's queue and
/// nudges the coordinator when vehicles are waiting. Never moves a
/// vehicle itself.
fn nudge_loop(
    network: &Mutex<TrafficNetwork>,
    shutdown: &AtomicBool,
    wake_tx: &Sender<WakeSignal>,
    junction: JunctionId,
    retry_delay: Duration,
) {
    let period = retry_delay * 3;
    loop {
        thread::sleep(period);
        if shutdown.load(Ordering::SeqCst) {
            break;
        }

        let pending = lock(network).queued_at(junction);
        if pending > 0 && wake_tx.send(WakeSignal::Nudge(junction)).is_err() {
            break;
        }
    }
}

/// Periodic console reporting for Automatic mode. Takes the lock only
/// long enough to copy a snapshot.
fn refresh_loop(network: &Mutex<TrafficNetwork>, shutdown: &AtomicBool, period: Duration) {
    while !shutdown.load(Ordering::SeqCst) {
        let snapshot = lock(network).snapshot();
        crate::display::print_quick_stats(&snapshot);
        thread::sleep(period);
    }
}
