//! Fixed-size worker pool
//!
//! Workers pull boxed closures off a shared channel until the sender is
//! dropped. Shutdown is cooperative: closing the channel lets each
//! worker finish its current job and exit, and the pool waits up to a
//! grace period for that to happen.

use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::{unbounded, Sender};
use log::{debug, warn};
use thiserror::Error;

type Job = Box<dyn FnOnce() + Send + 'static>;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PoolError {
    #[error("job submitted to a worker pool that has shut down")]
    ShutDown,
}

pub struct WorkerPool {
    sender: Option<Sender<Job>>,
    workers: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    pub fn new(size: usize) -> Self {
        let (sender, receiver) = unbounded::<Job>();

        let workers = (0..size)
            .map(|index| {
                let receiver = receiver.clone();
                thread::spawn(move || {
                    debug!("worker {} started", index);
                    while let Ok(job) = receiver.recv() {
                        job();
                    }
                    debug!("worker {} exiting", index);
                })
            })
            .collect();

        Self {
            sender: Some(sender),
            workers,
        }
    }

    /// Submit a job. Fails once shutdown has begun.
    pub fn execute<F>(&self, job: F) -> Result<(), PoolError>
    where
        F: FnOnce() + Send + 'static,
    {
        let sender = self.sender.as_ref().ok_or(PoolError::ShutDown)?;
        sender.send(Box::new(job)).map_err(|_| PoolError::ShutDown)
    }

    /// Close the job channel and wait up to `grace` for every worker to
    /// finish. Workers still running afterwards are left detached.
    pub fn shutdown(&mut self, grace: Duration) {
        self.sender.take();

        let deadline = Instant::now() + grace;
        while Instant::now() < deadline {
            if self.workers.iter().all(JoinHandle::is_finished) {
                break;
            }
            thread::sleep(Duration::from_millis(10));
        }

        let mut remaining = Vec::new();
        for worker in self.workers.drain(..) {
            if worker.is_finished() {
                let _ = worker.join();
            } else {
                remaining.push(worker);
            }
        }

        if !remaining.is_empty() {
            warn!(
                "{} worker(s) still running after {:?} grace period",
                remaining.len(),
                grace
            );
        }
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        self.shutdown(Duration::from_secs(2));
    }
}
