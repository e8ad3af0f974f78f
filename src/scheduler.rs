//! Fixed-cadence frame scheduler
//!
//! Each run gets one worker thread that owns its [`SimulationEngine`]. The
//! worker sleeps one period, steps the engine, and hands an immutable
//! snapshot to the observer. Nothing else touches the engine, so observers
//! only ever see completed steps.
//!
//! Teardown is a single bounded wait: the stop signal wakes the worker
//! immediately, and the caller waits up to `teardown_timeout` for the worker
//! to drop its end of the `done` channel before joining it.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::SimError;
use crate::settings::SimSettings;
use crate::sim::{Outcome, Position, RunRequest, SimulationEngine, StepResult};

/// Projectile position after a completed step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    /// 1-based tick counter
    pub tick: u64,
    pub position: Position,
}

/// Messages published to the consumer of a run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RunEvent {
    Frame(FrameSnapshot),
    /// Sent exactly once, as the last event of a run that was not stopped
    Finished(Outcome),
}

/// Receives per-tick snapshots and the terminal outcome
///
/// Called on the scheduler thread. Implementations should return quickly;
/// a slow observer delays the next tick.
pub trait RunObserver: Send + 'static {
    fn on_frame(&mut self, frame: FrameSnapshot);
    fn on_finished(&mut self, outcome: Outcome);
}

impl RunObserver for Sender<RunEvent> {
    fn on_frame(&mut self, frame: FrameSnapshot) {
        if self.send(RunEvent::Frame(frame)).is_err() {
            log::trace!("Frame {} dropped, receiver gone", frame.tick);
        }
    }

    fn on_finished(&mut self, outcome: Outcome) {
        if self.send(RunEvent::Finished(outcome)).is_err() {
            log::warn!("Run finished but nobody is listening for the outcome");
        }
    }
}

type WorkerResult = Result<Option<Outcome>, SimError>;

/// Drives one run on a dedicated thread
#[derive(Debug)]
pub struct FrameScheduler {
    stop_tx: Option<Sender<()>>,
    cancelled: Arc<AtomicBool>,
    done_rx: Receiver<()>,
    worker: Option<JoinHandle<WorkerResult>>,
    teardown_timeout: Duration,
}

/// Handle returned by [`start_run`]
pub type RunHandle = FrameScheduler;

impl FrameScheduler {
    /// Spawn the worker thread for an already validated engine
    pub fn spawn<O: RunObserver>(
        engine: SimulationEngine,
        settings: &SimSettings,
        observer: O,
    ) -> Result<Self, SimError> {
        let (stop_tx, stop_rx) = mpsc::channel();
        let (done_tx, done_rx) = mpsc::channel::<()>();
        let cancelled = Arc::new(AtomicBool::new(false));
        let period = settings.tick_period();

        let worker = {
            let cancelled = Arc::clone(&cancelled);
            thread::Builder::new()
                .name("rocket-range-sim".into())
                .spawn(move || {
                    // Dropped when the worker exits, even by unwinding
                    let _done = done_tx;
                    tick_loop(engine, period, stop_rx, &cancelled, observer)
                })
                .map_err(SimError::Spawn)?
        };

        Ok(Self {
            stop_tx: Some(stop_tx),
            cancelled,
            done_rx,
            worker: Some(worker),
            teardown_timeout: settings.teardown_timeout(),
        })
    }

    /// Whether the worker thread has exited
    pub fn is_finished(&self) -> bool {
        self.worker.as_ref().is_none_or(|w| w.is_finished())
    }

    /// Cancel the run and wait for the worker to quiesce
    ///
    /// Once this returns `Ok`, the worker has exited and will publish nothing
    /// further.
    pub fn stop(mut self) -> Result<(), SimError> {
        self.shutdown().map(|_| ())
    }

    /// Block until the run ends on its own and return its outcome
    pub fn wait(mut self) -> Result<Outcome, SimError> {
        let Some(worker) = self.worker.take() else {
            return Err(SimError::Cancelled);
        };
        worker
            .join()
            .map_err(|_| SimError::WorkerPanicked)??
            .ok_or(SimError::Cancelled)
    }

    fn shutdown(&mut self) -> WorkerResult {
        let Some(worker) = self.worker.take() else {
            return Ok(None);
        };

        self.cancelled.store(true, Ordering::Release);
        if let Some(stop_tx) = self.stop_tx.take() {
            // Err means the worker already exited
            let _ = stop_tx.send(());
        }

        match self.done_rx.recv_timeout(self.teardown_timeout) {
            Ok(()) | Err(RecvTimeoutError::Disconnected) => {}
            Err(RecvTimeoutError::Timeout) => {
                log::error!(
                    "Scheduler thread still busy after {:?}, detaching it",
                    self.teardown_timeout
                );
                return Err(SimError::SchedulerTeardownTimeout {
                    waited: self.teardown_timeout,
                });
            }
        }

        let result = worker.join().map_err(|_| SimError::WorkerPanicked)?;
        log::debug!("Scheduler stopped");
        result
    }
}

impl Drop for FrameScheduler {
    fn drop(&mut self) {
        if self.worker.is_none() {
            return;
        }
        if let Err(e) = self.shutdown() {
            log::warn!("Run teardown on drop failed: {e}");
        }
    }
}

fn tick_loop<O: RunObserver>(
    mut engine: SimulationEngine,
    period: Duration,
    stop_rx: Receiver<()>,
    cancelled: &AtomicBool,
    mut observer: O,
) -> WorkerResult {
    let mut tick = 0u64;
    loop {
        match stop_rx.recv_timeout(period) {
            Ok(()) | Err(RecvTimeoutError::Disconnected) => {
                log::debug!("Run stopped at tick {tick}");
                return Ok(None);
            }
            Err(RecvTimeoutError::Timeout) => {}
        }

        tick += 1;
        match engine.step() {
            Ok(StepResult::Advanced(position)) => {
                log::trace!("tick {tick}: ({:.2}, {:.2})", position.x, position.y);
                observer.on_frame(FrameSnapshot { tick, position });
            }
            Ok(StepResult::Terminated(outcome)) => {
                if cancelled.load(Ordering::Acquire) {
                    return Ok(None);
                }
                log::info!(
                    "Run finished at tick {tick}: {} at ({:.1}, {:.1})",
                    if outcome.hit { "hit" } else { "miss" },
                    outcome.x,
                    outcome.y
                );
                observer.on_finished(outcome);
                return Ok(Some(outcome));
            }
            Ok(StepResult::Idle) => return Ok(engine.outcome()),
            Err(e) => {
                log::error!("Simulation step failed at tick {tick}: {e}");
                return Err(e);
            }
        }
    }
}

/// Validate a request and start simulating it in real time
///
/// Validation errors are returned synchronously and no thread is started.
pub fn start_run<O: RunObserver>(
    request: &RunRequest,
    settings: &SimSettings,
    observer: O,
) -> Result<RunHandle, SimError> {
    let engine = SimulationEngine::new(request, settings.delta_x)?;
    log::info!(
        "Launching at {} degrees, velocity {} toward ({}, {})",
        request.angle_degrees,
        request.velocity,
        request.target.pos.x,
        request.target.pos.y
    );
    FrameScheduler::spawn(engine, settings, observer)
}

/// Cancel a run and wait for its thread to stop
pub fn stop_run(handle: RunHandle) -> Result<(), SimError> {
    handle.stop()
}
