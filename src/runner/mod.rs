//! Run control: scheduled probe sequences with live progress
//!
//! This module contains the run execution machinery:
//! - `RunController` validates inputs and spawns one worker task per run
//! - the worker issues probes on a fixed `start + N * interval` grid and
//!   streams exactly one sample per tick, in sequence order, over a bounded
//!   channel
//! - `RunHandle` is the observer side: it receives events, requests
//!   cooperative cancellation, and awaits the terminal result
//!
//! A probe that runs long finishes late without shifting the schedule: the
//! delayed tick fires as soon as the probe returns and later ticks realign
//! to the original grid. Probes never overlap within a run.

pub mod batch;

pub use batch::{BatchEvent, BatchHandle, BatchRunner};

use crate::defaults;
use crate::error::{AppError, Result};
use crate::models::{RunResult, Sample, Target};
use crate::probe::{ProbeExecutor, SystemPingExecutor};
use crate::types::RunOutcome;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

/// Capacity of the event channel between a run worker and its observer
const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Timing parameters for a probe run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Total run length; `floor(duration / interval)` probes are scheduled
    pub duration: Duration,

    /// Gap between scheduled probe issue times
    pub interval: Duration,

    /// Per-probe reply timeout
    pub timeout: Duration,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            duration: defaults::DEFAULT_DURATION,
            interval: defaults::DEFAULT_INTERVAL,
            timeout: defaults::DEFAULT_TIMEOUT,
        }
    }
}

impl RunConfig {
    /// Create a run configuration
    pub fn new(duration: Duration, interval: Duration, timeout: Duration) -> Self {
        Self {
            duration,
            interval,
            timeout,
        }
    }

    /// Number of probes this configuration schedules
    pub fn total_ticks(&self) -> u64 {
        if self.interval.is_zero() {
            0
        } else {
            (self.duration.as_nanos() / self.interval.as_nanos()) as u64
        }
    }

    /// Reject zero durations before any worker is spawned
    pub fn validate(&self) -> Result<()> {
        if self.duration.is_zero() {
            return Err(AppError::validation("run duration must be positive"));
        }
        if self.interval.is_zero() {
            return Err(AppError::validation("probe interval must be positive"));
        }
        if self.timeout.is_zero() {
            return Err(AppError::validation("probe timeout must be positive"));
        }
        Ok(())
    }
}

/// Progress notifications emitted by a run worker
#[derive(Debug, Clone)]
pub enum RunEvent {
    /// One sample per tick, delivered in sequence order
    Progress {
        /// Time since the run started
        elapsed: Duration,
        sample: Sample,
    },

    /// Terminal notification carrying the finalized result, sent exactly once
    Finished(RunResult),
}

/// Delivery seam between the shared run loop and a concrete event stream
///
/// The single-run worker and the batch worker wrap different event types
/// around the same loop through this trait.
#[async_trait]
pub(crate) trait ProgressSink: Send {
    /// Deliver one sample; returns false once the observer is gone
    async fn deliver(&mut self, elapsed: Duration, sample: Sample) -> bool;
}

/// Sink adapter for single-run event streams
pub(crate) struct RunEventSink {
    pub tx: mpsc::Sender<RunEvent>,
}

#[async_trait]
impl ProgressSink for RunEventSink {
    async fn deliver(&mut self, elapsed: Duration, sample: Sample) -> bool {
        self.tx
            .send(RunEvent::Progress { elapsed, sample })
            .await
            .is_ok()
    }
}

/// Shared probe loop for single runs and batch entries
///
/// All sample mutation happens here, on the worker; the sink is the only
/// cross-boundary communication. Cancellation is checked at every tick
/// boundary and raced against the in-flight probe, whose result is
/// discarded when cancellation wins. A sink refusing delivery (observer
/// dropped) ends the run the same way.
pub(crate) async fn run_loop<S: ProgressSink>(
    executor: &dyn ProbeExecutor,
    target: &Target,
    config: &RunConfig,
    sink: &mut S,
    cancel: &mut watch::Receiver<bool>,
) -> RunResult {
    let mut result = RunResult::new(target.clone());
    let total_ticks = config.total_ticks();
    let started = Instant::now();
    let mut ticker = tokio::time::interval(config.interval);

    let mut outcome = RunOutcome::Completed;

    for sequence in 0..total_ticks {
        // honor a cancellation requested while the previous sample was in delivery
        if *cancel.borrow() {
            outcome = RunOutcome::Cancelled;
            break;
        }

        tokio::select! {
            _ = ticker.tick() => {}
            _ = cancel.changed() => {
                outcome = RunOutcome::Cancelled;
                break;
            }
        }

        // a cancel can land exactly on the tick; re-check before probing
        if *cancel.borrow() {
            outcome = RunOutcome::Cancelled;
            break;
        }

        let sample = tokio::select! {
            reply = executor.probe(&target.address, config.timeout) => match reply {
                Ok(reply) => Sample::from_reply(sequence, reply),
                Err(e) => {
                    // invocation error: terminal failure, reported once
                    result.fail(e.to_string());
                    return result;
                }
            },
            // in-flight probe abandoned, its result discarded
            _ = cancel.changed() => {
                outcome = RunOutcome::Cancelled;
                break;
            }
        };

        result.add_sample(sample.clone());
        if !sink.deliver(started.elapsed(), sample).await {
            outcome = RunOutcome::Cancelled;
            break;
        }
    }

    result.finalize(outcome);
    result
}

/// Observer handle for an in-flight run
///
/// Dropping the handle abandons the run: the worker notices the closed
/// channel at its next delivery and stops probing.
#[derive(Debug)]
pub struct RunHandle {
    events: mpsc::Receiver<RunEvent>,
    cancel: watch::Sender<bool>,
    worker: JoinHandle<()>,
}

impl RunHandle {
    /// Receive the next event; `None` after the terminal event was taken
    pub async fn next_event(&mut self) -> Option<RunEvent> {
        self.events.recv().await
    }

    /// Request cooperative cancellation, effective at the next tick boundary
    pub fn cancel(&self) {
        // worker may already be gone when the run just finished
        let _ = self.cancel.send(true);
    }

    /// Drain remaining events and return the terminal result
    pub async fn wait(self) -> Result<RunResult> {
        let mut events = self.events;
        let mut final_result = None;
        while let Some(event) = events.recv().await {
            if let RunEvent::Finished(result) = event {
                final_result = Some(result);
            }
        }

        self.worker
            .await
            .map_err(|e| AppError::channel(format!("run worker panicked: {}", e)))?;

        final_result.ok_or_else(|| AppError::channel("run worker ended without a terminal event"))
    }
}

/// Drives probe runs: validates inputs, spawns the worker, hands out handles
///
/// State machine per run: idle until `start`, running while the worker
/// probes, then exactly one of completed, cancelled or failed, reported via
/// the terminal event.
pub struct RunController {
    executor: Arc<dyn ProbeExecutor>,
}

impl RunController {
    /// Create a controller around a probe executor
    pub fn new(executor: Arc<dyn ProbeExecutor>) -> Self {
        Self { executor }
    }

    /// Create a controller backed by the system ping command
    pub fn with_system_executor() -> Self {
        Self::new(Arc::new(SystemPingExecutor::new()))
    }

    /// Start a run against one target
    ///
    /// Invalid input (empty address, zero durations) is rejected here,
    /// synchronously, before any worker task exists.
    pub fn start(&self, target: Target, config: RunConfig) -> Result<RunHandle> {
        target.validate()?;
        config.validate()?;

        let (event_tx, event_rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        let (cancel_tx, mut cancel_rx) = watch::channel(false);
        let executor = Arc::clone(&self.executor);

        let worker = tokio::spawn(async move {
            let mut sink = RunEventSink {
                tx: event_tx.clone(),
            };
            let result = run_loop(
                executor.as_ref(),
                &target,
                &config,
                &mut sink,
                &mut cancel_rx,
            )
            .await;

            // exactly one terminal event, even when nobody listens anymore
            let _ = event_tx.send(RunEvent::Finished(result)).await;
        });

        Ok(RunHandle {
            events: event_rx,
            cancel: cancel_tx,
            worker,
        })
    }
}
