//! Sequential multi-target batches
//!
//! A batch runs its targets strictly one after another on a single worker
//! task, reusing the per-run probe loop. One target failing or losing every
//! probe does not touch the others; cancellation keeps the current run's
//! partial result and discards the targets that never started.

use super::{run_loop, ProgressSink, RunConfig, EVENT_CHANNEL_CAPACITY};
use crate::error::{AppError, Result};
use crate::models::{BatchResult, RunResult, Sample, Target};
use crate::probe::{ProbeExecutor, SystemPingExecutor};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

/// Progress notifications emitted by a batch worker
#[derive(Debug, Clone)]
pub enum BatchEvent {
    /// The run for `target` is about to begin
    RunStarted {
        index: usize,
        total: usize,
        target: Target,
    },

    /// Sample from the currently running target
    Progress {
        index: usize,
        elapsed: Duration,
        sample: Sample,
    },

    /// The run at `index` reached its terminal state
    RunFinished { index: usize, result: RunResult },

    /// Terminal notification for the whole batch, sent exactly once
    Finished(BatchResult),
}

/// Sink adapter tagging each sample with its batch position
struct BatchSink {
    tx: mpsc::Sender<BatchEvent>,
    index: usize,
}

#[async_trait]
impl ProgressSink for BatchSink {
    async fn deliver(&mut self, elapsed: Duration, sample: Sample) -> bool {
        self.tx
            .send(BatchEvent::Progress {
                index: self.index,
                elapsed,
                sample,
            })
            .await
            .is_ok()
    }
}

/// Observer handle for an in-flight batch
#[derive(Debug)]
pub struct BatchHandle {
    events: mpsc::Receiver<BatchEvent>,
    cancel: watch::Sender<bool>,
    worker: JoinHandle<()>,
}

impl BatchHandle {
    /// Receive the next event; `None` after the terminal event was taken
    pub async fn next_event(&mut self) -> Option<BatchEvent> {
        self.events.recv().await
    }

    /// Request cooperative cancellation
    ///
    /// The current run stops at its next tick boundary and keeps what it
    /// collected; targets that have not started are dropped from the batch.
    pub fn cancel(&self) {
        let _ = self.cancel.send(true);
    }

    /// Drain remaining events and return the terminal batch result
    pub async fn wait(self) -> Result<BatchResult> {
        let mut events = self.events;
        let mut final_result = None;
        while let Some(event) = events.recv().await {
            if let BatchEvent::Finished(result) = event {
                final_result = Some(result);
            }
        }

        self.worker
            .await
            .map_err(|e| AppError::channel(format!("batch worker panicked: {}", e)))?;

        final_result.ok_or_else(|| AppError::channel("batch worker ended without a terminal event"))
    }
}

/// Runs every target in a list sequentially with one shared configuration
pub struct BatchRunner {
    executor: Arc<dyn ProbeExecutor>,
}

impl BatchRunner {
    /// Create a batch runner around a probe executor
    pub fn new(executor: Arc<dyn ProbeExecutor>) -> Self {
        Self { executor }
    }

    /// Create a batch runner backed by the system ping command
    pub fn with_system_executor() -> Self {
        Self::new(Arc::new(SystemPingExecutor::new()))
    }

    /// Start a batch over the given targets
    ///
    /// The whole input is validated here, before the worker exists: an
    /// empty list or any malformed target rejects the batch as a unit.
    pub fn start(&self, targets: Vec<Target>, config: RunConfig) -> Result<BatchHandle> {
        if targets.is_empty() {
            return Err(AppError::validation("batch requires at least one target"));
        }
        for target in &targets {
            target.validate()?;
        }
        config.validate()?;

        let (event_tx, event_rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        let (cancel_tx, mut cancel_rx) = watch::channel(false);
        let executor = Arc::clone(&self.executor);

        let worker = tokio::spawn(async move {
            let total = targets.len();
            let mut batch = BatchResult::new();
            let mut cancelled = false;

            for (index, target) in targets.into_iter().enumerate() {
                if *cancel_rx.borrow() {
                    cancelled = true;
                    break;
                }

                if event_tx
                    .send(BatchEvent::RunStarted {
                        index,
                        total,
                        target: target.clone(),
                    })
                    .await
                    .is_err()
                {
                    cancelled = true;
                    break;
                }

                let mut sink = BatchSink {
                    tx: event_tx.clone(),
                    index,
                };
                let result = run_loop(
                    executor.as_ref(),
                    &target,
                    &config,
                    &mut sink,
                    &mut cancel_rx,
                )
                .await;

                let stop_here = result.is_cancelled();
                let _ = event_tx
                    .send(BatchEvent::RunFinished {
                        index,
                        result: result.clone(),
                    })
                    .await;
                batch.add_run(result);

                if stop_here {
                    cancelled = true;
                    break;
                }
                // a failed run is recorded and the batch moves on
            }

            batch.finalize(cancelled);
            let _ = event_tx.send(BatchEvent::Finished(batch)).await;
        });

        Ok(BatchHandle {
            events: event_rx,
            cancel: cancel_tx,
            worker,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{ScriptedExecutor, ScriptedReply};
    use super::*;

    fn runner(executor: ScriptedExecutor) -> BatchRunner {
        BatchRunner::new(Arc::new(executor))
    }

    fn config(ticks: u64) -> RunConfig {
        RunConfig::new(
            Duration::from_millis(5 * ticks),
            Duration::from_millis(5),
            Duration::from_millis(100),
        )
    }

    fn targets(addresses: &[&str]) -> Vec<Target> {
        addresses.iter().map(|a| Target::from_address(*a)).collect()
    }

    #[tokio::test]
    async fn test_start_rejects_bad_input_before_spawning() {
        let runner = runner(ScriptedExecutor::always(ScriptedReply::Reply(10)));

        assert!(runner.start(Vec::new(), config(1)).is_err());

        let with_bad_entry = vec![Target::from_address("8.8.8.8"), Target::new("bad", "")];
        assert!(runner.start(with_bad_entry, config(1)).is_err());

        let zero_duration = RunConfig::new(
            Duration::ZERO,
            Duration::from_secs(1),
            Duration::from_secs(1),
        );
        assert!(runner
            .start(targets(&["8.8.8.8"]), zero_duration)
            .is_err());
    }

    #[tokio::test]
    async fn test_failing_target_does_not_disturb_the_next() {
        // first target misses its only probe, second answers in 15ms
        let executor = ScriptedExecutor::from_script([
            ScriptedReply::Miss,
            ScriptedReply::Reply(15),
        ]);
        let runner = runner(executor);
        let handle = runner
            .start(targets(&["192.0.2.1", "8.8.8.8"]), config(1))
            .unwrap();

        let batch = handle.wait().await.unwrap();
        assert_eq!(batch.len(), 2);
        assert!(!batch.cancelled);

        let first = &batch.runs[0];
        assert_eq!(first.target.address, "192.0.2.1");
        assert!(first.is_completed());
        assert!(first.statistics.is_none());

        let second = &batch.runs[1];
        assert_eq!(second.target.address, "8.8.8.8");
        let stats = second.statistics.as_ref().unwrap();
        assert_eq!(stats.mean_ms, 15.0);
        assert_eq!(stats.min_ms, 15.0);
        assert_eq!(stats.max_ms, 15.0);
        assert_eq!(stats.std_dev_ms, 0.0);
    }

    #[tokio::test]
    async fn test_invocation_error_is_contained_to_its_run() {
        let executor = ScriptedExecutor::from_script([
            ScriptedReply::Fault("ping: command not found"),
            ScriptedReply::Reply(20),
        ]);
        let runner = runner(executor);
        let handle = runner
            .start(targets(&["192.0.2.1", "8.8.8.8"]), config(1))
            .unwrap();

        let batch = handle.wait().await.unwrap();
        assert_eq!(batch.len(), 2);
        assert!(batch.runs[0].is_failed());
        assert!(batch.runs[1].is_completed());
        assert_eq!(batch.runs[1].statistics.as_ref().unwrap().mean_ms, 20.0);
    }

    #[tokio::test]
    async fn test_runs_are_strictly_sequential() {
        let runner = runner(ScriptedExecutor::always(ScriptedReply::Reply(10)));
        let mut handle = runner
            .start(targets(&["10.0.0.1", "10.0.0.2", "10.0.0.3"]), config(2))
            .unwrap();

        // every event for run K must arrive before any event for run K+1
        let mut current = 0usize;
        let mut started = Vec::new();
        while let Some(event) = handle.next_event().await {
            match event {
                BatchEvent::RunStarted { index, total, .. } => {
                    assert_eq!(total, 3);
                    assert_eq!(index, started.len());
                    started.push(index);
                    current = index;
                }
                BatchEvent::Progress { index, .. } => assert_eq!(index, current),
                BatchEvent::RunFinished { index, result } => {
                    assert_eq!(index, current);
                    assert_eq!(result.samples.len(), 2);
                }
                BatchEvent::Finished(batch) => {
                    assert_eq!(batch.len(), 3);
                    assert_eq!(batch.runs_with_successes(), 3);
                }
            }
        }
        assert_eq!(started, vec![0, 1, 2]);
    }

    #[tokio::test]
    async fn test_cancel_keeps_partial_run_and_drops_unstarted() {
        // target 1 completes all three probes; target 2 answers once and
        // then hangs long enough for the cancellation to win the race
        let executor = ScriptedExecutor::from_script([
            ScriptedReply::Reply(10),
            ScriptedReply::Reply(10),
            ScriptedReply::Reply(10),
            ScriptedReply::Reply(12),
            ScriptedReply::Slow(Duration::from_millis(500)),
        ]);
        let runner = runner(executor);
        let mut handle = runner
            .start(targets(&["10.0.0.1", "10.0.0.2", "10.0.0.3"]), config(3))
            .unwrap();

        // cancel once the second target has reported its first sample
        while let Some(event) = handle.next_event().await {
            match event {
                BatchEvent::Progress { index: 1, .. } => {
                    handle.cancel();
                    break;
                }
                BatchEvent::Finished(_) => panic!("batch finished before cancellation"),
                _ => {}
            }
        }

        let batch = handle.wait().await.unwrap();
        assert!(batch.cancelled);
        assert_eq!(batch.len(), 2, "third target must never start");

        let first = &batch.runs[0];
        assert!(first.is_completed());
        assert_eq!(first.samples.len(), 3);

        let second = &batch.runs[1];
        assert!(second.is_cancelled());
        assert_eq!(second.target.address, "10.0.0.2");
        assert_eq!(second.samples.len(), 1, "in-flight probe is discarded");
        assert_eq!(second.statistics.as_ref().unwrap().mean_ms, 12.0);
    }
}
