//! Run and batch result data models

use crate::models::Target;
use crate::types::{LatencyLevel, RunOutcome};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// The structured result of a single probe
///
/// Samples are immutable once produced; a failed probe is a normal sample
/// with `succeeded = false`, never an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sample {
    /// Position within the run, starting at 0 and strictly increasing
    pub sequence: u64,

    /// Round-trip time, absent when no reply arrived
    pub latency: Option<Duration>,

    /// Whether the probe received a reply
    pub succeeded: bool,

    /// When the sample was produced
    pub timestamp: DateTime<Utc>,
}

impl Sample {
    /// Create a successful sample with a measured round-trip time
    pub fn success(sequence: u64, latency: Duration) -> Self {
        Self {
            sequence,
            latency: Some(latency),
            succeeded: true,
            timestamp: Utc::now(),
        }
    }

    /// Create a failed sample (timeout, unreachable, unparseable reply)
    pub fn failure(sequence: u64) -> Self {
        Self {
            sequence,
            latency: None,
            succeeded: false,
            timestamp: Utc::now(),
        }
    }

    /// Build a sample from a probe reply
    pub fn from_reply(sequence: u64, reply: Option<Duration>) -> Self {
        match reply {
            Some(latency) => Self::success(sequence, latency),
            None => Self::failure(sequence),
        }
    }

    /// Round-trip time in milliseconds
    pub fn latency_ms(&self) -> Option<f64> {
        self.latency.map(|d| d.as_secs_f64() * 1000.0)
    }

    /// Latency classification for display
    pub fn latency_level(&self) -> Option<LatencyLevel> {
        self.latency_ms().map(LatencyLevel::from_latency_ms)
    }
}

/// Aggregate statistics over the successful samples of a run
///
/// Values are in milliseconds. `std_dev_ms` is the population standard
/// deviation (divide by N) of exactly the observed latencies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    /// Average round-trip time
    pub mean_ms: f64,

    /// Fastest round-trip time
    pub min_ms: f64,

    /// Slowest round-trip time
    pub max_ms: f64,

    /// Population standard deviation of the round-trip times
    pub std_dev_ms: f64,

    /// Number of successful samples included
    pub sample_count: usize,
}

impl Statistics {
    /// Latency classification based on the mean round-trip time
    pub fn latency_level(&self) -> LatencyLevel {
        LatencyLevel::from_latency_ms(self.mean_ms)
    }

    /// Format the mean for display
    pub fn format_mean(&self) -> String {
        format!("{:.1} ms", self.mean_ms)
    }
}

/// Results from probing a single target for one bounded run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunResult {
    /// The target that was probed
    pub target: Target,

    /// Individual samples in emission order (one per tick)
    pub samples: Vec<Sample>,

    /// Statistics over successful samples, absent when none succeeded
    pub statistics: Option<Statistics>,

    /// Terminal state, absent while the run is still in progress
    pub outcome: Option<RunOutcome>,

    /// Invocation error detail when the run ended in `RunOutcome::Failed`
    pub error: Option<String>,

    /// Number of successful probes
    pub success_count: u32,

    /// Total number of probes attempted
    pub total_count: u32,

    /// When the run started
    pub started_at: DateTime<Utc>,

    /// When the run reached a terminal state
    pub completed_at: Option<DateTime<Utc>>,
}

impl RunResult {
    /// Create an empty result for a run that is about to start
    pub fn new(target: Target) -> Self {
        Self {
            target,
            samples: Vec::new(),
            statistics: None,
            outcome: None,
            error: None,
            success_count: 0,
            total_count: 0,
            started_at: Utc::now(),
            completed_at: None,
        }
    }

    /// Append a sample to this run
    pub fn add_sample(&mut self, sample: Sample) {
        if sample.succeeded {
            self.success_count += 1;
        }
        self.total_count += 1;
        self.samples.push(sample);
    }

    /// Finalize the run: compute statistics and stamp the terminal state
    pub fn finalize(&mut self, outcome: RunOutcome) {
        self.statistics = crate::stats::reduce(&self.samples);
        self.outcome = Some(outcome);
        self.completed_at = Some(Utc::now());
    }

    /// Finalize the run as failed with an invocation error
    pub fn fail<S: Into<String>>(&mut self, reason: S) {
        self.error = Some(reason.into());
        self.finalize(RunOutcome::Failed);
    }

    /// Get success rate as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.total_count == 0 {
            0.0
        } else {
            (self.success_count as f64 / self.total_count as f64) * 100.0
        }
    }

    /// Whether any probe in this run received a reply
    pub fn has_successes(&self) -> bool {
        self.success_count > 0
    }

    /// Whether the run reached its natural end
    pub fn is_completed(&self) -> bool {
        matches!(self.outcome, Some(RunOutcome::Completed))
    }

    /// Whether the run was cut short by a cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self.outcome, Some(RunOutcome::Cancelled))
    }

    /// Whether the run ended in an invocation error
    pub fn is_failed(&self) -> bool {
        matches!(self.outcome, Some(RunOutcome::Failed))
    }
}

/// Ordered results of a sequential batch, one entry per started target
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchResult {
    /// Per-target results in submission order
    pub runs: Vec<RunResult>,

    /// When the batch started
    pub started_at: DateTime<Utc>,

    /// When the batch finished or was cancelled
    pub completed_at: Option<DateTime<Utc>>,

    /// Whether the batch was cut short by cancellation
    pub cancelled: bool,
}

impl BatchResult {
    /// Create an empty batch result
    pub fn new() -> Self {
        Self {
            runs: Vec::new(),
            started_at: Utc::now(),
            completed_at: None,
            cancelled: false,
        }
    }

    /// Append the result of a finished run
    pub fn add_run(&mut self, run: RunResult) {
        self.runs.push(run);
    }

    /// Stamp the batch as finished
    pub fn finalize(&mut self, cancelled: bool) {
        self.cancelled = cancelled;
        self.completed_at = Some(Utc::now());
    }

    /// Number of runs that actually started
    pub fn len(&self) -> usize {
        self.runs.len()
    }

    /// Whether no run started at all
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// The run with the lowest mean latency, if any run has statistics
    pub fn best_run(&self) -> Option<&RunResult> {
        self.runs
            .iter()
            .filter(|r| r.statistics.is_some())
            .min_by(|a, b| {
                let a_mean = a.statistics.as_ref().map(|s| s.mean_ms).unwrap_or(f64::MAX);
                let b_mean = b.statistics.as_ref().map(|s| s.mean_ms).unwrap_or(f64::MAX);
                a_mean.partial_cmp(&b_mean).unwrap_or(std::cmp::Ordering::Equal)
            })
    }

    /// How many runs produced at least one successful probe
    pub fn runs_with_successes(&self) -> usize {
        self.runs.iter().filter(|r| r.has_successes()).count()
    }
}

impl Default for BatchResult {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_success() {
        let sample = Sample::success(0, Duration::from_millis(23));
        assert_eq!(sample.sequence, 0);
        assert!(sample.succeeded);
        assert_eq!(sample.latency, Some(Duration::from_millis(23)));
        assert_eq!(sample.latency_ms(), Some(23.0));
        assert_eq!(sample.latency_level(), Some(LatencyLevel::Excellent));
    }

    #[test]
    fn test_sample_failure() {
        let sample = Sample::failure(4);
        assert_eq!(sample.sequence, 4);
        assert!(!sample.succeeded);
        assert!(sample.latency.is_none());
        assert!(sample.latency_ms().is_none());
        assert!(sample.latency_level().is_none());
    }

    #[test]
    fn test_sample_from_reply() {
        let hit = Sample::from_reply(1, Some(Duration::from_millis(15)));
        assert!(hit.succeeded);
        let miss = Sample::from_reply(2, None);
        assert!(!miss.succeeded);
        assert_eq!(miss.sequence, 2);
    }

    #[test]
    fn test_run_result_accumulation() {
        let mut result = RunResult::new(Target::new("A", "8.8.8.8"));
        assert!(result.outcome.is_none());

        result.add_sample(Sample::success(0, Duration::from_millis(10)));
        result.add_sample(Sample::failure(1));
        result.add_sample(Sample::success(2, Duration::from_millis(30)));

        assert_eq!(result.success_count, 2);
        assert_eq!(result.total_count, 3);
        assert!((result.success_rate() - 66.666).abs() < 0.01);
        assert!(result.has_successes());
    }

    #[test]
    fn test_run_result_finalize_computes_statistics() {
        let mut result = RunResult::new(Target::new("A", "8.8.8.8"));
        result.add_sample(Sample::success(0, Duration::from_millis(10)));
        result.add_sample(Sample::success(1, Duration::from_millis(20)));
        result.add_sample(Sample::success(2, Duration::from_millis(30)));
        result.finalize(RunOutcome::Completed);

        assert!(result.is_completed());
        assert!(result.completed_at.is_some());

        let stats = result.statistics.as_ref().unwrap();
        assert_eq!(stats.mean_ms, 20.0);
        assert_eq!(stats.min_ms, 10.0);
        assert_eq!(stats.max_ms, 30.0);
        // population standard deviation: sqrt(200/3)
        assert!((stats.std_dev_ms - 8.16496580927726).abs() < 1e-9);
        assert_eq!(stats.sample_count, 3);
    }

    #[test]
    fn test_run_result_all_failed_has_no_statistics() {
        let mut result = RunResult::new(Target::new("down", "192.0.2.1"));
        result.add_sample(Sample::failure(0));
        result.add_sample(Sample::failure(1));
        result.finalize(RunOutcome::Completed);

        assert!(result.statistics.is_none());
        assert!(!result.has_successes());
        assert_eq!(result.success_rate(), 0.0);
    }

    #[test]
    fn test_run_result_fail() {
        let mut result = RunResult::new(Target::new("A", "8.8.8.8"));
        result.fail("ping: command not found");

        assert!(result.is_failed());
        assert_eq!(result.error.as_deref(), Some("ping: command not found"));
        assert!(result.statistics.is_none());
    }

    #[test]
    fn test_batch_result_best_run() {
        let mut batch = BatchResult::new();

        let mut slow = RunResult::new(Target::new("slow", "192.0.2.1"));
        slow.add_sample(Sample::success(0, Duration::from_millis(80)));
        slow.finalize(RunOutcome::Completed);

        let mut fast = RunResult::new(Target::new("fast", "8.8.8.8"));
        fast.add_sample(Sample::success(0, Duration::from_millis(12)));
        fast.finalize(RunOutcome::Completed);

        let mut dead = RunResult::new(Target::new("dead", "198.51.100.9"));
        dead.add_sample(Sample::failure(0));
        dead.finalize(RunOutcome::Completed);

        batch.add_run(slow);
        batch.add_run(fast);
        batch.add_run(dead);
        batch.finalize(false);

        assert_eq!(batch.len(), 3);
        assert_eq!(batch.runs_with_successes(), 2);
        assert_eq!(batch.best_run().unwrap().target.name, "fast");
        assert!(batch.completed_at.is_some());
        assert!(!batch.cancelled);
    }

    #[test]
    fn test_batch_result_empty() {
        let batch = BatchResult::new();
        assert!(batch.is_empty());
        assert!(batch.best_run().is_none());
        assert_eq!(batch.runs_with_successes(), 0);
    }
}
