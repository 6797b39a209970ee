//! Statistics reduction for probe samples

use crate::models::{Sample, Statistics};

/// Reduce a sample sequence to aggregate statistics
///
/// Pure and idempotent: callable mid-run on a partial sample set or after
/// completion, and recomputing over the same samples always yields the same
/// result. Only successful samples contribute; returns `None` when none
/// succeeded. With exactly one successful sample, mean/min/max equal that
/// latency and the standard deviation is zero.
pub fn reduce(samples: &[Sample]) -> Option<Statistics> {
    let latencies: Vec<f64> = samples
        .iter()
        .filter(|s| s.succeeded)
        .filter_map(|s| s.latency_ms())
        .collect();

    let count = latencies.len();
    if count == 0 {
        return None;
    }

    let mean = latencies.iter().sum::<f64>() / count as f64;
    let min = latencies.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = latencies.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

    // Population variance: divide by count, not count - 1
    let variance = if count > 1 {
        let sum_squared_diff: f64 = latencies.iter().map(|&x| (x - mean).powi(2)).sum();
        sum_squared_diff / count as f64
    } else {
        0.0
    };

    Some(Statistics {
        mean_ms: mean,
        min_ms: min,
        max_ms: max,
        std_dev_ms: variance.sqrt(),
        sample_count: count,
    })
}

/// Rolling statistics over streamed samples
///
/// Feeds the live progress display while a run is underway. Terminal
/// statistics always come from [`reduce`] over the full sample sequence, so
/// they stay exactly recomputable from `RunResult.samples`.
#[derive(Debug, Clone)]
pub struct RollingStats {
    /// Sum of observed latencies in milliseconds
    pub sum: f64,

    /// Number of successful samples seen
    pub count: usize,

    /// Number of failed samples seen
    pub failures: usize,

    /// Min and max latencies seen so far
    pub min_value: f64,
    pub max_value: f64,

    /// Sum of squared latencies for variance calculation
    pub sum_squared: f64,
}

impl RollingStats {
    /// Create a new rolling statistics tracker
    pub fn new() -> Self {
        Self {
            sum: 0.0,
            count: 0,
            failures: 0,
            min_value: f64::INFINITY,
            max_value: f64::NEG_INFINITY,
            sum_squared: 0.0,
        }
    }

    /// Fold one sample into the tracker
    pub fn observe(&mut self, sample: &Sample) {
        match sample.latency_ms() {
            Some(ms) => self.add_value(ms),
            None => self.failures += 1,
        }
    }

    /// Add a raw latency value in milliseconds
    pub fn add_value(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;

        if value < self.min_value {
            self.min_value = value;
        }
        if value > self.max_value {
            self.max_value = value;
        }

        self.sum_squared += value * value;
    }

    /// Current average latency
    pub fn average(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum / self.count as f64
        }
    }

    /// Fastest latency seen, if any probe succeeded
    pub fn min(&self) -> Option<f64> {
        (self.count > 0).then_some(self.min_value)
    }

    /// Slowest latency seen, if any probe succeeded
    pub fn max(&self) -> Option<f64> {
        (self.count > 0).then_some(self.max_value)
    }

    /// Current population variance
    pub fn variance(&self) -> f64 {
        if self.count <= 1 {
            return 0.0;
        }

        let avg = self.average();
        let count_f64 = self.count as f64;

        (self.sum_squared / count_f64) - (avg * avg)
    }

    /// Current population standard deviation
    pub fn std_dev(&self) -> f64 {
        self.variance().max(0.0).sqrt()
    }

    /// Total number of samples observed, successful or not
    pub fn total_seen(&self) -> usize {
        self.count + self.failures
    }
}

impl Default for RollingStats {
    fn default() -> Self {
        Self::new()
    }
}
