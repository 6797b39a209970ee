//! Type definitions and aliases

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use crate::error::{AppError, Result};

/// Terminal state of a probe run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunOutcome {
    /// The run issued every scheduled probe and finished on its own
    Completed,
    /// The run was cancelled before its final scheduled probe
    Cancelled,
    /// The run ended because a probe could not be invoked at all
    Failed,
}

impl RunOutcome {
    /// Whether the run reached its natural end
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }

    /// Whether the run was stopped by the caller
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Whether the run ended in an invocation error
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed)
    }

    /// Short label for display and logging
    pub fn label(&self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::Failed => "failed",
        }
    }
}

/// Latency classification for a round-trip time
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LatencyLevel {
    /// Under 50ms
    Excellent,
    /// 50-100ms
    Good,
    /// 100-200ms
    Fair,
    /// Over 200ms
    Poor,
}

impl LatencyLevel {
    /// Classify a round-trip time given in milliseconds
    pub fn from_latency_ms(latency_ms: f64) -> Self {
        if latency_ms < 50.0 {
            Self::Excellent
        } else if latency_ms < 100.0 {
            Self::Good
        } else if latency_ms < 200.0 {
            Self::Fair
        } else {
            Self::Poor
        }
    }

    /// Short label for display
    pub fn label(&self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Fair => "fair",
            Self::Poor => "poor",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_outcome_predicates() {
        assert!(RunOutcome::Completed.is_completed());
        assert!(!RunOutcome::Completed.is_cancelled());
        assert!(RunOutcome::Cancelled.is_cancelled());
        assert!(RunOutcome::Failed.is_failed());
        assert_eq!(RunOutcome::Completed.label(), "completed");
        assert_eq!(RunOutcome::Cancelled.label(), "cancelled");
        assert_eq!(RunOutcome::Failed.label(), "failed");
    }

    #[test]
    fn test_latency_level_thresholds() {
        assert_eq!(LatencyLevel::from_latency_ms(10.0), LatencyLevel::Excellent);
        assert_eq!(LatencyLevel::from_latency_ms(49.9), LatencyLevel::Excellent);
        assert_eq!(LatencyLevel::from_latency_ms(50.0), LatencyLevel::Good);
        assert_eq!(LatencyLevel::from_latency_ms(150.0), LatencyLevel::Fair);
        assert_eq!(LatencyLevel::from_latency_ms(200.0), LatencyLevel::Poor);
        assert_eq!(LatencyLevel::from_latency_ms(999.0), LatencyLevel::Poor);
    }

    #[test]
    fn test_latency_level_labels() {
        assert_eq!(LatencyLevel::Excellent.label(), "excellent");
        assert_eq!(LatencyLevel::Poor.label(), "poor");
    }
}
