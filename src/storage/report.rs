//! Batch report export
//!
//! Reports are plain text tables written to `<base>/results/` under
//! timestamped names, one row per target with its latency statistics.

use crate::error::{AppError, Result};
use crate::models::{BatchResult, RunResult};
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};

/// Writes batch results as timestamped text reports
pub struct ReportWriter {
    /// Directory reports are written into
    results_dir: PathBuf,
}

impl ReportWriter {
    /// Create a writer rooted at the given base directory
    pub fn new(base_dir: &Path) -> Self {
        Self {
            results_dir: base_dir.join("results"),
        }
    }

    /// Directory reports are written into
    pub fn results_dir(&self) -> &Path {
        &self.results_dir
    }

    /// Write a report named after the current time
    pub fn save_batch_report(&self, batch: &BatchResult) -> Result<PathBuf> {
        let timestamp = Local::now().format("%Y-%m-%d_%H-%M-%S").to_string();
        self.save_batch_report_at(batch, &timestamp)
    }

    /// Write a report with an explicit timestamp component
    pub fn save_batch_report_at(&self, batch: &BatchResult, timestamp: &str) -> Result<PathBuf> {
        if !self.results_dir.exists() {
            fs::create_dir_all(&self.results_dir).map_err(|e| {
                AppError::storage(format!(
                    "Failed to create results directory '{}': {}",
                    self.results_dir.display(),
                    e
                ))
            })?;
        }

        let filename = format!("ping_results_{}.txt", timestamp);
        let filepath = self.results_dir.join(filename);

        let content = render_batch_report(batch);
        fs::write(&filepath, content).map_err(|e| {
            AppError::storage(format!(
                "Failed to write report '{}': {}",
                filepath.display(),
                e
            ))
        })?;

        Ok(filepath)
    }
}

/// Render a batch as the report table
pub fn render_batch_report(batch: &BatchResult) -> String {
    let mut report = String::new();

    report.push_str(&format!(
        "Ping Test Results - {}\n",
        Local::now().format("%Y-%m-%d %H:%M:%S")
    ));
    report.push_str(&"=".repeat(80));
    report.push_str("\n\n");

    report.push_str(&format!(
        "{:<25} {:<12} {:<12} {:<12} {:<12}\n",
        "Server", "Mean", "Min", "Max", "Std Dev"
    ));
    report.push_str(&"-".repeat(80));
    report.push('\n');

    for run in &batch.runs {
        report.push_str(&render_run_row(run));
        report.push('\n');
    }

    let notes: Vec<String> = batch.runs.iter().filter_map(run_footnote).collect();
    if !notes.is_empty() {
        report.push('\n');
        for note in notes {
            report.push_str(&note);
            report.push('\n');
        }
    }

    report
}

/// Footnote for a run that did not reach its natural end
fn run_footnote(run: &RunResult) -> Option<String> {
    if run.is_cancelled() {
        Some(format!(
            "* {}: cancelled after {} probes",
            run.target.name, run.total_count
        ))
    } else if run.is_failed() {
        let reason = run.error.as_deref().unwrap_or("ping invocation failed");
        Some(format!("* {}: {}", run.target.name, reason))
    } else {
        None
    }
}

/// One table row; targets without a single reply show as failed
fn render_run_row(run: &RunResult) -> String {
    match &run.statistics {
        Some(stats) => format!(
            "{:<25} {:<12} {:<12} {:<12} {:<12}",
            run.target.name,
            format!("{:.2} ms", stats.mean_ms),
            format!("{:.2} ms", stats.min_ms),
            format!("{:.2} ms", stats.max_ms),
            format!("{:.2} ms", stats.std_dev_ms),
        ),
        None => format!(
            "{:<25} {:<12} {:<12} {:<12} {:<12}",
            run.target.name, "Failed", "--", "--", "--"
        ),
    }
}
