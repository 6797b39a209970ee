//! Output formatting and display system
//!
//! This module provides a flexible output formatting system for run and
//! batch results, supporting both colored and plain text output with
//! table formatting.

mod colored;
mod formatter;

pub use colored::{ColorScheme, ColoredFormatter};
pub use formatter::{
    Alignment, Column, FormattingOptions, OutputFormatter, PlainFormatter, RowData, TableFormat,
};

use crate::{
    error::Result,
    models::{BatchResult, RunResult, Sample, Target},
    runner::RunConfig,
    stats::RollingStats,
};

/// Output formatting factory for creating appropriate formatters
pub struct OutputFormatterFactory;

impl OutputFormatterFactory {
    /// Create a formatter based on color support and preferences
    pub fn create_formatter(enable_color: bool, verbose: bool) -> Box<dyn OutputFormatter> {
        let options = FormattingOptions {
            enable_color,
            verbose_mode: verbose,
            show_individual_results: verbose,
            table_borders: true,
            max_width: 120,
            compact_mode: !verbose,
        };

        if enable_color {
            Box::new(ColoredFormatter::new(options))
        } else {
            Box::new(PlainFormatter::new(options))
        }
    }

    /// Create a console-optimized formatter
    pub fn create_console_formatter() -> Box<dyn OutputFormatter> {
        Self::create_formatter(true, false)
    }

    /// Create a plain text formatter for scripts and logs
    pub fn create_plain_formatter() -> Box<dyn OutputFormatter> {
        Self::create_formatter(false, false)
    }
}

/// Main output coordinator that assembles the displayed sections
pub struct OutputCoordinator {
    formatter: Box<dyn OutputFormatter>,
}

impl OutputCoordinator {
    /// Create a new output coordinator with the given formatter
    pub fn new(formatter: Box<dyn OutputFormatter>) -> Self {
        Self { formatter }
    }

    /// Banner shown before a single run starts
    pub fn display_run_banner(&self, target: &Target, config: &RunConfig) -> Result<String> {
        let mut output = String::new();
        output.push_str(&self.formatter.format_header("Ping Run")?);
        output.push_str("\n\n");
        output.push_str(&self.formatter.format_run_overview(target, config)?);
        Ok(output)
    }

    /// One line per probe while a run is in flight
    pub fn display_probe(&self, sample: &Sample, rolling: &RollingStats) -> Result<String> {
        self.formatter.format_probe_line(sample, rolling)
    }

    /// Summary block once a single run has finished
    pub fn display_run_summary(&self, result: &RunResult) -> Result<String> {
        self.formatter.format_run_summary(result)
    }

    /// Announcement when a batch moves on to its next target
    pub fn display_run_started(&self, index: usize, total: usize, target: &Target) -> Result<String> {
        self.formatter.format_run_started(index, total, target)
    }

    /// One-line digest when a run inside a batch finishes
    pub fn display_run_finished(&self, result: &RunResult) -> Result<String> {
        self.formatter.format_run_line(result)
    }

    /// Full results display for a finished batch
    pub fn display_batch_results(&self, batch: &BatchResult) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.formatter.format_header("Ping Test Results")?);
        output.push_str("\n\n");
        output.push_str(&self.formatter.format_batch_table(batch)?);
        output.push_str("\n\n");
        output.push_str(&self.formatter.format_batch_summary(batch)?);

        Ok(output)
    }

    pub fn display_error(&self, error: &str) -> Result<String> {
        self.formatter.format_error(error)
    }

    pub fn display_warning(&self, warning: &str) -> Result<String> {
        self.formatter.format_warning(warning)
    }

    pub fn display_success(&self, message: &str) -> Result<String> {
        self.formatter.format_success(message)
    }
}
