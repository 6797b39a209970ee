//! Colored formatter implementation with terminal color support
//!
//! This module provides a colored output formatter that grades round-trip
//! times with ANSI colors for quick visual scanning.

use crate::{
    error::{AppError, Result},
    models::{BatchResult, RunResult, Sample, Target},
    runner::RunConfig,
    stats::RollingStats,
    types::{LatencyLevel, RunOutcome},
};
use super::formatter::{Alignment, FormattingOptions, OutputFormatter, PlainFormatter};
use colored::*;
use std::fmt::Write as _;

/// Color used to grade a round-trip time
fn latency_color(level: LatencyLevel) -> Color {
    match level {
        LatencyLevel::Excellent => Color::Green,
        LatencyLevel::Good => Color::Cyan,
        LatencyLevel::Fair => Color::Yellow,
        LatencyLevel::Poor => Color::Red,
    }
}

/// Color scheme configuration
#[derive(Debug, Clone)]
pub struct ColorScheme {
    pub header: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub info: Color,
    pub highlight: Color,
    pub muted: Color,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            header: Color::Blue,
            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
            info: Color::Cyan,
            highlight: Color::Magenta,
            muted: Color::BrightBlack,
        }
    }
}

/// Colored formatter implementation
///
/// Shares the plain formatter's layout helpers and colorizes cells after
/// padding so table alignment survives the ANSI escapes.
pub struct ColoredFormatter {
    plain: PlainFormatter,
    options: FormattingOptions,
    color_scheme: ColorScheme,
}

impl ColoredFormatter {
    /// Create a new colored formatter with options
    pub fn new(options: FormattingOptions) -> Self {
        let plain = PlainFormatter::new(options.clone());
        Self {
            plain,
            options,
            color_scheme: ColorScheme::default(),
        }
    }

    /// Create a colored formatter with a custom color scheme
    pub fn with_color_scheme(options: FormattingOptions, color_scheme: ColorScheme) -> Self {
        let plain = PlainFormatter::new(options.clone());
        Self {
            plain,
            options,
            color_scheme,
        }
    }

    /// Apply color to text if colors are enabled
    fn colorize(&self, text: &str, color: Color) -> ColoredString {
        if self.options.enable_color {
            text.color(color)
        } else {
            text.normal()
        }
    }

    /// Apply bold formatting if colors are enabled
    fn bold(&self, text: &str) -> ColoredString {
        if self.options.enable_color {
            text.bold()
        } else {
            text.normal()
        }
    }

    /// Apply dimmed formatting if colors are enabled
    fn dimmed(&self, text: &str) -> ColoredString {
        if self.options.enable_color {
            text.dimmed()
        } else {
            text.normal()
        }
    }

    /// Format a round-trip time graded by its latency level
    fn format_latency_colored(&self, latency_ms: f64) -> ColoredString {
        let formatted = self.plain.format_latency(latency_ms);
        let level = LatencyLevel::from_latency_ms(latency_ms);
        self.colorize(&formatted, latency_color(level))
    }

    /// Format a success percentage with color coding based on value
    fn format_percentage_colored(&self, percentage: f64) -> ColoredString {
        let formatted = self.plain.format_percentage(percentage);
        let color = if percentage >= 95.0 {
            self.color_scheme.success
        } else if percentage >= 80.0 {
            self.color_scheme.warning
        } else {
            self.color_scheme.error
        };
        self.colorize(&formatted, color)
    }

    /// Color for a terminal run outcome
    fn outcome_color(&self, outcome: Option<RunOutcome>) -> Color {
        match outcome {
            Some(RunOutcome::Completed) => self.color_scheme.success,
            Some(RunOutcome::Cancelled) => self.color_scheme.warning,
            Some(RunOutcome::Failed) => self.color_scheme.error,
            None => self.color_scheme.muted,
        }
    }

    /// Pad a latency cell, then grade it by its own value
    fn latency_cell(&self, latency_ms: f64, width: usize) -> String {
        let aligned =
            self.plain
                .align_text(&self.plain.format_latency(latency_ms), width, &Alignment::Right);
        self.colorize(&aligned, latency_color(LatencyLevel::from_latency_ms(latency_ms)))
            .to_string()
    }

    /// Pad a placeholder cell and dim it
    fn muted_cell(&self, text: &str, width: usize, alignment: &Alignment) -> String {
        let aligned = self.plain.align_text(text, width, alignment);
        self.colorize(&aligned, self.color_scheme.muted).to_string()
    }
}

impl OutputFormatter for ColoredFormatter {
    fn format_header(&self, title: &str) -> Result<String> {
        let mut output = String::new();
        let border = "=".repeat(title.len() + 4);

        writeln!(output, "{}", self.colorize(&border, self.color_scheme.header))
            .map_err(|e| AppError::io(format!("Failed to format header: {}", e)))?;
        writeln!(output, "  {}  ", self.bold(title))
            .map_err(|e| AppError::io(format!("Failed to format header: {}", e)))?;
        write!(output, "{}", self.colorize(&border, self.color_scheme.header))
            .map_err(|e| AppError::io(format!("Failed to format header: {}", e)))?;

        Ok(output)
    }

    fn format_run_overview(&self, target: &Target, config: &RunConfig) -> Result<String> {
        let mut output = String::new();

        writeln!(
            output,
            "{} {}",
            self.dimmed("Target:  "),
            self.colorize(&target.to_string(), self.color_scheme.info)
        )
        .map_err(|e| AppError::io(format!("Failed to format overview: {}", e)))?;
        write!(
            output,
            "{} {} probes, one every {}, timeout {}",
            self.dimmed("Schedule:"),
            config.total_ticks(),
            self.plain.format_period(config.interval),
            self.plain.format_period(config.timeout)
        )
        .map_err(|e| AppError::io(format!("Failed to format overview: {}", e)))?;

        Ok(output)
    }

    fn format_probe_line(&self, sample: &Sample, rolling: &RollingStats) -> Result<String> {
        let mut line = match sample.latency_ms() {
            Some(ms) => format!(
                "{} probe {:>3}  {}",
                self.colorize("✓", self.color_scheme.success),
                sample.sequence + 1,
                self.format_latency_colored(ms)
            ),
            None => format!(
                "{} probe {:>3}  {}",
                self.colorize("✗", self.color_scheme.error),
                sample.sequence + 1,
                self.colorize("no reply", self.color_scheme.error)
            ),
        };

        if self.options.verbose_mode {
            if let (Some(min), Some(max)) = (rolling.min(), rolling.max()) {
                line.push_str(
                    &self
                        .dimmed(&format!(
                            "   (mean {}, min {}, max {})",
                            self.plain.format_latency(rolling.average()),
                            self.plain.format_latency(min),
                            self.plain.format_latency(max)
                        ))
                        .to_string(),
                );
            }
        }

        Ok(line)
    }

    fn format_run_summary(&self, result: &RunResult) -> Result<String> {
        let mut output = String::new();
        let outcome_label = result
            .outcome
            .map(|o| o.label())
            .unwrap_or("in progress");

        writeln!(
            output,
            "{}: {}",
            self.bold(&result.target.to_string()),
            self.colorize(outcome_label, self.outcome_color(result.outcome))
        )
        .map_err(|e| AppError::io(format!("Failed to format summary: {}", e)))?;
        writeln!(
            output,
            "{} {} sent, {} replies ({})",
            self.dimmed("Probes:  "),
            result.total_count,
            result.success_count,
            self.format_percentage_colored(result.success_rate())
        )
        .map_err(|e| AppError::io(format!("Failed to format summary: {}", e)))?;

        if let Some(error) = result.error.as_deref() {
            writeln!(
                output,
                "{} {}",
                self.dimmed("Error:   "),
                self.colorize(error, self.color_scheme.error)
            )
            .map_err(|e| AppError::io(format!("Failed to format summary: {}", e)))?;
        }

        match result.statistics.as_ref() {
            Some(stats) => {
                writeln!(
                    output,
                    "{} {} ({})",
                    self.dimmed("Mean:    "),
                    self.format_latency_colored(stats.mean_ms),
                    stats.latency_level().label()
                )
                .map_err(|e| AppError::io(format!("Failed to format summary: {}", e)))?;
                writeln!(
                    output,
                    "{} {} / {}",
                    self.dimmed("Min/Max: "),
                    self.format_latency_colored(stats.min_ms),
                    self.format_latency_colored(stats.max_ms)
                )
                .map_err(|e| AppError::io(format!("Failed to format summary: {}", e)))?;
                writeln!(
                    output,
                    "{} {}",
                    self.dimmed("Std Dev: "),
                    self.plain.format_latency(stats.std_dev_ms)
                )
                .map_err(|e| AppError::io(format!("Failed to format summary: {}", e)))?;
            }
            None => {
                writeln!(
                    output,
                    "{}",
                    self.colorize("No replies received.", self.color_scheme.error)
                )
                .map_err(|e| AppError::io(format!("Failed to format summary: {}", e)))?;
            }
        }

        if self.options.verbose_mode {
            let lost = self.plain.lost_sequences(result);
            if !lost.is_empty() {
                let listed: Vec<String> = lost.iter().map(|s| s.to_string()).collect();
                writeln!(
                    output,
                    "{} probes {}",
                    self.dimmed("Lost:    "),
                    self.colorize(&listed.join(", "), self.color_scheme.warning)
                )
                .map_err(|e| AppError::io(format!("Failed to format summary: {}", e)))?;
            }
        }

        Ok(output.trim_end().to_string())
    }

    fn format_run_started(&self, index: usize, total: usize, target: &Target) -> Result<String> {
        Ok(format!(
            "{} Pinging {}",
            self.dimmed(&format!("[{}/{}]", index + 1, total)),
            self.colorize(&target.to_string(), self.color_scheme.info)
        ))
    }

    fn format_run_line(&self, result: &RunResult) -> Result<String> {
        if result.is_failed() {
            let reason = result.error.as_deref().unwrap_or("unknown error");
            return Ok(format!(
                "{}: {} ({})",
                self.colorize(&result.target.name, self.color_scheme.info),
                self.colorize("failed", self.color_scheme.error),
                reason
            ));
        }

        let mut line = match result.statistics.as_ref() {
            Some(stats) => format!(
                "{}: {} replies, {} mean",
                self.colorize(&result.target.name, self.color_scheme.info),
                self.format_percentage_colored(result.success_rate()),
                self.format_latency_colored(stats.mean_ms)
            ),
            None => format!(
                "{}: {}",
                self.colorize(&result.target.name, self.color_scheme.info),
                self.colorize("no replies", self.color_scheme.error)
            ),
        };

        if result.is_cancelled() {
            line.push_str(&format!(" {}", self.dimmed("(cancelled early)")));
        }

        Ok(line)
    }

    fn format_batch_table(&self, batch: &BatchResult) -> Result<String> {
        if batch.is_empty() {
            return Ok(self.dimmed("No runs completed.").to_string());
        }

        let (format, plain_rows) = self.plain.batch_table_rows(batch);
        let widths = self.plain.calculate_column_widths(&format, &plain_rows);

        let mut order: Vec<&RunResult> = batch.runs.iter().collect();
        order.sort_by(|a, b| {
            let a_mean = a.statistics.as_ref().map(|s| s.mean_ms).unwrap_or(f64::MAX);
            let b_mean = b.statistics.as_ref().map(|s| s.mean_ms).unwrap_or(f64::MAX);
            a_mean.partial_cmp(&b_mean).unwrap_or(std::cmp::Ordering::Equal)
        });

        let pad = " ".repeat(format.padding);
        let border = self
            .colorize(&self.plain.create_horizontal_border(&widths), self.color_scheme.muted)
            .to_string();
        let mut output = String::new();

        if format.show_borders {
            writeln!(output, "{}", border)
                .map_err(|e| AppError::io(format!("Failed to format table: {}", e)))?;
        }

        let mut header_row = String::new();
        for (i, column) in format.columns.iter().enumerate() {
            let aligned = self.plain.align_text(&column.header, widths[i], &column.alignment);
            if format.show_borders {
                header_row.push('|');
                header_row.push_str(&pad);
                header_row.push_str(&self.bold(&aligned).to_string());
                header_row.push_str(&pad);
            } else {
                if i > 0 {
                    header_row.push_str("  ");
                }
                header_row.push_str(&self.bold(&aligned).to_string());
            }
        }
        if format.show_borders {
            header_row.push('|');
        }
        writeln!(output, "{}", header_row)
            .map_err(|e| AppError::io(format!("Failed to format table: {}", e)))?;

        if format.show_borders {
            writeln!(output, "{}", border)
                .map_err(|e| AppError::io(format!("Failed to format table: {}", e)))?;
        }

        for run in &order {
            let name = self
                .colorize(
                    &self.plain.align_text(&run.target.name, widths[0], &Alignment::Left),
                    self.color_scheme.info,
                )
                .to_string();
            let replies_text = format!("{}/{}", run.success_count, run.total_count);
            let replies_aligned = self.plain.align_text(&replies_text, widths[1], &Alignment::Right);
            let replies = self
                .colorize(
                    &replies_aligned,
                    if run.has_successes() {
                        self.color_scheme.success
                    } else {
                        self.color_scheme.error
                    },
                )
                .to_string();

            let cells: Vec<String> = match run.statistics.as_ref() {
                Some(stats) => vec![
                    name,
                    replies,
                    self.latency_cell(stats.mean_ms, widths[2]),
                    self.latency_cell(stats.min_ms, widths[3]),
                    self.latency_cell(stats.max_ms, widths[4]),
                    self.latency_cell(stats.std_dev_ms, widths[5]),
                ],
                None => {
                    let marker = if run.is_failed() { "failed" } else { "--" };
                    let marker_aligned = self.plain.align_text(marker, widths[2], &Alignment::Right);
                    vec![
                        name,
                        replies,
                        if run.is_failed() {
                            self.colorize(&marker_aligned, self.color_scheme.error).to_string()
                        } else {
                            self.muted_cell(marker, widths[2], &Alignment::Right)
                        },
                        self.muted_cell("--", widths[3], &Alignment::Right),
                        self.muted_cell("--", widths[4], &Alignment::Right),
                        self.muted_cell("--", widths[5], &Alignment::Right),
                    ]
                }
            };

            let mut row = String::new();
            for (i, cell) in cells.iter().enumerate() {
                if format.show_borders {
                    row.push('|');
                    row.push_str(&pad);
                    row.push_str(cell);
                    row.push_str(&pad);
                } else {
                    if i > 0 {
                        row.push_str("  ");
                    }
                    row.push_str(cell);
                }
            }
            if format.show_borders {
                row.push('|');
            }
            writeln!(output, "{}", row.trim_end())
                .map_err(|e| AppError::io(format!("Failed to format table: {}", e)))?;
        }

        if format.show_borders {
            write!(output, "{}", border)
                .map_err(|e| AppError::io(format!("Failed to format table: {}", e)))?;
        }

        Ok(output)
    }

    fn format_batch_summary(&self, batch: &BatchResult) -> Result<String> {
        let reachable = batch.runs_with_successes();
        let total = batch.len();
        let count_color = if reachable == total && total > 0 {
            self.color_scheme.success
        } else if reachable > 0 {
            self.color_scheme.warning
        } else {
            self.color_scheme.error
        };

        let mut summary = format!(
            "{} targets reachable",
            self.colorize(&format!("{}/{}", reachable, total), count_color)
        );

        if let Some(best) = batch.best_run() {
            if let Some(stats) = best.statistics.as_ref() {
                summary.push_str(&format!(
                    " | Best: {} ({} mean)",
                    self.colorize(&best.target.name, self.color_scheme.highlight),
                    self.format_latency_colored(stats.mean_ms)
                ));
            }
        }

        if batch.cancelled {
            summary.push_str(&format!(" | {}", self.colorize("cancelled", self.color_scheme.warning)));
        }

        Ok(summary)
    }

    fn format_error(&self, error: &str) -> Result<String> {
        Ok(format!("✗ {}", self.colorize(error, self.color_scheme.error)))
    }

    fn format_warning(&self, warning: &str) -> Result<String> {
        Ok(format!("! {}", self.colorize(warning, self.color_scheme.warning)))
    }

    fn format_success(&self, message: &str) -> Result<String> {
        Ok(format!("✓ {}", self.colorize(message, self.color_scheme.success)))
    }
}

/// Helper functions for color management
impl ColoredFormatter {
    /// Check if the terminal supports colors
    pub fn supports_color() -> bool {
        std::env::var("NO_COLOR").is_err()
            && std::env::var("TERM").map(|term| term != "dumb").unwrap_or(true)
    }

    /// Enable or disable colors at runtime
    pub fn set_colors_enabled(&mut self, enabled: bool) {
        self.options.enable_color = enabled && Self::supports_color();
    }
}
