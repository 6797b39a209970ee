//! Core formatting traits and implementations
//!
//! This module defines the output formatting interface and provides
//! a plain text implementation with table formatting capabilities.

use crate::{
    error::{AppError, Result},
    models::{BatchResult, RunResult, Sample, Target},
    runner::RunConfig,
    stats::RollingStats,
};
use std::fmt::Write as _;
use std::time::Duration;

/// Options controlling how results are rendered
#[derive(Debug, Clone)]
pub struct FormattingOptions {
    pub enable_color: bool,
    pub verbose_mode: bool,
    pub show_individual_results: bool,
    pub table_borders: bool,
    pub max_width: usize,
    pub compact_mode: bool,
}

impl Default for FormattingOptions {
    fn default() -> Self {
        Self {
            enable_color: true,
            verbose_mode: false,
            show_individual_results: false,
            table_borders: true,
            max_width: 120,
            compact_mode: true,
        }
    }
}

/// Text alignment within a table cell
#[derive(Debug, Clone, PartialEq)]
pub enum Alignment {
    Left,
    Right,
    Center,
}

/// A single table column
#[derive(Debug, Clone)]
pub struct Column {
    pub header: String,
    pub alignment: Alignment,
    pub min_width: usize,
    pub max_width: usize,
}

impl Column {
    /// Shorthand for a column definition
    pub fn new(header: &str, alignment: Alignment, min_width: usize, max_width: usize) -> Self {
        Self {
            header: header.to_string(),
            alignment,
            min_width,
            max_width,
        }
    }
}

/// Table layout description
#[derive(Debug, Clone)]
pub struct TableFormat {
    pub columns: Vec<Column>,
    pub show_borders: bool,
    pub padding: usize,
}

/// One table row, one string per column
pub type RowData = Vec<String>;

/// Formatting interface implemented by the plain and colored renderers
///
/// All methods return the rendered text; callers decide where it goes
/// (stdout, a log, a test assertion).
pub trait OutputFormatter {
    /// Bordered section title
    fn format_header(&self, title: &str) -> Result<String>;

    /// Pre-run banner describing the target and schedule
    fn format_run_overview(&self, target: &Target, config: &RunConfig) -> Result<String>;

    /// One live progress line per probe
    ///
    /// `rolling` carries the running statistics of the run so far, the
    /// just-delivered sample included; verbose formatters append them.
    fn format_probe_line(&self, sample: &Sample, rolling: &RollingStats) -> Result<String>;

    /// Multi-line summary of a finished run
    fn format_run_summary(&self, result: &RunResult) -> Result<String>;

    /// Announcement line when a batch moves to its next target
    fn format_run_started(&self, index: usize, total: usize, target: &Target) -> Result<String>;

    /// Single-line digest of a finished run within a batch
    fn format_run_line(&self, result: &RunResult) -> Result<String>;

    /// Comparison table over every run of a batch
    fn format_batch_table(&self, batch: &BatchResult) -> Result<String>;

    /// Single-line digest of a whole batch
    fn format_batch_summary(&self, batch: &BatchResult) -> Result<String>;

    fn format_error(&self, error: &str) -> Result<String>;

    fn format_warning(&self, warning: &str) -> Result<String>;

    fn format_success(&self, message: &str) -> Result<String>;
}

/// Plain text formatter without color codes
pub struct PlainFormatter {
    options: FormattingOptions,
}

impl PlainFormatter {
    /// Create a new plain formatter with options
    pub fn new(options: FormattingOptions) -> Self {
        Self { options }
    }

    /// Render a complete table from a layout and row data
    pub(crate) fn create_table(&self, format: &TableFormat, rows: &[RowData]) -> Result<String> {
        let widths = self.calculate_column_widths(format, rows);
        let mut output = String::new();

        if format.show_borders {
            writeln!(output, "{}", self.create_horizontal_border(&widths))
                .map_err(|e| AppError::io(format!("Failed to format table: {}", e)))?;
        }

        let headers: RowData = format.columns.iter().map(|c| c.header.clone()).collect();
        writeln!(output, "{}", self.create_row(format, &widths, &headers))
            .map_err(|e| AppError::io(format!("Failed to format table: {}", e)))?;

        if format.show_borders {
            writeln!(output, "{}", self.create_horizontal_border(&widths))
                .map_err(|e| AppError::io(format!("Failed to format table: {}", e)))?;
        }

        for row in rows {
            writeln!(output, "{}", self.create_row(format, &widths, row))
                .map_err(|e| AppError::io(format!("Failed to format table: {}", e)))?;
        }

        if format.show_borders {
            write!(output, "{}", self.create_horizontal_border(&widths))
                .map_err(|e| AppError::io(format!("Failed to format table: {}", e)))?;
        }

        Ok(output)
    }

    /// Compute column widths from headers, constraints and cell contents
    pub(crate) fn calculate_column_widths(
        &self,
        format: &TableFormat,
        rows: &[RowData],
    ) -> Vec<usize> {
        format
            .columns
            .iter()
            .enumerate()
            .map(|(i, column)| {
                let content_width = rows
                    .iter()
                    .filter_map(|row| row.get(i))
                    .map(|cell| cell.chars().count())
                    .max()
                    .unwrap_or(0);
                column
                    .header
                    .chars()
                    .count()
                    .max(content_width)
                    .max(column.min_width)
                    .min(column.max_width)
            })
            .collect()
    }

    /// Render one row with padding and optional border characters
    fn create_row(&self, format: &TableFormat, widths: &[usize], cells: &RowData) -> String {
        let pad = " ".repeat(format.padding);
        let mut row = String::new();

        for (i, width) in widths.iter().enumerate() {
            let empty = String::new();
            let cell = cells.get(i).unwrap_or(&empty);
            let aligned = self.align_text(cell, *width, &format.columns[i].alignment);

            if format.show_borders {
                row.push('|');
                row.push_str(&pad);
                row.push_str(&aligned);
                row.push_str(&pad);
            } else {
                if i > 0 {
                    row.push_str("  ");
                }
                row.push_str(&aligned);
            }
        }

        if format.show_borders {
            row.push('|');
        }

        row.trim_end().to_string()
    }

    /// Horizontal `+---+---+` border matching the computed widths
    pub(crate) fn create_horizontal_border(&self, widths: &[usize]) -> String {
        let mut border = String::new();

        if !widths.is_empty() {
            border.push('+');
            for &width in widths {
                border.push_str(&"-".repeat(width + 2));
                border.push('+');
            }
        }

        border
    }

    /// Align text within the given width, truncating when it does not fit
    pub(crate) fn align_text(&self, text: &str, width: usize, alignment: &Alignment) -> String {
        let len = text.chars().count();
        if len >= width {
            return text.chars().take(width).collect();
        }

        let padding = width - len;
        match alignment {
            Alignment::Left => format!("{}{}", text, " ".repeat(padding)),
            Alignment::Right => format!("{}{}", " ".repeat(padding), text),
            Alignment::Center => {
                let left_pad = padding / 2;
                let right_pad = padding - left_pad;
                format!("{}{}{}", " ".repeat(left_pad), text, " ".repeat(right_pad))
            }
        }
    }

    /// Format a round-trip time in human-readable units
    pub(crate) fn format_latency(&self, latency_ms: f64) -> String {
        if latency_ms < 1.0 {
            format!("{:.2} ms", latency_ms)
        } else if latency_ms < 1000.0 {
            format!("{:.1} ms", latency_ms)
        } else {
            format!("{:.2} s", latency_ms / 1000.0)
        }
    }

    /// Format a percentage with appropriate precision
    pub(crate) fn format_percentage(&self, percentage: f64) -> String {
        if percentage >= 99.95 {
            "100.0%".to_string()
        } else if percentage < 0.05 {
            "0.0%".to_string()
        } else {
            format!("{:.1}%", percentage)
        }
    }

    /// Format a schedule period such as an interval or timeout
    pub(crate) fn format_period(&self, period: Duration) -> String {
        format!("{}s", period.as_secs_f64())
    }

    /// Sequence numbers of the probes that went unanswered
    pub(crate) fn lost_sequences(&self, result: &RunResult) -> Vec<u64> {
        result
            .samples
            .iter()
            .filter(|s| !s.succeeded)
            .map(|s| s.sequence + 1)
            .collect()
    }

    /// Table layout and pre-rendered rows for a batch comparison table
    ///
    /// Rows are sorted fastest mean first; runs without statistics sink to
    /// the bottom in their original order.
    pub(crate) fn batch_table_rows(&self, batch: &BatchResult) -> (TableFormat, Vec<RowData>) {
        let format = TableFormat {
            columns: vec![
                Column::new("Server", Alignment::Left, 12, 40),
                Column::new("Replies", Alignment::Right, 8, 12),
                Column::new("Mean", Alignment::Right, 9, 12),
                Column::new("Min", Alignment::Right, 9, 12),
                Column::new("Max", Alignment::Right, 9, 12),
                Column::new("Std Dev", Alignment::Right, 9, 12),
            ],
            show_borders: self.options.table_borders,
            padding: 1,
        };

        let mut order: Vec<&RunResult> = batch.runs.iter().collect();
        order.sort_by(|a, b| {
            let a_mean = a.statistics.as_ref().map(|s| s.mean_ms).unwrap_or(f64::MAX);
            let b_mean = b.statistics.as_ref().map(|s| s.mean_ms).unwrap_or(f64::MAX);
            a_mean.partial_cmp(&b_mean).unwrap_or(std::cmp::Ordering::Equal)
        });

        let rows = order
            .iter()
            .map(|run| {
                let replies = format!("{}/{}", run.success_count, run.total_count);
                match run.statistics.as_ref() {
                    Some(stats) => vec![
                        run.target.name.clone(),
                        replies,
                        self.format_latency(stats.mean_ms),
                        self.format_latency(stats.min_ms),
                        self.format_latency(stats.max_ms),
                        self.format_latency(stats.std_dev_ms),
                    ],
                    None => {
                        let marker = if run.is_failed() { "failed" } else { "--" };
                        vec![
                            run.target.name.clone(),
                            replies,
                            marker.to_string(),
                            "--".to_string(),
                            "--".to_string(),
                            "--".to_string(),
                        ]
                    }
                }
            })
            .collect();

        (format, rows)
    }
}

impl OutputFormatter for PlainFormatter {
    fn format_header(&self, title: &str) -> Result<String> {
        let mut output = String::new();
        let border = "=".repeat(title.len() + 4);

        writeln!(output, "{}", border)
            .map_err(|e| AppError::io(format!("Failed to format header: {}", e)))?;
        writeln!(output, "  {}  ", title)
            .map_err(|e| AppError::io(format!("Failed to format header: {}", e)))?;
        write!(output, "{}", border)
            .map_err(|e| AppError::io(format!("Failed to format header: {}", e)))?;

        Ok(output)
    }

    fn format_run_overview(&self, target: &Target, config: &RunConfig) -> Result<String> {
        let mut output = String::new();

        writeln!(output, "Target:   {}", target)
            .map_err(|e| AppError::io(format!("Failed to format overview: {}", e)))?;
        write!(
            output,
            "Schedule: {} probes, one every {}, timeout {}",
            config.total_ticks(),
            self.format_period(config.interval),
            self.format_period(config.timeout)
        )
        .map_err(|e| AppError::io(format!("Failed to format overview: {}", e)))?;

        Ok(output)
    }

    fn format_probe_line(&self, sample: &Sample, rolling: &RollingStats) -> Result<String> {
        let mut line = match sample.latency_ms() {
            Some(ms) => format!("probe {:>3}  {}", sample.sequence + 1, self.format_latency(ms)),
            None => format!("probe {:>3}  no reply", sample.sequence + 1),
        };

        if self.options.verbose_mode {
            if let (Some(min), Some(max)) = (rolling.min(), rolling.max()) {
                line.push_str(&format!(
                    "   (mean {}, min {}, max {})",
                    self.format_latency(rolling.average()),
                    self.format_latency(min),
                    self.format_latency(max)
                ));
            }
        }

        Ok(line)
    }

    fn format_run_summary(&self, result: &RunResult) -> Result<String> {
        let mut output = String::new();
        let outcome = result
            .outcome
            .map(|o| o.label())
            .unwrap_or("in progress");

        writeln!(output, "{}: {}", result.target, outcome)
            .map_err(|e| AppError::io(format!("Failed to format summary: {}", e)))?;
        writeln!(
            output,
            "Probes:   {} sent, {} replies ({})",
            result.total_count,
            result.success_count,
            self.format_percentage(result.success_rate())
        )
        .map_err(|e| AppError::io(format!("Failed to format summary: {}", e)))?;

        if let Some(error) = result.error.as_deref() {
            writeln!(output, "Error:    {}", error)
                .map_err(|e| AppError::io(format!("Failed to format summary: {}", e)))?;
        }

        match result.statistics.as_ref() {
            Some(stats) => {
                writeln!(output, "Mean:     {}", self.format_latency(stats.mean_ms))
                    .map_err(|e| AppError::io(format!("Failed to format summary: {}", e)))?;
                writeln!(
                    output,
                    "Min/Max:  {} / {}",
                    self.format_latency(stats.min_ms),
                    self.format_latency(stats.max_ms)
                )
                .map_err(|e| AppError::io(format!("Failed to format summary: {}", e)))?;
                writeln!(output, "Std Dev:  {}", self.format_latency(stats.std_dev_ms))
                    .map_err(|e| AppError::io(format!("Failed to format summary: {}", e)))?;
            }
            None => {
                writeln!(output, "No replies received.")
                    .map_err(|e| AppError::io(format!("Failed to format summary: {}", e)))?;
            }
        }

        if self.options.verbose_mode {
            let lost = self.lost_sequences(result);
            if !lost.is_empty() {
                let listed: Vec<String> = lost.iter().map(|s| s.to_string()).collect();
                writeln!(output, "Lost:     probes {}", listed.join(", "))
                    .map_err(|e| AppError::io(format!("Failed to format summary: {}", e)))?;
            }
        }

        Ok(output.trim_end().to_string())
    }

    fn format_run_started(&self, index: usize, total: usize, target: &Target) -> Result<String> {
        Ok(format!("[{}/{}] Pinging {}", index + 1, total, target))
    }

    fn format_run_line(&self, result: &RunResult) -> Result<String> {
        if result.is_failed() {
            let reason = result.error.as_deref().unwrap_or("unknown error");
            return Ok(format!("{}: failed ({})", result.target.name, reason));
        }

        let mut line = match result.statistics.as_ref() {
            Some(stats) => format!(
                "{}: {} replies, {} mean",
                result.target.name,
                self.format_percentage(result.success_rate()),
                self.format_latency(stats.mean_ms)
            ),
            None => format!("{}: no replies", result.target.name),
        };

        if result.is_cancelled() {
            line.push_str(" (cancelled early)");
        }

        Ok(line)
    }

    fn format_batch_table(&self, batch: &BatchResult) -> Result<String> {
        if batch.is_empty() {
            return Ok("No runs completed.".to_string());
        }

        let (format, rows) = self.batch_table_rows(batch);
        self.create_table(&format, &rows)
    }

    fn format_batch_summary(&self, batch: &BatchResult) -> Result<String> {
        let mut summary = format!(
            "{}/{} targets reachable",
            batch.runs_with_successes(),
            batch.len()
        );

        if let Some(best) = batch.best_run() {
            if let Some(stats) = best.statistics.as_ref() {
                summary.push_str(&format!(
                    " | Best: {} ({} mean)",
                    best.target.name,
                    self.format_latency(stats.mean_ms)
                ));
            }
        }

        if batch.cancelled {
            summary.push_str(" | cancelled");
        }

        Ok(summary)
    }

    fn format_error(&self, error: &str) -> Result<String> {
        Ok(format!("ERROR: {}", error))
    }

    fn format_warning(&self, warning: &str) -> Result<String> {
        Ok(format!("WARNING: {}", warning))
    }

    fn format_success(&self, message: &str) -> Result<String> {
        Ok(format!("SUCCESS: {}", message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RunOutcome;
    use std::time::Duration;

    fn plain() -> PlainFormatter {
        PlainFormatter::new(FormattingOptions {
            enable_color: false,
            ..Default::default()
        })
    }

    fn finished_run(name: &str, address: &str, latencies_ms: &[Option<u64>]) -> RunResult {
        let mut result = RunResult::new(Target::new(name, address));
        for (seq, latency) in latencies_ms.iter().enumerate() {
            let sample = match latency {
                Some(ms) => Sample::success(seq as u64, Duration::from_millis(*ms)),
                None => Sample::failure(seq as u64),
            };
            result.add_sample(sample);
        }
        result.finalize(RunOutcome::Completed);
        result
    }

    #[test]
    fn test_header_has_matching_borders() {
        let header = plain().format_header("Ping Run").unwrap();
        let lines: Vec<&str> = header.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "============");
        assert_eq!(lines[1], "  Ping Run  ");
        assert_eq!(lines[0], lines[2]);
    }

    #[test]
    fn test_run_overview_describes_schedule() {
        let target = Target::new("Google DNS", "8.8.8.8");
        let config = RunConfig::new(
            Duration::from_secs(30),
            Duration::from_millis(500),
            Duration::from_secs(2),
        );
        let overview = plain().format_run_overview(&target, &config).unwrap();

        assert!(overview.contains("Google DNS (8.8.8.8)"));
        assert!(overview.contains("60 probes"));
        assert!(overview.contains("every 0.5s"));
        assert!(overview.contains("timeout 2s"));
    }

    #[test]
    fn test_probe_line_success_and_failure() {
        let formatter = plain();
        let rolling = RollingStats::new();
        let hit = Sample::success(0, Duration::from_millis(12));
        let miss = Sample::failure(4);

        assert_eq!(
            formatter.format_probe_line(&hit, &rolling).unwrap(),
            "probe   1  12.0 ms"
        );
        assert_eq!(
            formatter.format_probe_line(&miss, &rolling).unwrap(),
            "probe   5  no reply"
        );
    }

    #[test]
    fn test_verbose_probe_line_appends_running_stats() {
        let formatter = PlainFormatter::new(FormattingOptions {
            verbose_mode: true,
            ..Default::default()
        });

        let mut rolling = RollingStats::new();
        let first = Sample::success(0, Duration::from_millis(10));
        let second = Sample::success(1, Duration::from_millis(20));
        rolling.observe(&first);
        rolling.observe(&second);

        let line = formatter.format_probe_line(&second, &rolling).unwrap();
        assert_eq!(
            line,
            "probe   2  20.0 ms   (mean 15.0 ms, min 10.0 ms, max 20.0 ms)"
        );

        // before any reply there is nothing to append
        let mut misses = RollingStats::new();
        let miss = Sample::failure(0);
        misses.observe(&miss);
        assert_eq!(
            formatter.format_probe_line(&miss, &misses).unwrap(),
            "probe   1  no reply"
        );
    }

    #[test]
    fn test_run_summary_with_statistics() {
        let result = finished_run("dns", "8.8.8.8", &[Some(10), Some(20), Some(30)]);
        let summary = plain().format_run_summary(&result).unwrap();

        assert!(summary.starts_with("dns (8.8.8.8): completed"));
        assert!(summary.contains("3 sent, 3 replies (100.0%)"));
        assert!(summary.contains("Mean:     20.0 ms"));
        assert!(summary.contains("Min/Max:  10.0 ms / 30.0 ms"));
        assert!(summary.contains("Std Dev:  8.2 ms"));
    }

    #[test]
    fn test_run_summary_without_replies() {
        let result = finished_run("down", "192.0.2.1", &[None, None]);
        let summary = plain().format_run_summary(&result).unwrap();

        assert!(summary.contains("2 sent, 0 replies (0.0%)"));
        assert!(summary.contains("No replies received."));
        assert!(!summary.contains("Mean:"));
    }

    #[test]
    fn test_verbose_summary_lists_lost_probes() {
        let formatter = PlainFormatter::new(FormattingOptions {
            verbose_mode: true,
            ..Default::default()
        });
        let result = finished_run("dns", "8.8.8.8", &[Some(10), None, Some(12), None]);
        let summary = formatter.format_run_summary(&result).unwrap();

        assert!(summary.contains("Lost:     probes 2, 4"));
    }

    #[test]
    fn test_run_line_variants() {
        let formatter = plain();

        let ok = finished_run("dns", "8.8.8.8", &[Some(15)]);
        assert_eq!(
            formatter.format_run_line(&ok).unwrap(),
            "dns: 100.0% replies, 15.0 ms mean"
        );

        let silent = finished_run("down", "192.0.2.1", &[None]);
        assert_eq!(formatter.format_run_line(&silent).unwrap(), "down: no replies");

        let mut broken = RunResult::new(Target::new("broken", "256.0.0.1"));
        broken.fail("ping: command not found");
        assert_eq!(
            formatter.format_run_line(&broken).unwrap(),
            "broken: failed (ping: command not found)"
        );
    }

    #[test]
    fn test_batch_table_sorts_fastest_first() {
        let mut batch = BatchResult::new();
        batch.add_run(finished_run("slow", "192.0.2.1", &[Some(80)]));
        batch.add_run(finished_run("fast", "8.8.8.8", &[Some(10)]));
        batch.add_run(finished_run("dead", "198.51.100.9", &[None]));
        batch.finalize(false);

        let table = plain().format_batch_table(&batch).unwrap();
        let fast_pos = table.find("fast").unwrap();
        let slow_pos = table.find("slow").unwrap();
        let dead_pos = table.find("dead").unwrap();

        assert!(fast_pos < slow_pos);
        assert!(slow_pos < dead_pos);
        assert!(table.contains("Server"));
        assert!(table.contains("Std Dev"));
        assert!(table.contains("1/1"));
        assert!(table.contains("--"));
    }

    #[test]
    fn test_batch_table_rows_align_within_borders() {
        let mut batch = BatchResult::new();
        batch.add_run(finished_run("a", "8.8.8.8", &[Some(10)]));
        batch.finalize(false);

        let table = plain().format_batch_table(&batch).unwrap();
        let lines: Vec<&str> = table.lines().collect();

        // border, header, border, one row, border
        assert_eq!(lines.len(), 5);
        assert!(lines[0].starts_with('+'));
        assert!(lines[0].ends_with('+'));
        assert_eq!(lines[0], lines[2]);
        assert_eq!(lines[0], lines[4]);
    }

    #[test]
    fn test_batch_table_renders_bordered_layout() {
        let mut batch = BatchResult::new();
        batch.add_run(finished_run("Cloudflare DNS", "1.1.1.1", &[Some(10), Some(12)]));
        batch.finalize(false);

        let table = plain().format_batch_table(&batch).unwrap();
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(
            lines[0],
            "+----------------+----------+-----------+-----------+-----------+-----------+"
        );
        assert_eq!(
            lines[1],
            "| Server         |  Replies |      Mean |       Min |       Max |   Std Dev |"
        );
        assert_eq!(
            lines[3],
            "| Cloudflare DNS |      2/2 |   11.0 ms |   10.0 ms |   12.0 ms |    1.0 ms |"
        );
    }

    #[test]
    fn test_batch_summary_names_best_target() {
        let mut batch = BatchResult::new();
        batch.add_run(finished_run("slow", "192.0.2.1", &[Some(80)]));
        batch.add_run(finished_run("fast", "8.8.8.8", &[Some(10)]));
        batch.finalize(false);

        let summary = plain().format_batch_summary(&batch).unwrap();
        assert_eq!(summary, "2/2 targets reachable | Best: fast (10.0 ms mean)");
    }

    #[test]
    fn test_batch_summary_flags_cancellation() {
        let mut batch = BatchResult::new();
        batch.add_run(finished_run("dead", "192.0.2.1", &[None]));
        batch.finalize(true);

        let summary = plain().format_batch_summary(&batch).unwrap();
        assert_eq!(summary, "0/1 targets reachable | cancelled");
    }

    #[test]
    fn test_latency_formatting_scales_units() {
        let formatter = plain();
        assert_eq!(formatter.format_latency(0.42), "0.42 ms");
        assert_eq!(formatter.format_latency(12.34), "12.3 ms");
        assert_eq!(formatter.format_latency(1500.0), "1.50 s");
    }

    #[test]
    fn test_percentage_formatting_clamps_edges() {
        let formatter = plain();
        assert_eq!(formatter.format_percentage(100.0), "100.0%");
        assert_eq!(formatter.format_percentage(99.96), "100.0%");
        assert_eq!(formatter.format_percentage(0.01), "0.0%");
        assert_eq!(formatter.format_percentage(66.666), "66.7%");
    }

    #[test]
    fn test_align_text_pads_and_truncates() {
        let formatter = plain();
        assert_eq!(formatter.align_text("ab", 4, &Alignment::Left), "ab  ");
        assert_eq!(formatter.align_text("ab", 4, &Alignment::Right), "  ab");
        assert_eq!(formatter.align_text("ab", 4, &Alignment::Center), " ab ");
        assert_eq!(formatter.align_text("abcdef", 4, &Alignment::Left), "abcd");
    }

    #[test]
    fn test_errors_and_notices() {
        let formatter = plain();
        assert_eq!(formatter.format_error("boom").unwrap(), "ERROR: boom");
        assert_eq!(formatter.format_warning("careful").unwrap(), "WARNING: careful");
        assert_eq!(formatter.format_success("done").unwrap(), "SUCCESS: done");
    }
}
