//! Structured logging for the ping monitor
//!
//! Provides leveled, optionally colored console logging plus a JSON format
//! for log aggregators. Run-scoped events are logged through `RunLogger`,
//! which correlates every entry of one probe run under a generated run ID.

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::{BatchResult, RunResult, Sample, Target};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::{self, Write};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Log level enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LogLevel {
    /// Most detailed tracing
    Trace = 0,
    /// Detailed information for debugging
    Debug = 1,
    /// General application information
    Info = 2,
    /// Potentially harmful situations
    Warn = 3,
    /// Error events, the application can usually continue
    Error = 4,
}

impl LogLevel {
    /// Log level name as a fixed string
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }

    /// ANSI color code for console output
    pub fn color_code(&self) -> &'static str {
        match self {
            LogLevel::Trace => "\x1b[37m",
            LogLevel::Debug => "\x1b[36m",
            LogLevel::Info => "\x1b[32m",
            LogLevel::Warn => "\x1b[33m",
            LogLevel::Error => "\x1b[31m",
        }
    }

    /// Reset ANSI color code
    pub fn reset_code() -> &'static str {
        "\x1b[0m"
    }
}

impl std::str::FromStr for LogLevel {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_uppercase().as_str() {
            "TRACE" => Ok(LogLevel::Trace),
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "WARN" | "WARNING" => Ok(LogLevel::Warn),
            "ERROR" => Ok(LogLevel::Error),
            _ => Err(AppError::parse(format!("Invalid log level: {}", s))),
        }
    }
}

/// A single structured log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    /// Timestamp when the entry was created
    pub timestamp: DateTime<Utc>,
    /// Log level
    pub level: LogLevel,
    /// Log message
    pub message: String,
    /// Logger name/component
    pub logger: String,
    /// Correlation ID for tracking related events
    pub correlation_id: Option<String>,
    /// Additional structured fields
    pub fields: HashMap<String, serde_json::Value>,
}

/// Log output format options
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LogFormat {
    /// Human-readable console format
    Console,
    /// JSON lines for structured log consumers
    Json,
    /// Compact single-line format
    Compact,
}

/// Shared logging context for session tracking
#[derive(Debug, Default)]
struct LogContext {
    /// Session ID attached to every entry
    session_id: Option<String>,
    /// Context fields attached to every entry
    context_fields: HashMap<String, serde_json::Value>,
}

/// Logger with leveled filtering and pluggable output format
pub struct Logger {
    /// Minimum log level to output
    min_level: LogLevel,
    /// Whether to use colored output
    use_color: bool,
    /// Output format
    format: LogFormat,
    /// Logger name
    name: String,
    /// Shared context storage
    context: Arc<RwLock<LogContext>>,
}

impl Logger {
    /// Create a logger with default settings
    pub fn new(name: String) -> Self {
        Self {
            min_level: LogLevel::Info,
            use_color: true,
            format: LogFormat::Console,
            name,
            context: Arc::new(RwLock::new(LogContext::default())),
        }
    }

    /// Create a logger configured from application settings
    ///
    /// Debug mode switches to JSON output at Debug level; verbose mode
    /// keeps the console format at Info; the quiet default logs warnings
    /// and errors only.
    pub fn with_config(name: String, config: &Config) -> Self {
        let min_level = if let Some(level) = config.log_level {
            level
        } else if config.debug {
            LogLevel::Debug
        } else if config.verbose {
            LogLevel::Info
        } else {
            LogLevel::Warn
        };

        Self {
            min_level,
            use_color: config.use_color,
            format: if config.debug {
                LogFormat::Json
            } else {
                LogFormat::Console
            },
            name,
            context: Arc::new(RwLock::new(LogContext::default())),
        }
    }

    /// Set the minimum log level
    pub fn set_level(&mut self, level: LogLevel) {
        self.min_level = level;
    }

    /// Set the output format
    pub fn set_format(&mut self, format: LogFormat) {
        self.format = format;
    }

    /// Enable or disable colored output
    pub fn set_color(&mut self, use_color: bool) {
        self.use_color = use_color;
    }

    /// Attach a session ID to all subsequent entries
    pub async fn set_session_id(&self, session_id: String) {
        let mut context = self.context.write().await;
        context.session_id = Some(session_id);
    }

    /// Add a context field carried by all subsequent entries
    pub async fn add_context_field<T: Serialize>(&self, key: String, value: T) {
        if let Ok(json_value) = serde_json::to_value(value) {
            let mut context = self.context.write().await;
            context.context_fields.insert(key, json_value);
        }
    }

    /// Create a log entry builder
    pub fn log(&self, level: LogLevel, message: &str) -> LogEntryBuilder {
        LogEntryBuilder::new(self, level, message.to_string())
    }

    pub fn trace(&self, message: &str) -> LogEntryBuilder {
        self.log(LogLevel::Trace, message)
    }

    pub fn debug(&self, message: &str) -> LogEntryBuilder {
        self.log(LogLevel::Debug, message)
    }

    pub fn info(&self, message: &str) -> LogEntryBuilder {
        self.log(LogLevel::Info, message)
    }

    pub fn warn(&self, message: &str) -> LogEntryBuilder {
        self.log(LogLevel::Warn, message)
    }

    pub fn error(&self, message: &str) -> LogEntryBuilder {
        self.log(LogLevel::Error, message)
    }

    /// Check whether a level would be output
    pub fn would_log(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }

    /// Write a log entry to its output stream
    async fn write_entry(&self, mut entry: LogEntry) {
        if entry.level < self.min_level {
            return;
        }

        let context = self.context.read().await;
        if let Some(session_id) = &context.session_id {
            entry.fields.insert(
                "session_id".to_string(),
                serde_json::Value::String(session_id.clone()),
            );
        }
        for (key, value) in &context.context_fields {
            entry.fields.insert(key.clone(), value.clone());
        }
        drop(context);

        let output = match self.format {
            LogFormat::Console => self.format_console(&entry),
            LogFormat::Json => self.format_json(&entry),
            LogFormat::Compact => self.format_compact(&entry),
        };

        // warnings and errors go to stderr, the rest to stdout
        if entry.level >= LogLevel::Warn {
            let _ = writeln!(io::stderr(), "{}", output);
        } else {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }

    /// Format a log entry for console output
    fn format_console(&self, entry: &LogEntry) -> String {
        let timestamp = entry.timestamp.format("%Y-%m-%d %H:%M:%S%.3f");
        let level_str = entry.level.as_str();

        let formatted_level = if self.use_color {
            format!(
                "{}{:>5}{}",
                entry.level.color_code(),
                level_str,
                LogLevel::reset_code()
            )
        } else {
            format!("{:>5}", level_str)
        };

        let mut output = format!(
            "{} {} [{}] {}",
            timestamp, formatted_level, entry.logger, entry.message
        );

        if let Some(correlation_id) = &entry.correlation_id {
            // the first 8 chars are enough to correlate by eye
            let short = &correlation_id[..correlation_id.len().min(8)];
            output.push_str(&format!(" [{}]", short));
        }

        if !entry.fields.is_empty() {
            let fields_str: Vec<String> = entry
                .fields
                .iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect();
            output.push_str(&format!(" {{{}}}", fields_str.join(", ")));
        }

        output
    }

    /// Format a log entry as a JSON line
    fn format_json(&self, entry: &LogEntry) -> String {
        match serde_json::to_string(entry) {
            Ok(json) => json,
            Err(_) => format!(
                "{{\"error\": \"Failed to serialize log entry\", \"message\": \"{}\"}}",
                entry.message
            ),
        }
    }

    /// Format a log entry in compact format
    fn format_compact(&self, entry: &LogEntry) -> String {
        let timestamp = entry.timestamp.format("%H:%M:%S");
        format!(
            "{} {} {}: {}",
            timestamp,
            entry.level.as_str().chars().next().unwrap_or('?'),
            entry.logger,
            entry.message
        )
    }
}

/// Builder pattern for assembling log entries
pub struct LogEntryBuilder<'a> {
    logger: &'a Logger,
    entry: LogEntry,
}

impl<'a> LogEntryBuilder<'a> {
    fn new(logger: &'a Logger, level: LogLevel, message: String) -> Self {
        Self {
            logger,
            entry: LogEntry {
                timestamp: Utc::now(),
                level,
                message,
                logger: logger.name.clone(),
                correlation_id: None,
                fields: HashMap::new(),
            },
        }
    }

    /// Add a correlation ID
    pub fn correlation_id(mut self, id: &str) -> Self {
        self.entry.correlation_id = Some(id.to_string());
        self
    }

    /// Add a structured field
    pub fn field<T: Serialize>(mut self, key: &str, value: T) -> Self {
        if let Ok(json_value) = serde_json::to_value(value) {
            self.entry.fields.insert(key.to_string(), json_value);
        }
        self
    }

    /// Add error classification fields
    pub fn error_info(self, error: &AppError) -> Self {
        self.field("error_category", error.category())
            .field("error_recoverable", error.is_recoverable())
            .field("error_exit_code", error.exit_code())
    }

    /// Finalize and write the log entry
    pub async fn log(self) {
        self.logger.write_entry(self.entry).await;
    }
}

/// Logger specialized for probe runs
///
/// Generates one run ID per started run and tags every related entry with
/// it, so entries from consecutive runs stay attributable.
pub struct RunLogger {
    logger: Logger,
}

impl RunLogger {
    /// Create a run logger from application settings
    pub fn new(config: &Config) -> Self {
        Self {
            logger: Logger::with_config("RUN".to_string(), config),
        }
    }

    /// Log the start of a probe run, returning its correlation ID
    pub async fn run_started(&self, target: &Target, probe_count: u64) -> String {
        let run_id = Uuid::new_v4().to_string();

        self.logger
            .info(&format!("Starting probe run against {}", target))
            .correlation_id(&run_id)
            .field("target_name", &target.name)
            .field("target_address", &target.address)
            .field("probe_count", probe_count)
            .log()
            .await;

        run_id
    }

    /// Log one collected sample
    pub async fn sample(&self, run_id: &str, sample: &Sample) {
        let message = match sample.latency_ms() {
            Some(ms) => format!("Probe {} replied in {:.1}ms", sample.sequence, ms),
            None => format!("Probe {} lost", sample.sequence),
        };
        let level = if sample.succeeded {
            LogLevel::Debug
        } else {
            LogLevel::Warn
        };

        self.logger
            .log(level, &message)
            .correlation_id(run_id)
            .field("sequence", sample.sequence)
            .field("succeeded", sample.succeeded)
            .field("latency_ms", sample.latency_ms())
            .log()
            .await;
    }

    /// Log the terminal state of a run
    pub async fn run_finished(&self, run_id: &str, result: &RunResult) {
        let outcome = result.outcome.map(|o| o.label()).unwrap_or("unknown");
        let message = format!(
            "Run against {} {}: {}/{} probes answered",
            result.target, outcome, result.success_count, result.total_count
        );
        let level = if result.is_failed() {
            LogLevel::Error
        } else {
            LogLevel::Info
        };

        let mut builder = self
            .logger
            .log(level, &message)
            .correlation_id(run_id)
            .field("outcome", outcome)
            .field("success_count", result.success_count)
            .field("total_count", result.total_count)
            .field("success_rate", result.success_rate());

        if let Some(stats) = &result.statistics {
            builder = builder
                .field("mean_ms", stats.mean_ms)
                .field("min_ms", stats.min_ms)
                .field("max_ms", stats.max_ms)
                .field("std_dev_ms", stats.std_dev_ms);
        }
        if let Some(error) = &result.error {
            builder = builder.field("error", error);
        }

        builder.log().await;
    }

    /// Log the terminal state of a batch
    pub async fn batch_finished(&self, result: &BatchResult) {
        self.logger
            .info(&format!(
                "Batch finished: {} runs, {} with replies{}",
                result.len(),
                result.runs_with_successes(),
                if result.cancelled { " (cancelled)" } else { "" }
            ))
            .field("batch_size", result.len())
            .field("runs_with_successes", result.runs_with_successes())
            .field("cancelled", result.cancelled)
            .log()
            .await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::str::FromStr;
    use std::time::Duration;

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(LogLevel::from_str("DEBUG").unwrap(), LogLevel::Debug);
        assert_eq!(LogLevel::from_str("info").unwrap(), LogLevel::Info);
        assert_eq!(LogLevel::from_str("WARN").unwrap(), LogLevel::Warn);
        assert_eq!(LogLevel::from_str("warning").unwrap(), LogLevel::Warn);
        assert!(LogLevel::from_str("invalid").is_err());
    }

    #[test]
    fn test_log_level_ordering() {
        assert!(LogLevel::Trace < LogLevel::Debug);
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Warn);
        assert!(LogLevel::Warn < LogLevel::Error);
    }

    #[test]
    fn test_logger_creation() {
        let logger = Logger::new("TEST".to_string());
        assert_eq!(logger.name, "TEST");
        assert_eq!(logger.min_level, LogLevel::Info);
        assert!(logger.use_color);
    }

    #[test]
    fn test_logger_with_config() {
        let config = Config {
            debug: true,
            verbose: true,
            use_color: false,
            ..Default::default()
        };

        let logger = Logger::with_config("TEST".to_string(), &config);
        assert_eq!(logger.min_level, LogLevel::Debug);
        assert_eq!(logger.format, LogFormat::Json);
        assert!(!logger.use_color);
    }

    #[test]
    fn test_quiet_default_logs_warnings_only() {
        let config = Config::default();
        let logger = Logger::with_config("TEST".to_string(), &config);
        assert!(!logger.would_log(LogLevel::Info));
        assert!(logger.would_log(LogLevel::Warn));
    }

    #[test]
    fn test_explicit_level_overrides_flags() {
        let config = Config {
            debug: true,
            log_level: Some(LogLevel::Error),
            ..Default::default()
        };
        let logger = Logger::with_config("TEST".to_string(), &config);
        assert_eq!(logger.min_level, LogLevel::Error);
    }

    #[tokio::test]
    async fn test_session_id_management() {
        let logger = Logger::new("TEST".to_string());
        logger.set_session_id("test-session".to_string()).await;

        let context = logger.context.read().await;
        assert_eq!(context.session_id.as_ref().unwrap(), "test-session");
    }

    #[tokio::test]
    async fn test_context_fields() {
        let logger = Logger::new("TEST".to_string());
        logger
            .add_context_field("test_key".to_string(), "test_value")
            .await;

        let context = logger.context.read().await;
        assert!(context.context_fields.contains_key("test_key"));
    }

    #[test]
    fn test_would_log() {
        let mut logger = Logger::new("TEST".to_string());
        logger.set_level(LogLevel::Warn);

        assert!(!logger.would_log(LogLevel::Debug));
        assert!(!logger.would_log(LogLevel::Info));
        assert!(logger.would_log(LogLevel::Warn));
        assert!(logger.would_log(LogLevel::Error));
    }

    #[tokio::test]
    async fn test_log_entry_builder() {
        let logger = Logger::new("TEST".to_string());

        logger
            .info("test message")
            .correlation_id("test-id")
            .field("test_field", "test_value")
            .log()
            .await;
    }

    #[test]
    fn test_console_and_json_formats() {
        let entry = LogEntry {
            timestamp: Utc::now(),
            level: LogLevel::Info,
            message: "Test message".to_string(),
            logger: "TEST".to_string(),
            correlation_id: Some("abcdef123456".to_string()),
            fields: {
                let mut map = HashMap::new();
                map.insert(
                    "key".to_string(),
                    serde_json::Value::String("value".to_string()),
                );
                map
            },
        };

        let mut logger = Logger::new("TEST".to_string());
        logger.set_color(false);

        let console_output = logger.format_console(&entry);
        assert!(console_output.contains("INFO"));
        assert!(console_output.contains("Test message"));
        assert!(console_output.contains("abcdef12"));
        assert!(console_output.contains("key=\"value\""));

        let json_output = logger.format_json(&entry);
        assert!(json_output.starts_with('{'));
        assert!(json_output.ends_with('}'));
    }

    #[test]
    fn test_compact_format() {
        let entry = LogEntry {
            timestamp: Utc.with_ymd_and_hms(2026, 8, 25, 14, 30, 5).unwrap(),
            level: LogLevel::Info,
            message: "Probe 3 replied".to_string(),
            logger: "RUN".to_string(),
            correlation_id: Some("abcdef123456".to_string()),
            fields: HashMap::new(),
        };

        let mut logger = Logger::new("TEST".to_string());
        logger.set_format(LogFormat::Compact);

        assert_eq!(
            logger.format_compact(&entry),
            "14:30:05 I RUN: Probe 3 replied"
        );
    }

    #[test]
    fn test_log_entry_serialization() {
        let entry = LogEntry {
            timestamp: Utc::now(),
            level: LogLevel::Info,
            message: "Test".to_string(),
            logger: "TEST".to_string(),
            correlation_id: None,
            fields: HashMap::new(),
        };

        let json = serde_json::to_string(&entry).unwrap();
        let deserialized: LogEntry = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized.level, LogLevel::Info);
        assert_eq!(deserialized.message, "Test");
        assert_eq!(deserialized.logger, "TEST");
    }

    #[tokio::test]
    async fn test_run_logger_lifecycle() {
        let config = Config::default();
        let run_logger = RunLogger::new(&config);
        let target = Target::new("Google DNS", "8.8.8.8");

        let run_id = run_logger.run_started(&target, 60).await;
        assert!(!run_id.is_empty());

        let sample = Sample::success(0, Duration::from_millis(23));
        run_logger.sample(&run_id, &sample).await;

        let mut result = RunResult::new(target);
        result.add_sample(sample);
        result.finalize(crate::types::RunOutcome::Completed);
        run_logger.run_finished(&run_id, &result).await;
    }
}
