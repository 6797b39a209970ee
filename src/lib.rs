//! Ping Monitor
//!
//! A ping execution and statistics engine that probes configurable hosts
//! with the system ping utility, tracks per-probe latency over timed runs,
//! and reduces the samples into summary statistics and batch reports.

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod output;
pub mod probe;
pub mod runner;
pub mod stats;
pub mod storage;
pub mod types;

// Re-export commonly used types
pub use error::{AppError, Result};
pub use models::{BatchResult, RunResult, Sample, Statistics, Target};
pub use probe::{ProbeExecutor, SystemPingExecutor};
pub use runner::{BatchRunner, RunConfig, RunController, RunEvent, RunHandle};
pub use stats::RollingStats;
pub use output::{
    ColoredFormatter, OutputCoordinator, OutputFormatter, OutputFormatterFactory, PlainFormatter,
};

/// Application version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
pub const PKG_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Default configuration values
pub mod defaults {
    use std::time::Duration;

    pub const DEFAULT_DURATION: Duration = Duration::from_secs(60);
    pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(1);
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(2);
    pub const DEFAULT_DATA_DIR: &str = ".";
    pub const DEFAULT_USE_COLOR: bool = true;
    pub const DEFAULT_SERVERS: &[(&str, &str)] = &[
        ("Google DNS", "8.8.8.8"),
        ("Cloudflare DNS", "1.1.1.1"),
    ];
    pub const MAX_RUN_DURATION_SECS: u64 = 86_400;
    pub const MAX_PROBE_TIMEOUT_SECS: f64 = 300.0;
}
