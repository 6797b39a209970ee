//! Configuration management
//!
//! Settings are layered in priority order: built-in defaults, then a .env
//! file, then `PINGMON_*` environment variables, then CLI arguments. The
//! merged result is validated once before anything runs.

pub mod env;

pub use env::EnvManager;

use crate::cli::Cli;
use crate::error::{AppError, Result};
use crate::logging::LogLevel;
use crate::runner::RunConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Run duration in seconds
    #[serde(default = "default_duration_secs")]
    pub duration_secs: u64,

    /// Gap between probes in seconds
    #[serde(default = "default_interval_secs")]
    pub interval_secs: f64,

    /// Per-probe reply timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: f64,

    /// Directory holding the server registry and exported reports
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Enable colored terminal output
    #[serde(default = "default_use_color")]
    pub use_color: bool,

    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,

    /// Enable debug output
    #[serde(default)]
    pub debug: bool,

    /// Skip writing the report file after a batch
    #[serde(default)]
    pub no_report: bool,

    /// Probe a server once before adding it to the registry
    #[serde(default = "default_verify_on_add")]
    pub verify_on_add: bool,

    /// Explicit log level override
    #[serde(default)]
    pub log_level: Option<LogLevel>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            duration_secs: default_duration_secs(),
            interval_secs: default_interval_secs(),
            timeout_secs: default_timeout_secs(),
            data_dir: default_data_dir(),
            use_color: default_use_color(),
            verbose: false,
            debug: false,
            no_report: false,
            verify_on_add: default_verify_on_add(),
            log_level: None,
        }
    }
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Result<()> {
        if self.duration_secs == 0 {
            return Err(AppError::config("Run duration must be greater than 0"));
        }
        if self.duration_secs > crate::defaults::MAX_RUN_DURATION_SECS {
            return Err(AppError::config(format!(
                "Run duration cannot exceed {} seconds",
                crate::defaults::MAX_RUN_DURATION_SECS
            )));
        }

        if !self.interval_secs.is_finite() || self.interval_secs <= 0.0 {
            return Err(AppError::config(
                "Probe interval must be a positive number of seconds",
            ));
        }

        if !self.timeout_secs.is_finite() || self.timeout_secs <= 0.0 {
            return Err(AppError::config(
                "Probe timeout must be a positive number of seconds",
            ));
        }
        if self.timeout_secs > crate::defaults::MAX_PROBE_TIMEOUT_SECS {
            return Err(AppError::config(format!(
                "Probe timeout cannot exceed {} seconds",
                crate::defaults::MAX_PROBE_TIMEOUT_SECS
            )));
        }

        if self.data_dir.as_os_str().is_empty() {
            return Err(AppError::config("Data directory cannot be empty"));
        }

        Ok(())
    }

    /// Non-fatal observations about unusual but valid settings
    pub fn validation_warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.interval_secs < 0.1 {
            warnings.push(format!(
                "Interval of {}s probes very aggressively; some hosts rate-limit ICMP",
                self.interval_secs
            ));
        }
        if self.timeout_secs > self.interval_secs {
            warnings.push(format!(
                "Timeout ({}s) exceeds the interval ({}s); a timed-out probe delays the next tick",
                self.timeout_secs, self.interval_secs
            ));
        }
        if (self.duration_secs as f64) < self.interval_secs {
            warnings.push(format!(
                "Duration ({}s) is shorter than the interval ({}s); no probes will be sent",
                self.duration_secs, self.interval_secs
            ));
        }

        warnings
    }

    /// Convert to the timing parameters the run controller consumes
    pub fn to_run_config(&self) -> Result<RunConfig> {
        let interval = Duration::try_from_secs_f64(self.interval_secs)
            .map_err(|e| AppError::config(format!("Invalid probe interval: {}", e)))?;
        let timeout = Duration::try_from_secs_f64(self.timeout_secs)
            .map_err(|e| AppError::config(format!("Invalid probe timeout: {}", e)))?;

        Ok(RunConfig::new(
            Duration::from_secs(self.duration_secs),
            interval,
            timeout,
        ))
    }

    /// Merge environment variables into this configuration
    pub fn merge_from_env(&mut self) -> Result<()> {
        if let Ok(duration) = std::env::var("PINGMON_DURATION") {
            self.duration_secs = duration.parse().map_err(|e| {
                AppError::config(format!(
                    "Invalid PINGMON_DURATION value '{}': {}",
                    duration, e
                ))
            })?;
        }

        if let Ok(interval) = std::env::var("PINGMON_INTERVAL") {
            self.interval_secs = interval.parse().map_err(|e| {
                AppError::config(format!(
                    "Invalid PINGMON_INTERVAL value '{}': {}",
                    interval, e
                ))
            })?;
        }

        if let Ok(timeout) = std::env::var("PINGMON_TIMEOUT") {
            self.timeout_secs = timeout.parse().map_err(|e| {
                AppError::config(format!("Invalid PINGMON_TIMEOUT value '{}': {}", timeout, e))
            })?;
        }

        if let Ok(data_dir) = std::env::var("PINGMON_DATA_DIR") {
            self.data_dir = PathBuf::from(data_dir);
        }

        if let Ok(use_color) = std::env::var("PINGMON_COLOR") {
            self.use_color = use_color.parse().map_err(|e| {
                AppError::config(format!("Invalid PINGMON_COLOR value '{}': {}", use_color, e))
            })?;
        }

        if let Ok(level) = std::env::var("PINGMON_LOG_LEVEL") {
            self.log_level = Some(LogLevel::from_str(&level).map_err(|_| {
                AppError::config(format!("Invalid PINGMON_LOG_LEVEL value: {}", level))
            })?);
        }

        Ok(())
    }
}

// Default value functions for serde
fn default_duration_secs() -> u64 {
    crate::defaults::DEFAULT_DURATION.as_secs()
}

fn default_interval_secs() -> f64 {
    crate::defaults::DEFAULT_INTERVAL.as_secs_f64()
}

fn default_timeout_secs() -> f64 {
    crate::defaults::DEFAULT_TIMEOUT.as_secs_f64()
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(crate::defaults::DEFAULT_DATA_DIR)
}

fn default_use_color() -> bool {
    crate::defaults::DEFAULT_USE_COLOR
}

fn default_verify_on_add() -> bool {
    true
}

/// Configuration parser that combines CLI arguments with environment variables
pub struct ConfigParser {
    cli: Cli,
}

impl ConfigParser {
    /// Create a new configuration parser with CLI arguments
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Parse and build the complete configuration
    pub fn parse(&self) -> Result<Config> {
        let mut config = Config::default();

        // Load from environment file if it exists
        self.load_env_file()?;

        // Merge environment variables into config
        config.merge_from_env()?;

        // Override with CLI arguments
        self.apply_cli_overrides(&mut config);

        // Validate the final configuration
        config.validate()?;

        Ok(config)
    }

    /// Load .env file if it exists
    fn load_env_file(&self) -> Result<()> {
        EnvManager::load_env_file(self.cli.debug)
    }

    /// Apply CLI argument overrides to configuration
    fn apply_cli_overrides(&self, config: &mut Config) {
        if let Some(duration) = self.cli.duration {
            config.duration_secs = duration;
        }
        if let Some(interval) = self.cli.interval {
            config.interval_secs = interval;
        }
        if let Some(timeout) = self.cli.timeout {
            config.timeout_secs = timeout;
        }
        if let Some(ref data_dir) = self.cli.data_dir {
            config.data_dir = data_dir.clone();
        }

        if self.cli.no_color {
            config.use_color = false;
        }
        if self.cli.no_report {
            config.no_report = true;
        }
        if self.cli.no_verify {
            config.verify_on_add = false;
        }

        // CLI-only flags
        config.verbose = self.cli.verbose;
        config.debug = self.cli.debug;

        if config.debug {
            println!("Applied CLI overrides to configuration");
            println!(
                "Final config: duration={}s, interval={}s, timeout={}s",
                config.duration_secs, config.interval_secs, config.timeout_secs
            );
        }
    }
}

/// Convenience function to load complete configuration from CLI arguments
pub fn load_config(cli: Cli) -> Result<Config> {
    let parser = ConfigParser::new(cli);
    parser.parse()
}

/// Display configuration summary for debug purposes
pub fn display_config_summary(config: &Config) -> String {
    let mut summary = Vec::new();

    summary.push(format!("Duration: {}s", config.duration_secs));
    summary.push(format!("Interval: {}s", config.interval_secs));
    summary.push(format!("Timeout: {}s", config.timeout_secs));
    summary.push(format!("Data Dir: {}", config.data_dir.display()));
    summary.push(format!("Color Output: {}", config.use_color));
    summary.push(format!("Verbose: {}", config.verbose));
    summary.push(format!("Debug: {}", config.debug));
    summary.push(format!("Write Report: {}", !config.no_report));

    summary.join("\n")
}
