//! Environment variable handling and .env file management

use crate::error::{AppError, Result};
use crate::logging::LogLevel;
use std::path::Path;
use std::str::FromStr;

/// Environment variable configuration manager
pub struct EnvManager;

impl EnvManager {
    /// Load .env file if it exists
    pub fn load_env_file(debug: bool) -> Result<()> {
        if Path::new(".env").exists() {
            dotenv::from_filename(".env")
                .map_err(|e| AppError::config(format!("Failed to load .env file: {}", e)))?;

            if debug {
                println!("Loaded configuration from .env file");
            }
        } else if debug {
            println!("No .env file found, using defaults and CLI arguments");
        }

        Ok(())
    }

    /// Create example .env file content
    pub fn create_example_env_content() -> String {
        r#"# Ping Monitor Configuration
#
# Values specified here act as defaults and can be overridden by
# command-line arguments.

# Run duration in seconds
# PINGMON_DURATION=60

# Gap between probes in seconds (fractional values allowed)
# PINGMON_INTERVAL=1.0

# Per-probe reply timeout in seconds
# PINGMON_TIMEOUT=2.0

# Directory holding the server registry and exported reports
# PINGMON_DATA_DIR=.

# Enable colored output (true/false)
# PINGMON_COLOR=true

# Log verbosity: trace, debug, info, warn or error
# PINGMON_LOG_LEVEL=warn

# Example configurations:
#
# Quick connectivity check:
# PINGMON_DURATION=10
# PINGMON_INTERVAL=0.5
#
# Long overnight watch with patient timeouts:
# PINGMON_DURATION=28800
# PINGMON_INTERVAL=5
# PINGMON_TIMEOUT=4
"#
        .to_string()
    }

    /// Save example .env file to disk
    pub fn save_example_env_file(path: &Path) -> Result<()> {
        use std::fs;

        let content = Self::create_example_env_content();
        fs::write(path, content)
            .map_err(|e| AppError::config(format!("Failed to write example .env file: {}", e)))?;

        Ok(())
    }

    /// Validate one environment variable value before it is applied
    pub fn validate_env_var(key: &str, value: &str) -> Result<()> {
        match key {
            "PINGMON_DURATION" => {
                let duration: u64 = value.parse().map_err(|e| {
                    AppError::config(format!("Invalid PINGMON_DURATION value '{}': {}", value, e))
                })?;
                if duration == 0 || duration > crate::defaults::MAX_RUN_DURATION_SECS {
                    return Err(AppError::config(format!(
                        "PINGMON_DURATION must be between 1 and {}, got: {}",
                        crate::defaults::MAX_RUN_DURATION_SECS,
                        duration
                    )));
                }
            }
            "PINGMON_INTERVAL" => {
                let interval: f64 = value.parse().map_err(|e| {
                    AppError::config(format!("Invalid PINGMON_INTERVAL value '{}': {}", value, e))
                })?;
                if !interval.is_finite() || interval <= 0.0 {
                    return Err(AppError::config(format!(
                        "PINGMON_INTERVAL must be a positive number of seconds, got: {}",
                        value
                    )));
                }
            }
            "PINGMON_TIMEOUT" => {
                let timeout: f64 = value.parse().map_err(|e| {
                    AppError::config(format!("Invalid PINGMON_TIMEOUT value '{}': {}", value, e))
                })?;
                if !timeout.is_finite()
                    || timeout <= 0.0
                    || timeout > crate::defaults::MAX_PROBE_TIMEOUT_SECS
                {
                    return Err(AppError::config(format!(
                        "PINGMON_TIMEOUT must be between 0 and {} seconds, got: {}",
                        crate::defaults::MAX_PROBE_TIMEOUT_SECS,
                        value
                    )));
                }
            }
            "PINGMON_DATA_DIR" => {
                if value.trim().is_empty() {
                    return Err(AppError::config("PINGMON_DATA_DIR cannot be empty"));
                }
            }
            "PINGMON_COLOR" => {
                value.parse::<bool>().map_err(|e| {
                    AppError::config(format!("Invalid PINGMON_COLOR value '{}': {}", value, e))
                })?;
            }
            "PINGMON_LOG_LEVEL" => {
                LogLevel::from_str(value).map_err(|_| {
                    AppError::config(format!("Invalid PINGMON_LOG_LEVEL value: {}", value))
                })?;
            }
            _ => {
                // Unknown environment variable, ignore
            }
        }

        Ok(())
    }

    /// List of all supported environment variables with descriptions
    pub fn get_supported_env_vars() -> Vec<(&'static str, &'static str, &'static str)> {
        vec![
            ("PINGMON_DURATION", "Run duration in seconds", "60"),
            (
                "PINGMON_INTERVAL",
                "Gap between probes in seconds",
                "1.0",
            ),
            (
                "PINGMON_TIMEOUT",
                "Per-probe reply timeout in seconds",
                "2.0",
            ),
            (
                "PINGMON_DATA_DIR",
                "Directory for the server registry and reports",
                ".",
            ),
            ("PINGMON_COLOR", "Enable colored output", "true"),
            (
                "PINGMON_LOG_LEVEL",
                "Log verbosity (trace/debug/info/warn/error)",
                "warn",
            ),
        ]
    }

    /// Display environment variable help
    pub fn display_env_help() -> String {
        let mut help = String::new();
        help.push_str("Supported Environment Variables:\n\n");

        for (var, description, example) in Self::get_supported_env_vars() {
            help.push_str(&format!("  {:<20} {}\n", var, description));
            help.push_str(&format!("  {:<20} Example: {}\n\n", "", example));
        }

        help.push_str("Configuration Priority (highest to lowest):\n");
        help.push_str("  1. Command-line arguments\n");
        help.push_str("  2. Environment variables\n");
        help.push_str("  3. .env file values\n");
        help.push_str("  4. Default values\n");

        help
    }

    /// Validate all currently set environment variables
    pub fn validate_current_env() -> Result<Vec<String>> {
        let mut warnings = Vec::new();

        for (var_name, _, _) in Self::get_supported_env_vars() {
            if let Ok(value) = std::env::var(var_name) {
                if let Err(e) = Self::validate_env_var(var_name, &value) {
                    warnings.push(format!("Warning: {}", e));
                }
            }
        }

        Ok(warnings)
    }

    /// Check if .env file exists and validate its contents
    pub fn check_env_file() -> Result<Option<Vec<String>>> {
        if !Path::new(".env").exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(".env")
            .map_err(|e| AppError::config(format!("Failed to read .env file: {}", e)))?;

        let mut warnings = Vec::new();

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some((key, value)) = line.split_once('=') {
                let key = key.trim();
                let value = value.trim();

                if let Err(e) = Self::validate_env_var(key, value) {
                    warnings.push(format!("Line '{}': {}", line, e));
                }
            }
        }

        Ok(Some(warnings))
    }
}
