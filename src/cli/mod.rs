//! Command-line interface definition and argument validation

use crate::error::Result;
use crate::models::Target;
use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Version line shown by `--version`, carrying build metadata from build.rs
pub const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("GIT_COMMIT"),
    ", built ",
    env!("BUILD_TIME"),
    ")"
);

/// Ping Monitor - measures round-trip latency to named servers
#[derive(Parser, Debug, Clone)]
#[command(name = "pingmon")]
#[command(version, long_version = LONG_VERSION, about, long_about = None)]
pub struct Cli {
    /// Target to ping as NAME=ADDR or a bare address (repeatable)
    #[arg(short = 't', long = "target", value_name = "TARGET", action = ArgAction::Append)]
    pub targets: Vec<String>,

    /// Ping every server in the registry, one after another
    #[arg(long)]
    pub all: bool,

    /// Add a server to the registry (NAME=ADDR)
    #[arg(long, value_name = "NAME=ADDR")]
    pub add: Option<String>,

    /// Remove a server from the registry by name
    #[arg(long, value_name = "NAME")]
    pub remove: Option<String>,

    /// List the registry and exit
    #[arg(long)]
    pub list: bool,

    /// Run length in seconds
    #[arg(short = 'd', long, value_name = "SECS", value_parser = parse_run_duration)]
    pub duration: Option<u64>,

    /// Gap between probes in seconds (fractional values accepted)
    #[arg(short = 'i', long, value_name = "SECS", value_parser = parse_seconds)]
    pub interval: Option<f64>,

    /// Per-probe reply timeout in seconds
    #[arg(long, value_name = "SECS", value_parser = parse_seconds)]
    pub timeout: Option<f64>,

    /// Base directory for the registry and reports
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Skip writing the report file after a batch
    #[arg(long)]
    pub no_report: bool,

    /// Skip the live probe check when adding a server
    #[arg(long, requires = "add")]
    pub no_verify: bool,

    /// Enable verbose output
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Enable debug output
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Validate CLI arguments for conflicts and requirements
    pub fn validate(&self) -> std::result::Result<(), String> {
        let registry_ops =
            [self.add.is_some(), self.remove.is_some(), self.list].iter().filter(|&&v| v).count();

        if registry_ops > 1 {
            return Err("Only one of --add, --remove, --list may be given".to_string());
        }

        if registry_ops > 0 && (self.all || !self.targets.is_empty()) {
            return Err(
                "Registry management (--add/--remove/--list) cannot be combined with a run"
                    .to_string(),
            );
        }

        if self.all && !self.targets.is_empty() {
            return Err("Cannot combine --target with --all".to_string());
        }

        for spec in &self.targets {
            if let Err(e) = spec.parse::<Target>() {
                return Err(format!("Invalid --target value '{}': {}", spec, e));
            }
        }

        if let Some(spec) = &self.add {
            if let Err(e) = spec.parse::<Target>() {
                return Err(format!("Invalid --add value '{}': {}", spec, e));
            }
        }

        if let Some(name) = &self.remove {
            if name.trim().is_empty() {
                return Err("--remove requires a server name".to_string());
            }
        }

        Ok(())
    }

    /// Whether the invocation manages the registry instead of running probes
    pub fn is_registry_mode(&self) -> bool {
        self.add.is_some() || self.remove.is_some() || self.list
    }

    /// Whether the invocation probes exactly one explicitly-given target
    ///
    /// `--all` and registry-default invocations are batches even when the
    /// registry happens to hold a single server.
    pub fn is_single_run(&self) -> bool {
        !self.all && self.targets.len() == 1
    }

    /// Explicit CLI targets parsed into their structured form
    pub fn parsed_targets(&self) -> Result<Vec<Target>> {
        self.targets.iter().map(|spec| spec.parse()).collect()
    }

    /// The `--add` argument parsed into its structured form, if present
    pub fn parsed_add(&self) -> Result<Option<Target>> {
        self.add.as_deref().map(str::parse).transpose()
    }
}

/// Parse a run duration given in whole seconds
fn parse_run_duration(s: &str) -> std::result::Result<u64, String> {
    if s.starts_with('+') || s.starts_with("0x") || s.starts_with("0X") {
        return Err(format!("Invalid duration: {}", s));
    }

    s.parse::<u64>()
        .map_err(|_| format!("Invalid duration: {}", s))
        .and_then(|secs| {
            if secs == 0 {
                Err("Duration must be greater than 0".to_string())
            } else if secs > crate::defaults::MAX_RUN_DURATION_SECS {
                Err(format!(
                    "Duration cannot exceed {} seconds",
                    crate::defaults::MAX_RUN_DURATION_SECS
                ))
            } else {
                Ok(secs)
            }
        })
}

/// Parse a positive seconds value that may be fractional
fn parse_seconds(s: &str) -> std::result::Result<f64, String> {
    s.parse::<f64>()
        .map_err(|_| format!("Invalid seconds value: {}", s))
        .and_then(|secs| {
            if !secs.is_finite() || secs <= 0.0 {
                Err("Value must be a positive number of seconds".to_string())
            } else {
                Ok(secs)
            }
        })
}
