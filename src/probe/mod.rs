//! Probe execution engine
//!
//! This module contains the single-probe execution components:
//! - `ProbeExecutor` trait, the seam between the run loop and the operating
//!   system (and the hook for scripted executors in tests)
//! - `SystemPingExecutor`, which spawns the native ping command for exactly
//!   one echo request and parses its output
//! - Platform command profiles and the output parser

pub mod parser;
pub mod platform;

pub use parser::parse_latency;
pub use platform::Platform;

use crate::error::{AppError, Result};
use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

/// Extra wait beyond the probe timeout before force-killing a hung ping process
const KILL_GRACE: Duration = Duration::from_millis(500);

/// One-shot latency probe interface
///
/// `Ok(Some(rtt))` is a reply, `Ok(None)` a probe failure (timeout,
/// unreachable host, unparseable output), and `Err` an invocation error —
/// the probe could not be issued at all. Probe failures are normal data,
/// never errors.
#[async_trait]
pub trait ProbeExecutor: Send + Sync {
    /// Probe `address` once, waiting at most `timeout` for a reply
    async fn probe(&self, address: &str, timeout: Duration) -> Result<Option<Duration>>;
}

/// Probe executor backed by the operating system's ping command
///
/// Each call spawns one short-lived ping process requesting a single echo
/// reply. The process's own timeout flag bounds the reply wait; a hard
/// outer bound reaps the process if the binary itself hangs.
#[derive(Debug, Clone)]
pub struct SystemPingExecutor {
    platform: Platform,
}

impl SystemPingExecutor {
    /// Create an executor for the build target's platform
    pub fn new() -> Self {
        Self {
            platform: Platform::current(),
        }
    }

    /// Create an executor with an explicit platform profile
    pub fn with_platform(platform: Platform) -> Self {
        Self { platform }
    }

    /// The platform profile in use
    pub fn platform(&self) -> Platform {
        self.platform
    }
}

impl Default for SystemPingExecutor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProbeExecutor for SystemPingExecutor {
    async fn probe(&self, address: &str, timeout: Duration) -> Result<Option<Duration>> {
        if address.trim().is_empty() {
            return Err(AppError::validation("probe address must not be empty"));
        }

        let mut command = Command::new(self.platform.ping_program());
        command
            .args(self.platform.ping_args(address, timeout))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true);

        let child = command.spawn().map_err(|e| {
            AppError::probe(format!(
                "failed to spawn {}: {}",
                self.platform.ping_program(),
                e
            ))
        })?;

        // ping's own -w/-W flag is the real reply timeout; the outer bound
        // only reaps a binary that hangs past it
        let output = match tokio::time::timeout(timeout + KILL_GRACE, child.wait_with_output()).await
        {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                return Err(AppError::probe(format!(
                    "failed to collect ping output: {}",
                    e
                )))
            }
            // hung process, killed on drop; counts as a failed probe
            Err(_) => return Ok(None),
        };

        // Non-zero exit covers timeouts and most unreachable-host cases
        if !output.status.success() {
            return Ok(None);
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(parse_latency(&stdout, self.platform))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_rejects_empty_address() {
        let executor = SystemPingExecutor::new();
        let result = tokio_test::block_on(executor.probe("", Duration::from_secs(1)));
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_probe_rejects_blank_address() {
        let executor = SystemPingExecutor::new();
        let result = tokio_test::block_on(executor.probe("   ", Duration::from_secs(1)));
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_executor_platform_selection() {
        let default_executor = SystemPingExecutor::default();
        assert_eq!(default_executor.platform(), Platform::current());

        let windows_executor = SystemPingExecutor::with_platform(Platform::Windows);
        assert_eq!(windows_executor.platform(), Platform::Windows);
    }
}
