//! Platform-specific probe command profiles
//!
//! Each platform variant owns the invocation flags its native ping command
//! needs for a single-echo probe. The matching output phrasing lives in the
//! parser, keyed by the same variant, so adding a platform means extending
//! this enum and its two tables.

use std::time::Duration;

/// Probe command profile for an operating system family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// Windows ping: `-n` count, `-w` timeout in milliseconds
    Windows,
    /// Unix ping as shipped on Linux and macOS: `-c` count, `-W` timeout in seconds
    Unix,
}

impl Platform {
    /// Resolve the profile for the build target
    pub fn current() -> Self {
        #[cfg(target_os = "windows")]
        {
            Self::Windows
        }
        #[cfg(not(target_os = "windows"))]
        {
            Self::Unix
        }
    }

    /// Name of the probe command to spawn
    pub fn ping_program(&self) -> &'static str {
        "ping"
    }

    /// Arguments requesting exactly one echo reply within `timeout`
    pub fn ping_args(&self, address: &str, timeout: Duration) -> Vec<String> {
        match self {
            Self::Windows => vec![
                "-n".to_string(),
                "1".to_string(),
                "-w".to_string(),
                timeout.as_millis().to_string(),
                address.to_string(),
            ],
            // -W takes whole seconds; never pass 0 for sub-second timeouts
            Self::Unix => vec![
                "-c".to_string(),
                "1".to_string(),
                "-W".to_string(),
                timeout.as_secs().max(1).to_string(),
                address.to_string(),
            ],
        }
    }

    /// Short label for logging
    pub fn label(&self) -> &'static str {
        match self {
            Self::Windows => "windows",
            Self::Unix => "unix",
        }
    }
}
