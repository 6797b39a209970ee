//! Ping output parsing
//!
//! Extracts a round-trip time from the textual output of the native ping
//! command. The platform is always an explicit input so the parser stays a
//! pure function testable against fixed fixtures; nothing here sniffs the
//! host OS from the text.
//!
//! Any output that does not carry a recognizable round-trip time — request
//! timed out, destination unreachable, localized or otherwise unparseable
//! text — yields `None`. Probing is best-effort, so an unrecognized quirk
//! degrades to a failed sample rather than an error.

use crate::probe::Platform;
use regex::Regex;
use std::time::Duration;

/// Parse one probe's raw output into a round-trip time
pub fn parse_latency(raw_output: &str, platform: Platform) -> Option<Duration> {
    match platform {
        Platform::Windows => parse_windows(raw_output),
        Platform::Unix => parse_unix(raw_output),
    }
}

/// Windows reply lines carry integer milliseconds: `time=23ms`, or `time<1ms`
/// for sub-millisecond replies (treated as 1ms). When no reply line matches,
/// the summary line `Average = 23ms` is accepted as a fallback.
fn parse_windows(output: &str) -> Option<Duration> {
    if let Some(captures) = Regex::new(r"(?i)time[=<](\d+)\s*ms")
        .ok()?
        .captures(output)
    {
        return Some(Duration::from_millis(captures[1].parse().ok()?));
    }

    if let Some(captures) = Regex::new(r"(?i)Average\s*=\s*(\d+)\s*ms")
        .ok()?
        .captures(output)
    {
        return Some(Duration::from_millis(captures[1].parse().ok()?));
    }

    None
}

/// Linux and macOS reply lines carry fractional milliseconds: `time=23.4 ms`
fn parse_unix(output: &str) -> Option<Duration> {
    let captures = Regex::new(r"time=(\d+\.?\d*)\s*ms").ok()?.captures(output)?;
    let ms: f64 = captures[1].parse().ok()?;
    Duration::try_from_secs_f64(ms / 1000.0).ok()
}
