//! Data models and structures for the ping monitor

pub mod run;
pub mod target;

// Re-export main model types
pub use run::{BatchResult, RunResult, Sample, Statistics};
pub use target::Target;
