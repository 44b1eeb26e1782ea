//! Smoke-test harness.
//!
//! This module handles:
//! - Probe descriptors and body shape checks
//! - Sequential probe execution with a startup delay
//! - Per-probe outcomes aggregated into a report

pub mod probe;
pub mod report;
pub mod runner;

pub use probe::{default_probes, Expectation, Probe};
pub use report::{ProbeOutcome, ProbeResult, SmokeReport, COMPLETION_MARKER};
pub use runner::{SmokeConfig, SmokeRunner};
