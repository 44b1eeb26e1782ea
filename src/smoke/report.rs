//! Per-probe outcomes and the aggregated run report.

use std::fmt;
use std::time::Duration;

use crate::error::ProbeError;

/// Line printed once every probe has run.
pub const COMPLETION_MARKER: &str = "Smoke test complete";

/// Result of a single probe.
#[derive(Debug)]
pub enum ProbeOutcome {
    /// The endpoint answered with a success status and the expected shape.
    Passed {
        /// HTTP status code.
        status: u16,
        /// Shape-specific summary of the body.
        summary: String,
    },
    /// The request or the body check failed.
    Failed(ProbeError),
}

/// A probe's path together with its outcome.
#[derive(Debug)]
pub struct ProbeResult {
    /// Requested path.
    pub path: String,
    /// What happened.
    pub outcome: ProbeOutcome,
    /// Round-trip time.
    pub elapsed: Duration,
}

impl ProbeResult {
    /// Whether the probe passed.
    pub fn passed(&self) -> bool {
        matches!(self.outcome, ProbeOutcome::Passed { .. })
    }
}

impl fmt::Display for ProbeResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            ProbeOutcome::Passed { status, summary } => {
                write!(f, "✅ {} -> {} ({})", self.path, status, summary)
            }
            ProbeOutcome::Failed(err) => write!(f, "❌ {} failed: {}", self.path, err),
        }
    }
}

/// Ordered results of one smoke run.
#[derive(Debug, Default)]
pub struct SmokeReport {
    /// One entry per probe, in execution order.
    pub results: Vec<ProbeResult>,
}

impl SmokeReport {
    /// Number of passed probes.
    pub fn passed(&self) -> usize {
        self.results.iter().filter(|r| r.passed()).count()
    }

    /// Number of failed probes.
    pub fn failed(&self) -> usize {
        self.results.len() - self.passed()
    }

    /// Whether every probe passed.
    pub fn all_passed(&self) -> bool {
        self.failed() == 0
    }

    /// Rendered lines, one per probe, followed by the completion marker.
    pub fn lines(&self) -> Vec<String> {
        self.results
            .iter()
            .map(ToString::to_string)
            .chain(std::iter::once(COMPLETION_MARKER.to_string()))
            .collect()
    }
}
