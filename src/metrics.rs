//! Metrics for status requests and smoke-test probes.
//!
//! Recorded through the `metrics` facade; values are dropped unless a
//! recorder is installed by the embedding process.

use std::time::Instant;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use tracing::debug;

// === Metric Name Constants ===

/// Status endpoint requests counter metric name.
pub const METRIC_STATUS_REQUESTS: &str = "status_requests_total";
/// Passed probes counter metric name.
pub const METRIC_PROBES_PASSED: &str = "probes_passed_total";
/// Failed probes counter metric name.
pub const METRIC_PROBES_FAILED: &str = "probes_failed_total";
/// Probe latency metric name.
pub const METRIC_PROBE_LATENCY: &str = "probe_latency_ms";

/// Initialize all metric descriptions.
/// Call this once at startup to register metrics with descriptions.
pub fn init_metrics() {
    describe_counter!(
        METRIC_STATUS_REQUESTS,
        "Total number of status and capability requests served"
    );
    describe_counter!(METRIC_PROBES_PASSED, "Total number of smoke probes that passed");
    describe_counter!(METRIC_PROBES_FAILED, "Total number of smoke probes that failed");
    describe_histogram!(
        METRIC_PROBE_LATENCY,
        "Smoke probe round-trip latency in milliseconds"
    );

    debug!("Metrics initialized");
}

/// Increment the status request counter for an endpoint.
pub fn inc_status_requests(endpoint: &'static str) {
    counter!(METRIC_STATUS_REQUESTS, "endpoint" => endpoint).increment(1);
}

/// Record a probe result and its latency.
pub fn record_probe(start: Instant, path: &str, passed: bool) {
    let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
    histogram!(METRIC_PROBE_LATENCY, "path" => path.to_string()).record(latency_ms);

    if passed {
        counter!(METRIC_PROBES_PASSED).increment(1);
    } else {
        counter!(METRIC_PROBES_FAILED).increment(1);
    }
}
