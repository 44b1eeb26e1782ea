//! Sequential smoke-test runner.

use std::time::{Duration, Instant};

use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::config::{Config, SMOKE_CONNECT_TIMEOUT};
use crate::error::{ProbeError, SelfCheckError};
use crate::metrics;

use super::probe::{default_probes, Probe};
use super::report::{ProbeOutcome, ProbeResult, SmokeReport};

/// Smoke runner settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmokeConfig {
    /// Base URL of the service under test, without a trailing path.
    pub base_url: String,
    /// Delay before the first probe.
    pub startup_delay: Duration,
    /// Per-request timeout.
    pub request_timeout: Duration,
}

impl SmokeConfig {
    /// Derive runner settings from the application config.
    pub fn from_config(config: &Config) -> Self {
        Self {
            base_url: config.smoke_base_url.clone(),
            startup_delay: config.startup_delay(),
            request_timeout: config.request_timeout(),
        }
    }
}

/// Issues the probe sequence against a target service.
#[derive(Debug, Clone)]
pub struct SmokeRunner {
    http: reqwest::Client,
    config: SmokeConfig,
    probes: Vec<Probe>,
}

impl SmokeRunner {
    /// Create a runner with the default probe sequence.
    pub fn new(config: SmokeConfig) -> Result<Self, SelfCheckError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(SMOKE_CONNECT_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            config,
            probes: default_probes(),
        })
    }

    /// Replace the probe sequence.
    pub fn with_probes(mut self, probes: Vec<Probe>) -> Self {
        self.probes = probes;
        self
    }

    /// Run every probe and collect the results.
    pub async fn run(&self) -> SmokeReport {
        self.run_with(|_| {}).await
    }

    /// Run every probe, handing each result to `on_result` as soon as it is known.
    pub async fn run_with<F>(&self, mut on_result: F) -> SmokeReport
    where
        F: FnMut(&ProbeResult),
    {
        if !self.config.startup_delay.is_zero() {
            debug!(delay = ?self.config.startup_delay, "waiting for target to start");
            tokio::time::sleep(self.config.startup_delay).await;
        }

        let mut report = SmokeReport::default();
        for probe in &self.probes {
            let result = self.probe(probe).await;
            on_result(&result);
            report.results.push(result);
        }

        info!(
            passed = report.passed(),
            failed = report.failed(),
            "smoke test finished"
        );
        report
    }

    /// Issue a single probe. Never fails; errors become a failed outcome.
    #[instrument(skip(self, probe), fields(path = %probe.path))]
    pub async fn probe(&self, probe: &Probe) -> ProbeResult {
        let start = Instant::now();

        let outcome = match self.fetch(probe).await {
            Ok((status, summary)) => {
                info!(status, %summary, "probe passed");
                ProbeOutcome::Passed { status, summary }
            }
            Err(err) => {
                warn!(error = %err, "probe failed");
                ProbeOutcome::Failed(err)
            }
        };

        let result = ProbeResult {
            path: probe.path.clone(),
            outcome,
            elapsed: start.elapsed(),
        };
        metrics::record_probe(start, &result.path, result.passed());
        result
    }

    async fn fetch(&self, probe: &Probe) -> Result<(u16, String), ProbeError> {
        let url = self.url_for(&probe.path);
        let response = self.http.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProbeError::Status {
                status: status.as_u16(),
            });
        }

        let body: Value = response.json().await?;
        let summary = probe.summarize(&body)?;
        Ok((status.as_u16(), summary))
    }

    fn url_for(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_for(base_url: &str) -> SmokeConfig {
        SmokeConfig {
            base_url: base_url.to_string(),
            startup_delay: Duration::ZERO,
            request_timeout: Duration::from_secs(2),
        }
    }

    fn unused_port() -> u16 {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    }

    #[test]
    fn url_for_joins_without_double_slash() {
        let runner = SmokeRunner::new(config_for("http://localhost:5000/")).unwrap();
        assert_eq!(runner.url_for("/api/health"), "http://localhost:5000/api/health");
        assert_eq!(runner.url_for("health"), "http://localhost:5000/health");
    }

    #[test]
    fn from_config_copies_timing() {
        let config = Config {
            smoke_startup_delay_ms: 250,
            smoke_timeout_ms: 750,
            ..Config::default()
        };
        let smoke = SmokeConfig::from_config(&config);
        assert_eq!(smoke.startup_delay, Duration::from_millis(250));
        assert_eq!(smoke.request_timeout, Duration::from_millis(750));
    }

    #[tokio::test]
    async fn unreachable_target_fails_every_probe() {
        let base = format!("http://127.0.0.1:{}", unused_port());
        let runner = SmokeRunner::new(config_for(&base)).unwrap();

        let mut seen = Vec::new();
        let report = runner.run_with(|r| seen.push(r.to_string())).await;

        assert_eq!(report.results.len(), 3);
        assert_eq!(report.failed(), 3);
        assert!(report
            .results
            .iter()
            .all(|r| matches!(r.outcome, ProbeOutcome::Failed(ProbeError::Unreachable(_)))));
        assert_eq!(seen.len(), 3);
        assert!(seen.iter().all(|line| line.starts_with("❌")));
    }

    #[tokio::test]
    async fn startup_delay_is_honored() {
        let base = format!("http://127.0.0.1:{}", unused_port());
        let config = SmokeConfig {
            startup_delay: Duration::from_millis(50),
            ..config_for(&base)
        };
        let runner = SmokeRunner::new(config).unwrap().with_probes(Vec::new());

        let start = Instant::now();
        let report = runner.run().await;

        assert!(start.elapsed() >= Duration::from_millis(50));
        assert!(report.results.is_empty());
    }
}
