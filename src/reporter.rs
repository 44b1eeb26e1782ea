//! Builds status and capability reports.

use time::OffsetDateTime;
use tracing::debug;

use crate::config::{Config, DEFAULT_ENVIRONMENT};
use crate::report::{AuthCapabilities, AuthEndpoints, CapabilityReport, StatusReport};

const STATUS_MESSAGE: &str = "Server is running";
const CAPABILITY_MESSAGE: &str = "Auth endpoints status";

/// Settings the reporter needs, passed in at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReporterConfig {
    /// Deployment environment label.
    pub environment: String,
}

impl ReporterConfig {
    /// Derive reporter settings from the application config.
    pub fn from_config(config: &Config) -> Self {
        Self {
            environment: config.environment().to_string(),
        }
    }
}

impl Default for ReporterConfig {
    fn default() -> Self {
        Self {
            environment: DEFAULT_ENVIRONMENT.to_string(),
        }
    }
}

/// Answers status and capability queries.
#[derive(Debug, Clone)]
pub struct StatusReporter {
    environment: String,
}

impl StatusReporter {
    /// Create a reporter. A blank environment label becomes the default.
    pub fn new(config: ReporterConfig) -> Self {
        let environment = match config.environment.trim() {
            "" => DEFAULT_ENVIRONMENT.to_string(),
            env => env.to_string(),
        };
        Self { environment }
    }

    /// Environment label reported by [`status`](Self::status).
    pub fn environment(&self) -> &str {
        &self.environment
    }

    /// Status report stamped with the current time.
    pub fn status(&self) -> StatusReport {
        self.status_at(OffsetDateTime::now_utc())
    }

    /// Status report stamped with `now`.
    pub fn status_at(&self, now: OffsetDateTime) -> StatusReport {
        debug!(environment = %self.environment, "building status report");
        StatusReport {
            success: true,
            message: STATUS_MESSAGE.to_string(),
            timestamp: now,
            environment: self.environment.clone(),
            auth_endpoints: AuthEndpoints::known(),
        }
    }

    /// Auth capability report.
    pub fn auth_capabilities(&self) -> CapabilityReport {
        CapabilityReport {
            success: true,
            message: CAPABILITY_MESSAGE.to_string(),
            endpoints: AuthCapabilities::known(),
        }
    }
}

impl Default for StatusReporter {
    fn default() -> Self {
        Self::new(ReporterConfig::default())
    }
}
