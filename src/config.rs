//! Application configuration loaded from environment variables.

use std::time::Duration;

use serde::Deserialize;
use url::Url;

use crate::error::ConfigError;

/// Environment label used when `NODE_ENV` is unset or empty.
pub const DEFAULT_ENVIRONMENT: &str = "development";

/// Variables read only by the status server; the smoke harness ignores them.
pub const SERVER_ONLY_VARS: &[&str] = &["PORT", "STATUS_ROOT"];

/// Connect timeout applied to every smoke-test request.
pub const SMOKE_CONNECT_TIMEOUT: Duration = Duration::from_secs(2);

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Status Reporter ===
    /// Environment label reported by the status endpoint.
    #[serde(default = "default_environment")]
    pub node_env: String,

    /// Path segment under `/api/` where the status routes are mounted.
    #[serde(default = "default_status_root")]
    pub status_root: String,

    // === Server Configuration ===
    /// HTTP server port.
    #[serde(default = "default_port")]
    pub port: u16,

    // === Smoke Test ===
    /// Base URL of the service under test.
    #[serde(default = "default_smoke_base_url")]
    pub smoke_base_url: String,

    /// Delay before the first probe, letting the target finish starting.
    #[serde(default = "default_startup_delay")]
    pub smoke_startup_delay_ms: u64,

    /// Per-request timeout for probes.
    #[serde(default = "default_timeout")]
    pub smoke_timeout_ms: u64,
}

fn default_environment() -> String {
    DEFAULT_ENVIRONMENT.to_string()
}

fn default_status_root() -> String {
    "test".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_smoke_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_startup_delay() -> u64 {
    2000
}

fn default_timeout() -> u64 {
    5000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            node_env: default_environment(),
            status_root: default_status_root(),
            port: default_port(),
            smoke_base_url: default_smoke_base_url(),
            smoke_startup_delay_ms: default_startup_delay(),
            smoke_timeout_ms: default_timeout(),
        }
    }
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }

    /// Load configuration for the smoke harness, reading .env file first.
    ///
    /// Server-only variables are skipped, so their defaults apply and a bad
    /// value there cannot stop a smoke run.
    pub fn load_for_smoke() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        Self::from_vars_for_smoke(std::env::vars())
    }

    /// Build a smoke-harness configuration from `(name, value)` pairs.
    pub fn from_vars_for_smoke<I>(vars: I) -> Result<Self, envy::Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter(vars.into_iter().filter(|(name, _)| {
            !SERVER_ONLY_VARS
                .iter()
                .any(|server| server.eq_ignore_ascii_case(name))
        }))
    }

    /// Check if the whole configuration is valid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_smoke()?;
        self.validate_server()
    }

    /// Check the settings the status server uses.
    pub fn validate_server(&self) -> Result<(), ConfigError> {
        if self.status_root.is_empty() || self.status_root.contains('/') {
            return Err(ConfigError::InvalidStatusRoot(self.status_root.clone()));
        }

        Ok(())
    }

    /// Check the settings the smoke harness uses.
    pub fn validate_smoke(&self) -> Result<(), ConfigError> {
        let url = Url::parse(&self.smoke_base_url).map_err(|e| ConfigError::InvalidBaseUrl {
            url: self.smoke_base_url.clone(),
            reason: e.to_string(),
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::UnsupportedScheme(url.scheme().to_string()));
        }

        if self.smoke_timeout_ms == 0 {
            return Err(ConfigError::ZeroTimeout);
        }

        Ok(())
    }

    /// Environment label, falling back to the default when blank.
    pub fn environment(&self) -> &str {
        let env = self.node_env.trim();
        if env.is_empty() {
            DEFAULT_ENVIRONMENT
        } else {
            env
        }
    }

    /// Startup delay as a [`Duration`].
    pub fn startup_delay(&self) -> Duration {
        Duration::from_millis(self.smoke_startup_delay_ms)
    }

    /// Request timeout as a [`Duration`].
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.smoke_timeout_ms)
    }
}
