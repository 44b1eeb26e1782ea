//! Unified error types for the self-check service and smoke harness.

use thiserror::Error;

/// Unified error type for the self-check toolkit.
#[derive(Error, Debug)]
pub enum SelfCheckError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Configuration validation error.
    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    /// HTTP client error.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Configuration validation errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Smoke-test base URL could not be parsed.
    #[error("SMOKE_BASE_URL {url:?} is not a valid URL: {reason}")]
    InvalidBaseUrl {
        /// The offending URL.
        url: String,
        /// Parser message.
        reason: String,
    },

    /// Smoke-test base URL uses a scheme other than http/https.
    #[error("SMOKE_BASE_URL must use http or https, got {0:?}")]
    UnsupportedScheme(String),

    /// Status root is empty or contains a path separator.
    #[error("STATUS_ROOT must be a single non-empty path segment, got {0:?}")]
    InvalidStatusRoot(String),

    /// Request timeout is zero.
    #[error("SMOKE_TIMEOUT_MS must be greater than zero")]
    ZeroTimeout,
}

/// Failure of a single smoke-test probe.
///
/// Every variant is reported and the run moves on to the next probe.
#[derive(Error, Debug)]
pub enum ProbeError {
    /// Connection refused, DNS failure, timeout or other transport error.
    #[error("request failed: {0}")]
    Unreachable(#[source] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("unexpected HTTP status {status}")]
    Status {
        /// Status code returned.
        status: u16,
    },

    /// The body was not JSON or did not have the expected shape.
    #[error("failed to parse response: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for ProbeError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ProbeError::Parse(err.to_string())
        } else {
            ProbeError::Unreachable(err)
        }
    }
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, SelfCheckError>;
