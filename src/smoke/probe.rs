//! Probe descriptors and response shape checks.

use serde_json::Value;

use crate::error::ProbeError;

/// Longest body excerpt shown for a plain JSON probe.
const SUMMARY_MAX_CHARS: usize = 80;

/// What a probe expects the response body to look like.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expectation {
    /// Any JSON document.
    Json,
    /// A JSON array, either at the top level or under `key`.
    Collection {
        /// Name of the array field in an object body.
        key: String,
    },
}

/// One GET request issued by the smoke runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Probe {
    /// Request path, starting with `/`.
    pub path: String,
    /// Expected body shape.
    pub expectation: Expectation,
}

impl Probe {
    /// Probe expecting any JSON body.
    pub fn json(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            expectation: Expectation::Json,
        }
    }

    /// Probe expecting a named collection.
    pub fn collection(path: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            expectation: Expectation::Collection { key: key.into() },
        }
    }

    /// Summarize a parsed body according to the expectation.
    pub fn summarize(&self, body: &Value) -> Result<String, ProbeError> {
        match &self.expectation {
            Expectation::Json => Ok(excerpt(body)),
            Expectation::Collection { key } => {
                let items = match body {
                    Value::Array(items) => items,
                    Value::Object(map) => map
                        .get(key)
                        .and_then(Value::as_array)
                        .ok_or_else(|| {
                            ProbeError::Parse(format!("expected an array field `{key}`"))
                        })?,
                    _ => {
                        return Err(ProbeError::Parse(format!(
                            "expected an object with `{key}` or an array"
                        )))
                    }
                };
                Ok(format!("{} {}", items.len(), key))
            }
        }
    }
}

/// The fixed probe sequence: plain health, API health, then the posts listing.
pub fn default_probes() -> Vec<Probe> {
    vec![
        Probe::json("/health"),
        Probe::json("/api/health"),
        Probe::collection("/api/posts", "posts"),
    ]
}

fn excerpt(body: &Value) -> String {
    let rendered = body.to_string();
    if rendered.chars().count() <= SUMMARY_MAX_CHARS {
        rendered
    } else {
        let mut short: String = rendered.chars().take(SUMMARY_MAX_CHARS).collect();
        short.push('…');
        short
    }
}
