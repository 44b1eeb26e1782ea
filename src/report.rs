//! Static status and capability payloads.
//!
//! Every path, label and status string is derived from [`AuthMode`], so the
//! status report and the capability report cannot drift apart.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoEnumIterator};
use time::OffsetDateTime;

/// Marker carried by the status string of a mode known to work.
pub const SUCCESS_INDICATOR: &str = "✅";

/// Authentication subsystems advertised by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum AuthMode {
    /// Database-free signup/login.
    #[strum(serialize = "Simple Auth (Recommended)")]
    Simple,
    /// Database-backed signup/login.
    #[strum(serialize = "Regular Auth")]
    Regular,
    /// Supabase-backed signup/login.
    #[strum(serialize = "Supabase Auth")]
    Supabase,
}

impl AuthMode {
    /// Signup path for this mode.
    pub fn signup_path(&self) -> &'static str {
        match self {
            AuthMode::Simple => "/api/auth/simple/signup",
            AuthMode::Regular => "/api/auth/signup",
            AuthMode::Supabase => "/api/auth/supabase/signup",
        }
    }

    /// Login path for this mode.
    pub fn login_path(&self) -> &'static str {
        match self {
            AuthMode::Simple => "/api/auth/simple/login",
            AuthMode::Regular => "/api/auth/login",
            AuthMode::Supabase => "/api/auth/supabase/login",
        }
    }

    /// Self-test path, when the mode exposes one.
    pub fn test_path(&self) -> Option<&'static str> {
        match self {
            AuthMode::Simple => Some("/api/auth/simple/test"),
            AuthMode::Regular | AuthMode::Supabase => None,
        }
    }

    /// Human-readable availability status.
    pub fn availability(&self) -> &'static str {
        match self {
            AuthMode::Simple => "✅ Working - bypasses database issues",
            AuthMode::Regular => "⚠️ May have database issues",
            AuthMode::Supabase => "🔄 Available if Supabase is configured",
        }
    }

    /// Endpoint description for the capability report.
    pub fn endpoint_info(&self) -> AuthEndpointInfo {
        AuthEndpointInfo {
            signup: self.signup_path().to_string(),
            login: self.login_path().to_string(),
            test: self.test_path().map(str::to_string),
            status: self.availability().to_string(),
        }
    }
}

/// Signup path per auth mode, as listed in the status report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthEndpoints {
    /// Simple auth signup path.
    pub simple: String,
    /// Regular auth signup path.
    pub regular: String,
    /// Supabase auth signup path.
    pub supabase: String,
}

impl AuthEndpoints {
    /// The fixed set of signup paths.
    pub fn known() -> Self {
        Self {
            simple: AuthMode::Simple.signup_path().to_string(),
            regular: AuthMode::Regular.signup_path().to_string(),
            supabase: AuthMode::Supabase.signup_path().to_string(),
        }
    }
}

/// One auth subsystem entry in the capability report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthEndpointInfo {
    /// Signup path.
    pub signup: String,
    /// Login path.
    pub login: String,
    /// Self-test path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test: Option<String>,
    /// Availability status.
    pub status: String,
}

/// The three auth subsystems, keyed by their display label on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthCapabilities {
    /// Simple auth.
    #[serde(rename = "Simple Auth (Recommended)")]
    pub simple: AuthEndpointInfo,
    /// Regular auth.
    #[serde(rename = "Regular Auth")]
    pub regular: AuthEndpointInfo,
    /// Supabase auth.
    #[serde(rename = "Supabase Auth")]
    pub supabase: AuthEndpointInfo,
}

impl AuthCapabilities {
    /// The fixed capability set.
    pub fn known() -> Self {
        Self {
            simple: AuthMode::Simple.endpoint_info(),
            regular: AuthMode::Regular.endpoint_info(),
            supabase: AuthMode::Supabase.endpoint_info(),
        }
    }

    /// Look up the entry for a mode.
    pub fn get(&self, mode: AuthMode) -> &AuthEndpointInfo {
        match mode {
            AuthMode::Simple => &self.simple,
            AuthMode::Regular => &self.regular,
            AuthMode::Supabase => &self.supabase,
        }
    }

    /// Iterate entries together with their mode, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (AuthMode, &AuthEndpointInfo)> + '_ {
        AuthMode::iter().map(move |mode| (mode, self.get(mode)))
    }
}

/// Server liveness report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusReport {
    /// Always true.
    pub success: bool,
    /// Fixed message.
    pub message: String,
    /// Time the report was built.
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    /// Deployment environment label.
    pub environment: String,
    /// Signup path per auth mode.
    pub auth_endpoints: AuthEndpoints,
}

/// Auth subsystem capability report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilityReport {
    /// Always true.
    pub success: bool,
    /// Fixed message.
    pub message: String,
    /// Auth subsystems.
    pub endpoints: AuthCapabilities,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn labels_match_wire_keys() {
        let value = serde_json::to_value(AuthCapabilities::known()).unwrap();
        let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();

        for mode in AuthMode::iter() {
            assert!(keys.contains(&mode.to_string().as_str()), "missing {mode}");
        }
        assert_eq!(keys.len(), 3);
    }

    #[test]
    fn only_simple_auth_has_test_path() {
        let value = serde_json::to_value(AuthCapabilities::known()).unwrap();

        assert_eq!(value["Simple Auth (Recommended)"]["test"], "/api/auth/simple/test");
        assert!(value["Regular Auth"].get("test").is_none());
        assert!(value["Supabase Auth"].get("test").is_none());
    }

    #[test]
    fn every_mode_has_status() {
        let caps = AuthCapabilities::known();
        assert_eq!(caps.iter().count(), 3);
        for (mode, info) in caps.iter() {
            assert!(!info.status.is_empty(), "{mode} has empty status");
        }
        assert!(caps.simple.status.contains(SUCCESS_INDICATOR));
    }

    #[test]
    fn status_endpoints_are_signup_paths() {
        let endpoints = AuthEndpoints::known();
        assert_eq!(endpoints.simple, "/api/auth/simple/signup");
        assert_eq!(endpoints.regular, "/api/auth/signup");
        assert_eq!(endpoints.supabase, "/api/auth/supabase/signup");
    }
}
