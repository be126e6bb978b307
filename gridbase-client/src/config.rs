//! Connection configuration for the hosted platform API.
//!
//! `ClientConfig` doubles as the portable "client snapshot": serializing it
//! captures everything needed to reconstruct an equivalent client later.
//! Missing keys on deserialization fall back field-by-field to the
//! documented defaults.

use serde::{Deserialize, Serialize};

fn default_host() -> String {
    "api.gridbase.example".to_string()
}

fn default_user_agent() -> String {
    concat!("gridbase/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_timeout_ms() -> u64 {
    30_000
}

/// Connection settings for a hosted platform realm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientConfig {
    /// API origin. A bare hostname gets `https://` prepended; a value
    /// starting with `http://` or `https://` is used verbatim.
    pub host: String,
    /// Token sent as the `Authorization` bearer credential. Empty means
    /// requests go out unauthenticated.
    pub user_token: String,
    /// User agent header for outgoing requests.
    pub user_agent: String,
    /// Per-request timeout in milliseconds.
    pub timeout_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            user_token: String::new(),
            user_agent: default_user_agent(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl ClientConfig {
    /// The request origin, with the scheme applied.
    pub fn base_url(&self) -> String {
        if self.host.starts_with("http://") || self.host.starts_with("https://") {
            self.host.trim_end_matches('/').to_string()
        } else {
            format!("https://{}", self.host)
        }
    }
}
