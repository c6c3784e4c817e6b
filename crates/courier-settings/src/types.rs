//! Settings type definitions.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::errors::{Result, SettingsError};

/// Default GraphQL endpoint of a locally running API server.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:5000/graphql";

/// Default per-request timeout.
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;

/// Root settings for a harness run.
///
/// All field names are camelCase when serialized. Example:
///
/// ```json
/// {
///   "endpoint": "http://localhost:5000/graphql",
///   "debug": true,
///   "requestTimeoutMs": 10000,
///   "logLevel": "info"
/// }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HarnessSettings {
    /// GraphQL endpoint every request is posted to.
    pub endpoint: String,
    /// Log every request/response exchange.
    pub debug: bool,
    /// Upper bound for a single request, in milliseconds.
    pub request_timeout_ms: u64,
    /// Log filter used when `RUST_LOG` is unset.
    pub log_level: String,
    /// Directory holding recorded snapshot outputs. `None` selects the
    /// harness crate's own `snapshots/` directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot_dir: Option<PathBuf>,
}

impl Default for HarnessSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            debug: true,
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            log_level: "info".to_string(),
            snapshot_dir: None,
        }
    }
}

impl HarnessSettings {
    /// Settings pointing at `endpoint` with every other value defaulted.
    pub fn for_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Self::default()
        }
    }

    /// The request timeout as a [`Duration`].
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Reject values the client cannot work with.
    pub fn validate(&self) -> Result<()> {
        let scheme_ok = ["http://", "https://"].iter().any(|scheme| {
            self.endpoint
                .strip_prefix(scheme)
                .is_some_and(|rest| !rest.is_empty())
        });
        if !scheme_ok {
            return Err(SettingsError::InvalidValue(format!(
                "endpoint must be an absolute http(s) URL, got `{}`",
                self.endpoint
            )));
        }
        if self.request_timeout_ms == 0 {
            return Err(SettingsError::InvalidValue(
                "requestTimeoutMs must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
