//! HTTP transport backed by `reqwest`.

use courier_settings::HarnessSettings;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::errors::{ClientError, Result};
use crate::types::{GraphQlRequest, GraphQlResponse};

const USER_AGENT: &str = "courier-harness/0.1";

/// GraphQL client bound to one endpoint.
///
/// Each call makes exactly one attempt; retries are left to the caller.
#[derive(Clone, Debug)]
pub struct GraphQlClient {
    client: reqwest::Client,
    endpoint: String,
    timeout_ms: u64,
}

impl GraphQlClient {
    /// Create a client for the endpoint and timeout in `settings`.
    pub fn new(settings: &HarnessSettings) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let _ = headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let _ = headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .timeout(settings.request_timeout())
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()
            .map_err(|e| ClientError::Build(e.to_string()))?;

        Ok(Self::with_client(settings, client))
    }

    /// Create a client sharing an existing `reqwest` client.
    pub fn with_client(settings: &HarnessSettings, client: reqwest::Client) -> Self {
        Self {
            client,
            endpoint: settings.endpoint.clone(),
            timeout_ms: settings.request_timeout_ms,
        }
    }

    /// The endpoint requests are posted to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Post `document` with optional `variables` and decode the envelope.
    ///
    /// A response carrying a top-level `errors` list is still returned as
    /// `Ok` so callers can inspect it; use [`execute`](Self::execute) to turn
    /// those into [`ClientError::GraphQl`]. Non-success statuses whose body
    /// carries GraphQL errors come back as [`ClientError::GraphQl`].
    #[instrument(skip_all, fields(endpoint = %self.endpoint))]
    pub async fn send(&self, document: &str, variables: Option<&Value>) -> Result<GraphQlResponse> {
        let body = GraphQlRequest {
            query: document,
            variables,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.transport_error(&e))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| self.transport_error(&e))?;

        if !status.is_success() {
            if let Ok(decoded) = serde_json::from_str::<GraphQlResponse>(&text)
                && decoded.has_errors()
            {
                warn!(
                    status = status.as_u16(),
                    error = %decoded.errors()[0].message,
                    "graphql request rejected"
                );
                return Err(ClientError::GraphQl {
                    errors: decoded.errors.unwrap_or_default(),
                });
            }
            warn!(status = status.as_u16(), body = %text, "unexpected HTTP status");
            return Err(ClientError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        let decoded: GraphQlResponse = serde_json::from_str(&text).map_err(|e| {
            warn!(error = %e, body = %text, "malformed graphql response");
            ClientError::Decode {
                message: e.to_string(),
                body: text.clone(),
            }
        })?;

        if decoded.has_errors() {
            warn!(
                count = decoded.errors().len(),
                error = %decoded.errors()[0].message,
                "graphql response carries errors"
            );
        } else {
            debug!(status = status.as_u16(), "graphql response received");
        }

        Ok(decoded)
    }

    /// Like [`send`](Self::send), but fails on any reported GraphQL error and
    /// returns only `data`.
    pub async fn execute(&self, document: &str, variables: Option<&Value>) -> Result<Value> {
        self.send(document, variables).await?.into_data()
    }

    fn transport_error(&self, e: &reqwest::Error) -> ClientError {
        if e.is_timeout() {
            warn!(timeout_ms = self.timeout_ms, "graphql request timed out");
            ClientError::Timeout {
                timeout_ms: self.timeout_ms,
            }
        } else {
            warn!(error = %e, "graphql request failed");
            ClientError::Transport {
                message: e.to_string(),
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
