//! Client error types.

use thiserror::Error;

use crate::types::GraphQlError;

/// Errors returned by [`GraphQlClient`](crate::GraphQlClient).
#[derive(Debug, Error)]
pub enum ClientError {
    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Build(String),

    /// The request could not be sent or the response body could not be read.
    #[error("transport error: {message}")]
    Transport {
        /// Transport detail.
        message: String,
    },

    /// No response arrived within the configured timeout.
    #[error("request timed out after {timeout_ms}ms")]
    Timeout {
        /// The configured timeout.
        timeout_ms: u64,
    },

    /// Non-success status without a GraphQL error payload.
    #[error("unexpected HTTP status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// The response body was not a GraphQL response envelope.
    #[error("malformed response: {message}")]
    Decode {
        /// Decoder detail.
        message: String,
        /// Raw response body.
        body: String,
    },

    /// The server reported top-level GraphQL errors.
    #[error("graphql error: {}", summarize(errors))]
    GraphQl {
        /// Errors as reported by the server.
        errors: Vec<GraphQlError>,
    },
}

impl ClientError {
    /// Whether the failure happened below the GraphQL layer (nothing usable
    /// came back from the server).
    pub fn is_transport(&self) -> bool {
        !matches!(self, Self::GraphQl { .. })
    }
}

fn summarize(errors: &[GraphQlError]) -> String {
    match errors {
        [] => "no error detail".to_string(),
        [only] => only.message.clone(),
        [first, rest @ ..] => format!("{} (+{} more)", first.message, rest.len()),
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
