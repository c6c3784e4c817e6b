//! Wire types of the GraphQL-over-HTTP exchange.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{ClientError, Result};

/// Request body posted to the endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct GraphQlRequest<'a> {
    /// The GraphQL document.
    pub query: &'a str,
    /// Variables for the document, omitted when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<&'a Value>,
}

/// One entry of the top-level `errors` list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphQlError {
    /// Human-readable error message.
    pub message: String,
    /// Response path the error applies to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<Value>>,
    /// Server-specific detail (hint, errcode, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Value>,
}

/// Decoded response envelope.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphQlResponse {
    /// The `data` member; `None` when absent or null.
    #[serde(default)]
    pub data: Option<Value>,
    /// The top-level `errors` member; `None` when absent or null.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<GraphQlError>>,
}

impl GraphQlResponse {
    /// The reported errors, empty when there are none.
    pub fn errors(&self) -> &[GraphQlError] {
        self.errors.as_deref().unwrap_or_default()
    }

    /// Whether the server reported any top-level error.
    pub fn has_errors(&self) -> bool {
        !self.errors().is_empty()
    }

    /// The `data` member, or [`Value::Null`] when absent.
    pub fn data(&self) -> &Value {
        self.data.as_ref().unwrap_or(&Value::Null)
    }

    /// Convert into `data`, failing with [`ClientError::GraphQl`] when the
    /// server reported errors.
    pub fn into_data(self) -> Result<Value> {
        match self.errors {
            Some(errors) if !errors.is_empty() => Err(ClientError::GraphQl { errors }),
            _ => Ok(self.data.unwrap_or(Value::Null)),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
