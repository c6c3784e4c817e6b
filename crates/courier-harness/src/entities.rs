//! Typed views over the records returned by the API.
//!
//! Only the fields the request documents select are modeled; the schema
//! itself belongs to the server.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{HarnessError, Result};

/// Reference to a session nested in another record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRef {
    /// Session id.
    pub id: String,
    /// Public key, when selected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_key: Option<String>,
}

/// Reference to a thread nested in another record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadRef {
    /// Thread id.
    pub id: String,
    /// Owner, when selected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<SessionRef>,
}

/// A session, optionally a member of one thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Session id.
    pub id: String,
    /// 64-character public key.
    pub public_key: String,
    /// The thread this session belongs to.
    #[serde(default)]
    pub thread: Option<ThreadRef>,
}

impl Session {
    /// Id of the joined thread, if any.
    pub fn thread_id(&self) -> Option<&str> {
        self.thread.as_ref().map(|t| t.id.as_str())
    }
}

/// A thread and its owning session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Thread {
    /// Thread id.
    pub id: String,
    /// The session that created the thread.
    pub owner: SessionRef,
}

/// A message posted into a thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Message id.
    pub id: String,
    /// Message text.
    pub body: String,
    /// Id of the sending session.
    pub from_id: String,
    /// Id of the thread.
    pub thread_id: String,
    /// Creation timestamp, selected by the create mutation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// Sender, selected by the lookup query.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<SessionRef>,
    /// Thread, selected by the lookup query.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thread: Option<ThreadRef>,
}

/// Decode the record at `path` in `data`, failing with
/// [`HarnessError::Shape`] when it is absent or does not fit `T`.
pub fn decode_at<T: DeserializeOwned>(operation: &str, data: &Value, path: &[&str]) -> Result<T> {
    let dotted = courier_core::json::dotted(path);
    let value = courier_core::json::get_path(data, path)
        .ok_or_else(|| HarnessError::shape(operation, dotted.clone(), data))?;
    serde_json::from_value(value.clone())
        .map_err(|e| HarnessError::shape(operation, format!("{dotted} ({e})"), data))
}

/// Id of a record object, accepting string or numeric ids.
pub fn id_of(record: &Value) -> Option<String> {
    match record.get("id")? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
