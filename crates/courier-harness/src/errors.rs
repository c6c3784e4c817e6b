//! Harness error types.

use std::fmt::Debug;
use std::path::PathBuf;

use courier_client::ClientError;
use courier_core::NamingError;
use serde_json::Value;
use thiserror::Error;

/// Errors that end a scenario step.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// The request failed in transport or the server reported GraphQL errors.
    #[error(transparent)]
    Client(#[from] ClientError),

    /// An operation name broke the `Create<Entity>` convention.
    #[error(transparent)]
    Naming(#[from] NamingError),

    /// No request document is registered under the derived name.
    #[error("no request document registered for `{operation}`")]
    MissingDocument {
        /// The operation whose document is missing.
        operation: String,
    },

    /// No scenario case is registered under the requested name.
    #[error("no case registered as `{name}`")]
    UnknownCase {
        /// The requested case name.
        name: String,
    },

    /// Snapshot-verified cases are registered but their directory is missing.
    #[error("snapshot directory `{}` does not exist; set COURIER_SNAPSHOT_DIR", path.display())]
    MissingSnapshotDir {
        /// The directory that was looked for.
        path: PathBuf,
    },

    /// A successful response lacks an expected field.
    #[error("`{operation}` response lacks `{path}`")]
    Shape {
        /// The operation that produced the response.
        operation: String,
        /// Dotted path of the missing field.
        path: String,
        /// The response data, kept for diagnosis.
        response: Value,
    },

    /// A scenario invariant did not hold.
    #[error("assertion failed: {message}")]
    Assertion {
        /// What was expected and what was found.
        message: String,
    },

    /// A response did not match its recorded reference output.
    #[error("snapshot `{name}` does not match: {message}")]
    Snapshot {
        /// Snapshot name.
        name: String,
        /// Mismatch detail.
        message: String,
    },
}

impl HarnessError {
    /// Build an [`HarnessError::Assertion`].
    pub fn assertion(message: impl Into<String>) -> Self {
        Self::Assertion {
            message: message.into(),
        }
    }

    /// Build an [`HarnessError::Shape`].
    pub fn shape(operation: impl Into<String>, path: impl Into<String>, response: &Value) -> Self {
        Self::Shape {
            operation: operation.into(),
            path: path.into(),
            response: response.clone(),
        }
    }

    /// Whether the failure came from the transport rather than the API.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Client(e) if e.is_transport())
    }
}

/// Result type for harness operations.
pub type Result<T> = std::result::Result<T, HarnessError>;

/// Fail with `message` unless `condition` holds.
pub fn ensure(condition: bool, message: impl Into<String>) -> Result<()> {
    if condition {
        Ok(())
    } else {
        Err(HarnessError::assertion(message))
    }
}

/// Fail unless `left == right`, naming the compared property.
pub fn ensure_eq<T>(what: &str, left: &T, right: &T) -> Result<()>
where
    T: PartialEq + Debug + ?Sized,
{
    if left == right {
        Ok(())
    } else {
        Err(HarnessError::assertion(format!(
            "{what}: expected {right:?}, got {left:?}"
        )))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
