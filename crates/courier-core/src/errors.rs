//! Naming error types.

use thiserror::Error;

/// Errors raised when an operation name does not follow the
/// `Create<Entity>` convention.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NamingError {
    /// The name does not start with `Create`.
    #[error("operation `{0}` is not a Create<Entity> mutation")]
    NotACreateOperation(String),
    /// Nothing follows the `Create` prefix.
    #[error("operation `{0}` names no entity after `Create`")]
    EmptyEntity(String),
    /// The entity part is not an ASCII identifier starting with an uppercase letter.
    #[error("operation `{0}` has an invalid entity name")]
    InvalidEntity(String),
}

/// Result type for naming operations.
pub type Result<T> = std::result::Result<T, NamingError>;

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
