//! Settings error types.

use thiserror::Error;

/// Errors that can occur when validating settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// A settings value was invalid (e.g., a relative endpoint URL).
    #[error("invalid settings value: {0}")]
    InvalidValue(String),
}

/// Result type for settings operations.
pub type Result<T> = std::result::Result<T, SettingsError>;

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
