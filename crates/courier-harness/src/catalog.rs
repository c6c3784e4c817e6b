//! The declarative cases shipped with the harness.

use serde_json::json;

use crate::errors::Result;
use crate::fixtures;
use crate::runner::{PostProcess, ScenarioRunner};

/// Id that no session is ever created with.
pub const UNKNOWN_SESSION_ID: &str = "12345678-90ab-cdef-0123-4567890abcde";

/// Register the built-in cases on `runner`:
///
/// - `CreateSession` with a fresh public key, then looked up and deleted
/// - `GetSessionById` for [`UNKNOWN_SESSION_ID`], compared against its snapshot
pub fn default_cases(runner: &mut ScenarioRunner) -> Result<()> {
    let registry = runner.lifecycle().registry();
    let create_session = registry.require("CreateSession")?;
    let get_session = registry.require("GetSessionById")?;

    let _ = runner
        .register(
            create_session,
            "CreateSession",
            Some(json!({ "publicKey": fixtures::public_key() })),
            Some(PostProcess::LookupThenDelete),
        )
        .register(
            get_session,
            "GetSessionById",
            Some(json!({ "id": UNKNOWN_SESSION_ID })),
            None,
        );
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
