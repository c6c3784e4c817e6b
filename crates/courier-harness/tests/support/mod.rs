//! Shared helpers for the harness integration tests.

#![allow(dead_code)]

pub mod fake_api;

use courier_harness::{DocumentRegistry, Lifecycle, ScenarioRunner};
use courier_settings::HarnessSettings;
use wiremock::MockServer;

/// Settings pointing at `server`'s `/graphql`, exchange logging off.
pub fn settings_for(server: &MockServer) -> HarnessSettings {
    HarnessSettings {
        debug: false,
        ..HarnessSettings::for_endpoint(format!("{}/graphql", server.uri()))
    }
}

/// Lifecycle helpers bound to `server` with the built-in documents.
pub fn lifecycle_for(server: &MockServer) -> Lifecycle {
    Lifecycle::new(&settings_for(server), DocumentRegistry::builtin()).unwrap()
}

/// A runner bound to `server` using the committed snapshots.
pub fn runner_for(server: &MockServer) -> ScenarioRunner {
    let settings = settings_for(server);
    let lifecycle = Lifecycle::new(&settings, DocumentRegistry::builtin()).unwrap();
    ScenarioRunner::new(lifecycle, &settings)
}
