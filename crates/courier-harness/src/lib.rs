//! # courier-harness
//!
//! Convention-driven integration testing for the courier GraphQL API.
//!
//! - **Documents**: [`registry::DocumentRegistry`] holds the request
//!   documents; [`registry::OperationTable`] resolves every entity's
//!   create/lookup/delete documents when the harness starts
//! - **Lifecycle**: [`lifecycle::Lifecycle`] verifies a created record, looks
//!   it up, deletes it and checks that it is gone
//! - **Runner**: [`runner::ScenarioRunner`] registers single-request cases
//!   verified by snapshot or by a post-process callback
//! - **Scenarios**: [`scenarios::ScenarioKind`] runs the multi-step session,
//!   thread and message flows
//!
//! The `courier-scenarios` binary runs all of it against a live endpoint.

#![deny(unsafe_code)]

pub mod catalog;
pub mod entities;
pub mod errors;
pub mod fixtures;
pub mod lifecycle;
pub mod registry;
pub mod runner;
pub mod scenarios;

pub use errors::{HarnessError, Result};
pub use lifecycle::Lifecycle;
pub use registry::{DocumentKind, DocumentRegistry, OperationTable};
pub use runner::{PostProcess, PostProcessor, RunSummary, ScenarioRunner, Verification};
pub use scenarios::{ScenarioKind, ScenarioReport};
