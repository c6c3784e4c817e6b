//! # courier-core
//!
//! Foundation pieces shared by the courier GraphQL harness crates.
//!
//! - **Name conventions**: [`naming::CreateOperation`] derives lookup/delete
//!   operation names and response keys from a `Create<Entity>` mutation name
//! - **Entities**: [`entity::EntityKind`] enumerates the records exposed by the API
//! - **JSON helpers**: [`json::is_truthy`] and friends for loosely-typed responses
//! - **Errors**: [`errors::NamingError`] via `thiserror`
//! - **Logging**: [`logging::init_subscriber`] and [`logging::log_exchange`]
//!
//! ## Crate Position
//!
//! Foundation crate. Depended on by all other courier crates.

#![deny(unsafe_code)]

pub mod entity;
pub mod errors;
pub mod json;
pub mod logging;
pub mod naming;

pub use entity::EntityKind;
pub use errors::{NamingError, Result};
pub use naming::CreateOperation;
