//! # courier-client
//!
//! Sends GraphQL documents over HTTP and decodes the `{data, errors}`
//! envelope.
//!
//! - [`GraphQlClient`] posts `{query, variables}` to the configured endpoint
//!   with a bounded per-request timeout and a single attempt per call
//! - [`GraphQlResponse`] keeps `data` and the top-level `errors` list apart
//! - [`ClientError`] separates transport failures from errors reported by
//!   the GraphQL server, so callers never have to guess which one happened

#![deny(unsafe_code)]

pub mod client;
pub mod errors;
pub mod types;

pub use client::GraphQlClient;
pub use errors::{ClientError, Result};
pub use types::{GraphQlError, GraphQlRequest, GraphQlResponse};
