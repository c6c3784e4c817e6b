//! # courier-settings
//!
//! Configuration for the courier GraphQL harness.
//!
//! Settings are resolved from two layers (in priority order):
//! 1. **Compiled defaults**: [`HarnessSettings::default()`]
//! 2. **Environment variables**: `GRAPHQL_ENDPOINT`, `DEBUG` and `COURIER_*`
//!    overrides (highest priority)
//!
//! The resolved value is passed explicitly into the client and the scenario
//! runner; nothing reads the environment after [`load_settings`] returns.
//!
//! # Usage
//!
//! ```no_run
//! use courier_settings::load_settings;
//!
//! let settings = load_settings()?;
//! println!("endpoint: {}", settings.endpoint);
//! # Ok::<(), courier_settings::SettingsError>(())
//! ```

#![deny(unsafe_code)]

pub mod errors;
pub mod loader;
pub mod types;

pub use errors::{Result, SettingsError};
pub use loader::{apply_env_overrides, load_settings, load_settings_with, parse_bool, parse_u64_range};
pub use types::*;
