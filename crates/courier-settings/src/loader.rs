//! Settings loading with environment variable overrides.
//!
//! Loading flow:
//! 1. Start with compiled [`HarnessSettings::default()`]
//! 2. Apply environment variable overrides
//! 3. Validate the result
//!
//! | variable | field |
//! |---|---|
//! | `GRAPHQL_ENDPOINT` | `endpoint` |
//! | `DEBUG` | `debug` |
//! | `COURIER_REQUEST_TIMEOUT_MS` | `request_timeout_ms` (100..=600000) |
//! | `COURIER_LOG` | `log_level` |
//! | `COURIER_SNAPSHOT_DIR` | `snapshot_dir` |

use std::path::PathBuf;

use tracing::{debug, warn};

use crate::errors::Result;
use crate::types::HarnessSettings;

/// Load settings from the process environment.
pub fn load_settings() -> Result<HarnessSettings> {
    load_settings_with(|key| std::env::var(key).ok())
}

/// Load settings using `lookup` in place of the process environment.
pub fn load_settings_with<F>(lookup: F) -> Result<HarnessSettings>
where
    F: Fn(&str) -> Option<String>,
{
    let mut settings = HarnessSettings::default();
    apply_env_overrides(&mut settings, &lookup);
    settings.validate()?;
    debug!(endpoint = %settings.endpoint, debug = settings.debug, "settings loaded");
    Ok(settings)
}

/// Apply environment overrides to `settings`.
///
/// Invalid values are ignored with a warning (falling back to the default).
pub fn apply_env_overrides<F>(settings: &mut HarnessSettings, lookup: &F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(v) = read_string(lookup, "GRAPHQL_ENDPOINT") {
        settings.endpoint = v;
    }
    if let Some(v) = read_bool(lookup, "DEBUG") {
        settings.debug = v;
    }
    if let Some(v) = read_u64(lookup, "COURIER_REQUEST_TIMEOUT_MS", 100, 600_000) {
        settings.request_timeout_ms = v;
    }
    if let Some(v) = read_string(lookup, "COURIER_LOG") {
        settings.log_level = v;
    }
    if let Some(v) = read_string(lookup, "COURIER_SNAPSHOT_DIR") {
        settings.snapshot_dir = Some(PathBuf::from(v));
    }
}

// ── Pure parsing functions (testable without env vars) ──────────────────────

/// Parse a string as a boolean.
///
/// Accepts (case-insensitive, surrounding whitespace ignored):
/// `true`/`1`/`yes`/`on` or `false`/`0`/`no`/`off`.
pub fn parse_bool(val: &str) -> Option<bool> {
    match val.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Parse a string as a `u64` within an inclusive range.
pub fn parse_u64_range(val: &str, min: u64, max: u64) -> Option<u64> {
    let n: u64 = val.trim().parse().ok()?;
    (n >= min && n <= max).then_some(n)
}

// ── Env var readers (thin wrappers) ─────────────────────────────────────────

fn read_string<F>(lookup: &F, name: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn read_bool<F>(lookup: &F, name: &str) -> Option<bool>
where
    F: Fn(&str) -> Option<String>,
{
    let val = lookup(name)?;
    let result = parse_bool(&val);
    if result.is_none() {
        warn!(key = name, value = %val, "invalid boolean env var, ignoring");
    }
    result
}

fn read_u64<F>(lookup: &F, name: &str, min: u64, max: u64) -> Option<u64>
where
    F: Fn(&str) -> Option<String>,
{
    let val = lookup(name)?;
    let result = parse_u64_range(&val, min, max);
    if result.is_none() {
        warn!(key = name, value = %val, "invalid u64 env var, ignoring");
    }
    result
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::SettingsError;
    use assert_matches::assert_matches;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> + use<> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    // ── load_settings_with ──────────────────────────────────────────

    #[test]
    fn empty_env_returns_defaults() {
        let settings = load_settings_with(env(&[])).unwrap();
        assert_eq!(settings, HarnessSettings::default());
    }

    #[test]
    fn endpoint_and_debug_override() {
        let settings = load_settings_with(env(&[
            ("GRAPHQL_ENDPOINT", "http://api.test:8080/graphql"),
            ("DEBUG", "false"),
        ]))
        .unwrap();
        assert_eq!(settings.endpoint, "http://api.test:8080/graphql");
        assert!(!settings.debug);
    }

    #[test]
    fn debug_value_is_trimmed() {
        let settings = load_settings_with(env(&[("DEBUG", " false ")])).unwrap();
        assert!(!settings.debug);
    }

    #[test]
    fn invalid_debug_keeps_default() {
        let settings = load_settings_with(env(&[("DEBUG", "sometimes")])).unwrap();
        assert!(settings.debug);
    }

    #[test]
    fn timeout_override_and_range() {
        let settings =
            load_settings_with(env(&[("COURIER_REQUEST_TIMEOUT_MS", "2500")])).unwrap();
        assert_eq!(settings.request_timeout_ms, 2500);

        let settings = load_settings_with(env(&[("COURIER_REQUEST_TIMEOUT_MS", "5")])).unwrap();
        assert_eq!(settings.request_timeout_ms, 10_000);
    }

    #[test]
    fn log_level_and_snapshot_dir() {
        let settings = load_settings_with(env(&[
            ("COURIER_LOG", "courier=debug"),
            ("COURIER_SNAPSHOT_DIR", "/tmp/snaps"),
        ]))
        .unwrap();
        assert_eq!(settings.log_level, "courier=debug");
        assert_eq!(settings.snapshot_dir, Some(PathBuf::from("/tmp/snaps")));
    }

    #[test]
    fn empty_endpoint_is_ignored() {
        let settings = load_settings_with(env(&[("GRAPHQL_ENDPOINT", "  ")])).unwrap();
        assert_eq!(settings.endpoint, crate::types::DEFAULT_ENDPOINT);
    }

    #[test]
    fn bad_endpoint_fails_validation() {
        let result = load_settings_with(env(&[("GRAPHQL_ENDPOINT", "ftp://nope")]));
        assert_matches!(result, Err(SettingsError::InvalidValue(_)));
    }

    // ── parse_bool ──────────────────────────────────────────────────

    #[test]
    fn parse_bool_true_variants() {
        for val in &["true", "1", "yes", "on", "TRUE", "Yes", "ON"] {
            assert_eq!(parse_bool(val), Some(true), "failed for {val}");
        }
    }

    #[test]
    fn parse_bool_false_variants() {
        for val in &["false", "0", "no", "off", "FALSE", "No", "OFF"] {
            assert_eq!(parse_bool(val), Some(false), "failed for {val}");
        }
    }

    #[test]
    fn parse_bool_invalid() {
        assert_eq!(parse_bool("maybe"), None);
        assert_eq!(parse_bool(""), None);
        assert_eq!(parse_bool("2"), None);
    }

    // ── parse_u64_range ─────────────────────────────────────────────

    #[test]
    fn parse_u64_valid() {
        assert_eq!(parse_u64_range("30000", 100, 600_000), Some(30_000));
        assert_eq!(parse_u64_range("100", 100, 600_000), Some(100));
    }

    #[test]
    fn parse_u64_out_of_range() {
        assert_eq!(parse_u64_range("99", 100, 600_000), None);
        assert_eq!(parse_u64_range("700000", 100, 600_000), None);
    }

    #[test]
    fn parse_u64_invalid() {
        assert_eq!(parse_u64_range("abc", 100, 600_000), None);
    }
}
