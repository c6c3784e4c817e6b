//! Structured logging with `tracing`.
//!
//! [`init_subscriber`] installs a compact stderr subscriber filtered by
//! `RUST_LOG` (or the supplied default). [`log_exchange`] reports one
//! request/response pair of a scenario step when debug output is enabled.

use serde_json::Value;
use tracing::info;

use crate::json::pretty;

/// Target used for request/response exchange events.
pub const EXCHANGE_TARGET: &str = "courier::exchange";

/// Initialize the global tracing subscriber with stderr output.
///
/// Call once at startup. Subsequent calls are no-ops.
///
/// # Arguments
///
/// * `level` - Filter used when `RUST_LOG` is unset (e.g. `"info"`).
pub fn init_subscriber(level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .compact();

    // set_global_default is a no-op if already set
    let _ = subscriber.try_init();
}

/// Render the `"<Label>:\nreq <json>\nres <json>\n"` block for one exchange.
pub fn format_exchange(label: &str, variables: Option<&Value>, data: &Value) -> String {
    let req = variables.map_or_else(|| "{}".to_string(), pretty);
    format!("{label}:\nreq {req}\nres {}\n", pretty(data))
}

/// Emit one request/response exchange at `info` when `debug` is set.
pub fn log_exchange(debug: bool, label: &str, variables: Option<&Value>, data: &Value) {
    if !debug {
        return;
    }
    info!(
        target: EXCHANGE_TARGET,
        label,
        "{}",
        format_exchange(label, variables, data)
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn init_subscriber_does_not_panic() {
        init_subscriber("warn");
        init_subscriber("debug");
    }

    #[test]
    fn exchange_block_layout() {
        let block = format_exchange(
            "Mutation: CreateSession",
            Some(&json!({"publicKey": "abc"})),
            &json!({"createSession": {"session": {"id": "s1"}}}),
        );
        assert!(block.starts_with("Mutation: CreateSession:\nreq {\n    \"publicKey\": \"abc\"\n}"));
        assert!(block.contains("\nres {\n    \"createSession\""));
        assert!(block.ends_with("}\n"));
    }

    #[test]
    fn exchange_without_variables() {
        let block = format_exchange("Query: GetSessionById", None, &json!({"session": null}));
        assert!(block.contains("req {}\n"));
    }

    #[test]
    fn log_exchange_silent_when_disabled() {
        log_exchange(false, "Query", None, &json!(null));
        log_exchange(true, "Query", None, &json!({"ok": true}));
    }
}
