//! Helpers for loosely-typed GraphQL payloads.

use serde_json::Value;

/// Truthiness of a JSON value, matching how the API's JavaScript clients
/// treat results: `null`, `false`, `0`, `NaN` and `""` are falsy, everything
/// else (including empty objects and arrays) is truthy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Walk `keys` into nested objects, returning `None` at the first missing or
/// null step.
pub fn get_path<'a>(value: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .try_fold(value, |cur, key| cur.get(*key))
        .filter(|v| !v.is_null())
}

/// Render a dotted path for error messages (`createThread.thread.id`).
pub fn dotted(keys: &[&str]) -> String {
    keys.join(".")
}

/// Pretty-print a value with four-space indentation, the layout the debug
/// output has always used.
pub fn pretty(value: &Value) -> String {
    use serde::Serialize;

    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    if value.serialize(&mut ser).is_err() {
        return value.to_string();
    }
    String::from_utf8(buf).unwrap_or_else(|_| value.to_string())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn falsy_values() {
        for v in [json!(null), json!(false), json!(0), json!(0.0), json!("")] {
            assert!(!is_truthy(&v), "{v} should be falsy");
        }
    }

    #[test]
    fn truthy_values() {
        for v in [json!(true), json!(1), json!("x"), json!({}), json!([])] {
            assert!(is_truthy(&v), "{v} should be truthy");
        }
    }

    #[test]
    fn get_path_walks_objects() {
        let data = json!({"createThread": {"thread": {"id": "t1"}}});
        assert_eq!(
            get_path(&data, &["createThread", "thread", "id"]),
            Some(&json!("t1"))
        );
        assert_eq!(get_path(&data, &["createThread", "session"]), None);
    }

    #[test]
    fn get_path_stops_at_null() {
        let data = json!({"session": null});
        assert_eq!(get_path(&data, &["session"]), None);
        assert_eq!(get_path(&data, &["session", "id"]), None);
    }

    #[test]
    fn pretty_uses_four_spaces() {
        let out = pretty(&json!({"id": 1}));
        assert_eq!(out, "{\n    \"id\": 1\n}");
    }

    #[test]
    fn dotted_joins_keys() {
        assert_eq!(dotted(&["a", "b"]), "a.b");
    }
}
