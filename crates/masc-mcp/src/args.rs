//! Total helpers for reading tool-call arguments out of a raw
//! [`serde_json::Value`].
//!
//! Every function here is total: a missing field, or one present with
//! the wrong JSON type, yields the caller-supplied default rather than an
//! error. Tool handlers use these instead of matching on `Value` directly
//! so malformed input degrades gracefully instead of panicking.

use serde_json::Value;

/// Reads a string field, falling back to `default` if missing or not a
/// string.
#[must_use]
pub fn get_string(args: &Value, key: &str, default: &str) -> String {
    args.get(key).and_then(Value::as_str).unwrap_or(default).to_string()
}

/// Reads an optional string field: `None` if missing or not a string.
#[must_use]
pub fn get_string_opt(args: &Value, key: &str) -> Option<String> {
    args.get(key).and_then(Value::as_str).map(str::to_string)
}

/// Reads an optional integer field: `None` if missing or not representable
/// as `i64`.
#[must_use]
pub fn get_int_opt(args: &Value, key: &str) -> Option<i64> {
    args.get(key).and_then(Value::as_i64)
}

/// Reads a list-of-strings field, skipping any non-string elements.
/// Missing or non-array yields an empty vector.
#[must_use]
pub fn get_string_list(args: &Value, key: &str) -> Vec<String> {
    args.get(key)
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(Value::as_str).map(str::to_string).collect())
        .unwrap_or_default()
}

/// Reads a boolean field, falling back to `default` if missing or not a
/// boolean.
#[must_use]
pub fn get_bool(args: &Value, key: &str, default: bool) -> bool {
    args.get(key).and_then(Value::as_bool).unwrap_or(default)
}

/// Reads a floating-point field, falling back to `default` if missing or
/// not a number.
#[must_use]
pub fn get_float(args: &Value, key: &str, default: f64) -> f64 {
    args.get(key).and_then(Value::as_f64).unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn string_falls_back_on_missing_or_wrong_type() {
        let args = json!({"name": "claude", "age": 5});
        assert_eq!(get_string(&args, "name", "x"), "claude");
        assert_eq!(get_string(&args, "age", "x"), "x");
        assert_eq!(get_string(&args, "missing", "x"), "x");
    }

    #[test]
    fn string_opt_is_none_on_mismatch() {
        let args = json!({"name": "claude", "age": 5});
        assert_eq!(get_string_opt(&args, "name"), Some("claude".to_string()));
        assert_eq!(get_string_opt(&args, "age"), None);
        assert_eq!(get_string_opt(&args, "missing"), None);
    }

    #[test]
    fn int_opt_reads_integers_only() {
        let args = json!({"n": 7, "s": "7"});
        assert_eq!(get_int_opt(&args, "n"), Some(7));
        assert_eq!(get_int_opt(&args, "s"), None);
    }

    #[test]
    fn string_list_skips_non_strings_and_defaults_empty() {
        let args = json!({"files": ["a.rs", 1, "b.rs"]});
        assert_eq!(get_string_list(&args, "files"), vec!["a.rs".to_string(), "b.rs".to_string()]);
        assert_eq!(get_string_list(&args, "missing"), Vec::<String>::new());
    }

    #[test]
    fn bool_and_float_fall_back_on_mismatch() {
        let args = json!({"flag": true, "weight": 1.5, "bad": "nope"});
        assert!(get_bool(&args, "flag", false));
        assert!(!get_bool(&args, "bad", false));
        assert!((get_float(&args, "weight", 0.0) - 1.5).abs() < f64::EPSILON);
        assert!((get_float(&args, "bad", 2.0) - 2.0).abs() < f64::EPSILON);
    }
}
