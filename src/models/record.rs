//! Helpers for reading fields out of opaque upstream records.
//!
//! Upstream payloads are passed through untouched; these functions only read
//! them, with lenient rules for flags and numbers.

use serde_json::{Map, Number, Value};

/// An upstream record as delivered by the API.
pub type Record = Map<String, Value>;

/// Loose truthiness: `null`, `false`, zero, empty strings and empty
/// containers are false.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|v| v != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// Whether `record[key]` exists and is truthy.
pub fn flag(record: &Value, key: &str) -> bool {
    record.get(key).is_some_and(is_truthy)
}

/// Numbers and numeric strings as `f64`. Everything else is `None`.
pub fn coerce_f64(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}

/// `record[key]` coerced to `f64`, zero when missing or non-numeric.
pub fn number_or_zero(record: &Value, key: &str) -> f64 {
    record.get(key).and_then(coerce_f64).unwrap_or(0.0)
}

/// String field, if present and a string.
pub fn str_field<'a>(record: &'a Value, key: &str) -> Option<&'a str> {
    record.get(key).and_then(Value::as_str)
}

/// Whether the string field `key` starts with `prefix`.
pub fn starts_with(record: &Value, key: &str, prefix: &str) -> bool {
    str_field(record, key).is_some_and(|s| s.starts_with(prefix))
}

/// Comparable key for an identifier field. Missing and `null` compare equal,
/// as do numbers of equal value (`1` and `1.0`).
pub fn identity(record: &Value, key: &str) -> String {
    match record.get(key) {
        Some(Value::Number(n)) => number_key(n),
        Some(value) => value.to_string(),
        None => Value::Null.to_string(),
    }
}

fn number_key(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    match n.as_f64() {
        // Integral floats within the exact f64 range collapse onto integers.
        Some(f) if f.fract() == 0.0 && f.abs() < 9.0e15 => (f as i64).to_string(),
        Some(f) => f.to_string(),
        None => n.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn truthiness_follows_loose_rules() {
        for falsy in [json!(null), json!(false), json!(0), json!(0.0), json!(""), json!([]), json!({})] {
            assert!(!is_truthy(&falsy), "{falsy} should be falsy");
        }
        for truthy in [json!(true), json!(1), json!(-2.5), json!("0"), json!([0]), json!({"a": 1})] {
            assert!(is_truthy(&truthy), "{truthy} should be truthy");
        }
    }

    #[test]
    fn coerce_accepts_numbers_and_numeric_strings() {
        assert_eq!(coerce_f64(&json!(12)), Some(12.0));
        assert_eq!(coerce_f64(&json!("99.5")), Some(99.5));
        assert_eq!(coerce_f64(&json!(" 3 ")), Some(3.0));
        assert_eq!(coerce_f64(&json!("abc")), None);
        assert_eq!(coerce_f64(&json!("NaN")), None);
        assert_eq!(coerce_f64(&json!(null)), None);
        assert_eq!(coerce_f64(&json!(true)), None);
    }

    #[test]
    fn number_or_zero_defaults() {
        let record = json!({"amount": "oops"});
        assert_eq!(number_or_zero(&record, "amount"), 0.0);
        assert_eq!(number_or_zero(&record, "missing"), 0.0);
        assert_eq!(number_or_zero(&json!({"amount": 150}), "amount"), 150.0);
    }

    #[test]
    fn starts_with_ignores_non_strings() {
        assert!(starts_with(&json!({"created_at": "2026-10-17T10:00:00"}), "created_at", "2026-10-17"));
        assert!(!starts_with(&json!({"created_at": 1760000000000u64}), "created_at", "2026"));
        assert!(!starts_with(&json!({"created_at": null}), "created_at", "2026"));
    }

    #[test]
    fn identity_treats_missing_as_null() {
        assert_eq!(identity(&json!({}), "tg_id"), identity(&json!({"tg_id": null}), "tg_id"));
        assert_ne!(identity(&json!({"tg_id": 1}), "tg_id"), identity(&json!({"tg_id": "1"}), "tg_id"));
    }

    #[test]
    fn identity_equates_integral_floats() {
        assert_eq!(identity(&json!({"tg_id": 1}), "tg_id"), identity(&json!({"tg_id": 1.0}), "tg_id"));
        assert_eq!(identity(&json!({"tg_id": 0}), "tg_id"), identity(&json!({"tg_id": -0.0}), "tg_id"));
        assert_ne!(identity(&json!({"tg_id": 1}), "tg_id"), identity(&json!({"tg_id": 1.5}), "tg_id"));
    }
}
