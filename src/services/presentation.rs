//! Field reshaping applied to upstream records before rendering pages.

use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;

use crate::models::record::{self, is_truthy};

/// Shown wherever a value is missing.
pub const PLACEHOLDER: &str = "—";

const HUMAN_FORMAT: &str = "%d.%m.%Y %H:%M";

/// Parse an ISO 8601 timestamp, with or without offset. A bare date is
/// midnight.
pub(crate) fn parse_iso(raw: &str) -> Option<NaiveDateTime> {
    let normalized = raw.trim().replace('Z', "+00:00");
    if let Ok(dt) = DateTime::parse_from_rfc3339(&normalized) {
        return Some(dt.naive_local());
    }
    if let Ok(dt) = DateTime::parse_from_str(&normalized, "%Y-%m-%d %H:%M:%S%.f%:z") {
        return Some(dt.naive_local());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(&normalized, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(&normalized, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

/// `DD.MM.YYYY HH:MM` for an ISO timestamp, the raw value if it cannot be
/// parsed, or the placeholder when missing.
pub fn human_created_at(created: Option<&Value>) -> Value {
    match created {
        Some(Value::String(raw)) if !raw.is_empty() => match parse_iso(raw) {
            Some(dt) => Value::String(dt.format(HUMAN_FORMAT).to_string()),
            None => Value::String(raw.clone()),
        },
        Some(other) if is_truthy(other) => other.clone(),
        _ => Value::String(PLACEHOLDER.to_string()),
    }
}

/// Adds `created_at_human` to every gift.
pub fn annotate_gifts(gifts: &mut [Value]) {
    for gift in gifts.iter_mut() {
        let human = human_created_at(gift.get("created_at"));
        if let Some(map) = gift.as_object_mut() {
            map.insert("created_at_human".to_string(), human);
        }
    }
}

/// Adds `expiry_date` and `expiry_time_human` to every key. `expiry_time`
/// is epoch milliseconds.
pub fn annotate_keys(keys: &mut [Value]) {
    for key in keys.iter_mut() {
        let expiry = key
            .get("expiry_time")
            .filter(|v| v.is_number())
            .and_then(Value::as_f64)
            .and_then(|millis| DateTime::from_timestamp_millis(millis as i64));

        let expiry_date = expiry
            .map(|dt| Value::String(dt.format("%Y-%m-%d").to_string()))
            .unwrap_or(Value::Null);

        let expiry_human = match expiry {
            Some(dt) if record::flag(key, "expiry_time") => dt.format(HUMAN_FORMAT).to_string(),
            _ => PLACEHOLDER.to_string(),
        };

        if let Some(map) = key.as_object_mut() {
            map.insert("expiry_date".to_string(), expiry_date);
            map.insert("expiry_time_human".to_string(), Value::String(expiry_human));
        }
    }
}

/// Replaces a missing or `null` `subgroup_title` with the placeholder.
pub fn fill_subgroup_titles(tariffs: &mut [Value]) {
    for tariff in tariffs.iter_mut() {
        if let Some(map) = tariff.as_object_mut() {
            let missing = map.get("subgroup_title").map_or(true, Value::is_null);
            if missing {
                map.insert(
                    "subgroup_title".to_string(),
                    Value::String(PLACEHOLDER.to_string()),
                );
            }
        }
    }
}

/// Sorted distinct tariff group codes. A missing code counts as `""`.
pub fn group_codes(tariffs: &[Value]) -> Vec<String> {
    tariffs
        .iter()
        .map(|t| {
            record::str_field(t, "group_code")
                .unwrap_or_default()
                .to_string()
        })
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Exposes `updated_at` as `last_active` on a user record.
pub fn annotate_user(user: &mut record::Record) {
    let last_active = user.get("updated_at").cloned().unwrap_or(Value::Null);
    user.insert("last_active".to_string(), last_active);
}
