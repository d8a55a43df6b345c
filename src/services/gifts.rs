//! Gift payload preparation.

use chrono::{Duration, NaiveDate, NaiveDateTime, Timelike};
use serde_json::Value;

use crate::errors::AppError;
use crate::models::record::Record;
use crate::services::presentation::parse_iso;

/// Lifetime of a gift created without an explicit expiry.
pub const DEFAULT_GIFT_LIFETIME_DAYS: i64 = 30;

const DATETIME_FORMATS: &[&str] = &["%d.%m.%Y %H:%M:%S", "%d.%m.%Y %H:%M", "%Y/%m/%d %H:%M:%S", "%Y/%m/%d %H:%M"];
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d.%m.%Y", "%Y/%m/%d"];

/// Parse a user-entered date or date-time. Any offset is dropped, keeping
/// the wall-clock value; a bare date means midnight.
pub fn parse_free_form(raw: &str) -> Option<NaiveDateTime> {
    let trimmed = raw.trim();
    if let Some(dt) = parse_iso(trimmed) {
        return Some(dt);
    }
    if let Some(dt) = DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
    {
        return Some(dt);
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

/// `YYYY-MM-DD HH:MM:SS`, with microseconds appended only when non-zero.
pub fn format_expiry(dt: NaiveDateTime) -> String {
    let base = dt.format("%Y-%m-%d %H:%M:%S").to_string();
    match dt.nanosecond() / 1_000 {
        0 => base,
        micros => format!("{base}.{micros:06}"),
    }
}

/// Rewrites `expiry_time` as a timezone-free timestamp, defaulting to
/// `now` plus [`DEFAULT_GIFT_LIFETIME_DAYS`] when absent or empty.
pub fn normalize_expiry(payload: &mut Record, now: NaiveDateTime) -> Result<(), AppError> {
    let expiry = match payload.get("expiry_time") {
        None | Some(Value::Null) => now + Duration::days(DEFAULT_GIFT_LIFETIME_DAYS),
        Some(Value::String(raw)) if raw.trim().is_empty() => {
            now + Duration::days(DEFAULT_GIFT_LIFETIME_DAYS)
        }
        Some(Value::String(raw)) => parse_free_form(raw)
            .ok_or_else(|| AppError::Validation(format!("Unrecognised expiry_time: {raw}")))?,
        Some(_) => {
            return Err(AppError::Validation(
                "expiry_time must be a date string".to_string(),
            ))
        }
    };

    payload.insert("expiry_time".to_string(), Value::String(format_expiry(expiry)));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 17)
            .unwrap()
            .and_hms_opt(12, 30, 0)
            .unwrap()
    }

    fn payload(value: Value) -> Record {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn missing_expiry_defaults_to_thirty_days() {
        let mut body = payload(json!({"tariff": "month"}));
        normalize_expiry(&mut body, now()).unwrap();
        assert_eq!(body["expiry_time"], "2026-11-16 12:30:00");
        assert_eq!(body["tariff"], "month");
    }

    #[test]
    fn null_and_empty_expiry_default() {
        for value in [json!(null), json!(""), json!("   ")] {
            let mut body = payload(json!({"expiry_time": value}));
            normalize_expiry(&mut body, now()).unwrap();
            assert_eq!(body["expiry_time"], "2026-11-16 12:30:00");
        }
    }

    #[test]
    fn timezone_stripped_keeping_wall_clock() {
        let mut body = payload(json!({"expiry_time": "2026-12-31T23:59:00+03:00"}));
        normalize_expiry(&mut body, now()).unwrap();
        assert_eq!(body["expiry_time"], "2026-12-31 23:59:00");

        let mut body = payload(json!({"expiry_time": "2026-12-31T20:00:00Z"}));
        normalize_expiry(&mut body, now()).unwrap();
        assert_eq!(body["expiry_time"], "2026-12-31 20:00:00");
    }

    #[test]
    fn free_form_inputs_accepted() {
        let cases = [
            ("2027-01-05", "2027-01-05 00:00:00"),
            ("2027-01-05T08:15", "2027-01-05 08:15:00"),
            ("2027-01-05 08:15:30.250000", "2027-01-05 08:15:30.250000"),
            ("05.01.2027", "2027-01-05 00:00:00"),
            ("05.01.2027 08:15", "2027-01-05 08:15:00"),
        ];
        for (input, expected) in cases {
            let parsed = parse_free_form(input).unwrap_or_else(|| panic!("failed to parse {input}"));
            assert_eq!(format_expiry(parsed), expected);
        }
    }

    #[test]
    fn garbage_expiry_rejected() {
        let mut body = payload(json!({"expiry_time": "next tuesday"}));
        let err = normalize_expiry(&mut body, now()).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let mut body = payload(json!({"expiry_time": 1700000000}));
        assert!(normalize_expiry(&mut body, now()).is_err());
    }
}
