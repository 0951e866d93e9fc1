//! Argument bags handed to the core by the transport layer, plus the
//! parsing helpers shared by the validator and the services.

use chrono::{DateTime, NaiveDate};
use serde_json::Value;

/// Named input values for one operation, as parsed by the transport.
pub type Args = serde_json::Map<String, Value>;

/// Build an [`Args`] bag from a JSON object; anything else yields an empty bag.
pub fn from_json(value: Value) -> Args {
    match value {
        Value::Object(map) => map,
        _ => Args::new(),
    }
}

/// The value under `key`, treating JSON `null` as absent.
pub fn present<'a>(args: &'a Args, key: &str) -> Option<&'a Value> {
    args.get(key).filter(|v| !v.is_null())
}

/// Trimmed text under `key`; absent, null, non-string and blank values yield `None`.
pub fn text(args: &Args, key: &str) -> Option<String> {
    present(args, key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

/// Lower-cased, trimmed email under `key`.
pub fn email(args: &Args, key: &str) -> Option<String> {
    text(args, key).map(|e| e.to_lowercase())
}

/// Numeric value: JSON numbers and numeric strings are accepted.
pub fn number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

/// Calendar date from `YYYY-MM-DD` or an RFC 3339 timestamp.
pub fn calendar_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|d| d.date_naive()))
}
