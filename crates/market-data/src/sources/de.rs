//! Lenient deserializers for upstream payloads.
//!
//! Exchange feeds are inconsistent about numeric fields: the same value may
//! arrive as a JSON number, a string with thousands separators, or a
//! placeholder like `"-"`. These helpers accept all of those and map
//! placeholders to `None`.

use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::session::ist;

/// Local (IST) timestamp layouts seen in exchange payloads.
const IST_FORMATS: &[&str] = &[
    "%d-%b-%Y %H:%M:%S",
    "%d %b %Y %H:%M:%S",
    "%d %b %Y %H:%M",
    "%Y-%m-%d %H:%M:%S",
];

fn clean(s: &str) -> Option<String> {
    let cleaned: String = s.chars().filter(|c| *c != ',' && !c.is_whitespace()).collect();
    match cleaned.as_str() {
        "" | "-" | "--" | "NA" | "N/A" => None,
        _ => Some(cleaned),
    }
}

fn parse_decimal(s: &str) -> Option<Decimal> {
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .ok()
}

/// Convert a loosely typed JSON value to a decimal.
pub fn decimal_from_value(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => parse_decimal(&n.to_string()),
        Value::String(s) => clean(s).and_then(|s| parse_decimal(&s)),
        _ => None,
    }
}

/// Convert a loosely typed JSON value to a non-negative integer.
pub fn u64_from_value(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)),
        Value::String(_) => decimal_from_value(value)
            .filter(|d| !d.is_sign_negative())
            .and_then(|d| d.trunc().to_string().parse().ok()),
        _ => None,
    }
}

/// `Option<Decimal>` from a number, numeric string, or placeholder.
pub fn flexible_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(decimal_from_value))
}

/// `Option<u64>` from a number, numeric string, or placeholder.
pub fn flexible_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(u64_from_value))
}

/// `Option<String>` from a string or a number (scrip codes arrive as both).
pub fn flexible_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Parse an exchange timestamp.
///
/// RFC 3339 strings carry their own offset; the other layouts are IST wall time.
pub fn parse_exchange_time(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    IST_FORMATS.iter().find_map(|format| {
        NaiveDateTime::parse_from_str(raw, format)
            .ok()
            .and_then(|naive| ist().from_local_datetime(&naive).single())
            .map(|dt| dt.with_timezone(&Utc))
    })
}
