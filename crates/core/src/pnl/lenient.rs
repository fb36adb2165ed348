//! Fail-soft deserializers for row fields.
//!
//! A single bad value must never reject a whole payload. Amounts, dates, and
//! IDs that cannot be parsed deserialize to `None`; enums and labels fall back
//! to their defaults.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Deserializes a monetary or numeric field that may be a number, a numeric
/// string (`"1,250.00"`, `"$80"`), null, or garbage.
pub fn amount<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(parse_amount))
}

/// Deserializes a date field given as `YYYY-MM-DD` or an RFC 3339 timestamp.
pub fn date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(parse_date))
}

/// Deserializes any field, falling back to `T::default()` on null or on a
/// value of the wrong shape (e.g. `"status": 3`).
pub fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .and_then(|value| T::deserialize(value).ok())
        .unwrap_or_default())
}

/// Deserializes an identifier, yielding `None` for anything that does not
/// parse (e.g. a legacy `"d-17"` where a UUID is expected).
pub fn id<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(text)) => text.trim().parse().ok(),
        _ => None,
    })
}

/// Deserializes a free-form label; null and non-text values become `""`.
pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(parse_text).unwrap_or_default())
}

/// Deserializes an optional label; blank and non-text values become `None`.
pub fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(parse_text)
        .filter(|text| !text.trim().is_empty()))
}

/// Reads a label from a string or a bare number.
#[must_use]
pub fn parse_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

/// Parses a JSON value into a decimal, returning `None` if it is not numeric.
#[must_use]
pub fn parse_amount(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(number) => {
            let text = number.to_string();
            Decimal::from_str(&text)
                .or_else(|_| Decimal::from_scientific(&text))
                .ok()
        }
        Value::String(text) => {
            let cleaned: String = text
                .trim()
                .trim_start_matches('$')
                .chars()
                .filter(|c| *c != ',')
                .collect();
            if cleaned.is_empty() {
                return None;
            }
            Decimal::from_str(&cleaned).ok()
        }
        _ => None,
    }
}

/// Parses a JSON value into a calendar date.
///
/// Timestamps are converted to UTC before taking the date.
#[must_use]
pub fn parse_date(value: &Value) -> Option<NaiveDate> {
    let Value::String(text) = value else {
        return None;
    };
    let text = text.trim();

    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(text)
                .ok()
                .map(|dt| dt.with_timezone(&Utc).date_naive())
        })
        .or_else(|| {
            NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|dt| dt.date())
        })
}
