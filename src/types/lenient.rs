//! Field decoders for records forwarded from the remote service.
//!
//! None of these fail on a well-formed JSON value: `null` or a value of the
//! wrong kind reads as the field's default.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// Key under which a non-object `data` value is kept.
pub(crate) const RAW_VALUE_KEY: &str = "value";

/// Text field. Other scalars keep their JSON text.
pub(crate) fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(optional_text(Value::deserialize(deserializer)?).unwrap_or_default())
}

pub(crate) fn optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(optional_text(Value::deserialize(deserializer)?))
}

/// Amount that may arrive as a number or as numeric text.
pub(crate) fn number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(as_f64(&Value::deserialize(deserializer)?).unwrap_or_default())
}

/// Counter that may arrive as an integer, an integral float (`96.0`) or
/// numeric text.
pub(crate) fn integer<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<i64> + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(as_i64(&value)
        .and_then(|n| T::try_from(n).ok())
        .unwrap_or_default())
}

/// Nested record; anything that does not decode reads as the default.
pub(crate) fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_default())
}

/// Fields of a `data` value that did not decode into a record.
pub(crate) fn raw_fields(data: Value) -> Map<String, Value> {
    match data {
        Value::Object(fields) => fields,
        other => Map::from_iter([(RAW_VALUE_KEY.to_string(), other)]),
    }
}

fn optional_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

fn as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn as_i64(value: &Value) -> Option<i64> {
    if let Some(n) = value.as_i64() {
        return Some(n);
    }
    as_f64(value)
        .filter(|f| f.is_finite() && f.fract() == 0.0)
        .map(|f| f as i64)
}
