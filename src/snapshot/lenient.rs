//! Field deserializers that never reject a snapshot over a single bad value.
//!
//! Collector output is loosely shaped: fields go missing, come back `null`,
//! or change type between CLI versions. Each helper here swallows those cases
//! and falls back to the field's documented default, logging at debug level.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Deserialize `T`, or `T::default()` when the value is `null` or mis-shaped.
pub(crate) fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(T::default());
    }
    match serde_json::from_value(value) {
        Ok(parsed) => Ok(parsed),
        Err(e) => {
            tracing::debug!(error = %e, "unexpected value shape, using default");
            Ok(T::default())
        }
    }
}

/// Deserialize a list, keeping one slot per element even when an element is
/// malformed. A lone non-empty object or string counts as a one-element list;
/// any other non-array value is an empty list.
pub(crate) fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let items = match Value::deserialize(deserializer)? {
        Value::Array(items) => items,
        Value::Object(map) if !map.is_empty() => vec![Value::Object(map)],
        Value::Null | Value::Object(_) => return Ok(Vec::new()),
        Value::String(s) if s.is_empty() => return Ok(Vec::new()),
        Value::String(s) => match serde_json::from_value(Value::String(s)) {
            Ok(item) => return Ok(vec![item]),
            Err(e) => {
                tracing::debug!(error = %e, "expected a list, using empty list");
                return Ok(Vec::new());
            }
        },
        other => {
            tracing::debug!(value = %other, "expected a list, using empty list");
            return Ok(Vec::new());
        }
    };

    Ok(items
        .into_iter()
        .map(|item| {
            serde_json::from_value(item).unwrap_or_else(|e| {
                tracing::debug!(error = %e, "malformed list entry, keeping default entry");
                T::default()
            })
        })
        .collect())
}

/// Deserialize free text. Numbers are kept in their JSON spelling so that
/// `1.2` and `"1.2"` read the same.
pub(crate) fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Null => Ok(None),
        other => {
            tracing::debug!(value = %other, "expected text, treating as unset");
            Ok(None)
        }
    }
}

/// Deserialize a whole count. Integral floats (`2.0`) and numeric strings
/// (`"3"`) are read as the number they spell; anything else is unset.
pub(crate) fn count<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let parsed = match &value {
        Value::Null => return Ok(None),
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(integral)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(integral))
        }
        _ => None,
    };
    if parsed.is_none() {
        tracing::debug!(value = %value, "expected a whole number, treating as unset");
    }
    Ok(parsed)
}

fn integral(n: f64) -> Option<i64> {
    (n.is_finite() && n.fract() == 0.0 && n.abs() < i64::MAX as f64).then_some(n as i64)
}
