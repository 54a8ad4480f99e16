//! Field deserializers that never fail a record over one bad value.
//!
//! Use with `#[serde(default, deserialize_with = "...")]`. A missing, `null`,
//! or wrongly-typed value decodes to `None`; numbers are accepted where
//! strings are expected and numeric strings where integers are expected.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Integer from a JSON integer or a numeric string.
///
/// # Errors
///
/// Only on malformed input that is not JSON at all.
pub fn opt_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }))
}

/// Like [`opt_i64`], restricted to values that fit a `u32`.
///
/// # Errors
///
/// Only on malformed input that is not JSON at all.
pub fn opt_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(opt_i64(deserializer)?.and_then(|n| u32::try_from(n).ok()))
}

/// Like [`opt_i64`], restricted to non-negative values.
///
/// # Errors
///
/// Only on malformed input that is not JSON at all.
pub fn opt_usize<'de, D>(deserializer: D) -> Result<Option<usize>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(opt_i64(deserializer)?.and_then(|n| usize::try_from(n).ok()))
}

/// String from a JSON string, or the textual form of a JSON number.
///
/// # Errors
///
/// Only on malformed input that is not JSON at all.
pub fn opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }))
}
