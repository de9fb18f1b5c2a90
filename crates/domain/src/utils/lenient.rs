//! Lenient numeric coercion
//!
//! The remote service stringifies identifiers inconsistently: the same field
//! may arrive as `42`, `"42"`, `"42.0"` or `""` depending on the endpoint.
//! The optional helpers absorb that and map anything unusable to `None`;
//! [`de_u64`] is for required identifiers and rejects unusable values.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Numeric value of a JSON scalar, or `None`.
///
/// Accepts numbers and numeric strings (surrounding whitespace ignored).
/// Everything else, including empty strings, booleans and non-finite
/// values, yields `None`.
pub fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|n| n.is_finite())
}

/// 2^64, the first float past the `u64` range
const U64_LIMIT: f64 = 18_446_744_073_709_551_616.0;

/// Non-negative integral value of a JSON scalar, or `None`.
///
/// Values at or above 2^64 are rejected rather than saturated.
pub fn coerce_u64(value: &Value) -> Option<u64> {
    if let Value::Number(n) = value {
        if let Some(v) = n.as_u64() {
            return Some(v);
        }
    }
    coerce_number(value).filter(|n| *n < U64_LIMIT).and_then(|n| {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let whole = n as u64;
        #[allow(clippy::cast_precision_loss)]
        let exact = n >= 0.0 && n.fract() == 0.0 && whole as f64 == n;
        exact.then_some(whole)
    })
}

/// Serde helper: optional `u64` from a number or numeric string.
pub fn de_opt_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(coerce_u64))
}

/// Serde helper: required `u64` from a number or numeric string.
///
/// `null`, empty and non-numeric values are a deserialization error so a
/// record never silently takes identifier `0`.
pub fn de_u64<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    de_opt_u64(deserializer)?.ok_or_else(|| D::Error::custom("expected a numeric identifier"))
}

/// Serde helper: optional `bool` from `true`/`false`, `1`/`0` or `"1"`/`"0"`.
pub fn de_opt_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Bool(b)) => Some(b),
        Some(other) => coerce_number(&other).map(|n| n != 0.0),
        None => None,
    })
}

/// Serde helper: optional string from a string or number, empty → `None`.
pub fn de_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) if !s.is_empty() => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}
