//! Forgiving serde readers for persisted numbers and flags.
//!
//! Stored records may come from older versions or be edited by hand, so a
//! numeric field that is missing, `null`, a numeric string or plain garbage
//! never fails the whole load: it becomes the number it denotes, or a
//! default (0 unless the field names its own).

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// The integer a JSON value denotes, if any: numbers (fractions floored) and
/// numeric strings. `None` for null, bools, garbage strings and containers.
pub fn value_as_number(v: &Value) -> Option<i64> {
    let as_float = |f: f64| f.is_finite().then(|| f.floor() as i64);

    match v {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(as_float)),
        Value::String(s) => s.trim().parse::<f64>().ok().and_then(as_float),
        _ => None,
    }
}

/// Best-effort integer reading of a JSON value; `true` is 1, the rest 0.
pub fn value_to_i64(v: &Value) -> i64 {
    value_as_number(v).unwrap_or(matches!(v, Value::Bool(true)) as i64)
}

fn is_truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Integer field; anything unreadable is 0.
pub fn integer<'de, D: Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
    let v = Option::<Value>::deserialize(d)?;
    Ok(v.as_ref().map(value_to_i64).unwrap_or(0))
}

/// Integer field with a fallback for `null` and unreadable values. Explicit
/// numbers, 0 included, are kept.
pub fn integer_or<'de, D: Deserializer<'de>>(d: D, fallback: i64) -> Result<i64, D::Error> {
    let v = Option::<Value>::deserialize(d)?;
    Ok(v.as_ref().and_then(value_as_number).unwrap_or(fallback))
}

/// Optional epoch-ms; zero or unreadable means "not set".
pub fn timestamp<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i64>, D::Error> {
    let v = Option::<Value>::deserialize(d)?;
    Ok(v.as_ref().map(value_to_i64).filter(|ts| *ts != 0))
}

/// Boolean field using truthiness.
pub fn flag<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
    let v = Option::<Value>::deserialize(d)?;
    Ok(v.as_ref().is_some_and(is_truthy))
}

/// String field; numbers are stringified, anything else becomes "".
pub fn text<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    let v = Option::<Value>::deserialize(d)?;
    Ok(match v {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    })
}
