//! Coercion of resolved bytes into document scalars.
//!
//! Coercion never fails: text that does not parse as the declared type
//! becomes that type's zero value.

use confpatch_rules::ValueType;
use serde_json::Value;
use std::num::IntErrorKind;

/// Coerce `bytes` into a scalar of kind `value_type`.
pub fn coerce(bytes: &[u8], value_type: ValueType) -> Value {
    let text = String::from_utf8_lossy(bytes);
    match value_type {
        ValueType::Number => Value::from(parse_integer(&text)),
        ValueType::Boolean => Value::Bool(parse_bool(&text)),
        _ => Value::String(text.into_owned()),
    }
}

/// Parse a base-10 integer. Out-of-range values clamp to the i64 bounds and
/// anything else unparseable is `0`.
pub fn parse_integer(text: &str) -> i64 {
    match text.parse::<i64>() {
        Ok(n) => n,
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => i64::MAX,
            IntErrorKind::NegOverflow => i64::MIN,
            _ => 0,
        },
    }
}

/// Parse a boolean spelling; anything unrecognised is `false`.
pub fn parse_bool(text: &str) -> bool {
    matches!(text, "1" | "t" | "T" | "TRUE" | "true" | "True")
}
