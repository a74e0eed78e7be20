//! Replacement rule types.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Marker that splits a match path into a search root and a per-child suffix.
pub const WILDCARD_MARKER: &str = ".*";

/// Scalar kind a resolved value is coerced into before it is written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    #[default]
    String,
    Number,
    Boolean,
    Null,
    Object,
    Array,
}

impl ValueType {
    /// Kind of a JSON value, as declared by a rule file.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::String(_) => ValueType::String,
            Value::Number(_) => ValueType::Number,
            Value::Bool(_) => ValueType::Boolean,
            Value::Null => ValueType::Null,
            Value::Object(_) => ValueType::Object,
            Value::Array(_) => ValueType::Array,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ValueType::String => "string",
            ValueType::Number => "number",
            ValueType::Boolean => "boolean",
            ValueType::Null => "null",
            ValueType::Object => "object",
            ValueType::Array => "array",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single path/value replacement.
///
/// Rules are immutable once built. The declared [`ValueType`] travels with
/// the rule through resolution unchanged; only the value text may be
/// rewritten by placeholder substitution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawRule")]
pub struct ReplacementRule {
    #[serde(rename = "match")]
    path: String,

    #[serde(rename = "replace_with")]
    value: String,

    value_type: ValueType,
}

impl ReplacementRule {
    pub fn new(path: impl Into<String>, value: impl Into<String>, value_type: ValueType) -> Self {
        Self {
            path: path.into(),
            value: value.into(),
            value_type,
        }
    }

    /// Dot-notated target path, possibly containing a wildcard marker.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Literal value, possibly containing a config placeholder.
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    pub fn is_wildcard(&self) -> bool {
        self.path.contains(WILDCARD_MARKER)
    }
}

/// Wire shape of a rule as it appears in rule files.
///
/// `replace_with` may be any JSON value; its kind becomes the declared type
/// unless `value_type` says otherwise.
#[derive(Debug, Deserialize)]
struct RawRule {
    #[serde(rename = "match")]
    path: String,

    replace_with: Value,

    #[serde(default)]
    value_type: Option<ValueType>,
}

impl From<RawRule> for ReplacementRule {
    fn from(raw: RawRule) -> Self {
        let inferred = ValueType::of(&raw.replace_with);
        let value = match raw.replace_with {
            Value::String(s) => s,
            other => other.to_string(),
        };

        Self {
            path: raw.path,
            value,
            value_type: raw.value_type.unwrap_or(inferred),
        }
    }
}
