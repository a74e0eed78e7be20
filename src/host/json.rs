//! Host configuration backed by JSON bytes.

use confpatch_rules::ValueType;
use serde_json::Value;
use std::fs;
use std::path::Path;

use super::{HostConfig, HostValue, LookupError};

/// Host configuration held as raw JSON bytes.
///
/// The bytes are parsed on every lookup, so a malformed store surfaces as
/// [`LookupError::Fault`] at the rule that first touches it rather than at
/// construction.
#[derive(Debug, Clone, Default)]
pub struct JsonHostConfig {
    raw: Vec<u8>,
}

impl JsonHostConfig {
    pub fn new(raw: impl Into<Vec<u8>>) -> Self {
        Self { raw: raw.into() }
    }

    /// A host configuration with no keys.
    pub fn empty() -> Self {
        Self::new(b"{}".to_vec())
    }

    pub fn from_value(value: &Value) -> Self {
        Self::new(value.to_string().into_bytes())
    }

    /// Load a host configuration file.
    ///
    /// `.toml` files are converted to JSON; anything else is kept as raw
    /// bytes and treated as JSON.
    pub fn from_file(path: &Path) -> Result<Self, LookupError> {
        let bytes = fs::read(path)
            .map_err(|e| LookupError::Fault(format!("{}: {}", path.display(), e)))?;

        if path.extension().and_then(|e| e.to_str()) != Some("toml") {
            return Ok(Self::new(bytes));
        }

        let contents = String::from_utf8(bytes)
            .map_err(|e| LookupError::Fault(format!("Invalid UTF-8: {}", e)))?;
        let toml_value: toml::Value = toml::from_str(&contents)
            .map_err(|e| LookupError::Fault(format!("TOML parse error: {}", e)))?;

        Ok(Self::from_value(&toml_to_json(toml_value)))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.raw
    }
}

impl HostConfig for JsonHostConfig {
    fn get(&self, path: &[String]) -> Result<HostValue, LookupError> {
        let root: Value = serde_json::from_slice(&self.raw)
            .map_err(|e| LookupError::Fault(format!("malformed host configuration: {}", e)))?;

        let mut current = &root;
        for key in path {
            let next = match current {
                Value::Object(map) => map.get(key),
                Value::Array(items) => key.parse::<usize>().ok().and_then(|i| items.get(i)),
                _ => None,
            };
            current = next.ok_or_else(|| LookupError::NotFound(path.join(".")))?;
        }

        Ok(match current {
            Value::String(s) => HostValue::new(s.as_bytes(), ValueType::String),
            other => HostValue::new(other.to_string(), ValueType::of(other)),
        })
    }
}

/// Convert a TOML value to its JSON equivalent.
fn toml_to_json(toml: toml::Value) -> Value {
    match toml {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::Number(i.into()),
        toml::Value::Float(f) => serde_json::Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(arr) => Value::Array(arr.into_iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => Value::Object(
            table
                .into_iter()
                .map(|(k, v)| (k, toml_to_json(v)))
                .collect(),
        ),
    }
}
