//! The mutable document tree a patch pass writes into.
//!
//! The tree is a [`serde_json::Value`]: objects, arrays, strings, numbers,
//! booleans and null. [`Document::set`] follows SetP semantics: missing
//! intermediate objects are created, existing values are overwritten
//! whatever their kind, and descending through a scalar is an error.

mod path;

pub use path::DotPath;

use serde_json::{Map, Value};

/// A parsed document owned by a single patch pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    root: Value,
}

impl Document {
    /// Parse JSON bytes.
    pub fn parse(bytes: &[u8]) -> Result<Self, DocumentError> {
        let root = serde_json::from_slice(bytes)
            .map_err(|e| DocumentError::Malformed(e.to_string()))?;
        Ok(Self { root })
    }

    pub fn from_value(root: Value) -> Self {
        Self { root }
    }

    pub fn as_value(&self) -> &Value {
        &self.root
    }

    pub fn into_value(self) -> Value {
        self.root
    }

    /// Look up the node at `path`.
    pub fn get(&self, path: &DotPath) -> Option<&Value> {
        let mut current = &self.root;
        for segment in path.segments() {
            current = match current {
                Value::Object(map) => map.get(segment)?,
                Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }
        Some(current)
    }

    /// Paths of the direct children of the node at `path`.
    ///
    /// Object members come back in document order and array elements by
    /// index. A missing node, null or scalar has no children.
    pub fn child_paths(&self, path: &DotPath) -> Vec<DotPath> {
        match self.get(path) {
            Some(Value::Object(map)) => map.keys().map(|k| path.child(k.as_str())).collect(),
            Some(Value::Array(items)) => (0..items.len()).map(|i| path.child(i.to_string())).collect(),
            _ => Vec::new(),
        }
    }

    /// Write `value` at `path`.
    pub fn set(&mut self, path: &DotPath, value: Value) -> Result<(), DocumentError> {
        let Some((last, parents)) = path.segments().split_last() else {
            self.root = value;
            return Ok(());
        };

        let mut current = &mut self.root;
        for (depth, segment) in parents.iter().enumerate() {
            current = descend(current, segment, path, depth)?;
        }

        write_leaf(current, last, value, path)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.root)
    }

    pub fn to_vec(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(&self.root)
    }
}

fn descend<'a>(
    node: &'a mut Value,
    segment: &str,
    path: &DotPath,
    depth: usize,
) -> Result<&'a mut Value, DocumentError> {
    if node.is_null() {
        *node = Value::Object(Map::new());
    }

    match node {
        Value::Object(map) => Ok(map
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Map::new()))),
        Value::Array(items) => {
            let index = parse_index(segment, path)?;
            let len = items.len();
            items
                .get_mut(index)
                .ok_or_else(|| DocumentError::IndexOutOfBounds {
                    path: path.to_string(),
                    index,
                    len,
                })
        }
        other => Err(DocumentError::PathCollision {
            path: path.to_string(),
            at: path.prefix(depth).to_string(),
            found: kind(other),
        }),
    }
}

fn write_leaf(
    node: &mut Value,
    segment: &str,
    value: Value,
    path: &DotPath,
) -> Result<(), DocumentError> {
    if node.is_null() {
        *node = Value::Object(Map::new());
    }

    match node {
        Value::Object(map) => {
            map.insert(segment.to_string(), value);
            Ok(())
        }
        Value::Array(items) if segment == "-" => {
            items.push(value);
            Ok(())
        }
        Value::Array(items) => {
            let index = parse_index(segment, path)?;
            let len = items.len();
            match items.get_mut(index) {
                Some(slot) => {
                    *slot = value;
                    Ok(())
                }
                None => Err(DocumentError::IndexOutOfBounds {
                    path: path.to_string(),
                    index,
                    len,
                }),
            }
        }
        other => Err(DocumentError::PathCollision {
            path: path.to_string(),
            at: path.prefix(path.len() - 1).to_string(),
            found: kind(other),
        }),
    }
}

fn parse_index(segment: &str, path: &DotPath) -> Result<usize, DocumentError> {
    segment.parse().map_err(|_| DocumentError::NotAnIndex {
        path: path.to_string(),
        segment: segment.to_string(),
    })
}

/// Name of a node's kind, for error messages.
pub fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Document errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DocumentError {
    #[error("malformed document: {0}")]
    Malformed(String),

    #[error("cannot set '{path}': '{at}' is a {found}, not a container")]
    PathCollision {
        path: String,
        at: String,
        found: &'static str,
    },

    #[error("cannot set '{path}': array segment '{segment}' is not an index")]
    NotAnIndex { path: String, segment: String },

    #[error("cannot set '{path}': index {index} out of bounds (len: {len})")]
    IndexOutOfBounds {
        path: String,
        index: usize,
        len: usize,
    },
}
