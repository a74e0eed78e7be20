//! Host configuration lookup.
//!
//! The host configuration is the embedding process's own settings tree.
//! It is passed into the resolver explicitly and never mutated. Lookups
//! distinguish a missing key, which callers recover from, from every other
//! fault, which aborts the pass.

mod json;

pub use json::JsonHostConfig;

use confpatch_rules::ValueType;
use std::borrow::Cow;

/// A value found in the host configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostValue {
    /// Raw value text. Strings are unquoted, everything else is JSON.
    pub bytes: Vec<u8>,

    /// Kind of the value in the host configuration.
    pub value_type: ValueType,
}

impl HostValue {
    pub fn new(bytes: impl Into<Vec<u8>>, value_type: ValueType) -> Self {
        Self {
            bytes: bytes.into(),
            value_type,
        }
    }

    /// The value as text, replacing invalid UTF-8.
    pub fn as_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.bytes)
    }
}

/// Read-only, byte-oriented key lookup into the host configuration.
pub trait HostConfig {
    /// Look up the value at `path`, one key per segment.
    fn get(&self, path: &[String]) -> Result<HostValue, LookupError>;
}

impl<T: HostConfig + ?Sized> HostConfig for &T {
    fn get(&self, path: &[String]) -> Result<HostValue, LookupError> {
        (**self).get(path)
    }
}

/// Host configuration lookup errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    #[error("key path not found: {0}")]
    NotFound(String),

    #[error("host configuration fault: {0}")]
    Fault(String),
}

impl LookupError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, LookupError::NotFound(_))
    }
}
