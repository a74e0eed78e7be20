//! Dotted paths into a document.
//!
//! Segments are separated by `.`. Inside a segment `~1` stands for a literal
//! dot and `~0` for a literal tilde. Numeric segments address array elements
//! when the node they are applied to is an array. Parsing never yields the
//! root path: the empty string is the single empty key `""`, like any empty
//! segment between dots. [`DotPath::root`] addresses the whole document.

use serde::{Serialize, Serializer};
use std::fmt;

/// A concrete, wildcard-free location in a document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct DotPath(Vec<String>);

impl DotPath {
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Parse a dot-notated path.
    pub fn parse(path: &str) -> Self {
        Self(path.split('.').map(unescape).collect())
    }

    pub fn from_segments(segments: Vec<String>) -> Self {
        Self(segments)
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// This path extended by one raw (unescaped) segment.
    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment.into());
        Self(segments)
    }

    /// This path followed by every segment of `suffix`.
    pub fn join(&self, suffix: &DotPath) -> Self {
        let mut segments = self.0.clone();
        segments.extend(suffix.0.iter().cloned());
        Self(segments)
    }

    /// The first `len` segments of this path.
    pub fn prefix(&self, len: usize) -> Self {
        Self(self.0.iter().take(len).cloned().collect())
    }
}

fn unescape(segment: &str) -> String {
    segment.replace("~1", ".").replace("~0", "~")
}

fn escape(segment: &str) -> String {
    segment.replace('~', "~0").replace('.', "~1")
}

impl fmt::Display for DotPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            f.write_str(&escape(segment))?;
        }
        Ok(())
    }
}

impl From<&str> for DotPath {
    fn from(path: &str) -> Self {
        Self::parse(path)
    }
}

impl Serialize for DotPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
