//! Rule set loading from TOML and JSON files.
//!
//! TOML rule files use `[[replace]]` tables. JSON rule files may be a bare
//! array of rules or an object with a `replace` array.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::rule::ReplacementRule;

/// An ordered list of replacement rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSet {
    #[serde(default, rename = "replace")]
    pub rules: Vec<ReplacementRule>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum JsonRules {
    Bare(Vec<ReplacementRule>),
    Wrapped(RuleSet),
}

impl RuleSet {
    pub fn new(rules: Vec<ReplacementRule>) -> Self {
        Self { rules }
    }

    /// Parse a TOML rule file.
    pub fn from_toml(contents: &str) -> Result<Self, RuleError> {
        toml::from_str(contents).map_err(|e| RuleError::ParseError(format!("TOML parse error: {}", e)))
    }

    /// Parse a JSON rule file.
    pub fn from_json(contents: &str) -> Result<Self, RuleError> {
        let parsed: JsonRules = serde_json::from_str(contents)
            .map_err(|e| RuleError::ParseError(format!("JSON parse error: {}", e)))?;

        Ok(match parsed {
            JsonRules::Bare(rules) => Self { rules },
            JsonRules::Wrapped(set) => set,
        })
    }

    /// Load a rule file, choosing the format from its extension.
    ///
    /// Files ending in `.toml` are read as TOML, everything else as JSON.
    pub fn from_file(path: &Path) -> Result<Self, RuleError> {
        let contents = fs::read_to_string(path)
            .map_err(|e| RuleError::IoError(format!("{}: {}", path.display(), e)))?;

        let set = match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Self::from_toml(&contents)?,
            _ => Self::from_json(&contents)?,
        };

        tracing::debug!(path = %path.display(), rules = set.rules.len(), "loaded rule set");
        Ok(set)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ReplacementRule> {
        self.rules.iter()
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a ReplacementRule;
    type IntoIter = std::slice::Iter<'a, ReplacementRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

/// Rule file errors
#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),
}
