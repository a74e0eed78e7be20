//! Patch application.
//!
//! A pass runs every rule in order: resolve the value, expand the match
//! path, then write the coerced value at each concrete path. The first
//! fatal error aborts the pass and the partially written document is
//! dropped.

mod coerce;

pub use coerce::{coerce, parse_bool, parse_integer};

use confpatch_rules::{ReplacementRule, ValueType};
use serde::Serialize;
use tracing::debug;

use crate::document::{Document, DocumentError, DotPath};
use crate::host::HostConfig;
use crate::matcher::expand;
use crate::resolver::{resolve, Resolution, ResolveError};

/// Write `bytes`, coerced to `value_type`, at `path`.
pub fn apply(
    document: &mut Document,
    path: &DotPath,
    bytes: &[u8],
    value_type: ValueType,
) -> Result<(), DocumentError> {
    document.set(path, coerce(bytes, value_type))
}

/// What a single rule did during a pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleOutcome {
    /// The rule's match path as written.
    #[serde(rename = "match")]
    pub path: String,

    /// Resolved value text, before coercion.
    pub value: String,

    pub value_type: ValueType,

    pub resolution: Resolution,

    /// Concrete paths written, in order.
    pub written: Vec<DotPath>,
}

/// A successfully patched document.
#[derive(Debug, Clone)]
pub struct Patched {
    pub document: Document,
    pub outcomes: Vec<RuleOutcome>,
}

/// Runs replacement rules against documents using one host configuration.
pub struct Patcher<'h> {
    host: &'h dyn HostConfig,
}

impl<'h> Patcher<'h> {
    pub fn new(host: &'h dyn HostConfig) -> Self {
        Self { host }
    }

    /// Parse `data` and apply `rules` to it.
    pub fn patch_bytes(&self, data: &[u8], rules: &[ReplacementRule]) -> Result<Patched, PatchError> {
        let document = Document::parse(data)?;
        self.patch(document, rules)
    }

    /// Apply `rules` to `document` in order.
    pub fn patch(&self, mut document: Document, rules: &[ReplacementRule]) -> Result<Patched, PatchError> {
        let mut outcomes = Vec::with_capacity(rules.len());

        for rule in rules {
            let resolved = resolve(rule, self.host)?;
            let paths = expand(rule.path(), &document);

            debug!(
                rule = rule.path(),
                value_type = %resolved.value_type,
                targets = paths.len(),
                "applying rule"
            );

            for path in &paths {
                apply(&mut document, path, &resolved.bytes, resolved.value_type).map_err(|source| {
                    PatchError::Write {
                        rule: rule.path().to_string(),
                        path: path.to_string(),
                        source,
                    }
                })?;
            }

            outcomes.push(RuleOutcome {
                path: rule.path().to_string(),
                value: resolved.as_text().into_owned(),
                value_type: resolved.value_type,
                resolution: resolved.resolution,
                written: paths,
            });
        }

        Ok(Patched { document, outcomes })
    }
}

/// Patch pass errors
#[derive(Debug, thiserror::Error)]
pub enum PatchError {
    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("rule '{rule}' failed to write '{path}': {source}")]
    Write {
        rule: String,
        path: String,
        source: DocumentError,
    },
}
