//! Value resolution for replacement rules.
//!
//! A rule value without a `{{ config.<path> }}` placeholder is used as is.
//! Otherwise the first placeholder's path is looked up in the host
//! configuration and substituted into the value. A missing host key leaves
//! the value untouched so the unresolved placeholder shows up in the
//! output; any other lookup failure is fatal.

use confpatch_rules::{find_placeholder, substitute, ReplacementRule, ValueType};
use serde::Serialize;
use std::borrow::Cow;
use tracing::{debug, warn};

use crate::host::{HostConfig, LookupError};

/// How a rule's value was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Resolution {
    /// The value had no placeholder.
    Literal,
    /// The placeholder was replaced with a host configuration value.
    Substituted,
    /// The host key was missing; the value kept its placeholder.
    Unresolved,
}

/// The bytes to write for one rule, with the rule's declared type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedValue {
    pub bytes: Vec<u8>,
    pub value_type: ValueType,
    pub resolution: Resolution,
}

impl ResolvedValue {
    fn from_rule(rule: &ReplacementRule, resolution: Resolution) -> Self {
        Self {
            bytes: rule.value().as_bytes().to_vec(),
            value_type: rule.value_type(),
            resolution,
        }
    }

    pub fn as_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.bytes)
    }
}

/// Resolve a rule's value against the host configuration.
pub fn resolve(rule: &ReplacementRule, host: &dyn HostConfig) -> Result<ResolvedValue, ResolveError> {
    let Some(placeholder) = find_placeholder(rule.value()) else {
        return Ok(ResolvedValue::from_rule(rule, Resolution::Literal));
    };

    let lookup = placeholder.lookup_segments();
    match host.get(&lookup) {
        Ok(found) => {
            let replaced = substitute(rule.value(), &found.as_text());
            debug!(
                rule = rule.path(),
                placeholder = placeholder.token,
                host_type = %found.value_type,
                "substituted host configuration value"
            );
            Ok(ResolvedValue {
                bytes: replaced.into_bytes(),
                value_type: rule.value_type(),
                resolution: Resolution::Substituted,
            })
        }
        Err(LookupError::NotFound(key)) => {
            warn!(
                rule = rule.path(),
                placeholder = placeholder.token,
                key = %key,
                "host configuration key not found, keeping literal value"
            );
            Ok(ResolvedValue::from_rule(rule, Resolution::Unresolved))
        }
        Err(source) => Err(ResolveError::HostLookup {
            rule: rule.path().to_string(),
            placeholder: placeholder.token.to_string(),
            source,
        }),
    }
}

/// Resolution errors
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("failed to resolve {placeholder} for rule '{rule}': {source}")]
    HostLookup {
        rule: String,
        placeholder: String,
        source: LookupError,
    },
}
