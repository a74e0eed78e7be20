//! Replacement rules for confpatch.
//!
//! A rule names a dotted path in a target document and the value to write
//! there. The value may embed a `{{ config.<path> }}` placeholder which is
//! resolved against the host configuration before the write happens.

mod loader;
mod placeholder;
mod rule;

pub use loader::{RuleError, RuleSet};
pub use placeholder::{camel_case, find_placeholder, substitute, Placeholder};
pub use rule::{ReplacementRule, ValueType, WILDCARD_MARKER};
