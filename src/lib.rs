//! confpatch - rule-driven field replacement for configuration documents
//!
//! This crate rewrites fields inside an already-parsed JSON document
//! according to an ordered list of replacement rules. A rule value may
//! reference the host process's own configuration through a
//! `{{ config.<path> }}` placeholder, and a match path may fan out across
//! every child of a node with a single `.*` wildcard.

pub mod document;
pub mod explain;
pub mod host;
pub mod matcher;
pub mod patch;
pub mod report;
pub mod resolver;

pub use confpatch_rules::{ReplacementRule, RuleError, RuleSet, ValueType};
pub use document::{Document, DocumentError, DotPath};
pub use explain::ExplainOutput;
pub use host::{HostConfig, HostValue, JsonHostConfig, LookupError};
pub use matcher::expand;
pub use patch::{apply, PatchError, Patched, Patcher, RuleOutcome};
pub use report::PatchReport;
pub use resolver::{resolve, Resolution, ResolveError, ResolvedValue};
