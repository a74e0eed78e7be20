//! Match path expansion.
//!
//! A match path holding the `.*` marker is split on its first occurrence
//! into a search root and a suffix. Every direct child of the search root
//! yields one concrete path: the child's path followed by the suffix. Only
//! one marker is honored; any later `*` stays a literal key segment.
//!
//! An empty half after trimming is the single empty key `""`, so `.*.bind`
//! searches under `""` and `worlds.*` writes `""` inside each child.

use confpatch_rules::WILDCARD_MARKER;
use serde_json::Value;

use crate::document::{Document, DotPath};

/// Expand `path` into the concrete paths it addresses in `document`.
///
/// A path without a wildcard always yields exactly itself, whether or not it
/// exists yet. A wildcard whose search root is missing, null or a scalar
/// yields nothing, and null children of the search root are skipped.
pub fn expand(path: &str, document: &Document) -> Vec<DotPath> {
    let Some((prefix, suffix)) = split_wildcard(path) else {
        return vec![DotPath::parse(path)];
    };

    let suffix = DotPath::parse(suffix);
    document
        .child_paths(&DotPath::parse(prefix))
        .into_iter()
        .filter(|child| !matches!(document.get(child), Some(Value::Null)))
        .map(|child| child.join(&suffix))
        .collect()
}

/// Split `path` on its first wildcard marker, trimming dots from both halves.
pub fn split_wildcard(path: &str) -> Option<(&str, &str)> {
    let (prefix, suffix) = path.split_once(WILDCARD_MARKER)?;
    Some((prefix.trim_matches('.'), suffix.trim_matches('.')))
}
