//! Patch report with input/output digests
//!
//! Records what a pass did: which rules ran, how each value was resolved,
//! and which concrete paths were written, plus SHA-256 digests of the
//! document before and after. Both digests cover the compact serialization
//! of the parsed tree, so they compare equal exactly when the pass left the
//! document unchanged, whatever the input file's formatting.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::document::Document;
use crate::patch::RuleOutcome;
use crate::resolver::Resolution;

/// Schema version for patch_report
pub const SCHEMA_VERSION: u32 = 1;

/// Schema identifier
pub const SCHEMA_ID: &str = "confpatch/patch_report@1";

/// Summary of one patch pass
#[derive(Debug, Clone, Serialize)]
pub struct PatchReport {
    pub schema_version: u32,

    pub schema_id: String,

    pub created_at: DateTime<Utc>,

    /// SHA-256 of the compact serialized input document
    pub input_digest: String,

    /// SHA-256 of the compact serialized output document
    pub output_digest: String,

    /// Total concrete writes across all rules
    pub writes: usize,

    /// Rules whose placeholder could not be resolved
    pub unresolved: Vec<String>,

    /// Per-rule outcomes in rule order
    pub rules: Vec<RuleOutcome>,
}

impl PatchReport {
    pub fn build(
        input: &Document,
        output: &Document,
        outcomes: Vec<RuleOutcome>,
    ) -> Result<Self, serde_json::Error> {
        let writes = outcomes.iter().map(|o| o.written.len()).sum();
        let unresolved = outcomes
            .iter()
            .filter(|o| o.resolution == Resolution::Unresolved)
            .map(|o| o.path.clone())
            .collect();

        Ok(Self {
            schema_version: SCHEMA_VERSION,
            schema_id: SCHEMA_ID.to_string(),
            created_at: Utc::now(),
            input_digest: sha256_hex(&input.to_vec()?),
            output_digest: sha256_hex(&output.to_vec()?),
            writes,
            unresolved,
            rules: outcomes,
        })
    }

    /// True when the pass left the document unchanged.
    pub fn is_unchanged(&self) -> bool {
        self.input_digest == self.output_digest
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}
