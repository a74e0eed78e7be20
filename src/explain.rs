//! Explain output for a rule set
//!
//! Shows how each rule resolves and which concrete paths it touches. The
//! pass runs in memory only and no output file is written; a write fault
//! still fails the pass.

use serde::Serialize;

use crate::patch::RuleOutcome;
use crate::resolver::Resolution;

/// Explanation of a dry-run patch pass
#[derive(Debug, Clone, Serialize)]
pub struct ExplainOutput {
    /// Input document the rules were evaluated against
    pub input: String,

    pub rules: Vec<RuleOutcome>,
}

impl ExplainOutput {
    pub fn new(input: impl Into<String>, rules: Vec<RuleOutcome>) -> Self {
        Self {
            input: input.into(),
            rules,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Human-readable explanation
    pub fn to_human(&self) -> String {
        let mut lines = Vec::new();

        lines.push(format!("Input: {}", self.input));
        lines.push(format!("Rules: {}", self.rules.len()));

        for (i, rule) in self.rules.iter().enumerate() {
            lines.push(String::new());
            lines.push(format!("[{}] {}", i + 1, rule.path));
            lines.push(format!("  Value: {:?} ({})", rule.value, rule.value_type));

            match rule.resolution {
                Resolution::Literal => {}
                Resolution::Substituted => {
                    lines.push("  Placeholder: resolved from host configuration".to_string());
                }
                Resolution::Unresolved => {
                    lines.push("  Placeholder: NOT FOUND, literal value kept".to_string());
                }
            }

            if rule.written.is_empty() {
                lines.push("  Targets: none".to_string());
            } else {
                lines.push("  Targets:".to_string());
                for path in &rule.written {
                    lines.push(format!("    - {}", path));
                }
            }
        }

        lines.join("\n")
    }
}
