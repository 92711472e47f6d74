//! Findings: structural outcomes tied to the node where they were observed

use std::fmt;

use serde::Serialize;

/// How a finding counts against a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Definite structural violation
    Fail,
    /// A required sub-structure was searched for and not found
    Expected,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Fail => write!(f, "fail"),
            Severity::Expected => write!(f, "expected"),
        }
    }
}

/// One recorded outcome.
///
/// `node` is the selector-like rendering of the node (or synthetic section)
/// the finding refers to; findings never hold on to the tree itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub node: String,
    pub message: String,
    pub code: String,
    pub severity: Severity,
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {} ({})",
            self.severity, self.node, self.message, self.code
        )
    }
}
