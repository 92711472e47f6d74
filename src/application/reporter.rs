//! Reporter: per-pass accumulator of findings
//!
//! One reporter belongs to exactly one validation pass. Reporting never
//! fails and never alters control flow; handlers decide whether to go on.

use std::fmt::Display;

use tracing::debug;

use crate::domain::{Finding, Severity};

#[derive(Debug, Default)]
pub struct Reporter {
    findings: Vec<Finding>,
}

impl Reporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a definite structural violation at `node`.
    pub fn fail(&mut self, node: &(impl Display + ?Sized), message: impl Into<String>, code: &str) {
        self.record(node, message.into(), code, Severity::Fail);
    }

    /// Record that an element matching `selector` was expected below `node`
    /// and not found.
    pub fn expected(&mut self, node: &(impl Display + ?Sized), selector: &(impl Display + ?Sized), code: &str) {
        let message = format!("expected element not found: {}", selector);
        self.record(node, message, code, Severity::Expected);
    }

    fn record(&mut self, node: &(impl Display + ?Sized), message: String, code: &str, severity: Severity) {
        debug!(%severity, code, "{}: {}", node, message);
        self.findings.push(Finding {
            node: node.to_string(),
            message,
            code: code.to_string(),
            severity,
        });
    }

    /// Append findings collected elsewhere, e.g. by a scratch reporter.
    pub fn extend(&mut self, findings: impl IntoIterator<Item = Finding>) {
        self.findings.extend(findings);
    }

    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    pub fn len(&self) -> usize {
        self.findings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }

    /// Hand the collected findings to the caller, leaving the reporter empty.
    pub fn drain(&mut self) -> Vec<Finding> {
        std::mem::take(&mut self.findings)
    }

    pub fn into_findings(self) -> Vec<Finding> {
        self.findings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Selector, TreeNode};

    #[test]
    fn given_fail_and_expected_when_reporting_then_both_recorded_in_order() {
        let mut reporter = Reporter::new();
        let body = TreeNode::element("body");
        let dd = TreeNode::element("dd");

        reporter.expected(&body, &Selector::tag("h2").with_id("Constructor"), "expected-heading");
        reporter.fail(&dd, "too short", "constructor-description-at-least-three-nodes");

        let findings = reporter.findings();
        assert_eq!(findings.len(), 2);
        assert_eq!(findings[0].severity, Severity::Expected);
        assert_eq!(findings[0].node, "body");
        assert_eq!(findings[0].message, "expected element not found: h2#Constructor");
        assert_eq!(findings[1].severity, Severity::Fail);
        assert_eq!(findings[1].node, "dd");
        assert_eq!(findings[1].code, "constructor-description-at-least-three-nodes");
    }

    #[test]
    fn given_findings_when_draining_then_reporter_empties() {
        let mut reporter = Reporter::new();
        reporter.fail("document", "bad", "x");
        let drained = reporter.drain();
        assert_eq!(drained.len(), 1);
        assert!(reporter.is_empty());
    }
}
