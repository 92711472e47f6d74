//! Node classification: macro invocations and admonitions

use regex::Regex;

use crate::domain::TreeNode;

/// Recognises nodes with a meaning layered over plain element/text markup.
pub trait NodeClassifier: Send + Sync {
    /// True when `node` is an invocation of the macro called `name`.
    fn is_macro(&self, node: &TreeNode, name: &str) -> bool;

    /// True when `node` is a callout block (note, warning, ...).
    fn is_admonition(&self, node: &TreeNode) -> bool;
}

/// Admonition markers written inline as a leading `<strong>` label.
const ADMONITION_LABELS: [&str; 2] = ["Note:", "Warning:"];

/// Default classifier.
///
/// Macros are text nodes holding exactly `{{Name}}` or `{{Name(args)}}`.
/// Admonitions are elements carrying one of the configured classes, or
/// paragraphs opening with a `<strong>Note:</strong>` style label.
pub struct MacroClassifier {
    admonition_classes: Vec<String>,
    macro_pattern: Regex,
}

impl MacroClassifier {
    pub fn new(admonition_classes: Vec<String>) -> Self {
        Self {
            admonition_classes,
            macro_pattern: Regex::new(r"(?s)^\{\{\s*([A-Za-z_][\w\-]*)\s*(?:\(.*\))?\s*\}\}$")
                .unwrap(),
        }
    }

    /// Name of the macro invoked by `node`, if it is an invocation.
    pub fn macro_name<'n>(&self, node: &'n TreeNode) -> Option<&'n str> {
        let value = node.as_text()?.trim();
        let caps = self.macro_pattern.captures(value)?;
        caps.get(1).map(|m| m.as_str())
    }
}

impl Default for MacroClassifier {
    fn default() -> Self {
        Self::new(vec!["note".into(), "warning".into(), "notecard".into()])
    }
}

impl NodeClassifier for MacroClassifier {
    fn is_macro(&self, node: &TreeNode, name: &str) -> bool {
        self.macro_name(node)
            .map(|found| found.eq_ignore_ascii_case(name))
            .unwrap_or(false)
    }

    fn is_admonition(&self, node: &TreeNode) -> bool {
        if !node.is_element() {
            return false;
        }
        if self.admonition_classes.iter().any(|c| node.has_class(c)) {
            return true;
        }
        node.is_tag("p")
            && node
                .children()
                .first()
                .filter(|first| first.is_tag("strong"))
                .map(|strong| {
                    let label = strong.text_content();
                    ADMONITION_LABELS.iter().any(|l| label.trim_start().starts_with(l))
                })
                .unwrap_or(false)
    }
}
