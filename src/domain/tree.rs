//! Prose tree model: element and text nodes, plus the document that owns them

use std::collections::BTreeMap;
use std::fmt;

/// Deserialized front matter of a document.
pub type Metadata = BTreeMap<String, serde_yaml::Value>;

/// A document to validate: front matter plus parsed prose.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub metadata: Metadata,
    /// Root of the prose tree, usually a `body` element
    pub prose: TreeNode,
}

impl Document {
    pub fn new(metadata: Metadata, prose: TreeNode) -> Self {
        Self { metadata, prose }
    }

    /// Name of the recipe declared in the front matter (`recipe: <name>`).
    pub fn recipe_name(&self) -> Option<&str> {
        self.metadata.get("recipe").and_then(|v| v.as_str())
    }
}

/// Element node payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub children: Vec<TreeNode>,
}

/// A node of the prose tree.
///
/// Macro invocations and admonitions are not separate kinds; they are
/// recognised over these two variants by a classifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeNode {
    Element(Element),
    Text(String),
}

impl TreeNode {
    pub fn element(tag: impl Into<String>) -> Self {
        TreeNode::Element(Element {
            tag: tag.into(),
            ..Element::default()
        })
    }

    pub fn text(value: impl Into<String>) -> Self {
        TreeNode::Text(value.into())
    }

    /// Set the id of an element. No-op on text nodes.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        if let TreeNode::Element(el) = &mut self {
            el.id = Some(id.into());
        }
        self
    }

    /// Add a class to an element. No-op on text nodes.
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        if let TreeNode::Element(el) = &mut self {
            el.classes.push(class.into());
        }
        self
    }

    /// Append children to an element. No-op on text nodes.
    pub fn with_children(mut self, children: impl IntoIterator<Item = TreeNode>) -> Self {
        if let TreeNode::Element(el) = &mut self {
            el.children.extend(children);
        }
        self
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            TreeNode::Element(el) => Some(el),
            TreeNode::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            TreeNode::Text(value) => Some(value),
            TreeNode::Element(_) => None,
        }
    }

    pub fn tag(&self) -> Option<&str> {
        self.as_element().map(|el| el.tag.as_str())
    }

    pub fn id(&self) -> Option<&str> {
        self.as_element().and_then(|el| el.id.as_deref())
    }

    /// Child nodes; text nodes have none.
    pub fn children(&self) -> &[TreeNode] {
        match self {
            TreeNode::Element(el) => &el.children,
            TreeNode::Text(_) => &[],
        }
    }

    pub fn is_element(&self) -> bool {
        matches!(self, TreeNode::Element(_))
    }

    /// True for an element with the given tag name.
    pub fn is_tag(&self, tag: &str) -> bool {
        self.tag() == Some(tag)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.as_element()
            .map(|el| el.classes.iter().any(|c| c == class))
            .unwrap_or(false)
    }

    /// Heading rank: `h1` → 1 .. `h6` → 6. `None` for anything else.
    pub fn heading_rank(&self) -> Option<u8> {
        let tag = self.tag()?;
        let rank = tag.strip_prefix('h')?.parse::<u8>().ok()?;
        (1..=6).contains(&rank).then_some(rank)
    }

    pub fn is_heading(&self) -> bool {
        self.heading_rank().is_some()
    }

    /// Text node made only of whitespace (newlines included).
    pub fn is_whitespace_text(&self) -> bool {
        self.as_text()
            .map(|v| v.chars().all(char::is_whitespace))
            .unwrap_or(false)
    }

    /// Text node whose value starts with `prefix`.
    pub fn starts_with_text(&self, prefix: &str) -> bool {
        self.as_text().map(|v| v.starts_with(prefix)).unwrap_or(false)
    }

    /// Concatenated text of this node and all its descendants.
    pub fn text_content(&self) -> String {
        match self {
            TreeNode::Text(value) => value.clone(),
            TreeNode::Element(el) => el.children.iter().map(TreeNode::text_content).collect(),
        }
    }
}

/// Selector-like rendering, e.g. `h2#Constructor`, `p.note`, `#text`.
impl fmt::Display for TreeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeNode::Text(_) => write!(f, "#text"),
            TreeNode::Element(el) => {
                write!(f, "{}", el.tag)?;
                if let Some(id) = &el.id {
                    write!(f, "#{}", id)?;
                }
                for class in &el.classes {
                    write!(f, ".{}", class)?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_heading_tags_when_ranking_then_only_h1_to_h6_rank() {
        assert_eq!(TreeNode::element("h1").heading_rank(), Some(1));
        assert_eq!(TreeNode::element("h6").heading_rank(), Some(6));
        assert_eq!(TreeNode::element("h7").heading_rank(), None);
        assert_eq!(TreeNode::element("hr").heading_rank(), None);
        assert_eq!(TreeNode::text("h2").heading_rank(), None);
    }

    #[test]
    fn given_nested_nodes_when_text_content_then_concatenates_in_order() {
        let node = TreeNode::element("dd").with_children([
            TreeNode::text("Creates a new "),
            TreeNode::element("code").with_children([TreeNode::text("Foo")]),
            TreeNode::text(" object."),
        ]);
        assert_eq!(node.text_content(), "Creates a new Foo object.");
    }

    #[test]
    fn given_element_when_displayed_then_renders_selector() {
        let node = TreeNode::element("h2").with_id("Constructor");
        assert_eq!(node.to_string(), "h2#Constructor");
        let node = TreeNode::element("p").with_class("note");
        assert_eq!(node.to_string(), "p.note");
        assert_eq!(TreeNode::text("x").to_string(), "#text");
    }

    #[test]
    fn given_whitespace_text_when_checked_then_detected() {
        assert!(TreeNode::text("\n  \n").is_whitespace_text());
        assert!(!TreeNode::text(" a ").is_whitespace_text());
        assert!(!TreeNode::element("p").is_whitespace_text());
    }

    #[test]
    fn given_metadata_with_recipe_when_reading_recipe_name_then_returns_it() {
        let mut metadata = Metadata::new();
        metadata.insert("recipe".into(), serde_yaml::Value::from("javascript-class"));
        let doc = Document::new(metadata, TreeNode::element("body"));
        assert_eq!(doc.recipe_name(), Some("javascript-class"));
    }
}
