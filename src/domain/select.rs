//! Tree selection helpers (pre-order search, parent lookup)

use std::fmt;
use std::ptr;

use crate::domain::TreeNode;

/// Pre-order iterator over a node and all of its descendants.
pub struct Descendants<'a> {
    stack: Vec<&'a TreeNode>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a TreeNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children().iter().rev());
        Some(node)
    }
}

/// Iterate `root` and everything below it, document order.
pub fn descendants(root: &TreeNode) -> Descendants<'_> {
    Descendants { stack: vec![root] }
}

/// First node (root included) matching `pred`, document order.
pub fn select_first<'a>(root: &'a TreeNode, pred: impl Fn(&TreeNode) -> bool) -> Option<&'a TreeNode> {
    descendants(root).find(|n| pred(n))
}

/// All nodes (root included) matching `pred`, document order.
pub fn select_all<'a>(root: &'a TreeNode, pred: impl Fn(&TreeNode) -> bool) -> Vec<&'a TreeNode> {
    descendants(root).filter(|n| pred(n)).collect()
}

/// The node whose children contain `target` (pointer identity).
pub fn find_parent<'a>(root: &'a TreeNode, target: &TreeNode) -> Option<&'a TreeNode> {
    descendants(root).find(|n| n.children().iter().any(|c| ptr::eq(c, target)))
}

/// Tag plus optional id, e.g. `h2#Constructor`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selector<'s> {
    pub tag: &'s str,
    pub id: Option<&'s str>,
}

impl<'s> Selector<'s> {
    pub fn tag(tag: &'s str) -> Self {
        Self { tag, id: None }
    }

    pub fn with_id(self, id: &'s str) -> Self {
        Self { id: Some(id), ..self }
    }

    pub fn matches(&self, node: &TreeNode) -> bool {
        node.is_tag(self.tag) && self.id.map_or(true, |id| node.id() == Some(id))
    }
}

impl fmt::Display for Selector<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.id {
            Some(id) => write!(f, "{}#{}", self.tag, id),
            None => write!(f, "{}", self.tag),
        }
    }
}
