//! Sibling slicing: carve sections out of a node's sibling list
//!
//! Both operations work on the immediate siblings of the start node and
//! never cross nesting boundaries. The result borrows from the tree.

use std::fmt;
use std::ptr;

use crate::domain::select::{descendants, find_parent};
use crate::domain::TreeNode;

/// Synthetic container over a run of sibling nodes.
#[derive(Debug, Clone, Default)]
pub struct Slice<'a> {
    nodes: Vec<&'a TreeNode>,
}

impl<'a> Slice<'a> {
    pub fn new(nodes: Vec<&'a TreeNode>) -> Self {
        Self { nodes }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Top-level nodes of the slice.
    pub fn children(&self) -> &[&'a TreeNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Every node in the slice, descending into each top-level node.
    pub fn descendants(&self) -> impl Iterator<Item = &'a TreeNode> + '_ {
        self.nodes.iter().flat_map(|n| descendants(*n))
    }

    /// All nodes within the slice matching `pred`, document order.
    pub fn select_all(&self, pred: impl Fn(&TreeNode) -> bool) -> Vec<&'a TreeNode> {
        self.descendants().filter(|n| pred(n)).collect()
    }

    /// Keep the leading run of top-level nodes for which `pred` holds.
    pub fn take_while(self, pred: impl Fn(&TreeNode) -> bool) -> Self {
        Self {
            nodes: self.nodes.into_iter().take_while(|n| pred(n)).collect(),
        }
    }

    /// Top-level children with whitespace-only text nodes dropped.
    pub fn significant_children(&self) -> Vec<&'a TreeNode> {
        self.nodes
            .iter()
            .copied()
            .filter(|n| !n.is_whitespace_text())
            .collect()
    }

    /// Owned `section` element holding clones of the sliced nodes.
    pub fn to_node(&self) -> TreeNode {
        TreeNode::element("section").with_children(self.nodes.iter().map(|n| (*n).clone()))
    }
}

impl fmt::Display for Slice<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.nodes.first() {
            Some(first) => write!(f, "section({})", first),
            None => write!(f, "section"),
        }
    }
}

/// Sibling list containing `node` and its position, searched below `tree`.
fn siblings_of<'a>(node: &TreeNode, tree: &'a TreeNode) -> Option<(&'a [TreeNode], usize)> {
    let parent = find_parent(tree, node)?;
    let siblings = parent.children();
    let index = siblings.iter().position(|c| ptr::eq(c, node))?;
    Some((siblings, index))
}

/// Section owned by `heading`: the heading itself plus following siblings up
/// to, not including, the next heading of equal or higher rank.
///
/// A start node that is not a heading never meets a stop, so the section
/// runs to the end of the sibling list. If `heading` is not inside `tree`
/// the slice is empty.
pub fn slice_section<'a>(heading: &'a TreeNode, tree: &'a TreeNode) -> Slice<'a> {
    let Some((siblings, index)) = siblings_of(heading, tree) else {
        return Slice::empty();
    };
    let rank = heading.heading_rank();

    let mut nodes = vec![&siblings[index]];
    for sibling in &siblings[index + 1..] {
        let stops = match (rank, sibling.heading_rank()) {
            (Some(own), Some(other)) => other <= own,
            _ => false,
        };
        if stops {
            break;
        }
        nodes.push(sibling);
    }
    Slice::new(nodes)
}

/// Siblings strictly after `start`, up to, not including, the first one
/// for which `stop` returns true. If `start` is not inside `tree` the
/// slice is empty.
pub fn slice_between<'a>(
    start: &'a TreeNode,
    stop: impl Fn(&TreeNode) -> bool,
    tree: &'a TreeNode,
) -> Slice<'a> {
    let Some((siblings, index)) = siblings_of(start, tree) else {
        return Slice::empty();
    };
    Slice::new(siblings[index + 1..].iter().take_while(|n| !stop(n)).collect())
}
