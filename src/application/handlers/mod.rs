//! Ingredient handler registry
//!
//! Maps a prose ingredient name to the handler that deep-checks its
//! structure. Adding an ingredient kind means adding an entry to
//! [`BUILTIN_HANDLERS`]; the interpreter does not change.

use std::collections::BTreeMap;

use crate::application::{NodeClassifier, Reporter};
use crate::domain::TreeNode;

pub mod constructor;
pub mod interactive_example;

/// Prefix of qualified handler names, e.g. `data.constructor`.
pub const QUALIFIED_PREFIX: &str = "data.";

/// Collaborators a handler may consult besides the tree.
pub struct HandlerContext<'c> {
    pub classifier: &'c dyn NodeClassifier,
    /// Macro that embeds an interactive example
    pub interactive_example_macro: &'c str,
}

/// Result of running a handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerOutcome<'a> {
    /// Ingredient located and valid; the node anchors it
    Valid(&'a TreeNode),
    /// Ingredient absent or invalid; findings already reported
    Invalid,
    /// Report-only handler finished; findings (if any) already reported
    Checked,
}

impl HandlerOutcome<'_> {
    pub fn is_invalid(&self) -> bool {
        matches!(self, HandlerOutcome::Invalid)
    }
}

/// A structural handler: walks `tree`, reports deviations, returns its outcome.
pub type Handler = for<'a> fn(&'a TreeNode, &mut Reporter, &HandlerContext<'_>) -> HandlerOutcome<'a>;

/// Handlers shipped with the crate, keyed by ingredient name.
pub const BUILTIN_HANDLERS: &[(&str, Handler)] = &[
    ("constructor", constructor::handle),
    ("interactive_example", interactive_example::handle),
];

/// Name → handler dispatch table.
#[derive(Clone)]
pub struct HandlerRegistry {
    handlers: BTreeMap<String, Handler>,
}

impl HandlerRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self {
            handlers: BTreeMap::new(),
        }
    }

    /// Registry holding [`BUILTIN_HANDLERS`].
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for (name, handler) in BUILTIN_HANDLERS {
            registry.register(name, *handler);
        }
        registry
    }

    pub fn register(&mut self, name: &str, handler: Handler) {
        self.handlers.insert(name.to_string(), handler);
    }

    /// Look up by bare (`constructor`) or qualified (`data.constructor`) name.
    pub fn resolve(&self, name: &str) -> Option<Handler> {
        let bare = name.strip_prefix(QUALIFIED_PREFIX).unwrap_or(name);
        self.handlers.get(bare).copied()
    }

    /// Registered ingredient names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.handlers.keys().map(String::as_str)
    }
}

impl Default for HandlerRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
