//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors describe recipes that cannot be interpreted.
/// They are schema-authoring mistakes, never structural findings.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("unrecognized ingredient type `{family}` in `{ingredient}`")]
    UnknownIngredientType { ingredient: String, family: String },

    #[error("ingredient has no name: `{0}`")]
    MissingIngredientName(String),

    #[error("ingredient groups must have exactly one key, found {keys}: {labels:?}")]
    MalformedGroup { keys: usize, labels: Vec<String> },

    #[error("recipe entry is neither an ingredient nor a group: {0}")]
    InvalidEntry(String),

    #[error("no handler for prose ingredient `{0}`")]
    UnknownProseIngredient(String),
}

impl DomainError {
    /// Finding code used when the error is reported against a document.
    pub fn code(&self) -> &'static str {
        match self {
            DomainError::UnknownIngredientType { .. } => "unknown-ingredient-type",
            DomainError::MissingIngredientName(_) => "unknown-ingredient-type",
            DomainError::MalformedGroup { .. } | DomainError::InvalidEntry(_) => {
                "malformed-ingredient-group"
            }
            DomainError::UnknownProseIngredient(_) => "unknown-prose-ingredient",
        }
    }
}
