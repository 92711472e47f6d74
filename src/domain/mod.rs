//! Domain layer: document, recipe and finding types plus pure tree algorithms
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod error;
pub mod finding;
pub mod recipe;
pub mod select;
pub mod slice;
pub mod tree;

pub use error::DomainError;
pub use finding::{Finding, Severity};
pub use recipe::{Family, Ingredient, IngredientRef, Recipe};
pub use select::Selector;
pub use slice::{slice_between, slice_section, Slice};
pub use tree::{Document, Element, Metadata, TreeNode};
