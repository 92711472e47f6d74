//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (FileSystem) but are themselves
//! concrete structs, not traits.

mod content;
mod interpreter;

pub use content::{ContentService, DocumentReport};
pub use interpreter::RecipeInterpreter;
