//! Infrastructure layer: I/O implementations, document decoding and DI container
//!
//! This layer implements I/O boundary traits, turns files into documents
//! and recipes, and wires up services.

pub mod di;
pub mod error;
pub mod frontmatter;
pub mod markdown;
pub mod recipe_file;
pub mod traits;

pub use error::{InfraError, InfraResult};
