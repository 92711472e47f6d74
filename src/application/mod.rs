//! Application layer: services and use cases
//!
//! This layer orchestrates domain logic and depends on I/O boundary traits.

pub mod classify;
pub mod error;
pub mod error_ext;
pub mod handlers;
pub mod link_list;
pub mod reporter;
pub mod services;

pub use classify::{MacroClassifier, NodeClassifier};
pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::IoResultExt;
pub use handlers::{HandlerContext, HandlerOutcome, HandlerRegistry};
pub use reporter::Reporter;
