//! recipe-lint: structural validation of documentation pages against recipes
//!
//! A recipe lists the ingredients a page must (or may) contain: front matter
//! keys and prose sections. Each prose ingredient has a structural handler
//! that walks the parsed page and reports what it finds.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
