//! Configuration parsing and validation
//!
//! This module handles discovery and parsing of dex.yaml files, validation of
//! the block tree, and looking blocks up by path.

pub mod parse;
pub mod schema;
pub mod tree;
pub mod types;

// Re-export main types
pub use parse::*;
pub use schema::*;
pub use tree::*;
pub use types::*;
