//! Dex - a YAML-based runner for a tree of named command blocks
//!
//! A dex file describes a nestable tree of blocks. With no arguments Dex prints
//! the tree as a menu; given a path of block names it runs that block's
//! commands, with variables rendered into `[% name %]` placeholders.

// Public modules
pub mod cli;
pub mod config;
pub mod error;
pub mod runner;
pub mod ui;

// Re-export commonly used types
pub use error::{DexError, Result};

/// Current version of Dex
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
