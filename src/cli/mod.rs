//! CLI interface and argument parsing
//!
//! This module handles command-line parsing, config loading and dispatch to
//! the menu or the block runner.

pub mod app;

// Re-export main types
pub use app::*;
