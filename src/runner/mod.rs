//! Block execution engine
//!
//! This module handles variable resolution, placeholder rendering, command
//! typing and running the commands of a selected block.

pub mod block;
pub mod command;
pub mod context;
pub mod interpolate;
pub mod process;
pub mod scope;

// Re-export main types
pub use block::*;
pub use command::*;
pub use context::*;
pub use interpolate::*;
pub use process::*;
pub use scope::*;
