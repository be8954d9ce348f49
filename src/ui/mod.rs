//! Terminal output that is not a diagnostic

pub mod menu;

pub use menu::*;
