//! Configuration validation
//!
//! This module provides validation logic for configuration files.

use crate::config::types::{Block, Config};
use crate::error::{ConfigError, ConfigResult};
use std::collections::HashSet;

/// Validate a complete configuration
pub fn validate_config(config: &Config) -> ConfigResult<()> {
    validate_blocks(&config.blocks, "")
}

/// Validate one level of the tree, then recurse into each block's children
fn validate_blocks(blocks: &[Block], parent: &str) -> ConfigResult<()> {
    let mut seen = HashSet::new();

    for block in blocks {
        let path = if parent.is_empty() {
            block.name.clone()
        } else {
            format!("{}.{}", parent, block.name)
        };

        validate_block_name(&block.name, parent)?;

        if !seen.insert(block.name.as_str()) {
            return Err(ConfigError::DuplicateBlock(path));
        }

        validate_blocks(&block.children, &path)?;
    }

    Ok(())
}

/// Block names double as path segments, so they cannot hold separators
fn validate_block_name(name: &str, parent: &str) -> ConfigResult<()> {
    let location = if parent.is_empty() { "top level" } else { parent };

    if name.is_empty() {
        return Err(ConfigError::Invalid(format!(
            "Block with an empty name under {}",
            location
        )));
    }

    if name.contains('.') || name.chars().any(char::is_whitespace) {
        return Err(ConfigError::Invalid(format!(
            "Block name '{}' under {} must not contain '.' or whitespace",
            name, location
        )));
    }

    Ok(())
}
