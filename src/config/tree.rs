//! Block tree lookup
//!
//! Paths are sequences of block names, one per level of the tree.

use crate::config::types::Block;
use crate::error::{ConfigError, ConfigResult};

/// Find the block addressed by `path`, descending one level per segment
///
/// Names compare exactly and the first sibling with a matching name wins.
pub fn resolve_block<'a, S: AsRef<str>>(blocks: &'a [Block], path: &[S]) -> ConfigResult<&'a Block> {
    find_block(blocks, path).ok_or_else(|| {
        ConfigError::PathNotFound(path.iter().map(|s| s.as_ref().to_string()).collect())
    })
}

fn find_block<'a, S: AsRef<str>>(blocks: &'a [Block], path: &[S]) -> Option<&'a Block> {
    let (first, rest) = path.split_first()?;
    let block = blocks.iter().find(|b| b.name == first.as_ref())?;

    if rest.is_empty() {
        Some(block)
    } else {
        find_block(&block.children, rest)
    }
}

/// Split command-line arguments into path segments
///
/// Each argument may itself be a dotted path, so `server.restart` and
/// `server restart` address the same block.
pub fn split_path<S: AsRef<str>>(args: &[S]) -> Vec<String> {
    args.iter()
        .flat_map(|arg| arg.as_ref().split('.'))
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}
