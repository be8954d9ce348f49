//! Common test utilities

#![allow(dead_code)]

use dex::config::{parse_config, resolve_block, validate_config, Config};
use dex::runner::{execute_block, BlockReport, CaptureRunner, Context, VariableScope};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Create a temporary directory with a dex.yaml file
pub fn create_test_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("dex.yaml");
    fs::write(&config_path, content).unwrap();
    (temp_dir, config_path)
}

/// Parse and validate a config, panicking on any error
pub fn load(yaml: &str) -> Config {
    let config = parse_config(yaml).unwrap();
    validate_config(&config).unwrap();
    config
}

/// Resolve globals, select the block at `path` and run it with captured output
pub fn run_block(yaml: &str, path: &[&str]) -> (BlockReport, VariableScope, CaptureRunner) {
    let config = load(yaml);
    let ctx = Context::new();

    let mut scope = VariableScope::new();
    scope.resolve(&config.vars, &ctx);

    let block = resolve_block(&config.blocks, path).unwrap();
    let mut runner = CaptureRunner::new();
    let report = execute_block(block, &mut scope, &ctx, &mut runner).unwrap();

    (report, scope, runner)
}
