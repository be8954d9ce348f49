//! Error types for Dex

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Dex operations
pub type Result<T> = std::result::Result<T, DexError>;

/// Main error type for Dex
#[derive(Error, Debug)]
pub enum DexError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Block execution errors
    #[error("Execution error: {0}")]
    Execution(#[from] ExecutionError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// YAML parsing errors
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Configuration discovery, parsing and lookup errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("No dex file was found (searched: {0})")]
    NotFound(String),

    #[error("Failed to read config file '{path}': {error}")]
    Read { path: PathBuf, error: String },

    #[error("Unsupported config version {found}, expected {expected}")]
    UnsupportedVersion { found: String, expected: u32 },

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Block '{0}' is defined more than once at the same level")]
    DuplicateBlock(String),

    #[error("No commands were found at [{}]", .0.join(" "))]
    PathNotFound(Vec<String>),
}

/// Block execution errors
#[derive(Error, Debug)]
pub enum ExecutionError {
    #[error("Cannot get current working directory: {0}")]
    WorkingDirectoryUnavailable(#[source] io::Error),

    #[error("Command `{command}` {}", describe_exit(.code))]
    CommandFailed { command: String, code: Option<i32> },

    #[error("Failed to run command `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },
}

/// Variable declarations that resolution cannot make sense of
#[derive(Error, Debug, PartialEq, Eq)]
pub enum VariableError {
    #[error("I don't know about type {kind} for {name}!")]
    UnsupportedShape { name: String, kind: &'static str },

    #[error("I don't know about type {kind} in for-vars!")]
    UnsupportedForVars { kind: &'static str },
}

/// How a child that did not succeed ended
fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("failed with exit code {}", code),
        None => "was terminated by a signal".to_string(),
    }
}

/// Specialized result type for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Specialized result type for execution operations
pub type ExecutionResult<T> = std::result::Result<T, ExecutionError>;

/// Whether an execution error is per-command and should not stop the block
pub fn is_recoverable(err: &ExecutionError) -> bool {
    matches!(
        err,
        ExecutionError::CommandFailed { .. } | ExecutionError::Spawn { .. }
    )
}
