//! Core configuration types
//!
//! This module defines the data structures that represent a dex.yaml configuration file.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The only document version this engine understands
pub const SUPPORTED_VERSION: u32 = 2;

/// Top-level configuration structure
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// Document version, checked against [`SUPPORTED_VERSION`] while parsing
    pub version: u32,

    /// Global variable declarations
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub vars: HashMap<String, RawValue>,

    /// Top-level blocks, in menu order
    #[serde(default)]
    pub blocks: Vec<Block>,
}

/// A named node of the block tree
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Block {
    /// Name used to select the block on the command line
    pub name: String,

    /// Description shown in the menu
    #[serde(default)]
    pub desc: String,

    /// Command declarations, typed only when the block runs
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub commands: Vec<RawCommand>,

    /// Block-local variables, shadowing globals of the same name
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub vars: HashMap<String, RawValue>,

    /// Working directory for every command in the block
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<String>,

    /// Nested blocks
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Block>,
}

/// A command record as written in the file
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct RawCommand {
    /// Shell line to run
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exec: Option<String>,

    /// Text to echo
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diag: Option<String>,

    /// Working directory override for this command
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<String>,

    /// Either a literal list or the name of a list variable
    #[serde(rename = "for-vars", default, skip_serializing_if = "Option::is_none")]
    pub for_vars: Option<RawValue>,

    /// Reserved
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
}

/// A variable declaration before resolution
///
/// Variant order matters: serde tries them top to bottom, and anything that
/// fits none of the recognized shapes lands in `Unsupported`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum RawValue {
    String(String),
    Integer(i64),
    List(Vec<String>),
    Source(VarSource),
    Unsupported(serde_yaml::Value),
}

impl RawValue {
    /// Short name of the decoded shape, used in diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            RawValue::String(_) => "string",
            RawValue::Integer(_) => "integer",
            RawValue::List(_) => "list",
            RawValue::Source(_) => "mapping",
            RawValue::Unsupported(value) => match value {
                serde_yaml::Value::Null => "null",
                serde_yaml::Value::Bool(_) => "bool",
                serde_yaml::Value::Number(_) => "number",
                serde_yaml::Value::String(_) => "string",
                serde_yaml::Value::Sequence(_) => "sequence",
                serde_yaml::Value::Mapping(_) => "mapping",
                serde_yaml::Value::Tagged(_) => "tagged value",
            },
        }
    }
}

/// Where a variable's value comes from when it is not a literal
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct VarSource {
    /// Environment variable to read
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_env: Option<String>,

    /// Shell command whose stdout becomes the value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_command: Option<String>,

    /// Used when neither of the above produced anything
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}
