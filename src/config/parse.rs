//! Configuration file discovery and parsing

use crate::config::types::{Config, SUPPORTED_VERSION};
use crate::error::{ConfigError, ConfigResult, DexError};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration file names to search for, in order of preference
const CONFIG_FILE_NAMES: &[&str] = &["dex.yaml", "dex.yml", ".dex.yaml", ".dex.yml"];

/// Environment variable naming a config file, bypassing discovery
pub const CONFIG_ENV_VAR: &str = "DEX_FILE";

/// Find the configuration file, honoring `DEX_FILE` before searching the current directory
pub fn find_config_file() -> ConfigResult<PathBuf> {
    if let Some(path) = env::var_os(CONFIG_ENV_VAR).filter(|p| !p.is_empty()) {
        let path = PathBuf::from(path);
        if path.is_file() {
            return Ok(path);
        }
        return Err(ConfigError::NotFound(format!(
            "{} (from {})",
            path.display(),
            CONFIG_ENV_VAR
        )));
    }

    let current_dir = env::current_dir().map_err(|e| {
        ConfigError::Invalid(format!("Failed to get current directory: {}", e))
    })?;
    find_config_file_in(&current_dir)
}

/// Find the configuration file in a specific directory
pub fn find_config_file_in(dir: &Path) -> ConfigResult<PathBuf> {
    let mut searched_paths = Vec::new();

    for file_name in CONFIG_FILE_NAMES {
        let config_path = dir.join(file_name);
        if config_path.is_file() {
            return Ok(config_path);
        }
        searched_paths.push(config_path.display().to_string());
    }

    Err(ConfigError::NotFound(searched_paths.join(", ")))
}

/// Parse a configuration file from a path
pub fn parse_config_file(path: &Path) -> Result<Config, DexError> {
    let contents = fs::read_to_string(path).map_err(|e| ConfigError::Read {
        path: path.to_path_buf(),
        error: e.to_string(),
    })?;

    parse_config(&contents)
}

/// Parse configuration from a string
///
/// The version is checked on the generic document first so that files written
/// for another version fail as such, rather than as a shape mismatch.
pub fn parse_config(yaml: &str) -> Result<Config, DexError> {
    let document: serde_yaml::Value = serde_yaml::from_str(yaml)?;

    let version = document.get("version").and_then(serde_yaml::Value::as_u64);
    if version != Some(u64::from(SUPPORTED_VERSION)) {
        return Err(ConfigError::UnsupportedVersion {
            found: version.map_or_else(|| "missing".to_string(), |v| v.to_string()),
            expected: SUPPORTED_VERSION,
        }
        .into());
    }

    Ok(serde_yaml::from_value(document)?)
}

/// Discover and parse the configuration file
pub fn parse_config_auto() -> Result<(Config, PathBuf), DexError> {
    let config_path = find_config_file()?;
    let config = parse_config_file(&config_path)?;
    Ok((config, config_path))
}
