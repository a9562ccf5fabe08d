// src/config/io.rs
use super::types::{Config, OntoRankToml};
use crate::error::{OntoRankError, Result};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

pub const CONFIG_FILE: &str = "ontorank.toml";

/// Reads `path` if it exists. Parse failures are logged and ignored.
pub fn load_toml_config(config: &mut Config, path: &Path) {
    if !path.exists() {
        debug!("no {} found, using defaults", path.display());
        return;
    }
    match read_toml(path) {
        Ok(parsed) => apply(config, parsed),
        Err(e) => warn!("ignoring {}: {e}", path.display()),
    }
}

/// # Errors
/// Returns `Io` if unreadable, `Config` if the TOML is invalid.
pub fn read_toml(path: &Path) -> Result<OntoRankToml> {
    let content = fs::read_to_string(path).map_err(|source| OntoRankError::Io {
        source,
        path: path.to_path_buf(),
    })?;
    parse_toml(&content)
}

/// # Errors
/// Returns `Config` if the TOML is invalid.
pub fn parse_toml(content: &str) -> Result<OntoRankToml> {
    Ok(toml::from_str(content)?)
}

pub fn apply(config: &mut Config, parsed: OntoRankToml) {
    config.rank = parsed.rank;
    config.expand = parsed.expand;
    config.segment = parsed.segment;
}

/// # Errors
/// Returns error if serialization or the write fails.
pub fn save_to_file(config: &Config, path: &Path) -> Result<()> {
    let content = to_toml_string(config)?;
    fs::write(path, content).map_err(|source| OntoRankError::Io {
        source,
        path: path.to_path_buf(),
    })
}

/// # Errors
/// Returns `Config` if serialization fails.
pub fn to_toml_string(config: &Config) -> Result<String> {
    let toml = OntoRankToml {
        rank: config.rank.clone(),
        expand: config.expand.clone(),
        segment: config.segment.clone(),
    };
    toml::to_string_pretty(&toml).map_err(|e| OntoRankError::Config(e.to_string()))
}
