// src/config/mod.rs
pub mod io;
pub mod types;

pub use self::io::CONFIG_FILE;
pub use self::types::{Config, ExpandConfig, OntoRankToml, RankConfig, SegmentConfig};
use crate::error::Result;
use std::path::Path;

impl Config {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overlaid with `ontorank.toml` from the working directory.
    /// A missing or broken file leaves the defaults in place.
    #[must_use]
    pub fn load() -> Self {
        let mut config = Self::new();
        io::load_toml_config(&mut config, Path::new(CONFIG_FILE));
        config
    }

    /// Strict load of one file.
    ///
    /// # Errors
    /// Returns `Io` if unreadable, `Config` if the TOML is invalid.
    pub fn from_path(path: &Path) -> Result<Self> {
        let mut config = Self::new();
        io::apply(&mut config, io::read_toml(path)?);
        Ok(config)
    }

    /// # Errors
    /// Returns `Config` if the TOML is invalid.
    pub fn parse_toml(&mut self, content: &str) -> Result<()> {
        io::apply(self, io::parse_toml(content)?);
        Ok(())
    }

    /// Writes the current settings to `ontorank.toml`.
    ///
    /// # Errors
    /// Returns error if file write fails.
    pub fn save(&self) -> Result<()> {
        self.save_to(Path::new(CONFIG_FILE))
    }

    /// Settings as ontorank.toml text.
    ///
    /// # Errors
    /// Returns `Config` if serialization fails.
    pub fn to_toml_string(&self) -> Result<String> {
        io::to_toml_string(self)
    }

    /// # Errors
    /// Returns error if file write fails.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        io::save_to_file(self, path)
    }
}
