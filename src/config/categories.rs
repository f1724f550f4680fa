//! Category seed configuration loaded from config.toml
//!
//! The categories listed in config.toml are created on startup when they are
//! missing, so a fresh database already offers sensible choices.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Category names to seed
    #[serde(default)]
    pub categories: Vec<CategoryConfig>,
}

/// Configuration for a single seeded category
#[derive(Debug, Deserialize, Clone)]
pub struct CategoryConfig {
    /// Name of the category; normalized the same way as user input
    pub name: String,
}

/// Loads category configuration from a TOML file
///
/// # Errors
/// Returns an error if the file cannot be read or the TOML is invalid.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads category configuration from the default location (./config.toml)
pub fn load_default_config() -> Result<Config> {
    load_config("config.toml")
}
