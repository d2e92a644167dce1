// src/config.rs
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::core::format::DEFAULT_UNAVAILABLE;

pub const CONFIG_FILE_NAME: &str = ".savcalc.toml";

/// Attribute names that mark up the calculator on a page.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Markup {
    /// Carried by the form holding the input fields.
    pub input_attribute: String,
    /// Carried by each coefficient element; the value is the coefficient name.
    pub coefficient_attribute: String,
    /// Carried by each result element; the value is the result name.
    pub result_attribute: String,
}

impl Default for Markup {
    fn default() -> Self {
        Self {
            input_attribute: String::from("calculator-input"),
            coefficient_attribute: String::from("calculator-variable"),
            result_attribute: String::from("calculator-result"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Display {
    /// Shown instead of a value that is infinite or not a number.
    pub unavailable: String,
}

impl Default for Display {
    fn default() -> Self {
        Self {
            unavailable: String::from(DEFAULT_UNAVAILABLE),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub markup: Markup,
    pub display: Display,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config file {path:?}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl Config {
    /// Parses a config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid config.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Loads the nearest `.savcalc.toml`, starting at `dir` and moving up through
/// its parents. Defaults apply when no file is found.
///
/// # Errors
///
/// This function may return an error if:
/// * A config file exists but cannot be read
/// * The config file is not valid TOML or has unknown keys
pub fn load_config(dir: &Path) -> Result<Config, ConfigError> {
    let mut current_dir = dir.to_path_buf();
    let mut visited = HashSet::new();

    while visited.insert(current_dir.clone()) {
        let candidate = current_dir.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            tracing::debug!(path = %candidate.display(), "using config file");
            return Config::from_file(&candidate);
        }

        match current_dir.parent() {
            Some(parent) => current_dir = parent.to_path_buf(),
            None => break,
        }
    }

    Ok(Config::default())
}
