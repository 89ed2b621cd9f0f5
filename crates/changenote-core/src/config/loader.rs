//! Configuration loading
//!
//! Configuration is discovered by walking from the working directory towards
//! the filesystem root. Each directory is checked for the known file names
//! first, then its `.github/` subdirectory.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::{ConfigError, Result};

use super::defaults::config_file_names;
use super::types::Config;
use super::validation::validate_config;

/// Syntax of a configuration file, decided by its extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFileFormat {
    Yaml,
    Toml,
}

impl ConfigFileFormat {
    /// `.toml` files are TOML, everything else is read as YAML
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Self::Toml,
            _ => Self::Yaml,
        }
    }

    /// Parse and validate configuration text
    pub fn parse(self, content: &str) -> Result<Config> {
        let config: Config = match self {
            Self::Toml => toml::from_str(content).map_err(ConfigError::TomlError)?,
            Self::Yaml => serde_yaml::from_str(content).map_err(ConfigError::YamlError)?,
        };
        validate_config(&config)?;
        Ok(config)
    }
}

/// Load and validate configuration from a file
pub fn load_config(path: &Path) -> Result<Config> {
    let format = ConfigFileFormat::from_path(path);
    info!(path = %path.display(), ?format, "loading config");

    let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config = format.parse(&content)?;
    debug!(path = %path.display(), "config loaded and validated");
    Ok(config)
}

/// Paths checked for a configuration file in a single directory, in order
fn candidate_paths(dir: &Path) -> impl Iterator<Item = PathBuf> + '_ {
    let github = dir.join(".github");
    let names = config_file_names();
    names
        .clone()
        .into_iter()
        .map(move |name| dir.join(name))
        .chain(names.into_iter().map(move |name| github.join(name)))
}

/// Find the nearest configuration file at or above `start_dir`
pub fn find_config(start_dir: &Path) -> Option<PathBuf> {
    let found = start_dir
        .ancestors()
        .flat_map(candidate_paths)
        .find(|path| path.is_file());

    match &found {
        Some(path) => info!(path = %path.display(), "found config file"),
        None => debug!(start_dir = %start_dir.display(), "no config file found"),
    }
    found
}

/// Find and load the nearest configuration, failing when there is none
pub fn discover_config(dir: &Path) -> Result<(Config, PathBuf)> {
    let path = find_config(dir).ok_or_else(|| ConfigError::NotFound(dir.to_path_buf()))?;
    Ok((load_config(&path)?, path))
}

/// Load configuration or fall back to defaults when no file exists.
///
/// A config file that exists but fails to parse or validate is an error.
pub fn load_config_or_default(dir: &Path) -> Result<(Config, Option<PathBuf>)> {
    match find_config(dir) {
        Some(path) => Ok((load_config(&path)?, Some(path))),
        None => {
            warn!(dir = %dir.display(), "no config found, using defaults");
            Ok((Config::default(), None))
        }
    }
}
