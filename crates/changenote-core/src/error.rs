//! Error types for changenote

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using ChangenoteError
pub type Result<T> = std::result::Result<T, ChangenoteError>;

/// Main error type for changenote operations
#[derive(Debug, Error)]
pub enum ChangenoteError {
    /// Configuration-related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Placeholder rewrite errors
    #[error(transparent)]
    Rewrite(#[from] RewriteError),

    /// Release finalization errors
    #[error(transparent)]
    Finalize(#[from] FinalizeError),

    /// Version-related errors
    #[error(transparent)]
    Version(#[from] VersionError),
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found at {0}")]
    NotFound(PathBuf),

    /// Invalid configuration value
    #[error("Invalid configuration: {field} - {message}")]
    InvalidValue { field: String, message: String },

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// IO error
    #[error("IO error reading config: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while rewriting the version placeholder
#[derive(Debug, Error)]
pub enum RewriteError {
    /// Rewrite root could not be resolved
    #[error("Rewrite root {path} could not be resolved: {source}")]
    Root {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Directory walk failed
    #[error("Failed to walk {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    /// File could not be read (or is not valid UTF-8)
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File could not be written back
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Placeholder pattern does not compile
    #[error("Invalid placeholder pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Release finalization errors
#[derive(Debug, Error)]
pub enum FinalizeError {
    /// The finalize command could not be started
    #[error("Failed to run finalize command '{command}': {message}")]
    SpawnFailed { command: String, message: String },
}

/// Version-related errors
#[derive(Debug, Error)]
pub enum VersionError {
    /// Version identifier is empty
    #[error("Version identifier cannot be empty")]
    Empty,
}
