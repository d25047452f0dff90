//! Error types for configuration loading

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading the batch configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Unsupported config format: {0} (expected .yml, .yaml or .toml)")]
    UnsupportedFormat(String),
}
