//! Batch configuration
//!
//! The configuration names the applications to translate (in order), the
//! cache root and the language API endpoint. It is read once before a run.

pub mod errors;

pub use errors::*;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Environment variable consulted when no `--config` flag is given
pub const CONFIG_ENV_VAR: &str = "LANGBATCH_CONFIG";
/// Config file used when neither the flag nor the environment variable is set
pub const DEFAULT_CONFIG_FILE: &str = "langbatch.yml";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Top-level configuration file
#[derive(Debug, Clone, Deserialize)]
pub struct BatchConfig {
    pub system: SystemSettings,
    pub api: ApiSettings,
}

/// What to translate and where to put it
#[derive(Debug, Clone, Deserialize)]
pub struct SystemSettings {
    #[serde(default, deserialize_with = "ordered_targets")]
    pub translated_applications: Vec<TranslationTarget>,
    pub paths: PathSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PathSettings {
    pub root: PathBuf,
}

/// Language API endpoint settings
#[derive(Debug, Clone, Deserialize)]
pub struct ApiSettings {
    pub base_url: Url,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub user_agent: Option<String>,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl ApiSettings {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: None,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// An application and the languages it must be translated to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationTarget {
    pub application: String,
    pub languages: Vec<String>,
}

impl TranslationTarget {
    pub fn new<S: Into<String>>(application: S, languages: &[&str]) -> Self {
        Self {
            application: application.into(),
            languages: languages.iter().map(|l| l.to_string()).collect(),
        }
    }
}

impl SystemSettings {
    pub fn new<P: Into<PathBuf>>(root: P, translated_applications: Vec<TranslationTarget>) -> Self {
        Self {
            translated_applications,
            paths: PathSettings { root: root.into() },
        }
    }

    pub fn root(&self) -> &Path {
        &self.paths.root
    }
}

impl BatchConfig {
    /// Load the configuration, choosing the parser from the file extension
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        debug!("Loading configuration from {}", path.display());
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yml") | Some("yaml") => Self::from_yaml_str(&content),
            Some("toml") => Self::from_toml_str(&content),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or_default().to_string(),
            )),
        }
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }
}

/// Resolve the config file location.
///
/// Resolution order:
/// 1. the `--config` flag
/// 2. the `LANGBATCH_CONFIG` environment variable
/// 3. `langbatch.yml` in the current directory
pub fn resolve_config_path(cli_path: Option<&Path>) -> PathBuf {
    resolve_config_path_from(cli_path, std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from))
}

fn resolve_config_path_from(cli_path: Option<&Path>, env_path: Option<PathBuf>) -> PathBuf {
    if let Some(path) = cli_path {
        debug!("Using config from --config: {}", path.display());
        path.to_path_buf()
    } else if let Some(path) = env_path {
        debug!("Using {}: {}", CONFIG_ENV_VAR, path.display());
        path
    } else {
        PathBuf::from(DEFAULT_CONFIG_FILE)
    }
}

// Keeps the mapping's key order, which serde's map types would not.
fn ordered_targets<'de, D>(deserializer: D) -> Result<Vec<TranslationTarget>, D::Error>
where
    D: Deserializer<'de>,
{
    struct TargetsVisitor;

    impl<'de> Visitor<'de> for TargetsVisitor {
        type Value = Vec<TranslationTarget>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a mapping of application name to a list of languages")
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut targets = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((application, languages)) = map.next_entry::<String, Vec<String>>()? {
                targets.push(TranslationTarget {
                    application,
                    languages,
                });
            }
            Ok(targets)
        }
    }

    deserializer.deserialize_map(TargetsVisitor)
}
