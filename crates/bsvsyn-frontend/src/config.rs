//! Parser configuration
//!
//! Settings are read from a `bsvsyn.toml` file:
//!
//! ```toml
//! [parser]
//! max_depth = 512
//!
//! [output]
//! format = "json"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the configuration file searched for next to the sources
pub const CONFIG_FILE_NAME: &str = "bsvsyn.toml";

/// Default nesting limit for expressions, statements and types
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors that can occur while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error reading the configuration file
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// TOML parsing error
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value that parses but cannot be used
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Limits applied while parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParseConfig {
    /// Maximum nesting of expressions, statements and types before the parser
    /// reports an error instead of descending further
    pub max_depth: usize,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Format used when printing trees and diagnostics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

/// Contents of a `bsvsyn.toml` file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub parser: ParseConfig,
    pub output: OutputConfig,
}

impl Config {
    /// Parse configuration from a string
    pub fn from_str(s: &str) -> Result<Self> {
        let config: Config = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a file path
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!("loaded configuration from {}", path.display());
        Self::from_str(&contents)
    }

    fn validate(&self) -> Result<()> {
        if self.parser.max_depth == 0 {
            return Err(ConfigError::Invalid(
                "parser.max_depth must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Find a configuration file by searching upward from `start_path`
///
/// Only three directory levels are searched, to avoid picking up an
/// unrelated configuration higher up the tree.
pub fn find_config(start_path: &Path) -> Option<PathBuf> {
    let mut current = start_path.to_path_buf();

    if current.is_file() {
        current = current.parent()?.to_path_buf();
    }

    for _ in 0..3 {
        let candidate = current.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            return Some(candidate);
        }

        match current.parent() {
            Some(parent) => current = parent.to_path_buf(),
            None => return None,
        }
    }

    None
}
