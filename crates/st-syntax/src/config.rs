//! Parser configuration.
//!
//! Settings live under a `[parser]` table so they can share a file with
//! other tools:
//!
//! ```toml
//! [parser]
//! max_depth = 128
//! incremental = true
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default bound on nested syntax nodes.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Smallest accepted nesting bound. Lower values could not hold a unit with
/// a single statement.
pub const MIN_MAX_DEPTH: usize = 16;

/// Largest accepted nesting bound; deeper recursion risks the stack of a
/// spawned thread.
pub const MAX_MAX_DEPTH: usize = 1024;

/// Knobs for parsing and re-parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Maximum number of nested nodes. Deeper input is kept in the tree as
    /// an error node instead of being parsed.
    pub max_depth: usize,
    /// When `false`, every re-parse is a full parse.
    pub incremental: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            incremental: true,
        }
    }
}

/// Errors from loading a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path that was read.
        path: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// The text is not valid TOML or has unexpected keys.
    #[error("invalid parser config: {0}")]
    Toml(#[from] toml::de::Error),
    /// `max_depth` is out of range.
    #[error("parser.max_depth must be between {MIN_MAX_DEPTH} and {MAX_MAX_DEPTH}, got {0}")]
    MaxDepth(usize),
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigToml {
    parser: Option<ParserSection>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ParserSection {
    max_depth: Option<usize>,
    incremental: Option<bool>,
}

impl ParserSection {
    fn into_config(self) -> Result<ParserConfig, ConfigError> {
        let defaults = ParserConfig::default();
        let config = ParserConfig {
            max_depth: self.max_depth.unwrap_or(defaults.max_depth),
            incremental: self.incremental.unwrap_or(defaults.incremental),
        };
        config.validate()?;
        Ok(config)
    }
}

impl ParserConfig {
    /// Parses a configuration from TOML text. Missing keys keep their
    /// defaults; an empty document gives the default configuration.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let raw: ConfigToml = toml::from_str(text)?;
        raw.parser.unwrap_or_default().into_config()
    }

    /// Reads and parses a TOML configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Checks that the values are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_MAX_DEPTH..=MAX_MAX_DEPTH).contains(&self.max_depth) {
            return Err(ConfigError::MaxDepth(self.max_depth));
        }
        Ok(())
    }

    /// Returns the configuration with `max_depth` replaced.
    ///
    /// The parser clamps the value into `MIN_MAX_DEPTH..=MAX_MAX_DEPTH`;
    /// use [`ParserConfig::validate`] to reject it instead.
    #[must_use]
    pub fn with_max_depth(self, max_depth: usize) -> Self {
        Self { max_depth, ..self }
    }
}
