//! Configuration for xcproj-lint.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Resource extensions that are commonly only partially localized by
/// design; localization gaps on these downgrade to warnings outside
/// strict mode.
pub const DEFAULT_MEDIA_EXTENSIONS: &[&str] = &[".jpg", ".png", ".pdf", ".mov", ".mp4"];

/// Path substrings always excluded from the filesystem scan.
pub const DEFAULT_IGNORE: &[&str] = &[
    "PodFile",
    "Podfile.lock",
    "Frameworks",
    ".xcassets",
    ".xcdatamodel",
    ".xcworkspace",
    "xcuserdata",
    ".pbxproj",
    ".git",
];

/// Top-level configuration for xcproj-lint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Treat every localization gap as an error, regardless of
    /// resource extension. CLI `--strict` overrides this to true.
    #[serde(default)]
    pub strict: bool,

    /// Media extensions eligible for the localization leniency,
    /// leading dot included. Replaces the default set when present.
    #[serde(default = "default_media_extensions")]
    pub media_extensions: Vec<String>,

    /// Extra path substrings to exclude from the filesystem scan,
    /// appended to the built-in ignore list.
    #[serde(default)]
    pub ignore: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            strict: false,
            media_extensions: default_media_extensions(),
            ignore: Vec::new(),
        }
    }
}

fn default_media_extensions() -> Vec<String> {
    DEFAULT_MEDIA_EXTENSIONS.iter().map(|s| (*s).to_owned()).collect()
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// The full exclusion list: built-in substrings plus configured extras.
    #[must_use]
    pub fn effective_ignore(&self) -> Vec<String> {
        DEFAULT_IGNORE
            .iter()
            .map(|s| (*s).to_owned())
            .chain(self.ignore.iter().cloned())
            .collect()
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },
}
