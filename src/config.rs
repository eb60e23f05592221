//! Application configuration
//!
//! Applications are described by a small TOML document:
//!
//! ```toml
//! [app]
//! name = "blog"
//! debug = true
//!
//! [templating]
//! directory = "templates"
//! extension = "html"
//!
//! [parameters]
//! greeting = "Hello"
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::template::DEFAULT_EXTENSION;

/// Errors that can occur when loading or parsing configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Top-level application configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// General application settings
    pub app: AppSection,
    /// Template engine settings; no engine is registered without it
    pub templating: Option<TemplatingConfig>,
    /// String parameters exposed as `param.<key>` services
    pub parameters: BTreeMap<String, String>,
}

/// The `[app]` section
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppSection {
    pub name: String,
    pub debug: bool,
}

impl Default for AppSection {
    fn default() -> Self {
        Self {
            name: "podium".to_string(),
            debug: false,
        }
    }
}

/// The `[templating]` section
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TemplatingConfig {
    /// Template directory, relative to the config file
    pub directory: PathBuf,
    /// Extension appended to template names without one
    #[serde(default = "default_extension")]
    pub extension: String,
}

fn default_extension() -> String {
    DEFAULT_EXTENSION.to_string()
}

impl TemplatingConfig {
    /// Create a templating section for a directory
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            extension: default_extension(),
        }
    }

    /// Set the template extension
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }
}

impl AppConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load configuration from a TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Set the application name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.app.name = name.into();
        self
    }

    /// Enable or disable debug mode
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.app.debug = debug;
        self
    }

    /// Set the templating section
    pub fn with_templating(mut self, templating: TemplatingConfig) -> Self {
        self.templating = Some(templating);
        self
    }

    /// Add a string parameter
    pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }
}
