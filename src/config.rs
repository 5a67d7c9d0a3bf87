//! Configuration file support
//!
//! Loads settings from ~/.highlight.toml (or %USERPROFILE%\.highlight.toml
//! on Windows)
//!
//! Example:
//! ```toml
//! # default output format: html, html-css, rtf, xml or ansi
//! format = "html-css"
//! # extra definitions, overriding built-ins of the same name
//! definitions = "/home/me/.config/highlight/definitions.toml"
//! builtin = true
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::Result;
use crate::render::OutputFormat;

/// Configuration settings
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
    /// Output format used when none is given on the command line
    pub format: OutputFormat,
    /// Definitions file loaded on top of the built-ins
    pub definitions: Option<PathBuf>,
    /// Whether the built-in definitions are available
    pub builtin: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            definitions: None,
            builtin: true,
        }
    }
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(windows)]
        {
            std::env::var("USERPROFILE")
                .ok()
                .map(|home| PathBuf::from(home).join(".highlight.toml"))
        }

        #[cfg(not(windows))]
        {
            std::env::var("HOME")
                .ok()
                .map(|home| PathBuf::from(home).join(".highlight.toml"))
        }
    }

    /// Load configuration from the default location.
    ///
    /// A missing file gives the defaults; an unreadable or malformed one
    /// is reported and also gives the defaults.
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_or_default(&path),
            _ => Config::default(),
        }
    }

    fn load_or_default(path: &Path) -> Self {
        match Self::load_from(path) {
            Ok(config) => config,
            Err(e) => {
                warn!("Ignoring {}: {}", path.display(), e);
                Config::default()
            }
        }
    }

    /// Load configuration from `path`, failing on any error
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config = Self::parse(&contents)?;
        debug!("Loaded config from {}: {:?}", path.display(), config);
        Ok(config)
    }

    /// Parse config file contents
    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }
}
