//! Locator configuration.
//!
//! Read from an optional TOML file. Every field has a default, so an empty
//! file (or no file at all) gives the built-in behavior.

use crate::error::{LocatorError, Result};
use serde::Deserialize;
use std::path::Path;

pub const DEFAULT_QUARTER: &str = "Q3 2025";
pub const DEFAULT_WORD: &str = "holiday";

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LocatorConfig {
    /// Quarter searched when none is given on the command line
    pub default_quarter: String,

    /// Word searched when none is given on the command line
    pub default_word: String,

    pub verify: VerifyConfig,

    pub debug: DebugConfig,

    pub excerpts: ExcerptsConfig,
}

/// Settings for the verification report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VerifyConfig {
    /// Characters of context shown either side of a match
    pub window: usize,
}

/// Settings for the debug report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DebugConfig {
    /// Characters of context shown either side of a match
    pub window: usize,
}

/// Settings for sentence excerpts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExcerptsConfig {
    /// Most excerpts listed per report
    pub max: usize,
}

impl Default for LocatorConfig {
    fn default() -> Self {
        Self {
            default_quarter: DEFAULT_QUARTER.to_string(),
            default_word: DEFAULT_WORD.to_string(),
            verify: VerifyConfig::default(),
            debug: DebugConfig::default(),
            excerpts: ExcerptsConfig::default(),
        }
    }
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self { window: 100 }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self { window: 50 }
    }
}

impl Default for ExcerptsConfig {
    fn default() -> Self {
        Self { max: 10 }
    }
}

impl LocatorConfig {
    /// Parse configuration from TOML text.
    ///
    /// `path` is only used to label errors.
    pub fn from_toml(toml: &str, path: &Path) -> Result<Self> {
        toml::from_str(toml).map_err(|source| LocatorError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load configuration from `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&content, path)?;
        tracing::debug!(path = %path.display(), ?config, "loaded configuration");
        Ok(config)
    }

    /// Load from `path` if given, otherwise use the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}
