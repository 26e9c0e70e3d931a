//! Configuration management for odocgen.
//!
//! This module provides configuration loading, saving, and defaults.
//! Configuration is stored in TOML format in a platform-appropriate location.

use crate::error::{OdocError, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Main configuration structure for odocgen.
///
/// ## Example Configuration File (odocgen.toml)
///
/// ```toml
/// [general]
/// log_level = "warn"
///
/// [links]
/// class_dir = "class"
/// extension = "html"
/// target = "_blank"
///
/// [page]
/// title = "odocgen"
/// branch = "17.0"
///
/// [ui]
/// page_size = 10
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// Where rows link to
    pub links: LinksConfig,

    /// Static page settings
    pub page: PageConfig,

    /// Interactive UI settings
    pub ui: UiConfig,
}

/// General configuration options
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        GeneralConfig {
            log_level: "warn".to_string(),
        }
    }
}

/// Link layout of the generated class pages
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LinksConfig {
    /// Directory holding one page per class, relative to the index page
    pub class_dir: String,

    /// Extension of class pages
    pub extension: String,

    /// Browsing context links open in
    pub target: String,
}

impl Default for LinksConfig {
    fn default() -> Self {
        LinksConfig {
            class_dir: "class".to_string(),
            extension: "html".to_string(),
            target: "_blank".to_string(),
        }
    }
}

/// Static page configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// Page title
    pub title: String,

    /// Documented branch, shown as `[branch]` when non-empty
    pub branch: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        PageConfig {
            title: "odocgen".to_string(),
            branch: String::new(),
        }
    }
}

/// UI configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Rows moved by PageUp/PageDown
    pub page_size: usize,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig { page_size: 10 }
    }
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Returns default config if no config file exists.
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path()?;
        Self::load_from(&config_path)
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Config::default());
        }

        info!(path = %path.display(), "Loading configuration");
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents).map_err(|e| OdocError::ConfigError {
            reason: format!("Failed to parse config: {}", e),
        })?;

        Ok(config)
    }

    /// Save configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        info!(path = %path.display(), "Saving configuration");
        let contents = toml::to_string_pretty(self).map_err(|e| OdocError::ConfigError {
            reason: format!("Failed to serialize config: {}", e),
        })?;

        fs::write(path, contents)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", "odocgen").ok_or_else(|| OdocError::ConfigError {
            reason: "Could not determine config directory".to_string(),
        })?;

        Ok(dirs.config_dir().join("odocgen.toml"))
    }
}
