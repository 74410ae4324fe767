//! Configuration file handling.
//!
//! Settings live in `<config_dir>/enex2html/config.toml`. Every key is
//! optional; a missing file means defaults.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::emit::{EmitOptions, RelinkPolicy};
use crate::enex::ExtractOptions;
use crate::files::filename;
use crate::rewrite::RewriteOptions;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub output: OutputConfig,
    pub naming: NamingConfig,
    pub images: ImagesConfig,
    pub rewrite: RewriteConfig,
}

/// Where converted exports go.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Parent of the per-run `<timestamp>/<archive>/` folders.
    pub root: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("output"),
        }
    }
}

/// Safe-name generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamingConfig {
    /// Safe names are cut to this many characters (minimum 1).
    pub max_length: usize,
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self { max_length: 70 }
    }
}

/// Image rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImagesConfig {
    /// Images declared wider than this are rendered at 100% width.
    pub max_inline_width: u32,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            max_inline_width: RelinkPolicy::default().max_inline_width,
        }
    }
}

/// Optional content rewrite passes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewriteConfig {
    pub tables: bool,
    pub emphasis: bool,
}

impl Config {
    /// Default location of the configuration file.
    pub fn config_path() -> Result<PathBuf> {
        let dir = dirs::config_dir().context("Could not determine config directory")?;
        Ok(dir.join("enex2html").join("config.toml"))
    }

    /// Loads the configuration from the default location.
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Ok(path) => Self::load_from(&path),
            Err(_) => Ok(Self::default()),
        }
    }

    /// Loads the configuration from `path`; a missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Parses configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn naming(&self) -> filename::Config {
        filename::Config::new(self.naming.max_length)
    }

    pub fn extract_options(&self) -> ExtractOptions {
        ExtractOptions {
            naming: self.naming(),
            rewrite: RewriteOptions {
                tables: self.rewrite.tables,
                emphasis: self.rewrite.emphasis,
            },
        }
    }

    pub fn emit_options(&self) -> EmitOptions {
        EmitOptions {
            naming: self.naming(),
            relink: RelinkPolicy {
                max_inline_width: self.images.max_inline_width,
            },
        }
    }
}
