//! Configuration management.

use anyhow::{Context as _, Result};
use directories::{BaseDirs, ProjectDirs};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::output::OutputFormat;

/// Environment variable overriding the config file location
pub const CONFIG_ENV: &str = "TSM_CONFIG";

/// CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Titanium SDK root directory.
    pub sdk_dir: Option<PathBuf>,

    /// Platform builds are selected for.
    pub os: Option<String>,

    /// Interpreter for helper scripts.
    pub python: Option<String>,

    /// Default output format.
    pub output_format: Option<OutputFormat>,

    /// Build server root, e.g. `http://builds.appcelerator.com.s3.amazonaws.com/mobile/`.
    pub catalog_url: Option<String>,
}

impl Config {
    /// Get the config file path.
    pub fn path() -> Result<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV).filter(|p| !p.is_empty()) {
            return Ok(PathBuf::from(path));
        }

        let dirs = ProjectDirs::from("com", "tsm-rs", "tsm")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Load configuration from file.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Invalid configuration in {}", path.display()))?;

        Ok(config)
    }

    /// Save configuration to file.
    pub fn save(&self) -> Result<()> {
        let path = Self::path()?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(&path, content)?;

        Ok(())
    }

    /// Set a key from its string form.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "sdk_dir" | "dir" => self.sdk_dir = Some(PathBuf::from(value)),
            "os" => self.os = Some(value.to_string()),
            "python" => self.python = Some(value.to_string()),
            "output_format" | "output" => self.output_format = Some(value.parse()?),
            "catalog_url" => self.catalog_url = Some(value.to_string()),
            _ => anyhow::bail!(
                "Unknown config key: {key}\n\n\
                 Available keys:\n  \
                 sdk_dir        - Titanium SDK root directory\n  \
                 os             - Platform to install builds for (osx/linux/win32)\n  \
                 python         - Interpreter for helper scripts\n  \
                 output_format  - Default output format (pretty/json/yaml)\n  \
                 catalog_url    - Build server root URL"
            ),
        }
        Ok(())
    }
}

/// Default SDK root for this machine.
pub fn default_sdk_dir() -> Option<PathBuf> {
    let base = BaseDirs::new()?;
    let dir = if cfg!(target_os = "macos") {
        base.home_dir().join("Library/Application Support/Titanium")
    } else if cfg!(windows) {
        base.data_dir().join("Titanium")
    } else {
        base.home_dir().join(".titanium")
    };
    Some(dir)
}

/// Build server platform name for the host OS.
pub fn default_os() -> String {
    match std::env::consts::OS {
        "macos" => "osx".to_string(),
        "windows" => "win32".to_string(),
        other => other.to_string(),
    }
}
