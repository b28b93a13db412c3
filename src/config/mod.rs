//! Configuration system for serialquill.
//!
//! Configuration is loaded from `~/.config/serialquill/config.toml` when it
//! exists. Missing fields take their defaults, and command-line flags override
//! whatever the file says.
//!
//! # Example
//!
//! ```
//! use serialquill::config::Config;
//!
//! let config = Config::default();
//! assert!(config.show_context);
//! assert_eq!(config.log_level, "warn");
//!
//! let custom = Config {
//!     pretty_context: false,
//!     ..Config::default()
//! };
//! assert!(!custom.pretty_context);
//! ```

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for the serialquill application.
///
/// * `show_context` - Print the container of each match (default: true)
/// * `pretty_context` - Indent printed contexts (default: true)
/// * `log_level` - Default tracing filter when `RUST_LOG` is unset (default: "warn")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Print the container of each match
    #[serde(default = "default_show_context")]
    pub show_context: bool,

    /// Indent printed contexts as multi-line JSON
    #[serde(default = "default_pretty_context")]
    pub pretty_context: bool,

    /// Default tracing filter directive
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_show_context() -> bool {
    true
}

fn default_pretty_context() -> bool {
    true
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            show_context: default_show_context(),
            pretty_context: default_pretty_context(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Returns the path to the config file.
    ///
    /// Uses `~/.config/serialquill/config.toml` on all platforms.
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|mut path| {
            path.push(".config");
            path.push("serialquill");
            path.push("config.toml");
            path
        })
    }

    /// Loads configuration from the default config file.
    ///
    /// Returns the default configuration if the file doesn't exist or can't be read.
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Loads configuration from a specific file, falling back to defaults.
    pub fn load_from(path: &Path) -> Self {
        Self::try_load_from(path).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), error = %format!("{:#}", e), "ignoring invalid config file");
            Self::default()
        })
    }

    /// Like [`Config::load`], but reports an unreadable or invalid file
    /// instead of falling back to defaults.
    pub fn try_load() -> anyhow::Result<Self> {
        match Self::config_path() {
            Some(path) => Self::try_load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Loads configuration from a specific file. A missing file yields the
    /// defaults.
    pub fn try_load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Saves configuration to the default config file.
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        self.save_to(&config_path)
    }

    /// Saves configuration to a specific file.
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config = toml::from_str("pretty_context = false").unwrap();
        assert!(!config.pretty_context);
        assert!(config.show_context);
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_missing_file_is_default() {
        let config = Config::load_from(Path::new("/no/such/dir/config.toml"));
        assert_eq!(config, Config::default());
    }
}
