//! Configuration and settings management for PRGKit
//!
//! Provides configuration file handling and validation. Supports JSON
//! and TOML file formats stored in the platform config directory.
//!
//! The core holds no global state: loading returns the persisted
//! values, saving takes them. The only setting the analyzer cares
//! about is the operator's last-used G-factor.

use prgkit_core::error::{ConfigError, Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Analysis settings
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AnalysisSettings {
    /// Last-used G-factor (multiple of standard gravity).
    pub g_factor: f64,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self { g_factor: 0.5 }
    }
}

/// Complete application configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default)]
pub struct Config {
    /// Analysis settings
    #[serde(default)]
    pub analysis: AnalysisSettings,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;

        let config: Self = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content).map_err(|e| {
                Error::Config(ConfigError::Invalid {
                    reason: format!("invalid JSON config: {}", e),
                })
            })?
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            toml::from_str(&content).map_err(|e| {
                Error::Config(ConfigError::Invalid {
                    reason: format!("invalid TOML config: {}", e),
                })
            })?
        } else {
            return Err(ConfigError::UnsupportedExtension {
                path: path.display().to_string(),
            }
            .into());
        };

        config.validate()?;
        Ok(config)
    }

    /// Load config from file, falling back to defaults when the file is
    /// missing or unreadable. Used at startup where a broken config
    /// should not block an analysis run.
    pub fn load_or_default(path: &Path) -> Self {
        Self::load_from_file(path).unwrap_or_default()
    }

    /// Save config to file (JSON or TOML)
    ///
    /// Creates the parent directory when needed.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        self.validate()?;

        let content = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::to_string_pretty(self).map_err(|e| {
                Error::Config(ConfigError::Invalid {
                    reason: format!("failed to serialize config: {}", e),
                })
            })?
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            toml::to_string_pretty(self).map_err(|e| {
                Error::Config(ConfigError::Invalid {
                    reason: format!("failed to serialize config: {}", e),
                })
            })?
        } else {
            return Err(ConfigError::UnsupportedExtension {
                path: path.display().to_string(),
            }
            .into());
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.analysis.g_factor <= 0.0 || !self.analysis.g_factor.is_finite() {
            return Err(ConfigError::Invalid {
                reason: format!(
                    "g_factor must be positive and finite, got {}",
                    self.analysis.g_factor
                ),
            }
            .into());
        }
        Ok(())
    }
}

/// Platform config file location: `<config dir>/prgkit/config.toml`.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("prgkit")
        .join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_g_factor() {
        assert_eq!(Config::default().analysis.g_factor, 0.5);
    }

    #[test]
    fn test_toml_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::new();
        config.analysis.g_factor = 1.25;
        config.save_to_file(&path).unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert_eq!(loaded.analysis.g_factor, 1.25);
    }

    #[test]
    fn test_json_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = Config::new();
        config.analysis.g_factor = 0.75;
        config.save_to_file(&path).unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert_eq!(loaded.analysis.g_factor, 0.75);
    }

    #[test]
    fn test_unsupported_extension_rejected() {
        let err = Config::new()
            .save_to_file(Path::new("/tmp/config.ini"))
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_validate_rejects_nonpositive_g_factor() {
        let mut config = Config::new();
        config.analysis.g_factor = 0.0;
        assert!(config.validate().is_err());
        config.analysis.g_factor = -1.0;
        assert!(config.validate().is_err());
        config.analysis.g_factor = 0.5;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_or_default_on_missing_file() {
        let config = Config::load_or_default(Path::new("/nonexistent/config.toml"));
        assert_eq!(config.analysis.g_factor, 0.5);
    }
}
