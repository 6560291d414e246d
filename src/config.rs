//! Configuration types and loading
//!
//! YAML config with a fallback chain: explicit `--config` path, then
//! `.shiftboss.yml` in the working directory, then the user config dir,
//! then built-in defaults.

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::session::DEFAULT_WRAP_WIDTH;

/// Project-local config file name
const LOCAL_CONFIG: &str = ".shiftboss.yml";

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default log level (CLI --log-level takes priority)
    #[serde(rename = "log-level")]
    pub log_level: Option<String>,

    /// Console UI configuration
    pub ui: UiConfig,
}

/// Console UI configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Event poll tick interval in milliseconds
    #[serde(rename = "tick-rate-ms")]
    pub tick_rate_ms: u64,

    /// Capture mouse events for log scrolling
    #[serde(rename = "mouse-capture")]
    pub mouse_capture: bool,

    /// Word-wrap column for scenario details
    #[serde(rename = "wrap-width")]
    pub wrap_width: usize,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: 33, // ~30 FPS
            mouse_capture: true,
            wrap_width: DEFAULT_WRAP_WIDTH,
        }
    }
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, it must load
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try project-local config: .shiftboss.yml
        let local_config = PathBuf::from(LOCAL_CONFIG);
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        // Try user config: ~/.config/shiftboss/shiftboss.yml
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("shiftboss").join("shiftboss.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        // No config file found, use defaults
        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Read just the log level, before logging is initialized
    ///
    /// Errors are swallowed here: if the config is broken, full loading will
    /// report it once logging exists.
    pub fn load_log_level(config_path: Option<&PathBuf>) -> Option<String> {
        let path = match config_path {
            Some(path) => path.clone(),
            None => {
                let local = PathBuf::from(LOCAL_CONFIG);
                if local.exists() {
                    local
                } else {
                    dirs::config_dir()?.join("shiftboss").join("shiftboss.yml")
                }
            }
        };

        let content = fs::read_to_string(path).ok()?;
        let config: Config = serde_yaml::from_str(&content).ok()?;
        config.log_level
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.log_level.is_none());
        assert_eq!(config.ui.tick_rate_ms, 33);
        assert!(config.ui.mouse_capture);
        assert_eq!(config.ui.wrap_width, 80);
    }

    #[test]
    fn test_load_explicit_path() {
        let mut file = NamedTempFile::new().expect("temp file");
        writeln!(
            file,
            "log-level: DEBUG\nui:\n  tick-rate-ms: 50\n  mouse-capture: false\n  wrap-width: 60"
        )
        .expect("write yaml");

        let config = Config::load(Some(&file.path().to_path_buf())).expect("load config");
        assert_eq!(config.log_level.as_deref(), Some("DEBUG"));
        assert_eq!(config.ui.tick_rate_ms, 50);
        assert!(!config.ui.mouse_capture);
        assert_eq!(config.ui.wrap_width, 60);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let mut file = NamedTempFile::new().expect("temp file");
        writeln!(file, "ui:\n  tick-rate-ms: 100").expect("write yaml");

        let config = Config::load(Some(&file.path().to_path_buf())).expect("load config");
        assert_eq!(config.ui.tick_rate_ms, 100);
        assert!(config.ui.mouse_capture);
        assert_eq!(config.ui.wrap_width, 80);
    }

    #[test]
    fn test_explicit_path_must_exist() {
        let missing = PathBuf::from("/nonexistent/shiftboss.yml");
        assert!(Config::load(Some(&missing)).is_err());
    }

    #[test]
    fn test_malformed_yaml_is_an_error() {
        let mut file = NamedTempFile::new().expect("temp file");
        writeln!(file, "ui: [not, a, mapping").expect("write yaml");

        assert!(Config::load(Some(&file.path().to_path_buf())).is_err());
    }

    #[test]
    fn test_load_log_level_from_explicit_path() {
        let mut file = NamedTempFile::new().expect("temp file");
        writeln!(file, "log-level: TRACE").expect("write yaml");

        let level = Config::load_log_level(Some(&file.path().to_path_buf()));
        assert_eq!(level.as_deref(), Some("TRACE"));
    }
}
